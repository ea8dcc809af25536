/// Axis selections and the immutable plot request built from them

/// Per-axis scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMode {
    #[default]
    Linear,
    Log,
}

impl ScaleMode {
    pub const ALL: [ScaleMode; 2] = [ScaleMode::Linear, ScaleMode::Log];

    pub fn label(&self) -> &'static str {
        match self {
            ScaleMode::Linear => "Linear",
            ScaleMode::Log => "Log",
        }
    }

    pub fn is_log(&self) -> bool {
        *self == ScaleMode::Log
    }
}

impl std::fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One axis: which column and how to scale it
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSelection {
    pub column: String,
    pub scale: ScaleMode,
}

impl AxisSelection {
    pub fn new(column: impl Into<String>, scale: ScaleMode) -> Self {
        Self {
            column: column.into(),
            scale,
        }
    }
}

/// Snapshot of the dropdowns at the moment Plot was pressed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest {
    pub x: AxisSelection,
    pub y: AxisSelection,
}

impl PlotRequest {
    pub fn new(x: AxisSelection, y: AxisSelection) -> Self {
        Self { x, y }
    }

    pub fn projection(&self) -> Projection {
        Projection::select(self.x.scale.is_log(), self.y.scale.is_log())
    }
}

/// The four plotting projections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Linear,
    SemilogX,
    SemilogY,
    LogLog,
}

impl Projection {
    pub fn select(x_log: bool, y_log: bool) -> Self {
        match (x_log, y_log) {
            (true, true) => Projection::LogLog,
            (true, false) => Projection::SemilogX,
            (false, true) => Projection::SemilogY,
            (false, false) => Projection::Linear,
        }
    }

    pub fn x_log(&self) -> bool {
        matches!(self, Projection::SemilogX | Projection::LogLog)
    }

    pub fn y_log(&self) -> bool {
        matches!(self, Projection::SemilogY | Projection::LogLog)
    }
}

impl std::fmt::Display for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Projection::Linear => write!(f, "linear"),
            Projection::SemilogX => write!(f, "semilog-x"),
            Projection::SemilogY => write!(f, "semilog-y"),
            Projection::LogLog => write!(f, "log-log"),
        }
    }
}
