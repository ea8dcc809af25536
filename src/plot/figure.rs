/// The rendered figure, the single plot surface the window draws and the
/// save action writes out.
///
/// Coordinates are stored already projected: a log axis holds `log10` of
/// the data. Points with no finite position under the projection are
/// dropped and break the line, so one column pair can yield several
/// segments.

use super::request::{PlotRequest, Projection};
use crate::data::table::ColumnTable;
use crate::error::PlotError;

/// Data extent in projected coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    fn around(point: [f64; 2]) -> Self {
        Self {
            x_min: point[0],
            x_max: point[0],
            y_min: point[1],
            y_max: point[1],
        }
    }

    fn extend(&mut self, point: [f64; 2]) {
        self.x_min = self.x_min.min(point[0]);
        self.x_max = self.x_max.max(point[0]);
        self.y_min = self.y_min.min(point[1]);
        self.y_max = self.y_max.max(point[1]);
    }
}

#[derive(Debug, Clone)]
pub struct Figure {
    projection: Projection,
    x_label: String,
    y_label: String,
    segments: Vec<Vec<[f64; 2]>>,
    bounds: Option<Bounds>,
    omitted: usize,
    /// Bumped on every clear so the view drops its zoom state
    generation: u32,
}

impl Default for Figure {
    fn default() -> Self {
        Self {
            projection: Projection::Linear,
            x_label: String::new(),
            y_label: String::new(),
            segments: Vec::new(),
            bounds: None,
            omitted: 0,
            generation: 0,
        }
    }
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wipe all plotted content.
    pub fn clear(&mut self) {
        let generation = self.generation.wrapping_add(1);
        *self = Self {
            generation,
            ..Self::default()
        };
    }

    /// Replace the figure content with `request` drawn from `table`.
    ///
    /// The figure is cleared first; on error it stays blank.
    pub fn render(&mut self, table: &ColumnTable, request: &PlotRequest) -> Result<(), PlotError> {
        self.clear();

        let xs = table
            .column(&request.x.column)
            .ok_or_else(|| PlotError::UnknownColumn(request.x.column.clone()))?;
        let ys = table
            .column(&request.y.column)
            .ok_or_else(|| PlotError::UnknownColumn(request.y.column.clone()))?;

        let projection = request.projection();
        let mut segments: Vec<Vec<[f64; 2]>> = Vec::new();
        let mut current: Vec<[f64; 2]> = Vec::new();
        let mut bounds: Option<Bounds> = None;
        let mut omitted = 0;

        for (&x, &y) in xs.iter().zip(ys) {
            match (
                project(x, projection.x_log()),
                project(y, projection.y_log()),
            ) {
                (Some(px), Some(py)) => {
                    let point = [px, py];
                    match bounds.as_mut() {
                        Some(b) => b.extend(point),
                        None => bounds = Some(Bounds::around(point)),
                    }
                    current.push(point);
                }
                _ => {
                    omitted += 1;
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        if omitted > 0 {
            log::warn!(
                "{} of {} points of {} vs {} have no position on a {} plot and were skipped",
                omitted,
                xs.len(),
                request.y.column,
                request.x.column,
                projection
            );
        }
        log::info!(
            "Plotted {} vs {} ({}, {} segment(s))",
            request.y.column,
            request.x.column,
            projection,
            segments.len()
        );

        self.projection = projection;
        self.x_label = request.x.column.clone();
        self.y_label = request.y.column.clone();
        self.segments = segments;
        self.bounds = bounds;
        self.omitted = omitted;
        Ok(())
    }

    /// True until a request has been drawn successfully.
    pub fn is_blank(&self) -> bool {
        self.x_label.is_empty() && self.y_label.is_empty() && self.segments.is_empty()
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn segments(&self) -> &[Vec<[f64; 2]>] {
        &self.segments
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn omitted(&self) -> usize {
        self.omitted
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }
}

/// Position of `value` on an axis, `None` if it cannot be placed.
fn project(value: f64, log: bool) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    if log {
        (value > 0.0).then(|| value.log10())
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::request::{AxisSelection, ScaleMode};

    fn table() -> ColumnTable {
        let mut t = ColumnTable::new();
        t.insert("star_age", vec![1.0, 10.0, 100.0, 1000.0]).unwrap();
        t.insert("log_L", vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        t.insert("dm", vec![-1.0, 0.0, 5.0, 50.0]).unwrap();
        t
    }

    fn request(x: &str, xs: ScaleMode, y: &str, ys: ScaleMode) -> PlotRequest {
        PlotRequest::new(AxisSelection::new(x, xs), AxisSelection::new(y, ys))
    }

    #[test]
    fn test_blank_by_default() {
        let fig = Figure::new();
        assert!(fig.is_blank());
        assert!(fig.bounds().is_none());
        assert_eq!(fig.point_count(), 0);
    }

    #[test]
    fn test_linear_render_in_row_order() {
        let mut fig = Figure::new();
        let req = request("star_age", ScaleMode::Linear, "log_L", ScaleMode::Linear);
        fig.render(&table(), &req).unwrap();
        assert_eq!(fig.projection(), Projection::Linear);
        assert_eq!(fig.x_label(), "star_age");
        assert_eq!(fig.y_label(), "log_L");
        assert_eq!(fig.segments().len(), 1);
        assert_eq!(fig.segments()[0][0], [1.0, 0.1]);
        assert_eq!(fig.segments()[0][3], [1000.0, 0.4]);
    }

    #[test]
    fn test_semilog_x_projects_to_decades() {
        let mut fig = Figure::new();
        let req = request("star_age", ScaleMode::Log, "log_L", ScaleMode::Linear);
        fig.render(&table(), &req).unwrap();
        assert_eq!(fig.projection(), Projection::SemilogX);
        let xs: Vec<f64> = fig.segments()[0].iter().map(|p| p[0]).collect();
        for (got, want) in xs.iter().zip([0.0, 1.0, 2.0, 3.0]) {
            assert!((got - want).abs() < 1e-12);
        }
        let b = fig.bounds().unwrap();
        assert!((b.x_max - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_second_render_replaces_first() {
        let t = table();
        let mut fig = Figure::new();
        fig.render(&t, &request("star_age", ScaleMode::Linear, "log_L", ScaleMode::Linear))
            .unwrap();
        let first_gen = fig.generation();
        fig.render(&t, &request("log_L", ScaleMode::Linear, "dm", ScaleMode::Linear))
            .unwrap();
        assert!(fig.generation() != first_gen);
        assert_eq!(fig.x_label(), "log_L");
        assert_eq!(fig.y_label(), "dm");
        assert_eq!(fig.segments().len(), 1);
        assert_eq!(fig.point_count(), 4);
        assert_eq!(fig.segments()[0][0], [0.1, -1.0]);
    }

    #[test]
    fn test_log_axis_skips_non_positive() {
        let mut fig = Figure::new();
        let req = request("star_age", ScaleMode::Linear, "dm", ScaleMode::Log);
        fig.render(&table(), &req).unwrap();
        assert_eq!(fig.projection(), Projection::SemilogY);
        assert_eq!(fig.omitted(), 2);
        assert_eq!(fig.point_count(), 2);
    }

    #[test]
    fn test_gap_splits_segments() {
        let mut t = ColumnTable::new();
        t.insert("x", vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        t.insert("y", vec![1.0, 2.0, -3.0, 4.0, 5.0]).unwrap();
        let mut fig = Figure::new();
        fig.render(&t, &request("x", ScaleMode::Log, "y", ScaleMode::Log))
            .unwrap();
        assert_eq!(fig.projection(), Projection::LogLog);
        assert_eq!(fig.segments().len(), 2);
        assert_eq!(fig.segments()[0].len(), 2);
        assert_eq!(fig.segments()[1].len(), 2);
    }

    #[test]
    fn test_unknown_column_leaves_figure_blank() {
        let t = table();
        let mut fig = Figure::new();
        fig.render(&t, &request("star_age", ScaleMode::Linear, "log_L", ScaleMode::Linear))
            .unwrap();
        let err = fig
            .render(&t, &request("nope", ScaleMode::Linear, "log_L", ScaleMode::Linear))
            .unwrap_err();
        assert_eq!(err, PlotError::UnknownColumn("nope".to_string()));
        assert!(fig.is_blank());
    }
}
