/// Figure export. Writes the current figure to disk as a raster image
/// (PNG, JPEG, BMP, TIFF via the `image` crate) or as SVG text.
///
/// A blank figure still produces a valid file: an empty frame.

use std::path::{Path, PathBuf};

use super::figure::Figure;
use super::ticks;
use crate::error::SaveError;

/// Raster extensions handed to the `image` encoder
const RASTER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

const BACKGROUND: [u8; 3] = [255, 255, 255];
const FRAME: [u8; 3] = [40, 40, 40];
const TRACE: [u8; 3] = [31, 119, 180];
const TEXT: [u8; 3] = [20, 20, 20];

/// Output size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
        }
    }
}

/// Format used for a name without an extension
const DEFAULT_EXTENSION: &str = "png";

/// Write `figure` to `path`; the format follows the extension. A name
/// without one is saved as PNG with `.png` appended. Returns the path
/// actually written.
pub fn save_figure(
    figure: &Figure,
    path: &Path,
    settings: &ExportSettings,
) -> Result<PathBuf, SaveError> {
    if path.as_os_str().is_empty() {
        return Err(SaveError::EmptyPath);
    }
    let path = match path.extension() {
        Some(_) => path.to_path_buf(),
        None => {
            let mut name = path.as_os_str().to_os_string();
            name.push(".");
            name.push(DEFAULT_EXTENSION);
            PathBuf::from(name)
        }
    };
    let path = path.as_path();
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let layout = Layout::new(figure, settings);
    if ext == "svg" {
        std::fs::write(path, render_svg(figure, &layout))?;
    } else if RASTER_EXTENSIONS.contains(&ext.as_str()) {
        render_raster(figure, &layout).save(path)?;
    } else {
        return Err(SaveError::UnsupportedFormat(ext));
    }

    log::info!(
        "Saved {}figure to {}",
        if figure.is_blank() { "blank " } else { "" },
        path.display()
    );
    Ok(path.to_path_buf())
}

/// Pixel geometry of the plot area and the data window mapped onto it.
struct Layout {
    width: u32,
    height: u32,
    left: u32,
    top: u32,
    plot_w: u32,
    plot_h: u32,
    x_range: (f64, f64),
    y_range: (f64, f64),
    x_ticks: Vec<(f64, String)>,
    y_ticks: Vec<(f64, String)>,
}

impl Layout {
    fn new(figure: &Figure, settings: &ExportSettings) -> Self {
        let width = settings.width.max(200);
        let height = settings.height.max(160);
        let left = (width as f64 * 0.12).max(90.0) as u32;
        let right = (width as f64 * 0.04).max(30.0) as u32;
        let top = (height as f64 * 0.05).max(30.0) as u32;
        let bottom = (height as f64 * 0.12).max(80.0) as u32;

        let (x_range, y_range) = match figure.bounds() {
            Some(b) => (pad_range(b.x_min, b.x_max), pad_range(b.y_min, b.y_max)),
            None => ((0.0, 1.0), (0.0, 1.0)),
        };
        let projection = figure.projection();

        Self {
            width,
            height,
            left,
            top,
            plot_w: width - left - right,
            plot_h: height - top - bottom,
            x_range,
            y_range,
            x_ticks: axis_ticks(x_range, projection.x_log(), 7.0),
            y_ticks: axis_ticks(y_range, projection.y_log(), 6.0),
        }
    }

    fn px(&self, x: f64) -> f64 {
        let (lo, hi) = self.x_range;
        self.left as f64 + (x - lo) / (hi - lo) * self.plot_w as f64
    }

    fn py(&self, y: f64) -> f64 {
        let (lo, hi) = self.y_range;
        self.top as f64 + (1.0 - (y - lo) / (hi - lo)) * self.plot_h as f64
    }

    fn bottom(&self) -> u32 {
        self.top + self.plot_h
    }

    fn right(&self) -> u32 {
        self.left + self.plot_w
    }
}

/// Widen a data extent by 5% each side. A flat extent gets ±0.5, or
/// ±0.1% of its magnitude once that is larger.
fn pad_range(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    if span <= f64::EPSILON * max.abs().max(1.0) {
        let half = 0.5f64.max(max.abs() * 1e-3);
        (min - half, max + half)
    } else {
        (min - span * 0.05, max + span * 0.05)
    }
}

fn axis_ticks(range: (f64, f64), log: bool, target: f64) -> Vec<(f64, String)> {
    let (lo, hi) = range;
    if log {
        ticks::log_ticks(lo, hi, target)
            .into_iter()
            .map(|t| (t, ticks::format_log(t)))
            .collect()
    } else {
        let step = ticks::nice_step(hi - lo, target);
        ticks::linear_ticks(lo, hi, target)
            .into_iter()
            .map(|t| (t, ticks::format_linear(t, step)))
            .collect()
    }
}

// ── Raster ──

const TEXT_SCALE: u32 = 2;
const TICK_LEN: i32 = 6;

fn render_raster(figure: &Figure, layout: &Layout) -> image::RgbImage {
    let mut img = image::RgbImage::from_pixel(layout.width, layout.height, image::Rgb(BACKGROUND));
    let frame = image::Rgb(FRAME);
    let text = image::Rgb(TEXT);
    let (left, top) = (layout.left as i32, layout.top as i32);
    let (right, bottom) = (layout.right() as i32, layout.bottom() as i32);

    // Data first so the frame stays crisp on top
    let trace = image::Rgb(TRACE);
    for segment in figure.segments() {
        let pixels: Vec<(i32, i32)> = segment
            .iter()
            .map(|p| (layout.px(p[0]).round() as i32, layout.py(p[1]).round() as i32))
            .collect();
        if let [only] = pixels.as_slice() {
            draw_dot(&mut img, only.0, only.1, trace);
        }
        for pair in pixels.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            draw_line(&mut img, x0, y0, x1, y1, trace);
            draw_line(&mut img, x0, y0 + 1, x1, y1 + 1, trace);
        }
    }

    draw_line(&mut img, left, top, right, top, frame);
    draw_line(&mut img, left, bottom, right, bottom, frame);
    draw_line(&mut img, left, top, left, bottom, frame);
    draw_line(&mut img, right, top, right, bottom, frame);

    let char_w = (4 * TEXT_SCALE) as i32;
    let char_h = (5 * TEXT_SCALE) as i32;

    for (value, label) in &layout.x_ticks {
        let x = layout.px(*value).round() as i32;
        draw_line(&mut img, x, bottom, x, bottom - TICK_LEN, frame);
        let w = label.chars().count() as i32 * char_w;
        draw_text(&mut img, label, x - w / 2, bottom + 8, text);
    }
    for (value, label) in &layout.y_ticks {
        let y = layout.py(*value).round() as i32;
        draw_line(&mut img, left, y, left + TICK_LEN, y, frame);
        let w = label.chars().count() as i32 * char_w;
        draw_text(&mut img, label, left - 8 - w, y - char_h / 2, text);
    }

    // Axis titles
    let x_label_w = figure.x_label().chars().count() as i32 * char_w;
    draw_text(
        &mut img,
        figure.x_label(),
        (left + right) / 2 - x_label_w / 2,
        bottom + 8 + char_h + 16,
        text,
    );
    let y_label_h = figure.y_label().chars().count() as i32 * char_w;
    draw_text_vertical(
        &mut img,
        figure.y_label(),
        16,
        (top + bottom) / 2 + y_label_h / 2,
        text,
    );

    img
}

fn put(img: &mut image::RgbImage, x: i32, y: i32, color: image::Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_dot(img: &mut image::RgbImage, x: i32, y: i32, color: image::Rgb<u8>) {
    for dy in -1..=1 {
        for dx in -1..=1 {
            put(img, x + dx, y + dy, color);
        }
    }
}

/// Bresenham line, clipped to the image.
fn draw_line(img: &mut image::RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: image::Rgb<u8>) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut cx, mut cy) = (x0, y0);
    loop {
        put(img, cx, cy, color);
        if cx == x1 && cy == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            cx += sx;
        }
        if e2 <= dx {
            err += dx;
            cy += sy;
        }
    }
}

/// 3×5 bitmap glyphs; letters are drawn case-insensitively.
fn glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '_' => [0b000, 0b000, 0b000, 0b000, 0b111],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000],
    }
}

/// Left-to-right text with its top-left corner at (x, y).
fn draw_text(img: &mut image::RgbImage, text: &str, x: i32, y: i32, color: image::Rgb<u8>) {
    let s = TEXT_SCALE as i32;
    for (i, ch) in text.chars().enumerate() {
        let origin = x + i as i32 * 4 * s;
        for (row, bits) in glyph(ch).iter().enumerate() {
            for col in 0..3 {
                if (bits >> (2 - col)) & 1 == 1 {
                    for sy in 0..s {
                        for sx in 0..s {
                            put(img, origin + col * s + sx, y + row as i32 * s + sy, color);
                        }
                    }
                }
            }
        }
    }
}

/// Bottom-to-top text (rotated 90° counter-clockwise) starting at
/// (x, bottom).
fn draw_text_vertical(img: &mut image::RgbImage, text: &str, x: i32, bottom: i32, color: image::Rgb<u8>) {
    let s = TEXT_SCALE as i32;
    for (i, ch) in text.chars().enumerate() {
        let origin = bottom - i as i32 * 4 * s;
        for (row, bits) in glyph(ch).iter().enumerate() {
            for col in 0..3 {
                if (bits >> (2 - col)) & 1 == 1 {
                    for sy in 0..s {
                        for sx in 0..s {
                            put(img, x + row as i32 * s + sx, origin - col * s - sy, color);
                        }
                    }
                }
            }
        }
    }
}

// ── SVG ──

fn render_svg(figure: &Figure, layout: &Layout) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{}' height='{}'>\n",
        layout.width, layout.height
    ));
    svg.push_str("<rect width='100%' height='100%' fill='white'/>\n");

    for segment in figure.segments() {
        svg.push_str("<polyline fill='none' stroke='#1F77B4' stroke-width='1.5' points='");
        for p in segment {
            svg.push_str(&format!("{:.1},{:.1} ", layout.px(p[0]), layout.py(p[1])));
        }
        svg.push_str("'/>\n");
    }

    svg.push_str(&format!(
        "<rect x='{}' y='{}' width='{}' height='{}' fill='none' stroke='#282828' stroke-width='1'/>\n",
        layout.left, layout.top, layout.plot_w, layout.plot_h
    ));

    let bottom = layout.bottom();
    for (value, label) in &layout.x_ticks {
        let x = layout.px(*value);
        svg.push_str(&format!(
            "<line x1='{x:.1}' y1='{bottom}' x2='{x:.1}' y2='{}' stroke='#282828'/>\n",
            bottom as i32 - TICK_LEN
        ));
        svg.push_str(&format!(
            "<text x='{x:.1}' y='{}' font-family='sans-serif' font-size='13' text-anchor='middle'>{}</text>\n",
            bottom + 20,
            escape_xml(label)
        ));
    }
    for (value, label) in &layout.y_ticks {
        let y = layout.py(*value);
        svg.push_str(&format!(
            "<line x1='{}' y1='{y:.1}' x2='{}' y2='{y:.1}' stroke='#282828'/>\n",
            layout.left,
            layout.left as i32 + TICK_LEN
        ));
        svg.push_str(&format!(
            "<text x='{}' y='{:.1}' font-family='sans-serif' font-size='13' text-anchor='end'>{}</text>\n",
            layout.left - 8,
            y + 4.0,
            escape_xml(label)
        ));
    }

    let cx = layout.left + layout.plot_w / 2;
    let cy = layout.top + layout.plot_h / 2;
    svg.push_str(&format!(
        "<text x='{}' y='{}' font-family='sans-serif' font-size='15' text-anchor='middle'>{}</text>\n",
        cx,
        bottom + 50,
        escape_xml(figure.x_label())
    ));
    svg.push_str(&format!(
        "<text x='24' y='{cy}' font-family='sans-serif' font-size='15' text-anchor='middle' transform='rotate(-90 24 {cy})'>{}</text>\n",
        escape_xml(figure.y_label())
    ));

    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
}
