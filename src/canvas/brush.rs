use eframe::egui::Color32;

pub const DEFAULT_WIDTH: f32 = 3.0;
pub const MIN_WIDTH: f32 = 1.0;
pub const MAX_WIDTH: f32 = 50.0;

/// Current stroke settings. Read at draw time, never stored per stroke, so a
/// mid-stroke change takes effect on the next segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Brush {
    pub color: Color32,
    /// Free-text width field as typed in the toolbar; parsed on use.
    pub width_input: String,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: Color32::WHITE,
            width_input: format!("{}", DEFAULT_WIDTH as u32),
        }
    }
}

impl Brush {
    /// Effective line width for the next segment.
    pub fn width(&self) -> f32 {
        parse_width(&self.width_input)
    }
}

/// Parses a free-text width. Non-numeric, empty, or non-positive input falls
/// back to [`DEFAULT_WIDTH`]; valid values clamp to 1..=50.
pub fn parse_width(input: &str) -> f32 {
    input
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|width| width.is_finite() && *width > 0.0)
        .map(|width| width.clamp(MIN_WIDTH, MAX_WIDTH))
        .unwrap_or(DEFAULT_WIDTH)
}
