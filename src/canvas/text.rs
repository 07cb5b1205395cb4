use crate::canvas::surface::DrawingSurface;
use ab_glyph::{point, Font, ScaleFont};
use eframe::egui::{self, Color32, Pos2};
use tracing::debug;

pub const FONT_SIZE: f32 = 16.0;
pub const DEFAULT_ANCHOR: Pos2 = Pos2::new(50.0, 50.0);

const UNDERLINE_OFFSET: f32 = 2.0;
const DECORATION_WIDTH: f32 = 1.0;
const BOLD_OFFSET: f32 = 0.75;
const ITALIC_SHEAR: f32 = 0.2;

/// One pending text annotation. Consumed by a single apply, then reset; the
/// stamped pixels are not addressable afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct TextDraft {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    /// Image-space position the glyphs are stamped at (top of the line box).
    pub anchor: Pos2,
}

impl Default for TextDraft {
    fn default() -> Self {
        Self {
            text: String::new(),
            bold: false,
            italic: false,
            underline: false,
            strike: false,
            anchor: DEFAULT_ANCHOR,
        }
    }
}

impl TextDraft {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// egui's bundled proportional font, resolved once for raster stamping.
pub struct Typeface {
    font: ab_glyph::FontArc,
    tweak: egui::FontTweak,
}

impl Typeface {
    pub fn from_egui_defaults() -> Option<Self> {
        let definitions = egui::FontDefinitions::default();
        let family = definitions.families.get(&egui::FontFamily::Proportional)?;
        let font_name = family.first()?;
        let data = definitions.font_data.get(font_name)?.clone();
        let font = match data.font {
            std::borrow::Cow::Borrowed(bytes) => {
                ab_glyph::FontRef::try_from_slice_and_index(bytes, data.index)
                    .map(ab_glyph::FontArc::from)
                    .ok()
            }
            std::borrow::Cow::Owned(bytes) => {
                ab_glyph::FontVec::try_from_vec_and_index(bytes, data.index)
                    .map(ab_glyph::FontArc::from)
                    .ok()
            }
        }?;
        Some(Self {
            font,
            tweak: data.tweak,
        })
    }

    /// Pixel width of `text` at `size`, the span underline and strikethrough
    /// lines cover.
    pub fn measure(&self, text: &str, size: f32, bold: bool) -> f32 {
        let scaled = self.font.as_scaled(size * self.tweak.scale);
        let advance: f32 = text
            .chars()
            .map(|ch| scaled.h_advance(scaled.glyph_id(ch)))
            .sum();
        if bold && advance > 0.0 {
            advance + BOLD_OFFSET
        } else {
            advance
        }
    }

    fn rasterize(
        &self,
        surface: &mut DrawingSurface,
        anchor: Pos2,
        text: &str,
        color: Color32,
        size: f32,
        bold: bool,
        italic: bool,
    ) {
        let scaled = self.font.as_scaled(size * self.tweak.scale);
        let baseline = anchor.y + scaled.ascent() + self.tweak.y_offset * size;
        // Faux bold: a second pass shifted horizontally. Faux italic: each
        // raster row shears right in proportion to its height above the
        // baseline. The bundled face has no real bold/italic variants.
        let passes = if bold { 2 } else { 1 };
        for pass in 0..passes {
            let mut caret = point(anchor.x + pass as f32 * BOLD_OFFSET, baseline);
            for ch in text.chars() {
                let mut glyph = scaled.scaled_glyph(ch);
                glyph.position = caret;
                caret.x += scaled.h_advance(glyph.id);
                if let Some(outlined) = scaled.outline_glyph(glyph) {
                    let bounds = outlined.px_bounds();
                    outlined.draw(|x, y, coverage| {
                        let py = y as i32 + bounds.min.y as i32;
                        let mut px = x as i32 + bounds.min.x as i32;
                        if italic {
                            px += ((baseline - py as f32) * ITALIC_SHEAR).round() as i32;
                        }
                        let alpha = (color.a() as f32 * coverage).round().clamp(0.0, 255.0) as u8;
                        if alpha > 0 {
                            surface.blend_clipped(
                                px,
                                py,
                                Color32::from_rgba_unmultiplied(
                                    color.r(),
                                    color.g(),
                                    color.b(),
                                    alpha,
                                ),
                            );
                        }
                    });
                }
            }
        }
    }
}

/// Bakes the draft onto the surface in the given color. Returns `false`
/// without touching a pixel when the text is empty or whitespace-only.
pub fn stamp(
    surface: &mut DrawingSurface,
    typeface: &Typeface,
    draft: &TextDraft,
    color: Color32,
) -> bool {
    if draft.is_blank() {
        debug!("blank text annotation, nothing stamped");
        return false;
    }

    typeface.rasterize(
        surface,
        draft.anchor,
        &draft.text,
        color,
        FONT_SIZE,
        draft.bold,
        draft.italic,
    );

    // Underline and strikethrough are plain surface lines spanning the
    // measured text width, not font features.
    let width = typeface.measure(&draft.text, FONT_SIZE, draft.bold);
    if draft.underline {
        let y = draft.anchor.y + FONT_SIZE + UNDERLINE_OFFSET;
        surface.line(
            Pos2::new(draft.anchor.x, y),
            Pos2::new(draft.anchor.x + width, y),
            color,
            DECORATION_WIDTH,
        );
    }
    if draft.strike {
        let y = draft.anchor.y + FONT_SIZE / 2.0;
        surface.line(
            Pos2::new(draft.anchor.x, y),
            Pos2::new(draft.anchor.x + width, y),
            color,
            DECORATION_WIDTH,
        );
    }
    true
}
