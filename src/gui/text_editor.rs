use crate::canvas::text::{TextDraft, DEFAULT_ANCHOR};
use eframe::egui::{self, vec2, Pos2, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEditorAction {
    None,
    Apply,
    Cancel,
}

/// Draggable annotation editor. The panel's position doubles as the stamp
/// anchor: dragging it around relocates where apply will write, and never
/// draws by itself.
pub fn show(ctx: &egui::Context, draft: &mut TextDraft, canvas_rect: Rect) -> TextEditorAction {
    let mut action = TextEditorAction::None;
    let response = egui::Window::new("Text")
        .default_pos(canvas_rect.min + vec2(DEFAULT_ANCHOR.x, DEFAULT_ANCHOR.y))
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.add(egui::TextEdit::singleline(&mut draft.text).hint_text("Type your text..."));
            ui.horizontal(|ui| {
                if ui.selectable_label(draft.bold, "B").clicked() {
                    draft.bold = !draft.bold;
                }
                if ui.selectable_label(draft.italic, "I").clicked() {
                    draft.italic = !draft.italic;
                }
                if ui.selectable_label(draft.underline, "U").clicked() {
                    draft.underline = !draft.underline;
                }
                if ui.selectable_label(draft.strike, "S").clicked() {
                    draft.strike = !draft.strike;
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Apply").clicked() {
                    action = TextEditorAction::Apply;
                }
                if ui.button("Cancel").clicked() {
                    action = TextEditorAction::Cancel;
                }
            });
        });

    if let Some(inner) = response {
        // Track the panel position live so the anchor follows a drag.
        let rel = inner.response.rect.min - canvas_rect.min;
        draft.anchor = Pos2::new(rel.x.max(0.0), rel.y.max(0.0));
    }
    action
}
