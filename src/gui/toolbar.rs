use crate::canvas::brush::{Brush, MAX_WIDTH, MIN_WIDTH};
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    ToggleTextEditor,
    Export,
}

pub fn toolbar_ui(
    ui: &mut egui::Ui,
    brush: &mut Brush,
    text_editor_open: bool,
    canvas_ready: bool,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;
    ui.horizontal(|ui| {
        ui.color_edit_button_srgba(&mut brush.color);
        ui.add(egui::TextEdit::singleline(&mut brush.width_input).desired_width(36.0))
            .on_hover_text(format!(
                "Brush size ({}-{})",
                MIN_WIDTH as u32,
                MAX_WIDTH as u32
            ));
        // Effective width after parse-or-default, so bad input is visible.
        ui.label(format!("{} px", brush.width() as u32));
        ui.separator();

        let toggle_label = if text_editor_open {
            "Close Text Editor"
        } else {
            "Open Text Editor"
        };
        // The editor anchors to the canvas, so the toggle waits for the
        // background to finish loading.
        if ui
            .add_enabled(canvas_ready, egui::Button::new(toggle_label))
            .clicked()
        {
            action = ToolbarAction::ToggleTextEditor;
        }
        if ui.button("Download").clicked() {
            action = ToolbarAction::Export;
        }
    });
    action
}
