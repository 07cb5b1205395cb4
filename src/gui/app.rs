use crate::background::{Background, BackgroundLoader};
use crate::canvas::export::{ensure_export_folder, export_png};
use crate::canvas::mode::{can_transition, EditorMode};
use crate::canvas::text::{self, TextDraft, Typeface};
use crate::canvas::{Brush, DrawingSurface, StrokeTracker};
use crate::gui::text_editor::{self, TextEditorAction};
use crate::gui::toolbar::{toolbar_ui, ToolbarAction};
use eframe::egui::{
    self, Color32, PointerButton, Pos2, Rect, Sense, TextureHandle, TextureOptions,
};
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

const TOAST_SECONDS: f64 = 4.0;

pub struct DoodleApp {
    loader: Option<BackgroundLoader>,
    background: Option<Background>,
    background_tex: Option<TextureHandle>,
    surface: Option<DrawingSurface>,
    surface_tex: Option<TextureHandle>,
    surface_tex_revision: u64,
    brush: Brush,
    tracker: StrokeTracker,
    mode: EditorMode,
    draft: TextDraft,
    typeface: Option<Typeface>,
    canvas_rect: Option<Rect>,
    toasts: Toasts,
}

impl DoodleApp {
    pub fn new(asset_path: PathBuf) -> Self {
        let typeface = Typeface::from_egui_defaults();
        if typeface.is_none() {
            warn!("no proportional font in egui defaults, text stamping disabled");
        }
        Self {
            loader: Some(BackgroundLoader::spawn(asset_path)),
            background: None,
            background_tex: None,
            surface: None,
            surface_tex: None,
            surface_tex_revision: 0,
            brush: Brush::default(),
            tracker: StrokeTracker::default(),
            mode: EditorMode::Idle,
            draft: TextDraft::default(),
            typeface,
            canvas_rect: None,
            toasts: Toasts::new().anchor(egui::Align2::RIGHT_BOTTOM, [-8.0, -8.0]),
        }
    }

    fn set_mode(&mut self, to: EditorMode) {
        if can_transition(self.mode, to) {
            self.mode = to;
        } else {
            debug!(from = ?self.mode, to = ?to, "rejected mode transition");
        }
    }

    /// Creates the surface the moment the background arrives, sized exactly
    /// to the image's pixel dimensions.
    fn poll_background(&mut self) {
        let Some(loader) = &self.loader else { return };
        if let Some(background) = loader.try_take() {
            info!(
                width = background.width(),
                height = background.height(),
                "background ready, drawing enabled"
            );
            self.surface = Some(DrawingSurface::new(
                background.width(),
                background.height(),
            ));
            self.background = Some(background);
            self.loader = None;
        }
    }

    fn toast(&mut self, kind: ToastKind, text: String) {
        self.toasts.add(Toast {
            text: text.into(),
            kind,
            options: ToastOptions::default().duration_in_seconds(TOAST_SECONDS),
        });
    }

    fn export(&mut self) {
        // Before the background is ready the export must leave no trace, not
        // even the output folder.
        if self.background.is_none() || self.surface.is_none() {
            debug!("export skipped, background not ready");
            return;
        }
        let output_dir = match ensure_export_folder() {
            Ok(dir) => dir,
            Err(err) => {
                self.toast(ToastKind::Error, format!("Export failed: {err:#}"));
                return;
            }
        };
        let background = self.background.as_ref().map(|bg| bg.image());
        match export_png(background, self.surface.as_ref(), &output_dir) {
            Ok(Some(path)) => {
                self.toast(ToastKind::Success, format!("Saved {}", path.display()));
            }
            Ok(None) => {}
            Err(err) => {
                self.toast(ToastKind::Error, format!("Export failed: {err:#}"));
            }
        }
    }

    fn toggle_text_editor(&mut self) {
        if self.mode.is_text_editing() {
            self.close_text_editor();
            return;
        }
        // The editor anchors to the canvas, which exists only once the
        // background is ready.
        if self.background.is_none() {
            debug!("text editor unavailable until the background is ready");
            return;
        }
        // A held stroke cannot survive into text mode.
        self.tracker.pointer_up();
        self.set_mode(EditorMode::Idle);
        self.set_mode(EditorMode::TextEditing);
    }

    /// Apply or cancel both end with the same reset: draft back to defaults,
    /// editor closed.
    fn close_text_editor(&mut self) {
        self.draft = TextDraft::default();
        self.set_mode(EditorMode::Idle);
    }

    fn apply_text(&mut self) {
        if let (Some(surface), Some(typeface)) = (self.surface.as_mut(), self.typeface.as_ref()) {
            text::stamp(surface, typeface, &self.draft, self.brush.color);
        } else {
            debug!("text apply skipped, surface or typeface unavailable");
        }
        self.close_text_editor();
    }

    fn refresh_textures(&mut self, ctx: &egui::Context) {
        if let Some(background) = &self.background {
            if self.background_tex.is_none() {
                let size = [background.width() as usize, background.height() as usize];
                let color_image =
                    egui::ColorImage::from_rgba_unmultiplied(size, background.image().as_raw());
                self.background_tex =
                    Some(ctx.load_texture("background", color_image, TextureOptions::NEAREST));
            }
        }
        if let Some(surface) = &self.surface {
            let refresh =
                self.surface_tex.is_none() || surface.revision() != self.surface_tex_revision;
            if refresh {
                let size = [surface.width() as usize, surface.height() as usize];
                let color_image =
                    egui::ColorImage::from_rgba_unmultiplied(size, surface.image().as_raw());
                match &mut self.surface_tex {
                    Some(tex) => tex.set(color_image, TextureOptions::NEAREST),
                    None => {
                        self.surface_tex =
                            Some(ctx.load_texture("ink", color_image, TextureOptions::NEAREST));
                    }
                }
                self.surface_tex_revision = surface.revision();
            }
        }
    }

    fn canvas_size(&self) -> Option<egui::Vec2> {
        self.background
            .as_ref()
            .map(|bg| egui::vec2(bg.width() as f32, bg.height() as f32))
    }

    fn canvas_ui(&mut self, ui: &mut egui::Ui) {
        let Some(display) = self.canvas_size() else {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading background…");
            });
            ui.ctx().request_repaint_after(Duration::from_millis(50));
            return;
        };

        self.refresh_textures(ui.ctx());

        let (response, painter) = ui.allocate_painter(display, Sense::drag());
        self.canvas_rect = Some(response.rect);

        let uv = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));
        if let Some(tex) = &self.background_tex {
            painter.image(tex.id(), response.rect, uv, Color32::WHITE);
        }
        if let Some(tex) = &self.surface_tex {
            painter.image(tex.id(), response.rect, uv, Color32::WHITE);
        }

        self.handle_canvas_pointer(
            response.rect,
            response.drag_started_by(PointerButton::Primary),
            response.dragged_by(PointerButton::Primary),
            response.drag_stopped_by(PointerButton::Primary),
            response.interact_pointer_pos(),
        );
    }

    /// One frame of canvas pointer handling, separated from the painter so
    /// the event ordering is testable. Leaving the canvas mid-stroke ends it
    /// before a move can draw a segment to the outside position.
    fn handle_canvas_pointer(
        &mut self,
        rect: Rect,
        drag_started: bool,
        dragged: bool,
        drag_stopped: bool,
        pointer: Option<Pos2>,
    ) {
        // Pointer input is interpreted as drawing only outside text mode.
        if !self.mode.allows_stroke_input() {
            return;
        }

        if self.tracker.is_active() {
            let inside = pointer.map_or(false, |pos| rect.contains(pos));
            if !inside {
                self.tracker.pointer_left();
                self.set_mode(EditorMode::Idle);
            }
        }

        let to_image = |pos: Pos2| (pos - rect.min).to_pos2();

        if drag_started {
            if let Some(pos) = pointer {
                self.tracker.pointer_down(to_image(pos));
                self.set_mode(EditorMode::Drawing);
            }
        }
        if dragged {
            if let Some(pos) = pointer {
                if let Some((start, end)) = self.tracker.pointer_moved(to_image(pos)) {
                    if let Some(surface) = self.surface.as_mut() {
                        surface.line(start, end, self.brush.color, self.brush.width());
                    }
                }
            }
        }
        if drag_stopped {
            self.tracker.pointer_up();
            self.set_mode(EditorMode::Idle);
        }
    }
}

impl eframe::App for DoodleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_background();

        let mut action = ToolbarAction::None;
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            action = toolbar_ui(
                ui,
                &mut self.brush,
                self.mode.is_text_editing(),
                self.background.is_some(),
            );
        });
        match action {
            ToolbarAction::None => {}
            ToolbarAction::ToggleTextEditor => self.toggle_text_editor(),
            ToolbarAction::Export => self.export(),
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas_ui(ui);
        });

        if self.mode.is_text_editing() {
            if let Some(canvas_rect) = self.canvas_rect {
                match text_editor::show(ctx, &mut self.draft, canvas_rect) {
                    TextEditorAction::None => {}
                    TextEditorAction::Apply => self.apply_text(),
                    TextEditorAction::Cancel => self.close_text_editor(),
                }
            }
        }

        self.toasts.show(ctx);
    }
}
