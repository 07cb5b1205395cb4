use eframe::egui::Pos2;

/// Pointer-to-stroke pipeline. Only the most recent pointer position is
/// retained; each move yields one segment to rasterize, so arbitrarily long
/// strokes never accumulate state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokeTracker {
    last: Option<Pos2>,
}

impl StrokeTracker {
    /// Begins a stroke. Records the position; draws nothing yet.
    pub fn pointer_down(&mut self, pos: Pos2) {
        self.last = Some(pos);
    }

    /// Advances the stroke. Returns the segment from the previous position to
    /// `pos` when a stroke is active, `None` otherwise.
    pub fn pointer_moved(&mut self, pos: Pos2) -> Option<(Pos2, Pos2)> {
        let start = self.last?;
        self.last = Some(pos);
        Some((start, pos))
    }

    /// Ends the stroke so the next move cannot connect to a stale position.
    pub fn pointer_up(&mut self) {
        self.last = None;
    }

    /// Leaving the canvas ends the stroke the same way a release does.
    pub fn pointer_left(&mut self) {
        self.last = None;
    }

    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }
}
