/// Interaction mode for the whole editor. Exactly one mode is active; pointer
/// input reaches the stroke pipeline only while text editing is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Idle,
    Drawing,
    TextEditing,
}

impl EditorMode {
    pub fn allows_stroke_input(self) -> bool {
        matches!(self, Self::Idle | Self::Drawing)
    }

    pub fn is_text_editing(self) -> bool {
        matches!(self, Self::TextEditing)
    }
}

pub fn can_transition(from: EditorMode, to: EditorMode) -> bool {
    matches!(
        (from, to),
        (EditorMode::Idle, EditorMode::Drawing)
            | (EditorMode::Drawing, EditorMode::Idle)
            | (EditorMode::Idle, EditorMode::TextEditing)
            | (EditorMode::TextEditing, EditorMode::Idle)
    ) || from == to
}

#[cfg(test)]
mod tests {
    use super::{can_transition, EditorMode};

    #[test]
    fn text_editing_suppresses_stroke_input() {
        assert!(EditorMode::Idle.allows_stroke_input());
        assert!(EditorMode::Drawing.allows_stroke_input());
        assert!(!EditorMode::TextEditing.allows_stroke_input());
    }

    #[test]
    fn drawing_cannot_jump_straight_into_text_editing() {
        assert!(!can_transition(EditorMode::Drawing, EditorMode::TextEditing));
        assert!(!can_transition(EditorMode::TextEditing, EditorMode::Drawing));
    }

    #[test]
    fn idle_reaches_both_active_modes_and_back() {
        assert!(can_transition(EditorMode::Idle, EditorMode::Drawing));
        assert!(can_transition(EditorMode::Drawing, EditorMode::Idle));
        assert!(can_transition(EditorMode::Idle, EditorMode::TextEditing));
        assert!(can_transition(EditorMode::TextEditing, EditorMode::Idle));
    }

    #[test]
    fn self_transitions_are_always_allowed() {
        for mode in [
            EditorMode::Idle,
            EditorMode::Drawing,
            EditorMode::TextEditing,
        ] {
            assert!(can_transition(mode, mode));
        }
    }
}
