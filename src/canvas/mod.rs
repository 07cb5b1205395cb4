pub mod brush;
pub mod composite;
pub mod export;
pub mod mode;
pub mod stroke;
pub mod surface;
pub mod text;

pub use brush::Brush;
pub use mode::EditorMode;
pub use stroke::StrokeTracker;
pub use surface::DrawingSurface;
pub use text::{TextDraft, Typeface};
