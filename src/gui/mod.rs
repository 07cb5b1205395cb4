pub mod app;
pub mod text_editor;
pub mod toolbar;

pub use app::DoodleApp;
