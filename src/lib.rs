pub mod background;
pub mod canvas;
pub mod gui;
pub mod logging;
