mod app;
pub mod dialogs;
pub mod theme;
pub mod views;

pub use app::CareerApp;
