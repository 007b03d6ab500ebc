//! Console module - interactive prompts and the main menu

mod app;

pub use app::ConsoleApp;
