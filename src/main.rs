//! Aluno Insights - interactive student data analysis
//!
//! Loads a CSV/JSON student dataset, prints a fixed descriptive summary,
//! cleans it, and serves statistics queries and chart generation from a
//! terminal menu.

mod charts;
mod console;
mod data;
mod stats;

use anyhow::Result;
use console::ConsoleApp;

fn main() -> Result<()> {
    env_logger::init();
    ConsoleApp::run()
}
