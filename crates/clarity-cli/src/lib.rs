//! Library side of the `clarity` command-line tool.

pub mod logging;
pub mod plan;
pub mod settings;
