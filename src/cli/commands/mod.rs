//! One module per subcommand; each exposes an `execute` function.

pub mod add;
pub mod algorithms;
pub mod completions;
pub mod generate;
pub mod list;
pub mod remove;
pub mod save_as;
