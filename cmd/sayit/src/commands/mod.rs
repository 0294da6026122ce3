//! CLI commands module.

mod config;
mod inspect;
mod say;
mod util;

pub use config::ConfigCommand;
pub use inspect::{PlanCommand, SamplesCommand, SegmentCommand};
pub use say::SayCommand;

// Re-export utils for use in commands
pub(crate) use util::*;
