// Output module - Report rendering (terminal, JSON)

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable colored report
    #[default]
    Terminal,
    /// Machine-readable JSON document
    Json,
}

pub mod json;
pub mod terminal;
