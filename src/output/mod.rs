pub mod json;
pub mod simple;
pub mod table;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::models::{Account, Computer, PrintJob, PrintJobState, Printer};

/// Anything the CLI can print
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Resource {
    Account(Account),
    Computer(Computer),
    Printer(Printer),
    PrintJob(PrintJob),
    PrintJobState(PrintJobState),
}

impl Resource {
    pub fn kind(&self) -> &'static str {
        match self {
            Resource::Account(_) => "account",
            Resource::Computer(_) => "computer",
            Resource::Printer(_) => "printer",
            Resource::PrintJob(_) => "printjob",
            Resource::PrintJobState(_) => "state",
        }
    }

    pub fn state(&self) -> Option<&str> {
        match self {
            Resource::Account(a) => a.state.as_deref(),
            Resource::Computer(c) => Some(&c.state),
            Resource::Printer(p) => p.state.as_deref(),
            Resource::PrintJob(j) => Some(&j.state),
            Resource::PrintJobState(s) => Some(&s.state),
        }
    }
}

/// Rough health of a state string, used for coloring
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateTone {
    Good,
    Neutral,
    Bad,
}

pub fn state_tone(state: &str) -> StateTone {
    match state {
        "online" | "connected" | "active" | "done" | "received" => StateTone::Good,
        "offline" | "disconnected" | "error" | "expired" | "deleted" | "suspended" => {
            StateTone::Bad
        }
        _ => StateTone::Neutral,
    }
}

/// Format resources according to the specified format
pub fn format_output(data: &[Resource], format: OutputFormat, no_color: bool) -> String {
    match format {
        OutputFormat::Table => table::format_table(data, no_color),
        OutputFormat::Json => json::format_json(data),
        OutputFormat::Simple => simple::format_simple(data, no_color),
    }
}
