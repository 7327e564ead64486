/*
 * Copyright (C) 2026 João Sena Ribeiro <sena@smux.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use super::{state_tone, Resource, StateTone};
use crate::models::{Account, Computer, PrintJob, PrintJobState, Printer};
use colored::Colorize;

/// Format data as simple text (one line per resource)
pub fn format_simple(data: &[Resource], no_color: bool) -> String {
    if data.is_empty() {
        return "Nothing to show.".to_string();
    }

    data.iter()
        .map(|r| format_resource_simple(r, no_color))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_resource_simple(resource: &Resource, no_color: bool) -> String {
    match resource {
        Resource::Account(account) => format_account_simple(account, no_color),
        Resource::Computer(computer) => format_computer_simple(computer, no_color),
        Resource::Printer(printer) => format_printer_simple(printer, no_color),
        Resource::PrintJob(job) => format_job_simple(job, no_color),
        Resource::PrintJobState(state) => format_state_simple(state, no_color),
    }
}

fn colorize_state(state: &str, no_color: bool) -> String {
    if no_color {
        return state.to_string();
    }
    match state_tone(state) {
        StateTone::Good => state.green().to_string(),
        StateTone::Neutral => state.yellow().to_string(),
        StateTone::Bad => state.red().to_string(),
    }
}

fn format_account_simple(account: &Account, no_color: bool) -> String {
    let state = account.state.as_deref().unwrap_or("-");
    format!(
        "account #{}: {} <{}> | {} computers, {} prints | {}",
        account.id,
        account.display_name(),
        account.email,
        account.num_computers,
        account.total_prints,
        colorize_state(state, no_color)
    )
}

fn format_computer_simple(computer: &Computer, no_color: bool) -> String {
    let host = computer.hostname.as_deref().unwrap_or("-");
    format!(
        "computer #{}: {} ({}) | {}",
        computer.id,
        computer.name,
        host,
        colorize_state(&computer.state, no_color)
    )
}

fn format_printer_simple(printer: &Printer, no_color: bool) -> String {
    let default_marker = if printer.default == Some(true) { " [default]" } else { "" };
    let state = printer.state.as_deref().unwrap_or("-");
    format!(
        "printer #{}: {}{} on {} | {}",
        printer.id,
        printer.name,
        default_marker,
        printer.computer.name,
        colorize_state(state, no_color)
    )
}

fn format_job_simple(job: &PrintJob, no_color: bool) -> String {
    let title = job.title.as_deref().unwrap_or("(untitled)");
    format!(
        "job #{}: {} -> {} ({}) | {}",
        job.id,
        title,
        job.printer.name,
        job.content_type,
        colorize_state(&job.state, no_color)
    )
}

fn format_state_simple(state: &PrintJobState, no_color: bool) -> String {
    let message = state.message.as_deref().unwrap_or("");
    let when = state
        .create_timestamp
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "job #{} {} at {} {}",
        state.print_job_id,
        colorize_state(&state.state, no_color),
        when,
        message
    )
    .trim_end()
    .to_string()
}
