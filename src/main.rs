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

use anyhow::Context;
use clap::Parser;
use colored::{control, Colorize};
use printnode_client::cli::{Args, Command, PrintArgs};
use printnode_client::models::PrintJobRequest;
use printnode_client::output::{format_output, Resource};
use printnode_client::{Config, Gateway, PrintNodeError};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Disable colors if requested
    if args.no_color {
        control::set_override(false);
    }

    init_tracing(args.verbose);

    let gateway = match build_gateway(&args) {
        Ok(gateway) => gateway,
        Err(e) => {
            print_error(&anyhow::Error::new(e), args.no_color);
            return ExitCode::from(2);
        }
    };

    match run(&gateway, &args.command).await {
        Ok(resources) => {
            println!("{}", format_output(&resources, args.format, args.no_color));
            ExitCode::from(0)
        }
        Err(e) => {
            print_error(&e, args.no_color);
            let configuration = e
                .downcast_ref::<PrintNodeError>()
                .map(PrintNodeError::is_configuration)
                .unwrap_or(false);
            if configuration {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "printnode_client=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Config file first, then environment and flags on top
fn build_gateway(args: &Args) -> printnode_client::Result<Gateway> {
    let config = Config::load(args.config.as_deref())?.merge(args.overrides());
    config.into_gateway()
}

async fn run(gateway: &Gateway, command: &Command) -> anyhow::Result<Vec<Resource>> {
    let resources = match command {
        Command::Whoami => vec![Resource::Account(gateway.account().await?)],
        Command::Computers => gateway
            .computers()
            .await?
            .into_iter()
            .map(Resource::Computer)
            .collect(),
        Command::Printers { computer } => {
            let printers = match computer {
                Some(id) => gateway.printers_on(*id).await?,
                None => gateway.printers().await?,
            };
            printers.into_iter().map(Resource::Printer).collect()
        }
        Command::Jobs { printer } => {
            let jobs = match printer {
                Some(id) => gateway.printjobs_for_printer(*id).await?,
                None => gateway.printjobs().await?,
            };
            jobs.into_iter().map(Resource::PrintJob).collect()
        }
        Command::States => gateway
            .states()
            .await?
            .into_iter()
            .flatten()
            .map(Resource::PrintJobState)
            .collect(),
        Command::Print(print) => {
            let request = build_print_request(print)?;
            vec![Resource::PrintJob(gateway.print(&request).await?)]
        }
        Command::Overview => {
            // Independent requests through one shared client
            let (account, computers, printers) =
                futures::try_join!(gateway.account(), gateway.computers(), gateway.printers())?;

            let mut resources = vec![Resource::Account(account)];
            resources.extend(computers.into_iter().map(Resource::Computer));
            resources.extend(printers.into_iter().map(Resource::Printer));
            resources
        }
    };

    Ok(resources)
}

fn build_print_request(args: &PrintArgs) -> anyhow::Result<PrintJobRequest> {
    let request = match (&args.file, &args.uri) {
        (Some(path), _) => {
            let content = std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            if args.raw {
                PrintJobRequest::raw_bytes(args.printer, &args.title, &content)
            } else {
                PrintJobRequest::pdf_bytes(args.printer, &args.title, &content)
            }
        }
        (None, Some(uri)) => {
            if args.raw {
                PrintJobRequest::raw_uri(args.printer, &args.title, uri)
            } else {
                PrintJobRequest::pdf_uri(args.printer, &args.title, uri)
            }
        }
        (None, None) => anyhow::bail!("either --file or --uri is required"),
    };

    Ok(match args.qty {
        Some(qty) => request.with_qty(qty),
        None => request,
    })
}

/// Print a formatted error, with API error details on their own line
fn print_error(error: &anyhow::Error, no_color: bool) {
    let detail = match error.downcast_ref::<PrintNodeError>() {
        Some(PrintNodeError::Api(api)) => api.uid().map(|uid| format!("request uid: {}", uid)),
        _ => error.chain().nth(1).map(|cause| cause.to_string()),
    };

    if no_color {
        eprintln!("Error: {}", error);
    } else {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }
    if let Some(d) = detail {
        eprintln!("    {}", d);
    }
}
