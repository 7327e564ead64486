use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::auth::CredentialFields;
use crate::config::Config;

#[derive(Parser)]
#[command(name = "printnode")]
#[command(about = "PrintNode API client - inspect accounts, computers, printers and print jobs")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// API base URL
    #[arg(long, env = "PRINTNODE_URL", global = true)]
    pub url: Option<String>,

    /// PEM certificate bundle used to verify the server
    #[arg(long, env = "PRINTNODE_SSLCERT", global = true)]
    pub sslcert: Option<PathBuf>,

    /// Config file (default: <config dir>/printnode/config.json)
    #[arg(long, env = "PRINTNODE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Account email (use with --password)
    #[arg(long, env = "PRINTNODE_EMAIL", global = true)]
    pub email: Option<String>,

    /// Account password (use with --email)
    #[arg(long, env = "PRINTNODE_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// API key
    #[arg(long, env = "PRINTNODE_APIKEY", hide_env_values = true, global = true)]
    pub apikey: Option<String>,

    /// Integrator client key
    #[arg(long, env = "PRINTNODE_CLIENTKEY", hide_env_values = true, global = true)]
    pub clientkey: Option<String>,

    /// Act on the child account with this email (use with --apikey)
    #[arg(long, env = "PRINTNODE_CHILD_EMAIL", global = true)]
    pub child_email: Option<String>,

    /// Act on the child account with this creator reference (use with --apikey)
    #[arg(long, env = "PRINTNODE_CHILD_REF", global = true)]
    pub child_ref: Option<String>,

    /// Act on the child account with this id (use with --apikey)
    #[arg(long, env = "PRINTNODE_CHILD_ID", global = true)]
    pub child_id: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Request timeout in seconds
    #[arg(short, long, global = true)]
    pub timeout: Option<u64>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log API requests and responses
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Args {
    pub fn credential_fields(&self) -> CredentialFields {
        CredentialFields {
            email: self.email.clone(),
            password: self.password.clone(),
            apikey: self.apikey.clone(),
            clientkey: self.clientkey.clone(),
            child_email: self.child_email.clone(),
            child_ref: self.child_ref.clone(),
            child_id: self.child_id,
        }
    }

    /// Settings given on the command line or through the environment
    pub fn overrides(&self) -> Config {
        Config {
            url: self.url.clone(),
            sslcert: self.sslcert.clone(),
            timeout_secs: self.timeout,
            credentials: self.credential_fields(),
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show the authenticated account
    Whoami,
    /// List computers
    Computers,
    /// List printers
    Printers {
        /// Only printers attached to this computer
        #[arg(long)]
        computer: Option<u64>,
    },
    /// List print jobs
    Jobs {
        /// Only jobs sent to this printer
        #[arg(long)]
        printer: Option<u64>,
    },
    /// Show print job state history
    States,
    /// Submit a print job
    Print(PrintArgs),
    /// Account, computers and printers in one go
    Overview,
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct PrintArgs {
    /// Target printer id
    #[arg(long)]
    pub printer: u64,

    /// Job title
    #[arg(long)]
    pub title: String,

    /// Local file to upload
    #[arg(long, conflicts_with = "uri", required_unless_present = "uri")]
    pub file: Option<PathBuf>,

    /// URL the PrintNode client downloads the document from
    #[arg(long)]
    pub uri: Option<String>,

    /// Send as raw printer data instead of PDF
    #[arg(long)]
    pub raw: bool,

    /// Number of copies
    #[arg(long)]
    pub qty: Option<u32>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum OutputFormat {
    /// Pretty table format with colors
    Table,
    /// JSON output for scripting
    Json,
    /// Simple text format
    Simple,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_child_ref_flags() {
        let args = Args::try_parse_from([
            "printnode",
            "--apikey",
            "k",
            "--child-ref",
            "R",
            "printers",
            "--computer",
            "11",
        ])
        .unwrap();
        assert_eq!(args.command, Command::Printers { computer: Some(11) });

        let fields = args.credential_fields();
        assert_eq!(fields.supplied(), vec!["apikey", "child_ref"]);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["printnode", "whoami", "--format", "json", "--timeout", "5"])
                .unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.overrides().timeout_secs, Some(5));
    }

    #[test]
    fn test_print_needs_file_or_uri() {
        assert!(
            Args::try_parse_from(["printnode", "print", "--printer", "1", "--title", "t"]).is_err()
        );
        assert!(Args::try_parse_from([
            "printnode", "print", "--printer", "1", "--title", "t", "--file", "a.pdf", "--uri",
            "http://x",
        ])
        .is_err());

        let args = Args::try_parse_from([
            "printnode", "print", "--printer", "1", "--title", "t", "--uri", "http://x/a.pdf",
        ])
        .unwrap();
        match args.command {
            Command::Print(print) => {
                assert_eq!(print.uri.as_deref(), Some("http://x/a.pdf"));
                assert!(!print.raw);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
