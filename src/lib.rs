pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod output;

pub use auth::{Credential, CredentialFields};
pub use cli::{Args, Command, OutputFormat};
pub use client::{AuthenticatedClient, ClientOptions, DEFAULT_URL};
pub use config::Config;
pub use error::{ApiError, ApiErrorDetails, NetworkError, PrintNodeError, Result};
pub use gateway::Gateway;
