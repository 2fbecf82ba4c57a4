//! CLI command definitions for the `redraft` binary.
//!
//! Uses clap derive macros for argument parsing. Draft commands live under
//! `redraft draft <action>`.

pub mod draft;

use clap::{Parser, Subcommand};

/// Resume drafts that survive sign-in, crashes, and flaky storage.
#[derive(Parser)]
#[command(name = "redraft", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true, env = "REDRAFT_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect and edit the resume draft.
    Draft {
        #[command(subcommand)]
        action: draft::DraftCommand,
    },

    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

/// Default log directives for the verbosity flags. `RUST_LOG` overrides them.
pub fn log_directives(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info,redraft=debug",
        _ => "trace",
    }
}
