use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lexa")]
#[command(about = "Lexa reading-assistance agent")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides config and LEXA_BACKEND_URL)
    #[arg(long, global = true)]
    pub backend: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Host the assistant contexts until interrupted
    Run,

    /// Probe backend health and print the classification
    Health {
        /// Keep polling until the backend is usable, up to this many seconds
        #[arg(long)]
        wait: Option<u64>,
    },

    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and store the session
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out and clear the local session
    Logout,

    /// Manage the accessibility profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },

    /// Fetch usage insights for the stored session
    Insights,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Select a profile (dyslexia, adhd, visual_impairment, non_native)
    Set { mode: String },
    /// Show the active profile, consulting the backend only on a local miss
    Get,
    /// Clear the active profile
    Clear,
}
