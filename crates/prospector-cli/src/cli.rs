use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "prospector")]
#[command(version, about = "Look up LinkedIn profiles and companies")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to the XDG config location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up a profile or company URL and print the result as JSON
    Lookup(LookupArgs),
    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Profile, company or school URL
    pub url: String,

    /// Scrape the profile page even when the API could answer
    #[arg(long)]
    pub force_scrape: bool,

    /// Do not resolve and scrape the member's current company
    #[arg(long)]
    pub skip_company: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration, environment overrides applied
    Show,
}
