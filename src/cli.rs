use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sysadm")]
#[command(author, version, about, long_about = None)]
#[command(about = "A text-menu administration console for Linux and Windows hosts")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Interactive administration console (the default)
    Menu,

    /// One-shot host summary: OS family, privilege state, firewall backend
    Status,
}
