mod audit;
mod backends;
mod cli;
mod config;
mod console;
mod exec;
mod platform;
mod proxy;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cli::{Cli, Command};
use console::Session;
use platform::{resolve_firewall, SystemctlProbe};
use proxy::ProxySettings;

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    // Set verbose logging if requested
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let config = config::load_config_auto(cli.config.as_deref())?;

    // Session proxy defaults from config, applied before anything shells out.
    if let Some(proxy_cfg) = &config.proxy {
        ProxySettings::from_config(proxy_cfg).apply();
    }

    let session = Session::new(&config);

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            println!("Detected operating system: {}", session.os);
            if !platform::is_privileged() {
                println!(
                    "{}",
                    "WARNING: administrative privileges are required for most operations."
                        .yellow()
                        .bold()
                );
                println!(
                    "{}",
                    "Some functions will fail or fall back to the elevation wrapper.".yellow()
                );
                console::pause();
            }
            console::run(&session);
        }
        Command::Status => {
            status(&session);
        }
    }

    Ok(())
}

fn status(session: &Session) {
    println!("Operating system:  {}", session.os);
    println!(
        "Privileged:        {}",
        if platform::is_privileged() { "yes" } else { "no" }
    );

    let probe = SystemctlProbe::new(&session.runner);
    println!(
        "Firewall backend:  {}",
        resolve_firewall(session.os, &probe)
    );

    let proxy = ProxySettings::current();
    if proxy.is_empty() {
        println!("Session proxy:     none");
    } else {
        println!(
            "Session proxy:     {}",
            proxy.http.or(proxy.https).unwrap_or_default()
        );
    }

    println!("Audit log dir:     {}", session.audit.dir().display());
}
