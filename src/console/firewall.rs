use colored::Colorize;

use super::{ask, ask_optional, clear_screen, confirm, header, invalid_choice, pause, read_choice, Session};
use crate::backends::firewall::{self, Direction, Firewall, RuleSpec};
use crate::platform::{resolve_firewall, FirewallTag, SystemctlProbe};

const MODULE: &str = "Firewall";

/// Resolve the active backend fresh on every menu pass: this console can
/// itself start or stop the probed services between two choices.
fn active_backend(session: &Session) -> Option<Box<dyn Firewall>> {
    let probe = SystemctlProbe::new(&session.runner);
    let tag = resolve_firewall(session.os, &probe);
    if tag == FirewallTag::None {
        println!(
            "{}",
            "No active firewall backend detected (neither ufw nor firewalld is running).".yellow()
        );
        return None;
    }
    firewall::backend_for(tag)
}

pub fn menu(session: &Session) {
    loop {
        clear_screen();
        header("Firewall Management");
        println!("1. Show Status");
        println!("2. Enable Firewall");
        println!("3. Disable Firewall");
        println!("4. Allow Port/Service");
        println!("5. Delete Rule");
        println!("6. Reset to Defaults");
        println!("7. Reload Permanent Rules");
        println!("0. Back to Main Menu");
        println!();

        match read_choice().as_str() {
            "1" => show_status(session),
            "2" => enable(session),
            "3" => disable(session),
            "4" => allow_rule(session),
            "5" => delete_rule(session),
            "6" => reset(session),
            "7" => reload(session),
            "0" => break,
            _ => invalid_choice(),
        }
        pause();
    }
}

fn show_status(session: &Session) {
    let Some(backend) = active_backend(session) else {
        return;
    };
    println!("--- Firewall status ({}) ---", backend.name());
    session.run_reported(MODULE, "Show Status", &backend.status());
}

fn enable(session: &Session) {
    let Some(backend) = active_backend(session) else {
        return;
    };
    if session.run_reported(MODULE, "Enable", &backend.enable()) {
        println!("{}", format!("✓ Firewall ({}) enabled.", backend.name()).green());
    }
}

fn disable(session: &Session) {
    let Some(backend) = active_backend(session) else {
        return;
    };
    if !confirm("Disabling the firewall leaves this host unprotected. Continue?") {
        println!("Operation cancelled.");
        return;
    }
    if session.run_reported(MODULE, "Disable", &backend.disable()) {
        println!(
            "{}",
            format!("✓ Firewall ({}) disabled.", backend.name()).green()
        );
    }
}

fn allow_rule(session: &Session) {
    let Some(backend) = active_backend(session) else {
        return;
    };
    let Some(target) = ask("Port number or service name (e.g. 80, ssh):") else {
        return;
    };
    let protocol = ask_optional("Protocol (tcp/udp, empty for both):");
    let direction = match ask_optional("Direction (in/out, empty for in):").as_deref() {
        Some("out") => Direction::Out,
        _ => Direction::In,
    };

    let rule = RuleSpec {
        target: target.clone(),
        protocol,
        direction,
    };
    if session.run_reported(MODULE, "Allow Rule", &backend.allow(&rule)) {
        println!(
            "{}",
            format!("✓ Rule for '{}' added via {}.", target, backend.name()).green()
        );
        if backend.reload().is_some() {
            println!("Remember to reload the firewall to apply permanent rules.");
        }
    }
}

fn delete_rule(session: &Session) {
    let Some(backend) = active_backend(session) else {
        return;
    };
    let Some(selector) = ask(backend.delete_prompt()) else {
        return;
    };
    if session.run_reported(MODULE, "Delete Rule", &backend.delete_rule(&selector)) {
        println!("{}", format!("✓ Rule '{}' deleted.", selector).green());
    }
}

fn reset(session: &Session) {
    let Some(backend) = active_backend(session) else {
        return;
    };
    let Some(requests) = backend.reset() else {
        println!(
            "{} does not support a reset; remove rules individually instead.",
            backend.name()
        );
        return;
    };
    if !confirm("This wipes every rule and restores defaults. Continue?") {
        println!("Operation cancelled.");
        return;
    }
    if session.run_reported(MODULE, "Reset", &requests) {
        println!("{}", "✓ Firewall reset to defaults.".green());
    }
}

fn reload(session: &Session) {
    let Some(backend) = active_backend(session) else {
        return;
    };
    let Some(requests) = backend.reload() else {
        println!(
            "{} applies changes immediately; nothing to reload.",
            backend.name()
        );
        return;
    };
    if session.run_reported(MODULE, "Reload", &requests) {
        println!("{}", "✓ Permanent rules reloaded.".green());
    }
}
