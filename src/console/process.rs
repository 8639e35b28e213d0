use colored::Colorize;

use super::{ask, clear_screen, confirm, header, invalid_choice, pause, read_choice, Session};
use crate::backends::process::{self, ProcessAdmin};

const MODULE: &str = "Process";

fn backend(session: &Session) -> Option<Box<dyn ProcessAdmin>> {
    let backend = process::backend_for(session.os);
    if backend.is_none() {
        println!(
            "{}",
            "Process management is not available on this operating system.".yellow()
        );
    }
    backend
}

pub fn menu(session: &Session) {
    loop {
        clear_screen();
        header("Process Management");
        println!("1. List Processes");
        println!("2. Terminate Process by PID");
        println!("3. Terminate Process by Name");
        println!("4. Save Process Snapshot to Audit Log");
        println!("0. Back to Main Menu");
        println!();

        match read_choice().as_str() {
            "1" => list(session),
            "2" => kill_pid(session),
            "3" => kill_name(session),
            "4" => snapshot(session),
            "0" => break,
            _ => invalid_choice(),
        }
        pause();
    }
}

fn list(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    session.run_reported(MODULE, "List Processes", &[backend.list()]);
}

fn kill_pid(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    let Some(pid) = ask("PID to terminate:") else {
        return;
    };
    if pid.parse::<u32>().is_err() {
        println!("{}", "PID must be a number.".red());
        return;
    }
    if !confirm(&format!("Terminate process {}?", pid)) {
        println!("Operation cancelled.");
        return;
    }
    let request = backend.terminate_by_pid(&pid);
    if session.run_reported(MODULE, "Terminate by PID", &[request]) {
        println!("{}", format!("✓ Process {} terminated.", pid).green());
    }
}

fn snapshot(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    let result = session.runner.execute(&backend.list());
    if result.succeeded() {
        session
            .audit
            .record(MODULE, "Snapshot", result.stdout.trim());
        println!("{}", "✓ Process snapshot written to the audit log.".green());
    } else {
        println!("{}", "✗ Could not capture a process snapshot.".red());
        if !result.stderr.trim().is_empty() {
            println!("{}", result.stderr.trim().red());
        }
    }
}

fn kill_name(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    let Some(name) = ask("Process name to terminate:") else {
        return;
    };
    if !confirm(&format!("Terminate all processes named '{}'?", name)) {
        println!("Operation cancelled.");
        return;
    }
    let request = backend.terminate_by_name(&name);
    if session.run_reported(MODULE, "Terminate by Name", &[request]) {
        println!(
            "{}",
            format!("✓ Processes named '{}' terminated.", name).green()
        );
    }
}
