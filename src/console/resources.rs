use colored::Colorize;

use super::{clear_screen, header, invalid_choice, pause, read_choice, Session};
use crate::backends::resources::{self, ResourceMonitor};

const MODULE: &str = "Resources";

fn backend(session: &Session) -> Option<Box<dyn ResourceMonitor>> {
    let backend = resources::backend_for(session.os);
    if backend.is_none() {
        println!(
            "{}",
            "Resource monitoring is not available on this operating system.".yellow()
        );
    }
    backend
}

pub fn menu(session: &Session) {
    loop {
        clear_screen();
        header("System Resource Monitoring");
        println!("1. CPU Information");
        println!("2. Memory Usage");
        println!("3. Disk Usage");
        println!("4. Load Summary");
        println!("5. Top Processes");
        println!("0. Back to Main Menu");
        println!();

        match read_choice().as_str() {
            "1" => cpu(session),
            "2" => memory(session),
            "3" => disk(session),
            "4" => load(session),
            "5" => top(session),
            "0" => break,
            _ => invalid_choice(),
        }
        pause();
    }
}

fn cpu(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    println!("--- CPU ---");
    session.run_reported(MODULE, "CPU Info", &backend.cpu_info());
}

fn memory(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    println!("--- Memory ---");
    session.run_reported(MODULE, "Memory Info", &backend.memory_info());
}

fn disk(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    println!("--- Disk Usage ---");
    session.run_reported(MODULE, "Disk Usage", &[backend.disk_usage()]);
}

fn load(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    println!("--- Load ---");
    session.run_reported(MODULE, "Load Summary", &[backend.load_summary()]);
}

fn top(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    println!("--- Top Processes ---");
    session.run_reported(MODULE, "Top Processes", &[backend.top_processes()]);
}
