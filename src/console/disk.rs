use colored::Colorize;

use super::{clear_screen, header, invalid_choice, pause, read_choice, Session};
use crate::backends::disk::{self, DiskAdmin};

const MODULE: &str = "Disk";

fn backend(session: &Session) -> Option<Box<dyn DiskAdmin>> {
    let backend = disk::backend_for(session.os);
    if backend.is_none() {
        println!(
            "{}",
            "Disk inspection is not available on this operating system.".yellow()
        );
    }
    backend
}

pub fn menu(session: &Session) {
    loop {
        clear_screen();
        header("Disk and Partition Management");
        println!("1. List Disks and Partitions");
        println!("2. Show Mounted Partition Usage");
        println!("3. Save Partition Snapshot to Audit Log");
        println!("0. Back to Main Menu");
        println!();

        match read_choice().as_str() {
            "1" => list(session),
            "2" => usage(session),
            "3" => snapshot(session),
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
    println!("--- Disks and Partitions ---");
    // fdisk needs root to read partition tables; on an unelevated session
    // lsblk output still prints before the failure is reported.
    session.run_tolerant(MODULE, "List Partitions", &backend.list_partitions());
}

fn usage(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    println!("--- Mounted Partition Usage ---");
    session.run_reported(MODULE, "Mounted Usage", &[backend.mounted_usage()]);
}

fn snapshot(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    let result = session.runner.execute(&backend.mounted_usage());
    if result.succeeded() {
        session
            .audit
            .record(MODULE, "Snapshot", result.stdout.trim());
        println!(
            "{}",
            "✓ Partition snapshot written to the audit log.".green()
        );
    } else {
        println!("{}", "✗ Could not capture a partition snapshot.".red());
        if !result.stderr.trim().is_empty() {
            println!("{}", result.stderr.trim().red());
        }
    }
}
