use colored::Colorize;

use super::{ask, ask_password, clear_screen, confirm, header, invalid_choice, pause, read_choice, Session};
use crate::backends::users::{self, UserAdmin};

const MODULE: &str = "Users";

fn backend(session: &Session) -> Option<Box<dyn UserAdmin>> {
    let backend = users::backend_for(session.os);
    if backend.is_none() {
        println!(
            "{}",
            "User management is not available on this operating system.".yellow()
        );
    }
    backend
}

pub fn menu(session: &Session) {
    loop {
        clear_screen();
        header("User and Group Management");
        println!("1. Create User");
        println!("2. Delete User");
        println!("3. Change User Password");
        println!("4. Create Group");
        println!("5. Delete Group");
        println!("6. Add User to Group");
        println!("7. Remove User from Group");
        println!("8. List Users");
        println!("9. List Groups");
        println!("0. Back to Main Menu");
        println!();

        match read_choice().as_str() {
            "1" => create_user(session),
            "2" => delete_user(session),
            "3" => change_password(session),
            "4" => create_group(session),
            "5" => delete_group(session),
            "6" => add_to_group(session),
            "7" => remove_from_group(session),
            "8" => list_users(session),
            "9" => list_groups(session),
            "0" => break,
            _ => invalid_choice(),
        }
        pause();
    }
}

fn create_user(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    let Some(username) = ask("Username to create:") else {
        return;
    };
    if !session.run_reported(MODULE, "Create User", &backend.create_user(&username)) {
        return;
    }
    println!("{}", format!("✓ User '{}' created.", username).green());

    let Some(password) = ask_password("Password for the new user:") else {
        println!("No password set; the account stays locked until one is assigned.");
        return;
    };
    let request = backend.set_password(&username, &password);
    if session.run_reported(MODULE, "Set Password", &[request]) {
        println!("{}", format!("✓ Password set for '{}'.", username).green());
    }
}

fn delete_user(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    let Some(username) = ask("Username to delete:") else {
        return;
    };
    if !confirm(&format!(
        "Delete '{}' and their home directory?",
        username
    )) {
        println!("Operation cancelled.");
        return;
    }
    if session.run_reported(MODULE, "Delete User", &[backend.delete_user(&username)]) {
        println!("{}", format!("✓ User '{}' removed.", username).green());
    }
}

fn change_password(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    let Some(username) = ask("Username:") else {
        return;
    };
    let Some(password) = ask_password("New password:") else {
        return;
    };
    let Some(check) = ask_password("Confirm new password:") else {
        return;
    };
    if password != check {
        println!("{}", "Passwords do not match.".red());
        return;
    }
    let request = backend.set_password(&username, &password);
    if session.run_reported(MODULE, "Change Password", &[request]) {
        println!(
            "{}",
            format!("✓ Password changed for '{}'.", username).green()
        );
    }
}

fn create_group(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    let Some(group) = ask("Group name to create:") else {
        return;
    };
    if session.run_reported(MODULE, "Create Group", &[backend.create_group(&group)]) {
        println!("{}", format!("✓ Group '{}' created.", group).green());
    }
}

fn delete_group(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    let Some(group) = ask("Group name to delete:") else {
        return;
    };
    if !confirm(&format!("Delete group '{}'?", group)) {
        println!("Operation cancelled.");
        return;
    }
    if session.run_reported(MODULE, "Delete Group", &[backend.delete_group(&group)]) {
        println!("{}", format!("✓ Group '{}' removed.", group).green());
    }
}

fn add_to_group(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    let Some(username) = ask("Username:") else {
        return;
    };
    let Some(group) = ask("Group:") else {
        return;
    };
    let request = backend.add_user_to_group(&username, &group);
    if session.run_reported(MODULE, "Add User to Group", &[request]) {
        println!(
            "{}",
            format!("✓ '{}' added to group '{}'.", username, group).green()
        );
    }
}

fn remove_from_group(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    let Some(username) = ask("Username:") else {
        return;
    };
    let Some(group) = ask("Group:") else {
        return;
    };
    let request = backend.remove_user_from_group(&username, &group);
    if session.run_reported(MODULE, "Remove User from Group", &[request]) {
        println!(
            "{}",
            format!("✓ '{}' removed from group '{}'.", username, group).green()
        );
    }
}

fn list_users(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    println!("--- Users ---");
    session.run_reported(MODULE, "List Users", &[backend.list_users()]);
}

fn list_groups(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    println!("--- Groups ---");
    session.run_reported(MODULE, "List Groups", &[backend.list_groups()]);
}
