use colored::Colorize;

use super::{ask, ask_optional, clear_screen, confirm, header, invalid_choice, pause, read_choice, Session};
use crate::backends::network::{self, NetworkAdmin, RouteSpec, StaticIpSpec};

const MODULE: &str = "Network";

fn backend(session: &Session) -> Option<Box<dyn NetworkAdmin>> {
    let backend = network::backend_for(session.os);
    if backend.is_none() {
        println!(
            "{}",
            "Network management is not available on this operating system.".yellow()
        );
    }
    backend
}

pub fn menu(session: &Session) {
    loop {
        clear_screen();
        header("Network Management");
        println!("1. Show Interfaces");
        println!("2. Configure Static IP");
        println!("3. Configure DHCP");
        println!("4. Bring Interface Up/Down");
        println!("5. Add Static Route");
        println!("6. Delete Static Route");
        println!("7. Show Routing Table");
        println!("8. Show Active Connections");
        println!("9. Configure DNS Servers");
        println!("10. Show DNS Configuration");
        println!("0. Back to Main Menu");
        println!();

        match read_choice().as_str() {
            "1" => show_interfaces(session),
            "2" => static_ip(session),
            "3" => dhcp(session),
            "4" => link_state(session),
            "5" => add_route(session),
            "6" => delete_route(session),
            "7" => show_routes(session),
            "8" => show_connections(session),
            "9" => configure_dns(session),
            "10" => show_dns(session),
            "0" => break,
            _ => invalid_choice(),
        }
        pause();
    }
}

fn show_interfaces(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    session.run_reported(MODULE, "Show Interfaces", &[backend.show_interfaces()]);
}

fn static_ip(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    let Some(interface) = ask("Interface name (e.g. eth0, Ethernet):") else {
        return;
    };
    let address_label = if backend.needs_netmask() {
        "IP address (e.g. 192.168.1.100):"
    } else {
        "IP address in CIDR form (e.g. 192.168.1.100/24):"
    };
    let Some(address) = ask(address_label) else {
        return;
    };
    let netmask = if backend.needs_netmask() {
        ask_optional("Netmask (empty for 255.255.255.0):")
    } else {
        None
    };
    let gateway = ask_optional("Gateway (empty to leave routes alone):");

    let spec = StaticIpSpec {
        interface: interface.clone(),
        address,
        netmask,
        gateway,
    };
    // Teardown steps (flush, default-route removal) may fail on a clean
    // host; that is not an error.
    if session.run_tolerant(MODULE, "Static IP", &backend.set_static_ip(&spec)) {
        println!(
            "{}",
            format!("✓ Static address configured on '{}'.", interface).green()
        );
        println!("This runtime change is lost at reboot; persist it in your network manager.");
    }
}

fn dhcp(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    let Some(interface) = ask("Interface name:") else {
        return;
    };
    if session.run_tolerant(MODULE, "Enable DHCP", &backend.enable_dhcp(&interface)) {
        println!(
            "{}",
            format!("✓ '{}' configured for DHCP.", interface).green()
        );
    }
}

fn link_state(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    let Some(interface) = ask("Interface name:") else {
        return;
    };
    let up = match ask("Desired state (up/down):").as_deref() {
        Some("up") => true,
        Some("down") => false,
        _ => {
            println!("{}", "State must be 'up' or 'down'.".red());
            return;
        }
    };
    let request = backend.set_link(&interface, up);
    if session.run_reported(MODULE, "Set Link State", &[request]) {
        println!(
            "{}",
            format!(
                "✓ Interface '{}' set {}.",
                interface,
                if up { "up" } else { "down" }
            )
            .green()
        );
    }
}

fn add_route(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    let Some(destination) = ask("Destination network (e.g. 192.168.2.0/24):") else {
        return;
    };
    let netmask = if backend.needs_netmask() {
        ask_optional("Netmask (empty for 255.255.255.0):")
    } else {
        None
    };
    let Some(gateway) = ask("Gateway (e.g. 192.168.1.1):") else {
        return;
    };
    let route = RouteSpec {
        destination: destination.clone(),
        netmask,
        gateway,
    };
    if session.run_reported(MODULE, "Add Route", &[backend.add_route(&route)]) {
        println!("{}", format!("✓ Route to {} added.", destination).green());
    }
}

fn delete_route(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    let Some(destination) = ask("Destination network to remove:") else {
        return;
    };
    let request = backend.delete_route(&destination);
    if session.run_reported(MODULE, "Delete Route", &[request]) {
        println!("{}", format!("✓ Route to {} removed.", destination).green());
    }
}

fn show_routes(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    session.run_reported(MODULE, "Show Routes", &[backend.show_routes()]);
}

fn show_connections(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    session.run_reported(MODULE, "Show Connections", &[backend.show_connections()]);
}

fn configure_dns(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    let interface = if backend.dns_is_per_interface() {
        match ask("Interface name:") {
            Some(name) => name,
            None => return,
        }
    } else {
        if !confirm("This overwrites /etc/resolv.conf. Continue?") {
            println!("Operation cancelled.");
            return;
        }
        String::new()
    };
    let Some(list) = ask("DNS servers, comma separated (e.g. 8.8.8.8,8.8.4.4):") else {
        return;
    };
    let servers: Vec<String> = list
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if servers.is_empty() {
        println!("{}", "No DNS servers given.".red());
        return;
    }
    let requests = backend.set_dns(&interface, &servers);
    if session.run_reported(MODULE, "Configure DNS", &requests) {
        println!("{}", "✓ DNS servers configured.".green());
    }
}

fn show_dns(session: &Session) {
    let Some(backend) = backend(session) else {
        return;
    };
    session.run_reported(MODULE, "Show DNS", &[backend.show_dns()]);
}
