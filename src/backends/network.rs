use crate::exec::CommandRequest;
use crate::platform::OsFamily;

/// Static address assignment. Linux expects CIDR notation in `address`;
/// Windows wants a dotted netmask alongside it.
#[derive(Debug, Clone)]
pub struct StaticIpSpec {
    pub interface: String,
    pub address: String,
    pub netmask: Option<String>,
    pub gateway: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RouteSpec {
    pub destination: String,
    pub netmask: Option<String>,
    pub gateway: String,
}

/// Trait for network interface administration
pub trait NetworkAdmin {
    fn show_interfaces(&self) -> CommandRequest;

    fn set_static_ip(&self, spec: &StaticIpSpec) -> Vec<CommandRequest>;

    fn enable_dhcp(&self, interface: &str) -> Vec<CommandRequest>;

    fn set_link(&self, interface: &str, up: bool) -> CommandRequest;

    fn add_route(&self, route: &RouteSpec) -> CommandRequest;

    fn delete_route(&self, destination: &str) -> CommandRequest;

    fn show_routes(&self) -> CommandRequest;

    fn show_connections(&self) -> CommandRequest;

    fn set_dns(&self, interface: &str, servers: &[String]) -> Vec<CommandRequest>;

    fn show_dns(&self) -> CommandRequest;

    /// Whether static addressing on this platform needs a separate netmask.
    fn needs_netmask(&self) -> bool;

    /// Whether DNS assignment is per-interface on this platform.
    fn dns_is_per_interface(&self) -> bool;
}

pub fn backend_for(os: OsFamily) -> Option<Box<dyn NetworkAdmin>> {
    match os {
        OsFamily::Linux => Some(Box::new(LinuxNetwork)),
        OsFamily::Windows => Some(Box::new(WindowsNetwork)),
        OsFamily::Unknown => None,
    }
}

/// iproute2-based administration. Changes are runtime-only and revert at
/// reboot; persistence lives in Netplan or /etc/network/interfaces, which
/// this console does not touch.
pub struct LinuxNetwork;

impl NetworkAdmin for LinuxNetwork {
    fn show_interfaces(&self) -> CommandRequest {
        CommandRequest::new(["ip", "addr"])
    }

    fn set_static_ip(&self, spec: &StaticIpSpec) -> Vec<CommandRequest> {
        let iface = spec.interface.as_str();
        let mut requests = vec![
            CommandRequest::new(["ip", "addr", "flush", "dev", iface]).elevated(),
            CommandRequest::new(["ip", "addr", "add", spec.address.as_str(), "dev", iface])
                .elevated(),
            CommandRequest::new(["ip", "link", "set", iface, "up"]).elevated(),
        ];
        if let Some(gateway) = &spec.gateway {
            requests.push(CommandRequest::new(["ip", "route", "del", "default"]).elevated());
            requests.push(
                CommandRequest::new(["ip", "route", "add", "default", "via", gateway.as_str()])
                    .elevated(),
            );
        }
        requests
    }

    fn enable_dhcp(&self, interface: &str) -> Vec<CommandRequest> {
        vec![
            CommandRequest::new(["ip", "addr", "flush", "dev", interface]).elevated(),
            CommandRequest::new(["dhclient", interface]).elevated(),
        ]
    }

    fn set_link(&self, interface: &str, up: bool) -> CommandRequest {
        let state = if up { "up" } else { "down" };
        CommandRequest::new(["ip", "link", "set", "dev", interface, state]).elevated()
    }

    fn add_route(&self, route: &RouteSpec) -> CommandRequest {
        CommandRequest::new([
            "ip",
            "route",
            "add",
            route.destination.as_str(),
            "via",
            route.gateway.as_str(),
        ])
        .elevated()
    }

    fn delete_route(&self, destination: &str) -> CommandRequest {
        CommandRequest::new(["ip", "route", "del", destination]).elevated()
    }

    fn show_routes(&self) -> CommandRequest {
        CommandRequest::new(["ip", "route"])
    }

    fn show_connections(&self) -> CommandRequest {
        CommandRequest::new(["ss", "-tunap"])
    }

    fn set_dns(&self, _interface: &str, servers: &[String]) -> Vec<CommandRequest> {
        // resolv.conf is overwritten through tee with the file contents on
        // stdin: root-writable target, and no shell sees the server list.
        let mut content = String::new();
        for server in servers {
            content.push_str(&format!("nameserver {}\n", server));
        }
        vec![CommandRequest::new(["tee", "/etc/resolv.conf"])
            .elevated()
            .with_stdin(content.into_bytes())]
    }

    fn show_dns(&self) -> CommandRequest {
        CommandRequest::new(["cat", "/etc/resolv.conf"])
    }

    fn needs_netmask(&self) -> bool {
        false
    }

    fn dns_is_per_interface(&self) -> bool {
        false
    }
}

pub struct WindowsNetwork;

impl NetworkAdmin for WindowsNetwork {
    fn show_interfaces(&self) -> CommandRequest {
        CommandRequest::new(["ipconfig", "/all"])
    }

    fn set_static_ip(&self, spec: &StaticIpSpec) -> Vec<CommandRequest> {
        let mut tokens = vec![
            "netsh".to_string(),
            "interface".to_string(),
            "ip".to_string(),
            "set".to_string(),
            "address".to_string(),
            format!("name={}", spec.interface),
            "static".to_string(),
            spec.address.clone(),
            spec.netmask
                .clone()
                .unwrap_or_else(|| "255.255.255.0".to_string()),
        ];
        if let Some(gateway) = &spec.gateway {
            tokens.push(gateway.clone());
        }
        vec![CommandRequest::new(tokens)]
    }

    fn enable_dhcp(&self, interface: &str) -> Vec<CommandRequest> {
        let name = format!("name={}", interface);
        vec![CommandRequest::new([
            "netsh",
            "interface",
            "ip",
            "set",
            "address",
            name.as_str(),
            "source=dhcp",
        ])]
    }

    fn set_link(&self, interface: &str, up: bool) -> CommandRequest {
        let name = format!("name={}", interface);
        let admin = if up { "admin=enable" } else { "admin=disable" };
        CommandRequest::new([
            "netsh",
            "interface",
            "set",
            "interface",
            name.as_str(),
            admin,
        ])
    }

    fn add_route(&self, route: &RouteSpec) -> CommandRequest {
        CommandRequest::new([
            "route",
            "ADD",
            route.destination.as_str(),
            "MASK",
            route.netmask.as_deref().unwrap_or("255.255.255.0"),
            route.gateway.as_str(),
        ])
    }

    fn delete_route(&self, destination: &str) -> CommandRequest {
        CommandRequest::new(["route", "DELETE", destination])
    }

    fn show_routes(&self) -> CommandRequest {
        CommandRequest::new(["route", "PRINT"])
    }

    fn show_connections(&self) -> CommandRequest {
        CommandRequest::new(["netstat", "-ano"])
    }

    fn set_dns(&self, interface: &str, servers: &[String]) -> Vec<CommandRequest> {
        let name = format!("name={}", interface);
        let mut requests = Vec::new();
        for (index, server) in servers.iter().enumerate() {
            let request = if index == 0 {
                CommandRequest::new([
                    "netsh",
                    "interface",
                    "ip",
                    "set",
                    "dns",
                    name.as_str(),
                    "static",
                    server.as_str(),
                ])
            } else {
                let position = format!("index={}", index + 1);
                CommandRequest::new([
                    "netsh",
                    "interface",
                    "ip",
                    "add",
                    "dns",
                    name.as_str(),
                    server.as_str(),
                    position.as_str(),
                ])
            };
            requests.push(request);
        }
        requests
    }

    fn show_dns(&self) -> CommandRequest {
        CommandRequest::new(["netsh", "interface", "ip", "show", "dns"])
    }

    fn needs_netmask(&self) -> bool {
        true
    }

    fn dns_is_per_interface(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_static_ip_flushes_then_assigns() {
        let spec = StaticIpSpec {
            interface: "eth0".to_string(),
            address: "192.168.1.100/24".to_string(),
            netmask: None,
            gateway: Some("192.168.1.1".to_string()),
        };
        let requests = LinuxNetwork.set_static_ip(&spec);
        assert_eq!(requests.len(), 5);
        assert_eq!(
            requests[0].tokens(),
            &["ip", "addr", "flush", "dev", "eth0"]
        );
        assert_eq!(
            requests[4].tokens(),
            &["ip", "route", "add", "default", "via", "192.168.1.1"]
        );
        assert!(requests.iter().all(|r| r.wants_elevation()));
    }

    #[test]
    fn linux_static_ip_without_gateway_skips_route_changes() {
        let spec = StaticIpSpec {
            interface: "eth0".to_string(),
            address: "10.0.0.2/8".to_string(),
            netmask: None,
            gateway: None,
        };
        let requests = LinuxNetwork.set_static_ip(&spec);
        assert_eq!(requests.len(), 3);
    }

    #[test]
    fn linux_dns_rides_stdin_not_a_shell() {
        let servers = vec!["8.8.8.8".to_string(), "8.8.4.4".to_string()];
        let requests = LinuxNetwork.set_dns("eth0", &servers);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].tokens(), &["tee", "/etc/resolv.conf"]);
        assert_eq!(
            requests[0].stdin_payload(),
            Some("nameserver 8.8.8.8\nnameserver 8.8.4.4\n".as_bytes())
        );
    }

    #[test]
    fn windows_static_ip_single_netsh_call() {
        let spec = StaticIpSpec {
            interface: "Ethernet".to_string(),
            address: "192.168.1.50".to_string(),
            netmask: Some("255.255.255.0".to_string()),
            gateway: Some("192.168.1.1".to_string()),
        };
        let requests = WindowsNetwork.set_static_ip(&spec);
        assert_eq!(requests.len(), 1);
        let tokens = requests[0].tokens();
        assert_eq!(tokens[5], "name=Ethernet");
        assert_eq!(tokens[6], "static");
        assert_eq!(tokens[9], "192.168.1.1");
    }

    #[test]
    fn windows_secondary_dns_gets_index_two() {
        let servers = vec!["1.1.1.1".to_string(), "1.0.0.1".to_string()];
        let requests = WindowsNetwork.set_dns("Ethernet", &servers);
        assert_eq!(requests.len(), 2);
        assert!(requests[1].tokens().contains(&"index=2".to_string()));
    }

    #[test]
    fn interface_name_stays_one_token() {
        let hostile = "eth0 && reboot";
        let request = LinuxNetwork.set_link(hostile, false);
        assert_eq!(
            request.tokens(),
            &["ip", "link", "set", "dev", hostile, "down"]
        );
    }
}
