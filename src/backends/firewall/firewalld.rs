use super::{Firewall, RuleSpec};
use crate::exec::CommandRequest;

/// firewalld via `firewall-cmd`. Rules are written permanent and need a
/// reload to reach the runtime configuration; enable/disable go through
/// the managing systemd unit so they survive a reboot, matching how the
/// service is expected to be operated.
pub struct Firewalld;

const ZONE: &str = "public";

impl Firewall for Firewalld {
    fn name(&self) -> &'static str {
        "firewalld"
    }

    fn status(&self) -> Vec<CommandRequest> {
        vec![
            CommandRequest::new(["firewall-cmd", "--state"]).elevated(),
            CommandRequest::new(["firewall-cmd", "--list-all"]).elevated(),
        ]
    }

    fn enable(&self) -> Vec<CommandRequest> {
        vec![
            CommandRequest::new(["systemctl", "enable", "firewalld"]).elevated(),
            CommandRequest::new(["systemctl", "start", "firewalld"]).elevated(),
        ]
    }

    fn disable(&self) -> Vec<CommandRequest> {
        vec![
            CommandRequest::new(["systemctl", "disable", "firewalld"]).elevated(),
            CommandRequest::new(["systemctl", "stop", "firewalld"]).elevated(),
        ]
    }

    fn allow(&self, rule: &RuleSpec) -> Vec<CommandRequest> {
        // Ports carry a protocol suffix; bare names are treated as services.
        let (flag, value) = match &rule.protocol {
            Some(proto) => ("--add-port", format!("{}/{}", rule.target, proto)),
            None => ("--add-service", rule.target.clone()),
        };
        vec![CommandRequest::new([
            "firewall-cmd",
            "--zone",
            ZONE,
            flag,
            value.as_str(),
            "--permanent",
        ])
        .elevated()]
    }

    fn delete_prompt(&self) -> &'static str {
        "Port (e.g. 80/tcp) or service name to remove from the public zone"
    }

    fn delete_rule(&self, selector: &str) -> Vec<CommandRequest> {
        let flag = if selector.contains('/') {
            "--remove-port"
        } else {
            "--remove-service"
        };
        vec![
            CommandRequest::new(["firewall-cmd", "--zone", ZONE, flag, selector, "--permanent"])
                .elevated(),
        ]
    }

    fn reload(&self) -> Option<Vec<CommandRequest>> {
        Some(vec![
            CommandRequest::new(["firewall-cmd", "--reload"]).elevated()
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::firewall::Direction;

    #[test]
    fn port_with_protocol_uses_add_port() {
        let rule = RuleSpec {
            target: "8080".to_string(),
            protocol: Some("tcp".to_string()),
            direction: Direction::In,
        };
        let requests = Firewalld.allow(&rule);
        let tokens = requests[0].tokens();
        assert!(tokens.contains(&"--add-port".to_string()));
        assert!(tokens.contains(&"8080/tcp".to_string()));
        assert!(tokens.contains(&"--permanent".to_string()));
    }

    #[test]
    fn bare_name_uses_add_service() {
        let rule = RuleSpec {
            target: "http".to_string(),
            protocol: None,
            direction: Direction::In,
        };
        let requests = Firewalld.allow(&rule);
        let tokens = requests[0].tokens();
        assert!(tokens.contains(&"--add-service".to_string()));
        assert!(tokens.contains(&"http".to_string()));
    }

    #[test]
    fn delete_selector_picks_flag_by_shape() {
        let by_port = Firewalld.delete_rule("80/tcp");
        assert!(by_port[0].tokens().contains(&"--remove-port".to_string()));

        let by_service = Firewalld.delete_rule("ssh");
        assert!(by_service[0]
            .tokens()
            .contains(&"--remove-service".to_string()));
    }

    #[test]
    fn reload_is_supported() {
        assert!(Firewalld.reload().is_some());
        assert!(Firewalld.reset().is_none());
    }
}
