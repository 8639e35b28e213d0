use super::{Direction, Firewall, RuleSpec};
use crate::exec::CommandRequest;

/// Windows Defender Firewall via `netsh advfirewall`. Status prints the raw
/// profile report; the column-aligned "State ON" text it contains is locale-
/// and version-dependent, so nothing here parses it. Elevation is ambient on
/// Windows (no wrapper prefix), so requests are not marked elevated.
pub struct Netsh;

fn rule_name_for(rule: &RuleSpec) -> String {
    let proto = rule.protocol.as_deref().unwrap_or("any");
    let dir = match rule.direction {
        Direction::In => "in",
        Direction::Out => "out",
    };
    format!("sysadm allow {} {}/{}", dir, rule.target, proto)
}

impl Firewall for Netsh {
    fn name(&self) -> &'static str {
        "netsh"
    }

    fn status(&self) -> Vec<CommandRequest> {
        vec![CommandRequest::new([
            "netsh",
            "advfirewall",
            "show",
            "allprofiles",
        ])]
    }

    fn enable(&self) -> Vec<CommandRequest> {
        vec![CommandRequest::new([
            "netsh",
            "advfirewall",
            "set",
            "allprofiles",
            "state",
            "on",
        ])]
    }

    fn disable(&self) -> Vec<CommandRequest> {
        vec![CommandRequest::new([
            "netsh",
            "advfirewall",
            "set",
            "allprofiles",
            "state",
            "off",
        ])]
    }

    fn allow(&self, rule: &RuleSpec) -> Vec<CommandRequest> {
        let dir = match rule.direction {
            Direction::In => "dir=in",
            Direction::Out => "dir=out",
        };
        let protocol = rule
            .protocol
            .as_deref()
            .map(|p| p.to_uppercase())
            .unwrap_or_else(|| "ANY".to_string());
        let name = format!("name={}", rule_name_for(rule));
        let proto_arg = format!("protocol={}", protocol);
        let port_arg = format!("localport={}", rule.target);
        vec![CommandRequest::new([
            "netsh",
            "advfirewall",
            "firewall",
            "add",
            "rule",
            name.as_str(),
            dir,
            "action=allow",
            proto_arg.as_str(),
            port_arg.as_str(),
        ])]
    }

    fn delete_prompt(&self) -> &'static str {
        "Name of the rule to delete"
    }

    fn delete_rule(&self, selector: &str) -> Vec<CommandRequest> {
        let name = format!("name={}", selector);
        vec![CommandRequest::new([
            "netsh",
            "advfirewall",
            "firewall",
            "delete",
            "rule",
            name.as_str(),
        ])]
    }

    fn reset(&self) -> Option<Vec<CommandRequest>> {
        Some(vec![CommandRequest::new(["netsh", "advfirewall", "reset"])])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_builds_named_inbound_rule() {
        let rule = RuleSpec {
            target: "80".to_string(),
            protocol: Some("tcp".to_string()),
            direction: Direction::In,
        };
        let requests = Netsh.allow(&rule);
        let tokens = requests[0].tokens();
        assert_eq!(tokens[..5], ["netsh", "advfirewall", "firewall", "add", "rule"]);
        assert!(tokens.contains(&"dir=in".to_string()));
        assert!(tokens.contains(&"protocol=TCP".to_string()));
        assert!(tokens.contains(&"localport=80".to_string()));
    }

    #[test]
    fn missing_protocol_becomes_any() {
        let rule = RuleSpec {
            target: "8080".to_string(),
            protocol: None,
            direction: Direction::Out,
        };
        let requests = Netsh.allow(&rule);
        let tokens = requests[0].tokens();
        assert!(tokens.contains(&"dir=out".to_string()));
        assert!(tokens.contains(&"protocol=ANY".to_string()));
    }

    #[test]
    fn rule_name_with_spaces_stays_one_token() {
        let requests = Netsh.delete_rule("Allow HTTP In");
        let tokens = requests[0].tokens();
        assert_eq!(tokens.last().unwrap(), "name=Allow HTTP In");
    }

    #[test]
    fn requests_never_ask_for_the_elevation_prefix() {
        assert!(Netsh.status().iter().all(|r| !r.wants_elevation()));
        assert!(Netsh.enable().iter().all(|r| !r.wants_elevation()));
    }
}
