use super::{Direction, Firewall, RuleSpec};
use crate::exec::CommandRequest;

/// Uncomplicated Firewall. Rules apply immediately; deletion goes by the
/// rule number shown in `ufw status numbered`.
pub struct Ufw;

impl Firewall for Ufw {
    fn name(&self) -> &'static str {
        "ufw"
    }

    fn status(&self) -> Vec<CommandRequest> {
        vec![CommandRequest::new(["ufw", "status", "verbose"]).elevated()]
    }

    fn enable(&self) -> Vec<CommandRequest> {
        // --force skips the "may disrupt existing ssh connections" prompt,
        // which would otherwise hang a piped stdin.
        vec![CommandRequest::new(["ufw", "--force", "enable"]).elevated()]
    }

    fn disable(&self) -> Vec<CommandRequest> {
        vec![CommandRequest::new(["ufw", "disable"]).elevated()]
    }

    fn allow(&self, rule: &RuleSpec) -> Vec<CommandRequest> {
        let mut tokens = vec!["ufw".to_string(), "allow".to_string()];
        if rule.direction == Direction::Out {
            tokens.push("out".to_string());
        }
        match &rule.protocol {
            Some(proto) => tokens.push(format!("{}/{}", rule.target, proto)),
            None => tokens.push(rule.target.clone()),
        }
        vec![CommandRequest::new(tokens).elevated()]
    }

    fn delete_prompt(&self) -> &'static str {
        "Rule number to delete (see 'status' for numbering)"
    }

    fn delete_rule(&self, selector: &str) -> Vec<CommandRequest> {
        vec![CommandRequest::new(["ufw", "--force", "delete", selector]).elevated()]
    }

    fn reset(&self) -> Option<Vec<CommandRequest>> {
        Some(vec![
            CommandRequest::new(["ufw", "--force", "reset"]).elevated()
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_with_protocol_builds_port_slash_proto() {
        let rule = RuleSpec {
            target: "80".to_string(),
            protocol: Some("tcp".to_string()),
            direction: Direction::In,
        };
        let requests = Ufw.allow(&rule);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].tokens(), &["ufw", "allow", "80/tcp"]);
        assert!(requests[0].wants_elevation());
    }

    #[test]
    fn allow_outbound_inserts_direction() {
        let rule = RuleSpec {
            target: "ssh".to_string(),
            protocol: None,
            direction: Direction::Out,
        };
        let requests = Ufw.allow(&rule);
        assert_eq!(requests[0].tokens(), &["ufw", "allow", "out", "ssh"]);
    }

    #[test]
    fn hostile_port_stays_one_token() {
        let rule = RuleSpec {
            target: "80; rm -rf /".to_string(),
            protocol: None,
            direction: Direction::In,
        };
        let requests = Ufw.allow(&rule);
        assert_eq!(requests[0].tokens()[2], "80; rm -rf /");
    }

    #[test]
    fn delete_goes_by_rule_number() {
        let requests = Ufw.delete_rule("3");
        assert_eq!(requests[0].tokens(), &["ufw", "--force", "delete", "3"]);
    }
}
