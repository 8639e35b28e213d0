pub mod firewalld;
pub mod netsh;
pub mod ufw;

use crate::exec::CommandRequest;
use crate::platform::FirewallTag;

/// Traffic direction for a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

/// Platform-agnostic description of an allow rule: a port number or service
/// name, an optional protocol, and a direction. Each backend turns this
/// into its own argv.
#[derive(Debug, Clone)]
pub struct RuleSpec {
    pub target: String,
    pub protocol: Option<String>,
    pub direction: Direction,
}

/// Trait for firewall backends
///
/// Implementations only build [`CommandRequest`] values; execution and
/// result handling stay with the caller. `delete_rule` takes a selector
/// whose meaning is backend-specific (rule number, port/service, rule
/// name); `delete_prompt` tells the console what to ask for.
pub trait Firewall {
    /// Backend name (ufw, firewalld, netsh)
    fn name(&self) -> &'static str;

    fn status(&self) -> Vec<CommandRequest>;

    fn enable(&self) -> Vec<CommandRequest>;

    fn disable(&self) -> Vec<CommandRequest>;

    fn allow(&self, rule: &RuleSpec) -> Vec<CommandRequest>;

    fn delete_prompt(&self) -> &'static str;

    fn delete_rule(&self, selector: &str) -> Vec<CommandRequest>;

    /// Restore factory defaults, where the backend supports it.
    fn reset(&self) -> Option<Vec<CommandRequest>> {
        None
    }

    /// Re-read permanent rules, where the backend distinguishes runtime
    /// from permanent state.
    fn reload(&self) -> Option<Vec<CommandRequest>> {
        None
    }
}

/// Map a resolved capability tag to its backend. `None` means no backend
/// is active and firewall operations are unavailable this pass.
pub fn backend_for(tag: FirewallTag) -> Option<Box<dyn Firewall>> {
    match tag {
        FirewallTag::Ufw => Some(Box::new(ufw::Ufw)),
        FirewallTag::Firewalld => Some(Box::new(firewalld::Firewalld)),
        FirewallTag::Netsh => Some(Box::new(netsh::Netsh)),
        FirewallTag::None => None,
    }
}
