use crate::exec::CommandRequest;
use crate::platform::OsFamily;

/// Trait for read-only resource monitoring
///
/// Everything here is informational; no request needs elevation. The Linux
/// summaries that pipe through `head` use the constant-pipeline shell
/// constructor: fixed strings, no user input.
pub trait ResourceMonitor {
    fn cpu_info(&self) -> Vec<CommandRequest>;

    fn memory_info(&self) -> Vec<CommandRequest>;

    fn disk_usage(&self) -> CommandRequest;

    fn load_summary(&self) -> CommandRequest;

    fn top_processes(&self) -> CommandRequest;
}

pub fn backend_for(os: OsFamily) -> Option<Box<dyn ResourceMonitor>> {
    match os {
        OsFamily::Linux => Some(Box::new(LinuxResources)),
        OsFamily::Windows => Some(Box::new(WindowsResources)),
        OsFamily::Unknown => None,
    }
}

pub struct LinuxResources;

impl ResourceMonitor for LinuxResources {
    fn cpu_info(&self) -> Vec<CommandRequest> {
        vec![CommandRequest::new(["lscpu"])]
    }

    fn memory_info(&self) -> Vec<CommandRequest> {
        vec![CommandRequest::new(["free", "-h"])]
    }

    fn disk_usage(&self) -> CommandRequest {
        CommandRequest::new(["df", "-h"])
    }

    fn load_summary(&self) -> CommandRequest {
        CommandRequest::shell("top -bn1 | head -n 5")
    }

    fn top_processes(&self) -> CommandRequest {
        CommandRequest::shell("ps aux --sort=-%cpu,-%mem | head -n 11")
    }
}

pub struct WindowsResources;

impl ResourceMonitor for WindowsResources {
    fn cpu_info(&self) -> Vec<CommandRequest> {
        vec![CommandRequest::new([
            "wmic",
            "cpu",
            "get",
            "LoadPercentage,NumberOfCores,NumberOfLogicalProcessors",
            "/value",
        ])]
    }

    fn memory_info(&self) -> Vec<CommandRequest> {
        vec![
            CommandRequest::new([
                "wmic",
                "ComputerSystem",
                "get",
                "TotalPhysicalMemory",
                "/value",
            ]),
            CommandRequest::new(["wmic", "OS", "get", "FreePhysicalMemory", "/value"]),
        ]
    }

    fn disk_usage(&self) -> CommandRequest {
        CommandRequest::new(["wmic", "logicaldisk", "get", "Caption,Size,FreeSpace", "/value"])
    }

    fn load_summary(&self) -> CommandRequest {
        CommandRequest::new(["wmic", "cpu", "get", "LoadPercentage", "/value"])
    }

    fn top_processes(&self) -> CommandRequest {
        CommandRequest::new(["tasklist", "/v"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitoring_never_asks_for_elevation() {
        let linux = LinuxResources;
        assert!(!linux.disk_usage().wants_elevation());
        assert!(linux.cpu_info().iter().all(|r| !r.wants_elevation()));

        let windows = WindowsResources;
        assert!(!windows.top_processes().wants_elevation());
    }

    #[cfg(unix)]
    #[test]
    fn load_summary_is_a_shell_pipeline() {
        let request = LinuxResources.load_summary();
        assert_eq!(request.tokens()[0], "sh");
        assert_eq!(request.tokens()[1], "-c");
    }

    #[test]
    fn windows_memory_info_queries_total_and_free() {
        let requests = WindowsResources.memory_info();
        assert_eq!(requests.len(), 2);
        assert!(requests[0]
            .tokens()
            .contains(&"TotalPhysicalMemory".to_string()));
        assert!(requests[1]
            .tokens()
            .contains(&"FreePhysicalMemory".to_string()));
    }
}
