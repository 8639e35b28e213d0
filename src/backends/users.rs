use crate::exec::CommandRequest;
use crate::platform::OsFamily;

/// Trait for user and group administration
///
/// Methods build the platform's argv; nothing here executes. Account
/// creation and password assignment are separate steps on both platforms
/// so the password can travel the safest channel each OS offers.
pub trait UserAdmin {
    fn create_user(&self, username: &str) -> Vec<CommandRequest>;

    /// Linux feeds `chpasswd` over stdin so the secret never appears in an
    /// argv (visible to every user via the process table). Windows has no
    /// stdin path for `net user`; the password rides as a token there.
    fn set_password(&self, username: &str, password: &str) -> CommandRequest;

    fn delete_user(&self, username: &str) -> CommandRequest;

    fn create_group(&self, group: &str) -> CommandRequest;

    fn delete_group(&self, group: &str) -> CommandRequest;

    fn add_user_to_group(&self, username: &str, group: &str) -> CommandRequest;

    fn remove_user_from_group(&self, username: &str, group: &str) -> CommandRequest;

    fn list_users(&self) -> CommandRequest;

    fn list_groups(&self) -> CommandRequest;
}

pub fn backend_for(os: OsFamily) -> Option<Box<dyn UserAdmin>> {
    match os {
        OsFamily::Linux => Some(Box::new(LinuxUsers)),
        OsFamily::Windows => Some(Box::new(WindowsUsers)),
        OsFamily::Unknown => None,
    }
}

pub struct LinuxUsers;

impl UserAdmin for LinuxUsers {
    fn create_user(&self, username: &str) -> Vec<CommandRequest> {
        vec![CommandRequest::new(["useradd", "-m", username]).elevated()]
    }

    fn set_password(&self, username: &str, password: &str) -> CommandRequest {
        CommandRequest::new(["chpasswd"])
            .elevated()
            .with_stdin(format!("{}:{}\n", username, password).into_bytes())
    }

    fn delete_user(&self, username: &str) -> CommandRequest {
        // -r removes the home directory as well
        CommandRequest::new(["userdel", "-r", username]).elevated()
    }

    fn create_group(&self, group: &str) -> CommandRequest {
        CommandRequest::new(["groupadd", group]).elevated()
    }

    fn delete_group(&self, group: &str) -> CommandRequest {
        CommandRequest::new(["groupdel", group]).elevated()
    }

    fn add_user_to_group(&self, username: &str, group: &str) -> CommandRequest {
        // -aG appends to supplementary groups without dropping existing ones
        CommandRequest::new(["usermod", "-aG", group, username]).elevated()
    }

    fn remove_user_from_group(&self, username: &str, group: &str) -> CommandRequest {
        CommandRequest::new(["gpasswd", "-d", username, group]).elevated()
    }

    fn list_users(&self) -> CommandRequest {
        CommandRequest::new(["cut", "-d:", "-f1", "/etc/passwd"])
    }

    fn list_groups(&self) -> CommandRequest {
        CommandRequest::new(["cut", "-d:", "-f1", "/etc/group"])
    }
}

pub struct WindowsUsers;

impl UserAdmin for WindowsUsers {
    fn create_user(&self, username: &str) -> Vec<CommandRequest> {
        vec![CommandRequest::new(["net", "user", username, "/ADD"])]
    }

    fn set_password(&self, username: &str, password: &str) -> CommandRequest {
        CommandRequest::new(["net", "user", username, password])
    }

    fn delete_user(&self, username: &str) -> CommandRequest {
        CommandRequest::new(["net", "user", username, "/DELETE"])
    }

    fn create_group(&self, group: &str) -> CommandRequest {
        CommandRequest::new(["net", "localgroup", group, "/ADD"])
    }

    fn delete_group(&self, group: &str) -> CommandRequest {
        CommandRequest::new(["net", "localgroup", group, "/DELETE"])
    }

    fn add_user_to_group(&self, username: &str, group: &str) -> CommandRequest {
        CommandRequest::new(["net", "localgroup", group, username, "/ADD"])
    }

    fn remove_user_from_group(&self, username: &str, group: &str) -> CommandRequest {
        CommandRequest::new(["net", "localgroup", group, username, "/DELETE"])
    }

    fn list_users(&self) -> CommandRequest {
        CommandRequest::new(["net", "user"])
    }

    fn list_groups(&self) -> CommandRequest {
        CommandRequest::new(["net", "localgroup"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_password_travels_over_stdin() {
        let request = LinuxUsers.set_password("alice", "S3cret");
        assert_eq!(request.tokens(), &["chpasswd"]);
        assert_eq!(request.stdin_payload(), Some("alice:S3cret\n".as_bytes()));
        assert!(request.wants_elevation());
    }

    #[test]
    fn linux_username_stays_one_token() {
        let hostile = "mallory; reboot";
        let request = LinuxUsers.delete_user(hostile);
        assert_eq!(request.tokens(), &["userdel", "-r", hostile]);
    }

    #[test]
    fn linux_group_membership_argv() {
        let add = LinuxUsers.add_user_to_group("alice", "wheel");
        assert_eq!(add.tokens(), &["usermod", "-aG", "wheel", "alice"]);

        let remove = LinuxUsers.remove_user_from_group("alice", "wheel");
        assert_eq!(remove.tokens(), &["gpasswd", "-d", "alice", "wheel"]);
    }

    #[test]
    fn windows_user_lifecycle_argv() {
        let create = WindowsUsers.create_user("alice");
        assert_eq!(create[0].tokens(), &["net", "user", "alice", "/ADD"]);
        assert!(!create[0].wants_elevation());

        let delete = WindowsUsers.delete_user("alice");
        assert_eq!(delete.tokens(), &["net", "user", "alice", "/DELETE"]);
    }

    #[test]
    fn listing_needs_no_elevation() {
        assert!(!LinuxUsers.list_users().wants_elevation());
        assert!(!WindowsUsers.list_groups().wants_elevation());
    }
}
