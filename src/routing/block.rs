use crate::config::Service;

/// Token every managed marker line carries, e.g. `# GitHub account: alice`.
pub const MARKER_TOKEN: &str = "account:";

/// Renders managed blocks and recognizes their marker lines for one service.
#[derive(Debug, Clone)]
pub struct BlockTemplate {
    marker_prefix: String,
    hostname: String,
    transport_user: String,
}

impl BlockTemplate {
    pub fn new(service: &Service) -> Self {
        Self {
            marker_prefix: format!("# {} {MARKER_TOKEN}", service.label),
            hostname: service.hostname.clone(),
            transport_user: service.transport_user.clone(),
        }
    }

    pub fn marker(&self, username: &str) -> String {
        format!("{} {username}", self.marker_prefix)
    }

    /// Lines are raw bytes so foreign content need not be UTF-8.
    pub fn is_marker(&self, line: &[u8]) -> bool {
        let prefix = self.marker_prefix.as_bytes();
        line.windows(prefix.len()).any(|window| window == prefix)
    }

    pub fn host_alias(&self, username: &str) -> String {
        format!("{}-{username}", self.hostname)
    }

    /// One block, terminated by a blank line.
    pub fn render(&self, username: &str, key_reference: &str) -> String {
        format!(
            "{marker}\nHost {alias}\n    HostName {hostname}\n    User {user}\n    IdentityFile {key_reference}\n    IdentitiesOnly yes\n\n",
            marker = self.marker(username),
            alias = self.host_alias(username),
            hostname = self.hostname,
            user = self.transport_user,
        )
    }
}

impl Default for BlockTemplate {
    fn default() -> Self {
        Self::new(&Service::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_github_block() {
        let block = BlockTemplate::default().render("alice", "/tmp/k");
        assert_eq!(
            block,
            "# GitHub account: alice\n\
             Host github.com-alice\n    \
             HostName github.com\n    \
             User git\n    \
             IdentityFile /tmp/k\n    \
             IdentitiesOnly yes\n\n"
        );
    }

    #[test]
    fn marker_detection_ignores_other_comments() {
        let template = BlockTemplate::default();
        assert!(template.is_marker(b"# GitHub account: bob\n"));
        assert!(template.is_marker(b"  # GitHub account: bob"));
        assert!(!template.is_marker(b"# GitLab account: bob"));
        assert!(!template.is_marker(b"# my account notes"));
        assert!(!template.is_marker(b"# caf\xe9"));
    }

    #[test]
    fn uses_service_overrides() {
        let service = Service {
            label: "Forge".to_string(),
            hostname: "git.example.com".to_string(),
            transport_user: "forgejo".to_string(),
        };
        let template = BlockTemplate::new(&service);
        let block = template.render("carol", "/keys/carol");
        assert!(block.starts_with("# Forge account: carol\nHost git.example.com-carol\n"));
        assert!(block.contains("    User forgejo\n"));
    }
}
