use serde::{Deserialize, Serialize};

const DEFAULT_LABEL: &str = "GitHub";
const DEFAULT_HOSTNAME: &str = "github.com";
const DEFAULT_TRANSPORT_USER: &str = "git";

/// Optional overrides stored alongside the profiles.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ServiceSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_user: Option<String>,
}

impl ServiceSettings {
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.hostname.is_none() && self.transport_user.is_none()
    }

    pub fn resolve(&self) -> Service {
        let pick = |value: &Option<String>, default: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .unwrap_or(default)
                .to_string()
        };

        Service {
            label: pick(&self.label, DEFAULT_LABEL),
            hostname: pick(&self.hostname, DEFAULT_HOSTNAME),
            transport_user: pick(&self.transport_user, DEFAULT_TRANSPORT_USER),
        }
    }
}

/// The hosting service every profile belongs to.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Service {
    pub label: String,
    pub hostname: String,
    pub transport_user: String,
}

impl Default for Service {
    fn default() -> Self {
        ServiceSettings::default().resolve()
    }
}
