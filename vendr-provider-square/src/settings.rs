//! Stored settings for the Square checkout provider.

use serde::Deserialize;

/// Square environment selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareEnvironment {
    Sandbox,
    Production,
}

impl SquareEnvironment {
    /// Root URL of the Square REST API for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            SquareEnvironment::Sandbox => "https://connect.squareupsandbox.com",
            SquareEnvironment::Production => "https://connect.squareup.com",
        }
    }
}

/// Per-store settings, materialized by the host from its settings store.
///
/// Absent keys default to empty strings (`sandbox_mode` to `false`); the
/// provider validates what it needs per operation. Settings are immutable
/// for the lifetime of a call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SquareSettings {
    /// Where the shopper lands after a completed checkout. Required.
    pub continue_url: String,
    /// Square location the checkout is created under. Required.
    pub location_id: String,
    pub sandbox_access_token: String,
    pub sandbox_webhook_signing_secret: String,
    pub live_access_token: String,
    pub live_webhook_signing_secret: String,
    /// Selects the sandbox environment and the sandbox credentials.
    pub sandbox_mode: bool,
}

impl SquareSettings {
    pub fn environment(&self) -> SquareEnvironment {
        if self.sandbox_mode {
            SquareEnvironment::Sandbox
        } else {
            SquareEnvironment::Production
        }
    }

    /// Access token for the selected environment.
    pub fn access_token(&self) -> &str {
        if self.sandbox_mode {
            &self.sandbox_access_token
        } else {
            &self.live_access_token
        }
    }

    /// Webhook signing secret for the selected environment.
    pub fn webhook_signing_secret(&self) -> &str {
        if self.sandbox_mode {
            &self.sandbox_webhook_signing_secret
        } else {
            &self.live_webhook_signing_secret
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_keys_default() {
        let settings: SquareSettings = serde_json::from_str("{}").unwrap();
        assert!(settings.continue_url.is_empty());
        assert!(!settings.sandbox_mode);
        assert_eq!(settings.environment(), SquareEnvironment::Production);
    }

    #[test]
    fn test_sandbox_mode_selects_sandbox_credentials() {
        let settings: SquareSettings = serde_json::from_str(
            r#"{
                "continue_url": "https://store.example.com/continue",
                "location_id": "L123",
                "sandbox_access_token": "sandbox-token",
                "sandbox_webhook_signing_secret": "sandbox-secret",
                "live_access_token": "live-token",
                "live_webhook_signing_secret": "live-secret",
                "sandbox_mode": true
            }"#,
        )
        .unwrap();

        assert_eq!(settings.environment(), SquareEnvironment::Sandbox);
        assert_eq!(
            settings.environment().base_url(),
            "https://connect.squareupsandbox.com"
        );
        assert_eq!(settings.access_token(), "sandbox-token");
        assert_eq!(settings.webhook_signing_secret(), "sandbox-secret");
    }

    #[test]
    fn test_live_mode_selects_live_credentials() {
        let settings = SquareSettings {
            live_access_token: "live-token".to_string(),
            live_webhook_signing_secret: "live-secret".to_string(),
            sandbox_access_token: "sandbox-token".to_string(),
            sandbox_webhook_signing_secret: "sandbox-secret".to_string(),
            sandbox_mode: false,
            ..SquareSettings::default()
        };

        assert_eq!(
            settings.environment().base_url(),
            "https://connect.squareup.com"
        );
        assert_eq!(settings.access_token(), "live-token");
        assert_eq!(settings.webhook_signing_secret(), "live-secret");
    }
}
