//! Email configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::report::EmailSender;

/// Sender identity for feedback emails
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Signature under the message body
    #[serde(default = "default_team_name")]
    pub team_name: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        self.sender().mailbox()
    }

    pub fn sender(&self) -> EmailSender {
        EmailSender {
            from_email: self.from_email.clone(),
            from_name: self.from_name.clone(),
            team_name: self.team_name.clone(),
        }
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let address = self.from_email.trim();
        match address.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
            _ => Err(ValidationError::InvalidFromEmail),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from_email: default_from_email(),
            from_name: default_from_name(),
            team_name: default_team_name(),
        }
    }
}

fn default_from_email() -> String {
    "noreply@example.com".to_string()
}

fn default_from_name() -> String {
    "Student Portal".to_string()
}

fn default_team_name() -> String {
    "Student Project Portal Team".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_config_defaults() {
        let config = EmailConfig::default();
        assert_eq!(config.from_email, "noreply@example.com");
        assert_eq!(config.from_name, "Student Portal");
        assert_eq!(config.sender(), EmailSender::default());
    }

    #[test]
    fn test_from_header() {
        let config = EmailConfig {
            from_email: "support@example.com".to_string(),
            from_name: "Support Team".to_string(),
            ..Default::default()
        };
        assert_eq!(config.from_header(), "\"Support Team\" <support@example.com>");
    }

    #[test]
    fn test_validation_invalid_from_email() {
        for bad in ["invalid-email", "@example.com", "user@localhost"] {
            let config = EmailConfig {
                from_email: bad.to_string(),
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidFromEmail));
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(EmailConfig::default().validate().is_ok());
    }
}
