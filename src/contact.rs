//! Contact form: field checks, the JSON body sent to the form endpoint and
//! the copy shown while a message is in flight.

use serde::Serialize;

pub const SUBJECT: &str = "New portfolio inquiry";
pub const SEND_LABEL: &str = "Send";
pub const SENDING_LABEL: &str = "Sending…";

/// A filled-in form, ready to POST.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(rename = "_subject")]
    subject: &'static str,
    #[serde(rename = "_captcha")]
    captcha: &'static str,
}

impl Submission {
    /// Trimmed fields, or `None` when any of them is blank.
    pub fn from_fields(name: &str, email: &str, message: &str) -> Option<Self> {
        let (name, email, message) = (name.trim(), email.trim(), message.trim());
        if name.is_empty() || email.is_empty() || message.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            message: message.to_owned(),
            subject: SUBJECT,
            captcha: "false",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Incomplete,
    Sending,
    Sent,
    Failed,
}

impl Status {
    pub fn message(self) -> &'static str {
        match self {
            Self::Incomplete => "Please fill in all fields.",
            Self::Sending => "Sending your note…",
            Self::Sent => "Thanks! Your message is on its way to my inbox.",
            Self::Failed => "Something went wrong. Please try again or email me directly.",
        }
    }

    /// The send button is disabled only while a request is pending.
    pub fn busy(self) -> bool {
        self == Self::Sending
    }

    pub fn button_label(self) -> &'static str {
        if self.busy() {
            SENDING_LABEL
        } else {
            SEND_LABEL
        }
    }

    /// Results fade after a delay; the validation hint stays until the next
    /// attempt.
    pub fn clears(self) -> bool {
        matches!(self, Self::Sent | Self::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_rejected() {
        assert!(Submission::from_fields("Ann", "ann@example.com", "   ").is_none());
        assert!(Submission::from_fields("", "ann@example.com", "hi").is_none());
        assert!(Submission::from_fields("Ann", "\t", "hi").is_none());
    }

    #[test]
    fn fields_are_trimmed() {
        let sub = Submission::from_fields("  Ann ", "ann@example.com\n", " hi there ").unwrap();
        assert_eq!(sub.name, "Ann");
        assert_eq!(sub.email, "ann@example.com");
        assert_eq!(sub.message, "hi there");
    }

    #[test]
    fn body_carries_form_service_fields() {
        let sub = Submission::from_fields("Ann", "ann@example.com", "hi").unwrap();
        let body: serde_json::Value = serde_json::to_value(&sub).unwrap();
        assert_eq!(body["_subject"], SUBJECT);
        assert_eq!(body["_captcha"], "false");
        assert_eq!(body["message"], "hi");
    }

    #[test]
    fn button_locks_only_while_sending() {
        assert!(Status::Sending.busy());
        assert_eq!(Status::Sending.button_label(), SENDING_LABEL);
        for status in [Status::Incomplete, Status::Sent, Status::Failed] {
            assert!(!status.busy());
            assert_eq!(status.button_label(), SEND_LABEL);
        }
        assert!(!Status::Incomplete.clears());
        assert!(Status::Failed.clears());
        assert_eq!(Status::Incomplete.message(), "Please fill in all fields.");
    }
}
