//! Contact form validation and the simulated send.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z\s]+$").expect("name pattern is valid")
});

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";
pub const FAILURE_MESSAGE: &str =
    "Sorry, there was an error sending your message. Please try again.";
pub const SENDING_LABEL: &str = "Sending...";
pub const READY_LABEL: &str = "Send Message";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    fn rules(self) -> &'static [Rule] {
        match self {
            Self::Name => &NAME_RULES,
            Self::Email => &EMAIL_RULES,
            Self::Subject => &SUBJECT_RULES,
            Self::Message => &MESSAGE_RULES,
        }
    }
}

static NAME_RULES: [Rule; 3] = [
    Rule::Required("Name is required"),
    Rule::MinChars(2, "Name must be at least 2 characters"),
    Rule::Pattern(&NAME_REGEX, "Name can only contain letters and spaces"),
];

static EMAIL_RULES: [Rule; 2] = [
    Rule::Required("Email is required"),
    Rule::Pattern(&EMAIL_REGEX, "Please enter a valid email address"),
];

static SUBJECT_RULES: [Rule; 2] = [
    Rule::Required("Subject is required"),
    Rule::MinChars(5, "Subject must be at least 5 characters"),
];

static MESSAGE_RULES: [Rule; 3] = [
    Rule::Required("Message is required"),
    Rule::MinChars(10, "Message must be at least 10 characters"),
    Rule::MaxChars(1000, "Message must be less than 1000 characters"),
];

enum Rule {
    Required(&'static str),
    MinChars(usize, &'static str),
    MaxChars(usize, &'static str),
    Pattern(&'static LazyLock<Regex>, &'static str),
}

impl Rule {
    /// The failure message, or `None` when the value passes.
    fn check(&self, value: &str) -> Option<&'static str> {
        let chars = value.chars().count();
        match self {
            Self::Required(message) => (chars == 0).then_some(*message),
            Self::MinChars(min, message) => (chars < *min).then_some(*message),
            Self::MaxChars(max, message) => (chars > *max).then_some(*message),
            Self::Pattern(regex, message) => (!regex.is_match(value)).then_some(*message),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    #[serde(serialize_with = "serialize_field")]
    pub field: Field,
    pub message: &'static str,
}

fn serialize_field<S: serde::Serializer>(field: &Field, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(field.as_str())
}

/// First failing rule for one field. Values are trimmed before checking.
pub fn validate_field(field: Field, value: &str) -> Option<FieldError> {
    let value = value.trim();
    field
        .rules()
        .iter()
        .find_map(|rule| rule.check(value))
        .map(|message| FieldError { field, message })
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    /// One error per failing field, in form order.
    pub fn validate(&self) -> Vec<FieldError> {
        Field::ALL
            .into_iter()
            .filter_map(|field| validate_field(field, self.value(field)))
            .collect()
    }
}

/// Simulated network latency from a uniform sample in `[0, 1)`.
pub fn simulated_delay_ms(min_ms: u32, jitter_ms: u32, sample: f64) -> u32 {
    let sample = if sample.is_finite() {
        sample.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let jitter = (f64::from(jitter_ms) * sample).floor() as u32;
    min_ms.saturating_add(jitter.min(jitter_ms.saturating_sub(1)))
}

/// Payload for the optional `gtag` global.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnalyticsEvent {
    pub event_category: &'static str,
    pub event_label: &'static str,
}

pub const SUBMIT_EVENT_NAME: &str = "form_submit";

pub fn submit_analytics() -> AnalyticsEvent {
    AnalyticsEvent {
        event_category: "contact",
        event_label: "contact_form",
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Success => "form-status success",
            Self::Error => "form-status error",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Success => SUCCESS_MESSAGE,
            Self::Error => FAILURE_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, subject: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn every_field_reports_its_first_failure() {
        let errors = form("A1", "bad", "Hi", "short").validate();

        assert_eq!(
            errors,
            vec![
                FieldError {
                    field: Field::Name,
                    message: "Name can only contain letters and spaces"
                },
                FieldError {
                    field: Field::Email,
                    message: "Please enter a valid email address"
                },
                FieldError {
                    field: Field::Subject,
                    message: "Subject must be at least 5 characters"
                },
                FieldError {
                    field: Field::Message,
                    message: "Message must be at least 10 characters"
                },
            ]
        );
    }

    #[test]
    fn valid_submission_has_no_errors() {
        let errors = form(
            "Jane Doe",
            "j@x.com",
            "Hello there",
            "This is a sufficiently long message.",
        )
        .validate();
        assert!(errors.is_empty());
    }

    #[test]
    fn required_wins_over_later_rules() {
        let errors = form("   ", "", "", "").validate();
        let messages: Vec<&str> = errors.iter().map(|error| error.message).collect();
        assert_eq!(
            messages,
            vec![
                "Name is required",
                "Email is required",
                "Subject is required",
                "Message is required"
            ]
        );
    }

    #[test]
    fn single_letter_name_fails_length_before_pattern() {
        let error = validate_field(Field::Name, "J").expect("too short");
        assert_eq!(error.message, "Name must be at least 2 characters");
    }

    #[test]
    fn message_length_is_bounded_above() {
        assert!(validate_field(Field::Message, &"a".repeat(1_000)).is_none());
        let error = validate_field(Field::Message, &"a".repeat(1_001)).expect("too long");
        assert_eq!(error.message, "Message must be less than 1000 characters");
    }

    #[test]
    fn values_are_trimmed_before_checks() {
        assert!(validate_field(Field::Email, "  j@x.com \n").is_none());
        assert!(validate_field(Field::Subject, "  Hi  ").is_some());
    }

    #[test]
    fn email_pattern_requires_dot_after_at() {
        assert!(validate_field(Field::Email, "jane@example").is_some());
        assert!(validate_field(Field::Email, "ja ne@example.com").is_some());
        assert!(validate_field(Field::Email, "jane@mail.example.com").is_none());
    }

    #[test]
    fn field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.as_str()), Some(field));
        }
        assert_eq!(Field::from_name("phone"), None);
    }

    #[test]
    fn simulated_delay_stays_in_half_open_range() {
        assert_eq!(simulated_delay_ms(1_000, 2_000, 0.0), 1_000);
        assert_eq!(simulated_delay_ms(1_000, 2_000, 0.5), 2_000);
        assert_eq!(simulated_delay_ms(1_000, 2_000, 0.999_999_9), 2_999);
        assert_eq!(simulated_delay_ms(1_000, 2_000, 1.0), 2_999);
        assert_eq!(simulated_delay_ms(1_000, 2_000, f64::NAN), 1_000);
    }

    #[test]
    fn analytics_payload_matches_gtag_shape() {
        let payload = serde_json::to_value(submit_analytics()).expect("serializable");
        assert_eq!(
            payload,
            serde_json::json!({ "event_category": "contact", "event_label": "contact_form" })
        );
    }

    #[test]
    fn field_errors_serialize_with_field_names() {
        let error = validate_field(Field::Subject, "Hi").expect("too short");
        let value = serde_json::to_value(&error).expect("serializable");
        assert_eq!(value["field"], "subject");
    }
}
