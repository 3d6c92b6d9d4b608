use once_cell::sync::Lazy;
use regex::Regex;

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number.";
pub const NAME_MESSAGE: &str = "Name must be at least 2 characters.";

const MIN_PHONE_DIGITS: usize = 10;
const MIN_NAME_CHARS: usize = 2;

// Deliberately loose: anything shaped like local@domain.tld gets through.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s\-().+]+$").expect("phone pattern compiles"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
}

impl FieldKind {
    /// Value for the `type` attribute of the rendered input.
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldValidation {
    pub is_valid: bool,
    pub error_message: String,
}

impl FieldValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: String::new(),
        }
    }

    pub fn invalid(message: &str) -> Self {
        Self {
            is_valid: false,
            error_message: message.to_string(),
        }
    }
}

/// Checks one input value. The first failing rule wins, so an empty email
/// reports "required" rather than "invalid email".
pub fn validate_field(value: &str, kind: FieldKind, field_name: Option<&str>) -> FieldValidation {
    let value = value.trim();

    if value.is_empty() {
        return FieldValidation::invalid(REQUIRED_MESSAGE);
    }

    match kind {
        FieldKind::Email if !EMAIL_PATTERN.is_match(value) => {
            return FieldValidation::invalid(EMAIL_MESSAGE);
        }
        FieldKind::Tel if !is_phone_number(value) => {
            return FieldValidation::invalid(PHONE_MESSAGE);
        }
        _ => {}
    }

    if field_name == Some("name") && value.chars().count() < MIN_NAME_CHARS {
        return FieldValidation::invalid(NAME_MESSAGE);
    }

    FieldValidation::valid()
}

fn is_phone_number(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
        && value.chars().filter(|c| c.is_ascii_digit()).count() >= MIN_PHONE_DIGITS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_required_for_every_kind() {
        for kind in [FieldKind::Text, FieldKind::Email, FieldKind::Tel] {
            for value in ["", "   ", "\t\n"] {
                let result = validate_field(value, kind, Some("name"));
                assert!(!result.is_valid);
                assert_eq!(result.error_message, REQUIRED_MESSAGE);
            }
        }
    }

    #[test]
    fn email_needs_at_sign_and_dot() {
        for bad in ["plainaddress", "jo@x", "jo.x.com", "@x.com", "jo@.com x", "jo @x.com"] {
            let result = validate_field(bad, FieldKind::Email, Some("email"));
            assert_eq!(result.error_message, EMAIL_MESSAGE, "{bad} should be rejected");
        }
        for good in ["jo@x.com", "  first.last@mail.example.org  ", "a+b@c.co"] {
            assert!(validate_field(good, FieldKind::Email, Some("email")).is_valid, "{good}");
        }
    }

    #[test]
    fn phone_counts_digits_after_separators() {
        assert!(validate_field("(11) 91234-5678", FieldKind::Tel, Some("phone")).is_valid);
        assert!(validate_field("+55 11 9123 4567", FieldKind::Tel, Some("phone")).is_valid);
        assert!(validate_field("1234567890", FieldKind::Tel, Some("phone")).is_valid);

        let short = validate_field("(11) 1234-567", FieldKind::Tel, Some("phone"));
        assert_eq!(short.error_message, PHONE_MESSAGE);
        assert!(!validate_field("123456789", FieldKind::Tel, Some("phone")).is_valid);
        assert!(!validate_field("call me 1234567890", FieldKind::Tel, Some("phone")).is_valid);
    }

    #[test]
    fn name_needs_two_characters() {
        let result = validate_field(" J ", FieldKind::Text, Some("name"));
        assert_eq!(result.error_message, NAME_MESSAGE);
        assert!(validate_field("Jo", FieldKind::Text, Some("name")).is_valid);
        assert!(validate_field("Zé", FieldKind::Text, Some("name")).is_valid);
    }

    #[test]
    fn length_rule_only_applies_to_name() {
        assert!(validate_field("X", FieldKind::Text, Some("business")).is_valid);
        assert!(validate_field("X", FieldKind::Text, None).is_valid);
    }

    #[test]
    fn valid_result_has_empty_message() {
        let result = validate_field("Acme", FieldKind::Text, Some("business"));
        assert_eq!(result, FieldValidation::valid());
        assert!(result.error_message.is_empty());
    }
}
