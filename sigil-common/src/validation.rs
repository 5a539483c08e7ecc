///! Declarative per-field validation
///!
///! Each field carries an ordered rule list. Validation is first-match-wins:
///! only the message of the first failing rule is surfaced.

use crate::field::FieldKind;
use crate::form::FieldValue;
use crate::{Error, Result};
use regex::Regex;

pub const USERNAME_FIELD: &str = "username";
pub const PASSWORD_FIELD: &str = "password";

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 20;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 50;

pub const USERNAME_TOO_SHORT: &str = "Username must be at least 3 characters long";
pub const USERNAME_TOO_LONG: &str = "Username cannot be longer than 20 characters";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long";
pub const PASSWORD_NEEDS_UPPERCASE: &str = "Password must contain at least one uppercase letter";
pub const PASSWORD_NEEDS_LOWERCASE: &str = "Password must contain at least one lowercase letter";
pub const PASSWORD_NEEDS_DIGIT: &str = "Password must contain at least one number";
pub const PASSWORD_NEEDS_SYMBOL: &str = "Password must contain at least one special character";
pub const PASSWORD_TOO_LONG: &str = "Password cannot be longer than 50 characters";

/// A single constraint with its user-facing message
#[derive(Debug, Clone)]
pub enum ValidationRule {
    /// At least `min` characters
    MinLength { min: usize, message: String },
    /// At most `max` characters
    MaxLength { max: usize, message: String },
    /// Passes when the pattern matches somewhere in the value
    Pattern { regex: Regex, message: String },
}

impl ValidationRule {
    /// Returns the rule's message when `value` violates it
    pub fn check(&self, value: &str) -> Option<&str> {
        let passes = match self {
            // Lengths are counted in characters, not bytes
            ValidationRule::MinLength { min, .. } => value.chars().count() >= *min,
            ValidationRule::MaxLength { max, .. } => value.chars().count() <= *max,
            ValidationRule::Pattern { regex, .. } => regex.is_match(value),
        };

        if passes {
            None
        } else {
            Some(self.message())
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationRule::MinLength { message, .. }
            | ValidationRule::MaxLength { message, .. }
            | ValidationRule::Pattern { message, .. } => message,
        }
    }
}

/// Static metadata for one form input
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub default_value: FieldValue,
    pub rules: Vec<ValidationRule>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            default_value: kind.default_value(),
            rules: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: FieldValue) -> Self {
        self.default_value = value;
        self
    }

    pub fn min_length(mut self, min: usize, message: impl Into<String>) -> Self {
        self.rules.push(ValidationRule::MinLength {
            min,
            message: message.into(),
        });
        self
    }

    pub fn max_length(mut self, max: usize, message: impl Into<String>) -> Self {
        self.rules.push(ValidationRule::MaxLength {
            max,
            message: message.into(),
        });
        self
    }

    pub fn pattern(mut self, pattern: &str, message: impl Into<String>) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            field: self.name.clone(),
            source,
        })?;
        self.rules.push(ValidationRule::Pattern {
            regex,
            message: message.into(),
        });
        Ok(self)
    }

    /// Applies the rule list in order; the first failure wins.
    ///
    /// Boolean values carry no string constraints and always pass.
    pub fn validate(&self, value: &FieldValue) -> Option<String> {
        let text = value.as_text()?;
        self.rules
            .iter()
            .find_map(|rule| rule.check(text))
            .map(str::to_string)
    }

    /// Emptiness check used by the form-level validity flag
    pub fn is_satisfied(&self, value: &FieldValue) -> bool {
        !self.required || !value.is_empty()
    }
}

/// Ordered set of field descriptors for one form
#[derive(Debug, Clone, Default)]
pub struct ValidationSchema {
    fields: Vec<FieldDescriptor>,
}

impl ValidationSchema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self> {
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name == field.name) {
                return Err(Error::DuplicateField(field.name.clone()));
            }
        }
        Ok(Self { fields })
    }

    /// Pure and deterministic. Unknown fields have no rules.
    pub fn validate(&self, field_name: &str, value: &FieldValue) -> Option<String> {
        self.field(field_name).and_then(|f| f.validate(value))
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

/// Username and password rules of the login form
pub fn login_schema() -> Result<ValidationSchema> {
    let username = FieldDescriptor::new(USERNAME_FIELD, FieldKind::Text)
        .required()
        .min_length(MIN_USERNAME_LENGTH, USERNAME_TOO_SHORT)
        .max_length(MAX_USERNAME_LENGTH, USERNAME_TOO_LONG);

    let password = FieldDescriptor::new(PASSWORD_FIELD, FieldKind::Password)
        .required()
        .min_length(MIN_PASSWORD_LENGTH, PASSWORD_TOO_SHORT)
        .pattern(r"[A-Z]", PASSWORD_NEEDS_UPPERCASE)?
        .pattern(r"[a-z]", PASSWORD_NEEDS_LOWERCASE)?
        .pattern(r"[0-9]", PASSWORD_NEEDS_DIGIT)?
        .pattern(r"[^A-Za-z0-9]", PASSWORD_NEEDS_SYMBOL)?
        .max_length(MAX_PASSWORD_LENGTH, PASSWORD_TOO_LONG);

    ValidationSchema::new(vec![username, password])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    fn password_error(s: &str) -> Option<String> {
        login_schema().unwrap().validate(PASSWORD_FIELD, &text(s))
    }

    #[test]
    fn test_validate_username() {
        let schema = login_schema().unwrap();
        assert_eq!(
            schema.validate(USERNAME_FIELD, &text("ab")).as_deref(),
            Some(USERNAME_TOO_SHORT)
        );
        assert_eq!(schema.validate(USERNAME_FIELD, &text("abc")), None);
        assert_eq!(schema.validate(USERNAME_FIELD, &text(&"a".repeat(20))), None);
        assert_eq!(
            schema.validate(USERNAME_FIELD, &text(&"a".repeat(21))).as_deref(),
            Some(USERNAME_TOO_LONG)
        );
    }

    #[test]
    fn test_empty_value_fails_length_rule() {
        let schema = login_schema().unwrap();
        assert_eq!(
            schema.validate(USERNAME_FIELD, &text("")).as_deref(),
            Some(USERNAME_TOO_SHORT)
        );
        assert_eq!(password_error("").as_deref(), Some(PASSWORD_TOO_SHORT));
    }

    #[test]
    fn test_password_rule_order() {
        assert_eq!(password_error("alllowercase1!").as_deref(), Some(PASSWORD_NEEDS_UPPERCASE));
        assert_eq!(password_error("ALLUPPERCASE1!").as_deref(), Some(PASSWORD_NEEDS_LOWERCASE));
        assert_eq!(password_error("NoDigitsHere!").as_deref(), Some(PASSWORD_NEEDS_DIGIT));
        assert_eq!(password_error("NoSymbols123").as_deref(), Some(PASSWORD_NEEDS_SYMBOL));
        assert_eq!(password_error("Admin123."), None);

        let long = format!("Aa1.{}", "x".repeat(47));
        assert_eq!(password_error(&long).as_deref(), Some(PASSWORD_TOO_LONG));
    }

    #[test]
    fn test_short_password_always_reports_length() {
        let candidates = ["", "a", "A", "1", ".", "aaaaaaa", "AAAAAAA", "1234567", "!!!!!!!", "aA1.", "Ab1!xyz"];
        for candidate in candidates {
            assert_eq!(
                password_error(candidate).as_deref(),
                Some(PASSWORD_TOO_SHORT),
                "candidate {:?}",
                candidate
            );
        }
    }

    #[test]
    fn test_lengths_count_characters() {
        let schema = login_schema().unwrap();
        // three two-byte characters
        assert_eq!(schema.validate(USERNAME_FIELD, &text("äöü")), None);
        assert_eq!(
            schema.validate(USERNAME_FIELD, &text("äö")).as_deref(),
            Some(USERNAME_TOO_SHORT)
        );
    }

    #[test]
    fn test_boolean_values_pass() {
        let field = FieldDescriptor::new("terms", FieldKind::Checkbox).min_length(1, "never");
        assert_eq!(field.validate(&FieldValue::Bool(false)), None);
    }

    #[test]
    fn test_unknown_field_has_no_rules() {
        let schema = login_schema().unwrap();
        assert_eq!(schema.validate("nickname", &text("")), None);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let result = FieldDescriptor::new("code", FieldKind::Text).pattern("[", "bad");
        assert!(matches!(result, Err(Error::InvalidPattern { ref field, .. }) if field == "code"));
    }

    #[test]
    fn test_duplicate_fields_rejected() {
        let result = ValidationSchema::new(vec![
            FieldDescriptor::new("email", FieldKind::Email),
            FieldDescriptor::new("email", FieldKind::Text),
        ]);
        assert!(matches!(result, Err(Error::DuplicateField(ref name)) if name == "email"));
    }

    #[test]
    fn test_validate_is_deterministic() {
        let schema = login_schema().unwrap();
        let value = text("Short1!");
        let first = schema.validate(PASSWORD_FIELD, &value);
        for _ in 0..10 {
            assert_eq!(schema.validate(PASSWORD_FIELD, &value), first);
        }
    }
}
