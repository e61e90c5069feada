//! Field-level error accumulation for form validation.

use std::collections::BTreeMap;

use serde::Serialize;

/// Per-field and form-level validation messages.
///
/// Returned by every form validator on failure and embedded verbatim in the
/// re-rendered page context, so the renderer can show messages beside the
/// offending inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    fields: BTreeMap<String, Vec<String>>,
    form: Vec<String>,
}

impl FieldErrors {
    /// Create an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a named field.
    pub fn add_field(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_default().push(message.into());
    }

    /// Record a message that applies to the form as a whole.
    pub fn add_form(&mut self, message: impl Into<String>) {
        self.form.push(message.into());
    }

    /// Whether any message has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_empty()
    }

    /// Messages recorded against `field`, if any.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Messages that apply to the form as a whole.
    #[must_use]
    pub fn form(&self) -> &[String] {
        self.form.as_slice()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn starts_empty() {
        assert!(FieldErrors::new().is_empty());
    }

    #[test]
    fn accumulates_messages_per_field() {
        let mut errors = FieldErrors::new();
        errors.add_field("email", "This field is required.");
        errors.add_field("email", "Enter a valid email address.");
        errors.add_form("Please correct the errors below.");

        assert!(!errors.is_empty());
        assert_eq!(
            errors.field("email"),
            Some(
                [
                    "This field is required.".to_owned(),
                    "Enter a valid email address.".to_owned(),
                ]
                .as_slice()
            )
        );
        assert!(errors.field("name").is_none());
        assert_eq!(errors.form(), ["Please correct the errors below.".to_owned()]);
    }

    #[test]
    fn serializes_fields_and_form_messages() {
        let mut errors = FieldErrors::new();
        errors.add_field("text", "This field is required.");
        let encoded = serde_json::to_value(&errors).expect("serializable errors");
        assert_eq!(
            encoded,
            serde_json::json!({
                "fields": { "text": ["This field is required."] },
                "form": [],
            })
        );
    }
}
