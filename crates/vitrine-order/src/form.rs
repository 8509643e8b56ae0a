//! Checkout form data and its validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest accepted formatted phone, e.g. `(44) 3322-1100` style numbers
/// rendered as `(44) 33221-100`.
const MIN_PHONE_LEN: usize = 14;

/// Digits kept by [`format_phone`]: two area-code digits plus nine local digits.
const MAX_PHONE_DIGITS: usize = 11;

/// Contact and delivery details typed in at checkout. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFormData {
    pub name: String,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Street,
    Number,
    Neighborhood,
    Phone,
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormField::Name => write!(f, "name"),
            FormField::Street => write!(f, "street"),
            FormField::Number => write!(f, "number"),
            FormField::Neighborhood => write!(f, "neighborhood"),
            FormField::Phone => write!(f, "phone"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

/// Every invalid field of a submitted form, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("checkout form has {} invalid field(s)", .errors.len())]
pub struct FormErrors {
    pub errors: Vec<FieldError>,
}

impl FormErrors {
    /// Message for `field`, if it failed validation.
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }
}

impl OrderFormData {
    /// Copy with the phone run through [`format_phone`].
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            phone: format_phone(&self.phone),
            ..self.clone()
        }
    }

    /// Checks required fields and phone length.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] listing each blank required field and a phone
    /// whose formatted form is shorter than 14 characters.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let required = [
            (FormField::Name, &self.name, "Nome é obrigatório"),
            (FormField::Street, &self.street, "Rua é obrigatória"),
            (FormField::Number, &self.number, "Número é obrigatório"),
            (FormField::Neighborhood, &self.neighborhood, "Bairro é obrigatório"),
        ];

        let mut errors: Vec<FieldError> = required
            .into_iter()
            .filter(|(_, value, _)| value.trim().is_empty())
            .map(|(field, _, message)| FieldError { field, message })
            .collect();

        if format_phone(&self.phone).chars().count() < MIN_PHONE_LEN {
            errors.push(FieldError {
                field: FormField::Phone,
                message: "Telefone inválido",
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FormErrors { errors })
        }
    }
}

/// Masks phone input as `(DD) DDDDD-DDDD`.
///
/// Non-digits are dropped and at most 11 digits are kept. Partial input is
/// masked as far as it goes: `"449"` becomes `"(44) 9"`.
#[must_use]
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_PHONE_DIGITS)
        .collect();

    if digits.len() <= 2 {
        return digits;
    }

    let (area, local) = digits.split_at(2);
    if local.len() <= 5 {
        return format!("({area}) {local}");
    }
    let (head, tail) = local.split_at(5);
    format!("({area}) {head}-{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> OrderFormData {
        OrderFormData {
            name: "Maria Silva".to_owned(),
            street: "Rua das Flores".to_owned(),
            number: "123".to_owned(),
            neighborhood: "Centro".to_owned(),
            phone: "(44) 99739-4844".to_owned(),
        }
    }

    #[test]
    fn format_phone_full_mobile() {
        assert_eq!(format_phone("44997394844"), "(44) 99739-4844");
    }

    #[test]
    fn format_phone_strips_non_digits_and_extra_digits() {
        assert_eq!(format_phone("+55 (44) 99739-4844"), "(55) 44997-3948");
        assert_eq!(format_phone("4499739484499"), "(44) 99739-4844");
    }

    #[test]
    fn format_phone_partial_input() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("4"), "4");
        assert_eq!(format_phone("44"), "44");
        assert_eq!(format_phone("449"), "(44) 9");
        assert_eq!(format_phone("4499739"), "(44) 99739");
        assert_eq!(format_phone("44997394"), "(44) 99739-4");
    }

    #[test]
    fn format_phone_is_idempotent() {
        let once = format_phone("44997394844");
        assert_eq!(format_phone(&once), once);
    }

    #[test]
    fn valid_form_passes() {
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn landline_length_is_accepted() {
        let mut form = filled();
        form.phone = "4433221100".to_owned();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn blank_fields_are_reported_per_field() {
        let form = OrderFormData {
            phone: "44997394844".to_owned(),
            street: "  ".to_owned(),
            ..OrderFormData::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.errors.len(), 4);
        assert_eq!(errors.get(FormField::Name), Some("Nome é obrigatório"));
        assert_eq!(errors.get(FormField::Street), Some("Rua é obrigatória"));
        assert_eq!(errors.get(FormField::Number), Some("Número é obrigatório"));
        assert_eq!(errors.get(FormField::Neighborhood), Some("Bairro é obrigatório"));
        assert!(errors.get(FormField::Phone).is_none());
    }

    #[test]
    fn short_phone_is_invalid() {
        let mut form = filled();
        form.phone = "449973".to_owned();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.errors.len(), 1);
        assert_eq!(errors.get(FormField::Phone), Some("Telefone inválido"));
    }

    #[test]
    fn normalized_formats_phone_only() {
        let mut form = filled();
        form.phone = "44997394844".to_owned();
        let normalized = form.normalized();
        assert_eq!(normalized.phone, "(44) 99739-4844");
        assert_eq!(normalized.name, form.name);
    }

    #[test]
    fn form_errors_display() {
        let err = OrderFormData::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "checkout form has 5 invalid field(s)");
    }
}
