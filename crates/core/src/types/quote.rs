//! Customer details submitted with a quote request.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};

/// Four digits, an optional hyphen, four digits (`8888-8888` or `88888888`).
///
/// ASCII digits only; `\d` would also accept other Unicode decimal digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-?[0-9]{4}$").expect("Invalid regex"));

/// Raw quote form input, exactly as the customer typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

/// A quote form that passed validation. Values are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidQuoteForm {
    name: String,
    phone: String,
}

impl ValidQuoteForm {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// Form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Phone,
}

impl FormField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
        }
    }
}

/// A validation error on a single form field.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("name required")]
    NameRequired,
    #[error("phone required")]
    PhoneRequired,
    #[error("invalid phone format")]
    InvalidPhoneFormat,
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Field-keyed validation errors for a rejected form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<FormField, FieldError>);

impl FormErrors {
    /// Returns the error recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }

    fn insert(&mut self, field: FormField, error: FieldError) {
        self.0.insert(field, error);
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}: {error}", field.as_str())?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

impl QuoteForm {
    #[must_use]
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }

    /// Validate every field at once.
    ///
    /// # Errors
    ///
    /// Returns all field errors together so each field can be reported;
    /// nothing is partially accepted.
    pub fn validate(&self) -> Result<ValidQuoteForm, FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(FormField::Name, FieldError::NameRequired);
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.insert(FormField::Phone, FieldError::PhoneRequired);
        } else if !is_valid_phone(phone) {
            errors.insert(FormField::Phone, FieldError::InvalidPhoneFormat);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidQuoteForm {
            name: name.to_owned(),
            phone: phone.to_owned(),
        })
    }
}

/// Returns `true` if `phone` is four digits, an optional hyphen, four digits.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}
