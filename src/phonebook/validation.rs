//! Field validation for user input.
//!
//! Names (first, last, middle and company):
//! - Latin and Cyrillic letters, spaces, hyphens (`-`) and double quotes (`"`)
//! - The middle name may be empty, every other name is required
//!
//! Phone numbers:
//! - Must start with `+`, `7` or `8`
//! - Stored as digits only: `+7(123)456-78-90` becomes `71234567890`

use crate::model::Field;

/// Validates an optional name and returns it trimmed.
///
/// An empty string is valid and is returned as `Ok("")`.
///
/// # Examples
/// ```
/// use phonebook::validation::validate_name;
///
/// assert_eq!(validate_name("Anna-Maria").unwrap(), "Anna-Maria");
/// assert_eq!(validate_name("Иван").unwrap(), "Иван");
/// assert_eq!(validate_name("").unwrap(), "");
///
/// assert!(validate_name("R2D2").is_err());
/// assert!(validate_name("a;b").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if let Some(ch) = trimmed.chars().find(|ch| !is_valid_name_char(*ch)) {
        return Err(ValidationError::InvalidCharacter(ch));
    }
    Ok(trimmed.to_string())
}

/// Like [`validate_name`], but an empty value is rejected.
pub fn validate_required_name(name: &str) -> Result<String, ValidationError> {
    let validated = validate_name(name)?;
    if validated.is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(validated)
}

/// Validates a phone number and returns its digits.
///
/// # Examples
/// ```
/// use phonebook::validation::validate_phone;
///
/// assert_eq!(validate_phone("+7(123)456-78-90").unwrap(), "71234567890");
/// assert_eq!(validate_phone("8 800 555 35 35").unwrap(), "88005553535");
///
/// assert!(validate_phone("123456").is_err());
/// assert!(validate_phone("").is_err());
/// ```
pub fn validate_phone(number: &str) -> Result<String, ValidationError> {
    let first_char = match number.chars().next() {
        Some(ch) => ch,
        None => return Err(ValidationError::Empty),
    };
    if !matches!(first_char, '+' | '7' | '8') {
        return Err(ValidationError::InvalidStart(first_char));
    }

    let digits: String = number.chars().filter(|ch| ch.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(ValidationError::NoDigits);
    }
    Ok(digits)
}

/// Validates a value for `field` with the rule that applies to it.
///
/// `required` decides whether an empty name is accepted; phone numbers can
/// never be empty.
pub fn validate_field(
    field: Field,
    value: &str,
    required: bool,
) -> Result<String, ValidationError> {
    match field {
        Field::Id => Err(ValidationError::ReadOnly),
        f if f.is_phone() => validate_phone(value),
        _ if required => validate_required_name(value),
        _ => validate_name(value),
    }
}

fn is_valid_name_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || is_cyrillic_letter(ch) || ch == ' ' || ch == '-' || ch == '"'
}

fn is_cyrillic_letter(ch: char) -> bool {
    matches!(ch, 'А'..='я' | 'Ё' | 'ё')
}

/// Error type for field validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required value is empty
    Empty,
    /// A name contains a character outside the allowed set
    InvalidCharacter(char),
    /// A phone number does not start with `+`, `7` or `8`
    InvalidStart(char),
    /// A phone number has no digits at all
    NoDigits,
    /// The field cannot be edited
    ReadOnly,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "value cannot be empty"),
            ValidationError::InvalidCharacter(ch) => write!(
                f,
                "invalid character '{}': only letters, spaces, hyphens and double quotes \
                 are allowed",
                ch
            ),
            ValidationError::InvalidStart(ch) => write!(
                f,
                "number cannot start with '{}': it must start with +, 7 or 8",
                ch
            ),
            ValidationError::NoDigits => write!(f, "number contains no digits"),
            ValidationError::ReadOnly => write!(f, "field cannot be edited"),
        }
    }
}

impl std::error::Error for ValidationError {}
