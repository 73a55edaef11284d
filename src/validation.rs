//! Field validation schema for the consultation form.
//!
//! Each field has an ordered list of rules: required, minimum length,
//! maximum length, then character set or pattern. Only the first rule a
//! field violates is reported.

use crate::models::{ConsultationRequest, ContactTime, FormField, FormState, InsuranceType};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

/// Field name → message of the first violated rule.
pub type FieldErrors = BTreeMap<FormField, String>;

pub const FULL_NAME_MIN: usize = 2;
pub const FULL_NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 255;
pub const PHONE_MIN: usize = 10;
pub const PHONE_MAX: usize = 20;
pub const ZIP_MAX: usize = 10;
pub const INSURER_MAX: usize = 100;

lazy_static! {
    // local@domain.tld, at least one dot in the domain
    static ref EMAIL_RE: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
    )
    .unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^[0-9 ()+-]+$").unwrap();
    static ref ZIP_RE: Regex = Regex::new(r"^[0-9]{5}(?:-[0-9]{4})?$").unwrap();
}

/// Check email shape (no length rule).
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check that a phone number only uses digits, spaces, parentheses, `+` and `-`.
pub fn is_valid_phone_charset(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Check for a 5-digit or ZIP+4 code.
pub fn is_valid_zip(zip: &str) -> bool {
    ZIP_RE.is_match(zip)
}

/// Validate a single field of the form.
///
/// Returns the message of the first violated rule, or `None` when the
/// field is acceptable. Used on blur and as the building block of
/// [`validate`].
pub fn validate_field(state: &FormState, field: FormField) -> Option<String> {
    let value = state.get(field).trim();
    let len = value.chars().count();

    let message = match field {
        FormField::FullName => {
            if value.is_empty() {
                "Full name is required"
            } else if len < FULL_NAME_MIN {
                "Name must be at least 2 characters"
            } else if len > FULL_NAME_MAX {
                "Name must be less than 100 characters"
            } else {
                return None;
            }
        }
        FormField::Email => {
            if value.is_empty() {
                "Email is required"
            } else if len > EMAIL_MAX {
                "Email must be less than 255 characters"
            } else if !is_valid_email(value) {
                "Please enter a valid email address"
            } else {
                return None;
            }
        }
        FormField::Phone => {
            if value.is_empty() {
                "Phone number is required"
            } else if len < PHONE_MIN {
                "Phone number must be at least 10 digits"
            } else if len > PHONE_MAX {
                "Phone number must be less than 20 characters"
            } else if !is_valid_phone_charset(value) {
                "Please enter a valid phone number"
            } else {
                return None;
            }
        }
        FormField::ZipCode => {
            if value.is_empty() {
                "ZIP code is required"
            } else if len > ZIP_MAX {
                "ZIP code must be less than 10 characters"
            } else if !is_valid_zip(value) {
                "Please enter a valid ZIP code"
            } else {
                return None;
            }
        }
        FormField::InsuranceType => {
            if value.parse::<InsuranceType>().is_ok() {
                return None;
            }
            "Please select an insurance type"
        }
        FormField::ContactTime => {
            if value.parse::<ContactTime>().is_ok() {
                return None;
            }
            "Please select a preferred contact time"
        }
        FormField::CurrentInsurer => {
            if len > INSURER_MAX {
                "Insurer name must be less than 100 characters"
            } else {
                return None;
            }
        }
    };

    Some(message.to_string())
}

/// Validate a whole form snapshot.
///
/// # Returns
///
/// * `Ok(ConsultationRequest)` - trimmed, typed record when every rule passes.
/// * `Err(FieldErrors)` - one message per failing field.
pub fn validate(state: &FormState) -> Result<ConsultationRequest, FieldErrors> {
    let errors: FieldErrors = FormField::ALL
        .iter()
        .filter_map(|&field| validate_field(state, field).map(|msg| (field, msg)))
        .collect();

    if !errors.is_empty() {
        return Err(errors);
    }

    // Every rule passed, so the enum fields parse.
    let insurance_type = state
        .insurance_type
        .trim()
        .parse::<InsuranceType>()
        .map_err(|msg| FieldErrors::from([(FormField::InsuranceType, msg)]))?;
    let contact_time = state
        .contact_time
        .trim()
        .parse::<ContactTime>()
        .map_err(|msg| FieldErrors::from([(FormField::ContactTime, msg)]))?;

    Ok(ConsultationRequest {
        full_name: state.full_name.trim().to_string(),
        email: state.email.trim().to_string(),
        phone: state.phone.trim().to_string(),
        zip_code: state.zip_code.trim().to_string(),
        insurance_type,
        contact_time,
        current_insurer: state.current_insurer.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_state() -> FormState {
        FormState {
            full_name: "Jane Doe".to_string(),
            email: "jane.doe@email.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            zip_code: "85281".to_string(),
            insurance_type: "auto".to_string(),
            contact_time: "morning".to_string(),
            current_insurer: String::new(),
        }
    }

    #[test]
    fn test_valid_state_passes() {
        let request = validate(&valid_state()).unwrap();
        assert_eq!(request.full_name, "Jane Doe");
        assert_eq!(request.insurance_type, InsuranceType::Auto);
        assert_eq!(request.contact_time, ContactTime::Morning);
        assert_eq!(request.current_insurer, "");
    }

    #[test]
    fn test_values_are_trimmed() {
        let mut state = valid_state();
        state.full_name = "  Jane Doe  ".to_string();
        state.email = " jane.doe@email.com\t".to_string();
        state.current_insurer = "  Acme Mutual ".to_string();

        let request = validate(&state).unwrap();
        assert_eq!(request.full_name, "Jane Doe");
        assert_eq!(request.email, "jane.doe@email.com");
        assert_eq!(request.current_insurer, "Acme Mutual");
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = validate(&FormState::default()).unwrap_err();
        assert_eq!(errors.len(), 6);
        assert!(!errors.contains_key(&FormField::CurrentInsurer));
        assert_eq!(errors[&FormField::FullName], "Full name is required");
        assert_eq!(
            errors[&FormField::InsuranceType],
            "Please select an insurance type"
        );
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let mut state = valid_state();
        state.full_name = "   ".to_string();
        let errors = validate(&state).unwrap_err();
        assert_eq!(errors[&FormField::FullName], "Full name is required");
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("jane.doe@email.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("jane@localhost"));
        assert!(!is_valid_email("jane@@email.com"));
    }

    #[test]
    fn test_email_length_checked_before_shape() {
        let mut state = valid_state();
        state.email = format!("{}@email.com", "a".repeat(250));
        assert_eq!(
            validate_field(&state, FormField::Email).as_deref(),
            Some("Email must be less than 255 characters")
        );
    }

    #[test]
    fn test_phone_rules() {
        let mut state = valid_state();
        assert_eq!(validate_field(&state, FormField::Phone), None);

        state.phone = "12345".to_string();
        assert_eq!(
            validate_field(&state, FormField::Phone).as_deref(),
            Some("Phone number must be at least 10 digits")
        );

        state.phone = "555-123-ABCD".to_string();
        assert_eq!(
            validate_field(&state, FormField::Phone).as_deref(),
            Some("Please enter a valid phone number")
        );

        state.phone = "+1 (555) 123-4567 000000".to_string();
        assert_eq!(
            validate_field(&state, FormField::Phone).as_deref(),
            Some("Phone number must be less than 20 characters")
        );
    }

    #[test]
    fn test_zip_patterns() {
        assert!(is_valid_zip("85281"));
        assert!(is_valid_zip("85281-1234"));
        assert!(!is_valid_zip("ABCDE"));
        assert!(!is_valid_zip("8528"));
        assert!(!is_valid_zip("85281-12"));
    }

    #[test]
    fn test_enum_fields_reject_unknown_values() {
        let mut state = valid_state();
        state.insurance_type = "boat".to_string();
        state.contact_time = "midnight".to_string();

        let errors = validate(&state).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[&FormField::ContactTime],
            "Please select a preferred contact time"
        );
    }

    #[test]
    fn test_current_insurer_length() {
        let mut state = valid_state();
        state.current_insurer = "x".repeat(101);
        let errors = validate(&state).unwrap_err();
        assert_eq!(
            errors[&FormField::CurrentInsurer],
            "Insurer name must be less than 100 characters"
        );
    }

    #[test]
    fn test_name_length_counts_characters() {
        let mut state = valid_state();
        state.full_name = "Zoë".to_string();
        assert_eq!(validate_field(&state, FormField::FullName), None);

        state.full_name = "é".repeat(100);
        assert_eq!(validate_field(&state, FormField::FullName), None);

        state.full_name = "J".to_string();
        assert_eq!(
            validate_field(&state, FormField::FullName).as_deref(),
            Some("Name must be at least 2 characters")
        );
    }
}
