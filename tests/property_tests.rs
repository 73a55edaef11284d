/// Property-based tests using proptest
/// Tests invariants of the validation schema that should hold for all inputs
use consultation_form::models::{FormField, FormState};
use consultation_form::validation::{is_valid_email, is_valid_zip, validate, validate_field};
use proptest::prelude::*;

fn valid_state() -> FormState {
    FormState {
        full_name: "Jane Doe".to_string(),
        email: "jane.doe@email.com".to_string(),
        phone: "(555) 123-4567".to_string(),
        zip_code: "85281".to_string(),
        insurance_type: "home".to_string(),
        contact_time: "anytime".to_string(),
        current_insurer: String::new(),
    }
}

fn required_field() -> impl Strategy<Value = FormField> {
    prop::sample::select(vec![
        FormField::FullName,
        FormField::Email,
        FormField::Phone,
        FormField::ZipCode,
        FormField::InsuranceType,
        FormField::ContactTime,
    ])
}

// Property: validation should never panic
proptest! {
    #[test]
    fn validation_never_panics(
        name in "\\PC*",
        email in "\\PC*",
        phone in "\\PC*",
        zip in "\\PC*",
        kind in "\\PC*",
        time in "\\PC*",
        insurer in "\\PC*"
    ) {
        let state = FormState {
            full_name: name,
            email,
            phone,
            zip_code: zip,
            insurance_type: kind,
            contact_time: time,
            current_insurer: insurer,
        };
        let _ = validate(&state);
    }

    #[test]
    fn any_blank_required_field_fails(field in required_field(), blank in "[ \\t]{0,5}") {
        let mut state = valid_state();
        state.set(field, blank);

        let errors = validate(&state).unwrap_err();
        prop_assert!(errors.contains_key(&field));
        prop_assert_eq!(errors.len(), 1);
    }

    #[test]
    fn valid_emails_accepted(
        local in "[a-z][a-z0-9._]{0,15}",
        domain in "[a-z]{1,10}",
        tld in "[a-z]{2,4}"
    ) {
        let email = format!("{}@{}.{}", local, domain, tld);
        prop_assert!(is_valid_email(&email));
    }

    #[test]
    fn emails_without_at_rejected(raw in "[a-z0-9.]{1,30}") {
        prop_assert!(!is_valid_email(&raw));
    }
}

// Property: ZIP and phone formats
proptest! {
    #[test]
    fn five_and_nine_digit_zips_accepted(zip in "[0-9]{5}", plus4 in proptest::option::of("[0-9]{4}")) {
        let code = match plus4 {
            Some(ext) => format!("{}-{}", zip, ext),
            None => zip,
        };
        prop_assert!(is_valid_zip(&code));
    }

    #[test]
    fn zips_with_letters_rejected(zip in "[0-9]{0,4}[A-Za-z][0-9A-Za-z]{0,4}") {
        prop_assert!(!is_valid_zip(&zip));
    }

    #[test]
    fn formatted_us_phones_accepted(
        area in 200u16..=999u16,
        prefix in 200u16..=999u16,
        line in 0u16..=9999u16,
        use_parens in proptest::bool::ANY
    ) {
        let phone = if use_parens {
            format!("({}) {}-{:04}", area, prefix, line)
        } else {
            format!("{}-{}-{:04}", area, prefix, line)
        };
        let mut state = valid_state();
        state.phone = phone;
        prop_assert_eq!(validate_field(&state, FormField::Phone), None);
    }

    #[test]
    fn short_phones_rejected(digits in "[0-9]{1,9}") {
        let mut state = valid_state();
        state.phone = digits;
        prop_assert!(validate_field(&state, FormField::Phone).is_some());
    }
}

// Property: validated output is trimmed
proptest! {
    #[test]
    fn validated_values_are_trimmed(pad_left in "[ \\t]{0,3}", pad_right in "[ \\t]{0,3}") {
        let mut state = valid_state();
        state.full_name = format!("{}Jane Doe{}", pad_left, pad_right);
        state.zip_code = format!("{}85281{}", pad_left, pad_right);

        let request = validate(&state).unwrap();
        prop_assert_eq!(request.full_name, "Jane Doe");
        prop_assert_eq!(request.zip_code, "85281");
    }
}
