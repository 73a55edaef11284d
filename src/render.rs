//! Server-rendered HTML for the consultation form.

use crate::models::{ContactTime, FormField, FormState, InsuranceType};
use crate::notifier::Notification;
use crate::validation::FieldErrors;

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn banner(notification: &Notification) -> String {
    let class = if notification.is_error() {
        "banner banner-destructive"
    } else {
        "banner"
    };
    let role = if notification.is_error() { "alert" } else { "status" };
    format!(
        "<div class=\"{}\" role=\"{}\"><strong>{}</strong><p>{}</p></div>\n",
        class,
        role,
        escape_html(&notification.title),
        escape_html(&notification.description)
    )
}

fn field_error(errors: &FieldErrors, field: FormField) -> String {
    errors
        .get(&field)
        .map(|msg| {
            format!(
                "<p class=\"field-error\" id=\"{}-error\">{}</p>",
                field.as_str(),
                escape_html(msg)
            )
        })
        .unwrap_or_default()
}

fn text_input(state: &FormState, errors: &FieldErrors, field: FormField, kind: &str) -> String {
    let invalid = if errors.contains_key(&field) {
        " aria-invalid=\"true\""
    } else {
        ""
    };
    format!(
        "<label for=\"{name}\">{label}</label>\n<input type=\"{kind}\" id=\"{name}\" name=\"{name}\" value=\"{value}\"{invalid}>\n{error}\n",
        name = field.as_str(),
        label = field.label(),
        kind = kind,
        value = escape_html(state.get(field)),
        invalid = invalid,
        error = field_error(errors, field),
    )
}

fn select<'a>(
    state: &FormState,
    errors: &FieldErrors,
    field: FormField,
    placeholder: &str,
    options: impl Iterator<Item = (&'a str, &'a str)>,
) -> String {
    let current = state.get(field).trim();
    let mut html = format!(
        "<label for=\"{name}\">{label}</label>\n<select id=\"{name}\" name=\"{name}\">\n<option value=\"\">{placeholder}</option>\n",
        name = field.as_str(),
        label = field.label(),
        placeholder = placeholder,
    );
    for (value, label) in options {
        let selected = if value == current { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            value, selected, label
        ));
    }
    html.push_str("</select>\n");
    html.push_str(&field_error(errors, field));
    html.push('\n');
    html
}

/// Renders the full page: optional banner, fields with their current values
/// and inline errors.
pub fn render_form_page(
    state: &FormState,
    errors: &FieldErrors,
    notification: Option<&Notification>,
) -> String {
    let mut body = String::new();

    if let Some(notification) = notification {
        body.push_str(&banner(notification));
    }

    body.push_str("<form method=\"post\" action=\"/\" novalidate>\n");
    body.push_str(&text_input(state, errors, FormField::FullName, "text"));
    body.push_str(&text_input(state, errors, FormField::Email, "email"));
    body.push_str(&text_input(state, errors, FormField::Phone, "tel"));
    body.push_str(&text_input(state, errors, FormField::ZipCode, "text"));
    body.push_str(&select(
        state,
        errors,
        FormField::InsuranceType,
        "Select insurance type",
        InsuranceType::ALL.iter().map(|t| (t.as_str(), t.label())),
    ));
    body.push_str(&select(
        state,
        errors,
        FormField::ContactTime,
        "Select preferred time",
        ContactTime::ALL.iter().map(|t| (t.as_str(), t.label())),
    ));
    body.push_str(&text_input(state, errors, FormField::CurrentInsurer, "text"));
    // Disable the button after the first click so a slow webhook is not hit twice.
    body.push_str(
        "<button type=\"submit\" onclick=\"this.disabled=true;this.form.submit();\">Get My Free Consultation</button>\n</form>\n",
    );

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n<title>Free Insurance Consultation</title>\n</head>\n<body>\n<h1>Get Your Free Consultation</h1>\n{}</body>\n</html>\n",
        body
    )
}
