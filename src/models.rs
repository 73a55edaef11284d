use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Constant `source` tag attached to every webhook payload.
pub const PAYLOAD_SOURCE: &str = "roi_consultation_form";

/// Names of the editable form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FullName,
    Email,
    Phone,
    ZipCode,
    InsuranceType,
    ContactTime,
    CurrentInsurer,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::FullName,
        FormField::Email,
        FormField::Phone,
        FormField::ZipCode,
        FormField::InsuranceType,
        FormField::ContactTime,
        FormField::CurrentInsurer,
    ];

    /// Wire name used in form bodies and the webhook payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::FullName => "fullName",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::ZipCode => "zipCode",
            FormField::InsuranceType => "insuranceType",
            FormField::ContactTime => "contactTime",
            FormField::CurrentInsurer => "currentInsurer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::FullName => "Full Name",
            FormField::Email => "Email Address",
            FormField::Phone => "Phone Number",
            FormField::ZipCode => "ZIP Code",
            FormField::InsuranceType => "Insurance Type",
            FormField::ContactTime => "Best Time to Contact",
            FormField::CurrentInsurer => "Current Insurance Provider",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown form field: {}", s))
    }
}

/// Kind of coverage the visitor is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsuranceType {
    Auto,
    Home,
    Renters,
    Life,
    Business,
    Other,
}

impl InsuranceType {
    pub const ALL: [InsuranceType; 6] = [
        InsuranceType::Auto,
        InsuranceType::Home,
        InsuranceType::Renters,
        InsuranceType::Life,
        InsuranceType::Business,
        InsuranceType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsuranceType::Auto => "auto",
            InsuranceType::Home => "home",
            InsuranceType::Renters => "renters",
            InsuranceType::Life => "life",
            InsuranceType::Business => "business",
            InsuranceType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InsuranceType::Auto => "Auto Insurance",
            InsuranceType::Home => "Home Insurance",
            InsuranceType::Renters => "Renters Insurance",
            InsuranceType::Life => "Life Insurance",
            InsuranceType::Business => "Business Insurance",
            InsuranceType::Other => "Other",
        }
    }
}

impl FromStr for InsuranceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InsuranceType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown insurance type: {}", s))
    }
}

/// Preferred window for the callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactTime {
    Morning,
    Afternoon,
    Evening,
    Anytime,
}

impl ContactTime {
    pub const ALL: [ContactTime; 4] = [
        ContactTime::Morning,
        ContactTime::Afternoon,
        ContactTime::Evening,
        ContactTime::Anytime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactTime::Morning => "morning",
            ContactTime::Afternoon => "afternoon",
            ContactTime::Evening => "evening",
            ContactTime::Anytime => "anytime",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactTime::Morning => "Morning (8am - 12pm)",
            ContactTime::Afternoon => "Afternoon (12pm - 5pm)",
            ContactTime::Evening => "Evening (5pm - 8pm)",
            ContactTime::Anytime => "Anytime",
        }
    }
}

impl FromStr for ContactTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContactTime::ALL
            .iter()
            .copied()
            .find(|time| time.as_str() == s)
            .ok_or_else(|| format!("Unknown contact time: {}", s))
    }
}

/// Raw, editable form state.
///
/// Values are stored exactly as typed; trimming happens during validation.
/// Missing keys in a form or JSON body deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    #[serde(deserialize_with = "null_as_empty")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub zip_code: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub insurance_type: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub contact_time: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub current_insurer: String,
}

// Clients send `null` for untouched optional inputs; treat it like "".
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl FormState {
    /// Returns the raw value of a single field.
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.full_name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::ZipCode => &self.zip_code,
            FormField::InsuranceType => &self.insurance_type,
            FormField::ContactTime => &self.contact_time,
            FormField::CurrentInsurer => &self.current_insurer,
        }
    }

    /// Overwrites the raw value of a single field.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::FullName => &mut self.full_name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::ZipCode => &mut self.zip_code,
            FormField::InsuranceType => &mut self.insurance_type,
            FormField::ContactTime => &mut self.contact_time,
            FormField::CurrentInsurer => &mut self.current_insurer,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        *self == FormState::default()
    }
}

/// A validated consultation request. All strings are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub zip_code: String,
    pub insurance_type: InsuranceType,
    pub contact_time: ContactTime,
    /// Empty when the visitor left it blank.
    pub current_insurer: String,
}

/// JSON body posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationPayload {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub zip_code: String,
    pub insurance_type: InsuranceType,
    pub contact_time: ContactTime,
    pub current_insurer: String,
    /// ISO-8601 submission time (UTC).
    pub timestamp: String,
    pub source: String,
}

impl ConsultationPayload {
    /// Builds the payload, stamping it with the current UTC time.
    pub fn from_request(request: ConsultationRequest) -> Self {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        Self::with_timestamp(request, timestamp)
    }

    pub fn with_timestamp(request: ConsultationRequest, timestamp: String) -> Self {
        Self {
            full_name: request.full_name,
            email: request.email,
            phone: request.phone,
            zip_code: request.zip_code,
            insurance_type: request.insurance_type,
            contact_time: request.contact_time,
            current_insurer: request.current_insurer,
            timestamp,
            source: PAYLOAD_SOURCE.to_string(),
        }
    }
}
