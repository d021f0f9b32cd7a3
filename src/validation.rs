// Form checks run on submit; failures are returned inline per field
use crate::models::{ContactDetails, GuestDetails, TravelerDetails};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}$").expect("valid phone pattern"));

pub const INCOMPLETE_TRAVELER: &str = "Please complete all fields";
pub const INVALID_EMAIL: &str = "Please enter a valid email";
pub const INVALID_PHONE: &str = "Please enter a valid 10-digit phone number";
pub const REQUIRED: &str = "This field is required";

/// Field keyed validation messages, ordered by field name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "Validation failed for: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn add(&mut self, field: impl Into<String>, message: &str) {
        self.0.entry(field.into()).or_insert_with(|| message.to_string());
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

// Guest phones are typed free-form ("+91 98765 43210"); strip the decoration first
fn normalize_guest_phone(phone: &str) -> String {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
    compact
        .strip_prefix("+91")
        .map(str::to_string)
        .unwrap_or(compact)
}

pub fn validate_guest(guest: &GuestDetails) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let required = [
        ("firstName", &guest.first_name),
        ("lastName", &guest.last_name),
        ("email", &guest.email),
        ("phone", &guest.phone),
        ("address", &guest.address),
        ("city", &guest.city),
        ("zipCode", &guest.zip_code),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.add(field, REQUIRED);
        }
    }

    if !guest.email.trim().is_empty() && !is_valid_email(&guest.email) {
        errors.add("email", INVALID_EMAIL);
    }
    if !guest.phone.trim().is_empty() && !is_valid_phone(&normalize_guest_phone(&guest.phone)) {
        errors.add("phone", INVALID_PHONE);
    }

    errors.into_result()
}

pub fn validate_travelers(
    travelers: &[TravelerDetails],
    contact: &ContactDetails,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    for (index, traveler) in travelers.iter().enumerate() {
        let incomplete = [
            &traveler.first_name,
            &traveler.last_name,
            &traveler.date_of_birth,
            &traveler.nationality,
        ]
        .iter()
        .any(|v| v.trim().is_empty());
        if incomplete {
            errors.add(format!("traveler-{}", index), INCOMPLETE_TRAVELER);
        }
    }

    if !is_valid_email(&contact.email) {
        errors.add("email", INVALID_EMAIL);
    }
    if !is_valid_phone(&contact.phone) {
        errors.add("phone", INVALID_PHONE);
    }

    errors.into_result()
}
