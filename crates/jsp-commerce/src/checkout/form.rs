//! Customer details entered at checkout.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Checkout form fields. Keys serialize in camelCase, matching the form
/// input names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    /// Date of birth, `YYYY-MM-DD`.
    pub dob: String,
    pub address: String,
    /// Optional free text.
    #[serde(default)]
    pub notes: String,
}

impl CheckoutForm {
    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            email: self.email.trim().to_string(),
            dob: self.dob.trim().to_string(),
            address: self.address.trim().to_string(),
            notes: self.notes.trim().to_string(),
        }
    }

    /// Validate against today's local date.
    pub fn validate(&self) -> Result<(), CommerceError> {
        self.validate_on(Local::now().date_naive())
    }

    /// Validate, treating `today` as the latest acceptable date of birth.
    ///
    /// Reports the first invalid field.
    pub fn validate_on(&self, today: NaiveDate) -> Result<(), CommerceError> {
        required("fullName", &self.full_name)?;
        required("phoneNumber", &self.phone_number)?;
        required("email", &self.email)?;
        required("dob", &self.dob)?;
        required("address", &self.address)?;

        let phone = self.phone_number.trim();
        if !phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
        {
            return Err(CommerceError::validation(
                "phoneNumber",
                "may only contain digits, spaces, '+', '-' and parentheses",
            ));
        }
        if !phone.chars().any(|c| c.is_ascii_digit()) {
            return Err(CommerceError::validation("phoneNumber", "must contain digits"));
        }

        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => {
                return Err(CommerceError::validation(
                    "email",
                    "must look like name@example.com",
                ))
            }
        }

        let dob = self.date_of_birth()?;
        if dob > today {
            return Err(CommerceError::validation("dob", "cannot be in the future"));
        }
        Ok(())
    }

    /// Parsed date of birth.
    pub fn date_of_birth(&self) -> Result<NaiveDate, CommerceError> {
        NaiveDate::parse_from_str(self.dob.trim(), DATE_FORMAT)
            .map_err(|_| CommerceError::validation("dob", "must be a date in YYYY-MM-DD format"))
    }
}

fn required(field: &'static str, value: &str) -> Result<(), CommerceError> {
    if value.trim().is_empty() {
        return Err(CommerceError::validation(field, "is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Budi Santoso".into(),
            phone_number: "+62 812-3456-7890".into(),
            email: "budi@example.com".into(),
            dob: "1995-08-17".into(),
            address: "Jl. Merdeka No. 1, Jakarta".into(),
            notes: String::new(),
        }
    }

    fn field_of(result: Result<(), CommerceError>) -> &'static str {
        match result {
            Err(CommerceError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(valid_form().validate_on(today()).is_ok());
    }

    #[test]
    fn test_required_fields() {
        let mut form = valid_form();
        form.full_name = "   ".into();
        assert_eq!(field_of(form.validate_on(today())), "fullName");

        let mut form = valid_form();
        form.address = String::new();
        assert_eq!(field_of(form.validate_on(today())), "address");
    }

    #[test]
    fn test_notes_are_optional() {
        let mut form = valid_form();
        form.notes = "Leave at the door".into();
        assert!(form.validate_on(today()).is_ok());
    }

    #[test]
    fn test_phone_characters() {
        let mut form = valid_form();
        form.phone_number = "(021) 555-0101".into();
        assert!(form.validate_on(today()).is_ok());

        form.phone_number = "call me".into();
        assert_eq!(field_of(form.validate_on(today())), "phoneNumber");

        form.phone_number = "+-()".into();
        assert_eq!(field_of(form.validate_on(today())), "phoneNumber");
    }

    #[test]
    fn test_email_shape() {
        let mut form = valid_form();
        for email in ["budi", "@example.com", "budi@"] {
            form.email = email.into();
            assert_eq!(field_of(form.validate_on(today())), "email", "{email}");
        }
    }

    #[test]
    fn test_dob() {
        let mut form = valid_form();
        form.dob = "17/08/1995".into();
        assert_eq!(field_of(form.validate_on(today())), "dob");

        form.dob = "2024-06-02".into();
        assert_eq!(field_of(form.validate_on(today())), "dob");

        form.dob = "2024-06-01".into();
        assert!(form.validate_on(today()).is_ok());
    }

    #[test]
    fn test_trimmed() {
        let mut form = valid_form();
        form.email = "  budi@example.com\n".into();
        assert_eq!(form.trimmed().email, "budi@example.com");
    }

    #[test]
    fn test_camel_case_keys() {
        let json = serde_json::to_value(valid_form()).unwrap();
        assert!(json.get("fullName").is_some());
        assert!(json.get("phoneNumber").is_some());
        assert!(json.get("full_name").is_none());
    }
}
