//! Account registration and profile payloads.

use crate::error::{GatewayError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Minimum password length accepted by the registration form.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A picked avatar image uploaded with the registration form.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name sent in the multipart part.
    pub file_name: String,
    /// MIME type, e.g. `image/jpeg`.
    pub mime_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Registration form input.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    /// Full name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Chosen password.
    pub password: String,
    /// Password typed a second time.
    pub confirmed_password: String,
    /// Gender as the backend spells it.
    pub gender: String,
    /// Date of birth.
    pub dob: NaiveDate,
    /// Optional avatar.
    pub image: Option<ImageUpload>,
}

impl Registration {
    /// Local checks run before any register request.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first field that is blank, a
    /// malformed email, a short password, or mismatched passwords.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("name", &self.name, "Please enter your name"),
            ("email", &self.email, "Please enter your email"),
            ("phone", &self.phone, "Please enter your phone number"),
            ("gender", &self.gender, "Please choose a gender"),
        ];
        for (field, value, reason) in required {
            if value.trim().is_empty() {
                return Err(GatewayError::validation(field, reason));
            }
        }
        if !self.email.contains('@') {
            return Err(GatewayError::validation("email", "Email is not valid"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(GatewayError::validation(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }
        if self.password != self.confirmed_password {
            return Err(GatewayError::validation(
                "confirmedPassword",
                "Passwords do not match",
            ));
        }
        Ok(())
    }

    /// Text fields of the multipart form, in the order the backend lists them.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.trim().to_string()),
            ("Email", self.email.trim().to_string()),
            ("PhoneNumber", self.phone.trim().to_string()),
            ("Password", self.password.clone()),
            ("ConfirmedPassword", self.confirmed_password.clone()),
            ("Gender", self.gender.clone()),
            ("DateOfBirth", self.dob.format("%Y-%m-%d").to_string()),
        ]
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("gender", &self.gender)
            .field("dob", &self.dob)
            .field("image", &self.image)
            .finish_non_exhaustive()
    }
}

/// The logged-in user's profile (`GET /api/Account/current-user`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name.
    #[serde(alias = "fullName")]
    pub name: String,
    /// Account email.
    pub email: String,
    /// Phone number.
    #[serde(default, alias = "phoneNumber")]
    pub phone: Option<String>,
    /// Gender.
    #[serde(default)]
    pub gender: Option<String>,
    /// Date of birth as sent by the server.
    #[serde(default, alias = "dateOfBirth")]
    pub dob: Option<String>,
    /// Avatar.
    #[serde(default)]
    pub image_url: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            name: "An Nguyen".to_string(),
            email: "an@example.com".to_string(),
            phone: "0900000000".to_string(),
            password: "secret1".to_string(),
            confirmed_password: "secret1".to_string(),
            gender: "Female".to_string(),
            dob: NaiveDate::from_ymd_opt(1999, 4, 30).unwrap(),
            image: None,
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(registration().validate().is_ok());
    }

    #[test]
    fn mismatched_passwords_are_rejected() {
        let mut form = registration();
        form.confirmed_password = "secret2".to_string();
        assert!(matches!(
            form.validate(),
            Err(GatewayError::ValidationError { field: "confirmedPassword", .. })
        ));
    }

    #[test]
    fn short_password_is_rejected() {
        let mut form = registration();
        form.password = "abc".to_string();
        form.confirmed_password = "abc".to_string();
        assert!(matches!(
            form.validate(),
            Err(GatewayError::ValidationError { field: "password", .. })
        ));
    }

    #[test]
    fn date_of_birth_is_iso_formatted() {
        let fields = registration().form_fields();
        assert!(fields.contains(&("DateOfBirth", "1999-04-30".to_string())));
    }
}
