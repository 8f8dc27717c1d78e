//! Registration records and the submissions they are created from.
//!
//! A [`RegistrationRequest`] is whatever the caller sent. Validating it
//! yields a [`NewRegistration`], and only a store can turn that into a
//! [`Registration`] by assigning its id and timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::ALL_FIELDS_REQUIRED;
use crate::error::{MeetupError, Result};

/// A registrant accepted by a store.
///
/// Immutable once created. The store is the only writer of `id` and
/// `created_at`.
///
/// # JSON shape
/// ```text
/// { "id", "name", "email", "company", "role", "createdAt" (RFC 3339) }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Unique identifier (assigned by the store)
    pub id: String,
    /// Registrant's full name
    pub name: String,
    /// Contact email, stored as given
    pub email: String,
    /// Company or organization
    pub company: String,
    /// Job role or title
    pub role: String,
    /// When the store accepted the record
    pub created_at: DateTime<Utc>,
}

impl Registration {
    /// Materializes a validated candidate with a store-assigned id and timestamp.
    pub fn from_candidate(id: impl Into<String>, candidate: NewRegistration, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: candidate.name,
            email: candidate.email,
            company: candidate.company,
            role: candidate.role,
            created_at,
        }
    }
}

/// Raw, untrusted registration submission.
///
/// Absent JSON fields decode to empty strings so that they fail validation
/// with the same error as blank ones.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RegistrationRequest {
    /// Registrant's full name
    #[serde(default)]
    pub name: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
    /// Company or organization
    #[serde(default)]
    pub company: String,
    /// Job role or title
    #[serde(default)]
    pub role: String,
}

impl RegistrationRequest {
    /// Decodes a submission from the first JSON value in `body`.
    ///
    /// Bytes after that value are ignored, and a JSON `null` decodes to an
    /// empty request that fails [`validate`](Self::validate).
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let mut de = serde_json::Deserializer::from_slice(body);
        let req = Option::<Self>::deserialize(&mut de)?;
        Ok(req.unwrap_or_default())
    }

    /// Checks that every field is non-blank and converts into a candidate.
    ///
    /// Only emptiness is checked; there is no format validation. Values are
    /// kept exactly as submitted.
    pub fn validate(self) -> Result<NewRegistration> {
        let blank = [&self.name, &self.email, &self.company, &self.role]
            .iter()
            .any(|field| field.trim().is_empty());

        if blank {
            return Err(MeetupError::ValidationError(ALL_FIELDS_REQUIRED.into()));
        }

        Ok(NewRegistration {
            name: self.name,
            email: self.email,
            company: self.company,
            role: self.role,
        })
    }
}

/// A validated candidate waiting for a store to accept it.
///
/// Can only be obtained through [`RegistrationRequest::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRegistration {
    name: String,
    email: String,
    company: String,
    role: String,
}

impl NewRegistration {
    /// Registrant's full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Company or organization.
    pub fn company(&self) -> &str {
        &self.company
    }

    /// Job role or title.
    pub fn role(&self) -> &str {
        &self.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn request(name: &str, email: &str, company: &str, role: &str) -> RegistrationRequest {
        RegistrationRequest {
            name: name.into(),
            email: email.into(),
            company: company.into(),
            role: role.into(),
        }
    }

    #[test]
    fn test_valid_request() {
        let candidate = request("Asha", "asha@x.com", "Acme", "Engineer")
            .validate()
            .unwrap();
        assert_eq!(candidate.name(), "Asha");
        assert_eq!(candidate.email(), "asha@x.com");
        assert_eq!(candidate.company(), "Acme");
        assert_eq!(candidate.role(), "Engineer");
    }

    #[test_case("", "a@b.com", "C", "R" ; "missing name")]
    #[test_case("A", "", "C", "R" ; "missing email")]
    #[test_case("A", "a@b.com", "", "R" ; "missing company")]
    #[test_case("A", "a@b.com", "C", "" ; "missing role")]
    #[test_case("  ", "a@b.com", "C", "R" ; "whitespace name")]
    #[test_case("A", "a@b.com", "C", "\t\n" ; "whitespace role")]
    fn test_blank_field_rejected(name: &str, email: &str, company: &str, role: &str) {
        let err = request(name, email, company, role).validate().unwrap_err();
        assert!(err.is_validation_error());
        assert_eq!(err.to_string(), format!("Validation error: {}", ALL_FIELDS_REQUIRED));
    }

    #[test]
    fn test_no_email_format_check() {
        assert!(request("A", "not-an-email", "C", "R").validate().is_ok());
    }

    #[test]
    fn test_values_kept_untrimmed() {
        let candidate = request(" Asha ", "asha@x.com", "Acme", "Engineer")
            .validate()
            .unwrap();
        assert_eq!(candidate.name(), " Asha ");
    }

    #[test]
    fn test_missing_json_fields_decode_as_empty() {
        let req: RegistrationRequest = serde_json::from_str(r#"{"name":"Asha"}"#).unwrap();
        assert_eq!(req.email, "");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_from_json_reads_first_value_only() {
        let body = br#"{"name":"Asha","email":"asha@x.com","company":"Acme","role":"Engineer"} trailing"#;
        let req = RegistrationRequest::from_json(body).unwrap();
        assert_eq!(req.name, "Asha");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_from_json_null_fails_validation() {
        let err = RegistrationRequest::from_json(b"null").unwrap().validate().unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test_case(b"{not json" ; "malformed")]
    #[test_case(b"" ; "empty body")]
    #[test_case(b"[1, 2]" ; "wrong shape")]
    fn test_from_json_malformed(body: &[u8]) {
        let err = RegistrationRequest::from_json(body).unwrap_err();
        assert!(matches!(err, MeetupError::JsonError(_)));
    }

    #[test]
    fn test_registration_json_shape() {
        let created_at = DateTime::parse_from_rfc3339("2025-03-01T10:15:30Z")
            .unwrap()
            .with_timezone(&Utc);
        let candidate = request("Ravi", "ravi@x.com", "Beta", "PM").validate().unwrap();
        let reg = Registration::from_candidate("7", candidate, created_at);

        let value = serde_json::to_value(&reg).unwrap();
        assert_eq!(value["id"], "7");
        assert_eq!(value["company"], "Beta");
        assert_eq!(value["createdAt"], "2025-03-01T10:15:30Z");
        assert!(value.get("created_at").is_none());

        let back: Registration = serde_json::from_value(value).unwrap();
        assert_eq!(back, reg);
    }

    proptest! {
        #[test]
        fn prop_non_blank_fields_always_validate(
            name in "[a-zA-Z]{1,16}",
            email in "[a-z]{1,8}@[a-z]{1,8}\\.com",
            company in "[a-zA-Z ]{0,8}[a-zA-Z]",
            role in "[a-zA-Z]{1,12}",
        ) {
            prop_assert!(request(&name, &email, &company, &role).validate().is_ok());
        }

        #[test]
        fn prop_any_blank_field_fails(
            which in 0usize..4,
            blank in "[ \t\n]{0,4}",
        ) {
            let mut fields = ["A".to_string(), "a@b.com".to_string(), "C".to_string(), "R".to_string()];
            fields[which] = blank;
            let result = request(&fields[0], &fields[1], &fields[2], &fields[3]).validate();
            prop_assert!(matches!(result, Err(MeetupError::ValidationError(_))));
        }
    }
}
