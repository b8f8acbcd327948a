use crate::error::IdentityNumberError;
use crate::identity_number::{Citizenship, Gender, IdentityDetails};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Outcome of a single validation call. Either every derived field is present
/// and `error` is absent, or the reverse; the constructors are the only way in.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ValidationResult {
    is_valid: bool,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_reason"
    )]
    error: Option<IdentityNumberError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    citizenship: Option<Citizenship>,
}

fn serialize_reason<S: Serializer>(
    error: &Option<IdentityNumberError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(error) => serializer.serialize_some(error.reason()),
        None => serializer.serialize_none(),
    }
}

impl ValidationResult {
    pub fn valid(details: IdentityDetails) -> Self {
        Self {
            is_valid: true,
            error: None,
            error_message: None,
            date_of_birth: Some(details.date_of_birth),
            gender: Some(details.gender),
            citizenship: Some(details.citizenship),
        }
    }

    pub fn invalid(error: IdentityNumberError) -> Self {
        Self {
            is_valid: false,
            error: Some(error),
            error_message: Some(error.to_string()),
            date_of_birth: None,
            gender: None,
            citizenship: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn error(&self) -> Option<IdentityNumberError> {
        self.error
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn citizenship(&self) -> Option<Citizenship> {
        self.citizenship
    }

    pub fn details(&self) -> Option<IdentityDetails> {
        match (self.date_of_birth, self.gender, self.citizenship) {
            (Some(date_of_birth), Some(gender), Some(citizenship)) => Some(IdentityDetails {
                date_of_birth,
                gender,
                citizenship,
            }),
            _ => None,
        }
    }
}

impl From<Result<IdentityDetails, IdentityNumberError>> for ValidationResult {
    fn from(result: Result<IdentityDetails, IdentityNumberError>) -> Self {
        match result {
            Ok(details) => ValidationResult::valid(details),
            Err(err) => ValidationResult::invalid(err),
        }
    }
}

impl From<ValidationResult> for Result<IdentityDetails, IdentityNumberError> {
    fn from(result: ValidationResult) -> Self {
        match (result.error, result.details()) {
            (Some(err), _) => Err(err),
            (None, Some(details)) => Ok(details),
            // Unreachable through the constructors
            (None, None) => Err(IdentityNumberError::EmptyInput),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn details() -> IdentityDetails {
        IdentityDetails {
            date_of_birth: NaiveDate::from_ymd_opt(1968, 5, 31).unwrap(),
            gender: Gender::Male,
            citizenship: Citizenship::Citizen,
        }
    }

    #[test]
    fn valid_result_has_every_derived_field() {
        let result = ValidationResult::valid(details());
        assert!(result.is_valid());
        assert_eq!(result.error(), None);
        assert_eq!(result.error_message(), None);
        assert_eq!(result.details(), Some(details()));
    }

    #[test]
    fn invalid_result_has_no_derived_field() {
        let result = ValidationResult::invalid(IdentityNumberError::NonDigitCharacters);
        assert!(!result.is_valid());
        assert_eq!(
            result.error(),
            Some(IdentityNumberError::NonDigitCharacters)
        );
        assert_eq!(
            result.error_message(),
            Some("ID number may only contain the digits 0-9")
        );
        assert_eq!(result.date_of_birth(), None);
        assert_eq!(result.gender(), None);
        assert_eq!(result.citizenship(), None);
    }

    #[test]
    fn serializes_without_absent_fields() {
        let json = serde_json::to_value(ValidationResult::valid(details())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "is_valid": true,
                "date_of_birth": "1968-05-31",
                "gender": "M",
                "citizenship": "CITIZEN",
            })
        );

        let json =
            serde_json::to_value(ValidationResult::invalid(IdentityNumberError::InvalidMonth {
                month: 13,
            }))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "is_valid": false,
                "error": "invalid_month",
                "error_message": "ID number contains an invalid month of birth (13)",
            })
        );
    }

    #[test]
    fn converts_back_into_result() {
        let result: Result<IdentityDetails, IdentityNumberError> =
            ValidationResult::valid(details()).into();
        assert_eq!(result, Ok(details()));

        let result: Result<IdentityDetails, IdentityNumberError> =
            ValidationResult::invalid(IdentityNumberError::EmptyInput).into();
        assert_eq!(result, Err(IdentityNumberError::EmptyInput));
    }
}
