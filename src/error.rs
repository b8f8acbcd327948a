use strum::IntoStaticStr;
use thiserror::Error;

/// Why a candidate identity number was rejected. Variants are ordered the way
/// the validator checks them: the first failing rule is the one reported.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum IdentityNumberError {
    #[error("ID number is required")]
    EmptyInput,

    #[error("ID number may only contain the digits 0-9")]
    NonDigitCharacters,

    #[error("ID number must be exactly 13 digits long, got {length}")]
    WrongLength { length: usize },

    #[error("ID number contains an invalid month of birth ({month:02})")]
    InvalidMonth { month: u32 },

    #[error("ID number contains an invalid day of birth ({day:02}) for {year}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },

    #[error("ID number has an invalid citizenship digit ({digit}), expected 0 or 1")]
    InvalidCitizenship { digit: u32 },

    #[error("ID number has an invalid checksum digit ({actual}), expected {expected}")]
    ChecksumMismatch { expected: u32, actual: u32 },
}

impl IdentityNumberError {
    /// Stable, machine-readable name of the failed rule.
    pub fn reason(&self) -> &'static str {
        self.into()
    }
}

impl From<IdentityNumberError> for i64 {
    fn from(value: IdentityNumberError) -> i64 {
        match value {
            IdentityNumberError::EmptyInput => -1,
            IdentityNumberError::NonDigitCharacters => -2,
            IdentityNumberError::WrongLength { .. } => -3,
            IdentityNumberError::InvalidMonth { .. } => -4,
            IdentityNumberError::InvalidDay { .. } => -5,
            IdentityNumberError::InvalidCitizenship { .. } => -6,
            IdentityNumberError::ChecksumMismatch { .. } => -7,
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConsentGateError {
    /// Consent was ticked before the identity information was complete
    #[error("consent cannot be given until the identity details are complete and valid")]
    ConsentDisabled,

    /// A derived field was edited while a valid national ID number controls it
    #[error("{field} is derived from the ID number and cannot be edited")]
    FieldLocked { field: &'static str },

    #[error("consent has not been given")]
    ConsentNotGiven,

    #[error("a document number is required")]
    MissingDocumentNumber,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reasons_are_snake_case() {
        assert_eq!(IdentityNumberError::EmptyInput.reason(), "empty_input");
        assert_eq!(
            IdentityNumberError::WrongLength { length: 12 }.reason(),
            "wrong_length"
        );
        assert_eq!(
            IdentityNumberError::ChecksumMismatch {
                expected: 0,
                actual: 1
            }
            .reason(),
            "checksum_mismatch"
        );
    }

    #[test]
    fn messages_name_the_failed_rule() {
        assert_eq!(
            IdentityNumberError::InvalidMonth { month: 13 }.to_string(),
            "ID number contains an invalid month of birth (13)"
        );
        assert_eq!(
            IdentityNumberError::InvalidDay {
                year: 1967,
                month: 2,
                day: 29
            }
            .to_string(),
            "ID number contains an invalid day of birth (29) for 1967-02"
        );
        assert_eq!(
            ConsentGateError::FieldLocked {
                field: "date_of_birth"
            }
            .to_string(),
            "date_of_birth is derived from the ID number and cannot be edited"
        );
    }

    #[test]
    fn error_codes_are_distinct() {
        let codes: Vec<i64> = vec![
            IdentityNumberError::EmptyInput.into(),
            IdentityNumberError::NonDigitCharacters.into(),
            IdentityNumberError::WrongLength { length: 0 }.into(),
            IdentityNumberError::InvalidMonth { month: 0 }.into(),
            IdentityNumberError::InvalidDay {
                year: 0,
                month: 0,
                day: 0,
            }
            .into(),
            IdentityNumberError::InvalidCitizenship { digit: 2 }.into(),
            IdentityNumberError::ChecksumMismatch {
                expected: 0,
                actual: 0,
            }
            .into(),
        ];
        let unique: std::collections::BTreeSet<i64> = codes.iter().copied().collect();
        assert_eq!(codes.len(), unique.len());
        assert!(codes.iter().all(|code| *code < 0));
    }
}
