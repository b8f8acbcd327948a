//! South African identity numbers.
//!
//! Layout of the 13 digits:
//!
//! | digits | meaning                                                   |
//! |--------|-----------------------------------------------------------|
//! | 0-1    | year of birth, century inferred from the reference date   |
//! | 2-3    | month of birth                                            |
//! | 4-5    | day of birth                                              |
//! | 6-9    | sequence number, 5000 and above for males                 |
//! | 10     | 0 for citizens, 1 for permanent residents                 |
//! | 11     | unused                                                    |
//! | 12     | check digit, see [`checksum::luhn_check_digit`]           |

pub mod checksum;
mod date;
pub mod result;

use crate::config::ValidatorConfig;
use crate::error::IdentityNumberError;
use crate::identity_number::checksum::luhn_check_digit;
use crate::identity_number::result::ValidationResult;
use crate::stats::Stats;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const IDENTITY_NUMBER_LENGTH: usize = 13;

/// Sequence numbers at or above this value belong to males.
pub const MALE_SEQUENCE_THRESHOLD: u32 = 5000;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    fn from_sequence(sequence: u32) -> Self {
        if sequence >= MALE_SEQUENCE_THRESHOLD {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Citizenship {
    Citizen,
    PermanentResident,
}

impl Citizenship {
    fn from_digit(digit: u32) -> Result<Self, IdentityNumberError> {
        match digit {
            0 => Ok(Citizenship::Citizen),
            1 => Ok(Citizenship::PermanentResident),
            digit => Err(IdentityNumberError::InvalidCitizenship { digit }),
        }
    }
}

/// Everything an identity number encodes about its holder.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdentityDetails {
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub citizenship: Citizenship,
}

impl IdentityDetails {
    /// Completed years of age on `date`, or `None` if `date` is before birth.
    pub fn age_on(&self, date: NaiveDate) -> Option<u32> {
        let mut age = date.year() - self.date_of_birth.year();
        let birthday = (self.date_of_birth.month(), self.date_of_birth.day());
        if (date.month(), date.day()) < birthday {
            age -= 1;
        }
        u32::try_from(age).ok()
    }
}

/// A 13-digit identity number that passed every validation rule.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct IdentityNumber {
    digits: String,
    date_of_birth: NaiveDate,
    gender: Gender,
    citizenship: Citizenship,
}

impl IdentityNumber {
    pub fn parse(candidate: &str) -> Result<Self, IdentityNumberError> {
        Self::parse_with(candidate, &ValidatorConfig::default())
    }

    pub fn parse_with(
        candidate: &str,
        config: &ValidatorConfig,
    ) -> Result<Self, IdentityNumberError> {
        let details = parse_details(candidate, config.resolve_reference_date())?;
        Ok(Self::from_validated(candidate, details))
    }

    /// `details` must be the result of validating `digits`.
    pub(crate) fn from_validated(digits: &str, details: IdentityDetails) -> Self {
        IdentityNumber {
            digits: digits.to_owned(),
            date_of_birth: details.date_of_birth,
            gender: details.gender,
            citizenship: details.citizenship,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    pub fn details(&self) -> IdentityDetails {
        IdentityDetails {
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            citizenship: self.citizenship,
        }
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn citizenship(&self) -> Citizenship {
        self.citizenship
    }
}

impl FromStr for IdentityNumber {
    type Err = IdentityNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdentityNumber::parse(s)
    }
}

impl TryFrom<String> for IdentityNumber {
    type Error = IdentityNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        IdentityNumber::parse(&value)
    }
}

impl From<IdentityNumber> for String {
    fn from(value: IdentityNumber) -> Self {
        value.digits
    }
}

impl fmt::Display for IdentityNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

/// Validates `candidate`, inferring the century from today's date.
///
/// Rejections are returned as an invalid [`ValidationResult`], never as a
/// panic or `Err`: a half-typed number is the common case, not an exceptional one.
pub fn validate_identity_number(candidate: &str) -> ValidationResult {
    validate_identity_number_with(candidate, &ValidatorConfig::default())
}

pub fn validate_identity_number_with(
    candidate: &str,
    config: &ValidatorConfig,
) -> ValidationResult {
    let result = parse_details(candidate, config.resolve_reference_date());

    let stats = Stats::new(&config.labels);
    stats.validations.increment(1);
    if let Err(err) = &result {
        stats.record_rejection(err);
        tracing::debug!(reason = err.reason(), "identity number rejected");
    }

    result.into()
}

fn parse_details(
    candidate: &str,
    reference: NaiveDate,
) -> Result<IdentityDetails, IdentityNumberError> {
    if candidate.trim().is_empty() {
        return Err(IdentityNumberError::EmptyInput);
    }
    if !candidate.chars().all(|c| c.is_ascii_digit()) {
        return Err(IdentityNumberError::NonDigitCharacters);
    }
    if candidate.len() != IDENTITY_NUMBER_LENGTH {
        return Err(IdentityNumberError::WrongLength {
            length: candidate.len(),
        });
    }

    // All ASCII digits from here on
    let digits: Vec<u32> = candidate.bytes().map(|b| (b - b'0') as u32).collect();
    let number = |range: std::ops::Range<usize>| {
        digits[range]
            .iter()
            .fold(0u32, |acc, digit| acc * 10 + digit)
    };

    let date_of_birth =
        date::resolve_date_of_birth(number(0..2), number(2..4), number(4..6), reference)?;
    let gender = Gender::from_sequence(number(6..10));
    let citizenship = Citizenship::from_digit(digits[10])?;

    let expected = luhn_check_digit(&digits[..IDENTITY_NUMBER_LENGTH - 1]);
    let actual = digits[IDENTITY_NUMBER_LENGTH - 1];
    if expected != actual {
        return Err(IdentityNumberError::ChecksumMismatch { expected, actual });
    }

    Ok(IdentityDetails {
        date_of_birth,
        gender,
        citizenship,
    })
}
