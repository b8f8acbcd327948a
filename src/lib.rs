// This blocks accidental use of `println`. If one is actually needed, you can
// override with `#[allow(clippy::print_stdout)]`.
#![deny(clippy::print_stdout)]

mod config;
mod consent;
mod error;
mod identity_number;
mod observability;
mod stats;

// This is the public API of the identity library
pub use config::ValidatorConfig;
pub use consent::{ConsentedIdentity, DocumentType, RegistrationForm};
pub use error::{ConsentGateError, IdentityNumberError};
pub use identity_number::checksum::{luhn_check_digit, IdentityNumberChecksum, Validator};
pub use identity_number::result::ValidationResult;
pub use identity_number::{
    validate_identity_number, validate_identity_number_with, Citizenship, Gender,
    IdentityDetails, IdentityNumber, IDENTITY_NUMBER_LENGTH, MALE_SEQUENCE_THRESHOLD,
};
pub use observability::labels::Labels;
