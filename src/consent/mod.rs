//! The registration-form rule that keeps the legal consent checkbox disabled
//! until the member's identity details are complete.
//!
//! With a national ID number the date of birth and gender are derived from
//! the number and locked once it validates. With any other document they are
//! entered by hand. Consent is only enabled when the chosen document type's
//! requirements are met, and is unchecked whenever they stop being met.

use crate::config::ValidatorConfig;
use crate::error::ConsentGateError;
use crate::identity_number::result::ValidationResult;
use crate::identity_number::{validate_identity_number_with, Citizenship, Gender, IdentityNumber};
use crate::stats::Stats;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

const DATE_OF_BIRTH: &str = "date_of_birth";
const GENDER: &str = "gender";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DocumentType {
    NationalId,
    Passport,
    Other,
}

/// What the persistence layer receives once consent has been given.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ConsentedIdentity {
    pub document_type: DocumentType,
    pub document_number: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    /// Only present for [`DocumentType::NationalId`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_number: Option<IdentityNumber>,
}

impl ConsentedIdentity {
    pub fn citizenship(&self) -> Option<Citizenship> {
        self.identity_number
            .as_ref()
            .map(IdentityNumber::citizenship)
    }
}

/// In-memory state of a single registration form.
#[derive(Clone, Debug)]
pub struct RegistrationForm {
    config: ValidatorConfig,
    document_type: DocumentType,
    document_number: String,
    validation: Option<ValidationResult>,
    identity_number: Option<IdentityNumber>,
    date_of_birth: Option<NaiveDate>,
    gender: Option<Gender>,
    // Set while date of birth and gender come from a valid national ID number
    derived_fields_locked: bool,
    consent: bool,
}

impl RegistrationForm {
    pub fn new(document_type: DocumentType) -> Self {
        Self::with_config(document_type, ValidatorConfig::default())
    }

    pub fn with_config(document_type: DocumentType, config: ValidatorConfig) -> Self {
        RegistrationForm {
            config,
            document_type,
            document_number: String::new(),
            validation: None,
            identity_number: None,
            date_of_birth: None,
            gender: None,
            derived_fields_locked: false,
            consent: false,
        }
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn document_number(&self) -> &str {
        &self.document_number
    }

    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn citizenship(&self) -> Option<Citizenship> {
        self.identity_number
            .as_ref()
            .map(IdentityNumber::citizenship)
    }

    pub fn is_consent_checked(&self) -> bool {
        self.consent
    }

    pub fn are_derived_fields_locked(&self) -> bool {
        self.derived_fields_locked
    }

    /// The outcome of the last national ID number entered, if any.
    pub fn last_validation(&self) -> Option<&ValidationResult> {
        self.validation.as_ref()
    }

    /// Switches the document type. Everything entered so far is cleared and
    /// consent is withdrawn, even when the type does not actually change.
    pub fn select_document_type(&mut self, document_type: DocumentType) {
        self.document_type = document_type;
        self.document_number.clear();
        self.validation = None;
        self.identity_number = None;
        self.date_of_birth = None;
        self.gender = None;
        self.derived_fields_locked = false;
        self.consent = false;

        Stats::new(&self.config.labels).record_document_type_change(document_type.into());
        tracing::trace!(
            document_type = <&'static str>::from(document_type),
            "document type selected, identity details cleared"
        );
    }

    /// Records the document number as typed. For national ID numbers the input
    /// is validated and, when valid, date of birth and gender are filled in and
    /// locked. Other document numbers are stored as-is and `None` is returned.
    pub fn enter_document_number(&mut self, text: &str) -> Option<&ValidationResult> {
        self.document_number = text.to_owned();

        if self.document_type != DocumentType::NationalId {
            self.refresh_consent();
            return None;
        }

        let result = validate_identity_number_with(text, &self.config);
        match result.details() {
            Some(details) => {
                self.identity_number = Some(IdentityNumber::from_validated(text, details));
                self.date_of_birth = Some(details.date_of_birth);
                self.gender = Some(details.gender);
                self.derived_fields_locked = true;
            }
            None => {
                self.identity_number = None;
                if self.derived_fields_locked {
                    self.date_of_birth = None;
                    self.gender = None;
                    self.derived_fields_locked = false;
                }
            }
        }
        self.validation = Some(result);
        self.refresh_consent();
        self.validation.as_ref()
    }

    pub fn enter_date_of_birth(
        &mut self,
        date_of_birth: Option<NaiveDate>,
    ) -> Result<(), ConsentGateError> {
        if self.derived_fields_locked {
            return Err(ConsentGateError::FieldLocked {
                field: DATE_OF_BIRTH,
            });
        }
        self.date_of_birth = date_of_birth;
        self.refresh_consent();
        Ok(())
    }

    pub fn enter_gender(&mut self, gender: Option<Gender>) -> Result<(), ConsentGateError> {
        if self.derived_fields_locked {
            return Err(ConsentGateError::FieldLocked { field: GENDER });
        }
        self.gender = gender;
        self.refresh_consent();
        Ok(())
    }

    pub fn is_consent_enabled(&self) -> bool {
        match self.document_type {
            DocumentType::NationalId => self
                .validation
                .as_ref()
                .is_some_and(ValidationResult::is_valid),
            DocumentType::Passport | DocumentType::Other => {
                self.date_of_birth.is_some() && self.gender.is_some()
            }
        }
    }

    pub fn set_consent(&mut self, consent: bool) -> Result<(), ConsentGateError> {
        if consent && !self.is_consent_enabled() {
            return Err(ConsentGateError::ConsentDisabled);
        }
        if consent && !self.consent {
            Stats::new(&self.config.labels).record_consent_given(self.document_type.into());
        }
        self.consent = consent;
        Ok(())
    }

    /// Hands the collected identity over once consent has been given.
    pub fn complete(&self) -> Result<ConsentedIdentity, ConsentGateError> {
        if !self.consent {
            return Err(ConsentGateError::ConsentNotGiven);
        }
        if self.document_number.trim().is_empty() {
            return Err(ConsentGateError::MissingDocumentNumber);
        }
        let (Some(date_of_birth), Some(gender)) = (self.date_of_birth, self.gender) else {
            return Err(ConsentGateError::ConsentDisabled);
        };
        if self.document_type == DocumentType::NationalId && self.identity_number.is_none() {
            return Err(ConsentGateError::ConsentDisabled);
        }

        Ok(ConsentedIdentity {
            document_type: self.document_type,
            document_number: self.document_number.clone(),
            date_of_birth,
            gender,
            identity_number: self.identity_number.clone(),
        })
    }

    fn refresh_consent(&mut self) {
        if self.consent && !self.is_consent_enabled() {
            self.consent = false;
            tracing::trace!("consent withdrawn, identity details no longer complete");
        }
    }
}
