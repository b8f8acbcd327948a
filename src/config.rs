use crate::observability::labels::Labels;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

#[serde_as]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct ValidatorConfig {
    // Override the date used to infer the century of the birth year. Used for
    // tests and when re-validating records captured in the past.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,

    // Attached to every metric emitted while validating with this config
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub labels: Labels,
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reference_date(&self, reference_date: NaiveDate) -> Self {
        self.mutate_clone(|x| x.reference_date = Some(reference_date))
    }

    pub fn labels(&self, labels: Labels) -> Self {
        self.mutate_clone(|x| x.labels = labels)
    }

    /// The day the century inference is anchored to.
    pub fn resolve_reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    fn mutate_clone(&self, modify: impl FnOnce(&mut Self)) -> Self {
        let mut clone = self.clone();
        modify(&mut clone);
        clone
    }
}
