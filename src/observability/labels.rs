use metrics::{IntoLabels, Label, SharedString};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tags attached to every metric emitted on behalf of a caller, e.g.
/// `("surface", "registration")`. Serialized as a flat JSON object.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Labels(BTreeMap<String, String>);

pub const NO_LABEL: Labels = Labels(BTreeMap::new());

impl Labels {
    pub fn new(labels: &[(impl ToString, impl ToString)]) -> Self {
        Labels(
            labels
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    pub fn empty() -> Self {
        NO_LABEL
    }

    /// Clone the actual [Labels] with additional key-value labels. Keys that
    /// already exist are overwritten.
    pub fn clone_with_labels(
        &self,
        additional_labels: &[(impl ToString, impl ToString)],
    ) -> Labels {
        let mut tags = self.0.clone();
        tags.extend(
            additional_labels
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        );
        Labels(tags)
    }
}

impl IntoLabels for Labels {
    fn into_labels(self) -> Vec<Label> {
        self.0
            .into_iter()
            .map(|(key, value)| Label::new(SharedString::from(key), SharedString::from(value)))
            .collect()
    }
}
