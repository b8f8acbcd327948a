use crate::error::IdentityNumberError;
use crate::observability::labels::Labels;
use metrics::{counter, Counter};

const REASON: &str = "reason";
const DOCUMENT_TYPE: &str = "document_type";

/// Metric handles for one caller's labels. Registered on creation so a
/// recorder installed by the host (or a test) picks them up.
pub struct Stats {
    labels: Labels,

    // Every call to the validator, valid or not
    pub validations: Counter,
}

impl Stats {
    pub fn new(labels: &Labels) -> Self {
        Self {
            labels: labels.clone(),
            validations: counter!("identity_number.validations", labels.clone()),
        }
    }

    pub fn record_rejection(&self, error: &IdentityNumberError) {
        counter!(
            "identity_number.rejections",
            self.labels.clone_with_labels(&[(REASON, error.reason())])
        )
        .increment(1);
    }

    pub fn record_document_type_change(&self, document_type: &'static str) {
        let labels = [(DOCUMENT_TYPE, document_type)];
        counter!(
            "consent_gate.document_type_changes",
            self.labels.clone_with_labels(&labels)
        )
        .increment(1);
    }

    pub fn record_consent_given(&self, document_type: &'static str) {
        let labels = [(DOCUMENT_TYPE, document_type)];
        counter!(
            "consent_gate.consents_given",
            self.labels.clone_with_labels(&labels)
        )
        .increment(1);
    }
}

#[cfg(test)]
mod test {
    use crate::{
        validate_identity_number_with, DocumentType, Labels, RegistrationForm, ValidatorConfig,
    };
    use chrono::NaiveDate;
    use metrics::{Key, Label};
    use metrics_util::debugging::DebugValue;
    use metrics_util::debugging::DebuggingRecorder;
    use metrics_util::CompositeKey;
    use metrics_util::MetricKind::Counter;

    fn config() -> ValidatorConfig {
        ValidatorConfig::new()
            .reference_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .labels(Labels::new(&[("surface", "registration")]))
    }

    #[test]
    fn should_submit_validation_metrics() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            let config = config();
            validate_identity_number_with("6805315146080", &config);
            validate_identity_number_with("6805315146081", &config);
            validate_identity_number_with("6805315146082", &config);
            validate_identity_number_with("68053", &config);
        });

        let snapshot = snapshotter.snapshot().into_hashmap();

        let surface = Label::new("surface", "registration");
        let metric_value = snapshot
            .get(&CompositeKey::new(
                Counter,
                Key::from_parts("identity_number.validations", vec![surface.clone()]),
            ))
            .expect("metric not found");
        assert_eq!(metric_value, &(None, None, DebugValue::Counter(4)));

        let metric_value = snapshot
            .get(&CompositeKey::new(
                Counter,
                Key::from_parts(
                    "identity_number.rejections",
                    vec![Label::new("reason", "checksum_mismatch"), surface.clone()],
                ),
            ))
            .expect("metric not found");
        assert_eq!(metric_value, &(None, None, DebugValue::Counter(2)));

        let metric_value = snapshot
            .get(&CompositeKey::new(
                Counter,
                Key::from_parts(
                    "identity_number.rejections",
                    vec![Label::new("reason", "wrong_length"), surface],
                ),
            ))
            .expect("metric not found");
        assert_eq!(metric_value, &(None, None, DebugValue::Counter(1)));
    }

    #[test]
    fn should_submit_consent_gate_metrics() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            let mut form = RegistrationForm::with_config(DocumentType::Other, config());
            form.select_document_type(DocumentType::NationalId);
            form.enter_document_number("6805315146080");
            form.set_consent(true).unwrap();
            // Ticking an already ticked box is not a new consent
            form.set_consent(true).unwrap();
        });

        let snapshot = snapshotter.snapshot().into_hashmap();
        let labels = vec![
            Label::new("document_type", "national_id"),
            Label::new("surface", "registration"),
        ];

        let metric_value = snapshot
            .get(&CompositeKey::new(
                Counter,
                Key::from_parts("consent_gate.document_type_changes", labels.clone()),
            ))
            .expect("metric not found");
        assert_eq!(metric_value, &(None, None, DebugValue::Counter(1)));

        let metric_value = snapshot
            .get(&CompositeKey::new(
                Counter,
                Key::from_parts("consent_gate.consents_given", labels),
            ))
            .expect("metric not found");
        assert_eq!(metric_value, &(None, None, DebugValue::Counter(1)));
    }
}
