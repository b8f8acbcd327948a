use afl::fuzz;
use chrono::{Days, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};
use safa_identity::{
    validate_identity_number_with, DocumentType, IdentityNumber, RegistrationForm, ValidatorConfig,
    IDENTITY_NUMBER_LENGTH,
};

#[cfg(not(feature = "manual_test"))]
fn main() {
    fuzz!(|data: &[u8]| {
        run_raw_fuzz(data);
    });
}

#[cfg(feature = "manual_test")]
fn main() {
    use std::io::{stdin, Read};

    let mut input = vec![];
    stdin().read_to_end(&mut input).unwrap();
    run_raw_fuzz(&input);
}

fn split_bytes_once(input: &[u8]) -> Option<(&[u8], &[u8])> {
    let i = input.iter().position(|b| *b == b',')?;
    Some((&input[0..i], &input[i + 1..]))
}

fn run_raw_fuzz(bytes: &[u8]) -> Option<()> {
    let (input, rand_seed) = split_bytes_once(bytes)?;
    let input_str = std::str::from_utf8(input).ok()?;

    let mut rng_seed: u64 = 0;
    for byte in rand_seed.iter().take(8) {
        rng_seed <<= 8;
        rng_seed += *byte as u64;
    }

    let rng = StdRng::seed_from_u64(rng_seed);
    run_fuzz(input_str, rng);

    Some(())
}

fn run_fuzz(input: &str, mut rng: StdRng) {
    let base = NaiveDate::from_ymd_opt(1950, 1, 1).unwrap();
    let reference = base
        .checked_add_days(Days::new(rng.gen_range(0..60_000)))
        .unwrap();
    let config = ValidatorConfig::new().reference_date(reference);

    let result = validate_identity_number_with(input, &config);
    assert_eq!(result, validate_identity_number_with(input, &config));

    if result.is_valid() {
        assert_eq!(input.len(), IDENTITY_NUMBER_LENGTH);
        assert!(result.error().is_none());
        let details = result.details().expect("valid result without details");
        let parsed = IdentityNumber::parse_with(input, &config).unwrap();
        assert_eq!(parsed.details(), details);
    } else {
        assert!(result.error_message().is_some());
        assert!(result.date_of_birth().is_none());
        assert!(result.gender().is_none());
        assert!(result.citizenship().is_none());
    }

    let mut form = RegistrationForm::with_config(DocumentType::NationalId, config);
    form.enter_document_number(input);
    assert_eq!(form.is_consent_enabled(), result.is_valid());
    if rng.gen_bool(0.5) {
        form.select_document_type(DocumentType::Other);
        assert!(!form.is_consent_enabled());
        assert!(form.date_of_birth().is_none());
    }
}
