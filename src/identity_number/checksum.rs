use crate::identity_number::IDENTITY_NUMBER_LENGTH;
use std::str::Chars;

pub trait Validator: Send + Sync {
    fn is_valid_match(&self, regex_match: &str) -> bool;
}

/// Checks only the trailing check digit of an identity number, skipping any
/// non-digit characters (e.g. `680531 5146 08 0`). Use [`crate::IdentityNumber`]
/// when the date, gender and citizenship fields matter too.
pub struct IdentityNumberChecksum;

fn get_previous_digit(chars: &mut Chars<'_>) -> Option<u32> {
    while let Some(char) = chars.next_back() {
        if let Some(digit) = char.to_digit(10) {
            return Some(digit);
        }
    }
    None
}

/// Sum all the digits from a number
#[inline]
fn sum_all_digits(digits: u32) -> u32 {
    let mut sum = 0;
    let mut num = digits;
    while num > 0 {
        sum += num % 10;
        num /= 10;
    }
    sum
}

/// Computes the check digit for the first 12 digits of an identity number.
///
/// Digits at even (0-based) positions are summed as-is. Digits at odd positions
/// are doubled and their digit sums added. Doubling each of those digits
/// separately gives the same total as doubling them concatenated into a single
/// number: each digit >= 5 produces one carry, and each carry adds exactly one
/// to the digit sum of the doubled number.
pub fn luhn_check_digit(payload: &[u32]) -> u32 {
    let sum: u32 = payload
        .iter()
        .enumerate()
        .map(|(index, digit)| {
            if index % 2 == 1 {
                sum_all_digits(digit * 2)
            } else {
                *digit
            }
        })
        .sum();
    (10 - (sum % 10)) % 10
}

impl Validator for IdentityNumberChecksum {
    fn is_valid_match(&self, regex_match: &str) -> bool {
        let mut input_iter = regex_match.chars();

        if let Some(checksum) = get_previous_digit(&mut input_iter) {
            let mut payload = Vec::with_capacity(IDENTITY_NUMBER_LENGTH - 1);
            while let Some(digit) = get_previous_digit(&mut input_iter) {
                payload.push(digit);
            }
            if payload.len() != IDENTITY_NUMBER_LENGTH - 1 {
                return false;
            }
            payload.reverse();
            return luhn_check_digit(&payload) == checksum;
        }
        false
    }
}
