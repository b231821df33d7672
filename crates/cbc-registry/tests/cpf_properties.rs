//! Property tests for the CPF formatter and validator.

use cbc_registry::{format_cpf, is_valid, normalize, Cpf, CpfError, CPF_LEN};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Eleven digits, not all identical.
fn arb_valid_digits() -> impl Strategy<Value = String> {
    "[0-9]{11}".prop_filter("all digits identical", |s| {
        let first = s.as_bytes()[0];
        !s.bytes().all(|b| b == first)
    })
}

fn is_mask_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 14
        && b.iter().enumerate().all(|(i, c)| match i {
            3 | 7 => *c == b'.',
            11 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}

proptest! {
    #[test]
    fn formatter_never_exceeds_eleven_digits(input in ".{0,40}") {
        let out = format_cpf(&input);
        prop_assert!(out.chars().filter(|c| c.is_ascii_digit()).count() <= CPF_LEN);
    }

    #[test]
    fn formatter_masks_once_eleven_digits_present(input in "[0-9a-z .-]{0,30}") {
        let out = format_cpf(&input);
        if normalize(&input).len() >= CPF_LEN {
            prop_assert!(is_mask_shape(&out), "unexpected shape: {out}");
        } else {
            prop_assert!(out.len() < 14);
        }
    }

    #[test]
    fn formatter_is_idempotent(input in ".{0,40}") {
        let once = format_cpf(&input);
        prop_assert_eq!(format_cpf(&once), once);
    }

    #[test]
    fn validator_rejects_wrong_digit_counts(digits in "[0-9]{0,20}") {
        prop_assume!(digits.len() != CPF_LEN);
        prop_assert!(!is_valid(&digits));
        prop_assert_eq!(
            Cpf::parse(&digits),
            Err(CpfError::WrongLength { found: digits.len() })
        );
    }

    #[test]
    fn validator_accepts_masked_valid_digits(digits in arb_valid_digits()) {
        let masked = format_cpf(&digits);
        let cpf = Cpf::parse(&masked).unwrap();
        prop_assert_eq!(cpf.as_str(), digits.as_str());
        prop_assert_eq!(cpf.formatted(), masked);
    }
}
