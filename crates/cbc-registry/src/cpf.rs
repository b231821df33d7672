//! CPF normalization, formatting and validation.
//!
//! Three entry points cover the input lifecycle:
//! - [`format_cpf`]: display mask applied on every edit (total, never fails)
//! - [`normalize`]: digits-only form handed to the validator
//! - [`Cpf::parse`]: the validator; the only way to obtain a [`Cpf`]
//!
//! Validation rejects wrong digit counts and all-identical sequences. The
//! modulo-11 check digits are not verified.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::CpfError;

/// Number of digits in a CPF.
pub const CPF_LEN: usize = 11;

/// Strip every non-digit character.
pub fn normalize(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Apply the `000.000.000-00` mask to the first 11 digits of `input`.
///
/// Partial input is masked progressively (`"1234"` becomes `"123.4"`);
/// separators are only emitted when a digit follows them.
pub fn format_cpf(input: &str) -> String {
    let mut out = String::with_capacity(CPF_LEN + 3);
    for (i, d) in input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(CPF_LEN)
        .enumerate()
    {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(d);
    }
    out
}

/// Boolean form of the validator.
pub fn is_valid(input: &str) -> bool {
    Cpf::parse(input).is_ok()
}

/// A validated CPF: exactly 11 ASCII digits, not all identical.
///
/// The inner field is private so a `Cpf` can only come out of
/// [`Cpf::parse`] (or deserialization, which goes through it).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
    /// Validate raw or formatted input.
    pub fn parse(input: &str) -> Result<Self, CpfError> {
        let digits = normalize(input);
        if digits.len() != CPF_LEN {
            return Err(CpfError::WrongLength {
                found: digits.len(),
            });
        }
        let first = digits.as_bytes()[0];
        if digits.bytes().all(|b| b == first) {
            return Err(CpfError::RepeatedDigits);
        }
        Ok(Cpf(digits))
    }

    /// Digits-only form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Punctuated form (`000.000.000-00`).
    pub fn formatted(&self) -> String {
        format_cpf(&self.0)
    }

    /// Numeric value of the final digit.
    pub fn last_digit(&self) -> u8 {
        self.0.as_bytes()[CPF_LEN - 1] - b'0'
    }

    /// First 12 hex chars of the SHA-256 of the digits.
    ///
    /// Logs carry this instead of the CPF itself.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        let full = hex::encode(hasher.finalize());
        full[..12].to_string()
    }
}

impl TryFrom<String> for Cpf {
    type Error = CpfError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Cpf::parse(&s)
    }
}

impl std::str::FromStr for Cpf {
    type Err = CpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cpf::parse(s)
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> Self {
        cpf.0
    }
}

impl std::fmt::Display for Cpf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}
