use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IsinError {
    #[error("ISIN must be 12 characters, got {0}")]
    Length(usize),

    #[error("ISIN '{0}' does not match country code + 9 alphanumerics + check digit")]
    Shape(String),

    #[error("ISIN '{isin}' has check digit {found}, expected {expected}")]
    CheckDigit {
        isin: String,
        expected: u32,
        found: u32,
    },
}

fn isin_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]{2}[A-Z0-9]{9}[0-9]$").expect("valid regex"))
}

/// Validate a single ISIN: length, shape, and Luhn check digit.
pub fn validate_isin(isin: &str) -> Result<(), IsinError> {
    let len = isin.chars().count();
    if len != 12 {
        return Err(IsinError::Length(len));
    }
    if !isin_regex().is_match(isin) {
        return Err(IsinError::Shape(isin.to_string()));
    }

    // Shape check guarantees ASCII, so byte slicing is safe
    let expected = check_digit(&isin[..11]);
    let found = isin[11..]
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .unwrap_or_default();

    if expected != found {
        return Err(IsinError::CheckDigit {
            isin: isin.to_string(),
            expected,
            found,
        });
    }

    Ok(())
}

/// Check every identifier and log problems. Nothing is rejected; the
/// returned errors are for callers that want to report them.
pub fn check_all(isins: &[&str]) -> Vec<IsinError> {
    let mut errors = Vec::new();

    for isin in isins {
        if let Err(e) = validate_isin(isin) {
            tracing::warn!(isin = %isin, "{e}");
            errors.push(e);
        }
    }

    if errors.is_empty() {
        tracing::debug!(count = isins.len(), "All identifiers are well-formed ISINs");
    }

    errors
}

/// Luhn check digit over the ISIN body, letters expanded to two digits (A=10 .. Z=35).
fn check_digit(body: &str) -> u32 {
    let digits: Vec<u32> = body
        .chars()
        .filter_map(|c| c.to_digit(36))
        .flat_map(|v| {
            if v >= 10 {
                vec![v / 10, v % 10]
            } else {
                vec![v]
            }
        })
        .collect();

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    (10 - sum % 10) % 10
}
