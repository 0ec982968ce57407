// SPDX-License-Identifier: Apache-2.0

//! Numeric token scanning and classification.
//!
//! The accepted grammar is `sign? digits+ (. digits+)? ([eE] sign? digits+)?`,
//! matched as a prefix of the input. An optional group is only taken when it
//! is complete, so `1.` scans as `1` and `2e+` scans as `2`.

use core::str::FromStr;

use log::trace;

use crate::parse_error::ParseError;
use crate::value::{Int, Value};

/// Counts the ASCII digits at the start of `bytes`.
fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of an optional leading `+` or `-`.
fn sign_len(bytes: &[u8]) -> usize {
    match bytes.first() {
        Some(b'+' | b'-') => 1,
        _ => 0,
    }
}

/// Returns the length of the longest prefix of `bytes` that matches the
/// number grammar, or `None` when not even `sign? digits+` matches.
pub fn scan_number(bytes: &[u8]) -> Option<usize> {
    let mut len = sign_len(bytes);
    let integral = digit_run(bytes.get(len..)?);
    if integral == 0 {
        return None;
    }
    len += integral;

    // Fraction: '.' followed by at least one digit
    if bytes.get(len) == Some(&b'.') {
        let fraction = bytes.get(len + 1..).map_or(0, digit_run);
        if fraction > 0 {
            len += 1 + fraction;
        }
    }

    // Exponent: 'e' or 'E', optional sign, at least one digit
    if matches!(bytes.get(len), Some(b'e' | b'E')) {
        let after_marker = bytes.get(len + 1..).unwrap_or(&[]);
        let exp_sign = sign_len(after_marker);
        let exponent = after_marker.get(exp_sign..).map_or(0, digit_run);
        if exponent > 0 {
            len += 1 + exp_sign + exponent;
        }
    }

    Some(len)
}

/// Picks the representation for a complete numeric token.
///
/// The whole token must parse as [`Int`] for an integer result; anything else
/// (fraction, exponent, too wide for `Int`) is tried as a finite `f64`.
pub fn classify(token: &[u8]) -> Result<Value, ParseError> {
    let text = core::str::from_utf8(token)?;
    if let Ok(int) = Int::from_str(text) {
        return Ok(Value::Int(int));
    }
    match f64::from_str(text) {
        Ok(double) if double.is_finite() => Ok(Value::Double(double)),
        _ => {
            trace!("numeric token {text:?} is neither an integer nor a finite float");
            Err(ParseError::InvalidNumber)
        }
    }
}

/// Scans and classifies the number at the start of `bytes`, returning the
/// value and the number of bytes it spans.
pub fn parse_number_prefix(bytes: &[u8]) -> Result<(Value, usize), ParseError> {
    let len = scan_number(bytes).ok_or(ParseError::InvalidNumber)?;
    let token = bytes.get(..len).ok_or(ParseError::InvalidNumber)?;
    let value = classify(token)?;
    Ok((value, len))
}
