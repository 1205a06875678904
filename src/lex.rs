//! Scanners for the tokens of the input grammar.
//!
//! Every scanner takes the whole line and a byte position, and returns the
//! scanned value together with the position just after it, or `None` when
//! the text at that position is not a valid token. Delimiters following a
//! token are never consumed.

use crate::network::{ClockTime, Minutes, Price};
use crate::utils::{digit_value, is_digit, is_stop_char, is_ticket_name_char};

pub type Scan<T> = Option<(T, usize)>;

fn byte_at(line: &str, pos: usize) -> Option<u8> {
    line.as_bytes().get(pos).copied()
}

// Length of the longest run of bytes matching `pred` starting at `pos`.
fn run_length(line: &str, pos: usize, pred: impl Fn(u8) -> bool) -> usize {
    line.as_bytes().get(pos..).map_or(0, |rest| rest.iter().take_while(|&&c| pred(c)).count())
}

/// Scans a non-negative integer. Leading zeros are allowed and ignored.
pub fn scan_number(line: &str, pos: usize) -> Scan<u64> {
    let len = run_length(line, pos, is_digit);
    if len == 0 {
        return None;
    }
    let value = line.as_bytes()[pos..pos + len]
        .iter()
        .try_fold(0u64, |acc, &c| acc.checked_mul(10)?.checked_add(digit_value(c)))?;
    Some((value, pos + len))
}

/// Scans a ticket validity length: a positive integer without a leading zero.
pub fn scan_validity(line: &str, pos: usize) -> Scan<Minutes> {
    if byte_at(line, pos) == Some(b'0') {
        return None;
    }
    let (value, end) = scan_number(line, pos)?;
    Some((Minutes::try_from(value).ok()?, end))
}

/// Scans a time written as `H:MM` or `HH:MM`.
///
/// A two digit hour may not start with `0`. Whether the time is a real time
/// during service hours is left to [`ClockTime::new`].
pub fn scan_time(line: &str, pos: usize) -> Scan<ClockTime> {
    let first = byte_at(line, pos).filter(|&c| is_digit(c))?;
    let (hour, minute_pos) = match byte_at(line, pos + 1)? {
        b':' => (digit_value(first), pos + 2),
        second if is_digit(second) && first != b'0' && byte_at(line, pos + 2) == Some(b':') => {
            (digit_value(first) * 10 + digit_value(second), pos + 3)
        }
        _ => return None,
    };
    if run_length(line, minute_pos, is_digit) < 2 {
        return None;
    }
    let bytes = line.as_bytes();
    let minute = digit_value(bytes[minute_pos]) * 10 + digit_value(bytes[minute_pos + 1]);
    let time = ClockTime::new(hour as u32, minute as u32)?;
    Some((time, minute_pos + 2))
}

/// Scans a price with exactly two decimal places, e.g. `12.50`.
pub fn scan_price(line: &str, pos: usize) -> Scan<Price> {
    let (whole, dot) = scan_number(line, pos)?;
    if byte_at(line, dot) != Some(b'.') {
        return None;
    }
    let first = byte_at(line, dot + 1).filter(|&c| is_digit(c))?;
    let second = byte_at(line, dot + 2).filter(|&c| is_digit(c))?;
    let cents = whole
        .checked_mul(100)?
        .checked_add(digit_value(first) * 10 + digit_value(second))?;
    Some((Price::from_cents(cents), dot + 3))
}

/// Scans a stop name made of English letters, `_` and `^`.
pub fn scan_stop_name(line: &str, pos: usize) -> Scan<&str> {
    let len = run_length(line, pos, is_stop_char);
    (len > 0).then(|| (&line[pos..pos + len], pos + len))
}

/// Scans a ticket name made of English letters and spaces.
///
/// The last space of the run separates the name from the price, so the
/// scan stops one byte short of the end of the run, leaving the position on
/// that separator.
pub fn scan_ticket_name(line: &str, pos: usize) -> Scan<&str> {
    let len = run_length(line, pos, is_ticket_name_char);
    if len < 2 {
        return None;
    }
    let end = pos + len - 1;
    Some((&line[pos..end], end))
}
