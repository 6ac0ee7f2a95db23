//! Lenient parsing of raw user text.
//!
//! Amount fields accept spaces as digit grouping and a comma as the decimal
//! separator. Anything after the leading number is ignored, and text without
//! a leading number yields `None` so the caller can skip the operation.

/// Parses a currency amount such as `"1 250,50"` or `"-30"`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let normalized = compact.replacen(',', ".", 1);
    let end = numeric_prefix_len(&normalized);
    if end == 0 {
        return None;
    }
    normalized[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parses a whole, strictly positive count such as a number of days.
pub fn parse_count(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = unsigned.chars().take_while(char::is_ascii_digit).collect();
    digits.parse::<u32>().ok().filter(|value| *value > 0)
}

/// Trims a name and rejects it when nothing is left.
pub fn parse_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Length in bytes of the longest `[+-]digits[.digits][e[+-]digits]` prefix.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut pos = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        pos += 1;
    }
    let int_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let mut digits = pos - int_start;
    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            pos = frac_end;
        }
    }
    if digits == 0 {
        return 0;
    }
    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_digits_start = exp;
        while bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            exp += 1;
        }
        if exp > exp_digits_start {
            pos = exp;
        }
    }
    pos
}
