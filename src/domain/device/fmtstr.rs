//! printf-style format string checks for `fmtstr` parameters.

const FLAGS: &[char] = &['-', '#', '0', ' ', '+'];
const LENGTH_MODIFIERS: &[char] = &['h', 'l', 'L'];
const CONVERSIONS: &[char] =
    &['d', 'i', 'o', 'u', 'x', 'X', 'e', 'E', 'f', 'F', 'g', 'G', 'c', 'r', 's', '%'];

/// Count the value placeholders of a format string.
///
/// `%%` is a literal percent sign and does not count. Returns the offending
/// position when a `%` does not start a valid conversion.
pub fn count_placeholders(fmtstr: &str) -> Result<usize, String> {
    let chars: Vec<char> = fmtstr.chars().collect();
    let mut count = 0;
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '%' {
            i += 1;
            continue;
        }
        let start = i;
        i += 1;
        while i < chars.len() && FLAGS.contains(&chars[i]) {
            i += 1;
        }
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        if i < chars.len() && chars[i] == '.' {
            i += 1;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
        }
        if i < chars.len() && LENGTH_MODIFIERS.contains(&chars[i]) {
            i += 1;
        }
        match chars.get(i) {
            Some('%') if i == start + 1 => {}
            Some(c) if CONVERSIONS.contains(c) && *c != '%' => count += 1,
            _ => return Err(format!("invalid conversion at position {}", start)),
        }
        i += 1;
    }

    Ok(count)
}

/// Validate a device `fmtstr`: at least one placeholder, all conversions valid.
pub fn check(fmtstr: &str) -> Result<(), String> {
    match count_placeholders(fmtstr)? {
        0 => Err(format!("format string {:?} has no placeholder", fmtstr)),
        _ => Ok(()),
    }
}
