/// Formats a value the way PRINT and STR$ show it: about seven
/// significant digits, switching to scientific notation outside
/// 0.0001..=1000000.
pub fn format_number(val: f32) -> String {
    if val == 0.0 {
        return "0".to_string();
    }
    let abs = val.abs();
    if !abs.is_finite() || abs < 0.0001 || abs > 1_000_000.0 {
        return scientific(val);
    }
    let magnitude = (abs as f64).log10().floor() as i32 + 1;
    let decimals = (7 - magnitude).max(0) as usize;
    let mut s = format!("{:.*}", decimals, val);
    if decimals > 0 {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    s
}

// Two decimals and at least two exponent digits: 1.23e+07
fn scientific(val: f32) -> String {
    let s = format!("{:.2e}", val);
    match s.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => s,
        },
        None => s,
    }
}

/// Reads the longest numeric prefix of `s`, ignoring leading whitespace.
/// Text with no numeric prefix reads as 0.
pub fn parse_leading_float(s: &str) -> f32 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end == digits_start || &s[digits_start..end] == "." {
        return 0.0;
    }
    let mantissa_end = end;
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    s[..end]
        .parse::<f32>()
        .or_else(|_| s[..mantissa_end].parse::<f32>())
        .unwrap_or(0.0)
}
