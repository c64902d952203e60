//! Lenient numeric parsing for result cells
//!
//! Literal values are parsed from their longest numeric prefix after leading
//! whitespace, so `"12abc"` is `12` and `"19.99 USD"` is `19.99`. Anything
//! without a leading number, or a number that does not fit, is `None`.

/// Byte length of the ASCII digit run at the start of `s`
fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn sign_len(s: &str) -> usize {
    usize::from(s.starts_with('+') || s.starts_with('-'))
}

/// Parse the leading base-10 integer of `s`
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign = sign_len(s);
    let digits = digit_run(&s[sign..]);
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

/// Parse the leading decimal floating-point number of `s`
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let mut end = sign_len(s);

    let int_digits = digit_run(&s[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if s[end..].starts_with('.') {
        frac_digits = digit_run(&s[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if s[end..].starts_with(['e', 'E']) {
        let exp_sign = sign_len(&s[end + 1..]);
        let exp_digits = digit_run(&s[end + 1 + exp_sign..]);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_prefix() {
        assert_eq!(parse_int_prefix("15"), Some(15));
        assert_eq!(parse_int_prefix("  -7"), Some(-7));
        assert_eq!(parse_int_prefix("+3"), Some(3));
        assert_eq!(parse_int_prefix("12abc"), Some(12));
        assert_eq!(parse_int_prefix("19.99"), Some(19));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("99999999999999999999"), None);
    }

    #[test]
    fn test_float_prefix() {
        assert_eq!(parse_float_prefix("19.99"), Some(19.99));
        assert_eq!(parse_float_prefix("19.99 USD"), Some(19.99));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("-2.5e2x"), Some(-250.0));
        assert_eq!(parse_float_prefix("3e"), Some(3.0));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("Infinity"), None);
        assert_eq!(parse_float_prefix("1e400"), None);
        assert_eq!(parse_float_prefix("free"), None);
    }
}
