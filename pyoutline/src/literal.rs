//! Normalization of Python literal tokens into their canonical values

/// Decode the body of a non-raw string literal, resolving escape sequences.
///
/// Unknown escapes are kept verbatim, as Python does.
pub fn decode_escapes(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(escape) = chars.next() else {
            out.push('\\');
            break;
        };
        match escape {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\u{7}'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{b}'),
            'x' | 'u' | 'U' => {
                let width = match escape {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = (0..width)
                    .map_while(|_| chars.next_if(char::is_ascii_hexdigit))
                    .collect();
                let decoded = u32::from_str_radix(&digits, 16)
                    .ok()
                    .filter(|_| digits.len() == width)
                    .and_then(char::from_u32);
                match decoded {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('\\');
                        out.push(escape);
                        out.push_str(&digits);
                    }
                }
            }
            '0'..='7' => {
                let mut digits = String::from(escape);
                while digits.len() < 3 {
                    match chars.next_if(|c| ('0'..='7').contains(c)) {
                        Some(digit) => digits.push(digit),
                        None => break,
                    }
                }
                match u32::from_str_radix(&digits, 8).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('\\');
                        out.push_str(&digits);
                    }
                }
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

/// Render an integer literal in decimal, the way Python prints its value.
///
/// Literals too large for `u128` are returned with underscores stripped.
pub fn normalize_int(text: &str) -> String {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    let lower = lower.trim_end_matches('l');

    let parsed = if let Some(hex) = lower.strip_prefix("0x") {
        u128::from_str_radix(hex, 16).ok()
    } else if let Some(oct) = lower.strip_prefix("0o") {
        u128::from_str_radix(oct, 8).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u128::from_str_radix(bin, 2).ok()
    } else {
        lower.parse::<u128>().ok()
    };

    match parsed {
        Some(value) => value.to_string(),
        None => cleaned,
    }
}

/// Render a float literal the way Python's `repr(float)` does.
///
/// Imaginary literals and anything that fails to parse are returned with
/// underscores stripped.
pub fn normalize_float(text: &str) -> String {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    if cleaned.ends_with(['j', 'J']) {
        return cleaned;
    }
    let Ok(value) = cleaned.parse::<f64>() else {
        return cleaned;
    };
    if value.is_infinite() {
        return "1e309".to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return python_exponent(&format!("{value:e}"));
    }

    let rendered = value.to_string();
    if rendered.contains('.') {
        rendered
    } else {
        format!("{rendered}.0")
    }
}

/// Turn Rust's `1.5e-7` into Python's `1.5e-07`
fn python_exponent(rendered: &str) -> String {
    let Some((mantissa, exponent)) = rendered.split_once('e') else {
        return rendered.to_string();
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case(r"tab\there", "tab\there")]
    #[case(r"quote\'s", "quote's")]
    #[case(r"\x41é\U0001F600", "A\u{e9}\u{1F600}")]
    #[case(r"\101", "A")]
    #[case(r"keep\d", r"keep\d")]
    #[case("joined\\\nline", "joinedline")]
    fn test_decode_escapes(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(decode_escapes(body), expected);
    }

    #[rstest]
    #[case("1000", "1000")]
    #[case("1_000", "1000")]
    #[case("0x10", "16")]
    #[case("0o17", "15")]
    #[case("0b101", "5")]
    #[case("0", "0")]
    fn test_normalize_int(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(normalize_int(text), expected);
    }

    #[rstest]
    #[case("1.0", "1.0")]
    #[case("1.", "1.0")]
    #[case(".5", "0.5")]
    #[case("1.50", "1.5")]
    #[case("1e3", "1000.0")]
    #[case("1e16", "1e+16")]
    #[case("1.5e-7", "1.5e-07")]
    #[case("2j", "2j")]
    #[case("1_000.25", "1000.25")]
    fn test_normalize_float(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(normalize_float(text), expected);
    }
}
