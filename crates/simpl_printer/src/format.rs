//! Literal value rendering shared by both printers.

use simpl_ast::Literal;
use std::borrow::Cow;

/// Significant digits used for doubles, as in C stream output.
const PRECISION: usize = 6;

/// Render a double the way `%g` does: six significant digits, trailing
/// zeros dropped, scientific notation outside `1e-4 <= |v| < 1e6`.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rounding to the target precision first fixes the exponent, so 999999.5
    // becomes 1e+06 rather than 999999 or 1000000.
    let scientific = format!("{:.*e}", PRECISION - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return scientific,
    };

    if exponent < -4 || exponent >= PRECISION as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (PRECISION as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn format_bool(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

fn join<T>(items: &[T], render: impl Fn(&T) -> String) -> String {
    items.iter().map(render).collect::<Vec<_>>().join(" ")
}

/// The literal's value as printed. Array elements are separated by one
/// space; a character array prints as its text.
pub fn literal_text(literal: &Literal) -> Cow<'_, str> {
    match literal {
        Literal::Int(v) => v.to_string().into(),
        Literal::Double(v) => format_double(*v).into(),
        Literal::Char(c) => c.to_string().into(),
        Literal::Bool(b) => format_bool(*b).into(),
        Literal::IntArray(items) => join(&items[..], |v| v.to_string()).into(),
        Literal::DoubleArray(items) => join(&items[..], |v| format_double(*v)).into(),
        Literal::CharArray(text) => Cow::Borrowed(&**text),
        Literal::BoolArray(items) => join(&items[..], |b| format_bool(*b).to_string()).into(),
    }
}
