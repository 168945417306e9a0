use crate::errors::{EvalError, Result};
use serde_json::Value;
use std::cmp::Ordering;

/// Loose equality between a stored context value and a literal clause
/// argument. Coerces to numbers when both sides look numeric, so
/// `eq:x,10` matches whether x is the number 10 or the string "10";
/// otherwise compares the rendered string forms.
pub fn loose_eq(value: &Value, literal: &str) -> bool {
    match value {
        Value::Number(n) => {
            if let (Some(da), Ok(db)) = (n.as_f64(), literal.parse::<f64>()) {
                (da - db).abs() < f64::EPSILON
            } else {
                n.to_string() == literal
            }
        }
        Value::String(s) => {
            if let (Ok(da), Ok(db)) = (s.parse::<f64>(), literal.parse::<f64>()) {
                (da - db).abs() < f64::EPSILON
            } else {
                s == literal
            }
        }
        Value::Bool(b) => literal.eq_ignore_ascii_case(if *b { "true" } else { "false" }),
        other => render(other) == literal,
    }
}

/// Ordered comparison between a stored value and a literal argument.
/// Numeric when the stored value is a JSON number; a literal that does
/// not parse as a number is then an argument error. Everything else
/// compares lexicographically on the rendered forms. Unlike `loose_eq`,
/// a stored string is never coerced, even when it looks numeric: the
/// stored type picks the comparison, so `"10"` orders before `"9"`.
pub fn compare(value: &Value, literal: &str) -> Result<Ordering> {
    match value {
        Value::Number(n) => {
            let da = n
                .as_f64()
                .ok_or_else(|| EvalError::Argument(format!("{n} is not comparable")))?;
            let db: f64 = literal
                .parse()
                .map_err(|_| EvalError::Argument(format!("expected a number, got `{literal}`")))?;
            da.partial_cmp(&db)
                .ok_or_else(|| EvalError::Argument(format!("cannot compare against `{literal}`")))
        }
        Value::String(s) => Ok(s.as_str().cmp(&literal)),
        other => Ok(render(other).as_str().cmp(&literal)),
    }
}

/// Render a value the way a clause argument would spell it: strings
/// without quotes, everything else in JSON form.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
