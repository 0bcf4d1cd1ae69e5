use serde_json::Value;

use super::result_of;

/// Headline figure of each calculator, in priority order.
const PRIORITY_KEYS: [&str; 8] = [
    "periodic_payment",
    "max_price",
    "total_new_coverage",
    "gap",
    "gds_ratio",
    "premium",
    "total",
    "cash_required",
];

/// Print just the key answer value from the output.
///
/// Looks for the calculator's headline field first, then falls back to the
/// first field in the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(result_of(value)));
}

fn minimal_line(result: &Value) -> String {
    if let Value::Object(map) = result {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                return format_minimal(val);
            }
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{key}: {}", format_minimal(val));
        }
    }
    format_minimal(result)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
