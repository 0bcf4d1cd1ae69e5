use serde_json::Value;
use std::io;

use super::{flatten, result_of};

/// Write the result as two-column `field,value` CSV on stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_csv(&mut wtr, result_of(value)) {
        log::error!("CSV write error: {e}");
    }
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, result: &Value) -> csv::Result<()> {
    match result {
        Value::Object(map) => {
            let mut rows = Vec::new();
            flatten("", map, &mut rows);
            wtr.write_record(["field", "value"])?;
            for (key, val) in rows {
                wtr.write_record([key.as_str(), &format_csv_value(&val)])?;
            }
        }
        other => wtr.write_record([&format_csv_value(other)])?,
    }
    wtr.flush()?;
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_csv_flattens_nested_result() {
        let v = json!({"result": {"spouse1": {"coverage_gap": "885000"}, "spouse2": null}});
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_csv(&mut wtr, result_of(&v)).unwrap();
        let text = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        assert!(text.starts_with("field,value\n"));
        assert!(text.contains("spouse1.coverage_gap,885000"));
        assert!(text.contains("spouse2,\n"));
    }
}
