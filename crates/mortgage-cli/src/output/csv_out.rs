use serde_json::Value;
use std::io;

use super::{cell_text, result_of};

/// Two-column `field,value` CSV of the result object on stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match result_of(value) {
        Value::Object(map) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                let _ = wtr.write_record([key.as_str(), &cell_text(val)]);
            }
        }
        other => {
            let _ = wtr.write_record([&cell_text(other)]);
        }
    }

    let _ = wtr.flush();
}
