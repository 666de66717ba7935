use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{cell_text, result_of};

/// Field / value table of the result, followed by any warnings and the
/// methodology line. Rows keep the result's key order.
pub fn print_table(value: &Value) {
    let result = result_of(value);

    match result {
        Value::Object(map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in map {
                builder.push_record([key.as_str(), &cell_text(val)]);
            }
            println!("{}", Table::from(builder));
        }
        other => println!("{}", cell_text(other)),
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
