use serde_json::Value;

use super::{cell_text, result_of};

/// Fields that answer "what will I pay?", most important first.
const PRIORITY_KEYS: [&str; 3] = ["monthly_payment", "down_payment", "loan_terms_years"];

/// Print just the headline figure of the output.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    if let Value::Object(map) = result {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                println!("{}", cell_text(val));
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, cell_text(val));
            return;
        }
    }

    println!("{}", cell_text(result));
}
