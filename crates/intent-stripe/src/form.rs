//! # Stripe Form Encoding
//!
//! Stripe takes `application/x-www-form-urlencoded` bodies with nested
//! values flattened into bracket keys (`payment_method_types[0]=card`).

use intent_core::{integral_number, PaymentIntentParams};
use serde_json::{Number, Value};

/// Flatten create parameters into form pairs. Absent fields are left out.
pub fn encode_params(params: &PaymentIntentParams) -> Vec<(String, String)> {
    let mut form_params = Vec::new();

    if let Some(ref amount) = params.amount {
        push_value("amount".to_string(), amount, &mut form_params);
    }
    if let Some(ref currency) = params.currency {
        push_value("currency".to_string(), currency, &mut form_params);
    }
    for (i, method) in params.payment_method_types.iter().enumerate() {
        form_params.push((format!("payment_method_types[{}]", i), method.clone()));
    }

    form_params
}

fn push_value(key: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((key, b.to_string())),
        Value::Number(n) => out.push((key, number_to_form(n))),
        Value::String(s) => out.push((key, s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                push_value(format!("{}[{}]", key, i), item, out);
            }
        }
        Value::Object(fields) => {
            for (name, item) in fields {
                push_value(format!("{}[{}]", key, name), item, out);
            }
        }
    }
}

/// Whole floats go out as integers (`1000.0` becomes `1000`).
fn number_to_form(n: &Number) -> String {
    match integral_number(n) {
        Some(i) => i.to_string(),
        None => n.to_string(),
    }
}
