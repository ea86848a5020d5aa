use crate::error::Result;
use serde::Serialize;
use serde_json::Value;

/// Keeps the last four digits of a card number, masking the rest.
pub fn mask_pan(card: &str) -> String {
    let len = card.len();
    if len > 4 {
        "*".repeat(len - 4) + &card[len - 4..]
    } else {
        card.to_string()
    }
}

/// Return true if a key name likely holds a card number.
fn is_pan_key(key: &str) -> bool {
    let k = key.to_ascii_lowercase();
    k == "pan" || k == "number" || k.contains("card_num") || k.contains("cardnum")
}

/// Return true if a key name likely holds a CVV.
fn is_cvv_key(key: &str) -> bool {
    let k = key.to_ascii_lowercase();
    k.contains("cvv") || k.contains("cvc") || k.contains("card_code")
}

/// Serializes a value and masks card data so it is safe for logs and the
/// host activity feed.
pub fn secure_serializable(v: impl Serialize) -> Result<Value> {
    let value = serde_json::to_value(v)?;
    Ok(secure_value(&value))
}

pub fn secure_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut new = serde_json::Map::with_capacity(map.len());
            for (k, val) in map {
                let new_val = match val {
                    Value::String(s) if is_pan_key(k) => Value::String(mask_pan(s)),
                    Value::String(_) if is_cvv_key(k) => Value::String("***".to_string()),
                    Value::Number(n) if is_pan_key(k) => Value::String(mask_pan(&n.to_string())),
                    Value::Number(_) if is_cvv_key(k) => Value::String("***".to_string()),
                    _ => secure_value(val),
                };
                new.insert(k.clone(), new_val);
            }
            Value::Object(new)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(secure_value).collect()),
        other => other.clone(),
    }
}
