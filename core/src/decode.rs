//! Decoding a response body into a value the caller already holds.
//!
//! Objects merge key by key into the current value, arrays and scalars
//! replace it. `null` empties an array and leaves anything else alone, the
//! way decoding `null` into an existing Go value resets slices but not
//! strings, numbers or structs. Fields the server omits therefore keep
//! whatever the caller had, and a list response replaces the whole
//! collection. On any error the target is left untouched.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

pub fn decode_in_place<T>(body: &[u8], target: &mut T) -> Result<(), ApiError>
where
    T: Serialize + DeserializeOwned,
{
    let incoming: Value = serde_json::from_slice(body).map_err(deserialization)?;
    let mut current = serde_json::to_value(&*target).map_err(deserialization)?;
    merge(&mut current, incoming);
    *target = serde_json::from_value(current).map_err(deserialization)?;
    Ok(())
}

fn merge(current: &mut Value, incoming: Value) {
    match (current, incoming) {
        (Value::Array(items), Value::Null) => items.clear(),
        (_, Value::Null) => {}
        (Value::Object(current), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match current.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None if value.is_null() => {}
                    None => {
                        current.insert(key, value);
                    }
                }
            }
        }
        (current, incoming) => *current = incoming,
    }
}

fn deserialization(err: serde_json::Error) -> ApiError {
    ApiError::Deserialization(err.to_string())
}
