//! Recursive merge of JSON value trees.
//!
//! For every key in the update: when both sides hold an object the merge
//! recurses, otherwise the update value replaces the target value. Arrays,
//! primitives, `null` and object/primitive mismatches all replace.
//!
//! The update tree must be acyclic. `serde_json::Value` owns its children so
//! a cycle cannot be built in safe code, but recursion depth still follows the
//! nesting depth of the update.

use serde_json::Value;

/// Merge `update` into `target` in place.
pub fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                let recurse = matches!(
                    (target_map.get(key), value),
                    (Some(Value::Object(_)), Value::Object(_))
                );

                if recurse {
                    if let Some(existing) = target_map.get_mut(key) {
                        merge_values(existing, value);
                    }
                } else {
                    target_map.insert(key.clone(), value.clone());
                }
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

/// Owned variant of [`merge_values`]: merges `update` over `base` and returns
/// the result.
pub fn deep_merge(mut base: Value, update: &Value) -> Value {
    merge_values(&mut base, update);
    base
}
