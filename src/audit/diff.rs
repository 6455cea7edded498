//! Field-level diffs for audit entries
//!
//! Only top-level fields are compared. Bookkeeping timestamps are skipped so
//! a diff lists what the user actually changed.

use serde_json::Value;

/// Fields that change on every write and carry no user intent
const IGNORED_FIELDS: &[&str] = &["created_at", "updated_at"];

/// Summarize changed fields between two JSON objects, or `None` if nothing changed
pub fn diff_values(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut keys: Vec<&String> = before_obj.keys().chain(after_obj.keys()).collect();
            keys.sort();
            keys.dedup();

            keys.into_iter()
                .filter(|key| !IGNORED_FIELDS.contains(&key.as_str()))
                .filter_map(|key| match (before_obj.get(key), after_obj.get(key)) {
                    (Some(b), Some(a)) if b == a => None,
                    (b, a) => Some(format!("{}: {} -> {}", key, render(b), render(a))),
                })
                .collect::<Vec<_>>()
        }
        _ if before != after => vec![format!("{} -> {}", render(Some(before)), render(Some(after)))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn render(value: Option<&Value>) -> String {
    match value {
        None => "(none)".to_string(),
        Some(Value::String(s)) if s.chars().count() > 40 => {
            let head: String = s.chars().take(37).collect();
            format!("\"{}...\"", head)
        }
        Some(Value::Array(items)) => format!("[{} items]", items.len()),
        Some(Value::Object(fields)) => format!("{{{} fields}}", fields.len()),
        Some(other) => other.to_string(),
    }
}
