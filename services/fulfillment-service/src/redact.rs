use reqwest::Url;
use serde_json::Value;

const MASK: &str = "***";
const SECRET_QUERY_KEYS: [&str; 4] = ["apikey", "api_key", "key", "token"];
const SECRET_FIELD_HINTS: [&str; 5] = ["apikey", "api_key", "token", "secret", "password"];

/// Outbound URL with credential query values masked, for logging.
pub fn url(url: &Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if SECRET_QUERY_KEYS.contains(&key.to_ascii_lowercase().as_str()) {
                MASK.to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();
    let mut masked = url.clone();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

/// Copy of a JSON document with secret-looking fields masked.
pub fn value(doc: &Value) -> Value {
    match doc {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| {
                    let child = if is_secret_field(key) {
                        Value::String(MASK.to_string())
                    } else {
                        value(child)
                    };
                    (key.clone(), child)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(value).collect()),
        other => other.clone(),
    }
}

fn is_secret_field(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key == "authorization" || SECRET_FIELD_HINTS.iter().any(|hint| key.contains(hint))
}
