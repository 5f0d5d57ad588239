use std::fmt::Write;

use crate::session::values::{ParamValue, ParamValues};

pub const PREVIEW_MODEL: &str = "gpt-4o";

/// Keys always present in the preview, after `model`.
pub const PREVIEW_KEYS: [&str; 7] = [
    "temperature",
    "top_p",
    "presence_penalty",
    "max_tokens",
    "response_format",
    "timeout",
    "max_retries",
];

/// Parameters the sandbox offers controls for.
pub const SANDBOX_PARAMS: [&str; 4] = ["temperature", "top_p", "presence_penalty", "max_tokens"];

const QUOTED_KEYS: [&str; 1] = ["response_format"];
const METADATA_KEY: &str = "metadata";
const METADATA_EMPTY: &str = "{}";

/// Render the request body the current values describe.
///
/// Display only: metadata is pasted in as typed, so the result is not
/// guaranteed to be valid JSON.
pub fn sandbox_preview(values: &ParamValues) -> String {
    let mut fields: Vec<(String, String)> = Vec::with_capacity(PREVIEW_KEYS.len() + 2);
    fields.push(("model".to_string(), format!("\"{PREVIEW_MODEL}\"")));

    for key in PREVIEW_KEYS {
        let rendered = match values.get(key) {
            Some(value) if QUOTED_KEYS.contains(&key) => format!("\"{value}\""),
            Some(value) => value.to_string(),
            None => "null".to_string(),
        };
        fields.push((key.to_string(), rendered));
    }

    if let Some(ParamValue::Text(metadata)) = values.get(METADATA_KEY)
        && metadata != METADATA_EMPTY
    {
        fields.push((METADATA_KEY.to_string(), metadata.clone()));
    }

    let mut out = String::from("{\n");
    for (i, (key, value)) in fields.iter().enumerate() {
        let sep = if i + 1 < fields.len() { "," } else { "" };
        let _ = writeln!(out, "  \"{key}\": {value}{sep}");
    }
    out.push('}');
    out
}
