use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    /// `§` plus whatever single character follows it. A lone trailing `§` is left alone.
    static ref FORMATTING_CODE_RE: Regex = Regex::new(r"(?s)§.").unwrap();
}

/// Removes legacy `§x` colour and formatting codes.
pub fn strip_color_codes(text: &str) -> String {
    FORMATTING_CODE_RE.replace_all(text, "").into_owned()
}

/// Flattens a status `description` into plain text.
///
/// The description is either a plain string or a text component tree:
/// `text` of each node followed by its `extra` children, depth first.
/// Formatting codes are stripped from the concatenated result, so a code
/// split across two nodes is still removed.
pub fn flatten_description(description: &Value) -> String {
    let mut out = String::new();
    collect_text(description, &mut out);
    strip_color_codes(&out)
}

fn collect_text(node: &Value, out: &mut String) {
    match node {
        Value::String(text) => out.push_str(text),
        Value::Object(component) => {
            if let Some(Value::String(text)) = component.get("text") {
                out.push_str(text);
            }
            if let Some(Value::Array(extra)) = component.get("extra") {
                for child in extra {
                    collect_text(child, out);
                }
            }
        }
        Value::Array(components) => {
            for child in components {
                collect_text(child, out);
            }
        }
        _ => {}
    }
}
