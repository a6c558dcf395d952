//! Best-effort parsing of model replies into grievance records

use grievance_domain::{GrievanceField, GrievanceRecord};
use serde_json::Value;
use tracing::{debug, warn};

/// Parse a model reply into a `GrievanceRecord`
///
/// Returns `None` when the reply is not a JSON object or names none of the
/// eleven fields. Keys that are not grievance fields are ignored.
pub fn parse_grievance_record(response: &str) -> Option<GrievanceRecord> {
    let json_str = strip_code_fence(response);

    let json: Value = match serde_json::from_str(json_str) {
        Ok(json) => json,
        Err(e) => {
            warn!("Model reply is not JSON: {}", e);
            return None;
        }
    };

    let Some(object) = json.as_object() else {
        warn!("Model reply is JSON but not an object");
        return None;
    };

    let mut record = GrievanceRecord::default();
    for (key, value) in object {
        match GrievanceField::from_key(key) {
            Some(field) => record.set(field, value.clone()),
            None => debug!("Ignoring unknown key '{}'", key),
        }
    }

    if record.populated() == 0 {
        warn!("Model reply contains none of the grievance fields");
        return None;
    }

    Some(record)
}

/// Strip a surrounding markdown code fence, if any
///
/// LLMs often wrap JSON in ```` ```json ```` blocks even when told not to.
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json") on the opening line
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => return trimmed,
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\n{\"a\": 1}\n```\n"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_unterminated_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_labelled_keys() {
        let reply = r#"{
            "Category": "Public Utilities",
            "Sub-Category": "Water Supply",
            "Grievance Description": "No water for three days",
            "Location": "Sector 4",
            "Current Status": "Pending",
            "Resolution Date": null
        }"#;

        let record = parse_grievance_record(reply).unwrap();
        assert_eq!(record.category, Some(json!("Public Utilities")));
        assert_eq!(record.sub_category, Some(json!("Water Supply")));
        assert_eq!(record.location, Some(json!("Sector 4")));
        assert_eq!(record.resolution_date, Some(Value::Null));
        assert_eq!(record.assigned_department, None);
        assert_eq!(record.populated(), 6);
    }

    #[test]
    fn test_parse_fenced_reply() {
        let reply = "```json\n{\"category\": \"Roads\", \"response_actions\": [\"Inspect\"]}\n```";

        let record = parse_grievance_record(reply).unwrap();
        assert_eq!(record.category, Some(json!("Roads")));
        assert_eq!(record.response_actions, Some(json!(["Inspect"])));
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let reply = r#"{"Category": "Health", "Priority": "High"}"#;

        let record = parse_grievance_record(reply).unwrap();
        assert_eq!(record.populated(), 1);
    }

    #[test]
    fn test_parse_prose_is_none() {
        assert!(parse_grievance_record("The grievance is about water.").is_none());
    }

    #[test]
    fn test_parse_array_is_none() {
        assert!(parse_grievance_record(r#"[{"Category": "Health"}]"#).is_none());
    }

    #[test]
    fn test_parse_unrelated_object_is_none() {
        assert!(parse_grievance_record(r#"{"summary": "nothing useful"}"#).is_none());
    }
}
