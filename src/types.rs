use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub llm_query: String,      // what the user asked the model
    pub llm_response: String,   // the model output to judge
}

/// Verdict returned by the `/verify` endpoint. Deployments disagree on which
/// fields they populate, so every known field is optional and unknown fields
/// are kept instead of rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,       // "Hallucination detected" / "No hallucination detected"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_response: Option<String>,   // the fragments judged hallucinated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_result: Option<String>,  // evidence that triggered the judgment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,         // where the evidence came from
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Verdict {
    pub fn has_known_fields(&self) -> bool {
        self.response.is_some()
            || self.llm_response.is_some()
            || self.search_result.is_some()
            || self.source.is_some()
    }

    /// Two-line clipboard summary; absent fields render empty.
    pub fn summary(&self) -> String {
        format!(
            "Response: {}\n\nSource: {}",
            single_line(self.response.as_deref().unwrap_or_default()),
            single_line(self.source.as_deref().unwrap_or_default()),
        )
    }

    /// The whole record as pretty-printed JSON (2-space indent).
    pub fn pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".into())
    }
}

/// Collapse newlines to spaces so free text fits a single display line.
pub fn single_line(text: &str) -> String {
    text.replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn verdict(value: serde_json::Value) -> Verdict {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn accepts_minimal_shape() {
        let v = verdict(serde_json::json!({"response": "Correct", "source": "arithmetic"}));
        assert_eq!(v.response.as_deref(), Some("Correct"));
        assert_eq!(v.source.as_deref(), Some("arithmetic"));
        assert!(v.llm_response.is_none());
        assert!(v.search_result.is_none());
        assert!(v.extra.is_empty());
        assert!(v.has_known_fields());
    }

    #[test]
    fn accepts_full_shape() {
        let v = verdict(serde_json::json!({
            "response": "Hallucination detected",
            "llm_response": "the moon is cheese",
            "search_result": "the moon is rock",
            "source": "https://example.com/moon",
        }));
        assert_eq!(v.response.as_deref(), Some("Hallucination detected"));
        assert_eq!(v.llm_response.as_deref(), Some("the moon is cheese"));
        assert_eq!(v.search_result.as_deref(), Some("the moon is rock"));
        assert_eq!(v.source.as_deref(), Some("https://example.com/moon"));
    }

    #[test]
    fn keeps_unknown_fields() {
        let v = verdict(serde_json::json!({"verdict": "ok", "confidence": 0.9}));
        assert!(!v.has_known_fields());
        assert_eq!(v.extra.len(), 2);
        assert_eq!(v.extra["verdict"], "ok");
    }

    #[test]
    fn single_line_collapses_newlines() {
        let out = single_line("line one\nline two\nline three");
        assert_eq!(out, "line one line two line three");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn summary_normalizes_and_defaults() {
        let v = verdict(serde_json::json!({"response": "Correct\nreally", "source": "arithmetic"}));
        assert_eq!(v.summary(), "Response: Correct really\n\nSource: arithmetic");

        let no_source = verdict(serde_json::json!({"response": "Correct"}));
        assert_eq!(no_source.summary(), "Response: Correct\n\nSource: ");
    }

    #[test]
    fn pretty_json_uses_two_space_indent() {
        let v = verdict(serde_json::json!({"response": "Correct", "source": "arithmetic"}));
        assert_eq!(
            v.pretty_json(),
            "{\n  \"response\": \"Correct\",\n  \"source\": \"arithmetic\"\n}"
        );
    }
}
