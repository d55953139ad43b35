use serde_json::Value;

/// Classified planner output. Anything without a recognized `action` tag is
/// `Unknown`; tag matching is case-sensitive.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerDirective {
    Final { answer: String },
    SearchDocs {
        query: Option<String>,
        top_k: Option<u32>,
    },
    GetDocText { drive_file_id: Option<String> },
    Unknown,
}

impl PlannerDirective {
    pub fn from_value(value: &Value) -> Self {
        match value.get("action").and_then(Value::as_str) {
            Some("final") => {
                let answer = value
                    .get("answer")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                PlannerDirective::Final { answer }
            }
            Some("search_docs") => {
                let args = value.get("args");
                PlannerDirective::SearchDocs {
                    query: args
                        .and_then(|args| args.get("query"))
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    top_k: args
                        .and_then(|args| args.get("top_k"))
                        .and_then(Value::as_u64)
                        .and_then(|raw| u32::try_from(raw).ok()),
                }
            }
            Some("get_doc_text") => PlannerDirective::GetDocText {
                drive_file_id: value
                    .get("args")
                    .and_then(|args| args.get("drive_file_id"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            _ => PlannerDirective::Unknown,
        }
    }
}
