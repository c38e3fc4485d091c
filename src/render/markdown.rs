use crate::models::lookup::{display_value, get_or, lookup, text_or};
use serde_json::{json, Value};

/// Renders a persisted fetch result (ticket or idle marker) as Markdown.
pub fn render(data: &Value) -> String {
    if is_idle(data) {
        render_idle(&text_or(data, "jql", ""))
    } else {
        render_ticket(data)
    }
}

pub fn is_idle(data: &Value) -> bool {
    lookup(data, "status").and_then(Value::as_str) == Some("idle")
}

pub fn render_idle(jql: &str) -> String {
    format!("# No ticket available\n\nJQL: {}\n", jql)
}

fn render_ticket(data: &Value) -> String {
    let empty_list = json!([]);

    let ticket_key = text_or(data, "issue_key", "");
    let summary = text_or(data, "issue.fields.summary", "");
    let description = text_or(data, "issue.renderedFields.description", "");
    let labels = get_or(data, "issue.fields.labels", &empty_list);
    let priority = text_or(data, "issue.fields.priority.name", "");
    let linked_issues = get_or(data, "issue.fields.issuelinks", &empty_list);
    let comments = comment_bodies(get_or(data, "issue.renderedFields.comment.comments", &empty_list));

    let mut lines = vec![
        format!("- **ticket_key**: {}", ticket_key),
        format!("- **summary**: {}", summary),
        format!("- **description**: {}", description),
        format!("- **labels**: {}", labels),
        format!("- **priority**: {}", priority),
        // Links are usually large and nested, keep them as JSON.
        format!("- **linked_issues**: {}", linked_issues),
        "- **comments**:".to_string(),
    ];

    if comments.is_empty() {
        lines.push(String::new());
        lines.push("(none)".to_string());
    } else {
        let last = comments.len() - 1;
        for (i, body) in comments.into_iter().enumerate() {
            lines.push(format!("comment {}:", i + 1));
            lines.push(body);
            if i != last {
                lines.push("\n---".to_string());
            }
        }
    }

    format!("{}\n", lines.join("\n").trim_end())
}

/// Bodies of the object entries of a rendered comment list. Null bodies are
/// rendered empty; anything that is not an array yields no comments.
fn comment_bodies(comments: &Value) -> Vec<String> {
    let Some(entries) = comments.as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .filter(|entry| entry.is_object())
        .map(|entry| entry.get("body").map(display_value).unwrap_or_default())
        .collect()
}
