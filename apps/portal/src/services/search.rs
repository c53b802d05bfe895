use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::Request;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("could not serialize requests for the prompt: {0}")]
    Encode(serde_json::Error),
    #[error("AI answer was not the expected JSON: {0}")]
    Decode(serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchAnswer {
    #[serde(default)]
    request_ids: Vec<String>,
}

/// Prompt for the natural-language search: the whole request list goes to
/// the model, which answers with the ids that match.
pub fn build_search_prompt(query: &str, requests: &[Request]) -> Result<String, SearchError> {
    let data = serde_json::to_string(requests).map_err(SearchError::Encode)?;
    Ok(format!(
        "You are a data analysis expert for Sato Pharma.\n\
         Analyze the following JSON data which contains a list of operational requests.\n\
         Based on the user's query, return a JSON object containing only the \"id\" fields of the requests that match the query.\n\
         User Query: \"{}\"\n\n\
         JSON Data:\n{data}",
        query.trim()
    ))
}

pub fn search_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "requestIds": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        }
    })
}

pub fn parse_matching_ids(answer: &str) -> Result<BTreeSet<String>, SearchError> {
    let body = strip_code_fence(answer.trim());
    let parsed: SearchAnswer = serde_json::from_str(body).map_err(SearchError::Decode)?;
    Ok(parsed.request_ids.into_iter().collect())
}

/// Requests whose id is in `ids`, in their original order.
pub fn select_requests(requests: &[Request], ids: &BTreeSet<String>) -> Vec<Request> {
    requests
        .iter()
        .filter(|request| ids.contains(&request.id))
        .cloned()
        .collect()
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::requests::sample_requests;

    #[test]
    fn prompt_embeds_query_and_data() {
        let prompt = build_search_prompt("  approved campaigns > 40k ", &sample_requests()).unwrap();
        assert!(prompt.contains("User Query: \"approved campaigns > 40k\""));
        assert!(prompt.contains("\"id\":\"R-1001\""));
        assert!(prompt.contains("\"estimatedCost\":45000.0"));
    }

    #[test]
    fn parses_plain_and_fenced_answers() {
        let ids = parse_matching_ids(r#"{"requestIds": ["R-1002", "R-1001"]}"#).unwrap();
        assert_eq!(ids.len(), 2);

        let fenced = "```json\n{\"requestIds\": [\"R-1002\"]}\n```";
        let ids = parse_matching_ids(fenced).unwrap();
        assert!(ids.contains("R-1002"));
    }

    #[test]
    fn missing_field_means_no_matches() {
        assert!(parse_matching_ids("{}").unwrap().is_empty());
        assert!(matches!(
            parse_matching_ids("no idea"),
            Err(SearchError::Decode(_))
        ));
    }

    #[test]
    fn selection_keeps_request_order_and_ignores_unknown_ids() {
        let ids: BTreeSet<String> = ["R-1002", "R-1001", "R-9999"]
            .into_iter()
            .map(String::from)
            .collect();
        let selected = select_requests(&sample_requests(), &ids);
        let order: Vec<_> = selected.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(order, vec!["R-1001", "R-1002"]);
    }
}
