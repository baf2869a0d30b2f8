use crate::error::ResponseShapeError;
use crate::pos::PosCategory;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    News,
    Web,
    Kids,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::News => "news",
            Category::Web => "web",
            Category::Kids => "kids",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentence difficulty bands; the server expects the numeric level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Difficult,
}

impl Difficulty {
    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Moderate => 1,
            Difficulty::Difficult => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub id: String,
    pub sentence: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Sentences found for one word form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceGroup {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub pos: String,
    pub sentences: Vec<Sentence>,
}

impl SentenceGroup {
    pub fn pos_category(&self) -> PosCategory {
        PosCategory::from_tag(&self.pos)
    }
}

/// Payload of the `forms/` and `sentences/` endpoints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub sentences: Vec<SentenceGroup>,
    #[serde(default)]
    pub forms: Vec<String>,
}

impl SearchResponse {
    pub fn total_sentences(&self) -> usize {
        self.sentences.iter().map(|group| group.sentences.len()).sum()
    }
}

/// Reply from the API root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub version: String,
    pub is_authenticated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceDetail {
    pub id: String,
    pub content: String,
    pub sentence_length: f64,
    pub reports: i64,
    pub avg_word_length: f64,
    pub language: String,
    pub category: String,
}

/// True when every group carries zero sentences (including no groups at all).
pub fn no_results(response: &SearchResponse) -> bool {
    response
        .sentences
        .iter()
        .all(|group| group.sentences.is_empty())
}

/// Same check over an undecoded payload. Inner sentence entries may have any
/// shape; a missing or non-array `sentences` field at either level is an error.
pub fn no_results_in_value(response: &Value) -> Result<bool, ResponseShapeError> {
    let groups = sentences_array(response)?;
    for group in groups {
        if !sentences_array(group)?.is_empty() {
            return Ok(false);
        }
    }
    Ok(true)
}

fn sentences_array(value: &Value) -> Result<&Vec<Value>, ResponseShapeError> {
    value
        .get("sentences")
        .ok_or(ResponseShapeError::MissingField("sentences"))?
        .as_array()
        .ok_or(ResponseShapeError::NotAnArray("sentences"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn group(count: usize) -> SentenceGroup {
        SentenceGroup {
            word: "run".to_string(),
            pos: "VB".to_string(),
            sentences: (0..count)
                .map(|i| Sentence {
                    id: format!("s{i}"),
                    sentence: "They run.".to_string(),
                    source: None,
                    category: Some("news".to_string()),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_outer_sequence_means_no_results() {
        assert!(no_results(&SearchResponse::default()));
    }

    #[test]
    fn all_groups_empty_means_no_results() {
        let response = SearchResponse {
            sentences: vec![group(0), group(0)],
            forms: vec!["run".into(), "ran".into()],
        };
        assert!(no_results(&response));
    }

    #[test]
    fn any_sentence_means_results() {
        let response = SearchResponse {
            sentences: vec![group(0), group(1)],
            forms: Vec::new(),
        };
        assert!(!no_results(&response));
        assert_eq!(response.total_sentences(), 1);
    }

    #[test]
    fn raw_payload_checks() {
        assert_eq!(no_results_in_value(&json!({ "sentences": [] })), Ok(true));
        assert_eq!(
            no_results_in_value(&json!({ "sentences": [{ "sentences": [] }, { "sentences": [] }] })),
            Ok(true)
        );
        assert_eq!(
            no_results_in_value(&json!({ "sentences": [{ "sentences": ["x"] }] })),
            Ok(false)
        );
    }

    #[test]
    fn raw_payload_missing_fields_are_errors() {
        assert_eq!(
            no_results_in_value(&json!({})),
            Err(ResponseShapeError::MissingField("sentences"))
        );
        assert_eq!(
            no_results_in_value(&json!({ "sentences": [{ "word": "run" }] })),
            Err(ResponseShapeError::MissingField("sentences"))
        );
        assert_eq!(
            no_results_in_value(&json!({ "sentences": "none" })),
            Err(ResponseShapeError::NotAnArray("sentences"))
        );
    }

    #[test]
    fn decodes_forms_payload() {
        let payload = json!({
            "sentences": [
                {
                    "word": "ran",
                    "pos": "VBD",
                    "sentences": [
                        { "source": "bbc", "sentence": "She ran home.", "id": "abc", "category": "news" }
                    ]
                }
            ],
            "forms": ["run", "ran"]
        });
        let response: SearchResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(response.forms, vec!["run", "ran"]);
        assert_eq!(response.sentences[0].pos_category(), PosCategory::VerbPast);
        assert_eq!(response.sentences[0].sentences[0].source.as_deref(), Some("bbc"));
        assert!(!no_results(&response));
    }

    #[test]
    fn missing_sentences_fails_to_decode() {
        let result = serde_json::from_value::<SearchResponse>(json!({ "forms": [] }));
        assert!(result.is_err());
    }
}
