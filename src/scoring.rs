//! Client for the external point-assignment service: free-text task
//! descriptions in, one integer point value per task (1..=10) out.
//!
//! The call is synchronous and all-or-nothing. Any failure (network,
//! malformed payload, length mismatch, out-of-range value) surfaces as a
//! single [`ScoringError`] and no tasks are added.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::ScoringConfig;

pub const MIN_TASK_POINTS: i64 = 1;
pub const MAX_TASK_POINTS: i64 = 10;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("No tasks to score (input was empty)")]
    EmptyInput,
    #[error("API key not set (expected in environment variable {0})")]
    MissingApiKey(String),
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Service returned an unusable response: {0}")]
    MalformedResponse(String),
    #[error("Service scored {got} tasks but {expected} were sent")]
    LengthMismatch { expected: usize, got: usize },
    #[error("Service returned an out-of-range point value: {0}")]
    PointsOutOfRange(i64),
}

/// A task description paired with its service-assigned point value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredTask {
    pub name: String,
    pub points: i64,
}

// Request/response shapes for the generateContent endpoint.

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

pub struct ScoringClient {
    url: String,
    api_key: String,
    http: reqwest::blocking::Client,
}

impl ScoringClient {
    /// Build a client from config, reading the API key from the configured
    /// environment variable.
    pub fn from_config(config: &ScoringConfig) -> Result<Self, ScoringError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| ScoringError::MissingApiKey(config.api_key_env.clone()))?;
        let url = format!("{}/{}:generateContent", config.endpoint, config.model);
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { url, api_key, http })
    }

    /// Score a block of free text, one task per line. Returns the tasks in
    /// input order, each with a point value in 1..=10.
    pub fn assign_points(&self, raw: &str) -> Result<Vec<ScoredTask>, ScoringError> {
        let tasks = split_tasks(raw);
        if tasks.is_empty() {
            return Err(ScoringError::EmptyInput);
        }

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(&tasks),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        log::debug!("Scoring {} tasks via {}", tasks.len(), self.url);
        let response: GenerateResponse = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        let text = response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| ScoringError::MalformedResponse("no candidates".to_string()))?;

        let points = parse_points_text(text)?;
        pair_tasks_with_points(tasks, &points)
    }
}

/// Split raw input into task descriptions: one per line, trimmed, blanks
/// dropped.
pub fn split_tasks(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

fn build_prompt(tasks: &[String]) -> String {
    let mut prompt = String::from(
        "You are a productivity expert who assigns point values to tasks based on \
         their complexity and estimated time to complete.\n\n\
         For each task below, assign a point value between 1 and 10, where 1 is a \
         very simple and quick task and 10 is a very complex and time-consuming \
         task.\n\nTasks:\n",
    );
    for task in tasks {
        prompt.push_str("- ");
        prompt.push_str(task);
        prompt.push('\n');
    }
    prompt.push_str(
        "\nRespond with only a JSON array of integers, one per task, in order. \
         Example: [3, 7, 2, 9, 5]\n",
    );
    prompt
}

/// Parse the model's reply as a JSON array of integers. Tolerates a
/// markdown code fence around the array, which some models emit even when
/// asked for bare JSON.
pub fn parse_points_text(text: &str) -> Result<Vec<i64>, ScoringError> {
    let trimmed = text.trim();
    let stripped = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .map(|s| s.trim())
        .unwrap_or(trimmed);
    serde_json::from_str(stripped).map_err(|e| ScoringError::MalformedResponse(e.to_string()))
}

/// Zip task names with their point values, validating count and range.
pub fn pair_tasks_with_points(
    tasks: Vec<String>,
    points: &[i64],
) -> Result<Vec<ScoredTask>, ScoringError> {
    if points.len() != tasks.len() {
        return Err(ScoringError::LengthMismatch {
            expected: tasks.len(),
            got: points.len(),
        });
    }
    if let Some(&bad) = points
        .iter()
        .find(|p| !(MIN_TASK_POINTS..=MAX_TASK_POINTS).contains(*p))
    {
        return Err(ScoringError::PointsOutOfRange(bad));
    }

    Ok(tasks
        .into_iter()
        .zip(points.iter())
        .map(|(name, &points)| ScoredTask { name, points })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_tasks_trims_and_drops_blank_lines() {
        let tasks = split_tasks("  wash car  \n\n   \nwrite report\n");
        assert_eq!(tasks, vec!["wash car".to_string(), "write report".to_string()]);
    }

    #[test]
    fn pairing_preserves_input_order() {
        let tasks = vec!["wash car".to_string(), "write report".to_string()];
        let scored = pair_tasks_with_points(tasks, &[3, 7]).unwrap();
        assert_eq!(
            scored,
            vec![
                ScoredTask { name: "wash car".to_string(), points: 3 },
                ScoredTask { name: "write report".to_string(), points: 7 },
            ]
        );
    }

    #[test]
    fn length_mismatch_is_a_service_failure() {
        let tasks = vec!["a".to_string(), "b".to_string()];
        let err = pair_tasks_with_points(tasks, &[5]).unwrap_err();
        assert!(matches!(err, ScoringError::LengthMismatch { expected: 2, got: 1 }));
    }

    #[test]
    fn out_of_range_points_are_rejected() {
        let tasks = vec!["a".to_string(), "b".to_string()];
        let err = pair_tasks_with_points(tasks, &[5, 11]).unwrap_err();
        assert!(matches!(err, ScoringError::PointsOutOfRange(11)));

        let tasks = vec!["a".to_string()];
        let err = pair_tasks_with_points(tasks, &[0]).unwrap_err();
        assert!(matches!(err, ScoringError::PointsOutOfRange(0)));
    }

    #[test]
    fn parses_bare_json_array() {
        assert_eq!(parse_points_text("[3, 7, 2]").unwrap(), vec![3, 7, 2]);
    }

    #[test]
    fn parses_fenced_json_array() {
        assert_eq!(parse_points_text("```json\n[1, 10]\n```").unwrap(), vec![1, 10]);
        assert_eq!(parse_points_text("```\n[4]\n```").unwrap(), vec![4]);
    }

    #[test]
    fn rejects_non_array_payload() {
        assert!(parse_points_text("three and seven").is_err());
        assert!(parse_points_text("{\"points\": [3]}").is_err());
    }
}
