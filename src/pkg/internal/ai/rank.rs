use std::sync::Arc;

use ai::clients::openai::Client;
use serde_json::Value;
use standard_error::{Interpolate, StandardError};

use super::generate::GenerateOps;
use super::spec::Evaluation;
use crate::prelude::Result;

#[async_trait::async_trait]
pub trait RankOps {
    async fn derive_criteria(&self, job_description: &str) -> Result<Vec<String>>;
    async fn score_resume(&self, resume_text: &str, criteria: &[String]) -> Evaluation;
}

#[async_trait::async_trait]
impl RankOps for Arc<Client> {
    async fn derive_criteria(&self, job_description: &str) -> Result<Vec<String>> {
        let prompt = format!(
            r#"
Extract the key ranking criteria from the following job description:

{}

Return a JSON array of key ranking criteria such as skills, experience, and certifications.
Return ONLY the JSON array, no markdown code blocks or explanations.
"#,
            job_description
        );
        let value = self.complete(&prompt).await?;
        criteria_from_value(value)
    }

    async fn score_resume(&self, resume_text: &str, criteria: &[String]) -> Evaluation {
        match request_scores(self, resume_text, criteria).await {
            Ok(evaluation) => evaluation,
            Err(err) => {
                tracing::error!("scoring failed, substituting default record: {}", err);
                Evaluation::unscored()
            }
        }
    }
}

async fn request_scores(
    client: &Arc<Client>,
    resume_text: &str,
    criteria: &[String],
) -> Result<Evaluation> {
    let criteria_json = serde_json::to_string(criteria)
        .map_err(|e| StandardError::new("ERR-SCORE-001").interpolate_err(e.to_string()))?;
    let prompt = format!(
        r#"
Evaluate the following resume based on these ranking criteria:

{}

Resume:
{}

Return a JSON object with the candidate's name and scores for each criterion on a scale of 0 to 5.
Example:
{{
  "Candidate Name": "John Doe",
  "scores": {{
    "Experience": 4,
    "Certifications": 5,
    "Python": 5
  }}
}}

Return ONLY the JSON object, no markdown code blocks or explanations.
"#,
        criteria_json, resume_text
    );
    let value = client.complete(&prompt).await?;
    evaluation_from_value(value)
}

/// The criteria payload must be a JSON array of strings; anything else is a
/// shape failure.
pub fn criteria_from_value(value: Value) -> Result<Vec<String>> {
    let items = value.as_array().ok_or_else(|| {
        StandardError::new("ERR-CRITERIA-001").interpolate_err("expected a JSON array".into())
    })?;
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(StandardError::new("ERR-CRITERIA-001")
                .interpolate_err(format!("expected a string, got {}", other))),
        })
        .collect()
}

/// The evaluation payload must carry a candidate name and an integer score
/// map; scores outside the 0-5 scale are treated as a shape failure.
pub fn evaluation_from_value(value: Value) -> Result<Evaluation> {
    let evaluation: Evaluation = serde_json::from_value(value)
        .map_err(|e| StandardError::new("ERR-SCORE-001").interpolate_err(e.to_string()))?;
    for (criterion, score) in &evaluation.scores {
        if !(0..=5).contains(score) {
            return Err(StandardError::new("ERR-SCORE-001")
                .interpolate_err(format!("score {} for {} is out of range", score, criterion)));
        }
    }
    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_criteria_array_of_strings_accepted() {
        let value = json!(["Experience", "Certifications", "Python"]);
        let criteria = criteria_from_value(value).unwrap();
        assert_eq!(criteria, vec!["Experience", "Certifications", "Python"]);
    }

    #[test]
    fn test_criteria_object_rejected() {
        let value = json!({"criteria": ["Python"]});
        assert!(criteria_from_value(value).is_err());
    }

    #[test]
    fn test_criteria_mixed_array_rejected() {
        let value = json!(["Python", 5]);
        assert!(criteria_from_value(value).is_err());
    }

    #[test]
    fn test_evaluation_shape_accepted() {
        let value = json!({
            "Candidate Name": "John Doe",
            "scores": {"Python": 5, "SQL": 4}
        });
        let evaluation = evaluation_from_value(value).unwrap();
        assert_eq!(evaluation.candidate_name, "John Doe");
        assert_eq!(evaluation.scores.get("Python"), Some(&5));
        assert_eq!(evaluation.scores.get("SQL"), Some(&4));
    }

    #[test]
    fn test_evaluation_missing_name_rejected() {
        let value = json!({"scores": {"Python": 5}});
        assert!(evaluation_from_value(value).is_err());
    }

    #[test]
    fn test_evaluation_non_integer_scores_rejected() {
        let value = json!({
            "Candidate Name": "John Doe",
            "scores": {"Python": "five"}
        });
        assert!(evaluation_from_value(value).is_err());
    }

    #[test]
    fn test_evaluation_out_of_scale_score_rejected() {
        let value = json!({
            "Candidate Name": "John Doe",
            "scores": {"Python": 11}
        });
        assert!(evaluation_from_value(value).is_err());
    }
}
