use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Criterion set used when a resume could not be scored. Intentionally a
/// fixed list, not the criteria supplied with the request.
pub const DEFAULT_CRITERIA: [&str; 8] = [
    "Experience",
    "Certifications",
    "Python",
    "SQL",
    "Machine Learning",
    "Deep Learning",
    "NLP",
    "Gen AI",
];

/// One resume's verdict: candidate name plus per-criterion scores on a
/// 0-5 scale, as returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(rename = "Candidate Name")]
    pub candidate_name: String,
    pub scores: HashMap<String, i64>,
}

impl Evaluation {
    /// Substitute record for a resume the model failed to score.
    pub fn unscored() -> Self {
        Evaluation {
            candidate_name: "Unknown".into(),
            scores: DEFAULT_CRITERIA.iter().map(|c| (c.to_string(), 0)).collect(),
        }
    }
}
