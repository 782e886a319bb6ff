use standard_error::{Interpolate, StandardError};

use super::ai::spec::Evaluation;
use crate::prelude::Result;

pub const REPORT_FILENAME: &str = "evaluation_results.csv";

/// Fixed display columns; criteria outside this set never get a column of
/// their own.
pub const SCORE_COLUMNS: [&str; 8] = [
    "Experience",
    "Certifications",
    "Python",
    "SQL",
    "Machine Learning",
    "Deep Learning",
    "NLP",
    "Gen AI",
];

#[derive(Debug, Clone)]
pub struct ResultRow {
    pub candidate_name: String,
    /// Aligned with SCORE_COLUMNS; absent criteria read as 0.
    pub scores: Vec<i64>,
    /// Sum of every score in the record, displayed column or not.
    pub total_score: i64,
}

impl ResultRow {
    fn from_record(record: &Evaluation) -> Self {
        let scores = SCORE_COLUMNS
            .iter()
            .map(|column| record.scores.get(*column).copied().unwrap_or(0))
            .collect();
        let total_score = record.scores.values().sum();
        ResultRow {
            candidate_name: record.candidate_name.clone(),
            scores,
            total_score,
        }
    }
}

pub fn to_table(records: &[Evaluation]) -> Vec<ResultRow> {
    records.iter().map(ResultRow::from_record).collect()
}

/// Serialize the table in-memory: header row, then one row per record in
/// input order. An empty table yields a header-only spreadsheet.
pub fn write_csv(rows: &[ResultRow]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    let mut header: Vec<&str> = vec!["Candidate Name"];
    header.extend(SCORE_COLUMNS);
    header.push("Total Score");
    wtr.write_record(&header)
        .map_err(|e| StandardError::new("ERR-REPORT-001").interpolate_err(e.to_string()))?;
    for row in rows {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        record.push(row.candidate_name.clone());
        record.extend(row.scores.iter().map(|score| score.to_string()));
        record.push(row.total_score.to_string());
        wtr.write_record(&record)
            .map_err(|e| StandardError::new("ERR-REPORT-001").interpolate_err(e.to_string()))?;
    }
    wtr.into_inner()
        .map_err(|e| StandardError::new("ERR-REPORT-001").interpolate_err(e.to_string()))
}
