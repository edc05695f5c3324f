use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::highlight::OverlayError;

/// Risk level assigned to a flagged clause.
///
/// Ordering (`High > Medium > Low`) only decides rendering precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            other => Err(format!(
                "unknown risk_level '{other}' (expected high, medium or low)"
            )),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One clause flagged by the analysis producer.
///
/// `original_text` is what the model claims appears verbatim in the extracted text.
/// It may be paraphrased or empty; the overlay engine treats that as "not located".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskClause {
    pub clause_id: String,
    pub original_text: String,
    pub risk_level: Severity,
    pub issue_summary: String,
    pub legal_reference: String,
    pub legal_article: String,
    pub simple_explanation: String,
    pub negotiation_script: String,
}

/// Full analysis of one submitted contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub extracted_text: String,
    pub risk_clauses: Vec<RiskClause>,
    pub overall_risk_level: String,
    pub summary: String,
    pub missing_clauses: Vec<String>,
}

impl AnalysisResult {
    /// Checks the producer contract that serde alone cannot: clause ids must be
    /// present and unique so spans and detail records can be correlated.
    pub fn validate(&self) -> Result<(), OverlayError> {
        validate_clauses(&self.risk_clauses)
    }
}

pub fn validate_clauses(clauses: &[RiskClause]) -> Result<(), OverlayError> {
    let mut seen = HashSet::new();
    for (index, clause) in clauses.iter().enumerate() {
        if clause.clause_id.trim().is_empty() {
            return Err(OverlayError::MalformedClause {
                index,
                reason: "clause_id is empty".to_string(),
            });
        }
        if !seen.insert(clause.clause_id.as_str()) {
            return Err(OverlayError::MalformedClause {
                index,
                reason: format!("duplicate clause_id '{}'", clause.clause_id),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn make_clause(id: &str, text: &str, severity: Severity) -> RiskClause {
    RiskClause {
        clause_id: id.to_string(),
        original_text: text.to_string(),
        risk_level: severity,
        issue_summary: format!("{id} summary"),
        legal_reference: "근로기준법 제54조".to_string(),
        legal_article: "휴게시간을 주어야 한다.".to_string(),
        simple_explanation: format!("{id} explanation"),
        negotiation_script: format!("{id} script"),
    }
}
