//! Contract analyzer: pluggable producer of `AnalysisResult`.
//!
//! `GeminiAnalyzer` sends every uploaded file to the vision model in one call.
//! `DemoAnalyzer` returns a canned result and never touches the network.
//!
//! `AppState` holds an `Arc<dyn ContractAnalyzer>`, chosen at startup from
//! `ANALYZER_MODE`.

use async_trait::async_trait;
use tracing::info;

use crate::analysis::demo::demo_result;
use crate::analysis::models::AnalysisResult;
use crate::analysis::prompts::{analysis_system_prompt, analysis_user_prompt};
use crate::analysis::upload::UploadedFile;
use crate::errors::AppError;
use crate::llm_client::{GenerateRequest, LlmClient, Part, ANALYSIS_MODEL};

#[async_trait]
pub trait ContractAnalyzer: Send + Sync {
    async fn analyze(&self, files: &[UploadedFile]) -> Result<AnalysisResult, AppError>;

    /// "gemini" | "demo", surfaced in job responses.
    fn backend(&self) -> &'static str;
}

pub struct GeminiAnalyzer {
    llm: LlmClient,
}

impl GeminiAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ContractAnalyzer for GeminiAnalyzer {
    async fn analyze(&self, files: &[UploadedFile]) -> Result<AnalysisResult, AppError> {
        if files.is_empty() {
            return Err(AppError::Validation(
                "At least one contract file is required".to_string(),
            ));
        }

        let system = analysis_system_prompt();
        let mut parts: Vec<Part> = files
            .iter()
            .map(|f| Part::bytes(&f.bytes, &f.mime_type))
            .collect();
        parts.push(Part::text(analysis_user_prompt(files.len())));

        let request = GenerateRequest {
            model: ANALYSIS_MODEL,
            system: Some(&system),
            parts,
            temperature: 0.0,
            json_output: true,
        };

        info!("Analyzing {} contract file(s) with {}", files.len(), ANALYSIS_MODEL);

        let result: AnalysisResult = self
            .llm
            .generate_json(&request)
            .await
            .map_err(|e| AppError::Llm(format!("계약서 분석 중 오류가 발생했습니다: {e}")))?;

        result
            .validate()
            .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

        info!(
            "Analysis returned {} risk clause(s), overall={}",
            result.risk_clauses.len(),
            result.overall_risk_level
        );
        Ok(result)
    }

    fn backend(&self) -> &'static str {
        "gemini"
    }
}

pub struct DemoAnalyzer;

#[async_trait]
impl ContractAnalyzer for DemoAnalyzer {
    async fn analyze(&self, _files: &[UploadedFile]) -> Result<AnalysisResult, AppError> {
        Ok(demo_result())
    }

    fn backend(&self) -> &'static str {
        "demo"
    }
}
