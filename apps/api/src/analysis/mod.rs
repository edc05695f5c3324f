// Contract analysis: file intake, the pluggable analyzer, and background jobs.
// All LLM calls go through llm_client; highlighting lives in crate::highlight.

pub mod analyzer;
pub mod demo;
pub mod handlers;
pub mod jobs;
pub mod mandatory;
pub mod models;
pub mod prompts;
pub mod upload;
