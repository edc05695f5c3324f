//! Background analysis jobs.
//!
//! Each submission runs to completion on its own tokio task while the client polls.
//! There is no cancellation and no local timeout; a discarded job's task still
//! finishes and its result is dropped because the registry entry is gone.
//! Finished jobs that are never discarded are evicted by the retention sweep.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::analysis::analyzer::ContractAnalyzer;
use crate::analysis::models::AnalysisResult;
use crate::analysis::upload::UploadedFile;
use crate::highlight::render::{render_annotation_cards, render_missing_clauses, render_modals};
use crate::highlight::{overlay, Overlay, OverlayError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// Everything a front end needs to render a finished analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisView {
    pub analysis: AnalysisResult,
    pub overlay: Overlay,
    pub highlighted: usize,
    pub total: usize,
    pub modals_html: String,
    pub cards_html: String,
    pub missing_html: String,
}

impl AnalysisView {
    pub fn build(analysis: AnalysisResult) -> Result<Self, OverlayError> {
        let overlay = overlay(&analysis.extracted_text, &analysis.risk_clauses)?;
        let unmatched: Vec<&str> = overlay.unmatched().collect();
        if !unmatched.is_empty() {
            warn!(
                "{} of {} clause(s) not found in the document: {:?}",
                unmatched.len(),
                analysis.risk_clauses.len(),
                unmatched
            );
        }
        Ok(Self {
            highlighted: overlay.highlighted_count(),
            total: analysis.risk_clauses.len(),
            modals_html: render_modals(&overlay.details),
            cards_html: render_annotation_cards(&analysis.risk_clauses),
            missing_html: render_missing_clauses(&analysis.missing_clauses),
            overlay,
            analysis,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisJob {
    pub id: Uuid,
    pub status: JobStatus,
    pub backend: &'static str,
    pub file_count: usize,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub result: Option<AnalysisView>,
    pub error: Option<String>,
    /// Monotonic finish time the retention sweep measures against.
    #[serde(skip)]
    finished_instant: Option<Instant>,
}

/// In-memory job table shared by the handlers and the worker tasks.
#[derive(Clone, Default)]
pub struct JobRegistry {
    jobs: Arc<RwLock<HashMap<Uuid, AnalysisJob>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: Uuid) -> Option<AnalysisJob> {
        self.jobs.read().await.get(&id).cloned()
    }

    /// Removes the job. Returns false if it did not exist.
    pub async fn discard(&self, id: Uuid) -> bool {
        self.jobs.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    /// Drops completed or failed jobs that finished at least `retention` ago.
    /// Pending and running jobs are never evicted. Returns how many were removed.
    pub async fn evict_expired(&self, retention: Duration) -> usize {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|_, job| {
            job.finished_instant
                .map_or(true, |finished| finished.elapsed() < retention)
        });
        before - jobs.len()
    }

    async fn insert(&self, job: AnalysisJob) {
        self.jobs.write().await.insert(job.id, job);
    }

    /// Applies `f` to the job if it still exists.
    async fn update(&self, id: Uuid, f: impl FnOnce(&mut AnalysisJob)) -> bool {
        match self.jobs.write().await.get_mut(&id) {
            Some(job) => {
                f(job);
                true
            }
            None => false,
        }
    }
}

/// Registers a pending job and starts the analysis on a background task.
pub async fn spawn_analysis(
    registry: &JobRegistry,
    analyzer: Arc<dyn ContractAnalyzer>,
    files: Vec<UploadedFile>,
) -> Uuid {
    let id = Uuid::new_v4();
    registry
        .insert(AnalysisJob {
            id,
            status: JobStatus::Pending,
            backend: analyzer.backend(),
            file_count: files.len(),
            created_at: Utc::now(),
            finished_at: None,
            result: None,
            error: None,
            finished_instant: None,
        })
        .await;

    let registry = registry.clone();
    tokio::spawn(async move {
        registry
            .update(id, |job| job.status = JobStatus::Running)
            .await;

        let outcome = match analyzer.analyze(&files).await {
            Ok(analysis) => AnalysisView::build(analysis).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        let still_registered = registry
            .update(id, |job| {
                job.finished_at = Some(Utc::now());
                job.finished_instant = Some(Instant::now());
                match outcome {
                    Ok(view) => {
                        job.status = JobStatus::Completed;
                        job.result = Some(view);
                    }
                    Err(message) => {
                        error!("Analysis job {id} failed: {message}");
                        job.status = JobStatus::Failed;
                        job.error = Some(message);
                    }
                }
            })
            .await;

        if still_registered {
            info!("Analysis job {id} finished");
        } else {
            info!("Analysis job {id} finished after being discarded; result dropped");
        }
    });

    id
}

/// Default sweep interval: once per minute.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Spawns the periodic sweep that evicts finished jobs older than `retention`.
///
/// Abort the returned handle to stop it.
pub fn spawn_job_cleanup_task(
    registry: JobRegistry,
    retention: Duration,
    sweep_interval: Option<Duration>,
) -> tokio::task::JoinHandle<()> {
    let interval = sweep_interval.unwrap_or(Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS));

    info!(
        retention_secs = retention.as_secs(),
        interval_secs = interval.as_secs(),
        "Starting analysis job cleanup task"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // Don't run immediately on startup
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = registry.evict_expired(retention).await;
            if removed > 0 {
                info!(removed_count = removed, "Evicted expired analysis jobs");
            } else {
                debug!("No analysis jobs to evict");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Notify;

    use crate::analysis::analyzer::DemoAnalyzer;
    use crate::errors::AppError;

    struct FailingAnalyzer;

    #[async_trait]
    impl ContractAnalyzer for FailingAnalyzer {
        async fn analyze(&self, _files: &[UploadedFile]) -> Result<AnalysisResult, AppError> {
            Err(AppError::Llm("quota exceeded".to_string()))
        }

        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    struct GatedAnalyzer {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl ContractAnalyzer for GatedAnalyzer {
        async fn analyze(&self, _files: &[UploadedFile]) -> Result<AnalysisResult, AppError> {
            self.gate.notified().await;
            Ok(crate::analysis::demo::demo_result())
        }

        fn backend(&self) -> &'static str {
            "gated"
        }
    }

    async fn wait_until_finished(registry: &JobRegistry, id: Uuid) -> AnalysisJob {
        for _ in 0..200 {
            if let Some(job) = registry.get(id).await {
                if matches!(job.status, JobStatus::Completed | JobStatus::Failed) {
                    return job;
                }
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("job {id} did not finish");
    }

    #[tokio::test]
    async fn test_demo_job_completes_with_overlay() {
        let registry = JobRegistry::new();
        let id = spawn_analysis(&registry, Arc::new(DemoAnalyzer), vec![]).await;

        let job = wait_until_finished(&registry, id).await;
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.backend, "demo");
        let view = job.result.unwrap();
        assert_eq!(view.total, 5);
        assert_eq!(view.highlighted, 5);
        assert!(view.cards_html.contains("annotation-card"));
        assert!(job.finished_at.is_some());
    }

    #[tokio::test]
    async fn test_failed_job_keeps_error_message() {
        let registry = JobRegistry::new();
        let id = spawn_analysis(&registry, Arc::new(FailingAnalyzer), vec![]).await;

        let job = wait_until_finished(&registry, id).await;
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.error.unwrap().contains("quota exceeded"));
        assert!(job.result.is_none());
    }

    #[tokio::test]
    async fn test_discarded_job_result_is_dropped() {
        let registry = JobRegistry::new();
        let gate = Arc::new(Notify::new());
        let analyzer = Arc::new(GatedAnalyzer { gate: gate.clone() });
        let id = spawn_analysis(&registry, analyzer, vec![]).await;

        assert!(registry.discard(id).await);
        gate.notify_one();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(registry.get(id).await.is_none());
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn test_discard_unknown_job() {
        assert!(!JobRegistry::new().discard(Uuid::new_v4()).await);
    }

    #[tokio::test]
    async fn test_evict_expired_keeps_unfinished_jobs() {
        let registry = JobRegistry::new();
        let done = spawn_analysis(&registry, Arc::new(DemoAnalyzer), vec![]).await;
        wait_until_finished(&registry, done).await;

        let gate = Arc::new(Notify::new());
        let running = spawn_analysis(&registry, Arc::new(GatedAnalyzer { gate: gate.clone() }), vec![]).await;

        assert_eq!(registry.evict_expired(Duration::ZERO).await, 1);
        assert!(registry.get(done).await.is_none());
        assert!(registry.get(running).await.is_some());
        gate.notify_one();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_task_evicts_after_retention() {
        let registry = JobRegistry::new();
        let mut ids = Vec::new();
        for _ in 0..20 {
            ids.push(spawn_analysis(&registry, Arc::new(DemoAnalyzer), vec![]).await);
        }
        for id in &ids {
            wait_until_finished(&registry, *id).await;
        }

        let sweeper = spawn_job_cleanup_task(
            registry.clone(),
            Duration::from_secs(600),
            Some(Duration::from_secs(60)),
        );

        tokio::time::sleep(Duration::from_secs(90)).await;
        assert_eq!(registry.len().await, 20);

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(registry.len().await, 0);

        sweeper.abort();
    }

    #[test]
    fn test_view_counts_unmatched_clauses() {
        let mut analysis = crate::analysis::demo::demo_result();
        analysis.risk_clauses[0].original_text = "모델이 바꿔 쓴 문장".to_string();
        let view = AnalysisView::build(analysis).unwrap();
        assert_eq!(view.total, 5);
        assert_eq!(view.highlighted, 4);
    }
}
