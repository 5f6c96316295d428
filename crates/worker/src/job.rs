use chrono::Utc;
use engine::Rates;
use tracing::Instrument;
use uuid::Uuid;

use crate::retry::{RetryError, RetryPolicy, run_with_retry};
use crate::store::{DEFAULT_CATEGORY, artifact_key};
use crate::{ArtifactLocator, ArtifactStore, AttemptError, CostEstimateSource, JobError};

/// Generates the xlsx report of a cost estimate and records where it was
/// stored.
pub struct ReportJob<S, A> {
    source: S,
    store: A,
    rates: Rates,
    policy: RetryPolicy,
    category: String,
}

impl<S, A> ReportJob<S, A>
where
    S: CostEstimateSource,
    A: ArtifactStore,
{
    /// Job with the default rates, retry policy and artifact category.
    pub fn new(source: S, store: A) -> Self {
        Self {
            source,
            store,
            rates: Rates::default(),
            policy: RetryPolicy::default(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    pub fn rates(mut self, rates: Rates) -> Self {
        self.rates = rates;
        self
    }

    pub fn policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Folder the artifacts are stored under.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn store(&self) -> &A {
        &self.store
    }

    /// Loads, validates, renders and stores the report of `id`.
    ///
    /// Returns `Ok(None)` when the estimate does not exist. A validation
    /// failure is returned at once; any other failure is retried according
    /// to the policy.
    pub async fn generate_report(&self, id: Uuid) -> Result<Option<ArtifactLocator>, JobError> {
        let span = tracing::info_span!("generate_report", estimate_id = %id);
        async {
            match run_with_retry(&self.policy, |attempt| self.attempt(id, attempt)).await {
                Ok(locator) => {
                    tracing::info!(%locator, "excel artifact created");
                    Ok(Some(locator))
                }
                Err(RetryError::Terminal {
                    error: AttemptError::NotFound(_),
                    ..
                }) => {
                    tracing::error!("cost estimate not found");
                    Ok(None)
                }
                Err(RetryError::Terminal {
                    error: AttemptError::Invalid(err),
                    ..
                }) => {
                    tracing::error!("cost estimate rejected: {err}");
                    Err(JobError::Invalid(err))
                }
                Err(RetryError::Terminal { attempt, error }) => {
                    tracing::error!(attempt, "report generation aborted: {error}");
                    Err(JobError::Exhausted {
                        attempts: attempt,
                        last: error,
                    })
                }
                Err(RetryError::Exhausted { attempts, last }) => {
                    tracing::error!(attempts, "report generation failed: {last}");
                    Err(JobError::Exhausted { attempts, last })
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn attempt(&self, id: Uuid, attempt: u32) -> Result<ArtifactLocator, AttemptError> {
        tracing::debug!(attempt, "loading cost estimate");
        let estimate = self
            .source
            .load(id)
            .await?
            .ok_or(AttemptError::NotFound(id))?;
        engine::validate(&estimate)?;

        let key = artifact_key(&self.category, Utc::now().date_naive(), &estimate.project_name);
        let rates = self.rates;
        let bytes =
            tokio::task::spawn_blocking(move || report::generate_workbook(&estimate, &rates))
                .await
                .map_err(|err| AttemptError::Panicked(err.to_string()))??;

        let locator = self.store.put(&key, bytes).await?;
        self.source.attach_artifact(id, &locator).await?;
        Ok(locator)
    }
}
