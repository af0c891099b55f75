//! The replaceable backend behind the answer orchestrator: a driver trait,
//! round-robin credential rotation, and a cascading model-size fallback
//! with bounded exponential backoff — matching the host's scheduler-level
//! retry policy, simplified from a priority queue to straight
//! retry-then-cascade.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::config::defaults::{GENERATOR_BACKOFF_MAX_SECS as MAX_BACKOFF_SECS, GENERATOR_BACKOFF_MIN_SECS as MIN_BACKOFF_SECS, GENERATOR_MAX_RETRIES as RETRIES_PER_MODEL};
use crate::error::RagError;

/// Credential pool for the generator driver: `ELYX_GENERATOR_KEYS`
/// (comma-separated), or a single placeholder if unset — the template
/// driver never actually authenticates against anything.
fn credentials_from_env() -> Vec<String> {
    parse_credential_keys(std::env::var("ELYX_GENERATOR_KEYS").ok().as_deref())
}

fn parse_credential_keys(raw: Option<&str>) -> Vec<String> {
    let keys: Vec<String> = raw.unwrap_or_default().split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect();
    if keys.is_empty() {
        vec!["local".to_string()]
    } else {
        keys
    }
}

fn backoff_duration(attempt: u32) -> Duration {
    let secs = MIN_BACKOFF_SECS.saturating_mul(1u64 << attempt).min(MAX_BACKOFF_SECS);
    Duration::from_secs(secs)
}

/// One failed call to the underlying generator. Always treated as
/// retryable by [`Generator::complete`] — permanent failures just exhaust
/// their retry budget faster.
#[derive(Debug, thiserror::Error)]
#[error("generator call failed: {0}")]
pub struct GeneratorCallError(pub String);

/// The seam an external LLM backend plugs into. `model` and `credential`
/// are passed through on every call so a real implementation can route to
/// the right endpoint and auth.
#[async_trait]
pub trait GeneratorDriver: Send + Sync {
    async fn generate(&self, model: &str, credential: &str, prompt: &str) -> Result<String, GeneratorCallError>;
}

/// A template-only default driver: no network call, no model weights.
/// Produces a short, always-successful advisory string from the prompt's
/// tail so the orchestrator's prompt-assembly and citation logic can be
/// exercised end-to-end without an external dependency.
pub struct TemplateDriver;

#[async_trait]
impl GeneratorDriver for TemplateDriver {
    async fn generate(&self, _model: &str, _credential: &str, prompt: &str) -> Result<String, GeneratorCallError> {
        let question = prompt.rsplit("QUESTION:").next().unwrap_or(prompt).trim();
        Ok(format!("Based on the facts and context available: {question}"))
    }
}

/// Cascading model list (largest/primary first) plus a rotating pool of
/// credentials, wrapping a [`GeneratorDriver`].
pub struct Generator {
    driver: Box<dyn GeneratorDriver>,
    models: Vec<String>,
    credentials: Vec<String>,
    next_credential: AtomicUsize,
}

impl Generator {
    pub fn new(driver: Box<dyn GeneratorDriver>, models: Vec<String>, credentials: Vec<String>) -> Self {
        Self { driver, models, credentials, next_credential: AtomicUsize::new(0) }
    }

    /// A driver with a single template model and a single placeholder
    /// credential — enough to exercise the full retry/cascade shape.
    pub fn with_template_default() -> Self {
        Self::new(Box::new(TemplateDriver), vec!["primary".to_string(), "fallback".to_string()], credentials_from_env())
    }

    fn rotate_credential(&self) -> &str {
        if self.credentials.is_empty() {
            return "";
        }
        let idx = self.next_credential.fetch_add(1, Ordering::Relaxed) % self.credentials.len();
        &self.credentials[idx]
    }

    /// Try every model in order, each with its own bounded retry budget,
    /// rotating credentials on every attempt. Surfaces `GeneratorExhausted`
    /// only once every model and every retry has failed.
    pub async fn complete(&self, prompt: &str) -> Result<String, RagError> {
        for model in &self.models {
            for attempt in 0..RETRIES_PER_MODEL {
                let credential = self.rotate_credential();
                match self.driver.generate(model, credential, prompt).await {
                    Ok(text) => return Ok(text),
                    Err(e) => {
                        warn!(model = %model, attempt, error = %e, "generator call failed");
                        if attempt + 1 < RETRIES_PER_MODEL {
                            tokio::time::sleep(backoff_duration(attempt)).await;
                        }
                    }
                }
            }
        }
        Err(RagError::GeneratorExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysFails;
    #[async_trait]
    impl GeneratorDriver for AlwaysFails {
        async fn generate(&self, _model: &str, _credential: &str, _prompt: &str) -> Result<String, GeneratorCallError> {
            Err(GeneratorCallError("simulated outage".to_string()))
        }
    }

    struct FailsThenSucceeds {
        failures_left: AtomicUsize,
    }
    #[async_trait]
    impl GeneratorDriver for FailsThenSucceeds {
        async fn generate(&self, _model: &str, _credential: &str, _prompt: &str) -> Result<String, GeneratorCallError> {
            if self.failures_left.fetch_sub(1, Ordering::Relaxed) > 0 {
                Err(GeneratorCallError("transient".to_string()))
            } else {
                Ok("recovered".to_string())
            }
        }
    }

    #[tokio::test]
    async fn template_driver_always_succeeds() {
        let gen = Generator::with_template_default();
        let out = gen.complete("PERSONA...\nQUESTION: how is my sleep?").await.expect("template driver never fails");
        assert!(out.contains("how is my sleep?"));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_after_every_model_and_retry_fails() {
        let gen = Generator::new(Box::new(AlwaysFails), vec!["big".to_string(), "small".to_string()], vec!["k1".to_string()]);
        let err = gen.complete("anything").await;
        assert!(matches!(err, Err(RagError::GeneratorExhausted)));
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_within_retry_budget() {
        let gen = Generator::new(Box::new(FailsThenSucceeds { failures_left: AtomicUsize::new(2) }), vec!["big".to_string()], vec!["k1".to_string()]);
        let out = gen.complete("anything").await.expect("should recover on third attempt");
        assert_eq!(out, "recovered");
    }

    #[test]
    fn credential_rotation_is_round_robin() {
        let gen = Generator::new(Box::new(TemplateDriver), vec!["m".to_string()], vec!["a".to_string(), "b".to_string()]);
        assert_eq!(gen.rotate_credential(), "a");
        assert_eq!(gen.rotate_credential(), "b");
        assert_eq!(gen.rotate_credential(), "a");
    }

    #[test]
    fn credential_keys_split_on_comma_and_trim() {
        assert_eq!(parse_credential_keys(Some("key-a, key-b ,key-c")), vec!["key-a", "key-b", "key-c"]);
    }

    #[test]
    fn missing_or_empty_credential_env_falls_back_to_placeholder() {
        assert_eq!(parse_credential_keys(None), vec!["local".to_string()]);
        assert_eq!(parse_credential_keys(Some("")), vec!["local".to_string()]);
        assert_eq!(parse_credential_keys(Some(" , ")), vec!["local".to_string()]);
    }
}
