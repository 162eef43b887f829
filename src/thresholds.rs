//! Per-location attendance threshold lookup.
//!
//! Threshold policies live with the store records of the surrounding
//! application. The engine takes resolved thresholds as plain input; this
//! module does the lookup on its behalf, bounded by a timeout so a slow or
//! failing store never blocks payroll.

use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::LaborRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceThresholds, AuditWarning};

/// Warning code attached when default thresholds had to be used.
pub const WARNING_THRESHOLD_FALLBACK: &str = "THRESHOLD_FALLBACK";

/// Future returned by [`ThresholdSource::lookup`].
pub type ThresholdFuture<'a> =
    Pin<Box<dyn Future<Output = EngineResult<Option<AttendanceThresholds>>> + Send + 'a>>;

/// A source of per-store threshold policies.
///
/// `Ok(None)` means the store has no policy of its own.
pub trait ThresholdSource: Send + Sync {
    /// Looks up the policy for `store_id`.
    fn lookup<'a>(&'a self, store_id: &'a str) -> ThresholdFuture<'a>;
}

/// A [`ThresholdSource`] backed by the `thresholds.yaml` of the loaded rules.
#[derive(Debug, Clone)]
pub struct ConfigThresholdSource {
    rules: Arc<LaborRules>,
}

impl ConfigThresholdSource {
    /// Creates a source over the given rules.
    pub fn new(rules: Arc<LaborRules>) -> Self {
        Self { rules }
    }
}

impl ThresholdSource for ConfigThresholdSource {
    fn lookup<'a>(&'a self, store_id: &'a str) -> ThresholdFuture<'a> {
        Box::pin(async move { Ok(self.rules.store_thresholds(store_id)) })
    }
}

/// The thresholds to calculate with, and a warning if they are a fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedThresholds {
    /// The thresholds to apply.
    pub thresholds: AttendanceThresholds,
    /// Set when the defaults were used because the lookup did not succeed.
    pub warning: Option<AuditWarning>,
}

/// Resolves the thresholds for one calculation.
///
/// An explicit policy wins. Without one, the store's policy is looked up
/// under `timeout`. A missing store id, an unknown store, a failed lookup
/// or a timeout all fall back to the defaults with a warning.
pub async fn resolve_thresholds(
    explicit: Option<AttendanceThresholds>,
    store_id: Option<&str>,
    source: &dyn ThresholdSource,
    timeout: Duration,
) -> ResolvedThresholds {
    if let Some(thresholds) = explicit {
        return ResolvedThresholds {
            thresholds,
            warning: None,
        };
    }

    let Some(store_id) = store_id else {
        debug!("No store on employee; using default thresholds");
        return fallback("Employee has no store; default attendance thresholds applied");
    };

    let outcome = match tokio::time::timeout(timeout, source.lookup(store_id)).await {
        Ok(result) => result,
        Err(_) => Err(EngineError::ThresholdLookupFailed {
            store_id: store_id.to_string(),
            message: format!("timed out after {} ms", timeout.as_millis()),
        }),
    };

    match outcome {
        Ok(Some(thresholds)) => ResolvedThresholds {
            thresholds,
            warning: None,
        },
        Ok(None) => {
            debug!(store_id, "Store has no threshold policy; using defaults");
            fallback(format!(
                "Store '{}' has no attendance policy; default thresholds applied",
                store_id
            ))
        }
        Err(err) => {
            warn!(store_id, error = %err, "Threshold lookup failed; using defaults");
            fallback(format!("{}; default thresholds applied", err))
        }
    }
}

/// Resolves the policies of several stores at once.
///
/// Every lookup is spawned before any is awaited, so the whole set is bounded
/// by one `timeout` rather than one per store. Each store id is looked up once.
pub async fn resolve_store_thresholds(
    store_ids: BTreeSet<String>,
    source: Arc<dyn ThresholdSource>,
    timeout: Duration,
) -> HashMap<String, ResolvedThresholds> {
    let lookups: Vec<_> = store_ids
        .into_iter()
        .map(|store_id| {
            let source = Arc::clone(&source);
            let task_store_id = store_id.clone();
            let handle = tokio::spawn(async move {
                resolve_thresholds(None, Some(&task_store_id), source.as_ref(), timeout).await
            });
            (store_id, handle)
        })
        .collect();

    let mut resolved = HashMap::with_capacity(lookups.len());
    for (store_id, handle) in lookups {
        let thresholds = match handle.await {
            Ok(thresholds) => thresholds,
            Err(err) => {
                warn!(store_id = %store_id, error = %err, "Threshold lookup task aborted");
                fallback(format!(
                    "Threshold lookup for store '{}' aborted; default thresholds applied",
                    store_id
                ))
            }
        };
        resolved.insert(store_id, thresholds);
    }
    resolved
}

fn fallback(message: impl Into<String>) -> ResolvedThresholds {
    ResolvedThresholds {
        thresholds: AttendanceThresholds::default(),
        warning: Some(AuditWarning::new(
            WARNING_THRESHOLD_FALLBACK,
            message,
            "low",
        )),
    }
}
