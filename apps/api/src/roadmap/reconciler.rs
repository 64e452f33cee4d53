//! Resource Reconciler: verifies every resource link and heals broken ones.
//!
//! Milestones are walked in order. Within a milestone every resource is
//! reconciled concurrently, each task owning its own `&mut` slot, so the
//! resource list keeps its length and order. How many probes run at once is
//! bounded by the checker handed in (see `BoundedChecker`), not here.
//!
//! Per-resource fallback chain, first success wins:
//! primary url → listed alternatives (in order) → finder lookup → sentinel.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info};

use crate::roadmap::finder::AlternativeFinder;
use crate::roadmap::link_validator::LinkChecker;
use crate::roadmap::models::{ResourceDraft, RoadmapDraft, MAX_ALTERNATIVES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Primary url was reachable; resource untouched.
    Kept,
    /// Replaced by one of the listed alternatives.
    Alternative,
    /// Replaced by a finder lookup.
    Replaced,
    /// Nothing reachable; url set to the sentinel.
    Unavailable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub kept: usize,
    pub alternatives: usize,
    pub replaced: usize,
    pub unavailable: usize,
}

impl ReconcileReport {
    fn record(&mut self, outcome: ReconcileOutcome) {
        match outcome {
            ReconcileOutcome::Kept => self.kept += 1,
            ReconcileOutcome::Alternative => self.alternatives += 1,
            ReconcileOutcome::Replaced => self.replaced += 1,
            ReconcileOutcome::Unavailable => self.unavailable += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.kept + self.alternatives + self.replaced + self.unavailable
    }
}

#[derive(Clone)]
pub struct Reconciler {
    checker: Arc<dyn LinkChecker>,
    finder: AlternativeFinder,
}

impl Reconciler {
    pub fn new(checker: Arc<dyn LinkChecker>, finder: AlternativeFinder) -> Self {
        Self { checker, finder }
    }

    /// Reconciles every resource in place. Never fails: unreachable resources
    /// degrade to the sentinel url instead.
    pub async fn reconcile(&self, roadmap: &mut RoadmapDraft) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        for phase in &mut roadmap.phases {
            for milestone in &mut phase.milestones {
                let outcomes = join_all(
                    milestone
                        .resources
                        .iter_mut()
                        .map(|resource| self.reconcile_resource(resource)),
                )
                .await;

                for outcome in outcomes {
                    report.record(outcome);
                }
                debug!(
                    "Reconciled milestone '{}' ({} resources)",
                    milestone.title,
                    milestone.resources.len()
                );
            }
        }

        info!(
            "Reconciled {} resources: kept={}, alternatives={}, replaced={}, unavailable={}",
            report.total(),
            report.kept,
            report.alternatives,
            report.replaced,
            report.unavailable
        );
        report
    }

    async fn reconcile_resource(&self, resource: &mut ResourceDraft) -> ReconcileOutcome {
        if self.checker.is_reachable(&resource.url).await {
            return ReconcileOutcome::Kept;
        }

        let mut working = None;
        for (i, alt) in resource
            .alternative_resources
            .iter()
            .take(MAX_ALTERNATIVES)
            .enumerate()
        {
            if self.checker.is_reachable(&alt.url).await {
                working = Some(i);
                break;
            }
        }
        if let Some(i) = working {
            let alt = resource.alternative_resources.remove(i);
            debug!("'{}' replaced by listed alternative {}", resource.title, alt.url);
            resource.replace_with(alt);
            return ReconcileOutcome::Alternative;
        }

        if let Some(found) = self.finder.find_alternative(resource).await {
            debug!("'{}' replaced by lookup {}", resource.title, found.url);
            resource.replace_with(found);
            return ReconcileOutcome::Replaced;
        }

        debug!("'{}' has no working link, marking unavailable", resource.title);
        resource.mark_unavailable();
        ReconcileOutcome::Unavailable
    }
}
