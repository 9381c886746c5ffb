// src/models/batch_summary.rs
use super::PublishOutcome;
use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub published: u64,
    pub failed: u64,
    pub images_moved: u64,
    pub images_copied: u64,
    pub warnings: u64,
}

impl BatchSummary {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            published: 0,
            failed: 0,
            images_moved: 0,
            images_copied: 0,
            warnings: 0,
        }
    }

    #[must_use]
    pub fn from_outcomes(outcomes: &[PublishOutcome]) -> Self {
        let mut summary = Self::new();
        for outcome in outcomes {
            summary.record(outcome);
        }
        summary
    }

    pub fn record(&mut self, outcome: &PublishOutcome) {
        if outcome.success {
            self.published = self.published.saturating_add(1);
            self.images_moved = self
                .images_moved
                .saturating_add(as_count(outcome.images_moved.len()));
            self.images_copied = self
                .images_copied
                .saturating_add(as_count(outcome.images_copied.len()));
            self.warnings = self
                .warnings
                .saturating_add(as_count(outcome.warnings.len()));
        } else {
            self.failed = self.failed.saturating_add(1);
        }
    }

    #[inline]
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.published.saturating_add(self.failed)
    }
}

fn as_count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}
