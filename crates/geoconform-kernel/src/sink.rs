//! Destinations for failures and warnings.

use crate::report::{ConformanceReport, Failure, Warning};

/// Receives every failure and warning raised during a walk. A failure ends
/// only the check that raised it; the walk goes on.
pub trait Sink {
    fn record_failure(&mut self, failure: Failure);
    fn record_warning(&mut self, warning: Warning);
}

/// Collects records in walk order and turns them into a report.
#[derive(Debug, Default)]
pub struct ReportSink {
    failures: Vec<Failure>,
    warnings: Vec<Warning>,
}

impl ReportSink {
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_report(self) -> ConformanceReport {
        ConformanceReport::new(self.failures, self.warnings)
    }
}

impl Sink for ReportSink {
    fn record_failure(&mut self, failure: Failure) {
        self.failures.push(failure);
    }

    fn record_warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }
}
