//! Per-notification dispatch report with non-fatal fault collection.

use crate::errors::HubError;

/// Result of one `notify` pass.
///
/// Listener faults are contained, so a pass that hit faults still returns
/// `Ok(report)`; inspect `faults` to see what went wrong.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Listeners actually called, faulted ones included.
    pub invoked: usize,
    /// One-shot listeners in the snapshot that a nested pass had already fired.
    pub skipped: usize,
    /// Faults re-surfaced through the error event.
    pub rerouted: usize,
    /// Faults contained during the pass, in the order they occurred.
    pub faults: Vec<HubError>,
}

impl DispatchReport {
    /// Add a contained fault to the report.
    pub fn add_fault(&mut self, fault: HubError) {
        self.faults.push(fault);
    }

    /// Returns true if no listener faulted.
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }

    pub fn fault_count(&self) -> usize {
        self.faults.len()
    }

    /// Convert into a plain `Result`, failing with the first fault.
    /// Returns the number of listeners invoked on success.
    pub fn into_result(mut self) -> Result<usize, HubError> {
        if self.faults.is_empty() {
            Ok(self.invoked)
        } else {
            Err(self.faults.swap_remove(0))
        }
    }

    /// Fold a nested pass (error rerouting) into this one.
    pub(crate) fn absorb(&mut self, nested: DispatchReport) {
        self.skipped += nested.skipped;
        self.faults.extend(nested.faults);
    }
}
