use crate::ledger::SelectionLedger;
use wordrack_protocol::ClientRequest;

/// Debounced word verification. Ledger mutations mark a request as
/// pending; the next tick turns all pending work into a single
/// `VerifyWord` carrying the ledger version it was built against.
/// Responses for any other version are stale and must be ignored.
#[derive(Debug, Default)]
pub struct WordValidationClient {
    pending: bool,
}

impl WordValidationClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self) {
        self.pending = true;
    }

    pub fn cancel(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Build the request for the current ledger, if one is due. An empty
    /// ledger is nothing to validate and produces no request.
    pub fn flush(&mut self, ledger: &SelectionLedger) -> Option<ClientRequest> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        if ledger.is_empty() {
            return None;
        }
        Some(ClientRequest::VerifyWord {
            version: ledger.version(),
            tiles: ledger.wire(),
        })
    }

    /// Monotonic-snapshot check: a response applies only if the ledger it
    /// was computed for is still the current one.
    pub fn accept(&self, response_version: u64, ledger: &SelectionLedger) -> bool {
        if response_version == ledger.version() {
            true
        } else {
            log::debug!(
                "dropping stale verify-word response (version {} != {})",
                response_version,
                ledger.version()
            );
            false
        }
    }
}
