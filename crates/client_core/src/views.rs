use shared::domain::RecipientStatus;
use shared::protocol::{BatchCallDetail, BatchCallSummary};

/// Campaign list with a client-side name filter. Filtering narrows the
/// already-fetched collection and never re-queries the backend.
#[derive(Debug, Default, Clone)]
pub struct ListView {
    batch_calls: Vec<BatchCallSummary>,
    query: String,
}

#[derive(Debug, PartialEq)]
pub enum ListRender<'a> {
    /// No campaigns exist and no filter is active.
    EmptyState,
    /// Campaigns exist but the query matched none of them.
    NoResults,
    Rows(Vec<&'a BatchCallSummary>),
}

impl ListView {
    pub fn new(batch_calls: Vec<BatchCallSummary>) -> Self {
        Self {
            batch_calls,
            query: String::new(),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Case-insensitive substring match on the campaign name.
    pub fn filtered(&self) -> Vec<&BatchCallSummary> {
        let query = self.query.trim().to_lowercase();
        self.batch_calls
            .iter()
            .filter(|batch| query.is_empty() || batch.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn render(&self) -> ListRender<'_> {
        if self.batch_calls.is_empty() && self.query.trim().is_empty() {
            return ListRender::EmptyState;
        }
        let rows = self.filtered();
        if rows.is_empty() {
            return ListRender::NoResults;
        }
        ListRender::Rows(rows)
    }
}

/// One campaign plus its recipients.
#[derive(Debug, Clone)]
pub struct DetailView {
    pub detail: BatchCallDetail,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecipientStats {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub voicemail: usize,
    /// Pending, initiated, in progress, and anything not yet classified.
    pub in_flight: usize,
}

impl DetailView {
    pub fn new(detail: BatchCallDetail) -> Self {
        Self { detail }
    }

    pub fn recipient_stats(&self) -> RecipientStats {
        let mut stats = RecipientStats {
            total: self.detail.recipients.len(),
            ..Default::default()
        };
        for recipient in &self.detail.recipients {
            match &recipient.status {
                RecipientStatus::Completed => stats.completed += 1,
                RecipientStatus::Failed => stats.failed += 1,
                RecipientStatus::Cancelled => stats.cancelled += 1,
                RecipientStatus::Voicemail => stats.voicemail += 1,
                RecipientStatus::Pending
                | RecipientStatus::Initiated
                | RecipientStatus::InProgress
                | RecipientStatus::Other(_) => stats.in_flight += 1,
            }
        }
        stats
    }

    pub fn progress_label(&self) -> String {
        format!(
            "{}/{} calls dispatched",
            self.detail.batch.total_calls_dispatched, self.detail.batch.total_calls_scheduled
        )
    }
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;
