//! Analytics log.
//!
//! Append-only record of routed intents, held in memory for the process
//! lifetime and dumped through the introspection sentinel. The write lock
//! serializes appends, so snapshot order is append order.

use std::collections::VecDeque;

use chrono::Utc;
use nova_common::AnalyticsRecord;
use tokio::sync::RwLock;

pub struct AnalyticsLog {
    entries: RwLock<VecDeque<AnalyticsRecord>>,
    max_entries: Option<usize>,
}

impl AnalyticsLog {
    /// `max_entries` turns the log into a ring buffer that drops the oldest
    /// record on overflow. `None` (and zero) grow unbounded, matching the
    /// storefront's demo behavior.
    pub fn new(max_entries: Option<usize>) -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
            max_entries: max_entries.filter(|&cap| cap > 0),
        }
    }

    /// Append one record stamped with the current time.
    pub async fn record(&self, intent: &str, term: &str) {
        let mut entries = self.entries.write().await;
        if let Some(cap) = self.max_entries {
            while entries.len() >= cap {
                entries.pop_front();
            }
        }
        entries.push_back(AnalyticsRecord {
            intent: intent.to_string(),
            term: term.to_string(),
            timestamp: Utc::now(),
        });
    }

    /// Full log, oldest first.
    pub async fn snapshot(&self) -> Vec<AnalyticsRecord> {
        self.entries.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every record. Tests reset state with this between scenarios.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
