//! Bounded world-chat history, replayed to joining players.

use std::collections::VecDeque;

use tokio::sync::Mutex;

use horizon_shared::ChatEntryData;

pub struct ChatLog {
    cap: usize,
    entries: Mutex<VecDeque<ChatEntryData>>,
}

impl ChatLog {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            entries: Mutex::new(VecDeque::new()),
        }
    }

    pub async fn push(&self, entry: ChatEntryData) {
        let mut entries = self.entries.lock().await;
        entries.push_back(entry);
        while entries.len() > self.cap {
            entries.pop_front();
        }
    }

    /// Oldest-first copy of the retained history.
    pub async fn recent(&self) -> Vec<ChatEntryData> {
        let entries = self.entries.lock().await;
        entries.iter().cloned().collect()
    }
}
