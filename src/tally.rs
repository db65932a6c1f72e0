//! Landing tally
//!
//! Counts which section the ball landed in across reruns. Kept in memory
//! only; the runner prints it as JSON when it exits.

use serde::{Deserialize, Serialize};

/// Landings counted for one label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyEntry {
    pub label: String,
    pub count: u32,
    /// Run on which this label was last landed in
    pub last_run: u32,
}

/// Landing counts, sorted by count (descending), ties by first landing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tally {
    pub entries: Vec<TallyEntry>,
}

impl Tally {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a landing and return the label's new count
    pub fn record(&mut self, label: &str, run: u32) -> u32 {
        let index = match self.entries.iter().position(|e| e.label == label) {
            Some(i) => {
                self.entries[i].count += 1;
                self.entries[i].last_run = run;
                i
            }
            None => {
                self.entries.push(TallyEntry {
                    label: label.to_string(),
                    count: 1,
                    last_run: run,
                });
                self.entries.len() - 1
            }
        };

        let count = self.entries[index].count;

        // Bubble the entry up past anything it now beats
        let mut i = index;
        while i > 0 && self.entries[i - 1].count < count {
            self.entries.swap(i - 1, i);
            i -= 1;
        }

        count
    }

    pub fn count(&self, label: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    /// Total landings recorded
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Most landed-in label (if any)
    pub fn leader(&self) -> Option<&TallyEntry> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
