//! Change notifications emitted by the store. Every state-changing mutation
//! records exactly one [`StoreChange`] under a fresh revision; no-ops record
//! nothing.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::warn;

const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// Which slice of the store changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTarget {
    Files,
    Categories,
    Clips,
    Selection,
    Tags,
    Search,
    Preferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreChange {
    pub revision: u64,
    pub kind: ChangeKind,
    pub target: ChangeTarget,
    /// Affected entity ids, when the change is about specific entities.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
}

pub trait ChangeSource {
    fn next_change(&mut self) -> Option<StoreChange>;
}

/// Monotonic revision counter plus a bounded queue of undelivered changes.
#[derive(Debug, Clone)]
pub struct ChangeLog {
    revision: u64,
    capacity: usize,
    pending: VecDeque<StoreChange>,
}

impl Default for ChangeLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ChangeLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            revision: 0,
            capacity: capacity.max(1),
            pending: VecDeque::new(),
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Bumps the revision and queues the change, dropping the oldest queued
    /// change when full.
    pub fn record<I, S>(&mut self, kind: ChangeKind, target: ChangeTarget, ids: I) -> u64
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.revision += 1;
        if self.pending.len() == self.capacity {
            if let Some(dropped) = self.pending.pop_front() {
                warn!(
                    revision = dropped.revision,
                    capacity = self.capacity,
                    "Change queue full, dropping oldest change"
                );
            }
        }
        self.pending.push_back(StoreChange {
            revision: self.revision,
            kind,
            target,
            ids: ids.into_iter().map(Into::into).collect(),
        });
        self.revision
    }

    pub fn drain(&mut self) -> Vec<StoreChange> {
        self.pending.drain(..).collect()
    }
}

impl ChangeSource for ChangeLog {
    fn next_change(&mut self) -> Option<StoreChange> {
        self.pending.pop_front()
    }
}
