//! Per-run record of (source peer, message id) pairs already attempted.

use std::collections::HashSet;

use crate::domain::{message::Message, peer::Peer};

/// Composite key identifying one message within one source dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SentKey {
    peer: i64,
    message: i64,
}

impl SentKey {
    pub(crate) fn new(peer: i64, message: i32) -> Self {
        Self {
            peer,
            message: i64::from(message),
        }
    }

    pub(crate) fn of(peer: &Peer, msg: &Message) -> Self {
        Self::new(peer.id(), msg.id)
    }
}

/// Insert-only for the run; keys are never removed.
#[derive(Debug, Default)]
pub(crate) struct SentSet {
    keys: HashSet<SentKey>,
}

impl SentSet {
    pub(crate) fn contains(&self, key: &SentKey) -> bool {
        self.keys.contains(key)
    }

    pub(crate) fn insert(&mut self, key: SentKey) {
        self.keys.insert(key);
    }
}
