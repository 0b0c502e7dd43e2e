use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the server reports about a single extracurricular activity.
///
/// A fresh snapshot is fetched for every render and is never mutated
/// locally. The server addresses activities by name, so the name lives in
/// the surrounding [`ActivityMap`] key rather than here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    /// Participant email addresses, in the server's order.
    pub participants: Vec<String>,
}

impl Activity {
    /// Remaining capacity. This is the server's data passed straight
    /// through, so an over-subscribed activity comes out negative rather
    /// than clamped to zero.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}

/// The full roster keyed by activity name, exactly as `GET /activities`
/// returns it. A `BTreeMap` keeps the rendering order deterministic.
pub type ActivityMap = BTreeMap<String, Activity>;
