//! One-shot reveal bookkeeping.
//!
//! The gallery replaces its container contents on every render, so the
//! browser's element identity cannot tell us what has already animated in.
//! The ledger remembers revealed entries by view and project id instead.

use std::collections::HashSet;

use crate::gallery::View;

/// Class every freshly rendered card carries until it scrolls into view.
pub const REVEAL_CLASS: &str = "reveal";

/// Class added once a card has been revealed.
pub const REVEALED_CLASS: &str = "reveal-in";

#[derive(Clone, Debug, Default)]
pub struct RevealLedger {
    seen: HashSet<(View, String)>,
}

impl RevealLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reveal. Returns `false` if it had already happened.
    pub fn mark(&mut self, view: View, id: &str) -> bool {
        self.seen.insert((view, id.to_owned()))
    }

    pub fn is_revealed(&self, view: View, id: &str) -> bool {
        self.seen.contains(&(view, id.to_owned()))
    }

    /// Class list for a card in `view`.
    pub fn classes(&self, view: View, id: &str) -> &'static str {
        if self.is_revealed(view, id) {
            "reveal reveal-in"
        } else {
            REVEAL_CLASS
        }
    }
}
