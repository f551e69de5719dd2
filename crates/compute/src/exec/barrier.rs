//! Reusable N-party rendezvous for round-structured algorithms.

/// Round barrier over a fixed set of participants.
///
/// Every participant calls [`Barrier::wait`]; nobody proceeds until all
/// have arrived, and the barrier is immediately ready for the next round.
/// Exactly one caller per round is told it is the leader, which is where
/// between-round merge work goes.
pub struct Barrier {
    inner: std::sync::Barrier,
    parties: usize,
}

impl Barrier {
    pub fn new(parties: usize) -> Self {
        Self {
            inner: std::sync::Barrier::new(parties),
            parties,
        }
    }

    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Blocks until all parties arrive. Returns `true` for the one leader
    /// of this round.
    pub fn wait(&self) -> bool {
        self.inner.wait().is_leader()
    }
}
