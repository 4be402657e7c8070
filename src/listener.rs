use crate::api::*;
use log::info;

/// Receives the engine's outbound effects. `on_vote` fires once per accepted
/// commit; whatever ledger sits behind it owns any balance changes.
pub trait VoteListener {
    fn on_vote(&self, question: QuestionId, vote: Vote, odds: Odds);
    /// Fired when a push fills the stack to capacity.
    fn on_stack_complete(&self, _selections: &[PredictionSelection]) {}
}

#[derive(Debug, Default)]
pub struct LogListener;
impl VoteListener for LogListener {
    fn on_vote(&self, question: QuestionId, vote: Vote, odds: Odds) {
        info!("Vote {} on question {} at {:.2}", vote, question, odds);
    }
    fn on_stack_complete(&self, selections: &[PredictionSelection]) {
        info!("Coupon complete with {} selections", selections.len());
    }
}

#[cfg(test)]
pub use recording::{RecordedVote, RecordingListener};

#[cfg(test)]
mod recording {
    use super::*;
    use std::sync::{Arc, Mutex};

    pub type RecordedVote = (QuestionId, Vote, Odds);

    /// Keeps every signal it receives. Clones share the same record.
    #[derive(Debug, Default, Clone)]
    pub struct RecordingListener {
        votes: Arc<Mutex<Vec<RecordedVote>>>,
        completions: Arc<Mutex<Vec<Vec<QuestionId>>>>,
    }
    impl RecordingListener {
        pub fn votes(&self) -> Vec<RecordedVote> {
            self.votes
                .lock()
                .map(|votes| votes.clone())
                .unwrap_or_default()
        }
        /// Question ids of the stack each time it was completed.
        pub fn completions(&self) -> Vec<Vec<QuestionId>> {
            self.completions
                .lock()
                .map(|completions| completions.clone())
                .unwrap_or_default()
        }
    }
    impl VoteListener for RecordingListener {
        fn on_vote(&self, question: QuestionId, vote: Vote, odds: Odds) {
            if let Ok(mut votes) = self.votes.lock() {
                votes.push((question, vote, odds));
            }
        }
        fn on_stack_complete(&self, selections: &[PredictionSelection]) {
            if let Ok(mut completions) = self.completions.lock() {
                completions.push(selections.iter().map(|s| s.question).collect());
            }
        }
    }
}
