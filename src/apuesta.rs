use crate::api::*;
use crate::commit::{CommitResolver, Trigger};
use crate::coupon::CouponCalculator;
use crate::feed::QuestionFeed;
use crate::gesture::{GestureState, GestureTracker, PointerListeners, Release};
use crate::listener::VoteListener;
use crate::settings::EngineConfig;
use crate::stack::{Pushed, SelectionStack, StackError};
use chrono::Utc;
use log::{debug, info, warn};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("The coupon is full ({capacity} selections), remove one before voting again")]
    StackFull { capacity: usize },
    #[error("There are no more questions to vote on")]
    FeedExhausted,
    #[error("A coupon needs {need} selections but only has {have}")]
    CouponIncomplete { have: usize, need: usize },
}
impl From<StackError> for EngineError {
    fn from(e: StackError) -> Self {
        match e {
            StackError::StackFull { capacity } => Self::StackFull { capacity },
        }
    }
}

/// One coupon-building session: the card on screen, the gesture on it, the
/// selections so far and the stake.
pub struct Apuesta {
    config: EngineConfig,
    tracker: GestureTracker,
    resolver: CommitResolver,
    feed: QuestionFeed,
    featured: Vec<Question>,
    stack: SelectionStack,
    coupon: CouponCalculator,
    listener: Box<dyn VoteListener + Send + Sync>,
}

impl Apuesta {
    pub fn new(
        config: EngineConfig,
        questions: Vec<Question>,
        featured: Vec<Question>,
        listener: Box<dyn VoteListener + Send + Sync>,
    ) -> Self {
        let questions = valid_questions(questions);
        let featured = valid_questions(featured);
        debug!(
            "Starting session with {} questions, capacity {}, boost {}, wrap {}",
            questions.len(),
            config.capacity,
            config.boost_enabled,
            config.wrap_feed
        );
        Self {
            tracker: GestureTracker::new(config.gesture()),
            resolver: CommitResolver::new(config.boost_enabled),
            feed: QuestionFeed::new(questions, config.wrap_feed),
            featured,
            stack: SelectionStack::new(config.capacity),
            coupon: CouponCalculator::new(config.default_stake),
            listener,
            config,
        }
    }
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
    pub fn current_question(&self) -> Option<&Question> {
        self.feed.current()
    }
    pub fn featured(&self) -> &[Question] {
        &self.featured
    }
    pub fn gesture(&self) -> Option<&GestureState> {
        self.tracker.state()
    }
    pub fn selections(&self) -> &[PredictionSelection] {
        self.stack.as_slice()
    }
    /// Pointer down on the current card. Ignored when there is no card or a
    /// drag is already running.
    pub fn begin_drag(&mut self, x: f64) -> bool {
        if self.feed.current().is_none() {
            debug!("Ignoring drag, the feed is complete");
            return false;
        }
        self.tracker.begin(x)
    }
    pub fn drag_to(&mut self, x: f64) -> Option<GestureState> {
        self.tracker.update(x).copied()
    }
    pub fn cancel_drag(&mut self) {
        self.tracker.cancel();
    }
    pub fn release(&mut self) -> Result<Outcome, EngineError> {
        let release = self.tracker.end();
        self.settle(release)
    }
    /// Runs a whole recorded drag: pointer down at the first position, moves
    /// through the rest, release after the last.
    pub fn swipe<L: PointerListeners>(
        &mut self,
        listeners: &mut L,
        path: &[f64],
    ) -> Result<Outcome, EngineError> {
        let Some((&start, moves)) = path.split_first() else {
            return Ok(Outcome::Reset);
        };
        if !start.is_finite() {
            debug!("Ignoring swipe starting at {}", start);
            return Ok(Outcome::Reset);
        }
        if self.feed.current().is_none() {
            return Err(EngineError::FeedExhausted);
        }
        let release = match self.tracker.drag(listeners, start) {
            Some(mut drag) => {
                for &x in moves {
                    drag.moved(x);
                }
                drag.release()
            }
            None => {
                debug!("Ignoring swipe while another drag is running");
                return Ok(Outcome::Reset);
            }
        };
        self.settle(release)
    }
    /// Yes/No button: commits straight away at full intensity.
    pub fn press(&mut self, vote: Vote) -> Result<Outcome, EngineError> {
        self.tracker.cancel();
        self.commit(Trigger::Button(vote))
    }
    fn settle(&mut self, release: Release) -> Result<Outcome, EngineError> {
        match release {
            Release::Reset => {
                debug!("Drag released below the commit threshold, resetting");
                Ok(Outcome::Reset)
            }
            Release::Commit {
                direction,
                intensity,
            } => self.commit(Trigger::Swipe {
                direction,
                intensity,
            }),
        }
    }
    fn commit(&mut self, trigger: Trigger) -> Result<Outcome, EngineError> {
        let question = self.feed.current().ok_or(EngineError::FeedExhausted)?;
        let selection = self.resolver.resolve(question, trigger);
        let pushed = self.stack.push(selection.clone()).map_err(|e| {
            warn!("Rejected vote on question {}: {}", selection.question, e);
            EngineError::from(e)
        })?;
        self.listener
            .on_vote(selection.question, selection.vote, selection.odds);
        let stack_complete = pushed == Pushed::Completed;
        if stack_complete {
            self.listener.on_stack_complete(self.stack.as_slice());
        }
        self.feed.advance();
        debug!(
            "Committed {} on question {} at {} ({:?}, {}/{})",
            selection.vote,
            selection.question,
            selection.odds,
            pushed,
            self.stack.len(),
            self.stack.capacity()
        );
        Ok(Outcome::Committed {
            selection,
            stack_complete,
        })
    }
    pub fn remove(&mut self, question: QuestionId) -> bool {
        self.stack.remove(question).is_some()
    }
    pub fn clear(&mut self) {
        self.stack.clear();
        debug!("Cleared all selections");
    }
    pub fn set_stake(&mut self, input: &str) -> Credits {
        self.coupon.set_stake(input)
    }
    pub fn summary(&self) -> CouponSummary {
        self.coupon.summary(&self.stack)
    }
    /// Finalizes the coupon. Only possible with a full stack; on success the
    /// stack is emptied and the stake goes back to its default.
    pub fn create_coupon(&mut self) -> Result<CouponReceipt, EngineError> {
        if !self.stack.is_full() {
            return Err(EngineError::CouponIncomplete {
                have: self.stack.len(),
                need: self.stack.capacity(),
            });
        }
        let summary = self.summary();
        let receipt = CouponReceipt {
            selections: summary.selections,
            stake: summary.stake,
            multiplier: summary.multiplier,
            payout: summary.payout,
            created: Utc::now(),
        };
        self.stack.clear();
        self.coupon.reset();
        info!(
            "Created coupon with {} selections, stake {}, multiplier {:.2}",
            receipt.selections.len(),
            receipt.stake,
            receipt.multiplier
        );
        Ok(receipt)
    }
}

/// Drops questions whose odds or percentage could yield a negative or NaN
/// payout.
fn valid_questions(questions: Vec<Question>) -> Vec<Question> {
    questions
        .into_iter()
        .filter(|question| match question.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!("Skipping question: {}", e);
                false
            }
        })
        .collect()
}
