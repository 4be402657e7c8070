use crate::api::*;
use log::trace;

/// Odds a commit is booked at, plus the plain odds for "was X now Y" display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedOdds {
    pub applied: Odds,
    pub normal: Odds,
    pub boosted: bool,
}

pub struct OddsBoostPolicy;

impl OddsBoostPolicy {
    pub fn resolve(question: &Question, vote: Vote, boost_enabled: bool) -> ResolvedOdds {
        let normal = question.odds_for(vote);
        match question.boosted_odds_for(vote) {
            Some(boosted) if boost_enabled => ResolvedOdds {
                applied: boosted,
                normal,
                boosted: true,
            },
            _ => ResolvedOdds {
                applied: normal,
                normal,
                boosted: false,
            },
        }
    }
}

/// What caused a commit: a released swipe, or one of the Yes/No buttons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    Swipe { direction: Swipe, intensity: f64 },
    Button(Vote),
}
impl Trigger {
    pub fn vote(&self) -> Vote {
        match self {
            Trigger::Swipe { direction, .. } => (*direction).into(),
            Trigger::Button(vote) => *vote,
        }
    }
    pub fn intensity(&self) -> f64 {
        match self {
            Trigger::Swipe { intensity, .. } => *intensity,
            Trigger::Button(_) => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CommitResolver {
    boost_enabled: bool,
}

impl CommitResolver {
    pub fn new(boost_enabled: bool) -> Self {
        Self { boost_enabled }
    }
    pub fn boost_enabled(&self) -> bool {
        self.boost_enabled
    }
    /// Builds the candidate selection. Pushing it is up to the caller, which
    /// has to check the stack capacity first.
    pub fn resolve(&self, question: &Question, trigger: Trigger) -> PredictionSelection {
        let vote = trigger.vote();
        let odds = OddsBoostPolicy::resolve(question, vote, self.boost_enabled);
        trace!(
            "Resolved {} on question {} at {} (intensity {:.2})",
            vote,
            question.id,
            odds.applied,
            trigger.intensity()
        );
        PredictionSelection {
            question: question.id,
            vote,
            odds: odds.applied,
            normal_odds: odds.normal,
            boosted: odds.boosted,
            percentage: question.percentage_for(vote),
            category: question.category.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn question() -> Question {
        Question {
            id: 3,
            title: "Will the final go to penalties?".into(),
            category: "Sports".into(),
            yes_odds: 1.8,
            no_odds: 2.2,
            boosted_yes_odds: Some(2.4),
            boosted_no_odds: Some(2.9),
            yes_percentage: 70,
            votes: "830".into(),
            time_left: "1d".into(),
        }
    }

    #[test]
    fn plain_odds_without_boost() {
        let odds = OddsBoostPolicy::resolve(&question(), Vote::No, false);
        assert_eq!(
            odds,
            ResolvedOdds {
                applied: 2.2,
                normal: 2.2,
                boosted: false
            }
        );
    }

    #[test]
    fn boosted_odds_keep_normal() {
        let odds = OddsBoostPolicy::resolve(&question(), Vote::Yes, true);
        assert_eq!(
            odds,
            ResolvedOdds {
                applied: 2.4,
                normal: 1.8,
                boosted: true
            }
        );
    }

    #[test]
    fn missing_boost_falls_back() {
        let mut question = question();
        question.boosted_no_odds = None;
        let odds = OddsBoostPolicy::resolve(&question, Vote::No, true);
        assert_eq!(odds.applied, 2.2);
        assert!(!odds.boosted);
    }

    #[test]
    fn swipe_right_votes_yes() {
        let resolver = CommitResolver::new(false);
        let selection = resolver.resolve(
            &question(),
            Trigger::Swipe {
                direction: Swipe::Right,
                intensity: 0.6,
            },
        );
        assert_eq!(
            selection,
            PredictionSelection {
                question: 3,
                vote: Vote::Yes,
                odds: 1.8,
                normal_odds: 1.8,
                boosted: false,
                percentage: 70,
                category: "Sports".into(),
            }
        );
    }

    #[test]
    fn button_commits_at_full_intensity() {
        let trigger = Trigger::Button(Vote::No);
        assert_eq!(trigger.intensity(), 1.0);
        let selection = CommitResolver::new(true).resolve(&question(), trigger);
        assert_eq!(selection.vote, Vote::No);
        assert_eq!(selection.odds, 2.9);
        assert_eq!(selection.normal_odds, 2.2);
        assert_eq!(selection.percentage, 30);
    }
}
