use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use anyhow::bail;

use super::*;

impl Question {
    pub fn odds_for(&self, vote: Vote) -> Odds {
        match vote {
            Vote::Yes => self.yes_odds,
            Vote::No => self.no_odds,
        }
    }
    pub fn boosted_odds_for(&self, vote: Vote) -> Option<Odds> {
        match vote {
            Vote::Yes => self.boosted_yes_odds,
            Vote::No => self.boosted_no_odds,
        }
    }
    /// Odds must be finite and at least 1.0, the Yes share at most 100.
    pub fn validate(&self) -> anyhow::Result<()> {
        let odds = [
            ("yes_odds", Some(self.yes_odds)),
            ("no_odds", Some(self.no_odds)),
            ("boosted_yes_odds", self.boosted_yes_odds),
            ("boosted_no_odds", self.boosted_no_odds),
        ];
        for (name, value) in odds {
            if let Some(value) = value {
                if !(value.is_finite() && value >= 1.0) {
                    bail!("Question {} has invalid {}: {}", self.id, name, value);
                }
            }
        }
        if self.yes_percentage > 100 {
            bail!(
                "Question {} has yes_percentage {} above 100",
                self.id,
                self.yes_percentage
            );
        }
        Ok(())
    }
    /// Share of voters on the given side, derived from the Yes share.
    pub fn percentage_for(&self, vote: Vote) -> u8 {
        let yes = self.yes_percentage.min(100);
        match vote {
            Vote::Yes => yes,
            Vote::No => 100 - yes,
        }
    }
}
impl From<Swipe> for Vote {
    fn from(swipe: Swipe) -> Self {
        match swipe {
            Swipe::Right => Vote::Yes,
            Swipe::Left => Vote::No,
        }
    }
}
impl Display for Vote {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let output = match self {
            Self::Yes => "Yes",
            Self::No => "No",
        };
        write!(f, "{}", output)
    }
}
impl FromStr for Vote {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(Self::Yes),
            "no" | "n" => Ok(Self::No),
            e => bail!("Couldn't parse vote: {}", e),
        }
    }
}
impl Display for Swipe {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let output = match self {
            Self::Left => "Left",
            Self::Right => "Right",
        };
        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn question() -> Question {
        Question {
            id: 1,
            title: "Will it rain tomorrow?".into(),
            category: "Weather".into(),
            yes_odds: 1.8,
            no_odds: 2.1,
            boosted_yes_odds: Some(2.4),
            boosted_no_odds: None,
            yes_percentage: 62,
            votes: "1.2k".into(),
            time_left: "3h".into(),
        }
    }

    #[test]
    fn percentage_follows_side() {
        let question = question();
        assert_eq!(question.percentage_for(Vote::Yes), 62);
        assert_eq!(question.percentage_for(Vote::No), 38);
    }

    #[test]
    fn percentage_is_capped() {
        let mut question = question();
        question.yes_percentage = 140;
        assert_eq!(question.percentage_for(Vote::Yes), 100);
        assert_eq!(question.percentage_for(Vote::No), 0);
    }

    #[test]
    fn validation() {
        question().validate().unwrap();
        let mut bad = question();
        bad.yes_odds = -3.0;
        assert!(bad.validate().is_err());
        let mut bad = question();
        bad.no_odds = 0.99;
        assert!(bad.validate().is_err());
        let mut bad = question();
        bad.boosted_yes_odds = Some(f64::NAN);
        assert!(bad.validate().is_err());
        let mut bad = question();
        bad.yes_percentage = 250;
        assert!(bad.validate().is_err());
        let mut even = question();
        even.no_odds = 1.0;
        even.yes_percentage = 100;
        even.validate().unwrap();
    }

    #[test]
    fn swipe_maps_to_vote() {
        assert_eq!(Vote::from(Swipe::Right), Vote::Yes);
        assert_eq!(Vote::from(Swipe::Left), Vote::No);
    }

    #[test]
    fn vote_parses() {
        assert_eq!(Vote::from_str("Yes").unwrap(), Vote::Yes);
        assert_eq!(Vote::from_str(" no ").unwrap(), Vote::No);
        assert!(Vote::from_str("maybe").is_err());
        assert_eq!(Vote::No.to_string(), "No");
    }

    #[test]
    fn question_json_defaults() {
        let question: Question = serde_json::from_str(
            r#"{"id":7,"title":"t","category":"c","yes_odds":1.5,"no_odds":2.5,"yes_percentage":40}"#,
        )
        .unwrap();
        assert_eq!(question.boosted_yes_odds, None);
        assert_eq!(question.votes, "");
    }
}
