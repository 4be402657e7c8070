use serde::{Deserialize, Serialize};

pub type QuestionId = i64;
pub type Credits = u32;
pub type Odds = f64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub category: String,
    pub yes_odds: Odds,
    pub no_odds: Odds,
    #[serde(default)]
    pub boosted_yes_odds: Option<Odds>,
    #[serde(default)]
    pub boosted_no_odds: Option<Odds>,
    pub yes_percentage: u8,
    #[serde(default)]
    pub votes: String,
    #[serde(default)]
    pub time_left: String,
}
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Vote {
    Yes,
    No,
}
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Swipe {
    Left,
    Right,
}
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionSelection {
    pub question: QuestionId,
    pub vote: Vote,
    pub odds: Odds,
    pub normal_odds: Odds,
    pub boosted: bool,
    pub percentage: u8,
    pub category: String,
}
