use serde::{Deserialize, Serialize};

use super::*;

// Requests
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct DragRequest {
    pub x: f64,
}
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SwipeRequest {
    pub path: Vec<f64>,
}
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct PressRequest {
    pub vote: Vote,
}
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct RemoveRequest {
    pub question: QuestionId,
}
/// Stake as typed by the user, parsed leniently by the calculator.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StakeRequest {
    pub stake: String,
}
