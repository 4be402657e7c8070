use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::*;

#[derive(PartialEq, Debug, Serialize, Deserialize, Clone)]
pub enum Outcome {
    Committed {
        selection: PredictionSelection,
        stack_complete: bool,
    },
    Reset,
}
#[derive(PartialEq, Debug, Serialize, Deserialize, Clone)]
pub struct CouponSummary {
    pub selections: Vec<PredictionSelection>,
    pub stake: Credits,
    pub capacity: usize,
    pub is_full: bool,
    pub multiplier: f64,
    pub payout: f64,
    pub display_multiplier: Decimal,
    pub display_payout: Decimal,
}
#[derive(PartialEq, Debug, Serialize, Deserialize, Clone)]
pub struct CouponReceipt {
    pub selections: Vec<PredictionSelection>,
    pub stake: Credits,
    pub multiplier: f64,
    pub payout: f64,
    pub created: DateTime<Utc>,
}
