//! Swipe-to-vote engine for building parlay coupons out of Yes/No prediction
//! questions, plus the storage and HTTP plumbing around one session.
pub mod api;
pub mod apuesta;
pub mod client;
pub mod commit;
pub mod coupon;
pub mod db;
pub mod feed;
pub mod gesture;
pub mod listener;
pub mod settings;
pub mod stack;

pub use crate::apuesta::{Apuesta, EngineError};
