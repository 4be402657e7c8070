use log::debug;
use reqwest::StatusCode;

use crate::apuesta::EngineError;

/// Status codes the server answers rejected engine operations with.
pub fn map_engine_err(e: EngineError) -> (StatusCode, String) {
    debug!("Rejected: {}", e);
    let code = match e {
        EngineError::StackFull { .. } => StatusCode::CONFLICT,
        EngineError::FeedExhausted => StatusCode::GONE,
        EngineError::CouponIncomplete { .. } => StatusCode::PRECONDITION_FAILED,
    };
    (code, e.to_string())
}
