//! Framing for streaming responses: one JSON document per record, each on
//! its own line (NDJSON), never batched into an array.

use futures::{Stream, StreamExt};
use serde::Serialize;

use super::subscription::Subscription;
use crate::shared::errors::{AppError, AppResult};

/// Serializes a single record as one newline-terminated frame
pub fn encode_frame<T: Serialize>(record: &T) -> AppResult<String> {
    let mut line = serde_json::to_string(record).map_err(AppError::from)?;
    line.push('\n');
    Ok(line)
}

/// Turns a subscription into a stream of NDJSON frames.
///
/// The stream ends only when the subscription does.
pub fn ndjson<T>(subscription: Subscription<T>) -> impl Stream<Item = AppResult<String>>
where
    T: Serialize,
{
    subscription.map(|record| encode_frame(&record))
}
