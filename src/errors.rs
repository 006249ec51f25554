use thiserror::Error;

/// Failure of a single outbound LINE API call.
///
/// Never retried; the delivery client stringifies the cause into the in-band
/// `SendResult.error` field.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("LINE API returned status {status}: {body}")]
    Api { status: u16, body: String },
}
