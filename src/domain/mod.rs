//! Message routing domain logic
//!
//! Provides the `send_line_message` tool and the webhook event extraction
//! exposed over the HTTP surface.

pub mod tools;
pub mod webhook;
