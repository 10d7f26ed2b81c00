//! Posting to social media.
//!
//! - `x`: X (Twitter) v2 client
//! - `oauth`: OAuth 1.0a signing used by the X client

pub mod oauth;
pub mod x;

pub use x::{PostId, XClient};
