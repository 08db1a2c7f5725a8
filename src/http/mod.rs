//! HTTP client layer — `CoinscopeHttp` with an opt-in retry policy.

pub mod client;
pub mod retry;

pub use client::CoinscopeHttp;
pub use retry::{RetryConfig, RetryPolicy};

#[cfg(test)]
pub(crate) mod loopback;
