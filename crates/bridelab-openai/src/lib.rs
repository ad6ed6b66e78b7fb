//! Chat-completion provider client for the bridelab portal.
//!
//! Wraps the provider's `POST /chat/completions` endpoint behind
//! [`CompletionClient`]. The client is built once at startup with a fixed
//! model identifier and sampling temperature; each call forwards a
//! conversation transcript verbatim and yields the first choice's content.
//!
//! The credential handed to the client is treated as sensitive: it is sent
//! only as a bearer header and never appears in `Debug` output or logs.

pub mod client;
pub mod error;

pub use client::CompletionClient;
pub use error::CompletionError;
