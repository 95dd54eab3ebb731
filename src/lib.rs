//! Client for the Atlas hallucination-verification endpoint:
//! submit a query/response pair, render the verdict, copy it.

pub mod client;
pub mod clipboard;
pub mod controller;
pub mod types;

pub use client::{Verifier, VerifyClient, VerifyError};
pub use clipboard::{ClipboardSink, SystemClipboard};
pub use controller::{CopyFormat, Region, ResultView, VerifyController};
pub use types::{single_line, VerificationRequest, Verdict};
