//! Credibility checker - asks a grounded generative model whether submitted
//! text, web pages or images look credible or suspicious
//!
//! Submissions arrive over HTTP, URLs are reduced to their visible text, and
//! the model's explanation is returned together with a coarse verdict.

pub mod ai;
pub mod app;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod models;
pub mod prompts;
pub mod web;

pub use error::{Error, Result};
