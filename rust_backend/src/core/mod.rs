//! Core domain models for forecast evaluation.
//!
//! This module defines the records that flow through the evaluation pipeline:
//! predictions, catalog events and prediction outcomes.

pub mod domain;

pub use domain::{Event, Outcome, Prediction};
