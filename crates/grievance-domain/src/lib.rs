//! Grievance Domain Layer
//!
//! Core value types shared by every layer of the gateway. Nothing in here
//! touches the network; infrastructure crates implement the traits defined
//! in [`traits`].
//!
//! ## Key Concepts
//!
//! - **Grievance**: free text submitted by an end user, the raw input
//! - **Extraction fields**: the eleven attributes the model is asked to pull out
//! - **Extraction result**: either the model's raw reply or an error message
//!
//! ## Architecture
//!
//! - Only `serde` for the wire shapes
//! - No I/O, no async runtime
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod field;
pub mod grievance;
pub mod traits;

// Re-exports for convenience
pub use field::{GrievanceField, GrievanceRecord};
pub use grievance::{ExtractionResult, GrievanceRequest};
pub use traits::LlmProvider;
