//! Grievance Extractor
//!
//! Turns free-text grievances into the model's structured field listing.
//!
//! # Architecture
//!
//! ```text
//! Text → Extractor → Prompt → LLM → raw reply (→ GrievanceRecord, best effort)
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use grievance_extractor::Extractor;
//! use grievance_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{"Category": "Water"}"#);
//! let extractor = Extractor::new(llm);
//!
//! let reply = extractor.extract("No water supply in Ward 9 since Monday").await?;
//! println!("Model said: {}", reply);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod extractor;
mod parser;
mod prompt;
mod types;


pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::parse_grievance_record;
pub use prompt::{build_prompt, PromptBuilder};
pub use types::StructuredExtraction;
