//! Result types for extraction

use grievance_domain::GrievanceRecord;
use serde::{Deserialize, Serialize};

/// Raw model reply plus its best-effort structured view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredExtraction {
    /// Model text, unmodified
    pub response: String,

    /// Parsed fields, `None` when the reply is not a usable JSON object
    pub fields: Option<GrievanceRecord>,
}
