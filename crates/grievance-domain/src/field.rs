//! The eleven grievance attributes the model is asked to extract

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One of the fixed extraction fields, in prompt order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrievanceField {
    /// Top-level grievance category
    Category,
    /// Finer-grained category
    SubCategory,
    /// Restated description of the grievance
    GrievanceDescription,
    /// When the grievance was submitted
    SubmissionDate,
    /// Where the grievance occurred
    Location,
    /// Demographic details of the submitter
    UserDemographics,
    /// When the first response was given
    InitialResponseDate,
    /// Department responsible for the grievance
    AssignedDepartment,
    /// Current processing status
    CurrentStatus,
    /// When the grievance was resolved
    ResolutionDate,
    /// Actions taken in response
    ResponseActions,
}

impl GrievanceField {
    /// All fields in the order they are listed in the prompt
    pub const ALL: [GrievanceField; 11] = [
        GrievanceField::Category,
        GrievanceField::SubCategory,
        GrievanceField::GrievanceDescription,
        GrievanceField::SubmissionDate,
        GrievanceField::Location,
        GrievanceField::UserDemographics,
        GrievanceField::InitialResponseDate,
        GrievanceField::AssignedDepartment,
        GrievanceField::CurrentStatus,
        GrievanceField::ResolutionDate,
        GrievanceField::ResponseActions,
    ];

    /// Human-readable label used in the extraction prompt
    pub fn label(&self) -> &'static str {
        match self {
            GrievanceField::Category => "Category",
            GrievanceField::SubCategory => "Sub-Category",
            GrievanceField::GrievanceDescription => "Grievance Description",
            GrievanceField::SubmissionDate => "Submission Date",
            GrievanceField::Location => "Location",
            GrievanceField::UserDemographics => "User Demographics",
            GrievanceField::InitialResponseDate => "Initial Response Date",
            GrievanceField::AssignedDepartment => "Assigned Department",
            GrievanceField::CurrentStatus => "Current Status",
            GrievanceField::ResolutionDate => "Resolution Date",
            GrievanceField::ResponseActions => "Response Actions",
        }
    }

    /// snake_case key used in structured output
    pub fn key(&self) -> &'static str {
        match self {
            GrievanceField::Category => "category",
            GrievanceField::SubCategory => "sub_category",
            GrievanceField::GrievanceDescription => "grievance_description",
            GrievanceField::SubmissionDate => "submission_date",
            GrievanceField::Location => "location",
            GrievanceField::UserDemographics => "user_demographics",
            GrievanceField::InitialResponseDate => "initial_response_date",
            GrievanceField::AssignedDepartment => "assigned_department",
            GrievanceField::CurrentStatus => "current_status",
            GrievanceField::ResolutionDate => "resolution_date",
            GrievanceField::ResponseActions => "response_actions",
        }
    }

    /// Match a model-chosen key to a field
    ///
    /// Comparison ignores case and every non-alphanumeric character, so
    /// `"Sub-Category"`, `"sub_category"` and `"subCategory"` all match.
    ///
    /// # Examples
    ///
    /// ```
    /// use grievance_domain::GrievanceField;
    ///
    /// assert_eq!(GrievanceField::from_key("Sub-Category"), Some(GrievanceField::SubCategory));
    /// assert_eq!(GrievanceField::from_key("current status"), Some(GrievanceField::CurrentStatus));
    /// assert_eq!(GrievanceField::from_key("priority"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Self> {
        let wanted = normalize(key);
        Self::ALL
            .into_iter()
            .find(|field| normalize(field.key()) == wanted)
    }
}

impl fmt::Display for GrievanceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Structured view of a model reply, one optional value per field
///
/// Values are kept as raw JSON since the model is free to answer with
/// strings, lists or nested objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrievanceRecord {
    /// Category
    pub category: Option<Value>,
    /// Sub-Category
    pub sub_category: Option<Value>,
    /// Grievance Description
    pub grievance_description: Option<Value>,
    /// Submission Date
    pub submission_date: Option<Value>,
    /// Location
    pub location: Option<Value>,
    /// User Demographics
    pub user_demographics: Option<Value>,
    /// Initial Response Date
    pub initial_response_date: Option<Value>,
    /// Assigned Department
    pub assigned_department: Option<Value>,
    /// Current Status
    pub current_status: Option<Value>,
    /// Resolution Date
    pub resolution_date: Option<Value>,
    /// Response Actions
    pub response_actions: Option<Value>,
}

impl GrievanceRecord {
    fn slot_mut(&mut self, field: GrievanceField) -> &mut Option<Value> {
        match field {
            GrievanceField::Category => &mut self.category,
            GrievanceField::SubCategory => &mut self.sub_category,
            GrievanceField::GrievanceDescription => &mut self.grievance_description,
            GrievanceField::SubmissionDate => &mut self.submission_date,
            GrievanceField::Location => &mut self.location,
            GrievanceField::UserDemographics => &mut self.user_demographics,
            GrievanceField::InitialResponseDate => &mut self.initial_response_date,
            GrievanceField::AssignedDepartment => &mut self.assigned_department,
            GrievanceField::CurrentStatus => &mut self.current_status,
            GrievanceField::ResolutionDate => &mut self.resolution_date,
            GrievanceField::ResponseActions => &mut self.response_actions,
        }
    }

    /// Get the value for a field
    pub fn get(&self, field: GrievanceField) -> Option<&Value> {
        match field {
            GrievanceField::Category => self.category.as_ref(),
            GrievanceField::SubCategory => self.sub_category.as_ref(),
            GrievanceField::GrievanceDescription => self.grievance_description.as_ref(),
            GrievanceField::SubmissionDate => self.submission_date.as_ref(),
            GrievanceField::Location => self.location.as_ref(),
            GrievanceField::UserDemographics => self.user_demographics.as_ref(),
            GrievanceField::InitialResponseDate => self.initial_response_date.as_ref(),
            GrievanceField::AssignedDepartment => self.assigned_department.as_ref(),
            GrievanceField::CurrentStatus => self.current_status.as_ref(),
            GrievanceField::ResolutionDate => self.resolution_date.as_ref(),
            GrievanceField::ResponseActions => self.response_actions.as_ref(),
        }
    }

    /// Set the value for a field, replacing any previous value
    pub fn set(&mut self, field: GrievanceField, value: Value) {
        *self.slot_mut(field) = Some(value);
    }

    /// Number of fields that have a value
    pub fn populated(&self) -> usize {
        GrievanceField::ALL
            .iter()
            .filter(|field| self.get(**field).is_some())
            .count()
    }
}
