//! LLM prompt construction for grievance field extraction

use grievance_domain::GrievanceField;

/// Builds prompts for the LLM to extract grievance fields
pub struct PromptBuilder<'a> {
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder for the given grievance text
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the complete extraction prompt
    ///
    /// The grievance text is embedded exactly as given.
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push(' ');
        prompt.push_str(self.text);
        prompt.push_str("\n\n");

        for (idx, field) in GrievanceField::ALL.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", idx + 1, field.label()));
        }

        prompt.push('\n');
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

/// Build the extraction prompt for `text`
pub fn build_prompt(text: &str) -> String {
    PromptBuilder::new(text).build()
}

const EXTRACTION_INSTRUCTIONS: &str = "Extract the following details from this grievance:";

const OUTPUT_FORMAT_REMINDER: &str =
    "Return the output only in JSON format, nothing else, as plain text.";
