//! Field catalog: display metadata for each persona field.

use super::types::PersonaField;

/// Title, description and example text for one field.
#[derive(Debug, Clone)]
pub struct FieldListing {
    pub field: PersonaField,
    pub title: &'static str,
    pub description: &'static str,
    /// Example value; `None` for choice fields.
    pub placeholder: Option<&'static str>,
    /// Allowed values; empty for free text.
    pub choices: Vec<&'static str>,
    /// Display label for each allowed value.
    pub labels: Vec<&'static str>,
}

/// Catalog of field metadata, in record order.
pub struct FieldCatalog;

impl FieldCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Metadata for a single field.
    pub fn describe(&self, field: PersonaField) -> FieldListing {
        let (title, description, placeholder) = match field {
            PersonaField::Role => (
                "Role",
                "Define the AI's primary role and identity",
                Some("You are a friendly customer service representative for XYZ Company..."),
            ),
            PersonaField::GeneralGuidelines => (
                "General Guidelines",
                "Overall behavior and approach guidelines",
                Some("Always be polite and professional. Listen actively to customer concerns..."),
            ),
            PersonaField::VoiceInstructions => (
                "Voice Specific Instructions",
                "How the AI should speak and communicate",
                Some("Speak clearly and at a moderate pace. Use a warm, welcoming tone..."),
            ),
            PersonaField::Style => (
                "Style",
                "Communication style and personality traits",
                Some("Conversational yet professional. Empathetic and solution-focused..."),
            ),
            PersonaField::CallFlowObjective => (
                "Call Flow Objective",
                "Primary goals and desired outcomes for conversations",
                Some("Resolve customer issues efficiently while maintaining satisfaction..."),
            ),
            PersonaField::OffScopeQuestions => (
                "Off Scope Questions",
                "How to handle questions outside the AI's expertise",
                Some("If asked about topics outside your expertise, politely redirect to appropriate resources..."),
            ),
            PersonaField::UserConsiderations => (
                "User Considerations",
                "Important factors to consider about users",
                Some("Users may be frustrated or confused. Be patient and understanding..."),
            ),
            PersonaField::Closing => (
                "Closing",
                "How to end conversations appropriately",
                Some("Always thank the user and offer additional assistance before ending..."),
            ),
            PersonaField::VoiceGender => ("Voice Gender", "Voice used when speaking", None),
            PersonaField::Language => ("Language", "Language of the conversation", None),
        };

        FieldListing {
            field,
            title,
            description,
            placeholder,
            choices: field.choices(),
            labels: field.choice_labels(),
        }
    }

    /// Metadata for all ten fields.
    pub fn list(&self) -> Vec<FieldListing> {
        PersonaField::all()
            .iter()
            .map(|f| self.describe(*f))
            .collect()
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_covers_all_fields() {
        let list = FieldCatalog::new().list();
        assert_eq!(list.len(), 10);
        for (listing, field) in list.iter().zip(PersonaField::all()) {
            assert_eq!(listing.field, *field);
            assert!(!listing.title.is_empty());
            assert!(!listing.description.is_empty());
        }
    }

    #[test]
    fn test_choice_fields_have_choices_not_placeholders() {
        let catalog = FieldCatalog::new();
        for listing in catalog.list() {
            assert_eq!(listing.field.is_choice(), !listing.choices.is_empty());
            assert_eq!(listing.field.is_choice(), listing.placeholder.is_none());
        }
        let language = catalog.describe(PersonaField::Language);
        assert_eq!(language.choices, ["english", "spanish"]);
        assert_eq!(language.labels, ["English", "Spanish"]);
    }
}
