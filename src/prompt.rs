//! System prompt generation.
//!
//! Renders a [`PersonaRecord`] into the fixed-layout text document handed
//! to the conversational model. Every section is always present, values
//! are inserted verbatim, and the output carries no trailing newline.

use crate::persona::{PersonaField, PersonaRecord};

/// Heading of the final section listing the voice choices.
pub const VOICE_SETTINGS_HEADING: &str = "VOICE SETTINGS";

/// Render the system prompt for a persona.
pub fn generate_system_prompt(record: &PersonaRecord) -> String {
    let mut doc = String::new();

    for field in PersonaField::text_fields() {
        doc.push_str(field.heading());
        doc.push_str(":\n");
        doc.push_str(record.value(*field));
        doc.push_str("\n\n");
    }

    doc.push_str(VOICE_SETTINGS_HEADING);
    doc.push_str(":\n");
    for (i, field) in [PersonaField::VoiceGender, PersonaField::Language]
        .iter()
        .enumerate()
    {
        if i > 0 {
            doc.push('\n');
        }
        doc.push_str(&format!("- {}: {}", field.heading(), record.value(*field)));
    }

    doc
}
