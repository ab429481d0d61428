//! Core types for the persona record.
//!
//! A persona is ten named fields: eight free-text sections and two
//! closed-choice voice settings. Every field is always present; the empty
//! string (or `None` for the choices) means "unset".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────
// Voice Settings
// ─────────────────────────────────────────────────────────────────

/// Voice gender used by the speech layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    Male,
    Female,
}

/// Conversation language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Spanish,
}

/// A closed set of values offered as a dropdown.
pub trait Choice: Copy + Sized + 'static {
    /// Field identifier this choice belongs to.
    const FIELD: &'static str;

    /// All values in display order.
    fn all() -> &'static [Self];

    /// Lowercase value used in prompts and snapshots.
    fn slug(&self) -> &'static str;

    /// Human-readable label.
    fn label(&self) -> &'static str;

    /// Parse a value, case-insensitive.
    fn parse_choice(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.slug() == wanted)
            .ok_or_else(|| Error::InvalidChoice {
                field: Self::FIELD,
                value: s.to_string(),
                allowed: Self::all()
                    .iter()
                    .map(|c| c.slug())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Parse a value where the empty string means unset.
    fn parse_optional(s: &str) -> Result<Option<Self>> {
        if s.trim().is_empty() {
            Ok(None)
        } else {
            Self::parse_choice(s).map(Some)
        }
    }
}

impl Choice for VoiceGender {
    const FIELD: &'static str = "voice_gender";

    fn all() -> &'static [Self] {
        &[VoiceGender::Male, VoiceGender::Female]
    }

    fn slug(&self) -> &'static str {
        match self {
            VoiceGender::Male => "male",
            VoiceGender::Female => "female",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            VoiceGender::Male => "Male",
            VoiceGender::Female => "Female",
        }
    }
}

impl Choice for Language {
    const FIELD: &'static str = "language";

    fn all() -> &'static [Self] {
        &[Language::English, Language::Spanish]
    }

    fn slug(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Spanish => "spanish",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
        }
    }
}

impl fmt::Display for VoiceGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for VoiceGender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_choice(s)
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_choice(s)
    }
}

/// Serde adapter: `None` <-> `""`, `Some(c)` <-> `c.slug()`.
mod optional_choice {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::Choice;

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Choice,
    {
        serializer.serialize_str(value.map(|c| c.slug()).unwrap_or(""))
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Choice,
    {
        let raw = String::deserialize(deserializer)?;
        T::parse_optional(&raw).map_err(de::Error::custom)
    }
}

// ─────────────────────────────────────────────────────────────────
// Persona Field
// ─────────────────────────────────────────────────────────────────

/// Identifier for one of the ten persona fields, in record order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonaField {
    Role,
    GeneralGuidelines,
    VoiceInstructions,
    Style,
    CallFlowObjective,
    OffScopeQuestions,
    UserConsiderations,
    Closing,
    VoiceGender,
    Language,
}

impl PersonaField {
    /// All fields in record order.
    pub fn all() -> &'static [PersonaField] {
        &[
            PersonaField::Role,
            PersonaField::GeneralGuidelines,
            PersonaField::VoiceInstructions,
            PersonaField::Style,
            PersonaField::CallFlowObjective,
            PersonaField::OffScopeQuestions,
            PersonaField::UserConsiderations,
            PersonaField::Closing,
            PersonaField::VoiceGender,
            PersonaField::Language,
        ]
    }

    /// The eight free-text fields, in prompt section order.
    pub fn text_fields() -> &'static [PersonaField] {
        &Self::all()[..8]
    }

    /// Snake-case identifier, matching the snapshot key.
    pub fn id(&self) -> &'static str {
        match self {
            PersonaField::Role => "role",
            PersonaField::GeneralGuidelines => "general_guidelines",
            PersonaField::VoiceInstructions => "voice_instructions",
            PersonaField::Style => "style",
            PersonaField::CallFlowObjective => "call_flow_objective",
            PersonaField::OffScopeQuestions => "off_scope_questions",
            PersonaField::UserConsiderations => "user_considerations",
            PersonaField::Closing => "closing",
            PersonaField::VoiceGender => "voice_gender",
            PersonaField::Language => "language",
        }
    }

    /// Section heading in the generated prompt, without the colon.
    ///
    /// The two voice fields share the `VOICE SETTINGS` section and return
    /// their line label instead.
    pub fn heading(&self) -> &'static str {
        match self {
            PersonaField::Role => "ROLE",
            PersonaField::GeneralGuidelines => "GENERAL GUIDELINES",
            PersonaField::VoiceInstructions => "VOICE SPECIFIC INSTRUCTIONS",
            PersonaField::Style => "STYLE",
            PersonaField::CallFlowObjective => "CALL FLOW OBJECTIVE",
            PersonaField::OffScopeQuestions => "OFF SCOPE QUESTIONS",
            PersonaField::UserConsiderations => "USER CONSIDERATIONS",
            PersonaField::Closing => "CLOSING",
            PersonaField::VoiceGender => "Gender",
            PersonaField::Language => "Language",
        }
    }

    /// Whether the field only accepts values from a closed set.
    pub fn is_choice(&self) -> bool {
        matches!(self, PersonaField::VoiceGender | PersonaField::Language)
    }

    /// Allowed values for choice fields; empty for free text.
    pub fn choices(&self) -> Vec<&'static str> {
        match self {
            PersonaField::VoiceGender => VoiceGender::all().iter().map(|c| c.slug()).collect(),
            PersonaField::Language => Language::all().iter().map(|c| c.slug()).collect(),
            _ => Vec::new(),
        }
    }

    /// Display labels matching [`PersonaField::choices`].
    pub fn choice_labels(&self) -> Vec<&'static str> {
        match self {
            PersonaField::VoiceGender => VoiceGender::all().iter().map(|c| c.label()).collect(),
            PersonaField::Language => Language::all().iter().map(|c| c.label()).collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for PersonaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for PersonaField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        PersonaField::all()
            .iter()
            .copied()
            .find(|f| f.id() == normalized)
            .ok_or_else(|| Error::unknown_field(s))
    }
}

// ─────────────────────────────────────────────────────────────────
// Persona Record
// ─────────────────────────────────────────────────────────────────

/// The full persona. Field order here is the snapshot key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersonaRecord {
    /// The AI's primary role and identity.
    pub role: String,
    pub general_guidelines: String,
    pub voice_instructions: String,
    pub style: String,
    pub call_flow_objective: String,
    /// How to handle questions outside the persona's expertise.
    pub off_scope_questions: String,
    pub user_considerations: String,
    pub closing: String,
    #[serde(with = "optional_choice")]
    pub voice_gender: Option<VoiceGender>,
    #[serde(with = "optional_choice")]
    pub language: Option<Language>,
}

impl PersonaRecord {
    /// Current value of a field as it appears in the prompt and snapshot.
    pub fn value(&self, field: PersonaField) -> &str {
        match field {
            PersonaField::Role => &self.role,
            PersonaField::GeneralGuidelines => &self.general_guidelines,
            PersonaField::VoiceInstructions => &self.voice_instructions,
            PersonaField::Style => &self.style,
            PersonaField::CallFlowObjective => &self.call_flow_objective,
            PersonaField::OffScopeQuestions => &self.off_scope_questions,
            PersonaField::UserConsiderations => &self.user_considerations,
            PersonaField::Closing => &self.closing,
            PersonaField::VoiceGender => self.voice_gender.map(|c| c.slug()).unwrap_or(""),
            PersonaField::Language => self.language.map(|c| c.slug()).unwrap_or(""),
        }
    }

    /// Replace one field's value. Only choice fields can reject a value.
    pub fn apply(&mut self, edit: &FieldEdit) -> Result<()> {
        let slot = match edit.field {
            PersonaField::VoiceGender => {
                self.voice_gender = VoiceGender::parse_optional(&edit.value)?;
                return Ok(());
            }
            PersonaField::Language => {
                self.language = Language::parse_optional(&edit.value)?;
                return Ok(());
            }
            PersonaField::Role => &mut self.role,
            PersonaField::GeneralGuidelines => &mut self.general_guidelines,
            PersonaField::VoiceInstructions => &mut self.voice_instructions,
            PersonaField::Style => &mut self.style,
            PersonaField::CallFlowObjective => &mut self.call_flow_objective,
            PersonaField::OffScopeQuestions => &mut self.off_scope_questions,
            PersonaField::UserConsiderations => &mut self.user_considerations,
            PersonaField::Closing => &mut self.closing,
        };
        slot.clone_from(&edit.value);
        Ok(())
    }

    /// Whether every field is unset.
    pub fn is_empty(&self) -> bool {
        *self == PersonaRecord::default()
    }
}

// ─────────────────────────────────────────────────────────────────
// Field Edit
// ─────────────────────────────────────────────────────────────────

/// A total replacement of one field's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub field: PersonaField,
    pub value: String,
}

impl FieldEdit {
    pub fn new(field: PersonaField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

impl FromStr for FieldEdit {
    type Err = Error;

    /// Parse `FIELD=VALUE`. The value is everything after the first `=`.
    fn from_str(s: &str) -> Result<Self> {
        let (name, value) = s.split_once('=').ok_or_else(|| Error::malformed_edit(s))?;
        if name.trim().is_empty() {
            return Err(Error::malformed_edit(s));
        }
        Ok(FieldEdit::new(name.parse()?, value))
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
