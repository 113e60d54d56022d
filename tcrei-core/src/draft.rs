//! # Drafts and prompt assembly
//!
//! A [`Draft`] is the in-progress, unsaved prompt a user is editing: an
//! optional persona plus free-text task, context and references fields.
//! [`Draft::assemble`] flattens a draft into the final prompt text, and
//! [`SavedPrompt`] is the named, persistable snapshot of a draft.

use crate::persona::Persona;
use serde::{Deserialize, Serialize};

/// Part length at which the builder starts suggesting a trim.
pub const SUGGESTION_THRESHOLD: usize = 2000;
/// Part length at which the builder warns the prompt is too long.
pub const WARNING_THRESHOLD: usize = 4000;

/// Advice about the length of a single draft part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthAdvice {
    Fine,
    GettingLong,
    TooLong,
}

/// Rates the character count of a draft part against the builder thresholds.
pub fn length_advice(len: usize) -> LengthAdvice {
    if len > WARNING_THRESHOLD {
        LengthAdvice::TooLong
    } else if len > SUGGESTION_THRESHOLD {
        LengthAdvice::GettingLong
    } else {
        LengthAdvice::Fine
    }
}

/// The in-progress structured prompt a user is editing in the builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub persona: Option<Persona>,
    pub task: String,
    pub context: String,
    pub references: String,
}

impl Draft {
    /// True iff the persona is absent and all three text fields are empty or
    /// whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.persona.is_none()
            && self.task.trim().is_empty()
            && self.context.trim().is_empty()
            && self.references.trim().is_empty()
    }

    /// Assembles the draft into the final prompt text.
    ///
    /// Non-empty parts appear in a fixed order, each separated from the next
    /// by a blank line:
    ///
    /// 1. `Act as a {english_name}.` when a persona is selected
    /// 2. the trimmed task text
    /// 3. `Context:` followed by the trimmed context text
    /// 4. `Examples:` followed by the trimmed references text
    ///
    /// An empty draft assembles to the empty string. This is a pure function
    /// of the draft; it is recomputed on demand and never cached.
    pub fn assemble(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(persona) = &self.persona {
            parts.push(format!("Act as a {}.", persona.english_name));
        }
        if !self.task.trim().is_empty() {
            parts.push(self.task.trim().to_string());
        }
        if !self.context.trim().is_empty() {
            parts.push(format!("Context:\n{}", self.context.trim()));
        }
        if !self.references.trim().is_empty() {
            parts.push(format!("Examples:\n{}", self.references.trim()));
        }
        parts.join("\n\n")
    }

    /// Derives an export file name from the first five words of the task.
    ///
    /// The words are lowercased, joined with underscores, and stripped of
    /// anything outside `[a-z0-9_]`. Falls back to `prompt` when the task is
    /// empty or nothing survives the stripping.
    pub fn suggested_file_name(&self) -> String {
        let name: String = self
            .task
            .trim()
            .to_lowercase()
            .split_whitespace()
            .take(5)
            .collect::<Vec<_>>()
            .join("_")
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
            .collect();
        if name.is_empty() {
            "prompt".to_string()
        } else {
            name
        }
    }

    /// Builds the structured JSON export shape for this draft.
    pub fn export(&self) -> PromptExport {
        PromptExport {
            persona: self.persona.as_ref().map(|p| p.english_name.clone()),
            task: self.task.trim().to_string(),
            context: self.context.trim().to_string(),
            references: self.references.trim().to_string(),
            full_prompt: self.assemble(),
        }
    }
}

/// The JSON shape produced by the builder's "export as JSON" action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptExport {
    pub persona: Option<String>,
    pub task: String,
    pub context: String,
    pub references: String,
    pub full_prompt: String,
}

/// A named, persisted snapshot of a draft.
///
/// The name is the unique key within the saved-prompt collection; comparison
/// is exact and case-sensitive. The persona is stored by value, so a saved
/// prompt survives changes to the live persona catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPrompt {
    pub name: String,
    pub task: String,
    pub context: String,
    pub references: String,
    pub persona: Option<Persona>,
}

impl SavedPrompt {
    pub fn new(name: &str, draft: &Draft) -> SavedPrompt {
        SavedPrompt {
            name: name.to_string(),
            task: draft.task.clone(),
            context: draft.context.clone(),
            references: draft.references.clone(),
            persona: draft.persona.clone(),
        }
    }

    /// Restores the draft this prompt was saved from.
    pub fn to_draft(&self) -> Draft {
        Draft {
            persona: self.persona.clone(),
            task: self.task.clone(),
            context: self.context.clone(),
            references: self.references.clone(),
        }
    }
}
