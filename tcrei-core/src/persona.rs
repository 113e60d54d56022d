use serde::{Deserialize, Serialize};

/// A named role prepended to a prompt as an instruction.
///
/// The two keys point into the translation catalogs, while `english_name` is
/// the literal text used verbatim in assembled prompts regardless of the
/// active locale. Saved prompts embed a persona by value, so a stored copy is
/// independent of the live catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub name_key: String,
    pub description_key: String,
    pub english_name: String,
}

impl Persona {
    pub fn new(key: &str, english_name: &str) -> Persona {
        Persona {
            name_key: format!("personas.{key}.name"),
            description_key: format!("personas.{key}.description"),
            english_name: english_name.to_string(),
        }
    }

    /// The catalog key, i.e. the middle segment of `name_key`.
    pub fn key(&self) -> &str {
        self.name_key
            .strip_prefix("personas.")
            .and_then(|rest| rest.strip_suffix(".name"))
            .unwrap_or(&self.name_key)
    }
}

/// The built-in persona catalog offered by the prompt builder.
pub fn personas() -> Vec<Persona> {
    vec![
        Persona::new("marketing_executive", "Marketing Executive"),
        Persona::new("anime_expert", "Anime Expert"),
        Persona::new("speech_writer", "Professional Speech Writer"),
        Persona::new("software_engineer", "Senior Software Engineer"),
        Persona::new("travel_blogger", "Travel Blogger"),
        Persona::new("financial_analyst", "Financial Analyst"),
    ]
}

/// Finds a built-in persona by its catalog key.
pub fn find_persona(key: &str) -> Option<Persona> {
    personas().into_iter().find(|p| p.key() == key)
}
