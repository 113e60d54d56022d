//! # Learning modules
//!
//! The built-in curriculum: one module per letter of the TCREI framework,
//! each with localized title/text keys and the occasional worked example.
//! Examples are verbatim English, like persona names in assembled prompts.

/// One section of a learning module's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleSection {
    pub title_key: &'static str,
    pub text_key: &'static str,
    pub example: Option<&'static str>,
}

/// A single TCREI learning module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LearningModule {
    pub id: &'static str,
    pub title_key: &'static str,
    pub subtitle_key: &'static str,
    pub emoji: &'static str,
    pub description_key: &'static str,
    /// Completion progress, 0 to 100.
    pub progress: u8,
    pub content: &'static [ModuleSection],
}

pub const TCREI_MODULES: [LearningModule; 5] = [
    LearningModule {
        id: "task",
        title_key: "learn.modules.task.title",
        subtitle_key: "learn.modules.task.subtitle",
        emoji: "🎯",
        description_key: "learn.modules.task.description",
        progress: 100,
        content: &[
            ModuleSection {
                title_key: "learn.modules.task.content.0.title",
                text_key: "learn.modules.task.content.0.text",
                example: None,
            },
            ModuleSection {
                title_key: "learn.modules.task.content.1.title",
                text_key: "learn.modules.task.content.1.text",
                example: Some(
                    "\"Act as a professional speech writer...\" or \"You are a marketing executive with 15 years of experience...\"",
                ),
            },
            ModuleSection {
                title_key: "learn.modules.task.content.2.title",
                text_key: "learn.modules.task.content.2.text",
                example: Some(
                    "\"Provide the answer in a markdown table with columns for Feature, Benefit, and Use Case.\" or \"Summarize the key points in a bulleted list.\"",
                ),
            },
        ],
    },
    LearningModule {
        id: "context",
        title_key: "learn.modules.context.title",
        subtitle_key: "learn.modules.context.subtitle",
        emoji: "📚",
        description_key: "learn.modules.context.description",
        progress: 75,
        content: &[
            ModuleSection {
                title_key: "learn.modules.context.content.0.title",
                text_key: "learn.modules.context.content.0.text",
                example: Some(
                    "When asking for an email, provide the recipient's role, your relationship, the goal of the email, and key points to include.",
                ),
            },
            ModuleSection {
                title_key: "learn.modules.context.content.1.title",
                text_key: "learn.modules.context.content.1.text",
                example: None,
            },
            ModuleSection {
                title_key: "learn.modules.context.content.2.title",
                text_key: "learn.modules.context.content.2.text",
                example: None,
            },
        ],
    },
    LearningModule {
        id: "references",
        title_key: "learn.modules.references.title",
        subtitle_key: "learn.modules.references.subtitle",
        emoji: "📄",
        description_key: "learn.modules.references.description",
        progress: 25,
        content: &[
            ModuleSection {
                title_key: "learn.modules.references.content.0.title",
                text_key: "learn.modules.references.content.0.text",
                example: None,
            },
            ModuleSection {
                title_key: "learn.modules.references.content.1.title",
                text_key: "learn.modules.references.content.1.text",
                example: None,
            },
            ModuleSection {
                title_key: "learn.modules.references.content.2.title",
                text_key: "learn.modules.references.content.2.text",
                example: Some(
                    "User: \"Translate to French: sea otter -> loutre de mer\"\nUser: \"Translate to French: platypus -> ornithorynque\"\nUser: \"Translate to French: narwhal -> ?\"\nAI: \"narval\"",
                ),
            },
        ],
    },
    LearningModule {
        id: "evaluation",
        title_key: "learn.modules.evaluation.title",
        subtitle_key: "learn.modules.evaluation.subtitle",
        emoji: "🤔",
        description_key: "learn.modules.evaluation.description",
        progress: 0,
        content: &[
            ModuleSection {
                title_key: "learn.modules.evaluation.content.0.title",
                text_key: "learn.modules.evaluation.content.0.text",
                example: None,
            },
            ModuleSection {
                title_key: "learn.modules.evaluation.content.1.title",
                text_key: "learn.modules.evaluation.content.1.text",
                example: None,
            },
            ModuleSection {
                title_key: "learn.modules.evaluation.content.2.title",
                text_key: "learn.modules.evaluation.content.2.text",
                example: None,
            },
        ],
    },
    LearningModule {
        id: "iteration",
        title_key: "learn.modules.iteration.title",
        subtitle_key: "learn.modules.iteration.subtitle",
        emoji: "🔄",
        description_key: "learn.modules.iteration.description",
        progress: 0,
        content: &[
            ModuleSection {
                title_key: "learn.modules.iteration.content.0.title",
                text_key: "learn.modules.iteration.content.0.text",
                example: None,
            },
            ModuleSection {
                title_key: "learn.modules.iteration.content.1.title",
                text_key: "learn.modules.iteration.content.1.text",
                example: None,
            },
            ModuleSection {
                title_key: "learn.modules.iteration.content.2.title",
                text_key: "learn.modules.iteration.content.2.text",
                example: None,
            },
            ModuleSection {
                title_key: "learn.modules.iteration.content.3.title",
                text_key: "learn.modules.iteration.content.3.text",
                example: None,
            },
        ],
    },
];

/// Finds a learning module by its id (`task`, `context`, ...).
pub fn find_module(id: &str) -> Option<&'static LearningModule> {
    TCREI_MODULES.iter().find(|m| m.id == id)
}
