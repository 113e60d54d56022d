//! # tcrei Core
//!
//! This crate provides the core functionality for tcrei, a prompt-building
//! tutor built around the TCREI framework (Task, Context, References,
//! Evaluation, Iteration).
//!
//! tcrei lets you assemble prompts from structured parts (a persona, a task,
//! context and reference examples), keep named collections of saved prompts
//! and chat transcripts, and score prompts against a generative model.
//!
//! # Modules
//!
//! - [`chat`] - Chat messages and saved chat transcripts
//! - [`draft`] - The in-progress prompt draft and the prompt assembler
//! - [`file_store`] - File-backed key-value store implementation
//! - [`i18n`] - Locales and translation catalog lookup
//! - [`learn`] - The built-in TCREI learning module catalog
//! - [`llm`] - Generative model client for prompt analysis and chat
//! - [`parser`] - Placeholder template parsing for translated messages
//! - [`persona`] - The built-in persona catalog
//! - [`repository`] - Named collections of saved items over a store
//! - [`store`] - Key-value store traits and the in-memory store
//!
//! # Examples
//!
//! ```rust
//! use tcrei_core::draft::{Draft, SavedPrompt};
//! use tcrei_core::persona::find_persona;
//! use tcrei_core::repository::{Repository, SAVED_PROMPTS_KEY};
//! use tcrei_core::store::MemoryStore;
//!
//! // Build a draft and assemble it into a prompt
//! let draft = Draft {
//!     persona: find_persona("software_engineer"),
//!     task: "Write a function".to_string(),
//!     ..Draft::default()
//! };
//! assert_eq!(
//!     draft.assemble(),
//!     "Act as a Senior Software Engineer.\n\nWrite a function"
//! );
//!
//! // Save it under a name
//! let mut prompts: Repository<SavedPrompt, _> =
//!     Repository::open(MemoryStore::new(), SAVED_PROMPTS_KEY);
//! prompts
//!     .save(SavedPrompt::new("my first prompt", &draft))
//!     .expect("failed to save prompt");
//! ```

pub mod chat;
pub mod draft;
pub mod file_store;
pub mod i18n;
pub mod learn;
pub mod llm;
pub mod parser;
pub mod persona;
pub mod repository;
pub mod store;
