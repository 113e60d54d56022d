mod config;
mod constants;

use crate::config::{ModelConfig, TcreiCliConfig, get_catalog_dir, get_store, load_config};
use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tcrei_core::chat::{Message, SavedChat};
use tcrei_core::draft::{Draft, LengthAdvice, SavedPrompt, length_advice};
use tcrei_core::file_store::FileStore;
use tcrei_core::i18n::{Catalog, Locale};
use tcrei_core::learn::{LearningModule, TCREI_MODULES, find_module};
use tcrei_core::llm;
use tcrei_core::persona::{find_persona, personas};
use tcrei_core::repository::{Repository, SAVED_CHATS_KEY, SAVED_PROMPTS_KEY};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version,
display_name = "tcrei",
bin_name = "tcrei",
about = "Build, save and score prompts with the TCREI framework",
long_about = "Build, save and score prompts with the TCREI framework \
(Task, Context, References, Evaluation, Iteration)")]
struct Args {
    /// Directory where saved prompts and chats live
    #[arg(short = 'd', long)]
    data_path: Option<String>,

    /// Interface locale code (en, de, fr, es, ar, zh, vi, fil, ja, hi)
    #[arg(short = 'l', long)]
    locale: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(clap::Args, Debug, Clone)]
struct DraftArgs {
    #[arg(short = 't', long)]
    task: Option<String>,
    #[arg(short = 'c', long)]
    context: Option<String>,
    #[arg(short = 'r', long)]
    references: Option<String>,
    /// Persona catalog key, e.g. software_engineer
    #[arg(short = 'p', long)]
    persona: Option<String>,
}

impl DraftArgs {
    fn to_draft(&self) -> anyhow::Result<Draft> {
        let persona = match &self.persona {
            Some(key) => Some(find_persona(key).ok_or_else(|| {
                let known: Vec<String> = personas().iter().map(|p| p.key().to_string()).collect();
                anyhow!("unknown persona '{}', expected one of: {}", key, known.join(", "))
            })?),
            None => None,
        };
        Ok(Draft {
            persona,
            task: self.task.clone().unwrap_or_default(),
            context: self.context.clone().unwrap_or_default(),
            references: self.references.clone().unwrap_or_default(),
        })
    }
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Assemble a prompt from its parts and print it
    Preview {
        #[command(flatten)]
        draft: DraftArgs,
        /// Copy the assembled prompt to the clipboard
        #[arg(long)]
        copy: bool,
        /// Print the structured JSON export instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Save a prompt under a name (replacing any prompt with that name)
    Save {
        #[arg(short = 'n', long)]
        name: String,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// List saved prompts
    List,
    /// Print a saved prompt's assembled text
    Show {
        #[arg(short = 'n', long)]
        name: String,
        #[arg(long)]
        copy: bool,
    },
    /// Delete a saved prompt
    Delete {
        #[arg(short = 'n', long)]
        name: String,
    },
    /// Export a saved prompt to a .txt or .json file
    Export {
        #[arg(short = 'n', long)]
        name: String,
        /// Write the structured JSON export instead of plain text
        #[arg(long)]
        json: bool,
        /// Output file (defaults to a name derived from the task)
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
    /// Score a prompt against the TCREI framework
    Analyze {
        /// Analyze a saved prompt by name instead of inline parts
        #[arg(short = 'n', long)]
        name: Option<String>,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Chat with the model and manage saved chats
    Chat {
        #[command(subcommand)]
        cmd: ChatCommands,
    },
    /// List the built-in personas
    Personas,
    /// List the TCREI learning modules
    Learn {
        /// Show a single module by id, e.g. task or context
        #[arg(short = 'm', long)]
        module: Option<String>,
    },
    /// List supported interface languages
    Languages,
}

#[derive(Subcommand, Debug, Clone)]
enum ChatCommands {
    /// Send a message and print the model's reply
    Send {
        #[arg(short = 'm', long)]
        message: String,
        /// Continue from a saved chat's history
        #[arg(long)]
        load: Option<String>,
        /// Save the updated conversation under this name
        #[arg(long)]
        save_as: Option<String>,
    },
    /// Save a transcript file (a JSON array of messages) under a name
    Save {
        #[arg(short = 'n', long)]
        name: String,
        #[arg(short = 'f', long)]
        file: PathBuf,
    },
    /// List saved chats
    List,
    /// Print a saved chat transcript
    Show {
        #[arg(short = 'n', long)]
        name: String,
    },
    /// Delete a saved chat
    Delete {
        #[arg(short = 'n', long)]
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = load_config();
    let locale = resolve_locale(&config, args.locale.as_deref())?;
    let store = get_store(&config, args.data_path.as_deref());

    match args.cmd {
        Commands::Preview { draft, copy, json } => preview(&draft.to_draft()?, copy, json),
        Commands::Save { name, draft } => save_prompt(store, &name, &draft.to_draft()?),
        Commands::List => list_prompts(store),
        Commands::Show { name, copy } => show_prompt(store, &name, copy),
        Commands::Delete { name } => delete_prompt(store, &name),
        Commands::Export { name, json, out } => export_prompt(store, &name, json, out),
        Commands::Analyze { name, draft } => {
            let draft = match name {
                Some(name) => saved_draft(store, &name)?,
                None => draft.to_draft()?,
            };
            analyze(&config.model_config, &draft, locale).await
        }
        Commands::Chat { cmd } => match cmd {
            ChatCommands::Send {
                message,
                load,
                save_as,
            } => chat_send(store, &config.model_config, &message, load, save_as).await,
            ChatCommands::Save { name, file } => chat_save(store, &name, &file),
            ChatCommands::List => chat_list(store),
            ChatCommands::Show { name } => chat_show(store, &name),
            ChatCommands::Delete { name } => chat_delete(store, &name),
        },
        Commands::Personas => list_personas(&config, locale),
        Commands::Learn { module } => list_modules(&config, locale, module.as_deref()),
        Commands::Languages => list_languages(&config, locale),
    }
}

fn resolve_locale(config: &TcreiCliConfig, requested: Option<&str>) -> anyhow::Result<Locale> {
    match requested {
        Some(code) => Locale::from_code(code).ok_or_else(|| {
            let codes: Vec<&str> = Locale::ALL.iter().map(|l| l.code()).collect();
            anyhow!("unknown locale '{}', expected one of: {}", code, codes.join(", "))
        }),
        None => Ok(config.locale),
    }
}

fn prompt_repo(store: FileStore) -> Repository<SavedPrompt, FileStore> {
    Repository::open(store, SAVED_PROMPTS_KEY)
}

fn chat_repo(store: FileStore) -> Repository<SavedChat, FileStore> {
    Repository::open(store, SAVED_CHATS_KEY)
}

fn copy_to_clipboard(text: &str) -> anyhow::Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("failed to access the clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("failed to copy to the clipboard")?;
    Ok(())
}

fn warn_about_length(draft: &Draft) {
    for (label, text) in [
        ("task", &draft.task),
        ("context", &draft.context),
        ("references", &draft.references),
    ] {
        match length_advice(text.chars().count()) {
            LengthAdvice::Fine => {}
            LengthAdvice::GettingLong => {
                eprintln!("note: the {label} section is getting long ({} characters)", text.chars().count());
            }
            LengthAdvice::TooLong => {
                eprintln!("warning: the {label} section is very long ({} characters); consider trimming it", text.chars().count());
            }
        }
    }
}

fn preview(draft: &Draft, copy: bool, json: bool) -> anyhow::Result<()> {
    if draft.is_empty() {
        bail!("nothing to preview: the draft is empty");
    }
    warn_about_length(draft);

    let assembled = draft.assemble();
    if json {
        println!("{}", serde_json::to_string_pretty(&draft.export())?);
    } else {
        println!("{assembled}");
    }
    if copy {
        copy_to_clipboard(&assembled)?;
        eprintln!("Copied to clipboard.");
    }
    Ok(())
}

fn save_prompt(store: FileStore, name: &str, draft: &Draft) -> anyhow::Result<()> {
    if draft.is_empty() {
        bail!("refusing to save an empty prompt");
    }
    let mut repo = prompt_repo(store);
    repo.save(SavedPrompt::new(name.trim(), draft))
        .context("failed to save prompt")?;
    println!("Saved prompt '{}'.", name.trim());
    Ok(())
}

fn list_prompts(store: FileStore) -> anyhow::Result<()> {
    let mut repo = prompt_repo(store);
    let items = repo.list();
    if items.is_empty() {
        println!("No saved prompts yet.");
        return Ok(());
    }
    for prompt in items {
        match &prompt.persona {
            Some(persona) => println!("{}  (persona: {})", prompt.name, persona.english_name),
            None => println!("{}", prompt.name),
        }
    }
    Ok(())
}

fn saved_draft(store: FileStore, name: &str) -> anyhow::Result<Draft> {
    let repo = prompt_repo(store);
    let prompt = repo
        .get(name)
        .ok_or_else(|| anyhow!("no saved prompt named '{name}'"))?;
    Ok(prompt.to_draft())
}

fn show_prompt(store: FileStore, name: &str, copy: bool) -> anyhow::Result<()> {
    let draft = saved_draft(store, name)?;
    let assembled = draft.assemble();
    println!("{assembled}");
    if copy {
        copy_to_clipboard(&assembled)?;
        eprintln!("Copied to clipboard.");
    }
    Ok(())
}

fn delete_prompt(store: FileStore, name: &str) -> anyhow::Result<()> {
    let mut repo = prompt_repo(store);
    repo.delete(name).context("failed to delete prompt")?;
    println!("Deleted prompt '{name}'.");
    Ok(())
}

fn export_prompt(
    store: FileStore,
    name: &str,
    json: bool,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let draft = saved_draft(store, name)?;
    let extension = if json { "json" } else { "txt" };
    let path = out.unwrap_or_else(|| {
        PathBuf::from(format!("{}.{}", draft.suggested_file_name(), extension))
    });

    let contents = if json {
        serde_json::to_string_pretty(&draft.export())?
    } else {
        draft.assemble()
    };
    fs::write(&path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Exported '{}' to {}.", name, path.display());
    Ok(())
}

async fn analyze(model: &ModelConfig, draft: &Draft, locale: Locale) -> anyhow::Result<()> {
    if draft.is_empty() {
        bail!("nothing to analyze: the prompt is empty");
    }

    let analysis = llm::analyze_prompt(
        &model.api_key,
        &model.base_url,
        &model.model_name,
        &draft.assemble(),
        locale,
    )
    .await
    .context("analysis failed")?;

    println!("Score: {}/100", analysis.score);
    println!("\nStrengths:");
    for strength in &analysis.strengths {
        println!("  - {strength}");
    }
    println!("\nImprovements:");
    for improvement in &analysis.improvements {
        println!("  - {improvement}");
    }
    println!("\nRewritten prompt:\n{}", analysis.rewritten_prompt);
    if let Some(translated) = &analysis.translated_rewritten_prompt {
        println!(
            "\nRewritten prompt ({}):\n{}",
            locale.english_name(),
            translated
        );
    }
    Ok(())
}

async fn chat_send(
    store: FileStore,
    model: &ModelConfig,
    message: &str,
    load: Option<String>,
    save_as: Option<String>,
) -> anyhow::Result<()> {
    let mut repo = chat_repo(store);

    let mut messages = match &load {
        Some(name) => repo
            .get(name)
            .ok_or_else(|| anyhow!("no saved chat named '{name}'"))?
            .messages
            .clone(),
        None => Vec::new(),
    };
    messages.push(Message::user(message));

    let reply = llm::chat_reply(&model.api_key, &model.base_url, &model.model_name, &messages)
        .await
        .context("chat failed")?;
    println!("{}", reply.trim());
    messages.push(Message::model(reply.trim()));

    if let Some(name) = save_as {
        repo.save(SavedChat::new(name.trim(), messages))
            .context("failed to save chat")?;
        eprintln!("Saved chat '{}'.", name.trim());
    }
    Ok(())
}

fn chat_save(store: FileStore, name: &str, file: &PathBuf) -> anyhow::Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let messages: Vec<Message> =
        serde_json::from_str(&raw).context("transcript file is not a JSON array of messages")?;

    let mut repo = chat_repo(store);
    repo.save(SavedChat::new(name.trim(), messages))
        .context("failed to save chat")?;
    println!("Saved chat '{}'.", name.trim());
    Ok(())
}

fn chat_list(store: FileStore) -> anyhow::Result<()> {
    let mut repo = chat_repo(store);
    let items = repo.list();
    if items.is_empty() {
        println!("No saved chats yet.");
        return Ok(());
    }
    for chat in items {
        println!("{}  ({} messages)", chat.name, chat.messages.len());
    }
    Ok(())
}

fn chat_show(store: FileStore, name: &str) -> anyhow::Result<()> {
    let repo = chat_repo(store);
    let chat = repo
        .get(name)
        .ok_or_else(|| anyhow!("no saved chat named '{name}'"))?;
    for message in &chat.messages {
        let speaker = match message.role {
            tcrei_core::chat::Role::User => "You",
            tcrei_core::chat::Role::Model => "AI",
        };
        println!("{speaker}: {}", message.text);
    }
    Ok(())
}

fn chat_delete(store: FileStore, name: &str) -> anyhow::Result<()> {
    let mut repo = chat_repo(store);
    repo.delete(name).context("failed to delete chat")?;
    println!("Deleted chat '{name}'.");
    Ok(())
}

fn load_catalog(config: &TcreiCliConfig, locale: Locale) -> Catalog {
    get_catalog_dir(config).load_or_fallback(locale)
}

fn list_personas(config: &TcreiCliConfig, locale: Locale) -> anyhow::Result<()> {
    let catalog = load_catalog(config, locale);
    for persona in personas() {
        let localized = catalog.lookup(&persona.name_key);
        match localized {
            Some(name) if name != persona.english_name => {
                println!("{:<22} {} ({})", persona.key(), name, persona.english_name);
            }
            _ => println!("{:<22} {}", persona.key(), persona.english_name),
        }
        if let Some(description) = catalog.lookup(&persona.description_key) {
            println!("{:<22} {}", "", description);
        }
    }
    Ok(())
}

fn list_modules(
    config: &TcreiCliConfig,
    locale: Locale,
    module_id: Option<&str>,
) -> anyhow::Result<()> {
    let catalog = load_catalog(config, locale);
    let modules: Vec<&LearningModule> = match module_id {
        Some(id) => vec![find_module(id).ok_or_else(|| {
            let known: Vec<&str> = TCREI_MODULES.iter().map(|m| m.id).collect();
            anyhow!("unknown module '{}', expected one of: {}", id, known.join(", "))
        })?],
        None => TCREI_MODULES.iter().collect(),
    };
    for module in modules {
        let title = catalog.lookup(module.title_key).unwrap_or(module.id);
        println!("{} {}  [{:>3}%]", module.emoji, title, module.progress);
        for section in module.content {
            if let Some(text) = catalog.lookup(section.text_key) {
                println!("    {text}");
            }
            if let Some(example) = section.example {
                println!("    e.g. {example}");
            }
        }
    }
    Ok(())
}

fn list_languages(config: &TcreiCliConfig, locale: Locale) -> anyhow::Result<()> {
    let available = get_catalog_dir(config).available_locales();
    for candidate in Locale::ALL {
        let mut flags = Vec::new();
        if candidate == locale {
            flags.push("active");
        }
        if available.contains(&candidate) {
            flags.push("installed");
        }
        if candidate.is_rtl() {
            flags.push("rtl");
        }
        let suffix = if flags.is_empty() {
            String::new()
        } else {
            format!("  ({})", flags.join(", "))
        };
        println!(
            "{:<4} {} / {}{}",
            candidate.code(),
            candidate.native_name(),
            candidate.english_name(),
            suffix
        );
    }
    Ok(())
}
