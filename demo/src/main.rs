//! agentdeck — command-line console
//!
//! Drives the same drafts a graphical console would: local agents,
//! orchestrators, and MCP entries. Records are printed as JSON on stdout;
//! orchestrators are created against the provisioning backend named in the
//! console configuration.
//!
//! Usage:
//!   cargo run -p demo -- templates
//!   cargo run -p demo -- check-config --llm-type openai --file block.txt
//!   cargo run -p demo -- create-local --name Researcher --description "Finds papers" \
//!       --roster roster.json --session thread-1 --mcp "Search@http://localhost:9100"
//!   cargo run -p demo -- add-mcp --name Search --url http://localhost:9100 \
//!       --header Authorization=Bearer --session thread-1
//!   cargo run -p demo -- create-orchestrator --name Planner --instructions "Plan." \
//!       --roster roster.json --session thread-1 --agent "Researcher@http://localhost:9001"

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use agentdeck_client::HttpBackend;
use agentdeck_config::ConsoleConfig;
use agentdeck_contracts::{
    agent::{AgentKey, SessionId},
    error::{DeckError, DeckResult},
    llm::LlmType,
};
use agentdeck_core::{
    config_block, templates, AgentDraft, InMemoryRoster, McpDraft, UniquenessChecker,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// agentdeck — define agents, check LLM configuration, create orchestrators.
#[derive(Parser)]
#[command(
    name = "agentdeck",
    about = "Agent definition console",
    long_about = "Builds local agent, MCP, and orchestrator records, validates LLM\n\
                  configuration blocks, and creates orchestrators on the backend."
)]
struct Cli {
    /// Console configuration TOML (backend url, draft defaults).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the default configuration template for one or every provider.
    Templates {
        #[arg(long)]
        llm_type: Option<LlmType>,
    },
    /// Check a KEY=VALUE block against a provider's template.
    CheckConfig {
        #[arg(long)]
        llm_type: LlmType,
        #[arg(long)]
        file: PathBuf,
    },
    /// Build a local agent record.
    CreateLocal {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        instructions: Option<String>,
        #[arg(long)]
        llm_type: Option<LlmType>,
        /// File holding the KEY=VALUE configuration block.
        #[arg(long)]
        config_file: Option<PathBuf>,
        /// MCP servers to attach, as NAME@URL.
        #[arg(long = "mcp")]
        mcp: Vec<String>,
        /// JSON array of known agents.
        #[arg(long)]
        roster: Option<PathBuf>,
        #[arg(long)]
        session: String,
    },
    /// Build an MCP server record.
    AddMcp {
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
        /// Header to send to the server, as KEY=VALUE.
        #[arg(long = "header")]
        header: Vec<String>,
        #[arg(long)]
        session: String,
    },
    /// Build an orchestrator and create it on the backend.
    CreateOrchestrator {
        #[arg(long)]
        name: String,
        #[arg(long)]
        instructions: String,
        #[arg(long)]
        llm_type: Option<LlmType>,
        #[arg(long)]
        config_file: Option<PathBuf>,
        /// A2A agents to orchestrate, as NAME@URL.
        #[arg(long = "agent")]
        agent: Vec<String>,
        #[arg(long)]
        roster: Option<PathBuf>,
        #[arg(long)]
        session: String,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match load_config(cli.config.as_deref()) {
        Ok(config) => run(cli.command, &config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Command, config: &ConsoleConfig) -> DeckResult<()> {
    match command {
        Command::Templates { llm_type } => {
            print_templates(llm_type);
            Ok(())
        }
        Command::CheckConfig { llm_type, file } => check_config(llm_type, &file),
        Command::CreateLocal {
            name,
            description,
            instructions,
            llm_type,
            config_file,
            mcp,
            roster,
            session,
        } => {
            let roster = load_roster(roster.as_deref())?;
            let mut draft = config.local_draft(SessionId::new(session));
            draft.set_name(&name)?;
            draft.set_description(&description)?;
            if let Some(instructions) = instructions {
                draft.set_instructions(&instructions)?;
            }
            apply_llm(&mut draft, llm_type, config_file.as_deref())?;
            select(&mut draft, &mcp)?;
            let agent = draft.build(&roster)?;
            print_json(&agent)
        }
        Command::AddMcp {
            name,
            url,
            header,
            session,
        } => {
            let mut draft = McpDraft::new(SessionId::new(session));
            draft.set_name(&name)?;
            draft.set_url(&url);
            for (index, raw) in header.iter().enumerate() {
                let (key, value) = split_pair(raw, '=', "header")?;
                if index > 0 {
                    draft.add_header_row();
                }
                draft.set_header(index, key, value);
            }
            let agent = draft.submit()?;
            print_json(&agent)
        }
        Command::CreateOrchestrator {
            name,
            instructions,
            llm_type,
            config_file,
            agent,
            roster,
            session,
        } => {
            let roster = load_roster(roster.as_deref())?;
            let mut draft = config.orchestrator_draft(SessionId::new(session));
            draft.set_name(&name)?;
            draft.set_instructions(&instructions)?;
            apply_llm(&mut draft, llm_type, config_file.as_deref())?;
            select(&mut draft, &agent)?;
            let record = draft.build(&roster)?;

            let backend = HttpBackend::from_config(&config.backend)?;
            let checker = UniquenessChecker::new(Box::new(backend));
            let outcome = checker.create_orchestrator_checked(&roster, &record).await;
            print_json(&outcome)
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> DeckResult<ConsoleConfig> {
    match path {
        Some(path) => ConsoleConfig::from_file(path),
        None => Ok(ConsoleConfig::default()),
    }
}

fn load_roster(path: Option<&Path>) -> DeckResult<InMemoryRoster> {
    match path {
        Some(path) => InMemoryRoster::from_json_str(&read_file(path)?),
        None => Ok(InMemoryRoster::new()),
    }
}

fn read_file(path: &Path) -> DeckResult<String> {
    std::fs::read_to_string(path).map_err(|e| DeckError::InvalidInput {
        reason: format!("failed to read '{}': {}", path.display(), e),
    })
}

/// Switch provider and commit the block from `config_file`, if given.
fn apply_llm(
    draft: &mut AgentDraft,
    llm_type: Option<LlmType>,
    config_file: Option<&Path>,
) -> DeckResult<()> {
    if let Some(llm_type) = llm_type {
        draft.select_llm_type(llm_type)?;
    }
    if let Some(path) = config_file {
        draft.edit_config(&read_file(path)?)?;
        draft.commit_config()?;
    }
    Ok(())
}

/// Select each NAME@URL sub-agent.
fn select(draft: &mut AgentDraft, picks: &[String]) -> DeckResult<()> {
    for raw in picks {
        let (name, url) = split_pair(raw, '@', "sub-agent")?;
        let key = AgentKey::new(name, url);
        debug!(key = %key, "selecting sub-agent");
        draft.toggle_sub_agent(key)?;
    }
    Ok(())
}

fn split_pair<'a>(raw: &'a str, sep: char, what: &str) -> DeckResult<(&'a str, &'a str)> {
    raw.split_once(sep)
        .map(|(a, b)| (a.trim(), b.trim()))
        .ok_or_else(|| DeckError::InvalidInput {
            reason: format!("{} '{}' must contain '{}'", what, raw, sep),
        })
}

fn print_templates(llm_type: Option<LlmType>) {
    let selected: Vec<LlmType> = match llm_type {
        Some(t) => vec![t],
        None => LlmType::ALL.to_vec(),
    };
    for (i, t) in selected.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("# {}", t);
        println!("{}", templates::default_template(*t));
    }
}

fn check_config(llm_type: LlmType, file: &Path) -> DeckResult<()> {
    let text = read_file(file)?;
    let map = config_block::check_against_template(&text, templates::default_template(llm_type))?;
    println!("{}", config_block::serialize(&map));
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> DeckResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| DeckError::ConfigError {
        reason: format!("failed to encode output: {}", e),
    })?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_pair_trims_both_halves() {
        let (name, url) = split_pair(" Writer @ http://localhost:9001 ", '@', "sub-agent").unwrap();
        assert_eq!(name, "Writer");
        assert_eq!(url, "http://localhost:9001");
    }

    #[test]
    fn missing_separator_is_recoverable_input_error() {
        let err = split_pair("Writer", '@', "sub-agent").unwrap_err();
        assert!(matches!(err, DeckError::InvalidInput { .. }));
        assert!(err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "invalid input: sub-agent 'Writer' must contain '@'"
        );
    }

    #[test]
    fn bad_selection_leaves_draft_untouched() {
        let mut draft = AgentDraft::orchestrator(SessionId::new("s"));
        let picks = vec!["Writer".to_string()];
        assert!(select(&mut draft, &picks).is_err());
        assert!(draft.selected().is_empty());
    }

    #[test]
    fn unreadable_roster_is_recoverable() {
        let err = load_roster(Some(Path::new("/nonexistent/roster.json"))).unwrap_err();
        assert!(matches!(err, DeckError::InvalidInput { .. }));
        assert!(err.is_recoverable());
    }
}
