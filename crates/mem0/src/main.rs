// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! mem0 - command-line client for the Mem0 memory API.
//!
//! Every subcommand maps to one client operation and prints the decoded
//! response as pretty JSON on stdout.

mod signal;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mem0_client::{
    AddOptions, IdentityScope, ListOptions, Mem0Client, Mem0Error, Message, Metadata,
    SearchOptions, SearchRequest,
};
use serde::Serialize;
use tracing::error;

/// mem0 - record, search and manage memories.
#[derive(Parser, Debug)]
#[command(name = "mem0", version, about, long_about = None)]
struct Cli {
    /// Config file to load instead of the default search path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Identity scope flags shared by several subcommands.
#[derive(Args, Debug, Default, Clone)]
struct ScopeArgs {
    #[arg(long)]
    user_id: Option<String>,
    #[arg(long)]
    agent_id: Option<String>,
    #[arg(long)]
    app_id: Option<String>,
    #[arg(long)]
    run_id: Option<String>,
}

impl From<ScopeArgs> for IdentityScope {
    fn from(args: ScopeArgs) -> Self {
        IdentityScope {
            user_id: args.user_id,
            agent_id: args.agent_id,
            app_id: args.app_id,
            run_id: args.run_id,
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Record messages as memories. Prefix a message with `assistant:` or
    /// `system:` to change its role; the default is `user`.
    Add {
        #[command(flatten)]
        scope: ScopeArgs,
        /// Metadata as a JSON object.
        #[arg(long)]
        metadata: Option<String>,
        #[arg(required = true)]
        messages: Vec<String>,
    },
    /// Search memories.
    Search {
        query: String,
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long)]
        top_k: Option<u32>,
        /// API version: "" or "v2".
        #[arg(long, default_value = "")]
        api_version: String,
        /// Use the structured search route (threshold and limit).
        #[arg(long)]
        structured: bool,
        #[arg(long, default_value_t = 0.3)]
        threshold: f64,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// List memories.
    List {
        #[command(flatten)]
        scope: ScopeArgs,
        /// API version: "" or "v2".
        #[arg(long, default_value = "")]
        api_version: String,
        #[arg(long)]
        top_k: Option<u32>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Show one memory.
    Get { memory_id: String },
    /// Change a memory's text and/or metadata.
    Update {
        memory_id: String,
        #[arg(long)]
        text: Option<String>,
        /// Metadata as a JSON object.
        #[arg(long)]
        metadata: Option<String>,
    },
    /// Show the change history of a memory.
    History { memory_id: String },
    /// Delete one memory.
    Delete { memory_id: String },
    /// Delete every memory matching the scope.
    DeleteAll {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// List users, agents, apps and runs.
    Entities,
    /// Delete one entity, or all of them when no scope flag is given.
    DeleteEntities {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Rate a memory: POSITIVE, NEGATIVE or VERY_NEGATIVE.
    Feedback {
        memory_id: String,
        #[arg(long)]
        value: Option<String>,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Delete all memories.
    Reset {
        /// Required confirmation.
        #[arg(long)]
        yes: bool,
    },
    /// Check credentials.
    Ping,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => mem0_config::load_and_validate_path(path),
        None => mem0_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            mem0_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    let client = match Mem0Client::from_config(&config.api) {
        Ok(client) => client.with_cancellation(signal::install_signal_handler()),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    match run(&client, cli.command).await {
        Ok(output) => println!("{output}"),
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {e}");
            std::process::exit(if e.is_cancelled() { 130 } else { 1 });
        }
    }
}

/// Execute one subcommand and render its result.
async fn run(client: &Mem0Client, command: Commands) -> Result<String, Mem0Error> {
    match command {
        Commands::Add {
            scope,
            metadata,
            messages,
        } => {
            let messages: Vec<Message> = messages.iter().map(|m| parse_message(m)).collect();
            let mut options = AddOptions::for_scope(scope.into());
            options.metadata = parse_metadata(metadata.as_deref())?;
            to_json(&client.add(&messages, &options).await?)
        }
        Commands::Search {
            query,
            scope,
            top_k,
            api_version,
            structured,
            threshold,
            limit,
        } => {
            if structured {
                let request = SearchRequest {
                    query,
                    user_id: scope.user_id,
                    run_id: scope.run_id,
                    agent_id: scope.agent_id,
                    filters: None,
                    threshold,
                    limit,
                };
                to_json(&client.search_memories(&request).await?)
            } else {
                let options = SearchOptions {
                    version: api_version,
                    top_k,
                    ..SearchOptions::for_scope(scope.into())
                };
                to_json(&client.search(&query, &options).await?)
            }
        }
        Commands::List {
            scope,
            api_version,
            top_k,
            page,
            page_size,
        } => {
            let options = ListOptions {
                version: api_version,
                top_k,
                page,
                page_size,
                ..ListOptions::for_scope(scope.into())
            };
            to_json(&client.get_all(&options).await?)
        }
        Commands::Get { memory_id } => to_json(&client.get(&memory_id).await?),
        Commands::Update {
            memory_id,
            text,
            metadata,
        } => {
            let metadata = parse_metadata(metadata.as_deref())?;
            to_json(
                &client
                    .update(&memory_id, text.as_deref(), metadata.as_ref())
                    .await?,
            )
        }
        Commands::History { memory_id } => to_json(&client.history(&memory_id).await?),
        Commands::Delete { memory_id } => to_json(&client.delete(&memory_id).await?),
        Commands::DeleteAll { scope } => to_json(&client.delete_all(&scope.into()).await?),
        Commands::Entities => to_json(&client.users().await?),
        Commands::DeleteEntities { scope } => {
            to_json(&client.delete_entities(&scope.into()).await?)
        }
        Commands::Feedback {
            memory_id,
            value,
            reason,
        } => to_json(
            &client
                .feedback_str(&memory_id, value.as_deref(), reason.as_deref())
                .await?,
        ),
        Commands::Reset { yes } => {
            if !yes {
                return Err(Mem0Error::Validation(
                    "reset deletes every memory; pass --yes to confirm".to_string(),
                ));
            }
            to_json(&client.reset().await?)
        }
        Commands::Ping => to_json(&client.ping().await?),
    }
}

/// `assistant: text` → assistant message; anything without a known role
/// prefix is a user message.
fn parse_message(raw: &str) -> Message {
    if let Some((role, content)) = raw.split_once(':') {
        let role = role.trim();
        if matches!(role, "user" | "assistant" | "system") {
            return Message::new(role, content.trim_start());
        }
    }
    Message::user(raw)
}

fn parse_metadata(raw: Option<&str>) -> Result<Option<Metadata>, Mem0Error> {
    raw.map(|text| {
        serde_json::from_str::<Metadata>(text)
            .map_err(|e| Mem0Error::Validation(format!("metadata must be a JSON object: {e}")))
    })
    .transpose()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, Mem0Error> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Initialize the tracing subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("mem0={log_level},mem0_client={log_level},warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use clap::CommandFactory;
    use mem0_client::{ClientIdentity, HttpMethod};
    use mem0_test_utils::RecordingTransport;

    use super::*;

    fn client(transport: &RecordingTransport) -> Mem0Client {
        Mem0Client::with_transport(ClientIdentity::new("k"), Arc::new(transport.clone()))
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_search_with_scope_and_config() {
        let cli = Cli::try_parse_from([
            "mem0",
            "--config",
            "/tmp/mem0.toml",
            "search",
            "dinner ideas",
            "--user-id",
            "alex",
            "--top-k",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/mem0.toml")));
        match cli.command {
            Commands::Search {
                query,
                scope,
                top_k,
                structured,
                ..
            } => {
                assert_eq!(query, "dinner ideas");
                assert_eq!(scope.user_id.as_deref(), Some("alex"));
                assert_eq!(top_k, Some(5));
                assert!(!structured);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_requires_a_message() {
        assert!(Cli::try_parse_from(["mem0", "add", "--user-id", "alex"]).is_err());
    }

    #[test]
    fn message_role_prefixes() {
        assert_eq!(parse_message("assistant: Noted!"), Message::assistant("Noted!"));
        assert_eq!(parse_message("I like tea"), Message::user("I like tea"));
        assert_eq!(
            parse_message("note: not a role"),
            Message::user("note: not a role")
        );
    }

    #[test]
    fn metadata_must_be_an_object() {
        assert!(parse_metadata(None).unwrap().is_none());
        let parsed = parse_metadata(Some(r#"{"food":"vegetarian"}"#)).unwrap().unwrap();
        assert_eq!(parsed["food"], "vegetarian");
        assert!(parse_metadata(Some("[1,2]")).unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn reset_without_confirmation_sends_nothing() {
        let transport = RecordingTransport::new();
        let err = run(&client(&transport), Commands::Reset { yes: false })
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(transport.call_count().await, 0);
    }

    #[tokio::test]
    async fn delete_entities_command_prints_message() {
        let transport = RecordingTransport::new();
        let scope = ScopeArgs {
            user_id: Some("alex".into()),
            ..ScopeArgs::default()
        };
        let output = run(&client(&transport), Commands::DeleteEntities { scope })
            .await
            .unwrap();
        assert!(output.contains("Entity deleted successfully."));
        assert_eq!(transport.count_method(HttpMethod::Delete).await, 1);
    }
}
