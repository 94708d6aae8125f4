//! `benchhand chat` - Interactive session or single-message mode.

use std::io::Write as _;
use std::sync::Arc;

use benchhand_agent::{ContextBuilder, DecisionEngine, Outcome, Session};
use benchhand_config::AppConfig;
use benchhand_memory::SnippetStore;
use benchhand_providers::OpenAiCompatProvider;
use benchhand_runlog::RunLog;
use benchhand_toolbox::{AutoConfirmer, Confirmer, LineSource, StdinConfirmer, ToolDispatcher};

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for the API key early, with a clear error
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    export BENCHHAND_API_KEY='sk-...'   (generic)");
        eprintln!("    export OPENAI_API_KEY='sk-...'      (for OpenAI direct)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    // The dispatcher and the snippet store expect their directories to exist
    std::fs::create_dir_all(config.tools_dir())?;
    std::fs::create_dir_all(config.memory_dir())?;

    // The prompt loop and the confirmation gate must share one stdin buffer
    let input = LineSource::stdin();
    let mut session = build_session(&config, input.clone())?;

    if let Some(text) = message {
        // Single message mode
        match session.handle_line(&text).await? {
            Outcome::Exit => {}
            Outcome::Continue(output) => {
                for line in output {
                    println!("{line}");
                }
            }
        }
        return Ok(());
    }

    banner(&config);
    repl(&mut session, &input).await
}

fn build_session(
    config: &AppConfig,
    input: Arc<LineSource>,
) -> Result<Session, Box<dyn std::error::Error>> {
    let api_key = config.api_key.clone().unwrap_or_default();
    let provider = Arc::new(OpenAiCompatProvider::new(
        "openai",
        &config.api_base_url,
        api_key,
    )?);

    let runlog = RunLog::new(config.runlog_path());
    let engine = DecisionEngine::new(provider, &config.model, runlog.clone());
    let context = ContextBuilder::new(
        config.workspace_root(),
        SnippetStore::new(config.memory_dir()),
    );

    let confirmer: Box<dyn Confirmer> = if config.auto_confirm {
        Box::new(AutoConfirmer)
    } else {
        Box::new(StdinConfirmer::new(input))
    };
    let dispatcher = ToolDispatcher::new(config.tools_dir(), confirmer);

    tracing::debug!(
        model = %config.model,
        workspace = %config.workspace_root().display(),
        auto_confirm = config.auto_confirm,
        "session assembled"
    );

    Ok(Session::new(
        engine,
        context,
        dispatcher,
        runlog,
        config.history_max_turns,
    ))
}

fn banner(config: &AppConfig) {
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        Benchhand - Interactive Session       ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Model:      {}", config.model);
    println!("  Endpoint:   {}", config.api_base_url);
    println!("  Workspace:  {}", config.workspace_root().display());
    println!(
        "  Confirm:    {}",
        if config.auto_confirm {
            "auto"
        } else {
            "ask before every run"
        }
    );
    println!();
    println!("  Type 'list tools' to see what is installed.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();
}

async fn repl(session: &mut Session, input: &LineSource) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        print!(">>> ");
        std::io::stdout().flush()?;

        let line = match input.next_line().await {
            Ok(Some(line)) => line,
            // EOF ends the session as cleanly as 'exit'
            Ok(None) => break,
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match session.handle_line(&line).await {
            Ok(Outcome::Exit) => break,
            Ok(Outcome::Continue(output)) => {
                for text in output {
                    println!("{text}");
                }
            }
            // One failed turn never ends the session
            Err(e) => println!("Error: {e}"),
        }
    }

    println!();
    println!("  Goodbye! 👋");
    Ok(())
}
