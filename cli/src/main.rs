//! CLI entrypoint for mad
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod logging;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use clap::Parser;
use mad_application::{
    ControllerStatus, ConversationLogger, DebateController, DebateRepository,
    NoConversationLogger, NoProgressLogger, PageAdapterRegistry, ProgressLogger, StatusPoller,
    check_login_status,
};
use mad_domain::{DebateConfig, Provider};
use mad_infrastructure::{
    AdapterTimings, ConfigLoader, FileConfig, InMemoryDebateRepository, JsonlConversationLogger,
    ProviderRegistry, SessionStore, ShellBridge,
};
use mad_presentation::{
    Cli, ConsoleProgressLogger, DebateOutcome, EventRenderer, OutputConfig, OutputFormatter,
    ResultFormatter,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);

    let issues = config.validate();
    if !issues.is_empty() {
        let list = issues
            .iter()
            .map(|issue| format!("  - {}", issue))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("Invalid configuration:\n{}", list);
    }

    let _log_guard = logging::init(cli.verbose, config.logging.dir.as_deref());
    info!("Starting mad");

    let output = OutputConfig::resolve(
        config.output.format,
        config.output.color,
        config.output.show_progress,
        cli.output.map(Into::into),
        cli.quiet,
    );
    output.apply_color();

    if cli.check_login {
        return check_login(&config).await;
    }

    let Some(topic) = cli.topic.as_deref() else {
        bail!("A topic is required. Use --check-login to only check provider log-in.");
    };
    let debate_config = build_debate_config(topic, cli.context.as_deref(), &config)?;

    // === Dependency Injection ===
    let bridge = ShellBridge::spawn(
        &config.bridge.command,
        &config.bridge.args,
        config.bridge.request_timeout(),
    )
    .with_context(|| format!("Failed to start bridge '{}'", config.bridge.command))?;
    let sessions = SessionStore::new();
    let registry: Arc<dyn PageAdapterRegistry> = Arc::new(
        ProviderRegistry::connect(
            Arc::clone(&bridge),
            &sessions,
            &debate_config.all_providers(),
            AdapterTimings::default(),
        )
        .await
        .context("Failed to open provider pages")?,
    );
    let repository = Arc::new(InMemoryDebateRepository::new());

    let renderer = if output.show_progress {
        EventRenderer::new()
    } else {
        EventRenderer::hidden()
    };
    let progress_logger: Arc<dyn ProgressLogger> = if output.show_progress {
        Arc::new(ConsoleProgressLogger::new().with_spinner(renderer.spinner()))
    } else {
        Arc::new(NoProgressLogger)
    };

    let (tx, rx) = mpsc::unbounded_channel();
    let mut controller = DebateController::new(Arc::clone(&registry), repository.clone(), tx)
        .with_params(config.debate_params())
        .with_progress_logger(Arc::clone(&progress_logger))
        .with_conversation_logger(conversation_logger(&config));
    if config.poller.enabled {
        controller = controller.with_status_poller(Arc::new(StatusPoller::new(
            Arc::clone(&registry),
            progress_logger,
            config.poller.interval(),
        )));
    }
    let controller = Arc::new(controller);

    let render = tokio::spawn(async move { renderer.run(rx).await });
    let interrupt = tokio::spawn(cancel_on_ctrl_c(Arc::clone(&controller)));

    let result = controller.start(debate_config.clone()).await;

    // Drop every sender so the renderer drains and stops
    interrupt.abort();
    let _ = interrupt.await;
    drop(controller);
    let outcome = render.await.unwrap_or(DebateOutcome::Disconnected);
    debug!("Renderer finished: {:?}", outcome);

    repository.clear();
    drop(bridge);

    match result {
        Ok(result) => {
            println!(
                "{}",
                ResultFormatter.format(output.format, &debate_config, &result)
            );
            Ok(())
        }
        Err(e) if e.is_cancelled() => bail!("Debate cancelled"),
        Err(e) => Err(anyhow::Error::new(e).context("Debate failed")),
    }
}

/// CLI flags win over configuration files
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if !cli.participants.is_empty() {
        config.debate.participants = cli.participants.clone();
    }
    if let Some(judge) = &cli.judge {
        config.debate.judge = Some(judge.clone());
    }
    if let Some(preset) = &cli.preset {
        config.debate.preset = Some(preset.clone());
    }
    if let Some(threshold) = cli.threshold {
        config.debate.completion_threshold = threshold;
    }
    if let Some(command) = &cli.bridge {
        config.bridge.command = command.clone();
    }
}

/// Build the debate request from a validated configuration
fn build_debate_config(
    topic: &str,
    context: Option<&str>,
    config: &FileConfig,
) -> Result<DebateConfig> {
    let (participants, _) = config.debate.parse_participants();
    let judge = config
        .debate
        .parse_judge()?
        .ok_or_else(|| anyhow!("No judge configured. Set [debate] judge or pass --judge."))?;

    let mut debate = DebateConfig::new(topic, participants, judge)
        .with_threshold(config.debate.completion_threshold);
    if let Some(preset) = config.debate.parse_preset()? {
        debate = debate.with_preset(preset);
    }
    if let Some(context) = context {
        debate = debate.with_context(context);
    }
    debate.validate()?;
    Ok(debate)
}

fn conversation_logger(config: &FileConfig) -> Arc<dyn ConversationLogger> {
    let Some(path) = config.logging.conversation_log_path(Local::now()) else {
        return Arc::new(NoConversationLogger);
    };
    match JsonlConversationLogger::create(&path) {
        Ok(logger) => {
            info!("Conversation log: {}", path.display());
            Arc::new(logger)
        }
        Err(e) => {
            warn!(
                "Could not open conversation log {}: {}",
                path.display(),
                e
            );
            Arc::new(NoConversationLogger)
        }
    }
}

/// Cancel the running debate on every Ctrl-C
async fn cancel_on_ctrl_c(controller: Arc<DebateController>) {
    while tokio::signal::ctrl_c().await.is_ok() {
        match controller.status() {
            ControllerStatus::Running { session_id, .. } => {
                eprintln!("Cancelling after the current step...");
                controller.cancel(&session_id);
            }
            ControllerStatus::Idle => {}
        }
    }
}

async fn check_login(config: &FileConfig) -> Result<()> {
    let bridge = ShellBridge::spawn(
        &config.bridge.command,
        &config.bridge.args,
        config.bridge.request_timeout(),
    )
    .with_context(|| format!("Failed to start bridge '{}'", config.bridge.command))?;
    let sessions = SessionStore::new();
    let registry = ProviderRegistry::connect(
        bridge,
        &sessions,
        &Provider::ALL,
        AdapterTimings::default(),
    )
    .await
    .context("Failed to open provider pages")?;

    for status in check_login_status(&registry).await {
        let mark = if status.is_logged_in { "✓" } else { "✗" };
        let state = if status.is_logged_in {
            "logged in"
        } else {
            "not logged in"
        };
        println!(
            "{} {:<8} {} ({})",
            mark,
            status.provider.as_str(),
            state,
            sessions.session(status.provider).partition
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mad_domain::Preset;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mad").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut config = FileConfig::default();
        apply_cli_overrides(
            &mut config,
            &cli(&["-p", "gemini", "--judge", "claude", "--threshold", "70", "--bridge", "shell", "t"]),
        );
        assert_eq!(config.debate.participants, vec!["gemini"]);
        assert_eq!(config.debate.judge.as_deref(), Some("claude"));
        assert_eq!(config.debate.completion_threshold, 70);
        assert_eq!(config.bridge.command, "shell");
    }

    #[test]
    fn test_no_flags_keep_file_values() {
        let mut config = FileConfig::default();
        apply_cli_overrides(&mut config, &cli(&["topic"]));
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_build_debate_config() {
        let mut config = FileConfig::default();
        config.debate.preset = Some("decision".into());
        let debate = build_debate_config("Pick a queue", Some("Postgres only"), &config).unwrap();
        assert_eq!(debate.participants, vec![Provider::ChatGpt, Provider::Claude]);
        assert_eq!(debate.judge, Provider::Gemini);
        assert_eq!(debate.preset, Preset::Decision);
        assert_eq!(debate.context.as_deref(), Some("Postgres only"));
        assert_eq!(debate.completion_threshold, 90);
    }

    #[test]
    fn test_build_requires_judge_and_topic() {
        let mut config = FileConfig::default();
        assert!(build_debate_config("   ", None, &config).is_err());
        config.debate.judge = None;
        assert!(build_debate_config("topic", None, &config).is_err());
    }
}
