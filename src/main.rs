use retrochat::adapters::{PlayerCommandSink, ReqwestHttpClient, TerminalBell};
use retrochat::app::App;
use retrochat::cli::{parse_args, run_cli_command, CliCommand};
use retrochat::client::ChatClient;
use retrochat::config::ChatConfig;
use retrochat::logging::{default_log_path, init_file_logging, init_stdout_logging};
use retrochat::mock_server::{api_base as mock_api_base, start_mock_server};
use retrochat::session::{Preferences, SessionStore};
use retrochat::sfx::Sfx;
use retrochat::terminal::{setup_panic_hook, TerminalManager};
use retrochat::traits::SoundSink;
use retrochat::ui;

use color_eyre::{eyre::eyre, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::Terminal;
use std::sync::Arc;
use std::time::Duration;

/// Redraw interval while nothing else happens.
const TICK: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    let command = parse_args(std::env::args());
    if run_cli_command(&command) {
        return Ok(());
    }

    color_eyre::install()?;
    let config = ChatConfig::from_env()?;

    let runtime = tokio::runtime::Runtime::new()?;
    match command {
        CliCommand::Mock => runtime.block_on(run_mock_only(&config)),
        _ => runtime.block_on(run_tui(config)),
    }
}

async fn run_mock_only(config: &ChatConfig) -> Result<()> {
    init_stdout_logging(&config.log_filter);

    let (handle, addr) = start_mock_server(config.mock_port, config.mock_latency).await?;
    println!("Mock chat endpoint: http://{}/api/chat (Ctrl+C to stop)", addr);

    tokio::signal::ctrl_c().await?;
    handle.abort();
    Ok(())
}

fn sound_sink(config: &ChatConfig) -> Arc<dyn SoundSink> {
    match config.sfx_player.as_deref().and_then(PlayerCommandSink::parse) {
        Some(player) => {
            tracing::info!(program = player.program(), "playing cues through external player");
            Arc::new(player)
        }
        None => Arc::new(TerminalBell::stdout()),
    }
}

async fn run_tui(config: ChatConfig) -> Result<()> {
    if let Some(path) = default_log_path() {
        if let Err(e) = init_file_logging(&path, &config.log_filter) {
            eprintln!("Warning: could not open log file {}: {}", path.display(), e);
        }
    }
    tracing::info!(version = retrochat::cli::VERSION, "starting");

    let (mock_handle, api_base) = if config.use_mocks {
        let (handle, addr) = start_mock_server(config.mock_port, config.mock_latency).await?;
        (Some(handle), mock_api_base(addr))
    } else {
        (None, config.effective_api_base())
    };

    tracing::info!(api_base = %api_base, "chat endpoint");
    let http = ReqwestHttpClient::with_timeout(config.request_timeout)?;
    let client = ChatClient::new(http, api_base);

    let session_id = SessionStore::new().session_id();
    let prefs_path = Preferences::default_path();
    let prefs = prefs_path
        .as_deref()
        .map(Preferences::load_from)
        .unwrap_or_default();

    let sfx = Sfx::new(sound_sink(&config), prefs.sfx_enabled);
    let mut app = App::new(
        Arc::new(client),
        config.typewriter,
        sfx.clone(),
        session_id,
    );
    if let Some(path) = prefs_path {
        app = app.with_prefs_path(path);
    }

    setup_panic_hook();
    let mut terminal_manager = TerminalManager::new()?;
    let result = run_app(terminal_manager.terminal(), &mut app).await;
    terminal_manager.restore()?;

    sfx.stop_all();
    if let Some(handle) = mock_handle {
        handle.abort();
    }
    tracing::info!("exiting");
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let mut message_rx = app
        .message_rx
        .take()
        .ok_or_else(|| eyre!("message receiver already taken"))?;
    let mut tick = tokio::time::interval(TICK);

    loop {
        terminal.draw(|f| ui::render(f, app))?;
        if app.should_quit {
            return Ok(());
        }

        tokio::select! {
            _ = tick.tick() => {}

            event = event_stream.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::error!("terminal event error: {}", e);
                    return Err(e.into());
                }
                None => return Ok(()),
            },

            Some(message) = message_rx.recv() => {
                app.handle_message(message);
                // Apply everything already queued before the next draw.
                while let Ok(message) = message_rx.try_recv() {
                    app.handle_message(message);
                }
            }
        }
    }
}
