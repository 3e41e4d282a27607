use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sentinel_feed::Feed;
use sentinel_tui::{
    events, ui, App, ChannelSource, DashboardConfig, FeedControl, Overrides, Settings,
    StreamSource, View,
};

#[derive(Parser, Debug)]
#[command(name = "sentinel")]
#[command(about = "Terminal dashboard for Himalayan Sentinel telemetry")]
struct Args {
    /// Settings file (TOML). Defaults to ./sentinel.toml when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Connect to a remote feed (host:port) instead of the local generator
    #[arg(short, long, conflicts_with = "serve")]
    connect: Option<String>,

    /// Run headless and serve the generated feed to TCP clients on this address
    #[arg(long)]
    serve: Option<String>,

    #[command(flatten)]
    overrides: Overrides,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    settings.apply(&args.overrides);
    let config = settings.resolve()?;

    let rt = tokio::runtime::Runtime::new()?;

    // Headless mode owns no terminal, so it logs to stderr
    if let Some(ref addr) = args.serve {
        init_logging(None)?;
        return rt.block_on(run_server(addr, &config));
    }

    if let Some(ref path) = config.log_file {
        init_logging(Some(path.as_path()))?;
    }

    if let Some(ref addr) = args.connect {
        return run_with_tcp(&rt, addr, &config);
    }

    run_with_local_feed(&rt, &config)
}

/// Install the tracing subscriber. `RUST_LOG` overrides the default `info` level.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }

    Ok(())
}

/// Serve the generated feed as newline-delimited JSON until Ctrl-C.
async fn run_server(addr: &str, config: &DashboardConfig) -> Result<()> {
    let mut builder = Feed::builder().interval(config.interval.clone());
    if let Some(seed) = config.seed {
        builder = builder.seed(seed);
    }
    let feed = builder.build()?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(addr = %listener.local_addr()?, "serving telemetry feed");

    tokio::select! {
        result = sentinel_feed::serve(listener, feed) => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("shutting down"),
    }

    Ok(())
}

/// Run against the in-process generator
fn run_with_local_feed(rt: &tokio::runtime::Runtime, config: &DashboardConfig) -> Result<()> {
    let (tx, source) = ChannelSource::create("local generator");
    let mut control =
        FeedControl::new(config.interval.clone(), config.seed, tx, rt.handle().clone());
    control.resume()?;

    let app = App::new(Box::new(source), config).with_feed_control(control);
    run_tui(app, config.refresh)
}

/// Run against a remote feed over TCP
fn run_with_tcp(rt: &tokio::runtime::Runtime, addr: &str, config: &DashboardConfig) -> Result<()> {
    println!("Connecting to {}...", addr);
    let source = rt
        .block_on(StreamSource::connect(addr, addr))
        .with_context(|| format!("failed to connect to {}", addr))?;

    let app = App::new(Box::new(source), config);
    run_tui(app, config.refresh)
}

/// Run the TUI until the user quits
fn run_tui(mut app: App, refresh: Duration) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal before printing a panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    app.reload_data();
    let result = run_app(&mut terminal, &mut app, refresh);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh: Duration,
) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    let mut last_draw: Option<Instant> = None;
    let mut dirty = true;

    while app.running {
        // Ages and link status drift with time, so redraw at least every `refresh`
        let stale = last_draw.is_none_or(|t| t.elapsed() >= refresh);
        let alerts_height = ui::common::alerts_height(app);

        if dirty || stale {
            terminal.draw(|frame| {
                let area = frame.area();

                if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                    let msg = format!(
                        "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                    );
                    let paragraph = ratatui::widgets::Paragraph::new(msg)
                        .alignment(ratatui::layout::Alignment::Center)
                        .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                    let centered = ratatui::layout::Rect::new(
                        0,
                        (area.height / 2).saturating_sub(2),
                        area.width,
                        5u16.min(area.height),
                    );
                    frame.render_widget(paragraph, centered);
                    return;
                }

                let chunks = Layout::vertical([
                    Constraint::Length(1),             // Header bar
                    Constraint::Length(alerts_height), // Alerts
                    Constraint::Length(1),             // Tabs
                    Constraint::Min(8),                // Content
                    Constraint::Length(1),             // Status bar
                ])
                .split(area);

                ui::common::render_header(frame, app, chunks[0]);
                ui::common::render_alerts(frame, app, chunks[1]);
                ui::common::render_tabs(frame, app, chunks[2]);

                match app.current_view {
                    View::Feed => ui::feed::render(frame, app, chunks[3]),
                    View::Metrics => ui::metrics::render(frame, app, chunks[3]),
                    View::Sources => ui::sources::render(frame, app, chunks[3]),
                }

                ui::common::render_status_bar(frame, app, chunks[4]);

                if app.show_detail_overlay {
                    ui::detail::render_overlay(frame, app, area);
                }

                if app.show_help {
                    ui::common::render_help(frame, app, area);
                }
            })?;
            last_draw = Some(Instant::now());
            dirty = false;
        }

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            dirty = true;
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Header (1) + alerts + tabs (1) + table border (1)
                    events::handle_mouse_event(app, mouse, alerts_height + 3);
                }
                _ => {}
            }
        }

        if app.reload_data() > 0 {
            dirty = true;
        }
    }

    Ok(())
}
