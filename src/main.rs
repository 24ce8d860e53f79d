use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use scramble::app::{App, AppScreen};
use scramble::config::Config;
use scramble::event::{AppEvent, EventHandler};
use scramble::generator::dictionary::Dictionary;
use scramble::store::json_store::JsonStore;
use scramble::ui::components::letter_board::LetterBoard;
use scramble::ui::components::progress_bar::ProgressBar;
use scramble::ui::components::restore_prompt::RestorePrompt;
use scramble::ui::components::summary::Summary;
use scramble::ui::layout::{AppLayout, centered_rect};
use scramble::ui::palette;

#[derive(Parser)]
#[command(
    name = "scramble",
    version,
    about = "Rebuild scrambled words letter by letter"
)]
struct Cli {
    #[arg(short, long, help = "Number of words per training")]
    tasks: Option<usize>,

    #[arg(short, long, help = "Wrong picks allowed per word")]
    errors: Option<u32>,

    #[arg(short, long, help = "JSON array of words to draw from")]
    words: Option<PathBuf>,

    #[arg(long, help = "Discard any unfinished training instead of offering to resume it")]
    fresh: bool,

    #[arg(long, help = "Write the effective settings to the config file")]
    save_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("loading config")?;
    if let Some(tasks) = cli.tasks {
        config.max_task_count = tasks;
    }
    if let Some(errors) = cli.errors {
        config.max_err_count = errors;
    }
    if let Some(words) = cli.words {
        config.word_list = Some(words.to_string_lossy().to_string());
    }
    config.validate();
    if cli.save_config {
        config.save().context("saving config")?;
    }

    init_logging(&config.data_path())?;

    let dictionary = match config.word_list.as_deref() {
        Some(path) => Dictionary::from_file(Path::new(path))?,
        None => Dictionary::load()?,
    };
    let store = JsonStore::with_base_dir(config.data_path())?;
    let mut app = App::new(
        config,
        dictionary,
        Box::new(store),
        SmallRng::from_entropy(),
        cli.fresh,
    )?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(50));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("{err:#}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Log to a file under the data dir; the terminal belongs to the UI.
fn init_logging(data_dir: &Path) -> Result<()> {
    fs::create_dir_all(data_dir)?;
    let log_path = data_dir.join("scramble.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("SCRAMBLE_LOG").unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.tick(),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Only process Press events; Repeat would pick the same letter twice
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::RestorePrompt => handle_restore_key(app, key),
        AppScreen::Training => handle_training_key(app, key),
        AppScreen::Summary => handle_summary_key(app, key),
    }
}

fn handle_restore_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => app.accept_restore(),
        KeyCode::Char('n') | KeyCode::Esc => app.decline_restore(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_training_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('[') => app.view_previous_task(),
        KeyCode::Char(']') => app.view_next_task(),
        KeyCode::Left => app.move_letter_cursor(false),
        KeyCode::Right => app.move_letter_cursor(true),
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.pick_selected_letter();
        }
        KeyCode::Char(ch) if ch.is_ascii_alphabetic() => {
            app.type_letter(ch);
        }
        _ => {}
    }
}

fn handle_summary_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') | KeyCode::Enter => {
            if let Err(e) = app.new_training() {
                tracing::error!("cannot start a new training: {e:#}");
                app.should_quit = true;
            }
        }
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(palette::BG)), area);

    match app.screen {
        AppScreen::RestorePrompt => {
            let prompt = RestorePrompt {
                progress: app.saved_progress(),
            };
            frame.render_widget(prompt, centered_rect(50, 30, area));
        }
        AppScreen::Training => render_training(frame, app),
        AppScreen::Summary => {
            frame.render_widget(Summary::new(&app.training), centered_rect(50, 50, area));
        }
    }
}

fn render_training(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    let training = &app.training;

    let mut header_spans = vec![
        Span::styled(
            " scramble ",
            Style::default()
                .fg(palette::HEADER_FG)
                .bg(palette::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                " Mistakes: {} | Clean words: {}",
                training.error_count(),
                training.tasks_without_errors()
            ),
            Style::default().fg(palette::MUTED),
        ),
    ];
    if app.viewed_task.is_some() {
        header_spans.push(Span::styled(
            "  (reviewing, type to return)",
            Style::default().fg(palette::WARNING),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(header_spans)), layout.header);

    if let Some(task) = app.displayed_task() {
        let selected = app.displaying_live_task().then_some(app.letter_cursor);
        let board = LetterBoard::new(
            task,
            app.displayed_task_index() + 1,
            training.max_task_count(),
        )
        .selected(selected);
        frame.render_widget(board, layout.main);
    }

    if let Some(progress_area) = layout.progress {
        let bar = ProgressBar::new(
            "Words",
            training.current_task_index(),
            training.max_task_count(),
        );
        frame.render_widget(bar, progress_area);
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        " [a-z] Type  [\u{2190}/\u{2192} Enter] Pick  [ [ / ] ] Review  [Esc] Quit (progress is kept) ",
        Style::default().fg(palette::MUTED),
    )));
    frame.render_widget(footer, layout.footer);
}
