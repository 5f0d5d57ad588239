mod app;
mod event;
mod ui;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use paramlab::catalog::Catalog;
use paramlab::config::Config;
use paramlab::logging;
use paramlab::session::{Action, Mode};
use paramlab::session::preview::sandbox_preview;
use paramlab::session::values::StepDirection;

use app::App;
use event::{AppEvent, EventHandler};
use ui::components::category_bar::CategoryBar;
use ui::components::detail_panel::DetailPanel;
use ui::components::header::Header;
use ui::components::mode_tabs::ModeTabs;
use ui::components::param_list::ParamList;
use ui::components::quiz_view::QuizView;
use ui::components::sandbox_view::SandboxPreview;
use ui::layout::{AppLayout, centered_rect, pack_hint_lines, split_detail};
use ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "paramlab",
    version,
    about = "Terminal lab for learning LLM API request parameters"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Seed for quiz option order")]
    seed: Option<u64>,

    #[arg(short, long, help = "Starting mode (explore, quiz, sandbox)")]
    mode: Option<Mode>,

    #[arg(long, help = "Print the parameter catalog as JSON and exit")]
    export_catalog: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let catalog = Catalog::builtin().context("built-in catalog is invalid")?;

    if cli.export_catalog {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("Ignoring unreadable config: {e:#}");
        Config::default()
    });
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(mode) = cli.mode {
        config.start_mode = mode;
    }
    config.normalize(&Theme::available_themes());

    // Logging is best-effort; the app works without it
    let log_path = logging::log_path();
    if let Err(e) = logging::init(&log_path, &config.log_level) {
        eprintln!("Logging disabled: {e:#}");
    }

    let seed = cli
        .seed
        .or(config.quiz_seed)
        .unwrap_or_else(rand::random::<u64>);
    let mut app = App::new(catalog, config, seed);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new();

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.save_config();

    if let Err(err) = result {
        tracing::error!("app loop failed: {err:#}");
        eprintln!("Error: {err:?}");
    }

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
            AppEvent::Resize => {}
        }

        if app.should_quit {
            tracing::info!(
                learned = app.session.learned.len(),
                score = app.session.quiz.score,
                "quitting"
            );
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.editing.is_some() {
        app.handle_edit_key(key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            app.switch_mode(app.session.mode.next());
            return;
        }
        KeyCode::BackTab => {
            app.switch_mode(app.session.mode.prev());
            return;
        }
        KeyCode::Char('t') => {
            app.cycle_theme();
            return;
        }
        _ => {}
    }

    match app.session.mode {
        Mode::Explore => handle_explore_key(app, key),
        Mode::Quiz => handle_quiz_key(app, key),
        Mode::Sandbox => handle_sandbox_key(app, key),
    }
}

fn handle_explore_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Left | KeyCode::Char('h') => app.step_focused(StepDirection::Down),
        KeyCode::Right | KeyCode::Char('l') => app.step_focused(StepDirection::Up),
        KeyCode::Char('[') => app.cycle_filter(false),
        KeyCode::Char(']') => app.cycle_filter(true),
        KeyCode::Enter => app.open_detail(),
        KeyCode::Esc => app.dispatch(Action::ClearSelection),
        KeyCode::Char('i') | KeyCode::Char('e') => app.begin_edit(),
        KeyCode::Char('m') => app.mark_focused_learned(),
        KeyCode::Char('x') => app.dispatch(Action::ToggleExamples),
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Enter => {
            if app.session.quiz.answered {
                app.next_question();
            } else {
                app.answer_quiz(None);
            }
        }
        KeyCode::Char(ch @ '1'..='4') => {
            let index = (ch as u8 - b'1') as usize;
            app.answer_quiz(Some(index));
        }
        _ => {}
    }
}

fn handle_sandbox_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Left | KeyCode::Char('h') => app.step_focused(StepDirection::Down),
        KeyCode::Right | KeyCode::Char('l') => app.step_focused(StepDirection::Up),
        KeyCode::Char('i') | KeyCode::Char('e') => app.begin_edit(),
        _ => {}
    }
}

fn footer_hints(app: &App) -> Vec<&'static str> {
    if app.editing.is_some() {
        return vec!["[Enter] Apply", "[Esc] Cancel", "[Ctrl-U] Clear"];
    }
    let mut hints = match app.session.mode {
        Mode::Explore => vec![
            "[j/k] Move",
            "[h/l] Adjust",
            "[i] Edit",
            "[Enter] Details",
            "[m] Learned",
            "[[/]] Category",
            "[x] Examples",
        ],
        Mode::Quiz => vec!["[j/k] Move", "[1-4] Answer", "[Enter] Answer/Next"],
        Mode::Sandbox => vec!["[j/k] Move", "[h/l] Adjust", "[i] Edit"],
    };
    hints.extend(["[Tab] Mode", "[t] Theme", "[q] Quit"]);
    hints
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let hints = footer_hints(app);
    let hint_lines = pack_hint_lines(&hints, area.width as usize);
    let layout = AppLayout::new(area, hint_lines.len() as u16);

    frame.render_widget(
        Header::new(
            app.session.learned.len(),
            app.catalog.len(),
            app.session.progress(&app.catalog),
            app.theme,
        ),
        layout.header,
    );
    frame.render_widget(ModeTabs::new(app.session.mode, app.theme), layout.tabs);

    match app.session.mode {
        Mode::Explore => render_explore(frame, app, &layout),
        Mode::Quiz => render_quiz(frame, app, layout.body),
        Mode::Sandbox => render_sandbox(frame, app, &layout),
    }

    let footer_lines: Vec<Line> = hint_lines
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_muted()))))
        .collect();
    frame.render_widget(Paragraph::new(footer_lines), layout.footer);
}

fn render_explore(frame: &mut ratatui::Frame, app: &App, layout: &AppLayout) {
    let bar_height = CategoryBar::height(&app.catalog, layout.body.width);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(bar_height), Constraint::Min(0)])
        .split(layout.body);

    frame.render_widget(
        CategoryBar::new(&app.catalog, &app.session.filter, app.theme),
        rows[0],
    );

    let selected = app
        .session
        .selected
        .as_deref()
        .and_then(|id| app.catalog.get(id));

    let (list_area, detail_area) = match selected {
        Some(_) if layout.tier.side_panel() => {
            let (list, detail) = split_detail(rows[1]);
            (list, Some(detail))
        }
        Some(_) => (rows[1], Some(centered_rect(80, 80, rows[1]))),
        None => (rows[1], None),
    };

    let editing = app
        .editing
        .as_ref()
        .map(|field| (field.id.as_str(), &field.input));
    let list = ParamList::new(
        app.visible_params(),
        &app.catalog,
        &app.session,
        app.explore_cursor,
        app.theme,
    )
    .editing(editing);
    frame.render_widget(list, list_area);

    if let (Some(param), Some(area)) = (selected, detail_area) {
        frame.render_widget(
            DetailPanel::new(param, &app.catalog, &app.session, app.theme),
            area,
        );
    }
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let options = app.quiz_options();
    let view = QuizView::new(
        &app.catalog,
        &app.session.quiz,
        &options,
        app.quiz_cursor,
        app.theme,
    );
    frame.render_widget(view, centered_rect(70, 90, area));
}

fn render_sandbox(frame: &mut ratatui::Frame, app: &App, layout: &AppLayout) {
    let preview = sandbox_preview(&app.session.values);

    let (controls_area, preview_area) = if layout.tier.side_panel() {
        split_detail(layout.body)
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(SandboxPreview::height(&preview)),
            ])
            .split(layout.body);
        (rows[0], rows[1])
    };

    let editing = app
        .editing
        .as_ref()
        .map(|field| (field.id.as_str(), &field.input));
    let list = ParamList::new(
        app.sandbox_params(),
        &app.catalog,
        &app.session,
        app.sandbox_cursor,
        app.theme,
    )
    .editing(editing)
    .compact(true);
    frame.render_widget(list, controls_area);

    frame.render_widget(SandboxPreview::new(&preview, app.theme), preview_area);
}
