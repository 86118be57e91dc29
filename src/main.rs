use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dayboard::calendar::{first_of_month, month_buckets};
use dayboard::clock::SystemClock;
use dayboard::command::{announce, resolve_task_id};
use dayboard::config::RuntimeConfig;
use dayboard::domain::{
    estimate_badge, format_clock, format_focus, Category, ContextTag, Mood, Priority, TaskFilter,
};
use dayboard::input::{handle_key, KeyAction};
use dayboard::logging::{self, LogTarget};
use dayboard::persistence::{ensure_dir, init_local_dayboard, JsonFileStore};
use dayboard::report::{progress, task_summary, weekly_mood_stats, write_summary, ProgressKind, MOOD_STATS_WINDOW};
use dayboard::ticker::{self, Ticker};
use dayboard::ui::{self, view::DashboardView};
use dayboard::{Command, Session};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

type FileSession = Session<JsonFileStore, SystemClock>;

#[derive(Parser)]
#[command(name = "dayboard")]
#[command(about = "A calm daily productivity hub: tasks, focus timers, mood log and progress rings", long_about = None)]
struct Cli {
    /// Data directory. Defaults to the nearest .dayboard, then ~/.dayboard
    #[arg(long, global = true, env = "DAYBOARD_DIR")]
    data_dir: Option<PathBuf>,

    /// Log filter, e.g. "dayboard=debug"
    #[arg(long, global = true, env = "DAYBOARD_LOG")]
    log: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .dayboard directory in the current directory
    Init,
    /// Add a task
    Add {
        text: String,
        #[arg(short, long, default_value = "medium")]
        priority: Priority,
        #[arg(short, long, default_value = "personal")]
        category: Category,
        /// Estimated minutes (0 for none)
        #[arg(short, long, default_value_t = 0)]
        estimate: u32,
    },
    /// List tasks
    List {
        #[arg(short, long, default_value = "all")]
        filter: TaskFilter,
    },
    /// Change a task's text, priority or category
    Edit {
        /// Task id or unique id prefix
        id: String,
        text: String,
        #[arg(short, long)]
        priority: Option<Priority>,
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Toggle a task's completion
    Done { id: String },
    /// Delete a task
    Rm { id: String },
    /// Remove all completed tasks
    Clear,
    /// Control the focus timer
    Timer {
        #[command(subcommand)]
        action: TimerAction,
    },
    /// Log or review moods
    Mood {
        #[command(subcommand)]
        action: MoodAction,
    },
    /// Show progress and statistics
    Stats,
    /// Show task activity for a month
    Calendar {
        /// Month to show (YYYY-MM). Defaults to the current month.
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Write a Markdown daily summary
    Report {
        /// Output file path. Defaults to <data-dir>/report-YYYY-MM-DD.md
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Toggle dark/light theme
    Theme,
    /// Toggle between dashboard and calendar view
    View,
}

#[derive(Subcommand)]
enum TimerAction {
    Start { id: String },
    Stop { id: String },
    Toggle { id: String },
    /// Show the running timer, if any
    Status,
}

#[derive(Subcommand)]
enum MoodAction {
    /// Commit today's mood
    Log {
        /// 1-5 or a label such as "great"
        mood: Mood,
        #[arg(short, long)]
        energy: Option<u8>,
        /// Comma-separated context tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<ContextTag>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Show recent entries and weekly statistics
    Show {
        #[arg(short, long, default_value_t = MOOD_STATS_WINDOW)]
        days: usize,
    },
    /// Load today's entry back into the draft
    Edit,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = RuntimeConfig::resolve(cli.data_dir, cli.log)?;

    match cli.command {
        Some(Commands::Init) => run_init(),
        Some(command) => {
            logging::init(&config.log_filter, LogTarget::Stderr)?;
            let mut session = open_session(&config)?;
            run_command(&mut session, &config, command)
        }
        None => run_tui(&config),
    }
}

/// Create `.dayboard` in the working directory
fn run_init() -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let dir = init_local_dayboard(&cwd)?;
    println!("Initialized dayboard directory: {}", dir.display());
    println!();
    println!("Dayboard will now use this local directory for its data.");
    println!("Run 'dayboard' to open the dashboard.");
    Ok(())
}

fn open_session(config: &RuntimeConfig) -> Result<FileSession> {
    Session::open(JsonFileStore::new(config.state_file()), SystemClock)
}

/// Dispatch a command and print its confirmation
fn dispatch_and_announce(session: &mut FileSession, command: Command) -> Result<()> {
    let outcome = session.execute(command)?;
    if let Some(message) = announce(session.state(), &outcome) {
        println!("{}", message);
    }
    Ok(())
}

fn run_command(session: &mut FileSession, config: &RuntimeConfig, command: Commands) -> Result<()> {
    match command {
        Commands::Init => run_init(),
        Commands::Add {
            text,
            priority,
            category,
            estimate,
        } => dispatch_and_announce(
            session,
            Command::AddTask {
                text,
                priority,
                category,
                estimated_minutes: estimate,
            },
        ),
        Commands::List { filter } => {
            print_tasks(session, filter);
            Ok(())
        }
        Commands::Edit {
            id,
            text,
            priority,
            category,
        } => {
            let id = resolve_task_id(session.state(), &id)?;
            dispatch_and_announce(
                session,
                Command::EditTask {
                    id,
                    text,
                    priority,
                    category,
                },
            )
        }
        Commands::Done { id } => {
            let id = resolve_task_id(session.state(), &id)?;
            dispatch_and_announce(session, Command::ToggleComplete(id))
        }
        Commands::Rm { id } => {
            let id = resolve_task_id(session.state(), &id)?;
            dispatch_and_announce(session, Command::DeleteTask(id))
        }
        Commands::Clear => dispatch_and_announce(session, Command::ClearCompleted),
        Commands::Timer { action } => run_timer(session, action),
        Commands::Mood { action } => run_mood(session, action),
        Commands::Stats => {
            print_stats(session);
            Ok(())
        }
        Commands::Calendar { month } => {
            let today = session.now().date_naive();
            let month = match month {
                Some(raw) => NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
                    .map_err(|e| anyhow::anyhow!("Invalid month format. Use YYYY-MM: {}", e))?,
                None => first_of_month(today),
            };
            print_calendar(session, month, today);
            Ok(())
        }
        Commands::Report { output } => {
            let path = write_summary(session.state(), session.now(), &config.data_dir, output)?;
            println!("Report generated: {}", path.display());
            Ok(())
        }
        Commands::Theme => dispatch_and_announce(session, Command::ToggleTheme),
        Commands::View => {
            dispatch_and_announce(session, Command::ToggleView)?;
            println!("Dashboard opens in {:?} view", session.state().current_view);
            Ok(())
        }
    }
}

fn run_timer(session: &mut FileSession, action: TimerAction) -> Result<()> {
    let (id, make): (String, fn(uuid::Uuid) -> Command) = match action {
        TimerAction::Start { id } => (id, Command::StartTimer),
        TimerAction::Stop { id } => (id, Command::StopTimer),
        TimerAction::Toggle { id } => (id, Command::ToggleTimer),
        TimerAction::Status => {
            match session.state().running_task_id() {
                Some(id) => {
                    let text = session.state().task(id).map(|t| t.text.as_str()).unwrap_or("");
                    let minutes = session.elapsed_display(id).unwrap_or(0);
                    println!("▶ {} ({})", text, format_clock(minutes));
                }
                None => println!("No timer running"),
            }
            return Ok(());
        }
    };
    let id = resolve_task_id(session.state(), &id)?;
    dispatch_and_announce(session, make(id))
}

fn run_mood(session: &mut FileSession, action: MoodAction) -> Result<()> {
    match action {
        MoodAction::Log {
            mood,
            energy,
            tags,
            notes,
        } => {
            session.execute(Command::SelectMood(mood))?;
            if let Some(energy) = energy {
                session.execute(Command::SetEnergy(energy))?;
            }
            if !tags.is_empty() {
                // Toggle only the tags whose selection differs
                let selected = session.state().daily_mood.context_tags.clone();
                for tag in ContextTag::all() {
                    if selected.contains(tag) != tags.contains(tag) {
                        session.execute(Command::ToggleContext(*tag))?;
                    }
                }
            }
            if let Some(notes) = notes {
                session.execute(Command::SetNotes(notes))?;
            }
            dispatch_and_announce(session, Command::LogMood)
        }
        MoodAction::Show { days } => {
            let entries = session.state().recent_entries(days);
            if entries.is_empty() {
                println!("No moods logged yet");
                return Ok(());
            }
            for entry in entries {
                let tags: Vec<String> = entry.context_tags.iter().map(|t| t.to_string()).collect();
                println!(
                    "{}  {} {:<9} energy {:>2}/10  {}  {}",
                    entry.date,
                    entry.emoji(),
                    entry.label(),
                    entry.energy,
                    tags.join(", "),
                    entry.notes
                );
            }
            let stats = weekly_mood_stats(session.state().recent_entries(MOOD_STATS_WINDOW));
            println!();
            println!(
                "Avg mood {:.1} · Avg energy {:.1} · Most common {} {}",
                stats.avg_mood,
                stats.avg_energy,
                stats.most_common_mood.emoji(),
                stats.most_common_mood
            );
            Ok(())
        }
        MoodAction::Edit => dispatch_and_announce(session, Command::EditTodaysMood),
    }
}

fn print_tasks(session: &FileSession, filter: TaskFilter) {
    let state = session.state();
    let tasks = dayboard::store::filtered_view(&state.tasks, filter);
    if tasks.is_empty() {
        println!(
            "{}",
            dayboard::domain::empty_state_message(filter, !state.tasks.is_empty())
        );
        return;
    }
    for task in tasks {
        let check = if task.completed { "[x]" } else { "[ ]" };
        let running = if state.is_timer_running(task.id) { "▶" } else { " " };
        let minutes = session.elapsed_display(task.id).unwrap_or(task.actual_minutes);
        println!(
            "{} {} {} {:<40} {:<6} {:<8} {} {}",
            task.short_id(),
            check,
            running,
            task.text,
            task.priority,
            task.category,
            format_clock(minutes),
            estimate_badge(task.estimated_minutes)
        );
    }
}

fn print_stats(session: &FileSession) {
    let state = session.state();
    for kind in ProgressKind::all() {
        let value = progress(state, *kind);
        let shown = match kind {
            ProgressKind::DailyFocus => format!("{} / {}", format_focus(value.current), format_focus(value.goal)),
            _ => format!("{}/{}", value.current, value.goal),
        };
        println!("{:<13} {:<16} {:>3}%", kind.label(), shown, value.percent());
    }

    let summary = task_summary(state);
    println!();
    println!(
        "Tasks: {} total, {} completed, {} active",
        summary.total, summary.completed, summary.active
    );
    println!("Weekly rate: {}%", summary.weekly_rate);
    println!("Focus today: {}", format_focus(summary.today_focus));

    let recent = state.recent_entries(MOOD_STATS_WINDOW);
    if !recent.is_empty() {
        let stats = weekly_mood_stats(recent);
        println!(
            "Mood (last {}): avg {:.1}, energy {:.1}, mostly {}",
            stats.sample_size, stats.avg_mood, stats.avg_energy, stats.most_common_mood
        );
    }
}

fn print_calendar(session: &FileSession, month: NaiveDate, today: NaiveDate) {
    println!("{}", month.format("%B %Y"));
    for bucket in month_buckets(&session.state().tasks, month, today) {
        if bucket.total == 0 && !bucket.is_today {
            continue;
        }
        let marker = if bucket.is_today { "*" } else { " " };
        println!(
            "{}{}  {}/{} done",
            marker,
            bucket.date.format("%a %d"),
            bucket.completed,
            bucket.total
        );
    }
}

fn run_tui(config: &RuntimeConfig) -> Result<()> {
    ensure_dir(&config.data_dir)?;
    logging::init(&config.log_filter, LogTarget::File(config.log_file()))?;

    let mut session = open_session(config)?;
    let mut view = DashboardView::new(session.now());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut session, &mut view);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save on exit
    if let Err(e) = session.save() {
        eprintln!("Error saving state: {}", e);
    }

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut FileSession,
    view: &mut DashboardView,
) -> Result<()> {
    let tick_rate = ticker::tick_duration();
    let mut ticker = Ticker::new(Instant::now());

    loop {
        // Render
        terminal.draw(|f| ui::render(f, session.state(), view))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    match handle_key(view, session.state(), key) {
                        KeyAction::Quit => return Ok(()),
                        KeyAction::Dispatch(command) => apply(session, view, command),
                        KeyAction::None => {}
                    }
                }
            }
        }

        // Refresh the stopwatch and header
        let now = session.now();
        for tick in ticker.poll(Instant::now()) {
            view.on_tick(tick, now);
        }
    }
}

/// Run a dashboard command and show its result in the status line
fn apply(session: &mut FileSession, view: &mut DashboardView, command: Command) {
    match session.execute(command) {
        Ok(outcome) => match announce(session.state(), &outcome) {
            Some(message) => view.set_status(message),
            None => view.status = None,
        },
        Err(err) => view.set_error(err.to_string()),
    }
    view.now = session.now();
    view.clamp_selection(session.state().filtered_tasks().len());
}
