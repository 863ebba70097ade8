use bloom_cli::cli::{Cli, Command, collect_overrides, join_text};
use bloom_cli::session::Session;
use bloom_cli::view::{Palette, render_page};
use bloom_core::config;
use bloom_core::error::AppError;
use bloom_core::logging;
use bloom_core::model::Task;
use bloom_core::storage::{DirStore, default_data_dir};
use bloom_core::task_store::TaskStore;
use clap::{CommandFactory, Parser};
use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufRead, IsTerminal};
use std::time::Instant;

type AppSession = Session<DirStore>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    OneShot,
    Interactive,
}

fn palette(session: &AppSession) -> Palette {
    if io::stdout().is_terminal() {
        Palette::for_theme(session.theme())
    } else {
        Palette::plain()
    }
}

fn print_page(session: &AppSession) {
    let page = session.page(Instant::now());
    print!("{}", render_page(&page, &palette(session)));
}

fn print_json(value: &serde_json::Value) {
    println!("{}", value);
}

fn print_task_json(task: &Task) -> Result<(), AppError> {
    let value = serde_json::to_value(task).map_err(|err| AppError::invalid_data(err.to_string()))?;
    print_json(&value);
    Ok(())
}

fn print_page_json(session: &AppSession) {
    let page = session.page(Instant::now());
    print_json(&serde_json::json!({
        "tasks": page.tasks,
        "counts": page.counts,
        "banner": page.banner,
        "insight": page.ambient,
        "theme": page.theme.label(),
    }));
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn start_session(raw_overrides: &[String]) -> Result<AppSession, AppError> {
    let overrides = collect_overrides(raw_overrides)?;
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error.as_ref() {
        eprintln!("WARN: config ignored - {}", err);
    }
    let config = config::merge_overrides(&loaded.config, &overrides);
    let data_dir = default_data_dir(config.data_dir.as_deref())?;

    if let Err(err) = logging::init_logging(config.log_level(), &logging::log_dir_for(&data_dir)) {
        eprintln!("WARN: logging disabled - {}", err);
    }
    if let Some(err) = loaded.error {
        warn!("event=config_fallback module=cli code={}", err.code());
    }

    let store = TaskStore::initialize(DirStore::new(data_dir))?;
    Ok(Session::start(store, StdRng::from_entropy()))
}

fn run_command(session: &mut AppSession, cli: Cli, mode: Mode) -> Result<(), AppError> {
    let now = Instant::now();
    session.tick(now);

    match cli.command {
        Command::Add { text } => {
            if let Some(task) = session.add(&join_text(&text), now)? {
                if cli.json {
                    print_task_json(&task)?;
                } else {
                    println!("Added task: {} ({})", task.text, task.id);
                    if mode == Mode::OneShot
                        && let Some(suggestion) = task.ai_suggestion.as_deref()
                    {
                        println!("✨ {}", suggestion);
                    }
                }
            }
        }
        Command::Toggle { id } => {
            if let Some(task) = session.toggle(&id)? {
                if cli.json {
                    print_task_json(&task)?;
                } else if task.completed {
                    println!("Completed task: {} ({})", task.text, task.id);
                } else {
                    println!("Reopened task: {} ({})", task.text, task.id);
                }
            }
        }
        Command::Delete { id } => {
            if let Some(task) = session.delete(&id)? {
                if cli.json {
                    print_task_json(&task)?;
                } else {
                    println!("Deleted task: {} ({})", task.text, task.id);
                }
            }
        }
        Command::List => {
            if cli.json {
                print_page_json(session);
            } else {
                print_page(session);
            }
            return Ok(());
        }
        Command::Insight => {
            let insight = session.refresh_insight().to_string();
            if cli.json {
                print_json(&serde_json::json!({ "insight": insight }));
            } else {
                println!("♥ {}", insight);
            }
        }
        Command::Theme => {
            let theme = session.toggle_theme();
            if cli.json {
                print_json(&serde_json::json!({ "theme": theme.label() }));
            } else {
                println!("Theme: {}", theme.label());
            }
        }
    }

    if mode == Mode::Interactive && !cli.json {
        println!();
        print_page(session);
    }

    Ok(())
}

fn run_interactive() -> Result<(), AppError> {
    let mut session = start_session(&[])?;
    print_page(&session);

    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock.read_line(&mut input)?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("bloom".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) if !err.use_stderr() => {
                print!("{}", err.render());
                continue;
            }
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if !cli.config_override.is_empty() {
            eprintln!(
                "ERROR: {}",
                AppError::invalid_input("config overrides only apply at startup")
            );
            continue;
        }

        if let Err(err) = run_command(&mut session, cli, Mode::Interactive) {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn main() {
    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let result = start_session(&cli.config_override)
        .and_then(|mut session| run_command(&mut session, cli, Mode::OneShot));
    if let Err(err) = result {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
