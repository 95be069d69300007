// Terminal Sokoban with ratatui
// Play a level with the keyboard, or replay a recorded move file to check whether it solves the level.
// Tiles: '#' wall, '@' player, '$' box, '.' target, '*' box on target, '+' player on target, ' ' floor.

use clap::{Parser, Subcommand};
use sokoban::config::GameConfig;
use sokoban::console_interface::{
    ConsoleInput, ConsoleTerminal, GameRenderState, ScreenMode, ask_path, cleanup_terminal,
    confirm, handle_input, render_game, setup_terminal, wait_for_abort,
};
use sokoban::level_file::{load_board, load_moves, save_board, save_moves};
use sokoban::session::{
    ActionOutcome, Replay, ReplayMode, ReplayStep, Session, SessionState, UserAction,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Sokoban in the terminal
#[derive(Parser, Debug)]
#[command(name = "sokoban")]
#[command(about = "Play Sokoban levels or verify recorded solutions", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Append log output to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a level with the keyboard (default)
    Play {
        /// Level file; asked for when omitted
        #[arg(short, long)]
        level: Option<PathBuf>,
    },

    /// Replay a move file against a level and report whether it solves it
    Replay {
        /// Level file; asked for when omitted
        #[arg(short, long)]
        level: Option<PathBuf>,

        /// Move file; asked for when omitted
        #[arg(short, long)]
        moves: Option<PathBuf>,

        /// Stop as soon as the level is solved instead of playing every move
        #[arg(long)]
        stop_on_win: bool,

        /// Pause between replayed moves, overriding the config file
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let result = match cli.command.unwrap_or(Command::Play { level: None }) {
        Command::Play { level } => run_interactive(&config, level),
        Command::Replay {
            level,
            moves,
            stop_on_win,
            delay_ms,
        } => {
            let mode = if stop_on_win {
                ReplayMode::StopOnWin
            } else {
                ReplayMode::RunToEnd
            };
            let delay = delay_ms.map_or(config.replay_delay(), Duration::from_millis);
            run_replay(&config, level, moves, mode, delay)
        }
    };

    if let Err(err) = &result {
        log::error!("{}", err);
    }
    result
}

fn init_logging(log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = log_file else {
        env_logger::init();
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn level_path(level: Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(match level {
        Some(path) => path,
        None => ask_path("Which level do you want to load? (e.g. level1.sok): ")?,
    })
}

fn run_interactive(
    config: &GameConfig,
    level: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = level_path(level)?;
    let board = load_board(&level, config.board_size())?;
    let mut session = Session::new(board, config)?;
    let level_name = level.display().to_string();

    let mut terminal = setup_terminal()?;
    let played = play_session(&mut terminal, &mut session, &level, &level_name, config);
    cleanup_terminal()?;
    played?;

    match session.state() {
        SessionState::Won => {
            println!("You won in {} moves!", session.move_count());
            offer_moves_save(&session)?;
        }
        SessionState::Aborted => {
            if confirm("Save the current board?")? {
                let path = ask_path("Board file name: ")?;
                save_board(&path, session.board())?;
                println!("Board saved to {}", path.display());
            }
            offer_moves_save(&session)?;
            println!("Goodbye!");
        }
        _ => {}
    }
    println!("Thanks for playing!");
    Ok(())
}

fn offer_moves_save(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    if confirm("Save your moves?")? {
        let path = ask_path("Moves file name (e.g. level1.dep): ")?;
        save_moves(&path, session.history())?;
        println!("Moves saved to {}", path.display());
    }
    Ok(())
}

fn play_session(
    terminal: &mut ConsoleTerminal,
    session: &mut Session,
    level: &Path,
    level_name: &str,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut status = None;
    let mut restart_armed = false;
    render_interactive(terminal, session, level_name, &status)?;

    while !session.is_finished() {
        let action = match handle_input(config.poll_interval())? {
            ConsoleInput::UserAction(action) => action,
            ConsoleInput::Timeout | ConsoleInput::Unknown => continue,
        };

        if action == UserAction::Restart && !restart_armed {
            restart_armed = true;
            status = Some("Press R again to restart the level".to_string());
            render_interactive(terminal, session, level_name, &status)?;
            continue;
        }
        restart_armed = false;

        let outcome = session.handle_action(action, || load_board(level, config.board_size()));
        status = match outcome {
            Ok(ActionOutcome::Restarted) => Some("Level restarted".to_string()),
            Ok(ActionOutcome::NothingToUndo) => Some("Nothing to undo".to_string()),
            Ok(_) => None,
            Err(err) if err.is_recoverable() => Some(format!("Error: {}", err)),
            Err(err) => return Err(err.into()),
        };
        render_interactive(terminal, session, level_name, &status)?;
    }

    if session.state() == SessionState::Won {
        status = Some("You win! Press any key to continue.".to_string());
        render_interactive(terminal, session, level_name, &status)?;
        // Keep showing the win screen until user inputs
        while let ConsoleInput::Timeout = handle_input(config.poll_interval())? {}
    }
    Ok(())
}

fn render_interactive(
    terminal: &mut ConsoleTerminal,
    session: &Session,
    level_name: &str,
    status: &Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    render_game(
        terminal,
        &GameRenderState {
            session,
            level_name,
            mode: ScreenMode::Interactive,
            status: status.clone(),
        },
    )
}

fn run_replay(
    config: &GameConfig,
    level: Option<PathBuf>,
    moves: Option<PathBuf>,
    mode: ReplayMode,
    delay: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = level_path(level)?;
    let moves = match moves {
        Some(path) => path,
        None => ask_path("Enter the move file name (e.g. level1.dep): ")?,
    };

    let board = load_board(&level, config.board_size())?;
    let codes = load_moves(&moves)?;
    if codes.is_empty() {
        log::warn!("move file {} is empty", moves.display());
        println!("The move file {} is empty.", moves.display());
    }

    let session = Session::new(board, config)?;
    let mut replay = Replay::new(session, codes, mode);
    let level_name = level.display().to_string();
    let moves_name = moves.display().to_string();

    let mut terminal = setup_terminal()?;
    let replayed = replay_session(&mut terminal, &mut replay, &level_name, &moves_name, delay);
    cleanup_terminal()?;
    replayed?;

    let session = replay.session();
    match session.state() {
        SessionState::Won => {
            println!(
                "The move sequence {} is a solution for {}.",
                moves_name, level_name
            );
            println!("It contains {} moves.", session.move_count());
        }
        SessionState::Aborted => {
            println!("Replay aborted after {} moves.", session.move_count());
        }
        _ => {
            println!(
                "The move sequence {} is NOT a solution for {}!",
                moves_name, level_name
            );
        }
    }
    if !replay.mismatches().is_empty() {
        println!(
            "{} recorded moves did not match the board; the board was followed.",
            replay.mismatches().len()
        );
    }
    Ok(())
}

fn replay_session(
    terminal: &mut ConsoleTerminal,
    replay: &mut Replay,
    level_name: &str,
    moves_name: &str,
    delay: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut status = Some(format!("{} moves to check", replay.len()));
    render_replay(terminal, replay, level_name, moves_name, &status)?;

    loop {
        if wait_for_abort(delay)? {
            replay.abort();
            return Ok(());
        }
        match replay.step()? {
            ReplayStep::Finished(_) => return Ok(()),
            ReplayStep::Applied { index, outcome, .. } => {
                status = Some(match outcome {
                    ActionOutcome::Blocked => format!("step {}/{}: blocked", index + 1, replay.len()),
                    _ => format!("step {}/{}", index + 1, replay.len()),
                });
            }
        }
        render_replay(terminal, replay, level_name, moves_name, &status)?;
    }
}

fn render_replay(
    terminal: &mut ConsoleTerminal,
    replay: &Replay,
    level_name: &str,
    moves_name: &str,
    status: &Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    render_game(
        terminal,
        &GameRenderState {
            session: replay.session(),
            level_name,
            mode: ScreenMode::Replay {
                moves_file: moves_name.to_string(),
            },
            status: status.clone(),
        },
    )
}
