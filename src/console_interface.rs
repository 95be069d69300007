use crate::core::{Board, Direction};
use crate::level_file::cell_symbol;
use crate::session::{Session, UserAction};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

pub type ConsoleTerminal = Terminal<CrosstermBackend<io::Stdout>>;

pub enum ScreenMode {
    Interactive,
    Replay { moves_file: String },
}

pub struct GameRenderState<'a> {
    pub session: &'a Session,
    pub level_name: &'a str,
    pub mode: ScreenMode,
    pub status: Option<String>,
}

pub fn setup_terminal() -> Result<ConsoleTerminal, Box<dyn std::error::Error>> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<(), Box<dyn std::error::Error>> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn render_game(
    terminal: &mut ConsoleTerminal,
    state: &GameRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(f.area());

        let header = render_header(state);
        let header_paragraph = Paragraph::new(header)
            .block(Block::default().borders(Borders::ALL).title("Sokoban"))
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(header_paragraph, chunks[0]);

        let game_text = render_board_to_string(state.session.board(), state.session.zoom());
        let game_paragraph = Paragraph::new(game_text)
            .block(Block::default().borders(Borders::ALL).title(state.level_name))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(game_paragraph, chunks[1]);

        let instructions = match state.mode {
            ScreenMode::Interactive => {
                "Move: arrows or Z/Q/S/D | U undo | R restart | +/- zoom | X quit"
            }
            ScreenMode::Replay { .. } => "Replaying recorded moves | X or Esc to abort",
        };
        let instructions = if let Some(status) = &state.status {
            format!("{} | {}", instructions, status)
        } else {
            instructions.to_string()
        };

        let instruction_paragraph = Paragraph::new(instructions)
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, chunks[2]);
    })?;
    Ok(())
}

fn render_header(state: &GameRenderState) -> String {
    let moves = state.session.move_count();
    match &state.mode {
        ScreenMode::Interactive => format!("Level: {} | Moves: {}", state.level_name, moves),
        ScreenMode::Replay { moves_file } => format!(
            "Level: {} | Moves file: {} | Moves: {}",
            state.level_name, moves_file, moves
        ),
    }
}

/// Plain-text dump of the board, each cell blown up to `scale` x `scale` characters.
pub fn render_board_to_string(board: &Board, scale: u8) -> String {
    let scale = usize::from(scale.max(1));
    let mut result = String::new();
    for row in board.rows() {
        let mut line = String::with_capacity(row.len() * scale);
        for &c in row {
            let ch = cell_symbol(c);
            line.extend(std::iter::repeat_n(ch, scale));
        }
        for _ in 0..scale {
            result.push_str(&line);
            result.push('\n');
        }
    }
    result
}

pub enum ConsoleInput {
    UserAction(UserAction),
    Timeout,
    Unknown,
}

pub fn handle_input(poll: Duration) -> Result<ConsoleInput, Box<dyn std::error::Error>> {
    if event::poll(poll)? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(match action_for_key(code) {
                Some(action) => ConsoleInput::UserAction(action),
                None => ConsoleInput::Unknown,
            });
        }
    }
    Ok(ConsoleInput::Timeout)
}

pub fn action_for_key(code: KeyCode) -> Option<UserAction> {
    Some(match code {
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Esc => UserAction::Quit,
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Up => {
            UserAction::Move(Direction::Up)
        }
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
            UserAction::Move(Direction::Down)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Left => {
            UserAction::Move(Direction::Left)
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
            UserAction::Move(Direction::Right)
        }
        KeyCode::Char('u') | KeyCode::Char('U') => UserAction::Undo,
        KeyCode::Char('r') | KeyCode::Char('R') => UserAction::Restart,
        KeyCode::Char('+') => UserAction::ZoomIn,
        KeyCode::Char('-') => UserAction::ZoomOut,
        _ => return None,
    })
}

/// Sleeps for `delay` while still listening for a quit key. Returns `true` if
/// the user asked to stop.
pub fn wait_for_abort(delay: Duration) -> Result<bool, Box<dyn std::error::Error>> {
    let deadline = Instant::now() + delay;
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        if left.is_zero() {
            return Ok(false);
        }
        if let ConsoleInput::UserAction(UserAction::Quit) = handle_input(left)? {
            return Ok(true);
        }
    }
}

/// Line-based question on the normal screen. Must be called outside raw mode.
pub fn ask(question: &str) -> io::Result<String> {
    let mut out = io::stdout().lock();
    write!(out, "{}", question)?;
    out.flush()?;
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    Ok(answer.trim().to_string())
}

pub fn confirm(question: &str) -> io::Result<bool> {
    match ask(&format!("{} (y/n) ", question)) {
        Ok(answer) => Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")),
        // nobody there to answer
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(err) => Err(err),
    }
}

/// Asks for a filename until a non-empty one is given.
pub fn ask_path(question: &str) -> io::Result<std::path::PathBuf> {
    loop {
        let answer = ask(question)?;
        if !answer.is_empty() {
            return Ok(answer.into());
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::test_util::board_from;

    #[test]
    fn azerty_and_arrow_keys_map_to_the_same_moves() {
        for (letter, arrow, dir) in [
            ('z', KeyCode::Up, Direction::Up),
            ('s', KeyCode::Down, Direction::Down),
            ('q', KeyCode::Left, Direction::Left),
            ('d', KeyCode::Right, Direction::Right),
        ] {
            assert_eq!(action_for_key(KeyCode::Char(letter)), Some(UserAction::Move(dir)));
            assert_eq!(action_for_key(arrow), Some(UserAction::Move(dir)));
        }
        assert_eq!(action_for_key(KeyCode::Esc), Some(UserAction::Quit));
        assert_eq!(action_for_key(KeyCode::Char('w')), None);
    }

    #[test]
    fn zoomed_board_repeats_every_cell() {
        let board = board_from("#@.");
        assert_eq!(render_board_to_string(&board, 2), "##@@..\n##@@..\n");
        assert_eq!(render_board_to_string(&board, 0), "#@.\n");
    }
}
