//! Play command - hot-seat match in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: game_loop(), execute_command()
//! - Level 3: rendering and outcome reporting
//! - Level 4: input parsing utilities

use std::io::{self, BufRead, Write};

use anyhow::Result;

use throne_core::{
    Board, KillOutcome, MoveOutcome, RuleEngine, Sacrifice, Side, Square, BOARD_SIZE,
};

// ============================================================================
// COMMANDS (Level 4 - Input model)
// ============================================================================

/// One line of player input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Select(Square),
    Move(Square),
    Sacrifice(Sacrifice),
    Kill(Square),
    Show,
    Reset,
    Help,
    Quit,
}

/// What the loop does after a command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

const HELP_TEXT: &str = "\
Commands:
  select <square>    pick one of your pieces and list its legal moves
  move <square>      move the selected piece there
  sacrifice double   give up a Soldier: your next Champion move repeats
  sacrifice shield   give up a Tower: your King is safe for one enemy turn
  sacrifice kill     give up a Champion: arm an instant kill
  kill <square>      remove an enemy piece next to one of yours (while armed)
  show               redraw the board
  reset              start a new match
  help               this text
  quit               leave
Squares use files a-e and ranks 1-5; a1 is White's left corner.
";

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run a hot-seat match: both players share the terminal, the prompt says
/// whose turn it is.
pub fn run() -> Result<()> {
    let mut engine = RuleEngine::new();

    println!("Throne: hot-seat match. Type 'help' for commands.");
    print_position(&engine);

    game_loop(&mut engine)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Read and execute commands until quit or end of input
fn game_loop(engine: &mut RuleEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        prompt(engine)?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(command) => {
                if execute_command(engine, command) == Flow::Quit {
                    break;
                }
            }
            Err(message) => println!("{}", message),
        }
    }

    Ok(())
}

/// Apply one command to the match and narrate the result
fn execute_command(engine: &mut RuleEngine, command: Command) -> Flow {
    match command {
        Command::Quit => return Flow::Quit,
        Command::Help => print!("{}", HELP_TEXT),
        Command::Show => print_position(engine),
        Command::Reset => {
            engine.reset();
            println!("New match.");
            print_position(engine);
        }
        Command::Select(square) => match engine.select_cell(square) {
            Ok(moves) if moves.is_empty() => println!("{} has no legal moves.", square),
            Ok(moves) => println!("Legal moves: {}", join_squares(moves)),
            Err(err) => println!("{}", err),
        },
        Command::Move(square) => match engine.attempt_move(square) {
            Ok(outcome) => report_move(engine, outcome),
            Err(err) => println!("{}", err),
        },
        Command::Sacrifice(effect) => match engine.apply_sacrifice(effect) {
            Ok(()) => report_sacrifice(engine, effect),
            Err(err) => println!("{}", err),
        },
        Command::Kill(square) => match engine.resolve_instant_kill(square) {
            Ok(outcome) => report_kill(engine, outcome),
            Err(err) => println!("{}", err),
        },
    }
    Flow::Continue
}

// ============================================================================
// LEVEL 3 - RENDERING AND REPORTING
// ============================================================================

fn prompt(engine: &RuleEngine) -> Result<()> {
    print!("{}> ", engine.side_to_move().to_string().to_lowercase());
    io::stdout().flush()?;
    Ok(())
}

fn print_position(engine: &RuleEngine) {
    print!("{}", render_board(&engine.state().board));
    println!("{}", status_line(engine));
}

/// Draw the board from White's perspective (rank 5 on top). White pieces
/// are uppercase, Black lowercase.
fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..BOARD_SIZE {
        let rank = BOARD_SIZE - row;
        out.push_str(&format!("  {} ", rank));
        for col in 0..BOARD_SIZE {
            let glyph = match board.at(Square::new(row, col)) {
                Some(piece) if piece.owner == Side::White => piece.kind.glyph(),
                Some(piece) => piece.kind.glyph().to_ascii_lowercase(),
                None => '.',
            };
            out.push(' ');
            out.push(glyph);
        }
        out.push('\n');
    }
    out.push_str("     a b c d e\n");
    out
}

fn status_line(engine: &RuleEngine) -> String {
    let state = engine.state();
    if state.game_over {
        return match state.winner {
            Some(side) => format!("{} wins! 'reset' starts a new match.", side),
            None => "Match over.".to_string(),
        };
    }

    let side = state.side_to_move;
    let mut line = format!("{} to move", side);
    if state.instant_kill_armed {
        line.push_str(" (instant kill armed: 'kill <square>')");
    } else if state.double_move_pending[side] {
        line.push_str(" (double move waiting for a Champion)");
    }
    if state.king_immune[side] {
        line.push_str(" [your King is shielded]");
    }
    if state.king_immune[side.opponent()] {
        line.push_str(" [enemy King is shielded]");
    }
    line
}

fn report_move(engine: &RuleEngine, outcome: MoveOutcome) {
    print_position(engine);
    match outcome {
        MoveOutcome::TurnEnded => {}
        MoveOutcome::BonusMovePending => {
            println!("Bonus move: the same Champion moves again.");
        }
        MoveOutcome::Won(side) => println!("{} takes the match!", side),
    }
}

fn report_sacrifice(engine: &RuleEngine, effect: Sacrifice) {
    print_position(engine);
    match effect {
        Sacrifice::DoubleMove => {
            println!("Soldier given up; your next Champion move comes with a second one.");
        }
        Sacrifice::KingShield => {
            println!("Tower given up; your King is safe until your next turn.");
        }
        Sacrifice::InstantKill => {
            println!("Champion given up; pick a target with 'kill <square>'.");
        }
    }
}

fn report_kill(engine: &RuleEngine, outcome: KillOutcome) {
    print_position(engine);
    if let KillOutcome::Won(side) = outcome {
        println!("{} takes the match!", side);
    }
}

fn join_squares(squares: &[Square]) -> String {
    squares
        .iter()
        .map(Square::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// LEVEL 4 - INPUT PARSING
// ============================================================================

fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err("empty command; try 'help'".to_string());
    };
    let arg = words.next();
    if words.next().is_some() {
        return Err("too many words; try 'help'".to_string());
    }

    match (verb.to_ascii_lowercase().as_str(), arg) {
        ("select", Some(square)) => Ok(Command::Select(parse_square(square)?)),
        ("move", Some(square)) => Ok(Command::Move(parse_square(square)?)),
        ("sacrifice", Some(effect)) => Ok(Command::Sacrifice(parse_sacrifice(effect)?)),
        ("kill", Some(square)) => Ok(Command::Kill(parse_square(square)?)),
        ("show", None) => Ok(Command::Show),
        ("reset", None) => Ok(Command::Reset),
        ("help", None) => Ok(Command::Help),
        ("quit", None) | ("exit", None) => Ok(Command::Quit),
        _ => Err(format!("unrecognized command '{}'; try 'help'", line.trim())),
    }
}

/// Parse algebraic notation (a1..e5, rank 1 at White's home row)
fn parse_square(text: &str) -> Result<Square, String> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("'{}' is not a square; use a1..e5", text));
    }
    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];
    if !(b'a'..=b'e').contains(&file) || !(b'1'..=b'5').contains(&rank) {
        return Err(format!("'{}' is not a square; use a1..e5", text));
    }
    let col = (file - b'a') as i8;
    let row = BOARD_SIZE - 1 - (rank - b'1') as i8;
    Ok(Square::new(row, col))
}

fn parse_sacrifice(text: &str) -> Result<Sacrifice, String> {
    match text.to_ascii_lowercase().as_str() {
        "double" | "double-move" => Ok(Sacrifice::DoubleMove),
        "shield" | "king-shield" => Ok(Sacrifice::KingShield),
        "kill" | "instant-kill" => Ok(Sacrifice::InstantKill),
        _ => Err(format!(
            "unknown sacrifice '{}'; use double, shield or kill",
            text
        )),
    }
}

// ============================================================================
// TESTS
// ============================================================================
