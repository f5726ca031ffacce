//! Human-versus-engine game loop over any line-based input and output.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use engine_core::{GameState, Outcome};
use games_tictactoe::{symbol_of, Board};
use mcts::Mcts;
use rand::Rng;
use tracing::{debug, info};

const INSTRUCTIONS: &str = "\
Welcome to Tic-Tac-Toe.
Cells are numbered as follows. Type a number (1 - 9) to make a move.
 1 | 2 | 3
 4 | 5 | 6
 7 | 8 | 9
Type \"exit\" to leave the game.";

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Zero-based cell index
    Cell(u8),
    Exit,
    Empty,
    Invalid,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Command::Empty,
            "exit" => Command::Exit,
            text => match text.parse::<u8>() {
                Ok(cell @ 1..=9) => Command::Cell(cell - 1),
                _ => Command::Invalid,
            },
        }
    }
}

/// Play games until the player exits, declines a restart, or input ends.
pub fn run<G, I, O>(
    engine: &mut Mcts<G>,
    engine_first: bool,
    input: I,
    mut output: O,
) -> Result<()>
where
    G: Rng,
    I: BufRead,
    O: Write,
{
    writeln!(output, "{INSTRUCTIONS}")?;
    let mut lines = input.lines();

    'game: loop {
        let mut board = Board::new();
        if engine_first {
            board = engine_move(engine, board)?;
        }
        writeln!(output, "\n{board}")?;

        loop {
            write!(output, "> ")?;
            output.flush()?;

            let Some(line) = lines.next() else {
                return Ok(());
            };

            match Command::parse(&line?) {
                Command::Exit => {
                    writeln!(output, "Goodbye!")?;
                    return Ok(());
                }
                Command::Empty => continue,
                Command::Invalid => {
                    writeln!(output, "   Invalid command: enter a cell from 1 to 9 or \"exit\"")?;
                    continue;
                }
                Command::Cell(cell) => match board.make_move(cell) {
                    Ok(next) => board = next,
                    Err(e) => {
                        debug!(error = %e, "Rejected move");
                        writeln!(
                            output,
                            "   Illegal move: cell {} is taken. Please try again",
                            cell + 1
                        )?;
                        continue;
                    }
                },
            }
            writeln!(output, "\n{board}")?;

            if !board.is_done() {
                board = engine_move(engine, board)?;
                writeln!(output, "\n{board}")?;
            }

            if let Some(outcome) = board.outcome() {
                announce(outcome, &mut output)?;
                if ask_restart(&mut lines, &mut output)? {
                    continue 'game;
                }
                writeln!(output, "Thank you for playing!")?;
                return Ok(());
            }
        }
    }
}

fn engine_move<G: Rng>(engine: &mut Mcts<G>, board: Board) -> Result<Board> {
    let result = engine
        .search_with_stats(board)
        .context("engine could not find a move")?;

    debug!(
        cell = board.played_cell(&result.state).map(|cell| cell + 1),
        visits = result.visits,
        value = result.value,
        iterations = result.iterations,
        nodes = result.stats.total_nodes,
        "Engine move"
    );
    Ok(result.state)
}

fn announce<O: Write>(outcome: Outcome, output: &mut O) -> Result<()> {
    match outcome {
        Outcome::Win(player) => {
            info!(winner = %player, "Game over");
            writeln!(output, "!!! Player \"{}\" has won the game !!!", symbol_of(player))?;
        }
        Outcome::Draw => {
            info!("Game over: draw");
            writeln!(output, "The game is a draw.")?;
        }
    }
    Ok(())
}

/// Ask until the player answers `y` or `n`. End of input counts as `n`.
fn ask_restart<I, O>(lines: &mut std::io::Lines<I>, output: &mut O) -> Result<bool>
where
    I: BufRead,
    O: Write,
{
    loop {
        writeln!(output, "Would you like to restart? Type (y) for yes or (n) for no")?;
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            return Ok(false);
        };
        match line?.trim() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => continue,
        }
    }
}
