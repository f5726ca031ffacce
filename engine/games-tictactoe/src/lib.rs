//! TicTacToe reference game for the UCT engine
//!
//! This crate provides a complete implementation of 3x3 TicTacToe
//! demonstrating how to implement the `GameState` contract.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::GameState;
//! use games_tictactoe::Board;
//!
//! let board = Board::new();
//! assert_eq!(board.generate_states().len(), 9);
//!
//! let board = board.make_move(4).unwrap(); // X takes the center
//! assert_eq!(board.legal_moves().len(), 8);
//! ```

use std::fmt;
use std::str::FromStr;

use engine_core::{GameState, Player};
use thiserror::Error;

/// Cell value for an empty square
pub const EMPTY: u8 = 0;
/// Cell value for a square held by X (the first player)
pub const X: u8 = 1;
/// Cell value for a square held by O (the second player)
pub const O: u8 = 2;

const DRAW: u8 = 3;

// Winning positions (rows, columns, diagonals)
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Errors returned when a move cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Position {0} is outside the board (expected 0-8)")]
    OutOfRange(u8),

    #[error("Position {0} is already occupied")]
    Occupied(u8),

    #[error("The game is already over")]
    GameOver,
}

/// Errors returned when parsing the textual board notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("Expected 9 cells, got {0}")]
    InvalidLength(usize),

    #[error("Invalid cell character '{0}' (expected X, O or .)")]
    InvalidCell(char),

    #[error("Impossible piece counts: {x} X and {o} O")]
    InvalidCounts { x: usize, o: usize },

    #[error("Board is won by the player who is about to move")]
    InconsistentWinner,
}

/// Map a player to its mark.
#[inline]
pub fn mark_of(player: Player) -> u8 {
    match player {
        Player::First => X,
        Player::Second => O,
    }
}

/// The letter a player writes on the board.
pub fn symbol_of(player: Player) -> char {
    mark_char(mark_of(player))
}

fn mark_char(cell: u8) -> char {
    match cell {
        X => 'X',
        O => 'O',
        _ => '.',
    }
}

/// TicTacToe position
///
/// Holds the nine cells, the player to move and the cached game result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Board representation: 0=empty, 1=X, 2=O
    cells: [u8; 9],
    /// Player whose turn it is
    to_move: Player,
    /// Winner: 0=none/ongoing, 1=X, 2=O, 3=draw
    winner: u8,
}

impl Board {
    /// Create an empty board with X to move
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; 9],
            to_move: Player::First,
            winner: 0,
        }
    }

    /// The nine cells in row-major order
    pub fn cells(&self) -> &[u8; 9] {
        &self.cells
    }

    /// Value of a single cell (0=empty, 1=X, 2=O), `None` past the last cell
    pub fn cell(&self, position: u8) -> Option<u8> {
        self.cells.get(position as usize).copied()
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != 0
    }

    /// The player who completed a line, if any
    pub fn winner(&self) -> Option<Player> {
        match self.winner {
            X => Some(Player::First),
            O => Some(Player::Second),
            _ => None,
        }
    }

    /// Number of marks on the board
    pub fn moves_played(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != EMPTY).count()
    }

    /// Get legal moves (empty positions)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.cells[pos as usize] == EMPTY)
            .collect()
    }

    /// Place the current player's mark at `position` and return the new board
    pub fn make_move(&self, position: u8) -> Result<Board, MoveError> {
        if self.is_done() {
            return Err(MoveError::GameOver);
        }
        if position >= 9 {
            return Err(MoveError::OutOfRange(position));
        }
        if self.cells[position as usize] != EMPTY {
            return Err(MoveError::Occupied(position));
        }

        Ok(self.place(position))
    }

    /// The cell that differs between this board and a successor, if exactly
    /// one empty cell was filled.
    pub fn played_cell(&self, next: &Board) -> Option<u8> {
        let mut changed =
            (0..9u8).filter(|&pos| self.cells[pos as usize] != next.cells[pos as usize]);
        let pos = changed.next()?;
        if changed.next().is_some() || self.cells[pos as usize] != EMPTY {
            return None;
        }
        Some(pos)
    }

    fn place(&self, position: u8) -> Board {
        let mut next = *self;
        next.cells[position as usize] = mark_of(self.to_move);
        next.winner = Self::check_winner(&next.cells);
        next.to_move = self.to_move.opponent();
        next
    }

    /// Check for winner on the board
    fn check_winner(cells: &[u8; 9]) -> u8 {
        for line in &LINES {
            let [a, b, c] = *line;
            if cells[a] != EMPTY && cells[a] == cells[b] && cells[b] == cells[c] {
                return cells[a]; // Return the winning player
            }
        }

        // Check for draw (board full but no winner)
        if cells.iter().all(|&cell| cell != EMPTY) {
            return DRAW;
        }

        0 // Game ongoing
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for Board {
    type Key = [u8; 9];

    fn is_win(&self) -> bool {
        self.winner == mark_of(self.last_mover())
    }

    fn is_draw(&self) -> bool {
        self.winner == DRAW
    }

    fn generate_states(&self) -> Vec<Self> {
        self.legal_moves()
            .into_iter()
            .map(|pos| self.place(pos))
            .collect()
    }

    fn key(&self) -> Self::Key {
        self.cells
    }

    fn last_mover(&self) -> Player {
        self.to_move.opponent()
    }
}

/// Parse a board from nine cells of `X`, `O` or `.` in row-major order.
/// Whitespace and `|` separators are ignored; the side to move follows from
/// the piece counts.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();
        if symbols.len() != 9 {
            return Err(ParseBoardError::InvalidLength(symbols.len()));
        }

        let mut cells = [EMPTY; 9];
        for (slot, symbol) in cells.iter_mut().zip(symbols) {
            *slot = match symbol {
                'X' | 'x' => X,
                'O' | 'o' => O,
                '.' | '_' | '-' => EMPTY,
                other => return Err(ParseBoardError::InvalidCell(other)),
            };
        }

        let x = cells.iter().filter(|&&c| c == X).count();
        let o = cells.iter().filter(|&&c| c == O).count();
        let to_move = if x == o {
            Player::First
        } else if x == o + 1 {
            Player::Second
        } else {
            return Err(ParseBoardError::InvalidCounts { x, o });
        };

        let winner = Board::check_winner(&cells);
        if winner == mark_of(to_move) {
            return Err(ParseBoardError::InconsistentWinner);
        }

        Ok(Board {
            cells,
            to_move,
            winner,
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.winner(), self.is_done()) {
            (Some(player), _) => writeln!(f, "\"{}\" has won", symbol_of(player))?,
            (None, true) => writeln!(f, "Draw")?,
            (None, false) => writeln!(f, "\"{}\" to move", symbol_of(self.to_move))?,
        }
        writeln!(f)?;

        for row in self.cells.chunks(3) {
            let cells: Vec<String> = row.iter().map(|&c| mark_char(c).to_string()).collect();
            writeln!(f, " {}", cells.join(" | "))?;
        }
        Ok(())
    }
}
