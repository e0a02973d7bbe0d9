//! Board representation, move legality and terminal-state checks

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use crate::{
    error::{Error, Result},
    types::BOARD_SIZE,
};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Character used in state keys; `.` sorts before both player symbols.
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    pub fn symbol(self) -> char {
        self.to_cell().to_char()
    }
}

impl TryFrom<char> for Player {
    type Error = Error;

    /// Only the exact symbols `X` and `O` are recognized.
    fn try_from(symbol: char) -> Result<Self> {
        match symbol {
            'X' => Ok(Player::X),
            'O' => Ok(Player::O),
            other => Err(Error::UnknownPlayer { symbol: other }),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Raw board contents, indexed row-major from the top-left corner
pub type Cells = [Cell; BOARD_SIZE];

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    Terminal,
}

/// Live game board.
///
/// The fields are private so the invariants hold for every value of this type:
/// the move counter equals the number of occupied cells, players alternate, and
/// occupied cells never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: Cells,
    moves: usize,
    last_mover: Option<Player>,
}

impl Board {
    /// Create an empty board. Either player may open.
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; BOARD_SIZE],
            moves: 0,
            last_mover: None,
        }
    }

    /// Build a board from raw cells.
    ///
    /// `last_mover` may be omitted when the piece counts already decide it (one
    /// player has an extra piece, or the board is empty).
    ///
    /// # Errors
    ///
    /// Returns an error if the piece counts differ by more than one, or if the
    /// last mover is missing or contradicts the piece counts.
    pub fn from_cells(cells: Cells, last_mover: Option<Player>) -> Result<Self> {
        let x_count = cells.iter().filter(|&&c| c == Cell::X).count();
        let o_count = cells.iter().filter(|&&c| c == Cell::O).count();
        if x_count.abs_diff(o_count) > 1 {
            return Err(Error::InvalidPieceCounts { x_count, o_count });
        }

        let inferred = if x_count > o_count {
            Some(Player::X)
        } else if o_count > x_count {
            Some(Player::O)
        } else {
            None
        };

        let moves = x_count + o_count;
        let last_mover = match (moves, inferred, last_mover) {
            (0, _, None) => None,
            (0, _, Some(player)) => {
                return Err(Error::InvalidConfiguration {
                    message: format!("empty board cannot have {player} as last mover"),
                });
            }
            (_, Some(expected), Some(given)) if expected != given => {
                return Err(Error::InvalidConfiguration {
                    message: format!(
                        "piece counts (X={x_count}, O={o_count}) mean {expected} moved last, not {given}"
                    ),
                });
            }
            (_, Some(expected), _) => Some(expected),
            (_, None, Some(given)) => Some(given),
            (_, None, None) => {
                return Err(Error::InvalidConfiguration {
                    message: format!(
                        "equal piece counts (X={x_count}, O={o_count}) need an explicit last mover"
                    ),
                });
            }
        };

        Ok(Board {
            cells,
            moves,
            last_mover,
        })
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    pub fn move_count(&self) -> usize {
        self.moves
    }

    pub fn last_mover(&self) -> Option<Player> {
        self.last_mover
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Check that `player` may place a piece at `pos` right now.
    ///
    /// # Errors
    ///
    /// `InvalidPosition` for an index outside 0-8, `GameOver` once the game is
    /// decided, `OutOfTurn` if `player` moved last, `Occupied` for a taken cell.
    /// Checks run in that order and the first failure wins, so any in-range
    /// move on a decided board reports `GameOver`, even onto an occupied cell.
    pub fn verify_move(&self, player: Player, pos: usize) -> Result<()> {
        if pos >= BOARD_SIZE {
            return Err(Error::InvalidPosition { position: pos });
        }
        if self.is_terminal() {
            return Err(Error::GameOver);
        }
        if self.last_mover == Some(player) {
            return Err(Error::OutOfTurn { player });
        }
        if self.cells[pos] != Cell::Empty {
            return Err(Error::Occupied { position: pos });
        }
        Ok(())
    }

    /// Place `player` at `pos`. The board is untouched when the move is rejected.
    pub fn apply_move(&mut self, player: Player, pos: usize) -> Result<()> {
        self.verify_move(player, pos)?;

        self.cells[pos] = player.to_cell();
        self.moves += 1;
        self.last_mover = Some(player);
        Ok(())
    }

    /// Like [`Board::apply_move`], but starting from a raw player symbol.
    ///
    /// # Errors
    ///
    /// `UnknownPlayer` if `symbol` is not `X` or `O`, otherwise the errors of
    /// [`Board::apply_move`].
    pub fn apply_symbol(&mut self, symbol: char, pos: usize) -> Result<()> {
        let player = Player::try_from(symbol)?;
        self.apply_move(player, pos)
    }

    /// Cells as they would be after `player` plays `pos`, without touching the board.
    ///
    /// With `verify` set, the checks of [`Board::apply_move`] apply. Without it,
    /// only the index is checked, so callers can ask "what if the other player
    /// went here" regardless of turn order.
    pub fn preview_move(&self, player: Player, pos: usize, verify: bool) -> Result<Cells> {
        if verify {
            self.verify_move(player, pos)?;
        } else if pos >= BOARD_SIZE {
            return Err(Error::InvalidPosition { position: pos });
        }

        let mut cells = self.cells;
        cells[pos] = player.to_cell();
        Ok(cells)
    }

    pub fn is_full(&self) -> bool {
        self.moves == BOARD_SIZE
    }

    /// Game is over when the board is full or a line is complete
    pub fn is_terminal(&self) -> bool {
        self.is_full() || self.winner().is_some()
    }

    /// Winner on the live board.
    ///
    /// Nobody can complete a line before the fifth move, so the line scan is
    /// skipped until then.
    pub fn winner(&self) -> Option<Player> {
        if self.moves < 5 {
            return None;
        }
        Self::winner_of(&self.cells)
    }

    /// Winner of an arbitrary cell array (no move-count shortcut)
    pub fn winner_of(cells: &Cells) -> Option<Player> {
        LineAnalyzer::winner(cells)
    }

    /// Empty cells in ascending index order
    pub fn legal_moves(&self) -> Vec<usize> {
        Self::legal_moves_of(&self.cells)
    }

    /// Empty cells of an arbitrary cell array, in ascending index order
    pub fn legal_moves_of(cells: &Cells) -> Vec<usize> {
        cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn phase(&self) -> GamePhase {
        if self.is_terminal() {
            GamePhase::Terminal
        } else if self.moves == 0 {
            GamePhase::NotStarted
        } else {
            GamePhase::InProgress
        }
    }

    /// String encoding of the live cells (see [`encode_cells`])
    pub fn encode(&self) -> String {
        encode_cells(&self.cells)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(3) {
            let line: String = row
                .iter()
                .map(|&c| match c {
                    Cell::Empty => ' ',
                    other => other.to_char(),
                })
                .collect();
            writeln!(f, "|{line}|")?;
        }
        Ok(())
    }
}

/// Encode cells as a 9-character string of `.`, `X` and `O`
pub fn encode_cells(cells: &Cells) -> String {
    cells.iter().map(|&c| c.to_char()).collect()
}

/// Parse a 9-cell board string; `.`, `_` and ` ` all mean empty.
///
/// # Errors
///
/// Returns an error if the string does not hold exactly 9 cells or contains a
/// character that is not a cell.
pub fn parse_cells(s: &str) -> Result<Cells> {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() != BOARD_SIZE {
        return Err(Error::InvalidBoardLength {
            expected: BOARD_SIZE,
            got: chars.len(),
            context: s.to_string(),
        });
    }

    let mut cells = [Cell::Empty; BOARD_SIZE];
    for (i, &c) in chars.iter().enumerate() {
        cells[i] = Cell::from_char(c).ok_or_else(|| Error::InvalidCellCharacter {
            character: c,
            position: i,
            context: s.to_string(),
        })?;
    }
    Ok(cells)
}
