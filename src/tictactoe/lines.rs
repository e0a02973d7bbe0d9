//! Winning line analysis for Tic-Tac-Toe

use super::board::{Cell, Cells, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Owner of the first complete line, scanning rows, then columns, then diagonals
    pub fn winner(cells: &Cells) -> Option<Player> {
        WINNING_LINES.iter().find_map(|&[a, b, c]| {
            let first = cells[a];
            if first != Cell::Empty && first == cells[b] && first == cells[c] {
                first.to_player()
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells_with(player: Player, positions: &[usize]) -> Cells {
        let mut cells = [Cell::Empty; 9];
        for &pos in positions {
            cells[pos] = player.to_cell();
        }
        cells
    }

    #[test]
    fn test_winner_horizontal() {
        let cells = cells_with(Player::X, &[0, 1, 2]);
        assert_eq!(LineAnalyzer::winner(&cells), Some(Player::X));
    }

    #[test]
    fn test_winner_vertical() {
        let cells = cells_with(Player::O, &[0, 3, 6]);
        assert_eq!(LineAnalyzer::winner(&cells), Some(Player::O));
    }

    #[test]
    fn test_winner_diagonal() {
        let cells = cells_with(Player::X, &[0, 4, 8]);
        assert_eq!(LineAnalyzer::winner(&cells), Some(Player::X));
    }

    #[test]
    fn test_winner_on_every_line() {
        for line in WINNING_LINES {
            for player in [Player::X, Player::O] {
                let cells = cells_with(player, &line);
                assert_eq!(LineAnalyzer::winner(&cells), Some(player), "line {line:?}");
            }
        }
    }

    #[test]
    fn test_two_in_a_row_is_not_a_win() {
        for line in WINNING_LINES {
            let cells = cells_with(Player::X, &line[..2]);
            assert_eq!(LineAnalyzer::winner(&cells), None);
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut cells = cells_with(Player::X, &[0, 1]);
        cells[2] = Cell::O;
        assert_eq!(LineAnalyzer::winner(&cells), None);
    }
}
