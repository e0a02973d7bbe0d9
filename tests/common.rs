//! Common test utilities for the tictac test suite.

#![allow(dead_code)]

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use tictac::{
    Error, Result,
    ports::Opponent,
    tictactoe::{Board, Player},
};

/// Every board reachable from the empty board, with either player opening.
pub fn reachable_boards() -> Vec<Board> {
    let mut seen = HashSet::new();
    let mut stack = vec![Board::new()];

    while let Some(board) = stack.pop() {
        if !seen.insert(board) || board.is_terminal() {
            continue;
        }

        let movers = match board.last_mover() {
            Some(last) => vec![last.opponent()],
            None => vec![Player::X, Player::O],
        };
        for player in movers {
            for pos in board.legal_moves() {
                let mut next = board;
                next.apply_move(player, pos).unwrap();
                stack.push(next);
            }
        }
    }

    seen.into_iter().collect()
}

/// Deterministic opponent that always takes the lowest free cell
pub struct FirstFree {
    pub symbol: Player,
}

impl Opponent for FirstFree {
    fn symbol(&self) -> Player {
        self.symbol
    }

    fn make_move(&mut self, mut board: Board) -> Result<Board> {
        let pos = board
            .legal_moves()
            .first()
            .copied()
            .ok_or(Error::NoValidMoves)?;
        board.apply_move(self.symbol, pos)?;
        Ok(board)
    }

    fn name(&self) -> &str {
        "first-free"
    }
}

/// Every (received, returned) board pair seen by a [`Recording`] opponent
pub type MoveLog = Arc<Mutex<Vec<(Board, Board)>>>;

/// Lowest-free-cell opponent that logs each board it receives and returns
pub struct Recording {
    pub symbol: Player,
    pub log: MoveLog,
}

impl Recording {
    pub fn new(symbol: Player) -> (Self, MoveLog) {
        let log = MoveLog::default();
        let opponent = Self {
            symbol,
            log: Arc::clone(&log),
        };
        (opponent, log)
    }
}

impl Opponent for Recording {
    fn symbol(&self) -> Player {
        self.symbol
    }

    fn make_move(&mut self, board: Board) -> Result<Board> {
        let received = board;
        let returned = FirstFree {
            symbol: self.symbol,
        }
        .make_move(board)?;
        self.log.lock().unwrap().push((received, returned));
        Ok(returned)
    }

    fn name(&self) -> &str {
        "recording"
    }
}
