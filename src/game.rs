use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use Player::{P1, P2};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const WIN_LEN: usize = 4;

pub type Cell = Option<Player>;
/// Row-major grid, row 0 is the top of the board.
pub type GameField = [[Cell; COLS]; ROWS];
/// `(row, col)` cells of a winning run, starting at the run origin.
pub type GameMatch = [(usize, usize); WIN_LEN];

const EMPTY_FIELD: GameField = [[None; COLS]; ROWS];

/// `(row, col)` steps in scan order: horizontal, vertical, down-right, up-right.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

#[derive(Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr, Debug)]
#[repr(u8)]
pub enum Player {
    P1 = 0,
    P2 = 1,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Debug)]
#[serde(tag = "kind", content = "player", rename_all = "camelCase")]
pub enum Outcome {
    InProgress,
    Win(Player),
    Draw,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Debug)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum TurnState {
    Turn(Player),
    Finished(Outcome),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveError {
    InvalidColumn,
    ColumnFull,
    GameAlreadyFinished,
    /// The targeted cell does not hold an opponent's chip.
    NothingToSteal,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColumn => write!(f, "column out of range"),
            Self::ColumnFull => write!(f, "column is full"),
            Self::GameAlreadyFinished => write!(f, "game is already finished"),
            Self::NothingToSteal => write!(f, "no opponent chip to steal"),
        }
    }
}

impl Error for MoveError {}

/// Something went wrong in `Board::from_field()`
#[derive(Debug)]
pub enum BoardValidationError {
    /// A chip defies gravity
    Gravity,
}

impl fmt::Display for BoardValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gravity => write!(f, "Failed gravity check"),
        }
    }
}

impl Error for BoardValidationError {}

/// Serialized as the bare field. Deserialization goes through
/// `Board::from_field()`, so floating chips are rejected.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(try_from = "GameField", into = "GameField")]
pub struct Board {
    field: GameField,
}

impl Board {
    #[must_use]
    pub const fn new() -> Self {
        Self { field: EMPTY_FIELD }
    }

    pub fn from_field(field: GameField) -> Result<Self, BoardValidationError> {
        for col in 0..COLS {
            let mut found = false;
            for row in &field {
                match row[col] {
                    Some(_) => found = true,
                    None if found => return Err(BoardValidationError::Gravity),
                    None => (),
                }
            }
        }

        Ok(Self { field })
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.field[row][col]
    }

    #[must_use]
    pub fn column_height(&self, col: usize) -> usize {
        self.field.iter().filter(|row| row[col].is_some()).count()
    }

    /// Out of range columns count as full.
    #[must_use]
    pub fn is_column_full(&self, col: usize) -> bool {
        col >= COLS || self.field[0][col].is_some()
    }

    #[must_use]
    pub fn open_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.field[0].iter().all(Option::is_some)
    }

    /// Drops a chip into `col`, returning the row it landed on.
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn);
        }

        for row in (0..ROWS).rev() {
            if self.field[row][col].is_some() {
                continue;
            }

            self.field[row][col] = Some(player);
            return Ok(row);
        }

        Err(MoveError::ColumnFull)
    }

    /// First cell owned by `player`, scanning rows bottom-up and columns
    /// left to right.
    #[must_use]
    pub fn first_cell_of(&self, player: Player) -> Option<(usize, usize)> {
        (0..ROWS)
            .rev()
            .flat_map(|row| (0..COLS).map(move |col| (row, col)))
            .find(|&(row, col)| self.field[row][col] == Some(player))
    }

    /// Overwrites an occupied cell, ignoring gravity. Returns the previous owner.
    fn replace(&mut self, row: usize, col: usize, player: Player) -> Cell {
        self.field[row][col].replace(player)
    }

    fn run_from(
        &self,
        row: usize,
        col: usize,
        (dr, dc): (isize, isize),
    ) -> Option<(Player, GameMatch)> {
        let player = self.field[row][col]?;
        let mut run = [(row, col); WIN_LEN];

        for (i, slot) in run.iter_mut().enumerate().skip(1) {
            let r = row.checked_add_signed(dr * i as isize)?;
            let c = col.checked_add_signed(dc * i as isize)?;
            if r >= ROWS || c >= COLS || self.field[r][c] != Some(player) {
                return None;
            }
            *slot = (r, c);
        }

        Some((player, run))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<GameField> for Board {
    type Error = BoardValidationError;

    fn try_from(field: GameField) -> Result<Self, Self::Error> {
        Self::from_field(field)
    }
}

impl From<Board> for GameField {
    fn from(board: Board) -> Self {
        board.field
    }
}

/// First four-in-a-row found, scanning origins row-major and directions in
/// `DIRECTIONS` order.
#[must_use]
pub fn winning_line(board: &Board) -> Option<(Player, GameMatch)> {
    (0..ROWS)
        .flat_map(|row| (0..COLS).map(move |col| (row, col)))
        .find_map(|(row, col)| {
            DIRECTIONS
                .iter()
                .find_map(|&dir| board.run_from(row, col, dir))
        })
}

#[must_use]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((player, _)) = winning_line(board) {
        return Outcome::Win(player);
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

#[derive(Clone)]
pub struct Game {
    board: Board,
    state: TurnState,
    turn: u32,
    last_move: Option<usize>,
}

impl Game {
    #[must_use]
    pub const fn new(starting_player: Player) -> Self {
        Self {
            board: Board::new(),
            state: TurnState::Turn(starting_player),
            turn: 0,
            last_move: None,
        }
    }

    /// Drops a chip for the player whose turn it is and advances the turn.
    pub fn attempt_drop(&mut self, col: usize) -> Result<usize, MoveError> {
        let TurnState::Turn(player) = self.state else {
            return Err(MoveError::GameAlreadyFinished);
        };

        if col >= COLS {
            return Err(MoveError::InvalidColumn);
        }

        if self.board.is_column_full(col) {
            return Err(MoveError::ColumnFull);
        }

        let row = self.board.drop_piece(col, player)?;
        self.end_turn(col);
        Ok(row)
    }

    /// Takes over an opponent's chip in place. Counts as a full turn.
    pub fn steal(&mut self, row: usize, col: usize) -> Result<(), MoveError> {
        let TurnState::Turn(player) = self.state else {
            return Err(MoveError::GameAlreadyFinished);
        };

        if row >= ROWS || col >= COLS {
            return Err(MoveError::InvalidColumn);
        }

        if self.board.cell(row, col) != Some(player.other()) {
            return Err(MoveError::NothingToSteal);
        }

        self.board.replace(row, col, player);
        self.end_turn(col);
        Ok(())
    }

    fn end_turn(&mut self, col: usize) {
        self.turn += 1;
        self.last_move.replace(col);
        self.state = match (evaluate(&self.board), self.state) {
            (Outcome::InProgress, TurnState::Turn(player)) => TurnState::Turn(player.other()),
            (Outcome::InProgress, finished) => finished,
            (outcome, _) => TurnState::Finished(outcome),
        };
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn state(&self) -> TurnState {
        self.state
    }

    #[must_use]
    pub fn current_player(&self) -> Option<Player> {
        match self.state {
            TurnState::Turn(player) => Some(player),
            TurnState::Finished(_) => None,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        match self.state {
            TurnState::Turn(_) => Outcome::InProgress,
            TurnState::Finished(outcome) => outcome,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, TurnState::Finished(_))
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(P1)
    }
}

impl Player {
    #[must_use]
    pub const fn other(&self) -> Self {
        match self {
            Self::P1 => Self::P2,
            Self::P2 => Self::P1,
        }
    }
}

#[derive(Debug)]
pub struct ParsePlayerError(String);

impl fmt::Display for ParsePlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown player '{}', expected 1, 2, violet or orange", self.0)
    }
}

impl Error for ParsePlayerError {}

impl FromStr for Player {
    type Err = ParsePlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "1" | "p1" | "violet" => Ok(P1),
            "2" | "p2" | "orange" => Ok(P2),
            _ => Err(ParsePlayerError(s.to_owned())),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// `X` is P1, `O` is P2, anything else is empty.
    pub(crate) fn board(rows: [&str; ROWS]) -> Board {
        let mut field = EMPTY_FIELD;
        for (row, line) in rows.iter().enumerate() {
            for (col, c) in line.chars().take(COLS).enumerate() {
                field[row][col] = match c {
                    'X' => Some(P1),
                    'O' => Some(P2),
                    _ => None,
                };
            }
        }

        Board::from_field(field).unwrap()
    }

    fn fast_forward_game(moves: &[usize]) -> Game {
        let mut game = Game::default();
        for i in moves.iter().map(|i| i - 1) {
            game.attempt_drop(i).unwrap();
        }

        game
    }

    fn won_game_horizontal() -> Game {
        fast_forward_game(&[1, 1, 2, 2, 3, 3, 4])
    }

    fn won_game_vertical() -> Game {
        fast_forward_game(&[1, 2, 1, 2, 1, 2, 1])
    }

    fn won_game_diagonal_up() -> Game {
        fast_forward_game(&[1, 2, 2, 3, 3, 4, 3, 4, 4, 7, 4])
    }

    fn won_game_diagonal_down() -> Game {
        fast_forward_game(&[7, 6, 6, 5, 5, 4, 5, 4, 4, 1, 4])
    }

    fn drawn_board() -> Board {
        board([
            "XXOOXXO", //
            "OOXXOOX", //
            "XXOOXXO", //
            "OOXXOOX", //
            "XXOOXXO", //
            "OOXXOOX", //
        ])
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.open_columns(), (0..COLS).collect::<Vec<_>>());
        assert!(!board.is_full());
        assert_eq!(evaluate(&board), Outcome::InProgress);
    }

    #[test]
    fn validate_gravity() {
        let mut field = EMPTY_FIELD;
        field[2][3] = Some(P1);
        assert!(Board::from_field(field).is_err());

        field[3][3] = Some(P2);
        field[4][3] = Some(P1);
        field[5][3] = Some(P2);
        assert!(Board::from_field(field).is_ok());
    }

    #[test]
    fn deserialize_checks_gravity() {
        let mut field = EMPTY_FIELD;
        field[5][1] = Some(P2);
        let json = serde_json::to_string(&Board::from_field(field).unwrap()).unwrap();
        assert!(json.starts_with("[[null,"));
        let board: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board.cell(5, 1), Some(P2));

        field[0][4] = Some(P1);
        let json = serde_json::to_string(&field).unwrap();
        assert!(serde_json::from_str::<Board>(&json).is_err());
    }

    #[test]
    fn drop_lands_on_lowest_empty_row() {
        let mut board = Board::new();
        assert_eq!(board.drop_piece(2, P1), Ok(5));
        assert_eq!(board.drop_piece(2, P2), Ok(4));
        assert_eq!(board.cell(5, 2), Some(P1));
        assert_eq!(board.cell(4, 2), Some(P2));
    }

    #[test]
    fn drop_only_grows_the_chosen_column() {
        let base = board([
            ".......", //
            ".......", //
            "...O...", //
            "..XX...", //
            "..OXO..", //
            "XOXOXO.", //
        ]);

        for col in base.open_columns() {
            let mut board = base;
            board.drop_piece(col, P1).unwrap();
            for other in 0..COLS {
                let expected = base.column_height(other) + usize::from(other == col);
                assert_eq!(board.column_height(other), expected, "dropped in {col}");
            }
        }
    }

    #[test]
    fn drop_out_of_bounds() {
        let mut game = Game::default();
        assert_eq!(game.attempt_drop(COLS), Err(MoveError::InvalidColumn));
        assert_eq!(game.turn(), 0);
    }

    #[test]
    fn drop_column_filled() {
        let mut game = Game::default();
        for _ in 0..ROWS {
            game.attempt_drop(3).unwrap();
        }

        let before = *game.board();
        assert_eq!(game.attempt_drop(3), Err(MoveError::ColumnFull));
        assert_eq!(game.board(), &before);
        assert_eq!(game.state(), TurnState::Turn(P1));
    }

    #[test]
    fn drop_after_game_over() {
        let mut game = won_game_horizontal();
        let before = *game.board();
        assert_eq!(game.attempt_drop(5), Err(MoveError::GameAlreadyFinished));
        assert_eq!(game.board(), &before);
        assert_eq!(game.turn(), 7);
    }

    #[test]
    fn turn_alternates() {
        let mut game = Game::default();
        assert_eq!(game.state(), TurnState::Turn(P1));
        game.attempt_drop(3).unwrap();
        assert_eq!(game.state(), TurnState::Turn(P2));
        assert_eq!(game.turn(), 1);
        assert_eq!(game.last_move(), Some(3));
        game.attempt_drop(4).unwrap();
        assert_eq!(game.state(), TurnState::Turn(P1));
    }

    #[test]
    fn turn_starts_with_configured_player() {
        let mut game = Game::new(P2);
        game.attempt_drop(0).unwrap();
        assert_eq!(game.board().cell(5, 0), Some(P2));
        assert_eq!(game.current_player(), Some(P1));
    }

    #[test]
    fn bottom_row_four_wins() {
        let board = board([
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "XXXX...", //
        ]);
        assert_eq!(evaluate(&board), Outcome::Win(P1));
        assert_eq!(winning_line(&board), Some((P1, [(5, 0), (5, 1), (5, 2), (5, 3)])));
    }

    #[test]
    fn three_in_a_row_does_not_win() {
        let board = board([
            ".......", //
            ".......", //
            ".......", //
            "O......", //
            "O......", //
            "OXXX...", //
        ]);
        assert_eq!(evaluate(&board), Outcome::InProgress);
    }

    #[test]
    fn is_game_over_horizontal() {
        let game = won_game_horizontal();
        assert_eq!(game.state(), TurnState::Finished(Outcome::Win(P1)));
    }

    #[test]
    fn is_game_over_vertical() {
        let game = won_game_vertical();
        assert_eq!(game.outcome(), Outcome::Win(P1));
        assert_eq!(
            winning_line(game.board()),
            Some((P1, [(2, 0), (3, 0), (4, 0), (5, 0)]))
        );
    }

    #[test]
    fn is_game_over_diagonal_up() {
        let game = won_game_diagonal_up();
        assert_eq!(game.outcome(), Outcome::Win(P1));
        assert_eq!(
            winning_line(game.board()),
            Some((P1, [(5, 0), (4, 1), (3, 2), (2, 3)]))
        );
    }

    #[test]
    fn is_game_over_diagonal_down() {
        let game = won_game_diagonal_down();
        assert_eq!(game.outcome(), Outcome::Win(P1));
        assert_eq!(
            winning_line(game.board()),
            Some((P1, [(2, 3), (3, 4), (4, 5), (5, 6)]))
        );
    }

    #[test]
    fn second_player_can_win() {
        let game = fast_forward_game(&[1, 2, 1, 2, 3, 2, 5, 2]);
        assert_eq!(game.outcome(), Outcome::Win(P2));
        assert!(game.is_finished());
        assert_eq!(game.current_player(), None);
    }

    #[test]
    fn full_board_without_line_is_draw() {
        let board = drawn_board();
        assert!(board.is_full());
        assert_eq!(winning_line(&board), None);
        assert_eq!(evaluate(&board), Outcome::Draw);
    }

    #[test]
    fn full_board_with_line_is_win() {
        let board = board([
            "XXXXOOX", //
            "OOXXOOX", //
            "XXOOXXO", //
            "OOXXOOX", //
            "XXOOXXO", //
            "OOXXOOX", //
        ]);
        assert_eq!(evaluate(&board), Outcome::Win(P1));
    }

    #[test]
    fn first_discovered_line_wins() {
        let board = board([
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "OOOO...", //
            "XXXX...", //
        ]);
        assert_eq!(evaluate(&board), Outcome::Win(P2));
    }

    #[test]
    fn evaluate_is_pure() {
        let board = drawn_board();
        let copy = board;
        assert_eq!(evaluate(&board), evaluate(&board));
        assert_eq!(board, copy);

        let game = won_game_diagonal_up();
        assert_eq!(evaluate(game.board()), evaluate(game.board()));
    }

    #[test]
    fn first_cell_scans_bottom_up() {
        let board = board([
            ".......", //
            ".......", //
            ".......", //
            "X......", //
            "O....X.", //
            "OOO.XO.", //
        ]);
        assert_eq!(board.first_cell_of(P1), Some((5, 4)));
        assert_eq!(board.first_cell_of(P2), Some((5, 0)));
        assert_eq!(Board::new().first_cell_of(P1), None);
    }

    #[test]
    fn steal_replaces_opponent_chip() {
        let mut game = fast_forward_game(&[4]);
        let heights: Vec<_> = (0..COLS).map(|c| game.board().column_height(c)).collect();

        game.steal(5, 3).unwrap();
        assert_eq!(game.board().cell(5, 3), Some(P2));
        assert_eq!(game.state(), TurnState::Turn(P1));
        assert_eq!(game.turn(), 2);
        let after: Vec<_> = (0..COLS).map(|c| game.board().column_height(c)).collect();
        assert_eq!(heights, after);
    }

    #[test]
    fn steal_requires_opponent_chip() {
        let mut game = fast_forward_game(&[4]);
        assert_eq!(game.steal(5, 2), Err(MoveError::NothingToSteal));
        assert_eq!(game.steal(6, 2), Err(MoveError::InvalidColumn));
        assert_eq!(game.turn(), 1);
    }

    #[test]
    fn steal_can_win() {
        let mut game = fast_forward_game(&[1, 2, 7, 3, 7, 4, 5]);
        // Bottom row is XOOOX.X
        game.steal(5, 4).unwrap();
        assert_eq!(game.outcome(), Outcome::Win(P2));
    }

    #[test]
    fn parse_player() {
        assert_eq!("violet".parse::<Player>().unwrap(), P1);
        assert_eq!("2".parse::<Player>().unwrap(), P2);
        assert!("green".parse::<Player>().is_err());
    }
}
