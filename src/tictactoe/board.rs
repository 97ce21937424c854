//! Board state representation and basic operations

use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Side length of the grid
pub const BOARD_SIZE: usize = 3;

const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }
}

/// A player in the game. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

impl FromStr for Player {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(Error::ParsePlayer {
                input: other.to_string(),
            }),
        }
    }
}

/// A move target: the `(row, col)` coordinate of a cell.
///
/// Actions order lexicographically by row, then column. Construction goes
/// through [`Action::new`], so every `Action` value lies on the grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "RawAction")]
pub struct Action {
    row: usize,
    col: usize,
}

#[derive(Deserialize)]
struct RawAction {
    row: usize,
    col: usize,
}

impl TryFrom<RawAction> for Action {
    type Error = Error;

    fn try_from(raw: RawAction) -> Result<Self> {
        Action::new(raw.row, raw.col)
    }
}

impl Action {
    /// Create an action, rejecting coordinates outside the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use tictactoe_minimax::Action;
    ///
    /// let center = Action::new(1, 1).unwrap();
    /// assert_eq!(center.index(), 4);
    /// assert!(Action::new(3, 0).is_err());
    /// ```
    pub fn new(row: usize, col: usize) -> Result<Self> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(Error::OutOfRange { row, col });
        }
        Ok(Action { row, col })
    }

    /// Create an action from a row-major cell index (0-8)
    pub fn from_index(index: usize) -> Result<Self> {
        Action::new(index / BOARD_SIZE, index % BOARD_SIZE)
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major cell index (0-8)
    pub fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// All nine coordinates in row-major order
    pub fn all() -> impl Iterator<Item = Action> {
        (0..CELL_COUNT).map(|i| Action {
            row: i / BOARD_SIZE,
            col: i % BOARD_SIZE,
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Action {
    type Err = Error;

    /// Parse `"row,col"` or `"row col"`
    fn from_str(s: &str) -> Result<Self> {
        let parse_error = || Error::ParseAction {
            input: s.to_string(),
        };

        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        let [row, col] = parts.as_slice() else {
            return Err(parse_error());
        };

        let row = row.parse::<usize>().map_err(|_| parse_error())?;
        let col = col.parse::<usize>().map_err(|_| parse_error())?;
        Action::new(row, col)
    }
}

/// An immutable 3x3 grid of cells.
///
/// Every transition returns a new board. [`Board::from_string`],
/// [`Board::from_cells`] and [`rules::result`](super::rules::result) only
/// produce boards with `count(X) == count(O)` or `count(X) == count(O) + 1`.
/// [`Board::apply`] takes the mark explicitly and does not check turn order.
///
/// Serializes as its 9-character encoding (see [`Board::encode`]) and
/// deserializes through [`Board::decode`], so any board `apply` can build
/// round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
}

impl Board {
    /// The empty starting board
    pub fn initial() -> Self {
        Board {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Build a board from row-major cells, enforcing the piece-count invariant.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Result<Self> {
        let count = Self::count_pieces(&cells);
        if count.x != count.o && count.x != count.o + 1 {
            return Err(Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            });
        }
        Ok(Board { cells })
    }

    /// Helper: Parse 9 cells from a slice of characters.
    ///
    /// # Errors
    ///
    /// Returns error if the slice does not hold exactly 9 characters or any
    /// character is invalid.
    fn parse_cells(chars: &[char], context: &str) -> Result<[Cell; CELL_COUNT]> {
        if chars.len() != CELL_COUNT {
            return Err(Error::InvalidBoardLength {
                expected: CELL_COUNT,
                got: chars.len(),
                context: context.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: context.to_string(),
            })?;
        }

        Ok(cells)
    }

    fn count_pieces(cells: &[Cell; CELL_COUNT]) -> PieceCount {
        let mut count = PieceCount { x: 0, o: 0 };
        for cell in cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => {}
            }
        }
        count
    }

    /// Create a board from a string representation.
    ///
    /// Whitespace is ignored, so `"XO. ... ..."` and `"XO......."` are the same
    /// board. Empty cells are written as `.`.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The string does not contain exactly 9 non-whitespace characters
    /// - Any character is not a valid cell representation
    /// - The piece counts cannot arise from X-first play
    pub fn from_string(s: &str) -> Result<Self> {
        Self::from_cells(Self::decode(s)?.cells)
    }

    /// Parse a board without the piece-count check.
    ///
    /// Accepts every board [`Board::apply`] can reach, including ones where
    /// O moved first or one side moved twice.
    pub fn decode(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        let cells = Self::parse_cells(&chars, s)?;
        Ok(Board { cells })
    }

    /// The cell at `(row, col)`, or `OutOfRange` for coordinates off the grid
    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell> {
        Action::new(row, col).map(|action| self.get(action))
    }

    /// The cell targeted by an action
    pub fn get(&self, action: Action) -> Cell {
        self.cells[action.index()]
    }

    /// Row-major view of the cells
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Place `mark` at `action` and return the new board.
    ///
    /// # Errors
    ///
    /// Returns `IllegalMove` if the target cell is occupied.
    #[must_use = "apply returns a new board; the original is unchanged"]
    pub fn apply(&self, action: Action, mark: Player) -> Result<Board> {
        if self.get(action) != Cell::Empty {
            return Err(Error::IllegalMove {
                row: action.row(),
                col: action.col(),
            });
        }

        let mut next = *self;
        next.cells[action.index()] = mark.to_cell();
        Ok(next)
    }

    /// Boards reachable by placing `mark` on each empty cell, in row-major
    /// action order.
    ///
    /// Only empty cells are visited, so no placement can be illegal.
    pub fn children(&self, mark: Player) -> impl Iterator<Item = (Action, Board)> + '_ {
        Action::all()
            .filter(|&action| self.get(action) == Cell::Empty)
            .map(move |action| {
                let mut next = *self;
                next.cells[action.index()] = mark.to_cell();
                (action, next)
            })
    }

    /// Every empty coordinate. The set carries no ordering; sort it when order matters.
    pub fn legal_actions(&self) -> HashSet<Action> {
        Action::all()
            .filter(|&action| self.get(action) == Cell::Empty)
            .collect()
    }

    /// Number of marks a player has placed
    pub fn count(&self, player: Player) -> usize {
        let count = Self::count_pieces(&self.cells);
        match player {
            Player::X => count.x,
            Player::O => count.o,
        }
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Empty).count()
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Compact 9-character row-major encoding, `.` for empty cells
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl TryFrom<String> for Board {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Board::decode(&value)
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.encode()
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Board::from_string(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(BOARD_SIZE) && i < CELL_COUNT - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(row: usize, col: usize) -> Action {
        Action::new(row, col).unwrap()
    }

    #[test]
    fn test_initial_board() {
        let board = Board::initial();
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(board.cell_at(row, col).unwrap(), Cell::Empty);
            }
        }
        assert_eq!(board.legal_actions().len(), 9);
    }

    #[test]
    fn test_cell_at_out_of_range() {
        let board = Board::initial();
        assert!(matches!(
            board.cell_at(3, 0),
            Err(Error::OutOfRange { row: 3, col: 0 })
        ));
        assert!(matches!(
            board.cell_at(0, 7),
            Err(Error::OutOfRange { row: 0, col: 7 })
        ));
    }

    #[test]
    fn test_apply_leaves_original_untouched() {
        let board = Board::initial();
        let next = board.apply(action(1, 1), Player::X).unwrap();

        assert_eq!(next.cell_at(1, 1).unwrap(), Cell::X);
        assert_eq!(board.cell_at(1, 1).unwrap(), Cell::Empty);
        assert_ne!(board, next);
    }

    #[test]
    fn test_apply_rejects_occupied_cell() {
        let board = Board::initial().apply(action(0, 2), Player::X).unwrap();
        let err = board.apply(action(0, 2), Player::O).unwrap_err();
        assert!(matches!(err, Error::IllegalMove { row: 0, col: 2 }));
        assert!(err.to_string().contains("occupied"));
    }

    #[test]
    fn test_legal_actions_excludes_marked_cells() {
        let board = Board::from_string("X...O....").unwrap();
        let actions = board.legal_actions();
        assert_eq!(actions.len(), 7);
        assert!(!actions.contains(&action(0, 0)));
        assert!(!actions.contains(&action(1, 1)));
        assert!(actions.contains(&action(2, 2)));
    }

    #[test]
    fn test_structural_equality() {
        let a = Board::initial()
            .apply(action(0, 0), Player::X)
            .unwrap()
            .apply(action(2, 2), Player::O)
            .unwrap();
        let b = Board::from_string("X.. ... ..O").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_action_ordering_is_row_major() {
        let mut actions = vec![action(2, 0), action(0, 2), action(1, 1), action(0, 0)];
        actions.sort();
        assert_eq!(
            actions,
            vec![action(0, 0), action(0, 2), action(1, 1), action(2, 0)]
        );
    }

    #[test]
    fn test_action_index_roundtrip() {
        for i in 0..9 {
            assert_eq!(Action::from_index(i).unwrap().index(), i);
        }
        assert!(Action::from_index(9).is_err());
    }

    #[test]
    fn test_action_from_str() {
        assert_eq!("1,2".parse::<Action>().unwrap(), action(1, 2));
        assert_eq!(" 2 0 ".parse::<Action>().unwrap(), action(2, 0));
        assert!(matches!(
            "1".parse::<Action>(),
            Err(Error::ParseAction { .. })
        ));
        assert!(matches!(
            "a,b".parse::<Action>(),
            Err(Error::ParseAction { .. })
        ));
        assert!(matches!(
            "3,3".parse::<Action>(),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_from_string() {
        let board = Board::from_string("XOX......").unwrap();
        assert_eq!(board.cell_at(0, 0).unwrap(), Cell::X);
        assert_eq!(board.cell_at(0, 1).unwrap(), Cell::O);
        assert_eq!(board.cell_at(0, 2).unwrap(), Cell::X);
        assert_eq!(board.count(Player::X), 2);
        assert_eq!(board.count(Player::O), 1);

        // Invalid string length
        assert!(matches!(
            Board::from_string("XO"),
            Err(Error::InvalidBoardLength { got: 2, .. })
        ));

        // Invalid character
        assert!(matches!(
            Board::from_string("XOZ......"),
            Err(Error::InvalidCellCharacter {
                character: 'Z',
                position: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_from_string_rejects_unreachable_counts() {
        assert!(matches!(
            Board::from_string("XXX......"),
            Err(Error::InvalidPieceCounts {
                x_count: 3,
                o_count: 0
            })
        ));
        assert!(matches!(
            Board::from_string("O........"),
            Err(Error::InvalidPieceCounts { .. })
        ));
    }

    #[test]
    fn test_encode_and_display() {
        let board = Board::from_string("XOX.O.X..").unwrap();
        assert_eq!(board.encode(), "XOX.O.X..");
        assert_eq!(format!("{board}"), "XOX\n.O.\nX..");
        assert_eq!(Board::initial().encode(), ".........");
    }

    #[test]
    fn test_serde_uses_encoding() {
        let board = Board::from_string("X...O....").unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "\"X...O....\"");
        let parsed: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, board);

        assert!(serde_json::from_str::<Board>("\"XXXX\"").is_err());
        assert!(serde_json::from_str::<Board>("\"XXZ......\"").is_err());
    }

    #[test]
    fn test_serde_roundtrips_out_of_turn_boards() {
        let board = Board::initial()
            .apply(action(0, 0), Player::O)
            .unwrap()
            .apply(action(1, 1), Player::O)
            .unwrap();
        assert_eq!(board.encode(), "O...O....");
        assert!(Board::from_string(&board.encode()).is_err());

        let json = serde_json::to_string(&board).unwrap();
        let parsed: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, board);
        assert_eq!(Board::decode(&board.encode()).unwrap(), board);
    }

    #[test]
    fn test_children_fill_empty_cells_in_order() {
        let board = Board::from_string("X...O....").unwrap();
        let children: Vec<(Action, Board)> = board.children(Player::X).collect();

        assert_eq!(children.len(), 7);
        assert_eq!(children[0].0, action(0, 1));
        assert_eq!(children[6].0, action(2, 2));
        for (a, child) in &children {
            assert_eq!(*child, board.apply(*a, Player::X).unwrap());
        }
        assert_eq!(Board::from_string("XOXXOOOXX").unwrap().children(Player::O).count(), 0);
    }

    #[test]
    fn test_action_serde_validates() {
        let json = serde_json::to_string(&action(2, 1)).unwrap();
        assert_eq!(json, r#"{"row":2,"col":1}"#);
        assert!(serde_json::from_str::<Action>(r#"{"row":5,"col":1}"#).is_err());
    }

    #[test]
    fn test_full_board() {
        let board = Board::from_string("XOXXOOOXX").unwrap();
        assert!(board.is_full());
        assert_eq!(board.empty_count(), 0);
        assert!(board.legal_actions().is_empty());
    }
}
