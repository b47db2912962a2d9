use super::state::MoveError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of same-colored tokens in a line needed to win.
pub const WIN_LENGTH: usize = 4;

/// Line directions as (row step, column step), in the order they are checked:
/// horizontal, vertical, diagonal (\), anti-diagonal (/).
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

/// A cell coordinate. Row 0 is the top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

/// Four adjacent, collinear cells that completed a win.
pub type WinningLine = [Position; WIN_LENGTH];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Row a token dropped into `col` would settle in.
    ///
    /// Scans from the bottom row upward and returns the first empty row.
    /// Never touches the board.
    pub fn landing_row(&self, col: usize) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn);
        }

        (0..ROWS)
            .rev()
            .find(|&row| self.cells[row][col] == Cell::Empty)
            .ok_or(MoveError::ColumnFull)
    }

    /// Copy of this board with `cell` written at `pos`.
    ///
    /// Callers pass a position obtained from [`Board::landing_row`] so that
    /// columns stay filled from the bottom up.
    pub fn with_piece(&self, pos: Position, cell: Cell) -> Board {
        let mut next = *self;
        next.cells[pos.row][pos.col] = cell;
        next
    }

    /// Check if the board is completely full.
    ///
    /// Only the top row is inspected: with gravity-settled columns a full top
    /// row means every cell is taken.
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// The four cells of a line through (row, col) that complete a win, if any.
    ///
    /// Only lines through the given cell are scanned, since the most recently
    /// placed token is the only one that can complete a new line. When the run
    /// is longer than four, the returned window is taken from the start of the
    /// run, moved forward only as far as needed to contain (row, col).
    pub fn winning_line(&self, row: usize, col: usize) -> Option<WinningLine> {
        if row >= ROWS || col >= COLS {
            return None;
        }
        let cell = self.cells[row][col];
        if cell == Cell::Empty {
            return None;
        }

        for (dr, dc) in DIRECTIONS {
            let behind = self.run_length(row, col, -dr, -dc, cell);
            let ahead = self.run_length(row, col, dr, dc, cell);

            if behind + 1 + ahead >= WIN_LENGTH {
                let start = -(behind.min(WIN_LENGTH - 1) as isize);
                let line = std::array::from_fn(|i| {
                    let step = start + i as isize;
                    Position::new(
                        (row as isize + step * dr) as usize,
                        (col as isize + step * dc) as usize,
                    )
                });
                return Some(line);
            }
        }

        None
    }

    /// Count consecutive `cell`s starting one step away from (row, col).
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while self.cell_at(r, c) == Some(cell) {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    fn cell_at(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        self.cells
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .copied()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
