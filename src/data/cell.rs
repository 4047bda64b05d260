#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum Status {
    Dead,
    Alive,
}

impl From<bool> for Status {
    fn from(alive: bool) -> Self {
        if alive {
            Status::Alive
        } else {
            Status::Dead
        }
    }
}

/// A single grid position and its state.
///
/// The position is fixed when the cell is created; only the grid that owns it
/// decides where it lives.
#[derive(PartialEq, Eq, Hash, Debug, Clone)]
pub struct Cell {
    row: usize,
    col: usize,
    status: Status,
}

impl Cell {
    pub fn new(row: usize, col: usize, status: Status) -> Cell {
        Cell { row, col, status }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn alive(&self) -> bool {
        self.status == Status::Alive
    }

    // Returns the next status given a number of live neighbours (B3/S23)
    // https://en.wikipedia.org/wiki/Conway%27s_Game_of_Life#Rules
    pub fn next_status(&self, neighbours_cnt: usize) -> Status {
        match (self.status, neighbours_cnt) {
            (_, 3) => Status::Alive,
            (Status::Alive, 2) => Status::Alive,
            _ => Status::Dead,
        }
    }

    /// The same position carrying `status`.
    pub fn with_status(&self, status: Status) -> Cell {
        Cell { status, ..*self }
    }
}
