use super::cell::{Cell, Status};
use rand::Rng;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Reasons a grid could not be built from external input.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("Malformed input: no rows of '0'/'1' cells found")]
    Empty,

    #[error("Malformed input: line {line} has {got} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        got: usize,
    },

    #[error("Failed to read grid file: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /* Addressed by from-zero (i, j) notation, where i is row number, j is column number
     * such that given the following shows coordinates for cells in a 3 x 3 grid:
     *
     * [ (0,0) (0,1) (0,2) ]
     * [ (1,0) (1,1) (1,2) ]
     * [ (2,0) (2,1) (2,2) ]
     *
     * Every row holds exactly `ncols` cells and cells[i][j] is the cell at (i, j).
     */
    cells: Vec<Vec<Cell>>,
    nrows: usize,
    ncols: usize,
}

impl Grid {
    /// Creates an `nrows` x `ncols` grid, either all dead or with every cell
    /// flipped alive by a fair coin from the thread-local RNG.
    pub fn new(nrows: usize, ncols: usize, randomize: bool) -> Grid {
        if randomize {
            Grid::random_with(nrows, ncols, &mut rand::thread_rng())
        } else {
            Grid::dead(nrows, ncols)
        }
    }

    pub fn dead(nrows: usize, ncols: usize) -> Grid {
        Grid::build(nrows, ncols, |_, _| Status::Dead)
    }

    /// Random grid drawn from the given source, so a seeded RNG gives a
    /// reproducible board.
    pub fn random_with<R: Rng + ?Sized>(nrows: usize, ncols: usize, rng: &mut R) -> Grid {
        Grid::build(nrows, ncols, |_, _| Status::from(rng.gen::<bool>()))
    }

    /// Builds a grid from explicit states, one inner `Vec` per row.
    #[allow(clippy::missing_errors_doc)]
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Grid, GridError> {
        Grid::from_numbered_rows(
            rows.into_iter()
                .enumerate()
                .map(|(i, row)| (i + 1, row))
                .collect(),
        )
    }

    /// Parses the plain text format: one row per line, `'1'` alive, `'0'` dead,
    /// every other character ignored. Lines without any cell are skipped.
    #[allow(clippy::missing_errors_doc)]
    pub fn from_text(source: &str) -> Result<Grid, GridError> {
        let rows = source
            .lines()
            .enumerate()
            .filter_map(|(i, line)| {
                let row: Vec<bool> = line
                    .chars()
                    .filter_map(|c| match c {
                        '0' => Some(false),
                        '1' => Some(true),
                        _ => None,
                    })
                    .collect();
                if row.is_empty() {
                    None
                } else {
                    Some((i + 1, row))
                }
            })
            .collect();
        Grid::from_numbered_rows(rows)
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Grid, GridError> {
        let path = path.as_ref();
        let grid = Grid::from_text(&fs::read_to_string(path)?)?;
        debug!(
            path = %path.display(),
            nrows = grid.nrows,
            ncols = grid.ncols,
            "loaded grid from file"
        );
        Ok(grid)
    }

    // Rows tagged with the 1-based line they came from, for error reporting
    fn from_numbered_rows(rows: Vec<(usize, Vec<bool>)>) -> Result<Grid, GridError> {
        let ncols = match rows.first() {
            Some((_, first)) if !first.is_empty() => first.len(),
            _ => return Err(GridError::Empty),
        };
        if let Some((line, row)) = rows.iter().find(|(_, row)| row.len() != ncols) {
            return Err(GridError::RaggedRow {
                line: *line,
                expected: ncols,
                got: row.len(),
            });
        }
        let nrows = rows.len();
        Ok(Grid::build(nrows, ncols, |i, j| Status::from(rows[i].1[j])))
    }

    fn build<F>(nrows: usize, ncols: usize, mut status_at: F) -> Grid
    where
        F: FnMut(usize, usize) -> Status,
    {
        let mut cells = Vec::with_capacity(nrows);
        for i in 0..nrows {
            let mut columns = Vec::with_capacity(ncols);
            for j in 0..ncols {
                columns.push(Cell::new(i, j, status_at(i, j)));
            }
            cells.push(columns);
        }
        Grid {
            cells,
            nrows,
            ncols,
        }
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn area(&self) -> usize {
        self.nrows * self.ncols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    pub fn alive_count(&self) -> usize {
        self.iter().filter(|cell| cell.alive()).count()
    }

    /// The Moore neighbourhood of `cell`, clipped at the grid edges.
    pub fn neighbours(&self, cell: &Cell) -> Vec<&Cell> {
        neighbour_coords(self.nrows, self.ncols, cell.row(), cell.col())
            .map(|(i, j)| &self.cells[i][j])
            .collect()
    }

    pub fn alive_neighbours(&self, cell: &Cell) -> usize {
        neighbour_coords(self.nrows, self.ncols, cell.row(), cell.col())
            .fold(0, |acc, (i, j)| {
                if self.cells[i][j].alive() {
                    acc + 1
                } else {
                    acc
                }
            })
    }

    /// Computes the next generation.
    ///
    /// Every cell is decided from this generation's states only; the result
    /// shares nothing with `self`.
    pub fn advance(&self) -> Grid {
        let cells = self
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.with_status(cell.next_status(self.alive_neighbours(cell))))
                    .collect()
            })
            .collect();
        Grid {
            cells,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Row-major traversal. Each call starts from (0, 0).
    pub fn iter(&self) -> Cells<'_> {
        Cells { grid: self, next: 0 }
    }
}

/// Row-major iterator over the cells of a [`Grid`].
#[derive(Debug, Clone)]
pub struct Cells<'a> {
    grid: &'a Grid,
    next: usize,
}

impl<'a> Iterator for Cells<'a> {
    type Item = &'a Cell;

    fn next(&mut self) -> Option<&'a Cell> {
        if self.next >= self.grid.area() {
            return None;
        }
        let (i, j) = (self.next / self.grid.ncols, self.next % self.grid.ncols);
        self.next += 1;
        Some(&self.grid.cells[i][j])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.area().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cells<'_> {}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = Cells<'a>;

    fn into_iter(self) -> Cells<'a> {
        self.iter()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                f.write_str(if cell.alive() { "1 " } else { "0 " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Grid, GridError> {
        Grid::from_text(s)
    }
}

// Given an i and j, returns the in-bounds coordinates of the neighbours of that
// coordinate, in N, NE, E, SE, S, SW, W, NW order. There is no wrapping.
fn neighbour_coords(
    nrows: usize,
    ncols: usize,
    i: usize,
    j: usize,
) -> impl Iterator<Item = (usize, usize)> {
    const OFFSETS: [(isize, isize); 8] = [
        (-1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
        (1, 0),
        (1, -1),
        (0, -1),
        (-1, -1),
    ];
    OFFSETS.into_iter().filter_map(move |(di, dj)| {
        let ni = i.checked_add_signed(di)?;
        let nj = j.checked_add_signed(dj)?;
        if ni < nrows && nj < ncols {
            Some((ni, nj))
        } else {
            None
        }
    })
}
