pub mod cell;
pub mod grid;

pub use self::cell::{Cell, Status};
pub use self::grid::{Cells, Grid, GridError};
