use super::config::Settings;
use super::data::Grid;
use std::error::Error;
use tracing::{debug, info};

mod gl;
mod pacer;

pub use self::gl::{GlSurface, SurfaceError};
pub use self::pacer::Pacer;

pub type Colour = [f32; 4];

pub const WHITE: Colour = [1., 1., 1., 1.];
pub const BLACK: Colour = [0., 0., 0., 1.];
pub const GREEN: Colour = [0., 1., 0., 1.];

pub const ALIVE_COLOUR: Colour = GREEN;
pub const DEAD_COLOUR: Colour = WHITE;
pub const GRIDLINE_COLOUR: Colour = BLACK;

/// A pixel position, origin at the top left of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// A fixed-size canvas the simulation draws each generation onto.
///
/// Drawing calls accumulate into a frame that becomes visible on `present`.
pub trait Surface {
    type Error: Error + 'static;

    fn draw_rectangle(&mut self, rect: Rect, colour: Colour) -> Result<(), Self::Error>;

    fn draw_line(&mut self, from: Point, to: Point, colour: Colour) -> Result<(), Self::Error>;

    /// True once the user has asked to quit.
    fn poll_quit(&mut self) -> bool;

    fn present(&mut self) -> Result<(), Self::Error>;

    /// Blocks until the next tick is due.
    fn sleep_until_next_tick(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Running,
    Stopped,
}

/// Where the cell at (`row`, `col`) is drawn: one pixel in from the top left
/// corner of its square, leaving room for the grid lines.
pub fn cell_rect(row: usize, col: usize, cell_size: u32) -> Rect {
    let offset = |n: usize| {
        u32::try_from(n)
            .unwrap_or(u32::MAX)
            .saturating_mul(cell_size)
            .saturating_add(1)
    };
    let side = cell_size.saturating_sub(1);
    Rect {
        x: offset(col),
        y: offset(row),
        w: side,
        h: side,
    }
}

/// Runs the simulation: owns the current generation and the surface it is drawn on.
pub struct App<S: Surface> {
    grid: Grid,
    surface: S,
    width: u32,
    height: u32,
    cell_size: u32,
    state: State,
    generation: u64,
}

impl<S: Surface> App<S> {
    pub fn new(grid: Grid, surface: S, settings: &Settings) -> Self {
        Self {
            grid,
            surface,
            width: settings.width,
            height: settings.height,
            cell_size: settings.cell_size,
            state: State::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of generations computed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// One pass of the loop. A quit seen at the top stops the app before
    /// anything is drawn; otherwise the current generation is drawn, replaced
    /// by its successor, presented, and the tick is paced.
    #[allow(clippy::missing_errors_doc)]
    pub fn tick(&mut self) -> Result<State, S::Error> {
        match self.state {
            State::Stopped => return Ok(State::Stopped),
            State::Idle => {
                info!(
                    nrows = self.grid.nrows(),
                    ncols = self.grid.ncols(),
                    "starting simulation"
                );
                self.state = State::Running;
            }
            State::Running => {}
        }

        if self.surface.poll_quit() {
            info!(generation = self.generation, "quit requested, stopping");
            self.state = State::Stopped;
            return Ok(self.state);
        }

        self.render()?;
        self.grid = self.grid.advance();
        self.generation += 1;
        debug!(
            generation = self.generation,
            alive = self.grid.alive_count(),
            "advanced"
        );
        self.surface.present()?;
        self.surface.sleep_until_next_tick();
        Ok(self.state)
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn run(&mut self) -> Result<(), S::Error> {
        while self.tick()? != State::Stopped {}
        Ok(())
    }

    fn render(&mut self) -> Result<(), S::Error> {
        let step = self.cell_size.max(1) as usize;
        for x in (0..self.width).step_by(step) {
            self.surface.draw_line(
                Point { x, y: 0 },
                Point { x, y: self.height },
                GRIDLINE_COLOUR,
            )?;
        }
        for y in (0..self.height).step_by(step) {
            self.surface.draw_line(
                Point { x: 0, y },
                Point { x: self.width, y },
                GRIDLINE_COLOUR,
            )?;
        }

        for cell in &self.grid {
            let colour = if cell.alive() {
                ALIVE_COLOUR
            } else {
                DEAD_COLOUR
            };
            self.surface
                .draw_rectangle(cell_rect(cell.row(), cell.col(), self.cell_size), colour)?;
        }
        Ok(())
    }
}
