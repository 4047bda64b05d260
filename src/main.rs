use clap::{App, Arg};
use life::config::{self, Settings};
use life::data::Grid;
use life::rendering::{self, GlSurface};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::process::exit;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    exit(match inner_main() {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("{}", err);
            1
        }
    })
}

fn inner_main() -> Result<(), Box<dyn Error>> {
    let width = config::DEFAULT_WIDTH.to_string();
    let height = config::DEFAULT_HEIGHT.to_string();
    let cell_size = config::DEFAULT_CELL_SIZE.to_string();
    let speed = config::DEFAULT_SPEED.to_string();
    let matches = App::new("Game of Life")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Conway's Game of Life on a bounded grid")
        .arg(
            Arg::with_name("width")
                .short("w")
                .long("width")
                .default_value(&width)
                .help("Width of the window in pixels"),
        )
        .arg(
            Arg::with_name("height")
                .short("h")
                .long("height")
                .default_value(&height)
                .help("Height of the window in pixels"),
        )
        .arg(
            Arg::with_name("cell-size")
                .short("c")
                .long("cell-size")
                .default_value(&cell_size)
                .help("Edge length of a cell in pixels"),
        )
        .arg(
            Arg::with_name("speed")
                .short("s")
                .long("speed")
                .default_value(&speed)
                .help("Number of generations per second"),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .value_name("FILE")
                .help("Start from a text file of '0'/'1' rows instead of a random grid"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .help("Seed for the random starting grid"),
        )
        .get_matches();

    let mut settings = Settings::from_matches(&matches)?;

    let grid = match settings.input.clone() {
        Some(path) => {
            let grid = Grid::from_file(&path)?;
            settings.fit_to(grid.nrows(), grid.ncols());
            grid
        }
        None => match settings.seed {
            Some(seed) => {
                Grid::random_with(settings.rows(), settings.cols(), &mut StdRng::seed_from_u64(seed))
            }
            None => Grid::new(settings.rows(), settings.cols(), true),
        },
    };
    info!(?settings, "configured");

    let surface = GlSurface::new(settings.width, settings.height, settings.speed)?;
    let mut app = rendering::App::new(grid, surface, &settings);
    app.run()?;
    info!(generations = app.generation(), "done");
    Ok(())
}
