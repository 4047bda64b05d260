use clap::ArgMatches;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;
pub const DEFAULT_CELL_SIZE: u32 = 10;
pub const DEFAULT_SPEED: u16 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} should be a positive number, got {value}")]
    NotPositive { name: &'static str, value: u64 },

    #[error("{name} should be a number, got \"{value}\"")]
    InvalidNumber { name: &'static str, value: String },

    #[error("cell-size {cell_size} does not fit in a {width}x{height} window")]
    CellTooLarge {
        cell_size: u32,
        width: u32,
        height: u32,
    },
}

/// Everything needed to set up a run: window size in pixels, cell edge length
/// in pixels, generations per second, and where the first generation comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub speed: u16,
    pub input: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            speed: DEFAULT_SPEED,
            input: None,
            seed: None,
        }
    }
}

impl Settings {
    #[allow(clippy::missing_errors_doc)]
    pub fn from_matches(matches: &ArgMatches<'_>) -> Result<Settings, ConfigError> {
        let defaults = Settings::default();
        let settings = Settings {
            width: get_number("width", matches)?.unwrap_or(defaults.width),
            height: get_number("height", matches)?.unwrap_or(defaults.height),
            cell_size: get_number("cell-size", matches)?.unwrap_or(defaults.cell_size),
            speed: get_number("speed", matches)?.unwrap_or(defaults.speed),
            input: matches.value_of("input").map(PathBuf::from),
            seed: get_number("seed", matches)?,
        };
        settings.validate()?;
        Ok(settings)
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", u64::from(self.width)),
            ("height", u64::from(self.height)),
            ("cell-size", u64::from(self.cell_size)),
            ("speed", u64::from(self.speed)),
        ];
        if let Some(&(name, value)) = positive.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::NotPositive { name, value });
        }
        if self.cell_size > self.width || self.cell_size > self.height {
            return Err(ConfigError::CellTooLarge {
                cell_size: self.cell_size,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        (self.height / self.cell_size) as usize
    }

    pub fn cols(&self) -> usize {
        (self.width / self.cell_size) as usize
    }

    /// Resizes the window so that exactly `nrows` x `ncols` cells fit.
    pub fn fit_to(&mut self, nrows: usize, ncols: usize) {
        self.width = self.cell_size.saturating_mul(u32::try_from(ncols).unwrap_or(u32::MAX));
        self.height = self.cell_size.saturating_mul(u32::try_from(nrows).unwrap_or(u32::MAX));
    }
}

fn get_number<A>(name: &'static str, matches: &ArgMatches<'_>) -> Result<Option<A>, ConfigError>
where
    A: FromStr,
{
    match matches.value_of(name) {
        Some(s) => s.trim().parse::<A>().map(Some).map_err(|_| ConfigError::InvalidNumber {
            name,
            value: s.to_owned(),
        }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{App, Arg};

    fn matches_for(args: &[&str]) -> ArgMatches<'static> {
        App::new("test")
            .arg(Arg::with_name("width").long("width").takes_value(true))
            .arg(Arg::with_name("height").long("height").takes_value(true))
            .arg(Arg::with_name("cell-size").long("cell-size").takes_value(true))
            .arg(Arg::with_name("speed").long("speed").takes_value(true))
            .arg(Arg::with_name("input").long("input").takes_value(true))
            .arg(Arg::with_name("seed").long("seed").takes_value(true))
            .get_matches_from(std::iter::once("test").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_matches(&matches_for(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.cols(), 64);
        assert_eq!(settings.rows(), 48);
    }

    #[test]
    fn test_from_matches() {
        let settings = Settings::from_matches(&matches_for(&[
            "--width",
            "320",
            "--height",
            "240",
            "--cell-size",
            "20",
            "--speed",
            "5",
            "--input",
            "board.txt",
            "--seed",
            "42",
        ]))
        .unwrap();
        assert_eq!((settings.cols(), settings.rows()), (16, 12));
        assert_eq!(settings.speed, 5);
        assert_eq!(settings.input, Some(PathBuf::from("board.txt")));
        assert_eq!(settings.seed, Some(42));
    }

    #[test]
    fn test_rejects_zero() {
        assert_eq!(
            Settings::from_matches(&matches_for(&["--speed", "0"])),
            Err(ConfigError::NotPositive {
                name: "speed",
                value: 0
            })
        );
        let settings = Settings {
            cell_size: 0,
            ..Settings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::NotPositive {
                name: "cell-size",
                value: 0
            })
        );
        assert_eq!(
            Settings::from_matches(&matches_for(&["--width", "0"])),
            Err(ConfigError::NotPositive {
                name: "width",
                value: 0
            })
        );
        let settings = Settings {
            height: 0,
            ..Settings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::NotPositive {
                name: "height",
                value: 0
            })
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(
            Settings::from_matches(&matches_for(&["--width", "wide"])),
            Err(ConfigError::InvalidNumber {
                name: "width",
                value: "wide".to_owned()
            })
        );
        assert!(Settings::from_matches(&matches_for(&["--seed", "abc"])).is_err());
    }

    #[test]
    fn test_rejects_oversized_cells() {
        let settings = Settings {
            width: 100,
            height: 50,
            cell_size: 60,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::CellTooLarge { .. })
        ));
    }

    #[test]
    fn test_fit_to() {
        let mut settings = Settings::default();
        settings.fit_to(3, 7);
        assert_eq!((settings.width, settings.height), (70, 30));
        assert_eq!((settings.rows(), settings.cols()), (3, 7));
    }
}
