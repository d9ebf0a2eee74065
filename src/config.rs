use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::rules::patterns::{Rotation, DEFAULT_PATTERN_FILE};

pub const MIN_DIMENSION: usize = 10;
/// Largest grid side; keeps cell counts and window sizes in range.
pub const MAX_DIMENSION: usize = 10_000;
pub const DEFAULT_SPEED: f64 = 0.25;
/// Used when the terminal size cannot be queried.
pub const FALLBACK_TERMINAL_SIZE: (u16, u16) = (80, 24);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Text,
    Graphical,
}

impl RenderMode {
    /// Text wins unless only graphical was asked for, so passing both
    /// flags gives text mode.
    pub fn from_flags(terminal: bool, graphical: bool) -> Self {
        if terminal || !graphical {
            RenderMode::Text
        } else {
            RenderMode::Graphical
        }
    }
}

/// Conway's Game of Life on a wrapped grid.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "torus_life", version, long_about = None)]
pub struct CliArgs {
    /// Render as text in the terminal (default).
    #[arg(short = 't', long = "terminal", visible_alias = "tui")]
    pub terminal: bool,

    /// Render in a window.
    #[arg(short = 'g', long = "graphical", visible_alias = "gui")]
    pub graphical: bool,

    /// Grid width in cells (min 10); 0 uses half the terminal width.
    #[arg(
        short = 'x',
        long = "width",
        value_name = "N",
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(..=MAX_DIMENSION as i64)
    )]
    pub width: Option<i64>,

    /// Grid height in cells (min 10); 0 uses the terminal height.
    #[arg(
        short = 'y',
        long = "height",
        value_name = "N",
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(..=MAX_DIMENSION as i64)
    )]
    pub height: Option<i64>,

    /// Generations per second (default 4).
    #[arg(short = 's', long = "speed", value_name = "RATE", allow_negative_numbers = true)]
    pub speed: Option<f64>,

    /// Stop after N generations.
    #[arg(short = 'n', long = "steps", value_name = "N", allow_negative_numbers = true)]
    pub steps: Option<i64>,

    /// Rotate the starting pattern by DEGREES.
    #[arg(short = 'r', long = "rotate", value_name = "DEGREES", allow_negative_numbers = true)]
    pub rotate: Option<i64>,

    /// Starting pattern; without NAME, list the available patterns.
    #[arg(short = 'p', long = "pattern", value_name = "NAME", num_args = 0..=1)]
    pub pattern: Option<Option<String>>,

    /// Pattern file.
    #[arg(short = 'f', long = "patterns-file", value_name = "PATH", default_value = DEFAULT_PATTERN_FILE)]
    pub patterns_file: PathBuf,
}

impl CliArgs {
    /// `-p` was given without a name.
    pub fn list_patterns(&self) -> bool {
        matches!(&self.pattern, Some(name) if name.as_deref().map_or(true, str::is_empty))
    }

    /// The requested pattern name, if one was given.
    pub fn pattern_name(&self) -> Option<&str> {
        self.pattern.as_ref()?.as_deref().filter(|name| !name.is_empty())
    }
}

/// Terminal `(columns, rows)`, or the fallback size when it can't be read.
pub fn detect_terminal_size() -> (u16, u16) {
    match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => (cols, rows),
        Ok(_) => FALLBACK_TERMINAL_SIZE,
        Err(e) => {
            log::debug!("Terminal size unavailable ({}), using {:?}", e, FALLBACK_TERMINAL_SIZE);
            FALLBACK_TERMINAL_SIZE
        }
    }
}

/// Everything a run needs, resolved once and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    width: usize,
    height: usize,
    speed: f64,
    steps: Option<u64>,
    rotation: Rotation,
    pattern: Option<String>,
    render_mode: RenderMode,
}

impl SimulationConfig {
    /// Dimensions are clamped into `MIN_DIMENSION..=MAX_DIMENSION`.
    pub fn new(width: usize, height: usize, render_mode: RenderMode) -> Self {
        Self {
            width: width.clamp(MIN_DIMENSION, MAX_DIMENSION),
            height: height.clamp(MIN_DIMENSION, MAX_DIMENSION),
            speed: DEFAULT_SPEED,
            steps: None,
            rotation: Rotation::R0,
            pattern: None,
            render_mode,
        }
    }

    /// Resolves parsed arguments against the terminal size `(columns, rows)`.
    pub fn from_args(args: &CliArgs, terminal_size: (u16, u16)) -> Self {
        let (cols, rows) = terminal_size;
        let dimension = |given: Option<i64>, default: usize| match given {
            Some(n) if n != 0 => n.max(0) as usize,
            _ => default,
        };

        let speed = match args.speed {
            Some(rate) if rate > 0.0 => 1.0 / rate,
            _ => DEFAULT_SPEED,
        };

        Self::new(
            dimension(args.width, cols as usize / 2),
            dimension(args.height, rows as usize),
            RenderMode::from_flags(args.terminal, args.graphical),
        )
        .with_speed(speed)
        .with_steps(args.steps.filter(|&n| n > 0).map(|n| n as u64))
        .with_rotation(args.rotate.map_or(Rotation::R0, Rotation::from_degrees))
        .with_pattern(args.pattern_name().map(str::to_string))
    }

    /// Seconds per generation; non-positive or non-finite values reset to
    /// the default.
    pub fn with_speed(mut self, seconds: f64) -> Self {
        self.speed = if seconds.is_finite() && seconds > 0.0 {
            seconds
        } else {
            DEFAULT_SPEED
        };
        self
    }

    pub fn with_steps(mut self, steps: Option<u64>) -> Self {
        self.steps = steps.filter(|&n| n > 0);
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Pattern names are stored lowercase.
    pub fn with_pattern(mut self, pattern: Option<String>) -> Self {
        self.pattern = pattern.map(|p| p.to_lowercase());
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Seconds between generations.
    #[cfg(test)]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn interval(&self) -> Duration {
        // Tiny rates give intervals past what Duration can hold
        Duration::try_from_secs_f64(self.speed).unwrap_or(Duration::MAX)
    }

    pub fn steps(&self) -> Option<u64> {
        self.steps
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }
}
