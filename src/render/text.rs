use std::io::{self, Write};

use super::Renderer;
use crate::error::RenderError;
use crate::grid::{Cell, Grid, ALIVE};

const LIVE: &str = "██";
const DEAD: &str = "  ";

/// Formats one frame. Rows of an even-width grid get one trailing space.
pub fn format_frame(grid: &Grid<Cell>) -> String {
    let (height, width) = grid.dimensions();
    let pad = width % 2 == 0;
    let mut frame = String::with_capacity(height * (width * LIVE.len() + 2));

    for row in grid.rows() {
        for &cell in row {
            frame.push_str(if cell == ALIVE { LIVE } else { DEAD });
        }
        if pad {
            frame.push(' ');
        }
        frame.push('\n');
    }

    frame
}

/// Prints every frame to a writer, stdout by default.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl TextRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, grid: &Grid<Cell>) -> Result<(), RenderError> {
        self.out.write_all(format_frame(grid).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
