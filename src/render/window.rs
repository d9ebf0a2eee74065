use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    dpi::LogicalSize,
    event::Event,
    event_loop::EventLoop,
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::WindowBuilder,
};

use super::{Renderer, CELL_SIZE};
use crate::error::RenderError;
use crate::grid::{Cell, Grid};
use crate::input::{handle_window_event, WindowAction};
use crate::state::State;

const WINDOW_TITLE: &str = "Game of Life";

/// Draws frames into a window. Events are pumped from `should_stop` and
/// while pacing, so a close request is noticed within one frame.
pub struct WindowRenderer {
    event_loop: EventLoop<()>,
    state: State,
    quit: bool,
    last_frame: Instant,
}

impl WindowRenderer {
    /// Opens a `width * CELL_SIZE` by `height * CELL_SIZE` window.
    pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
        let event_loop = EventLoop::new()?;

        let inner_size = LogicalSize::new(
            width as f64 * CELL_SIZE as f64,
            height as f64 * CELL_SIZE as f64,
        );
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(WINDOW_TITLE)
                .with_inner_size(inner_size)
                .with_resizable(false)
                .build(&event_loop)?,
        );

        let state = pollster::block_on(State::new(window, width as u32, height as u32))?;

        Ok(Self {
            event_loop,
            state,
            quit: false,
            last_frame: Instant::now(),
        })
    }

    /// Handles pending window events, waiting at most `timeout` for one
    /// (`None` waits until an event arrives).
    fn pump(&mut self, timeout: Option<Duration>) {
        if self.quit {
            return;
        }

        let state = &mut self.state;
        let quit = &mut self.quit;
        let status = self.event_loop.pump_events(timeout, |event, window_target| {
            if let Event::WindowEvent { window_id, event } = event {
                if window_id != state.window.id() {
                    return;
                }
                match handle_window_event(&event) {
                    WindowAction::Quit => {
                        *quit = true;
                        window_target.exit();
                    }
                    WindowAction::Resize(new_size) => state.resize(new_size),
                    WindowAction::Continue => {}
                }
            }
        });

        if let PumpStatus::Exit(code) = status {
            log::info!("Event loop exited with code {}", code);
            self.quit = true;
        }
    }
}

impl Renderer for WindowRenderer {
    fn render(&mut self, grid: &Grid<Cell>) -> Result<(), RenderError> {
        self.state.render(grid)
    }

    fn should_stop(&mut self) -> bool {
        self.pump(Some(Duration::ZERO));
        self.quit
    }

    /// Frame-rate limited wait: keeps handling events until `interval` has
    /// passed since the previous frame.
    fn pace(&mut self, interval: Duration) {
        // No deadline when the interval is too long to represent
        let deadline = self.last_frame.checked_add(interval);
        loop {
            let now = Instant::now();
            if self.quit || deadline.is_some_and(|d| now >= d) {
                break;
            }
            self.pump(deadline.map(|d| d - now));
        }
        self.last_frame = Instant::now();
    }

    fn holds_last_frame(&self) -> bool {
        true
    }
}
