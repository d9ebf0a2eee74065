use std::time::Duration;

use crate::engine::GridEngine;
use crate::error::RenderError;
use crate::render::Renderer;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The renderer asked to stop (window closed).
    UserQuit,
    /// The configured number of generations has run.
    StepsExhausted,
}

/// Driver loop states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Rendering,
    Advancing,
    Stopped(StopReason),
}

/// Alternates rendering and advancing the engine, pacing between frames.
pub struct Driver {
    interval: Duration,
    remaining: Option<u64>,
    state: DriverState,
}

impl Driver {
    /// `steps` of `None` runs until the renderer stops it.
    pub fn new(interval: Duration, steps: Option<u64>) -> Self {
        Self {
            interval,
            remaining: steps,
            state: DriverState::Running,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    fn budget_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Runs until the renderer quits or, for renderers that don't hold the
    /// last frame, until the step budget is spent.
    pub fn run(&mut self, engine: &mut GridEngine, renderer: &mut dyn Renderer) -> Result<StopReason, RenderError> {
        loop {
            if let DriverState::Stopped(reason) = self.state {
                return Ok(reason);
            }
            self.state = self.tick(engine, renderer)?;
        }
    }

    fn tick(&mut self, engine: &mut GridEngine, renderer: &mut dyn Renderer) -> Result<DriverState, RenderError> {
        match self.state {
            DriverState::Running => {
                if renderer.should_stop() {
                    return Ok(DriverState::Stopped(StopReason::UserQuit));
                }
                if self.budget_exhausted() && !renderer.holds_last_frame() {
                    return Ok(DriverState::Stopped(StopReason::StepsExhausted));
                }
                Ok(DriverState::Rendering)
            }
            DriverState::Rendering => {
                renderer.render(engine.grid())?;
                if self.budget_exhausted() {
                    // Final frame is redrawn without advancing
                    renderer.pace(self.interval);
                    Ok(DriverState::Running)
                } else {
                    Ok(DriverState::Advancing)
                }
            }
            DriverState::Advancing => {
                engine.advance();
                if let Some(n) = self.remaining.as_mut() {
                    *n -= 1;
                    if *n == 0 {
                        log::info!("Step budget spent after generation {}", engine.generation());
                    }
                }
                renderer.pace(self.interval);
                Ok(DriverState::Running)
            }
            DriverState::Stopped(reason) => Ok(DriverState::Stopped(reason)),
        }
    }
}
