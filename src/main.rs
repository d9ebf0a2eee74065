mod config;
mod driver;
mod engine;
mod error;
mod grid;
mod input;
mod render;
mod rules;
mod state;

use crate::config::{detect_terminal_size, CliArgs, RenderMode, SimulationConfig};
use crate::driver::Driver;
use crate::engine::GridEngine;
use crate::render::{text::TextRenderer, window::WindowRenderer, Renderer};
use crate::rules::patterns::PatternCatalog;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    // Usage errors exit with status 2, help with 0
    let args = CliArgs::parse();

    let catalog = PatternCatalog::load(&args.patterns_file);

    if args.list_patterns() {
        for name in catalog.names() {
            println!("{}", name);
        }
        return ExitCode::SUCCESS;
    }

    let config = SimulationConfig::from_args(&args, detect_terminal_size());
    log::info!("Running with {:?}", config);

    let mut renderer: Box<dyn Renderer> = match config.render_mode() {
        RenderMode::Text => Box::new(TextRenderer::stdout()),
        RenderMode::Graphical => match WindowRenderer::new(config.width(), config.height()) {
            Ok(renderer) => Box::new(renderer),
            Err(e) => {
                log::error!("Could not open window: {}", e);
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let mut driver = Driver::new(config.interval(), config.steps());
    let mut engine = GridEngine::new(config, &catalog);

    match driver.run(&mut engine, renderer.as_mut()) {
        Ok(reason) => {
            log::info!(
                "Stopped ({:?}) at generation {} with {} cells alive",
                reason,
                engine.generation(),
                engine.population()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Rendering failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
