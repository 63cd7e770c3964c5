use anyhow::Result;
use log::{error, info};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod app;
mod config;
mod core;
mod engine;
mod game;

use app::{App, AppControl};
use config::DisplayConfig;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Tile Runner...");

    let display = DisplayConfig::default();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(display.title.as_str())
            .with_inner_size(winit::dpi::PhysicalSize::new(
                display.window_width,
                display.window_height,
            ))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut app = Some(App::new(window, display)?);
    let failed = Rc::new(Cell::new(false));
    let frame_failed = failed.clone();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => {
                let Some(state) = app.as_mut() else {
                    return;
                };

                match event {
                    WindowEvent::CloseRequested => {
                        info!("Close requested, shutting down...");
                        elwt.exit();
                    }
                    WindowEvent::RedrawRequested => {
                        if let Err(e) = state.frame() {
                            error!("Frame failed: {:#}", e);
                            frame_failed.set(true);
                            elwt.exit();
                        }
                    }
                    other => {
                        if state.handle_window_event(&other) == AppControl::Exit {
                            elwt.exit();
                        }
                    }
                }
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                if let Some(state) = app.as_ref() {
                    state.window().request_redraw();
                }
            }
            Event::LoopExiting => {
                if let Some(state) = app.take() {
                    state.shutdown();
                }
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    if failed.get() {
        anyhow::bail!("Stopped after a rendering error");
    }

    info!("Goodbye");
    Ok(())
}
