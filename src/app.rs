// Application state: everything the event loop drives once the window exists

use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::Arc;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::config::{DisplayConfig, DisplayEvent};
use crate::engine::assets::AssetLoader;
use crate::engine::game_loop::FrameClock;
use crate::engine::input::{Action, KeyboardState};
use crate::engine::renderer::Renderer;
use crate::game::{build_level, FrameContext, IgnoreOverlaps, Resources, TileGrid, World};

/// How often the frame rate is logged, in frames
const FPS_LOG_INTERVAL: u64 = 120;

/// What the event loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Exit,
}

pub struct App {
    window: Arc<Window>,
    display: DisplayConfig,
    renderer: Renderer,
    resources: Resources,
    world: World,
    keyboard: KeyboardState,
    clock: FrameClock,
    overlaps: IgnoreOverlaps,
}

impl App {
    /// Bring up the renderer, load textures and build the demo level
    pub fn new(window: Arc<Window>, display: DisplayConfig) -> Result<Self> {
        let mut renderer = pollster::block_on(Renderer::new(window.clone(), &display))
            .context("Failed to initialize renderer")?;

        let assets = AssetLoader::from_executable_dir().context("Failed to locate assets")?;
        info!("Loading assets from {}", assets.base_path().display());

        let resources = Resources::load(&mut renderer.texture_loader(&assets))?;
        let grid = TileGrid::demo().context("Invalid demo map")?;
        let world = build_level(&grid, &resources, &display).context("Failed to build level")?;

        Ok(Self {
            window,
            display,
            renderer,
            resources,
            world,
            keyboard: KeyboardState::new(),
            clock: FrameClock::new(),
            overlaps: IgnoreOverlaps,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Feed a window event into display config and input state
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::Resized(size) => {
                let resized = DisplayEvent::Resized {
                    width: size.width,
                    height: size.height,
                };
                if self.display.apply(resized) {
                    debug!("Window resized to {}x{}", size.width, size.height);
                    self.renderer.resize(&self.display);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard.process_keyboard_event(event);
                if self.keyboard.is_pressed(Action::Quit) {
                    info!("Quit key pressed");
                    return AppControl::Exit;
                }
            }
            WindowEvent::Focused(false) => {
                // Key releases are not delivered while unfocused
                self.keyboard.reset();
            }
            _ => {}
        }

        AppControl::Continue
    }

    /// Run one update and draw pass and present the result
    pub fn frame(&mut self) -> Result<()> {
        let dt = self.clock.tick();

        let ctx = FrameContext {
            input: self.keyboard.movement(),
            resources: &self.resources,
            dt,
        };
        self.world.update(&ctx, &mut self.overlaps);

        self.renderer.begin_frame();
        self.world.draw(&mut self.renderer);
        self.renderer.present(&self.display)?;

        if self.clock.frame_count() % FPS_LOG_INTERVAL == 0 {
            debug!(
                "FPS: {:.1} ({} objects, player at {:?})",
                self.clock.fps(),
                self.world.len(),
                self.world.player().map(|p| p.position)
            );
        }

        Ok(())
    }

    /// Tear down in dependency order: objects, then textures, then the GPU
    pub fn shutdown(self) {
        let Self {
            mut renderer,
            world,
            resources,
            clock,
            ..
        } = self;

        release_textures((world, resources), || renderer.texture_manager_mut().unload_all());
        drop(renderer);

        info!(
            "Shut down after {} frames ({:.1}s)",
            clock.frame_count(),
            clock.elapsed().as_secs_f32()
        );
    }
}

/// Drop everything holding texture handles, then run `unload`
fn release_textures<H>(holders: H, unload: impl FnOnce()) {
    drop(holders);
    unload();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::TextureManager;
    use crate::game::resources::tests::test_resources;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    /// Records when the holders tuple is dropped
    struct DropGuard(Log);

    impl Drop for DropGuard {
        fn drop(&mut self) {
            self.0.borrow_mut().push("holders dropped");
        }
    }

    #[test]
    fn test_textures_released_after_world() {
        let resources = test_resources();
        let world = build_level(&TileGrid::demo().unwrap(), &resources, &DisplayConfig::default()).unwrap();
        let mut textures = TextureManager::new();
        let log = Log::default();

        release_textures((world, resources, DropGuard(log.clone())), || {
            log.borrow_mut().push("unloaded");
            textures.unload_all();
        });

        assert_eq!(*log.borrow(), vec!["holders dropped", "unloaded"]);
    }
}
