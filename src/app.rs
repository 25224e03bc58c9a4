//! Event loop and demo wiring
//!
//! The frame clock decides when a tick is due and requests a redraw for it.
//! A due redraw ticks, plays the tick's sounds, draws and presents. Redraws
//! the platform sends on its own only draw and present.

use std::time::Instant;

use anyhow::Context;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use crate::assets::{self, Sprite};
use crate::audio::{AudioManager, SoundEffect};
use crate::consts::{TARGET_SIZE, TICK_RATE, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::platform::FrameClock;
use crate::renderer::{self, Canvas, HudFont, RenderError, Surface};
use crate::settings::Settings;
use crate::sim::{HaloState, SimEvent, SpawnerState, tick_halo, tick_spawner};

/// Which demo to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    /// Balls hit an orbiting sprite and split in two
    Spawner,
    /// One ball grows on every bounce inside a color-cycling halo
    Halo,
}

impl Demo {
    pub fn title(self) -> &'static str {
        match self {
            Demo::Spawner => "You are my sunshine",
            Demo::Halo => "Bouncing Balls",
        }
    }
}

/// Simulation state plus whatever the demo needs to draw it
enum Scene {
    Spawner {
        state: SpawnerState,
        sprite: Sprite,
        font: HudFont,
    },
    Halo {
        state: HaloState,
    },
}

impl Scene {
    fn load(demo: Demo, settings: &Settings) -> anyhow::Result<Self> {
        match demo {
            Demo::Spawner => {
                let path = settings.asset_path(&settings.sprite_file);
                let side = TARGET_SIZE as u32;
                let sprite = Sprite::load_scaled(&path, side, side)
                    .context("the target sprite is required")?;

                let font = assets::hud_font(settings.font_path.as_deref())
                    .context("no font for the collision counter")?;

                let seed = settings.seed.unwrap_or_else(rand::random);
                log::info!("Spawner seed: {seed}");
                let state = SpawnerState::new(seed).with_max_balls(settings.max_balls);

                Ok(Scene::Spawner {
                    state,
                    sprite,
                    font,
                })
            }
            Demo::Halo => Ok(Scene::Halo {
                state: HaloState::new(),
            }),
        }
    }

    /// Advance one tick and hand back the events it produced
    fn tick(&mut self) -> Vec<SimEvent> {
        match self {
            Scene::Spawner { state, .. } => {
                tick_spawner(state);
                state.drain_events()
            }
            Scene::Halo { state } => {
                tick_halo(state);
                state.drain_events()
            }
        }
    }

    fn draw(&self, canvas: &mut Canvas<'_>) {
        match self {
            Scene::Spawner {
                state,
                sprite,
                font,
            } => renderer::draw_spawner(canvas, state, sprite, font),
            Scene::Halo { state } => renderer::draw_halo(canvas, state),
        }
    }

    fn summary(&self) -> String {
        match self {
            Scene::Spawner { state, .. } => format!(
                "{} ticks, {} collisions, {} balls",
                state.time_ticks,
                state.collisions,
                state.balls.len()
            ),
            Scene::Halo { state } => format!(
                "{} ticks, {} bounces, ball radius {}",
                state.time_ticks, state.bounces, state.ball.radius
            ),
        }
    }
}

fn init_audio(demo: Demo, settings: &Settings) -> AudioManager {
    let mut audio = AudioManager::new(settings);
    audio.load_sound(SoundEffect::Bounce, &settings.asset_path(&settings.bounce_sound));
    audio.load_sound(SoundEffect::Interact, &settings.asset_path(&settings.interact_sound));

    if demo == Demo::Halo && audio.load_music(&settings.asset_path(&settings.music_file)) {
        audio.play_music_looping();
    }
    audio
}

struct App {
    demo: Demo,
    scene: Scene,
    audio: AudioManager,
    clock: FrameClock,
    surface: Option<Surface>,
    /// Set by the frame clock, consumed by the next redraw
    frame_due: bool,
    /// First fatal error; ends the loop and is returned from [`run`]
    failure: Option<RenderError>,
}

impl App {
    fn new(demo: Demo, scene: Scene, audio: AudioManager) -> Self {
        Self {
            demo,
            scene,
            audio,
            clock: FrameClock::new(TICK_RATE, Instant::now()),
            surface: None,
            frame_due: false,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: RenderError) {
        log::error!("{error}");
        self.failure.get_or_insert(error);
        event_loop.exit();
    }

    /// Run the pending tick, if the frame clock scheduled one
    fn step_if_due(&mut self) -> bool {
        if !std::mem::take(&mut self.frame_due) {
            return false;
        }
        let events = self.scene.tick();
        self.audio.play_events(&events);
        true
    }

    fn frame(&mut self) -> Result<(), RenderError> {
        self.step_if_due();

        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        let mut canvas = surface.canvas()?;
        self.scene.draw(&mut canvas);
        surface.present()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }

        match Surface::create(event_loop, self.demo.title(), WINDOW_WIDTH, WINDOW_HEIGHT) {
            Ok(surface) => self.surface = Some(surface),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                log::info!("Quit requested after {}", self.scene.summary());
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(surface) = self.surface.as_mut()
                    && let Err(e) = surface.resize_surface(size.width, size.height)
                {
                    self.fail(event_loop, e);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.frame() {
                    self.fail(event_loop, e);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.clock.try_frame(Instant::now()) {
            self.frame_due = true;
            if let Some(surface) = &self.surface {
                surface.window().request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_deadline()));
    }
}

/// Load assets, open the window and run `demo` until it is closed
pub fn run(demo: Demo, settings: Settings) -> anyhow::Result<()> {
    log::info!("Starting {:?} demo", demo);

    let scene = Scene::load(demo, &settings)?;
    let audio = init_audio(demo, &settings);

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(demo, scene, audio);
    event_loop.run_app(&mut app).context("event loop failed")?;

    match app.failure.take() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
