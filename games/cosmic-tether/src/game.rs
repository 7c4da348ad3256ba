//! Cosmic Tether: rescue ideals from a black hole by dragging them into the repository.
//!
//! The host owns the DOM. Rust runs the simulation, draws the black hole into
//! the vector buffer and writes one layout instance per ideal.

use glam::Vec2;
use tether_engine::*;
use tether_engine::api::game::GameConfig;
use tether_engine::input::queue::{InputEvent, InputQueue};

use crate::blackhole::{BlackHole, RenderSurface};
use crate::config::TetherConfig;
use crate::drag::{DragController, DropOutcome};
use crate::energy::EnergyMeter;
use crate::error::TetherError;
use crate::gravity::{self, GravityZone, StepOutcome};
use crate::ideal;
use crate::scheduler::FrameScheduler;
use crate::world::{default_repository, World};

// ── World layout ─────────────────────────────────────────────────────

const WORLD_W: f32 = 1600.0;
const WORLD_H: f32 = 900.0;
const FIXED_DT: f32 = 1.0 / 60.0;

// ── Custom event kinds from the host ─────────────────────────────────

const CUSTOM_START: u32 = 1;
const CUSTOM_STOP: u32 = 2;
const CUSTOM_REPOSITORY_ORIGIN: u32 = 3;
const CUSTOM_REPOSITORY_SIZE: u32 = 4;
/// Viewport resize (a = width, b = height, c = device pixel ratio).
const CUSTOM_RESIZE: u32 = 99;

// ── Game event kinds to the host ─────────────────────────────────────

const EVENT_ENERGY: f32 = 1.0;
const EVENT_SPAWNED: f32 = 2.0;
const EVENT_GRABBED: f32 = 3.0;
const EVENT_SAVED: f32 = 4.0;
const EVENT_SHRINK_STARTED: f32 = 5.0;
const EVENT_DESTROYED: f32 = 6.0;
const EVENT_NO_ENERGY: f32 = 7.0;

// ── Sounds ───────────────────────────────────────────────────────────

const SOUND_SAVE: SoundEvent = SoundEvent(1);
const SOUND_SHRINKING: SoundEvent = SoundEvent(2);
const SOUND_GRAB: SoundEvent = SoundEvent(3);
const SOUND_NO_ENERGY: SoundEvent = SoundEvent(4);

// ── Layout instance flags ────────────────────────────────────────────

const FLAG_HELD: f32 = 1.0;
const FLAG_SHRINKING: f32 = 2.0;

pub struct CosmicTether {
    config: TetherConfig,
    world: World,
    drag: DragController,
    scheduler: FrameScheduler,
    surface: RenderSurface,
    /// `None` before the first start or when the surface is unusable.
    visual: Option<BlackHole>,
    /// Set once the host places the repository itself.
    repository_from_host: bool,
}

impl CosmicTether {
    pub fn new() -> Self {
        let config = TetherConfig::default();
        let surface = RenderSurface::new(WORLD_W, WORLD_H, 1.0);
        let zone = GravityZone::from_surface(surface.width, surface.height, config.gravity.zone_radius_fraction);
        let world = World::new(
            Vec2::new(surface.width, surface.height),
            zone,
            EnergyMeter::from_config(&config.energy),
        );
        let scheduler = FrameScheduler::new(config.spawn_period());
        Self {
            config,
            world,
            drag: DragController::new(),
            scheduler,
            surface,
            visual: None,
            repository_from_host: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn visual(&self) -> Option<&BlackHole> {
        self.visual.as_ref()
    }

    // ── Lifecycle ──────────────────────────────────────────────────

    fn start(&mut self, ctx: &mut EngineContext) {
        if !self.scheduler.start() {
            return;
        }
        self.drag = DragController::new();
        self.world.ideals.clear();
        self.world.energy.refill();
        self.rebuild_visual(ctx);
        self.emit_energy(ctx);
        log::info!("game started");
    }

    fn stop(&mut self) {
        if !self.scheduler.stop() {
            return;
        }
        self.drag.cancel(&mut self.world);
        log::info!("game stopped with {} ideals in play", self.world.ideals.len());
    }

    fn resize(&mut self, ctx: &mut EngineContext, width: f32, height: f32, dpi: f32) {
        self.surface = RenderSurface::new(width, height, dpi);
        log::info!("resize: {}x{} @{}x", width, height, dpi);
        if self.surface.validate().is_ok() {
            self.apply_surface();
        }
        if self.scheduler.is_running() {
            self.rebuild_visual(ctx);
        }
    }

    /// Re-derive everything sized from the surface.
    fn apply_surface(&mut self) {
        let bounds = Vec2::new(self.surface.width, self.surface.height);
        self.world.bounds = bounds;
        self.world.zone = GravityZone::from_surface(
            self.surface.width,
            self.surface.height,
            self.config.gravity.zone_radius_fraction,
        );
        if !self.repository_from_host {
            self.world.repository = default_repository(bounds);
        }
    }

    fn rebuild_visual(&mut self, ctx: &mut EngineContext) {
        self.visual = match BlackHole::new(self.surface, &self.config.visual, &mut ctx.rng) {
            Ok(visual) => Some(visual),
            Err(e) => {
                log::warn!("{}; continuing without the black hole", e);
                None
            }
        };
    }

    // ── Input ──────────────────────────────────────────────────────

    fn handle_input(&mut self, ctx: &mut EngineContext, event: &InputEvent) {
        match *event {
            InputEvent::Custom { kind, a, b, c } => self.handle_custom(ctx, kind, a, b, c),
            _ if !self.scheduler.is_running() => {}
            InputEvent::PointerDown { x, y } => self.pointer_down(ctx, Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => self.drag.drag_to(&mut self.world, Vec2::new(x, y)),
            InputEvent::PointerUp { .. } => self.pointer_up(ctx),
        }
    }

    fn handle_custom(&mut self, ctx: &mut EngineContext, kind: u32, a: f32, b: f32, c: f32) {
        match kind {
            CUSTOM_START => self.start(ctx),
            CUSTOM_STOP => self.stop(),
            CUSTOM_REPOSITORY_ORIGIN => {
                let size = self.world.repository.size();
                self.world.repository = Rect::from_origin_size(Vec2::new(a, b), size);
                self.repository_from_host = true;
            }
            CUSTOM_REPOSITORY_SIZE => {
                let origin = self.world.repository.min;
                self.world.repository = Rect::from_origin_size(origin, Vec2::new(a.max(0.0), b.max(0.0)));
                self.repository_from_host = true;
            }
            CUSTOM_RESIZE => self.resize(ctx, a, b, c),
            _ => log::debug!("unknown custom event {}", kind),
        }
    }

    fn pointer_down(&mut self, ctx: &mut EngineContext, p: Vec2) {
        let Some(id) = self.world.hit_test(p) else { return };
        match self.drag.grab(&mut self.world, id, p, self.config.energy.grab_cost) {
            Ok(()) => {
                ctx.emit_event(GameEvent::new(EVENT_GRABBED, id.0 as f32, p.x, p.y));
                ctx.emit_sound(SOUND_GRAB);
                self.emit_energy(ctx);
            }
            Err(TetherError::ResourceUnavailable { needed, available }) => {
                log::debug!("grab of ideal {} refused: need {needed:.1}, have {available:.1}", id.0);
                ctx.emit_event(GameEvent::new(EVENT_NO_ENERGY, id.0 as f32, p.x, p.y));
                ctx.emit_sound(SOUND_NO_ENERGY);
            }
            Err(e) => log::debug!("{}", e),
        }
    }

    fn pointer_up(&mut self, ctx: &mut EngineContext) {
        match self.drag.release(&mut self.world) {
            Some(DropOutcome::Saved { id, pos, category }) => {
                let label = self
                    .config
                    .categories
                    .get(category)
                    .map(|c| c.label.as_str())
                    .unwrap_or("?");
                log::info!("saved {} ({})", label, id.0);
                ctx.emit_event(GameEvent::new(EVENT_SAVED, id.0 as f32, pos.x, pos.y));
                ctx.emit_sound(SOUND_SAVE);
            }
            Some(DropOutcome::Released { id }) => log::debug!("ideal {} released", id.0),
            None => {}
        }
    }

    // ── Simulation ─────────────────────────────────────────────────

    fn spawn_ideal(&mut self, ctx: &mut EngineContext) {
        let id = ctx.next_id();
        let spawned = ideal::spawn(
            id,
            &mut ctx.rng,
            &self.config.categories,
            self.world.bounds,
            self.config.spawn.margin,
            self.world.zone.center,
        );
        if let Some(ideal) = spawned {
            ctx.emit_event(GameEvent::new(EVENT_SPAWNED, id.0 as f32, ideal.pos.x, ideal.pos.y));
            self.world.ideals.push(ideal);
        }
    }

    fn emit_energy(&self, ctx: &mut EngineContext) {
        let energy = &self.world.energy;
        ctx.emit_event(GameEvent::new(EVENT_ENERGY, energy.fraction(), energy.value(), energy.max()));
    }
}

impl Default for CosmicTether {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for CosmicTether {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: FIXED_DT,
            world_width: WORLD_W,
            world_height: WORLD_H,
            max_instances: 256,
            max_vector_vertices: 262_144,
            max_events: 256,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.emit_energy(ctx);
        log::info!("{} ideal categories loaded", self.config.categories.len());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            self.handle_input(ctx, event);
        }
        debug_assert!(self.world.held_count() <= 1);

        let Some(plan) = self.scheduler.tick(FIXED_DT) else {
            return;
        };
        for _ in 0..plan.spawns {
            self.spawn_ideal(ctx);
        }

        self.world.energy.regenerate();

        for outcome in gravity::step(&mut self.world.ideals, &self.world.zone, &self.config.gravity) {
            match outcome {
                StepOutcome::ShrinkStarted { id, .. } => {
                    ctx.emit_event(GameEvent::new(EVENT_SHRINK_STARTED, id.0 as f32, 0.0, 0.0));
                    ctx.emit_sound(SOUND_SHRINKING);
                }
                StepOutcome::Destroyed { id, .. } => {
                    ctx.emit_event(GameEvent::new(EVENT_DESTROYED, id.0 as f32, 0.0, 0.0));
                }
            }
        }

        if let Some(visual) = self.visual.as_mut() {
            visual.advance(&mut ctx.rng);
        }

        self.emit_energy(ctx);
    }

    fn render(&self, ctx: &mut RenderContext) {
        if let Some(visual) = &self.visual {
            visual.draw(ctx.vectors);
        }

        for ideal in &self.world.ideals {
            let tint = self
                .config
                .categories
                .get(ideal.category)
                .map(|c| c.tint())
                .unwrap_or(VectorColor::WHITE);
            let mut flags = 0.0;
            if ideal.held {
                flags += FLAG_HELD;
            }
            if ideal.is_shrinking() {
                flags += FLAG_SHRINKING;
            }
            let pushed = ctx.render_buffer.push(RenderInstance {
                id: ideal.id.0 as f32,
                x: ideal.pos.x,
                y: ideal.pos.y,
                radius: ideal.radius,
                scale: ideal.scale,
                alpha: ideal.opacity,
                category: ideal.category as f32,
                flags,
                r: tint.r,
                g: tint.g,
                b: tint.b,
                _pad: 0.0,
            });
            if !pushed {
                break;
            }
        }
    }

    fn load_config(&mut self, json: &str) {
        match TetherConfig::from_json(json) {
            Ok(config) => {
                self.scheduler.set_spawn_period(config.spawn_period());
                self.world.energy.reconfigure(&config.energy);
                self.config = config;
                if self.surface.validate().is_ok() {
                    self.apply_surface();
                }
                log::info!("tuning config applied, spawning every {}s", self.scheduler.spawn_period());
            }
            Err(e) => log::warn!("{}; keeping previous config", e),
        }
    }

    fn world_size(&self) -> Option<Vec2> {
        Some(self.world.bounds)
    }
}
