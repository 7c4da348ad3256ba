use tether_engine::{
    Game, GameConfig, EngineContext, RenderContext,
    InputEvent, InputQueue, RenderBuffer,
    FixedTimestep, ProtocolLayout,
};
use tether_engine::bridge::protocol::{
    HEADER_FLOATS, HEADER_FRAME_COUNTER, HEADER_MAX_INSTANCES, HEADER_INSTANCE_COUNT,
    HEADER_MAX_VECTOR_VERTICES, HEADER_VECTOR_VERTEX_COUNT, HEADER_WORLD_WIDTH,
    HEADER_WORLD_HEIGHT, HEADER_MAX_SOUNDS, HEADER_SOUND_COUNT, HEADER_MAX_EVENTS,
    HEADER_EVENT_COUNT, HEADER_PROTOCOL_VERSION, PROTOCOL_VERSION,
};
#[cfg(feature = "vectors")]
use tether_engine::VectorState;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    frame: u32,
    /// Flat buffer of sound event IDs for host reads.
    sound_buffer: Vec<u8>,
    header: [f32; HEADER_FLOATS],
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::with_seed(config.seed),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            #[cfg(feature = "vectors")]
            vectors: VectorState::with_capacity(config.max_vector_vertices),
            sound_buffer: Vec::with_capacity(config.max_sounds),
            game,
            timestep,
            layout,
            config,
            initialized: false,
            frame: 0,
            header: [0.0; HEADER_FLOATS],
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Forward a JSON tuning document to the game.
    pub fn load_config(&mut self, json: &str) {
        self.game.load_config(json);
    }

    /// Run one frame: fixed ticks, then a single render pass.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        // Fixed timestep accumulation. Queued input is seen by the first
        // tick only, so a pointer-down never applies twice.
        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            self.input.drain();
        }

        self.render_buffer.clear();
        #[cfg(feature = "vectors")]
        self.vectors.clear();
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
                #[cfg(feature = "vectors")]
                vectors: &mut self.vectors,
            };
            self.game.render(&mut render_ctx);
        }
        #[cfg(feature = "vectors")]
        self.vectors.truncate(self.layout.max_vector_vertices);

        // Pack sound events into flat buffer
        self.sound_buffer.clear();
        for sound in self.ctx.sounds.iter().take(self.layout.max_sounds) {
            self.sound_buffer.push(sound.0 as u8);
        }
        if self.ctx.events.len() > self.layout.max_events {
            log::warn!("dropping {} game events", self.ctx.events.len() - self.layout.max_events);
            self.ctx.events.truncate(self.layout.max_events);
        }

        self.frame = self.frame.wrapping_add(1);
        self.write_header();
    }

    /// Live world size: the game's own report, else the configured one.
    fn world_size(&self) -> (f32, f32) {
        match self.game.world_size() {
            Some(size) => (size.x, size.y),
            None => (self.config.world_width, self.config.world_height),
        }
    }

    fn write_header(&mut self) {
        let vertex_count = self.vector_vertex_count() as f32;
        let (world_w, world_h) = self.world_size();
        let h = &mut self.header;
        h[HEADER_FRAME_COUNTER] = self.frame as f32;
        h[HEADER_MAX_INSTANCES] = self.layout.max_instances as f32;
        h[HEADER_INSTANCE_COUNT] = self.render_buffer.instance_count() as f32;
        h[HEADER_MAX_VECTOR_VERTICES] = self.layout.max_vector_vertices as f32;
        h[HEADER_VECTOR_VERTEX_COUNT] = vertex_count;
        h[HEADER_WORLD_WIDTH] = world_w;
        h[HEADER_WORLD_HEIGHT] = world_h;
        h[HEADER_MAX_SOUNDS] = self.layout.max_sounds as f32;
        h[HEADER_SOUND_COUNT] = self.sound_buffer.len() as f32;
        h[HEADER_MAX_EVENTS] = self.layout.max_events as f32;
        h[HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
        h[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    }

    // ---- Pointer accessors for host reads ----

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    pub fn vector_vertex_count(&self) -> u32 {
        #[cfg(feature = "vectors")]
        {
            self.vectors.vertex_count() as u32
        }
        #[cfg(not(feature = "vectors"))]
        {
            0
        }
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.world_size().0
    }

    pub fn world_height(&self) -> f32 {
        self.world_size().1
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_vector_vertices(&self) -> u32 {
        self.layout.max_vector_vertices as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_engine::{GameEvent, RenderInstance, SoundEvent};

    /// Counts ticks and pointer-downs, renders one instance.
    struct Probe {
        ticks: u32,
        downs: u32,
    }

    impl Game for Probe {
        fn init(&mut self, _ctx: &mut EngineContext) {}

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.ticks += 1;
            for event in input.iter() {
                if let InputEvent::PointerDown { .. } = event {
                    self.downs += 1;
                    ctx.emit_sound(SoundEvent(3));
                    ctx.emit_event(GameEvent::new(3.0, 0.0, 0.0, 0.0));
                }
            }
        }

        fn render(&self, ctx: &mut RenderContext) {
            ctx.render_buffer.push(RenderInstance { x: self.ticks as f32, ..Default::default() });
        }
    }

    #[test]
    fn tick_before_init_is_ignored() {
        let mut runner = GameRunner::new(Probe { ticks: 0, downs: 0 });
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game.ticks, 0);
    }

    #[test]
    fn input_applies_once_per_frame() {
        let mut runner = GameRunner::new(Probe { ticks: 0, downs: 0 });
        runner.init();
        runner.push_input(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        runner.tick(4.0 / 60.0 + 0.001);
        assert_eq!(runner.game.ticks, 4);
        assert_eq!(runner.game.downs, 1);
        assert_eq!(runner.sound_events_len(), 1);
        assert_eq!(runner.game_events_len(), 1);
    }

    #[test]
    fn render_runs_once_per_frame() {
        let mut runner = GameRunner::new(Probe { ticks: 0, downs: 0 });
        runner.init();
        runner.tick(3.0 / 60.0 + 0.001);
        assert_eq!(runner.instance_count(), 1);
        assert_eq!(runner.header()[HEADER_INSTANCE_COUNT], 1.0);
        assert_eq!(runner.header()[HEADER_FRAME_COUNTER], 1.0);
    }

    /// Reports a world that grows after each pointer-down.
    struct Stretchy {
        size: glam::Vec2,
    }

    impl Game for Stretchy {
        fn init(&mut self, _ctx: &mut EngineContext) {}

        fn update(&mut self, _ctx: &mut EngineContext, input: &InputQueue) {
            for event in input.iter() {
                if let InputEvent::PointerDown { x, y } = *event {
                    self.size = glam::Vec2::new(x, y);
                }
            }
        }

        fn world_size(&self) -> Option<glam::Vec2> {
            Some(self.size)
        }
    }

    #[test]
    fn header_reports_configured_world_by_default() {
        let mut runner = GameRunner::new(Probe { ticks: 0, downs: 0 });
        runner.init();
        runner.tick(1.0 / 60.0 + 0.001);
        assert_eq!(runner.header()[HEADER_WORLD_WIDTH], 800.0);
        assert_eq!(runner.header()[HEADER_WORLD_HEIGHT], 600.0);
        assert_eq!(runner.world_width(), 800.0);
    }

    #[test]
    fn header_reports_live_world_size() {
        let mut runner = GameRunner::new(Stretchy { size: glam::Vec2::new(800.0, 600.0) });
        runner.init();
        runner.push_input(InputEvent::PointerDown { x: 1024.0, y: 512.0 });
        runner.tick(1.0 / 60.0 + 0.001);
        assert_eq!(runner.header()[HEADER_WORLD_WIDTH], 1024.0);
        assert_eq!(runner.header()[HEADER_WORLD_HEIGHT], 512.0);
        assert_eq!(runner.world_width(), 1024.0);
        assert_eq!(runner.world_height(), 512.0);
    }

    #[test]
    fn header_counts_vectors() {
        let mut runner = GameRunner::new(Probe { ticks: 0, downs: 0 });
        runner.init();
        runner.tick(1.0 / 60.0 + 0.001);
        assert_eq!(runner.header()[HEADER_VECTOR_VERTEX_COUNT], runner.vector_vertex_count() as f32);
    }

    #[test]
    fn frame_data_clears_between_frames() {
        let mut runner = GameRunner::new(Probe { ticks: 0, downs: 0 });
        runner.init();
        runner.push_input(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        runner.tick(1.0 / 60.0 + 0.001);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.sound_events_len(), 0);
        assert_eq!(runner.game_events_len(), 0);
    }
}
