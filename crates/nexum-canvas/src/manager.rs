//! Surface sizing and the animation loop.
//!
//! A [`SurfaceManager`] owns one drawing surface and one renderer. It sizes
//! the backing store from the viewport, re-seeds the renderer on every resize,
//! forwards pointer and scroll input, and keeps at most one frame callback
//! pending with the host's [`FrameScheduler`].
//!
//! On the constrained tier the loop is not scheduled at all: every resize
//! paints a single static frame instead.

use nexum_core::{DeviceTier, Point, RenderOptions, Size, Viewport};
use tracing::{debug, trace, warn};

use crate::budget::RenderConfig;
use crate::particle::{GlowSpot, Particle};
use crate::renderers::{FrameContext, Renderer};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::{Surface, SurfaceError};

/// Advance of the animation clock per frame.
pub const TIME_STEP: f32 = 0.016;

/// Environment events a mounted renderer listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    Resize,
    PointerMove,
    PointerLeave,
    Scroll,
}

/// Environment state observed by the manager between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceState {
    pub viewport: Viewport,
    /// Backing store size in device pixels.
    pub device_width: u32,
    pub device_height: u32,
    /// Ratio in effect after the tier cap.
    pub ratio: f32,
    pub pointer: Point,
    pub scroll: f32,
    pub time: f32,
}

impl SurfaceState {
    fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            device_width: 0,
            device_height: 0,
            ratio: 1.0,
            pointer: Point::OFF_SURFACE,
            scroll: 0.0,
            time: 0.0,
        }
    }

    pub fn size(&self) -> Size {
        self.viewport.size()
    }
}

#[derive(Debug)]
struct Mounted<S> {
    renderer: Box<dyn Renderer>,
    surface: S,
    options: RenderOptions,
    state: SurfaceState,
    config: RenderConfig,
    listeners: Vec<Listener>,
    pending: Option<FrameHandle>,
    /// False until a resize succeeds, and after teardown.
    drawable: bool,
}

/// Drives one renderer on one surface.
#[derive(Debug)]
pub struct SurfaceManager<S: Surface> {
    mounted: Option<Mounted<S>>,
}

impl<S: Surface> SurfaceManager<S> {
    /// Mount a renderer.
    ///
    /// When the surface could not be obtained the manager is inert: every
    /// method is a no-op and nothing is ever scheduled.
    pub fn mount(
        renderer: Box<dyn Renderer>,
        surface: Result<S, SurfaceError>,
        viewport: Viewport,
        options: RenderOptions,
        scheduler: &mut dyn FrameScheduler,
    ) -> Self {
        let surface = match surface {
            Ok(surface) => surface,
            Err(err) => {
                warn!(%err, style = %renderer.style(), "surface unavailable, background disabled");
                return Self { mounted: None };
            }
        };

        let listeners = renderer.listeners().to_vec();
        let config = RenderConfig::resolve(&renderer.budgets(), &viewport, &options);
        let mut manager = Self {
            mounted: Some(Mounted {
                renderer,
                surface,
                options,
                state: SurfaceState::new(viewport),
                config,
                listeners,
                pending: None,
                drawable: false,
            }),
        };
        if let Some(m) = manager.mounted.as_mut() {
            debug!(style = %m.renderer.style(), listeners = ?m.listeners, "mounted");
            m.apply_viewport(viewport, scheduler);
        }
        manager
    }

    /// A manager that never draws.
    pub fn inert() -> Self {
        Self { mounted: None }
    }

    pub fn is_inert(&self) -> bool {
        self.mounted.is_none()
    }

    /// Whether frames are currently being produced.
    pub fn is_drawable(&self) -> bool {
        self.mounted.as_ref().is_some_and(|m| m.drawable)
    }

    /// Viewport changed: resize the backing store, re-evaluate the tier and re-seed.
    pub fn resize(&mut self, viewport: Viewport, scheduler: &mut dyn FrameScheduler) {
        if let Some(m) = self.listening(Listener::Resize) {
            m.apply_viewport(viewport, scheduler);
        }
    }

    pub fn pointer_move(&mut self, at: Point) {
        if let Some(m) = self.listening(Listener::PointerMove) {
            m.state.pointer = at;
        }
    }

    pub fn pointer_leave(&mut self) {
        if let Some(m) = self.listening(Listener::PointerLeave) {
            m.state.pointer = Point::OFF_SURFACE;
        }
    }

    /// Vertical scroll offset of the page in logical pixels.
    pub fn scroll(&mut self, offset: f32) {
        if let Some(m) = self.listening(Listener::Scroll) {
            m.state.scroll = offset;
        }
    }

    /// Run a delivered frame callback. Returns whether a frame was drawn.
    ///
    /// Handles other than the pending one are ignored, so a callback that
    /// arrives after cancellation or teardown never touches the surface.
    pub fn run_frame(&mut self, handle: FrameHandle, scheduler: &mut dyn FrameScheduler) -> bool {
        let Some(m) = self.mounted.as_mut() else {
            return false;
        };
        if m.pending != Some(handle) {
            trace!(handle = handle.id(), "stale frame ignored");
            return false;
        }
        m.pending = None;
        if !m.drawable {
            return false;
        }
        m.state.time += TIME_STEP;
        m.draw();
        if m.config.looping {
            m.pending = Some(scheduler.request_frame());
        }
        true
    }

    /// Cancel the pending frame and drop every listener.
    pub fn teardown(&mut self, scheduler: &mut dyn FrameScheduler) {
        let Some(m) = self.mounted.as_mut() else {
            return;
        };
        if let Some(handle) = m.pending.take() {
            scheduler.cancel_frame(handle);
        }
        m.listeners.clear();
        m.drawable = false;
        debug!(style = %m.renderer.style(), "torn down");
    }

    fn listening(&mut self, listener: Listener) -> Option<&mut Mounted<S>> {
        self.mounted
            .as_mut()
            .filter(|m| m.listeners.contains(&listener))
    }

    pub fn surface(&self) -> Option<&S> {
        self.mounted.as_ref().map(|m| &m.surface)
    }

    pub fn state(&self) -> Option<&SurfaceState> {
        self.mounted.as_ref().map(|m| &m.state)
    }

    pub fn config(&self) -> Option<&RenderConfig> {
        self.mounted.as_ref().map(|m| &m.config)
    }

    pub fn tier(&self) -> Option<DeviceTier> {
        self.config().map(|c| c.tier)
    }

    pub fn listeners(&self) -> &[Listener] {
        self.mounted
            .as_ref()
            .map(|m| m.listeners.as_slice())
            .unwrap_or_default()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.mounted.as_ref().and_then(|m| m.pending)
    }

    pub fn particles(&self) -> &[Particle] {
        self.mounted
            .as_ref()
            .map(|m| m.renderer.particles())
            .unwrap_or_default()
    }

    pub fn glow_spots(&self) -> &[GlowSpot] {
        self.mounted
            .as_ref()
            .map(|m| m.renderer.glow_spots())
            .unwrap_or_default()
    }
}

impl<S: Surface> Mounted<S> {
    fn apply_viewport(&mut self, viewport: Viewport, scheduler: &mut dyn FrameScheduler) {
        self.state.viewport = viewport;
        self.config = RenderConfig::resolve(&self.renderer.budgets(), &viewport, &self.options);

        let size = viewport.size();
        if !(size.width.is_finite() && size.height.is_finite()) || size.is_empty() {
            debug!(width = size.width, height = size.height, "empty viewport, not drawing");
            self.stop(scheduler);
            return;
        }

        let ratio = viewport.effective_ratio(self.config.dpr_cap);
        let device_width = (size.width * ratio).floor().max(1.0) as u32;
        let device_height = (size.height * ratio).floor().max(1.0) as u32;
        if let Err(err) = self.surface.resize(device_width, device_height) {
            warn!(%err, "resize failed, background paused");
            self.stop(scheduler);
            return;
        }
        self.surface.set_transform(ratio);
        self.state.device_width = device_width;
        self.state.device_height = device_height;
        self.state.ratio = ratio;

        self.renderer.seed(&self.config, size);
        self.drawable = true;
        debug!(
            tier = ?self.config.tier,
            device_width,
            device_height,
            particles = self.renderer.particles().len(),
            glow_spots = self.renderer.glow_spots().len(),
            "re-seeded"
        );

        if self.config.looping {
            if self.pending.is_none() {
                self.pending = Some(scheduler.request_frame());
            }
        } else {
            if let Some(handle) = self.pending.take() {
                scheduler.cancel_frame(handle);
            }
            self.state.time += TIME_STEP;
            self.draw();
        }
    }

    fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.drawable = false;
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
    }

    fn draw(&mut self) {
        let frame = FrameContext {
            config: &self.config,
            size: self.state.size(),
            pointer: self.state.pointer,
            scroll: self.state.scroll,
            time: self.state.time,
        };
        self.renderer.draw(&mut self.surface, &frame);
    }
}

#[cfg(test)]
mod tests {
    use nexum_core::{BackgroundStyle, Rgba};

    use super::*;
    use crate::renderers::renderer_for;
    use crate::scheduler::FrameClock;
    use crate::test_support::{Op, RecordingSurface};

    fn mount(
        style: BackgroundStyle,
        options: RenderOptions,
        viewport: Viewport,
        clock: &mut FrameClock,
    ) -> SurfaceManager<RecordingSurface> {
        SurfaceManager::mount(
            renderer_for(style, options, 42),
            Ok(RecordingSurface::default()),
            viewport,
            options,
            clock,
        )
    }

    /// Deliver and run `frames` frames, returning how many drew.
    fn run(
        manager: &mut SurfaceManager<RecordingSurface>,
        clock: &mut FrameClock,
        frames: usize,
    ) -> usize {
        let mut drawn = 0;
        for _ in 0..frames {
            let Some(handle) = manager.pending_frame() else {
                break;
            };
            clock.cancel_frame(handle);
            if manager.run_frame(handle, clock) {
                drawn += 1;
            }
        }
        drawn
    }

    #[test]
    fn test_desktop_particles_stay_in_bounds() {
        let mut clock = FrameClock::default();
        let accent = Rgba::from_hex("#00E5FF").unwrap();
        let options = RenderOptions::default()
            .with_accent(accent)
            .with_particle_count(32);
        let mut manager = mount(
            BackgroundStyle::Neural,
            options,
            Viewport::new(1920.0, 1080.0, 1.0),
            &mut clock,
        );
        assert_eq!(manager.tier(), Some(DeviceTier::Full));
        assert_eq!(run(&mut manager, &mut clock, 100), 100);

        assert_eq!(manager.particles().len(), 32);
        for p in manager.particles() {
            assert!((-30.0..=1950.0).contains(&p.x), "x = {}", p.x);
            assert!((-30.0..=1110.0).contains(&p.y), "y = {}", p.y);
        }
        assert!(manager.particles().iter().any(|p| p.color == accent));
    }

    #[test]
    fn test_counts_are_fixed_between_resizes() {
        let mut clock = FrameClock::default();
        let mut manager = mount(
            BackgroundStyle::Roadmap,
            RenderOptions::default(),
            Viewport::new(1280.0, 800.0, 1.0),
            &mut clock,
        );
        for _ in 0..10 {
            run(&mut manager, &mut clock, 5);
            assert_eq!(manager.particles().len(), 32);
            assert_eq!(manager.glow_spots().len(), 4);
        }
    }

    #[test]
    fn test_resize_reseeds_for_new_bounds() {
        let mut clock = FrameClock::default();
        let mut manager = mount(
            BackgroundStyle::Neural,
            RenderOptions::default(),
            Viewport::new(1920.0, 1080.0, 1.0),
            &mut clock,
        );
        run(&mut manager, &mut clock, 10);
        let before: Vec<Point> = manager.particles().iter().map(Particle::position).collect();

        manager.resize(Viewport::new(375.0, 667.0, 3.0), &mut clock);
        assert_eq!(manager.tier(), Some(DeviceTier::Constrained));
        assert_eq!(manager.particles().len(), 12);
        assert_eq!(manager.glow_spots().len(), 3);
        for p in manager.particles() {
            assert!(p.x >= -20.0 && p.x <= 395.0);
            assert!(p.y >= -20.0 && p.y <= 687.0);
            assert!(!before.contains(&p.position()));
        }
        for s in manager.glow_spots() {
            assert!(s.x <= 375.0 + s.radius && s.y <= 667.0 + s.radius);
        }
    }

    #[test]
    fn test_backing_store_follows_capped_ratio() {
        let mut clock = FrameClock::default();
        let mut manager = mount(
            BackgroundStyle::Constellation,
            RenderOptions::default(),
            Viewport::new(1000.0, 500.0, 3.0),
            &mut clock,
        );
        let state = manager.state().copied().unwrap();
        assert_eq!((state.device_width, state.device_height), (2000, 1000));
        assert_eq!(manager.surface().unwrap().scale, 2.0);

        manager.resize(Viewport::new(400.0, 800.0, 3.0), &mut clock);
        let state = manager.state().copied().unwrap();
        assert_eq!((state.device_width, state.device_height), (500, 1000));
        assert_eq!(state.ratio, 1.25);
    }

    #[test]
    fn test_tier_configurations() {
        let mut clock = FrameClock::default();
        let wide = mount(
            BackgroundStyle::Constellation,
            RenderOptions::default(),
            Viewport::new(1440.0, 900.0, 1.0),
            &mut clock,
        );
        let config = wide.config().copied().unwrap();
        assert_eq!(config.particle_count, 110);
        assert_eq!(config.max_link_distance, 190.0);
        assert_eq!(config.link_cap, None);
        assert!(config.looping);

        let narrow = mount(
            BackgroundStyle::Constellation,
            RenderOptions::default(),
            Viewport::new(390.0, 844.0, 3.0),
            &mut clock,
        );
        let config = narrow.config().copied().unwrap();
        assert_eq!(config.particle_count, 32);
        assert_eq!(config.max_link_distance, 120.0);
        assert_eq!(config.link_cap, Some(2));
        assert!(!config.grain);
        assert!(!config.looping);

        let roadmap = mount(
            BackgroundStyle::Roadmap,
            RenderOptions::default(),
            Viewport::new(390.0, 844.0, 3.0),
            &mut clock,
        );
        let config = roadmap.config().copied().unwrap();
        assert!(config.particle_count <= 8);
        assert!(!config.grain);
    }

    #[test]
    fn test_constrained_tier_draws_once_per_resize() {
        let mut clock = FrameClock::default();
        let mut manager = mount(
            BackgroundStyle::Constellation,
            RenderOptions::default(),
            Viewport::new(375.0, 667.0, 2.0),
            &mut clock,
        );
        assert_eq!(manager.pending_frame(), None);
        assert!(!clock.has_pending());
        let clears = |m: &SurfaceManager<RecordingSurface>| {
            m.surface()
                .map(|s| s.count(|op| *op == Op::Clear))
                .unwrap_or(0)
        };
        assert_eq!(clears(&manager), 1);

        manager.resize(Viewport::new(667.0, 375.0, 2.0), &mut clock);
        assert_eq!(clears(&manager), 2);
        assert_eq!(manager.pending_frame(), None);

        // crossing the breakpoint starts the loop
        manager.resize(Viewport::new(1024.0, 768.0, 2.0), &mut clock);
        assert!(manager.pending_frame().is_some());
    }

    #[test]
    fn test_teardown_cancels_in_flight_frame() {
        let mut clock = FrameClock::default();
        let mut manager = mount(
            BackgroundStyle::Constellation,
            RenderOptions::default(),
            Viewport::new(1920.0, 1080.0, 1.0),
            &mut clock,
        );
        run(&mut manager, &mut clock, 3);
        let in_flight = manager.pending_frame().unwrap();
        let ops_before = manager.surface().unwrap().ops.len();

        manager.teardown(&mut clock);
        assert!(manager.listeners().is_empty());
        assert!(!clock.has_pending());
        assert!(!manager.run_frame(in_flight, &mut clock));

        manager.resize(Viewport::new(800.0, 600.0, 1.0), &mut clock);
        manager.pointer_move(Point::new(10.0, 10.0));
        assert_eq!(manager.surface().unwrap().ops.len(), ops_before);
        assert_eq!(manager.pending_frame(), None);
    }

    #[test]
    fn test_unavailable_surface_is_inert() {
        let mut clock = FrameClock::default();
        let options = RenderOptions::default();
        let mut manager: SurfaceManager<RecordingSurface> = SurfaceManager::mount(
            renderer_for(BackgroundStyle::Neural, options, 1),
            Err(SurfaceError::Unavailable),
            Viewport::new(1920.0, 1080.0, 1.0),
            options,
            &mut clock,
        );
        assert!(manager.is_inert());
        assert!(!clock.has_pending());
        manager.resize(Viewport::new(800.0, 600.0, 1.0), &mut clock);
        manager.pointer_move(Point::new(1.0, 1.0));
        manager.teardown(&mut clock);
        assert!(manager.particles().is_empty());
        assert!(manager.surface().is_none());
    }

    #[test]
    fn test_failed_resize_pauses_drawing() {
        let mut clock = FrameClock::default();
        let options = RenderOptions::default();
        let surface = RecordingSurface {
            refuse_resize: true,
            ..Default::default()
        };
        let mut manager = SurfaceManager::mount(
            renderer_for(BackgroundStyle::Roadmap, options, 1),
            Ok(surface),
            Viewport::new(1920.0, 1080.0, 1.0),
            options,
            &mut clock,
        );
        assert!(!manager.is_inert());
        assert!(!manager.is_drawable());
        assert_eq!(manager.pending_frame(), None);

        if let Some(m) = manager.mounted.as_mut() {
            m.surface.refuse_resize = false;
        }
        manager.resize(Viewport::new(1280.0, 720.0, 1.0), &mut clock);
        assert!(manager.is_drawable());
        assert!(manager.pending_frame().is_some());
    }

    #[test]
    fn test_pointer_events_follow_listeners() {
        let mut clock = FrameClock::default();
        let mut manager = mount(
            BackgroundStyle::Constellation,
            RenderOptions::default(),
            Viewport::new(1280.0, 720.0, 1.0),
            &mut clock,
        );
        manager.pointer_move(Point::new(300.0, 200.0));
        assert_eq!(manager.state().unwrap().pointer, Point::new(300.0, 200.0));
        manager.pointer_leave();
        assert_eq!(manager.state().unwrap().pointer, Point::OFF_SURFACE);
        // constellation ignores scroll
        manager.scroll(500.0);
        assert_eq!(manager.state().unwrap().scroll, 0.0);

        let mut roadmap = mount(
            BackgroundStyle::Roadmap,
            RenderOptions::default(),
            Viewport::new(1280.0, 720.0, 1.0),
            &mut clock,
        );
        roadmap.scroll(500.0);
        assert_eq!(roadmap.state().unwrap().scroll, 500.0);
    }

    #[test]
    fn test_empty_viewport_does_not_draw() {
        let mut clock = FrameClock::default();
        let manager = mount(
            BackgroundStyle::Neural,
            RenderOptions::default(),
            Viewport::new(0.0, 0.0, 1.0),
            &mut clock,
        );
        assert!(!manager.is_drawable());
        assert!(manager.surface().unwrap().ops.is_empty());
    }
}
