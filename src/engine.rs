//! The canvas engine: the timed game loop, the two-surface renderer, the
//! tri-state image asset, and the input event queue.
//!
//! Wasm is a single threaded environment, so shared state is Rc/RefCell
//! rather than Mutex. The loop itself is a plain `tick(now_ms)` method so
//! tests can single-step it with a synthetic clock; only `start()` touches
//! the browser's animation-frame scheduling.

use crate::browser;
use crate::geometry::{Bounds, Shape};
use crate::scene::{
    Color, DisplayList, Gradient, GradientKind, Layer, PanelId, ScreenObject, UpdateList,
};
use anyhow::{anyhow, Error, Result};
use async_trait::async_trait;
use futures::channel::oneshot::channel;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlImageElement};

// ==================== Input ====================

/// Events delivered by the host between ticks. Handlers only queue; the
/// game drains the queue at the start of its panel tick.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key press, identified by its `KeyboardEvent.code`.
    Key(String),
    /// A click or first touch, already translated to game-local
    /// coordinates.
    Pointer { x: f64, y: f64 },
    /// The window changed size; the world needs a rebuild.
    Resize,
}

pub type InputQueue = Rc<RefCell<VecDeque<InputEvent>>>;

pub fn new_input_queue() -> InputQueue {
    Rc::new(RefCell::new(VecDeque::new()))
}

// ==================== Image assets ====================

/// Explicit readiness of an asynchronously loading image. The renderer
/// draws a placeholder for anything that is not `Ready` instead of
/// trusting load order.
pub enum ImageAsset {
    NotLoaded,
    Loading,
    Ready(HtmlImageElement),
}

impl ImageAsset {
    pub fn image(&self) -> Option<&HtmlImageElement> {
        match self {
            ImageAsset::Ready(image) => Some(image),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ImageAsset::Ready(_))
    }
}

pub type ImageSlot = Rc<RefCell<ImageAsset>>;

pub fn new_image_slot() -> ImageSlot {
    Rc::new(RefCell::new(ImageAsset::NotLoaded))
}

/// Asynchronously load an image from a given source path.
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::new_image()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();

    let success_callback = browser::closure_once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let error_callback = browser::closure_once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!("error loading image: {:#?}", err)));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callbacks alive until the image loads or errors
    success_callback.forget();
    error_callback.forget();

    rx.await??;

    Ok(image)
}

/// Loads `source` into `slot`, walking it through `Loading` to `Ready`.
/// On failure the slot falls back to `NotLoaded` and the error propagates.
pub async fn load_into(slot: &ImageSlot, source: &str) -> Result<()> {
    *slot.borrow_mut() = ImageAsset::Loading;
    match load_image(source).await {
        Ok(image) => {
            *slot.borrow_mut() = ImageAsset::Ready(image);
            Ok(())
        }
        Err(err) => {
            *slot.borrow_mut() = ImageAsset::NotLoaded;
            Err(err)
        }
    }
}

// ==================== Renderer ====================

/// Which of the two stacked drawing surfaces to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Redrawn only on structural change (resize, world rebuild).
    Background,
    /// Cleared and fully redrawn every qualifying tick.
    Foreground,
}

/// Draws display-list objects into two stacked 2d contexts. Rendering
/// failures are reported through the console sink and never panic.
pub struct Renderer {
    background: CanvasRenderingContext2d,
    foreground: CanvasRenderingContext2d,
    width: Cell<f64>,
    height: Cell<f64>,
}

impl Renderer {
    pub fn new(
        background: CanvasRenderingContext2d,
        foreground: CanvasRenderingContext2d,
        width: f64,
        height: f64,
    ) -> Self {
        Renderer {
            background,
            foreground,
            width: Cell::new(width),
            height: Cell::new(height),
        }
    }

    pub fn width(&self) -> f64 {
        self.width.get()
    }

    pub fn height(&self) -> f64 {
        self.height.get()
    }

    pub fn set_size(&self, width: f64, height: f64) {
        self.width.set(width);
        self.height.set(height);
    }

    fn ctx(&self, surface: Surface) -> &CanvasRenderingContext2d {
        match surface {
            Surface::Background => &self.background,
            Surface::Foreground => &self.foreground,
        }
    }

    pub fn clear(&self, surface: Surface) {
        self.ctx(surface)
            .clear_rect(0.0, 0.0, self.width.get(), self.height.get());
    }

    /// Paints the given layers in enumeration order, objects in insertion
    /// order within each layer, and clears each object's dirty flag.
    pub fn paint(&self, list: &DisplayList, layers: &[Layer], surface: Surface) {
        let ctx = self.ctx(surface);
        for layer in layers {
            for obj in list.objects(*layer) {
                let mut inner = obj.borrow_mut();
                self.draw_object(ctx, &inner);
                inner.set_dirty(false);
            }
        }
    }

    fn draw_object(&self, ctx: &CanvasRenderingContext2d, obj: &ScreenObject) {
        ctx.save();
        ctx.set_global_alpha(obj.style.opacity.clamp(0.0, 1.0));

        match &obj.shape {
            Shape::Rect(bounds) => {
                if !self.draw_image_content(ctx, obj, bounds) {
                    self.trace_rounded_rect(ctx, bounds, obj.style.border_radius);
                    self.fill_and_stroke(ctx, bounds, obj);
                }
            }
            Shape::Circle { bounds, radius } => {
                ctx.begin_path();
                let center = bounds.center();
                if ctx
                    .arc(center.x, center.y, *radius, 0.0, std::f64::consts::TAU)
                    .is_err()
                {
                    ctx.restore();
                    return;
                }
                ctx.close_path();
                self.fill_and_stroke(ctx, bounds, obj);
            }
            Shape::Polygon { points, enclosing } => {
                if let Some((first, rest)) = points.split_first() {
                    ctx.begin_path();
                    ctx.move_to(first.x, first.y);
                    for pt in rest {
                        ctx.line_to(pt.x, pt.y);
                    }
                    ctx.close_path();
                    self.fill_and_stroke(ctx, enclosing, obj);
                }
            }
            Shape::Line(line) => {
                if let Some(color) = &obj.style.border_color {
                    ctx.begin_path();
                    ctx.set_line_width(obj.style.border_width.max(1.0));
                    ctx.set_stroke_style_str(color.as_str());
                    ctx.move_to(line.start.x, line.start.y);
                    ctx.line_to(line.end.x, line.end.y);
                    ctx.stroke();
                }
            }
            // points and padding carry no pixels of their own
            Shape::Point(_) | Shape::Padding(_) => {}
        }

        if let Some(label) = &obj.label {
            if let Ok(bounds) = obj.shape.bounds() {
                ctx.set_font(&label.font);
                ctx.set_fill_style_str(label.color.as_str());
                if let Err(err) = ctx.fill_text(&label.text, bounds.left(), bounds.bottom()) {
                    browser::report_error("renderer", format!("fill_text failed: {err:?}"));
                }
            }
        }

        ctx.restore();
    }

    /// Draws the object's image or sprite frame when the asset is ready.
    /// Returns false when there was nothing ready to draw, so the caller
    /// falls back to the flat shape.
    fn draw_image_content(
        &self,
        ctx: &CanvasRenderingContext2d,
        obj: &ScreenObject,
        bounds: &Bounds,
    ) -> bool {
        let Some(slot) = &obj.image else {
            return false;
        };
        let asset = slot.borrow();
        let Some(image) = asset.image() else {
            return false;
        };
        let source = match &obj.sprite {
            Some(strip) => strip.frame_bounds(),
            None => Bounds::unchecked(
                0.0,
                0.0,
                f64::from(image.natural_width()),
                f64::from(image.natural_height()),
            ),
        };
        self.blit(ctx, image, &source, bounds);
        true
    }

    fn blit(
        &self,
        ctx: &CanvasRenderingContext2d,
        image: &HtmlImageElement,
        source: &Bounds,
        destination: &Bounds,
    ) {
        if let Err(err) = ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image,
                source.left(),
                source.top(),
                source.width(),
                source.height(),
                destination.left(),
                destination.top(),
                destination.width(),
                destination.height(),
            )
        {
            browser::report_error("renderer", format!("draw_image failed: {err:?}"));
        }
    }

    /// Copies one sprite-sheet frame to a destination box under a global
    /// opacity, outside the display-list walk.
    pub fn draw_sprite_frame(
        &self,
        surface: Surface,
        image: &HtmlImageElement,
        source: &Bounds,
        destination: &Bounds,
        opacity: f64,
    ) {
        let ctx = self.ctx(surface);
        ctx.save();
        ctx.set_global_alpha(opacity.clamp(0.0, 1.0));
        self.blit(ctx, image, source, destination);
        ctx.restore();
    }

    /// Quadratic-curve rounded rectangle path; a zero radius degenerates
    /// to straight corners.
    fn trace_rounded_rect(&self, ctx: &CanvasRenderingContext2d, b: &Bounds, radius: f64) {
        let r = radius.min(b.width() / 2.0).min(b.height() / 2.0).max(0.0);
        ctx.begin_path();
        ctx.move_to(b.left() + r, b.top());
        ctx.line_to(b.right() - r, b.top());
        ctx.quadratic_curve_to(b.right(), b.top(), b.right(), b.top() + r);
        ctx.line_to(b.right(), b.bottom() - r);
        ctx.quadratic_curve_to(b.right(), b.bottom(), b.right() - r, b.bottom());
        ctx.line_to(b.left() + r, b.bottom());
        ctx.quadratic_curve_to(b.left(), b.bottom(), b.left(), b.bottom() - r);
        ctx.line_to(b.left(), b.top() + r);
        ctx.quadratic_curve_to(b.left(), b.top(), b.left() + r, b.top());
        ctx.close_path();
    }

    fn fill_and_stroke(&self, ctx: &CanvasRenderingContext2d, bounds: &Bounds, obj: &ScreenObject) {
        if let Some(gradient) = &obj.style.gradient {
            match self.make_gradient(ctx, bounds, gradient) {
                Ok(canvas_gradient) => {
                    ctx.set_fill_style_canvas_gradient(&canvas_gradient);
                    ctx.fill();
                }
                Err(err) => {
                    browser::report_error("renderer", format!("gradient failed: {err:?}"))
                }
            }
        } else if let Some(color) = &obj.style.fill_color {
            ctx.set_fill_style_str(color.as_str());
            ctx.fill();
        }
        if obj.style.border_width > 0.0 {
            if let Some(color) = &obj.style.border_color {
                ctx.set_line_width(obj.style.border_width);
                ctx.set_stroke_style_str(color.as_str());
                ctx.stroke();
            }
        }
    }

    fn make_gradient(
        &self,
        ctx: &CanvasRenderingContext2d,
        bounds: &Bounds,
        gradient: &Gradient,
    ) -> std::result::Result<CanvasGradient, JsValue> {
        let canvas_gradient = match gradient.kind {
            GradientKind::LinearVertical => ctx.create_linear_gradient(
                bounds.left(),
                bounds.top(),
                bounds.left(),
                bounds.bottom(),
            ),
            GradientKind::LinearHorizontal => ctx.create_linear_gradient(
                bounds.left(),
                bounds.top(),
                bounds.right(),
                bounds.top(),
            ),
            GradientKind::Radial => {
                let center = bounds.center();
                let radius = (bounds.width().min(bounds.height())) / 2.0;
                ctx.create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, radius)?
            }
        };
        for (offset, color) in &gradient.stops {
            canvas_gradient.add_color_stop(*offset as f32, color.as_str())?;
        }
        Ok(canvas_gradient)
    }
}

/// Convenience for validated gradient construction from string stops.
pub fn gradient(kind: GradientKind, stops: &[(f64, &str)]) -> Result<Gradient> {
    let mut parsed = Vec::with_capacity(stops.len());
    for (offset, color) in stops {
        parsed.push((*offset, Color::parse(color).map_err(|e| anyhow!("{e}"))?));
    }
    Gradient::new(kind, parsed).map_err(|e| anyhow!("{e}"))
}

// ==================== Game loop ====================

/// A named timing bucket. `erase` runs only on ticks where the panel's
/// threshold was crossed, right before its update list is walked; `draw`
/// runs unconditionally every tick and therefore must stay cheap when
/// nothing changed.
pub trait Panel {
    fn erase(&mut self);
    fn draw(&mut self);
}

/// The top-level seam between the loop and a concrete game. `initialize`
/// performs the asynchronous asset/world setup exactly once and hands back
/// the playable game.
#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    fn updates(&self) -> Rc<RefCell<UpdateList>>;
    fn panels(&self) -> Vec<(PanelId, f64, Rc<RefCell<dyn Panel>>)>;
}

/// Smoothing weight for the frames-per-second and update-interval
/// exponential moving averages.
const EMA_WEIGHT: f64 = 0.9;

struct PanelEntry {
    id: PanelId,
    tick_ms: f64,
    accumulated: f64,
    panel: Rc<RefCell<dyn Panel>>,
}

/// Walks per-panel update lists on a tick clock and redraws. One
/// continuous reschedule chain; stopping means not rescheduling.
pub struct GameLoop {
    then: f64,
    fps: f64,
    update_interval: f64,
    last_dirty: usize,
    panels: Vec<PanelEntry>,
    updates: Rc<RefCell<UpdateList>>,
    running: Rc<Cell<bool>>,
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

/// Cancels the reschedule chain from outside the loop.
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn stop(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

impl GameLoop {
    pub fn new(now: f64, updates: Rc<RefCell<UpdateList>>) -> Self {
        GameLoop {
            then: now,
            fps: 0.0,
            update_interval: 0.0,
            last_dirty: 0,
            panels: Vec::new(),
            updates,
            running: Rc::new(Cell::new(false)),
        }
    }

    pub fn add_panel(&mut self, id: PanelId, tick_ms: f64, panel: Rc<RefCell<dyn Panel>>) {
        self.panels.push(PanelEntry {
            id,
            tick_ms,
            accumulated: 0.0,
            panel,
        });
    }

    /// One loop iteration against the given clock reading. Panels are
    /// processed in registration order; within a panel the update list is
    /// walked over a defensive snapshot, then `draw` runs unconditionally.
    pub fn tick(&mut self, now: f64) {
        let elapsed = now - self.then;
        if elapsed > 0.0 {
            self.fps = EMA_WEIGHT * self.fps + (1.0 - EMA_WEIGHT) * (1000.0 / elapsed);
            self.update_interval =
                EMA_WEIGHT * self.update_interval + (1.0 - EMA_WEIGHT) * elapsed;
        }

        let mut dirty = 0;
        for entry in &mut self.panels {
            entry.accumulated += elapsed;
            if entry.accumulated > entry.tick_ms {
                // Updaters get the whole span since this panel last
                // ticked, not just the last frame's slice of it.
                let span = entry.accumulated;
                entry.panel.borrow_mut().erase();
                let snapshot = self.updates.borrow().snapshot(entry.id);
                for obj in snapshot {
                    if obj.borrow_mut().update(span) {
                        dirty += 1;
                    }
                }
                entry.accumulated = 0.0;
            }
            entry.panel.borrow_mut().draw();
        }
        self.last_dirty = dirty;
        self.then = now;
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn update_interval(&self) -> f64 {
        self.update_interval
    }

    pub fn last_dirty(&self) -> usize {
        self.last_dirty
    }

    #[cfg(test)]
    fn accumulated(&self, id: PanelId) -> f64 {
        self.panels
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.accumulated)
            .unwrap_or(0.0)
    }

    /// Hands the loop to the browser's animation-frame scheduler. The
    /// returned handle stops the chain; there is no pause or resume.
    pub fn start(self) -> Result<LoopHandle> {
        self.running.set(true);
        let handle = LoopHandle {
            running: self.running.clone(),
        };

        let state = Rc::new(RefCell::new(self));
        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            let mut game_loop = state.borrow_mut();
            if !game_loop.running.get() {
                return;
            }
            game_loop.tick(perf);
            if let Some(closure) = f.borrow().as_ref() {
                if browser::request_animation_frame(closure).is_err() {
                    game_loop.running.set(false);
                }
            }
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("game loop closure is missing"))?,
        )?;

        Ok(handle)
    }
}

/// Initializes `game` and hands its panels to a fresh loop on the
/// animation-frame chain.
pub async fn start(game: impl Game + 'static) -> Result<LoopHandle> {
    let game = game.initialize().await?;
    let mut game_loop = GameLoop::new(browser::now()?, game.updates());
    for (id, tick_ms, panel) in game.panels() {
        game_loop.add_panel(id, tick_ms, panel);
    }
    game_loop.start()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ObjectId, TimeUpdate};
    use approx::assert_abs_diff_eq;

    struct CountingPanel {
        erased: usize,
        drawn: usize,
    }

    impl CountingPanel {
        fn new() -> Rc<RefCell<CountingPanel>> {
            Rc::new(RefCell::new(CountingPanel {
                erased: 0,
                drawn: 0,
            }))
        }
    }

    impl Panel for CountingPanel {
        fn erase(&mut self) {
            self.erased += 1;
        }

        fn draw(&mut self) {
            self.drawn += 1;
        }
    }

    struct CountingUpdate {
        id: ObjectId,
        calls: usize,
        dirty: bool,
    }

    impl CountingUpdate {
        fn new(dirty: bool) -> Rc<RefCell<CountingUpdate>> {
            let id = ScreenObject::rect(0.0, 0.0, 1.0, 1.0)
                .unwrap()
                .borrow()
                .id();
            Rc::new(RefCell::new(CountingUpdate {
                id,
                calls: 0,
                dirty,
            }))
        }
    }

    impl TimeUpdate for CountingUpdate {
        fn id(&self) -> ObjectId {
            self.id
        }

        fn update(&mut self, _elapsed_ms: f64) -> bool {
            self.calls += 1;
            self.dirty
        }
    }

    #[test]
    fn crossing_the_threshold_updates_once_and_resets_the_accumulator() {
        let updates = Rc::new(RefCell::new(UpdateList::new()));
        let counter = CountingUpdate::new(true);
        updates
            .borrow_mut()
            .add(counter.clone(), PanelId::Foreground)
            .unwrap();

        let panel = CountingPanel::new();
        let mut game_loop = GameLoop::new(0.0, updates);
        game_loop.add_panel(PanelId::Foreground, 16.0, panel.clone());

        game_loop.tick(20.0);

        assert_eq!(counter.borrow().calls, 1);
        assert_eq!(panel.borrow().erased, 1);
        assert_abs_diff_eq!(game_loop.accumulated(PanelId::Foreground), 0.0);
        assert_eq!(game_loop.last_dirty(), 1);
    }

    #[test]
    fn draw_runs_every_tick_even_below_the_threshold() {
        let updates = Rc::new(RefCell::new(UpdateList::new()));
        let counter = CountingUpdate::new(false);
        updates
            .borrow_mut()
            .add(counter.clone(), PanelId::Foreground)
            .unwrap();

        let panel = CountingPanel::new();
        let mut game_loop = GameLoop::new(0.0, updates);
        game_loop.add_panel(PanelId::Foreground, 100.0, panel.clone());

        game_loop.tick(10.0);
        game_loop.tick(20.0);

        assert_eq!(panel.borrow().drawn, 2);
        assert_eq!(panel.borrow().erased, 0);
        assert_eq!(counter.borrow().calls, 0);
        // accumulator carries across ticks until the threshold trips
        assert_abs_diff_eq!(game_loop.accumulated(PanelId::Foreground), 20.0);

        game_loop.tick(120.0);
        assert_eq!(panel.borrow().erased, 1);
        assert_eq!(counter.borrow().calls, 1);
    }

    struct ElapsedSum {
        id: ObjectId,
        total: f64,
        last: f64,
    }

    impl ElapsedSum {
        fn new() -> Rc<RefCell<ElapsedSum>> {
            let id = ScreenObject::rect(0.0, 0.0, 1.0, 1.0)
                .unwrap()
                .borrow()
                .id();
            Rc::new(RefCell::new(ElapsedSum {
                id,
                total: 0.0,
                last: 0.0,
            }))
        }
    }

    impl TimeUpdate for ElapsedSum {
        fn id(&self) -> ObjectId {
            self.id
        }

        fn update(&mut self, elapsed_ms: f64) -> bool {
            self.total += elapsed_ms;
            self.last = elapsed_ms;
            false
        }
    }

    #[test]
    fn updaters_see_the_full_span_since_the_panel_last_ticked() {
        let updates = Rc::new(RefCell::new(UpdateList::new()));
        let sum = ElapsedSum::new();
        updates
            .borrow_mut()
            .add(sum.clone(), PanelId::Foreground)
            .unwrap();

        let panel = CountingPanel::new();
        let mut game_loop = GameLoop::new(0.0, updates);
        game_loop.add_panel(PanelId::Foreground, 16.0, panel);

        // two sub-threshold frames, then the trip: the updater hears
        // about all 20ms, not just the last 10ms frame
        game_loop.tick(10.0);
        game_loop.tick(20.0);
        assert_abs_diff_eq!(sum.borrow().last, 20.0);

        // 8ms frames against a 16ms panel for 960ms of wall time; the
        // spans handed out must add back up to the wall time
        let mut game_loop = GameLoop::new(0.0, {
            let updates = Rc::new(RefCell::new(UpdateList::new()));
            updates
                .borrow_mut()
                .add(sum.clone(), PanelId::Foreground)
                .unwrap();
            updates
        });
        game_loop.add_panel(PanelId::Foreground, 16.0, CountingPanel::new());
        sum.borrow_mut().total = 0.0;
        for frame in 1..=120 {
            game_loop.tick(f64::from(frame) * 8.0);
        }
        assert_abs_diff_eq!(sum.borrow().total, 960.0);
    }

    #[test]
    fn panels_tick_independently() {
        let updates = Rc::new(RefCell::new(UpdateList::new()));
        let slow = CountingPanel::new();
        let fast = CountingPanel::new();
        let mut game_loop = GameLoop::new(0.0, updates);
        game_loop.add_panel(PanelId::Background, 500.0, slow.clone());
        game_loop.add_panel(PanelId::Foreground, 16.0, fast.clone());

        for frame in 1..=10 {
            game_loop.tick(f64::from(frame) * 20.0);
        }

        assert_eq!(fast.borrow().erased, 10);
        assert_eq!(slow.borrow().erased, 0);
        assert_eq!(slow.borrow().drawn, 10);
    }

    #[test]
    fn fps_estimate_smooths_toward_the_frame_rate() {
        let updates = Rc::new(RefCell::new(UpdateList::new()));
        let mut game_loop = GameLoop::new(0.0, updates);
        // steady 20ms frames settle at 50 fps
        for frame in 1..=200 {
            game_loop.tick(f64::from(frame) * 20.0);
        }
        assert_abs_diff_eq!(game_loop.fps(), 50.0, epsilon = 0.5);
        assert_abs_diff_eq!(game_loop.update_interval(), 20.0, epsilon = 0.5);
    }

    #[test]
    fn unscheduling_takes_effect_on_the_next_tick() {
        let updates = Rc::new(RefCell::new(UpdateList::new()));
        let counter = CountingUpdate::new(false);
        let id = counter.borrow().id;
        updates
            .borrow_mut()
            .add(counter.clone(), PanelId::Foreground)
            .unwrap();

        let panel = CountingPanel::new();
        let mut game_loop = GameLoop::new(0.0, updates.clone());
        game_loop.add_panel(PanelId::Foreground, 16.0, panel);

        game_loop.tick(20.0);
        updates.borrow_mut().remove(id);
        game_loop.tick(40.0);

        assert_eq!(counter.borrow().calls, 1);
    }

    #[test]
    fn stop_handle_flips_the_running_flag() {
        let updates = Rc::new(RefCell::new(UpdateList::new()));
        let game_loop = GameLoop::new(0.0, updates);
        game_loop.running.set(true);
        let handle = LoopHandle {
            running: game_loop.running.clone(),
        };
        assert!(handle.is_running());
        handle.stop();
        assert!(!handle.is_running());
    }
}
