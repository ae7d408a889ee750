//! The Elefart game proper: the building the whole thing happens in,
//! elevators, people, gas clouds, and the two panels that drive the loop.
//!
//! The building is pure pixel math over the canvas size (no DOM), so the
//! world, the elevators, and the people are all testable natively. Only
//! the panels and `run()` touch the browser.

use crate::browser;
use crate::engine::{
    self, Game, ImageSlot, InputEvent, InputQueue, Panel, Renderer, Surface,
};
use crate::geometry::{Bounds, Padding, Point, ShapeError};
use crate::scene::{
    self, DisplayList, GradientKind, Layer, ObjectId, PanelId, SceneError, ScreenObject,
    ScreenObjectRef, SpriteStrip, TimeUpdate, UpdateList,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::HtmlCanvasElement;

pub const FLOOR_COUNT: u32 = 6;
pub const SHAFT_COUNT: u32 = 4;

/// The background repaints at most twice a second; the foreground aims
/// for every animation frame.
pub const BACKGROUND_TICK_MS: f64 = 500.0;
pub const FOREGROUND_TICK_MS: f64 = 16.0;

const ROOF_FRACTION: f64 = 0.18;
const WALL_FRACTION: f64 = 0.04;
const WALL_THICKNESS: f64 = 12.0;
const BAND_HEIGHT: f64 = 6.0;
const TERMINUS_HEIGHT: f64 = 10.0;
const SHAFT_GAP: f64 = 6.0;
const CAR_MARGIN: f64 = 8.0;
const DOOR_DIM: f64 = 0.35;
const PERSON_HEIGHT_FRACTION: f64 = 0.72;
const PERSON_BASELINE: f64 = 8.0;

/// Ticks an elevator spends travelling between dispatch and arrival,
/// regardless of how many floors the trip covers.
pub const ELEVATOR_TRIP_TICKS: u32 = 40;

const WALK_SPEED: f64 = 0.12; // px per ms
const PERSON_FRAME_MS: f64 = 140.0;
const REMOTE_OPACITY: f64 = 0.55;

const GAS_TTL_MS: f64 = 900.0;
const GAS_RADIUS: f64 = 14.0;
const GAS_RISE: f64 = 0.02; // px per ms, upward
const GAS_START_OPACITY: f64 = 0.85;

const WALLPAPER_PATH: &str = "assets/wallpaper.png";
const SIGN_PATH: &str = "assets/sign.png";
const SPRITES_PATH: &str = "assets/sprites.png";
const SHEET_PATH: &str = "assets/sprites.json";

const RESIDENT_ROW: &str = "resident";
const VISITOR_ROW: &str = "visitor";

const SKY_TOP: &str = "#6db3f2";
const SKY_BOTTOM: &str = "#e8f7ff";
const SUN_CORE: &str = "#fff6c8";
const SUN_RIM: &str = "#ffcf48";
const WALL_FILL: &str = "#c9b79a";
const WALL_EDGE: &str = "#6e5b3f";
const SIGN_FILL: &str = "#27364b";
const SIGN_FONT: &str = "bold 18px sans-serif";
const SIGN_TEXT: &str = "#f3e9d2";
const SHAFT_FILL: &str = "#4a4f5c";
const TERMINUS_FILL: &str = "#2e323c";
const BAND_FILL: &str = "#8a6d4f";
const BAND_FONT: &str = "11px sans-serif";
const BAND_TEXT: &str = "#f3e9d2";
const DOOR_FILL: &str = "#14161c";
const CAR_FILL: &str = "#b8c4d9";
const CAR_EDGE: &str = "#3c465a";
const GAS_FILL: &str = "rgba(138, 195, 94, 0.9)";

const CANVAS_UNSUPPORTED: &str = "This game needs a browser with HTML5 canvas support.";

// ==================== Ordinals ====================

/// English ordinal suffix. 11 through 13 take "th" despite ending in
/// 1, 2 and 3.
pub fn ordinal_suffix(n: u32) -> &'static str {
    match n % 100 {
        11..=13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

pub fn ordinal(n: u32) -> String {
    format!("{n}{}", ordinal_suffix(n))
}

// ==================== Sprite sheet spec ====================

/// Layout of the shared sprite sheet, fetched as JSON next to the image.
/// Each row is one character's walk cycle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpriteSheetSpec {
    pub frame_width: f64,
    pub frame_height: f64,
    pub rows: Vec<SpriteRowSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpriteRowSpec {
    pub name: String,
    pub frames: u32,
}

impl Default for SpriteSheetSpec {
    fn default() -> Self {
        SpriteSheetSpec {
            frame_width: 48.0,
            frame_height: 64.0,
            rows: vec![
                SpriteRowSpec {
                    name: RESIDENT_ROW.to_string(),
                    frames: 4,
                },
                SpriteRowSpec {
                    name: VISITOR_ROW.to_string(),
                    frames: 4,
                },
            ],
        }
    }
}

impl SpriteSheetSpec {
    /// A fetched spec with degenerate frame sizes or no rows would poison
    /// every sprite; fall back to the built-in layout instead.
    fn sanitized(self) -> SpriteSheetSpec {
        if self.frame_width > 0.0 && self.frame_height > 0.0 && !self.rows.is_empty() {
            self
        } else {
            SpriteSheetSpec::default()
        }
    }
}

fn row_index(sheet: &SpriteSheetSpec, name: &str) -> u32 {
    sheet
        .rows
        .iter()
        .position(|row| row.name == name)
        .unwrap_or(0) as u32
}

fn random_below(n: u32) -> u32 {
    if n <= 1 {
        return 0;
    }
    let mut buf = [0u8; 4];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u32::from_le_bytes(buf) % n,
        Err(_) => 0,
    }
}

// ==================== Assets ====================

/// Everything loaded up front. Images are slots so the renderer can fall
/// back to flat fills while they are still in flight; the sheet spec
/// falls back to the built-in layout.
#[derive(Clone)]
pub struct Assets {
    pub wallpaper: ImageSlot,
    pub sign: ImageSlot,
    pub sprites: ImageSlot,
    pub sheet: SpriteSheetSpec,
}

impl Assets {
    pub fn empty() -> Assets {
        Assets {
            wallpaper: engine::new_image_slot(),
            sign: engine::new_image_slot(),
            sprites: engine::new_image_slot(),
            sheet: SpriteSheetSpec::default(),
        }
    }

    /// Fetches everything concurrently. A missing image degrades the art,
    /// not the game, so failures are reported and swallowed here.
    pub async fn load() -> Assets {
        let assets = Assets::empty();
        let (wallpaper, sign, sprites, sheet) = futures::join!(
            engine::load_into(&assets.wallpaper, WALLPAPER_PATH),
            engine::load_into(&assets.sign, SIGN_PATH),
            engine::load_into(&assets.sprites, SPRITES_PATH),
            browser::fetch_json::<SpriteSheetSpec>(SHEET_PATH),
        );

        for (name, result) in [("wallpaper", wallpaper), ("sign", sign), ("sprites", sprites)] {
            if let Err(err) = result {
                browser::report_error("assets", format!("{name} unavailable: {err:#}"));
            }
        }
        let sheet = match sheet {
            Ok(sheet) => sheet.sanitized(),
            Err(err) => {
                browser::report_error("assets", format!("sheet spec unavailable: {err:#}"));
                SpriteSheetSpec::default()
            }
        };

        Assets { sheet, ..assets }
    }
}

// ==================== Building geometry ====================

/// Pixel layout of the building: the shell between roof line and ground,
/// and the interior grid of `floors x shafts` cells. Floors count from
/// the bottom; floor 0 is the ground floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingGeometry {
    bounds: Bounds,
    shell: Bounds,
    interior: Bounds,
    floors: u32,
    shafts: u32,
}

impl BuildingGeometry {
    pub fn new(width: f64, height: f64, floors: u32, shafts: u32) -> Result<Self, ShapeError> {
        let bounds = Bounds::new(0.0, 0.0, width, height)?;
        let roof = height * ROOF_FRACTION;
        let margin = (width * WALL_FRACTION).max(10.0);
        let shell = Bounds::new(margin, roof, width - 2.0 * margin, height - roof)?;
        let walls = Padding::new(
            TERMINUS_HEIGHT + 8.0,
            WALL_THICKNESS,
            WALL_THICKNESS,
            WALL_THICKNESS,
            &shell,
        )?;
        let interior = shell.inset(&walls);
        Ok(BuildingGeometry {
            bounds,
            shell,
            interior,
            floors: floors.max(1),
            shafts: shafts.max(1),
        })
    }

    pub fn floors(&self) -> u32 {
        self.floors
    }

    pub fn shafts(&self) -> u32 {
        self.shafts
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn shell(&self) -> Bounds {
        self.shell
    }

    pub fn interior(&self) -> Bounds {
        self.interior
    }

    pub fn floor_height(&self) -> f64 {
        self.interior.height() / f64::from(self.floors)
    }

    pub fn shaft_width(&self) -> f64 {
        self.interior.width() / f64::from(self.shafts)
    }

    /// Top edge of a floor, counted from the bottom of the interior.
    pub fn floor_top(&self, floor: u32) -> f64 {
        self.interior.bottom() - f64::from(floor + 1) * self.floor_height()
    }

    pub fn shaft_left(&self, shaft: u32) -> f64 {
        self.interior.left() + f64::from(shaft) * self.shaft_width()
    }

    pub fn shaft_column(&self, shaft: u32) -> Bounds {
        Bounds::unchecked(
            self.shaft_left(shaft) + SHAFT_GAP,
            self.interior.top(),
            self.shaft_width() - 2.0 * SHAFT_GAP,
            self.interior.height(),
        )
    }

    /// The cap above a shaft where the cables anchor.
    pub fn terminus(&self, shaft: u32) -> Bounds {
        Bounds::unchecked(
            self.shaft_left(shaft) + SHAFT_GAP,
            self.interior.top() - TERMINUS_HEIGHT,
            self.shaft_width() - 2.0 * SHAFT_GAP,
            TERMINUS_HEIGHT,
        )
    }

    /// The divider band at the bottom edge of a floor.
    pub fn floor_band(&self, floor: u32) -> Bounds {
        Bounds::unchecked(
            self.interior.left(),
            self.floor_top(floor) + self.floor_height() - BAND_HEIGHT,
            self.interior.width(),
            BAND_HEIGHT,
        )
    }

    /// Where an elevator car rests inside a cell. Doors overlay the same
    /// box.
    pub fn car_box(&self, shaft: u32, floor: u32) -> Bounds {
        Bounds::unchecked(
            self.shaft_left(shaft) + SHAFT_GAP + CAR_MARGIN,
            self.floor_top(floor) + CAR_MARGIN,
            self.shaft_width() - 2.0 * (SHAFT_GAP + CAR_MARGIN),
            self.floor_height() - 2.0 * CAR_MARGIN,
        )
    }

    /// Where a person of the given size stands: centered on the shaft,
    /// feet just above the floor band.
    pub fn person_box(&self, shaft: u32, floor: u32, width: f64, height: f64) -> Bounds {
        let center = self.shaft_left(shaft) + self.shaft_width() / 2.0;
        Bounds::unchecked(
            center - width / 2.0,
            self.floor_top(floor) + self.floor_height() - height - PERSON_BASELINE,
            width,
            height,
        )
    }

    pub fn sign_box(&self) -> Bounds {
        let width = self.interior.width() * 0.4;
        let height = self.shell.top() * 0.35;
        Bounds::unchecked(
            self.bounds.center().x - width / 2.0,
            self.shell.top() - height - 6.0,
            width,
            height,
        )
    }

    /// Maps a game-local pixel to `(shaft, floor)`, or `None` outside the
    /// interior grid.
    pub fn pick(&self, x: f64, y: f64) -> Option<(u32, u32)> {
        let pt = Point::new(x, y).ok()?;
        if !self.interior.contains_point(&pt) {
            return None;
        }
        let shaft = ((x - self.interior.left()) / self.shaft_width()) as u32;
        let floor = ((self.interior.bottom() - y) / self.floor_height()) as u32;
        Some((shaft.min(self.shafts - 1), floor.min(self.floors - 1)))
    }
}

// ==================== Elevator ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElevatorState {
    Idle,
    Moving { to: u32, increment: u32 },
}

/// One car per shaft. A trip interpolates the car's top edge between its
/// resting boxes over a fixed number of ticks, so every trip takes the
/// same wall-clock time regardless of distance.
pub struct Elevator {
    geometry: BuildingGeometry,
    shaft: u32,
    floor: u32,
    state: ElevatorState,
    body: ScreenObjectRef,
}

impl Elevator {
    pub fn new(
        geometry: BuildingGeometry,
        shaft: u32,
        floor: u32,
    ) -> Result<Rc<RefCell<Elevator>>, SceneError> {
        let car = geometry.car_box(shaft, floor);
        let body = ScreenObject::rect(car.left(), car.top(), car.width(), car.height())?;
        {
            let mut inner = body.borrow_mut();
            inner.set_fill(CAR_FILL)?;
            inner.set_stroke(2.0, CAR_EDGE)?;
            inner.set_border_radius(5.0)?;
        }
        Ok(Rc::new(RefCell::new(Elevator {
            geometry,
            shaft,
            floor,
            state: ElevatorState::Idle,
            body,
        })))
    }

    pub fn body(&self) -> ScreenObjectRef {
        Rc::clone(&self.body)
    }

    pub fn shaft(&self) -> u32 {
        self.shaft
    }

    /// The floor the car last rested at; unchanged until arrival.
    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn is_idle(&self) -> bool {
        self.state == ElevatorState::Idle
    }

    /// Starts a trip. Refused while moving, for an out-of-range floor,
    /// and for the floor the car is already on.
    pub fn dispatch(&mut self, to: u32) -> bool {
        if to >= self.geometry.floors() || to == self.floor {
            return false;
        }
        match self.state {
            ElevatorState::Idle => {
                self.state = ElevatorState::Moving { to, increment: 0 };
                true
            }
            ElevatorState::Moving { .. } => false,
        }
    }

    fn car_top(&self) -> f64 {
        let resting = self.geometry.car_box(self.shaft, self.floor).top();
        match self.state {
            ElevatorState::Idle => resting,
            ElevatorState::Moving { to, increment } => {
                let target = self.geometry.car_box(self.shaft, to).top();
                let t = f64::from(increment) / f64::from(ELEVATOR_TRIP_TICKS);
                resting + (target - resting) * t
            }
        }
    }

    fn reposition(&self) {
        let top = self.car_top();
        let left = self.geometry.car_box(self.shaft, 0).left();
        if let Err(err) = scene::move_to(&self.body, left, top, false) {
            browser::report_error("elevator", err);
        }
    }
}

impl TimeUpdate for Elevator {
    fn id(&self) -> ObjectId {
        self.body.borrow().id()
    }

    fn update(&mut self, _elapsed_ms: f64) -> bool {
        match self.state {
            ElevatorState::Idle => false,
            ElevatorState::Moving { to, increment } => {
                let next = increment + 1;
                if next >= ELEVATOR_TRIP_TICKS {
                    self.floor = to;
                    self.state = ElevatorState::Idle;
                } else {
                    self.state = ElevatorState::Moving {
                        to,
                        increment: next,
                    };
                }
                self.reposition();
                true
            }
        }
    }
}

// ==================== Person ====================

/// A character standing on a floor. The local player draws at full
/// opacity; remote players are translucent. Walking only moves between
/// shafts on the current floor; changing floors means riding a car.
pub struct Person {
    geometry: BuildingGeometry,
    shaft: u32,
    floor: u32,
    local: bool,
    target_shaft: Option<u32>,
    pending_floor: Option<u32>,
    frame_ms: f64,
    width: f64,
    height: f64,
    obj: ScreenObjectRef,
}

impl Person {
    pub fn new(
        geometry: BuildingGeometry,
        sheet: &SpriteSheetSpec,
        sprites: ImageSlot,
        row: u32,
        shaft: u32,
        floor: u32,
        local: bool,
    ) -> Result<Rc<RefCell<Person>>, SceneError> {
        let frames = sheet
            .rows
            .get(row as usize)
            .map(|r| r.frames.max(1))
            .unwrap_or(1);
        let mut strip = SpriteStrip::new(row, frames, sheet.frame_width, sheet.frame_height);
        // desynchronize walk cycles between people sharing the sheet
        strip.set_frame(random_below(frames))?;

        let height = geometry.floor_height() * PERSON_HEIGHT_FRACTION;
        let width = height * sheet.frame_width / sheet.frame_height;

        let obj = ScreenObject::sprite(sprites, strip, 0.0, 0.0)?;
        scene::scale_object(&obj, height / sheet.frame_height, false)?;
        let spot = geometry.person_box(shaft, floor, width, height);
        scene::move_to(&obj, spot.left(), spot.top(), false)?;
        if !local {
            obj.borrow_mut().set_opacity(REMOTE_OPACITY)?;
        }

        Ok(Rc::new(RefCell::new(Person {
            geometry,
            shaft,
            floor,
            local,
            target_shaft: None,
            pending_floor: None,
            frame_ms: 0.0,
            width,
            height,
            obj,
        })))
    }

    pub fn object(&self) -> ScreenObjectRef {
        Rc::clone(&self.obj)
    }

    pub fn shaft(&self) -> u32 {
        self.shaft
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn is_local(&self) -> bool {
        self.local
    }

    pub fn target_shaft(&self) -> Option<u32> {
        self.target_shaft
    }

    pub fn pending_floor(&self) -> Option<u32> {
        self.pending_floor
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Heads for a shaft, remembering the floor to ride to once there.
    pub fn walk_to(&mut self, shaft: u32, floor: u32) {
        self.target_shaft = Some(shaft);
        self.pending_floor = if floor != self.floor {
            Some(floor)
        } else {
            None
        };
    }

    /// Boards and rides: snaps the person to their spot on `floor`.
    pub fn set_floor(&mut self, floor: u32) -> Result<(), SceneError> {
        self.floor = floor;
        self.pending_floor = None;
        let spot = self
            .geometry
            .person_box(self.shaft, floor, self.width, self.height);
        scene::move_to(&self.obj, spot.left(), spot.top(), false)
    }
}

impl TimeUpdate for Person {
    fn id(&self) -> ObjectId {
        self.obj.borrow().id()
    }

    fn update(&mut self, elapsed_ms: f64) -> bool {
        let mut dirty = false;

        self.frame_ms += elapsed_ms;
        if self.frame_ms >= PERSON_FRAME_MS {
            self.frame_ms = 0.0;
            let mut inner = self.obj.borrow_mut();
            if let Some(strip) = inner.sprite.as_mut() {
                strip.advance();
            }
            inner.set_dirty(true);
            dirty = true;
        }

        if let Some(target) = self.target_shaft {
            let spot = self
                .geometry
                .person_box(target, self.floor, self.width, self.height);
            let left = self
                .obj
                .borrow()
                .bounds()
                .map(|b| b.left())
                .unwrap_or(spot.left());
            let distance = spot.left() - left;
            let step = WALK_SPEED * elapsed_ms;
            if distance.abs() <= step {
                if let Err(err) = scene::move_to(&self.obj, spot.left(), spot.top(), false) {
                    browser::report_error("person", err);
                }
                self.shaft = target;
                self.target_shaft = None;
            } else if let Err(err) = scene::move_by(&self.obj, step.copysign(distance), 0.0, false)
            {
                browser::report_error("person", err);
            }
            dirty = true;
        }

        dirty
    }
}

// ==================== Gas cloud ====================

/// The game's namesake. A short-lived circle that drifts up and fades;
/// the panel sweeps expired clouds out of both registries.
pub struct GasCloud {
    obj: ScreenObjectRef,
    ttl_ms: f64,
}

impl GasCloud {
    pub fn new(center: &Point) -> Result<Rc<RefCell<GasCloud>>, SceneError> {
        let obj = ScreenObject::circle(center.x - GAS_RADIUS, center.y - GAS_RADIUS, GAS_RADIUS)?;
        {
            let mut inner = obj.borrow_mut();
            inner.set_fill(GAS_FILL)?;
            inner.set_opacity(GAS_START_OPACITY)?;
        }
        Ok(Rc::new(RefCell::new(GasCloud {
            obj,
            ttl_ms: GAS_TTL_MS,
        })))
    }

    pub fn object(&self) -> ScreenObjectRef {
        Rc::clone(&self.obj)
    }

    pub fn expired(&self) -> bool {
        self.ttl_ms <= 0.0
    }
}

impl TimeUpdate for GasCloud {
    fn id(&self) -> ObjectId {
        self.obj.borrow().id()
    }

    fn update(&mut self, elapsed_ms: f64) -> bool {
        if self.expired() {
            return false;
        }
        self.ttl_ms -= elapsed_ms;
        let remaining = (self.ttl_ms / GAS_TTL_MS).max(0.0);
        if let Err(err) = scene::move_by(&self.obj, 0.0, -GAS_RISE * elapsed_ms, false) {
            browser::report_error("gas", err);
        }
        let mut inner = self.obj.borrow_mut();
        inner.style.opacity = GAS_START_OPACITY * remaining;
        inner.set_dirty(true);
        true
    }
}

// ==================== World ====================

/// Everything alive in the scene, plus the door overlays the foreground
/// panel keeps in sync with the elevators.
pub struct World {
    pub geometry: BuildingGeometry,
    pub elevators: Vec<Rc<RefCell<Elevator>>>,
    pub people: Vec<Rc<RefCell<Person>>>,
    clouds: Vec<Rc<RefCell<GasCloud>>>,
    doors: Vec<Vec<ScreenObjectRef>>,
    pub background_dirty: bool,
    local_player: usize,
}

impl World {
    /// Populates both registries from scratch for the given canvas size.
    /// Rebuilding on resize goes through here too, which is why the
    /// registries are initialized first.
    pub fn build(
        width: f64,
        height: f64,
        assets: &Assets,
        display: &mut DisplayList,
        updates: &mut UpdateList,
    ) -> Result<World> {
        display.initialize();
        updates.initialize();

        let geometry = BuildingGeometry::new(width, height, FLOOR_COUNT, SHAFT_COUNT)?;

        let sky = ScreenObject::rect(0.0, 0.0, width, height)?;
        sky.borrow_mut().set_gradient(engine::gradient(
            GradientKind::LinearVertical,
            &[(0.0, SKY_TOP), (1.0, SKY_BOTTOM)],
        )?);
        display.add(&sky, Layer::World)?;

        let radius = (width.min(height) * 0.05).max(12.0);
        let sun = ScreenObject::circle(width * 0.8, height * 0.04, radius)?;
        sun.borrow_mut().set_gradient(engine::gradient(
            GradientKind::Radial,
            &[(0.0, SUN_CORE), (1.0, SUN_RIM)],
        )?);
        display.add(&sun, Layer::World)?;

        let shell = geometry.shell();
        let building =
            ScreenObject::rect(shell.left(), shell.top(), shell.width(), shell.height())?;
        {
            let mut inner = building.borrow_mut();
            inner.set_fill(WALL_FILL)?;
            inner.set_stroke(2.0, WALL_EDGE)?;
            inner.set_image(assets.wallpaper.clone());
        }
        display.add(&building, Layer::Building)?;

        let sign_box = geometry.sign_box();
        let sign = ScreenObject::image(
            assets.sign.clone(),
            sign_box.left(),
            sign_box.top(),
            sign_box.width(),
            sign_box.height(),
        )?;
        {
            let mut inner = sign.borrow_mut();
            inner.set_fill(SIGN_FILL)?;
            inner.set_label("HOTEL ELEFART", SIGN_FONT, SIGN_TEXT)?;
        }
        display.add(&sign, Layer::Building)?;

        for shaft in 0..SHAFT_COUNT {
            let column = geometry.shaft_column(shaft);
            let obj =
                ScreenObject::rect(column.left(), column.top(), column.width(), column.height())?;
            obj.borrow_mut().set_fill(SHAFT_FILL)?;
            display.add(&obj, Layer::Shafts)?;

            let cap = geometry.terminus(shaft);
            let obj = ScreenObject::rect(cap.left(), cap.top(), cap.width(), cap.height())?;
            obj.borrow_mut().set_fill(TERMINUS_FILL)?;
            display.add(&obj, Layer::Shafts)?;
        }

        for floor in 0..FLOOR_COUNT {
            let band = geometry.floor_band(floor);
            let obj = ScreenObject::rect(band.left(), band.top(), band.width(), band.height())?;
            {
                let mut inner = obj.borrow_mut();
                inner.set_fill(BAND_FILL)?;
                inner.set_label(&ordinal(floor + 1), BAND_FONT, BAND_TEXT)?;
            }
            display.add(&obj, Layer::Floors)?;
        }

        let mut doors = Vec::with_capacity(SHAFT_COUNT as usize);
        for shaft in 0..SHAFT_COUNT {
            let mut column = Vec::with_capacity(FLOOR_COUNT as usize);
            for floor in 0..FLOOR_COUNT {
                let slot = geometry.car_box(shaft, floor);
                let door =
                    ScreenObject::rect(slot.left(), slot.top(), slot.width(), slot.height())?;
                {
                    let mut inner = door.borrow_mut();
                    inner.set_fill(DOOR_FILL)?;
                    inner.set_opacity(DOOR_DIM)?;
                }
                display.add(&door, Layer::Doors)?;
                column.push(door);
            }
            doors.push(column);
        }

        let mut elevators = Vec::with_capacity(SHAFT_COUNT as usize);
        for shaft in 0..SHAFT_COUNT {
            let elevator = Elevator::new(geometry, shaft, 0)?;
            display.add(&elevator.borrow().body(), Layer::Elevators)?;
            updates.add(elevator.clone(), PanelId::Foreground)?;
            elevators.push(elevator);
        }

        let player = Person::new(
            geometry,
            &assets.sheet,
            assets.sprites.clone(),
            row_index(&assets.sheet, RESIDENT_ROW),
            0,
            0,
            true,
        )?;
        let guest = Person::new(
            geometry,
            &assets.sheet,
            assets.sprites.clone(),
            row_index(&assets.sheet, VISITOR_ROW),
            SHAFT_COUNT - 1,
            0,
            false,
        )?;
        let mut people = Vec::new();
        for person in [&player, &guest] {
            display.add(&person.borrow().object(), Layer::People)?;
            updates.add(person.clone(), PanelId::Foreground)?;
            people.push(Rc::clone(person));
        }

        let world = World {
            geometry,
            elevators,
            people,
            clouds: Vec::new(),
            doors,
            background_dirty: true,
            local_player: 0,
        };
        world.refresh_doors();
        Ok(world)
    }

    pub fn local_player(&self) -> Rc<RefCell<Person>> {
        Rc::clone(&self.people[self.local_player])
    }

    /// Doors on the floor a car rests at open (go transparent); every
    /// other floor in that shaft stays dimmed.
    pub fn refresh_doors(&self) {
        for (shaft, column) in self.doors.iter().enumerate() {
            let current = self
                .elevators
                .get(shaft)
                .map(|elevator| elevator.borrow().floor())
                .unwrap_or(0);
            for (floor, door) in column.iter().enumerate() {
                let wanted = if floor as u32 == current { 0.0 } else { DOOR_DIM };
                let mut inner = door.borrow_mut();
                if (inner.style.opacity - wanted).abs() > f64::EPSILON {
                    inner.style.opacity = wanted;
                    inner.set_dirty(true);
                }
            }
        }
    }

    /// Finishes any ride that is ready: a person waiting at a shaft whose
    /// car is idle on their pending floor snaps to that floor.
    pub fn settle_arrivals(&self) {
        for person in &self.people {
            let mut p = person.borrow_mut();
            if p.target_shaft().is_some() {
                continue;
            }
            let Some(pending) = p.pending_floor() else {
                continue;
            };
            let Some(elevator) = self.elevators.get(p.shaft() as usize) else {
                continue;
            };
            let ready = {
                let e = elevator.borrow();
                e.is_idle() && e.floor() == pending
            };
            if ready {
                if let Err(err) = p.set_floor(pending) {
                    browser::report_error("person", err);
                }
            }
        }
    }

    /// Puffs a cloud at the local player's center.
    pub fn spawn_cloud(
        &mut self,
        display: &mut DisplayList,
        updates: &mut UpdateList,
    ) -> Result<(), SceneError> {
        let center = self
            .local_player()
            .borrow()
            .object()
            .borrow()
            .shape
            .center()?;
        let cloud = GasCloud::new(&center)?;
        display.add(&cloud.borrow().object(), Layer::People)?;
        updates.add(cloud.clone(), PanelId::Foreground)?;
        self.clouds.push(cloud);
        Ok(())
    }

    /// Sweeps expired clouds out of both registries.
    pub fn purge_clouds(&mut self, display: &mut DisplayList, updates: &mut UpdateList) {
        let mut kept = Vec::with_capacity(self.clouds.len());
        for cloud in self.clouds.drain(..) {
            if cloud.borrow().expired() {
                let id = cloud.borrow().id();
                display.remove(id, Some(Layer::People));
                updates.remove(id);
            } else {
                kept.push(cloud);
            }
        }
        self.clouds = kept;
    }

    pub fn cloud_count(&self) -> usize {
        self.clouds.len()
    }
}

// ==================== Panels ====================

/// Repaints the static scenery, but only after a rebuild marked it.
struct BackgroundPanel {
    renderer: Rc<Renderer>,
    display: Rc<RefCell<DisplayList>>,
    world: Rc<RefCell<World>>,
}

impl Panel for BackgroundPanel {
    fn erase(&mut self) {}

    fn draw(&mut self) {
        let mut world = self.world.borrow_mut();
        if !world.background_dirty {
            return;
        }
        self.renderer.clear(Surface::Background);
        self.renderer.paint(
            &self.display.borrow(),
            &Layer::BACKGROUND,
            Surface::Background,
        );
        world.background_dirty = false;
    }
}

/// Drains input, runs the housekeeping that must precede the update walk,
/// and repaints the animated layers.
struct ForegroundPanel {
    renderer: Rc<Renderer>,
    display: Rc<RefCell<DisplayList>>,
    updates: Rc<RefCell<UpdateList>>,
    world: Rc<RefCell<World>>,
    input: InputQueue,
    assets: Assets,
    background_canvas: HtmlCanvasElement,
    foreground_canvas: HtmlCanvasElement,
}

impl Panel for ForegroundPanel {
    fn erase(&mut self) {
        self.process_input();
        {
            let world = self.world.borrow();
            world.settle_arrivals();
            world.refresh_doors();
        }
        {
            let mut world = self.world.borrow_mut();
            let mut display = self.display.borrow_mut();
            let mut updates = self.updates.borrow_mut();
            world.purge_clouds(&mut display, &mut updates);
        }
    }

    // Clear and paint stay paired: draw runs on every frame, not just
    // threshold ticks, and translucent fills must never layer onto
    // their own previous pixels.
    fn draw(&mut self) {
        self.renderer.clear(Surface::Foreground);
        self.renderer.paint(
            &self.display.borrow(),
            &Layer::FOREGROUND,
            Surface::Foreground,
        );
    }
}

impl ForegroundPanel {
    fn process_input(&mut self) {
        let events: Vec<InputEvent> = self.input.borrow_mut().drain(..).collect();
        for event in events {
            match event {
                InputEvent::Key(code) if code == "Space" => self.gas(),
                InputEvent::Key(_) => {}
                InputEvent::Pointer { x, y } => self.pointer(x, y),
                InputEvent::Resize => self.rebuild(),
            }
        }
    }

    fn gas(&mut self) {
        let mut world = self.world.borrow_mut();
        let mut display = self.display.borrow_mut();
        let mut updates = self.updates.borrow_mut();
        if let Err(err) = world.spawn_cloud(&mut display, &mut updates) {
            browser::report_error("game", err);
        }
    }

    /// A click picks a cell: the shaft's car is dispatched to that floor
    /// and the player heads for the shaft to ride along.
    fn pointer(&mut self, x: f64, y: f64) {
        let world = self.world.borrow();
        let Some((shaft, floor)) = world.geometry.pick(x, y) else {
            return;
        };
        if let Some(elevator) = world.elevators.get(shaft as usize) {
            if elevator.borrow_mut().dispatch(floor) {
                log!("elevator {shaft} dispatched to the {}", ordinal(floor + 1));
            }
        }
        world.local_player().borrow_mut().walk_to(shaft, floor);
    }

    /// Resizes both canvas backing stores and rebuilds the world to the
    /// new size. The old world is dropped whole.
    fn rebuild(&mut self) {
        let (width, height) = match browser::viewport_size() {
            Ok(size) => size,
            Err(err) => {
                browser::report_error("game", err);
                return;
            }
        };
        for canvas in [&self.background_canvas, &self.foreground_canvas] {
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);
        }
        self.renderer.set_size(width, height);

        let rebuilt = {
            let mut display = self.display.borrow_mut();
            let mut updates = self.updates.borrow_mut();
            World::build(width, height, &self.assets, &mut display, &mut updates)
        };
        match rebuilt {
            Ok(world) => *self.world.borrow_mut() = world,
            Err(err) => browser::report_error("game", format!("world rebuild failed: {err:#}")),
        }
    }
}

// ==================== Game ====================

/// The game's lifecycle states. `initialize` on `Loading` does all the
/// asynchronous setup and hands back `Loaded`; initializing twice is an
/// error.
pub enum Elefart {
    Loading,
    Loaded {
        updates: Rc<RefCell<UpdateList>>,
        panels: Vec<(PanelId, f64, Rc<RefCell<dyn Panel>>)>,
    },
}

impl Elefart {
    pub fn new() -> Self {
        Elefart::Loading
    }
}

impl Default for Elefart {
    fn default() -> Self {
        Elefart::new()
    }
}

#[async_trait(?Send)]
impl Game for Elefart {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            Elefart::Loading => {
                let background_canvas = browser::background_canvas()?;
                let foreground_canvas = browser::foreground_canvas()?;
                let background_ctx = match browser::context_2d(&background_canvas) {
                    Ok(ctx) => ctx,
                    Err(err) => {
                        browser::show_fallback_message(CANVAS_UNSUPPORTED);
                        return Err(err);
                    }
                };
                let foreground_ctx = match browser::context_2d(&foreground_canvas) {
                    Ok(ctx) => ctx,
                    Err(err) => {
                        browser::show_fallback_message(CANVAS_UNSUPPORTED);
                        return Err(err);
                    }
                };

                let (width, height) = browser::viewport_size()?;
                for canvas in [&background_canvas, &foreground_canvas] {
                    canvas.set_width(width as u32);
                    canvas.set_height(height as u32);
                }
                let renderer = Rc::new(Renderer::new(
                    background_ctx,
                    foreground_ctx,
                    width,
                    height,
                ));

                let assets = Assets::load().await;
                let display = Rc::new(RefCell::new(DisplayList::new()));
                let updates = Rc::new(RefCell::new(UpdateList::new()));
                let world = {
                    let mut display = display.borrow_mut();
                    let mut updates = updates.borrow_mut();
                    World::build(width, height, &assets, &mut display, &mut updates)?
                };
                log!(
                    "world ready: {} floors, {} shafts, {}x{}",
                    world.geometry.floors(),
                    world.geometry.shafts(),
                    width,
                    height
                );
                let world = Rc::new(RefCell::new(world));

                let input = engine::new_input_queue();
                {
                    let queue = input.clone();
                    browser::on_key_down(move |code| {
                        queue.borrow_mut().push_back(InputEvent::Key(code));
                    })?;
                }
                {
                    let queue = input.clone();
                    browser::on_resize(move || {
                        queue.borrow_mut().push_back(InputEvent::Resize);
                    })?;
                }
                {
                    let queue = input.clone();
                    browser::on_pointer_down(&foreground_canvas, move |x, y| {
                        queue.borrow_mut().push_back(InputEvent::Pointer { x, y });
                    })?;
                }

                let background_panel: Rc<RefCell<dyn Panel>> =
                    Rc::new(RefCell::new(BackgroundPanel {
                        renderer: renderer.clone(),
                        display: display.clone(),
                        world: world.clone(),
                    }));
                let foreground_panel: Rc<RefCell<dyn Panel>> =
                    Rc::new(RefCell::new(ForegroundPanel {
                        renderer,
                        display,
                        updates: updates.clone(),
                        world,
                        input,
                        assets,
                        background_canvas,
                        foreground_canvas,
                    }));

                Ok(Box::new(Elefart::Loaded {
                    updates,
                    panels: vec![
                        (PanelId::Background, BACKGROUND_TICK_MS, background_panel),
                        (PanelId::Foreground, FOREGROUND_TICK_MS, foreground_panel),
                    ],
                }))
            }
            Elefart::Loaded { .. } => Err(anyhow!("Game is already initialized")),
        }
    }

    fn updates(&self) -> Rc<RefCell<UpdateList>> {
        match self {
            Elefart::Loaded { updates, .. } => updates.clone(),
            Elefart::Loading => Rc::new(RefCell::new(UpdateList::new())),
        }
    }

    fn panels(&self) -> Vec<(PanelId, f64, Rc<RefCell<dyn Panel>>)> {
        match self {
            Elefart::Loaded { panels, .. } => panels.clone(),
            Elefart::Loading => Vec::new(),
        }
    }
}

/// Entry point called from `main_js`: builds the game and hands it to the
/// animation-frame loop.
pub async fn run() -> Result<()> {
    engine::start(Elefart::new()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn test_geometry() -> BuildingGeometry {
        BuildingGeometry::new(800.0, 600.0, FLOOR_COUNT, SHAFT_COUNT).unwrap()
    }

    #[test]
    fn ordinal_suffixes_follow_the_standard_rule() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        // the teens are the exception
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(22), "22nd");
        assert_eq!(ordinal(23), "23rd");
        assert_eq!(ordinal(101), "101st");
        assert_eq!(ordinal(111), "111th");
        assert_eq!(ordinal(112), "112th");
    }

    #[test]
    fn floors_count_up_from_the_bottom() {
        let g = test_geometry();
        let ground = g.floor_top(0);
        let above = g.floor_top(1);
        assert!(above < ground);
        assert_abs_diff_eq!(ground - above, g.floor_height());
        assert_abs_diff_eq!(
            g.floor_top(0) + g.floor_height(),
            g.interior().bottom(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn pick_round_trips_every_cell_center() {
        let g = test_geometry();
        for shaft in 0..SHAFT_COUNT {
            for floor in 0..FLOOR_COUNT {
                let center = g.car_box(shaft, floor).center();
                assert_eq!(g.pick(center.x, center.y), Some((shaft, floor)));
            }
        }
    }

    #[test]
    fn pick_outside_the_interior_misses() {
        let g = test_geometry();
        assert_eq!(g.pick(1.0, 1.0), None);
        assert_eq!(g.pick(400.0, 10.0), None);
        assert_eq!(g.pick(-5.0, 300.0), None);
        assert_eq!(g.pick(f64::NAN, 300.0), None);
    }

    #[test]
    fn cells_stay_inside_their_shaft_column() {
        let g = test_geometry();
        let column = g.shaft_column(2);
        for floor in 0..FLOOR_COUNT {
            let car = g.car_box(2, floor);
            assert!(car.left() >= column.left());
            assert!(car.right() <= column.right());
            assert!(car.width() > 0.0);
            assert!(car.height() > 0.0);
        }
    }

    #[test]
    fn elevator_trip_interpolates_and_arrives() {
        let g = test_geometry();
        let elevator = Elevator::new(g, 0, 0).unwrap();
        let start_top = g.car_box(0, 0).top();
        let target_top = g.car_box(0, 3).top();

        assert!(elevator.borrow_mut().dispatch(3));

        elevator.borrow_mut().update(16.0);
        let mid = elevator.borrow().body().borrow().bounds().map(|b| *b).unwrap().top();
        assert!(mid < start_top && mid > target_top, "car should be en route");

        for _ in 1..ELEVATOR_TRIP_TICKS {
            elevator.borrow_mut().update(16.0);
        }
        let e = elevator.borrow();
        assert!(e.is_idle());
        assert_eq!(e.floor(), 3);
        let top = e.body().borrow().bounds().map(|b| *b).unwrap().top();
        assert_abs_diff_eq!(top, target_top, epsilon = 1e-9);
    }

    #[test]
    fn elevator_refuses_bad_and_concurrent_dispatches() {
        let g = test_geometry();
        let elevator = Elevator::new(g, 1, 0).unwrap();

        assert!(!elevator.borrow_mut().dispatch(0), "same floor");
        assert!(!elevator.borrow_mut().dispatch(FLOOR_COUNT), "out of range");

        assert!(elevator.borrow_mut().dispatch(2));
        elevator.borrow_mut().update(16.0);
        assert!(!elevator.borrow_mut().dispatch(4), "already moving");

        for _ in 0..ELEVATOR_TRIP_TICKS {
            elevator.borrow_mut().update(16.0);
        }
        assert_eq!(elevator.borrow().floor(), 2);
    }

    #[test]
    fn idle_elevator_reports_no_change() {
        let g = test_geometry();
        let elevator = Elevator::new(g, 0, 0).unwrap();
        assert!(!elevator.borrow_mut().update(16.0));
    }

    #[test]
    fn person_walks_to_the_target_shaft() {
        let g = test_geometry();
        let assets = Assets::empty();
        let person = Person::new(g, &assets.sheet, assets.sprites.clone(), 0, 0, 0, true).unwrap();

        person.borrow_mut().walk_to(2, 0);
        assert_eq!(person.borrow().pending_floor(), None, "same floor, no ride");

        let mut steps = 0;
        while person.borrow().target_shaft().is_some() {
            person.borrow_mut().update(16.0);
            steps += 1;
            assert!(steps < 2000, "walk should terminate");
        }

        let p = person.borrow();
        assert_eq!(p.shaft(), 2);
        let (w, h) = p.size();
        let expected = g.person_box(2, 0, w, h);
        let actual = p.object().borrow().bounds().map(|b| *b).unwrap();
        assert_abs_diff_eq!(actual.left(), expected.left(), epsilon = 1e-9);
    }

    #[test]
    fn boarding_waits_for_the_idle_car_on_the_pending_floor() {
        let mut display = DisplayList::new();
        let mut updates = UpdateList::new();
        let assets = Assets::empty();
        let world = World::build(800.0, 600.0, &assets, &mut display, &mut updates).unwrap();

        let player = world.local_player();
        player.borrow_mut().walk_to(0, 2);
        player.borrow_mut().update(16.0); // already at shaft 0
        assert_eq!(player.borrow().target_shaft(), None);
        assert_eq!(player.borrow().pending_floor(), Some(2));

        // car still on the ground floor: nothing settles
        world.settle_arrivals();
        assert_eq!(player.borrow().floor(), 0);

        assert!(world.elevators[0].borrow_mut().dispatch(2));
        for _ in 0..ELEVATOR_TRIP_TICKS {
            world.elevators[0].borrow_mut().update(16.0);
        }
        world.settle_arrivals();

        let p = player.borrow();
        assert_eq!(p.floor(), 2);
        assert_eq!(p.pending_floor(), None);
        let (w, h) = p.size();
        let spot = world.geometry.person_box(0, 2, w, h);
        let actual = p.object().borrow().bounds().map(|b| *b).unwrap();
        assert_abs_diff_eq!(actual.top(), spot.top(), epsilon = 1e-9);
    }

    #[test]
    fn gas_cloud_fades_then_expires() {
        let center = Point::new(100.0, 100.0).unwrap();
        let cloud = GasCloud::new(&center).unwrap();

        assert!(cloud.borrow_mut().update(450.0));
        {
            let c = cloud.borrow();
            assert!(!c.expired());
            let opacity = c.object().borrow().style.opacity;
            assert!(opacity > 0.0 && opacity < GAS_START_OPACITY);
        }

        cloud.borrow_mut().update(600.0);
        let c = cloud.borrow();
        assert!(c.expired());
        assert_abs_diff_eq!(c.object().borrow().style.opacity, 0.0);
    }

    #[test]
    fn expired_clouds_are_purged_from_both_registries() {
        let mut display = DisplayList::new();
        let mut updates = UpdateList::new();
        let assets = Assets::empty();
        let mut world = World::build(800.0, 600.0, &assets, &mut display, &mut updates).unwrap();
        let baseline_display = display.len();
        let baseline_updates = updates.len();

        world.spawn_cloud(&mut display, &mut updates).unwrap();
        assert_eq!(world.cloud_count(), 1);
        assert_eq!(display.len(), baseline_display + 1);

        // not expired yet: survives the sweep
        world.purge_clouds(&mut display, &mut updates);
        assert_eq!(world.cloud_count(), 1);

        for _ in 0..10 {
            for updater in updates.snapshot(PanelId::Foreground) {
                updater.borrow_mut().update(200.0);
            }
        }
        world.purge_clouds(&mut display, &mut updates);

        assert_eq!(world.cloud_count(), 0);
        assert_eq!(display.len(), baseline_display);
        assert_eq!(updates.len(), baseline_updates);
    }

    #[test]
    fn world_build_populates_both_registries() {
        let mut display = DisplayList::new();
        let mut updates = UpdateList::new();
        let assets = Assets::empty();
        let world = World::build(800.0, 600.0, &assets, &mut display, &mut updates).unwrap();

        // sky, sun, shell, sign + per-shaft column and cap + floor bands
        // + door grid + cars + two people
        let expected = 4
            + 2 * SHAFT_COUNT as usize
            + FLOOR_COUNT as usize
            + (SHAFT_COUNT * FLOOR_COUNT) as usize
            + SHAFT_COUNT as usize
            + 2;
        assert_eq!(display.len(), expected);
        assert_eq!(updates.len(), SHAFT_COUNT as usize + 2);

        assert!(world.background_dirty);
        assert!(world.local_player().borrow().is_local());
        assert_abs_diff_eq!(
            world.local_player().borrow().object().borrow().style.opacity,
            1.0
        );
        let guest = &world.people[1];
        assert_abs_diff_eq!(
            guest.borrow().object().borrow().style.opacity,
            REMOTE_OPACITY
        );
    }

    #[test]
    fn doors_open_only_on_the_resting_floor() {
        let mut display = DisplayList::new();
        let mut updates = UpdateList::new();
        let assets = Assets::empty();
        let world = World::build(800.0, 600.0, &assets, &mut display, &mut updates).unwrap();

        let open = |display: &DisplayList| {
            display
                .objects(Layer::Doors)
                .iter()
                .filter(|door| door.borrow().style.opacity == 0.0)
                .count()
        };
        // every car starts on the ground floor
        assert_eq!(open(&display), SHAFT_COUNT as usize);

        world.elevators[1].borrow_mut().dispatch(3);
        for _ in 0..ELEVATOR_TRIP_TICKS {
            world.elevators[1].borrow_mut().update(16.0);
        }
        world.refresh_doors();

        assert_eq!(open(&display), SHAFT_COUNT as usize);
        // shaft 1's open door moved with the car
        let doors = display.objects(Layer::Doors);
        let shaft_one = &doors[FLOOR_COUNT as usize..2 * FLOOR_COUNT as usize];
        assert_abs_diff_eq!(shaft_one[3].borrow().style.opacity, 0.0);
        assert_abs_diff_eq!(shaft_one[0].borrow().style.opacity, DOOR_DIM);
    }

    #[test]
    fn rebuilding_resets_the_registries_instead_of_stacking() {
        let mut display = DisplayList::new();
        let mut updates = UpdateList::new();
        let assets = Assets::empty();

        World::build(800.0, 600.0, &assets, &mut display, &mut updates).unwrap();
        let first = display.len();
        World::build(1024.0, 768.0, &assets, &mut display, &mut updates).unwrap();

        assert_eq!(display.len(), first);
        assert_eq!(updates.len(), SHAFT_COUNT as usize + 2);
    }

    #[test]
    fn sheet_spec_sanitizing_rejects_degenerate_layouts() {
        let bad = SpriteSheetSpec {
            frame_width: 0.0,
            frame_height: 64.0,
            rows: vec![],
        };
        assert_eq!(bad.sanitized(), SpriteSheetSpec::default());

        let good = SpriteSheetSpec::default();
        assert_eq!(good.clone().sanitized(), good);
    }

    #[test]
    fn row_lookup_falls_back_to_the_first_row() {
        let sheet = SpriteSheetSpec::default();
        assert_eq!(row_index(&sheet, VISITOR_ROW), 1);
        assert_eq!(row_index(&sheet, "no-such-row"), 0);
    }
}
