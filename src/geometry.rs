//! Typed geometric primitives for the scene graph.
//!
//! Every shape variant validates its inputs at construction and keeps the
//! `width = right - left` / `height = bottom - top` invariant through every
//! mutation. Nothing in here panics: fallible constructors and operations
//! return [`ShapeError`] so callers decide how to report the failure.

use thiserror::Error;

/// Everything that can go wrong while constructing or mutating a shape.
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("coordinate must be a finite number, got {0}")]
    NonFinite(f64),
    #[error("width and height must be non-negative, got {0}")]
    NegativeDimension(f64),
    #[error("radius must be non-negative, got {0}")]
    NegativeRadius(f64),
    #[error("a polygon needs at least one vertex")]
    EmptyPolygon,
    #[error("padding ({horizontal} horizontal, {vertical} vertical) exceeds its target bounds")]
    PaddingOverflow { horizontal: f64, vertical: f64 },
    #[error("scale factor must be non-negative, got {0}")]
    NegativeScale(f64),
    #[error("{op} is not supported for a {variant}")]
    UnsupportedVariant {
        op: &'static str,
        variant: &'static str,
    },
}

fn check_finite(value: f64) -> Result<f64, ShapeError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ShapeError::NonFinite(value))
    }
}

/// A point in canvas coordinates. The origin is the top-left corner and
/// y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Result<Self, ShapeError> {
        check_finite(x)?;
        check_finite(y)?;
        Ok(Point { x, y })
    }

    pub fn valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Result<Self, ShapeError> {
        if !start.valid() {
            return Err(ShapeError::NonFinite(if start.x.is_finite() {
                start.y
            } else {
                start.x
            }));
        }
        if !end.valid() {
            return Err(ShapeError::NonFinite(if end.x.is_finite() {
                end.y
            } else {
                end.x
            }));
        }
        Ok(Line { start, end })
    }

    /// Midpoint of the segment, measured from the endpoint with the
    /// smaller x toward the one with the larger x.
    pub fn midpoint(&self) -> Point {
        let (a, b) = if self.end.x >= self.start.x {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        Point {
            x: a.x + (b.x - a.x) / 2.0,
            y: a.y + (b.y - a.y) / 2.0,
        }
    }

    pub fn valid(&self) -> bool {
        self.start.valid() && self.end.valid()
    }
}

/// Interior spacing for a target box. Padding is only meaningful relative
/// to the bounds it will be applied to, so the constructor demands them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn new(
        top: f64,
        right: f64,
        bottom: f64,
        left: f64,
        target: &Bounds,
    ) -> Result<Self, ShapeError> {
        for v in [top, right, bottom, left] {
            check_finite(v)?;
        }
        let horizontal = left + right;
        let vertical = top + bottom;
        if vertical > target.height() || horizontal > target.width() {
            return Err(ShapeError::PaddingOverflow {
                horizontal,
                vertical,
            });
        }
        Ok(Padding {
            top,
            right,
            bottom,
            left,
        })
    }

    pub fn valid(&self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// An axis-aligned bounding box. `width` and `height` are stored alongside
/// the edges and every mutator keeps them consistent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    top: f64,
    left: f64,
    bottom: f64,
    right: f64,
    width: f64,
    height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, ShapeError> {
        check_finite(x)?;
        check_finite(y)?;
        check_finite(width)?;
        check_finite(height)?;
        if width < 0.0 {
            return Err(ShapeError::NegativeDimension(width));
        }
        if height < 0.0 {
            return Err(ShapeError::NegativeDimension(height));
        }
        Ok(Bounds {
            top: y,
            left: x,
            bottom: y + height,
            right: x + width,
            width,
            height,
        })
    }

    /// Construction shortcut for coordinates the caller already knows are
    /// finite and non-negative (sprite frame math, derived sub-boxes).
    pub(crate) fn unchecked(x: f64, y: f64, width: f64, height: f64) -> Self {
        Bounds {
            top: y,
            left: x,
            bottom: y + height,
            right: x + width,
            width,
            height,
        }
    }

    pub fn zero() -> Self {
        Bounds::unchecked(0.0, 0.0, 0.0, 0.0)
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.left + self.width / 2.0,
            y: self.top + self.height / 2.0,
        }
    }

    /// Inclusive containment test against the box edges.
    pub fn contains_point(&self, pt: &Point) -> bool {
        pt.x >= self.left && pt.x <= self.right && pt.y >= self.top && pt.y <= self.bottom
    }

    /// True when this box sits entirely inside `other`.
    pub fn inside(&self, other: &Bounds) -> bool {
        self.left >= other.left
            && self.right <= other.right
            && self.top >= other.top
            && self.bottom <= other.bottom
    }

    /// Axis-aligned overlap test. The x axis is checked first so a
    /// horizontal separation short-circuits the y comparison.
    pub fn intersects(&self, other: &Bounds) -> bool {
        if self.right < other.left || other.right < self.left {
            return false;
        }
        !(self.bottom < other.top || other.bottom < self.top)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.translate(x - self.left, y - self.top);
    }

    pub fn center_on(&mut self, pt: &Point) {
        self.move_to(pt.x - self.width / 2.0, pt.y - self.height / 2.0);
    }

    /// Grows or shrinks the box about its top-left corner.
    pub fn scale(&mut self, factor: f64) -> Result<(), ShapeError> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(ShapeError::NegativeScale(factor));
        }
        self.width *= factor;
        self.height *= factor;
        self.right = self.left + self.width;
        self.bottom = self.top + self.height;
        Ok(())
    }

    /// The interior box left after removing `padding` from each edge.
    pub fn inset(&self, padding: &Padding) -> Bounds {
        Bounds::unchecked(
            self.left + padding.left,
            self.top + padding.top,
            self.width - padding.left - padding.right,
            self.height - padding.top - padding.bottom,
        )
    }

    pub fn valid(&self) -> bool {
        [self.top, self.left, self.bottom, self.right, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
            && (self.right - self.left - self.width).abs() < f64::EPSILON * 16.0
            && (self.bottom - self.top - self.height).abs() < f64::EPSILON * 16.0
    }
}

fn enclosing(points: &[Point]) -> Bounds {
    let mut left = f64::INFINITY;
    let mut top = f64::INFINITY;
    let mut right = f64::NEG_INFINITY;
    let mut bottom = f64::NEG_INFINITY;
    for pt in points {
        left = left.min(pt.x);
        top = top.min(pt.y);
        right = right.max(pt.x);
        bottom = bottom.max(pt.y);
    }
    Bounds::unchecked(left, top, right - left, bottom - top)
}

/// The tagged shape union. Operations that need a bounding box reject the
/// variants that have none instead of assuming the fields exist.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Point(Point),
    Line(Line),
    Padding(Padding),
    Rect(Bounds),
    Circle { bounds: Bounds, radius: f64 },
    Polygon { points: Vec<Point>, enclosing: Bounds },
}

impl Shape {
    /// A rectangle at `(x, y)` with non-negative `width`/`height`.
    ///
    /// The legacy contract only rejected a negative width (and, oddly, a
    /// negative y). Both dimensions are validated here; negative positions
    /// stay legal.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Result<Self, ShapeError> {
        Ok(Shape::Rect(Bounds::new(x, y, width, height)?))
    }

    /// A circle whose enclosing box has its top-left at `(x, y)`.
    pub fn circle(x: f64, y: f64, radius: f64) -> Result<Self, ShapeError> {
        check_finite(x)?;
        check_finite(y)?;
        check_finite(radius)?;
        if radius < 0.0 {
            return Err(ShapeError::NegativeRadius(radius));
        }
        Ok(Shape::Circle {
            bounds: Bounds::unchecked(x, y, radius * 2.0, radius * 2.0),
            radius,
        })
    }

    /// A polygon over a non-empty vertex list. The enclosing rectangle is
    /// computed once and kept current by every mutation.
    pub fn polygon(points: Vec<Point>) -> Result<Self, ShapeError> {
        if points.is_empty() {
            return Err(ShapeError::EmptyPolygon);
        }
        for pt in &points {
            if !pt.valid() {
                return Err(ShapeError::NonFinite(if pt.x.is_finite() {
                    pt.y
                } else {
                    pt.x
                }));
            }
        }
        let enclosing = enclosing(&points);
        Ok(Shape::Polygon { points, enclosing })
    }

    pub fn variant(&self) -> &'static str {
        match self {
            Shape::Point(_) => "point",
            Shape::Line(_) => "line",
            Shape::Padding(_) => "padding",
            Shape::Rect(_) => "rect",
            Shape::Circle { .. } => "circle",
            Shape::Polygon { .. } => "polygon",
        }
    }

    /// Whether this variant may own children in the scene graph.
    pub fn supports_children(&self) -> bool {
        matches!(
            self,
            Shape::Rect(_) | Shape::Circle { .. } | Shape::Polygon { .. }
        )
    }

    /// The bounding box, for the variants that have one.
    pub fn bounds(&self) -> Result<&Bounds, ShapeError> {
        match self {
            Shape::Rect(b) => Ok(b),
            Shape::Circle { bounds, .. } => Ok(bounds),
            Shape::Polygon { enclosing, .. } => Ok(enclosing),
            other => Err(ShapeError::UnsupportedVariant {
                op: "bounds",
                variant: other.variant(),
            }),
        }
    }

    pub fn contains_point(&self, pt: &Point) -> Result<bool, ShapeError> {
        match self.bounds() {
            Ok(b) => Ok(b.contains_point(pt)),
            Err(_) => Err(ShapeError::UnsupportedVariant {
                op: "contains_point",
                variant: self.variant(),
            }),
        }
    }

    pub fn inside(&self, other: &Bounds) -> Result<bool, ShapeError> {
        match self.bounds() {
            Ok(b) => Ok(b.inside(other)),
            Err(_) => Err(ShapeError::UnsupportedVariant {
                op: "inside",
                variant: self.variant(),
            }),
        }
    }

    pub fn intersects(&self, other: &Bounds) -> Result<bool, ShapeError> {
        match self.bounds() {
            Ok(b) => Ok(b.intersects(other)),
            Err(_) => Err(ShapeError::UnsupportedVariant {
                op: "intersects",
                variant: self.variant(),
            }),
        }
    }

    /// Center of the bounding box, the point itself, or the line midpoint.
    pub fn center(&self) -> Result<Point, ShapeError> {
        match self {
            Shape::Point(pt) => Ok(*pt),
            Shape::Line(line) => Ok(line.midpoint()),
            Shape::Padding(_) => Err(ShapeError::UnsupportedVariant {
                op: "center",
                variant: "padding",
            }),
            _ => Ok(self.bounds()?.center()),
        }
    }

    /// The reference corner used by `move_to`: the point itself, the line
    /// start, or the box top-left.
    pub fn origin(&self) -> Result<Point, ShapeError> {
        match self {
            Shape::Point(pt) => Ok(*pt),
            Shape::Line(line) => Ok(line.start),
            Shape::Padding(_) => Err(ShapeError::UnsupportedVariant {
                op: "origin",
                variant: "padding",
            }),
            _ => {
                let b = self.bounds()?;
                Ok(Point {
                    x: b.left(),
                    y: b.top(),
                })
            }
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> Result<(), ShapeError> {
        check_finite(dx)?;
        check_finite(dy)?;
        match self {
            Shape::Point(pt) => {
                pt.x += dx;
                pt.y += dy;
            }
            Shape::Line(line) => {
                line.start.x += dx;
                line.start.y += dy;
                line.end.x += dx;
                line.end.y += dy;
            }
            Shape::Padding(_) => {
                return Err(ShapeError::UnsupportedVariant {
                    op: "translate",
                    variant: "padding",
                })
            }
            Shape::Rect(b) => b.translate(dx, dy),
            Shape::Circle { bounds, .. } => bounds.translate(dx, dy),
            Shape::Polygon { points, enclosing } => {
                for pt in points.iter_mut() {
                    pt.x += dx;
                    pt.y += dy;
                }
                enclosing.translate(dx, dy);
            }
        }
        Ok(())
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> Result<(), ShapeError> {
        check_finite(x)?;
        check_finite(y)?;
        let origin = self.origin()?;
        self.translate(x - origin.x, y - origin.y)
    }

    pub fn center_on(&mut self, pt: &Point) -> Result<(), ShapeError> {
        let center = self.center()?;
        self.translate(pt.x - center.x, pt.y - center.y)
    }

    pub fn center_in(&mut self, target: &Bounds) -> Result<(), ShapeError> {
        self.center_on(&target.center())
    }

    /// Scales width and height about the top-left corner. Lines and points
    /// have no extent to scale and reject the call.
    pub fn scale(&mut self, factor: f64) -> Result<(), ShapeError> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(ShapeError::NegativeScale(factor));
        }
        match self {
            Shape::Rect(b) => b.scale(factor),
            Shape::Circle { bounds, radius } => {
                bounds.scale(factor)?;
                *radius *= factor;
                Ok(())
            }
            Shape::Polygon { points, enclosing } => {
                let left = enclosing.left();
                let top = enclosing.top();
                for pt in points.iter_mut() {
                    pt.x = left + (pt.x - left) * factor;
                    pt.y = top + (pt.y - top) * factor;
                }
                *enclosing = self::enclosing(points);
                Ok(())
            }
            other => Err(ShapeError::UnsupportedVariant {
                op: "scale",
                variant: other.variant(),
            }),
        }
    }

    /// Holds after every mutating operation on a well-formed shape.
    pub fn valid(&self) -> bool {
        match self {
            Shape::Point(pt) => pt.valid(),
            Shape::Line(line) => line.valid(),
            Shape::Padding(p) => p.valid(),
            Shape::Rect(b) => b.valid(),
            Shape::Circle { bounds, radius } => bounds.valid() && radius.is_finite() && *radius >= 0.0,
            Shape::Polygon { points, enclosing } => {
                !points.is_empty() && points.iter().all(Point::valid) && enclosing.valid()
            }
        }
    }
}
