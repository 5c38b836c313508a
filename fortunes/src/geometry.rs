//! Pure geometric primitives used by the sweep and the post-processor.
//!
//! Nothing in this module owns any sweep state; every function is a plain
//! computation over points, lines, rays and rectangles.

use std::{
    fmt,
    ops::{Add, Mul, Sub},
};

use ordered_float::OrderedFloat;
use thiserror::Error;

/// Absolute tolerance used throughout the sweep and the post-processor:
/// rectangle containment, circle-event triggering (`y <= sweep_y + EPS`),
/// and point/edge deduplication. `1e-4`, the later and more careful of the
/// two values seen in the source this was distilled from.
pub const EPS: f64 = 1e-4;

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Point {
    pub x: OrderedFloat<f64>,
    pub y: OrderedFloat<f64>,
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x.into_inner(), self.y.into_inner())
    }
}

impl Point {
    pub fn new(x: OrderedFloat<f64>, y: OrderedFloat<f64>) -> Self {
        Self { x, y }
    }

    pub fn from_f64(x: f64, y: f64) -> Self {
        Self::new(OrderedFloat(x), OrderedFloat(y))
    }

    pub fn is_finite(&self) -> bool {
        self.x.into_inner().is_finite() && self.y.into_inner().is_finite()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Add<&Point> for Point {
    type Output = Self;

    fn add(self, other: &Point) -> Self::Output {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<OrderedFloat<f64>> for Point {
    type Output = Self;

    fn mul(self, rhs: OrderedFloat<f64>) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Mul<OrderedFloat<f64>> for &Point {
    type Output = Point;

    fn mul(self, rhs: OrderedFloat<f64>) -> Self::Output {
        Point {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// Two endpoints of a finalized piece of a Voronoi edge.
pub type Segment = [Point; 2];

/// A bi-infinite line through `point` with direction `dir`.
#[derive(Copy, Clone, Debug)]
pub struct Line {
    pub point: Point,
    pub dir: Point,
}

/// A ray starting at `origin` and extending along `dir`.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: Point,
    pub dir: Point,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub x_min: OrderedFloat<f64>,
    pub x_max: OrderedFloat<f64>,
    pub y_min: OrderedFloat<f64>,
    pub y_max: OrderedFloat<f64>,
}

impl BoundingBox {
    pub fn new(
        x_min: OrderedFloat<f64>,
        x_max: OrderedFloat<f64>,
        y_min: OrderedFloat<f64>,
        y_max: OrderedFloat<f64>,
    ) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.x_max.into_inner() - self.x_min.into_inner() <= 0.0
            || self.y_max.into_inner() - self.y_min.into_inner() <= 0.0
    }
}

/// The geometric degeneracies a single primitive can hit. These are not
/// input-validation failures (see `crate::error`); they are expected
/// outcomes of specific site configurations and are handled by the caller
/// (`CheckCircleEvent` skips collinear triples rather than propagating
/// this).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// Three collinear points have no circumcenter.
    #[error("three collinear points have no circumcenter")]
    Degenerate,
}

/// `ParabolaIntersectX`: the x-coordinate of the breakpoint between the
/// arcs focused at `l` (left) and `r` (right) at sweep-line height
/// `sweep_y`.
pub fn parabola_intersect_x(l: &Point, r: &Point, sweep_y: OrderedFloat<f64>) -> OrderedFloat<f64> {
    let ax = l.x;
    let bx = r.x;
    let ay = l.y;
    let by = r.y;

    // Shift into a frame where the sweep line is y=0, keeping the
    // discriminant well-conditioned far from the origin.
    let bx_s = bx - ax;
    let ay_s = ay - sweep_y;
    let by_s = by - sweep_y;

    let discrim = ay_s * by_s * ((ay_s - by_s) * (ay_s - by_s) + bx_s * bx_s);
    let numer = ay_s * bx_s - discrim.sqrt();
    let denom = ay_s - by_s;

    let mut x_bp = if denom != 0.0 { numer / denom } else { bx_s / 2.0 };
    x_bp += ax;

    x_bp
}

/// Direction of the perpendicular bisector of `(a, b)`: rotate `b - a` by
/// 90 degrees. Not normalized; callers only need the direction.
pub fn normal_vector(point: Point) -> Point {
    Point::new(-point.y, point.x)
}

pub fn midpoint(a: &Point, b: &Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// The perpendicular bisector of `(a, b)`, as a `Line` through their
/// midpoint with direction `normal_vector(b - a)`.
pub fn perpendicular_bisector(a: &Point, b: &Point) -> Line {
    Line {
        point: midpoint(a, b),
        dir: normal_vector(*b - *a),
    }
}

/// Orthogonal projection of `p` onto `line`. Used by the post-processor to
/// recover a clipped ray's direction away from a triangle's third site (see
/// §4.6 case 3 of the Voronoi post-processor).
pub fn project_onto_line(p: &Point, line: &Line) -> Point {
    let to_p = *p - line.point;
    let dir = line.dir;
    let dot = to_p.x * dir.x + to_p.y * dir.y;
    let len2 = dir.x * dir.x + dir.y * dir.y;
    if len2 == 0.0 {
        return line.point;
    }
    let t = dot / len2;
    line.point + dir * t
}

/// `CircumCenter`: the center of the circle through three non-collinear
/// points.
pub fn circumcenter(a: &Point, b: &Point, c: &Point) -> Result<Point, GeometryError> {
    let x1 = a.x;
    let y1 = a.y;
    let x2 = b.x;
    let y2 = b.y;
    let x3 = c.x;
    let y3 = c.y;

    let c1 = x3 * x3 + y3 * y3 - x1 * x1 - y1 * y1;
    let c2 = x3 * x3 + y3 * y3 - x2 * x2 - y2 * y2;
    let a1 = (x1 - x3) * -2.0;
    let a2 = (x2 - x3) * -2.0;
    let b1 = (y1 - y3) * -2.0;
    let b2 = (y2 - y3) * -2.0;

    let numer = c1 * a2 - c2 * a1;
    let denom = b1 * a2 - b2 * a1;

    if denom == 0.0 {
        return Err(GeometryError::Degenerate);
    }
    let y_cen = numer / denom;

    let x_cen = if a2 != 0.0 {
        (c2 - b2 * y_cen) / a2
    } else {
        (c1 - b1 * y_cen) / a1
    };

    Ok(Point::new(x_cen, y_cen))
}

/// `ClockwiseSign`: sign of the cross product of `(b-a)` and `(c-b)`.
/// Positive when `a, b, c` turn clockwise, negative counter-clockwise, zero
/// collinear. Only a clockwise triple of sites can converge to a circle
/// event (see `CheckCircleEvent`).
pub fn clockwise_sign(a: &Point, b: &Point, c: &Point) -> OrderedFloat<f64> {
    let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
    -cross
}

pub fn distance(a: &Point, b: &Point) -> OrderedFloat<f64> {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    OrderedFloat((dx * dx + dy * dy).sqrt())
}

/// `RectContains`: point-in-rectangle test with absolute tolerance `EPS`.
pub fn rect_contains(rect: &BoundingBox, p: &Point) -> bool {
    let x = p.x.into_inner();
    let y = p.y.into_inner();
    x >= rect.x_min.into_inner() - EPS
        && x <= rect.x_max.into_inner() + EPS
        && y >= rect.y_min.into_inner() - EPS
        && y <= rect.y_max.into_inner() + EPS
}

/// Intersects the parametric ray `origin + t * dir`, `t` ranging over
/// `[t_min, t_max]`, with the four half-plane constraints of `rect`,
/// returning the surviving `[t_lo, t_hi]` sub-interval. `None` if the
/// parameter domain and the rectangle don't overlap (includes the case
/// where a zero direction component's origin already sits outside the
/// corresponding slab).
fn clip_param_interval(
    origin: &Point,
    dir: &Point,
    rect: &BoundingBox,
    t_min: f64,
    t_max: f64,
) -> Option<(f64, f64)> {
    let mut t_lo = t_min;
    let mut t_hi = t_max;

    let axes = [
        (
            origin.x.into_inner(),
            dir.x.into_inner(),
            rect.x_min.into_inner(),
            rect.x_max.into_inner(),
        ),
        (
            origin.y.into_inner(),
            dir.y.into_inner(),
            rect.y_min.into_inner(),
            rect.y_max.into_inner(),
        ),
    ];

    for (o, d, lo, hi) in axes {
        if d == 0.0 {
            if o < lo - EPS || o > hi + EPS {
                return None;
            }
        } else {
            let t1 = (lo - o) / d;
            let t2 = (hi - o) / d;
            let (t_enter, t_exit) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            t_lo = t_lo.max(t_enter);
            t_hi = t_hi.min(t_exit);
        }
    }

    (t_lo <= t_hi + EPS).then_some((t_lo.min(t_hi), t_hi))
}

fn at(origin: &Point, dir: &Point, t: f64) -> Point {
    Point::from_f64(
        origin.x.into_inner() + t * dir.x.into_inner(),
        origin.y.into_inner() + t * dir.y.into_inner(),
    )
}

/// `ClipSegmentToRect`: clips the segment `a -> b` to `rect`. Preserves the
/// input orientation: the returned pair's first point is always on the `a`
/// side. Returns `None` if the segment misses the rectangle or clips down
/// to a single point (degenerate, silently dropped by callers per spec).
pub fn clip_segment_to_rect(a: &Point, b: &Point, rect: &BoundingBox) -> Option<Segment> {
    let dir = *b - *a;
    let (t_lo, t_hi) = clip_param_interval(a, &dir, rect, 0.0, 1.0)?;
    if t_hi - t_lo <= f64::EPSILON {
        return None;
    }
    Some([at(a, &dir, t_lo), at(a, &dir, t_hi)])
}

/// `ClipRayToRect`: clips `ray` to `rect`. The returned pair is ordered
/// from the ray's origin outward.
pub fn clip_ray_to_rect(ray: &Ray, rect: &BoundingBox) -> Option<Segment> {
    let (t_lo, t_hi) = clip_param_interval(&ray.origin, &ray.dir, rect, 0.0, f64::INFINITY)?;
    if !t_hi.is_finite() || t_hi - t_lo <= f64::EPSILON {
        return None;
    }
    Some([at(&ray.origin, &ray.dir, t_lo), at(&ray.origin, &ray.dir, t_hi)])
}

/// `ClipLineToRect`: clips the bi-infinite `line` to `rect`.
pub fn clip_line_to_rect(line: &Line, rect: &BoundingBox) -> Option<Segment> {
    let (t_lo, t_hi) =
        clip_param_interval(&line.point, &line.dir, rect, f64::NEG_INFINITY, f64::INFINITY)?;
    if !t_lo.is_finite() || !t_hi.is_finite() || t_hi - t_lo <= f64::EPSILON {
        return None;
    }
    Some([at(&line.point, &line.dir, t_lo), at(&line.point, &line.dir, t_hi)])
}

#[cfg(test)]
mod tests {
    use crate::test_utils::compare_segments;

    use super::*;

    #[test]
    fn ray_clip_vertical() {
        let bbox = BoundingBox::new(0.0.into(), 1000.0.into(), 0.0.into(), 1000.0.into());

        let ray = Ray {
            origin: Point::new(500.0.into(), 500.0.into()),
            dir: Point::new(0.0.into(), 500.0.into()),
        };

        let gold = [
            Point::new(500.0.into(), 500.0.into()),
            Point::new(500.0.into(), 1000.0.into()),
        ];

        let seg = clip_ray_to_rect(&ray, &bbox).unwrap();
        assert!(compare_segments(&gold, &seg));
    }

    #[test]
    fn ray_clip_negative_zero_direction() {
        let bbox = BoundingBox::new(0.0.into(), 1000.0.into(), 0.0.into(), 1000.0.into());

        let ray = Ray {
            origin: Point::new(500.0.into(), 500.0.into()),
            dir: Point::new((-0.0).into(), 500.0.into()),
        };

        let gold = [
            Point::new(500.0.into(), 500.0.into()),
            Point::new(500.0.into(), 1000.0.into()),
        ];

        let seg = clip_ray_to_rect(&ray, &bbox).unwrap();
        assert!(compare_segments(&gold, &seg));
    }

    #[test]
    fn ray_clip_both_negative() {
        let bbox = BoundingBox::new(0.0.into(), 1000.0.into(), 0.0.into(), 1000.0.into());

        let ray = Ray {
            origin: Point::new(750.0.into(), 500.0.into()),
            dir: Point::new((-0.0).into(), (-500.0).into()),
        };

        let gold = [
            Point::new(750.0.into(), 500.0.into()),
            Point::new(750.0.into(), 0.0.into()),
        ];

        let seg = clip_ray_to_rect(&ray, &bbox).unwrap();
        assert!(compare_segments(&gold, &seg));
    }

    #[test]
    fn line_clip_horizontal_through_center() {
        let bbox = BoundingBox::new(0.0.into(), 1000.0.into(), 0.0.into(), 1000.0.into());
        let line = Line {
            point: Point::new(500.0.into(), 500.0.into()),
            dir: Point::new(1.0.into(), 0.0.into()),
        };

        let gold = [
            Point::new(0.0.into(), 500.0.into()),
            Point::new(1000.0.into(), 500.0.into()),
        ];

        let seg = clip_line_to_rect(&line, &bbox).unwrap();
        assert!(compare_segments(&gold, &seg));
    }

    #[test]
    fn segment_clip_preserves_orientation() {
        let bbox = BoundingBox::new(0.0.into(), 100.0.into(), 0.0.into(), 100.0.into());
        let a = Point::new((-50.0).into(), 50.0.into());
        let b = Point::new(150.0.into(), 50.0.into());

        let seg = clip_segment_to_rect(&a, &b, &bbox).unwrap();
        assert!(compare_segments(
            &[Point::new(0.0.into(), 50.0.into()), Point::new(100.0.into(), 50.0.into())],
            &seg
        ));
        // a is to the left, so the clipped segment's first point must be
        // the left-hand crossing.
        assert!(seg[0].x.into_inner() < seg[1].x.into_inner());
    }

    #[test]
    fn segment_clip_misses_rect() {
        let bbox = BoundingBox::new(0.0.into(), 10.0.into(), 0.0.into(), 10.0.into());
        let a = Point::new(20.0.into(), 20.0.into());
        let b = Point::new(30.0.into(), 30.0.into());
        assert!(clip_segment_to_rect(&a, &b, &bbox).is_none());
    }

    #[test]
    fn circumcenter_of_right_triangle() {
        let a = Point::new(0.0.into(), 0.0.into());
        let b = Point::new(2.0.into(), 0.0.into());
        let c = Point::new(0.0.into(), 2.0.into());
        let center = circumcenter(&a, &b, &c).unwrap();
        assert!((center.x.into_inner() - 1.0).abs() < 1e-9);
        assert!((center.y.into_inner() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn circumcenter_collinear_is_degenerate() {
        let a = Point::new(0.0.into(), 0.0.into());
        let b = Point::new(1.0.into(), 0.0.into());
        let c = Point::new(2.0.into(), 0.0.into());
        assert_eq!(circumcenter(&a, &b, &c), Err(GeometryError::Degenerate));
    }

    #[test]
    fn clockwise_sign_matches_convention() {
        // a, b, c arranged clockwise in a y-up frame.
        let a = Point::new(0.0.into(), 1.0.into());
        let b = Point::new(1.0.into(), 1.0.into());
        let c = Point::new(1.0.into(), 0.0.into());
        assert!(clockwise_sign(&a, &b, &c).into_inner() > 0.0);
    }

    #[test]
    fn project_onto_line_drops_perpendicular() {
        let line = Line {
            point: Point::new(0.0.into(), 0.0.into()),
            dir: Point::new(1.0.into(), 0.0.into()),
        };
        let p = Point::new(3.0.into(), 4.0.into());
        let proj = project_onto_line(&p, &line);
        assert!((proj.x.into_inner() - 3.0).abs() < 1e-9);
        assert!(proj.y.into_inner().abs() < 1e-9);
    }

    #[test]
    fn rect_contains_tolerates_epsilon() {
        let rect = BoundingBox::new(0.0.into(), 10.0.into(), 0.0.into(), 10.0.into());
        let p = Point::new((-0.00005).into(), 5.0.into());
        assert!(rect_contains(&rect, &p));
        let q = Point::new((-1.0).into(), 5.0.into());
        assert!(!rect_contains(&rect, &q));
    }
}
