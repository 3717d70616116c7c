use std::ops::{Mul, Sub};

/// Point (or vector) in the plane.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub(crate) struct Pt {
    pub x: f64,
    pub y: f64,
}
impl Pt {
    pub const ZERO: Pt = Pt { x: 0., y: 0. };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Pt) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn len(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dist(self, other: Pt) -> f64 {
        (self - other).len()
    }
}
impl Sub for Pt {
    type Output = Pt;

    fn sub(self, rhs: Pt) -> Pt {
        Pt::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Row-major 2D affine transform: maps (x, y) to
/// (ax + by + c, dx + ey + f) for coefficients [a, b, c, d, e, f].
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Transform(pub [f64; 6]);
impl Transform {
    pub const IDENTITY: Transform = Transform([1., 0., 0., 0., 1., 0.]);

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self([a, b, c, d, e, f])
    }

    pub fn translate(x: f64, y: f64) -> Self {
        Self([1., 0., x, 0., 1., y])
    }

    /// Direct transform carrying the unit segment (0,0)-(1,0) onto p-q.
    pub fn match_seg(p: Pt, q: Pt) -> Self {
        Self([q.x - p.x, p.y - q.y, p.x, q.y - p.y, q.x - p.x, p.y])
    }

    pub fn det(&self) -> f64 {
        let t = &self.0;
        t[0] * t[4] - t[1] * t[3]
    }

    /// Inverse transform. The result is undefined for a singular transform;
    /// callers only invert placement and viewport transforms, which are
    /// non-degenerate by construction.
    pub fn inverse(&self) -> Transform {
        let t = &self.0;
        let det = self.det();
        Transform([
            t[4] / det,
            -t[1] / det,
            (t[1] * t[5] - t[2] * t[4]) / det,
            -t[3] / det,
            t[0] / det,
            (t[2] * t[3] - t[0] * t[5]) / det,
        ])
    }
}
impl Mul for Transform {
    type Output = Transform;

    /// Composition: `A * B` applies B, then A.
    fn mul(self, rhs: Transform) -> Transform {
        let a = &self.0;
        let b = &rhs.0;
        Transform([
            a[0] * b[0] + a[1] * b[3],
            a[0] * b[1] + a[1] * b[4],
            a[0] * b[2] + a[1] * b[5] + a[2],
            a[3] * b[0] + a[4] * b[3],
            a[3] * b[1] + a[4] * b[4],
            a[3] * b[2] + a[4] * b[5] + a[5],
        ])
    }
}
impl Mul<Pt> for Transform {
    type Output = Pt;

    fn mul(self, p: Pt) -> Pt {
        let t = &self.0;
        Pt::new(
            t[0] * p.x + t[1] * p.y + t[2],
            t[3] * p.x + t[4] * p.y + t[5],
        )
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Box2 {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}
impl Box2 {
    /// Bounding box of a point sequence, or `None` for an empty sequence.
    pub fn from_points(points: impl IntoIterator<Item = Pt>) -> Option<Box2> {
        let mut b: Option<Box2> = None;
        for p in points {
            b = Some(match b {
                None => Box2 {
                    xmin: p.x,
                    xmax: p.x,
                    ymin: p.y,
                    ymax: p.y,
                },
                Some(b) => Box2 {
                    xmin: b.xmin.min(p.x),
                    xmax: b.xmax.max(p.x),
                    ymin: b.ymin.min(p.y),
                    ymax: b.ymax.max(p.y),
                },
            });
        }
        b
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn center(&self) -> Pt {
        Pt::new(0.5 * (self.xmin + self.xmax), 0.5 * (self.ymin + self.ymax))
    }

    /// Containment test, inclusive of the boundary.
    pub fn contains(&self, p: Pt) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }
}

/// Shortest distance from `p` to the segment a-b, clamped to the endpoints
/// when the projection parameter falls outside [0, 1].
pub(crate) fn dist_to_segment(p: Pt, a: Pt, b: Pt) -> f64 {
    let ab = b - a;
    let t = (p - a).dot(ab) / ab.dot(ab);
    if (0.0..=1.0).contains(&t) {
        p.dist(Pt::new(a.x + t * ab.x, a.y + t * ab.y))
    } else if t < 0.0 {
        p.dist(a)
    } else {
        p.dist(b)
    }
}

/// Bernstein-basis cubic Bezier evaluation at `t` in [0, 1].
pub(crate) fn cubic_point(p0: Pt, p1: Pt, p2: Pt, p3: Pt, t: f64) -> Pt {
    let it = 1.0 - t;
    let it2 = it * it;
    let t2 = t * t;
    Pt::new(
        it2 * it * p0.x + 3.0 * it2 * t * p1.x + 3.0 * it * t2 * p2.x + t2 * t * p3.x,
        it2 * it * p0.y + 3.0 * it2 * t * p1.y + 3.0 * it * t2 * p2.y + t2 * t * p3.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn compose_applies_right_then_left() {
        let scale = Transform::new(2., 0., 0., 0., 2., 0.);
        let shift = Transform::translate(1., -1.);
        let p = Pt::new(3., 4.);

        let scaled_then_shifted = (shift * scale) * p;
        assert_abs_diff_eq!(scaled_then_shifted.x, 7.);
        assert_abs_diff_eq!(scaled_then_shifted.y, 7.);

        let shifted_then_scaled = (scale * shift) * p;
        assert_abs_diff_eq!(shifted_then_scaled.x, 8.);
        assert_abs_diff_eq!(shifted_then_scaled.y, 6.);
    }

    #[test]
    fn inverse_round_trips() {
        let t = Transform::new(0.5, -1.2, 3., 0.7, 0.25, -2.);
        let p = Pt::new(-1.5, 2.5);
        let q = t.inverse() * (t * p);
        assert_abs_diff_eq!(q.x, p.x, epsilon = 1e-12);
        assert_abs_diff_eq!(q.y, p.y, epsilon = 1e-12);
    }

    #[test]
    fn match_seg_maps_unit_endpoints() {
        let p = Pt::new(1.7, 0.8);
        let q = Pt::new(1.7, 1.8);
        let t = Transform::match_seg(p, q);
        assert_eq!(t * Pt::ZERO, p);
        let e = t * Pt::new(1., 0.);
        assert_abs_diff_eq!(e.x, q.x, epsilon = 1e-12);
        assert_abs_diff_eq!(e.y, q.y, epsilon = 1e-12);
        assert!(t.det() > 0.);
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let a = Pt::ZERO;
        let b = Pt::new(2., 0.);
        // Projection inside the segment.
        assert_abs_diff_eq!(dist_to_segment(Pt::new(1., 3.), a, b), 3.);
        // Beyond either endpoint.
        assert_abs_diff_eq!(dist_to_segment(Pt::new(-3., 4.), a, b), 5.);
        assert_abs_diff_eq!(dist_to_segment(Pt::new(5., 4.), a, b), 5.);
    }

    #[test]
    fn cubic_hits_endpoints_exactly() {
        let p0 = Pt::ZERO;
        let p1 = Pt::new(0.35, 0.2);
        let p2 = Pt::new(0.65, 0.1);
        let p3 = Pt::new(1., 0.);
        assert_eq!(cubic_point(p0, p1, p2, p3, 0.), p0);
        assert_eq!(cubic_point(p0, p1, p2, p3, 1.), p3);
        let mid = cubic_point(p0, p1, p2, p3, 0.5);
        assert!(mid.x > 0. && mid.x < 1.);
    }

    #[test]
    fn box_containment_is_inclusive() {
        let b = Box2::from_points([Pt::ZERO, Pt::new(2., 1.)]).unwrap();
        assert!(b.contains(Pt::new(2., 1.)));
        assert!(b.contains(Pt::ZERO));
        assert!(b.contains(Pt::new(1., 0.5)));
        assert!(!b.contains(Pt::new(2.01, 0.5)));
        assert!(Box2::from_points([]).is_none());
    }
}
