use crate::geom::{Pt, Transform};

/// Symmetry class of one distinct edge shape of the prototile.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum EdgeClass {
    /// Straight segment, never editable.
    Plain,
    /// Arbitrary interior control points, no symmetry constraint.
    Generic,
    /// One canonical control point; the complementary occurrence is the
    /// half-turn of the canonical half-edge about its far endpoint.
    PointSymmetric,
    /// One canonical control point; the complementary occurrence is the
    /// mirror image of the canonical half-edge across the axis through its
    /// far endpoint.
    MirrorSymmetric,
}

/// One placed occurrence of an edge shape on the prototile boundary.
#[derive(Debug, Copy, Clone)]
pub(crate) struct BoundaryPart {
    /// Edge shape identifier, an index into the family's edge shape list.
    pub id: usize,
    /// Whether this is the complementary occurrence of a symmetric edge.
    pub second: bool,
    /// Whether the edge curve is traversed end-to-start here.
    pub reversed: bool,
    /// Placement of the unit edge into prototile-local coordinates.
    pub transform: Transform,
}

/// The tiling classifier's view of one prototile: the distinct edge shapes,
/// the placed boundary occurrences tracing the polygon once, and the shape
/// parameters that deform the placement transforms.
///
/// Identifiers in `boundary()` index into `edge_shapes()`, every placement
/// transform is invertible, and both lists are stable for the lifetime of a
/// family value (parameter changes may move the transforms but never
/// renumber the edges).
pub(crate) trait ShapeFamily {
    fn edge_shapes(&self) -> &[EdgeClass];
    fn boundary(&self) -> &[BoundaryPart];
    fn params(&self) -> &[f64];
    fn set_params(&mut self, values: &[f64]);
}

/// Half-turn of the unit edge about its far endpoint: (x, y) -> (2-x, -y).
/// Composing a placement with this yields the complementary occurrence of a
/// point-symmetric edge.
const HALF_TURN_ABOUT_END: Transform = Transform([-1., 0., 2., 0., -1., 0.]);

/// Mirror of the unit edge across the axis x = 1: (x, y) -> (2-x, y).
/// Composing a placement with this yields the complementary occurrence of a
/// mirror-symmetric edge; the axis itself stays fixed, which is why a drag
/// on that axis pins local x to 1.
const MIRROR_ABOUT_END: Transform = Transform([-1., 0., 2., 0., 1., 0.]);

fn midpoint(a: Pt, b: Pt) -> Pt {
    Pt::new(0.5 * (a.x + b.x), 0.5 * (a.y + b.y))
}

/// The two half-edge occurrences covering one symmetric tile edge from `a`
/// to `b`: the canonical half onto a-midpoint, then the complementary half
/// traversed midpoint-to-b.
fn symmetric_pair(id: usize, class: EdgeClass, a: Pt, b: Pt) -> [BoundaryPart; 2] {
    let first = Transform::match_seg(a, midpoint(a, b));
    let complement = match class {
        EdgeClass::MirrorSymmetric => MIRROR_ABOUT_END,
        _ => HALF_TURN_ABOUT_END,
    };
    [
        BoundaryPart {
            id,
            second: false,
            reversed: false,
            transform: first,
        },
        BoundaryPart {
            id,
            second: true,
            reversed: true,
            transform: first * complement,
        },
    ]
}

/// Translation tiling by a parallelogram: two `Generic` edge shapes, each
/// appearing twice (the far side is the translated copy, traversed
/// backwards). Parameters are the skew and height of the side vector.
#[derive(Debug, Clone)]
pub(crate) struct ParallelogramFamily {
    shapes: [EdgeClass; 2],
    params: Vec<f64>,
    parts: Vec<BoundaryPart>,
}
impl ParallelogramFamily {
    pub fn new() -> Self {
        let mut family = Self {
            shapes: [EdgeClass::Generic, EdgeClass::Generic],
            params: vec![0.25, 1.0],
            parts: vec![],
        };
        family.rebuild();
        family
    }

    fn rebuild(&mut self) {
        let u = Pt::new(1., 0.);
        let v = Pt::new(self.params[0], self.params[1]);
        self.parts = vec![
            BoundaryPart {
                id: 0,
                second: false,
                reversed: false,
                transform: Transform::match_seg(Pt::ZERO, u),
            },
            BoundaryPart {
                id: 1,
                second: false,
                reversed: false,
                transform: Transform::match_seg(u, Pt::new(u.x + v.x, u.y + v.y)),
            },
            BoundaryPart {
                id: 0,
                second: false,
                reversed: true,
                transform: Transform::translate(v.x, v.y),
            },
            BoundaryPart {
                id: 1,
                second: false,
                reversed: true,
                transform: Transform::match_seg(Pt::ZERO, v),
            },
        ];
    }
}
impl ShapeFamily for ParallelogramFamily {
    fn edge_shapes(&self) -> &[EdgeClass] {
        &self.shapes
    }

    fn boundary(&self) -> &[BoundaryPart] {
        &self.parts
    }

    fn params(&self) -> &[f64] {
        &self.params
    }

    fn set_params(&mut self, values: &[f64]) {
        if values.len() != self.params.len() {
            return;
        }
        self.params[0] = values[0];
        // Keep the side vector away from zero so every placement stays
        // invertible.
        self.params[1] = if values[1].abs() < 0.1 {
            0.1f64.copysign(values[1])
        } else {
            values[1]
        };
        self.rebuild();
    }
}

/// Centrally symmetric hexagon with one edge shape of each non-trivial
/// class: bottom and top are `PointSymmetric`, the lower-right/upper-left
/// pair is `Plain`, and the remaining pair is `MirrorSymmetric`. Symmetric
/// edges contribute two half-edge occurrences each.
#[derive(Debug, Clone)]
pub(crate) struct HexagonFamily {
    shapes: [EdgeClass; 3],
    parts: Vec<BoundaryPart>,
}
impl HexagonFamily {
    pub fn new() -> Self {
        // Vertices of a hexagon with a half-turn symmetry about (0.85, 0.9).
        let a = Pt::ZERO;
        let b = Pt::new(1., 0.);
        let c = Pt::new(1.7, 0.8);
        let d = Pt::new(1.7, 1.8);
        let e = Pt::new(0.7, 1.8);
        let f = Pt::new(0., 1.0);

        let shapes = [
            EdgeClass::PointSymmetric,
            EdgeClass::Plain,
            EdgeClass::MirrorSymmetric,
        ];

        let mut parts = vec![];
        parts.extend(symmetric_pair(0, shapes[0], a, b));
        parts.push(BoundaryPart {
            id: 1,
            second: false,
            reversed: false,
            transform: Transform::match_seg(b, c),
        });
        parts.extend(symmetric_pair(2, shapes[2], c, d));
        parts.extend(symmetric_pair(0, shapes[0], d, e));
        parts.push(BoundaryPart {
            id: 1,
            second: true,
            reversed: false,
            transform: Transform::match_seg(e, f),
        });
        parts.extend(symmetric_pair(2, shapes[2], f, a));

        Self { shapes, parts }
    }
}
impl ShapeFamily for HexagonFamily {
    fn edge_shapes(&self) -> &[EdgeClass] {
        &self.shapes
    }

    fn boundary(&self) -> &[BoundaryPart] {
        &self.parts
    }

    fn params(&self) -> &[f64] {
        &[]
    }

    fn set_params(&mut self, _values: &[f64]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn endpoints(part: &BoundaryPart) -> (Pt, Pt) {
        let s = part.transform * Pt::ZERO;
        let e = part.transform * Pt::new(1., 0.);
        if part.reversed {
            (e, s)
        } else {
            (s, e)
        }
    }

    fn assert_closed(parts: &[BoundaryPart]) {
        for pair in parts.windows(2) {
            let (_, end) = endpoints(&pair[0]);
            let (start, _) = endpoints(&pair[1]);
            assert_abs_diff_eq!(end.x, start.x, epsilon = 1e-12);
            assert_abs_diff_eq!(end.y, start.y, epsilon = 1e-12);
        }
        let (_, last) = endpoints(parts.last().unwrap());
        let (first, _) = endpoints(&parts[0]);
        assert_abs_diff_eq!(last.x, first.x, epsilon = 1e-12);
        assert_abs_diff_eq!(last.y, first.y, epsilon = 1e-12);
    }

    #[test]
    fn parallelogram_boundary_closes() {
        assert_closed(ParallelogramFamily::new().boundary());
    }

    #[test]
    fn hexagon_boundary_closes() {
        assert_closed(HexagonFamily::new().boundary());
    }

    #[test]
    fn half_turn_pair_is_point_symmetric() {
        let family = HexagonFamily::new();
        let parts = family.boundary();
        // Bottom edge pair: parts[0] and parts[1].
        assert!(!parts[0].second && parts[1].second);
        let m = parts[0].transform * Pt::new(1., 0.);
        let p = Pt::new(0.33, 0.2);
        let first = parts[0].transform * p;
        let second = parts[1].transform * p;
        // The second image is the half-turn of the first about the midpoint.
        assert_abs_diff_eq!(second.x, 2. * m.x - first.x, epsilon = 1e-12);
        assert_abs_diff_eq!(second.y, 2. * m.y - first.y, epsilon = 1e-12);
    }

    #[test]
    fn mirror_pair_reflects_across_midpoint_axis() {
        let family = HexagonFamily::new();
        let parts = family.boundary();
        // The mirror-symmetric edge c-d is vertical, so its midpoint axis is
        // the horizontal line through m and the reflection fixes x.
        let (first, second) = (&parts[3], &parts[4]);
        assert_eq!(first.id, 2);
        assert!(second.second);
        let m = first.transform * Pt::new(1., 0.);
        let p = Pt::new(0.33, 0.2);
        let a = first.transform * p;
        let b = second.transform * p;
        assert_abs_diff_eq!(b.x, a.x, epsilon = 1e-12);
        assert_abs_diff_eq!(b.y, 2. * m.y - a.y, epsilon = 1e-12);
        // Opposite orientation: the complement is a true mirror.
        assert!(first.transform.det() * second.transform.det() < 0.);
    }

    #[test]
    fn parallelogram_params_move_transforms() {
        let mut family = ParallelogramFamily::new();
        let before = family.boundary()[1].transform;
        family.set_params(&[0.5, 1.2]);
        assert_eq!(family.params(), &[0.5, 1.2]);
        assert_ne!(family.boundary()[1].transform, before);

        // Height snaps away from zero to keep placements invertible.
        family.set_params(&[0.5, 0.0]);
        assert!(family.boundary()[1].transform.det().abs() > 1e-6);
    }
}
