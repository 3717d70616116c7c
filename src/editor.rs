use crate::edge::EdgeCurve;
use crate::geom::{dist_to_segment, Box2, Pt, Transform};
use crate::tiling::{EdgeClass, ShapeFamily};

/// Pick radius around a control point, in physical units.
const PICK_RADIUS: f64 = 0.5;
/// Distance (surface units) within which a segment press inserts a point.
const SEGMENT_TOLERANCE: f64 = 20.0;
/// Long-press delay (seconds) before a picked vertex is deleted.
const DELETE_DELAY: f64 = 1.0;
/// Pointer travel (surface units) that cancels a pending deletion.
const DELETE_CANCEL_DIST: f64 = 10.0;
/// Total margin (surface units) left around the fitted outline per axis.
const FIT_MARGIN: f64 = 50.0;

/// Transient state while a pointer button is held on a control point.
#[derive(Debug)]
struct DragState {
    /// Edge shape being edited.
    edge: usize,
    /// Index of the dragged control point.
    vertex: usize,
    /// Surface-to-local inverse of the picked occurrence's transform.
    inv: Transform,
    /// Press position, in surface coordinates.
    origin: Pt,
    /// Mirror constraint: local x stays pinned to 1.
    pin: bool,
    /// Armed long-press deletion deadline, in editor-clock seconds.
    delete_at: Option<f64>,
}

/// Result of scanning the boundary occurrences for a press position.
enum Hit {
    Vertex {
        edge: usize,
        vertex: usize,
        inv: Transform,
        pin: bool,
    },
    Segment {
        edge: usize,
        index: usize,
        inv: Transform,
    },
}

/// Interactive editor for one prototile's boundary curves.
///
/// Owns the per-edge control points, the cached flattened outline, and the
/// viewport transform; all mutation goes through the pointer-session methods
/// or the explicit setters, and every accepted mutation rebuilds the cache
/// before returning.
pub(crate) struct TileEditor {
    family: Box<dyn ShapeFamily>,
    edges: Vec<EdgeCurve>,
    params: Vec<f64>,
    curve_amount: f64,

    view_w: f64,
    view_h: f64,
    phys_unit: f64,

    outline: Vec<Pt>,
    bounds: Option<Box2>,
    editor_t: Transform,

    drag: Option<DragState>,
}
impl TileEditor {
    pub fn new(family: Box<dyn ShapeFamily>, view_w: f64, view_h: f64, phys_unit: f64) -> Self {
        let mut editor = Self {
            params: family.params().to_vec(),
            family,
            edges: vec![],
            curve_amount: 0.0,
            view_w,
            view_h,
            phys_unit,
            outline: vec![],
            bounds: None,
            editor_t: Transform::IDENTITY,
            drag: None,
        };
        editor.build_default_edges();
        editor.cache_tile_shape();
        editor.calc_editor_transform();
        editor
    }

    /// Replaces the shape family, discarding all edits.
    pub fn set_family(&mut self, family: Box<dyn ShapeFamily>) {
        self.drag = None;
        self.params = family.params().to_vec();
        self.family = family;
        self.build_default_edges();
        self.cache_tile_shape();
        self.calc_editor_transform();
        log::info!(
            "shape family changed: {} edge shapes, {} boundary occurrences",
            self.family.edge_shapes().len(),
            self.family.boundary().len()
        );
    }

    pub fn family(&self) -> &dyn ShapeFamily {
        &*self.family
    }

    pub fn edge(&self, id: usize) -> &EdgeCurve {
        &self.edges[id]
    }

    pub fn curve_amount(&self) -> f64 {
        self.curve_amount
    }

    /// Resets every edge to its default curve at the given amount. This is a
    /// deliberate full reset: manual edits are discarded.
    pub fn set_curve_amount(&mut self, amount: f64) {
        self.curve_amount = amount.max(0.0);
        self.build_default_edges();
        self.cache_tile_shape();
        self.calc_editor_transform();
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn param(&self, index: usize) -> f64 {
        self.params.get(index).copied().unwrap_or(0.0)
    }

    /// Writes one shape parameter and pushes the editor's own parameter list
    /// to the family. The family may clamp, so the list is read back.
    pub fn set_param(&mut self, index: usize, value: f64) {
        match self.params.get_mut(index) {
            Some(slot) => *slot = value,
            None => return,
        }
        let values = self.params.clone();
        self.set_params(&values);
    }

    pub fn set_params(&mut self, values: &[f64]) {
        self.family.set_params(values);
        self.params = self.family.params().to_vec();
        self.cache_tile_shape();
    }

    /// The cached flattened outline, in prototile-local coordinates. Closed:
    /// the final sample repeats the first.
    pub fn outline(&self) -> &[Pt] {
        &self.outline
    }

    pub fn bounds(&self) -> Option<Box2> {
        self.bounds
    }

    pub fn editor_transform(&self) -> Transform {
        self.editor_t
    }

    /// Replaces the viewport transform, e.g. for external pan/zoom.
    pub fn set_editor_transform(&mut self, t: Transform) {
        self.editor_t = t;
    }

    /// Tracks the editing surface size, refitting when it changes.
    pub fn set_view_size(&mut self, w: f64, h: f64) {
        if (w - self.view_w).abs() > 0.5 || (h - self.view_h).abs() > 0.5 {
            self.view_w = w;
            self.view_h = h;
            self.calc_editor_transform();
        }
    }

    /// Recomputes the viewport fit from the cached bounds.
    pub fn refit(&mut self) {
        self.calc_editor_transform();
    }

    pub fn dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn deletion_armed(&self) -> bool {
        matches!(&self.drag, Some(d) if d.delete_at.is_some())
    }

    fn build_default_edges(&mut self) {
        self.edges = self
            .family
            .edge_shapes()
            .iter()
            .map(|&class| EdgeCurve::new(class, self.curve_amount))
            .collect();
    }

    /// Rebuilds the flattened boundary polyline and its bounding box from the
    /// current curves and placements. The first sample of every occurrence
    /// after the first duplicates the previous occurrence's last sample and
    /// is skipped.
    fn cache_tile_shape(&mut self) {
        self.outline.clear();
        let mut first_edge = true;
        for part in self.family.boundary() {
            for (i, p) in self.edges[part.id].sample(part.reversed).enumerate() {
                if !first_edge && i == 0 {
                    continue;
                }
                self.outline.push(part.transform * p);
            }
            first_edge = false;
        }
        self.bounds = Box2::from_points(self.outline.iter().copied());
    }

    fn calc_editor_transform(&mut self) {
        // A zero-extent box cannot be fitted; keep the previous transform.
        let Some(b) = self.bounds else { return };
        if b.width() < 1e-9 || b.height() < 1e-9 {
            return;
        }
        self.editor_t = fit_transform(&b, self.view_w, self.view_h);
    }

    /// Starts a pointer session at `pt` (surface coordinates). Returns true
    /// when a drag began; an explicit delete consumes the press without
    /// starting a drag. `now` is the editor clock in seconds.
    pub fn begin_edit(&mut self, pt: Pt, do_del: bool, now: f64) -> bool {
        self.drag = None;
        match self.hit_test(pt) {
            Some(Hit::Vertex {
                edge,
                vertex,
                inv,
                pin,
            }) => {
                if do_del && !pin {
                    if self.edges[edge].remove(vertex) {
                        self.cache_tile_shape();
                    }
                    return false;
                }
                self.drag = Some(DragState {
                    edge,
                    vertex,
                    inv,
                    origin: pt,
                    pin,
                    // A pinned vertex is not deletable by holding.
                    delete_at: (!pin).then(|| now + DELETE_DELAY),
                });
                true
            }
            Some(Hit::Segment { edge, index, inv }) => {
                let local = inv * pt;
                if !self.edges[edge].insert(index, local) {
                    return false;
                }
                self.cache_tile_shape();
                self.drag = Some(DragState {
                    edge,
                    vertex: index,
                    inv,
                    origin: pt,
                    pin: false,
                    // A just-created point is not deletable by the same press.
                    delete_at: None,
                });
                true
            }
            None => false,
        }
    }

    /// Drags the picked control point to `pt`. No-op while idle.
    pub fn update_edit(&mut self, pt: Pt) {
        let Some(drag) = &mut self.drag else { return };

        let mut local = drag.inv * pt;
        if drag.pin {
            local.x = 1.0;
        }

        // Enough travel means the user wants to drag, not delete.
        if pt.dist(drag.origin) > DELETE_CANCEL_DIST {
            drag.delete_at = None;
        }

        let (edge, vertex) = (drag.edge, drag.vertex);
        if self.edges[edge].move_point(vertex, local) {
            self.cache_tile_shape();
        }
    }

    /// Ends the session, releasing the mirror constraint and any pending
    /// deletion. No-op while idle, so duplicate release events are harmless.
    pub fn end_edit(&mut self) {
        self.drag = None;
    }

    /// Fires the long-press deletion once its deadline passes. The session
    /// ends with the deletion; releasing the pointer first cancels it.
    pub fn tick(&mut self, now: f64) {
        let pending = self
            .drag
            .as_ref()
            .and_then(|d| d.delete_at.map(|at| (at, d.edge, d.vertex)));
        let Some((at, edge, vertex)) = pending else {
            return;
        };
        if now < at {
            return;
        }
        self.drag = None;
        if self.edges[edge].remove(vertex) {
            self.cache_tile_shape();
            log::debug!("long-press deleted control point {vertex} of edge {edge}");
        }
    }

    /// Scans the boundary occurrences for a control point or segment under
    /// `pt`. Control points win over nearby segments; occurrences are tested
    /// in boundary order and the first match is returned.
    fn hit_test(&self, pt: Pt) -> Option<Hit> {
        let radius = PICK_RADIUS * self.phys_unit;

        for part in self.family.boundary() {
            let curve = &self.edges[part.id];
            let class = curve.class();
            if class == EdgeClass::Plain {
                continue;
            }
            let t = self.editor_t * part.transform;
            let n = curve.points().len();

            let mut consumed = false;
            for (idx, &cp) in curve.points().iter().enumerate() {
                if (t * cp).dist(pt) >= radius {
                    continue;
                }
                if idx + 1 == n {
                    // The point just before the implicit end endpoint: only a
                    // mirror-symmetric edge's first occurrence may drag it,
                    // constrained to the mirror axis.
                    if class == EdgeClass::MirrorSymmetric && !part.second {
                        return Some(Hit::Vertex {
                            edge: part.id,
                            vertex: idx,
                            inv: t.inverse(),
                            pin: true,
                        });
                    }
                    consumed = true;
                    break;
                }
                return Some(Hit::Vertex {
                    edge: part.id,
                    vertex: idx,
                    inv: t.inverse(),
                    pin: false,
                });
            }
            if consumed {
                continue;
            }

            // Walk the segments between consecutive points, implicit
            // endpoints included. Only generic curves accept insertion.
            if class != EdgeClass::Generic {
                continue;
            }
            let mut prev = t * Pt::ZERO;
            for idx in 0..=n {
                let q = if idx < n {
                    t * curve.points()[idx]
                } else {
                    t * Pt::new(1., 0.)
                };
                if dist_to_segment(pt, prev, q) < SEGMENT_TOLERANCE {
                    return Some(Hit::Segment {
                        edge: part.id,
                        index: idx,
                        inv: t.inverse(),
                    });
                }
                prev = q;
            }
        }
        None
    }
}

/// Uniform-scale transform centering `bounds` in a `w` by `h` viewport with
/// a fixed margin, y negated so local up maps to screen up. The box must
/// have non-zero extent on both axes.
pub(crate) fn fit_transform(bounds: &Box2, w: f64, h: f64) -> Transform {
    let sc = f64::min(
        (w - FIT_MARGIN) / bounds.width(),
        (h - FIT_MARGIN) / bounds.height(),
    );
    let c = bounds.center();
    Transform::new(sc, 0., 0.5 * w, 0., -sc, 0.5 * h) * Transform::translate(-c.x, -c.y)
}
