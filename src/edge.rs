use crate::geom::{cubic_point, Pt};
use crate::tiling::EdgeClass;

/// Sample count for a cubic edge, endpoints included.
const CURVE_STEPS: usize = 16;

/// Relative amplitude of the default bump.
const DEFAULT_AMP: f64 = 0.35;

/// One edge shape's curve: its symmetry class and the interior control
/// points. The endpoints (0,0) and (1,0) are implicit and never stored.
#[derive(Debug, Clone)]
pub(crate) struct EdgeCurve {
    class: EdgeClass,
    points: Vec<Pt>,
}
impl EdgeCurve {
    /// Default curve for a class, a bump scaled by the curve amount.
    pub fn new(class: EdgeClass, amount: f64) -> Self {
        let amp = DEFAULT_AMP * amount;
        let points = match class {
            EdgeClass::Plain => vec![],
            EdgeClass::Generic => vec![Pt::new(0.35, amp), Pt::new(0.65, 0.5 * amp)],
            EdgeClass::PointSymmetric | EdgeClass::MirrorSymmetric => vec![Pt::new(0.33, amp)],
        };
        Self { class, points }
    }

    pub fn class(&self) -> EdgeClass {
        self.class
    }

    pub fn points(&self) -> &[Pt] {
        &self.points
    }

    /// Stored point, or an implicit endpoint for `i == 0` and
    /// `i == points.len() + 1` in the start-to-end walk.
    fn walk_point(&self, i: usize) -> Pt {
        if i == 0 {
            Pt::ZERO
        } else if i == self.points.len() + 1 {
            Pt::new(1., 0.)
        } else {
            self.points[i - 1]
        }
    }

    /// Flattened edge geometry from start to end (or end to start when
    /// `reverse` is set). Exactly two interior points sample as a cubic;
    /// everything else yields the stored points plus the implicit endpoints.
    pub fn sample(&self, reverse: bool) -> EdgeSamples<'_> {
        if self.points.len() == 2 {
            EdgeSamples::Cubic {
                ctrl: [
                    Pt::ZERO,
                    self.points[0],
                    self.points[1],
                    Pt::new(1., 0.),
                ],
                step: 0,
                reverse,
            }
        } else {
            EdgeSamples::Poly {
                curve: self,
                step: 0,
                reverse,
            }
        }
    }

    /// Inserts an interior point. Only `Generic` curves accept insertion;
    /// anything else is rejected as a no-op.
    pub fn insert(&mut self, index: usize, p: Pt) -> bool {
        if self.class != EdgeClass::Generic || index > self.points.len() {
            return false;
        }
        self.points.insert(index, p);
        true
    }

    /// Removes an interior point. Only `Generic` curves accept removal.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.class != EdgeClass::Generic || index >= self.points.len() {
            return false;
        }
        self.points.remove(index);
        true
    }

    /// Overwrites a stored point. Valid for any class that stores points.
    pub fn move_point(&mut self, index: usize, p: Pt) -> bool {
        match self.points.get_mut(index) {
            Some(slot) => {
                *slot = p;
                true
            }
            None => false,
        }
    }
}

/// Lazy, restartable pass over an edge's flattened geometry.
#[derive(Debug, Clone)]
pub(crate) enum EdgeSamples<'a> {
    Cubic {
        ctrl: [Pt; 4],
        step: usize,
        reverse: bool,
    },
    Poly {
        curve: &'a EdgeCurve,
        step: usize,
        reverse: bool,
    },
}
impl Iterator for EdgeSamples<'_> {
    type Item = Pt;

    fn next(&mut self) -> Option<Pt> {
        match self {
            EdgeSamples::Cubic {
                ctrl,
                step,
                reverse,
            } => {
                if *step > CURVE_STEPS {
                    return None;
                }
                let mut t = *step as f64 / CURVE_STEPS as f64;
                if *reverse {
                    t = 1.0 - t;
                }
                *step += 1;
                Some(cubic_point(ctrl[0], ctrl[1], ctrl[2], ctrl[3], t))
            }
            EdgeSamples::Poly {
                curve,
                step,
                reverse,
            } => {
                let count = curve.points.len() + 2;
                if *step >= count {
                    return None;
                }
                let i = if *reverse { count - 1 - *step } else { *step };
                *step += 1;
                Some(curve.walk_point(i))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_point_counts_per_class() {
        assert_eq!(EdgeCurve::new(EdgeClass::Plain, 1.).points().len(), 0);
        assert_eq!(EdgeCurve::new(EdgeClass::Generic, 1.).points().len(), 2);
        assert_eq!(
            EdgeCurve::new(EdgeClass::PointSymmetric, 1.).points().len(),
            1
        );
        assert_eq!(
            EdgeCurve::new(EdgeClass::MirrorSymmetric, 1.).points().len(),
            1
        );
    }

    #[test]
    fn zero_amount_generic_samples_collinear() {
        let curve = EdgeCurve::new(EdgeClass::Generic, 0.);
        let samples: Vec<Pt> = curve.sample(false).collect();
        assert_eq!(samples.len(), CURVE_STEPS + 1);
        for p in &samples {
            assert_abs_diff_eq!(p.y, 0.);
        }
        assert_eq!(samples[0], Pt::ZERO);
        assert_eq!(samples[CURVE_STEPS], Pt::new(1., 0.));
    }

    #[test]
    fn sampling_keeps_implicit_endpoints() {
        let mut curve = EdgeCurve::new(EdgeClass::Generic, 0.7);
        assert!(curve.insert(1, Pt::new(0.5, -0.3)));
        assert!(curve.move_point(0, Pt::new(0.1, 0.9)));
        assert!(curve.remove(2));
        let samples: Vec<Pt> = curve.sample(false).collect();
        assert_eq!(*samples.first().unwrap(), Pt::ZERO);
        assert_eq!(*samples.last().unwrap(), Pt::new(1., 0.));
    }

    #[test]
    fn reverse_sampling_is_exact_reversal() {
        for class in [
            EdgeClass::Plain,
            EdgeClass::Generic,
            EdgeClass::PointSymmetric,
        ] {
            let curve = EdgeCurve::new(class, 0.8);
            let forward: Vec<Pt> = curve.sample(false).collect();
            let mut backward: Vec<Pt> = curve.sample(true).collect();
            backward.reverse();
            assert_eq!(forward, backward);
        }
    }

    #[test]
    fn plain_edge_is_a_bare_segment() {
        let curve = EdgeCurve::new(EdgeClass::Plain, 1.);
        let samples: Vec<Pt> = curve.sample(false).collect();
        assert_eq!(samples, vec![Pt::ZERO, Pt::new(1., 0.)]);
    }

    #[test]
    fn symmetric_classes_reject_resizing() {
        let mut curve = EdgeCurve::new(EdgeClass::MirrorSymmetric, 1.);
        assert!(!curve.insert(0, Pt::new(0.5, 0.5)));
        assert!(!curve.remove(0));
        assert_eq!(curve.points().len(), 1);
        // The single point itself stays movable.
        assert!(curve.move_point(0, Pt::new(1., 0.4)));
        assert_eq!(curve.points()[0], Pt::new(1., 0.4));
    }

    #[test]
    fn generic_resizing_switches_representation() {
        let mut curve = EdgeCurve::new(EdgeClass::Generic, 1.);
        // Two interior points: cubic, 17 samples.
        assert_eq!(curve.sample(false).count(), CURVE_STEPS + 1);
        // Three interior points: plain polyline.
        assert!(curve.insert(2, Pt::new(0.8, 0.1)));
        assert_eq!(curve.sample(false).count(), 5);
        // Out-of-range insert is rejected.
        assert!(!curve.insert(7, Pt::ZERO));
    }
}
