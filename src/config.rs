use crate::tiling::{HexagonFamily, ParallelogramFamily, ShapeFamily};

/// Selectable built-in shape families.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum FamilyKind {
    Hexagon,
    Parallelogram,
}
impl FamilyKind {
    pub const ALL: [FamilyKind; 2] = [FamilyKind::Hexagon, FamilyKind::Parallelogram];

    pub fn label(self) -> &'static str {
        match self {
            FamilyKind::Hexagon => "Hexagon",
            FamilyKind::Parallelogram => "Parallelogram",
        }
    }

    pub fn create(self) -> Box<dyn ShapeFamily> {
        match self {
            FamilyKind::Hexagon => Box::new(HexagonFamily::new()),
            FamilyKind::Parallelogram => Box::new(ParallelogramFamily::new()),
        }
    }
}

pub(crate) struct Settings {
    pub family: FamilyKind,
    pub curve_amount: f64,
    pub show_handles: bool,
}
impl Settings {
    pub fn new() -> Self {
        Self {
            family: FamilyKind::Hexagon,
            curve_amount: 0.3,
            show_handles: true,
        }
    }
}
