//! Field kinds and ghost-ring boundary policies.

use std::fmt;

/// How the ghost ring of a field is filled after an interior update.
///
/// Corners are always the average of their two adjacent edge ghosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryMode {
    /// Ghost cells are zero (open edge, mass leaves the domain).
    Open,
    /// Ghost value equals the adjacent interior value (zero gradient).
    Scalar,
    /// Negate at the left/right edges, mirror at the top/bottom edges.
    /// Used for the x velocity component behind closed walls.
    XReflect,
    /// Mirror at the left/right edges, negate at the top/bottom edges.
    /// Used for the y velocity component behind closed walls.
    YReflect,
}

impl BoundaryMode {
    /// Multipliers applied to the adjacent interior value at the
    /// left/right (`x`) and bottom/top (`y`) edges.
    #[inline]
    pub fn edge_factors(self) -> (f32, f32) {
        match self {
            Self::Open => (0.0, 0.0),
            Self::Scalar => (1.0, 1.0),
            Self::XReflect => (-1.0, 1.0),
            Self::YReflect => (1.0, -1.0),
        }
    }
}

/// The simulated quantities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Horizontal velocity component.
    XVelocity,
    /// Vertical velocity component.
    YVelocity,
    /// Injected gas density.
    Density,
    /// Absolute temperature.
    Temperature,
}

impl FieldKind {
    /// All kinds, in step order.
    pub const ALL: [FieldKind; 4] = [
        FieldKind::XVelocity,
        FieldKind::YVelocity,
        FieldKind::Density,
        FieldKind::Temperature,
    ];

    /// Boundary policy for this field under open or closed walls.
    ///
    /// Closed walls reflect the normal velocity component and hold density
    /// at zero gradient. Open walls let density drain through zeroed ghosts
    /// while velocity keeps a zero-gradient edge. Temperature is always
    /// zero-gradient so the walls neither heat nor cool the domain.
    pub fn boundary_mode(self, closed: bool) -> BoundaryMode {
        match (self, closed) {
            (Self::XVelocity, true) => BoundaryMode::XReflect,
            (Self::YVelocity, true) => BoundaryMode::YReflect,
            (Self::Density, true) => BoundaryMode::Scalar,
            (Self::Density, false) => BoundaryMode::Open,
            (Self::XVelocity | Self::YVelocity, false) => BoundaryMode::Scalar,
            (Self::Temperature, _) => BoundaryMode::Scalar,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::XVelocity => "x_velocity",
            Self::YVelocity => "y_velocity",
            Self::Density => "density",
            Self::Temperature => "temperature",
        };
        f.write_str(name)
    }
}
