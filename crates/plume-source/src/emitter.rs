//! Emitter descriptions and their rasterized form.
//!
//! An [`EmitterSpec`] is pure input: the physical parameters, footprint and
//! optional [`Variation`]. [`EmitterSpec::build`] rasterizes it for a grid
//! and precomputes the per-cell [`Contribution`], producing an [`Emitter`].
//! Keeping the spec lets the set rebuild every emitter after a resize.

use rand::Rng;

use plume_core::{Grid, SourceError};

use crate::noise::normal;
use crate::shape::{rasterize, side_columns, CellSet, Shape};

/// Empirical divisor converting an energy flux density to a temperature
/// excess (a linear heat-transfer approximation).
pub const HEAT_TRANSFER_FACTOR: f32 = 12.5;

/// What an emitter injects, in physical units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EmitterKind {
    /// Gas released at `flow_rate`, spread over the footprint, carrying a
    /// temperature floor.
    Gas {
        /// Total density injected per second.
        flow_rate: f32,
        /// Temperature floor of the released gas (K).
        source_temp: f32,
    },
    /// A fixed push at a single cell.
    Wind {
        /// Velocity magnitude (m/s).
        speed: f32,
        /// Direction in degrees, counter-clockwise from `+x`.
        angle: f32,
    },
    /// A temperature floor with no mass.
    Heat {
        /// Floor temperature (K).
        source_temp: f32,
    },
    /// A heat flux converted to an equivalent temperature floor.
    Energy {
        /// Heat flux (W).
        flux: f32,
        /// Temperature the flux is added to (K).
        reference_temp: f32,
        /// Density of the heated medium (kg/m³).
        reference_density: f32,
    },
    /// Uniform cross-breeze along the left and right walls. At most one
    /// exists per set.
    WindBoundary {
        /// Horizontal velocity (m/s).
        speed: f32,
    },
}

/// Standard deviations for dynamic emitters.
///
/// Each field applies to the kinds that use it; the rest are ignored.
/// `flow` and `flux` are totals and are spread over the footprint like
/// their means.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Variation {
    /// Gas flow rate deviation.
    pub flow: f32,
    /// Temperature deviation (gas and heat).
    pub temperature: f32,
    /// Wind speed deviation (wind and wind boundary).
    pub speed: f32,
    /// Wind angle deviation in degrees.
    pub angle: f32,
    /// Energy flux deviation.
    pub flux: f32,
}

/// Footprint in normalized coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    /// Shape of the covered region.
    pub shape: Shape,
    /// Center x in `[-1, 1]`.
    pub x: f32,
    /// Center y in `[-1, 1]`.
    pub y: f32,
    /// Radius in normalized units (the domain is 2 wide).
    pub radius: f32,
}

/// A complete, grid-independent emitter description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmitterSpec {
    /// What is injected.
    pub kind: EmitterKind,
    /// Where it is injected. Ignored for wind boundaries.
    pub footprint: Footprint,
    /// Per-tick resampling, if any.
    pub variation: Option<Variation>,
}

impl EmitterSpec {
    /// A gas release.
    pub fn gas(shape: Shape, x: f32, y: f32, radius: f32, flow_rate: f32, source_temp: f32) -> Self {
        Self::at(
            EmitterKind::Gas {
                flow_rate,
                source_temp,
            },
            shape,
            x,
            y,
            radius,
        )
    }

    /// A point wind source. Angle in degrees.
    pub fn wind(x: f32, y: f32, speed: f32, angle: f32) -> Self {
        Self::at(EmitterKind::Wind { speed, angle }, Shape::Point, x, y, 0.0)
    }

    /// A heat source.
    pub fn heat(shape: Shape, x: f32, y: f32, radius: f32, source_temp: f32) -> Self {
        Self::at(EmitterKind::Heat { source_temp }, shape, x, y, radius)
    }

    /// An energy source.
    pub fn energy(
        shape: Shape,
        x: f32,
        y: f32,
        radius: f32,
        flux: f32,
        reference_temp: f32,
        reference_density: f32,
    ) -> Self {
        Self::at(
            EmitterKind::Energy {
                flux,
                reference_temp,
                reference_density,
            },
            shape,
            x,
            y,
            radius,
        )
    }

    /// A cross-breeze along both side walls.
    pub fn wind_boundary(speed: f32) -> Self {
        Self::at(EmitterKind::WindBoundary { speed }, Shape::Point, 0.0, 0.0, 0.0)
    }

    fn at(kind: EmitterKind, shape: Shape, x: f32, y: f32, radius: f32) -> Self {
        Self {
            kind,
            footprint: Footprint {
                shape,
                x,
                y,
                radius,
            },
            variation: None,
        }
    }

    /// Resample this emitter every tick with the given deviations.
    pub fn with_variation(mut self, variation: Variation) -> Self {
        self.variation = Some(variation);
        self
    }

    /// Whether this is the side-wall breeze.
    #[inline]
    pub fn is_wind_boundary(&self) -> bool {
        matches!(self.kind, EmitterKind::WindBoundary { .. })
    }

    /// Rasterize for `grid` and precompute the per-cell contribution.
    ///
    /// `length_scale` sets the cell area used by energy emitters.
    pub fn build(&self, grid: Grid, length_scale: f32) -> Result<Emitter, SourceError> {
        let fp = self.footprint;
        if !fp.x.is_finite() || !fp.y.is_finite() {
            return Err(SourceError::InvalidCenter { x: fp.x, y: fp.y });
        }
        if !fp.radius.is_finite() || fp.radius < 0.0 {
            return Err(SourceError::InvalidRadius { value: fp.radius });
        }
        if let EmitterKind::Energy {
            reference_density, ..
        } = self.kind
        {
            if !reference_density.is_finite() || reference_density <= 0.0 {
                return Err(SourceError::InvalidReferenceDensity {
                    value: reference_density,
                });
            }
        }

        let cells = if self.is_wind_boundary() {
            side_columns(grid)
        } else {
            rasterize(grid, fp.shape, fp.x, fp.y, fp.radius)
        };
        let count = cells.len() as f32;
        let cell_area = grid.cell_size(length_scale).powi(2);

        let (contribution, flux_to_temp) = match self.kind {
            EmitterKind::Gas {
                flow_rate,
                source_temp,
            } => (
                Contribution {
                    density: flow_rate / count,
                    temperature: Some(source_temp),
                    ..Contribution::default()
                },
                0.0,
            ),
            EmitterKind::Wind { speed, angle } => {
                let (u, v) = polar(speed, angle);
                (
                    Contribution {
                        u,
                        v,
                        ..Contribution::default()
                    },
                    0.0,
                )
            }
            EmitterKind::Heat { source_temp } => (
                Contribution {
                    temperature: Some(source_temp),
                    ..Contribution::default()
                },
                0.0,
            ),
            EmitterKind::Energy {
                flux,
                reference_temp,
                reference_density,
            } => {
                let k = 1.0 / (HEAT_TRANSFER_FACTOR * reference_density * cell_area * count);
                (
                    Contribution {
                        temperature: Some(reference_temp + flux * k),
                        ..Contribution::default()
                    },
                    k,
                )
            }
            EmitterKind::WindBoundary { speed } => (
                Contribution {
                    u: speed,
                    ..Contribution::default()
                },
                0.0,
            ),
        };

        Ok(Emitter {
            spec: *self,
            grid,
            cells,
            contribution,
            flux_to_temp,
        })
    }
}

/// Velocity components of `speed` at `angle` degrees.
fn polar(speed: f32, angle: f32) -> (f32, f32) {
    let rad = angle.to_radians();
    (speed * rad.cos(), speed * rad.sin())
}

/// What one emitter adds to one covered cell per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Contribution {
    /// Added to the horizontal velocity source.
    pub u: f32,
    /// Added to the vertical velocity source.
    pub v: f32,
    /// Added to the density source.
    pub density: f32,
    /// Max-merged into the temperature floor.
    pub temperature: Option<f32>,
}

/// An emitter rasterized for a specific grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Emitter {
    spec: EmitterSpec,
    grid: Grid,
    cells: CellSet,
    contribution: Contribution,
    flux_to_temp: f32,
}

impl Emitter {
    /// The description this emitter was built from.
    #[inline]
    pub fn spec(&self) -> &EmitterSpec {
        &self.spec
    }

    /// The grid the cell offsets refer to.
    #[inline]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Covered cell offsets.
    #[inline]
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// The deterministic per-cell contribution.
    #[inline]
    pub fn contribution(&self) -> Contribution {
        self.contribution
    }

    /// Whether this emitter resamples every tick.
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.spec.variation.is_some()
    }

    /// Draw one cell's contribution.
    ///
    /// Static emitters return [`contribution`](Self::contribution) without
    /// touching `rng`; so do dynamic ones whose relevant deviations are 0.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Contribution {
        let Some(var) = self.spec.variation else {
            return self.contribution;
        };
        let base = self.contribution;
        let count = self.cells.len() as f32;
        match self.spec.kind {
            EmitterKind::Gas { source_temp, .. } => Contribution {
                density: normal(rng, base.density, var.flow / count),
                temperature: Some(normal(rng, source_temp, var.temperature)),
                ..base
            },
            EmitterKind::Wind { speed, angle } => {
                let angle = normal(rng, angle, var.angle);
                let speed = normal(rng, speed, var.speed);
                let (u, v) = polar(speed, angle);
                Contribution { u, v, ..base }
            }
            EmitterKind::Heat { source_temp } => Contribution {
                temperature: Some(normal(rng, source_temp, var.temperature)),
                ..base
            },
            EmitterKind::Energy { .. } => Contribution {
                temperature: base
                    .temperature
                    .map(|t| normal(rng, t, var.flux * self.flux_to_temp)),
                ..base
            },
            EmitterKind::WindBoundary { speed } => Contribution {
                u: normal(rng, speed, var.speed),
                ..base
            },
        }
    }

    /// Hit-test in normalized coordinates with an extra `tolerance`.
    /// Wind boundaries never match.
    pub fn hit(&self, x: f32, y: f32, tolerance: f32) -> bool {
        if self.spec.is_wind_boundary() {
            return false;
        }
        let fp = self.spec.footprint;
        fp.shape.hit(fp.x, fp.y, fp.radius, x, y, tolerance)
    }
}
