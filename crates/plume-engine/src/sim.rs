//! The simulation aggregate and its step orchestrator.
//!
//! [`Simulation`] owns the parameters, the field store, the source
//! buffers, the emitter set and the RNG that drives dynamic emitters.
//! [`step()`](Simulation::step) is the only operation that advances time:
//!
//! 1. rebuild the source buffers if emitters or external forcing changed
//!    (every step while any emitter is dynamic) and stage them into the
//!    scratch buffers,
//! 2. velocity: add forcing, buoyancy, diffuse, project, self-advect,
//!    project,
//! 3. density: add, diffuse, dissipate, advect,
//! 4. temperature (when coupled): max-merge, diffuse, dissipate, advect.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use plume_core::{FieldKind, Grid, ParamInfo, ParamWarning, SimParams};
use plume_grid::{ops, Field, FieldStore, SourceBuffers};
use plume_solver::{
    advect, convect, diffuse, dissipate, dissipate_with_falloff, max_divergence, project,
    SolverCtx, Transport, TransportCoefficient,
};
use plume_source::{EmitterId, EmitterSet, EmitterSpec};

use crate::error::SimError;
use crate::metrics::StepMetrics;
use crate::snapshot::FieldSnapshot;

/// A complete smoke simulation on one grid.
#[derive(Debug)]
pub struct Simulation {
    params: SimParams,
    warnings: Vec<ParamWarning>,
    fields: FieldStore,
    sources: SourceBuffers,
    external: Option<SourceBuffers>,
    emitters: EmitterSet,
    rng: ChaCha8Rng,
    sources_dirty: bool,
    check_finite: bool,
    tick: u64,
    last_metrics: StepMetrics,
}

impl Simulation {
    /// A quiescent simulation with `n` interior cells per side.
    ///
    /// `seed` fixes the sequence of dynamic-emitter draws.
    pub fn new(n: usize, params: SimParams, seed: u64) -> Result<Self, SimError> {
        let grid = Grid::new(n)?;
        let warnings = params.validate()?;
        report_warnings(&warnings);
        Ok(Self {
            fields: FieldStore::new(grid, params.air_temp),
            sources: SourceBuffers::new(grid, params.air_temp),
            external: None,
            emitters: EmitterSet::new(grid, params.length_scale),
            rng: ChaCha8Rng::seed_from_u64(seed),
            sources_dirty: true,
            check_finite: false,
            tick: 0,
            last_metrics: StepMetrics::default(),
            params,
            warnings,
        })
    }

    // ── Stepping ─────────────────────────────────────────────────

    /// Advance by `time_step` real seconds (scaled by the time scale).
    ///
    /// With finiteness checking enabled, a NaN or infinity anywhere in
    /// the fields after the step is reported as
    /// [`SimError::NonFiniteField`]; the fields are left as computed.
    pub fn step(&mut self, time_step: f32) -> Result<StepMetrics, SimError> {
        let start = Instant::now();
        let dt = self.params.sim_dt(time_step);
        let ctx = SolverCtx::new(self.grid(), &self.params, dt);

        self.refresh_sources()?;
        self.stage_sources();
        let sources_us = start.elapsed().as_micros() as u64;

        let t = Instant::now();
        self.velocity_step(&ctx);
        let velocity_us = t.elapsed().as_micros() as u64;

        let t = Instant::now();
        self.density_step(&ctx);
        let density_us = t.elapsed().as_micros() as u64;

        let t = Instant::now();
        if self.params.temperature_on {
            self.temperature_step(&ctx);
        }
        let temperature_us = t.elapsed().as_micros() as u64;

        self.tick += 1;
        let metrics = StepMetrics {
            total_us: start.elapsed().as_micros() as u64,
            sources_us,
            velocity_us,
            density_us,
            temperature_us,
            max_divergence: self.max_divergence(),
            total_density: self.total_density(),
            emitter_count: self.emitters.len(),
            sim_dt: dt,
        };
        self.last_metrics = metrics.clone();

        if self.check_finite {
            self.check_fields()?;
        }
        Ok(metrics)
    }

    fn refresh_sources(&mut self) -> Result<(), SimError> {
        let dynamic = self.emitters.has_dynamic();
        if !self.sources_dirty && !dynamic {
            return Ok(());
        }
        let air_temp = self.params.air_temp;
        if dynamic {
            self.emitters
                .apply_dynamic(&mut self.sources, air_temp, &mut self.rng)?;
        } else {
            self.emitters.apply_static(&mut self.sources, air_temp)?;
        }
        if let Some(ext) = &self.external {
            ops::accumulate(&mut self.sources.u, &ext.u, 1.0);
            ops::accumulate(&mut self.sources.v, &ext.v, 1.0);
            ops::accumulate(&mut self.sources.density, &ext.density, 1.0);
            ops::accumulate_max(&mut self.sources.temperature, &ext.temperature);
        }
        self.sources_dirty = false;
        Ok(())
    }

    /// Copy the per-step forcing into the scratch halves of each pair.
    fn stage_sources(&mut self) {
        let f = &mut self.fields;
        let s = &self.sources;
        ops::copy(&mut f.u.previous, &s.u);
        ops::copy(&mut f.v.previous, &s.v);
        ops::copy(&mut f.density.previous, &s.density);
        ops::copy(&mut f.temperature.previous, &s.temperature);
    }

    fn velocity_step(&mut self, ctx: &SolverCtx) {
        let p = &self.params;
        let u_mode = FieldKind::XVelocity.boundary_mode(p.closed_boundaries);
        let v_mode = FieldKind::YVelocity.boundary_mode(p.closed_boundaries);
        let f = &mut self.fields;

        ops::accumulate(&mut f.u.current, &f.u.previous, ctx.dt);
        ops::accumulate(&mut f.v.current, &f.v.previous, ctx.dt);
        if p.gravity_on && p.grav != 0.0 {
            convect(
                ctx,
                p,
                &mut f.v.current,
                &f.density.current,
                &f.temperature.current,
            );
        }

        let visc = TransportCoefficient::new(
            Transport::Viscosity,
            p,
            &f.temperature.current,
            &f.density.current,
        );
        f.u.swap();
        diffuse(ctx, u_mode, &mut f.u.current, &f.u.previous, &visc);
        f.v.swap();
        diffuse(ctx, v_mode, &mut f.v.current, &f.v.previous, &visc);

        project(
            ctx,
            &mut f.u.current,
            &mut f.v.current,
            &mut f.u.previous,
            &mut f.v.previous,
        );

        f.u.swap();
        f.v.swap();
        advect(
            ctx,
            u_mode,
            &mut f.u.current,
            &f.u.previous,
            &f.u.previous,
            &f.v.previous,
        );
        advect(
            ctx,
            v_mode,
            &mut f.v.current,
            &f.v.previous,
            &f.u.previous,
            &f.v.previous,
        );

        project(
            ctx,
            &mut f.u.current,
            &mut f.v.current,
            &mut f.u.previous,
            &mut f.v.previous,
        );
    }

    fn density_step(&mut self, ctx: &SolverCtx) {
        let p = &self.params;
        let mode = FieldKind::Density.boundary_mode(p.closed_boundaries);
        let f = &mut self.fields;

        ops::accumulate(&mut f.density.current, &f.density.previous, ctx.dt);
        f.density.swap();
        {
            let mass = TransportCoefficient::new(
                Transport::Mass,
                p,
                &f.temperature.current,
                &f.density.previous,
            );
            diffuse(ctx, mode, &mut f.density.current, &f.density.previous, &mass);
        }
        f.density.swap();

        if p.dens_decay > 0.0 {
            if p.temp_factor > 0.0 {
                dissipate_with_falloff(
                    &mut f.density.previous,
                    &f.temperature.current,
                    0.0,
                    p.dens_decay,
                    p.temp_factor,
                    p.air_temp,
                    ctx.dt,
                );
            } else {
                dissipate(&mut f.density.previous, 0.0, p.dens_decay, ctx.dt);
            }
        }

        advect(
            ctx,
            mode,
            &mut f.density.current,
            &f.density.previous,
            &f.u.current,
            &f.v.current,
        );
    }

    fn temperature_step(&mut self, ctx: &SolverCtx) {
        let p = &self.params;
        let mode = FieldKind::Temperature.boundary_mode(p.closed_boundaries);
        let f = &mut self.fields;

        ops::accumulate_max(&mut f.temperature.current, &f.temperature.previous);
        f.temperature.swap();
        {
            let thermal = TransportCoefficient::new(
                Transport::Thermal,
                p,
                &f.temperature.previous,
                &f.density.current,
            );
            diffuse(
                ctx,
                mode,
                &mut f.temperature.current,
                &f.temperature.previous,
                &thermal,
            );
        }
        f.temperature.swap();

        if p.temp_decay > 0.0 {
            dissipate(&mut f.temperature.previous, p.air_temp, p.temp_decay, ctx.dt);
        }

        advect(
            ctx,
            mode,
            &mut f.temperature.current,
            &f.temperature.previous,
            &f.u.current,
            &f.v.current,
        );
    }

    fn check_fields(&self) -> Result<(), SimError> {
        for kind in FieldKind::ALL {
            if let Some(idx) = self.fields.current(kind).first_non_finite() {
                return Err(SimError::NonFiniteField {
                    field: kind,
                    cell: self.grid().coords(idx),
                });
            }
        }
        Ok(())
    }

    // ── Grid and state ───────────────────────────────────────────

    /// The current grid.
    #[inline]
    pub fn grid(&self) -> Grid {
        self.fields.grid()
    }

    /// Steps taken since construction.
    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Reallocate every field for `n` interior cells per side and
    /// re-rasterize all emitters.
    ///
    /// Fields return to background values and external sources are
    /// dropped, since their layout no longer matches. On error nothing
    /// changes.
    pub fn resize(&mut self, n: usize) -> Result<(), SimError> {
        let grid = Grid::new(n)?;
        self.emitters.rebuild(grid, self.params.length_scale)?;
        let air_temp = self.params.air_temp;
        self.fields = FieldStore::new(grid, air_temp);
        self.sources = SourceBuffers::new(grid, air_temp);
        self.external = None;
        self.sources_dirty = true;
        Ok(())
    }

    /// Return every field to background: zero velocity and density,
    /// temperature at the air temperature. Emitters are kept.
    pub fn reset_state(&mut self) {
        let air_temp = self.params.air_temp;
        self.fields.reset(air_temp);
        self.sources.reset(air_temp);
        self.sources_dirty = true;
    }

    /// Drop external forcing and return the source buffers to defaults.
    ///
    /// Emitters are kept and re-applied on the next step.
    pub fn reset_sources(&mut self) {
        self.sources.reset(self.params.air_temp);
        self.external = None;
        self.sources_dirty = true;
    }

    // ── Emitters ─────────────────────────────────────────────────

    /// Add an emitter. A wind boundary replaces the existing one.
    pub fn add_emitter(&mut self, spec: EmitterSpec) -> Result<EmitterId, SimError> {
        let id = self.emitters.add(spec)?;
        self.sources_dirty = true;
        Ok(id)
    }

    /// Remove the emitter with handle `id`.
    pub fn remove_emitter(&mut self, id: EmitterId) -> Result<EmitterSpec, SimError> {
        let spec = self.emitters.remove(id)?;
        self.sources_dirty = true;
        Ok(spec)
    }

    /// Remove the first emitter hit at normalized `(x, y)`.
    pub fn remove_emitter_at(&mut self, x: f32, y: f32, tolerance: f32) -> Option<EmitterId> {
        let hit = self.emitters.remove_at(x, y, tolerance);
        if hit.is_some() {
            self.sources_dirty = true;
        }
        hit
    }

    /// Remove every emitter.
    pub fn clear_emitters(&mut self) {
        self.emitters.clear();
        self.sources_dirty = true;
    }

    /// The emitter set.
    #[inline]
    pub fn emitters(&self) -> &EmitterSet {
        &self.emitters
    }

    /// Install caller-owned forcing, merged on top of the emitters every
    /// step until replaced or [`reset_sources`](Self::reset_sources).
    ///
    /// Velocity and density are rates added alongside emitter output; the
    /// temperature buffer is a floor merged with `max`. Every slice must
    /// cover the full `(N+2)²` allocation.
    pub fn set_external_sources(
        &mut self,
        density: &[f32],
        u: &[f32],
        v: &[f32],
        temperature: &[f32],
    ) -> Result<(), SimError> {
        let grid = self.grid();
        let expected = grid.len();
        for buf in [density, u, v, temperature] {
            if buf.len() != expected {
                return Err(SimError::ExternalSourceLength {
                    expected,
                    got: buf.len(),
                });
            }
        }
        let mut ext = SourceBuffers::new(grid, self.params.air_temp);
        ops::copy(&mut ext.density, density);
        ops::copy(&mut ext.u, u);
        ops::copy(&mut ext.v, v);
        ops::copy(&mut ext.temperature, temperature);
        self.external = Some(ext);
        self.sources_dirty = true;
        Ok(())
    }

    /// The source buffers as last applied.
    #[inline]
    pub fn sources(&self) -> &SourceBuffers {
        &self.sources
    }

    // ── Parameters ───────────────────────────────────────────────

    /// The active parameters.
    #[inline]
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Warnings from the last accepted parameter set.
    #[inline]
    pub fn warnings(&self) -> &[ParamWarning] {
        &self.warnings
    }

    /// Replace the parameters after validating them.
    ///
    /// A new length scale re-rasterizes emitters (energy emitters depend
    /// on the cell area). On error the old parameters stay in effect.
    pub fn set_params(&mut self, params: SimParams) -> Result<(), SimError> {
        let warnings = params.validate()?;
        if params.length_scale != self.params.length_scale {
            self.emitters.rebuild(self.grid(), params.length_scale)?;
        }
        if params.air_temp != self.params.air_temp {
            self.sources_dirty = true;
        }
        report_warnings(&warnings);
        self.params = params;
        self.warnings = warnings;
        Ok(())
    }

    /// Set one float parameter by its [`ParamInfo`] display name, clamped
    /// to the slider range.
    pub fn set_param(&mut self, name: &str, value: f32) -> Result<f32, SimError> {
        let info = ParamInfo::by_name(name).ok_or_else(|| SimError::UnknownParameter {
            name: name.to_string(),
        })?;
        let mut params = self.params;
        let stored = info.set_clamped(&mut params, value);
        self.set_params(params)?;
        Ok(stored)
    }

    /// Report non-finite fields from [`step`](Self::step).
    pub fn set_check_finite(&mut self, enabled: bool) {
        self.check_finite = enabled;
    }

    // ── Field access ─────────────────────────────────────────────

    /// Current density.
    #[inline]
    pub fn density(&self) -> &Field {
        &self.fields.density.current
    }

    /// Current horizontal velocity.
    #[inline]
    pub fn x_velocity(&self) -> &Field {
        &self.fields.u.current
    }

    /// Current vertical velocity.
    #[inline]
    pub fn y_velocity(&self) -> &Field {
        &self.fields.v.current
    }

    /// Current temperature.
    #[inline]
    pub fn temperature(&self) -> &Field {
        &self.fields.temperature.current
    }

    /// Current value of `kind`.
    #[inline]
    pub fn field(&self, kind: FieldKind) -> &Field {
        self.fields.current(kind)
    }

    /// Sum of interior density.
    pub fn total_density(&self) -> f32 {
        self.density().sum_interior()
    }

    /// Largest interior divergence of the current velocity.
    pub fn max_divergence(&self) -> f32 {
        let grid = self.grid();
        max_divergence(
            grid,
            grid.cell_size(self.params.length_scale),
            self.x_velocity(),
            self.y_velocity(),
        )
    }

    /// Metrics from the most recent step.
    #[inline]
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// An owned copy of the current fields.
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            tick: self.tick,
            grid: self.grid(),
            density: self.density().clone(),
            x_velocity: self.x_velocity().clone(),
            y_velocity: self.y_velocity().clone(),
            temperature: self.temperature().clone(),
            metrics: self.last_metrics.clone(),
        }
    }
}

fn report_warnings(warnings: &[ParamWarning]) {
    if cfg!(debug_assertions) {
        for w in warnings {
            eprintln!("plume: {w}");
        }
    }
}
