use std::f32::consts::TAU;

use tracing::{debug, info};

use crate::error::ParameterError;
use crate::field::PointField;
use crate::params::{GalaxyParameters, ParameterField, ParameterValue};
use crate::random::{RandomSource, SeededSource};
use crate::sampler::sample_galaxy;
use crate::session::{SessionOutcome, SettingsSession};

/// Material settings shared by every point of one primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    pub size: f32,
    pub opacity: f32,
}

/// Backend that turns a [`PointField`] into something on screen.
///
/// A handle moves through `create_point_primitive -> attach -> dispose ->
/// detach`. Disposal releases GPU-side resources; detaching removes the
/// primitive from the scene graph. The handle is dropped afterwards.
pub trait PointRenderer {
    type Handle;

    fn create_point_primitive(&mut self, field: &PointField, style: &PointStyle) -> Self::Handle;
    fn attach(&mut self, handle: &Self::Handle);
    fn detach(&mut self, handle: &Self::Handle);
    fn dispose(&mut self, handle: &Self::Handle);
}

/// Summary of a completed swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegenerationReport {
    /// Incremented on every successful regeneration, starting at 1.
    pub generation: u64,
    pub point_count: usize,
}

struct LiveField<H> {
    handle: H,
    point_count: usize,
}

/// Owns everything one galaxy view needs: the settings session, the random
/// stream, the handle of the field currently on screen, and the rotation
/// angle.
///
/// Regeneration validates first. An invalid parameter set returns the error
/// and leaves the current field attached.
pub struct GalaxyContext<H, S = SeededSource> {
    session: SettingsSession,
    rng: S,
    live: Option<LiveField<H>>,
    rotation: f32,
    generation: u64,
}

impl<H, S: RandomSource> GalaxyContext<H, S> {
    pub fn new(parameters: GalaxyParameters, rng: S) -> Self {
        Self {
            session: SettingsSession::new(parameters),
            rng,
            live: None,
            rotation: 0.0,
            generation: 0,
        }
    }

    pub fn parameters(&self) -> &GalaxyParameters {
        self.session.parameters()
    }

    pub fn session(&self) -> &SettingsSession {
        &self.session
    }

    /// Current rotation about the vertical axis, in radians within `[0, 2pi)`.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Points in the field currently attached, if any.
    pub fn live_point_count(&self) -> Option<usize> {
        self.live.as_ref().map(|live| live.point_count)
    }

    pub fn live_handle(&self) -> Option<&H> {
        self.live.as_ref().map(|live| &live.handle)
    }

    /// Per-tick update: spin the field by `rotationSpeed * delta`.
    pub fn advance(&mut self, delta_seconds: f32) -> f32 {
        let step = self.session.parameters().rotation_speed * delta_seconds;
        if step.is_finite() {
            self.rotation = (self.rotation + step).rem_euclid(TAU);
        }
        self.rotation
    }

    /// Discard the live field and build a new one from the committed
    /// parameters.
    pub fn regenerate<R>(&mut self, renderer: &mut R) -> Result<RegenerationReport, ParameterError>
    where
        R: PointRenderer<Handle = H>,
    {
        let plan = self.session.parameters().validate()?;

        if let Some(old) = self.live.take() {
            renderer.dispose(&old.handle);
            renderer.detach(&old.handle);
            debug!("Released field of {} points", old.point_count);
        }

        let field = sample_galaxy(&plan, &mut self.rng, |_| {});
        let style = PointStyle {
            size: plan.size,
            opacity: 1.0,
        };
        let handle = renderer.create_point_primitive(&field, &style);
        renderer.attach(&handle);

        self.generation += 1;
        self.live = Some(LiveField {
            handle,
            point_count: field.len(),
        });

        info!(
            "Galaxy generation {} ready: {} points",
            self.generation,
            field.len()
        );

        Ok(RegenerationReport {
            generation: self.generation,
            point_count: field.len(),
        })
    }

    /// Forward an intermediate control value. Never regenerates.
    pub fn stage(
        &mut self,
        field: ParameterField,
        value: ParameterValue,
    ) -> Result<SessionOutcome, ParameterError> {
        self.session.stage(field, value)
    }

    /// Drop whatever is staged for `field`, leaving the committed value.
    pub fn cancel(&mut self, field: ParameterField) {
        self.session.cancel(field);
    }

    /// Commit a control value and regenerate if the session asks for it.
    ///
    /// Returns `None` when nothing was rebuilt. If the rebuild fails the
    /// previous parameters are restored alongside the previous field.
    pub fn commit<R>(
        &mut self,
        renderer: &mut R,
        field: ParameterField,
        value: ParameterValue,
    ) -> Result<Option<RegenerationReport>, ParameterError>
    where
        R: PointRenderer<Handle = H>,
    {
        let previous = self.session.parameters().clone();
        let outcome = self.session.commit(field, value)?;
        self.apply_outcome(renderer, outcome, previous)
    }

    /// Commit whatever the panel last staged for `field`.
    pub fn commit_staged<R>(
        &mut self,
        renderer: &mut R,
        field: ParameterField,
    ) -> Result<Option<RegenerationReport>, ParameterError>
    where
        R: PointRenderer<Handle = H>,
    {
        let previous = self.session.parameters().clone();
        let outcome = self.session.commit_staged(field)?;
        self.apply_outcome(renderer, outcome, previous)
    }

    /// Swap in a whole parameter set, as loading a preset does.
    pub fn load_parameters<R>(
        &mut self,
        renderer: &mut R,
        parameters: GalaxyParameters,
    ) -> Result<Option<RegenerationReport>, ParameterError>
    where
        R: PointRenderer<Handle = H>,
    {
        let previous = self.session.parameters().clone();
        let outcome = self.session.replace(parameters);
        self.apply_outcome(renderer, outcome, previous)
    }

    /// Release the live field, leaving nothing attached.
    pub fn teardown<R>(&mut self, renderer: &mut R)
    where
        R: PointRenderer<Handle = H>,
    {
        if let Some(old) = self.live.take() {
            renderer.dispose(&old.handle);
            renderer.detach(&old.handle);
        }
    }

    fn apply_outcome<R>(
        &mut self,
        renderer: &mut R,
        outcome: SessionOutcome,
        previous: GalaxyParameters,
    ) -> Result<Option<RegenerationReport>, ParameterError>
    where
        R: PointRenderer<Handle = H>,
    {
        match outcome {
            SessionOutcome::Regenerate(_) => match self.regenerate(renderer) {
                Ok(report) => Ok(Some(report)),
                Err(err) => {
                    self.session.replace(previous);
                    Err(err)
                }
            },
            SessionOutcome::Staged | SessionOutcome::Applied | SessionOutcome::Unchanged => Ok(None),
        }
    }
}

impl<H> GalaxyContext<H, SeededSource> {
    /// Context seeded from `seed`.
    pub fn seeded(parameters: GalaxyParameters, seed: u64) -> Self {
        Self::new(parameters, SeededSource::new(seed))
    }

    /// Restart the random stream; the next regeneration starts from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    /// Pick a new seed from the current stream and restart from it.
    pub fn reroll(&mut self) -> u64 {
        let seed = self.rng.next_seed();
        self.rng.reseed(seed);
        seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceSource;

    #[derive(Default)]
    struct Recorder {
        next_id: u32,
        calls: Vec<String>,
    }

    impl PointRenderer for Recorder {
        type Handle = u32;

        fn create_point_primitive(&mut self, field: &PointField, _style: &PointStyle) -> u32 {
            self.next_id += 1;
            self.calls
                .push(format!("create {} ({})", self.next_id, field.len()));
            self.next_id
        }

        fn attach(&mut self, handle: &u32) {
            self.calls.push(format!("attach {}", handle));
        }

        fn detach(&mut self, handle: &u32) {
            self.calls.push(format!("detach {}", handle));
        }

        fn dispose(&mut self, handle: &u32) {
            self.calls.push(format!("dispose {}", handle));
        }
    }

    fn small() -> GalaxyParameters {
        GalaxyParameters {
            count: 10,
            ..Default::default()
        }
    }

    #[test]
    fn swap_releases_old_before_attaching_new() {
        let mut renderer = Recorder::default();
        let mut context = GalaxyContext::seeded(small(), 1);

        context.regenerate(&mut renderer).unwrap();
        let report = context.regenerate(&mut renderer).unwrap();

        assert_eq!(report.generation, 2);
        assert_eq!(
            renderer.calls,
            vec![
                "create 1 (10)",
                "attach 1",
                "dispose 1",
                "detach 1",
                "create 2 (10)",
                "attach 2",
            ]
        );
        assert_eq!(context.live_handle(), Some(&2));
    }

    #[test]
    fn failed_commit_keeps_previous_field_and_parameters() {
        let mut renderer = Recorder::default();
        let mut context = GalaxyContext::new(small(), SequenceSource::constant(0.5));
        context.regenerate(&mut renderer).unwrap();
        renderer.calls.clear();

        // Bypasses the control clamp so validation has something to reject.
        context.session.replace(GalaxyParameters {
            radius: -1.0,
            ..small()
        });
        assert!(context.regenerate(&mut renderer).is_err());
        assert!(renderer.calls.is_empty());
        assert_eq!(context.live_point_count(), Some(10));

        let mut context = GalaxyContext::new(small(), SequenceSource::constant(0.5));
        context.regenerate(&mut renderer).unwrap();
        renderer.calls.clear();
        let bad = GalaxyParameters {
            core_concentration: 0.0,
            ..small()
        };
        assert!(context.load_parameters(&mut renderer, bad).is_err());
        assert!(renderer.calls.is_empty());
        assert_eq!(context.parameters(), &small());
    }

    #[test]
    fn staging_never_touches_the_renderer() {
        let mut renderer = Recorder::default();
        let mut context = GalaxyContext::seeded(small(), 3);
        context.regenerate(&mut renderer).unwrap();
        renderer.calls.clear();

        for count in [200.0, 300.0, 400.0] {
            context
                .stage(ParameterField::Count, ParameterValue::Number(count))
                .unwrap();
        }
        assert!(renderer.calls.is_empty());

        let report = context
            .commit(&mut renderer, ParameterField::Count, ParameterValue::Number(500.0))
            .unwrap()
            .unwrap();
        assert_eq!(report.point_count, 500);
        assert_eq!(renderer.calls.len(), 4);
    }

    #[test]
    fn cancelled_drag_leaves_committed_value() {
        let mut renderer = Recorder::default();
        let mut context = GalaxyContext::seeded(small(), 3);
        context
            .stage(ParameterField::Branches, ParameterValue::Number(9.0))
            .unwrap();
        context.cancel(ParameterField::Branches);

        assert!(!context.session().is_staged(ParameterField::Branches));
        let report = context
            .commit_staged(&mut renderer, ParameterField::Branches)
            .unwrap();
        assert!(report.is_none());
        assert!(renderer.calls.is_empty());
        assert_eq!(context.parameters().branches, small().branches);
    }

    #[test]
    fn rotation_speed_commit_skips_regeneration() {
        let mut renderer = Recorder::default();
        let mut context = GalaxyContext::seeded(small(), 3);
        context.regenerate(&mut renderer).unwrap();
        renderer.calls.clear();

        let report = context
            .commit(
                &mut renderer,
                ParameterField::RotationSpeed,
                ParameterValue::Number(0.2),
            )
            .unwrap();
        assert!(report.is_none());
        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn advance_accumulates_rotation() {
        let mut context: GalaxyContext<u32> = GalaxyContext::seeded(small(), 0);
        context.advance(1.0);
        let angle = context.advance(1.0);
        assert!((angle - 0.1).abs() < 1e-6);

        context.advance(f32::INFINITY);
        assert!((context.rotation() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn rotation_wraps_at_full_turn() {
        let params = GalaxyParameters {
            rotation_speed: 1.0,
            ..small()
        };
        let mut context: GalaxyContext<u32> = GalaxyContext::seeded(params, 0);
        let angle = context.advance(TAU + 0.5);
        assert!((angle - 0.5).abs() < 1e-4);
    }

    #[test]
    fn reseeding_reproduces_a_field() {
        struct Keep(Vec<PointField>);
        impl PointRenderer for Keep {
            type Handle = ();
            fn create_point_primitive(&mut self, field: &PointField, _: &PointStyle) {
                self.0.push(field.clone());
            }
            fn attach(&mut self, _: &()) {}
            fn detach(&mut self, _: &()) {}
            fn dispose(&mut self, _: &()) {}
        }

        let mut renderer = Keep(Vec::new());
        let mut context = GalaxyContext::seeded(small(), 9);
        context.regenerate(&mut renderer).unwrap();
        context.reseed(9);
        context.regenerate(&mut renderer).unwrap();
        context.reroll();
        context.regenerate(&mut renderer).unwrap();

        assert_eq!(renderer.0[0], renderer.0[1]);
        assert_ne!(renderer.0[0], renderer.0[2]);
    }

    #[test]
    fn teardown_detaches_live_field() {
        let mut renderer = Recorder::default();
        let mut context = GalaxyContext::seeded(small(), 1);
        context.regenerate(&mut renderer).unwrap();
        context.teardown(&mut renderer);
        assert_eq!(renderer.calls[2..], ["dispose 1", "detach 1"]);
        assert_eq!(context.live_point_count(), None);
    }
}
