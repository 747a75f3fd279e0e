//! The scene: one state object holding the model pose, camera, projection,
//! rotation axis and spin, and the commands a front-end drives it with.
//!
//! Every command either succeeds and mutates the scene or returns an
//! [`EngineError`] and leaves it exactly as it was.

use std::time::Instant;

use tracing::debug;

use crate::camera::OrbitCamera;
use crate::config::SceneConfig;
use crate::error::Result;
use crate::geometry::WireModel;
use crate::matrix::Matrix4;
use crate::parse::parse_point;
use crate::projection::{render_frame, Frame, Projection, ProjectionMode};
use crate::spin::SpinState;
use crate::transform::{Axis, AxisLine, ModelTransform};
use crate::vector::Vector3;

#[derive(Debug, Clone)]
pub struct Scene {
    config: SceneConfig,
    model: WireModel,
    transform: ModelTransform,
    camera: OrbitCamera,
    projection: Projection,
    spin: SpinState,
    axis: Option<AxisLine>,
}

impl Scene {
    pub fn new(model: WireModel, config: SceneConfig) -> Self {
        Self {
            model,
            transform: ModelTransform::new(),
            camera: config.camera(),
            projection: config.projection(),
            spin: config.spin(),
            axis: None,
            config,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn model(&self) -> &WireModel {
        &self.model
    }

    pub fn model_matrix(&self) -> Matrix4 {
        self.transform.matrix()
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn spin(&self) -> &SpinState {
        &self.spin
    }

    pub fn axis(&self) -> Option<&AxisLine> {
        self.axis.as_ref()
    }

    // Model commands. Each left-multiplies the model matrix.

    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.transform.translate(dx, dy, dz);
    }

    pub fn scale_uniform(&mut self, factor: f64) {
        self.transform.scale_uniform(factor);
    }

    pub fn rotate_axis_aligned(&mut self, axis: Axis, angle: f64) {
        self.transform.rotate(axis, angle);
    }

    /// One discrete step of `angle` radians around the rotation axis.
    /// Returns `false` (and does nothing) when no axis is defined.
    pub fn nudge_around_axis(&mut self, angle: f64) -> bool {
        match self.axis {
            Some(line) => self.transform.rotate_around_line(line.p1(), line.p2(), angle),
            None => false,
        }
    }

    // Rotation axis.

    /// Defines the rotation axis through `p1` and `p2`. Spin state is not
    /// touched.
    pub fn set_axis(&mut self, p1: Vector3, p2: Vector3) -> Result<()> {
        let line = AxisLine::new(p1, p2)?;
        debug!(%p1, %p2, "rotation axis defined");
        self.axis = Some(line);
        Ok(())
    }

    /// Like [`Scene::set_axis`], reading both points from free-form text.
    /// Nothing changes unless both parse and form a valid axis.
    pub fn set_axis_from_text(&mut self, p1: &str, p2: &str) -> Result<()> {
        let p1 = parse_point(p1)?;
        let p2 = parse_point(p2)?;
        self.set_axis(p1, p2)
    }

    /// Makes the world `axis` the rotation axis and toggles spin. Reversing
    /// direction is a separate command. Returns the new spinning state.
    pub fn select_principal_axis(&mut self, axis: Axis, now: Instant) -> bool {
        self.axis = Some(AxisLine::principal(axis));
        let spinning = self.spin.toggle(now);
        debug!(?axis, spinning, "principal axis selected");
        spinning
    }

    /// Forgets the axis and stops spinning.
    pub fn clear_axis(&mut self) {
        self.axis = None;
        self.spin.stop();
        debug!("rotation axis cleared");
    }

    // Spin.

    /// Starts or pauses the spin. Without an axis this does nothing.
    /// Returns the spinning state afterwards.
    pub fn toggle_spin(&mut self, now: Instant) -> bool {
        if self.axis.is_none() {
            debug!("spin toggle ignored: no rotation axis");
            return self.spin.is_spinning();
        }
        let spinning = self.spin.toggle(now);
        debug!(spinning, "spin toggled");
        spinning
    }

    pub fn reverse_direction(&mut self) {
        self.spin.reverse();
        debug!(speed = self.spin.speed_deg_per_sec(), "spin reversed");
    }

    /// Sets the signed spin speed, clamped to ±180°/s. Non-finite values are
    /// ignored.
    pub fn set_speed_deg_per_sec(&mut self, deg_per_sec: f64) {
        self.spin.set_speed(deg_per_sec);
    }

    /// Periodic update. Advances the spin by the time elapsed since the
    /// previous tick; returns whether the model moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        match (self.spin.advance(now), self.axis) {
            (Some(delta), Some(line)) => {
                self.transform.rotate_around_line(line.p1(), line.p2(), delta)
            }
            _ => false,
        }
    }

    // Camera and projection.

    /// Adds to the camera yaw and pitch (radians); pitch is clamped to ±89°.
    pub fn orbit(&mut self, delta_yaw: f64, delta_pitch: f64) {
        self.camera.orbit(delta_yaw, delta_pitch);
    }

    /// Pointer drag in pixels, scaled by the configured sensitivity.
    pub fn drag(&mut self, dx: f64, dy: f64) {
        self.camera.drag(dx, dy, self.config.drag_sensitivity);
    }

    pub fn zoom_radius(&mut self, delta: f64) {
        self.camera.zoom(delta);
    }

    pub fn zoom_fov(&mut self, delta_deg: f64) {
        self.projection.zoom_fov(delta_deg);
    }

    /// Wheel input: with the modifier held each notch changes the camera
    /// radius, otherwise the field of view.
    pub fn wheel(&mut self, notches: i32, modifier: bool) {
        let notches = f64::from(notches);
        if modifier {
            self.zoom_radius(notches * self.config.radius_step);
        } else {
            self.zoom_fov(notches * self.config.fov_step_deg);
        }
    }

    pub fn toggle_projection_mode(&mut self) -> ProjectionMode {
        let mode = self.projection.toggle_mode();
        debug!(?mode, "projection mode changed");
        mode
    }

    /// Identity model matrix, configured camera and projection, no axis and
    /// no spin. The spin speed is kept.
    pub fn reset(&mut self) {
        self.transform.reset();
        self.camera = self.config.camera();
        self.projection = self.config.projection();
        self.spin.stop();
        self.axis = None;
        debug!("scene reset");
    }

    /// Screen-space segments for the current state: one per model edge plus
    /// the three world axes. Has no side effects.
    pub fn render(&self, viewport_width: u32, viewport_height: u32) -> Frame {
        render_frame(
            &self.model,
            self.transform.matrix(),
            &self.camera,
            &self.projection,
            viewport_width,
            viewport_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::time::Duration;

    fn scene() -> Scene {
        Scene::new(WireModel::cube(1.0), SceneConfig::default())
    }

    #[test]
    fn test_set_axis_rejects_degenerate_points() {
        let mut scene = scene();
        let p = Vector3::new(0.5, 0.5, 0.5);
        assert!(matches!(
            scene.set_axis(p, p),
            Err(EngineError::InvalidAxis { .. })
        ));
        assert!(scene.axis().is_none());

        scene.set_axis(Vector3::ZERO, Vector3::UNIT_X).unwrap();
        let before = *scene.axis().unwrap();
        assert!(scene.set_axis(p, p).is_err());
        assert_eq!(scene.axis(), Some(&before));
    }

    #[test]
    fn test_set_axis_from_text_is_all_or_nothing() {
        let mut scene = scene();
        assert!(scene.set_axis_from_text("0 0 0", "1 nope 0").is_err());
        assert!(scene.set_axis_from_text("1,1,1", "1 1 1").is_err());
        assert!(scene.axis().is_none());

        scene.set_axis_from_text("0,0,0", "1 1 0").unwrap();
        assert_eq!(scene.axis().unwrap().p2(), Vector3::new(1.0, 1.0, 0.0));
        assert!(!scene.spin().is_spinning());
    }

    #[test]
    fn test_toggle_spin_requires_axis() {
        let t0 = Instant::now();
        let mut scene = scene();
        assert!(!scene.toggle_spin(t0));
        assert!(!scene.spin().is_spinning());

        scene.set_axis(Vector3::ZERO, Vector3::UNIT_Y).unwrap();
        assert!(scene.toggle_spin(t0));
        assert!(!scene.toggle_spin(t0));
    }

    #[test]
    fn test_principal_axis_selection_toggles_spin() {
        let t0 = Instant::now();
        let mut scene = scene();
        assert!(scene.select_principal_axis(Axis::X, t0));
        assert_eq!(scene.axis().unwrap().p2(), Vector3::new(100.0, 0.0, 0.0));
        // reselecting, even a different axis, follows the same rule
        assert!(!scene.select_principal_axis(Axis::Z, t0));
        assert_eq!(scene.axis().unwrap().p2(), Vector3::new(0.0, 0.0, 100.0));
        assert!(scene.select_principal_axis(Axis::Y, t0));
        // the speed is never touched by selection
        assert_eq!(scene.spin().speed_deg_per_sec(), 45.0);
    }

    #[test]
    fn test_tick_spins_model_about_axis() {
        let t0 = Instant::now();
        let mut scene = scene();
        scene.set_speed_deg_per_sec(90.0);
        scene.select_principal_axis(Axis::Y, t0);
        assert!(scene.tick(t0 + Duration::from_secs(1)));
        let p = scene.model_matrix().transform_point(Vector3::UNIT_X);
        assert!(p.approx_eq(Vector3::new(0.0, 0.0, -1.0), 1e-9));
    }

    #[test]
    fn test_tick_without_spin_leaves_model() {
        let t0 = Instant::now();
        let mut scene = scene();
        assert!(!scene.tick(t0));
        assert!(!scene.tick(t0 + Duration::from_secs(3)));
        assert_eq!(scene.model_matrix(), Matrix4::identity());
    }

    #[test]
    fn test_clear_axis_forces_idle() {
        let t0 = Instant::now();
        let mut scene = scene();
        scene.select_principal_axis(Axis::Z, t0);
        assert!(scene.spin().is_spinning());
        scene.clear_axis();
        assert!(scene.axis().is_none());
        assert!(!scene.spin().is_spinning());
        assert!(!scene.tick(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn test_nudge_needs_axis() {
        let mut scene = scene();
        assert!(!scene.nudge_around_axis(0.1));
        assert_eq!(scene.model_matrix(), Matrix4::identity());
        scene.set_axis(Vector3::ZERO, Vector3::UNIT_Z).unwrap();
        assert!(scene.nudge_around_axis(0.1));
        assert!(scene.model_matrix().approx_eq(&Matrix4::rotation_z(0.1), 1e-12));
    }

    #[test]
    fn test_non_finite_commands_keep_clamped_state() {
        let t0 = Instant::now();
        let mut scene = scene();
        scene.zoom_fov(f64::NAN);
        scene.zoom_fov(2.0);
        assert_eq!(scene.projection().fov_y_deg(), 62.0);

        let camera = *scene.camera();
        scene.orbit(f64::NAN, f64::INFINITY);
        scene.zoom_radius(f64::NAN);
        scene.drag(f64::NAN, 0.0);
        assert_eq!(*scene.camera(), camera);

        scene.set_axis(Vector3::ZERO, Vector3::UNIT_Y).unwrap();
        scene.set_speed_deg_per_sec(f64::NAN);
        assert_eq!(scene.spin().speed_deg_per_sec(), 45.0);
        scene.toggle_spin(t0);
        scene.tick(t0 + Duration::from_millis(16));
        assert!(scene.model_matrix().is_finite());
        let p = scene.model_matrix().transform_point(Vector3::UNIT_X);
        assert!(p.is_finite());
    }

    #[test]
    fn test_set_axis_rejects_non_finite_points() {
        let mut scene = scene();
        let nan = Vector3::new(f64::NAN, 0.0, 0.0);
        assert!(matches!(
            scene.set_axis(nan, nan),
            Err(EngineError::InvalidAxis { .. })
        ));
        assert!(scene
            .set_axis(Vector3::ZERO, Vector3::new(0.0, f64::INFINITY, 0.0))
            .is_err());
        assert!(scene.axis().is_none());
    }

    #[test]
    fn test_nudge_about_very_long_axis() {
        let mut scene = scene();
        scene.set_axis_from_text("0 0 0", "1e200 0 0").unwrap();
        assert!(scene.nudge_around_axis(std::f64::consts::FRAC_PI_2));
        let m = scene.model_matrix();
        let on_line = Vector3::new(3.0, 0.0, 0.0);
        assert!(m.transform_point(on_line).approx_eq(on_line, 1e-9));
        assert!(m
            .transform_point(Vector3::UNIT_Y)
            .approx_eq(Vector3::UNIT_Z, 1e-9));
    }

    #[test]
    fn test_wheel_routes_by_modifier() {
        let mut scene = scene();
        scene.wheel(2, false);
        assert_eq!(scene.projection().fov_y_deg(), 64.0);
        scene.wheel(-3, true);
        assert_eq!(scene.camera().radius(), 4.5);
    }

    #[test]
    fn test_drag_uses_configured_sensitivity() {
        let mut scene = scene();
        let yaw = scene.camera().yaw();
        scene.drag(100.0, 0.0);
        assert!((scene.camera().yaw() - (yaw - 0.8)).abs() < 1e-12);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let t0 = Instant::now();
        let mut scene = scene();
        scene.translate(1.0, 2.0, 3.0);
        scene.scale_uniform(2.0);
        scene.rotate_axis_aligned(Axis::X, 0.4);
        scene.orbit(1.0, -0.3);
        scene.zoom_radius(10.0);
        scene.zoom_fov(-30.0);
        scene.toggle_projection_mode();
        scene.select_principal_axis(Axis::Y, t0);
        scene.reverse_direction();

        scene.reset();

        let defaults = SceneConfig::default();
        assert_eq!(scene.model_matrix(), Matrix4::identity());
        assert_eq!(*scene.camera(), defaults.camera());
        assert_eq!(*scene.projection(), defaults.projection());
        assert_eq!(scene.projection().mode, ProjectionMode::Perspective);
        assert!(scene.axis().is_none());
        assert!(!scene.spin().is_spinning());
        assert_eq!(scene.spin().speed_deg_per_sec(), -45.0);
    }

    #[test]
    fn test_render_does_not_mutate() {
        let mut scene = scene();
        scene.rotate_axis_aligned(Axis::Y, 0.3);
        let first = scene.render(120, 80);
        let second = scene.render(120, 80);
        assert_eq!(first, second);
        assert_eq!(first.edges.len(), 12);
    }
}
