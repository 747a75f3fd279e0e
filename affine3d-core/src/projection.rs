//! Projection parameters and the model-view-projection pipeline that turns
//! wireframe edges into screen-space segments.

use crate::camera::OrbitCamera;
use crate::geometry::WireModel;
use crate::matrix::Matrix4;
use crate::transform::Axis;
use crate::vector::Vector3;

pub const MIN_FOV_DEG: f64 = 20.0;
pub const MAX_FOV_DEG: f64 = 100.0;
pub const DEFAULT_FOV_DEG: f64 = 60.0;
/// Length of each world-axis overlay segment.
pub const AXIS_OVERLAY_LENGTH: f64 = 2.0;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Field of view, clip planes and mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    pub mode: ProjectionMode,
}

impl Projection {
    /// A non-finite `fov_y_deg` falls back to [`DEFAULT_FOV_DEG`].
    pub fn new(fov_y_deg: f64, near: f64, far: f64) -> Self {
        let fov_y_deg = if fov_y_deg.is_finite() {
            fov_y_deg
        } else {
            DEFAULT_FOV_DEG
        };
        Self {
            fov_y_deg: fov_y_deg.clamp(MIN_FOV_DEG, MAX_FOV_DEG),
            near,
            far,
            mode: ProjectionMode::Perspective,
        }
    }

    pub fn fov_y_deg(&self) -> f64 {
        self.fov_y_deg
    }

    /// Ignores non-finite deltas.
    pub fn zoom_fov(&mut self, delta_deg: f64) {
        if !delta_deg.is_finite() {
            return;
        }
        self.fov_y_deg = (self.fov_y_deg + delta_deg).clamp(MIN_FOV_DEG, MAX_FOV_DEG);
    }

    pub fn toggle_mode(&mut self) -> ProjectionMode {
        self.mode = match self.mode {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        };
        self.mode
    }

    /// Projection matrix for the given aspect ratio.
    ///
    /// The orthographic box is sized to show what the perspective frustum
    /// shows at `focus_distance`, so switching modes keeps the framing.
    pub fn matrix(&self, aspect: f64, focus_distance: f64) -> Matrix4 {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::perspective(self.fov_y_deg, aspect, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = 2.0 * focus_distance * (self.fov_y_deg.to_radians() / 2.0).tan();
                let width = height * aspect;
                Matrix4::orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(DEFAULT_FOV_DEG, 0.1, 100.0)
    }
}

/// Create a model-view-projection matrix
pub fn mvp_matrix(model: Matrix4, view: Matrix4, projection: Matrix4) -> Matrix4 {
    projection.mul(view).mul(model)
}

/// A position in screen pixels, origin top-left, Y down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
}

/// A world-axis overlay segment, tagged with its axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSegment {
    pub axis: Axis,
    pub segment: Segment,
}

/// Everything a front-end needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// One segment per model edge, in edge order.
    pub edges: Vec<Segment>,
    /// X, Y and Z overlay segments from the world origin.
    pub axes: [AxisSegment; 3],
}

/// Maps world or model points through a clip-space transform to the viewport.
#[derive(Debug, Clone, Copy)]
pub struct ScreenProjector {
    transform: Matrix4,
    width: f64,
    height: f64,
}

impl ScreenProjector {
    pub fn new(transform: Matrix4, width: f64, height: f64) -> Self {
        Self {
            transform,
            width,
            height,
        }
    }

    /// Projects a point to the screen. A point with `w == 0` is divided by a
    /// tiny epsilon instead (see [`Matrix4::transform_point`]), so every input
    /// yields exactly one output.
    pub fn project(&self, v: Vector3) -> ScreenPoint {
        let ndc = self.transform.transform_point(v);
        ScreenPoint::new(
            (ndc.x * 0.5 + 0.5) * self.width,
            (1.0 - (ndc.y * 0.5 + 0.5)) * self.height,
        )
    }
}

/// Renders `model` posed by `model_matrix` as seen from `camera`.
pub fn render_frame(
    model: &WireModel,
    model_matrix: Matrix4,
    camera: &OrbitCamera,
    projection: &Projection,
    viewport_width: u32,
    viewport_height: u32,
) -> Frame {
    let (width, height) = (f64::from(viewport_width), f64::from(viewport_height));
    let aspect = width.max(1.0) / height.max(1.0);

    let view = camera.view_matrix();
    let proj = projection.matrix(aspect, camera.radius());

    let mvp = ScreenProjector::new(mvp_matrix(model_matrix, view, proj), width, height);
    let screen: Vec<ScreenPoint> = model.vertices().iter().map(|&v| mvp.project(v)).collect();
    let edges = model
        .edges()
        .iter()
        .map(|&[a, b]| Segment {
            from: screen[a],
            to: screen[b],
        })
        .collect();

    // world axes ignore the model matrix
    let vp = ScreenProjector::new(proj.mul(view), width, height);
    let origin = vp.project(Vector3::ZERO);
    let axes = Axis::ALL.map(|axis| AxisSegment {
        axis,
        segment: Segment {
            from: origin,
            to: vp.project(axis.unit() * AXIS_OVERLAY_LENGTH),
        },
    });

    Frame { edges, axes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fov_clamp_is_idempotent() {
        let mut projection = Projection::default();
        projection.zoom_fov(500.0);
        assert_eq!(projection.fov_y_deg(), MAX_FOV_DEG);
        projection.zoom_fov(2.0);
        assert_eq!(projection.fov_y_deg(), MAX_FOV_DEG);
        projection.zoom_fov(-500.0);
        assert_eq!(projection.fov_y_deg(), MIN_FOV_DEG);
        projection.zoom_fov(-2.0);
        assert_eq!(projection.fov_y_deg(), MIN_FOV_DEG);
    }

    #[test]
    fn test_non_finite_fov_input_is_ignored() {
        let mut projection = Projection::default();
        projection.zoom_fov(f64::NAN);
        projection.zoom_fov(f64::INFINITY);
        assert_eq!(projection.fov_y_deg(), DEFAULT_FOV_DEG);
        projection.zoom_fov(2.0);
        assert_eq!(projection.fov_y_deg(), 62.0);
        assert_eq!(Projection::new(f64::NAN, 0.1, 100.0).fov_y_deg(), DEFAULT_FOV_DEG);
    }

    #[test]
    fn test_toggle_mode() {
        let mut projection = Projection::default();
        assert_eq!(projection.mode, ProjectionMode::Perspective);
        assert_eq!(projection.toggle_mode(), ProjectionMode::Orthographic);
        assert_eq!(projection.toggle_mode(), ProjectionMode::Perspective);
    }

    #[test]
    fn test_projector_maps_ndc_corners() {
        let projector = ScreenProjector::new(Matrix4::identity(), 200.0, 100.0);
        assert_eq!(projector.project(Vector3::ZERO), ScreenPoint::new(100.0, 50.0));
        // NDC (-1, 1) is the top-left corner
        assert_eq!(
            projector.project(Vector3::new(-1.0, 1.0, 0.0)),
            ScreenPoint::new(0.0, 0.0)
        );
        assert_eq!(
            projector.project(Vector3::new(1.0, -1.0, 0.0)),
            ScreenPoint::new(200.0, 100.0)
        );
    }

    #[test]
    fn test_projector_survives_zero_w() {
        let proj = Matrix4::perspective(60.0, 1.0, 0.1, 100.0);
        let projector = ScreenProjector::new(proj, 100.0, 100.0);
        let p = projector.project(Vector3::new(1.0, 1.0, 0.0));
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn test_frame_has_one_segment_per_edge() {
        let cube = WireModel::cube(1.0);
        let camera = OrbitCamera::default();
        let frame = render_frame(&cube, Matrix4::identity(), &camera, &Projection::default(), 80, 60);
        assert_eq!(frame.edges.len(), cube.edges().len());
        assert_eq!(frame.axes.map(|a| a.axis), Axis::ALL);
    }

    #[test]
    fn test_vertex_at_the_eye_still_yields_a_segment() {
        // the eye sits on the view-space z = 0 plane, where w is zero or nearly so
        let camera = OrbitCamera::default();
        let model = WireModel::new(vec![Vector3::ZERO, camera.eye()], vec![[0, 1]]).unwrap();
        let frame = render_frame(&model, Matrix4::identity(), &camera, &Projection::default(), 100, 100);
        assert_eq!(frame.edges.len(), 1);
        let to = frame.edges[0].to;
        assert!(to.x.is_finite() && to.y.is_finite());
    }

    #[test]
    fn test_axes_ignore_model_matrix() {
        let cube = WireModel::cube(1.0);
        let camera = OrbitCamera::default();
        let projection = Projection::default();
        let still = render_frame(&cube, Matrix4::identity(), &camera, &projection, 100, 100);
        let moved = render_frame(
            &cube,
            Matrix4::translation(3.0, -1.0, 2.0).mul(Matrix4::rotation_y(1.0)),
            &camera,
            &projection,
            100,
            100,
        );
        assert_eq!(still.axes, moved.axes);
        assert_ne!(still.edges, moved.edges);
    }

    #[test]
    fn test_orthographic_frames_origin_at_center() {
        let mut projection = Projection::default();
        projection.toggle_mode();
        let camera = OrbitCamera::default();
        let frame = render_frame(&WireModel::cube(1.0), Matrix4::identity(), &camera, &projection, 100, 100);
        let origin = frame.axes[0].segment.from;
        assert!((origin.x - 50.0).abs() < 1e-6);
        assert!((origin.y - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_sized_viewport_is_finite() {
        let frame = render_frame(
            &WireModel::cube(1.0),
            Matrix4::identity(),
            &OrbitCamera::default(),
            &Projection::default(),
            0,
            0,
        );
        for s in &frame.edges {
            assert!(s.from.x.is_finite() && s.to.y.is_finite());
        }
    }
}
