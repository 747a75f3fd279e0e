//! Scene configuration.
//!
//! Loads starting values and input step sizes from JSON strings (file IO left
//! to the front-end). Missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::camera::{
    OrbitCamera, DEFAULT_DRAG_SENSITIVITY, DEFAULT_PITCH_DEG, DEFAULT_RADIUS, DEFAULT_YAW_DEG,
};
use crate::projection::{Projection, DEFAULT_FOV_DEG};
use crate::spin::{SpinState, DEFAULT_SPEED_DEG_PER_SEC};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Camera distance from the origin, clamped to [1, 50].
    pub camera_radius: f64,
    pub camera_yaw_deg: f64,
    /// Clamped to ±89°.
    pub camera_pitch_deg: f64,
    /// Vertical field of view, clamped to [20, 100].
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    /// Initial spin speed; the sign is the direction.
    pub spin_speed_deg_per_sec: f64,
    /// Radians of orbit per pixel of drag.
    pub drag_sensitivity: f64,
    /// Radius change per wheel notch (with modifier).
    pub radius_step: f64,
    /// Field-of-view change per wheel notch.
    pub fov_step_deg: f64,
    pub translate_step: f64,
    pub rotate_step_deg: f64,
    pub scale_step: f64,
    /// Rotation per discrete step around the rotation axis.
    pub nudge_step_deg: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera_radius: DEFAULT_RADIUS,
            camera_yaw_deg: DEFAULT_YAW_DEG,
            camera_pitch_deg: DEFAULT_PITCH_DEG,
            fov_deg: DEFAULT_FOV_DEG,
            near: 0.1,
            far: 100.0,
            spin_speed_deg_per_sec: DEFAULT_SPEED_DEG_PER_SEC,
            drag_sensitivity: DEFAULT_DRAG_SENSITIVITY,
            radius_step: 0.5,
            fov_step_deg: 2.0,
            translate_step: 0.1,
            rotate_step_deg: 5.0,
            scale_step: 1.05,
            nudge_step_deg: 1.0,
        }
    }
}

impl SceneConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn camera(&self) -> OrbitCamera {
        OrbitCamera::from_degrees(self.camera_radius, self.camera_yaw_deg, self.camera_pitch_deg)
    }

    pub fn projection(&self) -> Projection {
        Projection::new(self.fov_deg, self.near, self.far)
    }

    pub fn spin(&self) -> SpinState {
        SpinState::new(self.spin_speed_deg_per_sec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let cfg = SceneConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, SceneConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let cfg = SceneConfig::from_json_str(r#"{ "fov_deg": 90, "camera_radius": 10.5 }"#).unwrap();
        assert_eq!(cfg.fov_deg, 90.0);
        assert_eq!(cfg.camera_radius, 10.5);
        assert_eq!(cfg.near, 0.1);
    }

    #[test]
    fn test_out_of_range_values_are_clamped_when_used() {
        let cfg = SceneConfig::from_json_str(
            r#"{ "fov_deg": 170, "camera_radius": 0, "spin_speed_deg_per_sec": -900 }"#,
        )
        .unwrap();
        assert_eq!(cfg.projection().fov_y_deg(), 100.0);
        assert_eq!(cfg.camera().radius(), 1.0);
        assert_eq!(cfg.spin().speed_deg_per_sec(), -180.0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(SceneConfig::from_json_str(r#"{ "fov_deg": "wide" }"#).is_err());
    }

    #[test]
    fn test_round_trip_through_json() {
        let cfg = SceneConfig {
            scale_step: 1.25,
            ..SceneConfig::default()
        };
        let text = serde_json::to_string(&cfg).unwrap();
        assert_eq!(SceneConfig::from_json_str(&text).unwrap(), cfg);
    }
}
