//! Affine3D core - transform and projection engine for wireframe models
//!
//! Keeps a model pose, an orbiting camera and projection parameters, and
//! turns model edges into 2D screen segments through the composed
//! model-view-projection transform. Front-ends drive it through [`Scene`].

pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod matrix;
pub mod parse;
pub mod projection;
pub mod scene;
pub mod spin;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use camera::OrbitCamera;
pub use config::SceneConfig;
pub use error::{EngineError, Result};
pub use geometry::{Edge, WireModel};
pub use matrix::Matrix4;
pub use parse::parse_point;
pub use projection::{AxisSegment, Frame, Projection, ProjectionMode, ScreenPoint, ScreenProjector, Segment};
pub use scene::Scene;
pub use spin::SpinState;
pub use transform::{Axis, AxisLine, ModelTransform};
pub use vector::Vector3;
