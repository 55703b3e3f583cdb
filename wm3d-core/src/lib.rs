/// WM3D Core Library - Watch-movement view state and camera motion
///
/// This library provides the renderer-agnostic core of the viewer: the
/// shared view-state store and its mutation operations, the camera
/// preset table and easing rig, projection math, and the procedural
/// geometry of the movement's six layers.

pub mod geometry;
pub mod movement;
pub mod presets;
pub mod projection;
pub mod rig;
pub mod state;
pub mod transform;

// Re-export commonly used types
pub use geometry::{Mesh, Triangle, Vertex};
pub use movement::{Layer, LayerAppearance, WatchMovement};
pub use presets::{CameraPreset, CameraView};
pub use projection::Camera;
pub use rig::CameraRig;
pub use state::{Fields, ViewState, ViewStore};
pub use transform::{SpinState, Transform};
