/// Model transforms: movement spin and per-layer exploded lifts
use nalgebra::{Matrix4, Vector3};
use std::f32::consts::TAU;

/// Radians per second at rotation speed 1.0
pub const SPIN_RATE: f32 = 0.8;

/// Accumulated rotation of the movement around the vertical axis
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinState {
    pub angle: f32,
}

impl SpinState {
    pub fn new() -> Self {
        Self { angle: 0.0 }
    }

    /// Advance by one frame; `speed` is the store's rotation speed
    pub fn advance(&mut self, dt: f32, speed: f32) {
        self.angle = (self.angle + dt * speed * SPIN_RATE) % TAU;
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation around the vertical (Y) axis
    pub fn rotation_y(angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, angle, 0.0))
    }

    /// Create a translation matrix
    pub fn translation(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Per-layer model matrix: spin first, then the vertical lift, so
    /// exploded offsets stay vertical regardless of spin
    pub fn layer_matrix(spin: f32, lift: f32) -> Matrix4<f32> {
        Self::translation(0.0, lift, 0.0) * Self::rotation_y(spin)
    }
}
