/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::presets::CameraPreset;

/// Perspective camera; its pose is driven by the camera rig each frame
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(4.2, 3.2, 4.2),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Start on a preset pose (used before the rig's first frame)
    pub fn from_preset(preset: CameraPreset, width: u32, height: u32) -> Self {
        let mut camera = Self::new(width, height);
        camera.set_pose(preset.position, preset.look_at);
        camera
    }

    /// Overwrite the camera pose (called once per frame by the rig)
    pub fn set_pose(&mut self, position: Point3<f32>, target: Point3<f32>) {
        self.position = position;
        self.target = target;
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a 3D point to 2D screen space
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let view = self.view_matrix();
        let projection = self.projection_matrix();
        let mvp = projection * view * model_matrix;

        // Transform to clip space
        let clip = mvp.transform_point(point);

        // Prevent division by near-zero depth values
        if clip.z.abs() < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.z;
        let ndc_y = clip.y / clip.z;
        let depth = clip.z;

        // Clip test
        if !(-1.0..=1.0).contains(&ndc_x) || !(-1.0..=1.0).contains(&ndc_y) {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::CameraView;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_camera_from_preset() {
        let preset = CameraView::Balance.preset();
        let camera = Camera::from_preset(preset, 120, 40);
        assert_eq!(camera.position, preset.position);
        assert_eq!(camera.target, preset.look_at);
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix();
        // View matrix should be non-zero
        assert!(view.norm() > 0.0);
    }

    #[test]
    fn test_projects_the_look_at_point_to_screen_center() {
        let camera = Camera::from_preset(CameraView::Isometric.preset(), 200, 100);
        let (x, y, _depth) = camera
            .project_to_screen(&Point3::new(0.0, 0.0, 0.0), &Matrix4::identity(), 200, 100)
            .expect("look-at point must be on screen");
        assert!((x - 100.0).abs() < 1.0);
        assert!((y - 50.0).abs() < 1.0);
    }
}
