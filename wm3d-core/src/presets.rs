/// Named camera viewpoints for the movement
use nalgebra::Point3;

/// The six selectable camera viewpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraView {
    Isometric,
    Top,
    Side,
    Escapement,
    GearTrain,
    Balance,
}

impl CameraView {
    pub const ALL: [CameraView; 6] = [
        CameraView::Isometric,
        CameraView::Top,
        CameraView::Side,
        CameraView::Escapement,
        CameraView::GearTrain,
        CameraView::Balance,
    ];

    /// The fixed {position, look-at} pair for this viewpoint
    pub fn preset(self) -> CameraPreset {
        match self {
            CameraView::Isometric => CameraPreset::new(4.2, 3.2, 4.2, 0.0, 0.0, 0.0),
            CameraView::Top => CameraPreset::new(0.0, 5.8, 0.9, 0.0, 0.0, 0.0),
            CameraView::Side => CameraPreset::new(6.2, 0.8, 0.0, 0.0, 0.2, 0.0),
            CameraView::Escapement => CameraPreset::new(2.4, 2.0, -2.6, 0.9, 0.2, -0.9),
            CameraView::GearTrain => CameraPreset::new(2.8, 3.0, 2.4, 0.4, 0.1, 0.6),
            CameraView::Balance => CameraPreset::new(-3.5, 2.8, 2.2, -0.6, 1.1, 0.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CameraView::Isometric => "isometric",
            CameraView::Top => "top",
            CameraView::Side => "side",
            CameraView::Escapement => "escapement",
            CameraView::GearTrain => "gear train",
            CameraView::Balance => "balance",
        }
    }
}

/// An immutable camera pose: where the camera sits and what it looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPreset {
    pub position: Point3<f32>,
    pub look_at: Point3<f32>,
}

impl CameraPreset {
    fn new(px: f32, py: f32, pz: f32, lx: f32, ly: f32, lz: f32) -> Self {
        Self {
            position: Point3::new(px, py, pz),
            look_at: Point3::new(lx, ly, lz),
        }
    }
}
