/// WM3D Terminal Viewer - Explorable mechanical watch movement
///
/// Renders the movement as ASCII with toggleable structural layers,
/// per-layer transparency, camera presets and an exploded view.
use clap::{Parser, ValueEnum};
use std::io;
use wm3d_core::{CameraView, ViewStore};
use wm3d_terminal::ViewerApp;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ViewArg {
    Isometric,
    Top,
    Side,
    Escapement,
    GearTrain,
    Balance,
}

impl From<ViewArg> for CameraView {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Isometric => CameraView::Isometric,
            ViewArg::Top => CameraView::Top,
            ViewArg::Side => CameraView::Side,
            ViewArg::Escapement => CameraView::Escapement,
            ViewArg::GearTrain => CameraView::GearTrain,
            ViewArg::Balance => CameraView::Balance,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "wm3d", about = "Interactive ASCII viewer for a mechanical watch movement")]
struct Args {
    /// Initial camera viewpoint
    #[arg(long, value_enum, default_value = "isometric")]
    view: ViewArg,

    /// Initial rotation speed (clamped to 0..=1.5)
    #[arg(long, default_value_t = 0.65)]
    speed: f32,

    /// Start in exploded view
    #[arg(long)]
    exploded: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // Seed the store through its own operations so clamping and the
    // camera-target derivation apply to CLI input too
    let mut store = ViewStore::new();
    store.set_camera_view(args.view.into());
    store.set_rotation_speed(args.speed);
    store.set_exploded(args.exploded);

    let mut app = ViewerApp::new(store)?;
    app.run()
}
