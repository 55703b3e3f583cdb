/// Watch movement layers: procedural assembly and derived appearance
use nalgebra::Vector3;

use crate::geometry::Mesh;
use crate::state::ViewState;

/// Vertical separation per stacking step in the exploded view
pub const EXPLODE_STEP: f32 = 0.55;

/// The six structural layers of the movement, bottom of the stack first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Case,
    BasePlate,
    GearTrain,
    Escapement,
    Balance,
    Hands,
}

impl Layer {
    pub const COUNT: usize = 6;

    pub const ALL: [Layer; Layer::COUNT] = [
        Layer::Case,
        Layer::BasePlate,
        Layer::GearTrain,
        Layer::Escapement,
        Layer::Balance,
        Layer::Hands,
    ];

    /// Stacking order, used both for array indexing and exploded lifts
    pub fn index(self) -> usize {
        match self {
            Layer::Case => 0,
            Layer::BasePlate => 1,
            Layer::GearTrain => 2,
            Layer::Escapement => 3,
            Layer::Balance => 4,
            Layer::Hands => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Layer::Case => "case",
            Layer::BasePlate => "base plate",
            Layer::GearTrain => "gear train",
            Layer::Escapement => "escapement",
            Layer::Balance => "balance",
            Layer::Hands => "hands",
        }
    }
}

/// Vertical offset a layer receives in the exploded view, proportional
/// to its position in the stack
pub fn exploded_lift(layer: Layer, exploded: bool) -> f32 {
    if exploded {
        layer.index() as f32 * EXPLODE_STEP
    } else {
        0.0
    }
}

/// How a layer should be drawn this frame, derived from the view state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerAppearance {
    pub visible: bool,
    pub opacity: f32,
    pub highlighted: bool,
    pub lift: f32,
}

impl LayerAppearance {
    /// Pure derivation from the relevant state slice; called after each
    /// store notification (or once per frame) by rendering code
    pub fn derive(layer: Layer, state: &ViewState) -> Self {
        Self {
            visible: !state.hidden[layer.index()],
            opacity: state.opacity[layer.index()],
            highlighted: state.highlighted == Some(layer),
            lift: exploded_lift(layer, state.exploded),
        }
    }
}

/// The assembled movement: one mesh per layer, in assembly coordinates
pub struct WatchMovement {
    meshes: [Mesh; Layer::COUNT],
}

impl WatchMovement {
    /// Build the full movement. Deterministic; all dimensions fixed.
    pub fn build() -> Self {
        let meshes = [
            build_case(),
            build_base_plate(),
            build_gear_train(),
            build_escapement(),
            build_balance(),
            build_hands(),
        ];
        log::debug!(
            "movement built: {} triangles",
            meshes.iter().map(|m| m.triangles.len()).sum::<usize>()
        );
        Self { meshes }
    }

    pub fn mesh(&self, layer: Layer) -> &Mesh {
        &self.meshes[layer.index()]
    }
}

fn build_case() -> Mesh {
    // Case middle plus a thin back disc
    let mut mesh = Mesh::ring(2.2, 2.0, 0.6, 32);
    mesh.merge(Mesh::disc(2.15, 0.08, 32).translated(Vector3::new(0.0, -0.34, 0.0)));
    mesh
}

fn build_base_plate() -> Mesh {
    let mut mesh = Mesh::disc(1.9, 0.12, 32).translated(Vector3::new(0.0, -0.22, 0.0));
    // Barrel bridge hinted as a flat bar across the plate
    mesh.merge(Mesh::bar(2.6, 0.06, 0.5).translated(Vector3::new(-0.3, -0.13, -0.6)));
    mesh
}

fn build_gear_train() -> Mesh {
    let mut mesh = Mesh::gear(0.85, 12, 0.1);
    mesh.merge(Mesh::gear(0.55, 10, 0.1).translated(Vector3::new(0.9, 0.06, 0.35)));
    mesh.merge(Mesh::gear(0.42, 8, 0.08).translated(Vector3::new(0.4, 0.12, 1.0)));
    // Arbors
    mesh.merge(Mesh::disc(0.06, 0.3, 8));
    mesh.merge(Mesh::disc(0.05, 0.26, 8).translated(Vector3::new(0.9, 0.06, 0.35)));
    mesh
}

fn build_escapement() -> Mesh {
    let anchor = Vector3::new(0.9, 0.2, -0.9);
    let mut mesh = Mesh::gear(0.32, 15, 0.07).translated(anchor);
    // Pallet lever reaching toward the balance
    mesh.merge(Mesh::bar(0.9, 0.05, 0.1).translated(anchor + Vector3::new(-0.55, 0.06, 0.15)));
    mesh
}

fn build_balance() -> Mesh {
    let hub = Vector3::new(-0.6, 0.35, 0.0);
    let mut mesh = Mesh::ring(0.55, 0.45, 0.1, 24).translated(hub);
    // Spokes and the hairspring collet
    mesh.merge(Mesh::bar(1.0, 0.04, 0.06).translated(hub));
    mesh.merge(Mesh::bar(0.06, 0.04, 1.0).translated(hub));
    mesh.merge(Mesh::disc(0.12, 0.08, 12).translated(hub + Vector3::new(0.0, 0.08, 0.0)));
    mesh
}

fn build_hands() -> Mesh {
    // Minute hand along +Z, hour hand along +X, stacked above the dial
    let mut mesh = Mesh::bar(0.08, 0.04, 1.7).translated(Vector3::new(0.0, 0.48, 0.75));
    mesh.merge(Mesh::bar(1.1, 0.04, 0.1).translated(Vector3::new(0.45, 0.54, 0.0)));
    mesh.merge(Mesh::disc(0.1, 0.1, 12).translated(Vector3::new(0.0, 0.5, 0.0)));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ViewStore;

    #[test]
    fn test_layer_indices_are_stable() {
        for (i, layer) in Layer::ALL.iter().enumerate() {
            assert_eq!(layer.index(), i);
        }
    }

    #[test]
    fn test_exploded_lift_proportional_to_order() {
        assert_eq!(exploded_lift(Layer::Case, true), 0.0);
        assert_eq!(exploded_lift(Layer::Hands, true), 5.0 * EXPLODE_STEP);
        for layer in Layer::ALL {
            assert_eq!(exploded_lift(layer, false), 0.0);
            assert_eq!(
                exploded_lift(layer, true),
                layer.index() as f32 * EXPLODE_STEP
            );
        }
    }

    #[test]
    fn test_every_layer_has_geometry() {
        let movement = WatchMovement::build();
        for layer in Layer::ALL {
            assert!(
                !movement.mesh(layer).triangles.is_empty(),
                "{} has no triangles",
                layer.label()
            );
        }
    }

    #[test]
    fn test_appearance_tracks_state() {
        let mut store = ViewStore::new();
        store.toggle_layer(Layer::Balance);
        store.set_layer_opacity(Layer::GearTrain, 0.4);
        store.set_highlighted_layer(Some(Layer::Hands));
        store.set_exploded(true);

        let balance = LayerAppearance::derive(Layer::Balance, store.state());
        assert!(!balance.visible);

        let gears = LayerAppearance::derive(Layer::GearTrain, store.state());
        assert!(gears.visible);
        assert!((gears.opacity - 0.4).abs() < 1e-6);
        assert!(!gears.highlighted);
        assert!((gears.lift - 2.0 * EXPLODE_STEP).abs() < 1e-6);

        let hands = LayerAppearance::derive(Layer::Hands, store.state());
        assert!(hands.highlighted);
    }
}
