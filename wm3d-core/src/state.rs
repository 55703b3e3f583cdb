/// Shared view state and its mutation operations
///
/// A `ViewStore` is the single source of truth for every user-adjustable
/// display parameter. It is an explicitly constructed value (no global),
/// mutated only through the named operations below. Each operation
/// overwrites exactly the fields it owns, then synchronously notifies
/// every observer whose subscribed slice actually changed, before the
/// operation returns.
use crate::movement::Layer;
use crate::presets::{CameraPreset, CameraView};

/// Rotation speed is saturated into this range on every write
pub const ROTATION_SPEED_RANGE: (f32, f32) = (0.0, 1.5);

/// Bit mask selecting one or more top-level fields of `ViewState`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields(u8);

impl Fields {
    pub const NONE: Fields = Fields(0);
    pub const HIDDEN: Fields = Fields(1);
    pub const HIGHLIGHT: Fields = Fields(1 << 1);
    pub const EXPLODED: Fields = Fields(1 << 2);
    pub const ROTATION_SPEED: Fields = Fields(1 << 3);
    pub const CAMERA_VIEW: Fields = Fields(1 << 4);
    pub const CAMERA_TARGET: Fields = Fields(1 << 5);
    pub const OPACITY: Fields = Fields(1 << 6);
    pub const ALL: Fields = Fields(0x7f);

    pub fn with(self, other: Fields) -> Fields {
        Fields(self.0 | other.0)
    }

    pub fn intersects(self, other: Fields) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Every user-adjustable display parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Per-layer hidden flag, indexed by `Layer::index()`
    pub hidden: [bool; Layer::COUNT],
    /// At most one layer carries the transient highlight
    pub highlighted: Option<Layer>,
    /// Vertical-separation display mode
    pub exploded: bool,
    /// Movement spin speed, always within `ROTATION_SPEED_RANGE`
    pub rotation_speed: f32,
    /// Active camera preset selector
    pub camera_view: CameraView,
    /// Derived pose for `camera_view`; never set independently
    pub camera_target: CameraPreset,
    /// Per-layer opacity in [0, 1], indexed by `Layer::index()`
    pub opacity: [f32; Layer::COUNT],
}

impl ViewState {
    pub fn new() -> Self {
        let camera_view = CameraView::Isometric;
        Self {
            hidden: [false; Layer::COUNT],
            highlighted: None,
            exploded: false,
            rotation_speed: 0.65,
            camera_view,
            camera_target: camera_view.preset(),
            opacity: [1.0; Layer::COUNT],
        }
    }

    pub fn is_hidden(&self, layer: Layer) -> bool {
        self.hidden[layer.index()]
    }

    pub fn opacity_of(&self, layer: Layer) -> f32 {
        self.opacity[layer.index()]
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

struct Observer {
    fields: Fields,
    callback: Box<dyn FnMut(&ViewState)>,
}

/// The state container plus its observer registry
#[derive(Default)]
pub struct ViewStore {
    state: ViewState,
    observers: Vec<Observer>,
}

impl ViewStore {
    pub fn new() -> Self {
        Self {
            state: ViewState::new(),
            observers: Vec::new(),
        }
    }

    /// Start from a non-default state (CLI seeding, tests)
    pub fn with_state(state: ViewState) -> Self {
        Self {
            state,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Register a callback for the given field slice. The callback runs
    /// synchronously inside any operation that changes an intersecting
    /// field, and always observes the fully updated state.
    pub fn subscribe(&mut self, fields: Fields, callback: impl FnMut(&ViewState) + 'static) {
        self.observers.push(Observer {
            fields,
            callback: Box::new(callback),
        });
    }

    fn notify(&mut self, changed: Fields) {
        if changed.is_empty() {
            return;
        }
        // Observers only receive `&ViewState`, so the registry can be
        // parked while callbacks run; subscriptions made during
        // delivery are kept for the next notification.
        let mut observers = std::mem::take(&mut self.observers);
        for observer in observers.iter_mut() {
            if observer.fields.intersects(changed) {
                (observer.callback)(&self.state);
            }
        }
        observers.append(&mut self.observers);
        self.observers = observers;
    }

    /// Flip a layer's hidden flag. Hiding the highlighted layer clears
    /// the highlight; revealing never touches it.
    pub fn toggle_layer(&mut self, layer: Layer) {
        let idx = layer.index();
        self.state.hidden[idx] = !self.state.hidden[idx];
        let mut changed = Fields::HIDDEN;
        if self.state.hidden[idx] && self.state.highlighted == Some(layer) {
            self.state.highlighted = None;
            changed = changed.with(Fields::HIGHLIGHT);
        }
        log::trace!(
            "toggle_layer {}: hidden={}",
            layer.label(),
            self.state.hidden[idx]
        );
        self.notify(changed);
    }

    /// Isolate one layer: full overwrite of the hidden map, highlight set
    pub fn show_only_layer(&mut self, layer: Layer) {
        let mut hidden = [true; Layer::COUNT];
        hidden[layer.index()] = false;

        let mut changed = Fields::NONE;
        if self.state.hidden != hidden {
            self.state.hidden = hidden;
            changed = changed.with(Fields::HIDDEN);
        }
        if self.state.highlighted != Some(layer) {
            self.state.highlighted = Some(layer);
            changed = changed.with(Fields::HIGHLIGHT);
        }
        log::trace!("show_only_layer {}", layer.label());
        self.notify(changed);
    }

    /// Unconditional highlight overwrite (hover-style emphasis)
    pub fn set_highlighted_layer(&mut self, layer: Option<Layer>) {
        if self.state.highlighted == layer {
            return;
        }
        self.state.highlighted = layer;
        self.notify(Fields::HIGHLIGHT);
    }

    /// Make every layer visible and clear the highlight. Opacity and
    /// exploded state are untouched.
    pub fn reveal_all(&mut self) {
        let mut changed = Fields::NONE;
        if self.state.hidden != [false; Layer::COUNT] {
            self.state.hidden = [false; Layer::COUNT];
            changed = changed.with(Fields::HIDDEN);
        }
        if self.state.highlighted.is_some() {
            self.state.highlighted = None;
            changed = changed.with(Fields::HIGHLIGHT);
        }
        self.notify(changed);
    }

    pub fn set_exploded(&mut self, exploded: bool) {
        if self.state.exploded == exploded {
            return;
        }
        self.state.exploded = exploded;
        log::trace!("exploded={exploded}");
        self.notify(Fields::EXPLODED);
    }

    /// Saturating write; out-of-range values are clamped, never rejected
    pub fn set_rotation_speed(&mut self, speed: f32) {
        let (lo, hi) = ROTATION_SPEED_RANGE;
        let speed = speed.clamp(lo, hi);
        if self.state.rotation_speed == speed {
            return;
        }
        self.state.rotation_speed = speed;
        self.notify(Fields::ROTATION_SPEED);
    }

    /// Switch viewpoint; `camera_view` and `camera_target` change as one
    /// atomic update so no observer can see them out of sync
    pub fn set_camera_view(&mut self, view: CameraView) {
        if self.state.camera_view == view {
            return;
        }
        self.state.camera_view = view;
        self.state.camera_target = view.preset();
        log::trace!("camera view -> {}", view.label());
        self.notify(Fields::CAMERA_VIEW.with(Fields::CAMERA_TARGET));
    }

    /// Saturating per-layer opacity write; other layers untouched
    pub fn set_layer_opacity(&mut self, layer: Layer, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        let idx = layer.index();
        if self.state.opacity[idx] == opacity {
            return;
        }
        self.state.opacity[idx] = opacity;
        self.notify(Fields::OPACITY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_initial_state() {
        let state = ViewState::new();
        assert_eq!(state.hidden, [false; Layer::COUNT]);
        assert_eq!(state.highlighted, None);
        assert!(!state.exploded);
        assert!((state.rotation_speed - 0.65).abs() < 1e-6);
        assert_eq!(state.camera_view, CameraView::Isometric);
        assert_eq!(state.camera_target, CameraView::Isometric.preset());
        assert_eq!(state.opacity, [1.0; Layer::COUNT]);
    }

    #[test]
    fn test_toggle_layer_is_an_involution() {
        for layer in Layer::ALL {
            let mut store = ViewStore::new();
            let before = store.state().clone();
            store.toggle_layer(layer);
            assert!(store.state().is_hidden(layer));
            store.toggle_layer(layer);
            assert_eq!(*store.state(), before);
        }
    }

    #[test]
    fn test_toggle_clears_highlight_only_when_hiding() {
        let mut store = ViewStore::new();

        // Hiding an unhighlighted layer leaves the highlight alone
        store.toggle_layer(Layer::Balance);
        assert!(store.state().is_hidden(Layer::Balance));
        assert_eq!(store.state().highlighted, None);

        // Revealing a highlighted layer leaves the highlight alone
        store.set_highlighted_layer(Some(Layer::Balance));
        store.toggle_layer(Layer::Balance);
        assert!(!store.state().is_hidden(Layer::Balance));
        assert_eq!(store.state().highlighted, Some(Layer::Balance));

        // Hiding the highlighted layer clears the highlight
        store.toggle_layer(Layer::Balance);
        assert!(store.state().is_hidden(Layer::Balance));
        assert_eq!(store.state().highlighted, None);
    }

    #[test]
    fn test_show_only_layer_isolates() {
        let mut store = ViewStore::new();
        store.toggle_layer(Layer::Case);
        store.set_highlighted_layer(Some(Layer::Hands));

        store.show_only_layer(Layer::GearTrain);
        for layer in Layer::ALL {
            assert_eq!(store.state().is_hidden(layer), layer != Layer::GearTrain);
        }
        assert_eq!(store.state().highlighted, Some(Layer::GearTrain));
    }

    #[test]
    fn test_reveal_all_resets_visibility_only() {
        let mut store = ViewStore::new();
        store.show_only_layer(Layer::Balance);
        store.set_exploded(true);
        store.set_layer_opacity(Layer::Case, 0.3);

        store.reveal_all();
        assert_eq!(store.state().hidden, [false; Layer::COUNT]);
        assert_eq!(store.state().highlighted, None);
        // Exploded and opacity survive
        assert!(store.state().exploded);
        assert!((store.state().opacity_of(Layer::Case) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_speed_is_clamped() {
        let mut store = ViewStore::new();
        store.set_rotation_speed(-5.0);
        assert_eq!(store.state().rotation_speed, 0.0);
        store.set_rotation_speed(99.0);
        assert_eq!(store.state().rotation_speed, 1.5);
        store.set_rotation_speed(0.8);
        assert!((store.state().rotation_speed - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_opacity_is_clamped_per_layer() {
        let mut store = ViewStore::new();
        store.set_layer_opacity(Layer::Escapement, -0.5);
        assert_eq!(store.state().opacity_of(Layer::Escapement), 0.0);
        store.set_layer_opacity(Layer::Escapement, 2.0);
        assert_eq!(store.state().opacity_of(Layer::Escapement), 1.0);
        store.set_layer_opacity(Layer::Escapement, 0.25);
        for layer in Layer::ALL {
            let expected = if layer == Layer::Escapement { 0.25 } else { 1.0 };
            assert!((store.state().opacity_of(layer) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_camera_view_and_target_stay_in_sync() {
        let mut store = ViewStore::new();
        for view in CameraView::ALL {
            store.set_camera_view(view);
            assert_eq!(store.state().camera_view, view);
            assert_eq!(store.state().camera_target, view.preset());
        }
    }

    #[test]
    fn test_observer_sees_updated_state_synchronously() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = ViewStore::new();
        {
            let seen = Rc::clone(&seen);
            store.subscribe(Fields::ROTATION_SPEED, move |state| {
                seen.borrow_mut().push(state.rotation_speed);
            });
        }

        store.set_rotation_speed(1.2);
        // Delivered before the operation returned
        assert_eq!(*seen.borrow(), vec![1.2]);
    }

    #[test]
    fn test_observer_mask_filters_unrelated_changes() {
        let camera_fires = Rc::new(RefCell::new(0));
        let mut store = ViewStore::new();
        {
            let fires = Rc::clone(&camera_fires);
            store.subscribe(Fields::CAMERA_TARGET, move |_| {
                *fires.borrow_mut() += 1;
            });
        }

        store.set_layer_opacity(Layer::Case, 0.5);
        store.toggle_layer(Layer::Hands);
        assert_eq!(*camera_fires.borrow(), 0);

        store.set_camera_view(CameraView::Top);
        assert_eq!(*camera_fires.borrow(), 1);
    }

    #[test]
    fn test_no_notification_for_no_op_writes() {
        let fires = Rc::new(RefCell::new(0));
        let mut store = ViewStore::new();
        {
            let fires = Rc::clone(&fires);
            store.subscribe(Fields::ALL, move |_| {
                *fires.borrow_mut() += 1;
            });
        }

        store.set_exploded(false); // already false
        store.set_rotation_speed(0.65); // already 0.65
        store.set_camera_view(CameraView::Isometric); // already isometric
        store.reveal_all(); // nothing hidden, no highlight
        assert_eq!(*fires.borrow(), 0);
    }

    #[test]
    fn test_toggle_hiding_highlight_notifies_both_slices() {
        let highlight_fires = Rc::new(RefCell::new(0));
        let mut store = ViewStore::new();
        store.set_highlighted_layer(Some(Layer::Balance));
        {
            let fires = Rc::clone(&highlight_fires);
            store.subscribe(Fields::HIGHLIGHT, move |state| {
                assert_eq!(state.highlighted, None);
                *fires.borrow_mut() += 1;
            });
        }

        store.toggle_layer(Layer::Balance);
        assert_eq!(*highlight_fires.borrow(), 1);
    }
}
