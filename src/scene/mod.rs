//! Scene state for the placed model and the gesture-to-transform mapping.

mod gesture;

use serde::{Deserialize, Serialize};

use crate::catalog::ModelSummary;
use crate::config::SceneDefaults;
use crate::defaults;

pub use gesture::{GestureEvent, GestureState};

/// Which asset the AR surface should display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "uri", rename_all = "lowercase")]
pub enum AssetRef {
    /// Asset bundled with the app
    Builtin(String),
    /// Downloadable asset from the catalog
    Remote(String),
}

impl AssetRef {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Builtin(s) | Self::Remote(s) => s,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

/// The currently displayed object and its transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveObject {
    pub asset: AssetRef,
    pub position: [f32; 3],
    /// Euler angles in degrees
    pub rotation: [f32; 3],
    /// Uniform scale
    pub scale: f32,
}

impl ActiveObject {
    /// Scale as the per-axis vector the AR surface expects.
    pub fn scale_vector(&self) -> [f32; 3] {
        [self.scale; 3]
    }
}

/// Scene state mutated by gesture callbacks.
///
/// Nothing here is ever reset; state lives as long as the scene.
#[derive(Debug, Clone)]
pub struct Scene {
    object: ActiveObject,
    label: String,
    label_position: [f32; 3],
    rotation_sensitivity: f32,
}

impl Scene {
    pub fn new(defaults: SceneDefaults, rotation_sensitivity: f32) -> Self {
        Self {
            object: ActiveObject {
                asset: defaults.asset,
                position: defaults.position,
                rotation: defaults.rotation,
                scale: defaults.scale,
            },
            label: defaults.label,
            label_position: defaults.label_position,
            rotation_sensitivity,
        }
    }

    pub fn object(&self) -> &ActiveObject {
        &self.object
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn label_position(&self) -> [f32; 3] {
        self.label_position
    }

    /// Dispatch one gesture callback.
    pub fn apply(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Drag { position } => self.on_drag(position),
            GestureEvent::Pinch { state, factor } => self.on_pinch(state, factor),
            GestureEvent::Rotate { state, delta } => self.on_rotate(state, delta),
        }
    }

    /// Move the object to the position reported by the drag callback.
    pub fn on_drag(&mut self, position: [f32; 3]) {
        self.object.position = position;
    }

    /// On gesture end, multiply scale by `factor` and clamp to the allowed range.
    pub fn on_pinch(&mut self, state: GestureState, factor: f32) {
        if !state.is_terminal() {
            return;
        }
        self.object.scale = pinch_scale(self.object.scale, factor);
        log::debug!("Pinch ended, scale now {}", self.object.scale);
    }

    /// On gesture end, add `delta` (times sensitivity) to the Y rotation.
    pub fn on_rotate(&mut self, state: GestureState, delta: f32) {
        if !state.is_terminal() {
            return;
        }
        self.object.rotation[1] += delta * self.rotation_sensitivity;
        log::debug!("Rotate ended, yaw now {}", self.object.rotation[1]);
    }

    /// Display a catalog result. The download URI is used unchanged.
    pub fn select(&mut self, model: &ModelSummary) {
        log::info!("Selected model {} ({})", model.id, model.title);
        self.object.asset = AssetRef::Remote(model.download.clone());
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneDefaults::default(), defaults::ROTATION_SENSITIVITY)
    }
}

/// New uniform scale after a completed pinch.
pub fn pinch_scale(current: f32, factor: f32) -> f32 {
    let scaled = current * factor;
    if scaled.is_nan() {
        return current;
    }
    scaled.clamp(defaults::MIN_SCALE, defaults::MAX_SCALE)
}
