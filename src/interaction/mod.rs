use serde::{Deserialize, Serialize};

use crate::core::ViewTransform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
}

/// One event from the interactive surface's gesture stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    Started,
    /// Pointer moved with the accumulated pan/zoom transform for the gesture.
    Moved(ViewTransform),
    Ended,
}

/// Gesture-tracking state owned by the engine.
///
/// The transform recorded here is the live gesture transform; render policy
/// decides independently whether it survives past the current operation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    transform: ViewTransform,
}

impl Default for InteractionMode {
    fn default() -> Self {
        Self::Idle
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn transform(self) -> ViewTransform {
        self.transform
    }

    pub fn on_pan_start(&mut self) {
        self.mode = InteractionMode::Panning;
    }

    pub fn on_pan_move(&mut self, transform: ViewTransform) {
        self.transform = transform;
    }

    pub fn on_pan_end(&mut self) {
        self.mode = InteractionMode::Idle;
    }

    pub fn reset_transform(&mut self) {
        self.transform = ViewTransform::identity();
    }
}
