//! Camera Module
//!
//! First-person camera behavior: mouse look, head-bob and FOV zoom.
//! This module is window-system agnostic; it writes to a [`CameraView`] the
//! host maps onto its real camera.

pub mod head_bob;
pub mod look;
pub mod rig;

pub use head_bob::HeadBob;
pub use look::{LookController, look_direction};
pub use rig::CameraRig;

/// Default vertical field of view in degrees
pub const DEFAULT_FOV: f32 = 60.0;

/// Default camera height above the body origin
pub const DEFAULT_EYE_HEIGHT: f32 = 0.6;

/// The camera properties the controller reads and writes.
pub trait CameraView {
    /// Vertical field of view, degrees
    fn field_of_view(&self) -> f32;
    fn set_field_of_view(&mut self, fov_degrees: f32);
    /// Local pitch, degrees, positive looks up
    fn local_pitch_degrees(&self) -> f32;
    fn set_local_pitch_degrees(&mut self, pitch_degrees: f32);
    /// Camera height relative to the body origin
    fn local_position_y(&self) -> f32;
    fn set_local_position_y(&mut self, y: f32);
}

/// Plain-data camera, for hosts that copy values out each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub field_of_view: f32,
    pub local_pitch_degrees: f32,
    pub local_position_y: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(DEFAULT_FOV, DEFAULT_EYE_HEIGHT)
    }
}

impl CameraState {
    pub fn new(field_of_view: f32, local_position_y: f32) -> Self {
        Self {
            field_of_view,
            local_pitch_degrees: 0.0,
            local_position_y,
        }
    }
}

impl CameraView for CameraState {
    fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    fn set_field_of_view(&mut self, fov_degrees: f32) {
        self.field_of_view = fov_degrees;
    }

    fn local_pitch_degrees(&self) -> f32 {
        self.local_pitch_degrees
    }

    fn set_local_pitch_degrees(&mut self, pitch_degrees: f32) {
        self.local_pitch_degrees = pitch_degrees;
    }

    fn local_position_y(&self) -> f32 {
        self.local_position_y
    }

    fn set_local_position_y(&mut self, y: f32) {
        self.local_position_y = y;
    }
}
