use serde::{Deserialize, Serialize};

use crate::InvalidConfig;

/// Fixed offset of the LiDAR relative to the camera (yaw-only mount).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountOffset {
    /// Height of the LiDAR above the camera
    pub vertical_mm: f32,
    /// Signed, negative if the LiDAR sits behind the camera
    pub longitudinal_mm: f32,
}

impl Default for MountOffset {
    fn default() -> Self {
        Self {
            vertical_mm: 45.,
            longitudinal_mm: -120.,
        }
    }
}

impl MountOffset {
    pub fn validate(self) -> Result<Self, InvalidConfig> {
        if !self.vertical_mm.is_finite() || !self.longitudinal_mm.is_finite() {
            return Err(InvalidConfig::new(format!(
                "Mount offsets have to be finite, got {self:?}"
            )));
        }
        Ok(self)
    }
}
