use serde::{Deserialize, Serialize};

use crate::InvalidConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfigRaw {
    pub horizontal_fov_deg: f32,
    pub vertical_fov_deg: f32,
    pub horizontal_resolution_px: u32,
    pub vertical_resolution_px: u32,
    pub focal_length_mm: f32,
    /// Pixel row of the calibrated vertical centre point
    pub vertical_centre_px: f32,
    /// Real-world height in mm which corresponds to `vertical_centre_px`
    pub vertical_centre_mm: f32,
}

impl Default for CameraConfigRaw {
    fn default() -> Self {
        Self {
            horizontal_fov_deg: 86.,
            vertical_fov_deg: 55.,
            horizontal_resolution_px: 640,
            vertical_resolution_px: 480,
            focal_length_mm: 3.6,
            vertical_centre_px: 240.,
            vertical_centre_mm: 130.,
        }
    }
}

/// Camera intrinsics as far as the overlay needs them. Can only be built from
/// a [`CameraConfigRaw`] which passed validation.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig(CameraConfigRaw);

impl Default for CameraConfig {
    fn default() -> Self {
        Self(CameraConfigRaw::default())
    }
}

impl std::ops::Deref for CameraConfig {
    type Target = CameraConfigRaw;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for CameraConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let inner = CameraConfigRaw::deserialize(deserializer)?;
        inner
            .try_into()
            .map_err(<D::Error as serde::de::Error>::custom)
    }
}

impl From<CameraConfig> for CameraConfigRaw {
    fn from(value: CameraConfig) -> Self {
        value.0
    }
}

impl TryFrom<CameraConfigRaw> for CameraConfig {
    type Error = InvalidConfig;

    fn try_from(value: CameraConfigRaw) -> Result<Self, Self::Error> {
        for (name, fov) in [
            ("horizontal_fov_deg", value.horizontal_fov_deg),
            ("vertical_fov_deg", value.vertical_fov_deg),
        ] {
            if !(fov > 0. && fov < 180.) {
                return Err(InvalidConfig::new(format!(
                    "{name} has to be within (0, 180), got {fov}"
                )));
            }
        }
        if value.horizontal_resolution_px == 0 || value.vertical_resolution_px == 0 {
            return Err(InvalidConfig::new(format!(
                "Resolution musn't be empty, got {}x{}",
                value.horizontal_resolution_px, value.vertical_resolution_px
            )));
        }
        if !(value.focal_length_mm > 0.) {
            return Err(InvalidConfig::new(format!(
                "Expected positive focal_length_mm, got {}",
                value.focal_length_mm
            )));
        }
        if !(value.vertical_centre_mm > 0.) || !(value.vertical_centre_px > 0.) {
            return Err(InvalidConfig::new(format!(
                "Vertical centre calibration has to be positive, got {}px <-> {}mm",
                value.vertical_centre_px, value.vertical_centre_mm
            )));
        }
        Ok(CameraConfig(value))
    }
}

impl CameraConfig {
    pub fn vertical_px_per_mm(&self) -> f32 {
        self.vertical_centre_px / self.vertical_centre_mm
    }

    /// Rescales resolution and the calibrated centre row to an image of `width` x `height`.
    pub fn fit_to_image(&self, width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return *self;
        }
        let scale_y = height as f32 / self.vertical_resolution_px as f32;
        Self(CameraConfigRaw {
            horizontal_resolution_px: width,
            vertical_resolution_px: height,
            vertical_centre_px: self.vertical_centre_px * scale_y,
            ..self.0
        })
    }
}
