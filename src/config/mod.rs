use serde::{Deserialize, Serialize};

use crate::MarkerStyle;

mod camera;
mod fov_mode;
mod mount_offset;

pub use camera::*;
pub use fov_mode::*;
pub use mount_offset::*;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfigRaw {
    pub camera: CameraConfig,
    pub mount: MountOffset,
    pub fov_mode: FovMode,
    pub style: MarkerStyle,
}

/// Everything which is constant for a camera/LiDAR rig.
/// Mustn't contain contradicting information (e.g. non-finite offsets)
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RigConfig(RigConfigRaw);

impl std::ops::Deref for RigConfig {
    type Target = RigConfigRaw;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for RigConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let inner = RigConfigRaw::deserialize(deserializer)?;
        inner
            .try_into()
            .map_err(<D::Error as serde::de::Error>::custom)
    }
}

impl TryFrom<RigConfigRaw> for RigConfig {
    type Error = InvalidConfig;

    fn try_from(value: RigConfigRaw) -> Result<Self, Self::Error> {
        Ok(Self(RigConfigRaw {
            mount: value.mount.validate()?,
            ..value
        }))
    }
}

impl RigConfig {
    pub fn with_fov_mode(self, fov_mode: FovMode) -> Self {
        Self(RigConfigRaw { fov_mode, ..self.0 })
    }

    pub fn with_style(self, style: MarkerStyle) -> Self {
        Self(RigConfigRaw { style, ..self.0 })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{reason}")]
pub struct InvalidConfig {
    reason: String,
}

impl InvalidConfig {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default_rig() {
        let rig: RigConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(RigConfig::default(), rig);
        assert_eq!(FovMode::Reconciled, rig.fov_mode);
        assert_eq!(-120., rig.mount.longitudinal_mm);
    }

    #[test]
    fn nested_overrides() {
        let rig: RigConfig = serde_json::from_str(
            r#"{
                "camera": {"horizontal_resolution_px": 1280},
                "mount": {"vertical_mm": 55.0},
                "fov_mode": "camera-equal",
                "style": {"kind": "gradient"}
            }"#,
        )
        .unwrap();
        assert_eq!(1280, rig.camera.horizontal_resolution_px);
        assert_eq!(55., rig.mount.vertical_mm);
        assert_eq!(-120., rig.mount.longitudinal_mm);
        assert_eq!(FovMode::CameraEqual, rig.fov_mode);
        assert!(matches!(rig.style, MarkerStyle::Gradient { .. }));
    }

    #[test]
    fn invalid_camera_is_reported() {
        let err = serde_json::from_str::<RigConfig>(r#"{"camera": {"vertical_fov_deg": 0.0}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("vertical_fov_deg"), "{err}");
    }
}
