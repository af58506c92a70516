use std::{borrow::Cow, fmt::Debug, str::FromStr};

use serde::{Deserialize, Serialize};

/// How the LiDAR window covering the camera image is determined.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default)]
pub enum FovMode {
    /// Recompute the window from the forward sample, accounting for the longitudinal offset
    #[default]
    Reconciled,
    /// Degraded: assume the LiDAR sees exactly the camera's horizontal FOV
    CameraEqual,
}

impl Serialize for FovMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(match self {
            FovMode::Reconciled => "reconciled",
            FovMode::CameraEqual => "camera-equal",
        })
    }
}

impl<'de> Deserialize<'de> for FovMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let x = Cow::<str>::deserialize(deserializer)?;
        Self::from_str(&x).map_err(<D::Error as serde::de::Error>::custom)
    }
}

impl FromStr for FovMode {
    type Err = Box<dyn std::error::Error + Send + Sync>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reconciled" => Ok(Self::Reconciled),
            "camera-equal" => Ok(Self::CameraEqual),
            s => Err(format!("Can't parse '{}' into FovMode", s).into()),
        }
    }
}
