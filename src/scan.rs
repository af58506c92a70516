use std::collections::BTreeMap;

use serde::Deserialize;

/// One LiDAR reading. Angles are in degrees, clockwise from the sensor's forward axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub angle_deg: f32,
    /// 0 means "no return"
    pub distance_mm: f32,
}

/// A single 360° sweep, ordered by ascending angle.
///
/// Malformed readings are dropped while building the scan and only counted, a
/// bad reading never invalidates the whole sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scan {
    samples: Vec<RawSample>,
    skipped: usize,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MalformedSample {
    #[error("Angle '{0}' is not a number")]
    UnparsableAngle(String),
    #[error("Angle {0} is outside of [0, 360)")]
    AngleOutOfRange(f32),
    #[error("Distance {distance} at angle {angle} is negative or not finite")]
    InvalidDistance { angle: f32, distance: f32 },
}

impl RawSample {
    pub fn new(angle_deg: f32, distance_mm: f32) -> Result<Self, MalformedSample> {
        if !(0. ..360.).contains(&angle_deg) {
            return Err(MalformedSample::AngleOutOfRange(angle_deg));
        }
        if !distance_mm.is_finite() || distance_mm < 0. {
            return Err(MalformedSample::InvalidDistance {
                angle: angle_deg,
                distance: distance_mm,
            });
        }
        Ok(Self {
            angle_deg,
            distance_mm,
        })
    }
}

impl Scan {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f32, f32)>) -> Self {
        Self::collect(
            pairs
                .into_iter()
                .map(|(angle, distance)| RawSample::new(angle, distance)),
        )
    }

    /// Angles as they appear in data files, e.g. `"359.5"`
    pub fn from_keyed<K: AsRef<str>>(pairs: impl IntoIterator<Item = (K, f32)>) -> Self {
        Self::collect(pairs.into_iter().map(|(key, distance)| {
            let key = key.as_ref();
            let angle = key
                .trim()
                .parse::<f32>()
                .map_err(|_| MalformedSample::UnparsableAngle(key.to_owned()))?;
            RawSample::new(angle, distance)
        }))
    }

    fn collect(samples: impl Iterator<Item = Result<RawSample, MalformedSample>>) -> Self {
        let mut skipped = 0;
        let mut samples = samples
            .filter_map(|sample| {
                sample
                    .map_err(|e| {
                        log::warn!("Skip sample: {e}");
                        skipped += 1;
                    })
                    .ok()
            })
            .collect::<Vec<_>>();
        samples.sort_by(|a, b| a.angle_deg.total_cmp(&b.angle_deg));
        Self { samples, skipped }
    }

    pub fn samples(&self) -> &[RawSample] {
        &self.samples
    }

    /// Number of readings which were rejected as malformed
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Distance reported along the sensor's forward axis (angle 0), if present
    pub fn forward_distance(&self) -> Option<f32> {
        self.samples
            .iter()
            .find(|s| s.angle_deg == 0.)
            .map(|s| s.distance_mm)
    }
}

impl<'de> Deserialize<'de> for Scan {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = BTreeMap::<String, f32>::deserialize(deserializer)?;
        Ok(Self::from_keyed(raw))
    }
}
