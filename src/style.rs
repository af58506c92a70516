use std::str::FromStr;

use serde::{Deserialize, Serialize};

const GREEN: [u8; 3] = [0, 255, 0];
const BLUE: [u8; 3] = [0, 0, 255];
const RED: [u8; 3] = [255, 0, 0];

fn default_color() -> [u8; 3] {
    GREEN
}
fn default_max_opacity() -> u8 {
    100
}
fn default_far() -> [u8; 3] {
    BLUE
}
fn default_near() -> [u8; 3] {
    RED
}
fn default_gradient_opacity() -> u8 {
    160
}

/// Visual encoding of depth. `weight` is `1 - depth / max_depth`, so the
/// deepest reading has weight 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MarkerStyle {
    /// Fixed color, opacity grows towards near readings
    Opacity {
        #[serde(default = "default_color")]
        color: [u8; 3],
        #[serde(default = "default_max_opacity")]
        max_opacity: u8,
    },
    /// Linear per-channel blend from `far` (weight 0) to `near` (weight 1)
    Gradient {
        #[serde(default = "default_far")]
        far: [u8; 3],
        #[serde(default = "default_near")]
        near: [u8; 3],
        #[serde(default = "default_gradient_opacity")]
        opacity: u8,
    },
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self::Opacity {
            color: default_color(),
            max_opacity: default_max_opacity(),
        }
    }
}

impl MarkerStyle {
    pub fn gradient() -> Self {
        Self::Gradient {
            far: default_far(),
            near: default_near(),
            opacity: default_gradient_opacity(),
        }
    }

    /// Returns (rgb, alpha) for a weight within [0, 1]
    pub fn visual(&self, weight: f32) -> ([u8; 3], u8) {
        let weight = weight.clamp(0., 1.);
        match *self {
            MarkerStyle::Opacity { color, max_opacity } => {
                (color, (weight * max_opacity as f32) as u8)
            }
            MarkerStyle::Gradient { far, near, opacity } => {
                let mut rgb = [0u8; 3];
                for (c, (f, n)) in rgb.iter_mut().zip(far.iter().zip(near.iter())) {
                    *c = (*f as f32 + (*n as f32 - *f as f32) * weight).round() as u8;
                }
                (rgb, opacity)
            }
        }
    }
}

impl FromStr for MarkerStyle {
    type Err = Box<dyn std::error::Error + Send + Sync>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "opacity" => Ok(Self::default()),
            "gradient" => Ok(Self::gradient()),
            s => Err(format!("Can't parse '{}' into MarkerStyle", s).into()),
        }
    }
}
