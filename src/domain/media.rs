use serde::{Deserialize, Serialize};

/// Density of air, the medium every body starts in.
pub const AIR_DENSITY: f32 = 1.225;

/// Quick drag a medium volume imposes unless configured otherwise.
pub const DEFAULT_VOLUME_QUICK_DRAG: f32 = 0.8;

/// Media a body can move through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medium {
    Vacuum,
    Air,
    Water,
}

impl Medium {
    pub fn density(self) -> f32 {
        match self {
            Medium::Vacuum => 0.0,
            Medium::Air => AIR_DENSITY,
            Medium::Water => 15.0,
        }
    }
}

/// A trigger volume that temporarily replaces a body's fluid density and quick drag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediumVolume {
    pub density: f32,
    pub quick_drag: f32,
}

impl MediumVolume {
    pub fn new(density: f32, quick_drag: f32) -> Self {
        Self { density, quick_drag }
    }

    pub fn of(medium: Medium) -> Self {
        Self::new(medium.density(), DEFAULT_VOLUME_QUICK_DRAG)
    }
}
