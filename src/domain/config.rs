//! Serde configuration for bodies and whole scenes.

use serde::{Deserialize, Serialize};

use crate::core::Vec2;
use crate::domain::error::EngineError;
use crate::domain::media::AIR_DENSITY;
use crate::systems::body::BodyKind;
use crate::systems::gravity::{GravityDirection, GRAVITY_ACCELERATION};

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_one() -> f32 {
    1.0
}
const fn default_axis_factor() -> Vec2 {
    Vec2::ONE
}
const fn default_custom_gravity() -> Vec2 {
    Vec2::new(0.0, GRAVITY_ACCELERATION)
}
const fn default_fluid_density() -> f32 {
    AIR_DENSITY
}
const fn default_quick_drag() -> f32 {
    0.05
}
const fn default_collision_drag() -> f32 {
    0.25
}
const fn default_fixed_dt() -> f32 {
    0.02
}
const fn default_gravity_direction() -> GravityDirection {
    GravityDirection::Down
}
const fn default_moving_with_angle() -> f32 {
    10.0
}
const fn default_direction() -> Vec2 {
    Vec2::new(1.0, 0.0)
}

// ---------------------------------------------------------------------------
// BodyConfig
// ---------------------------------------------------------------------------

/// Per-body configuration. Every field is optional in JSON.
///
/// Out-of-range designer values (bounciness above 1, quick drag outside
/// [0, 1], negative mass) are accepted on purpose; only values that would
/// turn the simulation into NaN are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyConfig {
    #[serde(default)]
    pub kind: BodyKind,
    #[serde(default = "default_one")]
    pub mass: f32,
    #[serde(default = "default_one")]
    pub gravity_scale: f32,
    #[serde(default)]
    pub use_custom_gravity: bool,
    #[serde(default = "default_custom_gravity")]
    pub custom_gravity: Vec2,
    #[serde(default = "default_axis_factor")]
    pub drag_axis_factor: Vec2,
    #[serde(default = "default_one")]
    pub drag_coefficient: f32,
    #[serde(default = "default_fluid_density")]
    pub fluid_density: f32,
    #[serde(default = "default_one")]
    pub frontal_area: f32,
    #[serde(default)]
    pub use_quick_drag: bool,
    #[serde(default = "default_quick_drag")]
    pub quick_drag: f32,
    /// Lerp the non-gravity axis towards the base velocity while touching.
    #[serde(default)]
    pub collision_drag_enabled: bool,
    #[serde(default = "default_collision_drag")]
    pub collision_drag: f32,
    #[serde(default)]
    pub collision_drag_with_dynamics: bool,
    #[serde(default = "default_one")]
    pub bounciness: f32,
    #[serde(default)]
    pub freeze_x: bool,
    #[serde(default)]
    pub freeze_y: bool,
    #[serde(default)]
    pub position: Vec2,
    #[serde(default)]
    pub velocity: Vec2,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            kind: BodyKind::Dynamic,
            mass: default_one(),
            gravity_scale: default_one(),
            use_custom_gravity: false,
            custom_gravity: default_custom_gravity(),
            drag_axis_factor: default_axis_factor(),
            drag_coefficient: default_one(),
            fluid_density: default_fluid_density(),
            frontal_area: default_one(),
            use_quick_drag: false,
            quick_drag: default_quick_drag(),
            collision_drag_enabled: false,
            collision_drag: default_collision_drag(),
            collision_drag_with_dynamics: false,
            bounciness: default_one(),
            freeze_x: false,
            freeze_y: false,
            position: Vec2::zero(),
            velocity: Vec2::zero(),
        }
    }
}

impl BodyConfig {
    pub fn kinematic() -> Self {
        Self {
            kind: BodyKind::Kinematic,
            ..Self::default()
        }
    }

    /// Dynamic body with no drag at all, handy for ballistic setups.
    pub fn frictionless() -> Self {
        Self {
            drag_coefficient: 0.0,
            ..Self::default()
        }
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_bounciness(mut self, bounciness: f32) -> Self {
        self.bounciness = bounciness;
        self
    }

    pub fn with_quick_drag(mut self, quick_drag: f32) -> Self {
        self.use_quick_drag = true;
        self.quick_drag = quick_drag;
        self
    }

    pub fn validate(&self, field: &str) -> Result<(), EngineError> {
        if self.mass == 0.0 || !self.mass.is_finite() {
            return Err(EngineError::invalid(
                format!("{field}.mass"),
                format!("{} (must be finite and non-zero)", self.mass),
            ));
        }
        let scalars = [
            ("gravityScale", self.gravity_scale),
            ("dragCoefficient", self.drag_coefficient),
            ("fluidDensity", self.fluid_density),
            ("frontalArea", self.frontal_area),
            ("quickDrag", self.quick_drag),
            ("collisionDrag", self.collision_drag),
            ("bounciness", self.bounciness),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(EngineError::invalid(format!("{field}.{name}"), "must be finite"));
            }
        }
        let vectors = [
            ("customGravity", self.custom_gravity),
            ("dragAxisFactor", self.drag_axis_factor),
            ("position", self.position),
            ("velocity", self.velocity),
        ];
        for (name, value) in vectors {
            if !value.is_finite() {
                return Err(EngineError::invalid(format!("{field}.{name}"), "must be finite"));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SceneConfig
// ---------------------------------------------------------------------------

/// A named body inside a scene bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneBody {
    pub name: String,
    #[serde(flatten)]
    pub config: BodyConfig,
    /// Makes this body a carrier for riders standing on it.
    #[serde(default)]
    pub carrier: Option<CarrierConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierConfig {
    #[serde(default = "default_moving_with_angle")]
    pub angle_tolerance_deg: f32,
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self {
            angle_tolerance_deg: default_moving_with_angle(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    pub body: String,
    #[serde(default = "default_direction")]
    pub direction: Vec2,
    #[serde(default = "default_one")]
    pub amplitude: f32,
    #[serde(default = "default_one")]
    pub frequency: f32,
    #[serde(default)]
    pub use_cos: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendulumConfig {
    pub body: String,
    pub pivot: Vec2,
    /// Zero means "use the initial distance to the pivot".
    #[serde(default)]
    pub length: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringConfig {
    pub body: String,
    pub omega: f32,
    #[serde(default)]
    pub gamma: f32,
    /// Defaults to the body's position when the scene is loaded.
    #[serde(default)]
    pub origin: Option<Vec2>,
}

/// JSON scene bundle: world settings plus bodies and their motion sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneConfig {
    #[serde(default = "default_fixed_dt")]
    pub fixed_dt: f32,
    #[serde(default = "default_gravity_direction")]
    pub gravity_direction: GravityDirection,
    #[serde(default)]
    pub bodies: Vec<SceneBody>,
    #[serde(default)]
    pub platforms: Vec<PlatformConfig>,
    #[serde(default)]
    pub pendulums: Vec<PendulumConfig>,
    #[serde(default)]
    pub springs: Vec<SpringConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fixed_dt: default_fixed_dt(),
            gravity_direction: default_gravity_direction(),
            bodies: Vec::new(),
            platforms: Vec::new(),
            pendulums: Vec::new(),
            springs: Vec::new(),
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let scene: SceneConfig = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.fixed_dt > 0.0 && self.fixed_dt.is_finite()) {
            return Err(EngineError::invalid(
                "fixedDt",
                format!("{} (must be > 0)", self.fixed_dt),
            ));
        }

        let mut names = std::collections::HashMap::new();
        for body in self.bodies.iter() {
            if names.insert(body.name.as_str(), body).is_some() {
                return Err(EngineError::DuplicateBody(body.name.clone()));
            }
            body.config.validate(&format!("bodies.{}", body.name))?;
            if let Some(carrier) = &body.carrier {
                if !carrier.angle_tolerance_deg.is_finite() {
                    return Err(EngineError::invalid(
                        format!("bodies.{}.carrier.angleToleranceDeg", body.name),
                        "must be finite",
                    ));
                }
            }
        }

        let known = |name: &str| {
            names
                .get(name)
                .copied()
                .ok_or_else(|| EngineError::UnknownBody(name.to_string()))
        };

        for p in self.platforms.iter() {
            known(&p.body)?;
            if !p.direction.is_finite() || p.direction.normalize() == Vec2::zero() {
                return Err(EngineError::invalid(
                    format!("platforms.{}.direction", p.body),
                    "must be a non-zero vector",
                ));
            }
            if !(p.amplitude.is_finite() && p.frequency.is_finite()) {
                return Err(EngineError::invalid(
                    format!("platforms.{}", p.body),
                    "amplitude and frequency must be finite",
                ));
            }
        }
        for p in self.pendulums.iter() {
            let bob = known(&p.body)?;
            if !p.pivot.is_finite() || !p.length.is_finite() || p.length < 0.0 {
                return Err(EngineError::invalid(
                    format!("pendulums.{}", p.body),
                    "pivot must be finite and length >= 0",
                ));
            }
            let rod = if p.length == 0.0 {
                (p.pivot - bob.config.position).length()
            } else {
                p.length
            };
            if rod <= 0.0 {
                return Err(EngineError::invalid(
                    format!("pendulums.{}.length", p.body),
                    "bob sits on the pivot; give a length or move the pivot",
                ));
            }
        }
        for s in self.springs.iter() {
            known(&s.body)?;
            if !(s.omega.is_finite() && s.gamma.is_finite()) {
                return Err(EngineError::invalid(
                    format!("springs.{}", s.body),
                    "omega and gamma must be finite",
                ));
            }
        }
        Ok(())
    }
}
