use wasm_bindgen::prelude::*;

use crate::core::Vec2;
use crate::domain::config::BodyConfig;
use crate::domain::error::EngineError;
use crate::domain::media::MediumVolume;
use crate::systems::gravity::GravityDirection;

use super::perf_stats::PerfStats;
use super::{ContactPhase, TriggerPhase, WorldCore};

fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn contact_phase(phase: u8) -> ContactPhase {
    match phase {
        0 => ContactPhase::Enter,
        1 => ContactPhase::Stay,
        2 => ContactPhase::Exit,
        other => panic!("report_contact: unknown contact phase {other}"),
    }
}

/// JS-facing world. Vectors cross the boundary as separate x/y numbers.
#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            core: WorldCore::new(),
        }
    }

    #[wasm_bindgen(js_name = withFixedDt)]
    pub fn with_fixed_dt(fixed_dt: f32) -> Self {
        Self {
            core: WorldCore::with_fixed_dt(fixed_dt),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn time(&self) -> f32 { self.core.time() }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.core.body_count() as u32 }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    /// Loads a JSON scene bundle and returns `{ "bodies": { name: id }, "oscillators": [...] }`.
    pub fn load_scene(&mut self, json: String) -> Result<String, JsValue> {
        let handles = self.core.load_scene_json(&json).map_err(to_js)?;
        let out = serde_json::json!({
            "bodies": handles.bodies,
            "oscillators": handles.oscillators,
        });
        Ok(out.to_string())
    }

    // === GRAVITY ===

    pub fn set_gravity_direction(&mut self, x: f32, y: f32) {
        self.core.set_gravity_direction(Vec2::new(x, y));
    }

    /// `"left" | "down" | "right" | "up" | "none"`
    pub fn set_named_gravity(&mut self, name: &str) -> Result<(), JsValue> {
        let direction: GravityDirection = serde_json::from_value(serde_json::Value::String(name.to_string()))
            .map_err(|e| to_js(e.into()))?;
        self.core.set_named_gravity(direction);
        Ok(())
    }

    pub fn rotate_gravity(&mut self, quarter_turns: i32) {
        self.core.rotate_gravity(quarter_turns);
    }

    pub fn gravity_x(&self) -> f32 { self.core.gravity().vector.x }

    pub fn gravity_y(&self) -> f32 { self.core.gravity().vector.y }

    // === BODIES ===

    /// Creates a body from a (possibly empty) JSON `BodyConfig`.
    pub fn create_body(&mut self, config_json: &str) -> Result<u32, JsValue> {
        let config: BodyConfig = serde_json::from_str(config_json).map_err(|e| to_js(e.into()))?;
        config.validate("body").map_err(to_js)?;
        Ok(self.core.create_body(&config))
    }

    pub fn destroy_body(&mut self, id: u32) {
        self.core.destroy_body(id);
    }

    pub fn has_body(&self, id: u32) -> bool {
        self.core.contains_body(id)
    }

    pub fn body_x(&self, id: u32) -> f32 { self.core.body(id).position().x }

    pub fn body_y(&self, id: u32) -> f32 { self.core.body(id).position().y }

    pub fn body_vx(&self, id: u32) -> f32 { self.core.body(id).velocity().x }

    pub fn body_vy(&self, id: u32) -> f32 { self.core.body(id).velocity().y }

    pub fn apply_force(&mut self, id: u32, x: f32, y: f32) {
        self.core.apply_force(id, Vec2::new(x, y));
    }

    pub fn set_velocity(&mut self, id: u32, x: f32, y: f32) {
        self.core.set_velocity(id, Vec2::new(x, y));
    }

    pub fn add_velocity(&mut self, id: u32, x: f32, y: f32) {
        self.core.add_velocity(id, Vec2::new(x, y));
    }

    pub fn set_position(&mut self, id: u32, x: f32, y: f32) {
        self.core.set_position(id, Vec2::new(x, y));
    }

    pub fn add_mass(&mut self, id: u32, delta: f32) {
        self.core.add_mass(id, delta);
    }

    pub fn remove_mass(&mut self, id: u32, delta: f32) {
        self.core.remove_mass(id, delta);
    }

    pub fn set_enabled(&mut self, id: u32, enabled: bool) {
        self.core.set_enabled(id, enabled);
    }

    pub fn reset_collision_flags(&mut self, id: u32) {
        self.core.reset_collision_flags(id);
    }

    /// Flat `[x0, y0, x1, y1, ...]` throw preview.
    pub fn predict_throw(&self, id: u32, x: f32, y: f32, vx: f32, vy: f32, steps: u32) -> Vec<f32> {
        self.core
            .predict_throw(id, Vec2::new(x, y), Vec2::new(vx, vy), steps as usize)
            .into_iter()
            .flat_map(|p| [p.x, p.y])
            .collect()
    }

    // === CARRIERS & OSCILLATORS ===

    pub fn add_carrier(&mut self, id: u32, angle_tolerance_deg: f32) -> bool {
        self.core.add_carrier(id, angle_tolerance_deg)
    }

    pub fn add_platform(&mut self, id: u32, dir_x: f32, dir_y: f32, amplitude: f32, frequency: f32, use_cos: bool) -> u32 {
        self.core.add_platform(id, Vec2::new(dir_x, dir_y), amplitude, frequency, use_cos)
    }

    pub fn add_pendulum(&mut self, id: u32, pivot_x: f32, pivot_y: f32, length: f32) -> Result<u32, JsValue> {
        self.core.add_pendulum(id, Vec2::new(pivot_x, pivot_y), length).map_err(to_js)
    }

    pub fn add_spring(&mut self, id: u32, omega: f32, gamma: f32, origin_x: Option<f32>, origin_y: Option<f32>) -> u32 {
        let origin = match (origin_x, origin_y) {
            (Some(x), Some(y)) => Some(Vec2::new(x, y)),
            _ => None,
        };
        self.core.add_spring(id, omega, gamma, origin)
    }

    pub fn reset_oscillator(&mut self, id: u32) -> bool {
        self.core.reset_oscillator(id)
    }

    // === EVENTS ===

    /// `phase`: 0 enter, 1 stay, 2 exit. The normal points from `other` to `body`.
    pub fn report_contact(&mut self, body: u32, other: Option<u32>, nx: f32, ny: f32, phase: u8) {
        self.core.report_contact(body, other, Vec2::new(nx, ny), contact_phase(phase));
    }

    pub fn report_collision(&mut self, a: u32, b: Option<u32>, nx: f32, ny: f32, phase: u8) {
        self.core.report_collision(a, b, Vec2::new(nx, ny), contact_phase(phase));
    }

    pub fn enter_volume(&mut self, body: u32, density: f32, quick_drag: f32) {
        self.core
            .report_trigger(body, MediumVolume::new(density, quick_drag), TriggerPhase::Enter);
    }

    pub fn exit_volume(&mut self, body: u32) {
        self.core
            .report_trigger(body, MediumVolume::new(0.0, 0.0), TriggerPhase::Exit);
    }

    // === STEPPING ===

    pub fn step(&mut self, dt: f32) {
        self.core.step(dt);
    }

    pub fn step_fixed(&mut self) {
        self.core.step_fixed();
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
