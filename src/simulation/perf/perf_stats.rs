use wasm_bindgen::prelude::*;

/// Timings and counters of the last step. All zero while perf is disabled.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) oscillators_ms: f64,
    pub(super) contacts_ms: f64,
    pub(super) positions_ms: f64,
    pub(super) body_count: u32,
    pub(super) oscillator_count: u32,
    pub(super) contacts_processed: u32,
    pub(super) triggers_processed: u32,
    pub(super) events_dropped: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn oscillators_ms(&self) -> f64 { self.oscillators_ms }
    #[wasm_bindgen(getter)]
    pub fn contacts_ms(&self) -> f64 { self.contacts_ms }
    #[wasm_bindgen(getter)]
    pub fn positions_ms(&self) -> f64 { self.positions_ms }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn oscillator_count(&self) -> u32 { self.oscillator_count }
    #[wasm_bindgen(getter)]
    pub fn contacts_processed(&self) -> u32 { self.contacts_processed }
    #[wasm_bindgen(getter)]
    pub fn triggers_processed(&self) -> u32 { self.triggers_processed }
    #[wasm_bindgen(getter)]
    pub fn events_dropped(&self) -> u32 { self.events_dropped }
}
