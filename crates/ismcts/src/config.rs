#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub seed: u64,
    pub exploration_c: f64,
    /// Wall-clock budget for one search call in milliseconds; 0 disables it.
    pub max_time_ms: u64,
    /// Iterations always run before the time budget is consulted.
    pub min_iterations: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            seed: 0x7121C0,
            exploration_c: std::f64::consts::FRAC_1_SQRT_2,
            max_time_ms: 0,
            min_iterations: 8,
        }
    }
}
