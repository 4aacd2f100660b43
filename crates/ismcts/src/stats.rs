use crate::SearchError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStats {
    pub simulations: u32,
    pub elapsed_ms: u64,
    pub root_children: usize,
    pub selected_visits: u32,
    pub selected_mean: f64,
}

impl SearchStats {
    pub fn to_text_report(&self) -> String {
        format!(
            "search: sims={} elapsed={}ms children={} pick_visits={} pick_mean={:.3}",
            self.simulations,
            self.elapsed_ms,
            self.root_children,
            self.selected_visits,
            self.selected_mean
        )
    }
}

pub fn write_json(path: &Path, stats: &SearchStats) -> Result<(), SearchError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(stats)?;
    fs::write(path, body)?;
    Ok(())
}
