//! Startup log helpers
//!
//! Keeps the binary's startup output consistent: phase headers, per-component
//! status lines, a grouped configuration summary and a final "ready" block.

/// A single configuration entry for the startup summary
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    pub category: &'static str,
    pub key: &'static str,
    pub value: String,
    /// Masked in the summary when set
    pub sensitive: bool,
}

impl ConfigEntry {
    pub fn new(category: &'static str, key: &'static str, value: impl ToString) -> Self {
        Self { category, key, value: value.to_string(), sensitive: false }
    }

    /// Create an entry whose value is masked when logged
    pub fn sensitive(category: &'static str, key: &'static str, value: impl ToString) -> Self {
        Self { category, key, value: value.to_string(), sensitive: true }
    }

    fn display_value(&self) -> &str {
        if self.sensitive { "********" } else { &self.value }
    }
}

/// Group entries by category, preserving first-seen order
fn group_by_category(entries: &[ConfigEntry]) -> Vec<(&'static str, Vec<&ConfigEntry>)> {
    let mut categories: Vec<(&'static str, Vec<&ConfigEntry>)> = Vec::new();
    for entry in entries {
        if let Some((_, grouped)) = categories.iter_mut().find(|(cat, _)| *cat == entry.category) {
            grouped.push(entry);
        } else {
            categories.push((entry.category, vec![entry]));
        }
    }
    categories
}

/// Log the effective configuration, one line per entry
pub fn log_config_summary(entries: &[ConfigEntry]) {
    if entries.is_empty() {
        return;
    }

    let width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);

    tracing::info!("Configuration:");
    for (category, grouped) in group_by_category(entries) {
        tracing::info!("  [{}]", category);
        for entry in grouped {
            tracing::info!("    {:<width$}  {}", entry.key, entry.display_value(), width = width);
        }
    }
}

/// Log a startup phase header
pub fn log_phase(phase: &str) {
    tracing::info!("━━━ {} ━━━", phase);
}

pub fn log_initialized(component: &str) {
    tracing::info!("✓ {} initialized", component);
}

pub fn log_skipped(component: &str, reason: &str) {
    tracing::info!("○ {} skipped: {}", component, reason);
}

/// Log that the service is ready to accept connections
pub fn log_ready(service: &str, addresses: &[(&str, &str)]) {
    tracing::info!("━━━ {} Ready ━━━", service);
    for (name, addr) in addresses {
        tracing::info!("  {} → {}", name, addr);
    }
}
