use log::info;

/// Thin wrapper routing session records through the `log` facade.
pub struct LogManager {
    component: &'static str,
}

impl LogManager {
    pub fn new() -> Self {
        Self {
            component: "session",
        }
    }

    pub fn for_component(component: &'static str) -> Self {
        Self { component }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.component, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
