use minilink_resolver::ResolutionService;
use minilink_shortener::CreationService;
use std::sync::Arc;

/// Shared handler state: the two service-facing entry points.
pub struct AppState<S, C, G> {
    pub creation: Arc<CreationService<S, C, G>>,
    pub resolution: Arc<ResolutionService<S, C>>,
}

impl<S, C, G> AppState<S, C, G> {
    pub fn new(
        creation: Arc<CreationService<S, C, G>>,
        resolution: Arc<ResolutionService<S, C>>,
    ) -> Self {
        Self {
            creation,
            resolution,
        }
    }
}

// Manual impl: `#[derive(Clone)]` would demand Clone on S, C and G,
// but only the Arcs are cloned.
impl<S, C, G> Clone for AppState<S, C, G> {
    fn clone(&self) -> Self {
        Self {
            creation: Arc::clone(&self.creation),
            resolution: Arc::clone(&self.resolution),
        }
    }
}
