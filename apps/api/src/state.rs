use std::sync::Arc;

use crate::config::Config;
use crate::roadmap::generator::RoadmapGenerator;
use crate::roadmap::store::{ProfileStore, RoadmapStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Profile lookup. Default: `PgStore`.
    pub profiles: Arc<dyn ProfileStore>,
    /// Persistence gateway. Default: `PgStore` calling the roadmap stored procedure.
    pub roadmaps: Arc<dyn RoadmapStore>,
    pub generator: RoadmapGenerator,
    pub config: Config,
}
