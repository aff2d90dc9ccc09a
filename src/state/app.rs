use std::sync::Arc;

use crate::config::AppConfig;
use crate::state::collection::JsonCollection;
use crate::state::ids::IdGenerator;
use crate::state::records::{DataItem, Visit};

/// Shared application state handed to the `/api` routes.
#[derive(Clone)]
pub struct AppState {
    pub visits: Arc<JsonCollection<Visit>>,
    pub data: Arc<JsonCollection<DataItem>>,
    pub ids: Arc<IdGenerator>,
}

impl AppState {
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            visits: Arc::new(JsonCollection::new(
                "visits",
                &cfg.visits_path,
                cfg.write_mode,
                cfg.atomic_writes,
            )),
            data: Arc::new(JsonCollection::new(
                "data",
                &cfg.data_path,
                cfg.write_mode,
                cfg.atomic_writes,
            )),
            ids: Arc::new(IdGenerator::new()),
        }
    }
}
