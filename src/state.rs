use std::sync::Arc;

use crate::registry::Registry;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub registry: Registry,
}
