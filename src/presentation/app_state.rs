// Application state for HTTP handlers
use crate::application::state::StateController;

#[derive(Clone)]
pub struct AppState {
    pub controller: StateController,
}
