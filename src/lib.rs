pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

pub fn build_state() -> anyhow::Result<state::AppState> {
    let local_state_path = std::env::var("LOCAL_STATE_PATH")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| Some(format!("{}/local_state.json", env!("CARGO_MANIFEST_DIR"))));
    Ok(state::AppState::new(local_state_path))
}
