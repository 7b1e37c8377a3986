use crate::{routes::RouteTable, state::AppState};

mod dto;
pub mod handlers;
pub mod memory;
pub mod middleware;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod token;

pub fn router(state: &AppState) -> RouteTable<AppState> {
    handlers::auth_routes(state)
}
