use crate::state::AppState;
use axum::Router;

mod dto;
mod errors;
pub mod handlers;
#[cfg(test)]
pub(crate) mod memory;
mod postgres;
pub mod repo;
pub mod repo_types;
mod store;

pub use errors::UserError;
pub use postgres::PgUserStore;
pub use repo::UserRepository;
pub use store::UserStore;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::user_routes())
        .merge(handlers::me_routes())
}
