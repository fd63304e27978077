//! API layer - Portal HTTP endpoints and middleware

pub mod health;
pub mod keys;
pub mod middleware;
pub mod router;
pub mod state;
pub mod types;

pub use middleware::RequireSession;
pub use router::create_router_with_state;
pub use state::AppState;
