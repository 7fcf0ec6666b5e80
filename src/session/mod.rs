//! Admin session: identity, bearer token, and the route guard.

mod auth;
mod guard;
mod store;

pub use auth::AuthService;
pub use guard::{GuardDecision, RouteGuard};
pub use store::SessionStore;
