//! Liveness and home routes.

use crate::auth::Authenticated;

/// `GET /`
pub async fn liveness() -> &'static str { "Backend is running!" }

/// `GET /home`
pub async fn home(Authenticated(_): Authenticated) -> &'static str {
  "Welcome to the Home page!"
}
