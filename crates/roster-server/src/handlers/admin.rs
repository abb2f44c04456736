//! Admin portal routes.
//!
//! `GET` requires a bearer token; `POST` requires the configured admin
//! name and password in the JSON body.

use axum::Json;
use serde::Serialize;

use crate::auth::{AdminAuthorized, Authenticated};

#[derive(Debug, Serialize)]
pub struct PortalWelcome {
  pub message: &'static str,
  pub success: bool,
}

const WELCOME: PortalWelcome = PortalWelcome {
  message: "Welcome to the Admin Portal!",
  success: true,
};

/// `GET /admin-portal`
pub async fn portal(Authenticated(_): Authenticated) -> Json<PortalWelcome> {
  Json(WELCOME)
}

/// `POST /admin-portal` — body: `{"adminName":"…","adminPassword":"…"}`
pub async fn portal_login(_: AdminAuthorized) -> Json<PortalWelcome> {
  Json(WELCOME)
}
