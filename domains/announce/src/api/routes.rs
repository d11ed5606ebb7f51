//! Route definitions for the Announce domain API

use axum::routing::post;
use axum::Router;

use super::handlers::beacon;
use super::state::AnnounceState;

/// Create all Announce domain API routes.
pub fn routes() -> Router<AnnounceState> {
    Router::new().route("/guilds/{gid}/beacon", post(beacon::send_beacon))
}
