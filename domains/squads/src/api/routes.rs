//! Route definitions for the Squads domain API

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{admin, detail, join, list, members, user_squad};
use super::state::SquadsState;

fn listing_routes() -> Router<SquadsState> {
    // GET and POST share a path with the admin CRUD routes below, so both
    // methods are registered together here rather than split across merged
    // routers, which would conflict at the same path.
    Router::new()
        .route(
            "/guilds/{gid}/squads",
            get(list::list_squads).post(admin::create_squad),
        )
        .route(
            "/guilds/{gid}/squads/{sid}",
            get(detail::get_squad)
                .patch(admin::update_squad)
                .delete(admin::delete_squad),
        )
        .route(
            "/guilds/{gid}/squads/{sid}/members/paginated",
            get(members::list_members),
        )
}

fn join_routes() -> Router<SquadsState> {
    Router::new().route("/guilds/{gid}/squads/{sid}/join", post(join::join_squad))
}

fn user_routes() -> Router<SquadsState> {
    Router::new().route(
        "/guilds/{gid}/users/{uid}/squad",
        get(user_squad::get_user_squad),
    )
}

fn sale_routes() -> Router<SquadsState> {
    Router::new().route(
        "/guilds/{gid}/squads/{sid}/sales",
        post(admin::create_sale),
    )
}

/// Create all Squads domain API routes.
pub fn routes() -> Router<SquadsState> {
    Router::new()
        .merge(listing_routes())
        .merge(join_routes())
        .merge(user_routes())
        .merge(sale_routes())
}
