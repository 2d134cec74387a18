//! Route definitions for the Prepper Helper HTTP API.
//!
//! All JSON routes are organized by domain and mounted under `/api`.
//! `/health` and `/push-sw.js` live at the root.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route and the request body limit.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(stash_routes())
        .merge(invitation_routes())
        .merge(item_routes())
        .merge(photo_routes())
        .merge(checklist_routes())
        .merge(ai_routes())
        .merge(push_routes())
        .merge(cron_routes());

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health::health))
        .route(
            "/push-sw.js",
            get(handlers::service_worker::push_service_worker),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Auth endpoints: register, login, password recovery, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/forgot-password", post(handlers::auth::forgot_password))
        .route("/auth/reset-password", post(handlers::auth::reset_password))
        .route("/auth/me", get(handlers::auth::me))
}

/// Stash endpoints: CRUD, members, invitations sent from the stash
fn stash_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/stashes",
            get(handlers::stash::list_stashes).post(handlers::stash::create_stash),
        )
        .route(
            "/stashes/{id}",
            get(handlers::stash::get_stash)
                .patch(handlers::stash::rename_stash)
                .delete(handlers::stash::delete_stash),
        )
        .route("/stashes/{id}/members", get(handlers::stash::list_members))
        .route(
            "/stashes/{id}/members/{user_id}",
            patch(handlers::stash::change_member_role).delete(handlers::stash::remove_member),
        )
        .route(
            "/stashes/{id}/invitations",
            get(handlers::invitation::list_stash_invitations)
                .post(handlers::invitation::create_invitation),
        )
        .route(
            "/stashes/{id}/invitations/{invitation_id}",
            delete(handlers::invitation::revoke_invitation),
        )
}

/// Invitee endpoints
fn invitation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/invitations",
            get(handlers::invitation::list_my_invitations),
        )
        .route(
            "/invitations/{id}",
            get(handlers::invitation::get_invitation)
                .patch(handlers::invitation::respond_to_invitation),
        )
}

/// Item endpoints
fn item_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/items",
            get(handlers::item::list_items).post(handlers::item::create_item),
        )
        .route(
            "/items/{id}",
            get(handlers::item::get_item)
                .patch(handlers::item::update_item)
                .delete(handlers::item::delete_item),
        )
}

/// Photo endpoints
fn photo_routes() -> Router<AppState> {
    Router::new()
        .route("/photos/upload", post(handlers::photo::upload_photo))
        .route(
            "/photos/{id}",
            get(handlers::photo::get_photo).delete(handlers::photo::delete_photo),
        )
}

/// Checklist endpoints
fn checklist_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/checklist",
            get(handlers::checklist::list_checklist)
                .post(handlers::checklist::create_checklist_item),
        )
        .route(
            "/checklist/{id}",
            patch(handlers::checklist::update_checklist_item)
                .delete(handlers::checklist::delete_checklist_item),
        )
}

/// Vision analysis
fn ai_routes() -> Router<AppState> {
    Router::new().route("/ai/analyze", post(handlers::ai::analyze))
}

/// Push subscription endpoints
fn push_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/push/vapid-public-key",
            get(handlers::push::vapid_public_key),
        )
        .route(
            "/push/subscribe",
            post(handlers::push::subscribe).delete(handlers::push::unsubscribe),
        )
        .route("/push/test", post(handlers::push::send_test))
}

/// Secret-protected triggers for external schedulers
fn cron_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/cron/check-expiring",
            get(handlers::cron::check_expiring),
        )
        .route(
            "/push/check-expiring",
            post(handlers::cron::check_expiring_thresholds),
        )
}
