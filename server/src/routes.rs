use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::App;
use crate::apple_music;
use crate::settings;

fn init_api(app: App) -> Router {
	Router::new()
		.route("/api/settings", get(settings::handler::get_settings))
		.route("/api/settings/songs", get(settings::handler::get_songs))
		.route("/api/apple-music/token", get(apple_music::handler::get_token))
		.with_state(app)
}

pub fn init(app: App) -> Router {
	Router::new()
		.route("/health", get(async || "ok"))
		.merge(init_api(app))
		.layer(TraceLayer::new_for_http())
}

// vim: ts=4
