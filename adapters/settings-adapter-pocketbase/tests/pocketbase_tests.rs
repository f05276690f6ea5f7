//! Settings adapter tests against a fake PocketBase server

use axum::{
	Json, Router,
	extract::Query,
	http::{HeaderMap, StatusCode},
	routing::get,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;

use vocal_royale_settings_adapter_pocketbase::SettingsAdapterPocketBase;
use vocal_royale_types::error::Error;
use vocal_royale_types::settings_adapter::SettingsAdapter;

/// Serve `router` on an ephemeral port and return its base URL
async fn serve(router: Router) -> String {
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		let _ = axum::serve(listener, router).await;
	});
	format!("http://{}", addr)
}

fn list_response(items: Value) -> Json<Value> {
	Json(json!({
		"page": 1,
		"perPage": 1,
		"totalItems": 1,
		"totalPages": 1,
		"items": items,
	}))
}

#[tokio::test]
async fn reads_first_record() {
	let router = Router::new().route(
		"/api/collections/settings/records",
		get(|Query(query): Query<HashMap<String, String>>| async move {
			assert_eq!(query.get("perPage").map(String::as_str), Some("1"));
			list_response(json!([{
				"id": "r1",
				"collectionName": "settings",
				"totalRounds": 4,
				"numberOfFinalSongs": 1,
				"roundEliminationPattern": "6,4,2",
				"songChoiceDeadline": "2025-03-01 20:00:00.000Z",
				"maxJurorCount": null
			}]))
		}),
	);
	let base = serve(router).await;

	let adapter = SettingsAdapterPocketBase::new(&base, "settings").unwrap();
	let record = adapter.read_settings().await.unwrap().unwrap();

	assert_eq!(record.total_rounds, Some(4));
	assert_eq!(record.number_of_final_songs, Some(1));
	assert_eq!(record.round_elimination_pattern.as_deref(), Some("6,4,2"));
	assert_eq!(record.song_choice_deadline.as_deref(), Some("2025-03-01 20:00:00.000Z"));
	assert_eq!(record.max_juror_count, None);
	assert_eq!(record.max_participant_count, None);
}

#[tokio::test]
async fn empty_collection_is_no_record() {
	let router = Router::new()
		.route("/api/collections/settings/records", get(|| async { list_response(json!([])) }));
	let base = serve(router).await;

	let adapter = SettingsAdapterPocketBase::new(&base, "settings").unwrap();
	assert_eq!(adapter.read_settings().await.unwrap(), None);
}

#[tokio::test]
async fn missing_collection_is_no_record() {
	let base = serve(Router::new()).await;

	let adapter = SettingsAdapterPocketBase::new(&base, "settings").unwrap();
	assert_eq!(adapter.read_settings().await.unwrap(), None);
}

#[tokio::test]
async fn sends_auth_token() {
	let router = Router::new().route(
		"/api/collections/settings/records",
		get(|headers: HeaderMap| async move {
			if headers.get("authorization").and_then(|v| v.to_str().ok()) == Some("pb-admin-token")
			{
				Ok(list_response(json!([{ "totalRounds": 3 }])))
			} else {
				Err(StatusCode::FORBIDDEN)
			}
		}),
	);
	let base = serve(router).await;

	let anonymous = SettingsAdapterPocketBase::new(&base, "settings").unwrap();
	assert!(matches!(anonymous.read_settings().await, Err(Error::PermissionDenied)));

	let admin =
		SettingsAdapterPocketBase::new(&base, "settings").unwrap().with_auth_token("pb-admin-token");
	assert_eq!(admin.read_settings().await.unwrap().unwrap().total_rounds, Some(3));
}

#[tokio::test]
async fn server_errors_are_unavailable() {
	let router = Router::new().route(
		"/api/collections/settings/records",
		get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
	);
	let base = serve(router).await;

	let adapter = SettingsAdapterPocketBase::new(&base, "settings").unwrap();
	assert!(matches!(adapter.read_settings().await, Err(Error::ServiceUnavailable(_))));
}

#[tokio::test]
async fn garbage_body_is_parse_error() {
	let router = Router::new()
		.route("/api/collections/settings/records", get(|| async { "<html>oops</html>" }));
	let base = serve(router).await;

	let adapter = SettingsAdapterPocketBase::new(&base, "settings").unwrap();
	assert!(matches!(adapter.read_settings().await, Err(Error::Parse)));
}

#[tokio::test]
async fn slow_server_times_out() {
	let router = Router::new().route(
		"/api/collections/settings/records",
		get(|| async {
			tokio::time::sleep(Duration::from_secs(5)).await;
			list_response(json!([]))
		}),
	);
	let base = serve(router).await;

	let adapter = SettingsAdapterPocketBase::new(&base, "settings")
		.unwrap()
		.with_timeout(Duration::from_millis(100));
	assert!(matches!(adapter.read_settings().await, Err(Error::ServiceUnavailable(_))));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
	// Bind and drop to get a port nothing listens on
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	drop(listener);

	let adapter = SettingsAdapterPocketBase::new(&format!("http://{}", addr), "settings").unwrap();
	assert!(matches!(adapter.read_settings().await, Err(Error::NetworkError(_))));
}

// vim: ts=4
