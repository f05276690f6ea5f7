//! PocketBase-backed settings adapter
//!
//! Reads the competition settings record from a PocketBase collection
//! through its REST API:
//!
//! ```text
//! GET {base_url}/api/collections/{collection}/records?perPage=1
//! ```
//!
//! The first record of the collection is the settings record. An empty
//! collection (or a missing one) means "no settings yet".

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

use async_trait::async_trait;
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::{StatusCode, header};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;
use serde::Deserialize;
use std::time::Duration;

use vocal_royale_types::prelude::*;
use vocal_royale_types::settings_adapter::SettingsAdapter;
use vocal_royale_types::types::SettingsRecord;

pub const DEFAULT_COLLECTION: &str = "settings";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// PocketBase paginated list response
#[derive(Debug, Deserialize)]
struct RecordList {
	items: Vec<SettingsRecord>,
}

enum HttpClient {
	Http(Client<HttpConnector, Empty<Bytes>>),
	Https(Client<HttpsConnector<HttpConnector>, Empty<Bytes>>),
}

impl HttpClient {
	fn for_scheme(scheme: &str) -> VrResult<Self> {
		match scheme {
			"http" => Ok(HttpClient::Http(
				Client::builder(TokioExecutor::new()).build(HttpConnector::new()),
			)),
			"https" => {
				let connector = hyper_rustls::HttpsConnectorBuilder::new()
					.with_native_roots()
					.map_err(|_| Error::ConfigError("no native root CA certificates found".into()))?
					.https_only()
					.enable_http1()
					.enable_http2()
					.build();
				Ok(HttpClient::Https(Client::builder(TokioExecutor::new()).build(connector)))
			}
			other => Err(Error::ConfigError(format!("unsupported PocketBase scheme: {}", other))),
		}
	}

	async fn request(
		&self,
		req: hyper::Request<Empty<Bytes>>,
	) -> VrResult<hyper::Response<hyper::body::Incoming>> {
		let res = match self {
			HttpClient::Http(client) => client.request(req).await?,
			HttpClient::Https(client) => client.request(req).await?,
		};
		Ok(res)
	}
}

pub struct SettingsAdapterPocketBase {
	records_url: url::Url,
	auth_token: Option<Box<str>>,
	timeout: Duration,
	client: HttpClient,
}

impl std::fmt::Debug for SettingsAdapterPocketBase {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingsAdapterPocketBase")
			.field("records_url", &self.records_url.as_str())
			.field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
			.field("timeout", &self.timeout)
			.finish_non_exhaustive()
	}
}

impl SettingsAdapterPocketBase {
	pub fn new(base_url: &str, collection: &str) -> VrResult<Self> {
		if collection.is_empty()
			|| !collection.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
		{
			return Err(Error::ValidationError(format!(
				"invalid PocketBase collection name: {:?}",
				collection
			)));
		}

		let mut base = url::Url::parse(base_url)
			.map_err(|err| Error::ConfigError(format!("invalid PocketBase URL: {}", err)))?;
		// Url::join drops the last path segment unless the path ends with '/'
		if !base.path().ends_with('/') {
			let path = format!("{}/", base.path());
			base.set_path(&path);
		}

		let mut records_url = base
			.join(&format!("api/collections/{}/records", collection))
			.map_err(|err| Error::ConfigError(format!("invalid PocketBase URL: {}", err)))?;
		records_url.query_pairs_mut().append_pair("perPage", "1");

		let client = HttpClient::for_scheme(records_url.scheme())?;

		Ok(Self { records_url, auth_token: None, timeout: DEFAULT_TIMEOUT, client })
	}

	/// Token sent in the `Authorization` header (admin or superuser token)
	pub fn with_auth_token(mut self, token: impl Into<Box<str>>) -> Self {
		self.auth_token = Some(token.into());
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn records_url(&self) -> &url::Url {
		&self.records_url
	}

	async fn fetch(&self) -> VrResult<(StatusCode, Bytes)> {
		let mut builder = hyper::Request::builder()
			.method(hyper::Method::GET)
			.uri(self.records_url.as_str())
			.header(header::ACCEPT, "application/json");
		if let Some(token) = &self.auth_token {
			builder = builder.header(header::AUTHORIZATION, &**token);
		}
		let req = builder.body(Empty::new())?;

		let res = tokio::time::timeout(self.timeout, self.client.request(req))
			.await
			.map_err(|_| Error::ServiceUnavailable("PocketBase request timed out".into()))??;

		let status = res.status();
		let body = res.into_body().collect().await?.to_bytes();
		Ok((status, body))
	}
}

#[async_trait]
impl SettingsAdapter for SettingsAdapterPocketBase {
	async fn read_settings(&self) -> VrResult<Option<SettingsRecord>> {
		let (status, body) = self.fetch().await?;

		match status {
			s if s.is_success() => {
				let list: RecordList = serde_json::from_slice(&body)
					.inspect_err(|err| error!("Invalid PocketBase settings response: {}", err))?;
				let record = list.items.into_iter().next();
				if record.is_none() {
					debug!("PocketBase settings collection is empty");
				}
				Ok(record)
			}
			StatusCode::NOT_FOUND => {
				warn!("PocketBase settings collection not found at {}", self.records_url);
				Ok(None)
			}
			StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::PermissionDenied),
			s => Err(Error::ServiceUnavailable(format!("PocketBase responded with {}", s))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builds_records_url() {
		let adapter = SettingsAdapterPocketBase::new("http://127.0.0.1:8090", "settings").unwrap();
		assert_eq!(
			adapter.records_url().as_str(),
			"http://127.0.0.1:8090/api/collections/settings/records?perPage=1"
		);
	}

	#[test]
	fn keeps_base_path_prefix() {
		let adapter =
			SettingsAdapterPocketBase::new("http://example.com/pb", "competition_settings")
				.unwrap();
		assert_eq!(
			adapter.records_url().as_str(),
			"http://example.com/pb/api/collections/competition_settings/records?perPage=1"
		);
	}

	#[test]
	fn rejects_bad_collection_names() {
		for name in ["", "settings/../users", "a b", "x?y=1"] {
			let res = SettingsAdapterPocketBase::new("http://127.0.0.1:8090", name);
			assert!(matches!(res, Err(Error::ValidationError(_))), "accepted {:?}", name);
		}
	}

	#[test]
	fn rejects_bad_urls() {
		assert!(matches!(
			SettingsAdapterPocketBase::new("not a url", "settings"),
			Err(Error::ConfigError(_))
		));
		assert!(matches!(
			SettingsAdapterPocketBase::new("ftp://example.com", "settings"),
			Err(Error::ConfigError(_))
		));
	}

	#[test]
	fn debug_redacts_token() {
		let adapter = SettingsAdapterPocketBase::new("http://127.0.0.1:8090", "settings")
			.unwrap()
			.with_auth_token("super-secret");
		assert!(!format!("{:?}", adapter).contains("super-secret"));
	}
}

// vim: ts=4
