//! HTTP client for the remote transit service.
//!
//! The service is consumed through two logical operations per direction: a
//! single-item transform and a bulk transform. Both are `POST`s to the same
//! endpoint, distinguished by body shape. Authentication is a bearer-style
//! token header attached to every call.
//!
//! The public surface is synchronous; the client owns a current-thread tokio
//! runtime and blocks on each request. No retries and no timeouts beyond
//! what the underlying socket enforces.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tracing::{debug, trace};

use crate::core::config::TransitConfig;
use crate::core::protocol::{ApiResponse, BulkData, BulkRequest, ErrorBody, RequestItem, ResultItem};
use crate::core::types::Direction;
use crate::error::TransformError;

/// Header carrying the access token.
const TOKEN_HEADER: &str = "X-Vault-Token";

/// Remote transform operations, as the pipeline sees them.
///
/// Payloads are already transcoded (base64 for plaintext); the backend only
/// moves them across the wire. A bulk call submitting K items must return
/// exactly K results in submitted order.
pub trait Transit {
    /// Transform one payload via the single-item endpoint.
    fn transform_single(
        &self,
        direction: Direction,
        payload: &str,
    ) -> Result<String, TransformError>;

    /// Transform a batch of payloads via the bulk endpoint.
    fn transform_batch(
        &self,
        direction: Direction,
        payloads: &[String],
    ) -> Result<Vec<String>, TransformError>;
}

/// HTTP implementation of [`Transit`].
pub struct TransitClient {
    http: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    runtime: tokio::runtime::Runtime,
    config: TransitConfig,
}

/// Full endpoint URL for a transform call.
fn request_url(config: &TransitConfig, direction: Direction) -> String {
    format!(
        "{}/v1/{}/{}/{}",
        config.addr,
        config.engine_path,
        direction.path_segment(),
        config.key
    )
}

impl TransitClient {
    /// Create a client for the given service configuration.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::Http` if the async runtime cannot be built.
    pub fn new(config: TransitConfig) -> Result<Self, TransformError> {
        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let http = Client::builder(TokioExecutor::new()).build(https);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| TransformError::Http(format!("failed to create async runtime: {e}")))?;

        Ok(Self {
            http,
            runtime,
            config,
        })
    }

    /// POST a JSON body to the transform endpoint and return the response
    /// bytes, mapping non-2xx statuses to `TransformError::Api`.
    fn post(&self, direction: Direction, body: String) -> Result<Bytes, TransformError> {
        let url = request_url(&self.config, direction);
        let uri: hyper::Uri = url
            .parse()
            .map_err(|e| TransformError::InvalidUrl(format!("{url}: {e}")))?;

        trace!(%url, body_len = body.len(), "sending transform request");

        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(TOKEN_HEADER, self.config.token.as_str())
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| TransformError::Http(format!("failed to build request: {e}")))?;

        self.runtime.block_on(async {
            let response = self
                .http
                .request(request)
                .await
                .map_err(|e| TransformError::Http(e.to_string()))?;

            let status = response.status();
            let bytes = response
                .into_body()
                .collect()
                .await
                .map_err(|e| TransformError::Http(e.to_string()))?
                .to_bytes();

            debug!(%url, status = status.as_u16(), "transform response");

            if !status.is_success() {
                let message = serde_json::from_slice::<ErrorBody>(&bytes)
                    .ok()
                    .filter(|b| !b.errors.is_empty())
                    .map(|b| b.errors.join(", "))
                    .unwrap_or_else(|| String::from_utf8_lossy(&bytes).trim().to_string());
                return Err(TransformError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            Ok(bytes)
        })
    }
}

impl Transit for TransitClient {
    fn transform_single(
        &self,
        direction: Direction,
        payload: &str,
    ) -> Result<String, TransformError> {
        let body = serde_json::to_string(&RequestItem::new(direction, payload))
            .map_err(|e| TransformError::Http(format!("failed to encode request: {e}")))?;

        let bytes = self.post(direction, body)?;
        let response: ApiResponse<ResultItem> = serde_json::from_slice(&bytes)
            .map_err(|e| TransformError::MalformedResponse(e.to_string()))?;

        response
            .data
            .into_field(direction)
            .ok_or(TransformError::MissingField(direction.result_field()))
    }

    fn transform_batch(
        &self,
        direction: Direction,
        payloads: &[String],
    ) -> Result<Vec<String>, TransformError> {
        if payloads.is_empty() {
            return Ok(Vec::new());
        }

        let items = payloads
            .iter()
            .map(|p| RequestItem::new(direction, p))
            .collect();
        let body = serde_json::to_string(&BulkRequest { batch_input: items })
            .map_err(|e| TransformError::Http(format!("failed to encode request: {e}")))?;

        let bytes = self.post(direction, body)?;
        let response: ApiResponse<BulkData> = serde_json::from_slice(&bytes)
            .map_err(|e| TransformError::MalformedResponse(e.to_string()))?;

        let results = response
            .data
            .batch_results
            .ok_or(TransformError::MissingField("batch_results"))?;

        if results.len() != payloads.len() {
            return Err(TransformError::ResultCountMismatch {
                expected: payloads.len(),
                got: results.len(),
            });
        }

        results
            .into_iter()
            .map(|item| {
                item.into_field(direction)
                    .ok_or(TransformError::MissingField(direction.result_field()))
            })
            .collect()
    }
}
