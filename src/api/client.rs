//! REST client for the FinanzApp backend
//!
//! Wraps a `Transport` with the base URL, bearer-token handling and the
//! single refresh-and-retry on 401.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{FinanzError, FinanzResult};
use crate::models::RefreshResponse;
use crate::storage::SessionStore;

use super::download::Download;
use super::transport::{FormPart, HttpRequest, HttpResponse, Method, Transport, UploadFile};

/// Path of the token refresh endpoint
pub const REFRESH_PATH: &str = "/auth/refresh-token";

/// Where a service result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// Returned by the backend
    #[default]
    Live,
    /// Static mock data substituted because the backend was unavailable
    Mock,
    /// Built locally because writes are being simulated
    Simulated,
}

impl Origin {
    pub fn is_live(&self) -> bool {
        *self == Self::Live
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Mock => write!(f, "mock"),
            Self::Simulated => write!(f, "simulated"),
        }
    }
}

/// A decoded response plus where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
    pub origin: Origin,
}

impl<T> ApiResponse<T> {
    pub fn live(data: T, status: u16) -> Self {
        Self {
            data,
            status,
            origin: Origin::Live,
        }
    }

    pub fn mock(data: T) -> Self {
        Self {
            data,
            status: 200,
            origin: Origin::Mock,
        }
    }

    pub fn simulated(data: T) -> Self {
        Self {
            data,
            status: 200,
            origin: Origin::Simulated,
        }
    }

    /// Transform the data, keeping status and origin
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            status: self.status,
            origin: self.origin,
        }
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

/// Client for the REST backend
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
    auth_required: bool,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            transport,
            session,
            auth_required: true,
        }
    }

    /// A copy of this client that never sends or refreshes tokens
    pub fn unauthenticated(&self) -> Self {
        Self {
            auth_required: false,
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Point the client at another backend
    pub fn set_base_url(&mut self, url: impl Into<String>) {
        self.base_url = normalize_base_url(&url.into());
    }

    pub fn auth_required(&self) -> bool {
        self.auth_required
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The transport, shared with other backends (AI)
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> FinanzResult<ApiResponse<T>> {
        self.get_with_query(path, &[])
    }

    pub fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> FinanzResult<ApiResponse<T>> {
        let request = HttpRequest::new(Method::Get, self.url(path)).query(query);
        self.request_json(request)
    }

    pub fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> FinanzResult<ApiResponse<T>> {
        self.with_body(Method::Post, path, body)
    }

    pub fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> FinanzResult<ApiResponse<T>> {
        self.with_body(Method::Put, path, body)
    }

    pub fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> FinanzResult<ApiResponse<T>> {
        self.with_body(Method::Patch, path, body)
    }

    pub fn delete<T: DeserializeOwned>(&self, path: &str) -> FinanzResult<ApiResponse<T>> {
        let request = HttpRequest::new(Method::Delete, self.url(path));
        self.request_json(request)
    }

    /// Multipart POST of one file plus extra text fields
    pub fn upload_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file: UploadFile,
        field_name: Option<&str>,
        extra: &[(String, String)],
    ) -> FinanzResult<ApiResponse<T>> {
        let mut parts = vec![file.into_part(field_name.unwrap_or("file"))];
        parts.extend(extra.iter().map(|(name, value)| FormPart::Text {
            name: name.clone(),
            value: value.clone(),
        }));

        let request = HttpRequest::new(Method::Post, self.url(path)).multipart(parts);
        self.request_json(request)
    }

    /// GET raw bytes, naming the file from `filename` or the response headers
    pub fn download_file(
        &self,
        path: &str,
        query: &[(String, String)],
        filename: Option<&str>,
    ) -> FinanzResult<Download> {
        let request = HttpRequest::new(Method::Get, self.url(path)).query(query);
        let response = self.execute(request)?;

        Ok(Download::new(
            response.body,
            filename,
            response
                .headers
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case("content-disposition"))
                .map(|(_, v)| v.as_str()),
        ))
    }

    /// Exchange the stored refresh token for a new access token and store it
    pub fn refresh_access_token(&self) -> FinanzResult<String> {
        let refresh_token = self
            .session
            .refresh_token()?
            .ok_or_else(|| FinanzError::Unauthorized("no refresh token available".into()))?;

        let request = HttpRequest::new(Method::Post, self.url(REFRESH_PATH))
            .json(serde_json::json!({ "refresh_token": refresh_token }));
        let response = self.dispatch(&request)?;
        if !response.is_success() {
            return Err(http_error(&response));
        }

        let body: RefreshResponse = response
            .json_body()
            .map_err(|e| FinanzError::Decode(format!("{}: {}", REFRESH_PATH, e)))?;
        if body.access_token.is_empty() {
            return Err(FinanzError::Decode(format!(
                "{}: empty access_token",
                REFRESH_PATH
            )));
        }

        self.session.set_access_token(body.access_token.as_str())?;
        Ok(body.access_token)
    }

    /// Resolve a path against the base URL; absolute URLs pass through
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    fn with_body<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> FinanzResult<ApiResponse<T>> {
        let value = serde_json::to_value(body)?;
        let request = HttpRequest::new(method, self.url(path)).json(value);
        self.request_json(request)
    }

    fn request_json<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> FinanzResult<ApiResponse<T>> {
        let url = request.url.clone();
        let response = self.execute(request)?;
        let data = response
            .json_body()
            .map_err(|e| FinanzError::Decode(format!("{}: {}", url, e)))?;
        Ok(ApiResponse::live(data, response.status))
    }

    /// Send with auth, applying the 401 refresh policy. Non-2xx is an error.
    fn execute(&self, mut request: HttpRequest) -> FinanzResult<HttpResponse> {
        if self.auth_required {
            if let Some(token) = self.session.access_token()? {
                request.set_bearer(&token);
            }
        }

        let response = self.dispatch(&request)?;
        if response.status != 401 {
            return check_status(response);
        }

        if !self.auth_required {
            return Err(FinanzError::Unauthorized(error_message(&response)));
        }

        let token = match self.refresh_access_token() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "token refresh failed, clearing session");
                self.session.clear()?;
                let reason = match e {
                    FinanzError::Unauthorized(message) => message,
                    other => other.to_string(),
                };
                return Err(FinanzError::SessionExpired(reason));
            }
        };

        debug!(method = %request.method, url = %request.url, "retrying with refreshed token");
        request.set_bearer(&token);
        let retried = self.dispatch(&request)?;
        if retried.status == 401 {
            return Err(FinanzError::Unauthorized(error_message(&retried)));
        }
        check_status(retried)
    }

    fn dispatch(&self, request: &HttpRequest) -> FinanzResult<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "sending request");
        match self.transport.send(request) {
            Ok(response) => {
                if !response.is_success() {
                    warn!(
                        method = %request.method,
                        url = %request.url,
                        status = response.status,
                        "request failed"
                    );
                }
                Ok(response)
            }
            Err(e) => {
                warn!(method = %request.method, url = %request.url, error = %e, "request failed");
                Err(e)
            }
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn check_status(response: HttpResponse) -> FinanzResult<HttpResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(http_error(&response))
    }
}

fn http_error(response: &HttpResponse) -> FinanzError {
    FinanzError::Http {
        status: response.status,
        message: error_message(response),
    }
}

/// Human-readable message for a failed response: the JSON `error` or
/// `message` field, else the body text, else the status reason
pub fn error_message(response: &HttpResponse) -> String {
    if let Ok(serde_json::Value::Object(map)) =
        serde_json::from_slice::<serde_json::Value>(&response.body)
    {
        for key in ["error", "message"] {
            if let Some(serde_json::Value::String(message)) = map.get(key) {
                if !message.trim().is_empty() {
                    return message.trim().to_string();
                }
            }
        }
    }

    let text = response.text();
    let text = text.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    reqwest::StatusCode::from_u16(response.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{logged_in_client, test_client, ScriptedTransport};
    use crate::api::RequestBody;
    use serde_json::json;

    #[test]
    fn test_get_attaches_bearer() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!([1, 2, 3]));
        let client = logged_in_client(&transport);

        let response: ApiResponse<Vec<u32>> = client.get("/categories").unwrap();
        assert_eq!(response.data, vec![1, 2, 3]);
        assert_eq!(response.origin, Origin::Live);

        let request = transport.request(0);
        assert_eq!(request.url, "http://api.test/categories");
        assert_eq!(request.header_value("Authorization"), Some("Bearer access-1"));
    }

    #[test]
    fn test_no_bearer_without_session() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({}));
        let client = test_client(&transport);

        let _: ApiResponse<serde_json::Value> = client.get("/auth/me").unwrap();
        assert_eq!(transport.request(0).header_value("Authorization"), None);
    }

    #[test]
    fn test_401_refreshes_once_and_retries() {
        let transport = ScriptedTransport::new();
        transport.push_status(401);
        transport.push_json(200, json!({"access_token": "access-2"}));
        transport.push_json(200, json!({"ok": true}));
        let client = logged_in_client(&transport);

        let response: ApiResponse<serde_json::Value> = client.get("/transactions").unwrap();
        assert_eq!(response.data, json!({"ok": true}));

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].url, "http://api.test/auth/refresh-token");
        assert_eq!(requests[1].header_value("Authorization"), None);
        assert_eq!(
            requests[1].json_body(),
            Some(&json!({"refresh_token": "refresh-1"}))
        );
        assert_eq!(requests[2].header_value("Authorization"), Some("Bearer access-2"));
        assert_eq!(
            client.session().access_token().unwrap().as_deref(),
            Some("access-2")
        );
    }

    #[test]
    fn test_second_401_is_not_refreshed_again() {
        let transport = ScriptedTransport::new();
        transport.push_status(401);
        transport.push_json(200, json!({"access_token": "access-2"}));
        transport.push_status(401);
        let client = logged_in_client(&transport);

        let err = client.get::<serde_json::Value>("/transactions").unwrap_err();
        assert!(matches!(err, FinanzError::Unauthorized(_)));
        assert_eq!(transport.requests().len(), 3);
        assert!(client.session().is_logged_in().unwrap());
    }

    #[test]
    fn test_failed_refresh_clears_session() {
        let transport = ScriptedTransport::new();
        transport.push_status(401);
        transport.push_json(403, json!({"error": "refresh token revoked"}));
        let client = logged_in_client(&transport);

        let err = client.get::<serde_json::Value>("/transactions").unwrap_err();
        match err {
            FinanzError::SessionExpired(reason) => assert!(reason.contains("revoked")),
            other => panic!("expected SessionExpired, got {:?}", other),
        }
        assert!(!client.session().is_logged_in().unwrap());
        assert!(client.session().user().unwrap().is_none());
    }

    #[test]
    fn test_401_without_refresh_token_expires_session() {
        let transport = ScriptedTransport::new();
        transport.push_status(401);
        let client = test_client(&transport);

        let err = client.get::<serde_json::Value>("/transactions").unwrap_err();
        assert!(matches!(err, FinanzError::SessionExpired(_)));
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_401_unauthenticated_client_is_unauthorized() {
        let transport = ScriptedTransport::new();
        transport.push_json(401, json!({"message": "bad credentials"}));
        let client = logged_in_client(&transport).unauthenticated();

        let err = client
            .post::<serde_json::Value, _>("/auth/login", &json!({}))
            .unwrap_err();
        match err {
            FinanzError::Unauthorized(message) => assert_eq!(message, "bad credentials"),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
        assert_eq!(transport.request(0).header_value("Authorization"), None);
        assert!(client.session().is_logged_in().unwrap());
    }

    #[test]
    fn test_http_error_message_sources() {
        let transport = ScriptedTransport::new();
        transport.push_json(400, json!({"error": "amount must be positive"}));
        transport.push_response(HttpResponse::new(502, "upstream down"));
        transport.push_response(HttpResponse::new(404, Vec::new()));
        let client = logged_in_client(&transport);

        let err = client.get::<serde_json::Value>("/a").unwrap_err();
        assert_eq!(err.to_string(), "HTTP 400: amount must be positive");

        let err = client.get::<serde_json::Value>("/b").unwrap_err();
        assert!(err.is_backend_unavailable());
        assert_eq!(err.to_string(), "HTTP 502: upstream down");

        let err = client.get::<serde_json::Value>("/c").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_decode_error_for_wrong_shape() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"not": "a list"}));
        let client = logged_in_client(&transport);

        let err = client.get::<Vec<u32>>("/categories").unwrap_err();
        assert!(matches!(err, FinanzError::Decode(_)));
    }

    #[test]
    fn test_query_and_body_are_forwarded() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!([]));
        transport.push_json(201, json!({"id": "x"}));
        transport.push_status(204);
        let client = logged_in_client(&transport);

        let query = vec![("start_date".to_string(), "2025-01-01".to_string())];
        let _: ApiResponse<Vec<u8>> = client.get_with_query("/transactions", &query).unwrap();
        let created: ApiResponse<serde_json::Value> =
            client.post("/categories", &json!({"name": "Pets"})).unwrap();
        let _: ApiResponse<()> = client.delete("/categories/x").unwrap();

        assert_eq!(created.status, 201);
        let requests = transport.requests();
        assert_eq!(requests[0].query, query);
        assert_eq!(requests[1].method, Method::Post);
        assert_eq!(requests[1].json_body(), Some(&json!({"name": "Pets"})));
        assert_eq!(requests[2].method, Method::Delete);
    }

    #[test]
    fn test_upload_file_builds_multipart() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"ok": true}));
        let client = logged_in_client(&transport);

        let file = UploadFile::new("a.png", "image/png", vec![1, 2]);
        let extra = vec![("kind".to_string(), "receipt".to_string())];
        let _: ApiResponse<serde_json::Value> =
            client.upload_file("/uploads", file, None, &extra).unwrap();

        match &transport.request(0).body {
            RequestBody::Multipart(parts) => {
                assert_eq!(parts.len(), 2);
                assert_eq!(parts[0].name(), "file");
                assert_eq!(
                    parts[1],
                    FormPart::Text {
                        name: "kind".into(),
                        value: "receipt".into()
                    }
                );
            }
            other => panic!("expected multipart, got {:?}", other),
        }
    }

    #[test]
    fn test_download_uses_content_disposition() {
        let transport = ScriptedTransport::new();
        transport.push_response(
            HttpResponse::new(200, "id,amount\n")
                .with_header("Content-Disposition", "attachment; filename=\"tx.csv\""),
        );
        let client = logged_in_client(&transport);

        let download = client.download_file("/transactions/export/csv", &[], None).unwrap();
        assert_eq!(download.filename, "tx.csv");
        assert_eq!(download.bytes, b"id,amount\n");
    }

    #[test]
    fn test_url_joining() {
        let transport = ScriptedTransport::new();
        let session = Arc::new(SessionStore::in_memory());
        let client = ApiClient::new(" http://localhost:8080/api/ ", transport, session);
        assert_eq!(client.url("/categories"), "http://localhost:8080/api/categories");
        assert_eq!(client.url("https://other/x"), "https://other/x");
    }

    #[test]
    fn test_set_base_url() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!([]));
        let mut client = test_client(&transport);

        client.set_base_url(" https://finanz.example.com/api// ");
        assert_eq!(client.base_url(), "https://finanz.example.com/api");

        let _: ApiResponse<Vec<u32>> = client.get("/categories").unwrap();
        assert_eq!(
            transport.request(0).url,
            "https://finanz.example.com/api/categories"
        );
    }
}
