//! Scripted transport for unit tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::{FinanzError, FinanzResult};
use crate::models::{AuthResponse, User, UserId};
use crate::storage::SessionStore;

use super::client::ApiClient;
use super::transport::{HttpRequest, HttpResponse, Transport};

pub const TEST_BASE_URL: &str = "http://api.test";

/// Replays queued responses in order and records every request
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<FinanzResult<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_response(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_json(&self, status: u16, value: serde_json::Value) {
        self.push_response(HttpResponse::json(status, &value));
    }

    pub fn push_status(&self, status: u16) {
        self.push_response(HttpResponse::new(status, Vec::new()));
    }

    pub fn push_error(&self, error: FinanzError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Queue a connection failure
    pub fn push_offline(&self) {
        self.push_error(FinanzError::Network("connection refused".into()));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request(&self, index: usize) -> HttpRequest {
        self.requests.lock().unwrap()[index].clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> FinanzResult<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FinanzError::Network("no scripted response left".into())))
    }
}

pub fn test_user() -> User {
    User {
        id: UserId::from("u-1"),
        email: "ana@example.com".into(),
        name: "Ana".into(),
        created_at: None,
        updated_at: None,
    }
}

/// Client with an empty in-memory session
pub fn test_client(transport: &Arc<ScriptedTransport>) -> ApiClient {
    ApiClient::new(
        TEST_BASE_URL,
        transport.clone(),
        Arc::new(SessionStore::in_memory()),
    )
}

/// Client whose session holds `access-1` / `refresh-1`
pub fn logged_in_client(transport: &Arc<ScriptedTransport>) -> ApiClient {
    let session = SessionStore::in_memory();
    session
        .store_login(&AuthResponse {
            access_token: "access-1".into(),
            refresh_token: "refresh-1".into(),
            user: test_user(),
        })
        .unwrap();
    ApiClient::new(TEST_BASE_URL, transport.clone(), Arc::new(session))
}
