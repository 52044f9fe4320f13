//! User profile service

use crate::api::ApiClient;
use crate::error::{FinanzError, FinanzResult};
use crate::models::{Page, UpdateUserRequest, User};

/// Service for the `/users` endpoints
pub struct UserService<'a> {
    client: &'a ApiClient,
}

impl<'a> UserService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn current_user(&self) -> FinanzResult<User> {
        Ok(self.client.get("/users/me")?.into_data())
    }

    /// Update the signed-in user's profile and refresh the stored copy
    pub fn update_profile(&self, request: &UpdateUserRequest) -> FinanzResult<User> {
        if request.is_empty() {
            return Err(FinanzError::Validation("Nothing to update".into()));
        }
        if let Some(email) = &request.email {
            if !email.contains('@') {
                return Err(FinanzError::Validation(format!(
                    "'{}' is not a valid email address",
                    email
                )));
            }
        }

        let user: User = self.client.put("/users/me", request)?.into_data();
        if self.client.session().is_logged_in()? {
            self.client.session().set_user(user.clone())?;
        }
        Ok(user)
    }

    /// Admin only
    pub fn get_by_id(&self, id: &str) -> FinanzResult<User> {
        Ok(self.client.get(&format!("/users/{}", id))?.into_data())
    }

    /// Admin only
    pub fn list(&self, page: Option<u32>, limit: Option<u32>) -> FinanzResult<Page<User>> {
        let mut query = Vec::new();
        if let Some(page) = page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        Ok(self.client.get_with_query("/users", &query)?.into_data())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{logged_in_client, ScriptedTransport};
    use crate::api::Method;
    use serde_json::json;

    #[test]
    fn test_update_profile_refreshes_stored_user() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"id": "u-1", "email": "ana@example.com", "name": "Ana B"}));
        let client = logged_in_client(&transport);

        let user = UserService::new(&client)
            .update_profile(&UpdateUserRequest {
                name: Some("Ana B".into()),
                email: None,
            })
            .unwrap();

        assert_eq!(user.name, "Ana B");
        assert_eq!(client.session().user().unwrap().unwrap().name, "Ana B");
        let request = transport.request(0);
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.json_body(), Some(&json!({"name": "Ana B"})));
    }

    #[test]
    fn test_empty_update_rejected() {
        let transport = ScriptedTransport::new();
        let client = logged_in_client(&transport);
        let err = UserService::new(&client)
            .update_profile(&UpdateUserRequest::default())
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_list_sends_pagination() {
        let transport = ScriptedTransport::new();
        transport.push_json(
            200,
            json!({"data": [{"id": "u-1", "email": "a@b.c"}], "total": 12}),
        );
        let client = logged_in_client(&transport);

        let page = UserService::new(&client).list(Some(2), Some(1)).unwrap();
        assert_eq!(page.total, 12);
        assert_eq!(page.data.len(), 1);
        assert_eq!(
            transport.request(0).query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "1".to_string())
            ]
        );
    }

    #[test]
    fn test_get_by_id_path() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"id": "u-7", "email": "z@b.c"}));
        let client = logged_in_client(&transport);

        let user = UserService::new(&client).get_by_id("u-7").unwrap();
        assert_eq!(user.id.as_str(), "u-7");
        assert_eq!(transport.request(0).url, "http://api.test/users/u-7");
    }
}
