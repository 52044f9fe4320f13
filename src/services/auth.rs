//! Authentication service
//!
//! Login, registration, token refresh and logout. Successful logins are
//! written to the session store so later invocations stay signed in.

use tracing::{info, warn};

use crate::api::{ApiClient, REFRESH_PATH};
use crate::error::{FinanzError, FinanzResult};
use crate::models::{
    AuthResponse, ChangePasswordRequest, LoginRequest, RefreshResponse, RegisterRequest, User,
};

/// Service for the `/auth` endpoints
pub struct AuthService<'a> {
    client: &'a ApiClient,
    public: ApiClient,
}

impl<'a> AuthService<'a> {
    /// Create a new auth service
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            public: client.unauthenticated(),
        }
    }

    /// Sign in and store the returned tokens and profile
    pub fn login(&self, request: &LoginRequest) -> FinanzResult<AuthResponse> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(FinanzError::Validation(
                "Email and password are required".into(),
            ));
        }

        let auth: AuthResponse = self.public.post("/auth/login", request)?.into_data();
        self.client.session().store_login(&auth)?;
        info!(user = %auth.user.email, "logged in");

        Ok(auth)
    }

    /// Create an account. Does not sign in.
    pub fn register(&self, request: &RegisterRequest) -> FinanzResult<User> {
        request.validate().map_err(FinanzError::Validation)?;
        Ok(self.public.post("/auth/register", request)?.into_data())
    }

    /// Exchange the stored refresh token for a new access token
    pub fn refresh_token(&self) -> FinanzResult<String> {
        let refresh_token = self
            .client
            .session()
            .refresh_token()?
            .ok_or_else(|| FinanzError::Unauthorized("No refresh token available".into()))?;

        let body = serde_json::json!({ "refresh_token": refresh_token });
        let response: RefreshResponse = self.public.post(REFRESH_PATH, &body)?.into_data();
        self.client
            .session()
            .set_access_token(response.access_token.as_str())?;

        Ok(response.access_token)
    }

    pub fn change_password(&self, request: &ChangePasswordRequest) -> FinanzResult<()> {
        if request.new_password.chars().count() < 6 {
            return Err(FinanzError::Validation(
                "New password must be at least 6 characters".into(),
            ));
        }

        let _: serde_json::Value = self.client.post("/auth/change-password", request)?.into_data();
        Ok(())
    }

    /// Tell the backend, then always forget the local session
    pub fn logout(&self) -> FinanzResult<()> {
        if let Err(e) = self
            .client
            .post::<serde_json::Value, _>("/auth/logout", &serde_json::json!({}))
        {
            warn!(error = %e, "logout request failed");
        }

        self.client.session().clear()
    }

    /// Fetch the profile, falling back to the one stored at login
    pub fn current_user(&self) -> FinanzResult<User> {
        match self.client.get::<User>("/auth/me") {
            Ok(response) => Ok(response.into_data()),
            Err(e) => match self.client.session().user()? {
                Some(user) => {
                    warn!(error = %e, "using stored profile");
                    Ok(user)
                }
                None => Err(e),
            },
        }
    }

    pub fn is_logged_in(&self) -> FinanzResult<bool> {
        self.client.session().is_logged_in()
    }
}
