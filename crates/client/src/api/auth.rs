//! Login, signup and logout.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use workpro_core::{Email, UserProfile};

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignupRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Response of the login and signup endpoints.
#[derive(Deserialize)]
struct AuthResponse {
    token: String,
    user: UserProfile,
}

impl ApiClient {
    /// Sign in and store the token and profile in the session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` if the credentials are rejected, or
    /// `ApiError::Session` if the session cannot be written.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<UserProfile, ApiError> {
        let request = self.post("/api/auth/login").json(&LoginRequest {
            email: email.as_str(),
            password: password.expose_secret(),
        });
        self.complete_sign_in(request).await
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` if the backend refuses the signup, or
    /// `ApiError::Session` if the session cannot be written.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn signup(
        &self,
        name: &str,
        email: &Email,
        password: &SecretString,
    ) -> Result<UserProfile, ApiError> {
        let request = self.post("/api/auth/signup").json(&SignupRequest {
            name,
            email: email.as_str(),
            password: password.expose_secret(),
        });
        self.complete_sign_in(request).await
    }

    async fn complete_sign_in(
        &self,
        request: crate::request::ApiRequest,
    ) -> Result<UserProfile, ApiError> {
        let response: AuthResponse = self.send_json(request).await?;
        let token = SecretString::from(response.token);

        // A previous user's company must not leak into the new session.
        self.session().clear()?;
        self.session().sign_in(&token, &response.user)?;

        info!(user_id = %response.user.id, "Signed in");
        Ok(response.user)
    }

    /// Sign out locally by clearing the session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Session` if the session cannot be cleared.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.session().clear()?;
        info!("Signed out");
        Ok(())
    }
}
