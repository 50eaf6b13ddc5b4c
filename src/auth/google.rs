/**
 * Google OAuth
 *
 * Provider-side half of the Google login flow:
 *
 * 1. `authorize_url` builds the consent URL with the `profile` scope and a
 *    random CSRF state; the route handler stashes the state in a short-lived
 *    cookie and redirects the browser to Google.
 * 2. `exchange_code` is called by the callback handler. It exchanges the
 *    authorization code for an access token and fetches the userinfo
 *    endpoint to obtain the stable Google account id.
 *
 * Every provider-side failure collapses into `AuthError::OAuthDenied`; the
 * caller's behavior is uniformly a redirect to the login view with nothing
 * created or mutated.
 */

use oauth2::basic::BasicClient;
use oauth2::url::Url;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;

use crate::auth::AuthError;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// The verified external profile, as far as this application cares: the
/// stable account id plus a display name when Google provides one.
#[derive(Debug, Deserialize)]
pub struct GoogleProfile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Google OAuth client configuration.
#[derive(Debug, Clone)]
pub struct GoogleOAuth {
    client_id: ClientId,
    client_secret: ClientSecret,
    redirect_url: RedirectUrl,
    auth_url: AuthUrl,
    token_url: TokenUrl,
}

impl GoogleOAuth {
    /// Build the client from the configured credentials and callback URL.
    pub fn new(
        client_id: String,
        client_secret: String,
        callback_url: String,
    ) -> Result<Self, oauth2::url::ParseError> {
        Ok(Self {
            client_id: ClientId::new(client_id),
            client_secret: ClientSecret::new(client_secret),
            redirect_url: RedirectUrl::new(callback_url)?,
            auth_url: AuthUrl::new(GOOGLE_AUTH_URL.to_string())?,
            token_url: TokenUrl::new(GOOGLE_TOKEN_URL.to_string())?,
        })
    }

    fn create_client(&self) -> ConfiguredClient {
        BasicClient::new(self.client_id.clone())
            .set_client_secret(self.client_secret.clone())
            .set_auth_uri(self.auth_url.clone())
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone())
    }

    /// Build the consent URL (with the `profile` scope) and its CSRF state.
    pub fn authorize_url(&self) -> (Url, CsrfToken) {
        self.create_client()
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("profile".to_string()))
            .url()
    }

    /// Exchange the callback's authorization code for the verified profile.
    pub async fn exchange_code(&self, code: &str) -> Result<GoogleProfile, AuthError> {
        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthError::OAuthDenied(e.to_string()))?;

        let token_result = self
            .create_client()
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&http_client)
            .await
            .map_err(|e| AuthError::OAuthDenied(format!("token exchange failed: {}", e)))?;

        let access_token = token_result.access_token().secret();

        let profile: GoogleProfile = reqwest::Client::new()
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::OAuthDenied(format!("userinfo request failed: {}", e)))?
            .json()
            .await
            .map_err(|e| AuthError::OAuthDenied(format!("userinfo response invalid: {}", e)))?;

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GoogleOAuth {
        GoogleOAuth::new(
            "test-client-id".to_string(),
            "test-client-secret".to_string(),
            "http://localhost:3000/auth/google/secrets".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_authorize_url_targets_google_with_profile_scope() {
        let (url, _state) = test_client().authorize_url();

        assert_eq!(url.host_str(), Some("accounts.google.com"));
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(query.contains(&("scope".to_string(), "profile".to_string())));
        assert!(query.contains(&("client_id".to_string(), "test-client-id".to_string())));
        assert!(query.iter().any(|(k, _)| k == "state"));
    }

    #[test]
    fn test_authorize_url_state_is_random() {
        let client = test_client();
        let (_, first) = client.authorize_url();
        let (_, second) = client.authorize_url();
        assert_ne!(first.secret(), second.secret());
    }

    #[test]
    fn test_invalid_callback_url_is_rejected() {
        let result = GoogleOAuth::new(
            "id".to_string(),
            "secret".to_string(),
            "not a url".to_string(),
        );
        assert!(result.is_err());
    }
}
