//! This module wraps the auth endpoints of the hosted backend
//!
//! Apart from the redirect-token exchange, auth failures are not propagated: they are logged
//! and degrade to "no user", and the embedding shell routes that to its sign-in screen.

use std::error::Error;

use serde::Deserialize;
use url::Url;

use crate::settings::AUDITOR_EMAIL;
use crate::user::User;

/// The auth gateway of the hosted backend
pub struct Auth {
    base_url: Url,
    api_key: String,
    redirect_url: String,
}

/// The interesting part of a `/auth/v1/user` reply
#[derive(Deserialize)]
struct UserRecord {
    email: String,
}

impl Auth {
    /// Create an auth gateway. This does not start a connection
    pub fn new<S: AsRef<str>, T: ToString, U: ToString>(base_url: S, api_key: T, redirect_url: U) -> Result<Self, Box<dyn Error>> {
        let base_url = Url::parse(base_url.as_ref())?;

        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
            redirect_url: redirect_url.to_string(),
        })
    }

    /// Exchange an access token for the user record it belongs to
    async fn fetch_user(&self, access_token: &str) -> Result<User, Box<dyn Error>> {
        let url = self.base_url.join("/auth/v1/user")?;

        let response = reqwest::Client::new()
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        let record: UserRecord = response.json().await?;
        Ok(User::new(record.email, access_token.to_string()))
    }

    /// Resolve the user coming back from an OAuth round trip.
    ///
    /// `fragment` is the URL fragment the provider redirected to (with or without its leading `#`).
    /// Returns `Ok(None)` when the fragment carries no access token at all.
    /// Unlike the other operations of this gateway, a failing token exchange IS returned as an error.
    ///
    /// The token is consumed here; the embedding shell is expected to strip the fragment from
    /// the visible URL afterwards, so the token does not linger in the address bar.
    pub async fn user_from_redirect_fragment(&self, fragment: &str) -> Result<Option<User>, Box<dyn Error>> {
        let access_token = match access_token_from_fragment(fragment) {
            None => return Ok(None),
            Some(token) => token,
        };

        let user = self.fetch_user(&access_token).await?;
        Ok(Some(user))
    }

    /// The signed-in user for this token, or `None` (errors are logged, not returned)
    pub async fn current_session(&self, access_token: &str) -> Option<User> {
        match self.fetch_user(access_token).await {
            Err(err) => {
                log::error!("Unable to fetch the current session: {}", err);
                None
            },
            Ok(user) => Some(user),
        }
    }

    /// The provider page to send the browser to for an OAuth sign-in.
    /// The embedding shell performs the actual redirect.
    pub fn oauth_sign_in_url(&self, provider: &str) -> Result<Url, Box<dyn Error>> {
        let mut url = self.base_url.join("/auth/v1/authorize")?;
        url.query_pairs_mut()
            .append_pair("provider", provider)
            .append_pair("redirect_to", &self.redirect_url);
        Ok(url)
    }

    /// Send a one-time sign-in link to this address
    pub async fn passwordless_sign_in(&self, email: &str) -> Result<(), Box<dyn Error>> {
        let mut url = self.base_url.join("/auth/v1/otp")?;
        url.query_pairs_mut().append_pair("redirect_to", &self.redirect_url);
        let body = serde_json::json!({ "email": email, "create_user": true });

        let response = reqwest::Client::new()
            .post(url)
            .header("apikey", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }
        Ok(())
    }

    /// Invalidate the session behind this token. Failures are logged only.
    pub async fn sign_out(&self, access_token: &str) {
        let url = match self.base_url.join("/auth/v1/logout") {
            Err(err) => {
                log::warn!("Unable to build the logout URL: {}", err);
                return;
            },
            Ok(url) => url,
        };

        let result = reqwest::Client::new()
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await;

        match result {
            Err(err) => log::warn!("Unable to sign out: {}", err),
            Ok(response) => {
                if response.status().is_success() == false {
                    log::warn!("Sign-out returned HTTP status {:?}", response.status());
                }
            },
        }
    }
}

/// Pull the access token out of an OAuth redirect fragment
/// (e.g. `#access_token=abc&token_type=bearer&expires_in=3600`)
pub fn access_token_from_fragment(fragment: &str) -> Option<String> {
    let fragment = fragment.trim_start_matches('#');
    url::form_urlencoded::parse(fragment.as_bytes())
        .find(|(key, _)| key == "access_token")
        .map(|(_, value)| value.into_owned())
}

/// Whether this user gets the auditor role.
///
/// The role is derived, not stored: a session whose email matches the configured
/// auditor address (case-insensitively) is the auditor, everybody else is a manager.
/// This predicate is the single authorization check the renderers rely on.
pub fn is_auditor(user: Option<&User>) -> bool {
    match user {
        None => false,
        Some(user) => user.email().to_lowercase() == AUDITOR_EMAIL.to_lowercase(),
    }
}
