use chrono::Utc;
use reqwest::Client;

use crate::{
    Res,
    config::AuthConfig,
    error::Error,
    spotify,
    types::{TokenResponse, TokenState},
    utils, warning,
};

use super::credentials::{
    ACCOUNT_ACCESS_TOKEN, ACCOUNT_REFRESH_TOKEN, CredentialStore, SERVICE_SPOTIFY,
};

/// Access tokens count as expired this many seconds before literal expiry.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Owns the access/refresh tokens and their lifecycle.
///
/// `LoggedOut -> Authorizing -> Exchanging -> Valid -> Refreshing -> Valid`,
/// with `logout` returning to `LoggedOut` from anywhere. Constructed
/// explicitly and passed to consumers; there is no process-wide instance.
///
/// Failure semantics: network and decode errors leave the token state
/// unchanged and surface to the caller, which decides whether to re-prompt
/// login. Nothing here retries automatically.
pub struct TokenManager {
    cfg: AuthConfig,
    http: Client,
    store: Box<dyn CredentialStore>,
    state: TokenState,
    pending_verifier: Option<String>,
}

impl TokenManager {
    /// A manager with empty token state, for a fresh authorization flow.
    pub fn new(cfg: AuthConfig, store: Box<dyn CredentialStore>) -> Self {
        TokenManager {
            cfg,
            http: spotify::http_client(),
            store,
            state: TokenState::default(),
            pending_verifier: None,
        }
    }

    /// A manager populated from the credential store.
    ///
    /// Only the refresh token is trusted from disk: no expiry is persisted
    /// alongside the access token, so a stored access token is treated as
    /// stale and the first `ensure_valid_token` call refreshes.
    pub fn load(cfg: AuthConfig, store: Box<dyn CredentialStore>) -> Res<Self> {
        let refresh_token = store.read(SERVICE_SPOTIFY, ACCOUNT_REFRESH_TOKEN)?;
        let mut manager = Self::new(cfg, store);
        manager.state.refresh_token = refresh_token;
        Ok(manager)
    }

    /// Generates a PKCE verifier/challenge pair and opens the provider's
    /// authorization page in the user's browser.
    ///
    /// The verifier is held in memory for the subsequent code exchange. Only
    /// one authorization can be in flight: calling this again overwrites the
    /// pending verifier and invalidates the earlier flow.
    pub fn start_authorization(&mut self) {
        let code_verifier = utils::generate_code_verifier();
        let code_challenge = utils::generate_code_challenge(&code_verifier);

        let auth_url = spotify::auth::build_authorize_url(&self.cfg, &code_challenge);

        self.pending_verifier = Some(code_verifier);

        if webbrowser::open(&auth_url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                auth_url
            )
        }
    }

    /// Handles the final authorization redirect URL.
    ///
    /// Extracts the `code` query parameter and triggers the code exchange.
    /// A redirect without a code is logged and ignored; no state changes.
    pub async fn handle_redirect_callback(&mut self, url: &str) -> Res<()> {
        let Some(code) = utils::extract_query_param(url, "code") else {
            warning!("No authorization code found in redirect URL");
            return Ok(());
        };
        self.exchange_code(&code).await
    }

    /// Exchanges an authorization code for tokens using the pending PKCE
    /// verifier.
    ///
    /// On success the access token and expiry are replaced and persisted;
    /// the refresh token is updated only if the response carries a
    /// non-empty one. On failure the state is left unchanged.
    pub async fn exchange_code(&mut self, code: &str) -> Res<()> {
        let Some(verifier) = self.pending_verifier.clone() else {
            return Err(Error::AuthRequired);
        };

        let response = spotify::auth::exchange_code_pkce(&self.http, &self.cfg, code, &verifier).await?;

        self.pending_verifier = None;
        self.apply_token_response(response);
        Ok(())
    }

    /// Returns true when a usable access token is in place, refreshing it
    /// if necessary.
    ///
    /// No network call is made while the token is more than
    /// [`EXPIRY_MARGIN_SECS`] away from expiry. With an expired token and no
    /// refresh token this returns false and the caller must re-authorize.
    pub async fn ensure_valid_token(&mut self) -> bool {
        if self.has_valid_access_token() {
            return true;
        }
        if self.state.refresh_token.is_some() {
            return self.refresh_access_token().await;
        }
        false
    }

    /// Exchanges the stored refresh token for a fresh access token.
    ///
    /// Returns false on any failure without clearing existing tokens, so a
    /// transient network failure never forces a logout.
    pub async fn refresh_access_token(&mut self) -> bool {
        let Some(refresh) = self.state.refresh_token.clone() else {
            return false;
        };

        match spotify::auth::refresh_token(&self.http, &self.cfg, &refresh).await {
            Ok(response) => {
                self.apply_token_response(response);
                true
            }
            Err(e) => {
                warning!("Token refresh failed: {}", e);
                false
            }
        }
    }

    /// Clears all token state and deletes both credential entries.
    pub fn logout(&mut self) -> Res<()> {
        self.state = TokenState::default();
        self.pending_verifier = None;

        self.store.delete(SERVICE_SPOTIFY, ACCOUNT_ACCESS_TOKEN)?;
        self.store.delete(SERVICE_SPOTIFY, ACCOUNT_REFRESH_TOKEN)?;
        Ok(())
    }

    pub fn access_token(&self) -> Option<&str> {
        self.state.access_token.as_deref()
    }

    /// True once a code exchange has produced an access token.
    pub fn is_authorized(&self) -> bool {
        self.state.access_token.is_some()
    }

    pub fn state(&self) -> &TokenState {
        &self.state
    }

    fn has_valid_access_token(&self) -> bool {
        let (Some(_), Some(expires_at)) = (&self.state.access_token, self.state.expires_at) else {
            return false;
        };
        Utc::now().timestamp() < expires_at - EXPIRY_MARGIN_SECS
    }

    /// Applies a token endpoint response to memory and the credential store.
    ///
    /// The access token is persisted unconditionally. The refresh token is
    /// replaced only by a non-empty value; a response without one keeps the
    /// previously stored token, both in memory and on disk. Persistence
    /// failures degrade to warnings so a keyring hiccup doesn't invalidate
    /// an otherwise successful exchange.
    fn apply_token_response(&mut self, response: TokenResponse) {
        self.state.access_token = Some(response.access_token.clone());
        self.state.expires_at = Some(Utc::now().timestamp() + response.expires_in);

        if let Err(e) =
            self.store
                .save(SERVICE_SPOTIFY, ACCOUNT_ACCESS_TOKEN, &response.access_token)
        {
            warning!("Failed to persist access token: {}", e);
        }

        if let Some(refresh) = response.refresh_token.filter(|r| !r.is_empty()) {
            if let Err(e) = self
                .store
                .save(SERVICE_SPOTIFY, ACCOUNT_REFRESH_TOKEN, &refresh)
            {
                warning!("Failed to persist refresh token: {}", e);
            }
            self.state.refresh_token = Some(refresh);
        }
    }
}
