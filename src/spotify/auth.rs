use reqwest::Client;

use crate::{Res, config::AuthConfig, types::TokenResponse};

/// Builds the provider authorization URL for the PKCE flow.
///
/// The challenge travels with `code_challenge_method=S256`; the verifier it
/// was derived from stays with the token manager until the code exchange.
pub fn build_authorize_url(cfg: &AuthConfig, code_challenge: &str) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        auth_url = cfg.auth_url,
        client_id = cfg.client_id,
        redirect_uri = cfg.redirect_uri,
        code_challenge = code_challenge,
        scope = cfg.scope
    )
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// Completes the OAuth 2.0 PKCE flow by posting the code together with the
/// verifier generated at the start of the flow. The authorization code is
/// single-use and short-lived, so the exchange should happen immediately
/// after the redirect.
///
/// # Errors
///
/// Network failures, non-2xx statuses, and malformed response bodies all
/// surface as errors; the caller leaves its token state untouched in every
/// failure case.
pub async fn exchange_code_pkce(
    client: &Client,
    cfg: &AuthConfig,
    code: &str,
    verifier: &str,
) -> Res<TokenResponse> {
    let res = client
        .post(&cfg.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", &cfg.client_id),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", &cfg.redirect_uri),
        ])
        .send()
        .await?
        .error_for_status()?;

    let token = res.json::<TokenResponse>().await?;
    Ok(token)
}

/// Exchanges a refresh token for a fresh access token.
///
/// The response may or may not carry a rotated refresh token; the caller
/// must keep its stored refresh token when the field is absent or empty.
pub async fn refresh_token(
    client: &Client,
    cfg: &AuthConfig,
    refresh_token: &str,
) -> Res<TokenResponse> {
    let res = client
        .post(&cfg.token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &cfg.client_id),
        ])
        .send()
        .await?
        .error_for_status()?;

    let token = res.json::<TokenResponse>().await?;
    Ok(token)
}
