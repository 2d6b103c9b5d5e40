use std::sync::Arc;

use axum::{Extension, extract::OriginalUri, response::Html};
use tokio::sync::Mutex;

use crate::{management::TokenManager, warning};

pub async fn callback(
    OriginalUri(uri): OriginalUri,
    Extension(manager): Extension<Arc<Mutex<TokenManager>>>,
) -> Html<&'static str> {
    let mut manager = manager.lock().await;

    match manager.handle_redirect_callback(&uri.to_string()).await {
        Ok(()) if manager.is_authorized() => Html(
            "<h2>Authentication successful.</h2><p>You can close this browser window.</p>",
        ),
        Ok(()) => Html("<h4>Missing authorization code.</h4>"),
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
