use api_types::auth::{AuthCredentials, AuthToken};
use reqwest::{StatusCode, header::ACCEPT};

use crate::{ApiClient, ClientError, Result};

const AUTH_ENDPOINT: &str = "auth";

impl ApiClient {
    /// Exchanges credentials for a bearer token.
    ///
    /// The returned token is not stored; pass it to [`ApiClient::with_token`].
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<String> {
        let endpoint = self.endpoint_url(AUTH_ENDPOINT)?;

        let res = self
            .http()
            .post(endpoint)
            .header(ACCEPT, "application/json")
            .json(&AuthCredentials {
                user: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = res.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(ClientError::Unauthorized),
            status if !status.is_success() => {
                return Err(ClientError::Status {
                    status,
                    endpoint: AUTH_ENDPOINT.to_string(),
                });
            }
            _ => {}
        }

        let body = res.json::<AuthToken>().await.map_err(ClientError::Decode)?;
        let token = body.token.ok_or(ClientError::MissingToken)?;
        tracing::info!("authenticated as {username}");
        Ok(token)
    }
}
