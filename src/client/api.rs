use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::models::{DeleteResponse, ErrorResponse, HealthResponse, InfoResponse, UsuarioPayload};
use crate::core::models::usuario::Usuario;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The API answered with a non-success status.
    #[error("Request failed with status code {status}")]
    Api { status: u16, message: Option<String> },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// The `error` text the API put in the response body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            ClientError::Transport(_) => None,
        }
    }
}

/// Calls the client makes against the `/api` routes.
#[async_trait]
pub trait UsuariosApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Usuario>, ClientError>;
    async fn get(&self, id: i32) -> Result<Usuario, ClientError>;
    async fn create(&self, payload: &UsuarioPayload) -> Result<Usuario, ClientError>;
    async fn update(&self, id: i32, payload: &UsuarioPayload) -> Result<Usuario, ClientError>;
    async fn delete(&self, id: i32) -> Result<DeleteResponse, ClientError>;
    async fn info(&self) -> Result<InfoResponse, ClientError>;
    async fn health(&self) -> Result<HealthResponse, ClientError>;
}

/// `reqwest` implementation of [`UsuariosApi`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiClient { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let message = response.json::<ErrorResponse>().await.ok().map(|body| body.error);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl UsuariosApi for ApiClient {
    async fn list(&self) -> Result<Vec<Usuario>, ClientError> {
        let response = self.http.get(self.url("/usuarios")).send().await?;
        Self::decode(response).await
    }

    async fn get(&self, id: i32) -> Result<Usuario, ClientError> {
        let response = self.http.get(self.url(&format!("/usuarios/{}", id))).send().await?;
        Self::decode(response).await
    }

    async fn create(&self, payload: &UsuarioPayload) -> Result<Usuario, ClientError> {
        let response = self.http.post(self.url("/usuarios")).json(payload).send().await?;
        Self::decode(response).await
    }

    async fn update(&self, id: i32, payload: &UsuarioPayload) -> Result<Usuario, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/usuarios/{}", id)))
            .json(payload)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: i32) -> Result<DeleteResponse, ClientError> {
        let response = self.http.delete(self.url(&format!("/usuarios/{}", id))).send().await?;
        Self::decode(response).await
    }

    async fn info(&self) -> Result<InfoResponse, ClientError> {
        let response = self.http.get(self.url("/alonso")).send().await?;
        Self::decode(response).await
    }

    /// A degraded service answers 500 with a health body; that body is still returned.
    async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self.http.get(self.url("/health")).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        match serde_json::from_slice::<HealthResponse>(&bytes) {
            Ok(health) => Ok(health),
            Err(_) => Err(ClientError::Api {
                status: status.as_u16(),
                message: None,
            }),
        }
    }
}
