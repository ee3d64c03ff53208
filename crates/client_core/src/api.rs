use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::UserId,
    error::ApiErrorBody,
    protocol::{CreateUserRequest, ListUsersResponse, UpdateUserRequest, User},
};
use tracing::debug;

use crate::error::RequestError;

/// Remote user resource. Every call maps to exactly one HTTP request.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, RequestError>;
    async fn create_user(&self, request: &CreateUserRequest) -> Result<(), RequestError>;
    async fn update_user(
        &self,
        id: UserId,
        request: &UpdateUserRequest,
    ) -> Result<(), RequestError>;
    async fn delete_user(&self, id: UserId) -> Result<(), RequestError>;
}

pub struct HttpUserApi {
    http: Client,
    base_url: String,
}

impl HttpUserApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        format!("{}/user", self.base_url)
    }

    fn user_url(&self, id: UserId) -> String {
        format!("{}/user/{id}", self.base_url)
    }
}

async fn ensure_success(response: Response) -> Result<Response, RequestError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.bytes().await {
        Ok(body) => ApiErrorBody::from_slice(&body).into_message(),
        Err(_) => None,
    };
    Err(RequestError::rejected(status.as_u16(), message))
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn list_users(&self) -> Result<Vec<User>, RequestError> {
        let url = self.users_url();
        debug!(%url, "GET user list");
        let response = ensure_success(self.http.get(url).send().await?).await?;
        let body = response.bytes().await?;
        let envelope: ListUsersResponse = serde_json::from_slice(&body)?;
        Ok(envelope.into_users())
    }

    async fn create_user(&self, request: &CreateUserRequest) -> Result<(), RequestError> {
        let url = self.users_url();
        debug!(%url, username = %request.username, "POST user");
        ensure_success(self.http.post(url).json(request).send().await?).await?;
        Ok(())
    }

    async fn update_user(
        &self,
        id: UserId,
        request: &UpdateUserRequest,
    ) -> Result<(), RequestError> {
        let url = self.user_url(id);
        debug!(%url, "PUT user");
        ensure_success(self.http.put(url).json(request).send().await?).await?;
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> Result<(), RequestError> {
        let url = self.user_url(id);
        debug!(%url, "DELETE user");
        ensure_success(self.http.delete(url).send().await?).await?;
        Ok(())
    }
}
