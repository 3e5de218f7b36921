use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum APIErrorVariant {
    Network,
    MalformedResponse,
    BadClientData,
    Unauthorized,
    NotFound,
    UnexpectedStatusCode,
}

#[derive(Debug)]
pub struct APIError {
    pub variant: APIErrorVariant,
    pub message: String,
}

pub type APIResponse<T> = Result<T, APIError>;

pub(crate) struct BaseClient {
    client: Client,
    address: String,
    token: Option<String>,
}

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            client: Client::new(),
            address,
            token: None,
        }
    }

    /// Bearer token sent with every request. A user token for the user
    /// routes or the cron secret for the cron routes.
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.address.trim_end_matches('/'), path)
    }

    fn with_auth(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn handle_api_response<T: DeserializeOwned>(
        &self,
        res: Result<reqwest::Response, reqwest::Error>,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = res.map_err(|e| APIError {
            variant: APIErrorVariant::Network,
            message: e.to_string(),
        })?;

        let status = res.status();
        if status != expected_status_code {
            let variant = match status {
                StatusCode::BAD_REQUEST => APIErrorVariant::BadClientData,
                StatusCode::UNAUTHORIZED => APIErrorVariant::Unauthorized,
                StatusCode::NOT_FOUND => APIErrorVariant::NotFound,
                _ => APIErrorVariant::UnexpectedStatusCode,
            };
            let message = res.text().await.unwrap_or_default();
            return Err(APIError { variant, message });
        }

        res.json::<T>().await.map_err(|e| APIError {
            variant: APIErrorVariant::MalformedResponse,
            message: e.to_string(),
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let req = self.with_auth(self.client.get(self.url(&path)));
        self.handle_api_response(req.send().await, expected_status_code)
            .await
    }

    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: String,
        query: &Q,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let req = self.with_auth(self.client.get(self.url(&path)).query(query));
        self.handle_api_response(req.send().await, expected_status_code)
            .await
    }

    pub async fn post<T: DeserializeOwned, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let req = self.with_auth(self.client.post(self.url(&path)).json(&body));
        self.handle_api_response(req.send().await, expected_status_code)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let req = self.with_auth(self.client.delete(self.url(&path)));
        self.handle_api_response(req.send().await, expected_status_code)
            .await
    }
}
