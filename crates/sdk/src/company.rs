use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use subex_api_structs::*;

#[derive(Clone)]
pub struct CompanyClient {
    base: Arc<BaseClient>,
}

impl CompanyClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        name: String,
        website: Option<String>,
    ) -> APIResponse<create_company::APIResponse> {
        let body = create_company::RequestBody { name, website };
        self.base
            .post(body, "companies".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get_all(&self) -> APIResponse<get_companies::APIResponse> {
        self.base.get("companies".into(), StatusCode::OK).await
    }
}
