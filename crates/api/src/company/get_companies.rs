use crate::error::SubExError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use subex_api_structs::get_companies::APIResponse;
use subex_domain::Company;
use subex_infra::SubExContext;

pub async fn get_companies_controller(
    http_req: HttpRequest,
    ctx: web::Data<SubExContext>,
) -> Result<HttpResponse, SubExError> {
    protect_route(&http_req, &ctx).await?;

    execute(GetCompaniesUseCase {}, &ctx)
        .await
        .map(|companies| HttpResponse::Ok().json(APIResponse::new(companies)))
        .map_err(|_| SubExError::InternalError)
}

#[derive(Debug)]
pub struct GetCompaniesUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetCompaniesUseCase {
    type Response = Vec<Company>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetCompanies";

    async fn execute(&mut self, ctx: &SubExContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .companies
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
