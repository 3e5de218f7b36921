use crate::error::SubExError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use subex_api_structs::create_company::{APIResponse, RequestBody};
use subex_domain::Company;
use subex_infra::SubExContext;

pub async fn create_company_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<SubExContext>,
) -> Result<HttpResponse, SubExError> {
    protect_route(&http_req, &ctx).await?;
    let body = body.0;

    let usecase = CreateCompanyUseCase {
        name: body.name,
        website: body.website,
    };

    execute(usecase, &ctx)
        .await
        .map(|company| HttpResponse::Created().json(APIResponse::new(company)))
        .map_err(SubExError::from)
}

#[derive(Debug)]
pub struct CreateCompanyUseCase {
    pub name: String,
    pub website: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    EmptyName,
    StorageError,
}

impl From<UseCaseError> for SubExError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyName => {
                Self::BadClientData("The company name must not be empty.".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateCompanyUseCase {
    type Response = Company;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateCompany";

    async fn execute(&mut self, ctx: &SubExContext) -> Result<Self::Response, Self::Error> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(UseCaseError::EmptyName);
        }

        let mut company = Company::new(name);
        company.website = self
            .website
            .as_deref()
            .map(str::trim)
            .filter(|website| !website.is_empty())
            .map(String::from);

        ctx.repos
            .companies
            .insert(&company)
            .await
            .map(|_| company)
            .map_err(|_| UseCaseError::StorageError)
    }
}
