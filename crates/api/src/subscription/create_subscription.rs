use crate::error::SubExError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use subex_api_structs::create_subscription::{APIResponse, RequestBody};
use subex_domain::{Subscription, ID};
use subex_infra::SubExContext;

pub async fn create_subscription_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<SubExContext>,
) -> Result<HttpResponse, SubExError> {
    let user = protect_route(&http_req, &ctx).await?;
    let body = body.0;

    let usecase = CreateSubscriptionUseCase {
        user_id: user.id,
        name: body.name,
        company_id: body.company_id,
        price: body.price,
        currency: body.currency,
        next_payment_date: body.next_payment_date,
        contract_expiry: body.contract_expiry,
    };

    execute(usecase, &ctx)
        .await
        .map(|subscription| HttpResponse::Created().json(APIResponse::new(subscription)))
        .map_err(SubExError::from)
}

#[derive(Debug)]
pub struct CreateSubscriptionUseCase {
    pub user_id: ID,
    pub name: String,
    pub company_id: Option<ID>,
    pub price: Option<i64>,
    pub currency: Option<String>,
    pub next_payment_date: Option<NaiveDate>,
    pub contract_expiry: Option<NaiveDate>,
}

#[derive(Debug)]
pub enum UseCaseError {
    EmptyName,
    InvalidPrice(i64),
    CompanyNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for SubExError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyName => {
                Self::BadClientData("The subscription name must not be empty.".into())
            }
            UseCaseError::InvalidPrice(price) => Self::BadClientData(format!(
                "The subscription price must not be negative, got: {}",
                price
            )),
            UseCaseError::CompanyNotFound(company_id) => Self::NotFound(format!(
                "The company with id: {}, was not found.",
                company_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateSubscriptionUseCase {
    type Response = Subscription;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateSubscription";

    async fn execute(&mut self, ctx: &SubExContext) -> Result<Self::Response, Self::Error> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(UseCaseError::EmptyName);
        }
        if let Some(price) = self.price.filter(|price| *price < 0) {
            return Err(UseCaseError::InvalidPrice(price));
        }
        if let Some(company_id) = &self.company_id {
            if ctx.repos.companies.find(company_id).await.is_none() {
                return Err(UseCaseError::CompanyNotFound(company_id.clone()));
            }
        }

        let mut subscription = Subscription::new(self.user_id.clone(), name, ctx.sys.now());
        subscription.company_id = self.company_id.clone();
        subscription.price = self.price;
        subscription.currency = self.currency.clone();
        subscription.next_payment_date = self.next_payment_date;
        subscription.contract_expiry = self.contract_expiry;

        ctx.repos
            .subscriptions
            .insert(&subscription)
            .await
            .map(|_| subscription)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subex_infra::setup_inmemory_context;

    fn usecase(company_id: Option<ID>) -> CreateSubscriptionUseCase {
        CreateSubscriptionUseCase {
            user_id: ID::default(),
            name: " Premium ".into(),
            company_id,
            price: Some(1299),
            currency: Some("EUR".into()),
            next_payment_date: NaiveDate::from_ymd_opt(2026, 3, 15),
            contract_expiry: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_subscription() {
        let ctx = setup_inmemory_context();
        let subscription = usecase(None).execute(&ctx).await.unwrap();
        assert_eq!(subscription.name, "Premium");
        assert_eq!(
            ctx.repos.subscriptions.find(&subscription.id).await,
            Some(subscription)
        );
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_company() {
        let ctx = setup_inmemory_context();
        let res = usecase(Some(ID::default())).execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::CompanyNotFound(_))));
    }
}
