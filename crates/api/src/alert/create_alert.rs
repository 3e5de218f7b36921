use crate::error::SubExError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use subex_api_structs::create_alert::{APIResponse, RequestBody};
use subex_domain::{
    Alert, AlertOn, AlertUnit, ScheduledAlert, MAX_ALERTS_PER_SUBSCRIPTION, MAX_ALERT_QUANTITY, ID,
};
use subex_infra::SubExContext;

pub async fn create_alert_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<SubExContext>,
) -> Result<HttpResponse, SubExError> {
    let user = protect_route(&http_req, &ctx).await?;
    let body = body.0;

    let usecase = CreateAlertUseCase {
        user_id: user.id,
        subscription_id: body.subscription_id,
        quantity: body.quantity,
        unit: body.unit,
        alert_on: body.alert_on,
        contact: body.contact.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|(alert, scheduled_alert)| {
            HttpResponse::Created().json(APIResponse::new(alert, scheduled_alert))
        })
        .map_err(SubExError::from)
}

#[derive(Debug)]
pub struct CreateAlertUseCase {
    pub user_id: ID,
    pub subscription_id: ID,
    pub quantity: i64,
    pub unit: AlertUnit,
    pub alert_on: AlertOn,
    pub contact: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidQuantity(i64),
    SubscriptionNotFound(ID),
    AlertLimitReached(ID),
    StorageError,
}

impl From<UseCaseError> for SubExError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidQuantity(quantity) => Self::BadClientData(format!(
                "The alert quantity must be between 1 and {}, got: {}",
                MAX_ALERT_QUANTITY, quantity
            )),
            UseCaseError::SubscriptionNotFound(subscription_id) => Self::NotFound(format!(
                "The subscription with id: {}, was not found.",
                subscription_id
            )),
            UseCaseError::AlertLimitReached(subscription_id) => Self::BadClientData(format!(
                "The subscription with id: {} already has the maximum of {} alerts.",
                subscription_id, MAX_ALERTS_PER_SUBSCRIPTION
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateAlertUseCase {
    type Response = (Alert, Option<ScheduledAlert>);

    type Error = UseCaseError;

    const NAME: &'static str = "CreateAlert";

    async fn execute(&mut self, ctx: &SubExContext) -> Result<Self::Response, Self::Error> {
        let quantity = match u32::try_from(self.quantity) {
            Ok(quantity) if (1..=MAX_ALERT_QUANTITY).contains(&quantity) => quantity,
            _ => return Err(UseCaseError::InvalidQuantity(self.quantity)),
        };

        let subscription = match ctx.repos.subscriptions.find(&self.subscription_id).await {
            Some(subscription) if subscription.user_id == self.user_id => subscription,
            _ => {
                return Err(UseCaseError::SubscriptionNotFound(
                    self.subscription_id.clone(),
                ))
            }
        };

        let existing = ctx
            .repos
            .alerts
            .count_by_subscription(&subscription.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if existing >= MAX_ALERTS_PER_SUBSCRIPTION {
            return Err(UseCaseError::AlertLimitReached(subscription.id));
        }

        let alert = Alert {
            id: Default::default(),
            user_id: self.user_id.clone(),
            subscription_id: subscription.id.clone(),
            quantity,
            unit: self.unit,
            alert_on: self.alert_on,
            contact: self.contact.trim().to_string(),
            created_at: ctx.sys.now(),
        };
        ctx.repos
            .alerts
            .insert(&alert)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let scheduled_alert = ScheduledAlert::for_alert(&alert, &subscription);
        if let Some(scheduled_alert) = &scheduled_alert {
            ctx.repos
                .scheduled_alerts
                .insert(scheduled_alert)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        Ok((alert, scheduled_alert))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use subex_domain::{ScheduledAlertStatus, Subscription, User};
    use subex_infra::setup_inmemory_context;

    async fn setup(next_payment_date: Option<NaiveDate>) -> (SubExContext, User, Subscription) {
        let ctx = setup_inmemory_context();
        let user = User::new("ada@example.com", "Ada");
        ctx.repos.users.insert(&user).await.unwrap();
        let mut subscription = Subscription::new(user.id.clone(), "Premium", ctx.sys.now());
        subscription.next_payment_date = next_payment_date;
        ctx.repos.subscriptions.insert(&subscription).await.unwrap();
        (ctx, user, subscription)
    }

    fn usecase(user: &User, subscription: &Subscription, quantity: i64) -> CreateAlertUseCase {
        CreateAlertUseCase {
            user_id: user.id.clone(),
            subscription_id: subscription.id.clone(),
            quantity,
            unit: AlertUnit::Week,
            alert_on: AlertOn::PaymentDate,
            contact: "ada@example.com".into(),
        }
    }

    #[actix_web::main]
    #[test]
    async fn schedules_alert_before_payment_date() {
        let (ctx, user, subscription) =
            setup(NaiveDate::from_ymd_opt(2026, 3, 15)).await;

        let (alert, scheduled) = usecase(&user, &subscription, 2)
            .execute(&ctx)
            .await
            .unwrap();
        let scheduled = scheduled.expect("Alert to be scheduled");
        assert_eq!(scheduled.alert_id, alert.id);
        assert_eq!(
            scheduled.alert_send_date,
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
        assert_eq!(scheduled.status, ScheduledAlertStatus::Pending);
        assert_eq!(scheduled.retry_count, 0);
        assert!(ctx.repos.scheduled_alerts.find(&scheduled.id).await.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn keeps_alert_without_schedule_when_date_is_missing() {
        let (ctx, user, subscription) = setup(None).await;

        let (alert, scheduled) = usecase(&user, &subscription, 1)
            .execute(&ctx)
            .await
            .unwrap();
        assert!(scheduled.is_none());
        assert!(ctx.repos.alerts.find(&alert.id).await.is_some());
        assert!(ctx
            .repos
            .scheduled_alerts
            .find_by_alerts(&[alert.id])
            .await
            .unwrap()
            .is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_non_positive_quantity() {
        let (ctx, user, subscription) =
            setup(NaiveDate::from_ymd_opt(2026, 3, 15)).await;

        for quantity in [0, -1] {
            let res = usecase(&user, &subscription, quantity).execute(&ctx).await;
            assert!(matches!(res, Err(UseCaseError::InvalidQuantity(_))));
        }
    }

    #[actix_web::main]
    #[test]
    async fn bounds_quantity() {
        let (ctx, user, subscription) =
            setup(NaiveDate::from_ymd_opt(2026, 3, 15)).await;

        for quantity in [i64::from(MAX_ALERT_QUANTITY) + 1, 3_000_000_000, i64::MAX] {
            let res = usecase(&user, &subscription, quantity).execute(&ctx).await;
            assert!(matches!(res, Err(UseCaseError::InvalidQuantity(q)) if q == quantity));
        }
        assert!(ctx
            .repos
            .alerts
            .find_by_subscription(&subscription.id)
            .await
            .unwrap()
            .is_empty());

        let (alert, _) = usecase(&user, &subscription, i64::from(MAX_ALERT_QUANTITY))
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(alert.quantity, MAX_ALERT_QUANTITY);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_subscription_of_other_user() {
        let (ctx, _, subscription) = setup(NaiveDate::from_ymd_opt(2026, 3, 15)).await;
        let other = User::new("bob@example.com", "Bob");
        ctx.repos.users.insert(&other).await.unwrap();

        let res = usecase(&other, &subscription, 1).execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::SubscriptionNotFound(_))));
    }

    #[actix_web::main]
    #[test]
    async fn caps_alerts_per_subscription() {
        let (ctx, user, subscription) =
            setup(NaiveDate::from_ymd_opt(2026, 3, 15)).await;

        for _ in 0..MAX_ALERTS_PER_SUBSCRIPTION {
            assert!(usecase(&user, &subscription, 1).execute(&ctx).await.is_ok());
        }
        let res = usecase(&user, &subscription, 1).execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::AlertLimitReached(_))));
    }
}
