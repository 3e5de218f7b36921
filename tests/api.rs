mod helpers;

use chrono::NaiveDate;
use helpers::setup::spawn_app;
use helpers::utils::create_user_sdk;
use subex_sdk::{
    APIErrorVariant, AlertOn, AlertUnit, CreateAlertInput, CreateSubscriptionInput,
    ScheduledAlertStatus, SubExSDK, ID,
};

fn date(s: &str) -> NaiveDate {
    s.parse().expect("Valid date")
}

fn alert_input(subscription_id: &ID, quantity: i64, unit: AlertUnit) -> CreateAlertInput {
    CreateAlertInput {
        subscription_id: subscription_id.clone(),
        quantity,
        unit,
        alert_on: AlertOn::PaymentDate,
        contact: Some("billing@example.com".into()),
    }
}

async fn create_subscription(sdk: &SubExSDK, next_payment_date: Option<NaiveDate>) -> ID {
    sdk.subscription
        .create(CreateSubscriptionInput {
            name: "Premium".into(),
            price: Some(1299),
            currency: Some("EUR".into()),
            next_payment_date,
            ..Default::default()
        })
        .await
        .expect("To create subscription")
        .subscription
        .id
}

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_user_routes_require_token() {
    let (app, sdk, address) = spawn_app().await;
    let res = sdk.subscription.get_all().await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::Unauthorized);

    let invalid = SubExSDK::new(address, "not-a-token");
    let res = invalid.subscription.get_all().await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::Unauthorized);

    let (_, user_sdk) = create_user_sdk(&app, "ada@example.com").await;
    assert!(user_sdk.subscription.get_all().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_crud_subscriptions() {
    let (app, _, _) = spawn_app().await;
    let (user, sdk) = create_user_sdk(&app, "ada@example.com").await;
    let (_, other_sdk) = create_user_sdk(&app, "bob@example.com").await;

    let company = sdk
        .company
        .create("Spotify".into(), Some("https://spotify.com".into()))
        .await
        .expect("To create company")
        .company;
    let companies = sdk.company.get_all().await.unwrap().companies;
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].id, company.id);

    let subscription = sdk
        .subscription
        .create(CreateSubscriptionInput {
            name: "Premium".into(),
            company_id: Some(company.id.clone()),
            next_payment_date: Some(date("2026-03-15")),
            ..Default::default()
        })
        .await
        .expect("To create subscription")
        .subscription;
    assert_eq!(subscription.user_id, user.id);
    assert_eq!(subscription.company_id, Some(company.id));

    let res = sdk
        .subscription
        .create(CreateSubscriptionInput {
            name: "Premium".into(),
            company_id: Some(ID::default()),
            ..Default::default()
        })
        .await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::NotFound);

    let subscriptions = sdk.subscription.get_all().await.unwrap().subscriptions;
    assert_eq!(subscriptions.len(), 1);
    assert!(other_sdk
        .subscription
        .get_all()
        .await
        .unwrap()
        .subscriptions
        .is_empty());

    let res = other_sdk.subscription.delete(subscription.id.clone()).await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::NotFound);
    assert!(sdk.subscription.delete(subscription.id).await.is_ok());
    assert!(sdk
        .subscription
        .get_all()
        .await
        .unwrap()
        .subscriptions
        .is_empty());
}

#[actix_web::main]
#[test]
async fn test_create_alert_schedules_dispatch() {
    let (app, _, _) = spawn_app().await;
    let (_, sdk) = create_user_sdk(&app, "ada@example.com").await;
    let subscription_id = create_subscription(&sdk, Some(date("2026-03-15"))).await;

    let cases = [
        (1, AlertUnit::Day, "2026-03-14"),
        (2, AlertUnit::Week, "2026-03-01"),
        (1, AlertUnit::Month, "2026-02-15"),
    ];
    for (quantity, unit, expected) in cases {
        let res = sdk
            .alert
            .create(alert_input(&subscription_id, quantity, unit))
            .await
            .expect("To create alert");
        let scheduled = res.scheduled_alert.expect("Alert to be scheduled");
        assert_eq!(scheduled.alert_send_date, date(expected));
        assert_eq!(scheduled.status, ScheduledAlertStatus::Pending);
        assert_eq!(scheduled.retry_count, 0);
        assert_eq!(res.alert.contact, "billing@example.com");
    }

    let alerts = sdk
        .alert
        .get_by_subscription(subscription_id)
        .await
        .unwrap()
        .alerts;
    assert_eq!(alerts.len(), 3);
    assert!(alerts.iter().all(|a| a.scheduled_alerts.len() == 1));
}

#[actix_web::main]
#[test]
async fn test_create_alert_without_target_date() {
    let (app, _, _) = spawn_app().await;
    let (_, sdk) = create_user_sdk(&app, "ada@example.com").await;
    let subscription_id = create_subscription(&sdk, None).await;

    let res = sdk
        .alert
        .create(alert_input(&subscription_id, 1, AlertUnit::Day))
        .await
        .expect("To create alert");
    assert!(res.scheduled_alert.is_none());
}

#[actix_web::main]
#[test]
async fn test_create_alert_validation() {
    let (app, _, _) = spawn_app().await;
    let (_, sdk) = create_user_sdk(&app, "ada@example.com").await;
    let (_, other_sdk) = create_user_sdk(&app, "bob@example.com").await;
    let subscription_id = create_subscription(&sdk, Some(date("2026-03-15"))).await;

    let res = sdk
        .alert
        .create(alert_input(&subscription_id, 0, AlertUnit::Day))
        .await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::BadClientData);
    let res = sdk
        .alert
        .create(alert_input(&subscription_id, 3_000_000_000, AlertUnit::Day))
        .await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::BadClientData);

    let res = other_sdk
        .alert
        .create(alert_input(&subscription_id, 1, AlertUnit::Day))
        .await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::NotFound);

    for _ in 0..3 {
        assert!(sdk
            .alert
            .create(alert_input(&subscription_id, 1, AlertUnit::Day))
            .await
            .is_ok());
    }
    let res = sdk
        .alert
        .create(alert_input(&subscription_id, 1, AlertUnit::Day))
        .await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::BadClientData);
}

#[actix_web::main]
#[test]
async fn test_delete_alert() {
    let (app, _, _) = spawn_app().await;
    let (_, sdk) = create_user_sdk(&app, "ada@example.com").await;
    let (_, other_sdk) = create_user_sdk(&app, "bob@example.com").await;
    let subscription_id = create_subscription(&sdk, Some(date("2026-03-15"))).await;
    let res = sdk
        .alert
        .create(alert_input(&subscription_id, 1, AlertUnit::Day))
        .await
        .unwrap();
    let scheduled_id = res.scheduled_alert.unwrap().id;

    let res_other = other_sdk.alert.delete(res.alert.id.clone()).await;
    assert_eq!(res_other.unwrap_err().variant, APIErrorVariant::NotFound);

    assert!(sdk.alert.delete(res.alert.id.clone()).await.is_ok());
    assert!(app
        .ctx
        .repos
        .scheduled_alerts
        .find(&scheduled_id)
        .await
        .is_none());
    let res = sdk.alert.delete(res.alert.id).await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::NotFound);
}

#[actix_web::main]
#[test]
async fn test_cron_requires_secret() {
    let (app, sdk, address) = spawn_app().await;
    let res = sdk.cron.run_alerts().await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::Unauthorized);

    let wrong = SubExSDK::new(address, "wrong-secret");
    let res = wrong.cron.run_alerts().await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::Unauthorized);
    let res = wrong.cron.alert_stats().await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::Unauthorized);

    let res = sdk
        .cron
        .run_alerts_with_secret(app.config.cron_secret.clone())
        .await
        .expect("To run the alerts job");
    assert!(res.success);
    assert_eq!(res.processed, 0);
    assert_eq!(res.message, Some("No alerts due".into()));
}

#[actix_web::main]
#[test]
async fn test_cron_sends_due_alerts() {
    let (app, _, _) = spawn_app().await;
    let (_, sdk) = create_user_sdk(&app, "ada@example.com").await;
    let cron_sdk = app.cron_sdk();

    // Due today
    let subscription_id = create_subscription(&sdk, Some(date("2026-03-16"))).await;
    sdk.alert
        .create(alert_input(&subscription_id, 1, AlertUnit::Day))
        .await
        .unwrap();
    // Due next week
    let later_subscription_id = create_subscription(&sdk, Some(date("2026-03-29"))).await;
    sdk.alert
        .create(alert_input(&later_subscription_id, 1, AlertUnit::Week))
        .await
        .unwrap();

    let res = cron_sdk.cron.run_alerts().await.expect("To run the alerts job");
    assert!(res.success);
    assert_eq!(res.processed, 1);
    assert_eq!(res.sent, 1);
    assert_eq!(res.failed, 0);
    assert!(res.message.is_none());

    let alerts = sdk
        .alert
        .get_by_subscription(subscription_id)
        .await
        .unwrap()
        .alerts;
    let scheduled = &alerts[0].scheduled_alerts[0];
    assert_eq!(scheduled.status, ScheduledAlertStatus::Sent);
    assert!(scheduled.sent_at.is_some());

    let res = cron_sdk.cron.run_alerts().await.unwrap();
    assert_eq!(res.processed, 0);

    let stats = cron_sdk.cron.alert_stats().await.unwrap();
    assert_eq!(stats.sent, 1);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.exhausted, 0);
}

#[actix_web::main]
#[test]
async fn test_deleting_subscription_removes_alerts() {
    let (app, _, _) = spawn_app().await;
    let (_, sdk) = create_user_sdk(&app, "ada@example.com").await;
    let subscription_id = create_subscription(&sdk, Some(date("2026-03-16"))).await;
    let res = sdk
        .alert
        .create(alert_input(&subscription_id, 1, AlertUnit::Day))
        .await
        .unwrap();

    sdk.subscription.delete(subscription_id).await.unwrap();
    assert!(app.ctx.repos.alerts.find(&res.alert.id).await.is_none());

    let res = app.cron_sdk().cron.run_alerts().await.unwrap();
    assert_eq!(res.processed, 0);
}
