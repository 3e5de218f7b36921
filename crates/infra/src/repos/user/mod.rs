mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;
use subex_domain::{User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<User>>;
}

#[cfg(test)]
mod tests {
    use crate::setup_inmemory_context;
    use subex_domain::User;

    #[tokio::test]
    async fn finds_inserted_users() {
        let ctx = setup_inmemory_context();
        let user = User::new("kari@example.com", "Kari");
        let other = User::new("ola@example.com", "Ola");
        ctx.repos.users.insert(&user).await.expect("To insert user");
        ctx.repos.users.insert(&other).await.expect("To insert user");

        assert_eq!(ctx.repos.users.find(&user.id).await, Some(user.clone()));
        assert!(ctx.repos.users.find(&Default::default()).await.is_none());

        let found = ctx
            .repos
            .users
            .find_many(&[user.id.clone(), Default::default()])
            .await
            .expect("To find users");
        assert_eq!(found, vec![user]);
    }
}
