mod inmemory;
mod postgres;

pub use inmemory::InMemoryCompanyRepo;
pub use postgres::PostgresCompanyRepo;
use subex_domain::{Company, ID};

#[async_trait::async_trait]
pub trait ICompanyRepo: Send + Sync {
    async fn insert(&self, company: &Company) -> anyhow::Result<()>;
    async fn find(&self, company_id: &ID) -> Option<Company>;
    async fn find_many(&self, company_ids: &[ID]) -> anyhow::Result<Vec<Company>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Company>>;
}
