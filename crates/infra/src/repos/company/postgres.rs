use super::ICompanyRepo;
use subex_domain::{Company, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresCompanyRepo {
    pool: PgPool,
}

impl PostgresCompanyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CompanyRaw {
    company_uid: Uuid,
    name: String,
    website: Option<String>,
}

impl From<CompanyRaw> for Company {
    fn from(raw: CompanyRaw) -> Self {
        Self {
            id: raw.company_uid.into(),
            name: raw.name,
            website: raw.website,
        }
    }
}

#[async_trait::async_trait]
impl ICompanyRepo for PostgresCompanyRepo {
    async fn insert(&self, company: &Company) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO companies(company_uid, name, website)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(company.id.inner_ref())
        .bind(&company.name)
        .bind(&company.website)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, company_id: &ID) -> Option<Company> {
        sqlx::query_as::<_, CompanyRaw>(
            r#"
            SELECT * FROM companies AS c
            WHERE c.company_uid = $1
            "#,
        )
        .bind(company_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Unable to find company: {:?}", e);
            None
        })
        .map(|company| company.into())
    }

    async fn find_many(&self, company_ids: &[ID]) -> anyhow::Result<Vec<Company>> {
        let company_ids = company_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();

        let companies = sqlx::query_as::<_, CompanyRaw>(
            r#"
            SELECT * FROM companies AS c
            WHERE c.company_uid = ANY($1)
            "#,
        )
        .bind(company_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(companies.into_iter().map(|c| c.into()).collect())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Company>> {
        let companies = sqlx::query_as::<_, CompanyRaw>(
            r#"
            SELECT * FROM companies
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(companies.into_iter().map(|c| c.into()).collect())
    }
}
