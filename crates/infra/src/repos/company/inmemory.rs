use super::ICompanyRepo;
use crate::repos::shared::inmemory_repo::*;
use subex_domain::{Company, ID};

pub struct InMemoryCompanyRepo {
    companies: std::sync::Mutex<Vec<Company>>,
}

impl InMemoryCompanyRepo {
    pub fn new() -> Self {
        Self {
            companies: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ICompanyRepo for InMemoryCompanyRepo {
    async fn insert(&self, company: &Company) -> anyhow::Result<()> {
        insert(company, &self.companies);
        Ok(())
    }

    async fn find(&self, company_id: &ID) -> Option<Company> {
        find(company_id, &self.companies)
    }

    async fn find_many(&self, company_ids: &[ID]) -> anyhow::Result<Vec<Company>> {
        Ok(find_many(company_ids, &self.companies))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Company>> {
        let mut companies = find_by(&self.companies, |_| true);
        companies.sort_by(|c1, c2| c1.name.cmp(&c2.name));
        Ok(companies)
    }
}
