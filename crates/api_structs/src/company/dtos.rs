use serde::{Deserialize, Serialize};
use subex_domain::{Company, ID};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDTO {
    pub id: ID,
    pub name: String,
    pub website: Option<String>,
}

impl CompanyDTO {
    pub fn new(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            website: company.website,
        }
    }
}
