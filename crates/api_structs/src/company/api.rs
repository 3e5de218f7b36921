use crate::dtos::CompanyDTO;
use serde::{Deserialize, Serialize};
use subex_domain::Company;

pub mod create_company {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub website: Option<String>,
    }

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub company: CompanyDTO,
    }

    impl APIResponse {
        pub fn new(company: Company) -> Self {
            Self {
                company: CompanyDTO::new(company),
            }
        }
    }
}

pub mod get_companies {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub companies: Vec<CompanyDTO>,
    }

    impl APIResponse {
        pub fn new(companies: Vec<Company>) -> Self {
            Self {
                companies: companies.into_iter().map(CompanyDTO::new).collect(),
            }
        }
    }
}
