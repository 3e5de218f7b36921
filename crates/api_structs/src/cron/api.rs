use serde::{Deserialize, Serialize};

pub mod run_alerts_job {
    use super::*;

    #[derive(Deserialize, Serialize, Debug, Default)]
    pub struct QueryParams {
        pub secret: Option<String>,
    }

    /// Outcome of one run of the alerts job
    #[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub processed: u32,
        pub sent: u32,
        pub failed: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub message: Option<String>,
    }
}

pub mod get_alert_stats {
    use super::*;

    #[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub pending: i64,
        pub processing: i64,
        pub sent: i64,
        pub failed: i64,
        /// Failed alerts which will not be retried anymore
        pub exhausted: i64,
    }
}
