mod alert;
mod company;
mod cron;
mod status;
mod subscription;

pub mod dtos {
    pub use crate::alert::dtos::*;
    pub use crate::company::dtos::*;
    pub use crate::subscription::dtos::*;
}

pub use crate::alert::api::*;
pub use crate::company::api::*;
pub use crate::cron::api::*;
pub use crate::status::api::*;
pub use crate::subscription::api::*;
