mod email;

pub use email::{HttpEmailSender, IEmailSender, LogEmailSender};
