use crate::shared::entity::{Entity, ID};

/// Display metadata for the provider behind a `Subscription`
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub id: ID,
    pub name: String,
    pub website: Option<String>,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            website: None,
        }
    }
}

impl Entity for Company {
    fn id(&self) -> &ID {
        &self.id
    }
}
