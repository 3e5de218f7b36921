use crate::shared::entity::{Entity, ID};

/// A registered SubEx user. Owned by the authentication surface, the
/// alert pipeline only reads it to find a fallback contact address.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub name: String,
}

impl User {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            email: email.into(),
            name: name.into(),
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
