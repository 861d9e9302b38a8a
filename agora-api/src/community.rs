use crate::{CommunityId, Error, Session, Time};

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Community {
    pub id: CommunityId,
    pub name: String,
    pub description: String,
    pub created_at: Time,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewCommunity {
    pub name: String,
    pub description: String,
}

impl NewCommunity {
    pub fn new(
        session: Option<&Session>,
        name: String,
        description: String,
    ) -> Result<NewCommunity, Error> {
        session.ok_or(Error::LoggedOut)?;
        if name.trim().is_empty() {
            return Err(Error::InvalidName(name));
        }
        Ok(NewCommunity { name, description })
    }
}
