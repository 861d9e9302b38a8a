use crate::{Error, PostId, Session, UserId};

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum VoteValue {
    Like,
    Dislike,
}

/// One vote per (post, user). Casting the same value again retracts the vote,
/// casting the opposite value flips it; the store owns that rule.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Vote {
    pub post_id: PostId,
    pub user_id: UserId,
    pub value: VoteValue,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewVote {
    pub post_id: PostId,
    pub user_id: UserId,
    pub value: VoteValue,
}

impl NewVote {
    pub fn new(
        session: Option<&Session>,
        post_id: PostId,
        value: VoteValue,
    ) -> Result<NewVote, Error> {
        let session = session.ok_or(Error::LoggedOut)?;
        Ok(NewVote {
            post_id,
            user_id: session.user_id,
            value,
        })
    }
}
