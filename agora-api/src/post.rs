use crate::{CommunityId, Error, PostId, Session, Time, UserId};

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Post {
    pub id: PostId,
    pub community_id: CommunityId,
    /// Denormalized by the store's joined select, so one fetch renders the
    /// community link.
    pub community_name: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub author_id: UserId,
    pub author_name: String,
    pub author_email: String,
    pub created_at: Time,
}

/// A post as returned by the aggregate listings, with like and comment counts
/// computed store-side.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PostSummary {
    #[serde(flatten)]
    pub post: Post,
    pub like_count: i64,
    pub comment_count: i64,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewPost {
    pub community_id: CommunityId,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub author_id: UserId,
    pub author_name: String,
    pub author_email: String,
}

impl NewPost {
    pub fn new(
        session: Option<&Session>,
        community_id: CommunityId,
        title: String,
        content: String,
        image_url: Option<String>,
    ) -> Result<NewPost, Error> {
        let session = session.ok_or(Error::LoggedOut)?;
        if title.trim().is_empty() {
            return Err(Error::InvalidName(title));
        }
        Ok(NewPost {
            community_id,
            title,
            content,
            image_url,
            author_id: session.user_id,
            author_name: session.display_name.clone(),
            author_email: session.email.clone(),
        })
    }
}
