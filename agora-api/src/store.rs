use async_trait::async_trait;

use crate::{
    Comment, Community, CommunityId, Error, NewComment, NewCommunity, NewPost, NewVote, Post,
    PostId, PostSummary, Profile, Vote,
};

/// The query/insert boundary to the hosted store.
///
/// Listings come back already ordered: communities and post listings newest
/// first, comments oldest first (ascending `created_at`). Callers rely on
/// that ordering and never re-sort.
#[async_trait]
pub trait Store {
    async fn fetch_communities(&self) -> Result<Vec<Community>, Error>;
    async fn fetch_posts(&self) -> Result<Vec<PostSummary>, Error>;
    async fn fetch_post(&self, post: PostId) -> Result<Post, Error>;
    async fn fetch_community_posts(&self, community: CommunityId)
        -> Result<Vec<PostSummary>, Error>;
    async fn fetch_user_posts(&self, email: &str) -> Result<Vec<PostSummary>, Error>;
    async fn fetch_comments(&self, post: PostId) -> Result<Vec<Comment>, Error>;
    async fn fetch_votes(&self, post: PostId) -> Result<Vec<Vote>, Error>;
    async fn fetch_profile(&self, email: &str) -> Result<Profile, Error>;

    async fn insert_community(&self, community: NewCommunity) -> Result<(), Error>;
    async fn insert_post(&self, post: NewPost) -> Result<(), Error>;
    async fn insert_comment(&self, comment: NewComment) -> Result<(), Error>;
    async fn cast_vote(&self, vote: NewVote) -> Result<(), Error>;
    async fn update_bio(&self, email: &str, bio: String) -> Result<(), Error>;
}
