use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::TimeZone;
use parking_lot::Mutex;

use agora_api::{
    AuthToken, Comment, CommentId, Community, CommunityId, Error, NewComment, NewCommunity,
    NewPost, NewVote, Post, PostId, PostSummary, Profile, Session, Store, Time, UserId, Uuid,
    VoteValue,
};

/// In-memory stand-in for the hosted store, for tests.
///
/// Ids are assigned sequentially and the clock ticks one second per insert,
/// so fetch ordering is deterministic regardless of wall time.
pub struct MockStore(Mutex<State>);

struct State {
    clock: Time,
    next_comment: i64,
    next_post: i64,
    next_community: i64,
    communities: BTreeMap<CommunityId, Community>,
    posts: BTreeMap<PostId, Post>,
    comments: BTreeMap<CommentId, Comment>,
    votes: Vec<(PostId, UserId, VoteValue)>,
    profiles: HashMap<String, Profile>,
}

impl State {
    fn tick(&mut self) -> Time {
        self.clock = self.clock + chrono::Duration::seconds(1);
        self.clock
    }

    fn counts_for(&self, post: PostId) -> (i64, i64) {
        let likes = self
            .votes
            .iter()
            .filter(|(p, _, v)| *p == post && *v == VoteValue::Like)
            .count() as i64;
        let comments = self.comments.values().filter(|c| c.post_id == post).count() as i64;
        (likes, comments)
    }

    fn summarize(&self, post: &Post) -> PostSummary {
        let (like_count, comment_count) = self.counts_for(post.id);
        PostSummary {
            post: post.clone(),
            like_count,
            comment_count,
        }
    }
}

impl MockStore {
    pub fn new() -> MockStore {
        MockStore(Mutex::new(State {
            clock: chrono::Utc
                .timestamp_opt(0, 0)
                .single()
                .expect("building epoch timestamp"),
            next_comment: 1,
            next_post: 1,
            next_community: 1,
            communities: BTreeMap::new(),
            posts: BTreeMap::new(),
            comments: BTreeMap::new(),
            votes: Vec::new(),
            profiles: HashMap::new(),
        }))
    }

    /// Registers a user with the mock identity provider and returns their
    /// session, the way the real provider would after a login redirect.
    pub fn admin_create_user(&self, name: &str, email: &str) -> Session {
        let mut state = self.0.lock();
        let user_id = UserId(Uuid::new_v4());
        let created_at = state.tick();
        state.profiles.insert(
            email.to_string(),
            Profile {
                user_id,
                name: name.to_string(),
                email: email.to_string(),
                avatar_url: None,
                bio: String::new(),
                created_at,
            },
        );
        Session {
            token: AuthToken(Uuid::new_v4()),
            user_id,
            display_name: name.to_string(),
            email: email.to_string(),
        }
    }

    /// Removes a comment without touching its replies, leaving them orphaned
    /// the way a store-side delete would.
    pub fn admin_delete_comment(&self, id: CommentId) {
        self.0.lock().comments.remove(&id);
    }
}

impl Default for MockStore {
    fn default() -> MockStore {
        MockStore::new()
    }
}

#[async_trait]
impl Store for MockStore {
    async fn fetch_communities(&self) -> Result<Vec<Community>, Error> {
        let state = self.0.lock();
        let mut res = state.communities.values().cloned().collect::<Vec<_>>();
        res.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(res)
    }

    async fn fetch_posts(&self) -> Result<Vec<PostSummary>, Error> {
        let state = self.0.lock();
        let mut res = state
            .posts
            .values()
            .map(|p| state.summarize(p))
            .collect::<Vec<_>>();
        res.sort_by(|a, b| b.post.created_at.cmp(&a.post.created_at));
        Ok(res)
    }

    async fn fetch_post(&self, post: PostId) -> Result<Post, Error> {
        self.0
            .lock()
            .posts
            .get(&post)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("post {}", post.0)))
    }

    async fn fetch_community_posts(
        &self,
        community: CommunityId,
    ) -> Result<Vec<PostSummary>, Error> {
        let state = self.0.lock();
        if !state.communities.contains_key(&community) {
            return Err(Error::NotFound(format!("community {}", community.0)));
        }
        let mut res = state
            .posts
            .values()
            .filter(|p| p.community_id == community)
            .map(|p| state.summarize(p))
            .collect::<Vec<_>>();
        res.sort_by(|a, b| b.post.created_at.cmp(&a.post.created_at));
        Ok(res)
    }

    async fn fetch_user_posts(&self, email: &str) -> Result<Vec<PostSummary>, Error> {
        let state = self.0.lock();
        let mut res = state
            .posts
            .values()
            .filter(|p| p.author_email == email)
            .map(|p| state.summarize(p))
            .collect::<Vec<_>>();
        res.sort_by(|a, b| b.post.created_at.cmp(&a.post.created_at));
        Ok(res)
    }

    async fn fetch_comments(&self, post: PostId) -> Result<Vec<Comment>, Error> {
        let state = self.0.lock();
        let mut res = state
            .comments
            .values()
            .filter(|c| c.post_id == post)
            .cloned()
            .collect::<Vec<_>>();
        res.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(res)
    }

    async fn fetch_votes(&self, post: PostId) -> Result<Vec<agora_api::Vote>, Error> {
        Ok(self
            .0
            .lock()
            .votes
            .iter()
            .filter(|(p, _, _)| *p == post)
            .map(|&(post_id, user_id, value)| agora_api::Vote {
                post_id,
                user_id,
                value,
            })
            .collect())
    }

    async fn fetch_profile(&self, email: &str) -> Result<Profile, Error> {
        self.0
            .lock()
            .profiles
            .get(email)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("profile {}", email)))
    }

    async fn insert_community(&self, community: NewCommunity) -> Result<(), Error> {
        let mut state = self.0.lock();
        let id = CommunityId(state.next_community);
        state.next_community += 1;
        let created_at = state.tick();
        state.communities.insert(
            id,
            Community {
                id,
                name: community.name,
                description: community.description,
                created_at,
            },
        );
        Ok(())
    }

    async fn insert_post(&self, post: NewPost) -> Result<(), Error> {
        let mut state = self.0.lock();
        let community_name = match state.communities.get(&post.community_id) {
            Some(c) => c.name.clone(),
            None => {
                return Err(Error::NotFound(format!(
                    "community {}",
                    post.community_id.0
                )))
            }
        };
        let id = PostId(state.next_post);
        state.next_post += 1;
        let created_at = state.tick();
        state.posts.insert(
            id,
            Post {
                id,
                community_id: post.community_id,
                community_name,
                title: post.title,
                content: post.content,
                image_url: post.image_url,
                author_id: post.author_id,
                author_name: post.author_name,
                author_email: post.author_email,
                created_at,
            },
        );
        Ok(())
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<(), Error> {
        let mut state = self.0.lock();
        if !state.posts.contains_key(&comment.post_id) {
            return Err(Error::NotFound(format!("post {}", comment.post_id.0)));
        }
        // The parent is deliberately not validated: it may have been deleted
        // while the reply form was open, and the client promotes such replies
        // to the top level.
        let id = CommentId(state.next_comment);
        state.next_comment += 1;
        let created_at = state.tick();
        state.comments.insert(
            id,
            Comment {
                id,
                post_id: comment.post_id,
                parent_id: comment.parent_id,
                content: comment.content,
                author_id: comment.author_id,
                author_name: comment.author_name,
                created_at,
            },
        );
        Ok(())
    }

    async fn cast_vote(&self, vote: NewVote) -> Result<(), Error> {
        let mut state = self.0.lock();
        if !state.posts.contains_key(&vote.post_id) {
            return Err(Error::NotFound(format!("post {}", vote.post_id.0)));
        }
        let existing = state
            .votes
            .iter()
            .position(|(p, u, _)| *p == vote.post_id && *u == vote.user_id);
        match existing {
            Some(i) if state.votes[i].2 == vote.value => {
                // same value again: retract
                state.votes.remove(i);
            }
            Some(i) => {
                // opposite value: flip
                state.votes[i].2 = vote.value;
            }
            None => state.votes.push((vote.post_id, vote.user_id, vote.value)),
        }
        Ok(())
    }

    async fn update_bio(&self, email: &str, bio: String) -> Result<(), Error> {
        let mut state = self.0.lock();
        match state.profiles.get_mut(email) {
            Some(p) => {
                p.bio = bio;
                Ok(())
            }
            None => Err(Error::NotFound(format!("profile {}", email))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_comment(session: &Session, post: PostId, parent: Option<CommentId>) -> NewComment {
        NewComment::new(Some(session), post, parent, String::from("some text"))
            .expect("building comment")
    }

    async fn store_with_post() -> (MockStore, Session, PostId) {
        let store = MockStore::new();
        let session = store.admin_create_user("alice", "alice@example.org");
        store
            .insert_community(
                NewCommunity::new(
                    Some(&session),
                    String::from("rust"),
                    String::from("all things rust"),
                )
                .expect("building community"),
            )
            .await
            .expect("inserting community");
        store
            .insert_post(
                NewPost::new(
                    Some(&session),
                    CommunityId(1),
                    String::from("hello"),
                    String::from("first post"),
                    None,
                )
                .expect("building post"),
            )
            .await
            .expect("inserting post");
        (store, session, PostId(1))
    }

    #[tokio::test]
    async fn comments_come_back_ascending_by_created_at() {
        let (store, session, post) = store_with_post().await;
        for _ in 0..3 {
            store
                .insert_comment(new_comment(&session, post, None))
                .await
                .expect("inserting comment");
        }
        let comments = store.fetch_comments(post).await.expect("fetching comments");
        assert_eq!(comments.len(), 3);
        assert!(comments.windows(2).all(|w| w[0].created_at < w[1].created_at));
        assert!(comments.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn comment_for_unknown_post_is_rejected() {
        let (store, session, _) = store_with_post().await;
        assert_eq!(
            store
                .insert_comment(new_comment(&session, PostId(99), None))
                .await,
            Err(Error::NotFound(String::from("post 99"))),
        );
    }

    #[tokio::test]
    async fn vote_toggles_and_flips() {
        let (store, session, post) = store_with_post().await;
        let like = NewVote::new(Some(&session), post, VoteValue::Like).expect("building vote");
        let dislike =
            NewVote::new(Some(&session), post, VoteValue::Dislike).expect("building vote");

        store.cast_vote(like).await.expect("casting vote");
        assert_eq!(store.fetch_votes(post).await.expect("fetching").len(), 1);

        // opposite value flips
        store.cast_vote(dislike).await.expect("casting vote");
        let votes = store.fetch_votes(post).await.expect("fetching");
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].value, VoteValue::Dislike);

        // same value retracts
        store.cast_vote(dislike).await.expect("casting vote");
        assert_eq!(store.fetch_votes(post).await.expect("fetching").len(), 0);
    }

    #[tokio::test]
    async fn post_listing_carries_counts_newest_first() {
        let (store, session, post) = store_with_post().await;
        store
            .insert_post(
                NewPost::new(
                    Some(&session),
                    CommunityId(1),
                    String::from("second"),
                    String::from("more"),
                    None,
                )
                .expect("building post"),
            )
            .await
            .expect("inserting post");
        store
            .insert_comment(new_comment(&session, post, None))
            .await
            .expect("inserting comment");
        store
            .cast_vote(NewVote::new(Some(&session), post, VoteValue::Like).expect("building vote"))
            .await
            .expect("casting vote");

        let posts = store.fetch_posts().await.expect("fetching posts");
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].post.title, "second");
        assert_eq!(posts[1].like_count, 1);
        assert_eq!(posts[1].comment_count, 1);
        assert_eq!(posts[0].like_count, 0);
    }

    #[tokio::test]
    async fn bio_update_is_visible_on_next_fetch() {
        let (store, session, _) = store_with_post().await;
        store
            .update_bio(&session.email, String::from("rustacean"))
            .await
            .expect("updating bio");
        let profile = store
            .fetch_profile(&session.email)
            .await
            .expect("fetching profile");
        assert_eq!(profile.bio, "rustacean");
        assert_eq!(profile.user_id, session.user_id);
    }
}
