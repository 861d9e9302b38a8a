use anyhow::Context;
use futures::{channel::oneshot, pin_mut, select, FutureExt};
use serde::{de::DeserializeOwned, Serialize};

use agora_client::api::{
    self, Comment, Community, CommunityId, NewComment, NewCommunity, NewPost, NewVote, Post,
    PostId, PostSummary, Profile, Session, Vote,
};

use crate::{ui, LoginInfo};

// Comment lists are refetched every POLL_INTERVAL while a post is open
const POLL_INTERVAL_SECS: i64 = 5;

pub async fn auth(host: String, session: api::NewSession) -> anyhow::Result<Session> {
    Ok(crate::CLIENT
        .post(format!("{}/api/auth", host))
        .json(&session)
        .send()
        .await
        .context("sending auth request")?
        .error_for_status()
        .context("authenticating")?
        .json()
        .await
        .context("parsing session")?)
}

pub async fn unauth(login: LoginInfo) {
    let session = match &login.session {
        Some(s) => s,
        None => return,
    };
    let resp = crate::CLIENT
        .post(format!("{}/api/unauth", login.host))
        .bearer_auth(session.token.0)
        .send()
        .await;
    match resp {
        Err(e) => tracing::error!("failed to unauth: {:?}", e),
        Ok(resp) if !resp.status().is_success() => {
            tracing::error!("failed to unauth: response is not success {:?}", resp)
        }
        Ok(_) => (),
    }
}

async fn get<R>(login: &LoginInfo, path: &str) -> anyhow::Result<R>
where
    R: DeserializeOwned,
{
    let mut req = crate::CLIENT.get(format!("{}/api/{}", login.host, path));
    if let Some(session) = &login.session {
        req = req.bearer_auth(session.token.0);
    }
    req.send()
        .await
        .with_context(|| format!("fetching {}", path))?
        .error_for_status()
        .with_context(|| format!("fetching {}", path))?
        .json()
        .await
        .with_context(|| format!("parsing response for {}", path))
}

async fn post<B>(login: &LoginInfo, path: &str, body: &B) -> anyhow::Result<()>
where
    B: Serialize,
{
    let mut req = crate::CLIENT
        .post(format!("{}/api/{}", login.host, path))
        .json(body);
    if let Some(session) = &login.session {
        req = req.bearer_auth(session.token.0);
    }
    req.send()
        .await
        .with_context(|| format!("submitting to {}", path))?
        .error_for_status()
        .with_context(|| format!("submitting to {}", path))?;
    Ok(())
}

pub async fn fetch_communities(login: &LoginInfo) -> anyhow::Result<Vec<Community>> {
    get(login, "communities").await
}

pub async fn fetch_posts(login: &LoginInfo) -> anyhow::Result<Vec<PostSummary>> {
    get(login, "posts").await
}

pub async fn fetch_post(login: &LoginInfo, post: PostId) -> anyhow::Result<Post> {
    get(login, &format!("posts/{}", post.0)).await
}

pub async fn fetch_community_posts(
    login: &LoginInfo,
    community: CommunityId,
) -> anyhow::Result<Vec<PostSummary>> {
    get(login, &format!("communities/{}/posts", community.0)).await
}

pub async fn fetch_user_posts(login: &LoginInfo, email: &str) -> anyhow::Result<Vec<PostSummary>> {
    get(login, &format!("profiles/{}/posts", email)).await
}

pub async fn fetch_comments(login: &LoginInfo, post: PostId) -> anyhow::Result<Vec<Comment>> {
    get(login, &format!("posts/{}/comments", post.0)).await
}

pub async fn fetch_votes(login: &LoginInfo, post: PostId) -> anyhow::Result<Vec<Vote>> {
    get(login, &format!("posts/{}/votes", post.0)).await
}

pub async fn fetch_profile(login: &LoginInfo, email: &str) -> anyhow::Result<Profile> {
    get(login, &format!("profiles/{}", email)).await
}

pub async fn insert_community(login: &LoginInfo, community: NewCommunity) -> anyhow::Result<()> {
    post(login, "communities", &community).await
}

pub async fn insert_post(login: &LoginInfo, new_post: NewPost) -> anyhow::Result<()> {
    post(login, "posts", &new_post).await
}

pub async fn insert_comment(login: &LoginInfo, comment: NewComment) -> anyhow::Result<()> {
    post(login, "comments", &comment).await
}

pub async fn cast_vote(login: &LoginInfo, vote: NewVote) -> anyhow::Result<()> {
    post(login, "votes", &vote).await
}

pub async fn update_bio(login: &LoginInfo, email: &str, bio: String) -> anyhow::Result<()> {
    post(login, &format!("profiles/{}/bio", email), &bio).await
}

async fn sleep_for(d: chrono::Duration) {
    wasm_timer::Delay::new(d.to_std().unwrap_or(std::time::Duration::from_secs(0)))
        .await
        .expect("failed sleeping")
}

/// Refetches the flat comment list of `post` on a fixed interval, sending
/// each result to the comment section until `cancel` is dropped.
///
/// Every arrival triggers a full rebuild of the comment tree on the receiving
/// end; there is no ordering guarantee between overlapping fetches beyond the
/// last completed one winning.
pub async fn start_comment_poll(
    login: LoginInfo,
    post: PostId,
    to: yew::html::Scope<ui::CommentSection>,
    mut cancel: oneshot::Sender<()>,
) {
    let mut cancellation = cancel.cancellation().fuse();
    loop {
        let fetch = fetch_comments(&login, post).fuse();
        pin_mut!(fetch);
        select! {
            _ = cancellation => return,
            res = fetch => {
                to.send_message(ui::CommentSectionMsg::Comments(
                    res.map_err(|e| format!("{:#}", e)),
                ));
            }
        }
        let delay = sleep_for(chrono::Duration::seconds(POLL_INTERVAL_SECS)).fuse();
        pin_mut!(delay);
        select! {
            _ = cancellation => return,
            _ = delay => (),
        }
    }
}
