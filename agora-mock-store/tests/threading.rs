//! Drives the full fetch-then-rebuild path: comments inserted through the
//! store boundary, refetched flat, and reassembled into a forest.

use agora_api::{
    CommentId, CommunityId, NewComment, NewCommunity, NewPost, PostId, Session, Store,
};
use agora_client::{build_forest, Collapsed};
use agora_mock_store::MockStore;

async fn seed_post(store: &MockStore) -> (Session, PostId) {
    let session = store.admin_create_user("alice", "alice@example.org");
    store
        .insert_community(
            NewCommunity::new(Some(&session), String::from("rust"), String::new())
                .expect("building community"),
        )
        .await
        .expect("inserting community");
    store
        .insert_post(
            NewPost::new(
                Some(&session),
                CommunityId(1),
                String::from("a post"),
                String::from("body"),
                None,
            )
            .expect("building post"),
        )
        .await
        .expect("inserting post");
    (session, PostId(1))
}

async fn comment(
    store: &MockStore,
    session: &Session,
    post: PostId,
    parent: Option<i64>,
    text: &str,
) {
    store
        .insert_comment(
            NewComment::new(Some(session), post, parent.map(CommentId), text.to_string())
                .expect("building comment"),
        )
        .await
        .expect("inserting comment");
}

#[tokio::test]
async fn fetched_thread_rebuilds_into_the_expected_forest() {
    let store = MockStore::new();
    let (session, post) = seed_post(&store).await;

    comment(&store, &session, post, None, "top 1").await; // id 1
    comment(&store, &session, post, Some(1), "reply to 1").await; // id 2
    comment(&store, &session, post, None, "top 2").await; // id 3
    comment(&store, &session, post, Some(2), "reply to 2").await; // id 4

    let flat = store.fetch_comments(post).await.expect("fetching comments");
    let forest = build_forest(flat.clone());

    assert_eq!(forest.len(), 2);
    assert_eq!(forest[0].comment.content, "top 1");
    assert_eq!(forest[1].comment.content, "top 2");
    assert_eq!(forest[0].children.len(), 1);
    assert_eq!(forest[0].children[0].children.len(), 1);
    assert_eq!(forest[0].children[0].children[0].comment.content, "reply to 2");

    // a refetch rebuilds the same forest
    let again = store.fetch_comments(post).await.expect("fetching comments");
    assert_eq!(forest, build_forest(again));
}

#[tokio::test]
async fn deleting_a_parent_promotes_its_replies_to_roots() {
    let store = MockStore::new();
    let (session, post) = seed_post(&store).await;

    comment(&store, &session, post, None, "parent").await; // id 1
    comment(&store, &session, post, Some(1), "child a").await; // id 2
    comment(&store, &session, post, Some(1), "child b").await; // id 3

    store.admin_delete_comment(CommentId(1));

    let flat = store.fetch_comments(post).await.expect("fetching comments");
    let forest = build_forest(flat);

    // nothing dropped, both replies surface at the top level in order
    assert_eq!(forest.len(), 2);
    assert_eq!(forest[0].comment.content, "child a");
    assert_eq!(forest[1].comment.content, "child b");
}

#[tokio::test]
async fn collapse_state_applies_across_polls() {
    let store = MockStore::new();
    let (session, post) = seed_post(&store).await;

    comment(&store, &session, post, None, "top").await; // id 1
    comment(&store, &session, post, Some(1), "reply").await; // id 2

    let mut collapsed = Collapsed::new();
    let forest = build_forest(store.fetch_comments(post).await.expect("fetching"));
    collapsed.toggle(CommentId(1));
    assert_eq!(collapsed.visible_count(&forest), 1);

    // a later poll picks up a new reply, the old node stays collapsed
    comment(&store, &session, post, Some(1), "late reply").await; // id 3
    let forest = build_forest(store.fetch_comments(post).await.expect("fetching"));
    assert_eq!(collapsed.visible_count(&forest), 1);
    collapsed.toggle(CommentId(1));
    assert_eq!(collapsed.visible_count(&forest), 3);
}
