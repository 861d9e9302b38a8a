use crate::{CommentId, Error, PostId, Session, Time, UserId};

/// One row of the `comments` table, as the store returns it.
///
/// `parent_id` of `None` means a top-level comment. Threading is not part of
/// this record: the client reconstructs it from the flat list.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub parent_id: Option<CommentId>,
    pub content: String,
    pub author_id: UserId,
    pub author_name: String,
    pub created_at: Time,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewComment {
    pub post_id: PostId,
    pub parent_id: Option<CommentId>,
    pub content: String,
    pub author_id: UserId,
    pub author_name: String,
}

impl NewComment {
    /// Builds a submittable comment, or fails before any request is issued.
    ///
    /// `session` being `None` is a local precondition failure: the caller must
    /// not send anything to the store.
    pub fn new(
        session: Option<&Session>,
        post_id: PostId,
        parent_id: Option<CommentId>,
        content: String,
    ) -> Result<NewComment, Error> {
        let session = session.ok_or(Error::LoggedOut)?;
        if content.trim().is_empty() {
            return Err(Error::EmptyContent);
        }
        Ok(NewComment {
            post_id,
            parent_id,
            content,
            author_id: session.user_id,
            author_name: session.display_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AuthToken;

    fn session() -> Session {
        Session {
            token: AuthToken::stub(),
            user_id: UserId::stub(),
            display_name: String::from("alice"),
            email: String::from("alice@example.org"),
        }
    }

    #[test]
    fn logged_out_submission_is_rejected_locally() {
        assert_eq!(
            NewComment::new(None, PostId(1), None, String::from("hello")),
            Err(Error::LoggedOut),
        );
    }

    #[test]
    fn empty_content_is_rejected() {
        let s = session();
        assert_eq!(
            NewComment::new(Some(&s), PostId(1), None, String::from("  \n")),
            Err(Error::EmptyContent),
        );
    }

    #[test]
    fn reply_carries_author_from_session() {
        let s = session();
        let c = NewComment::new(Some(&s), PostId(1), Some(CommentId(3)), String::from("hi"))
            .expect("building reply");
        assert_eq!(c.author_id, s.user_id);
        assert_eq!(c.author_name, "alice");
        assert_eq!(c.parent_id, Some(CommentId(3)));
    }
}
