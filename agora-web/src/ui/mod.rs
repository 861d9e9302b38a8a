mod app;
pub use app::{App, AppMsg, Page};

mod comment_item;
pub use comment_item::CommentItem;

mod comment_section;
pub use comment_section::{CommentSection, CommentSectionMsg};

mod community_display;
pub use community_display::CommunityDisplay;

mod community_list;
pub use community_list::CommunityList;

mod create_community;
pub use create_community::CreateCommunity;

mod create_post;
pub use create_post::CreatePost;

mod like_button;
pub use like_button::LikeButton;

mod login;
pub use login::Login;

mod post_detail;
pub use post_detail::PostDetail;

mod post_list;
pub use post_list::PostList;

mod user_profile;
pub use user_profile::UserProfile;

/// State of one remote fetch, as the view components track it.
#[derive(Clone, Debug, PartialEq)]
pub enum Remote<T> {
    Loading,
    Ready(T),
    Failed(String),
}
