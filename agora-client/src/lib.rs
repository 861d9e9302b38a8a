mod collapse;
pub use collapse::Collapsed;

mod thread;
pub use thread::{build_forest, forest_len, CommentNode};

pub mod api {
    pub use agora_api::*;
}
