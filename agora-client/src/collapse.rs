use std::collections::HashSet;

use agora_api::CommentId;

use crate::CommentNode;

/// Which subtrees are currently folded away, keyed by the id of the comment
/// whose replies are hidden.
///
/// This is ephemeral view state owned by the rendering layer. It lives next
/// to the forest, never inside it: collapsing changes nothing about the tree
/// data, and a full rebuild keeps the set as-is so a comment stays collapsed
/// across polls for as long as it exists.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Collapsed(HashSet<CommentId>);

impl Collapsed {
    pub fn new() -> Collapsed {
        Collapsed(HashSet::new())
    }

    pub fn is_collapsed(&self, id: CommentId) -> bool {
        self.0.contains(&id)
    }

    pub fn toggle(&mut self, id: CommentId) {
        if !self.0.remove(&id) {
            self.0.insert(id);
        }
    }

    /// Number of comments the rendering layer should show: collapsing a node
    /// hides its whole subtree but the node itself stays visible.
    pub fn visible_count(&self, forest: &[CommentNode]) -> usize {
        forest
            .iter()
            .map(|n| {
                1 + if self.is_collapsed(n.comment.id) {
                    0
                } else {
                    self.visible_count(&n.children)
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_api::{Comment, PostId, Time, UserId};
    use chrono::TimeZone;

    fn node(id: i64, children: Vec<CommentNode>) -> CommentNode {
        CommentNode {
            comment: Comment {
                id: CommentId(id),
                post_id: PostId(1),
                parent_id: None,
                content: String::new(),
                author_id: UserId::stub(),
                author_name: String::from("bob"),
                created_at: test_time(),
            },
            children,
        }
    }

    fn test_time() -> Time {
        chrono::Utc
            .timestamp_opt(0, 0)
            .single()
            .expect("building test timestamp")
    }

    #[test]
    fn toggle_flips_membership() {
        let mut c = Collapsed::new();
        assert!(!c.is_collapsed(CommentId(1)));
        c.toggle(CommentId(1));
        assert!(c.is_collapsed(CommentId(1)));
        c.toggle(CommentId(1));
        assert!(!c.is_collapsed(CommentId(1)));
    }

    #[test]
    fn collapsing_hides_the_subtree_not_the_node() {
        let forest = vec![
            node(1, vec![node(2, vec![node(3, vec![])]), node(4, vec![])]),
            node(5, vec![]),
        ];
        let mut c = Collapsed::new();
        assert_eq!(c.visible_count(&forest), 5);
        c.toggle(CommentId(2));
        assert_eq!(c.visible_count(&forest), 4);
        c.toggle(CommentId(1));
        assert_eq!(c.visible_count(&forest), 2);
    }

    #[test]
    fn collapse_state_survives_a_rebuild() {
        // The set is keyed by id only, so an identical forest built fresh
        // renders the same way.
        let forest = vec![node(1, vec![node(2, vec![])])];
        let rebuilt = forest.clone();
        let mut c = Collapsed::new();
        c.toggle(CommentId(1));
        assert_eq!(c.visible_count(&forest), c.visible_count(&rebuilt));
    }
}
