use std::collections::HashMap;

use agora_api::Comment;

/// One comment with its replies, in the order the flat list delivered them.
///
/// Rebuilt from scratch on every refetch: a rebuild is a full replace of the
/// previous forest, never an incremental patch of it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommentNode {
    pub comment: Comment,
    pub children: Vec<CommentNode>,
}

/// Reconstructs the threaded forest from the flat comment list of one post.
///
/// The input is expected ascending by `created_at` (the store orders it that
/// way); the builder preserves that order among siblings and never re-sorts,
/// so feeding it an unsorted list is a caller bug. A comment whose parent id
/// does not resolve within the batch becomes a root instead of being dropped.
/// Ids are store-assigned and unique per post; a duplicated id is not
/// defended against (last one wins in the lookup).
///
/// Two linear passes, O(n) time and space.
pub fn build_forest(flat: Vec<Comment>) -> Vec<CommentNode> {
    // First pass: index every comment by id. The map lives only for this
    // call, so a comment deleted between two polls cannot leak into the next
    // forest through a stale entry.
    let mut by_id = HashMap::with_capacity(flat.len());
    for (i, c) in flat.iter().enumerate() {
        by_id.insert(c.id, i);
    }

    // Second pass: attach each comment to its parent, in input order.
    let mut edges: Vec<Vec<usize>> = flat.iter().map(|_| Vec::new()).collect();
    let mut roots = Vec::new();
    for (i, c) in flat.iter().enumerate() {
        match c.parent_id {
            Some(parent) => match by_id.get(&parent) {
                Some(&p) => edges[p].push(i),
                None => {
                    // Parent deleted or not in this batch: promote to root
                    // rather than dropping the reply.
                    tracing::debug!(comment = ?c.id, parent = ?parent, "comment has unresolvable parent, promoting to root");
                    roots.push(i);
                }
            },
            None => roots.push(i),
        }
    }

    let mut slots: Vec<Option<Comment>> = flat.into_iter().map(Some).collect();
    roots
        .into_iter()
        .map(|r| materialize(r, &mut slots, &edges))
        .collect()
}

fn materialize(i: usize, slots: &mut Vec<Option<Comment>>, edges: &[Vec<usize>]) -> CommentNode {
    CommentNode {
        comment: slots[i].take().expect("comment claimed by two parents"),
        children: edges[i]
            .iter()
            .map(|&c| materialize(c, slots, edges))
            .collect(),
    }
}

/// Total number of comments in the forest.
pub fn forest_len(forest: &[CommentNode]) -> usize {
    forest.iter().map(|n| 1 + forest_len(&n.children)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_api::{CommentId, PostId, Time, UserId};
    use chrono::TimeZone;

    fn at(secs: i64) -> Time {
        chrono::Utc
            .timestamp_opt(secs, 0)
            .single()
            .expect("building test timestamp")
    }

    fn comment(id: i64, parent: Option<i64>, secs: i64) -> Comment {
        Comment {
            id: CommentId(id),
            post_id: PostId(1),
            parent_id: parent.map(CommentId),
            content: format!("comment {}", id),
            author_id: UserId::stub(),
            author_name: String::from("alice"),
            created_at: at(secs),
        }
    }

    fn ids(forest: &[CommentNode]) -> Vec<i64> {
        forest.iter().map(|n| n.comment.id.0).collect()
    }

    fn collect_ids(forest: &[CommentNode], into: &mut Vec<i64>) {
        for n in forest {
            into.push(n.comment.id.0);
            collect_ids(&n.children, into);
        }
    }

    #[test]
    fn empty_input_yields_empty_forest() {
        assert_eq!(build_forest(Vec::new()), Vec::new());
    }

    #[test]
    fn nested_thread_with_orphan() {
        // id 4 replies to a comment that is not in the batch
        let forest = build_forest(vec![
            comment(1, None, 1),
            comment(2, Some(1), 2),
            comment(3, Some(2), 3),
            comment(4, Some(99), 4),
        ]);
        assert_eq!(ids(&forest), vec![1, 4]);
        assert_eq!(ids(&forest[0].children), vec![2]);
        assert_eq!(ids(&forest[0].children[0].children), vec![3]);
        assert_eq!(forest[1].children, Vec::new());
    }

    #[test]
    fn every_comment_appears_exactly_once() {
        let flat = vec![
            comment(1, None, 1),
            comment(2, Some(1), 2),
            comment(3, None, 3),
            comment(4, Some(2), 4),
            comment(5, Some(77), 5),
            comment(6, Some(1), 6),
        ];
        let forest = build_forest(flat.clone());
        let mut seen = Vec::new();
        collect_ids(&forest, &mut seen);
        seen.sort();
        assert_eq!(seen, flat.iter().map(|c| c.id.0).collect::<Vec<_>>());
    }

    #[test]
    fn absent_parent_is_a_root() {
        let forest = build_forest(vec![comment(1, None, 1), comment(2, None, 2)]);
        assert_eq!(ids(&forest), vec![1, 2]);
    }

    #[test]
    fn unresolvable_parent_is_promoted_to_root() {
        let forest = build_forest(vec![comment(1, None, 1), comment(2, Some(42), 2)]);
        assert_eq!(ids(&forest), vec![1, 2]);
        assert!(forest.iter().all(|n| n.children.is_empty()));
    }

    #[test]
    fn siblings_keep_chronological_order() {
        let forest = build_forest(vec![
            comment(1, None, 1),
            comment(2, Some(1), 2),
            comment(3, Some(1), 3),
            comment(4, Some(1), 4),
        ]);
        assert_eq!(ids(&forest[0].children), vec![2, 3, 4]);
        let times = forest[0]
            .children
            .iter()
            .map(|n| n.comment.created_at)
            .collect::<Vec<_>>();
        let mut sorted = times.clone();
        sorted.sort();
        assert_eq!(times, sorted);
    }

    #[test]
    fn rebuild_of_same_input_is_structurally_equal() {
        let flat = vec![
            comment(1, None, 1),
            comment(2, Some(1), 2),
            comment(3, Some(2), 3),
            comment(4, None, 4),
        ];
        assert_eq!(build_forest(flat.clone()), build_forest(flat));
    }

    #[test]
    fn unsorted_input_is_a_caller_bug_and_keeps_array_order() {
        // The store always delivers ascending created_at; the builder
        // preserves input order and does not re-sort. Siblings arriving out
        // of chronological order therefore come out in array order, which is
        // exactly why callers must not violate the pre-sort.
        let forest = build_forest(vec![
            comment(1, None, 1),
            comment(3, Some(1), 3),
            comment(2, Some(1), 2),
        ]);
        assert_eq!(ids(&forest[0].children), vec![3, 2]);
    }

    #[test]
    fn forest_len_counts_every_node() {
        let forest = build_forest(vec![
            comment(1, None, 1),
            comment(2, Some(1), 2),
            comment(3, Some(2), 3),
            comment(4, None, 4),
        ]);
        assert_eq!(forest_len(&forest), 4);
        assert_eq!(forest_len(&[]), 0);
    }
}
