//! Property-based tests for treematch using proptest.

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;
use treematch::{any_type, any_value, walk, EventKind, Node, Pattern, TreeMatcher, Uid};

// ============================================================================
// Test helpers
// ============================================================================

fn node_strategy() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        Just(Node::Null),
        any::<bool>().prop_map(Node::from),
        (-50i64..50).prop_map(Node::from),
        "[a-z]{0,5}".prop_map(Node::from),
    ];
    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Node::Sequence),
            prop::collection::btree_map("[a-z]{1,3}", inner, 0..4)
                .prop_map(|entries: BTreeMap<String, Node>| Node::from(entries)),
        ]
    })
}

fn children(node: &Node) -> Vec<&Node> {
    match node {
        Node::Mapping(entries) => entries.values().collect(),
        Node::Sequence(items) => items.iter().collect(),
        Node::Object(object) => object.attrs().values().collect(),
        Node::Null | Node::Scalar(_) => Vec::new(),
    }
}

fn node_count(node: &Node) -> usize {
    1 + children(node).into_iter().map(node_count).sum::<usize>()
}

fn scalar_count(node: &Node) -> usize {
    let own = usize::from(matches!(node, Node::Scalar(_)));
    own + children(node).into_iter().map(scalar_count).sum::<usize>()
}

// ============================================================================
// Walker properties
// ============================================================================

proptest! {
    /// Every node produces exactly one type event.
    #[test]
    fn one_type_event_per_node(tree in node_strategy()) {
        let types = walk(&tree).filter(|e| e.kind == EventKind::Type).count();
        prop_assert_eq!(types, node_count(&tree));
    }

    /// The stream ends on the root's type event.
    #[test]
    fn stream_ends_at_root(tree in node_strategy()) {
        let last = walk(&tree).last().expect("non-empty stream");
        prop_assert_eq!(last.kind, EventKind::Type);
        prop_assert_eq!(last.uid, Uid::root());
    }

    /// A value event is always followed by the type event of the same node.
    #[test]
    fn value_precedes_its_type(tree in node_strategy()) {
        let events: Vec<_> = walk(&tree).collect();
        for (i, event) in events.iter().enumerate() {
            if event.kind == EventKind::Value {
                let next = &events[i + 1];
                prop_assert_eq!(next.kind, EventKind::Type);
                prop_assert_eq!(&next.uid, &event.uid);
            }
        }
    }

    /// Type events carry distinct uids, and parents come after children.
    #[test]
    fn uids_form_a_tree(tree in node_strategy()) {
        let types: Vec<Uid> = walk(&tree)
            .filter(|e| e.kind == EventKind::Type)
            .map(|e| e.uid)
            .collect();

        let distinct: HashSet<&Uid> = types.iter().collect();
        prop_assert_eq!(distinct.len(), types.len());

        for (i, uid) in types.iter().enumerate() {
            if *uid == Uid::root() {
                continue;
            }
            let parent = uid.parent();
            prop_assert_eq!(parent.len() + 1, uid.len());
            prop_assert!(types[i + 1..].contains(&parent));
        }
    }

    /// Walking twice yields the same stream.
    #[test]
    fn walk_is_deterministic(tree in node_strategy()) {
        let first: Vec<_> = walk(&tree).collect();
        let second: Vec<_> = walk(&tree).collect();
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// Matcher properties
// ============================================================================

proptest! {
    /// `any_type` matches every node once.
    #[test]
    fn any_type_matches_every_node(tree in node_strategy()) {
        let matcher: TreeMatcher = TreeMatcher::new(any_type());
        prop_assert_eq!(matcher.count(&tree, &()), node_count(&tree));
    }

    /// `any_value` matches every scalar once.
    #[test]
    fn any_value_matches_every_scalar(tree in node_strategy()) {
        let matcher: TreeMatcher = TreeMatcher::new(any_value());
        prop_assert_eq!(matcher.count(&tree, &()), scalar_count(&tree));
    }

    /// A limit returns a prefix of the unlimited matches.
    #[test]
    fn limit_returns_prefix(tree in node_strategy(), n in 0usize..10) {
        let all = TreeMatcher::new(any_type()).matches(&tree, &());
        let limited = TreeMatcher::new(any_type()).limit(n).matches(&tree, &());

        prop_assert_eq!(limited.len(), n.min(all.len()));
        prop_assert_eq!(&limited[..], &all[..limited.len()]);
    }

    /// Executors agree with each other.
    #[test]
    fn executors_agree(tree in node_strategy(), needle in -50i64..50) {
        let pattern: Pattern = treematch::value(needle);
        let matcher = TreeMatcher::new(pattern);
        let found = matcher.matches(&tree, &());

        prop_assert_eq!(matcher.count(&tree, &()), found.len());
        prop_assert_eq!(matcher.any(&tree, &()), !found.is_empty());
        prop_assert_eq!(matcher.find(&tree, &()), found.first().cloned());
    }

    /// Matching twice yields the same matches.
    #[test]
    fn matching_is_deterministic(tree in node_strategy()) {
        let matcher: TreeMatcher = TreeMatcher::new(any_value());
        prop_assert_eq!(matcher.matches(&tree, &()), matcher.matches(&tree, &()));
    }

    /// Bounding live attempts never finds more.
    #[test]
    fn live_bound_never_adds_matches(tree in node_strategy(), max in 1usize..4) {
        let pattern = || -> Pattern { treematch::key_only("a") };
        let all = TreeMatcher::new(pattern()).count(&tree, &());
        let bounded = TreeMatcher::new(pattern()).max_live_attempts(max).count(&tree, &());
        prop_assert!(bounded <= all);
    }
}
