//! End-to-end matching scenarios.

use std::cell::Cell;
use std::collections::BTreeSet;

use serde_json::json;
use treematch::{
    ancestor, ancestor_at, any_index, any_index_of, any_mapping, any_of, any_type, any_value,
    attribute, attribute_set, capture, compare, event, hook, index, key, kind_of, mapping,
    matches_regex, object_node, one_of, sequence, sibling, type_of, type_with, value, Captures,
    Class, Node, NodeType, Object, Op, Pattern, Payload, Scalar, ToNode, TreeMatcher, Uid,
};

fn tree(value: serde_json::Value) -> Node {
    Node::from(value)
}

fn count(pattern: Pattern, tree: &Node) -> usize {
    TreeMatcher::new(pattern).count(tree, &())
}

fn int() -> Pattern {
    type_with(NodeType::Int, vec![any_value()]).unwrap()
}

// ============================================================================
// End to end
// ============================================================================

#[test]
fn mapping_with_pair_under_a() {
    let tree = tree(json!({"a": [1, 2], "b": "z"}));
    let pair = type_with(
        NodeType::Sequence,
        vec![sequence(vec![index(0, int()), index(1, int())])],
    )
    .unwrap();
    let pattern = type_with(
        NodeType::Mapping,
        vec![mapping(vec![key("a", pair)]).strict(false)],
    )
    .unwrap();

    let found = TreeMatcher::new(pattern).matches(&tree, &());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].uid(), &Uid::root());
    assert_eq!(found[0].start(), 0);
    assert_eq!(found[0].end(), 13);
}

#[test]
fn pair_pattern_rejects_longer_sequence() {
    let tree = tree(json!({"a": [1, 2, 3]}));
    let pair = type_with(
        NodeType::Sequence,
        vec![sequence(vec![index(0, int()), index(1, int())])],
    )
    .unwrap();
    let pattern = mapping(vec![key("a", pair)]);
    assert_eq!(count(pattern, &tree), 0);
}

#[test]
fn matching_is_deterministic() {
    let tree = tree(json!({"a": [5, {"b": 5}], "c": 5}));
    let matcher = TreeMatcher::new(capture("five", value(5i64)));
    assert_eq!(matcher.matches(&tree, &()), matcher.matches(&tree, &()));
}

// ============================================================================
// Leaves
// ============================================================================

#[test]
fn value_matches_each_occurrence() {
    assert_eq!(count(value(5i64), &tree(json!([1, 5, 5]))), 2);
    assert_eq!(count(value("5"), &tree(json!([1, 5, 5]))), 0);
}

#[test]
fn any_mapping_matches_non_empty_mappings() {
    assert_eq!(count(any_mapping(), &tree(json!({"a": {"b": 1}}))), 2);
    assert_eq!(count(any_mapping(), &tree(json!({}))), 0);
    assert_eq!(count(any_mapping(), &tree(json!({"a": {}}))), 1);
}

#[test]
fn key_anchors_on_the_entry() {
    let tree = tree(json!({"a": 1, "b": 2}));
    let found = TreeMatcher::new(key("a", type_of(NodeType::Int))).matches(&tree, &());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].uid(), &Uid::root().child(0));
}

#[test]
fn any_index_matches_every_element() {
    let tree = tree(json!([10, 20, 30]));
    assert_eq!(count(any_index_of(any_type()), &tree), 3);
}

#[test]
fn typed_value() {
    let tree = tree(json!([5, "5"]));
    let pattern = type_with(NodeType::Int, vec![value(5i64)]).unwrap();
    assert_eq!(count(pattern, &tree), 1);
}

#[test]
fn large_integers_do_not_round_to_floats() {
    let tree = tree(json!([9007199254740992.0]));
    assert_eq!(count(value(9_007_199_254_740_993i64), &tree), 0);
    assert_eq!(count(value(9_007_199_254_740_992i64), &tree), 1);
}

#[test]
fn booleans_are_not_integers() {
    let tree = tree(json!([true, 1]));
    assert_eq!(count(value(1i64), &tree), 1);
    assert_eq!(count(kind_of(NodeType::Int), &tree), 1);
    assert_eq!(count(value(true), &tree), 1);
}

#[test]
fn comparisons() {
    let numbers = tree(json!([1, 2, 3]));
    assert_eq!(count(compare(Op::Gt, 1i64).unwrap(), &numbers), 2);
    assert_eq!(count(compare(Op::Ne, 2i64).unwrap(), &numbers), 2);
    assert_eq!(count(one_of([1i64, 3]), &numbers), 2);

    let fruit = tree(json!(["apple", "banana", "avocado"]));
    assert_eq!(count(matches_regex("^a").unwrap(), &fruit), 2);
    assert_eq!(count(compare(Op::Contains, "an").unwrap(), &fruit), 1);
}

// ============================================================================
// Types and classes
// ============================================================================

#[test]
fn class_hierarchy() {
    let animal = Class::new("Animal");
    let dog = Class::derive("Dog", &animal);
    let tree = Node::from(Object::new(&dog).with("name", "rex"));

    assert_eq!(count(kind_of(&animal), &tree), 1);
    assert_eq!(count(type_of(&animal), &tree), 0);
    assert_eq!(count(type_of(&dog), &tree), 1);
    assert_eq!(count(kind_of(NodeType::Any), &tree), 2);
}

#[test]
fn attribute_set_matches_object() {
    let dog = Class::new("Dog");
    let tree = Node::from(Object::new(&dog).with("name", "rex").with("age", 3i64));
    let pattern = attribute_set(vec![
        attribute("name", type_of(NodeType::Str)),
        attribute("age", type_of(NodeType::Int)),
    ]);

    let found = TreeMatcher::new(pattern).matches(&tree, &());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].uid(), &Uid::root());
}

struct Task {
    title: String,
    tags: Vec<String>,
}

impl ToNode for Task {
    fn to_node(&self) -> Node {
        let class = Class::new("Task");
        object_node(
            &class,
            [("title", self.title.to_node()), ("tags", self.tags.to_node())],
        )
    }
}

#[test]
fn user_types_through_to_node() {
    let task = Task {
        title: "Write docs".into(),
        tags: vec!["docs".into(), "urgent".into()],
    };
    let tree = task.to_node();

    let urgent = TreeMatcher::new(capture("tag", value("urgent")));
    let found = urgent.find(&tree, &()).expect("urgent tag");
    let tag = Scalar::from("urgent");
    assert_eq!(found.capture("tag"), Some(&Payload::Scalar(&tag)));
    assert_eq!(found.uid(), &Uid::root().child(0).child(1));
}

// ============================================================================
// Aggregates
// ============================================================================

#[test]
fn strict_mapping_counts_entries() {
    let tree = tree(json!({"a": 1, "b": 2}));
    let a = || key("a", type_of(NodeType::Int));
    let b = || key("b", type_of(NodeType::Int));

    assert_eq!(count(mapping(vec![a()]), &tree), 0);
    assert_eq!(count(mapping(vec![a()]).strict(false), &tree), 1);
    assert_eq!(count(mapping(vec![a(), b()]), &tree), 1);
}

#[test]
fn aggregate_members_must_share_a_level() {
    let tree = tree(json!({"a": {"x": 1}, "y": 2}));
    let pattern = mapping(vec![
        key("x", type_of(NodeType::Int)),
        key("y", type_of(NodeType::Int)),
    ])
    .strict(false);
    assert_eq!(count(pattern, &tree), 0);
}

#[test]
fn two_step_type_join() {
    let tree = tree(json!([{"a": 1}]));
    let pattern = type_with(
        NodeType::Sequence,
        vec![any_mapping(), sequence(vec![any_index()])],
    )
    .unwrap();

    let found = TreeMatcher::new(pattern).matches(&tree, &());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].uid(), &Uid::root());
}

#[test]
fn any_of_is_never_decided() {
    let tree = tree(json!([1, 2]));
    assert_eq!(count(any_of(vec![value(1i64), value(2i64)]), &tree), 0);
}

// ============================================================================
// Relations
// ============================================================================

#[test]
fn ancestor_depths() {
    let shallow = tree(json!([{"b": 5}]));
    let seq = ancestor_at(type_of(NodeType::Sequence), value(5i64), 2, true).unwrap();
    let found = TreeMatcher::new(seq).matches(&shallow, &());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].uid(), &Uid::root().child(0).child(0));

    let map = ancestor_at(type_of(NodeType::Mapping), value(5i64), 2, true).unwrap();
    assert_eq!(count(map, &shallow), 0);

    let deep = tree(json!({"k": [{"b": 5}]}));
    let strict = ancestor_at(type_of(NodeType::Mapping), value(5i64), 2, true).unwrap();
    let open = ancestor_at(type_of(NodeType::Mapping), value(5i64), 2, false).unwrap();
    assert_eq!(count(strict, &deep), 0);
    assert_eq!(count(open, &deep), 1);

    // Non-strict still rejects an ancestor closer than the depth.
    let parent_only = tree(json!([5]));
    let open = ancestor_at(type_of(NodeType::Sequence), value(5i64), 2, false).unwrap();
    assert_eq!(count(open, &parent_only), 0);
}

#[test]
fn direct_parent() {
    let tree = tree(json!({"a": [5], "b": 5}));
    let pattern = ancestor(type_of(NodeType::Sequence), value(5i64));
    assert_eq!(count(pattern, &tree), 1);
}

#[test]
fn ancestor_on_another_branch_fails() {
    let tree = tree(json!({"a": {"x": 5}, "b": {"y": 1}}));
    let pattern = ancestor_at(type_of(NodeType::Mapping), value(5i64), 2, true).unwrap();
    assert_eq!(count(pattern, &tree), 0);
}

#[test]
fn siblings_anywhere() {
    let pattern = || sibling(vec![value(1i64), value(2i64)]);
    assert_eq!(count(pattern(), &tree(json!([1, 2]))), 1);
    assert_eq!(count(pattern(), &tree(json!({"a": 1, "b": [2]}))), 1);
    assert_eq!(count(pattern(), &tree(json!([2, 1]))), 1);
    assert_eq!(count(pattern(), &tree(json!([1, 3]))), 0);
}

// ============================================================================
// Decorators
// ============================================================================

#[test]
fn capture_records_each_match() {
    let tree = tree(json!({"a": 5, "b": [5]}));
    let found = TreeMatcher::new(capture("x", value(5i64))).matches(&tree, &());
    let five = Scalar::from(5i64);

    assert_eq!(found.len(), 2);
    for m in &found {
        assert_eq!(m.captures().len(), 1);
        assert_eq!(m.capture("x"), Some(&Payload::Scalar(&five)));
    }
}

#[test]
fn decorator_stack() {
    let tree = tree(json!([5]));
    let pattern = event(
        "found",
        hook(
            |caps: &Captures<'_>, _: &()| caps.contains_key("v"),
            capture("v", value(5i64)),
        ),
    );

    let found = TreeMatcher::new(pattern).matches(&tree, &());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].modifications(), 1);
    assert!(found[0].has_event("found"));
    assert_eq!(found[0].events(), &BTreeSet::from(["found".to_string()]));
}

#[test]
fn hooks_receive_user_data() {
    let tree = tree(json!([5, 6, 5]));
    let calls = Cell::new(0usize);
    let pattern: Pattern<Cell<usize>> = hook(
        |_: &Captures<'_>, calls: &Cell<usize>| {
            calls.set(calls.get() + 1);
            false
        },
        value(5i64),
    );

    let found = TreeMatcher::new(pattern).matches(&tree, &calls);
    assert_eq!(found.len(), 2);
    assert_eq!(calls.get(), 2);
    assert!(found.iter().all(|m| m.modifications() == 0));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn limits() {
    let tree = tree(json!([5, 5, 5]));
    let matcher = TreeMatcher::new(value(5i64)).limit(2);
    assert_eq!(matcher.count(&tree, &()), 2);

    let unlimited = TreeMatcher::new(value(5i64));
    assert_eq!(unlimited.count(&tree, &()), 3);
    assert_eq!(unlimited.find(&tree, &()).map(|m| m.start()), Some(0));
}

#[test]
fn live_attempt_bound() {
    let tree = tree(json!({"a": 1}));
    let pattern = || key("a", type_of(NodeType::Int));

    assert_eq!(count(pattern(), &tree), 1);
    let bounded = TreeMatcher::new(pattern()).max_live_attempts(2);
    assert_eq!(bounded.count(&tree, &()), 1);
    let starved = TreeMatcher::new(pattern()).max_live_attempts(1);
    assert_eq!(starved.count(&tree, &()), 0);
}
