//! Graph tests: placement, property edits, connection rules, cascade
//! deletion and entry detection.

use algo_graph::*;
use algo_types::{DeclaredType, Value};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn props(pairs: &[(&str, PropertyValue)]) -> Properties {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// declare -> display, a minimal runnable chain.
fn chain() -> (ProgramGraph, BlockId, BlockId) {
    let mut graph = ProgramGraph::new();
    let a = graph.add_block(BlockTag::Declare);
    let b = graph.add_block(BlockTag::Display);
    graph.connect(a, b, None).unwrap();
    (graph, a, b)
}

// ─────────────────────────────────────────────────────────────────────
// Placement and properties
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_add_block_uses_palette_defaults() {
    let mut graph = ProgramGraph::new();
    let id = graph.add_block(BlockTag::For);
    assert_eq!(
        graph.block(id).unwrap().kind,
        BlockKind::For {
            counter_name: "i".into(),
            from: "1".into(),
            to: "10".into(),
            step: "1".into(),
        }
    );
}

#[test]
fn test_add_block_with_properties() {
    let mut graph = ProgramGraph::new();
    let id = graph
        .add_block_with(
            BlockTag::Declare,
            &props(&[("nom", "age".into()), ("type", "entier".into())]),
        )
        .unwrap();
    assert!(matches!(
        &graph.block(id).unwrap().kind,
        BlockKind::Declare {
            name,
            declared_type: DeclaredType::Integer,
            initial_value: Value::Number(n),
        } if name == "age" && *n == 0.0
    ));
}

#[test]
fn test_add_block_with_invalid_properties_places_nothing() {
    let mut graph = ProgramGraph::new();
    let err = graph
        .add_block_with(BlockTag::Declare, &props(&[("type", "liste".into())]))
        .unwrap_err();
    assert!(matches!(err, GraphError::InvalidProperty { .. }));
    assert!(graph.is_empty());
}

#[test]
fn test_set_property_revalidates() {
    let mut graph = ProgramGraph::new();
    let id = graph.add_block(BlockTag::Assign);
    graph.set_property(id, "valeur", "Somme + i").unwrap();
    assert_eq!(
        graph.block(id).unwrap().kind,
        BlockKind::Assign {
            variable: "maVariable".into(),
            value: "Somme + i".into(),
        }
    );

    let before = graph.clone();
    assert!(graph.set_property(id, "variable", "").is_err());
    assert_eq!(graph, before);
}

#[test]
fn test_set_property_on_unknown_block() {
    let mut graph = ProgramGraph::new();
    assert_eq!(
        graph.set_property(BlockId(9), "message", "x"),
        Err(GraphError::UnknownBlock { id: BlockId(9) })
    );
}

// ─────────────────────────────────────────────────────────────────────
// Connection rules
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_second_incoming_edge_rejected_without_mutation() {
    let (mut graph, a, b) = chain();
    let c = graph.add_block(BlockTag::Assign);
    let before = graph.clone();
    let err = graph.connect(c, b, None).unwrap_err();
    assert_eq!(err, GraphError::AlreadyConnected { to: b, from: a });
    assert_eq!(graph, before);
    assert_eq!(graph.edges().len(), 1);
}

#[test]
fn test_self_loop_rejected() {
    let mut graph = ProgramGraph::new();
    let a = graph.add_block(BlockTag::While);
    assert_eq!(
        graph.connect(a, a, Some(Branch::True)),
        Err(GraphError::SelfLoop { id: a })
    );
}

#[test]
fn test_unknown_endpoint_rejected() {
    let mut graph = ProgramGraph::new();
    let a = graph.add_block(BlockTag::Display);
    assert_eq!(
        graph.connect(a, BlockId(42), None),
        Err(GraphError::UnknownBlock { id: BlockId(42) })
    );
}

#[test]
fn test_branch_only_from_conditionals_and_loops() {
    let mut graph = ProgramGraph::new();
    let a = graph.add_block(BlockTag::Display);
    let b = graph.add_block(BlockTag::Display);
    assert!(matches!(
        graph.connect(a, b, Some(Branch::True)),
        Err(GraphError::BranchNotAllowed { .. })
    ));

    for tag in [BlockTag::If, BlockTag::IfElse, BlockTag::While, BlockTag::For] {
        let from = graph.add_block(tag);
        let to = graph.add_block(BlockTag::Display);
        graph.connect(from, to, Some(Branch::False)).unwrap();
    }
}

#[test]
fn test_duplicate_branch_rejected() {
    let mut graph = ProgramGraph::new();
    let cond = graph.add_block(BlockTag::IfElse);
    let yes = graph.add_block(BlockTag::Display);
    let also_yes = graph.add_block(BlockTag::Display);
    let no = graph.add_block(BlockTag::Display);
    graph.connect(cond, yes, Some(Branch::True)).unwrap();
    assert_eq!(
        graph.connect(cond, also_yes, Some(Branch::True)),
        Err(GraphError::DuplicateBranch {
            from: cond,
            branch: Branch::True
        })
    );
    graph.connect(cond, no, Some(Branch::False)).unwrap();
    assert_eq!(graph.branch_target(cond, Branch::True), Some(yes));
    assert_eq!(graph.branch_target(cond, Branch::False), Some(no));
}

#[test]
fn test_markers_are_not_connectable() {
    let mut graph = ProgramGraph::new();
    let plus = graph.add_block(BlockTag::Operator(OperatorKind::Addition));
    let lit = graph.add_block(BlockTag::Literal(DeclaredType::Real));
    let display = graph.add_block(BlockTag::Display);
    assert!(matches!(
        graph.connect(plus, display, None),
        Err(GraphError::NotConnectable { id, .. }) if id == plus
    ));
    assert!(matches!(
        graph.connect(display, lit, None),
        Err(GraphError::NotConnectable { id, .. }) if id == lit
    ));
    assert!(graph.edges().is_empty());
}

#[test]
fn test_disconnect() {
    let (mut graph, a, b) = chain();
    assert_eq!(graph.disconnect(a, b), Ok(Edge::new(a, b)));
    assert!(graph.edges().is_empty());
    assert_eq!(
        graph.disconnect(a, b),
        Err(GraphError::NoSuchEdge { from: a, to: b })
    );
}

#[test]
fn test_next_block_is_first_outgoing_edge() {
    let mut graph = ProgramGraph::new();
    let a = graph.add_block(BlockTag::Display);
    let b = graph.add_block(BlockTag::Display);
    let c = graph.add_block(BlockTag::Display);
    graph.connect(a, c, None).unwrap();
    graph.connect(a, b, None).unwrap();
    assert_eq!(graph.next_block(a), Some(c));
    assert_eq!(graph.next_block(b), None);
}

// ─────────────────────────────────────────────────────────────────────
// Deletion
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_remove_block_cascades_edges() {
    let (mut graph, a, b) = chain();
    let c = graph.add_block(BlockTag::Display);
    graph.connect(b, c, None).unwrap();
    // An unrelated chain d -> e.
    let d = graph.add_block(BlockTag::Declare);
    let e = graph.add_block(BlockTag::Display);
    graph.connect(d, e, None).unwrap();
    assert_eq!(graph.edges().len(), 3);

    graph.remove_block(b).unwrap();
    assert!(graph.block(b).is_none());
    assert!(graph.edges().iter().all(|edge| !edge.touches(b)));
    assert!(graph.incoming(b).is_none());
    assert_eq!(graph.next_block(a), None);
    assert!(graph.incoming(c).is_none());
    assert_eq!(graph.edges(), &[Edge::new(d, e)]);
    assert!(graph.contains(a) && graph.contains(c));
    // The freed target can be connected again.
    graph.connect(a, c, None).unwrap();
}

#[test]
fn test_branched_edges_keep_their_branch() {
    let mut graph = ProgramGraph::new();
    let cond = graph.add_block(BlockTag::IfElse);
    let yes = graph.add_block(BlockTag::Display);
    let no = graph.add_block(BlockTag::Display);
    graph.connect(cond, yes, Some(Branch::True)).unwrap();
    graph.connect(cond, no, Some(Branch::False)).unwrap();
    assert_eq!(
        graph.edges(),
        &[
            Edge::branched(cond, yes, Branch::True),
            Edge::branched(cond, no, Branch::False),
        ]
    );
    graph.remove_block(no).unwrap();
    assert_eq!(graph.edges(), &[Edge::branched(cond, yes, Branch::True)]);
}

#[test]
fn test_remove_unknown_block() {
    let mut graph = ProgramGraph::new();
    assert!(matches!(
        graph.remove_block(BlockId(0)),
        Err(GraphError::UnknownBlock { .. })
    ));
}

// ─────────────────────────────────────────────────────────────────────
// Entry detection
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_entry_of_chain() {
    let (graph, a, _) = chain();
    assert_eq!(graph.entry(), Ok(a));
    assert_eq!(graph.validate(), Ok(a));
}

#[test]
fn test_empty_graph_has_no_entry() {
    assert_eq!(ProgramGraph::new().entry(), Err(StructuralError::NoEntry));
}

#[test]
fn test_two_roots_are_ambiguous() {
    let (mut graph, a, _) = chain();
    let stray = graph.add_block(BlockTag::Display);
    assert_eq!(
        graph.entry(),
        Err(StructuralError::AmbiguousEntry {
            candidates: vec![a, stray]
        })
    );
}

#[test]
fn test_markers_and_function_definitions_are_not_entries() {
    let (mut graph, a, _) = chain();
    graph.add_block(BlockTag::Operator(OperatorKind::Modulo));
    graph.add_block(BlockTag::Literal(DeclaredType::Boolean));
    let func = graph.add_block(BlockTag::Function);
    let ret = graph.add_block(BlockTag::Return);
    graph.connect(func, ret, None).unwrap();
    assert_eq!(graph.entry(), Ok(a));
}

#[test]
fn test_dangling_edge_detected_after_deserialization() {
    let json = serde_json::json!({
        "blocks": {
            "block-0": { "id": "block-0", "type": "display", "message": "1" }
        },
        "edges": [ { "from": "block-0", "to": "block-5" } ]
    });
    let graph: ProgramGraph = serde_json::from_value(json).unwrap();
    assert_eq!(
        graph.validate(),
        Err(StructuralError::DanglingEdge {
            from: BlockId(0),
            to: BlockId(5),
            missing: BlockId(5),
        })
    );
}

#[test]
fn test_graph_json_round_trip() {
    let mut graph = ProgramGraph::new();
    let cond = graph.add_block(BlockTag::IfElse);
    let yes = graph.add_block(BlockTag::Display);
    graph.connect(cond, yes, Some(Branch::True)).unwrap();
    let json = serde_json::to_value(&graph).unwrap();
    assert_eq!(json["edges"][0]["branch"], true);
    let back: ProgramGraph = serde_json::from_value(json).unwrap();
    assert_eq!(back, graph);
}
