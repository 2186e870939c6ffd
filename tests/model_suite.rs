use std::cmp::Ordering;

use edgeviz::{GraphBuilder, GraphConfig, Row, Value};

fn edge_row(src: &str, tgt: &str) -> Row {
    Row::new().with("src", src).with("tgt", tgt)
}

#[test]
fn node_ids_are_unique_across_repeated_rows() {
    let config = GraphConfig::new("src", "tgt");
    let rows = vec![
        edge_row("a", "b"),
        edge_row("a", "b"),
        edge_row("b", "a"),
        edge_row("a", "c"),
        edge_row("c", "a"),
    ];
    let model = GraphBuilder::new(&config).build(&rows).unwrap();

    let mut ids: Vec<String> = model.nodes().iter().map(|n| n.id.to_string()).collect();
    let before = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), before);
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn undirected_reversals_collapse_to_one_weighted_edge() {
    // Rows (A,B), (B,A), (A,C) with no width column: canonical (A,B)
    // carries weight 2, (A,C) weight 1.
    let config = GraphConfig::new("src", "tgt");
    let rows = vec![edge_row("A", "B"), edge_row("B", "A"), edge_row("A", "C")];
    let model = GraphBuilder::new(&config).build(&rows).unwrap();

    assert_eq!(model.node_count(), 3);
    assert_eq!(model.edge_count(), 2);

    for edge in model.edges() {
        assert_ne!(
            edge.from.try_cmp(&edge.to),
            Some(Ordering::Greater),
            "edge ({}, {}) is not canonical",
            edge.from,
            edge.to
        );
    }
    let ab = &model.edges()[0];
    assert_eq!((ab.from.to_string(), ab.to.to_string(), ab.value), ("A".into(), "B".into(), 2.0));
    let ac = &model.edges()[1];
    assert_eq!((ac.from.to_string(), ac.to.to_string(), ac.value), ("A".into(), "C".into(), 1.0));
}

#[test]
fn node_cap_is_a_hard_stop_on_the_scan() {
    // Three distinct node values but a cap of 2: the row introducing the
    // third never runs, so neither does its edge.
    let mut config = GraphConfig::new("src", "tgt");
    config.max_nodes = 2;
    let rows = vec![edge_row("a", "b"), edge_row("b", "c")];
    let model = GraphBuilder::new(&config).build(&rows).unwrap();

    assert_eq!(model.node_count(), 2);
    assert_eq!(model.edge_count(), 1);
    assert!(!model.contains_node(&Value::from("c")));
}

#[test]
fn source_role_takes_precedence_over_target_role() {
    let mut config = GraphConfig::new("src", "tgt");
    config.source_color_column = Some("src_color".to_string());
    config.target_color_column = Some("tgt_color".to_string());

    // "b" appears first as a target (gets the target color), then as a
    // source (the source color overwrites it).
    let rows = vec![
        edge_row("a", "b")
            .with("src_color", "red")
            .with("tgt_color", "green"),
        edge_row("b", "c")
            .with("src_color", "blue")
            .with("tgt_color", "green"),
    ];
    let model = GraphBuilder::new(&config).build(&rows).unwrap();
    let b = model
        .nodes()
        .iter()
        .find(|n| n.id == Value::from("b"))
        .unwrap();
    assert_eq!(b.group, Some(Value::from("blue")));
}

#[test]
fn target_role_fills_gaps_without_overwriting() {
    let mut config = GraphConfig::new("src", "tgt");
    config.target_size_column = Some("tgt_size".to_string());

    // "a" is created as a source with no size; its later target
    // appearance supplies one.
    let rows = vec![
        edge_row("a", "b"),
        edge_row("c", "a").with("tgt_size", 12.0),
    ];
    let model = GraphBuilder::new(&config).build(&rows).unwrap();
    let a = model
        .nodes()
        .iter()
        .find(|n| n.id == Value::from("a"))
        .unwrap();
    assert_eq!(a.value, Some(Value::Float(12.0)));
}

#[test]
fn edge_caption_comes_from_the_first_seen_row() {
    let mut config = GraphConfig::new("src", "tgt");
    config.edge_caption_column = Some("kind".to_string());
    let rows = vec![
        edge_row("a", "b").with("kind", "first"),
        edge_row("a", "b").with("kind", "second"),
    ];
    let model = GraphBuilder::new(&config).build(&rows).unwrap();
    assert_eq!(model.edges()[0].label, Some(Value::from("first")));
    assert_eq!(model.edges()[0].value, 2.0);
}

#[test]
fn titles_are_derived_for_every_node_and_edge() {
    let mut config = GraphConfig::new("src", "tgt");
    config.edge_caption_column = Some("kind".to_string());
    let rows = vec![edge_row("a", "b").with("kind", "link")];
    let model = GraphBuilder::new(&config).build(&rows).unwrap();

    assert_eq!(model.nodes()[0].title, "id: a");
    assert_eq!(model.edges()[0].title, "a -> b<br>caption: link<br>width: 1");
}
