//! End-to-end tests for `analyze_group`.

use abgrid_sna::metrics::Metric;
use abgrid_sna::metrics::basic::DegreeStatus;
use abgrid_sna::{GroupChoices, NetworkKind, PackedRow, SnaConfig, analyze_group};

fn pair(a: &str, b: &str) -> (String, String) {
    (a.to_string(), b.to_string())
}

/// Six participants; F chose nobody and nobody chose F in network A, while
/// in network B everybody chose F.
fn six_person_group() -> GroupChoices {
    GroupChoices {
        group: 7,
        choices_a: vec![
            PackedRow::new("A", "B,C"),
            PackedRow::new("B", "A"),
            PackedRow::new("C", "A,D"),
            PackedRow::new("D", "E"),
            PackedRow::new("E", "D"),
            PackedRow::empty("F"),
        ],
        choices_b: vec![
            PackedRow::new("A", "F"),
            PackedRow::new("B", "F"),
            PackedRow::new("C", "F"),
            PackedRow::new("D", "F"),
            PackedRow::new("E", "F"),
            PackedRow::new("F", "A"),
        ],
    }
}

#[test]
fn isolated_participant_is_kept_and_flagged() {
    let report = analyze_group(&six_person_group(), &SnaConfig::default()).expect("valid group");

    assert_eq!(report.a.summary.node_count, 6);
    assert_eq!(report.a.nodes["F"].degree_status, DegreeStatus::Isolated);
    assert!(report.a.nodes["F"].has_no_indegree);
    assert_eq!(report.a.nodes["F"].links, "");
    assert!(report.a.layout.get("F").is_some());
    assert_eq!(report.a.components.weakly_connected.len(), 1);
}

#[test]
fn edge_types_of_network_a() {
    let report = analyze_group(&six_person_group(), &SnaConfig::default()).expect("valid group");
    let types = &report.a.edge_types;

    assert_eq!(types.type_i, vec![pair("C", "D")]);
    assert_eq!(
        types.type_ii,
        vec![pair("A", "B"), pair("A", "C"), pair("D", "E")]
    );
    assert!(types.type_iii.is_empty());
    assert!(types.type_iv.is_empty());
    assert!(types.type_v.is_empty());
}

#[test]
fn most_chosen_participant_ranks_first_in_b() {
    let report = analyze_group(&six_person_group(), &SnaConfig::default()).expect("valid group");

    let ic = &report.b.rankings[&Metric::InDegreeCentrality];
    assert_eq!(ic[0], pair_rank("F", 1));
    assert_eq!(ic[1], pair_rank("A", 2));
    assert!((report.b.nodes["F"].in_degree_centrality - 1.0).abs() < 1e-12);

    let summary = &report.b.summary;
    assert_eq!(summary.edge_count, 6);
    assert_eq!(summary.reciprocal_edge_count, 1);
}

fn pair_rank(label: &str, rank: u32) -> (String, u32) {
    (label.to_string(), rank)
}

#[test]
fn descriptives_cover_every_metric() {
    let report = analyze_group(&six_person_group(), &SnaConfig::default()).expect("valid group");
    for metric in Metric::ALL {
        let d = report.a.descriptives[&metric];
        assert_eq!(d.count, 6);
        assert!(d.min <= d.median && d.median <= d.max, "{metric:?}");
        assert!(d.min <= d.p25 && d.p25 <= d.median, "{metric:?}");
        assert!(d.median <= d.p75 && d.p75 <= d.max, "{metric:?}");
    }
}

#[test]
fn relevant_participants_per_network() {
    let report = analyze_group(&six_person_group(), &SnaConfig::default()).expect("valid group");

    let top_in_degree = |kind: NetworkKind| -> Vec<(String, u32)> {
        report.relevant_nodes[&kind]
            .iter()
            .filter(|n| n.metric == Metric::InDegreeCentrality)
            .map(|n| (n.label.clone(), n.rank))
            .collect()
    };
    // A: A and D are chosen twice. B: everybody chose F.
    assert_eq!(
        top_in_degree(NetworkKind::A),
        vec![pair_rank("A", 1), pair_rank("D", 1)]
    );
    assert_eq!(top_in_degree(NetworkKind::B), vec![pair_rank("F", 1)]);

    let f = &report.relevant_nodes[&NetworkKind::B][0];
    assert!((f.value - 1.0).abs() < 1e-12);
    assert!((f.weight - 10.0).abs() < 1e-12);
}

#[test]
fn ranks_of_both_networks_side_by_side() {
    let report = analyze_group(&six_person_group(), &SnaConfig::default()).expect("valid group");
    let ic = &report.rankings_ab[&Metric::InDegreeCentrality];

    let f = ic.iter().find(|p| p.label == "F").expect("F listed");
    assert_eq!((f.rank_a, f.rank_b), (3, 1));
    let a = ic.iter().find(|p| p.label == "A").expect("A listed");
    assert_eq!((a.rank_a, a.rank_b), (1, 2));
    assert!(ic.windows(2).all(|w| w[0].rank_a <= w[1].rank_a));
}

#[test]
fn report_serializes_to_json() {
    let report = analyze_group(&six_person_group(), &SnaConfig::default()).expect("valid group");
    let value = serde_json::to_value(&report).expect("serialize");

    assert_eq!(value["group"], 7);
    assert_eq!(value["a"]["kind"], "A");
    assert_eq!(value["a"]["nodes"]["F"]["degree_status"], "isolated");
    assert_eq!(value["b"]["rankings"]["in_degree_centrality"][0][0], "F");
    assert!(value["a"]["layout"]["A"]["x"].is_number());
    assert!(value["a"].get("svg").is_none());
    assert_eq!(value["relevant_nodes"]["B"][0]["label"], "F");
    assert_eq!(value["rankings_ab"]["in_degree_centrality"][0]["rank_a"], 1);
    assert!(value["a"]["descriptives"]["pagerank"]["kurtosis"].is_number());
    assert!(
        value["b"]["image_uri"]
            .as_str()
            .is_some_and(|uri| uri.starts_with("data:image/svg+xml;base64,"))
    );
}

#[test]
fn mismatched_group_reports_a_stable_code() {
    let mut group = six_person_group();
    group.choices_b = vec![
        PackedRow::new("A", "B"),
        PackedRow::new("B", "A"),
        PackedRow::new("C", "G"),
        PackedRow::new("D", "E"),
        PackedRow::new("E", "D"),
    ];

    let err = analyze_group(&group, &SnaConfig::default()).expect_err("F and G mismatch");
    assert_eq!(err.code(), "E1001");
    assert!(err.to_string().contains("only in A: [F]"));
    assert!(err.to_string().contains("only in B: [G]"));
}

#[test]
fn configured_seed_changes_the_layout_only() {
    let base = analyze_group(&six_person_group(), &SnaConfig::default()).expect("valid group");
    let mut config = SnaConfig::default();
    config.layout.seed = 7;
    let reseeded = analyze_group(&six_person_group(), &config).expect("valid group");

    assert_eq!(base.a.nodes, reseeded.a.nodes);
    assert_eq!(base.a.summary, reseeded.a.summary);
    assert_ne!(base.a.layout, reseeded.a.layout);
}
