//! Integration tests for layer reference tracking

use kbview::models::{LayoutDocument, RawKeycode};
use kbview::services::layer_refs::dangling_refs;
use kbview::services::{
    build_layer_ref_index, find_layer_refs, transparency_conflicts, LayerRefKind,
};

mod fixtures;

fn row(tokens: &[&str]) -> Vec<RawKeycode> {
    tokens.iter().map(|t| RawKeycode::token(*t)).collect()
}

#[test]
fn test_layer_refs_basic_flow() {
    // Create a simple 2-layer layout
    let doc = LayoutDocument::new(vec![
        vec![row(&["KC_A", "MO(1)", "LT(1, KC_SPC)"])],
        vec![row(&["KC_1", "KC_TRNS", "KC_2"])],
    ]);

    let layer_refs = build_layer_ref_index(&doc);

    // Layer 1 should have 2 inbound references from layer 0
    let refs = layer_refs.get(&1).expect("Layer 1 should have refs");
    assert_eq!(refs.len(), 2);

    let mo_ref = refs.iter().find(|r| r.col == 1);
    assert_eq!(mo_ref.unwrap().kind, LayerRefKind::Momentary);

    let lt_ref = refs.iter().find(|r| r.col == 2);
    assert_eq!(lt_ref.unwrap().kind, LayerRefKind::TapHold);
}

#[test]
fn test_all_reference_kinds() {
    let doc = LayoutDocument::new(vec![
        vec![row(&["MO(1)", "TG(1)", "TO(1)", "TT(1)", "OSL(1)", "DF(1)", "LT1(KC_A)"])],
        vec![row(&["KC_TRNS"; 7])],
    ]);

    let kinds: Vec<LayerRefKind> = find_layer_refs(&doc).iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            LayerRefKind::Momentary,
            LayerRefKind::Toggle,
            LayerRefKind::SwitchTo,
            LayerRefKind::TapToggle,
            LayerRefKind::OneShot,
            LayerRefKind::DefaultSet,
            LayerRefKind::TapHold,
        ]
    );
}

#[test]
fn test_plain_keys_are_not_references() {
    let doc = LayoutDocument::new(vec![vec![row(&[
        "KC_A",
        "LCTL_T(KC_B)",
        "LSFT(KC_1)",
        "M3",
        "KC_TRNS",
    ])]]);

    assert!(find_layer_refs(&doc).is_empty());
    assert!(build_layer_ref_index(&doc).is_empty());
}

#[test]
fn test_transparency_warning() {
    let doc = LayoutDocument::new(vec![
        vec![row(&["LT1(KC_SPACE)", "MO(1)", "TG(1)"])],
        vec![row(&["KC_TRNS", "KC_B", "KC_C"])],
    ]);

    let conflicts = transparency_conflicts(&doc);

    // MO(1) is hold-like and lands on KC_B; TG(1) is not hold-like
    assert_eq!(conflicts.len(), 1);
    let conflict = &conflicts[0];
    assert_eq!(conflict.layer_ref.kind, LayerRefKind::Momentary);
    assert_eq!(conflict.target_keycode, "KC_B");
    assert!(conflict.message().contains("Momentary (MO)"));
}

#[test]
fn test_unprogrammed_target_is_not_a_conflict() {
    let doc = LayoutDocument::new(vec![
        vec![vec![RawKeycode::token("MO(1)")]],
        vec![vec![RawKeycode::unprogrammed()]],
    ]);

    assert!(transparency_conflicts(&doc).is_empty());
}

#[test]
fn test_dangling_references() {
    let doc = LayoutDocument::new(vec![vec![row(&["MO(1)", "LT7(KC_A)", "MO(0)"])]]);

    let dangling = dangling_refs(&doc);
    let targets: Vec<usize> = dangling.iter().map(|r| r.to_layer).collect();
    assert_eq!(targets, vec![1, 7]);
}

#[test]
fn test_large_layer_numbers_are_dangling() {
    let doc = LayoutDocument::new(vec![
        vec![row(&["MO(300)", "LT256(KC_A)"])],
        vec![row(&["KC_TRNS", "KC_TRNS"])],
    ]);

    let dangling = dangling_refs(&doc);
    assert_eq!(dangling.len(), 2);
    assert_eq!(dangling[0].kind, LayerRefKind::Momentary);
    assert_eq!(dangling[0].to_layer, 300);
    assert_eq!(dangling[1].kind, LayerRefKind::TapHold);
    assert_eq!(dangling[1].to_layer, 256);
    assert!(transparency_conflicts(&doc).is_empty());
}

#[test]
fn test_fixture_layout_refs() {
    let doc = fixtures::corne_document();

    let index = build_layer_ref_index(&doc);
    assert_eq!(index.len(), 1);
    assert_eq!(index[&1].len(), 2);
    assert!(index[&1].iter().all(|r| r.from_layer == 0));
    assert!(transparency_conflicts(&doc).is_empty());
    assert!(dangling_refs(&doc).is_empty());
}
