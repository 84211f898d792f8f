//! Revision Store Tests
//!
//! ## Scenarios Covered
//!
//! 1. Copy-on-write isolation between a base revision and its copy
//! 2. Finalization is one-way and blocks every mutation
//! 3. Data round-trips through add/get for every primitive kind
//! 4. Object identity survives deletion
//! 5. Failing mutations leave the revision untouched

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::*;
use proptest::prelude::*;
use revstore_core::model::{
    ArcData, ComponentData, LineAttr, ObjectData, PathData, PictureData, TextData,
};
use revstore_core::ops::{
    add_object, copy_object, copy_objects, delete_object, delete_objects, relocate_object,
    set_object_data, Revision,
};
use revstore_core::rules::is_consistent;
use revstore_core::{Object, ObjectType, Pointer, Selection, StoreError};

#[test]
fn test_copy_matches_base_before_mutation() {
    // GIVEN a finalized revision with attached objects
    let mut base = Revision::new();
    let net = add_object(&mut base, net_data()).unwrap();
    let label = add_object(&mut base, text_data("netname=VCC")).unwrap();
    add_object(&mut base, line_data()).unwrap();
    relocate_object(&mut base, label, Some(net), None).unwrap();
    base.finalize();

    // WHEN we copy it
    let copy = Revision::copy_of(&base);

    // THEN objects, order and data are identical
    assert_eq!(copy.get_objects(), base.get_objects());
    for ob in base.get_objects() {
        assert_eq!(copy.get_object_data(ob).unwrap(), base.get_object_data(ob).unwrap());
        assert_eq!(
            copy.get_object_location(ob).unwrap(),
            base.get_object_location(ob).unwrap()
        );
    }
}

#[test]
fn test_mutating_copy_never_changes_base() {
    let mut base = Revision::new();
    let net = add_object(&mut base, net_data()).unwrap();
    let label = add_object(&mut base, text_data("a")).unwrap();
    relocate_object(&mut base, label, Some(net), None).unwrap();
    base.finalize();
    let objects_before = base.get_objects();
    let net_before = base.get_object_data(net).unwrap().clone();

    let mut copy = Revision::copy_of(&base);
    set_object_data(&mut copy, net, ComponentData::default()).unwrap();
    relocate_object(&mut copy, label, None, None).unwrap();
    add_object(&mut copy, line_data()).unwrap();
    delete_object(&mut copy, net).unwrap();

    assert_eq!(base.get_objects(), objects_before);
    assert_eq!(base.get_object_data(net).unwrap(), &net_before);
    assert_eq!(base.get_object_location(label).unwrap(), (Some(net), 0));
}

#[test]
fn test_mutating_base_never_changes_copy() {
    let mut base = Revision::new();
    let ob = add_object(&mut base, line_data()).unwrap();
    let copy = Revision::copy_of(&base);

    set_object_data(&mut base, ob, box_data()).unwrap();
    add_object(&mut base, net_data()).unwrap();

    assert_eq!(copy.get_objects(), vec![ob]);
    assert_eq!(copy.get_object_type(ob), Some(ObjectType::Line));
}

#[test]
fn test_finalized_revision_rejects_all_mutations() {
    let mut rev = Revision::new();
    let ob = add_object(&mut rev, net_data()).unwrap();
    let label = add_object(&mut rev, text_data("x")).unwrap();
    rev.finalize();
    rev.finalize();
    assert!(!rev.is_transient());

    let src = Revision::copy_of(&rev);
    let not_transient = Err(StoreError::RevisionNotTransient);
    assert_eq!(add_object(&mut rev, line_data()).map(|_| ()), not_transient);
    assert_eq!(set_object_data(&mut rev, ob, line_data()), not_transient);
    assert_eq!(relocate_object(&mut rev, label, Some(ob), None), not_transient);
    assert_eq!(delete_object(&mut rev, ob), not_transient);
    assert_eq!(delete_objects(&mut rev, &Selection::single(ob)), not_transient);
    assert_eq!(copy_object(&mut rev, &src, ob).map(|_| ()), not_transient);
    assert_eq!(
        copy_objects(&mut rev, &src, &Selection::single(ob)).map(|_| ()),
        not_transient
    );

    assert_eq!(rev.get_objects(), vec![ob, label]);
}

#[test]
fn test_round_trip_every_kind() {
    let records: Vec<ObjectData> = vec![
        ArcData {
            x: 1.0,
            y: 2.0,
            radius: 3.0,
            startangle: 90,
            sweepangle: 180,
            color: 3,
            line: LineAttr {
                width: 10.0,
                cap_style: 1,
                dash_style: 2,
                dash_length: 5.0,
                dash_space: 6.0,
            },
        }
        .into(),
        box_data().into(),
        circle_data().into(),
        ComponentData {
            x: 5.0,
            selectable: true,
            mirror: true,
            angle: 270,
            ..Default::default()
        }
        .into(),
        line_data().into(),
        net_data().into(),
        PathData {
            pathdata: b"M 0,0 L 100,100 z".to_vec(),
            ..Default::default()
        }
        .into(),
        PictureData {
            width: 640.0,
            height: 480.0,
            ..Default::default()
        }
        .into(),
        text_data("refdes=U1").into(),
    ];

    let mut rev = Revision::new();
    for data in records {
        let ob = add_object(&mut rev, data.clone()).unwrap();
        assert_eq!(rev.get_object_data(ob).unwrap(), &data);
        assert_eq!(rev.get_object_type(ob), Some(data.object_type()));
    }
}

#[test]
fn test_text_with_embedded_nul_is_preserved() {
    let mut rev = Revision::new();
    let text = TextData {
        text: b"before\0after".to_vec(),
        ..Default::default()
    };
    let ob = add_object(&mut rev, text).unwrap();
    let stored = rev.get_object_data(ob).unwrap().as_text().unwrap();
    assert_eq!(stored.text, b"before\0after");
    assert_eq!(stored.text.len(), 12);
}

#[test]
fn test_text_that_is_not_utf8_is_preserved() {
    let mut rev = Revision::new();
    let raw = vec![b'R', 0xff, 0xfe, b'1'];
    let ob = add_object(
        &mut rev,
        TextData {
            text: raw.clone(),
            ..Default::default()
        },
    )
    .unwrap();
    let copy = Revision::copy_of(&rev);
    assert_eq!(copy.get_object_data(ob).unwrap().as_text().unwrap().text, raw);
}

#[test]
fn test_identity_survives_deletion() {
    // GIVEN an object that sits second among the roots
    let mut rev = Revision::new();
    add_object(&mut rev, line_data()).unwrap();
    let ob = add_object(&mut rev, box_data()).unwrap();
    add_object(&mut rev, line_data()).unwrap();
    assert_eq!(rev.get_object_location(ob).unwrap(), (None, 1));

    // WHEN it is deleted and then given data again
    delete_object(&mut rev, ob).unwrap();
    assert!(!rev.object_exists(ob));
    set_object_data(&mut rev, ob, circle_data()).unwrap();

    // THEN it exists again as the last root with the new data
    assert!(rev.object_exists(ob));
    assert_eq!(rev.get_object_data(ob).unwrap(), &circle_data().into());
    assert_eq!(rev.get_object_location(ob).unwrap(), (None, 2));
}

#[test]
fn test_set_object_data_keeps_location() {
    let mut rev = Revision::new();
    let a = add_object(&mut rev, line_data()).unwrap();
    let b = add_object(&mut rev, line_data()).unwrap();
    let c = add_object(&mut rev, line_data()).unwrap();

    set_object_data(&mut rev, b, box_data()).unwrap();

    assert_eq!(rev.get_objects(), vec![a, b, c]);
    assert_eq!(rev.get_object_type(b), Some(ObjectType::Box));
}

#[test]
fn test_failed_set_leaves_revision_unchanged() {
    let mut rev = Revision::new();
    let net = add_object(&mut rev, net_data()).unwrap();
    let label = add_object(&mut rev, text_data("a")).unwrap();
    relocate_object(&mut rev, label, Some(net), None).unwrap();
    let snapshot = Revision::copy_of(&rev);

    assert!(set_object_data(&mut rev, net, line_data()).is_err());
    assert!(set_object_data(&mut rev, label, line_data()).is_err());
    let mut bad = net_data();
    bad.width = f64::NAN;
    assert!(set_object_data(&mut rev, net, bad).is_err());

    assert_eq!(rev.get_objects(), snapshot.get_objects());
    assert_eq!(rev.get_object_data(net).unwrap(), snapshot.get_object_data(net).unwrap());
    assert!(revstore_core::compute_diff(&snapshot, &rev).is_empty());
}

#[test]
fn test_delete_objects_batch() {
    let mut rev = Revision::new();
    let net = add_object(&mut rev, net_data()).unwrap();
    let label = add_object(&mut rev, text_data("a")).unwrap();
    let loose = add_object(&mut rev, text_data("b")).unwrap();
    let keep = add_object(&mut rev, line_data()).unwrap();
    let comp = add_object(&mut rev, ComponentData::default()).unwrap();
    let attr = add_object(&mut rev, text_data("refdes=R1")).unwrap();
    relocate_object(&mut rev, label, Some(net), None).unwrap();
    relocate_object(&mut rev, attr, Some(comp), None).unwrap();

    // net takes its label along; attr is deleted from a surviving component
    delete_objects(&mut rev, &Selection::from_iter([net, loose, attr])).unwrap();

    assert_eq!(rev.get_objects(), vec![keep, comp]);
    assert!(!rev.object_exists(label));
    assert!(rev.get_objects_attached_to(Some(comp)).unwrap().is_empty());
    assert!(is_consistent(&rev));
}

#[test]
fn test_pointer_slot_identity_counts_as_data() {
    let mut rev = Revision::new();
    let symbol = Pointer::new(Watched::default());
    let ob = add_object(
        &mut rev,
        ComponentData {
            symbol: symbol.clone(),
            ..Default::default()
        },
    )
    .unwrap();

    let stored = rev.get_object_data(ob).unwrap().as_component().unwrap();
    assert_eq!(stored.symbol, symbol);
    assert_ne!(stored.symbol, Pointer::new(Watched::default()));
}

#[test]
fn test_get_selected_objects_ignores_missing() {
    let mut rev = Revision::new();
    let a = add_object(&mut rev, line_data()).unwrap();
    let b = add_object(&mut rev, line_data()).unwrap();
    let snapshot = Revision::copy_of(&rev);
    delete_object(&mut rev, b).unwrap();

    let sel = Selection::from_iter([a, b]);
    assert_eq!(rev.get_selected_objects(&sel), vec![a]);
    assert_eq!(snapshot.get_selected_objects(&sel).len(), 2);
    assert!(!rev.selection_is_empty(&sel));
    assert!(rev.selection_is_empty(&Selection::single(b)));
    assert!(rev.object_is_selected(&sel, a));
    assert!(!rev.object_is_selected(&sel, b));
}

#[derive(Debug, Clone)]
enum Op {
    Add(u8),
    SetData(usize, u8),
    Attach(usize, usize),
    Detach(usize),
    Delete(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..4).prop_map(Op::Add),
        (any::<usize>(), 0u8..4).prop_map(|(i, k)| Op::SetData(i, k)),
        (any::<usize>(), any::<usize>()).prop_map(|(i, j)| Op::Attach(i, j)),
        any::<usize>().prop_map(Op::Detach),
        any::<usize>().prop_map(Op::Delete),
    ]
}

fn record(kind: u8) -> ObjectData {
    match kind {
        0 => net_data().into(),
        1 => text_data("t").into(),
        2 => ComponentData::default().into(),
        _ => line_data().into(),
    }
}

fn pick(known: &[Object], i: usize) -> Option<Object> {
    known.get(i % known.len().max(1)).copied()
}

fn apply_op(rev: &mut Revision, known: &mut Vec<Object>, op: &Op) {
    // Errors are expected for many random ops; they must leave no trace
    match op {
        Op::Add(kind) => {
            if let Ok(ob) = add_object(rev, record(*kind)) {
                known.push(ob);
            }
        }
        Op::SetData(i, kind) => {
            if let Some(ob) = pick(known, *i) {
                let _ = set_object_data(rev, ob, record(*kind));
            }
        }
        Op::Attach(i, j) => {
            if let (Some(ob), Some(parent)) = (pick(known, *i), pick(known, *j)) {
                let _ = relocate_object(rev, ob, Some(parent), None);
            }
        }
        Op::Detach(i) => {
            if let Some(ob) = pick(known, *i) {
                let _ = relocate_object(rev, ob, None, None);
            }
        }
        Op::Delete(i) => {
            if let Some(ob) = pick(known, *i) {
                let _ = delete_object(rev, ob);
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_copy_isolation_and_consistency(
        setup in prop::collection::vec(op_strategy(), 0..40),
        edits in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut base = Revision::new();
        let mut known = Vec::new();
        for op in &setup {
            apply_op(&mut base, &mut known, op);
        }
        prop_assert!(is_consistent(&base));
        base.finalize();

        let objects_before = base.get_objects();
        let data_before: Vec<ObjectData> = objects_before
            .iter()
            .map(|ob| base.get_object_data(*ob).unwrap().clone())
            .collect();

        let mut copy = Revision::copy_of(&base);
        for op in &edits {
            apply_op(&mut copy, &mut known, op);
        }
        prop_assert!(is_consistent(&copy));

        prop_assert_eq!(base.get_objects(), objects_before.clone());
        for (ob, data) in objects_before.iter().zip(&data_before) {
            prop_assert_eq!(base.get_object_data(*ob).unwrap(), data);
        }
    }
}
