//! Copy Tests
//!
//! ## Scenarios Covered
//!
//! 1. Copying a single object between revisions
//! 2. Copying attached subtrees with fresh identities
//! 3. Batch copies from a selection, including stray and missing members

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::*;
use revstore_core::model::ComponentData;
use revstore_core::ops::{add_object, copy_object, copy_objects, relocate_object, Revision};
use revstore_core::rules::is_consistent;
use revstore_core::{Selection, StoreError};

#[test]
fn test_copy_object_appends_root_with_equal_data() {
    let mut src = Revision::new();
    let ob = add_object(&mut src, box_data()).unwrap();
    src.finalize();

    let mut dest = Revision::new();
    let existing = add_object(&mut dest, line_data()).unwrap();
    let copy = copy_object(&mut dest, &src, ob).unwrap();

    assert_ne!(copy, ob);
    assert!(!dest.object_exists(ob));
    assert_eq!(dest.get_objects(), vec![existing, copy]);
    assert_eq!(dest.get_object_data(copy).unwrap(), src.get_object_data(ob).unwrap());
}

#[test]
fn test_copy_object_missing_in_source() {
    let mut other = Revision::new();
    let ob = add_object(&mut other, box_data()).unwrap();
    let src = Revision::new();
    let mut dest = Revision::new();

    assert_eq!(
        copy_object(&mut dest, &src, ob),
        Err(StoreError::ObjectNotFound { object: ob })
    );
    assert!(dest.get_objects().is_empty());
}

#[test]
fn test_copy_attached_object_becomes_root() {
    let mut src = Revision::new();
    let net = add_object(&mut src, net_data()).unwrap();
    let label = add_object(&mut src, text_data("a")).unwrap();
    relocate_object(&mut src, label, Some(net), None).unwrap();

    let mut dest = Revision::new();
    let copy = copy_object(&mut dest, &src, label).unwrap();

    assert_eq!(dest.get_object_location(copy).unwrap(), (None, 0));
}

#[test]
fn test_copy_preserves_attachment_order() {
    let mut src = Revision::new();
    let comp = add_object(&mut src, ComponentData::default()).unwrap();
    let mut labels = Vec::new();
    for text in ["refdes=U1", "value=LM358", "footprint=SO8"] {
        let t = add_object(&mut src, text_data(text)).unwrap();
        relocate_object(&mut src, t, Some(comp), None).unwrap();
        labels.push(t);
    }

    let mut dest = Revision::new();
    let copy = copy_object(&mut dest, &src, comp).unwrap();
    let copied = dest.get_objects_attached_to(Some(copy)).unwrap();

    assert_eq!(copied.len(), 3);
    for (original, duplicate) in labels.iter().zip(&copied) {
        assert_ne!(original, duplicate);
        assert_eq!(
            dest.get_object_data(*duplicate).unwrap(),
            src.get_object_data(*original).unwrap()
        );
    }
    assert!(is_consistent(&dest));
}

#[test]
fn test_copy_objects_batch() {
    // GIVEN a net with a label, a component with an attribute, and a line
    let mut src = Revision::new();
    let net = add_object(&mut src, net_data()).unwrap();
    let label = add_object(&mut src, text_data("netname=A")).unwrap();
    let comp = add_object(&mut src, ComponentData::default()).unwrap();
    let attr = add_object(&mut src, text_data("refdes=R1")).unwrap();
    let line = add_object(&mut src, line_data()).unwrap();
    relocate_object(&mut src, label, Some(net), None).unwrap();
    relocate_object(&mut src, attr, Some(comp), None).unwrap();

    let mut missing_rev = Revision::new();
    let missing = add_object(&mut missing_rev, line_data()).unwrap();

    // WHEN copying the net (with its label selected too), the attribute on its
    // own, the line and an object the source does not have
    let mut dest = Revision::new();
    let sel = Selection::from_iter([net, label, attr, line, missing]);
    let copies = copy_objects(&mut dest, &src, &sel).unwrap();

    // THEN three new roots exist: the net (with a label), the attribute and the line
    assert_eq!(copies.len(), 3);
    let roots = dest.get_objects_attached_to(None).unwrap();
    assert_eq!(roots.len(), 3);
    assert_eq!(Selection::from_iter(roots.iter().copied()), copies);
    assert_eq!(dest.object_count(), 4);

    let net_copy = roots[0];
    assert_eq!(dest.get_object_data(net_copy).unwrap(), &net_data().into());
    assert_eq!(dest.get_objects_attached_to(Some(net_copy)).unwrap().len(), 1);
    assert_eq!(dest.get_object_data(roots[1]).unwrap(), &text_data("refdes=R1").into());
    assert_eq!(dest.get_object_data(roots[2]).unwrap(), &line_data().into());
    assert!(!copies.contains(net));
}

#[test]
fn test_copy_objects_empty_selection() {
    let mut src = Revision::new();
    add_object(&mut src, net_data()).unwrap();
    let mut dest = Revision::new();

    let copies = copy_objects(&mut dest, &src, &Selection::none()).unwrap();

    assert!(copies.is_empty());
    assert!(dest.get_objects().is_empty());
}
