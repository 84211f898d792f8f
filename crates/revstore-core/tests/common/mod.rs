#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use revstore_core::model::{
    BoxData, CircleData, FillAttr, LineAttr, LineData, NetData, TextData,
};
use revstore_core::ops::{add_object, delete_object, set_object_data, Revision};
use revstore_core::{Object, Pointee};

pub fn line_data() -> LineData {
    LineData {
        x: 0.0,
        y: 1.0,
        width: 3.0,
        height: 2.0,
        color: 3,
        line: LineAttr {
            width: 1.0,
            ..Default::default()
        },
    }
}

pub fn box_data() -> BoxData {
    BoxData {
        x: 1.0,
        y: 1.0,
        width: 2.0,
        height: 2.0,
        color: 3,
        line: LineAttr {
            width: 1.0,
            ..Default::default()
        },
        fill: FillAttr::default(),
    }
}

pub fn circle_data() -> CircleData {
    CircleData {
        x: -1.0,
        y: -1.0,
        radius: 2.0,
        color: 3,
        line: LineAttr {
            width: 1.0,
            ..Default::default()
        },
        fill: FillAttr {
            type_: 1,
            ..Default::default()
        },
    }
}

pub fn net_data() -> NetData {
    NetData {
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 0.0,
        color: 4,
        ..Default::default()
    }
}

pub fn text_data(text: &str) -> TextData {
    TextData {
        color: 5,
        text_size: 10,
        visibility: true,
        text: text.as_bytes().to_vec(),
        ..Default::default()
    }
}

/// Chain of four revisions used by the diff scenarios
///
/// rev0 is empty; rev1 adds a line (ob0); rev2 adds a box (ob1a) and a
/// circle (ob1b); rev3 changes ob0's data and deletes ob1a. All four are
/// finalized.
pub struct History {
    pub rev0: Revision,
    pub rev1: Revision,
    pub rev2: Revision,
    pub rev3: Revision,
    pub ob0: Object,
    pub ob1a: Object,
    pub ob1b: Object,
}

pub fn history() -> History {
    let mut rev0 = Revision::new();
    rev0.finalize();

    let mut rev1 = Revision::copy_of(&rev0);
    let ob0 = add_object(&mut rev1, line_data()).unwrap();
    rev1.finalize();

    let mut rev2 = Revision::copy_of(&rev1);
    let ob1a = add_object(&mut rev2, box_data()).unwrap();
    let ob1b = add_object(&mut rev2, circle_data()).unwrap();
    rev2.finalize();

    let mut rev3 = Revision::copy_of(&rev2);
    let mut changed = line_data();
    changed.color = 7;
    set_object_data(&mut rev3, ob0, changed).unwrap();
    delete_object(&mut rev3, ob1a).unwrap();
    rev3.finalize();

    History {
        rev0,
        rev1,
        rev2,
        rev3,
        ob0,
        ob1a,
        ob1b,
    }
}

/// Caller-owned value that records whether it is still alive and how many
/// slots refer to it
#[derive(Default)]
pub struct Watched {
    pub refs: AtomicUsize,
    pub increments: AtomicUsize,
    pub decrements: AtomicUsize,
}

impl Pointee for Watched {
    fn increment(&self) {
        self.refs.fetch_add(1, Ordering::SeqCst);
        self.increments.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        self.refs.fetch_sub(1, Ordering::SeqCst);
        self.decrements.fetch_add(1, Ordering::SeqCst);
    }
}

impl Watched {
    pub fn refs(&self) -> usize {
        self.refs.load(Ordering::SeqCst)
    }
}

/// Sets its flag to false when the last owner lets go of it
pub struct DelWatcher {
    alive: Arc<AtomicBool>,
}

impl DelWatcher {
    pub fn new() -> (Self, Arc<AtomicBool>) {
        let alive = Arc::new(AtomicBool::new(true));
        (
            Self {
                alive: Arc::clone(&alive),
            },
            alive,
        )
    }
}

impl Drop for DelWatcher {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

impl Pointee for DelWatcher {}

pub fn is_alive(flag: &AtomicBool) -> bool {
    flag.load(Ordering::SeqCst)
}
