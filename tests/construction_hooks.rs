//! Completion-hook firing and ordering across the two construction paths.

use podshadow::derive::PodShadow;
use podshadow::{ConstructionHooks, RonArchive, complete};

#[derive(PodShadow, Debug)]
#[pod(hooks)]
struct Session {
    user: String,
    #[pod(skip)]
    completions: u32,
    #[pod(skip)]
    restorations: u32,
    #[pod(skip)]
    order: Vec<&'static str>,
}

impl ConstructionHooks for Session {
    fn final_construct(&mut self) {
        self.completions += 1;
        self.order.push("final");
    }

    fn deserialize_final_construct(&mut self) {
        self.restorations += 1;
        self.order.push("deserialize");
    }
}

impl Session {
    fn new(user: &str) -> Self {
        complete(Session {
            user: user.into(),
            completions: 0,
            restorations: 0,
            order: Vec::new(),
        })
    }
}

#[test]
fn fresh_instance_fires_the_plain_hook_only() {
    let session = Session::new("ada");
    assert_eq!(session.completions, 1);
    assert_eq!(session.restorations, 0);
    assert_eq!(session.order, ["final"]);
}

#[test]
fn deserialized_instance_fires_both_hooks_once_in_order() {
    let session = Session::new("ada");

    let mut buffer = Vec::new();
    session.serialize::<RonArchive, _>(&mut buffer).unwrap();
    let restored = Session::deserialize::<RonArchive, _>(buffer.as_slice()).unwrap();

    assert_eq!(restored.user, "ada");
    assert_eq!(restored.completions, 1);
    assert_eq!(restored.restorations, 1);
    assert_eq!(restored.order, ["deserialize", "final"]);
}

// -----------------------------------------------------------------------------
// Nested hooks

#[derive(PodShadow, Debug)]
#[pod(hooks, data_only)]
struct Inner {
    value: u8,
    #[pod(skip)]
    completions: u32,
}

impl ConstructionHooks for Inner {
    fn final_construct(&mut self) {
        self.completions += 1;
    }
}

#[derive(PodShadow, Debug)]
struct Outer {
    #[pod(base)]
    inner: Inner,
    tag: u8,
}

#[test]
fn base_hooks_fire_during_nested_reconstruction() {
    let outer = Outer {
        inner: Inner {
            value: 5,
            completions: 0,
        },
        tag: 1,
    };

    let mut buffer = Vec::new();
    outer.serialize::<RonArchive, _>(&mut buffer).unwrap();
    let restored = Outer::deserialize::<RonArchive, _>(buffer.as_slice()).unwrap();

    assert_eq!(restored.inner.value, 5);
    assert_eq!(restored.inner.completions, 1);
}
