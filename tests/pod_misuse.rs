//! Protocol misuse is fatal at the call site, not an archive error.

use podshadow::SerializationPod;
use podshadow::derive::PodShadow;

#[derive(PodShadow, Debug, PartialEq)]
struct Tiny {
    n: u8,
}

#[test]
fn save_pods_expose_their_view() {
    let tiny = Tiny { n: 1 };
    let pod = SerializationPod::from_value(&tiny);
    assert!(pod.is_saving());
    let _ = pod.view();
}

#[test]
#[should_panic(expected = "`construct` invoked on a serializing pod")]
fn construct_on_a_save_pod() {
    let tiny = Tiny { n: 1 };
    let pod = SerializationPod::from_value(&tiny);
    let _ = pod.construct();
}

#[test]
#[should_panic(expected = "not available on a deserializing pod")]
fn view_on_a_load_pod() {
    let pod = SerializationPod::<Tiny>::empty();
    let _ = pod.view();
}

#[test]
#[should_panic(expected = "has never been populated")]
fn construct_on_an_empty_load_pod() {
    let pod = SerializationPod::<Tiny>::empty();
    let _ = pod.construct();
}

#[test]
#[should_panic(expected = "already been populated")]
fn populate_twice() {
    let mut pod = SerializationPod::<Tiny>::empty();
    pod.populate(TinyDeserializeView { n: 1 });
    pod.populate(TinyDeserializeView { n: 2 });
}

#[test]
fn populate_then_construct() {
    let mut pod = SerializationPod::<Tiny>::empty();
    assert!(!pod.is_saving());
    pod.populate(TinyDeserializeView { n: 9 });
    assert_eq!(pod.construct(), Tiny { n: 9 });
}
