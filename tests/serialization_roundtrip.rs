//! Value-mode round trips across both archive engines.

use podshadow::derive::PodShadow;
use podshadow::{JsonArchive, PodShadow as _, RonArchive};

#[derive(PodShadow, Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(PodShadow, Debug, PartialEq)]
struct Sprite {
    #[pod(base)]
    origin: Point,
    name: String,
    frames: Vec<u16>,
    tint: Option<u32>,
    thumbnail: Box<Point>,
}

fn sample_sprite() -> Sprite {
    Sprite {
        origin: Point { x: -3, y: 14 },
        name: "hero".into(),
        frames: vec![0, 1, 1, 2],
        tint: Some(0x00ff_0088),
        thumbnail: Box::new(Point { x: 1, y: 1 }),
    }
}

#[test]
fn round_trip_ron() {
    let sprite = sample_sprite();
    let mut buffer = Vec::new();
    sprite.serialize::<RonArchive, _>(&mut buffer).unwrap();
    let restored = Sprite::deserialize::<RonArchive, _>(buffer.as_slice()).unwrap();
    assert_eq!(restored, sprite);
}

#[test]
fn round_trip_json() {
    let sprite = sample_sprite();
    let mut buffer = Vec::new();
    sprite.serialize::<JsonArchive, _>(&mut buffer).unwrap();
    let restored = Sprite::deserialize::<JsonArchive, _>(buffer.as_slice()).unwrap();
    assert_eq!(restored, sprite);
}

#[test]
fn round_trip_none_variant() {
    let sprite = Sprite {
        tint: None,
        ..sample_sprite()
    };
    let mut buffer = Vec::new();
    sprite.serialize::<JsonArchive, _>(&mut buffer).unwrap();
    let restored = Sprite::deserialize::<JsonArchive, _>(buffer.as_slice()).unwrap();
    assert_eq!(restored, sprite);
}

// -----------------------------------------------------------------------------
// Composition

#[derive(PodShadow, Debug, PartialEq)]
#[pod(data_only)]
struct Identity {
    id: u64,
}

#[derive(PodShadow, Debug, PartialEq)]
#[pod(data_only)]
struct Audit {
    created_at: u64,
    revision: u32,
}

#[derive(PodShadow, Debug, PartialEq)]
struct Record {
    #[pod(base)]
    identity: Identity,
    #[pod(base)]
    audit: Audit,
    payload: String,
}

#[test]
fn multiple_bases_round_trip_in_declaration_order() {
    let record = Record {
        identity: Identity { id: 99 },
        audit: Audit {
            created_at: 1_700_000_000,
            revision: 7,
        },
        payload: "body".into(),
    };
    let mut buffer = Vec::new();
    record.serialize::<JsonArchive, _>(&mut buffer).unwrap();

    // Bases serialize before members, keyed by scrubbed type name.
    let text = String::from_utf8(buffer.clone()).unwrap();
    let identity_at = text.find("\"Identity\"").unwrap();
    let audit_at = text.find("\"Audit\"").unwrap();
    let payload_at = text.find("\"payload\"").unwrap();
    assert!(identity_at < audit_at && audit_at < payload_at);

    let restored = Record::deserialize::<JsonArchive, _>(buffer.as_slice()).unwrap();
    assert_eq!(restored, record);
}

#[derive(PodShadow, Debug, PartialEq)]
struct Nothing;

#[test]
fn empty_hierarchy_round_trips() {
    let mut buffer = Vec::new();
    Nothing.serialize::<RonArchive, _>(&mut buffer).unwrap();
    let restored = Nothing::deserialize::<RonArchive, _>(buffer.as_slice()).unwrap();
    assert_eq!(restored, Nothing);
}

// -----------------------------------------------------------------------------
// Custom construction

#[derive(PodShadow, Debug, PartialEq)]
#[pod(custom_construct)]
struct Celsius {
    degrees: f64,
}

impl Celsius {
    fn new(degrees: f64) -> Self {
        assert!(degrees >= -273.15, "below absolute zero");
        Celsius { degrees }
    }

    fn deserialize_construct(view: <Self as podshadow::PodShadow>::DeserializeView) -> Self {
        Celsius::new(view.degrees)
    }
}

#[test]
fn custom_construct_goes_through_the_checked_constructor() {
    let value = Celsius::new(36.6);
    let mut buffer = Vec::new();
    value.serialize::<JsonArchive, _>(&mut buffer).unwrap();
    let restored = Celsius::deserialize::<JsonArchive, _>(buffer.as_slice()).unwrap();
    assert_eq!(restored, value);
}

// -----------------------------------------------------------------------------
// Tags

#[test]
fn default_tag_is_the_scrubbed_type_path() {
    assert_eq!(Sprite::default_tag(), "Sprite");
}

#[test]
fn explicit_tags_round_trip() {
    let point = Point { x: 1, y: 2 };
    let mut buffer = Vec::new();
    point
        .serialize_tagged::<RonArchive, _>(&mut buffer, "Origin")
        .unwrap();
    let restored =
        Point::deserialize_tagged::<RonArchive, _>(buffer.as_slice(), "Origin").unwrap();
    assert_eq!(restored, point);
}

#[test]
fn mismatched_tag_is_an_archive_error() {
    let point = Point { x: 1, y: 2 };
    let mut buffer = Vec::new();
    point.serialize::<JsonArchive, _>(&mut buffer).unwrap();

    let error = Point::deserialize_tagged::<JsonArchive, _>(buffer.as_slice(), "Elsewhere")
        .unwrap_err();
    assert!(error.to_string().contains("expected tagged entry"));
}

#[test]
fn unknown_entry_is_an_archive_error() {
    let payload = br#"{"Point":{"x":1,"y":2,"z":3}}"#;
    let error = Point::deserialize::<JsonArchive, _>(payload.as_slice()).unwrap_err();
    assert!(error.to_string().contains("unknown entry `z`"));
}

#[test]
fn missing_entry_is_an_archive_error() {
    let payload = br#"{"Point":{"x":1}}"#;
    let error = Point::deserialize::<JsonArchive, _>(payload.as_slice()).unwrap_err();
    assert!(error.to_string().contains("missing field"));
}

// -----------------------------------------------------------------------------
// Size probes

#[test]
fn serialized_size_is_exact_and_stable() {
    let sprite = sample_sprite();

    let ron_size = sprite.serialized_size::<RonArchive>().unwrap();
    let json_size = sprite.serialized_size::<JsonArchive>().unwrap();
    assert!(ron_size > 0);
    assert!(json_size > 0);
    // The engines encode options differently, so the counts diverge.
    assert_ne!(ron_size, json_size);

    assert_eq!(ron_size, sprite.serialized_size::<RonArchive>().unwrap());

    let mut buffer = Vec::new();
    sprite.serialize::<RonArchive, _>(&mut buffer).unwrap();
    assert_eq!(ron_size, buffer.len() as u64);
}
