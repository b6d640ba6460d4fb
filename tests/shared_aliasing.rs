//! Shared-object mode: identity preserved within one archive session.

use std::sync::Arc;

use podshadow::derive::PodShadow;
use podshadow::shared::{with_load_session, with_save_session};
use podshadow::{JsonArchive, RonArchive};

#[derive(PodShadow, Debug, PartialEq)]
#[pod(shared)]
struct Texture {
    path: String,
}

#[derive(PodShadow)]
struct Material {
    diffuse: Arc<Texture>,
    normal: Arc<Texture>,
    emissive: Arc<Texture>,
}

#[test]
fn aliased_members_come_back_as_one_instance() {
    let texture = Arc::new(Texture {
        path: "stone.png".into(),
    });
    let material = Material {
        diffuse: texture.clone(),
        normal: texture.clone(),
        emissive: texture,
    };

    let mut buffer = Vec::new();
    material.serialize::<JsonArchive, _>(&mut buffer).unwrap();

    // One payload, two aliases.
    let text = String::from_utf8(buffer.clone()).unwrap();
    assert_eq!(text.matches("stone.png").count(), 1);

    let restored = Material::deserialize::<JsonArchive, _>(buffer.as_slice()).unwrap();
    assert!(Arc::ptr_eq(&restored.diffuse, &restored.normal));
    assert!(Arc::ptr_eq(&restored.diffuse, &restored.emissive));
    assert_eq!(restored.diffuse.path, "stone.png");
}

#[test]
fn distinct_members_stay_distinct() {
    let material = Material {
        diffuse: Arc::new(Texture {
            path: "a.png".into(),
        }),
        normal: Arc::new(Texture {
            path: "b.png".into(),
        }),
        emissive: Arc::new(Texture {
            path: "a.png".into(),
        }),
    };

    let mut buffer = Vec::new();
    material.serialize::<RonArchive, _>(&mut buffer).unwrap();
    let restored = Material::deserialize::<RonArchive, _>(buffer.as_slice()).unwrap();

    assert!(!Arc::ptr_eq(&restored.diffuse, &restored.normal));
    // Equal contents, separate identities.
    assert!(!Arc::ptr_eq(&restored.diffuse, &restored.emissive));
    assert_eq!(*restored.diffuse, *restored.emissive);
}

#[test]
fn explicit_sessions_span_multiple_entry_calls() {
    let texture = Arc::new(Texture {
        path: "brick.png".into(),
    });

    let (first, second) = with_save_session(|| {
        let mut first = Vec::new();
        let mut second = Vec::new();
        Texture::serialize_ptr::<RonArchive, _>(&texture, &mut first).unwrap();
        Texture::serialize_ptr::<RonArchive, _>(&texture, &mut second).unwrap();
        (first, second)
    });

    // The second write is an alias, not a copy.
    assert!(String::from_utf8(second.clone())
        .unwrap()
        .matches("brick.png")
        .count()
        == 0);

    let (one, two) = with_load_session(|| {
        let one = Texture::deserialize_ptr::<RonArchive, _>(first.as_slice()).unwrap();
        let two = Texture::deserialize_ptr::<RonArchive, _>(second.as_slice()).unwrap();
        (one, two)
    });

    assert!(Arc::ptr_eq(&one, &two));
    assert_eq!(one.path, "brick.png");
}

#[test]
fn separate_sessions_duplicate_instead_of_aliasing() {
    let texture = Arc::new(Texture {
        path: "moss.png".into(),
    });

    let mut first = Vec::new();
    let mut second = Vec::new();
    Texture::serialize_ptr::<RonArchive, _>(&texture, &mut first).unwrap();
    Texture::serialize_ptr::<RonArchive, _>(&texture, &mut second).unwrap();

    let one = Texture::deserialize_ptr::<RonArchive, _>(first.as_slice()).unwrap();
    let two = Texture::deserialize_ptr::<RonArchive, _>(second.as_slice()).unwrap();

    assert!(!Arc::ptr_eq(&one, &two));
    assert_eq!(one.path, two.path);
}

#[test]
fn alias_without_payload_outside_its_session_is_an_error() {
    let texture = Arc::new(Texture {
        path: "sand.png".into(),
    });

    let (_first, second) = with_save_session(|| {
        let mut first = Vec::new();
        let mut second = Vec::new();
        Texture::serialize_ptr::<JsonArchive, _>(&texture, &mut first).unwrap();
        Texture::serialize_ptr::<JsonArchive, _>(&texture, &mut second).unwrap();
        (first, second)
    });

    // Deserializing the alias alone: its target was never materialized.
    let error = Texture::deserialize_ptr::<JsonArchive, _>(second.as_slice()).unwrap_err();
    assert!(error.to_string().contains("no materialized instance"));
}

#[test]
fn shared_ptr_size_probe_matches_the_wire() {
    let texture = Arc::new(Texture {
        path: "ore.png".into(),
    });

    let size = Texture::serialized_ptr_size::<JsonArchive>(&texture).unwrap();
    let mut buffer = Vec::new();
    Texture::serialize_ptr::<JsonArchive, _>(&texture, &mut buffer).unwrap();
    assert_eq!(size, buffer.len() as u64);
}
