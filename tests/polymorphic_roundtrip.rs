//! Pointer-mode round trips through hierarchy bases.

use podshadow::derive::{PodShadow, polymorphic_base};
use podshadow::registry::ErasedShadow;
use podshadow::{JsonArchive, RonArchive};

#[polymorphic_base]
trait Shape {
    fn area(&self) -> f64;
}

#[derive(PodShadow, Debug, PartialEq)]
#[pod(polymorphic(Shape))]
struct Circle {
    radius: f64,
}

impl Shape for Circle {
    fn area(&self) -> f64 {
        core::f64::consts::PI * self.radius * self.radius
    }
}

#[derive(PodShadow, Debug, PartialEq)]
#[pod(polymorphic(Shape))]
struct Rectangle {
    width: f64,
    height: f64,
}

impl Shape for Rectangle {
    fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[test]
fn round_trip_preserves_dynamic_type_ron() {
    let shape: Box<dyn Shape> = Box::new(Circle { radius: 2.0 });

    let mut buffer = Vec::new();
    shape.serialize_ptr::<RonArchive, _>(&mut buffer).unwrap();
    let restored = <dyn Shape>::deserialize_ptr::<RonArchive, _>(buffer.as_slice()).unwrap();

    assert!(restored.shadow_type_path().ends_with("::Circle"));
    assert!((restored.area() - shape.area()).abs() < 1e-12);
}

#[test]
fn round_trip_preserves_dynamic_type_json() {
    let shape: Box<dyn Shape> = Box::new(Rectangle {
        width: 3.0,
        height: 4.5,
    });

    let mut buffer = Vec::new();
    shape.serialize_ptr::<JsonArchive, _>(&mut buffer).unwrap();
    let restored = <dyn Shape>::deserialize_ptr::<JsonArchive, _>(buffer.as_slice()).unwrap();

    assert!(restored.shadow_type_path().ends_with("::Rectangle"));
    assert!((restored.area() - 13.5).abs() < 1e-12);
}

#[test]
fn ptr_tags_default_to_the_base_name() {
    let shape: Box<dyn Shape> = Box::new(Circle { radius: 1.0 });

    let mut buffer = Vec::new();
    shape.serialize_ptr::<JsonArchive, _>(&mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with(r#"{"ShapePtr""#));
}

#[test]
fn serialized_ptr_size_matches_the_wire() {
    let shape: Box<dyn Shape> = Box::new(Circle { radius: 1.5 });

    let size = shape.serialized_ptr_size::<JsonArchive>().unwrap();
    let mut buffer = Vec::new();
    shape.serialize_ptr::<JsonArchive, _>(&mut buffer).unwrap();
    assert_eq!(size, buffer.len() as u64);
}

#[test]
fn unregistered_discriminator_is_a_descriptive_error() {
    let payload = br#"{"ShapePtr":{"type":"elsewhere::Unknown","value":{}}}"#;
    let error = <dyn Shape>::deserialize_ptr::<JsonArchive, _>(payload.as_slice()).unwrap_err();
    let message = error.to_string();
    assert!(message.contains("elsewhere::Unknown"));
    assert!(message.contains("is not registered"));
}

// -----------------------------------------------------------------------------
// Polymorphic members

#[derive(PodShadow)]
struct Drawing {
    title: String,
    primary: Box<dyn Shape>,
}

#[test]
fn polymorphic_members_nest_inside_other_shadow_types() {
    let drawing = Drawing {
        title: "blueprint".into(),
        primary: Box::new(Rectangle {
            width: 2.0,
            height: 2.0,
        }),
    };

    let mut buffer = Vec::new();
    drawing.serialize::<RonArchive, _>(&mut buffer).unwrap();
    let restored = Drawing::deserialize::<RonArchive, _>(buffer.as_slice()).unwrap();

    assert_eq!(restored.title, "blueprint");
    assert!(restored.primary.shadow_type_path().ends_with("::Rectangle"));
    assert!((restored.primary.area() - 4.0).abs() < 1e-12);
}

// -----------------------------------------------------------------------------
// Data-only intermediates and additional ancestors

#[polymorphic_base]
trait Entity {
    fn label(&self) -> String;
}

#[polymorphic_base]
trait Actor: Entity {}

#[derive(PodShadow, Debug, PartialEq)]
#[pod(data_only)]
struct EntityCore {
    id: u64,
}

#[derive(PodShadow, Debug, PartialEq)]
#[pod(polymorphic(Entity), additional_bases(Actor))]
struct Player {
    #[pod(base)]
    core: EntityCore,
    name: String,
}

impl Entity for Player {
    fn label(&self) -> String {
        format!("{}#{}", self.name, self.core.id)
    }
}

impl Actor for Player {}

#[test]
fn concrete_type_round_trips_through_its_declared_base() {
    let player = Player {
        core: EntityCore { id: 4 },
        name: "kira".into(),
    };
    let entity: &dyn Entity = &player;

    let mut buffer = Vec::new();
    entity.serialize_ptr::<JsonArchive, _>(&mut buffer).unwrap();
    let restored = <dyn Entity>::deserialize_ptr::<JsonArchive, _>(buffer.as_slice()).unwrap();
    assert_eq!(restored.label(), "kira#4");
}

#[test]
fn additional_bases_allow_round_trips_through_an_intermediate() {
    let player = Player {
        core: EntityCore { id: 9 },
        name: "rook".into(),
    };
    let actor: &dyn Actor = &player;

    let mut buffer = Vec::new();
    actor.serialize_ptr::<JsonArchive, _>(&mut buffer).unwrap();
    let restored = <dyn Actor>::deserialize_ptr::<JsonArchive, _>(buffer.as_slice()).unwrap();
    assert_eq!(restored.label(), "rook#9");
}
