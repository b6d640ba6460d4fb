/// Tag returned by [`scrub_serialization_name`] when the input has no usable
/// suffix.
pub const GENERIC_TAG: &str = "GenericTag";

/// Normalizes an auto-generated tag string into an archive-legal identifier.
///
/// Tags are often derived by stringizing a (possibly namespaced) type path,
/// which leaves separators the archive engines reject. This returns the
/// substring following the last character outside `[A-Za-z0-9._-]`; the input
/// unchanged when every character is legal; and [`GENERIC_TAG`] when nothing
/// follows the last illegal character.
///
/// # Example
///
/// ```
/// use podshadow::scrub_serialization_name;
///
/// assert_eq!(scrub_serialization_name("geo::shapes::Circle"), "Circle");
/// assert_eq!(scrub_serialization_name("Circle"), "Circle");
/// assert_eq!(scrub_serialization_name("geo::"), "GenericTag");
/// ```
pub fn scrub_serialization_name(name: &str) -> &str {
    let mut last_invalid = None;

    for (index, byte) in name.bytes().enumerate() {
        let valid = byte.is_ascii_alphanumeric()
            || byte == b'.'
            || byte == b'-'
            || byte == b'_';
        if !valid {
            last_invalid = Some(index);
        }
    }

    match last_invalid {
        None => name,
        Some(index) => {
            let suffix = &name[index + 1..];
            if suffix.is_empty() { GENERIC_TAG } else { suffix }
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{GENERIC_TAG, scrub_serialization_name};

    #[test]
    fn passthrough_when_clean() {
        assert_eq!(scrub_serialization_name("Circle"), "Circle");
        assert_eq!(scrub_serialization_name("a.b-c_9"), "a.b-c_9");
        assert_eq!(scrub_serialization_name(""), "");
    }

    #[test]
    fn suffix_after_last_separator() {
        assert_eq!(scrub_serialization_name("Foo::Bar"), "Bar");
        assert_eq!(scrub_serialization_name("geo :: shapes :: Circle"), "Circle");
        assert_eq!(scrub_serialization_name("CirclePtr"), "CirclePtr");
        assert_eq!(scrub_serialization_name("a b"), "b");
    }

    #[test]
    fn fallback_when_nothing_remains() {
        assert_eq!(scrub_serialization_name("Foo::"), GENERIC_TAG);
        assert_eq!(scrub_serialization_name("::"), GENERIC_TAG);
        assert_eq!(scrub_serialization_name(" "), GENERIC_TAG);
    }

    #[test]
    fn non_ascii_counts_as_separator() {
        assert_eq!(scrub_serialization_name("über::Tag"), "Tag");
        assert_eq!(scrub_serialization_name("naïveName"), "veName");
    }
}
