/// Completion hooks invoked after an instance is built.
///
/// Types that establish invariants after construction (registering in a
/// cache, wiring back-references) implement this and opt in with
/// `#[pod(hooks)]`; the derive otherwise emits an empty implementation.
///
/// The deserialization constructor runs [`deserialize_final_construct`]
/// first and [`final_construct`] second, so the plain hook observes the
/// same state on both construction paths. Regular construction sites call
/// [`complete`] to get the same treatment.
///
/// [`deserialize_final_construct`]: ConstructionHooks::deserialize_final_construct
/// [`final_construct`]: ConstructionHooks::final_construct
pub trait ConstructionHooks {
    /// Invoked once after every construction path.
    fn final_construct(&mut self) {}

    /// Invoked once, before [`final_construct`], on the deserialization
    /// path only.
    ///
    /// [`final_construct`]: ConstructionHooks::final_construct
    fn deserialize_final_construct(&mut self) {}
}

/// Runs the plain completion hook on a freshly built value.
///
/// Constructors of hook-bearing types return `complete(value)` instead of
/// `value`, keeping hook behavior uniform between regular construction and
/// deserialization.
///
/// # Example
///
/// ```
/// use podshadow::derive::PodShadow;
/// use podshadow::{ConstructionHooks, complete};
///
/// #[derive(PodShadow)]
/// #[pod(hooks)]
/// struct Tracked {
///     name: String,
///     #[pod(skip)]
///     completions: u32,
/// }
///
/// impl ConstructionHooks for Tracked {
///     fn final_construct(&mut self) {
///         self.completions += 1;
///     }
/// }
///
/// impl Tracked {
///     fn new(name: String) -> Self {
///         complete(Tracked { name, completions: 0 })
///     }
/// }
///
/// assert_eq!(Tracked::new("a".into()).completions, 1);
/// ```
pub fn complete<T: ConstructionHooks>(mut value: T) -> T {
    value.final_construct();
    value
}
