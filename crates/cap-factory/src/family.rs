//! The [`Family`] trait describing an abstract, buildable capability set.

/// Configuration key holding the concrete type name.
pub const TYPE_KEY: &str = "type";

/// An abstract family of concrete types built through a [`TypeRegistry`].
///
/// Families are zero-sized markers. The product is usually an owning
/// trait-object pointer such as `Box<dyn Device>` or `Rc<dyn Observer>`.
///
/// # Examples
///
/// ```
/// use cap_factory::Family;
///
/// trait Shape {
///     fn area(&self) -> f64;
/// }
///
/// struct ShapeFamily;
///
/// impl Family for ShapeFamily {
///     const NAME: &'static str = "Shape";
///     type Product = Box<dyn Shape>;
/// }
///
/// assert_eq!(ShapeFamily::NAME, "Shape");
/// ```
///
/// [`TypeRegistry`]: crate::TypeRegistry
pub trait Family: 'static {
    /// Family name used in errors and log events.
    const NAME: &'static str;

    /// The value a successful build yields.
    type Product;
}
