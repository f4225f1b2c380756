use crate::{Constraints, Size};

/// A host view the refresh layout can measure and place.
///
/// Implementations use interior mutability: both calls take `&self` so the
/// engine can hold children behind shared handles.
pub trait LayoutChild {
    /// Measures the view under `constraints` and returns its chosen size.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Places the view at the given edges in the parent's coordinate space.
    fn place(&self, left: f32, top: f32, right: f32, bottom: f32);
}
