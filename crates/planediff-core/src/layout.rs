//! ImageLayout - an image as an ordered list of components
//!
//! The overall width and height describe the full-resolution grid, i.e. the
//! largest component once its subsampling is undone. Components keep their
//! channel order for the lifetime of the layout.
//!
//! # Ownership
//!
//! A layout exclusively owns its components. Handing the whole image to
//! someone else is an explicit move via [`ImageLayout::take`], which leaves
//! the source empty.

use crate::component::Component;
use crate::error::{Error, Result};

/// A planar image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageLayout {
    width: u32,
    height: u32,
    components: Vec<Component>,
}

impl ImageLayout {
    /// Build a layout, deriving the overall size from the components.
    ///
    /// # Examples
    ///
    /// ```
    /// use planediff_core::{Component, ImageLayout, SampleFormat};
    ///
    /// let fmt = SampleFormat::unsigned(8).unwrap();
    /// let luma = Component::new(8, 4, fmt).unwrap();
    /// let chroma = Component::new(4, 4, fmt).unwrap().with_subsampling(2, 1).unwrap();
    /// let img = ImageLayout::new(vec![luma, chroma]);
    /// assert_eq!((img.width(), img.height(), img.depth()), (8, 4, 2));
    /// ```
    pub fn new(components: Vec<Component>) -> Self {
        let width = components
            .iter()
            .map(|c| c.width().saturating_mul(u32::from(c.sub_x())))
            .max()
            .unwrap_or(0);
        let height = components
            .iter()
            .map(|c| c.height().saturating_mul(u32::from(c.sub_y())))
            .max()
            .unwrap_or(0);
        ImageLayout {
            width,
            height,
            components,
        }
    }

    /// Build a layout with an explicit overall size.
    pub fn with_dimensions(width: u32, height: u32, components: Vec<Component>) -> Self {
        ImageLayout {
            width,
            height,
            components,
        }
    }

    /// Overall width of the full-resolution grid.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Overall height of the full-resolution grid.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of components.
    #[inline]
    pub fn depth(&self) -> usize {
        self.components.len()
    }

    /// Whether the layout holds no components.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// All components in channel order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// All components, mutable. The count cannot change through this view.
    pub fn components_mut(&mut self) -> &mut [Component] {
        &mut self.components
    }

    /// Component `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ComponentOutOfBounds`] if `index >= depth()`.
    pub fn component(&self, index: usize) -> Result<&Component> {
        let len = self.components.len();
        self.components
            .get(index)
            .ok_or(Error::ComponentOutOfBounds { index, len })
    }

    /// Component `index`, mutable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ComponentOutOfBounds`] if `index >= depth()`.
    pub fn component_mut(&mut self, index: usize) -> Result<&mut Component> {
        let len = self.components.len();
        self.components
            .get_mut(index)
            .ok_or(Error::ComponentOutOfBounds { index, len })
    }

    /// Put `component` at `index` and hand back the one it replaces.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ComponentOutOfBounds`] if `index >= depth()`.
    pub fn replace_component(&mut self, index: usize, component: Component) -> Result<Component> {
        let slot = self.component_mut(index)?;
        Ok(std::mem::replace(slot, component))
    }

    /// Move the whole image out, leaving an empty layout behind.
    pub fn take(&mut self) -> ImageLayout {
        std::mem::take(self)
    }

    /// Consume the layout and return its components.
    pub fn into_components(self) -> Vec<Component> {
        self.components
    }

    /// Check that `other` corresponds element-wise to this layout.
    ///
    /// Both layouts must have the same number of components and each
    /// component pair must agree in size and subsampling. Sample formats
    /// may differ.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ComponentCountMismatch`],
    /// [`Error::ComponentSizeMismatch`] or [`Error::SubsamplingMismatch`].
    pub fn test_if_compatible(&self, other: &ImageLayout) -> Result<()> {
        if self.depth() != other.depth() {
            return Err(Error::ComponentCountMismatch(self.depth(), other.depth()));
        }
        for (i, (a, b)) in self.components.iter().zip(&other.components).enumerate() {
            if a.width() != b.width() || a.height() != b.height() {
                return Err(Error::ComponentSizeMismatch {
                    component: i,
                    left: (a.width(), a.height()),
                    right: (b.width(), b.height()),
                });
            }
            if a.sub_x() != b.sub_x() || a.sub_y() != b.sub_y() {
                return Err(Error::SubsamplingMismatch {
                    component: i,
                    left: (a.sub_x(), a.sub_y()),
                    right: (b.sub_x(), b.sub_y()),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SampleFormat;

    fn plane(w: u32, h: u32) -> Component {
        Component::new(w, h, SampleFormat::unsigned(8).unwrap()).unwrap()
    }

    #[test]
    fn test_overall_size_from_subsampled_planes() {
        let y = plane(16, 8);
        let cb = plane(8, 4).with_subsampling(2, 2).unwrap();
        let cr = plane(8, 4).with_subsampling(2, 2).unwrap();
        let img = ImageLayout::new(vec![y, cb, cr]);
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 8);
        assert_eq!(img.depth(), 3);
    }

    #[test]
    fn test_component_out_of_bounds() {
        let img = ImageLayout::new(vec![plane(2, 2)]);
        assert!(matches!(
            img.component(1),
            Err(Error::ComponentOutOfBounds { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_take_leaves_empty() {
        let mut img = ImageLayout::new(vec![plane(4, 4), plane(4, 4)]);
        let moved = img.take();
        assert!(img.is_empty());
        assert_eq!(img.width(), 0);
        assert_eq!(moved.depth(), 2);
        assert_eq!(moved.width(), 4);
    }

    #[test]
    fn test_replace_component() {
        let mut img = ImageLayout::new(vec![plane(4, 4)]);
        let old = img.replace_component(0, plane(2, 2)).unwrap();
        assert_eq!(old.width(), 4);
        assert_eq!(img.component(0).unwrap().width(), 2);
    }

    #[test]
    fn test_compatible() {
        let a = ImageLayout::new(vec![plane(4, 4), plane(2, 2).with_subsampling(2, 2).unwrap()]);
        let b = a.clone();
        assert!(a.test_if_compatible(&b).is_ok());
    }

    #[test]
    fn test_incompatible_count() {
        let a = ImageLayout::new(vec![plane(4, 4)]);
        let b = ImageLayout::new(vec![plane(4, 4), plane(4, 4)]);
        let err = a.test_if_compatible(&b).unwrap_err();
        assert!(matches!(err, Error::ComponentCountMismatch(1, 2)));
        assert!(err.is_compatibility());
    }

    #[test]
    fn test_incompatible_size() {
        let a = ImageLayout::new(vec![plane(4, 4), plane(4, 4)]);
        let b = ImageLayout::new(vec![plane(4, 4), plane(4, 3)]);
        assert!(matches!(
            a.test_if_compatible(&b),
            Err(Error::ComponentSizeMismatch { component: 1, .. })
        ));
    }

    #[test]
    fn test_incompatible_subsampling() {
        let a = ImageLayout::new(vec![plane(4, 4).with_subsampling(1, 2).unwrap()]);
        let b = ImageLayout::new(vec![plane(4, 4)]);
        assert!(matches!(
            a.test_if_compatible(&b),
            Err(Error::SubsamplingMismatch { component: 0, .. })
        ));
    }
}
