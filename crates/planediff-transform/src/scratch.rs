//! Per-component scratch buffers
//!
//! A resampler replaces every component buffer on each call. The result
//! buffer moves into the caller's layout and the buffer it replaces is
//! parked here, one slot per component index. The next call for that index
//! reuses the parked allocation when it is large enough.
//!
//! A slot is keyed on capacity, not on shape. Reallocating on every shape
//! change would make a downsampler never reuse anything, since the buffer
//! it retires is always larger than the one it needs. The price is that a
//! slot keeps its largest buffer after the images shrink; call
//! [`ScratchSet::clear`] to release it.

use planediff_core::{Component, ImageLayout, Result, allocate};

/// One reusable buffer slot per component.
#[derive(Debug, Default)]
pub struct ScratchSet {
    slots: Vec<Option<Vec<u8>>>,
}

impl ScratchSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroed buffer of `len` bytes for component `index`.
    ///
    /// The parked buffer is reused when its capacity covers `len`;
    /// otherwise it is dropped and a fresh one allocated.
    ///
    /// # Errors
    ///
    /// Returns [`planediff_core::Error::AllocationFailed`] if a fresh buffer
    /// cannot be allocated.
    pub fn acquire(&mut self, index: usize, len: usize) -> Result<Vec<u8>> {
        match self.slots.get_mut(index).and_then(Option::take) {
            Some(mut buf) if buf.capacity() >= len => {
                log::trace!("scratch {}: reusing {} of {} bytes", index, len, buf.capacity());
                buf.clear();
                buf.resize(len, 0);
                Ok(buf)
            }
            stale => {
                if let Some(old) = stale {
                    log::trace!(
                        "scratch {}: {} bytes parked, {} needed; reallocating",
                        index,
                        old.capacity(),
                        len
                    );
                }
                allocate(len)
            }
        }
    }

    /// Park a retired buffer in slot `index`, dropping whatever was there.
    pub fn retire(&mut self, index: usize, buf: Vec<u8>) {
        if self.slots.len() <= index {
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index] = Some(buf);
    }

    /// Replace the contents of `layout` with `components` and park the
    /// buffers they displace.
    pub fn install(
        &mut self,
        layout: &mut ImageLayout,
        width: u32,
        height: u32,
        components: Vec<Component>,
    ) {
        let old = std::mem::replace(
            layout,
            ImageLayout::with_dimensions(width, height, components),
        );
        for (i, comp) in old.into_components().into_iter().enumerate() {
            self.retire(i, comp.into_data());
        }
    }

    /// Number of parked buffers.
    pub fn parked(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Release every parked buffer.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_slot_allocates() {
        let mut set = ScratchSet::new();
        let buf = set.acquire(2, 16).unwrap();
        assert_eq!(buf.len(), 16);
        assert_eq!(set.parked(), 0);
    }

    #[test]
    fn test_large_enough_is_reused() {
        let mut set = ScratchSet::new();
        let mut buf = vec![7u8; 12];
        let ptr = buf.as_mut_ptr();
        set.retire(1, buf);
        assert_eq!(set.parked(), 1);

        let again = set.acquire(1, 12).unwrap();
        assert_eq!(again.as_ptr(), ptr as *const u8);
        assert!(again.iter().all(|&b| b == 0));
        assert_eq!(set.parked(), 0);

        set.retire(1, again);
        let smaller = set.acquire(1, 3).unwrap();
        assert_eq!(smaller.as_ptr(), ptr as *const u8);
        assert_eq!(smaller, vec![0; 3]);
    }

    #[test]
    fn test_too_small_is_replaced() {
        let mut set = ScratchSet::new();
        set.retire(0, Vec::with_capacity(8));
        let buf = set.acquire(0, 20).unwrap();
        assert_eq!(buf.len(), 20);
        assert_eq!(set.parked(), 0);
    }

    #[test]
    fn test_install_parks_old_buffers() {
        let fmt = planediff_core::SampleFormat::unsigned(8).unwrap();
        let mut img = ImageLayout::new(vec![
            Component::new(4, 4, fmt).unwrap(),
            Component::new(2, 2, fmt).unwrap(),
        ]);
        let mut set = ScratchSet::new();
        let fresh = vec![Component::new(2, 2, fmt).unwrap(), Component::new(1, 1, fmt).unwrap()];
        set.install(&mut img, 2, 2, fresh);
        assert_eq!((img.width(), img.height(), img.depth()), (2, 2, 2));
        assert_eq!(set.parked(), 2);
        assert_eq!(set.acquire(0, 16).unwrap().len(), 16);
    }

    #[test]
    fn test_clear() {
        let mut set = ScratchSet::new();
        set.retire(0, vec![0; 4]);
        set.retire(3, vec![0; 4]);
        assert_eq!(set.parked(), 2);
        set.clear();
        assert_eq!(set.parked(), 0);
    }
}
