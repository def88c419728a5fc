// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-item and per-section callbacks consulted during a layout pass.

use crate::ItemId;

/// Caller-provided sizing policy for a layout pass.
///
/// Every method has a default, so implementors override only what they need.
/// `()` implements this trait with all defaults: every item has scale `1`,
/// cells are square, and there are no headers.
pub trait GridDelegate {
    /// Scale of an item: the number of cells it spans on both axes.
    ///
    /// Values are clamped into `1..=transverse_count` by the engine.
    fn scale_of(&mut self, item: ItemId) -> usize {
        let _ = item;
        1
    }

    /// Scroll-axis extent of a single cell, given its cross-axis extent.
    ///
    /// The default returns `cell_transverse_extent`, i.e. square cells.
    fn item_longitudinal_extent(&mut self, cell_transverse_extent: f64) -> f64 {
        cell_transverse_extent
    }

    /// Scroll-axis extent of the header of `section`, given the full
    /// cross-axis extent available to the grid.
    ///
    /// A non-positive extent means no header. The default is `0`.
    fn header_longitudinal_extent(&mut self, section: usize, fixed_extent: f64) -> f64 {
        let _ = (section, fixed_extent);
        0.0
    }
}

impl GridDelegate for () {}

impl<D: GridDelegate + ?Sized> GridDelegate for &mut D {
    fn scale_of(&mut self, item: ItemId) -> usize {
        (**self).scale_of(item)
    }

    fn item_longitudinal_extent(&mut self, cell_transverse_extent: f64) -> f64 {
        (**self).item_longitudinal_extent(cell_transverse_extent)
    }

    fn header_longitudinal_extent(&mut self, section: usize, fixed_extent: f64) -> f64 {
        (**self).header_longitudinal_extent(section, fixed_extent)
    }
}

/// A [`GridDelegate`] that takes item scales from a closure and uses the
/// defaults for everything else.
///
/// ```rust
/// use understory_scale_grid::{GridDelegate, ItemId, ScaleFn};
///
/// let mut delegate = ScaleFn(|id: ItemId| if id.item % 5 == 0 { 2 } else { 1 });
/// assert_eq!(delegate.scale_of(ItemId::new(0, 10)), 2);
/// assert_eq!(delegate.scale_of(ItemId::new(0, 11)), 1);
/// ```
#[derive(Clone, Copy)]
pub struct ScaleFn<F>(pub F);

impl<F> core::fmt::Debug for ScaleFn<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("ScaleFn").finish_non_exhaustive()
    }
}

impl<F: FnMut(ItemId) -> usize> GridDelegate for ScaleFn<F> {
    fn scale_of(&mut self, item: ItemId) -> usize {
        (self.0)(item)
    }
}
