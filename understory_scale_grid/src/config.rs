// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid configuration.

use core::num::NonZeroUsize;

use kurbo::{Insets, Size};

use crate::ScrollDirection;

/// Static parameters of a grid layout.
///
/// Values are normalized on the way in: a zero division count becomes `1`,
/// negative spacing becomes `0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridConfig {
    transverse_count: NonZeroUsize,
    spacing: f64,
    direction: ScrollDirection,
    insets: Insets,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            transverse_count: NonZeroUsize::MIN,
            spacing: 0.0,
            direction: ScrollDirection::Vertical,
            insets: Insets::ZERO,
        }
    }
}

impl GridConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of cross-axis divisions (columns for vertical scroll,
    /// rows for horizontal scroll). `0` is coerced to `1`.
    pub fn with_transverse_count(mut self, count: usize) -> Self {
        self.transverse_count = NonZeroUsize::new(count).unwrap_or(NonZeroUsize::MIN);
        self
    }

    /// Set the gap between adjacent cells, headers, and sections.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        debug_assert!(
            spacing.is_finite(),
            "GridConfig spacing must be finite; got {spacing:?}"
        );
        self.spacing = spacing.max(0.0);
        self
    }

    /// Set the scroll direction.
    pub fn with_direction(mut self, direction: ScrollDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the container insets subtracted from the viewport to obtain the
    /// fixed cross-axis extent.
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    /// Number of cross-axis divisions, always at least `1`.
    #[inline]
    pub const fn transverse_count(&self) -> usize {
        self.transverse_count.get()
    }

    /// Gap between adjacent cells.
    #[inline]
    pub const fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Scroll direction.
    #[inline]
    pub const fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Container insets.
    #[inline]
    pub const fn insets(&self) -> Insets {
        self.insets
    }

    /// The cross-axis extent available to cells in a viewport of `viewport` size.
    ///
    /// This is the viewport's cross dimension minus the insets on that axis,
    /// clamped to be non-negative.
    pub fn fixed_extent(&self, viewport: Size) -> f64 {
        let inset = match self.direction {
            ScrollDirection::Vertical => self.insets.x_value(),
            ScrollDirection::Horizontal => self.insets.y_value(),
        };
        (self.direction.cross(viewport) - inset).max(0.0)
    }
}
