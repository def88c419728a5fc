// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping from grid cells to content-space rectangles.

use kurbo::Rect;

use crate::ScrollDirection;
use crate::occupancy::Footprint;

/// Per-pass cell measurements.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct CellMetrics {
    /// Extent of a single cell on the cross axis.
    pub(crate) transverse: f64,
    /// Extent of a single cell on the scroll axis.
    pub(crate) longitudinal: f64,
    /// Gap between cells on both axes, shrunk when the cross axis cannot hold
    /// the configured gaps.
    pub(crate) spacing: f64,
    pub(crate) direction: ScrollDirection,
    /// Cross-axis extent no frame may pass.
    pub(crate) cross_limit: f64,
}

impl CellMetrics {
    /// Measure square cells for `count` divisions across `fixed_extent`.
    ///
    /// When the gaps alone fill the cross axis, cells collapse to zero and the
    /// gaps are shrunk to share `fixed_extent` evenly, so degenerate grids still
    /// stay within `[0, fixed_extent]`.
    #[allow(
        clippy::cast_precision_loss,
        reason = "Division counts are small; f64 represents them exactly"
    )]
    pub(crate) fn new(
        fixed_extent: f64,
        count: usize,
        spacing: f64,
        direction: ScrollDirection,
    ) -> Self {
        let transverse = Self::transverse_cell_extent(fixed_extent, count, spacing);
        let spacing = if transverse > 0.0 {
            spacing
        } else if count > 1 {
            spacing.min(fixed_extent / (count - 1) as f64)
        } else {
            0.0
        };
        Self {
            transverse,
            longitudinal: transverse,
            spacing,
            direction,
            cross_limit: fixed_extent,
        }
    }

    /// Cross-axis extent of one cell when `count` cells and the gaps between
    /// them share `fixed_extent`.
    #[allow(
        clippy::cast_precision_loss,
        reason = "Division counts are small; f64 represents them exactly"
    )]
    pub(crate) fn transverse_cell_extent(fixed_extent: f64, count: usize, spacing: f64) -> f64 {
        let count = count.max(1) as f64;
        ((fixed_extent - count * spacing + spacing) / count).max(0.0)
    }

    /// Rectangle covered by `footprint`, offset along the scroll axis by
    /// `section_offset`.
    #[allow(
        clippy::cast_precision_loss,
        reason = "Grid coordinates stay far below 2^52"
    )]
    pub(crate) fn frame(&self, footprint: Footprint, section_offset: f64) -> Rect {
        let scale = footprint.scale as f64;
        let cross_offset =
            (footprint.transverse as f64 * (self.spacing + self.transverse)).min(self.cross_limit);
        let along_offset =
            footprint.longitude as f64 * (self.spacing + self.longitudinal) + section_offset;
        let cross_size = (self.transverse + scale * (self.spacing + self.transverse))
            .min(self.cross_limit - cross_offset);
        let along_size = self.longitudinal + scale * (self.spacing + self.longitudinal);
        self.direction
            .orient(cross_offset, along_offset, cross_size, along_size)
    }
}
