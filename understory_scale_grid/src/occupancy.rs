// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Growable occupancy matrix for one section.
//!
//! The matrix has a fixed number of cells across (`transverse_count`) and one
//! row per longitude seen so far. Rows are appended lazily, all free, whenever
//! a query or reservation reaches past the last one. Each cell is written at
//! most once: once a footprint is reserved it stays reserved until the grid is
//! dropped at the end of the section.

use alloc::vec::Vec;

use smallvec::{SmallVec, smallvec};

type Row = SmallVec<[bool; 8]>;

/// A square block of cells anchored at `(longitude, transverse)`.
///
/// `scale` is the 0-based scale index: the block covers `scale + 1` cells on
/// both axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Footprint {
    pub(crate) longitude: usize,
    pub(crate) transverse: usize,
    pub(crate) scale: usize,
}

impl Footprint {
    pub(crate) const fn new(longitude: usize, transverse: usize, scale: usize) -> Self {
        Self {
            longitude,
            transverse,
            scale,
        }
    }

    /// Same block size, different anchor.
    pub(crate) const fn at(self, longitude: usize, transverse: usize) -> Self {
        Self::new(longitude, transverse, self.scale)
    }

    /// One past the last longitude covered.
    const fn longitude_end(self) -> usize {
        self.longitude + self.scale + 1
    }

    /// One past the last transverse index covered.
    const fn transverse_end(self) -> usize {
        self.transverse + self.scale + 1
    }
}

/// Occupancy of one section's cells.
#[derive(Clone, Debug)]
pub(crate) struct OccupancyGrid {
    transverse_count: usize,
    rows: Vec<Row>,
}

impl OccupancyGrid {
    pub(crate) fn new(transverse_count: usize) -> Self {
        Self {
            transverse_count: transverse_count.max(1),
            rows: Vec::new(),
        }
    }

    /// Number of rows materialized so far.
    pub(crate) fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Append free rows until `longitude` exists.
    pub(crate) fn ensure_row(&mut self, longitude: usize) {
        while self.rows.len() <= longitude {
            self.rows.push(smallvec![false; self.transverse_count]);
        }
    }

    /// Whether the cell is reserved. Cells outside the grid read as free
    /// along the scroll axis and occupied across it.
    pub(crate) fn is_occupied(&self, longitude: usize, transverse: usize) -> bool {
        if transverse >= self.transverse_count {
            return true;
        }
        self.rows
            .get(longitude)
            .is_some_and(|row| row[transverse])
    }

    /// Whether every cell of `footprint` lies inside the cross axis and is free.
    ///
    /// Rows reached by the footprint are materialized.
    pub(crate) fn is_free(&mut self, footprint: Footprint) -> bool {
        if footprint.transverse_end() > self.transverse_count {
            return false;
        }
        self.ensure_row(footprint.longitude_end() - 1);
        (footprint.longitude..footprint.longitude_end()).all(|longitude| {
            (footprint.transverse..footprint.transverse_end())
                .all(|transverse| !self.is_occupied(longitude, transverse))
        })
    }

    /// Mark every cell of `footprint` as occupied.
    ///
    /// The caller must have checked [`Self::is_free`] first.
    pub(crate) fn reserve(&mut self, footprint: Footprint) {
        debug_assert!(
            footprint.transverse_end() <= self.transverse_count,
            "footprint {footprint:?} overruns {} cells",
            self.transverse_count
        );
        self.ensure_row(footprint.longitude_end() - 1);
        for row in &mut self.rows[footprint.longitude..footprint.longitude_end()] {
            for cell in &mut row[footprint.transverse..footprint.transverse_end()] {
                debug_assert!(!*cell, "cell reserved twice by {footprint:?}");
                *cell = true;
            }
        }
    }
}
