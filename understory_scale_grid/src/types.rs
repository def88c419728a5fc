// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public identity and input types: sections, items, headers, and scroll direction.

use kurbo::{Rect, Size};

/// Identifies one item within a layout pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId {
    /// Index of the section containing the item.
    pub section: usize,
    /// Index of the item within its section.
    pub item: usize,
}

impl ItemId {
    /// Create an item identity from a section and an item index.
    #[inline]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// Identity of a laid-out element: an item or a section header.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// A regular item.
    Item(ItemId),
    /// The header of the section with this index.
    Header(usize),
}

impl ElementId {
    /// Index of the section this element belongs to.
    #[inline]
    pub const fn section(self) -> usize {
        match self {
            Self::Item(id) => id.section,
            Self::Header(section) => section,
        }
    }
}

/// A placed element and its rectangle in content coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutElement {
    /// Which element this is.
    pub id: ElementId,
    /// Placement in content coordinates (container insets excluded).
    pub rect: Rect,
}

/// Caller-supplied description of one section.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionSpec {
    /// Number of items in the section.
    pub item_count: usize,
    /// Whether the section wants a header.
    ///
    /// A header is only emitted when the delegate also reports a non-zero
    /// header extent and the section has at least one item.
    pub has_header: bool,
}

impl SectionSpec {
    /// A section with `item_count` items and no header.
    #[inline]
    pub const fn new(item_count: usize) -> Self {
        Self {
            item_count,
            has_header: false,
        }
    }

    /// A section with `item_count` items and a header.
    #[inline]
    pub const fn with_header(item_count: usize) -> Self {
        Self {
            item_count,
            has_header: true,
        }
    }
}

/// The axis content grows along.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Content grows downwards; the cross axis is horizontal (columns).
    #[default]
    Vertical,
    /// Content grows rightwards; the cross axis is vertical (rows).
    Horizontal,
}

impl ScrollDirection {
    /// Build a rectangle from cross-axis and along-axis coordinates.
    ///
    /// This is the single place where grid space is transposed into x/y.
    #[inline]
    pub fn orient(
        self,
        cross_offset: f64,
        along_offset: f64,
        cross_size: f64,
        along_size: f64,
    ) -> Rect {
        match self {
            Self::Vertical => Rect::new(
                cross_offset,
                along_offset,
                cross_offset + cross_size,
                along_offset + along_size,
            ),
            Self::Horizontal => Rect::new(
                along_offset,
                cross_offset,
                along_offset + along_size,
                cross_offset + cross_size,
            ),
        }
    }

    /// Build a size from its cross-axis and along-axis components.
    #[inline]
    pub fn orient_size(self, cross: f64, along: f64) -> Size {
        match self {
            Self::Vertical => Size::new(cross, along),
            Self::Horizontal => Size::new(along, cross),
        }
    }

    /// The component of `size` on the fixed cross axis.
    #[inline]
    pub fn cross(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.width,
            Self::Horizontal => size.height,
        }
    }

    /// The component of `size` on the scroll axis.
    #[inline]
    pub fn along(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Far edge of `rect` on the scroll axis.
    #[inline]
    pub fn along_max(self, rect: Rect) -> f64 {
        match self {
            Self::Vertical => rect.y1,
            Self::Horizontal => rect.x1,
        }
    }
}
