// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The result of a layout pass and the queries served from it.

use alloc::vec::Vec;

use kurbo::{Rect, Size};

use crate::{ElementId, ItemId, LayoutElement};

/// Rectangles produced by one layout pass, plus the resulting content size.
///
/// Elements are kept in placement order in two flat lists, one for headers and
/// one for items. Queries are linear scans; the lists are bounded by what a
/// grid of this kind shows, so no spatial index is kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridLayout {
    pub(crate) headers: Vec<LayoutElement>,
    pub(crate) items: Vec<LayoutElement>,
    pub(crate) content_size: Size,
}

impl GridLayout {
    /// An empty layout with zero content size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total size of the laid-out content.
    ///
    /// The cross-axis component is the fixed extent the pass ran with; the
    /// scroll-axis component is the furthest edge reached by any element.
    #[inline]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Item rectangles in placement order.
    #[inline]
    pub fn items(&self) -> &[LayoutElement] {
        &self.items
    }

    /// Header rectangles in section order.
    #[inline]
    pub fn headers(&self) -> &[LayoutElement] {
        &self.headers
    }

    /// Number of placed elements, headers included.
    #[inline]
    pub fn len(&self) -> usize {
        self.headers.len() + self.items.len()
    }

    /// Returns `true` if nothing was placed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.items.is_empty()
    }

    /// Drop all elements and reset the content size to zero.
    pub fn clear(&mut self) {
        self.headers.clear();
        self.items.clear();
        self.content_size = Size::ZERO;
    }

    /// Iterate headers, then items, whose rectangle overlaps `rect`.
    ///
    /// Overlap requires a shared area: an element that only touches the edge
    /// of `rect` is not yielded.
    pub fn elements_intersecting(
        &self,
        rect: Rect,
    ) -> impl Iterator<Item = &LayoutElement> + '_ {
        self.headers
            .iter()
            .chain(self.items.iter())
            .filter(move |element| overlaps(element.rect, rect))
    }

    /// Rectangle of the given item, if it was placed.
    pub fn item_rect(&self, id: ItemId) -> Option<Rect> {
        self.items
            .iter()
            .find(|element| element.id == ElementId::Item(id))
            .map(|element| element.rect)
    }

    /// Rectangle of the header of `section`, if one was placed.
    pub fn header_rect(&self, section: usize) -> Option<Rect> {
        self.headers
            .iter()
            .find(|element| element.id == ElementId::Header(section))
            .map(|element| element.rect)
    }

    /// Rectangle of any element.
    pub fn rect_of(&self, id: ElementId) -> Option<Rect> {
        match id {
            ElementId::Item(item) => self.item_rect(item),
            ElementId::Header(section) => self.header_rect(section),
        }
    }

    pub(crate) fn push_header(&mut self, section: usize, rect: Rect) {
        self.headers.push(LayoutElement {
            id: ElementId::Header(section),
            rect,
        });
    }

    pub(crate) fn push_item(&mut self, id: ItemId, rect: Rect) {
        self.items.push(LayoutElement {
            id: ElementId::Item(id),
            rect,
        });
    }
}

/// Whether two rectangles share a region of positive area.
#[inline]
pub(crate) fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}
