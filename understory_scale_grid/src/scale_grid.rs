// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small controller that owns a [`GridDelegate`], the section list, and the viewport.

use alloc::vec::Vec;

use kurbo::{Rect, Size};
use tracing::trace;

use crate::engine::layout_into;
use crate::{GridConfig, GridDelegate, GridLayout, ItemId, LayoutElement, SectionSpec};

/// Controller for a sectioned scale grid.
///
/// This type:
/// - stores the [`GridConfig`], the sections, and the viewport size,
/// - owns a [`GridDelegate`],
/// - caches the last computed [`GridLayout`] and recomputes it lazily after
///   invalidation,
/// - only invalidates on viewport changes that affect the fixed cross axis.
///
/// It does *not* know about any view system; hosts call [`ScaleGrid::elements_in`]
/// with their visible rectangle and realize views for what comes back.
#[derive(Debug)]
pub struct ScaleGrid<D: GridDelegate> {
    config: GridConfig,
    delegate: D,
    sections: Vec<SectionSpec>,
    viewport: Size,

    dirty: bool,
    layout: GridLayout,
}

impl<D: GridDelegate> ScaleGrid<D> {
    /// Creates a new [`ScaleGrid`] with no sections and an empty viewport.
    pub fn new(config: GridConfig, delegate: D) -> Self {
        Self {
            config,
            delegate,
            sections: Vec::new(),
            viewport: Size::ZERO,
            dirty: true,
            layout: GridLayout::new(),
        }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Replaces the configuration, invalidating if it changed.
    pub fn set_config(&mut self, config: GridConfig) {
        if config != self.config {
            self.config = config;
            self.invalidate();
        }
    }

    /// Returns a shared reference to the delegate.
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// Returns a mutable reference to the delegate, invalidating the layout.
    ///
    /// Scales and extents may change through this reference, so the next
    /// query recomputes.
    pub fn delegate_mut(&mut self) -> &mut D {
        self.invalidate();
        &mut self.delegate
    }

    /// Returns the current sections.
    pub fn sections(&self) -> &[SectionSpec] {
        &self.sections
    }

    /// Replaces the sections, invalidating if they changed.
    pub fn set_sections(&mut self, sections: impl IntoIterator<Item = SectionSpec>) {
        let sections: Vec<_> = sections.into_iter().collect();
        if sections != self.sections {
            self.sections = sections;
            self.invalidate();
        }
    }

    /// Returns the current viewport size.
    pub const fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// Sets the viewport size (the container size, insets included).
    ///
    /// Only a change of the cross-axis dimension invalidates the layout;
    /// scrolling-axis changes keep the cached rectangles.
    pub fn set_viewport_size(&mut self, viewport: Size) {
        let invalidate = self.should_invalidate_for_viewport_change(viewport);
        self.viewport = viewport;
        if invalidate {
            self.invalidate();
        }
    }

    /// Whether moving from the current viewport to `viewport` changes the
    /// fixed cross-axis dimension (width for vertical scrolling, height for
    /// horizontal scrolling).
    pub fn should_invalidate_for_viewport_change(&self, viewport: Size) -> bool {
        let direction = self.config.direction();
        direction.cross(self.viewport) != direction.cross(viewport)
    }

    /// The cross-axis extent available to cells: the viewport's cross
    /// dimension minus the insets on that axis.
    pub fn fixed_extent(&self) -> f64 {
        self.config.fixed_extent(self.viewport)
    }

    /// Discards the cached layout; the next query recomputes it.
    pub fn invalidate(&mut self) {
        if !self.dirty {
            trace!("invalidated scale grid layout");
        }
        self.dirty = true;
        self.layout.clear();
    }

    /// Returns `true` if the next query will recompute the layout.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the current layout, recomputing it if needed.
    pub fn layout(&mut self) -> &GridLayout {
        if self.dirty {
            let fixed_extent = self.fixed_extent();
            layout_into(
                &mut self.layout,
                &self.config,
                &self.sections,
                fixed_extent,
                &mut self.delegate,
            );
            self.dirty = false;
        }
        &self.layout
    }

    /// Total size of the laid-out content.
    pub fn content_size(&mut self) -> Size {
        self.layout().content_size()
    }

    /// Headers and items whose rectangles overlap `rect`, headers first.
    pub fn elements_in(&mut self, rect: Rect) -> impl Iterator<Item = &LayoutElement> + '_ {
        self.layout().elements_intersecting(rect)
    }

    /// Rectangle of the given item.
    pub fn item_rect(&mut self, id: ItemId) -> Option<Rect> {
        self.layout().item_rect(id)
    }

    /// Rectangle of the header of `section`.
    pub fn header_rect(&mut self, section: usize) -> Option<Rect> {
        self.layout().header_rect(section)
    }
}
