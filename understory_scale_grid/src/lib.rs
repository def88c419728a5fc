// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Scale Grid: a sectioned scrolling grid that packs items of varying scale.
//!
//! The grid has a fixed number of divisions across its cross axis (columns when
//! scrolling vertically, rows when scrolling horizontally) and grows without
//! bound along the scroll axis. Each item has an integer *scale*: an item of
//! scale `k` covers a `k × k` block of cells. Items are placed in caller order
//! by a greedy first-fit scan over an occupancy grid, so rectangles never
//! overlap and smaller items backfill the cells that larger ones skipped.
//!
//! The core concepts are:
//!
//! - [`GridConfig`]: division count, spacing, [`ScrollDirection`], and container
//!   insets.
//! - [`SectionSpec`]: item count and header flag of one section. Sections are
//!   stacked along the scroll axis, separated by one spacing gap.
//! - [`GridDelegate`]: per-item scale and per-pass extents, each with a
//!   default. `()` is the all-defaults delegate and [`ScaleFn`] adapts a closure.
//! - [`compute_layout`]: one layout pass, producing a [`GridLayout`].
//! - [`GridLayout`]: the placed [`LayoutElement`]s plus the content size, with
//!   viewport and identity queries.
//! - [`ScaleGrid`]: a controller owning configuration, delegate, sections, and
//!   viewport, which recomputes lazily after invalidation.
//!
//! This crate deliberately does **not** know about views or rendering. Hosts
//! are responsible for:
//!
//! - Reporting the viewport size and section contents.
//! - Asking for the elements intersecting their visible rectangle and creating
//!   views for them.
//! - Adding the container insets around the content; rectangles and content
//!   size are in content coordinates.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_scale_grid::{GridConfig, ItemId, ScaleFn, ScaleGrid, SectionSpec};
//!
//! let config = GridConfig::new().with_transverse_count(4).with_spacing(10.0);
//! // Every seventh item is a 2x2 block.
//! let delegate = ScaleFn(|id: ItemId| if id.item % 7 == 0 { 2 } else { 1 });
//! let mut grid = ScaleGrid::new(config, delegate);
//! grid.set_sections([SectionSpec::new(20)]);
//! grid.set_viewport_size(Size::new(430.0, 800.0));
//!
//! let first = grid.item_rect(ItemId::new(0, 0)).unwrap();
//! assert_eq!(first, Rect::new(0.0, 0.0, 210.0, 210.0));
//!
//! let visible = grid.elements_in(Rect::new(0.0, 0.0, 430.0, 800.0)).count();
//! assert!(visible > 0);
//! assert_eq!(grid.content_size().width, 430.0);
//! ```
//!
//! ## Headers and non-square cells
//!
//! ```rust
//! use understory_scale_grid::{GridConfig, GridDelegate, SectionSpec, compute_layout};
//!
//! struct Banded;
//!
//! impl GridDelegate for Banded {
//!     fn item_longitudinal_extent(&mut self, cell_transverse_extent: f64) -> f64 {
//!         0.8 * cell_transverse_extent
//!     }
//!
//!     fn header_longitudinal_extent(&mut self, _section: usize, _fixed_extent: f64) -> f64 {
//!         60.0
//!     }
//! }
//!
//! let config = GridConfig::new().with_transverse_count(2);
//! let sections = [SectionSpec::with_header(3), SectionSpec::with_header(1)];
//! let layout = compute_layout(&config, &sections, 200.0, &mut Banded);
//!
//! assert_eq!(layout.headers().len(), 2);
//! assert_eq!(layout.header_rect(1).unwrap().y0, 220.0);
//! assert_eq!(layout.content_size().height, 360.0);
//! ```
//!
//! All extents live in a caller-chosen coordinate space (typically logical
//! pixels) and are expected to be finite.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod delegate;
mod engine;
mod geometry;
mod layout;
mod occupancy;
mod scale_grid;
mod types;

pub use config::GridConfig;
pub use delegate::{GridDelegate, ScaleFn};
pub use engine::compute_layout;
pub use layout::GridLayout;
pub use scale_grid::ScaleGrid;
pub use types::{ElementId, ItemId, LayoutElement, ScrollDirection, SectionSpec};
