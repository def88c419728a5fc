// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The packing pass.
//!
//! Sections are laid out one after another along the scroll axis. Within a
//! section, items are placed in order by a greedy first-fit scan over an
//! [`OccupancyGrid`]: starting from a cursor, the scan walks cells in row-major
//! order (rows being cross-axis strips) until the item's square footprint fits.
//! There is no backtracking and no reordering.
//!
//! The cursor only advances when an item lands exactly where the cursor
//! pointed. An item that had to be relocated leaves the cursor alone, so the
//! items after it get a chance to fill the cells it skipped.

use tracing::{debug, trace};

use crate::geometry::CellMetrics;
use crate::occupancy::{Footprint, OccupancyGrid};
use crate::{GridConfig, GridDelegate, GridLayout, ItemId, SectionSpec};

/// Lay out `sections` in a grid whose cross axis is `fixed_extent` long.
///
/// `fixed_extent` is the container's cross-axis size minus its insets. It may
/// be `0`, in which case every cell is degenerate (zero-sized) but every item
/// is still placed. Negative values are treated as `0`.
///
/// ```rust
/// use understory_scale_grid::{GridConfig, ItemId, ScaleFn, SectionSpec, compute_layout};
///
/// let config = GridConfig::new().with_transverse_count(3);
/// // The first item is twice as large as the rest.
/// let mut delegate = ScaleFn(|id: ItemId| if id.item == 0 { 2 } else { 1 });
/// let layout = compute_layout(&config, &[SectionSpec::new(4)], 300.0, &mut delegate);
///
/// // 2x2 block in the top-left, then the third column, then below the block.
/// let rect = |item| layout.item_rect(ItemId::new(0, item)).unwrap();
/// assert_eq!((rect(0).x0, rect(0).y0, rect(0).x1, rect(0).y1), (0.0, 0.0, 200.0, 200.0));
/// assert_eq!((rect(1).x0, rect(1).y0), (200.0, 0.0));
/// assert_eq!((rect(2).x0, rect(2).y0), (200.0, 100.0));
/// assert_eq!((rect(3).x0, rect(3).y0), (0.0, 200.0));
/// assert_eq!(layout.content_size().height, 300.0);
/// ```
pub fn compute_layout<D: GridDelegate>(
    config: &GridConfig,
    sections: &[SectionSpec],
    fixed_extent: f64,
    delegate: &mut D,
) -> GridLayout {
    let mut layout = GridLayout::new();
    layout_into(&mut layout, config, sections, fixed_extent, delegate);
    layout
}

/// Same as [`compute_layout`], reusing the allocations of `layout`.
pub(crate) fn layout_into<D: GridDelegate>(
    layout: &mut GridLayout,
    config: &GridConfig,
    sections: &[SectionSpec],
    fixed_extent: f64,
    delegate: &mut D,
) {
    debug_assert!(
        fixed_extent.is_finite(),
        "grid fixed extent must be finite; got {fixed_extent:?}"
    );
    layout.clear();

    let fixed_extent = fixed_extent.max(0.0);
    let count = config.transverse_count();
    let spacing = config.spacing();
    let direction = config.direction();

    let mut metrics = CellMetrics::new(fixed_extent, count, spacing, direction);
    metrics.longitudinal = delegate
        .item_longitudinal_extent(metrics.transverse)
        .max(0.0);

    // Furthest scroll-axis edge reached by anything placed so far.
    let mut extent = 0.0_f64;
    let mut started = false;

    for (section, spec) in sections.iter().enumerate() {
        if spec.item_count == 0 {
            continue;
        }
        let mut offset = if started { extent + spacing } else { 0.0 };
        started = true;

        if spec.has_header {
            let header_extent = delegate.header_longitudinal_extent(section, fixed_extent);
            if header_extent > 0.0 {
                let rect = direction.orient(0.0, offset, fixed_extent, header_extent);
                layout.push_header(section, rect);
                extent = extent.max(direction.along_max(rect));
                offset += header_extent + spacing;
            }
        }

        let section_extent = pack_section(
            layout,
            &metrics,
            count,
            section,
            spec.item_count,
            offset,
            delegate,
        );
        extent = extent.max(section_extent);
    }

    layout.content_size = direction.orient_size(fixed_extent, extent);

    debug!(
        sections = sections.len(),
        items = layout.items.len(),
        headers = layout.headers.len(),
        fixed_extent,
        content_extent = extent,
        "computed grid layout"
    );
}

/// Place the items of one section starting at scroll-axis `offset`.
///
/// Returns the furthest scroll-axis edge reached by the section's items.
fn pack_section<D: GridDelegate>(
    layout: &mut GridLayout,
    metrics: &CellMetrics,
    count: usize,
    section: usize,
    item_count: usize,
    offset: f64,
    delegate: &mut D,
) -> f64 {
    let mut grid = OccupancyGrid::new(count);
    let mut extent = offset;
    let (mut longitude, mut transverse) = (0_usize, 0_usize);

    for item in 0..item_count {
        if transverse == count {
            transverse = 0;
            longitude += 1;
        }

        let id = ItemId::new(section, item);
        let scale = delegate.scale_of(id).clamp(1, count) - 1;
        let intended = Footprint::new(longitude, transverse, scale);
        let footprint = first_fit(&mut grid, intended, count);
        grid.reserve(footprint);

        let rect = metrics.frame(footprint, offset);
        extent = extent.max(metrics.direction.along_max(rect));
        layout.push_item(id, rect);

        if footprint == intended {
            transverse += 1;
        } else {
            trace!(
                section,
                item,
                scale = scale + 1,
                from = ?(intended.longitude, intended.transverse),
                to = ?(footprint.longitude, footprint.transverse),
                "relocated item"
            );
        }
    }

    trace!(section, rows = grid.row_count(), "packed section");
    extent
}

/// Scan forward from `start` for the first position where its footprint fits.
///
/// Moves one cell across at a time and wraps to the next row once the
/// footprint can no longer fit in the current one. Terminates because rows
/// past the end of the grid are always free.
fn first_fit(grid: &mut OccupancyGrid, start: Footprint, count: usize) -> Footprint {
    let mut candidate = start;
    while !grid.is_free(candidate) {
        let mut longitude = candidate.longitude;
        let mut transverse = candidate.transverse + 1;
        if transverse == count || transverse + candidate.scale == count {
            transverse = 0;
            longitude += 1;
        }
        candidate = candidate.at(longitude, transverse);
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElementId, ScaleFn, ScrollDirection};
    use alloc::vec::Vec;
    use kurbo::Rect;

    fn scales(values: &'static [usize]) -> ScaleFn<impl FnMut(ItemId) -> usize> {
        ScaleFn(move |id: ItemId| values[id.item])
    }

    fn item(layout: &GridLayout, section: usize, item: usize) -> Rect {
        layout
            .item_rect(ItemId::new(section, item))
            .expect("item should be placed")
    }

    struct Headers {
        extent: f64,
    }

    impl GridDelegate for Headers {
        fn header_longitudinal_extent(&mut self, _section: usize, _fixed_extent: f64) -> f64 {
            self.extent
        }
    }

    #[test]
    fn single_cells_wrap_into_rows() {
        let config = GridConfig::new().with_transverse_count(4);
        let layout = compute_layout(&config, &[SectionSpec::new(10)], 400.0, &mut ());

        let rows: Vec<f64> = layout.items().iter().map(|e| e.rect.y0).collect();
        assert_eq!(
            rows,
            [0.0, 0.0, 0.0, 0.0, 100.0, 100.0, 100.0, 100.0, 200.0, 200.0]
        );
        assert_eq!(item(&layout, 0, 5), Rect::new(100.0, 100.0, 200.0, 200.0));
        assert_eq!(item(&layout, 0, 9), Rect::new(100.0, 200.0, 200.0, 300.0));
        assert_eq!(layout.content_size().width, 400.0);
        assert_eq!(layout.content_size().height, 300.0);
    }

    #[test]
    fn small_items_backfill_cells_skipped_by_large_ones() {
        let config = GridConfig::new().with_transverse_count(4);
        let mut delegate = scales(&[1, 1, 3, 1, 1, 1, 1]);
        let layout = compute_layout(&config, &[SectionSpec::new(7)], 400.0, &mut delegate);

        assert_eq!(item(&layout, 0, 0), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(item(&layout, 0, 1), Rect::new(100.0, 0.0, 200.0, 100.0));
        // No room for a 3x3 block at column 2, so it drops to the next row.
        assert_eq!(item(&layout, 0, 2), Rect::new(0.0, 100.0, 300.0, 400.0));
        // The cursor stayed put, so the next items fill the first row.
        assert_eq!(item(&layout, 0, 3), Rect::new(200.0, 0.0, 300.0, 100.0));
        assert_eq!(item(&layout, 0, 4), Rect::new(300.0, 0.0, 400.0, 100.0));
        // Then the last column beside the block.
        assert_eq!(item(&layout, 0, 5), Rect::new(300.0, 100.0, 400.0, 200.0));
        assert_eq!(item(&layout, 0, 6), Rect::new(300.0, 200.0, 400.0, 300.0));
        assert_eq!(layout.content_size().height, 400.0);
    }

    #[test]
    fn header_spans_cross_axis_and_pushes_items() {
        let config = GridConfig::new().with_transverse_count(4).with_spacing(10.0);
        let mut delegate = Headers { extent: 40.0 };
        let layout = compute_layout(
            &config,
            &[SectionSpec::with_header(2)],
            430.0,
            &mut delegate,
        );

        assert_eq!(layout.header_rect(0), Some(Rect::new(0.0, 0.0, 430.0, 40.0)));
        assert_eq!(item(&layout, 0, 0), Rect::new(0.0, 50.0, 100.0, 150.0));
        assert_eq!(item(&layout, 0, 1), Rect::new(110.0, 50.0, 210.0, 150.0));
        assert_eq!(layout.content_size().height, 150.0);
    }

    #[test]
    fn sections_follow_each_other_with_one_gap() {
        let config = GridConfig::new().with_transverse_count(2).with_spacing(10.0);
        let sections = [SectionSpec::new(2), SectionSpec::new(0), SectionSpec::new(3)];
        let layout = compute_layout(&config, &sections, 210.0, &mut ());

        assert_eq!(item(&layout, 0, 1), Rect::new(110.0, 0.0, 210.0, 100.0));
        // The empty middle section takes no space.
        assert_eq!(item(&layout, 2, 0), Rect::new(0.0, 110.0, 100.0, 210.0));
        assert_eq!(item(&layout, 2, 2), Rect::new(0.0, 220.0, 100.0, 320.0));
        assert_eq!(layout.content_size().height, 320.0);
    }

    #[test]
    fn headers_in_every_section() {
        let config = GridConfig::new().with_transverse_count(2).with_spacing(10.0);
        let sections = [
            SectionSpec::with_header(2),
            SectionSpec::with_header(0),
            SectionSpec::with_header(1),
        ];
        let mut delegate = Headers { extent: 40.0 };
        let layout = compute_layout(&config, &sections, 210.0, &mut delegate);

        assert_eq!(layout.headers().len(), 2, "empty sections get no header");
        assert_eq!(layout.header_rect(0), Some(Rect::new(0.0, 0.0, 210.0, 40.0)));
        assert_eq!(layout.header_rect(1), None);
        assert_eq!(layout.header_rect(2), Some(Rect::new(0.0, 160.0, 210.0, 200.0)));
        assert_eq!(item(&layout, 2, 0), Rect::new(0.0, 210.0, 100.0, 310.0));
        assert_eq!(layout.content_size().height, 310.0);
    }

    #[test]
    fn header_flag_without_extent_emits_nothing() {
        let config = GridConfig::new().with_transverse_count(2);
        let layout = compute_layout(&config, &[SectionSpec::with_header(2)], 200.0, &mut ());
        assert!(layout.headers().is_empty());
        assert_eq!(item(&layout, 0, 0).y0, 0.0);
    }

    #[test]
    fn oversized_scale_is_clamped() {
        let config = GridConfig::new().with_transverse_count(3);
        let mut huge = scales(&[10, 1]);
        let mut exact = scales(&[3, 1]);
        let a = compute_layout(&config, &[SectionSpec::new(2)], 300.0, &mut huge);
        let b = compute_layout(&config, &[SectionSpec::new(2)], 300.0, &mut exact);
        assert_eq!(a, b);
        assert_eq!(item(&a, 0, 0), Rect::new(0.0, 0.0, 300.0, 300.0));
        assert_eq!(item(&a, 0, 1), Rect::new(0.0, 300.0, 100.0, 400.0));
    }

    #[test]
    fn zero_scale_is_treated_as_one() {
        let config = GridConfig::new().with_transverse_count(2);
        let mut zero = scales(&[0, 0, 0]);
        let a = compute_layout(&config, &[SectionSpec::new(3)], 200.0, &mut zero);
        let b = compute_layout(&config, &[SectionSpec::new(3)], 200.0, &mut ());
        assert_eq!(a, b);
    }

    #[test]
    fn zero_transverse_count_matches_one() {
        let sections = [SectionSpec::new(4), SectionSpec::new(2)];
        let mut delegate = scales(&[1, 2, 1, 3]);
        let zero = compute_layout(
            &GridConfig::new().with_transverse_count(0).with_spacing(5.0),
            &sections,
            120.0,
            &mut delegate,
        );
        let one = compute_layout(
            &GridConfig::new().with_transverse_count(1).with_spacing(5.0),
            &sections,
            120.0,
            &mut delegate,
        );
        assert_eq!(zero, one);
        // A single column stacks everything.
        assert_eq!(item(&one, 0, 3), Rect::new(0.0, 375.0, 120.0, 495.0));
    }

    #[test]
    fn horizontal_is_a_transposition() {
        let sections = [SectionSpec::with_header(5), SectionSpec::with_header(6)];
        let base = GridConfig::new().with_transverse_count(3).with_spacing(4.0);
        let mut delegate = Headers { extent: 25.0 };

        let vertical = compute_layout(&base, &sections, 308.0, &mut delegate);
        let horizontal = compute_layout(
            &base.with_direction(ScrollDirection::Horizontal),
            &sections,
            308.0,
            &mut delegate,
        );

        assert_eq!(vertical.len(), horizontal.len());
        let pairs = vertical
            .headers()
            .iter()
            .chain(vertical.items())
            .zip(horizontal.headers().iter().chain(horizontal.items()));
        for (v, h) in pairs {
            assert_eq!(v.id, h.id);
            assert_eq!(v.rect, Rect::new(h.rect.y0, h.rect.x0, h.rect.y1, h.rect.x1));
        }
        assert_eq!(vertical.content_size().width, horizontal.content_size().height);
        assert_eq!(vertical.content_size().height, horizontal.content_size().width);
    }

    #[test]
    fn longitudinal_extent_comes_from_delegate() {
        struct Wide;
        impl GridDelegate for Wide {
            fn scale_of(&mut self, item: ItemId) -> usize {
                if item.item == 0 { 2 } else { 1 }
            }

            fn item_longitudinal_extent(&mut self, cell_transverse_extent: f64) -> f64 {
                0.5 * cell_transverse_extent
            }
        }

        let config = GridConfig::new().with_transverse_count(2).with_spacing(10.0);
        let layout = compute_layout(&config, &[SectionSpec::new(2)], 210.0, &mut Wide);
        // Cells are 100 across and 50 along; a 2x2 block also spans one gap each way.
        assert_eq!(item(&layout, 0, 0), Rect::new(0.0, 0.0, 210.0, 110.0));
        assert_eq!(item(&layout, 0, 1), Rect::new(0.0, 120.0, 100.0, 170.0));
    }

    #[test]
    fn zero_extent_still_places_everything() {
        let config = GridConfig::new().with_transverse_count(3).with_spacing(0.0);
        let layout = compute_layout(&config, &[SectionSpec::new(7)], 0.0, &mut ());
        assert_eq!(layout.items().len(), 7);
        assert!(layout.items().iter().all(|e| e.rect.area() == 0.0));
        assert_eq!(layout.content_size().width, 0.0);
    }

    #[test]
    fn crowded_gaps_keep_items_inside_the_cross_axis() {
        let config = GridConfig::new().with_transverse_count(4).with_spacing(10.0);
        let mut delegate = scales(&[1, 2, 1, 1, 4, 1]);
        for fixed in [0.0, 20.0] {
            let layout = compute_layout(&config, &[SectionSpec::new(6)], fixed, &mut delegate);
            assert_eq!(layout.items().len(), 6);
            for element in layout.items() {
                assert!(
                    element.rect.x0 >= 0.0 && element.rect.x1 <= fixed,
                    "{:?} leaves [0, {fixed}]: {:?}",
                    element.id,
                    element.rect
                );
            }
            assert_eq!(layout.content_size().width, fixed);
        }
    }

    #[test]
    fn repeated_passes_are_identical() {
        let config = GridConfig::new().with_transverse_count(5).with_spacing(3.0);
        let sections = [SectionSpec::with_header(17), SectionSpec::with_header(9)];
        let mut delegate = Headers { extent: 30.0 };
        let first = compute_layout(&config, &sections, 517.0, &mut delegate);
        let second = compute_layout(&config, &sections, 517.0, &mut delegate);
        assert_eq!(first, second);

        let mut reused = GridLayout::new();
        layout_into(&mut reused, &config, &sections, 517.0, &mut delegate);
        layout_into(&mut reused, &config, &sections, 517.0, &mut delegate);
        assert_eq!(reused, first);
    }

    /// Pseudo-random scales from a fixed seed.
    struct Mixed {
        state: u64,
        max: usize,
    }

    impl GridDelegate for Mixed {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Only the low bits are used"
        )]
        fn scale_of(&mut self, _item: ItemId) -> usize {
            self.state ^= self.state << 13;
            self.state ^= self.state >> 7;
            self.state ^= self.state << 17;
            let roll = (self.state % 100) as usize;
            // Mostly small items with the occasional large one.
            if roll < 70 { 1 } else { 1 + roll % self.max }
        }

        fn header_longitudinal_extent(&mut self, section: usize, _fixed_extent: f64) -> f64 {
            if section % 2 == 0 { 24.0 } else { 0.0 }
        }
    }

    #[test]
    fn mixed_layouts_never_overlap_and_stay_in_bounds() {
        for count in 1..=6 {
            for spacing in [0.0, 2.5, 8.0] {
                let config = GridConfig::new()
                    .with_transverse_count(count)
                    .with_spacing(spacing);
                let sections = [
                    SectionSpec::with_header(23),
                    SectionSpec::with_header(11),
                    SectionSpec::with_header(0),
                    SectionSpec::with_header(31),
                ];
                let mut delegate = Mixed {
                    state: 0x2545_f491_4f6c_dd1d,
                    max: count + 2,
                };
                let fixed = 600.0;
                let layout = compute_layout(&config, &sections, fixed, &mut delegate);

                assert_eq!(layout.items().len(), 23 + 11 + 31);
                let all: Vec<_> = layout.headers().iter().chain(layout.items()).collect();
                for (i, a) in all.iter().enumerate() {
                    assert!(a.rect.x0 >= 0.0 && a.rect.x1 <= fixed + 1e-9);
                    assert!(a.rect.y1 <= layout.content_size().height + 1e-9);
                    for b in &all[i + 1..] {
                        assert!(
                            !crate::layout::overlaps(a.rect, b.rect),
                            "{:?} and {:?} overlap",
                            a.id,
                            b.id
                        );
                    }
                }
                assert!(
                    layout
                        .items()
                        .iter()
                        .all(|e| matches!(e.id, ElementId::Item(_))),
                    "items list only holds items"
                );
            }
        }
    }
}
