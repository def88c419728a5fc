// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prime grid: numbers 1..=100 in a four-column grid where primes are drawn
//! at twice the size and Mersenne primes at three times the size.
//!
//! Run:
//! - `cargo run -p understory_demos --example prime_grid`
//! - `cargo run -p understory_demos --example prime_grid -- --sections --horizontal`
//!
//! Set `RUST_LOG=understory_scale_grid=trace` to watch the packing.

use kurbo::{Insets, Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_scale_grid::{
    ElementId, GridConfig, GridDelegate, ItemId, ScaleGrid, ScrollDirection, SectionSpec,
};

const NUMBERS_PER_SECTION: usize = 10;
const SECTION_COUNT: usize = 10;

struct PrimeNumbers {
    sectioned: bool,
}

impl PrimeNumbers {
    fn number(&self, id: ItemId) -> usize {
        if self.sectioned {
            id.section * NUMBERS_PER_SECTION + id.item + 1
        } else {
            id.item + 1
        }
    }

    fn sections(&self) -> Vec<SectionSpec> {
        if self.sectioned {
            vec![SectionSpec::with_header(NUMBERS_PER_SECTION); SECTION_COUNT]
        } else {
            vec![SectionSpec::new(NUMBERS_PER_SECTION * SECTION_COUNT)]
        }
    }
}

impl GridDelegate for PrimeNumbers {
    fn scale_of(&mut self, item: ItemId) -> usize {
        let n = self.number(item);
        match (is_prime(n), is_mersenne(n)) {
            (true, true) => 3,
            (true, false) => 2,
            _ => 1,
        }
    }

    fn item_longitudinal_extent(&mut self, cell_transverse_extent: f64) -> f64 {
        0.8 * cell_transverse_extent
    }

    fn header_longitudinal_extent(&mut self, _section: usize, _fixed_extent: f64) -> f64 {
        if self.sectioned { 60.0 } else { 0.0 }
    }
}

fn is_prime(n: usize) -> bool {
    n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

fn is_mersenne(n: usize) -> bool {
    is_prime(n) && (n + 1).is_power_of_two()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let sectioned = args.iter().any(|a| a == "--sections");
    let direction = if args.iter().any(|a| a == "--horizontal") {
        ScrollDirection::Horizontal
    } else {
        ScrollDirection::Vertical
    };

    let config = GridConfig::new()
        .with_transverse_count(4)
        .with_spacing(10.0)
        .with_direction(direction)
        .with_insets(Insets::uniform(10.0));
    let numbers = PrimeNumbers { sectioned };
    let sections = numbers.sections();

    let mut grid = ScaleGrid::new(config, numbers);
    grid.set_sections(sections);
    // A phone-sized viewport.
    let viewport = match direction {
        ScrollDirection::Vertical => Size::new(375.0, 667.0),
        ScrollDirection::Horizontal => Size::new(667.0, 375.0),
    };
    grid.set_viewport_size(viewport);

    let content = grid.content_size();
    println!(
        "content {:.1} x {:.1} (fixed extent {:.1})",
        content.width,
        content.height,
        grid.fixed_extent()
    );

    let first_screen = Rect::from_origin_size((0.0, 0.0), viewport);
    let elements: Vec<_> = grid.elements_in(first_screen).copied().collect();
    println!("{} elements on the first screen:", elements.len());
    for element in elements {
        let r = element.rect;
        let label = match element.id {
            ElementId::Header(section) => format!(
                "{} ... {}",
                section * NUMBERS_PER_SECTION + 1,
                (section + 1) * NUMBERS_PER_SECTION
            ),
            ElementId::Item(id) => grid.delegate().number(id).to_string(),
        };
        println!(
            "  {label:>9}  ({:6.1}, {:6.1})  {:5.1} x {:5.1}",
            r.x0,
            r.y0,
            r.width(),
            r.height()
        );
    }
}
