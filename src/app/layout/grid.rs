use eframe::egui::{Rect, Vec2, pos2, vec2};

use super::PositionTable;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct GridSpec {
    pub(in crate::app) padding: Vec2,
    /// Preferred marker footprint (card included). Shrunk uniformly when the
    /// region cannot fit a single marker.
    pub(in crate::app) marker: Vec2,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            padding: vec2(12.0, 12.0),
            marker: vec2(54.0, 78.0),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(in crate::app) struct GridLayout {
    pub(in crate::app) positions: PositionTable,
    pub(in crate::app) marker: Vec2,
    pub(in crate::app) padding: Vec2,
}

impl GridLayout {
    /// Where a marker center may sit in a `size` region with its card still
    /// clear of the padding.
    pub(in crate::app) fn center_span(&self, size: Vec2) -> Rect {
        let inset = self.padding + self.marker * 0.5;
        let max = (size - inset).max(inset);
        Rect::from_min_max(inset.to_pos2(), max.to_pos2())
    }
}

/// Places every id on a near-square grid inside a `size` region.
///
/// The column count follows the region's aspect ratio relative to the
/// marker's, so wide regions get wide grids. Markers overlap only when the
/// usable span is shorter than the markers laid side by side. Output depends
/// only on the id order, `size`, and `spec`.
pub(in crate::app) fn grid_layout<'a>(
    ids: impl IntoIterator<Item = &'a str>,
    size: Vec2,
    spec: &GridSpec,
) -> GridLayout {
    let ids = ids.into_iter().collect::<Vec<_>>();
    let usable = size - spec.padding * 2.0;

    if ids.is_empty()
        || usable.x <= 0.0
        || usable.y <= 0.0
        || spec.marker.x <= 0.0
        || spec.marker.y <= 0.0
    {
        return GridLayout {
            marker: spec.marker,
            padding: spec.padding,
            ..GridLayout::default()
        };
    }

    let count = ids.len();
    let view_ratio = usable.x / usable.y;
    let marker_ratio = spec.marker.x / spec.marker.y;
    let columns = ((count as f32 * view_ratio / marker_ratio).sqrt().ceil() as usize).clamp(1, count);
    let rows = count.div_ceil(columns);
    tracing::trace!(count, columns, rows, "grid layout");

    let fit = (usable.x / spec.marker.x)
        .min(usable.y / spec.marker.y)
        .min(1.0);
    let marker = spec.marker * fit;

    let step_x = if columns > 1 {
        (usable.x - marker.x) / (columns - 1) as f32
    } else {
        0.0
    };
    let step_y = if rows > 1 {
        (usable.y - marker.y) / (rows - 1) as f32
    } else {
        0.0
    };

    let mut positions = PositionTable::with_capacity(count);
    for (index, id) in ids.into_iter().enumerate() {
        let row = index / columns;
        let column = index % columns;

        let x = if columns > 1 {
            spec.padding.x + marker.x * 0.5 + column as f32 * step_x
        } else {
            size.x * 0.5
        };
        let y = if rows > 1 {
            spec.padding.y + marker.y * 0.5 + row as f32 * step_y
        } else {
            size.y * 0.5
        };

        positions.insert(id, pos2(x, y));
    }

    GridLayout {
        positions,
        marker,
        padding: spec.padding,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn ids(count: usize) -> Vec<String> {
        (0..count).map(|index| format!("item-{index}")).collect()
    }

    fn columns_and_rows(layout: &GridLayout) -> (usize, usize) {
        let mut xs = layout
            .positions
            .iter()
            .map(|entry| entry.position.x.to_bits())
            .collect::<Vec<_>>();
        let mut ys = layout
            .positions
            .iter()
            .map(|entry| entry.position.y.to_bits())
            .collect::<Vec<_>>();
        xs.sort_unstable();
        xs.dedup();
        ys.sort_unstable();
        ys.dedup();
        (xs.len(), ys.len())
    }

    #[test]
    fn empty_input_places_nothing() {
        let layout = grid_layout([], vec2(400.0, 300.0), &GridSpec::default());
        assert!(layout.positions.is_empty());
        assert_eq!(columns_and_rows(&layout), (0, 0));
    }

    #[test]
    fn single_item_is_centered() {
        let layout = grid_layout(["only"], vec2(400.0, 300.0), &GridSpec::default());
        assert_eq!(layout.positions.get("only"), Some(pos2(200.0, 150.0)));
    }

    #[test]
    fn zero_sized_region_is_a_no_op() {
        let names = ids(5);
        for size in [vec2(0.0, 300.0), vec2(300.0, 0.0), vec2(20.0, 20.0)] {
            let layout = grid_layout(names.iter().map(String::as_str), size, &GridSpec::default());
            assert!(layout.positions.is_empty());
        }
    }

    #[test]
    fn wide_regions_get_more_columns() {
        let names = ids(12);
        let wide = grid_layout(
            names.iter().map(String::as_str),
            vec2(900.0, 200.0),
            &GridSpec::default(),
        );
        let tall = grid_layout(
            names.iter().map(String::as_str),
            vec2(200.0, 900.0),
            &GridSpec::default(),
        );

        let (wide_columns, wide_rows) = columns_and_rows(&wide);
        let (tall_columns, tall_rows) = columns_and_rows(&tall);
        assert!(wide_columns > wide_rows);
        assert!(tall_rows > tall_columns);
        assert!(wide_columns * wide_rows >= 12);
        assert!(tall_columns * tall_rows >= 12);
    }

    #[test]
    fn rerunning_gives_identical_positions() {
        let names = ids(37);
        let first = grid_layout(
            names.iter().map(String::as_str),
            vec2(640.0, 480.0),
            &GridSpec::default(),
        );
        let second = grid_layout(
            names.iter().map(String::as_str),
            vec2(640.0, 480.0),
            &GridSpec::default(),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn reordering_only_permutes_slots() {
        let names = ids(9);
        let forward = grid_layout(
            names.iter().map(String::as_str),
            vec2(500.0, 500.0),
            &GridSpec::default(),
        );
        let reversed = grid_layout(
            names.iter().rev().map(String::as_str),
            vec2(500.0, 500.0),
            &GridSpec::default(),
        );

        let mut forward_slots = forward
            .positions
            .iter()
            .map(|entry| (entry.position.x.to_bits(), entry.position.y.to_bits()))
            .collect::<Vec<_>>();
        let mut reversed_slots = reversed
            .positions
            .iter()
            .map(|entry| (entry.position.x.to_bits(), entry.position.y.to_bits()))
            .collect::<Vec<_>>();
        forward_slots.sort_unstable();
        reversed_slots.sort_unstable();
        assert_eq!(forward_slots, reversed_slots);
        assert_eq!(
            forward.positions.get("item-0"),
            reversed.positions.get("item-8")
        );
    }

    proptest! {
        #[test]
        fn centers_stay_inside_padding(
            count in 0usize..150,
            width in 0.0f32..1600.0,
            height in 0.0f32..1200.0,
        ) {
            let spec = GridSpec::default();
            let names = ids(count);
            let layout = grid_layout(names.iter().map(String::as_str), vec2(width, height), &spec);

            let usable = vec2(width, height) - spec.padding * 2.0;
            if usable.x > 0.0 && usable.y > 0.0 {
                prop_assert_eq!(layout.positions.len(), count);
            }
            let span = layout.center_span(vec2(width, height)).expand(1e-3);
            for entry in layout.positions.iter() {
                prop_assert!(span.contains(entry.position));
                prop_assert!(entry.position.x >= spec.padding.x - 1e-3);
                prop_assert!(entry.position.x <= width - spec.padding.x + 1e-3);
                prop_assert!(entry.position.y >= spec.padding.y - 1e-3);
                prop_assert!(entry.position.y <= height - spec.padding.y + 1e-3);
            }
        }
    }
}
