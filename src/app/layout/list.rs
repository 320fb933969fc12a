use eframe::egui::{Rect, Vec2, pos2, vec2};

use super::PositionTable;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct ListSpec {
    pub(in crate::app) padding: Vec2,
    pub(in crate::app) row_height: f32,
    pub(in crate::app) row_gap: f32,
    pub(in crate::app) thumbnail_ratio: f32,
}

impl Default for ListSpec {
    fn default() -> Self {
        Self {
            padding: vec2(12.0, 10.0),
            row_height: 84.0,
            row_gap: 6.0,
            thumbnail_ratio: 2.0 / 3.0,
        }
    }
}

impl ListSpec {
    pub(in crate::app) fn thumbnail(&self) -> Vec2 {
        let height = (self.row_height - 8.0).max(1.0);
        vec2(height * self.thumbnail_ratio, height)
    }

    /// Full-width hit area of the row whose thumbnail sits at `center_y`.
    pub(in crate::app) fn row_rect(&self, region_width: f32, center_y: f32) -> Rect {
        Rect::from_min_max(
            pos2(self.padding.x, center_y - self.row_height * 0.5),
            pos2(
                (region_width - self.padding.x).max(self.padding.x),
                center_y + self.row_height * 0.5,
            ),
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(in crate::app) struct ListLayout {
    pub(in crate::app) positions: PositionTable,
    pub(in crate::app) page: usize,
    pub(in crate::app) page_count: usize,
}

/// Lays out one page of an ordered list. `page` is clamped to the last page.
pub(in crate::app) fn list_layout<'a>(
    ids: impl IntoIterator<Item = &'a str>,
    size: Vec2,
    spec: &ListSpec,
    page: usize,
) -> ListLayout {
    let ids = ids.into_iter().collect::<Vec<_>>();
    let usable_height = size.y - spec.padding.y * 2.0;
    let pitch = spec.row_height + spec.row_gap;

    if ids.is_empty() || size.x <= spec.padding.x * 2.0 || usable_height < spec.row_height {
        return ListLayout::default();
    }

    let per_page = (((usable_height + spec.row_gap) / pitch).floor() as usize).max(1);
    let page_count = ids.len().div_ceil(per_page);
    let page = page.min(page_count - 1);

    let thumbnail = spec.thumbnail();
    let x = spec.padding.x + 4.0 + thumbnail.x * 0.5;

    let mut positions = PositionTable::with_capacity(per_page);
    for (slot, id) in ids.into_iter().skip(page * per_page).take(per_page).enumerate() {
        let y = spec.padding.y + spec.row_height * 0.5 + slot as f32 * pitch;
        positions.insert(id, pos2(x, y));
    }

    ListLayout {
        positions,
        page,
        page_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginates_to_rows_that_fit() {
        let spec = ListSpec::default();
        let names = (0..10).map(|index| format!("m{index}")).collect::<Vec<_>>();

        // 20 + 3 * 84 + 2 * 6 = 284 px fits three rows.
        let first = list_layout(names.iter().map(String::as_str), vec2(400.0, 284.0), &spec, 0);
        assert_eq!(first.page_count, 4);
        assert_eq!(
            first.positions.iter().map(|entry| entry.item_id.as_str()).collect::<Vec<_>>(),
            ["m0", "m1", "m2"]
        );

        let last = list_layout(names.iter().map(String::as_str), vec2(400.0, 284.0), &spec, 99);
        assert_eq!(last.page, 3);
        assert_eq!(last.positions.len(), 1);
        assert!(last.positions.get("m9").is_some());
    }

    #[test]
    fn too_short_regions_render_nothing() {
        let layout = list_layout(["a"], vec2(400.0, 50.0), &ListSpec::default(), 0);
        assert!(layout.positions.is_empty());
        assert_eq!(layout.page_count, 0);
    }

    #[test]
    fn rows_hit_the_full_region_width() {
        let spec = ListSpec::default();
        let row = spec.row_rect(400.0, 52.0);
        assert_eq!(row.left(), 12.0);
        assert_eq!(row.right(), 388.0);
        assert_eq!(row.height(), spec.row_height);
    }
}
