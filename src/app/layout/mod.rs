use std::collections::HashMap;

use eframe::egui::Pos2;

mod grid;
mod list;
mod scale;

pub(super) use self::grid::{GridLayout, GridSpec, grid_layout};
pub(super) use self::list::{ListLayout, ListSpec, list_layout};
pub(super) use self::scale::{
    AxisProjection, LinearScale, ScaleLayout, ScaleMode, ScalePoint, ScaleSpec, scale_layout,
    scale_marker,
};

#[derive(Clone, Debug, PartialEq)]
pub(super) struct LayoutPosition {
    pub(super) item_id: String,
    pub(super) position: Pos2,
}

/// Undistorted marker centers for one region, in region-local pixels.
#[derive(Clone, Debug, Default, PartialEq)]
pub(super) struct PositionTable {
    positions: Vec<LayoutPosition>,
    index_by_id: HashMap<String, usize>,
}

impl PositionTable {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            index_by_id: HashMap::with_capacity(capacity),
        }
    }

    pub(super) fn insert(&mut self, item_id: &str, position: Pos2) {
        if let Some(&index) = self.index_by_id.get(item_id) {
            self.positions[index].position = position;
            return;
        }

        self.index_by_id
            .insert(item_id.to_owned(), self.positions.len());
        self.positions.push(LayoutPosition {
            item_id: item_id.to_owned(),
            position,
        });
    }

    pub(super) fn get(&self, item_id: &str) -> Option<Pos2> {
        self.index_by_id
            .get(item_id)
            .map(|&index| self.positions[index].position)
    }

    pub(super) fn iter(&self) -> impl Iterator<Item = &LayoutPosition> {
        self.positions.iter()
    }

    pub(super) fn len(&self) -> usize {
        self.positions.len()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
