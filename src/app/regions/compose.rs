use std::time::Instant;

use eframe::egui::{Pos2, Rect, Vec2, pos2, vec2};

use crate::catalog::Catalog;
use crate::condition::{StudyCondition, VariantKind};

use super::super::geometry::{MarkerShape, edge_offset};
use super::super::interaction::{
    InteractionMachine, MarkerKey, MarkerVisual, RegionId, SelectionCallback, SelectionState,
};
use super::super::layout::{
    GridSpec, LinearScale, ListSpec, ScaleMode, ScalePoint, ScaleSpec, grid_layout, list_layout,
    scale_layout, scale_marker,
};
use super::super::viewport::Viewport;
use super::{Band, FISHEYE_FACTOR, Region, RegionLayout, RegionPredicate, ScoreAxis};

const REGION_GAP: f32 = 10.0;
const SCORE_DOMAIN: (f32, f32) = (0.0, 5.0);
const SCALE_PADDING: Vec2 = Vec2::new(16.0, 22.0);

#[derive(Clone, Copy, Debug, PartialEq)]
struct LayoutKey {
    revision: u64,
    viewport: Viewport,
    page: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlanKind {
    Scale { axis: ScoreAxis, mode: ScaleMode },
    Grid,
    List,
}

#[derive(Clone, Copy, Debug)]
struct RegionPlan {
    rect: Rect,
    predicate: RegionPredicate,
    kind: PlanKind,
}

#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) struct MarkerFrame {
    pub(in crate::app) key: MarkerKey,
    pub(in crate::app) shape: MarkerShape,
    pub(in crate::app) hit: Rect,
    pub(in crate::app) visual: MarkerVisual,
}

/// Owns the regions of one mounted variant and the selection they share.
///
/// Dropping the composer drops every region and the selection callback with
/// it, so a replaced variant cannot react to later input.
pub(in crate::app) struct Composer {
    condition: StudyCondition,
    regions: Vec<Region>,
    layout_key: Option<LayoutKey>,
    stale: bool,
    interaction: InteractionMachine,
    page: usize,
    layout_passes: u64,
}

impl Composer {
    pub(in crate::app) fn new(condition: StudyCondition, on_hover: SelectionCallback) -> Self {
        tracing::debug!(variant = %condition.variant, "mounting visualization variant");
        Self {
            condition,
            regions: Vec::new(),
            layout_key: None,
            stale: false,
            interaction: InteractionMachine::new(on_hover),
            page: 0,
            layout_passes: 0,
        }
    }

    pub(in crate::app) fn condition(&self) -> StudyCondition {
        self.condition
    }

    pub(in crate::app) fn variant(&self) -> VariantKind {
        self.condition.variant
    }

    pub(in crate::app) fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub(in crate::app) fn selection(&self) -> &SelectionState {
        self.interaction.state()
    }

    pub(in crate::app) fn layout_passes(&self) -> u64 {
        self.layout_passes
    }

    /// Applies a condition with the same variant. Cutoff or community changes
    /// force a relayout; turning fisheye off drops every focal point.
    pub(in crate::app) fn update_condition(&mut self, condition: StudyCondition) {
        debug_assert_eq!(
            condition.variant, self.condition.variant,
            "variant changes replace the composer"
        );

        if condition.cutoffs != self.condition.cutoffs
            || condition.show_community != self.condition.show_community
        {
            self.stale = true;
        }
        if !condition.fisheye {
            for region in &mut self.regions {
                region.focus = None;
            }
        }
        self.condition = condition;
    }

    pub(in crate::app) fn page(&self) -> Option<(usize, usize)> {
        self.regions.iter().find_map(|region| match &region.layout {
            RegionLayout::List { layout, .. } => Some((layout.page, layout.page_count)),
            _ => None,
        })
    }

    pub(in crate::app) fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Rebuilds every region when the dataset revision, the viewport, or the
    /// list page changed since the last pass. Returns whether it did.
    pub(in crate::app) fn ensure_layout(
        &mut self,
        catalog: &Catalog,
        revision: u64,
        viewport: Viewport,
    ) -> bool {
        let key = LayoutKey {
            revision,
            viewport,
            page: self.page,
        };
        if !self.stale && self.layout_key == Some(key) {
            return false;
        }

        if self
            .layout_key
            .is_some_and(|previous| previous.revision != revision)
        {
            self.interaction.reset();
            self.page = 0;
        }

        let started = Instant::now();
        self.regions = if viewport.is_empty() {
            Vec::new()
        } else {
            build_regions(&self.condition, catalog, viewport, self.page)
        };
        if let Some((page, _)) = self.page() {
            self.page = page;
        }

        self.layout_key = Some(LayoutKey {
            revision,
            viewport,
            page: self.page,
        });
        self.stale = false;
        self.layout_passes += 1;

        tracing::debug!(
            variant = %self.condition.variant,
            regions = self.regions.len(),
            markers = self
                .regions
                .iter()
                .filter_map(Region::positions)
                .map(|positions| positions.len())
                .sum::<usize>(),
            width = viewport.width,
            height = viewport.height,
            elapsed_us = started.elapsed().as_micros() as u64,
            "layout pass"
        );
        true
    }

    pub(in crate::app) fn projection_factor(&self) -> f32 {
        if self.condition.fisheye {
            FISHEYE_FACTOR
        } else {
            0.0
        }
    }

    /// Every marker instance, sorted into paint order (back to front).
    pub(in crate::app) fn frames(&self) -> Vec<MarkerFrame> {
        let factor = self.projection_factor();
        let state = self.interaction.state();

        let mut frames = Vec::new();
        for region in &self.regions {
            let Some(positions) = region.positions() else {
                continue;
            };

            let base_shape = MarkerShape::with_footprint(region.marker_footprint());
            let bounds = region.local_bounds();
            let origin = region.rect.min.to_vec2();

            for entry in positions.iter() {
                let mut visual = state.visual(region.id, &entry.item_id);
                if region.is_list() {
                    visual.expanded = false;
                }

                let shape = base_shape.scaled(visual.scale());
                let mut center = region.warp(entry.position, factor);
                if visual.expanded {
                    center += edge_offset(center, shape.half_extent(), bounds);
                }
                let shape = shape.placed_at(center + origin);

                let hit = match &region.layout {
                    RegionLayout::List { spec, .. } => spec
                        .row_rect(bounds.width(), entry.position.y)
                        .translate(origin),
                    _ => shape.card,
                };

                frames.push(MarkerFrame {
                    key: MarkerKey::new(region.id, &entry.item_id),
                    shape,
                    hit,
                    visual,
                });
            }
        }

        frames.sort_by_key(|frame| frame.visual.order);
        frames
    }

    /// Updates fisheye focal points and hover from a pointer position in
    /// visualization coordinates. `None` means the pointer left.
    pub(in crate::app) fn pointer_moved(&mut self, pointer: Option<Pos2>) {
        let fisheye = self.condition.fisheye;
        for region in &mut self.regions {
            region.focus = pointer
                .filter(|pointer| {
                    fisheye && region.supports_fisheye() && region.rect.contains(*pointer)
                })
                .map(|pointer| pointer - region.rect.min.to_vec2());
        }

        let hit = pointer.and_then(|pointer| topmost_hit(&self.frames(), pointer));
        self.interaction.track_pointer(hit);
    }

    pub(in crate::app) fn clicked(&mut self, pointer: Pos2) {
        match topmost_hit(&self.frames(), pointer) {
            Some(key) if self.condition.variant != VariantKind::Baseline => {
                self.interaction.click(key);
            }
            Some(_) => {}
            None => self.interaction.background_click(),
        }
    }
}

fn topmost_hit(frames: &[MarkerFrame], pointer: Pos2) -> Option<MarkerKey> {
    frames
        .iter()
        .rev()
        .find(|frame| frame.hit.contains(pointer))
        .map(|frame| frame.key.clone())
}

fn split_rows(rect: Rect, count: usize) -> Vec<Rect> {
    let count = count.max(1);
    let height = ((rect.height() - REGION_GAP * (count - 1) as f32) / count as f32).max(0.0);
    (0..count)
        .map(|index| {
            Rect::from_min_size(
                pos2(rect.left(), rect.top() + index as f32 * (height + REGION_GAP)),
                vec2(rect.width(), height),
            )
        })
        .collect()
}

fn split_columns(rect: Rect, count: usize) -> Vec<Rect> {
    let count = count.max(1);
    let width = ((rect.width() - REGION_GAP * (count - 1) as f32) / count as f32).max(0.0);
    (0..count)
        .map(|index| {
            Rect::from_min_size(
                pos2(rect.left() + index as f32 * (width + REGION_GAP), rect.top()),
                vec2(width, rect.height()),
            )
        })
        .collect()
}

fn halves(rect: Rect, axis: ScoreAxis) -> Vec<RegionPlan> {
    split_columns(rect, 2)
        .into_iter()
        .zip([Band::Dislike, Band::Like])
        .map(|(rect, band)| RegionPlan {
            rect,
            predicate: RegionPredicate::Half { axis, band },
            kind: PlanKind::Grid,
        })
        .collect()
}

fn plan_regions(condition: &StudyCondition, bounds: Rect) -> Vec<RegionPlan> {
    let single = |rect: Rect, axis: ScoreAxis| RegionPlan {
        rect,
        predicate: RegionPredicate::All,
        kind: PlanKind::Scale {
            axis,
            mode: ScaleMode::SingleAxis,
        },
    };

    match condition.variant {
        VariantKind::CoupledContinuous => vec![RegionPlan {
            rect: bounds,
            predicate: RegionPredicate::All,
            kind: PlanKind::Scale {
                axis: ScoreAxis::User,
                mode: ScaleMode::TwoAxis,
            },
        }],
        VariantKind::DecoupledContinuous if condition.show_community => {
            let rows = split_rows(bounds, 2);
            vec![
                single(rows[0], ScoreAxis::User),
                single(rows[1], ScoreAxis::Community),
            ]
        }
        VariantKind::DecoupledContinuous | VariantKind::SelfContinuous => {
            vec![single(bounds, ScoreAxis::User)]
        }
        VariantKind::CoupledDiscrete => {
            let rows = split_rows(bounds, 2);
            let mut plans = Vec::with_capacity(4);
            for (row, community) in rows.into_iter().zip([Band::Like, Band::Dislike]) {
                for (rect, user) in split_columns(row, 2)
                    .into_iter()
                    .zip([Band::Dislike, Band::Like])
                {
                    plans.push(RegionPlan {
                        rect,
                        predicate: RegionPredicate::Quadrant { user, community },
                        kind: PlanKind::Grid,
                    });
                }
            }
            plans
        }
        VariantKind::DecoupledDiscrete if condition.show_community => {
            let rows = split_rows(bounds, 2);
            let mut plans = halves(rows[0], ScoreAxis::User);
            plans.extend(halves(rows[1], ScoreAxis::Community));
            plans
        }
        VariantKind::DecoupledDiscrete | VariantKind::SelfDiscrete => {
            halves(bounds, ScoreAxis::User)
        }
        VariantKind::Baseline => vec![RegionPlan {
            rect: bounds,
            predicate: RegionPredicate::All,
            kind: PlanKind::List,
        }],
    }
}

fn scale_spec(size: Vec2, mode: ScaleMode) -> ScaleSpec {
    ScaleSpec {
        padding: SCALE_PADDING,
        marker: scale_marker(size, mode),
        domain: SCORE_DOMAIN,
    }
}

fn build_regions(
    condition: &StudyCondition,
    catalog: &Catalog,
    viewport: Viewport,
    page: usize,
) -> Vec<Region> {
    let plans = plan_regions(condition, viewport.local_rect());

    // Every scale region of a variant has the same width, so one x scale
    // serves them all and keeps stacked charts aligned.
    let shared_x: Option<(ScaleSpec, LinearScale)> = plans.iter().find_map(|plan| match plan.kind {
        PlanKind::Scale { mode, .. } => {
            let spec = scale_spec(plan.rect.size(), mode);
            spec.x_scale(plan.rect.width()).map(|x| (spec, x))
        }
        _ => None,
    });

    plans
        .into_iter()
        .enumerate()
        .map(|(index, plan)| {
            let size = plan.rect.size();
            let members = catalog
                .items()
                .iter()
                .filter(|item| plan.predicate.matches(item, condition.cutoffs));

            let layout = match plan.kind {
                PlanKind::Scale { axis, mode } => shared_x
                    .and_then(|(spec, x)| {
                        let points = members.map(|item| ScalePoint {
                            id: item.id.as_str(),
                            x: axis.score(item),
                            y: item.community_score,
                        });
                        scale_layout(points, size, &spec, x, mode)
                    })
                    .map_or(RegionLayout::Empty, |layout| RegionLayout::Scale {
                        layout,
                        axis,
                        mode,
                    }),
                PlanKind::Grid => RegionLayout::Grid(grid_layout(
                    members.map(|item| item.id.as_str()),
                    size,
                    &GridSpec::default(),
                )),
                PlanKind::List => {
                    let spec = ListSpec::default();
                    let ranked = catalog
                        .ranked_by_user_score()
                        .into_iter()
                        .filter(|item| plan.predicate.matches(item, condition.cutoffs));
                    RegionLayout::List {
                        layout: list_layout(ranked.map(|item| item.id.as_str()), size, &spec, page),
                        spec,
                    }
                }
            };

            Region {
                id: RegionId(index),
                rect: plan.rect,
                predicate: plan.predicate,
                layout,
                focus: None,
            }
        })
        .collect()
}
