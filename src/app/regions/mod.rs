use eframe::egui::{Pos2, Rect, Vec2, pos2};

use crate::catalog::ScoredItem;
use crate::condition::Cutoffs;

use super::interaction::RegionId;
use super::layout::{
    AxisProjection, GridLayout, ListLayout, ListSpec, PositionTable, ScaleLayout, ScaleMode,
};

mod baseline;
mod compose;
mod draw;

pub(super) use self::compose::{Composer, MarkerFrame};

pub(super) const FISHEYE_FACTOR: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ScoreAxis {
    User,
    Community,
}

impl ScoreAxis {
    pub(super) fn score(self, item: &ScoredItem) -> f32 {
        match self {
            Self::User => item.user_score,
            Self::Community => item.community_score,
        }
    }

    pub(super) fn axis_label(self) -> &'static str {
        match self {
            Self::User => "Your predicted rating",
            Self::Community => "Community rating",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Band {
    Like,
    Dislike,
}

impl Band {
    pub(super) fn contains(self, score: f32, cutoffs: Cutoffs) -> bool {
        match self {
            Self::Like => cutoffs.is_like(score),
            Self::Dislike => cutoffs.is_dislike(score),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum RegionPredicate {
    All,
    Half { axis: ScoreAxis, band: Band },
    Quadrant { user: Band, community: Band },
}

impl RegionPredicate {
    pub(super) fn matches(self, item: &ScoredItem, cutoffs: Cutoffs) -> bool {
        match self {
            Self::All => true,
            Self::Half { axis, band } => band.contains(axis.score(item), cutoffs),
            Self::Quadrant { user, community } => {
                user.contains(item.user_score, cutoffs)
                    && community.contains(item.community_score, cutoffs)
            }
        }
    }

    pub(super) fn label(self) -> &'static str {
        match self {
            Self::All => "All recommendations",
            Self::Half {
                axis: ScoreAxis::User,
                band: Band::Like,
            } => "You may like",
            Self::Half {
                axis: ScoreAxis::User,
                band: Band::Dislike,
            } => "You may dislike",
            Self::Half {
                axis: ScoreAxis::Community,
                band: Band::Like,
            } => "Community likes",
            Self::Half {
                axis: ScoreAxis::Community,
                band: Band::Dislike,
            } => "Community dislikes",
            Self::Quadrant {
                user: Band::Like,
                community: Band::Like,
            } => "You like, community likes",
            Self::Quadrant {
                user: Band::Like,
                community: Band::Dislike,
            } => "You like, community dislikes",
            Self::Quadrant {
                user: Band::Dislike,
                community: Band::Like,
            } => "You dislike, community likes",
            Self::Quadrant {
                user: Band::Dislike,
                community: Band::Dislike,
            } => "You dislike, community dislikes",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(super) enum RegionLayout {
    Empty,
    Grid(GridLayout),
    Scale {
        layout: ScaleLayout,
        axis: ScoreAxis,
        mode: ScaleMode,
    },
    List {
        layout: ListLayout,
        spec: ListSpec,
    },
}

/// One rectangular surface of a variant. `rect` is relative to the
/// visualization origin; positions inside are region-local.
#[derive(Clone, Debug, PartialEq)]
pub(super) struct Region {
    pub(super) id: RegionId,
    pub(super) rect: Rect,
    pub(super) predicate: RegionPredicate,
    pub(super) layout: RegionLayout,
    pub(super) focus: Option<Pos2>,
}

impl Region {
    pub(super) fn positions(&self) -> Option<&PositionTable> {
        match &self.layout {
            RegionLayout::Empty => None,
            RegionLayout::Grid(grid) => Some(&grid.positions),
            RegionLayout::Scale { layout, .. } => Some(&layout.positions),
            RegionLayout::List { layout, .. } => Some(&layout.positions),
        }
    }

    pub(super) fn marker_footprint(&self) -> Vec2 {
        match &self.layout {
            RegionLayout::Empty => Vec2::ZERO,
            RegionLayout::Grid(grid) => grid.marker,
            RegionLayout::Scale { layout, .. } => layout.marker,
            RegionLayout::List { spec, .. } => spec.thumbnail(),
        }
    }

    pub(super) fn local_bounds(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.rect.size())
    }

    pub(super) fn supports_fisheye(&self) -> bool {
        matches!(
            self.layout,
            RegionLayout::Grid(_) | RegionLayout::Scale { .. }
        )
    }

    pub(super) fn is_list(&self) -> bool {
        matches!(self.layout, RegionLayout::List { .. })
    }

    pub(super) fn x_projection(&self, factor: f32) -> Option<AxisProjection> {
        let RegionLayout::Scale { layout, .. } = &self.layout else {
            return None;
        };
        Some(AxisProjection::new(layout.x).with_focus(self.focus.map(|focus| focus.x), factor))
    }

    pub(super) fn y_projection(&self, factor: f32) -> Option<AxisProjection> {
        let RegionLayout::Scale { layout, .. } = &self.layout else {
            return None;
        };
        let y = layout.y?;
        Some(AxisProjection::new(y).with_focus(self.focus.map(|focus| focus.y), factor))
    }

    pub(super) fn warp(&self, position: Pos2, factor: f32) -> Pos2 {
        match &self.layout {
            RegionLayout::Scale { .. } => {
                let x = self
                    .x_projection(factor)
                    .map_or(position.x, |projection| projection.warp(position.x));
                let y = self
                    .y_projection(factor)
                    .map_or(position.y, |projection| projection.warp(position.y));
                pos2(x, y)
            }
            RegionLayout::Grid(grid) => {
                let bounds = grid.center_span(self.rect.size());
                let x = AxisProjection::flat(bounds.left(), bounds.right())
                    .with_focus(self.focus.map(|focus| focus.x), factor);
                let y = AxisProjection::flat(bounds.top(), bounds.bottom())
                    .with_focus(self.focus.map(|focus| focus.y), factor);
                pos2(x.warp(position.x), y.warp(position.y))
            }
            RegionLayout::Empty | RegionLayout::List { .. } => position,
        }
    }
}
