use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{ConditionError, VariantKind};

pub const DEFAULT_LIKE_CUTOFF: f32 = 3.0;
pub const DEFAULT_DISLIKE_CUTOFF: f32 = 3.0;

/// Score thresholds for the discrete variants. A score is "like" when it is
/// at least `like` and "dislike" when it is below `dislike`; anything in
/// between belongs to neither band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cutoffs {
    pub like: f32,
    pub dislike: f32,
}

impl Default for Cutoffs {
    fn default() -> Self {
        Self {
            like: DEFAULT_LIKE_CUTOFF,
            dislike: DEFAULT_DISLIKE_CUTOFF,
        }
    }
}

impl Cutoffs {
    pub fn validated(like: f32, dislike: f32) -> Result<Self, ConditionError> {
        if !like.is_finite() || !dislike.is_finite() {
            return Err(ConditionError::NonFiniteCutoff { like, dislike });
        }
        if dislike > like {
            return Err(ConditionError::InvertedCutoffs { like, dislike });
        }
        Ok(Self { like, dislike })
    }

    pub fn is_like(self, score: f32) -> bool {
        score >= self.like
    }

    pub fn is_dislike(self, score: f32) -> bool {
        score < self.dislike
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StudyCondition {
    pub variant: VariantKind,
    pub cutoffs: Cutoffs,
    pub fisheye: bool,
    pub show_community: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ConditionOverrides {
    pub layout: Option<String>,
    pub like_cutoff: Option<f32>,
    pub dislike_cutoff: Option<f32>,
    pub fisheye: bool,
    pub hide_community: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCondition {
    #[serde(default, alias = "layoutMode", alias = "condition")]
    layout: Option<String>,
    #[serde(default)]
    like_cutoff: Option<f32>,
    #[serde(default)]
    dislike_cutoff: Option<f32>,
    #[serde(default)]
    is_fisheye: Option<bool>,
    #[serde(default)]
    show_community: Option<bool>,
}

pub fn resolve_condition(
    file: Option<&Path>,
    overrides: &ConditionOverrides,
) -> Result<StudyCondition, ConditionError> {
    let raw = match file {
        Some(path) => read_condition_file(path)?,
        None => RawCondition::default(),
    };

    let layout = overrides
        .layout
        .as_deref()
        .or(raw.layout.as_deref())
        .ok_or(ConditionError::MissingLayout)?;
    let variant = layout.parse::<VariantKind>()?;

    let cutoffs = Cutoffs::validated(
        overrides
            .like_cutoff
            .or(raw.like_cutoff)
            .unwrap_or(DEFAULT_LIKE_CUTOFF),
        overrides
            .dislike_cutoff
            .or(raw.dislike_cutoff)
            .unwrap_or(DEFAULT_DISLIKE_CUTOFF),
    )?;

    let condition = StudyCondition {
        variant,
        cutoffs,
        fisheye: overrides.fisheye || raw.is_fisheye.unwrap_or(false),
        show_community: !overrides.hide_community && raw.show_community.unwrap_or(true),
    };

    tracing::info!(
        variant = %condition.variant,
        like = condition.cutoffs.like,
        dislike = condition.cutoffs.dislike,
        fisheye = condition.fisheye,
        show_community = condition.show_community,
        "resolved study condition"
    );

    Ok(condition)
}

fn read_condition_file(path: &Path) -> Result<RawCondition, ConditionError> {
    let raw = fs::read_to_string(path).map_err(|source| ConditionError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| ConditionError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
