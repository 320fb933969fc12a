mod error;
mod resolve;
mod variant;

pub use error::ConditionError;
pub use resolve::{ConditionOverrides, Cutoffs, StudyCondition, resolve_condition};
pub use variant::VariantKind;
