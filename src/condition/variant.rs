use std::fmt;
use std::str::FromStr;

use super::ConditionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariantKind {
    CoupledContinuous,
    DecoupledContinuous,
    SelfContinuous,
    CoupledDiscrete,
    DecoupledDiscrete,
    SelfDiscrete,
    Baseline,
}

impl VariantKind {
    pub const ALL: [Self; 7] = [
        Self::CoupledContinuous,
        Self::DecoupledContinuous,
        Self::SelfContinuous,
        Self::CoupledDiscrete,
        Self::DecoupledDiscrete,
        Self::SelfDiscrete,
        Self::Baseline,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            Self::CoupledContinuous => "coupled-continuous",
            Self::DecoupledContinuous => "decoupled-continuous",
            Self::SelfContinuous => "self-continuous",
            Self::CoupledDiscrete => "coupled-discrete",
            Self::DecoupledDiscrete => "decoupled-discrete",
            Self::SelfDiscrete => "self-discrete",
            Self::Baseline => "baseline",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CoupledContinuous => "Coupled (continuous)",
            Self::DecoupledContinuous => "Decoupled (continuous)",
            Self::SelfContinuous => "Self only (continuous)",
            Self::CoupledDiscrete => "Coupled (discrete)",
            Self::DecoupledDiscrete => "Decoupled (discrete)",
            Self::SelfDiscrete => "Self only (discrete)",
            Self::Baseline => "Baseline list",
        }
    }

    pub fn is_discrete(self) -> bool {
        matches!(
            self,
            Self::CoupledDiscrete | Self::DecoupledDiscrete | Self::SelfDiscrete
        )
    }

    pub(super) fn selector_list() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.selector())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

impl FromStr for VariantKind {
    type Err = ConditionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value
            .trim()
            .to_ascii_lowercase()
            .replace(['_', ' '], "-");

        Self::ALL
            .into_iter()
            .find(|kind| kind.selector() == normalized)
            .ok_or_else(|| ConditionError::UnknownLayout(value.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_parse_loosely() {
        assert_eq!(
            "Decoupled_Continuous".parse::<VariantKind>().unwrap(),
            VariantKind::DecoupledContinuous
        );
        assert_eq!(
            " self discrete ".parse::<VariantKind>().unwrap(),
            VariantKind::SelfDiscrete
        );
        for kind in VariantKind::ALL {
            assert_eq!(kind.selector().parse::<VariantKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_selector_is_an_error() {
        let error = "scatter".parse::<VariantKind>().unwrap_err();
        assert!(matches!(error, ConditionError::UnknownLayout(ref mode) if mode == "scatter"));
        assert!(error.to_string().contains("coupled-continuous"));
    }
}
