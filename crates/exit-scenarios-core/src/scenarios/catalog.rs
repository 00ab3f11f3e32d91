use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ExitScenariosError;
use crate::types::Multiple;
use crate::ExitScenariosResult;

/// Valuation preset family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Conservative,
    Base,
    Optimistic,
    Custom,
}

impl ScenarioKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::Conservative => "conservative",
            ScenarioKind::Base => "base",
            ScenarioKind::Optimistic => "optimistic",
            ScenarioKind::Custom => "custom",
        }
    }
}

/// A named valuation adjustment applied to the base valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    pub id: String,
    pub name: String,
    pub kind: ScenarioKind,
    /// Factor applied to the base valuation (>= 0)
    pub multiplier: Multiple,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color_token: String,
}

/// Multipliers an administrator may tune without redefining the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioMultipliers {
    pub conservative: Multiple,
    pub base: Multiple,
    pub optimistic: Multiple,
}

impl Default for ScenarioMultipliers {
    fn default() -> Self {
        ScenarioMultipliers {
            conservative: dec!(0.85),
            base: dec!(1.0),
            optimistic: dec!(1.15),
        }
    }
}

/// Source of the scenario list fed to the engine.
pub trait ScenarioCatalogProvider {
    /// A fresh, independently owned catalog.
    fn scenarios(&self) -> Vec<ScenarioDefinition>;
}

/// The stock conservative / base / optimistic / custom catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCatalog;

impl ScenarioCatalogProvider for DefaultCatalog {
    fn scenarios(&self) -> Vec<ScenarioDefinition> {
        default_scenarios()
    }
}

/// Default layout with administrator-tuned multipliers.
#[derive(Debug, Clone, Default)]
pub struct TunedCatalog {
    multipliers: ScenarioMultipliers,
}

impl TunedCatalog {
    pub fn new(multipliers: ScenarioMultipliers) -> ExitScenariosResult<Self> {
        let catalog = TunedCatalog { multipliers };
        validate_catalog(&catalog.scenarios())?;
        Ok(catalog)
    }
}

impl ScenarioCatalogProvider for TunedCatalog {
    fn scenarios(&self) -> Vec<ScenarioDefinition> {
        build_catalog(&self.multipliers)
    }
}

/// Default catalog: conservative x0.85, base x1.0, optimistic x1.15 and a
/// custom placeholder at x1.0.
pub fn default_scenarios() -> Vec<ScenarioDefinition> {
    build_catalog(&ScenarioMultipliers::default())
}

fn build_catalog(m: &ScenarioMultipliers) -> Vec<ScenarioDefinition> {
    vec![
        ScenarioDefinition {
            id: "conservative".into(),
            name: "Conservative".into(),
            kind: ScenarioKind::Conservative,
            multiplier: m.conservative,
            description: "Cautious valuation reflecting market headwinds and buyer discounts"
                .into(),
            color_token: "amber".into(),
        },
        ScenarioDefinition {
            id: "base".into(),
            name: "Base".into(),
            kind: ScenarioKind::Base,
            multiplier: m.base,
            description: "Current reference valuation".into(),
            color_token: "blue".into(),
        },
        ScenarioDefinition {
            id: "optimistic".into(),
            name: "Optimistic".into(),
            kind: ScenarioKind::Optimistic,
            multiplier: m.optimistic,
            description: "Competitive process with strategic buyer premium".into(),
            color_token: "green".into(),
        },
        ScenarioDefinition {
            id: "custom".into(),
            name: "Custom".into(),
            kind: ScenarioKind::Custom,
            multiplier: Decimal::ONE,
            description: "User-supplied valuation".into(),
            color_token: "purple".into(),
        },
    ]
}

/// Check that a catalog has non-negative multipliers, unique ids and at most
/// one entry per kind.
pub fn validate_catalog(scenarios: &[ScenarioDefinition]) -> ExitScenariosResult<()> {
    let mut ids = HashSet::new();
    let mut kinds = HashSet::new();
    for s in scenarios {
        if s.multiplier < Decimal::ZERO {
            return Err(ExitScenariosError::InvalidInput {
                field: format!("scenario:{} multiplier", s.id),
                reason: "Multiplier cannot be negative".into(),
            });
        }
        if !ids.insert(s.id.as_str()) {
            return Err(ExitScenariosError::InvalidInput {
                field: format!("scenario:{} id", s.id),
                reason: "Scenario ids must be unique".into(),
            });
        }
        if !kinds.insert(s.kind) {
            return Err(ExitScenariosError::InvalidInput {
                field: format!("scenario:{} kind", s.id),
                reason: format!("Only one '{}' scenario is allowed", s.kind.as_str()),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_order_and_multipliers() {
        let catalog = default_scenarios();
        let kinds: Vec<ScenarioKind> = catalog.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ScenarioKind::Conservative,
                ScenarioKind::Base,
                ScenarioKind::Optimistic,
                ScenarioKind::Custom
            ]
        );
        assert_eq!(catalog[0].multiplier, dec!(0.85));
        assert_eq!(catalog[1].multiplier, Decimal::ONE);
        assert_eq!(catalog[2].multiplier, dec!(1.15));
        assert_eq!(catalog[3].multiplier, Decimal::ONE);
    }

    #[test]
    fn test_default_catalog_is_valid() {
        assert!(validate_catalog(&default_scenarios()).is_ok());
    }

    #[test]
    fn test_each_call_returns_independent_copy() {
        let mut first = DefaultCatalog.scenarios();
        first[0].multiplier = dec!(0.10);
        let second = DefaultCatalog.scenarios();
        assert_eq!(second[0].multiplier, dec!(0.85));
    }

    #[test]
    fn test_tuned_catalog_applies_multipliers() {
        let tuned = TunedCatalog::new(ScenarioMultipliers {
            conservative: dec!(0.70),
            base: dec!(1.0),
            optimistic: dec!(1.40),
        })
        .unwrap();
        let catalog = tuned.scenarios();
        assert_eq!(catalog[0].multiplier, dec!(0.70));
        assert_eq!(catalog[2].multiplier, dec!(1.40));
        assert_eq!(catalog[3].kind, ScenarioKind::Custom);
    }

    #[test]
    fn test_tuned_catalog_rejects_negative_multiplier() {
        let result = TunedCatalog::new(ScenarioMultipliers {
            conservative: dec!(-0.5),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_kind_rejected() {
        let mut catalog = default_scenarios();
        catalog[3].kind = ScenarioKind::Base;
        assert!(validate_catalog(&catalog).is_err());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut catalog = default_scenarios();
        catalog[2].id = "base".into();
        assert!(validate_catalog(&catalog).is_err());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ScenarioKind::Optimistic).unwrap();
        assert_eq!(json, "\"optimistic\"");
    }
}
