use serde::{Deserialize, Serialize};

use crate::format::NumberFormat;
use crate::scenarios::{ScenarioMultipliers, TunedCatalog};
use crate::tax::{SavingsTaxCalculator, SavingsTaxConfig};
use crate::ExitScenariosResult;

/// Serialisation used by a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from a file name; anything not ending in `.json` is
    /// read as YAML.
    pub fn from_path(path: &str) -> Self {
        if path.to_ascii_lowercase().ends_with(".json") {
            ConfigFormat::Json
        } else {
            ConfigFormat::Yaml
        }
    }
}

/// Tunables for a deployment of the engine. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub multipliers: ScenarioMultipliers,
    pub tax: SavingsTaxConfig,
    pub number_format: NumberFormat,
}

impl EngineConfig {
    pub fn parse(contents: &str, format: ConfigFormat) -> ExitScenariosResult<Self> {
        let config: EngineConfig = match format {
            ConfigFormat::Json => serde_json::from_str(contents)?,
            ConfigFormat::Yaml => serde_yaml::from_str(contents)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ExitScenariosResult<()> {
        self.tax.validate()?;
        self.number_format.validate()?;
        TunedCatalog::new(self.multipliers.clone())?;
        Ok(())
    }

    pub fn catalog(&self) -> ExitScenariosResult<TunedCatalog> {
        TunedCatalog::new(self.multipliers.clone())
    }

    pub fn tax_calculator(&self) -> ExitScenariosResult<SavingsTaxCalculator> {
        SavingsTaxCalculator::new(self.tax.clone())
    }
}
