pub mod catalog;
pub mod engine;
pub mod recommendations;
pub mod sale_percentage;

pub use catalog::{
    default_scenarios, validate_catalog, DefaultCatalog, ScenarioCatalogProvider,
    ScenarioDefinition, ScenarioKind, ScenarioMultipliers, TunedCatalog,
};
pub use engine::{calculate_scenario_results, CompanyValuationInput, ScenarioResult};
pub use recommendations::{generate_recommendations, generate_recommendations_with};
pub use sale_percentage::calculate_optimal_sale_percentage;
