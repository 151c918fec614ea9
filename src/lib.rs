// Library interface for the kcalrs planning engine
// Allows integration tests and the CLI to access the core modules

pub mod bmr;
pub mod config;
pub mod gain;
pub mod logging;
pub mod loss;
pub mod maintain;
pub mod maintenance;
pub mod models;
pub mod nutrients;
pub mod pace;
pub mod planner;
pub mod safety;
pub mod units;

// Re-export commonly used types for convenience
pub use models::*;
pub use bmr::BmrEstimator;
pub use maintenance::MaintenanceCalculator;
pub use safety::{
    SafetyClassifier, SafetyVerdict, EXTREME_EDGE_CASE_THRESHOLD, HARD_FLOOR, HARD_HARD_STOP,
    SOFT_FLOOR_FEMALE, SOFT_FLOOR_MALE,
};
pub use loss::{DeficitPlanSet, WeightLossPlanner};
pub use maintain::MaintainPlanner;
pub use gain::GainPlanner;
pub use pace::{PaceCalculator, PaceProjection};
pub use nutrients::{NutrientAdvisor, NutrientTarget, NutrientTargets};
pub use planner::{PlanSuggester, PlanSuggestion};
pub use config::AppConfig;
pub use logging::{LogConfig, LogFormat, LogLevel};
