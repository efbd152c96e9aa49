// ABOUTME: Nutrition configuration for daily calorie and hydration recommendations
// ABOUTME: Configures BMR coefficients, activity factors, goal adjustments, and hydration rates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Recommendation Configuration
//!
//! Tunable coefficients for the daily calorie and hydration target
//! calculations. Every formula constant the calculator uses lives here so
//! that policy changes (deficit size, activity factors, clamp bounds) never
//! touch call sites.
//!
//! # Scientific References
//!
//! - BMR: Mifflin, M.D., et al. (1990). A new predictive equation for resting
//!   energy expenditure. *American Journal of Clinical Nutrition*, 51(2),
//!   241-247. DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010).
//!   Exercise Physiology
//! - Energy density of body fat (~7700 kcal/kg): Hall, K.D. (2008).
//!   What is the required energy deficit per unit weight loss?
//!   DOI: 10.1038/sj.ijo.0803720

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Complete nutrition recommendation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Basal Metabolic Rate (BMR) formula coefficients
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE calculation
    pub activity_factors: ActivityFactorsConfig,
    /// Goal-driven calorie adjustments
    pub goal_adjustments: GoalAdjustmentConfig,
    /// Hydration target rates and clamp bounds
    pub hydration: HydrationConfig,
    /// Weekly weight change projection constants
    pub weight_change: WeightChangeConfig,
}

impl NutritionConfig {
    /// Validate the full configuration tree
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ConfigError` describing the first inconsistent
    /// section encountered.
    pub fn validate(&self) -> AppResult<()> {
        self.activity_factors.validate()?;
        self.hydration.validate()?;
        self.weight_change.validate()
    }
}

/// BMR (Basal Metabolic Rate) formula coefficients
///
/// Reference: Mifflin, M.D., et al. (1990). DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
        }
    }
}

/// Activity factor multipliers for TDEE calculation
///
/// The three-level expertise scale maps onto the classic `McArdle` factors
/// for lightly/moderately/very active populations. There is no entry for an
/// unknown level: the activity parameter is mandatory at the type level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Beginner (little structured exercise): 1.375
    pub beginner: f64,
    /// Intermediate (3-5 days/week): 1.55
    pub intermediate: f64,
    /// Advanced (6-7 days/week): 1.725
    pub advanced: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            beginner: 1.375,
            intermediate: 1.55,
            advanced: 1.725,
        }
    }
}

impl ActivityFactorsConfig {
    /// Validate that factors are positive and strictly increasing
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ConfigError` if any factor is non-positive or the
    /// ordinal monotonicity (beginner < intermediate < advanced) is broken.
    pub fn validate(&self) -> AppResult<()> {
        if self.beginner <= 0.0 {
            return Err(AppError::config("activity factor 'beginner' must be positive"));
        }
        if self.beginner >= self.intermediate || self.intermediate >= self.advanced {
            return Err(AppError::config(
                "activity factors must be strictly increasing (beginner < intermediate < advanced)",
            ));
        }
        Ok(())
    }
}

/// Goal-driven daily calorie adjustments (kcal/day)
///
/// Adjustments are fixed offsets, not proportional to body mass or a
/// rate-of-change target. Weight-loss deficit and muscle-gain surplus sizes
/// are product policy; both are tunable here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalAdjustmentConfig {
    /// Weight loss deficit: -500 kcal/day
    pub weight_loss_kcal: f64,
    /// Muscle gain surplus: +300 kcal/day
    pub muscle_gain_kcal: f64,
    /// Maintenance: no adjustment
    pub maintain_kcal: f64,
    /// General health: no adjustment
    pub improve_health_kcal: f64,
}

impl Default for GoalAdjustmentConfig {
    fn default() -> Self {
        Self {
            weight_loss_kcal: -500.0,
            muscle_gain_kcal: 300.0,
            maintain_kcal: 0.0,
            improve_health_kcal: 0.0,
        }
    }
}

/// Hydration target configuration
///
/// The per-kg base rate depends on sex; the activity bonus is added to the
/// per-kg rate (not to the total). Results are clamped to a safe daily
/// range after rounding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydrationConfig {
    /// Base rate for males: 35 ml/kg
    pub male_ml_per_kg: f64,
    /// Base rate for females: 30 ml/kg
    pub female_ml_per_kg: f64,
    /// Per-kg bonus for intermediate activity: +5 ml/kg
    pub intermediate_bonus_ml_per_kg: f64,
    /// Per-kg bonus for advanced activity: +10 ml/kg
    pub advanced_bonus_ml_per_kg: f64,
    /// Hard floor for the daily target: 1500 ml
    pub clamp_min_ml: f64,
    /// Hard ceiling for the daily target: 5000 ml
    pub clamp_max_ml: f64,
}

impl Default for HydrationConfig {
    fn default() -> Self {
        Self {
            male_ml_per_kg: 35.0,
            female_ml_per_kg: 30.0,
            intermediate_bonus_ml_per_kg: 5.0,
            advanced_bonus_ml_per_kg: 10.0,
            clamp_min_ml: 1500.0,
            clamp_max_ml: 5000.0,
        }
    }
}

impl HydrationConfig {
    /// Validate rates and clamp bounds
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ConfigError` if a base rate is non-positive or the
    /// clamp interval is empty.
    pub fn validate(&self) -> AppResult<()> {
        if self.male_ml_per_kg <= 0.0 || self.female_ml_per_kg <= 0.0 {
            return Err(AppError::config("hydration base rates must be positive"));
        }
        if self.clamp_min_ml >= self.clamp_max_ml {
            return Err(AppError::config(
                "hydration clamp_min_ml must be below clamp_max_ml",
            ));
        }
        Ok(())
    }
}

/// Weekly weight change projection constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightChangeConfig {
    /// Energy density of body fat: ~7700 kcal per kg
    pub kcal_per_kg: f64,
    /// Projected changes below this magnitude count as maintenance (kg/week)
    pub maintain_threshold_kg: f64,
}

impl Default for WeightChangeConfig {
    fn default() -> Self {
        Self {
            kcal_per_kg: 7700.0,
            maintain_threshold_kg: 0.1,
        }
    }
}

impl WeightChangeConfig {
    /// Validate the projection constants
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ConfigError` if the energy density is non-positive
    /// or the maintain threshold is negative.
    pub fn validate(&self) -> AppResult<()> {
        if self.kcal_per_kg <= 0.0 {
            return Err(AppError::config("kcal_per_kg must be positive"));
        }
        if self.maintain_threshold_kg < 0.0 {
            return Err(AppError::config("maintain_threshold_kg must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(NutritionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_activity_factors_match_policy() {
        let factors = ActivityFactorsConfig::default();
        assert!((factors.beginner - 1.375).abs() < f64::EPSILON);
        assert!((factors.intermediate - 1.55).abs() < f64::EPSILON);
        assert!((factors.advanced - 1.725).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_monotonic_activity_factors_rejected() {
        let factors = ActivityFactorsConfig {
            beginner: 1.6,
            intermediate: 1.55,
            advanced: 1.725,
        };
        assert!(factors.validate().is_err());
    }

    #[test]
    fn test_empty_hydration_clamp_interval_rejected() {
        let hydration = HydrationConfig {
            clamp_min_ml: 5000.0,
            clamp_max_ml: 1500.0,
            ..HydrationConfig::default()
        };
        assert!(hydration.validate().is_err());
    }
}
