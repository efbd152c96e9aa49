// ABOUTME: Nutrition calculation algorithms for daily calorie and hydration targets
// ABOUTME: BMR via Mifflin-St Jeor, TDEE activity factors, goal adjustments, water rates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Calculator Module
//!
//! Pure, deterministic derivation of a user's daily calorie and hydration
//! targets from a biometric snapshot. All operations are total functions over
//! their numeric domains: none of them validate ranges or return errors.
//! Garbage in produces a mathematically valid but meaningless result -
//! range validation is the caller's responsibility and happens upstream
//! (see [`BiometricInput::validate`]).
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting
//!   energy expenditure. *American Journal of Clinical Nutrition*, 51(2),
//!   241-247. <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology:
//!   Nutrition, Energy, and Human Performance (activity factors)
//!
//! - Hall, K.D. (2008). What is the required energy deficit per unit weight
//!   loss? *International Journal of Obesity*, 32, 573-576.
//!   <https://doi.org/10.1038/sj.ijo.0803720> (7700 kcal/kg approximation)

use crate::config::nutrition::{
    ActivityFactorsConfig, BmrConfig, GoalAdjustmentConfig, HydrationConfig, NutritionConfig,
    WeightChangeConfig,
};
use crate::constants::rounding;
use crate::models::{
    ActivityLevel, BiometricInput, Goal, NutritionTargets, Sex, WeeklyWeightChange, WeightDirection,
};

/// Round a positive value to the nearest multiple of `step`, half-up
///
/// Standard rounding, not floor/ceil: 2258.44 kcal with a 50 kcal step
/// becomes 2250, 2275.0 becomes 2300.
fn round_to_step(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + constant
/// - Male: +5
/// - Female: -161
///
/// Coefficients are read from [`BmrConfig`] so the formula table can be tuned
/// (or extended with further variants) without touching call sites.
///
/// No error conditions: the caller guarantees numeric inputs. Negative or
/// zero inputs produce a mathematically valid but meaningless result.
///
/// # Reference
/// Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
#[must_use]
pub fn calculate_mifflin_st_jeor(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    sex: Sex,
    config: &BmrConfig,
) -> f64 {
    let weight_component = config.msj_weight_coef * weight_kg;
    let height_component = config.msj_height_coef * height_cm;
    let age_component = config.msj_age_coef * f64::from(age_years);

    let sex_constant = match sex {
        Sex::Male => config.msj_male_constant,
        Sex::Female => config.msj_female_constant,
    };

    weight_component + height_component + age_component + sex_constant
}

/// Look up the TDEE activity multiplier for an expertise level
///
/// Fixed table: beginner 1.375, intermediate 1.55, advanced 1.725 (defaults).
/// The level parameter is mandatory - there is no permissive fallback for
/// missing data, so a caller that has not collected the expertise step cannot
/// reach this function with an implicit beginner.
#[must_use]
pub fn activity_multiplier(activity_level: ActivityLevel, config: &ActivityFactorsConfig) -> f64 {
    match activity_level {
        ActivityLevel::Beginner => config.beginner,
        ActivityLevel::Intermediate => config.intermediate,
        ActivityLevel::Advanced => config.advanced,
    }
}

/// Look up the goal-driven daily calorie adjustment (kcal/day)
///
/// Fixed offsets, deliberately not proportional to body mass or a
/// rate-of-change target: weight loss -500, muscle gain +300, maintain and
/// improve-health 0 (defaults).
#[must_use]
pub fn goal_adjustment_kcal(goal: Goal, config: &GoalAdjustmentConfig) -> f64 {
    match goal {
        Goal::WeightLoss => config.weight_loss_kcal,
        Goal::MuscleGain => config.muscle_gain_kcal,
        Goal::Maintain => config.maintain_kcal,
        Goal::ImproveHealth => config.improve_health_kcal,
    }
}

/// Calculate the goal-adjusted daily calorie target (kcal/day)
///
/// Composition: `round_to_nearest_50(BMR x activity_factor + goal_adjustment)`.
/// Always returns a value; extreme inputs may produce a non-physiological
/// number - callers validate ranges upstream.
#[must_use]
pub fn calculate_daily_calories(input: &BiometricInput, config: &NutritionConfig) -> u32 {
    let bmr = calculate_mifflin_st_jeor(
        input.weight_kg,
        input.height_cm,
        input.age_years,
        input.sex,
        &config.bmr,
    );
    let tdee = bmr * activity_multiplier(input.activity_level, &config.activity_factors);
    let adjusted = tdee + goal_adjustment_kcal(input.goal, &config.goal_adjustments);

    round_to_step(adjusted, rounding::CALORIE_STEP_KCAL) as u32
}

/// Calculate the daily hydration target (ml/day)
///
/// Base per-kg rate is 35 ml/kg (male) or 30 ml/kg (female); the activity
/// bonus is added to the per-kg rate, not the total: +5 ml/kg intermediate,
/// +10 ml/kg advanced. The result is rounded to the nearest 100 ml and then
/// clamped to the closed interval [1500, 5000] ml - values outside the range
/// are silently truncated to the boundary, not rejected.
#[must_use]
pub fn calculate_daily_water_ml(
    weight_kg: f64,
    activity_level: ActivityLevel,
    sex: Sex,
    config: &HydrationConfig,
) -> u32 {
    let base_rate = match sex {
        Sex::Male => config.male_ml_per_kg,
        Sex::Female => config.female_ml_per_kg,
    };
    let bonus = match activity_level {
        ActivityLevel::Beginner => 0.0,
        ActivityLevel::Intermediate => config.intermediate_bonus_ml_per_kg,
        ActivityLevel::Advanced => config.advanced_bonus_ml_per_kg,
    };

    let raw = weight_kg * (base_rate + bonus);
    let rounded = round_to_step(raw, rounding::WATER_STEP_ML);

    rounded.clamp(config.clamp_min_ml, config.clamp_max_ml) as u32
}

/// Estimate the weekly weight change implied by a calorie target
///
/// `weekly_change_kg = |current - target| x 7 / 7700` (7700 kcal per kg of
/// fat-equivalent, a widely used approximation). Direction is `Maintain`
/// when the projected change is below the configured threshold (0.1 kg/week
/// by default), otherwise `Loss` when the target is below current intake and
/// `Gain` when above. Purely informational; no persistence.
#[must_use]
pub fn estimate_weekly_weight_change(
    current_daily_calories: f64,
    target_daily_calories: f64,
    config: &WeightChangeConfig,
) -> WeeklyWeightChange {
    let weekly_change_kg =
        (current_daily_calories - target_daily_calories).abs() * 7.0 / config.kcal_per_kg;

    let direction = if weekly_change_kg < config.maintain_threshold_kg {
        WeightDirection::Maintain
    } else if target_daily_calories < current_daily_calories {
        WeightDirection::Loss
    } else {
        WeightDirection::Gain
    };

    WeeklyWeightChange {
        weekly_change_kg,
        direction,
    }
}

/// Calculate both daily targets from a complete biometric snapshot
///
/// Main entry point combining [`calculate_daily_calories`] and
/// [`calculate_daily_water_ml`], mirroring how the onboarding flow consumes
/// the calculator in auto mode.
#[must_use]
pub fn calculate_nutrition_targets(
    input: &BiometricInput,
    config: &NutritionConfig,
) -> NutritionTargets {
    NutritionTargets {
        daily_calories: calculate_daily_calories(input, config),
        daily_water_ml: calculate_daily_water_ml(
            input.weight_kg,
            input.activity_level,
            input.sex,
            &config.hydration,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_step_half_up() {
        assert!((round_to_step(2275.0, 50.0) - 2300.0).abs() < f64::EPSILON);
        assert!((round_to_step(2274.9, 50.0) - 2250.0).abs() < f64::EPSILON);
        assert!((round_to_step(1250.0, 100.0) - 1300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_activity_multiplier_table() {
        let config = ActivityFactorsConfig::default();
        assert!((activity_multiplier(ActivityLevel::Beginner, &config) - 1.375).abs() < 1e-9);
        assert!((activity_multiplier(ActivityLevel::Intermediate, &config) - 1.55).abs() < 1e-9);
        assert!((activity_multiplier(ActivityLevel::Advanced, &config) - 1.725).abs() < 1e-9);
    }

    #[test]
    fn test_goal_adjustment_table() {
        let config = GoalAdjustmentConfig::default();
        assert!((goal_adjustment_kcal(Goal::WeightLoss, &config) - (-500.0)).abs() < 1e-9);
        assert!((goal_adjustment_kcal(Goal::MuscleGain, &config) - 300.0).abs() < 1e-9);
        assert!(goal_adjustment_kcal(Goal::Maintain, &config).abs() < 1e-9);
        assert!(goal_adjustment_kcal(Goal::ImproveHealth, &config).abs() < 1e-9);
    }
}
