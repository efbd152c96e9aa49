// ABOUTME: Algorithm tests for the daily calorie and hydration target calculations
// ABOUTME: Covers BMR, activity factors, goal adjustments, rounding, clamping, and purity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Algorithm tests for the nutrition calculator
//!
//! Exercises the full calculation surface with known reference values:
//! - Mifflin-St Jeor BMR for both formula variants
//! - goal-adjusted daily calorie targets with round-to-50 behavior
//! - hydration targets with per-kg activity bonuses and hard clamping
//! - weekly weight change projections in all three directions
//! - purity/idempotence under randomized in-domain inputs

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_onboarding::config::nutrition::NutritionConfig;
use pierre_onboarding::intelligence::nutrition_calculator::{
    activity_multiplier, calculate_daily_calories, calculate_daily_water_ml,
    calculate_mifflin_st_jeor, calculate_nutrition_targets, estimate_weekly_weight_change,
    goal_adjustment_kcal,
};
use pierre_onboarding::models::{
    ActivityLevel, BiometricInput, Goal, Sex, WeightDirection,
};
use rand::Rng;

fn input(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    sex: Sex,
    activity_level: ActivityLevel,
    goal: Goal,
) -> BiometricInput {
    BiometricInput {
        weight_kg,
        height_cm,
        age_years,
        sex,
        activity_level,
        goal,
    }
}

// ============================================================================
// BMR - Mifflin-St Jeor
// ============================================================================

#[test]
fn test_bmr_male_reference_case() {
    let config = NutritionConfig::default();

    // 10*70 + 6.25*170 - 5*25 + 5 = 700 + 1062.5 - 125 + 5 = 1642.5
    let bmr = calculate_mifflin_st_jeor(70.0, 170.0, 25, Sex::Male, &config.bmr);
    assert!((bmr - 1642.5).abs() < 1e-9);
}

#[test]
fn test_bmr_female_reference_case() {
    let config = NutritionConfig::default();

    // 10*70 + 6.25*170 - 5*25 - 161 = 1476.5
    let bmr = calculate_mifflin_st_jeor(70.0, 170.0, 25, Sex::Female, &config.bmr);
    assert!((bmr - 1476.5).abs() < 1e-9);
}

#[test]
fn test_bmr_is_total_over_extreme_inputs() {
    let config = NutritionConfig::default();

    // Upper domain boundary must still produce a finite result
    let bmr = calculate_mifflin_st_jeor(300.0, 250.0, 120, Sex::Male, &config.bmr);
    assert!(bmr.is_finite());

    // Out-of-domain garbage is not rejected, just meaningless
    let garbage = calculate_mifflin_st_jeor(0.0, 0.0, 0, Sex::Female, &config.bmr);
    assert!(garbage.is_finite());
}

// ============================================================================
// Daily calorie target
// ============================================================================

#[test]
fn test_daily_calories_male_beginner_maintain() {
    let config = NutritionConfig::default();

    // BMR 1642.5 * 1.375 = 2258.44, +0, rounds down to 2250
    let kcal = calculate_daily_calories(
        &input(70.0, 170.0, 25, Sex::Male, ActivityLevel::Beginner, Goal::Maintain),
        &config,
    );
    assert_eq!(kcal, 2250);
}

#[test]
fn test_daily_calories_female_intermediate_weight_loss() {
    let config = NutritionConfig::default();

    // BMR 1476.5 * 1.55 = 2288.575, -500 = 1788.575, rounds up to 1800
    let kcal = calculate_daily_calories(
        &input(
            70.0,
            170.0,
            25,
            Sex::Female,
            ActivityLevel::Intermediate,
            Goal::WeightLoss,
        ),
        &config,
    );
    assert_eq!(kcal, 1800);
}

#[test]
fn test_daily_calories_muscle_gain_surplus() {
    let config = NutritionConfig::default();

    let maintain = calculate_daily_calories(
        &input(80.0, 180.0, 30, Sex::Male, ActivityLevel::Advanced, Goal::Maintain),
        &config,
    );
    let gain = calculate_daily_calories(
        &input(80.0, 180.0, 30, Sex::Male, ActivityLevel::Advanced, Goal::MuscleGain),
        &config,
    );
    assert_eq!(gain, maintain + 300);
}

#[test]
fn test_daily_calories_always_multiple_of_50() {
    let config = NutritionConfig::default();
    let mut rng = rand::thread_rng();

    for _ in 0..500 {
        let snapshot = random_input(&mut rng);
        let kcal = calculate_daily_calories(&snapshot, &config);
        assert_eq!(kcal % 50, 0, "not a multiple of 50 for {snapshot:?}");
    }
}

// ============================================================================
// Hydration target
// ============================================================================

#[test]
fn test_water_advanced_male_reference_case() {
    let config = NutritionConfig::default();

    // rate 35+10=45 ml/kg; 80*45=3600; already a multiple of 100, within clamp
    let ml = calculate_daily_water_ml(80.0, ActivityLevel::Advanced, Sex::Male, &config.hydration);
    assert_eq!(ml, 3600);
}

#[test]
fn test_water_floor_clamp() {
    let config = NutritionConfig::default();

    // 40*30=1200, below the floor, silently raised to 1500
    let ml = calculate_daily_water_ml(40.0, ActivityLevel::Beginner, Sex::Female, &config.hydration);
    assert_eq!(ml, 1500);
}

#[test]
fn test_water_ceiling_clamp() {
    let config = NutritionConfig::default();

    // 150*45=6750, above the ceiling, silently truncated to 5000
    let ml = calculate_daily_water_ml(150.0, ActivityLevel::Advanced, Sex::Male, &config.hydration);
    assert_eq!(ml, 5000);
}

#[test]
fn test_water_intermediate_bonus_applies_per_kg() {
    let config = NutritionConfig::default();

    // (30+5) ml/kg * 60 kg = 2100
    let ml =
        calculate_daily_water_ml(60.0, ActivityLevel::Intermediate, Sex::Female, &config.hydration);
    assert_eq!(ml, 2100);
}

#[test]
fn test_water_always_clamped_multiple_of_100() {
    let config = NutritionConfig::default();
    let mut rng = rand::thread_rng();

    for _ in 0..500 {
        let snapshot = random_input(&mut rng);
        let ml = calculate_daily_water_ml(
            snapshot.weight_kg,
            snapshot.activity_level,
            snapshot.sex,
            &config.hydration,
        );
        assert_eq!(ml % 100, 0);
        assert!((1500..=5000).contains(&ml));
    }
}

// ============================================================================
// Lookup tables
// ============================================================================

#[test]
fn test_activity_multipliers_are_monotonic() {
    let config = NutritionConfig::default();

    let beginner = activity_multiplier(ActivityLevel::Beginner, &config.activity_factors);
    let intermediate = activity_multiplier(ActivityLevel::Intermediate, &config.activity_factors);
    let advanced = activity_multiplier(ActivityLevel::Advanced, &config.activity_factors);

    assert!(beginner < intermediate && intermediate < advanced);
    assert!((beginner - 1.375).abs() < 1e-9);
}

#[test]
fn test_goal_adjustments_match_policy() {
    let config = NutritionConfig::default();

    assert!((goal_adjustment_kcal(Goal::WeightLoss, &config.goal_adjustments) + 500.0).abs() < 1e-9);
    assert!((goal_adjustment_kcal(Goal::MuscleGain, &config.goal_adjustments) - 300.0).abs() < 1e-9);
    assert!(goal_adjustment_kcal(Goal::Maintain, &config.goal_adjustments).abs() < 1e-9);
    assert!(goal_adjustment_kcal(Goal::ImproveHealth, &config.goal_adjustments).abs() < 1e-9);
}

// ============================================================================
// Weekly weight change projection
// ============================================================================

#[test]
fn test_weekly_change_loss_direction() {
    let config = NutritionConfig::default();

    // 500 kcal/day deficit: 500*7/7700 = 0.4545 kg/week
    let change = estimate_weekly_weight_change(2500.0, 2000.0, &config.weight_change);
    assert_eq!(change.direction, WeightDirection::Loss);
    assert!((change.weekly_change_kg - 500.0 * 7.0 / 7700.0).abs() < 1e-9);
}

#[test]
fn test_weekly_change_gain_direction() {
    let config = NutritionConfig::default();

    let change = estimate_weekly_weight_change(2200.0, 2500.0, &config.weight_change);
    assert_eq!(change.direction, WeightDirection::Gain);
}

#[test]
fn test_weekly_change_small_delta_is_maintain() {
    let config = NutritionConfig::default();

    // 50 kcal/day: 50*7/7700 = 0.045 kg/week, below the 0.1 threshold
    let change = estimate_weekly_weight_change(2000.0, 2050.0, &config.weight_change);
    assert_eq!(change.direction, WeightDirection::Maintain);
}

// ============================================================================
// Purity / combined entry point
// ============================================================================

#[test]
fn test_targets_idempotent_under_random_inputs() {
    let config = NutritionConfig::default();
    let mut rng = rand::thread_rng();

    for _ in 0..500 {
        let snapshot = random_input(&mut rng);
        assert!(snapshot.validate().is_ok());

        let first = calculate_nutrition_targets(&snapshot, &config);
        let second = calculate_nutrition_targets(&snapshot, &config);
        assert_eq!(first, second, "calculator must be pure for {snapshot:?}");
    }
}

#[test]
fn test_combined_targets_match_individual_operations() {
    let config = NutritionConfig::default();
    let snapshot = input(
        70.0,
        170.0,
        25,
        Sex::Male,
        ActivityLevel::Beginner,
        Goal::Maintain,
    );

    let targets = calculate_nutrition_targets(&snapshot, &config);
    assert_eq!(targets.daily_calories, 2250);
    assert_eq!(
        targets.daily_water_ml,
        calculate_daily_water_ml(70.0, ActivityLevel::Beginner, Sex::Male, &config.hydration)
    );
}

fn random_input(rng: &mut impl Rng) -> BiometricInput {
    let sex = if rng.gen_bool(0.5) { Sex::Male } else { Sex::Female };
    let activity_level = match rng.gen_range(0..3) {
        0 => ActivityLevel::Beginner,
        1 => ActivityLevel::Intermediate,
        _ => ActivityLevel::Advanced,
    };
    let goal = match rng.gen_range(0..4) {
        0 => Goal::WeightLoss,
        1 => Goal::MuscleGain,
        2 => Goal::Maintain,
        _ => Goal::ImproveHealth,
    };
    input(
        rng.gen_range(30.0..=300.0),
        rng.gen_range(100.0..=250.0),
        rng.gen_range(10..=120),
        sex,
        activity_level,
        goal,
    )
}
