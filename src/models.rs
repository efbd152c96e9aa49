// ABOUTME: Common data models for biometrics, nutrition targets, and onboarding profiles
// ABOUTME: Defines the enums and records shared by the calculator and the aggregator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Domain types shared by the nutrition calculator and the onboarding
//! aggregator. The calculator consumes an immutable [`BiometricInput`]
//! snapshot and produces [`NutritionTargets`]; the aggregator accumulates
//! fields step by step and emits a finalized [`OnboardingRecord`] at the
//! terminal submission.

use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Sex for BMR and hydration calculations
///
/// The Mifflin-St Jeor equation defines two formula variants. Formula
/// selection lives behind coefficient lookups in
/// [`crate::config::nutrition::BmrConfig`] so additional categories can be
/// added without touching call sites.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male formula variant (+5 kcal constant, 35 ml/kg hydration base)
    Male,
    /// Female formula variant (-161 kcal constant, 30 ml/kg hydration base)
    Female,
}

/// Self-reported training expertise, used as the TDEE activity level
///
/// Ordinal: each level maps to a monotonically increasing activity
/// multiplier. The parameter is mandatory everywhere it appears - there is
/// deliberately no default level, so absent data surfaces as an error at the
/// aggregator instead of masquerading as a beginner selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little structured exercise (factor 1.375)
    Beginner,
    /// Regular training, 3-5 days/week (factor 1.55)
    Intermediate,
    /// Hard training, 6-7 days/week (factor 1.725)
    Advanced,
}

/// Training goal driving the calorie target adjustment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Caloric deficit (-500 kcal/day default)
    WeightLoss,
    /// Caloric surplus (+300 kcal/day default)
    MuscleGain,
    /// Caloric balance (no adjustment)
    Maintain,
    /// General health focus (no adjustment)
    ImproveHealth,
}

/// Read-only biometric snapshot consumed by the calculator
///
/// The calculator never receives partial input; gating on completeness is
/// the caller's responsibility (see
/// [`crate::onboarding::OnboardingAggregator::biometrics`]). The calculator
/// itself performs no range validation - callers run [`Self::validate`]
/// before invocation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BiometricInput {
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in years
    pub age_years: u32,
    /// Sex for formula selection
    pub sex: Sex,
    /// Activity level for the TDEE multiplier
    pub activity_level: ActivityLevel,
    /// Training goal for the calorie adjustment
    pub goal: Goal,
}

impl BiometricInput {
    /// Validate all scalar fields against their supported domains
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ValueOutOfRange` naming the offending field when
    /// weight is outside 30-300 kg, height outside 100-250 cm, or age
    /// outside 10-120 years.
    pub fn validate(&self) -> AppResult<()> {
        if !(limits::WEIGHT_MIN_KG..=limits::WEIGHT_MAX_KG).contains(&self.weight_kg) {
            return Err(AppError::value_out_of_range(
                "weight_kg",
                limits::WEIGHT_MIN_KG,
                limits::WEIGHT_MAX_KG,
            ));
        }
        if !(limits::HEIGHT_MIN_CM..=limits::HEIGHT_MAX_CM).contains(&self.height_cm) {
            return Err(AppError::value_out_of_range(
                "height_cm",
                limits::HEIGHT_MIN_CM,
                limits::HEIGHT_MAX_CM,
            ));
        }
        if !(limits::AGE_MIN_YEARS..=limits::AGE_MAX_YEARS).contains(&self.age_years) {
            return Err(AppError::value_out_of_range(
                "age_years",
                f64::from(limits::AGE_MIN_YEARS),
                f64::from(limits::AGE_MAX_YEARS),
            ));
        }
        Ok(())
    }
}

/// Calculator output: both daily targets as an immutable value object
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NutritionTargets {
    /// Daily calorie target (kcal, multiple of 50)
    pub daily_calories: u32,
    /// Daily water target (ml, multiple of 100, clamped to 1500-5000)
    pub daily_water_ml: u32,
}

/// Direction of the projected weekly weight change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightDirection {
    /// Target below current intake
    Loss,
    /// Target above current intake
    Gain,
    /// Projected change below the maintain threshold
    Maintain,
}

/// Informational projection of weekly weight change for a calorie target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeeklyWeightChange {
    /// Absolute projected change in kg per week
    pub weekly_change_kg: f64,
    /// Direction of the change
    pub direction: WeightDirection,
}

/// Source of a daily target committed during onboarding
///
/// Exactly one source wins, structurally: a target is either user-supplied
/// (`Manual`) or calculator-derived (`Auto`). There is no mode flag to keep
/// in sync with a pair of optional fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "source", content = "value")]
pub enum TargetSource {
    /// User-provided value from the slider
    Manual(u32),
    /// Value computed by the nutrition calculator
    Auto(u32),
}

impl TargetSource {
    /// The committed target value, regardless of source
    #[must_use]
    pub const fn value(&self) -> u32 {
        match self {
            Self::Manual(v) | Self::Auto(v) => *v,
        }
    }

    /// Whether the value was derived by the calculator
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto(_))
    }
}

/// Interest tags selectable during onboarding
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum InterestTag {
    /// Strength and cardio workouts
    Workouts,
    /// Meal tracking and nutrition insights
    Nutrition,
    /// Recipe browsing
    Recipes,
    /// Hydration tracking
    Hydration,
    /// Sleep quality
    Sleep,
    /// Mindfulness and recovery
    Mindfulness,
}

/// Finalized onboarding profile handed to the persistence collaborator
///
/// Produced once, by the terminal submission; the in-memory aggregator is
/// the only writer. `completed` is always `true` on records that reach the
/// store - a failed upsert leaves the accumulator intact instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnboardingRecord {
    /// Normalized username (3-20 chars, lowercase alnum/underscore/dash)
    pub username: String,
    /// Biometric snapshot collected across the scalar steps
    pub biometrics: BiometricInput,
    /// Optional target body weight (kg)
    pub target_weight_kg: Option<f64>,
    /// Daily calorie target with its source, when committed
    pub daily_calories: Option<TargetSource>,
    /// Daily water target with its source, when committed
    pub water_target_ml: Option<TargetSource>,
    /// Whether the user opted into notifications
    pub notifications_enabled: bool,
    /// Free-text motivation provided during signup
    pub reason: Option<String>,
    /// Where the user heard about the app
    pub referral_source: Option<String>,
    /// Selected interest tags
    pub interests: BTreeSet<InterestTag>,
    /// Completion marker, `true` on every submitted record
    pub completed: bool,
    /// When the terminal submission was assembled
    pub completed_at: DateTime<Utc>,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input() -> BiometricInput {
        BiometricInput {
            weight_kg: 70.0,
            height_cm: 170.0,
            age_years: 25,
            sex: Sex::Male,
            activity_level: ActivityLevel::Beginner,
            goal: Goal::Maintain,
        }
    }

    #[test]
    fn test_biometric_validation_accepts_domain_bounds() {
        let mut low = input();
        low.weight_kg = 30.0;
        low.height_cm = 100.0;
        low.age_years = 10;
        assert!(low.validate().is_ok());

        let mut high = input();
        high.weight_kg = 300.0;
        high.height_cm = 250.0;
        high.age_years = 120;
        assert!(high.validate().is_ok());
    }

    #[test]
    fn test_biometric_validation_rejects_out_of_domain() {
        let mut bad_weight = input();
        bad_weight.weight_kg = 29.9;
        assert!(bad_weight.validate().is_err());

        let mut bad_height = input();
        bad_height.height_cm = 251.0;
        assert!(bad_height.validate().is_err());

        let mut bad_age = input();
        bad_age.age_years = 9;
        assert!(bad_age.validate().is_err());
    }

    #[test]
    fn test_target_source_value_ignores_origin() {
        assert_eq!(TargetSource::Manual(1800).value(), 1800);
        assert_eq!(TargetSource::Auto(2250).value(), 2250);
        assert!(TargetSource::Auto(2250).is_auto());
        assert!(!TargetSource::Manual(1800).is_auto());
    }

    #[test]
    fn test_target_source_serialization_is_tagged() {
        let json = serde_json::to_string(&TargetSource::Auto(2250)).unwrap();
        assert!(json.contains("auto"));
        assert!(json.contains("2250"));
    }
}
