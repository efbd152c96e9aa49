// ABOUTME: System-wide constants and fixed policy values for the onboarding core
// ABOUTME: Contains reward amounts, slider bounds, username limits, and rounding steps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Fixed policy values shared across the onboarding flow. Calculation
//! coefficients that are meant to be tunable live in
//! [`crate::config::nutrition`]; the values here are product policy and do
//! not vary per deployment.

/// One-time signup reward policy
pub mod rewards {
    /// Coins granted once after successful onboarding completion
    pub const SIGNUP_BONUS_COINS: u32 = 500;

    /// Reason string recorded with the signup grant
    pub const SIGNUP_BONUS_REASON: &str = "completing onboarding";
}

/// Field validation bounds enforced by the owning onboarding step
pub mod limits {
    /// Minimum username length after normalization
    pub const USERNAME_MIN_CHARS: usize = 3;

    /// Maximum username length after normalization
    pub const USERNAME_MAX_CHARS: usize = 20;

    /// Minimum supported body weight (kg)
    pub const WEIGHT_MIN_KG: f64 = 30.0;

    /// Maximum supported body weight (kg)
    pub const WEIGHT_MAX_KG: f64 = 300.0;

    /// Minimum supported height (cm)
    pub const HEIGHT_MIN_CM: f64 = 100.0;

    /// Maximum supported height (cm)
    pub const HEIGHT_MAX_CM: f64 = 250.0;

    /// Minimum supported age (years) - Mifflin-St Jeor is validated for 10+
    pub const AGE_MIN_YEARS: u32 = 10;

    /// Maximum supported age (years)
    pub const AGE_MAX_YEARS: u32 = 120;

    /// Lower bound of the manual calorie target slider (kcal/day)
    pub const MANUAL_CALORIES_MIN: u32 = 1200;

    /// Upper bound of the manual calorie target slider (kcal/day)
    pub const MANUAL_CALORIES_MAX: u32 = 4000;

    /// Lower bound of the manual water target slider (ml/day)
    pub const MANUAL_WATER_MIN_ML: u32 = 1500;

    /// Upper bound of the manual water target slider (ml/day)
    pub const MANUAL_WATER_MAX_ML: u32 = 5000;
}

/// Rounding granularity for derived targets
pub mod rounding {
    /// Daily calorie targets are rounded to the nearest multiple of this (kcal)
    pub const CALORIE_STEP_KCAL: f64 = 50.0;

    /// Daily water targets are rounded to the nearest multiple of this (ml)
    pub const WATER_STEP_ML: f64 = 100.0;
}
