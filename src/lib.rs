// ABOUTME: Main library entry point for the Pierre onboarding and recommendation core
// ABOUTME: Provides the nutrition calculator and onboarding aggregator consumed by mobile shells
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Onboarding Core
//!
//! In-process data and logic module backing the signup flow of Pierre fitness
//! applications. The crate has two cooperating halves:
//!
//! - **Nutrition calculator** (`intelligence::nutrition_calculator`): pure,
//!   deterministic derivation of daily calorie and hydration targets from a
//!   biometric snapshot, using the Mifflin-St Jeor equation and fixed
//!   activity/goal policy tables.
//! - **Onboarding aggregator** (`onboarding`): an accumulating state object
//!   that collects biometric and preference fields across a fixed sequence of
//!   steps, optionally delegates target selection to the calculator, and hands
//!   the finalized record to the persistence and rewards collaborators.
//!
//! The crate exposes no HTTP or CLI surface; a UI layer drives the aggregator
//! one step at a time and awaits the single terminal submission.
//!
//! ## Example
//!
//! ```rust
//! use pierre_onboarding::config::nutrition::NutritionConfig;
//! use pierre_onboarding::intelligence::nutrition_calculator::calculate_nutrition_targets;
//! use pierre_onboarding::models::{ActivityLevel, BiometricInput, Goal, Sex};
//!
//! let input = BiometricInput {
//!     weight_kg: 70.0,
//!     height_cm: 170.0,
//!     age_years: 25,
//!     sex: Sex::Male,
//!     activity_level: ActivityLevel::Beginner,
//!     goal: Goal::Maintain,
//! };
//! let config = NutritionConfig::default();
//! let targets = calculate_nutrition_targets(&input, &config);
//! assert_eq!(targets.daily_calories, 2250);
//! ```

/// Configuration for calculation coefficients and policy tables
pub mod config;

/// Application constants and fixed policy values
pub mod constants;

/// Unified error handling system with standard error codes
pub mod errors;

/// Nutrition intelligence: deterministic recommendation calculations
pub mod intelligence;

/// Production logging and structured output
pub mod logging;

/// Common data models for biometrics, targets, and profiles
pub mod models;

/// Onboarding step sequencing and profile aggregation
pub mod onboarding;

/// Persistence and rewards collaborator traits with in-memory backends
pub mod storage;
