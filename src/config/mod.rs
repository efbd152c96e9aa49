// ABOUTME: Configuration module for tunable calculation coefficients
// ABOUTME: Groups the nutrition policy tables consumed by the recommendation calculator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Configuration
//!
//! Coefficient-carrying configuration for the recommendation calculator.
//! Defaults reproduce the shipped product policy; hosts that override values
//! (e.g. from a remote config payload) should call `validate()` before use.

/// Nutrition and hydration calculation configuration
pub mod nutrition;

pub use nutrition::NutritionConfig;
