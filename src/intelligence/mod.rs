// ABOUTME: Nutrition intelligence module grouping the recommendation calculations
// ABOUTME: Pure, deterministic derivations consumed by the onboarding aggregator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrition Intelligence
//!
//! Deterministic recommendation calculations. Everything in this module is
//! referentially transparent: no I/O, no randomness, no suspension points.

/// Daily calorie and hydration target calculations
pub mod nutrition_calculator;
