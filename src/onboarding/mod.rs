// ABOUTME: Onboarding module grouping step sequencing and profile aggregation
// ABOUTME: Re-exports the aggregator and step enum consumed by UI shells
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Onboarding Flow
//!
//! Fixed linear step sequence plus the accumulating profile aggregator.
//! A UI layer drives one [`OnboardingAggregator`] per signup: commit the
//! current step's field, advance, and finally submit at the terminal
//! notifications step.

/// Profile aggregation and terminal submission
pub mod aggregator;

/// Step enumeration and navigation order
pub mod steps;

pub use aggregator::{OnboardingAggregator, SexSelectedListener};
pub use steps::OnboardingStep;
