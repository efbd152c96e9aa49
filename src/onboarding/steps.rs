// ABOUTME: Onboarding step enumeration with fixed linear navigation order
// ABOUTME: Steps advance strictly forward/backward; Notifications is terminal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Onboarding step sequence
//!
//! The flow is a fixed linear sequence with no data-driven branching; only
//! user navigation moves between steps. Each step owns exactly the fields it
//! writes into the aggregator on exit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single step of the onboarding flow, in navigation order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    /// Training expertise selection (owns the activity level)
    Expertise,
    /// Username entry
    Username,
    /// Age entry
    Age,
    /// Height entry
    Height,
    /// Weight entry
    Weight,
    /// Sex selection (published to the presentation layer on capture)
    Sex,
    /// Daily calorie target, manual or calculator-derived
    CalorieTarget,
    /// Daily water target, manual or calculator-derived
    HydrationTarget,
    /// Training goal selection (owns goal and optional target weight)
    Goal,
    /// Notification opt-in; terminal step that triggers submission
    Notifications,
}

impl OnboardingStep {
    /// All steps in navigation order
    pub const SEQUENCE: [Self; 10] = [
        Self::Expertise,
        Self::Username,
        Self::Age,
        Self::Height,
        Self::Weight,
        Self::Sex,
        Self::CalorieTarget,
        Self::HydrationTarget,
        Self::Goal,
        Self::Notifications,
    ];

    /// The first step of the flow
    #[must_use]
    pub const fn first() -> Self {
        Self::Expertise
    }

    /// The step after this one, or `None` at the terminal step
    #[must_use]
    pub fn next(self) -> Option<Self> {
        let index = Self::SEQUENCE.iter().position(|step| *step == self)?;
        Self::SEQUENCE.get(index + 1).copied()
    }

    /// The step before this one, or `None` at the first step
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        let index = Self::SEQUENCE.iter().position(|step| *step == self)?;
        index.checked_sub(1).and_then(|i| Self::SEQUENCE.get(i)).copied()
    }

    /// Whether this step ends the flow
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Notifications)
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Expertise => "expertise",
            Self::Username => "username",
            Self::Age => "age",
            Self::Height => "height",
            Self::Weight => "weight",
            Self::Sex => "sex",
            Self::CalorieTarget => "calorie_target",
            Self::HydrationTarget => "hydration_target",
            Self::Goal => "goal",
            Self::Notifications => "notifications",
        };
        write!(f, "{name}")
    }
}
