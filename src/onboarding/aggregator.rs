// ABOUTME: Onboarding profile aggregator accumulating fields across the step sequence
// ABOUTME: Validates step commits, delegates auto targets to the calculator, submits terminally
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Onboarding aggregator
//!
//! One [`OnboardingAggregator`] exists per in-progress signup. UI steps
//! commit their owned fields one at a time (single writer, no concurrency);
//! back-navigation re-reads whatever is already present, so no committed
//! field is ever lost. The calorie and hydration steps may delegate to the
//! nutrition calculator, which only happens once every prerequisite
//! biometric field has been collected.
//!
//! The terminal step packages the accumulator into an
//! [`OnboardingRecord`], awaits the persistence collaborator, and then
//! fires the one-time signup reward as a best-effort side effect. A failed
//! upsert leaves the accumulator untouched for retry.

use crate::config::nutrition::NutritionConfig;
use crate::constants::{limits, rewards};
use crate::errors::{AppError, AppResult};
use crate::intelligence::nutrition_calculator::{
    calculate_daily_calories, calculate_daily_water_ml, estimate_weekly_weight_change,
};
use crate::models::{
    ActivityLevel, BiometricInput, Goal, InterestTag, OnboardingRecord, Sex, TargetSource,
    WeeklyWeightChange,
};
use crate::onboarding::steps::OnboardingStep;
use crate::storage::{ProfileStore, RewardsLedger};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// One-way notification invoked when the sex field is captured
///
/// Lets presentation layers react (e.g. theme selection) before terminal
/// submission, without any shared mutable global.
pub type SexSelectedListener = Box<dyn Fn(Sex) + Send + Sync>;

/// Accumulating state object for a single signup
pub struct OnboardingAggregator {
    config: NutritionConfig,
    step: OnboardingStep,
    expertise: Option<ActivityLevel>,
    username: Option<String>,
    age_years: Option<u32>,
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
    sex: Option<Sex>,
    goal: Option<Goal>,
    target_weight_kg: Option<f64>,
    calorie_target: Option<TargetSource>,
    water_target: Option<TargetSource>,
    notifications_enabled: Option<bool>,
    reason: Option<String>,
    referral_source: Option<String>,
    interests: BTreeSet<InterestTag>,
    completed: bool,
    sex_listener: Option<SexSelectedListener>,
}

impl Default for OnboardingAggregator {
    fn default() -> Self {
        Self::new(NutritionConfig::default())
    }
}

impl OnboardingAggregator {
    /// Create an empty aggregator positioned at the first step
    #[must_use]
    pub fn new(config: NutritionConfig) -> Self {
        Self {
            config,
            step: OnboardingStep::first(),
            expertise: None,
            username: None,
            age_years: None,
            height_cm: None,
            weight_kg: None,
            sex: None,
            goal: None,
            target_weight_kg: None,
            calorie_target: None,
            water_target: None,
            notifications_enabled: None,
            reason: None,
            referral_source: None,
            interests: BTreeSet::new(),
            completed: false,
            sex_listener: None,
        }
    }

    /// The step currently presented to the user
    #[must_use]
    pub const fn current_step(&self) -> OnboardingStep {
        self.step
    }

    /// Whether the terminal submission has succeeded
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Register the one-way listener fired when sex is captured
    pub fn on_sex_selected(&mut self, listener: SexSelectedListener) {
        self.sex_listener = Some(listener);
    }

    // ================================
    // Navigation
    // ================================

    /// Advance to the next step
    ///
    /// The current step must have committed its owned field first; the two
    /// target steps are exempt because their fields are optional.
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::MissingRequiredField` when the current step's
    /// field has not been committed, and `ErrorCode::InvalidInput` when
    /// called on the terminal step (which only submits).
    pub fn advance(&mut self) -> AppResult<OnboardingStep> {
        let committed = match self.step {
            OnboardingStep::Expertise => self.expertise.is_some(),
            OnboardingStep::Username => self.username.is_some(),
            OnboardingStep::Age => self.age_years.is_some(),
            OnboardingStep::Height => self.height_cm.is_some(),
            OnboardingStep::Weight => self.weight_kg.is_some(),
            OnboardingStep::Sex => self.sex.is_some(),
            // Target steps may be skipped entirely
            OnboardingStep::CalorieTarget | OnboardingStep::HydrationTarget => true,
            OnboardingStep::Goal => self.goal.is_some(),
            OnboardingStep::Notifications => {
                return Err(AppError::invalid_input(
                    "notifications is the terminal step; submit instead of advancing",
                )
                .with_step(self.step.to_string()));
            }
        };

        if !committed {
            return Err(
                AppError::missing_required_field(self.step.to_string())
                    .with_step(self.step.to_string()),
            );
        }

        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Navigate back one step; committed fields are retained
    pub fn back(&mut self) {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
    }

    // ================================
    // Step commits
    // ================================

    /// Commit the expertise selection (activity level)
    pub fn set_expertise(&mut self, level: ActivityLevel) {
        self.expertise = Some(level);
    }

    /// Commit the username after normalization (trim + lowercase)
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` when the normalized name is shorter
    /// than 3 or longer than 20 characters, and `ErrorCode::InvalidFormat`
    /// when it contains characters outside lowercase alphanumerics,
    /// underscore, and dash. Nothing is written on failure.
    pub fn set_username(&mut self, raw: &str) -> AppResult<()> {
        let normalized = raw.trim().to_lowercase();

        let length = normalized.chars().count();
        if !(limits::USERNAME_MIN_CHARS..=limits::USERNAME_MAX_CHARS).contains(&length) {
            return Err(AppError::invalid_input(format!(
                "username must be {}-{} characters",
                limits::USERNAME_MIN_CHARS,
                limits::USERNAME_MAX_CHARS
            ))
            .with_step(OnboardingStep::Username.to_string()));
        }
        if !normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
        {
            return Err(AppError::invalid_format(
                "username may only contain lowercase letters, digits, underscore, and dash",
            )
            .with_step(OnboardingStep::Username.to_string()));
        }

        self.username = Some(normalized);
        Ok(())
    }

    /// Commit the age field
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ValueOutOfRange` outside 10-120 years; nothing is
    /// written on failure.
    pub fn set_age_years(&mut self, age_years: u32) -> AppResult<()> {
        if !(limits::AGE_MIN_YEARS..=limits::AGE_MAX_YEARS).contains(&age_years) {
            return Err(AppError::value_out_of_range(
                "age_years",
                f64::from(limits::AGE_MIN_YEARS),
                f64::from(limits::AGE_MAX_YEARS),
            )
            .with_step(OnboardingStep::Age.to_string()));
        }
        self.age_years = Some(age_years);
        Ok(())
    }

    /// Commit the height field
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ValueOutOfRange` outside 100-250 cm; nothing is
    /// written on failure.
    pub fn set_height_cm(&mut self, height_cm: f64) -> AppResult<()> {
        if !(limits::HEIGHT_MIN_CM..=limits::HEIGHT_MAX_CM).contains(&height_cm) {
            return Err(AppError::value_out_of_range(
                "height_cm",
                limits::HEIGHT_MIN_CM,
                limits::HEIGHT_MAX_CM,
            )
            .with_step(OnboardingStep::Height.to_string()));
        }
        self.height_cm = Some(height_cm);
        Ok(())
    }

    /// Commit the weight field
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ValueOutOfRange` outside 30-300 kg; nothing is
    /// written on failure.
    pub fn set_weight_kg(&mut self, weight_kg: f64) -> AppResult<()> {
        if !(limits::WEIGHT_MIN_KG..=limits::WEIGHT_MAX_KG).contains(&weight_kg) {
            return Err(AppError::value_out_of_range(
                "weight_kg",
                limits::WEIGHT_MIN_KG,
                limits::WEIGHT_MAX_KG,
            )
            .with_step(OnboardingStep::Weight.to_string()));
        }
        self.weight_kg = Some(weight_kg);
        Ok(())
    }

    /// Commit the sex selection and publish it to the registered listener
    pub fn set_sex(&mut self, sex: Sex) {
        self.sex = Some(sex);
        if let Some(listener) = &self.sex_listener {
            listener(sex);
        }
    }

    /// Commit the training goal
    pub fn set_goal(&mut self, goal: Goal) {
        self.goal = Some(goal);
    }

    /// Commit the optional target body weight
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ValueOutOfRange` outside 30-300 kg; nothing is
    /// written on failure.
    pub fn set_target_weight_kg(&mut self, target_weight_kg: f64) -> AppResult<()> {
        if !(limits::WEIGHT_MIN_KG..=limits::WEIGHT_MAX_KG).contains(&target_weight_kg) {
            return Err(AppError::value_out_of_range(
                "target_weight_kg",
                limits::WEIGHT_MIN_KG,
                limits::WEIGHT_MAX_KG,
            )
            .with_step(OnboardingStep::Goal.to_string()));
        }
        self.target_weight_kg = Some(target_weight_kg);
        Ok(())
    }

    /// Commit the free-text motivation
    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.reason = Some(reason.into());
    }

    /// Commit the referral source
    pub fn set_referral_source(&mut self, source: impl Into<String>) {
        self.referral_source = Some(source.into());
    }

    /// Add an interest tag to the selection
    pub fn add_interest(&mut self, tag: InterestTag) {
        self.interests.insert(tag);
    }

    /// Commit the notification opt-in choice (terminal step field)
    pub fn set_notifications_enabled(&mut self, enabled: bool) {
        self.notifications_enabled = Some(enabled);
    }

    // ================================
    // Target steps: manual and auto modes
    // ================================

    /// Commit a user-supplied daily calorie target
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ValueOutOfRange` when outside the slider bounds
    /// (1200-4000 kcal); nothing is written on failure.
    pub fn commit_manual_calorie_target(&mut self, kcal: u32) -> AppResult<()> {
        if !(limits::MANUAL_CALORIES_MIN..=limits::MANUAL_CALORIES_MAX).contains(&kcal) {
            return Err(AppError::value_out_of_range(
                "daily_calories",
                f64::from(limits::MANUAL_CALORIES_MIN),
                f64::from(limits::MANUAL_CALORIES_MAX),
            )
            .with_step(OnboardingStep::CalorieTarget.to_string()));
        }
        self.calorie_target = Some(TargetSource::Manual(kcal));
        Ok(())
    }

    /// Derive and commit the daily calorie target from collected biometrics
    ///
    /// The target field is never set from incomplete data: if any
    /// prerequisite biometric field is missing the commit fails and the UI
    /// must block progression or fall back to manual entry.
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::MissingRequiredField` naming the first
    /// uncollected prerequisite.
    pub fn commit_auto_calorie_target(&mut self) -> AppResult<u32> {
        let input = self
            .biometrics()
            .ok_or_else(|| self.missing_biometric(OnboardingStep::CalorieTarget))?;
        let kcal = calculate_daily_calories(&input, &self.config);
        self.calorie_target = Some(TargetSource::Auto(kcal));
        Ok(kcal)
    }

    /// Commit a user-supplied daily water target
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ValueOutOfRange` when outside the slider bounds
    /// (1500-5000 ml); nothing is written on failure.
    pub fn commit_manual_water_target(&mut self, ml: u32) -> AppResult<()> {
        if !(limits::MANUAL_WATER_MIN_ML..=limits::MANUAL_WATER_MAX_ML).contains(&ml) {
            return Err(AppError::value_out_of_range(
                "water_target_ml",
                f64::from(limits::MANUAL_WATER_MIN_ML),
                f64::from(limits::MANUAL_WATER_MAX_ML),
            )
            .with_step(OnboardingStep::HydrationTarget.to_string()));
        }
        self.water_target = Some(TargetSource::Manual(ml));
        Ok(())
    }

    /// Derive and commit the daily water target from collected biometrics
    ///
    /// Hydration needs weight, sex, and expertise only, but the commit gates
    /// on the same prerequisite set as the calorie step: both target steps
    /// sit after all biometric steps in the sequence, so a missing field
    /// indicates broken navigation rather than a legitimate partial state.
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::MissingRequiredField` naming the first
    /// uncollected prerequisite.
    pub fn commit_auto_water_target(&mut self) -> AppResult<u32> {
        let input = self
            .biometrics()
            .ok_or_else(|| self.missing_biometric(OnboardingStep::HydrationTarget))?;
        let ml = calculate_daily_water_ml(
            input.weight_kg,
            input.activity_level,
            input.sex,
            &self.config.hydration,
        );
        self.water_target = Some(TargetSource::Auto(ml));
        Ok(ml)
    }

    // ================================
    // Derived views
    // ================================

    /// Snapshot of the collected biometrics, if complete
    ///
    /// `Some` only when weight, height, age, sex, and expertise have all
    /// been committed. The goal is collected later in the sequence; until
    /// then the snapshot carries the maintenance goal, whose calorie
    /// adjustment is zero.
    #[must_use]
    pub fn biometrics(&self) -> Option<BiometricInput> {
        Some(BiometricInput {
            weight_kg: self.weight_kg?,
            height_cm: self.height_cm?,
            age_years: self.age_years?,
            sex: self.sex?,
            activity_level: self.expertise?,
            goal: self.goal.unwrap_or(Goal::Maintain),
        })
    }

    /// Informational weekly weight change preview for the committed target
    ///
    /// Compares the committed calorie target against the maintenance intake
    /// implied by the collected biometrics. `None` until both are available.
    #[must_use]
    pub fn weekly_change_preview(&self) -> Option<WeeklyWeightChange> {
        let target = self.calorie_target?.value();
        let mut input = self.biometrics()?;
        input.goal = Goal::Maintain;
        let maintenance = calculate_daily_calories(&input, &self.config);
        Some(estimate_weekly_weight_change(
            f64::from(maintenance),
            f64::from(target),
            &self.config.weight_change,
        ))
    }

    fn missing_biometric(&self, step: OnboardingStep) -> AppError {
        let field = if self.weight_kg.is_none() {
            "weight_kg"
        } else if self.height_cm.is_none() {
            "height_cm"
        } else if self.age_years.is_none() {
            "age_years"
        } else if self.sex.is_none() {
            "sex"
        } else {
            "expertise"
        };
        AppError::missing_required_field(field).with_step(step.to_string())
    }

    // ================================
    // Terminal submission
    // ================================

    /// Package the accumulator and hand it to the collaborators
    ///
    /// Persists the completed record, then attempts the one-time signup
    /// reward. The two side effects are independent: a rewards failure is
    /// logged and swallowed, never rolling back persistence. On a
    /// persistence failure every committed field is retained and
    /// `completed` stays `false`, so the submission can be retried as-is.
    ///
    /// # Errors
    ///
    /// - `ErrorCode::ResourceAlreadyExists` when the submission already
    ///   succeeded once
    /// - `ErrorCode::InvalidInput` when called before the terminal step
    /// - `ErrorCode::MissingRequiredField` when a mandatory field was never
    ///   committed
    /// - the persistence collaborator's error, propagated, when the upsert
    ///   fails
    pub async fn submit(
        &mut self,
        store: &dyn ProfileStore,
        ledger: &dyn RewardsLedger,
    ) -> AppResult<OnboardingRecord> {
        if self.completed {
            return Err(AppError::already_exists("onboarding submission"));
        }
        if !self.step.is_terminal() {
            return Err(AppError::invalid_input(
                "submission is only available at the notifications step",
            )
            .with_step(self.step.to_string()));
        }

        let record = self.assemble_record()?;

        if let Err(error) = store.upsert_profile(&record).await {
            warn!(
                "Profile upsert failed for '{}', retaining accumulator for retry: {}",
                record.username, error
            );
            return Err(error);
        }
        self.completed = true;
        info!("Onboarding completed for '{}'", record.username);

        if let Err(error) = ledger
            .grant(rewards::SIGNUP_BONUS_COINS, rewards::SIGNUP_BONUS_REASON)
            .await
        {
            // Best-effort bonus: completion already persisted, never rolled back
            warn!(
                "Signup reward grant failed for '{}': {}",
                record.username, error
            );
        }

        Ok(record)
    }

    fn assemble_record(&self) -> AppResult<OnboardingRecord> {
        let username = self
            .username
            .clone()
            .ok_or_else(|| AppError::missing_required_field("username"))?;
        let goal = self
            .goal
            .ok_or_else(|| AppError::missing_required_field("goal"))?;
        let notifications_enabled = self
            .notifications_enabled
            .ok_or_else(|| AppError::missing_required_field("notifications_enabled"))?;
        let mut biometrics = self
            .biometrics()
            .ok_or_else(|| self.missing_biometric(OnboardingStep::Notifications))?;
        biometrics.goal = goal;

        Ok(OnboardingRecord {
            username,
            biometrics,
            target_weight_kg: self.target_weight_kg,
            daily_calories: self.calorie_target,
            water_target_ml: self.water_target,
            notifications_enabled,
            reason: self.reason.clone(),
            referral_source: self.referral_source.clone(),
            interests: self.interests.clone(),
            completed: true,
            completed_at: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU8, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_username_normalization_and_rejection() {
        let mut flow = OnboardingAggregator::default();

        flow.set_username("  Pierre_Fan-01  ").unwrap();
        assert!(flow.set_username("ab").is_err());
        assert!(flow.set_username("name with spaces").is_err());
        assert!(flow.set_username(&"x".repeat(21)).is_err());
    }

    #[test]
    fn test_rejected_commit_writes_nothing() {
        let mut flow = OnboardingAggregator::default();

        assert!(flow.set_age_years(9).is_err());
        assert!(flow.set_weight_kg(500.0).is_err());
        assert!(flow.advance_blocked_on(OnboardingStep::Expertise));
    }

    #[test]
    fn test_sex_listener_fires_on_capture() {
        let mut flow = OnboardingAggregator::default();
        let calls = Arc::new(AtomicU8::new(0));
        let seen = Arc::clone(&calls);
        flow.on_sex_selected(Box::new(move |sex| {
            assert_eq!(sex, Sex::Female);
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        flow.set_sex(Sex::Female);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_auto_target_blocked_until_biometrics_complete() {
        let mut flow = OnboardingAggregator::default();
        flow.set_expertise(ActivityLevel::Beginner);
        flow.set_weight_kg(70.0).unwrap();

        let error = flow.commit_auto_calorie_target().unwrap_err();
        assert_eq!(error.code, crate::errors::ErrorCode::MissingRequiredField);
        assert!(flow.weekly_change_preview().is_none());
    }

    impl OnboardingAggregator {
        fn advance_blocked_on(&mut self, step: OnboardingStep) -> bool {
            self.step == step && self.advance().is_err()
        }
    }
}
