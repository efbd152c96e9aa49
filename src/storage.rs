// ABOUTME: Persistence and rewards collaborator traits consumed by the onboarding flow
// ABOUTME: Includes in-memory backends used by tests and the offline mobile shell
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Storage Collaborators
//!
//! The onboarding core's only external boundary is a narrow call contract
//! with two collaborators: a profile store (`upsert` of the finalized
//! record) and a rewards ledger (one-time signup grant). Both are modeled as
//! async traits so hosts can plug in their real backends; the in-memory
//! implementations here back tests and offline operation.
//!
//! Retry, backoff, and timeout policy belong to the implementations, never
//! to the aggregator.

use crate::errors::{AppError, AppResult};
use crate::models::OnboardingRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Persistence collaborator for finalized onboarding profiles
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert or update the profile record keyed by its normalized username
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::StorageError` (or an implementation-specific
    /// code) when the write fails; the caller retains its record for retry.
    async fn upsert_profile(&self, record: &OnboardingRecord) -> AppResult<()>;
}

/// Rewards collaborator granting the one-time signup bonus
#[async_trait]
pub trait RewardsLedger: Send + Sync {
    /// Grant `amount` coins with a bookkeeping reason
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ExternalServiceError` (or an
    /// implementation-specific code) when the grant fails. Callers treat
    /// this as non-fatal.
    async fn grant(&self, amount: u32, reason: &str) -> AppResult<()>;
}

/// In-memory profile store keyed by normalized username
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, OnboardingRecord>>,
}

impl InMemoryProfileStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a stored profile by username
    pub async fn get(&self, username: &str) -> Option<OnboardingRecord> {
        self.profiles.read().await.get(username).cloned()
    }

    /// Number of stored profiles
    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    /// Whether the store holds no profiles
    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn upsert_profile(&self, record: &OnboardingRecord) -> AppResult<()> {
        if record.username.is_empty() {
            return Err(AppError::storage("profile record has no username key"));
        }
        self.profiles
            .write()
            .await
            .insert(record.username.clone(), record.clone());
        Ok(())
    }
}

/// In-memory rewards ledger recording every grant
#[derive(Debug, Default)]
pub struct InMemoryRewardsLedger {
    grants: RwLock<Vec<(u32, String)>>,
}

impl InMemoryRewardsLedger {
    /// Create an empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All grants recorded so far, in order
    pub async fn grants(&self) -> Vec<(u32, String)> {
        self.grants.read().await.clone()
    }

    /// Sum of all granted amounts
    pub async fn total_granted(&self) -> u64 {
        self.grants
            .read()
            .await
            .iter()
            .map(|(amount, _)| u64::from(*amount))
            .sum()
    }
}

#[async_trait]
impl RewardsLedger for InMemoryRewardsLedger {
    async fn grant(&self, amount: u32, reason: &str) -> AppResult<()> {
        self.grants
            .write()
            .await
            .push((amount, reason.to_owned()));
        Ok(())
    }
}
