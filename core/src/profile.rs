//! Student profile record and its persistence boundary.
//!
//! # Design
//! A profile is a plain struct. Defaults are applied by an explicit
//! constructor, and the required/unique rules on `userId` are enforced by
//! [`ProfileRepository`], not by the struct itself. `profileStrength` and
//! `profileComplete` are stored as given; scoring lives with the caller.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::ProfileError;

/// One student's profile. At most one exists per `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub user_id: String,

    pub full_name: Option<String>,
    pub email: Option<String>,
    pub profile_picture: Option<String>,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,

    pub current_year: Option<i32>,
    pub enrollment_year: Option<i32>,
    pub department: Option<String>,

    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub career_goals: Vec<String>,
    pub industry_preferences: Vec<String>,

    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,

    pub looking_for_mentor: bool,
    pub profile_strength: u32,
    pub profile_complete: bool,
    pub last_profile_update: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial set of profile fields. Absent fields are left untouched on
/// update and take their defaults on creation. Optional text and number
/// fields are doubly wrapped: `Some(None)` (JSON `null`) clears the field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfileUpdate {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub headline: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub current_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub enrollment_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub department: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_goals: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_preferences: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub github_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub looking_for_mentor: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_strength: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_complete: Option<bool>,
}

/// Deserialize a present field, `null` included, as `Some`. Paired with
/// `#[serde(default)]` so an absent field stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Creation payload: the owning user plus any initial fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewStudentProfile {
    #[serde(default)]
    pub user_id: String,
    #[serde(flatten)]
    pub fields: StudentProfileUpdate,
}

impl NewStudentProfile {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            fields: StudentProfileUpdate::default(),
        }
    }

    pub fn with_fields(user_id: impl Into<String>, fields: StudentProfileUpdate) -> Self {
        Self {
            user_id: user_id.into(),
            fields,
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.user_id.trim().is_empty() {
            return Err(ProfileError::MissingUserId);
        }
        Ok(())
    }
}

impl StudentProfile {
    /// Build a profile, applying defaults and stamping all timestamps with
    /// `now`. Does not validate; see [`NewStudentProfile::validate`].
    pub fn new(input: NewStudentProfile, now: DateTime<Utc>) -> Self {
        let f = input.fields;
        Self {
            user_id: input.user_id,
            full_name: f.full_name.flatten(),
            email: f.email.flatten(),
            profile_picture: f.profile_picture.flatten(),
            headline: f.headline.flatten(),
            bio: f.bio.flatten(),
            location: f.location.flatten(),
            current_year: f.current_year.flatten(),
            enrollment_year: f.enrollment_year.flatten(),
            department: f.department.flatten(),
            skills: f.skills.unwrap_or_default(),
            interests: f.interests.unwrap_or_default(),
            career_goals: f.career_goals.unwrap_or_default(),
            industry_preferences: f.industry_preferences.unwrap_or_default(),
            linkedin_url: f.linkedin_url.flatten(),
            github_url: f.github_url.flatten(),
            looking_for_mentor: f.looking_for_mentor.unwrap_or(false),
            profile_strength: f.profile_strength.unwrap_or(0),
            profile_complete: f.profile_complete.unwrap_or(false),
            last_profile_update: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every field present in `update` and restamp the record.
    pub fn apply(&mut self, update: StudentProfileUpdate, now: DateTime<Utc>) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *slot = v;
            }
        }

        set(&mut self.full_name, update.full_name);
        set(&mut self.email, update.email);
        set(&mut self.profile_picture, update.profile_picture);
        set(&mut self.headline, update.headline);
        set(&mut self.bio, update.bio);
        set(&mut self.location, update.location);
        set(&mut self.current_year, update.current_year);
        set(&mut self.enrollment_year, update.enrollment_year);
        set(&mut self.department, update.department);
        set(&mut self.skills, update.skills);
        set(&mut self.interests, update.interests);
        set(&mut self.career_goals, update.career_goals);
        set(&mut self.industry_preferences, update.industry_preferences);
        set(&mut self.linkedin_url, update.linkedin_url);
        set(&mut self.github_url, update.github_url);
        set(&mut self.looking_for_mentor, update.looking_for_mentor);
        set(&mut self.profile_strength, update.profile_strength);
        set(&mut self.profile_complete, update.profile_complete);

        self.last_profile_update = now;
        self.updated_at = now;
    }
}

/// In-memory profile store keyed by `user_id`.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct ProfileRepository {
    profiles: Arc<RwLock<HashMap<String, StudentProfile>>>,
}

impl ProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, input: NewStudentProfile) -> Result<StudentProfile, ProfileError> {
        input.validate()?;

        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&input.user_id) {
            return Err(ProfileError::Duplicate(input.user_id));
        }

        let profile = StudentProfile::new(input, Utc::now());
        debug!(user_id = %profile.user_id, "profile created");
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }

    pub async fn get(&self, user_id: &str) -> Result<StudentProfile, ProfileError> {
        self.profiles
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| ProfileError::NotFound(user_id.to_string()))
    }

    pub async fn update(
        &self,
        user_id: &str,
        update: StudentProfileUpdate,
    ) -> Result<StudentProfile, ProfileError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(user_id)
            .ok_or_else(|| ProfileError::NotFound(user_id.to_string()))?;
        profile.apply(update, Utc::now());
        Ok(profile.clone())
    }

    /// Apply `update` to the user's profile, creating it first if none
    /// exists. Runs under a single write lock, so concurrent first writes
    /// for one user never collide on the uniqueness rule.
    pub async fn upsert(
        &self,
        user_id: &str,
        update: StudentProfileUpdate,
    ) -> Result<StudentProfile, ProfileError> {
        let mut profiles = self.profiles.write().await;
        let now = Utc::now();
        if let Some(profile) = profiles.get_mut(user_id) {
            profile.apply(update, now);
            return Ok(profile.clone());
        }

        let input = NewStudentProfile::with_fields(user_id, update);
        input.validate()?;
        let profile = StudentProfile::new(input, now);
        debug!(user_id = %profile.user_id, "profile created on first write");
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }

    pub async fn delete(&self, user_id: &str) -> Result<StudentProfile, ProfileError> {
        self.profiles
            .write()
            .await
            .remove(user_id)
            .ok_or_else(|| ProfileError::NotFound(user_id.to_string()))
    }

    /// All profiles, oldest first.
    pub async fn list(&self) -> Vec<StudentProfile> {
        let mut all: Vec<_> = self.profiles.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.user_id.cmp(&b.user_id)));
        all
    }
}
