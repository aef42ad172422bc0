use std::sync::Arc;

use crate::{
    db::{load_json_or_default, save_json, KeyValueStore, StoreKey},
    error::{AppError, AppResult},
    models::{LegacyUserProfile, Profile, ProfileId},
};

/// Owns the profile collection and the active-profile pointer
pub struct ProfileManager {
    store: Arc<dyn KeyValueStore>,
    profiles: Vec<Profile>,
    active: Option<ProfileId>,
}

impl ProfileManager {
    /// Loads profiles and restores the active selection.
    ///
    /// The stored active id wins when it still names a stored profile;
    /// otherwise the first profile is selected. An empty collection picks up a
    /// single legacy `userProfile` record if one exists.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let mut profiles: Vec<Profile> =
            load_json_or_default(store.as_ref(), StoreKey::Profiles).await;

        if profiles.is_empty() {
            if let Some(imported) = Self::import_legacy(store.as_ref()).await {
                profiles.push(imported);
            }
        }

        let stored_active: Option<ProfileId> =
            load_json_or_default(store.as_ref(), StoreKey::ActiveProfile).await;
        let active = stored_active
            .filter(|id| profiles.iter().any(|p| p.id == *id))
            .or_else(|| profiles.first().map(|p| p.id.clone()));

        tracing::info!(
            profiles = profiles.len(),
            active = ?active,
            "Loaded profiles"
        );

        Self {
            store,
            profiles,
            active,
        }
    }

    async fn import_legacy(store: &dyn KeyValueStore) -> Option<Profile> {
        let legacy: Option<LegacyUserProfile> =
            load_json_or_default(store, StoreKey::LegacyUserProfile).await;
        let legacy = legacy.filter(|l| !l.name.trim().is_empty())?;

        let mut profile = Profile::draft();
        profile.name = legacy.name;

        if let Err(e) = save_json(store, StoreKey::Profiles, &[profile.clone()]).await {
            tracing::warn!(error = %e, "Failed to persist imported legacy profile");
            return None;
        }

        tracing::info!(id = %profile.id, "Imported legacy user profile");
        Some(profile)
    }

    /// Profiles in insertion order
    pub fn list_profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn active_id(&self) -> Option<&ProfileId> {
        self.active.as_ref()
    }

    /// `None` when nothing is selected or the selected id is unknown
    pub fn active_profile(&self) -> Option<&Profile> {
        let id = self.active.as_ref()?;
        self.profiles.iter().find(|p| p.id == *id)
    }

    /// Points the selection at `id` without checking that it exists
    pub async fn select_active(&mut self, id: ProfileId) -> AppResult<()> {
        save_json(self.store.as_ref(), StoreKey::ActiveProfile, &Some(&id)).await?;

        if !self.profiles.iter().any(|p| p.id == id) {
            tracing::debug!(id = %id, "Selected profile id does not exist");
        }
        self.active = Some(id);

        Ok(())
    }

    /// Fresh, unsaved profile
    pub fn create_draft(&self) -> Profile {
        Profile::draft()
    }

    /// Inserts or replaces `profile` by id, persists, and makes it active.
    ///
    /// Each of the two writes is committed in memory only once it succeeds, so
    /// a failed `activeProfile` write returns the error with the collection
    /// saved and the previous selection still in place.
    pub async fn save(&mut self, profile: Profile) -> AppResult<Profile> {
        if !profile.has_name() {
            return Err(AppError::Validation("Name is required".to_string()));
        }

        let mut updated = self.profiles.clone();
        let replaced = match updated.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => {
                *existing = profile.clone();
                true
            }
            None => {
                updated.push(profile.clone());
                false
            }
        };

        save_json(self.store.as_ref(), StoreKey::Profiles, &updated).await?;
        self.profiles = updated;

        save_json(self.store.as_ref(), StoreKey::ActiveProfile, &Some(&profile.id)).await?;
        self.active = Some(profile.id.clone());

        tracing::info!(
            id = %profile.id,
            replaced = replaced,
            total = self.profiles.len(),
            "Profile saved"
        );

        Ok(profile)
    }
}
