use crate::{
    database::ProfileStore,
    models::{Profile, ProfilePatch},
    utils::AppError,
};

/// Profile as shown to the front-end, or `None` when no collection has the email
pub async fn get_profile(store: &dyn ProfileStore, email: &str) -> Result<Option<serde_json::Value>, AppError> {
    match store.find_by_email(email).await? {
        Some(record) => Ok(Some(record.to_public_json()?)),
        None => Ok(None),
    }
}

/// Loads the profile, merges `patch` into it and writes it back to its own collection
pub async fn edit_profile(store: &dyn ProfileStore, email: &str, patch: ProfilePatch) -> Result<(), AppError> {
    let mut record = store
        .find_by_email(email)
        .await?
        .ok_or_else(|| AppError::NotFound("User or recruiter not found".to_string()))?;

    let changed = patch.apply(&mut record);
    log::debug!("✏️  Merging {:?} into {}", changed, record.email());

    let outcome = store.merge_update(&record).await?;
    if outcome.matched == 0 {
        return Err(AppError::NotFound("No profile found to update".to_string()));
    }

    log::info!(
        "✅ Profile {} updated ({} field(s) changed, modified={})",
        email,
        changed.len(),
        outcome.modified
    );

    Ok(())
}
