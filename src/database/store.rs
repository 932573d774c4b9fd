use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{Person, ProfileRecord, Recruiter};
use crate::utils::AppError;

/// Result of persisting a merged profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Access to the people and recruiters collections.
///
/// Email uniqueness across both collections is NOT enforced here; callers check
/// with [`ProfileStore::email_exists`] before inserting.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_person_by_email(&self, email: &str) -> Result<Option<Person>, AppError>;

    async fn find_recruiter_by_email(&self, email: &str) -> Result<Option<Recruiter>, AppError>;

    /// Looks in people first, then recruiters
    async fn find_by_email(&self, email: &str) -> Result<Option<ProfileRecord>, AppError> {
        if let Some(person) = self.find_person_by_email(email).await? {
            return Ok(Some(ProfileRecord::Person(person)));
        }

        Ok(self
            .find_recruiter_by_email(email)
            .await?
            .map(ProfileRecord::Recruiter))
    }

    async fn find_all_people(&self) -> Result<Vec<Person>, AppError>;

    async fn find_all_recruiters(&self) -> Result<Vec<Recruiter>, AppError>;

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    /// Stores the record in its variant's collection and returns the assigned id
    async fn insert(&self, record: ProfileRecord) -> Result<ObjectId, AppError>;

    /// Writes every field of `record` over the stored document with the same email,
    /// in the collection the record belongs to
    async fn merge_update(&self, record: &ProfileRecord) -> Result<UpdateOutcome, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}
