use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{ProfileStore, UpdateOutcome};
use crate::models::{Person, Profile, ProfileRecord, Recruiter};
use crate::utils::AppError;

/// Process-local store with the same semantics as the MongoDB collections.
/// Used by the test suite and by `STORE_BACKEND=memory` for local runs.
#[derive(Default)]
pub struct InMemoryStore {
    people: RwLock<Vec<Person>>,
    recruiters: RwLock<Vec<Recruiter>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn find_person_by_email(&self, email: &str) -> Result<Option<Person>, AppError> {
        let people = self.people.read().await;
        Ok(people.iter().find(|p| p.core.email == email).cloned())
    }

    async fn find_recruiter_by_email(&self, email: &str) -> Result<Option<Recruiter>, AppError> {
        let recruiters = self.recruiters.read().await;
        Ok(recruiters.iter().find(|r| r.core.email == email).cloned())
    }

    async fn find_all_people(&self) -> Result<Vec<Person>, AppError> {
        Ok(self.people.read().await.clone())
    }

    async fn find_all_recruiters(&self) -> Result<Vec<Recruiter>, AppError> {
        Ok(self.recruiters.read().await.clone())
    }

    async fn insert(&self, mut record: ProfileRecord) -> Result<ObjectId, AppError> {
        let id = ObjectId::new();
        record.set_id(id);

        match record {
            ProfileRecord::Person(p) => self.people.write().await.push(p),
            ProfileRecord::Recruiter(r) => self.recruiters.write().await.push(r),
        }

        Ok(id)
    }

    async fn merge_update(&self, record: &ProfileRecord) -> Result<UpdateOutcome, AppError> {
        let email = record.email();

        let outcome = match record {
            ProfileRecord::Person(incoming) => {
                let mut people = self.people.write().await;
                replace_fields(people.iter_mut().find(|p| p.core.email == email), incoming, |stored, incoming| {
                    stored.core = incoming.core.clone();
                })
            }
            ProfileRecord::Recruiter(incoming) => {
                let mut recruiters = self.recruiters.write().await;
                replace_fields(recruiters.iter_mut().find(|r| r.core.email == email), incoming, |stored, incoming| {
                    stored.core = incoming.core.clone();
                    stored.company_name = incoming.company_name.clone();
                    stored.recruiter_id = incoming.recruiter_id.clone();
                })
            }
        };

        Ok(outcome)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Mirrors `$set` semantics: the stored `_id` is kept, everything else is overwritten
fn replace_fields<T: Clone + serde::Serialize>(
    stored: Option<&mut T>,
    incoming: &T,
    assign: impl FnOnce(&mut T, &T),
) -> UpdateOutcome {
    let Some(stored) = stored else {
        return UpdateOutcome { matched: 0, modified: 0 };
    };

    let before = serde_json::to_value(&*stored).ok();
    assign(stored, incoming);
    let after = serde_json::to_value(&*stored).ok();

    UpdateOutcome {
        matched: 1,
        modified: u64::from(before != after),
    }
}
