use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_document, Document};
use mongodb::Collection;

use super::{MongoDB, ProfileStore, UpdateOutcome, PEOPLE_COLLECTION, RECRUITERS_COLLECTION};
use crate::models::{Person, Profile, ProfileRecord, Recruiter};
use crate::utils::AppError;

impl MongoDB {
    fn people(&self) -> Collection<Person> {
        self.collection::<Person>(PEOPLE_COLLECTION)
    }

    fn recruiters(&self) -> Collection<Recruiter> {
        self.collection::<Recruiter>(RECRUITERS_COLLECTION)
    }
}

/// `$set` payload for a merged record: the whole document minus `_id`
fn set_document(record: &ProfileRecord) -> Result<Document, AppError> {
    let mut document = match record {
        ProfileRecord::Person(p) => to_document(p)?,
        ProfileRecord::Recruiter(r) => to_document(r)?,
    };
    document.remove("_id");
    Ok(document)
}

#[async_trait]
impl ProfileStore for MongoDB {
    async fn find_person_by_email(&self, email: &str) -> Result<Option<Person>, AppError> {
        Ok(self.people().find_one(doc! { "email": email }).await?)
    }

    async fn find_recruiter_by_email(&self, email: &str) -> Result<Option<Recruiter>, AppError> {
        Ok(self.recruiters().find_one(doc! { "email": email }).await?)
    }

    async fn find_all_people(&self) -> Result<Vec<Person>, AppError> {
        let cursor = self.people().find(doc! {}).await?;
        let people: Vec<Person> = cursor.try_collect().await?;
        Ok(people)
    }

    async fn find_all_recruiters(&self) -> Result<Vec<Recruiter>, AppError> {
        let cursor = self.recruiters().find(doc! {}).await?;
        let recruiters: Vec<Recruiter> = cursor.try_collect().await?;
        Ok(recruiters)
    }

    async fn insert(&self, mut record: ProfileRecord) -> Result<ObjectId, AppError> {
        let id = ObjectId::new();
        record.set_id(id);

        match &record {
            ProfileRecord::Person(p) => {
                self.people().insert_one(p).await?;
            }
            ProfileRecord::Recruiter(r) => {
                self.recruiters().insert_one(r).await?;
            }
        }

        log::debug!("💾 Inserted {:?} {} as {}", record.kind(), record.email(), id.to_hex());
        Ok(id)
    }

    async fn merge_update(&self, record: &ProfileRecord) -> Result<UpdateOutcome, AppError> {
        let filter = doc! { "email": record.email() };
        let update = doc! { "$set": set_document(record)? };

        let result = match record {
            ProfileRecord::Person(_) => self.people().update_one(filter, update).await?,
            ProfileRecord::Recruiter(_) => self.recruiters().update_one(filter, update).await?,
        };

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.database().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProfileCore, Role};

    #[test]
    fn test_set_document_drops_id() {
        let record = ProfileRecord::Person(Person {
            id: Some(ObjectId::new()),
            core: ProfileCore::new(Some("Linus".into()), None, "linus@kernel.org", "pw", Role::User),
        });

        let document = set_document(&record).unwrap();
        assert!(!document.contains_key("_id"));
        assert_eq!(document.get_str("email").unwrap(), "linus@kernel.org");
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_roundtrip() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db = MongoDB::new(&uri, "talent_match_test").await.unwrap();
        db.ping().await.unwrap();

        let email = format!("{}@roundtrip.test", ObjectId::new().to_hex());
        let record = ProfileRecord::Person(Person {
            id: None,
            core: ProfileCore::new(None, None, email.clone(), "pw", Role::User),
        });
        let id = db.insert(record).await.unwrap();

        let found = db.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(found.id(), Some(id));
    }
}
