pub mod memory_store;
pub mod mongo_store;
pub mod store;

pub use memory_store::InMemoryStore;
pub use store::{ProfileStore, UpdateOutcome};

use mongodb::{Client, Collection, Database};
use std::error::Error;

/// People signing up with role `user`
pub const PEOPLE_COLLECTION: &str = "profiles_ind";
pub const RECRUITERS_COLLECTION: &str = "recruiters";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    /// Builds the client. The driver connects lazily, so this does not touch the network;
    /// call [`ProfileStore::ping`] to verify the server is reachable.
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.app_name = Some("talent-match-service".to_string());
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        Ok(Self { db })
    }

    /// Creates the lookup indexes used by the email queries
    pub async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        for name in [PEOPLE_COLLECTION, RECRUITERS_COLLECTION] {
            let collection = self.collection::<mongodb::bson::Document>(name);

            // Not unique: signup does its own existence check across both collections
            let email_index = IndexModel::builder()
                .keys(doc! { "email": 1 })
                .build();

            match collection.create_index(email_index).await {
                Ok(_) => log::info!("   ✅ Index created: {}(email)", name),
                Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
