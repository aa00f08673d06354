//! Store Config

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

use catalog_app::stores::{
    ConnectMode, FileStoreConfig, FirestoreConfig, MongoDbConfig, StoreConfig,
};

use super::ConfigError;

/// Backend holding the products.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Persistence {
    /// JSON file on local disk.
    File,

    /// Google Cloud Firestore collection.
    Firestore,

    /// `MongoDB` collection.
    Mongodb,

    /// Process memory; nothing survives a restart.
    Memory,
}

impl Persistence {
    fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Firestore => "firestore",
            Self::Mongodb => "mongodb",
            Self::Memory => "memory",
        }
    }
}

/// Products store selection and per-backend settings.
#[derive(Debug, Args)]
pub struct StoreSelectionConfig {
    /// Products store backend (file, firestore, mongodb, memory)
    #[arg(long, env = "PERSISTENCE", value_enum)]
    pub persistence: Persistence,

    /// Products JSON file used by the file store
    #[arg(long, env = "PRODUCTS_FILE", default_value = "products.json")]
    pub products_file: PathBuf,

    /// `MongoDB` connection string
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// `MongoDB` database name
    #[arg(long, env = "MONGODB_DATABASE", default_value = "catalog")]
    pub mongodb_database: String,

    /// `MongoDB` collection name
    #[arg(long, env = "MONGODB_COLLECTION", default_value = "products")]
    pub mongodb_collection: String,

    /// Firestore project id
    #[arg(long, env = "FIRESTORE_PROJECT_ID")]
    pub firestore_project_id: Option<String>,

    /// Firestore REST API root; point at an emulator for local runs
    #[arg(
        long,
        env = "FIRESTORE_BASE_URL",
        default_value = "https://firestore.googleapis.com/v1"
    )]
    pub firestore_base_url: String,

    /// Firestore OAuth access token
    #[arg(long, env = "FIRESTORE_TOKEN", hide_env_values = true)]
    pub firestore_token: Option<String>,

    /// Firestore collection name
    #[arg(long, env = "FIRESTORE_COLLECTION", default_value = "products")]
    pub firestore_collection: String,

    /// Check remote store connectivity during startup
    #[arg(long, env = "STORE_EAGER_CONNECT", default_value_t = true, action = ArgAction::Set)]
    pub store_eager_connect: bool,
}

impl StoreSelectionConfig {
    /// Resolve the settings of the selected backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the selected backend lacks a required setting.
    pub fn to_store_config(&self) -> Result<StoreConfig, ConfigError> {
        let mode = ConnectMode::from_eager_flag(self.store_eager_connect);

        let config = match self.persistence {
            Persistence::File => StoreConfig::File(FileStoreConfig {
                path: self.products_file.clone(),
            }),
            Persistence::Firestore => {
                let project_id = self
                    .firestore_project_id
                    .clone()
                    .filter(|project| !project.trim().is_empty())
                    .ok_or(ConfigError::MissingStoreSetting {
                        persistence: self.persistence.as_str(),
                        setting: "FIRESTORE_PROJECT_ID",
                    })?;

                StoreConfig::Firestore(FirestoreConfig {
                    base_url: self.firestore_base_url.clone(),
                    project_id,
                    collection: self.firestore_collection.clone(),
                    token: self.firestore_token.clone(),
                    mode,
                })
            }
            Persistence::Mongodb => StoreConfig::MongoDb(MongoDbConfig {
                uri: self.mongodb_uri.clone(),
                database: self.mongodb_database.clone(),
                collection: self.mongodb_collection.clone(),
                mode,
            }),
            Persistence::Memory => StoreConfig::Memory,
        };

        Ok(config)
    }
}
