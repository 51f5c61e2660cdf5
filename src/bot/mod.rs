//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the `PriceBuddy` application,
//! including all slash commands, autocomplete handlers, the Discord-backed
//! [`Notifier`](crate::core::notify::Notifier) and bot context management.

/// Discord command implementations (products, migration, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Replies and OK/Cancel prompts for the core's notifications
pub mod notifier;
/// Embed rendering of rankings
pub mod render;

use crate::{
    config::settings::Settings,
    core::{
        legacy::{DocumentTableSource, KeyValueSource},
        session::Session,
        store::DbProductStore,
    },
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info};

/// One user's session, shared between their concurrent interactions.
pub type UserSession = Arc<Mutex<Session<DbProductStore>>>;

/// Shared data available to all bot commands.
/// This structure holds the database connection, the loaded settings and the
/// per-user sessions opened so far.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Settings loaded from config.toml
    pub settings: Settings,
    sessions: RwLock<HashMap<String, UserSession>>,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection.
    /// This is typically called during bot initialization to set up the
    /// shared context for all commands.
    #[must_use]
    pub fn new(database: DatabaseConnection, settings: Settings) -> Self {
        Self {
            database,
            settings,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the user's session, opening it on first use.
    ///
    /// A session that fails to open is not cached, so the next command retries.
    pub async fn session(&self, user_id: &str) -> Result<UserSession> {
        if let Some(session) = self.sessions.read().await.get(user_id) {
            return Ok(Arc::clone(session));
        }

        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get(user_id) {
            return Ok(Arc::clone(session));
        }

        let store = DbProductStore::new(self.database.clone(), user_id);
        let session = Session::open(store, self.settings.bot.default_category).await?;
        info!(
            "Opened session for user {} with {} products",
            user_id,
            session.products().len()
        );
        let session = Arc::new(Mutex::new(session));
        sessions.insert(user_id.to_string(), Arc::clone(&session));
        Ok(session)
    }

    /// The two local legacy sources, flat list first.
    ///
    /// They are not scoped to a user: every user sees and clears the same data.
    #[must_use]
    pub fn legacy_sources(&self) -> (KeyValueSource, DocumentTableSource) {
        (
            KeyValueSource::new(self.database.clone(), self.settings.legacy.storage_key.clone()),
            DocumentTableSource::new(self.database.clone()),
        )
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework and runs the Discord client until it stops.
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::add_toilet(),
                commands::add_tissue(),
                commands::ranking(),
                commands::edit(),
                commands::delete(),
                commands::clear(),
                commands::migrate(),
                commands::ping(),
                commands::help(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::store::ProductStore, test_utils::*};

    #[tokio::test]
    async fn test_session_is_opened_once_per_user() -> Result<()> {
        let db = setup_test_db().await?;
        DbProductStore::new(db.clone(), "alice")
            .save(&toilet_record("Roll", 400.0))
            .await?;
        let data = BotData::new(db, Settings::default());

        let first = data.session("alice").await?;
        let again = data.session("alice").await?;
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(first.lock().await.products().len(), 1);

        let bob = data.session("bob").await?;
        assert!(bob.lock().await.products().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_legacy_sources_use_configured_key() -> Result<()> {
        use crate::core::legacy::LegacySource;

        let db = setup_test_db().await?;
        let mut settings = Settings::default();
        settings.legacy.storage_key = "old-list".to_string();
        let data = BotData::new(db, settings);

        let (local, documents) = data.legacy_sources();
        assert_eq!(local.name(), "old-list");
        assert_eq!(documents.name(), "legacy_products");
        Ok(())
    }

    #[tokio::test]
    async fn test_legacy_data_is_shared_between_users() -> Result<()> {
        use crate::core::session::legacy_pending;

        let db = setup_test_db().await?;
        let data = BotData::new(db, Settings::default());
        let (local, documents) = data.legacy_sources();
        local.write(&[toilet_record("Old Roll", 400.0)]).await?;

        let alice = data.session("alice").await?;
        let notifier = ScriptedNotifier::new(vec![true]);
        alice
            .lock()
            .await
            .migrate_legacy(&[&local, &documents], &notifier)
            .await?;

        let (local, documents) = data.legacy_sources();
        assert_eq!(legacy_pending(&[&local, &documents]).await, 0);
        assert!(data.session("bob").await?.lock().await.products().is_empty());
        assert_eq!(alice.lock().await.products().len(), 1);
        Ok(())
    }
}
