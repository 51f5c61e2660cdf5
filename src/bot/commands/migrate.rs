//! Legacy data migration command.
//!
//! Imports products saved by the older local-storage versions into the user's
//! list, asking first and deleting the old data afterwards. The old data lives
//! in the bot's shared database, so whoever runs the command first imports it.

/// Sent before the migration prompt whenever legacy data is waiting.
pub const SHARED_DATA_NOTICE: &str = "ℹ️ The old local data is shared by everyone using this bot, \
not kept per user. Importing it adds it to your list only, and deleting it removes it for everyone.";

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, notifier::DiscordNotifier},
        core::{migration::MigrationOutcome, session::legacy_pending},
        errors::{Error, Result},
    };
    use tracing::info;

    /// Imports products saved by an older version of the app.
    #[poise::command(slash_command, prefix_command)]
    pub async fn migrate(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user_id = ctx.author().id.to_string();
        let session = ctx.data().session(&user_id).await?;
        let notifier = DiscordNotifier::new(ctx);
        let (local, documents) = ctx.data().legacy_sources();

        let mut session = session.lock().await;
        if legacy_pending(&[&local, &documents]).await > 0 {
            ctx.say(super::SHARED_DATA_NOTICE).await?;
        }
        let outcome = session
            .migrate_legacy(&[&local, &documents], &notifier)
            .await?;
        info!("Migration for user {} finished: {:?}", user_id, outcome);

        match outcome {
            MigrationOutcome::NothingToMigrate => {
                ctx.say("Nothing to migrate. No products from an older version were found.")
                    .await?;
            }
            MigrationOutcome::Migrated {
                duplicates,
                dropped,
                ..
            } if duplicates > 0 || dropped > 0 => {
                ctx.say(format!(
                    "Skipped {duplicates} already-recorded products and {dropped} products in categories that are no longer compared."
                ))
                .await?;
            }
            MigrationOutcome::Migrated { .. }
            | MigrationOutcome::Declined { .. }
            | MigrationOutcome::Failed { .. } => {}
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_data_notice_warns_about_other_users() {
        assert!(SHARED_DATA_NOTICE.contains("shared by everyone"));
        assert!(SHARED_DATA_NOTICE.contains("removes it for everyone"));
    }
}
