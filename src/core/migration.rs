//! One-time migration of legacy local records into the authoritative store.
//!
//! Migration is not transactional. Records saved before a failure stay saved and
//! the legacy sources are kept, so a retry skips what already made it across via
//! the `(name, price, category)` duplicate check.

use crate::{
    core::{
        legacy::LegacySource,
        normalizer,
        notify::Notifier,
        record::ProductRecord,
        store::ProductStore,
    },
    errors::Result,
};
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

/// Name given to legacy records saved without one.
pub const UNNAMED_PRODUCT: &str = "Unnamed product";

/// What a migration run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// No legacy records were found; nothing was asked.
    NothingToMigrate,
    /// The user accepted and every record was handled. Legacy sources are cleared.
    Migrated {
        /// Records saved to the store
        migrated: usize,
        /// Records skipped because an identical purchase already existed
        duplicates: usize,
        /// Records in categories that are no longer compared
        dropped: usize,
    },
    /// The user declined to migrate.
    Declined {
        /// Whether the user then agreed to delete the legacy data anyway
        cleared: bool,
    },
    /// Saving a record failed; the loop stopped and legacy sources were kept.
    Failed {
        /// Records saved before the failure
        migrated: usize,
        /// The underlying error message
        detail: String,
    },
}

/// Records read from the legacy sources, and which sources could be read.
pub struct Gathered<'a> {
    /// Every record from the readable sources, in source order
    pub records: Vec<ProductRecord>,
    /// Sources that loaded successfully; only these may be cleared
    pub readable: Vec<&'a dyn LegacySource>,
}

/// Reads every source. An unreadable source contributes nothing and is left
/// out of [`Gathered::readable`], so its data survives the migration.
pub async fn gather<'a>(sources: &[&'a dyn LegacySource]) -> Gathered<'a> {
    let mut records = Vec::new();
    let mut readable = Vec::new();
    for &source in sources {
        match source.load().await {
            Ok(found) => {
                debug!("Legacy source '{}' holds {} records", source.name(), found.len());
                records.extend(found);
                readable.push(source);
            }
            Err(e) => warn!("Could not read legacy source '{}', keeping it: {}", source.name(), e),
        }
    }
    Gathered { records, readable }
}

/// Clears every given source. Failures are logged and otherwise ignored.
pub async fn clear_all(sources: &[&dyn LegacySource]) {
    for source in sources {
        if let Err(e) = source.clear().await {
            warn!("Could not clear legacy source '{}': {}", source.name(), e);
        }
    }
}

/// Fills the fields older versions could leave empty, then normalizes.
///
/// Returns `None` for records in a category that is no longer compared.
#[must_use]
pub fn prepare(mut record: ProductRecord, now: DateTime<Utc>) -> Option<ProductRecord> {
    record.id = None;
    if record.name.trim().is_empty() {
        record.name = UNNAMED_PRODUCT.to_string();
    }
    if record.registered_at.is_none() {
        record.registered_at = Some(now);
    }
    normalizer::normalize(record).into_kept()
}

/// Runs the migration flow: gather, confirm, save non-duplicates, clear.
///
/// Saved records are appended to `working_set`, which is also what duplicates are
/// checked against. Only notifier failures are returned as errors; a failed save
/// is reported to the user and yields [`MigrationOutcome::Failed`].
pub async fn migrate<S, N>(
    store: &S,
    working_set: &mut Vec<ProductRecord>,
    sources: &[&dyn LegacySource],
    notifier: &N,
) -> Result<MigrationOutcome>
where
    S: ProductStore + ?Sized,
    N: Notifier + ?Sized,
{
    let Gathered {
        records: legacy,
        readable,
    } = gather(sources).await;
    if legacy.is_empty() {
        return Ok(MigrationOutcome::NothingToMigrate);
    }

    let accepted = notifier
        .confirm(&format!(
            "📦 Found {} products saved by an older version.\n\
             Move them into your list?\n\
             (The old local data is deleted afterwards.)",
            legacy.len()
        ))
        .await?;

    if !accepted {
        let cleared = notifier
            .confirm("Delete the old local data anyway?\n(Otherwise you will be asked again next time.)")
            .await?;
        if cleared {
            clear_all(&readable).await;
            notifier.toast("Old local data deleted").await?;
        }
        return Ok(MigrationOutcome::Declined { cleared });
    }

    let now = Utc::now();
    let mut migrated = 0;
    let mut duplicates = 0;
    let mut dropped = 0;

    for record in legacy {
        let Some(mut record) = prepare(record, now) else {
            dropped += 1;
            continue;
        };

        if working_set.iter().any(|existing| existing.same_purchase(&record)) {
            duplicates += 1;
            continue;
        }

        match store.save(&record).await {
            Ok(id) => {
                record.id = Some(id);
                working_set.push(record);
                migrated += 1;
            }
            Err(e) => {
                error!("Migration stopped after {} records: {}", migrated, e);
                let detail = e.to_string();
                notifier
                    .alert(&format!(
                        "❌ Migration error\n\n{detail}\n\nThe old data was kept so you can try again."
                    ))
                    .await?;
                notifier.toast("Migration failed").await?;
                return Ok(MigrationOutcome::Failed { migrated, detail });
            }
        }
    }

    clear_all(&readable).await;
    info!(
        "Migrated {} legacy records ({} duplicates, {} dropped)",
        migrated, duplicates, dropped
    );
    notifier
        .toast(&format!("✅ Migrated {migrated} products"))
        .await?;

    Ok(MigrationOutcome::Migrated {
        migrated,
        duplicates,
        dropped,
    })
}
