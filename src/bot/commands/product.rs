//! Product Discord commands - recording purchases, ranking, editing and deleting.
//!
//! Every command works on the invoking user's session. Validation and save
//! problems are reported by the session itself through the Discord notifier.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData, commands::CategoryChoice, handlers::autocomplete, notifier::DiscordNotifier,
            render,
        },
        core::{
            calculator::Measurement,
            session::{ProductDraft, ProductEdit, legacy_pending},
        },
        errors::{Error, Result},
    };

    /// Records the draft in the user's session and shows the updated ranking.
    async fn add_and_rank(
        ctx: poise::Context<'_, BotData, Error>,
        draft: ProductDraft,
    ) -> Result<()> {
        let session = ctx.data().session(&ctx.author().id.to_string()).await?;
        let notifier = DiscordNotifier::new(ctx);
        let mut session = session.lock().await;

        session.set_category(draft.measurement.category());
        if session.add_product(draft, &notifier).await?.is_some() {
            let embed = render::ranking_embed(session.category(), &session.ranking());
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Ok(())
    }

    /// Records a toilet paper purchase and ranks it by price per meter.
    #[poise::command(slash_command)]
    pub async fn add_toilet(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product name (e.g., 'Scottie 2x Long')"] name: String,
        #[description = "Total price paid"] price: f64,
        #[description = "Meters per roll (e.g., 30)"] length: f64,
        #[description = "Number of rolls in the pack"] rolls: f64,
        #[description = "Length multiplier, e.g. 2 for double-length rolls. Defaults to 1."]
        multiplier: Option<f64>,
        #[description = "Where you bought it"]
        #[autocomplete = "autocomplete::autocomplete_store_name"]
        store: Option<String>,
        #[description = "Free-form note"] memo: Option<String>,
    ) -> Result<()> {
        let draft = ProductDraft {
            name,
            store: store.unwrap_or_default(),
            price,
            memo: memo.unwrap_or_default(),
            measurement: Measurement::Toilet {
                length,
                multiplier: multiplier.unwrap_or(1.0),
                rolls,
            },
        };
        add_and_rank(ctx, draft).await
    }

    /// Records a tissue purchase and ranks it by price per pair.
    #[poise::command(slash_command)]
    pub async fn add_tissue(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product name"] name: String,
        #[description = "Total price paid"] price: f64,
        #[description = "Pairs (two-ply sheets) per box"] pairs_per_box: f64,
        #[description = "Number of boxes in the pack"] boxes: f64,
        #[description = "Where you bought it"]
        #[autocomplete = "autocomplete::autocomplete_store_name"]
        store: Option<String>,
        #[description = "Free-form note"] memo: Option<String>,
    ) -> Result<()> {
        let draft = ProductDraft {
            name,
            store: store.unwrap_or_default(),
            price,
            memo: memo.unwrap_or_default(),
            measurement: Measurement::Tissue {
                pairs_per_box,
                boxes,
            },
        };
        add_and_rank(ctx, draft).await
    }

    /// Shows your purchases in a category, cheapest per unit first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ranking(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Category to compare. Defaults to the last one used."] category: Option<
            CategoryChoice,
        >,
    ) -> Result<()> {
        let session = ctx.data().session(&ctx.author().id.to_string()).await?;
        let mut session = session.lock().await;
        if let Some(category) = category {
            session.set_category(category.into());
        }

        let embed = render::ranking_embed(session.category(), &session.ranking());
        ctx.send(poise::CreateReply::default().embed(embed)).await?;

        let (local, documents) = ctx.data().legacy_sources();
        let pending = legacy_pending(&[&local, &documents]).await;
        if pending > 0 {
            ctx.say(format!(
                "📦 {pending} products saved by an older version are waiting. Run `/migrate` to import them."
            ))
            .await?;
        }
        Ok(())
    }

    /// Changes a recorded purchase. Omitted fields keep their current value.
    #[poise::command(slash_command)]
    pub async fn edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to edit"]
        #[autocomplete = "autocomplete::autocomplete_product"]
        product: i64,
        #[description = "New name"] name: Option<String>,
        #[description = "New total price"] price: Option<f64>,
        #[description = "New store"]
        #[autocomplete = "autocomplete::autocomplete_store_name"]
        store: Option<String>,
        #[description = "New memo"] memo: Option<String>,
        #[description = "Toilet paper: meters per roll"] length: Option<f64>,
        #[description = "Toilet paper: length multiplier"] multiplier: Option<f64>,
        #[description = "Toilet paper: number of rolls"] rolls: Option<f64>,
        #[description = "Tissue: pairs per box"] pairs_per_box: Option<f64>,
        #[description = "Tissue: number of boxes"] boxes: Option<f64>,
    ) -> Result<()> {
        let edit = ProductEdit {
            name,
            store,
            price,
            memo,
            length,
            multiplier,
            rolls,
            pairs_per_box,
            boxes,
        };

        let session = ctx.data().session(&ctx.author().id.to_string()).await?;
        let notifier = DiscordNotifier::new(ctx);
        let mut session = session.lock().await;
        session.edit_product(product, &edit, &notifier).await?;
        Ok(())
    }

    /// Deletes one recorded purchase after confirmation.
    #[poise::command(slash_command)]
    pub async fn delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to delete"]
        #[autocomplete = "autocomplete::autocomplete_product"]
        product: i64,
    ) -> Result<()> {
        let session = ctx.data().session(&ctx.author().id.to_string()).await?;
        let notifier = DiscordNotifier::new(ctx);
        let mut session = session.lock().await;
        session.delete_product(product, &notifier).await?;
        Ok(())
    }

    /// Deletes every purchase in a category after confirmation.
    #[poise::command(slash_command)]
    pub async fn clear(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Category to clear. Defaults to the last one used."] category: Option<
            CategoryChoice,
        >,
    ) -> Result<()> {
        let session = ctx.data().session(&ctx.author().id.to_string()).await?;
        let notifier = DiscordNotifier::new(ctx);
        let mut session = session.lock().await;
        if let Some(category) = category {
            session.set_category(category.into());
        }
        session.clear_category(&notifier).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
