//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions come from the invoking user's own session, so nobody sees
//! another user's stores or products.

use crate::{bot::BotData, core::record::ProductRecord, errors::Error};
use poise::serenity_prelude as serenity;

/// Discord autocomplete limit
const MAX_CHOICES: usize = 25;

/// Provides store names the user has used before.
///
/// Returns distinct, non-blank store names containing the partial input
/// (case-insensitive), in the order they were first used.
pub async fn autocomplete_store_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(session) = ctx.data().session(&ctx.author().id.to_string()).await else {
        return Vec::new();
    };
    let session = session.lock().await;

    session
        .store_suggestions(partial)
        .into_iter()
        .take(MAX_CHOICES)
        .collect()
}

/// Label shown for a product choice (e.g. `Double Roll · Drugstore · ¥400`).
#[must_use]
pub fn product_label(product: &ProductRecord) -> String {
    let mut label = product.name.clone();
    if !product.store.is_empty() {
        label.push_str(" · ");
        label.push_str(&product.store);
    }
    label.push_str(&format!(" · ¥{}", product.price));
    // Discord caps choice names at 100 characters
    label.chars().take(100).collect()
}

/// Provides the user's products in the active category, matched by name or store.
///
/// Each choice shows a readable label and submits the product's id.
pub async fn autocomplete_product(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let Ok(session) = ctx.data().session(&ctx.author().id.to_string()).await else {
        return Vec::new();
    };
    let session = session.lock().await;
    let category = session.category();
    let partial_lower = partial.to_lowercase();

    session
        .products()
        .iter()
        .filter(|product| product.is_in(category))
        .filter(|product| {
            product.name.to_lowercase().contains(&partial_lower)
                || product.store.to_lowercase().contains(&partial_lower)
        })
        .filter_map(|product| {
            product
                .id
                .map(|id| serenity::AutocompleteChoice::new(product_label(product), id))
        })
        .take(MAX_CHOICES)
        .collect()
}
