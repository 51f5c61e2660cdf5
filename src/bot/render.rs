//! Embed rendering of rankings.
//!
//! Field text is built by plain functions so it can be tested without Discord;
//! [`ranking_embed`] only assembles it. Everything is cut to Discord's embed
//! limits, counted in characters.

use crate::core::{
    ranking::{RankedProduct, Ranking},
    record::{Category, ProductRecord},
};
use poise::serenity_prelude as serenity;

/// Discord caps an embed at 25 fields; one is kept for the incomplete list.
const MAX_RANKED_FIELDS: usize = 24;
const MAX_FIELD_NAME: usize = 256;
const MAX_FIELD_VALUE: usize = 1024;
const MAX_EMBED_CHARS: usize = 6000;
/// Room left in the incomplete field for the "…and N more" line.
const INCOMPLETE_BUDGET: usize = 1000;
const MAX_MEMO_CHARS: usize = 200;
const MAX_STORE_CHARS: usize = 100;
const MAX_INCOMPLETE_LINE: usize = 200;
/// Kept free for the footer.
const FOOTER_RESERVE: usize = 64;

/// Cuts `text` to at most `max` characters, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Category accent color.
const fn color(category: Category) -> u32 {
    match category {
        Category::Toilet => 0x0058_65F2,
        Category::Tissue => 0x0057_F287,
    }
}

fn default_unit(category: Category) -> &'static str {
    match category {
        Category::Toilet => "m",
        Category::Tissue => "組",
    }
}

/// Quantity text for the record's category (`30m × 2 · 8 rolls`, `150 pairs/box · 5 boxes`).
#[must_use]
pub fn stats_line(product: &ProductRecord) -> String {
    let value = |v: Option<f64>| v.map_or_else(|| "?".to_string(), |v| v.to_string());
    match product.category() {
        Some(Category::Toilet) => format!(
            "{}m × {} · {} rolls",
            value(product.length),
            value(product.multiplier.or(Some(1.0))),
            value(product.rolls)
        ),
        Some(Category::Tissue) => {
            let per_box = if product.pairs_per_box.is_some() {
                format!("{} pairs/box", value(product.pairs_per_box))
            } else {
                format!("{} sheets/box", value(product.sheets_per_box))
            };
            format!("{per_box} · {} boxes", value(product.boxes))
        }
        None => String::new(),
    }
}

fn details(product: &ProductRecord) -> Vec<String> {
    let mut lines = vec![stats_line(product), format!("¥{}", product.price)];
    if !product.store.is_empty() {
        lines.push(format!("🏪 {}", truncate(&product.store, MAX_STORE_CHARS)));
    }
    if !product.memo.is_empty() {
        lines.push(format!("📝 {}", truncate(&product.memo, MAX_MEMO_CHARS)));
    }
    if let Some(registered_at) = product.registered_at {
        lines.push(format!("📅 {}", registered_at.format("%Y-%m-%d")));
    }
    if let Some(id) = product.id {
        lines.push(format!("ID {id}"));
    }
    lines
}

/// Field title and body for one ranked product.
#[must_use]
pub fn ranked_field(entry: &RankedProduct<'_>, category: Category) -> (String, String) {
    let unit = entry
        .product
        .unit
        .as_deref()
        .unwrap_or_else(|| default_unit(category));
    let title = format!("{} · {}", entry.badge.label(entry.rank), entry.product.name);
    let mut body = vec![format!("**{:.2} ¥/{unit}**", entry.unit_price)];
    body.extend(details(entry.product));
    (
        truncate(&title, MAX_FIELD_NAME),
        truncate(&body.join("\n"), MAX_FIELD_VALUE),
    )
}

/// Field listing the products that could not be ranked.
///
/// Lines past the field's size limit are summarized as "…and N more".
#[must_use]
pub fn incomplete_field(incomplete: &[&ProductRecord]) -> Option<(String, String)> {
    if incomplete.is_empty() {
        return None;
    }

    let mut lines: Vec<String> = Vec::new();
    let mut used = 0;
    for product in incomplete {
        let id = product.id.map(|id| format!(" (ID {id})")).unwrap_or_default();
        let line = truncate(
            &format!("• {}{id}: ¥{}, missing quantities", product.name, product.price),
            MAX_INCOMPLETE_LINE,
        );
        let len = char_len(&line) + usize::from(!lines.is_empty());
        if used + len > INCOMPLETE_BUDGET {
            break;
        }
        used += len;
        lines.push(line);
    }
    let hidden = incomplete.len() - lines.len();
    if hidden > 0 {
        lines.push(format!("…and {hidden} more"));
    }

    Some((format!("⚠️ Incomplete ({})", incomplete.len()), lines.join("\n")))
}

fn embed_title(category: Category) -> String {
    format!("**{} ranking**", category.display_name())
}

/// Fields and footer of a non-empty ranking embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingLayout {
    /// `(name, value)` pairs, ranked products first, then the incomplete list
    pub fields: Vec<(String, String)>,
    /// Set when some ranked products did not fit
    pub footer: Option<String>,
}

impl RankingLayout {
    /// Characters Discord counts toward the embed total, title excluded.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.fields
            .iter()
            .map(|(name, value)| char_len(name) + char_len(value))
            .sum::<usize>()
            + self.footer.as_deref().map_or(0, char_len)
    }
}

/// Lays out as many ranked products as fit in one embed, cheapest first.
///
/// The incomplete list always gets its field; ranked products stop at the
/// field cap or once the embed's total size would be exceeded.
#[must_use]
pub fn ranking_layout(category: Category, ranking: &Ranking<'_>) -> RankingLayout {
    let incomplete = incomplete_field(&ranking.incomplete);
    let mut budget = MAX_EMBED_CHARS - FOOTER_RESERVE - char_len(&embed_title(category));
    if let Some((name, value)) = &incomplete {
        budget = budget.saturating_sub(char_len(name) + char_len(value));
    }

    let mut fields = Vec::new();
    for entry in ranking.entries.iter().take(MAX_RANKED_FIELDS) {
        let (name, value) = ranked_field(entry, category);
        let len = char_len(&name) + char_len(&value);
        if len > budget {
            break;
        }
        budget -= len;
        fields.push((name, value));
    }

    let shown = fields.len();
    let footer = (shown < ranking.entries.len())
        .then(|| format!("Showing the cheapest {shown} of {}", ranking.entries.len()));
    fields.extend(incomplete);

    RankingLayout { fields, footer }
}

/// Builds the ranking embed for one category.
#[must_use]
pub fn ranking_embed(category: Category, ranking: &Ranking<'_>) -> serenity::CreateEmbed {
    let embed = serenity::CreateEmbed::default()
        .title(embed_title(category))
        .color(color(category));

    if ranking.is_empty() {
        let command = match category {
            Category::Toilet => "/add_toilet",
            Category::Tissue => "/add_tissue",
        };
        return embed.description(format!("No products yet. Use `{command}` to add one."));
    }

    let layout = ranking_layout(category, ranking);
    let mut embed = embed.fields(
        layout
            .fields
            .into_iter()
            .map(|(name, value)| (name, value, false)),
    );
    if let Some(footer) = layout.footer {
        embed = embed.footer(serenity::CreateEmbedFooter::new(footer));
    }
    embed
}
