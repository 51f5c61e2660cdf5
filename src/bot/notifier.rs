//! Discord implementation of the core's [`Notifier`].
//!
//! Toasts are ephemeral replies only the invoking user sees. Confirmations are
//! a message with OK and Cancel buttons; pressing nothing before the configured
//! timeout counts as Cancel.

use crate::{
    bot::BotData,
    core::notify::Notifier,
    errors::{Error, Result},
};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::time::Duration;
use tracing::debug;

/// Sends notifications as replies to one command invocation.
pub struct DiscordNotifier<'a> {
    ctx: poise::Context<'a, BotData, Error>,
    timeout: Duration,
}

impl<'a> DiscordNotifier<'a> {
    /// Creates a notifier replying in `ctx`, with the configured confirmation timeout.
    #[must_use]
    pub fn new(ctx: poise::Context<'a, BotData, Error>) -> Self {
        Self {
            ctx,
            timeout: ctx.data().settings.bot.confirm_timeout(),
        }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier<'_> {
    async fn toast(&self, message: &str) -> Result<()> {
        self.ctx
            .send(
                poise::CreateReply::default()
                    .content(message)
                    .ephemeral(true),
            )
            .await?;
        Ok(())
    }

    async fn confirm(&self, message: &str) -> Result<bool> {
        let ctx = self.ctx;
        let ok_id = format!("{}-ok", ctx.id());
        let cancel_id = format!("{}-cancel", ctx.id());

        let buttons = serenity::CreateActionRow::Buttons(vec![
            serenity::CreateButton::new(ok_id.as_str())
                .label("OK")
                .style(serenity::ButtonStyle::Danger),
            serenity::CreateButton::new(cancel_id.as_str())
                .label("Cancel")
                .style(serenity::ButtonStyle::Secondary),
        ]);
        let reply = ctx
            .send(
                poise::CreateReply::default()
                    .content(message)
                    .components(vec![buttons])
                    .ephemeral(true),
            )
            .await?;

        let expected = (ok_id.clone(), cancel_id);
        let press = serenity::ComponentInteractionCollector::new(ctx)
            .author_id(ctx.author().id)
            .channel_id(ctx.channel_id())
            .timeout(self.timeout)
            .filter(move |press| {
                press.data.custom_id == expected.0 || press.data.custom_id == expected.1
            })
            .await;

        let Some(press) = press else {
            debug!("Confirmation timed out: {}", message);
            reply
                .edit(
                    ctx,
                    poise::CreateReply::default()
                        .content(format!("{message}\n\n⌛ No answer, cancelled."))
                        .components(vec![]),
                )
                .await?;
            return Ok(false);
        };

        let confirmed = press.data.custom_id == ok_id;
        let answer = if confirmed { "OK" } else { "Cancelled" };
        press
            .create_response(
                ctx,
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new()
                        .content(format!("{message}\n\n→ {answer}"))
                        .components(vec![]),
                ),
            )
            .await?;
        Ok(confirmed)
    }

    async fn alert(&self, message: &str) -> Result<()> {
        self.ctx.say(message).await?;
        Ok(())
    }
}
