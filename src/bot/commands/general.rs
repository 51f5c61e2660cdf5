//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    ///
    /// This is a simple health check command that doesn't require any database operations.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**PriceBuddy Help**\n\
        Compare what you really pay per meter of toilet paper and per pair of tissues.\n\n\
        **Recording Purchases**\n\
        • `/add_toilet <name> <price> <length> <rolls> [multiplier] [store] [memo]` - Records a toilet paper pack.\n\
        • `/add_tissue <name> <price> <pairs_per_box> <boxes> [store] [memo]` - Records a tissue pack.\n\n\
        **Comparing**\n\
        • `/ranking [category]` - Shows your purchases cheapest first.\n\n\
        **Managing**\n\
        • `/edit <product> [fields...]` - Changes a recorded purchase and recalculates it.\n\
        • `/delete <product>` - Deletes one purchase.\n\
        • `/clear [category]` - Deletes every purchase in a category.\n\
        • `/migrate` - Imports products saved by an older version.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
