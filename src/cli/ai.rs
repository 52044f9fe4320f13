//! AI-assisted entry CLI commands

use std::path::PathBuf;

use clap::Subcommand;
use tracing::warn;

use crate::display::format_ai_response;
use crate::error::{FinanzError, FinanzResult};
use crate::services::{
    AiContext, AiService, AiTransactionResponse, AudioInput, CategoryService, CurrencyService,
    ImageInput, OpenAiBackend, PaymentMethodService, TransactionService,
};

use super::{print_response, AppContext};

/// AI subcommands
#[derive(Subcommand)]
pub enum AiCommands {
    /// Describe a transaction in words
    Text {
        /// e.g. "lunch with Ana, 12.50 by card"
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
        /// Record the parsed transaction
        #[arg(long)]
        save: bool,
    },

    /// Read a transaction from a receipt photo
    Image {
        /// Image file (png, jpg, gif, webp)
        path: PathBuf,
        #[arg(long)]
        save: bool,
    },

    /// Transcribe a voice note and read a transaction from it
    Audio {
        /// Audio file (mp3, m4a, wav, webm, ogg, flac)
        path: PathBuf,
        #[arg(long)]
        save: bool,
    },
}

/// Handle an AI command
pub fn handle_ai_command(ctx: &AppContext, cmd: AiCommands) -> FinanzResult<()> {
    let backend = OpenAiBackend::from_settings(ctx.client.transport(), &ctx.settings.ai);
    if !backend.is_configured() {
        return Err(FinanzError::Ai(format!(
            "API key not configured. Set {} to use the AI commands",
            ctx.settings.ai.api_key_env
        )));
    }
    let service = AiService::new(&backend, &ctx.settings.ai);
    let context = build_context(ctx);

    let (response, save) = match cmd {
        AiCommands::Text { message, save } => {
            (service.process_text(&message.join(" "), context.as_ref())?, save)
        }
        AiCommands::Image { path, save } => {
            let image = ImageInput::from_path(&path)?;
            (service.process_image(&image, context.as_ref())?, save)
        }
        AiCommands::Audio { path, save } => {
            let audio = AudioInput::from_path(&path)?;
            let (transcript, response) = service.process_audio(&audio, context.as_ref())?;
            println!("Heard: \"{}\"\n", transcript);
            (response, save)
        }
    };

    print!(
        "{}",
        format_ai_response(&response, context.as_ref(), ctx.symbol())
    );

    if save {
        save_draft(ctx, response)?;
    }

    Ok(())
}

/// The lists the model picks IDs from; without them it falls back to the
/// documented defaults
fn build_context(ctx: &AppContext) -> Option<AiContext> {
    let categories = CategoryService::new(&ctx.client, ctx.fallback()).list();
    let methods = PaymentMethodService::new(&ctx.client, ctx.fallback()).list();
    let currencies = CurrencyService::new(&ctx.client, ctx.fallback()).list();

    match (categories, methods, currencies) {
        (Ok(categories), Ok(methods), Ok(currencies)) => Some(AiContext::from_lists(
            &categories.data,
            &methods.data,
            &currencies.data,
        )),
        (categories, methods, currencies) => {
            let error = categories
                .err()
                .or_else(|| methods.err())
                .or_else(|| currencies.err());
            if let Some(e) = error {
                warn!(error = %e, "sending the request without context");
            }
            None
        }
    }
}

fn save_draft(ctx: &AppContext, response: AiTransactionResponse) -> FinanzResult<()> {
    let Some(request) = response.into_request() else {
        println!("\nNothing to save.");
        return Ok(());
    };

    let saved = TransactionService::new(&ctx.client, ctx.fallback()).create(&request)?;
    print_response(&saved, format!("\nSaved transaction {}\n", saved.data.id));
    Ok(())
}
