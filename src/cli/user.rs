//! User profile CLI commands

use clap::Subcommand;

use crate::display::format_user;
use crate::error::FinanzResult;
use crate::models::UpdateUserRequest;
use crate::services::UserService;

use super::AppContext;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Show the profile stored on the backend
    Show,

    /// Update the profile
    Update {
        /// New display name
        #[arg(short, long)]
        name: Option<String>,
        /// New email
        #[arg(short, long)]
        email: Option<String>,
    },
}

/// Handle a user command
pub fn handle_user_command(ctx: &AppContext, cmd: UserCommands) -> FinanzResult<()> {
    let service = UserService::new(&ctx.client);

    match cmd {
        UserCommands::Show => {
            print!("{}", format_user(&service.current_user()?));
        }

        UserCommands::Update { name, email } => {
            let user = service.update_profile(&UpdateUserRequest { name, email })?;
            println!("Profile updated.");
            print!("{}", format_user(&user));
        }
    }

    Ok(())
}
