//! Authentication CLI commands

use clap::Subcommand;

use crate::display::format_user;
use crate::error::FinanzResult;
use crate::models::{ChangePasswordRequest, LoginRequest, RegisterRequest};
use crate::services::AuthService;

use super::{prompt_password, AppContext};

/// Authentication subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in and store the session
    Login {
        /// Account email
        email: String,
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        /// Display name
        name: String,
        /// Account email
        email: String,
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Refresh the access token
    Refresh,

    /// Change the account password
    #[command(name = "change-password")]
    ChangePassword,
}

/// Handle an auth command
pub fn handle_auth_command(ctx: &AppContext, cmd: AuthCommands) -> FinanzResult<()> {
    let service = AuthService::new(&ctx.client);

    match cmd {
        AuthCommands::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt_password("Password: ")?,
            };
            let request = LoginRequest { email, password };
            let auth = service.login(&request)?;
            println!("Logged in as {}", auth.user);
        }

        AuthCommands::Register {
            name,
            email,
            password,
        } => {
            let password = match password {
                Some(p) => p,
                None => prompt_password("Choose a password: ")?,
            };
            let request = RegisterRequest {
                name,
                email,
                password,
            };
            let user = service.register(&request)?;
            println!("Registered {}", user);
            println!("Run 'finanz auth login {}' to sign in.", user.email);
        }

        AuthCommands::Logout => {
            service.logout()?;
            println!("Logged out.");
        }

        AuthCommands::Whoami => {
            if !service.is_logged_in()? {
                println!("Not logged in. Run 'finanz auth login <email>'.");
                return Ok(());
            }
            print!("{}", format_user(&service.current_user()?));
        }

        AuthCommands::Refresh => {
            service.refresh_token()?;
            println!("Access token refreshed.");
        }

        AuthCommands::ChangePassword => {
            let request = ChangePasswordRequest {
                current_password: prompt_password("Current password: ")?,
                new_password: prompt_password("New password: ")?,
            };
            service.change_password(&request)?;
            println!("Password changed.");
        }
    }

    Ok(())
}
