use clap::Subcommand;
use serde_json::json;

use crate::api::auth::{LoginRequest, UpdatePasswordRequest};
use crate::cli::context::CliContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::router;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to server")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, env = "HRADMIN_PASSWORD", help = "Password (read from stdin if not provided)")]
        password: Option<String>,
        #[arg(long, help = "Screen to open after login, e.g. /emp")]
        redirect: Option<String>,
    },

    #[command(about = "Logout and clear the stored session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show current user information")]
    Whoami,

    #[command(about = "Change the password of the signed-in user")]
    Password {
        #[arg(long, env = "HRADMIN_NEW_PASSWORD", help = "New password (read from stdin if not provided)")]
        new_password: Option<String>,
    },
}

pub async fn handle(cmd: AuthCommands, ctx: &CliContext) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { username, password, redirect } => {
            let password = match password {
                Some(p) => p,
                None => read_secret_line("Password")?,
            };

            let request = LoginRequest { username: username.clone(), password };
            let response = ctx.client.auth().sign_in(&request).await?;

            // Resume the screen an earlier command was bounced from
            let pending = ctx
                .session()
                .take_pending_redirect()
                .and_then(|location| router::redirect_target(&location));
            let target = redirect
                .or(pending)
                .unwrap_or_else(|| router::HOME_PATH.to_string());
            let landed = ctx.router.push(&target);

            output_success(
                &ctx.output,
                &format!("Logged in as {}", username),
                Some(json!({
                    "id": response.id,
                    "username": username,
                    "name": response.name,
                    "role": response.role_name,
                    "first_login": response.is_first_logged,
                    "location": landed,
                })),
            )?;

            if response.is_first_logged && ctx.output == OutputFormat::Text {
                println!("First login: please change your password with 'hradmin auth password'");
            }
            Ok(())
        }
        AuthCommands::Logout => {
            ctx.client.auth().sign_out()?;
            ctx.router.push(router::LOGIN_PATH);
            output_success(&ctx.output, "Logged out", None)
        }
        AuthCommands::Status => {
            let session = ctx.session();
            let authenticated = session.is_authenticated();
            match ctx.output {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({
                        "authenticated": authenticated,
                        "role": session.role(),
                        "admin": session.is_admin(),
                    }))?);
                }
                OutputFormat::Text => {
                    if authenticated {
                        println!("Signed in (role: {})", session.role().unwrap_or_else(|| "-".to_string()));
                    } else {
                        println!("Not signed in");
                    }
                }
            }
            Ok(())
        }
        AuthCommands::Whoami => {
            let user = ctx
                .session()
                .current_user()
                .ok_or_else(|| anyhow::anyhow!("Not signed in"))?;
            output_record(&ctx.output, &user, |u| {
                println!("Username: {}", u.username);
                println!("Name:     {}", if u.name.is_empty() { "-" } else { u.name.as_str() });
                println!("Role:     {}", if u.role_name.is_empty() { "-" } else { u.role_name.as_str() });
                println!("ID:       {}", display_opt(&u.id));
            })
        }
        AuthCommands::Password { new_password } => {
            let user = ctx
                .session()
                .current_user()
                .ok_or_else(|| anyhow::anyhow!("Not signed in"))?;
            let password = match new_password {
                Some(p) => p,
                None => read_secret_line("New password")?,
            };

            let envelope = ctx
                .client
                .auth()
                .update_password(&UpdatePasswordRequest { id: user.id, password })
                .await?;
            output_mutation(&ctx.output, envelope, "Password updated")
        }
    }
}

fn read_secret_line(label: &str) -> anyhow::Result<String> {
    eprint!("{}: ", label);
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let secret = line.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string();
    if secret.is_empty() {
        anyhow::bail!("{} must not be empty", label);
    }
    Ok(secret)
}
