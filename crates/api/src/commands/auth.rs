//! Session and account commands

use anyhow::Context;
use roster_core::sanitize_next;
use roster_domain::{ChangePasswordRequest, LoginRequest, RegisterVerifyRequest, ResetPasswordRequest};
use serde_json::json;
use tracing::info;

use super::Outcome;
use crate::cli::{LoginArgs, PasswordCommand, RegisterCommand, WhoamiArgs};
use crate::context::AppContext;
use crate::output;

pub async fn login(ctx: &AppContext, args: &LoginArgs) -> anyhow::Result<Outcome> {
    let request = LoginRequest { username: args.username.clone(), password: args.password.clone() };
    let envelope = ctx.auth.login(&request).await.context("login request failed")?;

    if envelope.is_success() {
        let next = sanitize_next(args.next.as_deref());
        info!(role = ?ctx.tokens.role(), next, "signed in");
        output::hint(&format!("Signed in. Continue at {next}"));
    }
    Outcome::from_envelope(&envelope)
}

pub async fn logout(ctx: &AppContext) -> anyhow::Result<Outcome> {
    let result = ctx.auth.logout().await;
    ctx.forget_cookies();
    let envelope = result.context("logout request failed")?;
    Outcome::from_envelope(&envelope)
}

pub async fn me(ctx: &AppContext) -> anyhow::Result<Outcome> {
    let envelope = ctx.auth.me().await.context("profile request failed")?;
    Outcome::from_envelope(&envelope)
}

pub async fn whoami(ctx: &AppContext, args: &WhoamiArgs) -> anyhow::Result<Outcome> {
    let mut report = json!({
        "authenticated": ctx.tokens.is_authenticated(),
        "role": ctx.tokens.role(),
    });
    if args.profile {
        report["profile"] = serde_json::to_value(ctx.current_user.current_user().await)?;
    }
    Ok(Outcome::Local(report))
}

pub async fn register(ctx: &AppContext, command: &RegisterCommand) -> anyhow::Result<Outcome> {
    match command {
        RegisterCommand::SendCode { email } => {
            let envelope =
                ctx.auth.send_register_code(email).await.context("send-code request failed")?;
            Outcome::from_envelope(&envelope)
        }
        RegisterCommand::Verify { email, code, password } => {
            let request = RegisterVerifyRequest {
                email: email.clone(),
                code: code.clone(),
                password: password.clone(),
            };
            let envelope =
                ctx.auth.verify_and_create(&request).await.context("registration failed")?;
            Outcome::from_envelope(&envelope)
        }
    }
}

pub async fn password(ctx: &AppContext, command: &PasswordCommand) -> anyhow::Result<Outcome> {
    let envelope = match command {
        PasswordCommand::Change { old, new, confirm } => {
            let request = ChangePasswordRequest {
                old_password: old.clone(),
                new_password: new.clone(),
                confirm_password: confirm.clone(),
            };
            ctx.auth.change_password(&request).await.context("password change failed")?
        }
        PasswordCommand::SendResetCode { email } => {
            ctx.auth.send_reset_code(email).await.context("reset-code request failed")?
        }
        PasswordCommand::Reset { email, code, new, confirm } => {
            let request = ResetPasswordRequest {
                email: email.clone(),
                code: code.clone(),
                new_password: new.clone(),
                confirm_password: confirm.clone(),
            };
            ctx.auth.reset_password(&request).await.context("password reset failed")?
        }
    };
    Outcome::from_envelope(&envelope)
}
