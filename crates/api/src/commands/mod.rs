//! Command handlers
//!
//! Each handler returns an [`Outcome`]; printing and the exit status are
//! decided by the binary.

pub mod auth;
pub mod students;

use roster_domain::Envelope;
use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::Command;
use crate::context::AppContext;

/// Result of one command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Server answer, printed verbatim.
    Envelope { code: i64, body: Value },
    /// Answer computed without the server.
    Local(Value),
    /// A guard stopped the command before any request was made.
    Blocked { location: Option<String>, reason: String },
}

impl Outcome {
    /// Exit status: 0 success, 1 domain failure, 2 stopped by a guard.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Envelope { code, .. } if *code == 0 => 0,
            Self::Envelope { .. } => 1,
            Self::Local(_) => 0,
            Self::Blocked { .. } => 2,
        }
    }

    /// What gets printed on stdout.
    #[must_use]
    pub fn body(&self) -> Value {
        match self {
            Self::Envelope { body, .. } | Self::Local(body) => body.clone(),
            Self::Blocked { location, reason } => json!({"redirect": location, "reason": reason}),
        }
    }

    pub(crate) fn from_envelope<T: Serialize>(envelope: &Envelope<T>) -> anyhow::Result<Self> {
        Ok(Self::Envelope { code: envelope.code, body: serde_json::to_value(envelope)? })
    }
}

/// Dispatch `command`.
///
/// # Errors
/// Transport, storage and local validation failures.
pub async fn run(ctx: &AppContext, command: &Command) -> anyhow::Result<Outcome> {
    match command {
        Command::Login(args) => auth::login(ctx, args).await,
        Command::Logout => auth::logout(ctx).await,
        Command::Me => auth::me(ctx).await,
        Command::Whoami(args) => auth::whoami(ctx, args).await,
        Command::Register(cmd) => auth::register(ctx, cmd).await,
        Command::Password(cmd) => auth::password(ctx, cmd).await,
        Command::Students(cmd) => students::students(ctx, cmd).await,
        Command::Manage(cmd) => students::manage(ctx, cmd).await,
    }
}
