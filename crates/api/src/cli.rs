//! Command-line surface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use roster_domain::{Config, Gender};

/// Student roster client.
#[derive(Debug, Parser)]
#[command(name = "roster", author, version, about)]
pub struct Cli {
    /// Config file to load instead of probing the usual locations.
    #[arg(long, global = true, env = "ROSTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8000/api
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Log as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Apply flag overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url.clone_from(base_url);
        }
        if self.log_json {
            config.logging.json = true;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the access token.
    Login(LoginArgs),
    /// End the session and forget the stored token.
    Logout,
    /// Fetch the signed-in user's profile.
    Me,
    /// Show the locally stored session without contacting the server.
    Whoami(WhoamiArgs),
    /// Create an account with an emailed verification code.
    #[command(subcommand)]
    Register(RegisterCommand),
    /// Change or reset the password.
    #[command(subcommand)]
    Password(PasswordCommand),
    /// Browse and add students.
    #[command(subcommand)]
    Students(StudentsCommand),
    /// Administrative student management (admin role required).
    #[command(subcommand)]
    Manage(StudentsCommand),
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long, short)]
    pub username: String,

    #[arg(long, short, env = "ROSTER_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Where to continue after signing in; only local paths are honoured.
    #[arg(long)]
    pub next: Option<String>,
}

#[derive(Debug, Args)]
pub struct WhoamiArgs {
    /// Also resolve the profile from the server.
    #[arg(long)]
    pub profile: bool,
}

#[derive(Debug, Subcommand)]
pub enum RegisterCommand {
    /// Email a verification code.
    SendCode {
        #[arg(long)]
        email: String,
    },
    /// Create the account and sign in.
    Verify {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: String,
        #[arg(long, env = "ROSTER_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum PasswordCommand {
    /// Change the password of the signed-in user.
    Change {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    /// Email a password reset code.
    SendResetCode {
        #[arg(long)]
        email: String,
    },
    /// Set a new password with a reset code.
    Reset {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum StudentsCommand {
    /// One page of students.
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Add a student.
    Create(CreateStudentArgs),
}

#[derive(Debug, Args)]
pub struct CreateStudentArgs {
    #[arg(long)]
    pub name: String,

    /// male or female
    #[arg(long)]
    pub gender: Gender,

    #[arg(long)]
    pub student_id: String,

    #[arg(long)]
    pub age: Option<u32>,
}
