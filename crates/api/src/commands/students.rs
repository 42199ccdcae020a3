//! Student commands
//!
//! `students` needs a session; `manage` additionally needs the admin role
//! decoded from the token.

use anyhow::Context;
use roster_common::Role;
use roster_core::{require_auth, require_role, Access};
use roster_domain::{CreateStudentRequest, ListStudentsParams};

use super::Outcome;
use crate::cli::StudentsCommand;
use crate::context::AppContext;

const STUDENTS_VIEW: &str = "/students";
const MANAGE_VIEW: &str = "/manage";

pub async fn students(ctx: &AppContext, command: &StudentsCommand) -> anyhow::Result<Outcome> {
    if !require_auth(&ctx.tokens, Some(STUDENTS_VIEW), ctx.navigator.as_ref()) {
        return Ok(blocked(ctx, "sign in required"));
    }
    execute(ctx, command).await
}

pub async fn manage(ctx: &AppContext, command: &StudentsCommand) -> anyhow::Result<Outcome> {
    if !require_auth(&ctx.tokens, Some(MANAGE_VIEW), ctx.navigator.as_ref()) {
        return Ok(blocked(ctx, "sign in required"));
    }
    match require_role(&ctx.tokens, Role::Admin, ctx.navigator.as_ref()) {
        Access::Granted => execute(ctx, command).await,
        Access::Pending => Ok(Outcome::Blocked {
            location: None,
            reason: "administrator role required".into(),
        }),
        Access::Denied => Ok(blocked(ctx, "administrator role required")),
    }
}

fn blocked(ctx: &AppContext, reason: &str) -> Outcome {
    Outcome::Blocked { location: ctx.navigator.last_redirect(), reason: reason.to_string() }
}

async fn execute(ctx: &AppContext, command: &StudentsCommand) -> anyhow::Result<Outcome> {
    match command {
        StudentsCommand::List { page, page_size } => {
            let params = ListStudentsParams { page: *page, page_size: *page_size };
            let envelope = ctx.students.list(params).await.context("student list request failed")?;
            Outcome::from_envelope(&envelope)
        }
        StudentsCommand::Create(args) => {
            let request = CreateStudentRequest {
                name: args.name.clone(),
                gender: args.gender,
                age: args.age,
                student_id: args.student_id.clone(),
            };
            let envelope =
                ctx.students.create(&request).await.context("student create request failed")?;
            Outcome::from_envelope(&envelope)
        }
    }
}
