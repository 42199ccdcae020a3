//! Domain types and models
//!
//! Wire payloads exchanged with the roster backend. Every endpoint wraps its
//! payload in an [`Envelope`].

pub mod auth;
pub mod envelope;
pub mod student;

pub use auth::{
    AccessGrant, ChangePasswordRequest, EmailRequest, LoginRequest, RegisterVerifyRequest,
    ResetPasswordRequest, UserProfile,
};
pub use envelope::Envelope;
pub use student::{CreateStudentRequest, Gender, ListStudentsParams, Student, StudentsPage};
