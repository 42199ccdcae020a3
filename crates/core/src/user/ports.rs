//! Port interfaces for user profile lookup
//!
//! These traits define the boundary between the session logic and the HTTP
//! services that reach the backend.

use async_trait::async_trait;
use roster_domain::{Envelope, Result, UserProfile};

/// Source of the signed-in user's profile
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the profile for the current session
    ///
    /// # Errors
    /// Returns error only for transport failures; refused requests come back
    /// as a failure envelope.
    async fn fetch_profile(&self) -> Result<Envelope<UserProfile>>;
}
