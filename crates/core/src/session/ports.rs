//! Port interfaces for view navigation
//!
//! The client core never renders anything itself; when a session expires or
//! a guard refuses access it asks the surrounding UI to move elsewhere.

/// Navigation side effects requested by the session logic.
pub trait SessionNavigator: Send + Sync {
    /// Send the user to the login view.
    ///
    /// # Arguments
    /// * `next` - Local path to return to after signing in, if any
    fn redirect_to_login(&self, next: Option<&str>);

    /// Send the user to the home view.
    fn redirect_home(&self);
}
