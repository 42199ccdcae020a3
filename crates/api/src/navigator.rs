//! Terminal stand-in for view navigation

use parking_lot::Mutex;
use roster_core::{login_location, SessionNavigator};
use roster_domain::constants::HOME_VIEW;
use tracing::{info, warn};

use crate::output;

/// Records where the user would have been sent and tells them what to run.
#[derive(Debug, Default)]
pub struct CliNavigator {
    last: Mutex<Option<String>>,
}

impl CliNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location of the most recent redirect, if any.
    pub fn last_redirect(&self) -> Option<String> {
        self.last.lock().clone()
    }
}

impl SessionNavigator for CliNavigator {
    fn redirect_to_login(&self, next: Option<&str>) {
        let location = login_location(next);
        warn!(location = %location, "session required, redirecting to login");
        output::hint("Not signed in or session expired. Run `roster login` first.");
        *self.last.lock() = Some(location);
    }

    fn redirect_home(&self) {
        info!(location = HOME_VIEW, "redirecting home");
        *self.last.lock() = Some(HOME_VIEW.to_string());
    }
}
