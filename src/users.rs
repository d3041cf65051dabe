use crate::prelude::*;
use nix::unistd::{Uid, User};
use std::collections::HashMap;

/// Account name of the administrator, excluded by `--no-root`
pub const ROOT_USER: &str = "root";

/// Resolves the uid owning a process to a display name
pub trait OwnerLookup {
    fn owner_name(&mut self, uid: u32) -> String;
}

/// Owner lookup backed by the system account database, with a per-run cache
#[derive(Debug, Default)]
pub struct UserDirectory {
    names: HashMap<u32, String>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that `name` is a real account
    pub fn user_exists(name: &str) -> Result<bool> {
        let user = User::from_name(name).with_context(|| format!("Failed to look up user {name}"))?;
        Ok(user.is_some())
    }
}

impl OwnerLookup for UserDirectory {
    fn owner_name(&mut self, uid: u32) -> String {
        self.names
            .entry(uid)
            .or_insert_with(|| match User::from_uid(Uid::from_raw(uid)) {
                Ok(Some(user)) => user.name,
                Ok(None) => format!("#{uid}"),
                Err(e) => {
                    debug!("Failed to resolve uid {uid}: {e}");
                    format!("#{uid}")
                }
            })
            .clone()
    }
}

/// Name of the user running pstree, if it can be resolved
pub fn current_username() -> Option<String> {
    match User::from_uid(Uid::current()) {
        Ok(user) => user.map(|u| u.name),
        Err(e) => {
            debug!("Failed to resolve current user: {e}");
            None
        }
    }
}

#[cfg(test)]
impl OwnerLookup for HashMap<u32, String> {
    fn owner_name(&mut self, uid: u32) -> String {
        self.get(&uid).cloned().unwrap_or_else(|| format!("#{uid}"))
    }
}
