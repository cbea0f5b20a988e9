use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// A participant of the network: an identity that writes posts and replies.
///
/// An author exclusively owns its [`Profile`]. The web layer takes a fresh
/// working copy of the profile (which starts out unmodified), mutates it
/// through the profile setters and hands it back through
/// [`Core::save_author`](crate::core::Core::save_author).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    /// Unique author identifier
    pub id: String,
    /// The author's public name
    pub name: String,
    /// The author's personal information
    pub profile: Profile,
}

impl Author {
    /// Creates a new author with an empty profile.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            profile: Profile::new(),
        }
    }
}
