use nix::unistd::{Uid, User as PasswdEntry};

/// Shown when a uid has no entry in the user database.
pub const UNKNOWN_USER: &str = "unknown";

//Represents the owner of a process as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Option<u32>,
    pub name: String,
}

impl User {
    //Resolves a uid through the system user database (getpwuid).
    pub fn lookup(uid: Option<u32>) -> Self {
        let name = uid
            .and_then(|id| PasswdEntry::from_uid(Uid::from_raw(id)).ok().flatten())
            .map(|entry| entry.name)
            .unwrap_or_else(|| UNKNOWN_USER.to_string());

        User { id: uid, name }
    }

    pub fn is_known(&self) -> bool {
        self.name != UNKNOWN_USER
    }
}
