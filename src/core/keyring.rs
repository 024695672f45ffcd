//! Optional bearer credential kept in the platform keyring.
//!
//! The environment variable always wins; the keyring is consulted only when
//! it is empty.

use std::error::Error;
use std::fmt;

use keyring::Entry;
use tracing::debug;

const KEYRING_SERVICE: &str = "relaychat";
const KEYRING_USER: &str = "bearer";

/// Describes failures when attempting to access the system keyring.
///
/// Recoverable errors indicate that the credential backend was
/// temporarily unavailable (for example when the keychain service is
/// locked or inaccessible).
#[derive(Debug)]
pub enum KeyringAccessError {
    Recoverable(keyring::Error),
    Permanent(keyring::Error),
}

impl KeyringAccessError {
    fn inner(&self) -> &keyring::Error {
        match self {
            KeyringAccessError::Recoverable(err) | KeyringAccessError::Permanent(err) => err,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, KeyringAccessError::Recoverable(_))
    }
}

impl From<keyring::Error> for KeyringAccessError {
    fn from(err: keyring::Error) -> Self {
        match err {
            keyring::Error::PlatformFailure(_) | keyring::Error::NoStorageAccess(_) => {
                KeyringAccessError::Recoverable(err)
            }
            other => KeyringAccessError::Permanent(other),
        }
    }
}

impl fmt::Display for KeyringAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner())
    }
}

impl Error for KeyringAccessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.inner())
    }
}

fn entry() -> Result<Entry, KeyringAccessError> {
    Entry::new(KEYRING_SERVICE, KEYRING_USER).map_err(KeyringAccessError::from)
}

pub fn load_credential() -> Result<Option<String>, KeyringAccessError> {
    match entry()?.get_password() {
        Ok(token) if !token.trim().is_empty() => {
            debug!("bearer credential loaded from keyring");
            Ok(Some(token))
        }
        Ok(_) | Err(keyring::Error::NoEntry) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub fn store_credential(token: &str) -> Result<(), KeyringAccessError> {
    entry()?.set_password(token).map_err(KeyringAccessError::from)
}

/// Returns `true` when an entry existed and was removed.
pub fn remove_credential() -> Result<bool, KeyringAccessError> {
    match entry()?.delete_credential() {
        Ok(()) => Ok(true),
        Err(keyring::Error::NoEntry) => Ok(false),
        Err(err) => Err(err.into()),
    }
}
