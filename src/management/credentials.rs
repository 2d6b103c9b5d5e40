use std::collections::HashMap;
use std::sync::Mutex;

use keyring::Entry;

use crate::Res;

pub const SERVICE_SPOTIFY: &str = "spotify";
pub const ACCOUNT_ACCESS_TOKEN: &str = "access-token";
pub const ACCOUNT_REFRESH_TOKEN: &str = "refresh-token";

/// Opaque secret storage keyed by (service, account).
///
/// Exactly one secret exists per key at any time; `save` overwrites
/// (last-write-wins). A missing entry reads as `None` and deletes as a
/// no-op.
pub trait CredentialStore: Send + Sync {
    fn save(&self, service: &str, account: &str, secret: &str) -> Res<()>;
    fn read(&self, service: &str, account: &str) -> Res<Option<String>>;
    fn delete(&self, service: &str, account: &str) -> Res<()>;
}

/// Platform secret storage (Keychain, Secret Service, Credential Manager).
pub struct KeyringStore;

impl CredentialStore for KeyringStore {
    fn save(&self, service: &str, account: &str, secret: &str) -> Res<()> {
        let entry = Entry::new(service, account)?;
        entry.set_password(secret)?;
        Ok(())
    }

    fn read(&self, service: &str, account: &str) -> Res<Option<String>> {
        let entry = Entry::new(service, account)?;
        match entry.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, service: &str, account: &str) -> Res<()> {
        let entry = Entry::new(service, account)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl<S: CredentialStore + ?Sized> CredentialStore for std::sync::Arc<S> {
    fn save(&self, service: &str, account: &str, secret: &str) -> Res<()> {
        (**self).save(service, account, secret)
    }

    fn read(&self, service: &str, account: &str) -> Res<Option<String>> {
        (**self).read(service, account)
    }

    fn delete(&self, service: &str, account: &str) -> Res<()> {
        (**self).delete(service, account)
    }
}

/// In-memory store, used by the test suite.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<(String, String), String>>,
}

impl CredentialStore for MemoryStore {
    fn save(&self, service: &str, account: &str, secret: &str) -> Res<()> {
        self.entries
            .lock()
            .unwrap()
            .insert((service.to_string(), account.to_string()), secret.to_string());
        Ok(())
    }

    fn read(&self, service: &str, account: &str) -> Res<Option<String>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(&(service.to_string(), account.to_string()))
            .cloned())
    }

    fn delete(&self, service: &str, account: &str) -> Res<()> {
        self.entries
            .lock()
            .unwrap()
            .remove(&(service.to_string(), account.to_string()));
        Ok(())
    }
}
