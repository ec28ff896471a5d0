use crate::error::SessionError;
use crate::session::store::{MemoryStore, SessionStore};
use crate::types::{Role, UserRecord};

/// Builder for seeded in-memory stores
#[derive(Default)]
pub struct StoreFixture {
    store: MemoryStore,
}

impl StoreFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a raw value, bypassing any validation
    pub fn raw(mut self, key: &str, value: &str) -> Self {
        self.store.set(key, value).expect("memory store set");
        self
    }

    pub fn normal(self, token: &str, role: Role) -> Self {
        let user = test_user(role);
        self.raw("token", token)
            .raw("user", &serde_json::to_string(&user).expect("serialize user"))
    }

    pub fn elevated(self, token: &str, role: Role) -> Self {
        let user = test_user(role);
        self.raw("appAdminToken", token)
            .raw("appAdminUser", &serde_json::to_string(&user).expect("serialize user"))
    }

    pub fn build(self) -> MemoryStore {
        self.store
    }
}

pub fn test_user(role: Role) -> UserRecord {
    UserRecord::new(role)
        .with_name(format!("Test {}", role))
        .with_email(format!("{}@example.com", role.code().to_lowercase().replace(' ', ".")))
}

pub fn normal_store(role: Role) -> MemoryStore {
    StoreFixture::new().normal("normal-token", role).build()
}

pub fn elevated_store(role: Role) -> MemoryStore {
    StoreFixture::new().elevated("elevated-token", role).build()
}

/// Memory store whose first `failures` removals fail
pub struct FlakyStore {
    inner: MemoryStore,
    failures: usize,
}

impl FlakyStore {
    pub fn new(inner: MemoryStore, failures: usize) -> Self {
        Self { inner, failures }
    }
}

impl SessionStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(SessionError::Storage(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "storage is read-only",
            )));
        }
        self.inner.remove(key)
    }
}

/// Memory store whose writes start failing after `allowed` successful sets
pub struct FailingSetStore {
    inner: MemoryStore,
    allowed: usize,
}

impl FailingSetStore {
    pub fn new(inner: MemoryStore, allowed: usize) -> Self {
        Self { inner, allowed }
    }
}

impl SessionStore for FailingSetStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        if self.allowed == 0 {
            return Err(SessionError::Storage(std::io::Error::new(
                std::io::ErrorKind::StorageFull,
                "quota exceeded",
            )));
        }
        self.allowed -= 1;
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.inner.remove(key)
    }
}
