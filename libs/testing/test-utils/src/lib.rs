//! Shared test infrastructure for the domain crates.
//!
//! - `TestDatabase`: PostgreSQL container with the article schema applied (feature: "postgres")
//! - [`TestDataBuilder`]: deterministic names and ids derived from the test name
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn stores_article() {
//!     let db = TestDatabase::new().await;
//!     let data = TestDataBuilder::from_test_name("stores_article");
//!     let title = data.title("brakes");
//! }
//! ```

use uuid::Uuid;

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Seeded test data so reruns produce the same values.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn id(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }

    /// An article title unique to this seed, e.g. `"Test brakes 1234"`.
    pub fn title(&self, topic: &str) -> String {
        format!("Test {} {}", topic, self.seed)
    }

    /// The slug the article service derives from [`title`](Self::title).
    pub fn slug(&self, topic: &str) -> String {
        format!("test-{}-{}", topic.to_lowercase().replace(' ', "-"), self.seed)
    }
}
