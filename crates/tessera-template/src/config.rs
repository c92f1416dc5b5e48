//! Engine configuration.

use crate::cache::DEFAULT_CACHE_CAPACITY;

/// Template cache configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
	/// Maximum number of compiled templates retained (minimum one)
	pub capacity: usize,
}

impl Default for CacheConfig {
	fn default() -> Self {
		Self {
			capacity: DEFAULT_CACHE_CAPACITY,
		}
	}
}

impl CacheConfig {
	/// Creates the default configuration
	///
	/// # Examples
	///
	/// ```
	/// use tessera_template::CacheConfig;
	///
	/// let config = CacheConfig::new();
	/// assert_eq!(config.capacity, 500);
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a builder for fluent configuration
	///
	/// # Examples
	///
	/// ```
	/// use tessera_template::CacheConfig;
	///
	/// let config = CacheConfig::builder().capacity(64).build();
	/// assert_eq!(config.capacity, 64);
	/// ```
	pub fn builder() -> CacheConfigBuilder {
		CacheConfigBuilder::default()
	}
}

/// Builder for CacheConfig
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
	capacity: Option<usize>,
}

impl CacheConfigBuilder {
	/// Set the cache capacity
	pub fn capacity(mut self, capacity: usize) -> Self {
		self.capacity = Some(capacity);
		self
	}

	/// Build the configuration
	pub fn build(self) -> CacheConfig {
		let default = CacheConfig::default();
		CacheConfig {
			capacity: self.capacity.unwrap_or(default.capacity).max(1),
		}
	}
}
