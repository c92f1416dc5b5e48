//! Process-wide cache of compiled templates.
//!
//! Keys are template identities. Entries are evicted strictly first-in,
//! first-out once the capacity is exceeded: a hit does not refresh an entry's
//! position.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;

use crate::config::CacheConfig;
use crate::error::CompileError;
use crate::strings::{TemplateKey, TemplateResult};
use crate::template::CompiledTemplate;

/// Default number of compiled templates retained.
pub const DEFAULT_CACHE_CAPACITY: usize = 500;

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStatistics {
	/// Lookups served from the cache
	pub hits: u64,
	/// Lookups that compiled a template
	pub misses: u64,
	/// Total number of lookups
	pub total_requests: u64,
	/// Entries dropped to stay within capacity
	pub evictions: u64,
	/// Current number of entries
	pub entry_count: u64,
	/// Configured capacity
	pub capacity: u64,
}

impl CacheStatistics {
	/// Calculate hit rate (0.0 to 1.0)
	///
	/// # Examples
	///
	/// ```
	/// use tessera_template::CacheStatistics;
	///
	/// let stats = CacheStatistics {
	///     hits: 3,
	///     misses: 1,
	///     total_requests: 4,
	///     ..Default::default()
	/// };
	/// assert_eq!(stats.hit_rate(), 0.75);
	/// ```
	pub fn hit_rate(&self) -> f64 {
		if self.total_requests == 0 {
			0.0
		} else {
			self.hits as f64 / self.total_requests as f64
		}
	}
}

/// FIFO-bounded map from template identity to compiled template.
#[derive(Debug)]
pub struct TemplateCache {
	entries: HashMap<TemplateKey, Arc<CompiledTemplate>>,
	order: VecDeque<TemplateKey>,
	capacity: usize,
	hits: u64,
	misses: u64,
	evictions: u64,
}

impl Default for TemplateCache {
	fn default() -> Self {
		Self::with_capacity(DEFAULT_CACHE_CAPACITY)
	}
}

impl TemplateCache {
	/// Creates a cache with the default capacity.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a cache holding at most `capacity` templates (minimum one).
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			entries: HashMap::new(),
			order: VecDeque::new(),
			capacity: capacity.max(1),
			hits: 0,
			misses: 0,
			evictions: 0,
		}
	}

	/// Returns the compiled template for `result`, compiling on a miss.
	pub fn get_or_compile(
		&mut self,
		result: &TemplateResult,
	) -> Result<Arc<CompiledTemplate>, CompileError> {
		if let Some(compiled) = self.entries.get(result.key()) {
			self.hits += 1;
			return Ok(Arc::clone(compiled));
		}

		self.misses += 1;
		let compiled = Arc::new(CompiledTemplate::compile(
			result.key().clone(),
			&result.segments(),
		)?);
		self.entries.insert(result.key().clone(), Arc::clone(&compiled));
		self.order.push_back(result.key().clone());
		self.evict_overflow();
		Ok(compiled)
	}

	/// Looks up a compiled template without compiling or counting.
	pub fn get(&self, key: &TemplateKey) -> Option<Arc<CompiledTemplate>> {
		self.entries.get(key).cloned()
	}

	/// Returns true if `key` is cached.
	pub fn contains(&self, key: &TemplateKey) -> bool {
		self.entries.contains_key(key)
	}

	/// Number of cached templates.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if nothing is cached.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Configured capacity.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Changes the capacity, evicting the oldest entries if needed.
	pub fn set_capacity(&mut self, capacity: usize) {
		self.capacity = capacity.max(1);
		self.evict_overflow();
	}

	/// Drops every entry and resets the counters.
	pub fn clear(&mut self) {
		self.entries.clear();
		self.order.clear();
		self.hits = 0;
		self.misses = 0;
		self.evictions = 0;
	}

	/// Current statistics.
	pub fn statistics(&self) -> CacheStatistics {
		CacheStatistics {
			hits: self.hits,
			misses: self.misses,
			total_requests: self.hits + self.misses,
			evictions: self.evictions,
			entry_count: self.entries.len() as u64,
			capacity: self.capacity as u64,
		}
	}

	fn evict_overflow(&mut self) {
		while self.entries.len() > self.capacity {
			let Some(oldest) = self.order.pop_front() else {
				break;
			};
			if self.entries.remove(&oldest).is_some() {
				self.evictions += 1;
				tracing::trace!(key = %oldest, "evicted compiled template");
			}
		}
	}
}

static GLOBAL_CACHE: LazyLock<Mutex<TemplateCache>> =
	LazyLock::new(|| Mutex::new(TemplateCache::new()));

/// Returns the compiled template for `result` from the process-wide cache.
pub fn compiled_template(result: &TemplateResult) -> Result<Arc<CompiledTemplate>, CompileError> {
	GLOBAL_CACHE.lock().get_or_compile(result)
}

/// Applies `config` to the process-wide cache.
pub fn configure_cache(config: &CacheConfig) {
	GLOBAL_CACHE.lock().set_capacity(config.capacity);
}

/// Statistics of the process-wide cache.
pub fn cache_statistics() -> CacheStatistics {
	GLOBAL_CACHE.lock().statistics()
}

/// Empties the process-wide cache.
///
/// Live instances keep their own reference to the templates they were built
/// from and are unaffected.
pub fn clear_template_cache() {
	GLOBAL_CACHE.lock().clear();
}
