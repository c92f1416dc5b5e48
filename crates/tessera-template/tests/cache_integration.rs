//! Template Cache Integration Tests
//!
//! The process-wide cache is shared by every test in this binary, so each
//! test runs serially and starts from a cleared cache.

use rstest::rstest;
use serial_test::serial;
use tessera_dom::Node;
use tessera_template::{
	CacheConfig, DEFAULT_CACHE_CAPACITY, TemplateResult, cache_statistics, clear_template_cache,
	compiled_template, configure_cache, html, render,
};

fn generated(n: usize) -> TemplateResult {
	TemplateResult::from_segments(vec![format!("<b>{}</b>", n)], Vec::new())
}

fn reset(capacity: usize) {
	configure_cache(&CacheConfig::builder().capacity(capacity).build());
	clear_template_cache();
}

/// Repeated renders of one call site compile once
#[rstest]
#[serial(template_cache)]
fn test_call_site_compiles_once() {
	reset(DEFAULT_CACHE_CAPACITY);
	let container = Node::element("div");
	let view = |n: u32| html!("<span>", n, "</span>");

	for n in 0..5 {
		render(&view(n), &container).unwrap();
	}

	let stats = cache_statistics();
	assert_eq!(stats.misses, 1);
	assert_eq!(stats.hits, 4);
	assert_eq!(stats.total_requests, 5);
	assert_eq!(stats.entry_count, 1);
	assert_eq!(stats.hit_rate(), 0.8);
}

/// Entries leave in insertion order; hits do not refresh them
#[rstest]
#[serial(template_cache)]
fn test_fifo_eviction_ignores_hits() {
	reset(3);
	let first = compiled_template(&generated(0)).unwrap();
	compiled_template(&generated(1)).unwrap();
	compiled_template(&generated(2)).unwrap();

	// A hit on the oldest entry does not save it.
	let again = compiled_template(&generated(0)).unwrap();
	assert!(std::sync::Arc::ptr_eq(&first, &again));

	compiled_template(&generated(3)).unwrap();
	let stats = cache_statistics();
	assert_eq!(stats.evictions, 1);
	assert_eq!(stats.entry_count, 3);

	let recompiled = compiled_template(&generated(0)).unwrap();
	assert!(!std::sync::Arc::ptr_eq(&first, &recompiled));
	assert_eq!(cache_statistics().misses, 5);
}

/// Shrinking the capacity evicts the oldest entries immediately
#[rstest]
#[serial(template_cache)]
fn test_shrinking_capacity_evicts() {
	reset(10);
	for n in 0..6 {
		compiled_template(&generated(n)).unwrap();
	}

	configure_cache(&CacheConfig::builder().capacity(2).build());

	let stats = cache_statistics();
	assert_eq!(stats.capacity, 2);
	assert_eq!(stats.entry_count, 2);
	assert_eq!(stats.evictions, 4);
	reset(DEFAULT_CACHE_CAPACITY);
}

/// Live instances survive an evicted or cleared template
#[rstest]
#[serial(template_cache)]
fn test_instances_outlive_cache_entries() {
	reset(DEFAULT_CACHE_CAPACITY);
	let container = Node::element("div");
	let view = |label: &str| html!("<em>", label, "</em>");
	render(&view("before"), &container).unwrap();
	let em = container.first_child().unwrap();

	clear_template_cache();
	render(&view("after"), &container).unwrap();

	assert!(container.first_child().unwrap().ptr_eq(&em));
	assert_eq!(em.text_content(), "after");
}

/// Templates that fail to compile are not cached
#[rstest]
#[serial(template_cache)]
fn test_failed_compile_not_cached() {
	reset(DEFAULT_CACHE_CAPACITY);
	let broken = || html!("<p ", 1, "></p>");

	assert!(compiled_template(&broken()).is_err());
	assert!(compiled_template(&broken()).is_err());

	let stats = cache_statistics();
	assert_eq!(stats.entry_count, 0);
	assert_eq!(stats.misses, 2);
}

/// Default configuration matches the documented capacity
#[rstest]
fn test_default_config_capacity() {
	assert_eq!(CacheConfig::default().capacity, DEFAULT_CACHE_CAPACITY);
	assert_eq!(CacheConfig::new().capacity, 500);
}
