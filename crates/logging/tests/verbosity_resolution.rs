//! Integration tests for hierarchical verbosity resolution through a context.
//!
//! These tests cover the cache, the specificity ranking of configuration
//! keys, preset locking and the registry of known parameter names.

use std::sync::Arc;

use logging::{
    ExecutionContext, FixedSinks, LogConfig, LogSource, MapProvider, ReportRuntime,
    VerbosityLevel,
};
use logging_sink::NullSink;

fn runtime() -> Arc<ReportRuntime> {
    Arc::new(ReportRuntime::with_factory(FixedSinks::new(
        Arc::new(NullSink::new()),
        None,
    )))
}

fn context(provider: &Arc<MapProvider>) -> ExecutionContext {
    let mut context = ExecutionContext::new(runtime()).with_provider(provider.clone());
    context
        .init_logging_with(LogConfig::new().log_async(false))
        .unwrap();
    context
}

// ============================================================================
// Cache Tests
// ============================================================================

/// Verifies a second lookup is served from the cache without querying the provider.
#[test]
fn cached_lookup_does_not_query_provider() {
    let provider = Arc::new(MapProvider::new().with_value("top.cpu.log_level", 4));
    let mut context = context(&provider);
    let source = LogSource::new("top.cpu");

    assert_eq!(context.verbosity(&source), VerbosityLevel::Info);
    let after_first = provider.queries();
    assert!(after_first > 0);

    assert_eq!(context.verbosity(&source), VerbosityLevel::Info);
    assert_eq!(provider.queries(), after_first);
    assert_eq!(context.cache().hits(), 1);
    assert_eq!(context.cache().misses(), 1);
}

/// Verifies configuration changes are only seen after `reinit_logging`.
#[test]
fn reinit_picks_up_changed_configuration() {
    let provider = Arc::new(MapProvider::new().with_value("top.log_level", 2));
    let mut context = context(&provider);
    let source = LogSource::new("top.dma");

    assert_eq!(context.verbosity(&source), VerbosityLevel::Error);
    provider.set_value("top.log_level", 6);
    assert_eq!(context.verbosity(&source), VerbosityLevel::Error);

    context.reinit_logging(VerbosityLevel::Warning);
    assert_eq!(context.verbosity(&source), VerbosityLevel::Trace);
}

/// Verifies each context keeps its own cache.
#[test]
fn contexts_do_not_share_caches() {
    let provider = Arc::new(MapProvider::new().with_value("top.log_level", 5));
    let shared = runtime();
    let mut first = ExecutionContext::new(Arc::clone(&shared)).with_provider(provider.clone());
    let mut second = ExecutionContext::new(shared).with_provider(provider.clone());
    let source = LogSource::new("top");

    first.verbosity(&source);
    provider.reset_queries();
    second.verbosity(&source);
    assert!(provider.queries() > 0);
}

// ============================================================================
// Specificity Tests
// ============================================================================

/// Verifies the most specific configured key wins over broader ones.
#[test]
fn most_specific_key_wins() {
    let provider = Arc::new(
        MapProvider::new()
            .with_value("log_level", 1)
            .with_value("*.log_level", 2)
            .with_value("top.log_level", 3)
            .with_value("top.block.log_level", 5)
            .with_value("*.sub.log_level", 7),
    );
    let mut context = context(&provider);

    assert_eq!(
        context.verbosity(&LogSource::new("top.block.sub")),
        VerbosityLevel::TraceAll
    );
    assert_eq!(
        context.verbosity(&LogSource::new("top.block.other")),
        VerbosityLevel::Debug
    );
    assert_eq!(
        context.verbosity(&LogSource::new("top.other")),
        VerbosityLevel::Warning
    );
    assert_eq!(
        context.verbosity(&LogSource::new("elsewhere")),
        VerbosityLevel::Error
    );
}

/// Verifies the type name acts as an override axis.
#[test]
fn type_name_key_applies_to_every_instance() {
    let provider = Arc::new(MapProvider::new().with_value("Uart.log_level", 6));
    let mut context = context(&provider);

    let typed = LogSource::new("top.uart0").with_type_name("Uart");
    let untyped = LogSource::new("top.uart1");
    assert_eq!(context.verbosity(&typed), VerbosityLevel::Trace);
    assert_eq!(context.verbosity(&untyped), VerbosityLevel::Warning);
}

/// Verifies feature aliases are configurable on their own.
#[test]
fn feature_alias_is_configurable() {
    let provider = Arc::new(MapProvider::new().with_value("mem.cache.log_level", 5));
    let mut context = context(&provider);
    let source = LogSource::new("top.cpu").with_feature("mem.cache");
    assert_eq!(context.verbosity(&source), VerbosityLevel::Debug);
}

/// Verifies out-of-range configuration values, negatives included, clamp to the most verbose level.
#[test]
fn configured_values_are_clamped() {
    let provider = Arc::new(
        MapProvider::new()
            .with_value("big.log_level", 99)
            .with_value("negative.log_level", -3),
    );
    let mut context = context(&provider);
    assert_eq!(
        context.verbosity(&LogSource::new("big")),
        VerbosityLevel::TraceAll
    );
    assert_eq!(
        context.verbosity(&LogSource::new("negative")),
        VerbosityLevel::TraceAll
    );
}

// ============================================================================
// Preset and Parameter Registry Tests
// ============================================================================

/// Verifies presets are used when no value is set and are locked afterwards.
#[test]
fn preset_is_used_and_locked() {
    let provider = Arc::new(MapProvider::new().with_preset("top.log_level", 5));
    let mut context = context(&provider);

    assert_eq!(
        context.verbosity(&LogSource::new("top.cpu")),
        VerbosityLevel::Debug
    );
    assert!(provider.is_locked("top.log_level"));
    assert!(!provider.set_preset("top.log_level", 1));
}

/// Verifies known parameter names are collected across contexts of a runtime.
#[test]
fn logging_parameters_lists_unwildcarded_keys() {
    let shared = runtime();
    let mut first = ExecutionContext::new(Arc::clone(&shared));
    let mut second = ExecutionContext::new(shared);

    first.verbosity(&LogSource::new("top.cpu"));
    second.verbosity(&LogSource::new("top.bus").with_type_name("Bus"));

    assert_eq!(
        first.logging_parameters(),
        [
            "Bus.log_level",
            "top.Bus.log_level",
            "top.bus.Bus.log_level",
            "top.bus.log_level",
            "top.cpu.log_level",
            "top.log_level",
        ]
    );
    assert_eq!(first.logging_parameters(), second.logging_parameters());
}

/// Verifies the default level applies when no provider is attached.
#[test]
fn no_provider_yields_default_level() {
    let mut context = ExecutionContext::new(runtime());
    context.reinit_logging(VerbosityLevel::Info);
    let source = LogSource::new("top");
    assert_eq!(context.verbosity(&source), VerbosityLevel::Info);
    assert!(context.enabled(&source, VerbosityLevel::Info));
    assert!(!context.enabled(&source, VerbosityLevel::Debug));
}
