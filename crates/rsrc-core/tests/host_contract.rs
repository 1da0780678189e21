//! Host contract smoke tests

use std::sync::Arc;

use rsrc_core::prelude::*;

#[test]
fn default_configuration_resolves_seeded_shot() {
    let context = ResolverContext::new(Arc::new(DefaultHooks::from_config(
        &ResolverConfig::default(),
    )));

    assert_eq!(
        context.resolve("shot.usd").into_host_path(),
        "/some/path/to/a/file.usd"
    );
}

#[test]
fn host_contract_is_object_safe() {
    let hooks: Box<dyn ResolverHooks> = Box::new(Instrumented::new(DefaultHooks::from_config(
        &ResolverConfig::default(),
    )));
    let cache = ResolutionCache::new();

    hooks.initialize(&cache);
    assert_eq!(cache.len(), 1);
}
