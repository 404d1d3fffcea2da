use path_pattern_rs::{CompileError, CompileOptions, MatcherCache};
use std::sync::Arc;
use std::thread;

#[test]
fn cache_when_pattern_reused_then_records_hits_and_misses() {
    let cache = MatcherCache::new(8);
    assert_eq!(cache.metrics(), (0, 0));

    let first = cache
        .get_or_compile("docs/{title}.txt")
        .expect("pattern should compile");
    assert_eq!(cache.metrics(), (0, 1));

    let second = cache
        .get_or_compile("docs/{title}.txt")
        .expect("cached pattern should be returned");
    assert_eq!(cache.metrics(), (1, 1));
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn cache_when_matching_through_cache_then_behaves_like_compile() {
    let cache = MatcherCache::default();

    let result = cache
        .match_path("docs/report.csv", "docs/{title}.{ext:txt|json|csv}")
        .expect("pattern should compile");
    assert_eq!(result.get("ext"), Some("csv"));

    let miss = cache
        .match_path("docs/report.xml", "docs/{title}.{ext:txt|json|csv}")
        .expect("pattern should compile");
    assert!(!miss.is_match());
    assert_eq!(cache.metrics(), (1, 1));
}

#[test]
fn cache_when_compile_fails_then_error_is_not_cached() {
    let cache = MatcherCache::new(4);

    for _ in 0..2 {
        match cache.get_or_compile("docs/{title.txt") {
            Err(CompileError::Pattern(_)) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }
    assert!(cache.is_empty());
    assert_eq!(cache.metrics(), (0, 2));
}

#[test]
fn cache_when_capacity_exceeded_then_evicts_oldest() {
    let cache = MatcherCache::new(2);
    cache.get_or_compile("a/*").expect("should compile");
    cache.get_or_compile("b/*").expect("should compile");
    cache.get_or_compile("c/*").expect("should compile");
    assert_eq!(cache.len(), 2);

    cache.get_or_compile("a/*").expect("should recompile");
    assert_eq!(cache.metrics(), (0, 4));

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn cache_when_built_with_options_then_compiles_with_them() {
    let options = CompileOptions::builder()
        .case_insensitive(true)
        .build()
        .expect("options should build");
    let cache = MatcherCache::with_options(4, options).expect("cache should build");

    assert!(cache.options().case_insensitive);
    let result = cache
        .match_path("IMG/Logo.PNG", "img/{name}.png")
        .expect("pattern should compile");
    assert_eq!(result.get("name"), Some("Logo"));
}

#[test]
fn cache_when_options_invalid_then_rejects() {
    let options = CompileOptions {
        max_pattern_len: 0,
        ..Default::default()
    };
    assert!(MatcherCache::with_options(4, options).is_err());
}

#[test]
fn cache_when_shared_across_threads_then_compiles_each_pattern() {
    let cache = MatcherCache::new(16);

    thread::scope(|scope| {
        for i in 0..4 {
            let cache = &cache;
            scope.spawn(move || {
                let pattern = format!("dir{i}/{{name}}.txt");
                let path = format!("dir{i}/file.txt");
                let result = cache.match_path(&path, &pattern).expect("should compile");
                assert_eq!(result.get("name"), Some("file"));
            });
        }
    });

    assert_eq!(cache.len(), 4);
}
