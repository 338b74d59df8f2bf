use std::fs;

use asset_cache::{AssetCache, DirFetcher, Manifest};
use tempfile::TempDir;

#[tokio::test]
async fn version_bump_rolls_over_to_exactly_one_complete_generation() {
    // Upstream assets for both versions live in one source tree.
    let source = TempDir::new().expect("source");
    let manifest = Manifest::builtin("2");
    for path in &manifest.paths {
        let target = source.path().join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).expect("asset dir");
        }
        fs::write(&target, path.as_bytes()).expect("asset");
    }
    let fetcher = DirFetcher::new(source.path());
    let cache_root = TempDir::new().expect("cache root");

    // First release installs and activates generation 1.
    let v1 = AssetCache::open(cache_root.path(), "1").expect("v1 cache");
    v1.install(&Manifest::builtin("1"), &fetcher)
        .await
        .expect("v1 install");
    assert!(v1.activate().expect("v1 activate").is_empty());

    // A version bump reinstalls under the new tag; activation tears the
    // old generation down and leaves exactly one generation behind.
    let v2 = AssetCache::open(cache_root.path(), "2").expect("v2 cache");
    v2.install(&manifest, &fetcher).await.expect("v2 install");
    let removed = v2.activate().expect("v2 activate");
    assert_eq!(removed, vec!["1".to_string()]);

    let generations: Vec<_> = fs::read_dir(cache_root.path())
        .expect("list cache root")
        .map(|entry| entry.expect("entry").file_name())
        .collect();
    assert_eq!(generations.len(), 1);
    assert_eq!(generations[0], "gen-2");

    // The surviving generation serves every manifest path offline.
    for path in &manifest.paths {
        let (bytes, from_cache) = v2.fetch(path, &fetcher).await.expect("asset");
        assert!(from_cache, "{path} should come from the cache");
        assert_eq!(bytes, path.as_bytes());
    }
}
