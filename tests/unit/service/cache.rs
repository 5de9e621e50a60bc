use std::sync::atomic::AtomicUsize;

use super::*;
use crate::foundation::core::{Rgb, Shape};
use crate::foundation::error::AvatarError;
use crate::render::ImageFormat;
use crate::service::avatar::ResolvedAvatar;

fn key(n: u64) -> AvatarFingerprint {
    AvatarFingerprint { hi: n, lo: !n }
}

fn avatar(tag: u8) -> Avatar {
    Avatar {
        resolved: ResolvedAvatar {
            letters: "AB".to_string(),
            background: Rgb::new(tag, tag, tag),
            foreground: Rgb::WHITE,
            shape: Shape::Circle,
        },
        format: ImageFormat::Svg,
        bytes: Arc::from(vec![tag]),
    }
}

#[test]
fn second_lookup_is_a_hit() {
    let cache = AvatarCache::new(AvatarCacheOpts::default());
    let a = cache.get_or_try_insert_with(key(1), || Ok(avatar(1))).unwrap();
    let b = cache
        .get_or_try_insert_with(key(1), || panic!("must not recompute"))
        .unwrap();
    assert_eq!(a, b);
    assert!(Arc::ptr_eq(&a.bytes, &b.bytes));
    assert_eq!(
        cache.stats(),
        CacheStats {
            hits: 1,
            misses: 1,
            entries: 1
        }
    );
}

#[test]
fn errors_are_not_cached() {
    let cache = AvatarCache::new(AvatarCacheOpts::default());
    let err = cache
        .get_or_try_insert_with(key(2), || Err(AvatarError::render("boom")))
        .unwrap_err();
    assert!(matches!(err, AvatarError::Render(_)));

    let ok = cache.get_or_try_insert_with(key(2), || Ok(avatar(2))).unwrap();
    assert_eq!(ok.bytes.as_ref(), &[2]);
}

#[test]
fn full_cache_computes_without_storing() {
    let cache = AvatarCache::new(AvatarCacheOpts { max_entries: 1 });
    cache.get_or_try_insert_with(key(1), || Ok(avatar(1))).unwrap();

    let calls = AtomicUsize::new(0);
    for _ in 0..3 {
        cache
            .get_or_try_insert_with(key(9), || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(avatar(9))
            })
            .unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(cache.stats().entries, 1);
}

#[test]
fn concurrent_requests_for_one_key_compute_once() {
    let cache = AvatarCache::new(AvatarCacheOpts::default());
    let calls = AtomicUsize::new(0);

    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                cache
                    .get_or_try_insert_with(key(7), || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        std::thread::sleep(std::time::Duration::from_millis(20));
                        Ok(avatar(7))
                    })
                    .unwrap();
            });
        }
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let stats = cache.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 7);
}

#[test]
fn clear_drops_entries() {
    let cache = AvatarCache::new(AvatarCacheOpts::default());
    cache.get_or_try_insert_with(key(3), || Ok(avatar(3))).unwrap();
    cache.clear();
    assert_eq!(cache.stats().entries, 0);

    let calls = AtomicUsize::new(0);
    cache
        .get_or_try_insert_with(key(3), || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(avatar(3))
        })
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn failures_do_not_use_up_capacity() {
    let cache = AvatarCache::new(AvatarCacheOpts { max_entries: 2 });
    for n in [10, 11] {
        cache
            .get_or_try_insert_with(key(n), || Err(AvatarError::identity("no letters")))
            .unwrap_err();
    }
    assert_eq!(cache.stats().entries, 0);

    let calls = AtomicUsize::new(0);
    for _ in 0..3 {
        cache
            .get_or_try_insert_with(key(4), || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(avatar(4))
            })
            .unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.stats().entries, 1);
}
