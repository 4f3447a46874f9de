#[cfg(test)]
mod concurrency_tests {
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    use bytes::Bytes;
    use codec_core::compression::{codec_ids, Dispatcher, DispatcherConfig};
    use codec_core::pool::{BoundedPool, Release};

    /// Handle carrying an in-use marker shared with the test.
    struct Marked {
        in_use: Arc<AtomicUsize>,
        released: Arc<AtomicUsize>,
    }

    impl Release for Marked {
        type Error = Infallible;

        fn release(self) -> Result<(), Infallible> {
            self.released.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn no_handle_is_held_by_two_threads() {
        const THREADS: usize = 8;
        const ROUNDS: usize = 2_000;

        let released = Arc::new(AtomicUsize::new(0));
        let markers: Arc<std::sync::Mutex<Vec<Arc<AtomicUsize>>>> = Arc::default();
        let (r, m) = (Arc::clone(&released), Arc::clone(&markers));
        let pool = BoundedPool::with_factory(4, move || {
            let in_use = Arc::new(AtomicUsize::new(0));
            m.lock().unwrap().push(Arc::clone(&in_use));
            Marked { in_use, released: Arc::clone(&r) }
        })
        .unwrap();

        thread::scope(|s| {
            for _ in 0..THREADS {
                s.spawn(|| {
                    for _ in 0..ROUNDS {
                        let handle = pool.get().unwrap();
                        let holders = handle.in_use.fetch_add(1, Ordering::SeqCst) + 1;
                        assert!(holders <= 1, "handle observed by {holders} holders");
                        thread::yield_now();
                        handle.in_use.fetch_sub(1, Ordering::SeqCst);
                        pool.put(handle);
                    }
                });
            }
        });

        let stats = pool.stats();
        assert!(stats.idle <= 4);
        assert_eq!(stats.hits + stats.misses, (THREADS * ROUNDS) as u64);

        let created = markers.lock().unwrap().len();
        assert_eq!(created as u64, stats.created);
        // every manufactured handle is either idle or was released on overflow
        assert_eq!(released.load(Ordering::SeqCst) + stats.idle, created);

        pool.close().unwrap();
        assert_eq!(released.load(Ordering::SeqCst), created);
    }

    #[test]
    fn put_racing_close_strands_nothing() {
        let released = Arc::new(AtomicUsize::new(0));
        let pool = BoundedPool::new(64).unwrap();

        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..200 {
                        pool.put(Marked {
                            in_use: Arc::new(AtomicUsize::new(0)),
                            released: Arc::clone(&released),
                        });
                    }
                });
            }
            s.spawn(|| {
                thread::yield_now();
                pool.close().unwrap();
            });
        });

        pool.close().unwrap();
        assert_eq!(pool.len(), 0);
        assert_eq!(released.load(Ordering::SeqCst), 800);
    }

    #[test]
    fn dispatcher_is_shared_across_threads() {
        let dispatcher = Dispatcher::new(DispatcherConfig::default()).unwrap();
        let original: Vec<u8> = (0..64 * 1024).map(|i| (i % 251) as u8).collect();
        let encoded = [codec_ids::GZIP, codec_ids::LZ4, codec_ids::ZSTD, codec_ids::SNAPPY]
            .map(|id| (id, dispatcher.compress(id, &original, None).unwrap()));

        thread::scope(|s| {
            for t in 0..8 {
                let (dispatcher, original, encoded) = (&dispatcher, &original, &encoded);
                s.spawn(move || {
                    for round in 0..50 {
                        let (id, payload) = &encoded[(t + round) % encoded.len()];
                        let decoded = dispatcher.decompress(*id, Bytes::clone(payload)).unwrap();
                        assert_eq!(&decoded[..], &original[..]);
                    }
                });
            }
        });

        let stats = dispatcher.stats();
        assert!(stats.gzip_readers.idle <= 16);
        assert!(stats.zstd_readers.hits > 0);
    }
}
