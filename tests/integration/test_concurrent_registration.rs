//! Registration from many threads at once.

use docweave::{Comment, CommentId, CommentRegistry};

const THREADS: usize = 8;
const PER_THREAD: u32 = 250;

#[test]
fn test_distinct_ids_all_registered() {
    let registry = CommentRegistry::new();

    std::thread::scope(|scope| {
        for t in 0..THREADS {
            let registry = &registry;
            scope.spawn(move || {
                let file = format!("file_{t}.h");
                for line in 1..=PER_THREAD {
                    let id = CommentId::location(&file, line).unwrap();
                    assert!(registry.register(id, Comment::with_brief(format!("{t}:{line}"))));
                }
            });
        }
    });

    assert_eq!(registry.len(), THREADS * PER_THREAD as usize);

    let ids = registry.ids();
    let mut deduped = ids.clone();
    deduped.dedup();
    assert_eq!(ids.len(), deduped.len());

    let comment = registry
        .get(&CommentId::location("file_3.h", 17).unwrap())
        .unwrap();
    assert_eq!(comment.brief().unwrap().text, "3:17");
}

#[test]
fn test_racing_duplicates_register_once() {
    let registry = CommentRegistry::new();
    let id = CommentId::name("contended");

    let inserted: usize = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let registry = &registry;
                let id = id.clone();
                scope.spawn(move || registry.register(id, Comment::with_brief(t.to_string())))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap() as usize)
            .sum()
    });

    assert_eq!(inserted, 1);
    assert_eq!(registry.len(), 1);
}
