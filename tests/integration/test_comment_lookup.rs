//! Lookup precedence between name, location and inline identifiers.

use docweave::{
    Comment, CommentError, CommentId, CommentRegistry, EntityIndex, EntityRecord,
};

fn brief_of(comment: &Comment) -> &str {
    &comment.brief().unwrap().text
}

#[test]
fn test_lookup_by_location() {
    let registry = CommentRegistry::new();
    registry
        .try_register(
            CommentId::location("report.h", 42).unwrap(),
            Comment::with_brief("A report."),
        )
        .unwrap();

    let index = EntityIndex::new();
    let entity = EntityRecord::new("report", "/usr/include/report.h", 42);

    let comment = registry.lookup(&index, &entity).unwrap();
    assert_eq!(brief_of(&comment), "A report.");
}

#[test]
fn test_name_wins_over_location() {
    let registry = CommentRegistry::new();
    registry.register(
        CommentId::name("widget::size"),
        Comment::with_brief("By name."),
    );
    registry.register(
        CommentId::location("widget.h", 10).unwrap(),
        Comment::with_brief("By location."),
    );

    let entity = EntityRecord::new("size", "widget.h", 10).with_unique_name("widget::size");
    let index: EntityIndex = [entity.clone()].into_iter().collect();

    let comment = registry.lookup(&index, &entity).unwrap();
    assert_eq!(brief_of(&comment), "By name.");
}

#[test]
fn test_name_matches_anywhere() {
    let registry = CommentRegistry::new();
    registry.register(
        CommentId::name("widget::size"),
        Comment::with_brief("Documented elsewhere."),
    );

    let entity = EntityRecord::new("size", "other.h", 99).with_unique_name("widget::size");
    let index: EntityIndex = [entity.clone()].into_iter().collect();

    assert!(registry.lookup(&index, &entity).is_some());
}

#[test]
fn test_inline_members_on_shared_line() {
    let registry = CommentRegistry::new();
    registry.register(
        CommentId::inline_location("macros.h", 7, "RED").unwrap(),
        Comment::with_brief("Red."),
    );
    registry.register(
        CommentId::inline_location("macros.h", 7, "BLUE").unwrap(),
        Comment::with_brief("Blue."),
    );

    let red = EntityRecord::new("RED", "src/macros.h", 7).sharing_line();
    let blue = EntityRecord::new("BLUE", "src/macros.h", 7).sharing_line();
    let index: EntityIndex = [red.clone(), blue.clone()].into_iter().collect();

    assert_eq!(brief_of(&registry.lookup(&index, &red).unwrap()), "Red.");
    assert_eq!(brief_of(&registry.lookup(&index, &blue).unwrap()), "Blue.");
}

#[test]
fn test_inline_requires_shared_line() {
    let registry = CommentRegistry::new();
    registry.register(
        CommentId::inline_location("macros.h", 7, "RED").unwrap(),
        Comment::with_brief("Red."),
    );

    let red = EntityRecord::new("RED", "macros.h", 7);
    let index: EntityIndex = [red.clone()].into_iter().collect();

    assert!(registry.lookup(&index, &red).is_none());
}

#[test]
fn test_location_wins_over_inline() {
    let registry = CommentRegistry::new();
    registry.register(
        CommentId::location("macros.h", 7).unwrap(),
        Comment::with_brief("The enum."),
    );
    registry.register(
        CommentId::inline_location("macros.h", 7, "RED").unwrap(),
        Comment::with_brief("Red."),
    );

    let red = EntityRecord::new("RED", "macros.h", 7).sharing_line();
    let index: EntityIndex = [red.clone()].into_iter().collect();

    assert_eq!(brief_of(&registry.lookup(&index, &red).unwrap()), "The enum.");
}

#[test]
fn test_no_inheritance_from_sibling() {
    let registry = CommentRegistry::new();
    registry.register(
        CommentId::inline_location("macros.h", 7, "RED").unwrap(),
        Comment::with_brief("Red."),
    );

    let green = EntityRecord::new("GREEN", "macros.h", 7).sharing_line();
    let index: EntityIndex = [green.clone()].into_iter().collect();

    assert!(registry.lookup(&index, &green).is_none());
}

#[test]
fn test_duplicate_registration_keeps_first() {
    let registry = CommentRegistry::new();
    let first = CommentId::location("include/report.h", 42).unwrap();
    let second = CommentId::location("src/report.h", 42).unwrap();
    assert_eq!(first, second);

    registry
        .try_register(first, Comment::with_brief("First."))
        .unwrap();
    let err = registry
        .try_register(second, Comment::with_brief("Second."))
        .unwrap_err();
    assert!(matches!(err, CommentError::DuplicateComment { .. }));
    assert_eq!(registry.len(), 1);

    let entity = EntityRecord::new("report", "report.h", 42);
    let comment = registry.lookup(&EntityIndex::new(), &entity).unwrap();
    assert_eq!(brief_of(&comment), "First.");
}

#[test]
fn test_entity_without_location() {
    let registry = CommentRegistry::new();
    registry.register(
        CommentId::location("a.h", 1).unwrap(),
        Comment::with_brief("x"),
    );

    // Line 0 means the analysis pass could not place the entity
    let entity = EntityRecord::new("generated", "a.h", 0);
    assert!(registry.lookup(&EntityIndex::new(), &entity).is_none());
}
