//! Property-based tests for rust_logger_core using proptest

use proptest::prelude::*;
use rust_logger_core::prelude::*;

fn builtin_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::TRACE),
        Just(Level::DEBUG),
        Just(Level::INFO),
        Just(Level::WARNING),
        Just(Level::ERROR),
        Just(Level::FATAL),
    ]
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Level ordering matches value ordering, for custom levels too
    #[test]
    fn test_level_ordering_follows_value(a in any::<i32>(), b in any::<i32>()) {
        let la = Level::new("A", a);
        let lb = Level::new("B", b);

        prop_assert_eq!(la < lb, a < b);
        prop_assert_eq!(la == lb, a == b);
        prop_assert_eq!(la > lb, a > b);
    }

    /// Name has no influence on equality
    #[test]
    fn test_level_equality_ignores_name(name in "[A-Z]{1,10}", value in any::<i32>()) {
        prop_assert_eq!(Level::new(name, value), Level::new("OTHER", value));
    }

    /// Built-in names parse back to the same level
    #[test]
    fn test_level_name_roundtrip(level in builtin_level(), lower in any::<bool>()) {
        let input = if lower { level.name().to_lowercase() } else { level.name().to_string() };
        let parsed: Level = input.parse().unwrap();
        prop_assert_eq!(parsed, level);
    }

    /// Every real value lies strictly between the sentinels
    #[test]
    fn test_sentinels_bound_real_levels(value in (i32::MIN + 1)..i32::MAX) {
        let level = Level::new("CUSTOM", value);
        prop_assert!(Level::ALL < level);
        prop_assert!(level < Level::OFF);
        prop_assert!(!level.is_sentinel());
    }
}

// ============================================================================
// Filtering Tests
// ============================================================================

proptest! {
    /// A record is delivered iff its value is at least the threshold value
    #[test]
    fn test_threshold_filtering(
        threshold in (i32::MIN + 1)..i32::MAX,
        value in (i32::MIN + 1)..i32::MAX,
    ) {
        let logger = Logger::new();
        logger.set_level(Level::new("THRESHOLD", threshold)).unwrap();
        let memory = MemoryHandler::new();
        logger.add_handler(memory.clone());

        logger.log(Level::new("CUSTOM", value), "message").unwrap();

        prop_assert_eq!(memory.len(), usize::from(value >= threshold));
    }

    /// Handlers see exactly the accepted messages, in call order
    #[test]
    fn test_delivery_preserves_call_order(
        calls in prop::collection::vec((builtin_level(), "[a-z0-9 ]{0,12}"), 0..40),
        threshold in builtin_level(),
    ) {
        let logger = Logger::new();
        logger.set_level(threshold.clone()).unwrap();
        let memory = MemoryHandler::new();
        logger.add_handler(memory.clone());

        for (level, message) in &calls {
            logger.log(level.clone(), message.clone()).unwrap();
        }

        let expected: Vec<String> = calls
            .iter()
            .filter(|(level, _)| *level >= threshold)
            .map(|(_, message)| message.clone())
            .collect();
        prop_assert_eq!(memory.messages(), expected);
    }

    /// A handler subscribed after `n` records receives only the rest
    #[test]
    fn test_late_subscriber_count(total in 0usize..30, joined_at in 0usize..30) {
        let joined_at = joined_at.min(total);
        let logger = Logger::new();
        let early = MemoryHandler::new();
        let late = MemoryHandler::new();
        logger.add_handler(early.clone());

        for i in 0..total {
            if i == joined_at {
                logger.add_handler(late.clone());
            }
            logger.info(format!("{}", i));
        }
        if joined_at == total {
            logger.add_handler(late.clone());
        }

        prop_assert_eq!(early.len(), total);
        prop_assert_eq!(late.len(), total - joined_at);
    }
}

// ============================================================================
// Context Tests
// ============================================================================

proptest! {
    /// Records from a context carry exactly its bound fields
    #[test]
    fn test_bound_fields_on_record(
        fields in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..8),
    ) {
        let logger = Logger::new();
        let memory = MemoryHandler::new();
        logger.add_handler(memory.clone());

        let ctx = logger.bind(fields.clone());
        ctx.info("tagged");

        let records = memory.records();
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(records[0].fields().len(), fields.len());
        for (key, value) in &fields {
            prop_assert_eq!(records[0].field(key), Some(&FieldValue::Int(*value)));
        }
    }
}
