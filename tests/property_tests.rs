//! Property-based tests for rust_logger_factory using proptest

use chrono::{Local, TimeZone};
use proptest::prelude::*;
use regex::Regex;
use rust_logger_factory::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
        Just(LogLevel::Panic),
    ]
}

/// Level names from the parse table in random letter case
fn mixed_case_name() -> impl Strategy<Value = (String, LogLevel)> {
    prop_oneof![
        "[tT][rR][aA][cC][eE]".prop_map(|s| (s, LogLevel::Trace)),
        "[dD][eE][bB][uU][gG]".prop_map(|s| (s, LogLevel::Debug)),
        "[iI][nN][fF][oO]".prop_map(|s| (s, LogLevel::Info)),
        "[wW][aA][rR][nN]".prop_map(|s| (s, LogLevel::Warn)),
        "[eE][rR][rR][oO][rR]".prop_map(|s| (s, LogLevel::Error)),
        "[fF][aA][tT][aA][lL]".prop_map(|s| (s, LogLevel::Fatal)),
    ]
}

/// Instants between 2000 and 2100, millisecond resolution
fn any_timestamp() -> impl Strategy<Value = chrono::DateTime<Local>> {
    (946_684_800_000i64..4_102_444_800_000i64)
        .prop_map(|ms| Local.timestamp_millis_opt(ms).single().expect("valid instant"))
}

// ============================================================================
// Level resolution
// ============================================================================

proptest! {
    #[test]
    fn test_mixed_case_names_resolve((name, expected) in mixed_case_name()) {
        prop_assert_eq!(resolve_level(&name), (expected, None));
    }

    #[test]
    fn test_unknown_names_fall_back_to_info(name in ".*") {
        prop_assume!(name.parse::<LogLevel>().is_err());

        let (level, diagnostic) = resolve_level(&name);
        prop_assert_eq!(level, LogLevel::Info);
        prop_assert!(diagnostic.is_some());
    }

    /// Ordering follows the discriminant
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
    }

    /// Every label fits the level column
    #[test]
    fn test_label_fits_column(level in any_level()) {
        prop_assert!(level.to_str().len() <= 6);
        prop_assert_eq!(level.to_str(), level.to_str().to_lowercase());
    }
}

// ============================================================================
// Line format
// ============================================================================

proptest! {
    /// Whatever the message, one record is one well-formed line
    #[test]
    fn test_formatted_line_shape(level in any_level(), message in ".*", ts in any_timestamp()) {
        let pattern = Regex::new(r"^\[.{23}\]  \[.{6}\]  .*\n$").unwrap();
        let entry = LogEntry::at(level, &message, ts);
        let line = String::from_utf8(TextFormatter.format(&entry)).unwrap();

        prop_assert!(pattern.is_match(&line), "bad line: {:?}", line);
        prop_assert_eq!(line.matches('\n').count(), 1);
    }

    /// Parsing a formatted line recovers its fields
    #[test]
    fn test_parse_recovers_fields(level in any_level(), message in ".*", ts in any_timestamp()) {
        let entry = LogEntry::at(level, &message, ts);
        let line = String::from_utf8(TextFormatter.format(&entry)).unwrap();
        let record = FormattedRecord::parse(&line).unwrap();

        prop_assert_eq!(record.level, level);
        prop_assert_eq!(&record.message, &entry.message);
        // compare wall-clock text: repeated local hours map back to the earlier instant
        prop_assert_eq!(
            TextFormatter::format_timestamp(&record.timestamp),
            TextFormatter::format_timestamp(&entry.timestamp)
        );
    }

    /// Control characters never survive into the message
    #[test]
    fn test_message_sanitization(message in ".*") {
        let entry = LogEntry::new(LogLevel::Info, &message);

        prop_assert!(!entry.message.contains('\n'));
        prop_assert!(!entry.message.contains('\r'));
        prop_assert!(!entry.message.contains('\t'));
        if message.contains('\n') {
            prop_assert!(entry.message.contains("\\n"));
        }
    }
}
