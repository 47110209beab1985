//! Adversarial Property-Based Tests for Year Input and Configuration
//!
//! # Attack Plan
//!
//! 1. **Number Formats**: Floats, scientific notation, unicode digits,
//!    signs, leading zeros, overflow beyond i32/i64.
//!
//! 2. **Injection**: Null bytes, control characters, trailing garbage.
//!
//! 3. **Range Edges**: 2020, 2021, 9999, 10000.
//!
//! 4. **Config Values**: Arbitrary strings for every PILOTCLOCK_* variable.
//!
//! # Invariants
//!
//! - parse_year never panics
//! - Accepted years are inside the configured bounds
//! - Every accepted year can be solved
//! - from_getter never panics

use proptest::prelude::*;
use std::collections::HashMap;

use pilotclock::config::Config;
use pilotclock::input::{parse_year, YearBounds};
use pilotclock::{solve, InputError};

// ============================================================================
// ADVERSARIAL GENERATORS
// ============================================================================

fn malformed_year() -> impl Strategy<Value = String> {
    prop_oneof![
        // Range edges
        Just("2020".to_string()),
        Just("2021".to_string()),
        Just("9999".to_string()),
        Just("10000".to_string()),
        Just("0".to_string()),
        Just("-0".to_string()),
        Just("02025".to_string()),
        // Overflow
        Just("2147483648".to_string()),
        Just("-2147483649".to_string()),
        Just("9223372036854775808".to_string()),
        // Float / scientific
        Just("2025.0".to_string()),
        Just("2.025e3".to_string()),
        Just("NaN".to_string()),
        Just("Infinity".to_string()),
        // Unicode digits
        Just("٢٠٢٥".to_string()),
        Just("２０２５".to_string()),
        // Injection
        Just("2025\x00".to_string()),
        Just("2025; rm -rf".to_string()),
        Just("20\u{200B}25".to_string()),
        // Whitespace
        Just("".to_string()),
        Just("\t2025\r\n".to_string()),
    ]
}

// ============================================================================
// CONCRETE CASES
// ============================================================================

#[test]
fn leading_zeros_are_still_a_year() {
    assert_eq!(parse_year("02025", YearBounds::default()), Ok(2025));
}

#[test]
fn overflowing_numbers_are_rejected() {
    let bounds = YearBounds::default();
    assert!(matches!(parse_year("2147483648", bounds), Err(InputError::OutOfRange { .. })));
    assert!(matches!(
        parse_year("9223372036854775808", bounds),
        Err(InputError::NotANumber(_))
    ));
}

#[test]
fn configured_bounds_flow_into_parsing() {
    let mut env = HashMap::new();
    env.insert("PILOTCLOCK_MIN_YEAR", "2100".to_string());
    env.insert("PILOTCLOCK_MAX_YEAR", "2200".to_string());
    env.insert("PILOTCLOCK_DEFAULT_YEAR", "2150".to_string());
    let config = Config::from_getter(|key| env.get(key).cloned()).unwrap();
    config.validate().unwrap();

    assert!(parse_year("2099", config.bounds()).is_err());
    assert_eq!(parse_year("2200", config.bounds()), Ok(2200));
}

// ============================================================================
// INVARIANTS
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_parse_year_never_panics(raw in malformed_year()) {
        let _ = parse_year(&raw, YearBounds::default());
    }

    #[test]
    fn prop_accepted_years_are_solvable(raw in prop_oneof![malformed_year(), "[0-9]{4}"]) {
        if let Ok(year) = parse_year(&raw, YearBounds::default()) {
            prop_assert!(year >= 2021 && year <= 9999);
            prop_assert!(solve(year).is_ok(), "year {} should solve", year);
        }
    }

    #[test]
    fn prop_trailing_garbage_rejected(year in 2021i32..=9999, junk in "[a-z;%$ ]{1,8}[a-z;%$]") {
        let raw = format!("{}{}", year, junk);
        prop_assert!(matches!(
            parse_year(&raw, YearBounds::default()),
            Err(InputError::NotANumber(_))
        ));
    }

    #[test]
    fn prop_from_getter_never_panics(
        min in ".*",
        max in ".*",
        default in ".*",
        output in ".*",
    ) {
        let mut env: HashMap<&str, String> = HashMap::new();
        env.insert("PILOTCLOCK_MIN_YEAR", min);
        env.insert("PILOTCLOCK_MAX_YEAR", max);
        env.insert("PILOTCLOCK_DEFAULT_YEAR", default);
        env.insert("PILOTCLOCK_OUTPUT", output);
        if let Ok(config) = Config::from_getter(|key| env.get(key).cloned()) {
            let _ = config.validate();
        }
    }
}
