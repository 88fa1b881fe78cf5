//! unitflow Core - Fundamental types
//!
//! This crate provides the core types used throughout unitflow:
//! - `Number`: Arbitrary precision decimal numbers
//! - `ConvertError`: Errors raised by registries and conversion sessions

mod number;
mod error;

pub use number::{Number, NumberError};
pub use error::{ConvertError, Result, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, NumberError, ConvertError};
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod number_tests {
        use super::*;

        #[test]
        fn test_from_i64() {
            let n = Number::from_i64(42);
            assert_eq!(n.to_f64(), Some(42.0));
        }

        #[test]
        fn test_from_str_decimal() {
            let n = Number::from_str("3.14").unwrap();
            assert_eq!(n.to_string(), "3.14");
        }

        #[test]
        fn test_from_str_fraction() {
            let n = Number::from_str("1/4").unwrap();
            assert_eq!(n, Number::from_str("0.25").unwrap());
            assert!(matches!(Number::from_str("1/0"), Err(NumberError::DivisionByZero)));
        }

        #[test]
        fn test_from_str_scientific() {
            let n = Number::from_str("1.5e2").unwrap();
            assert_eq!(n, Number::from_i64(150));

            let avogadro = Number::from_str("602214076e15").unwrap();
            assert_eq!(avogadro.to_string(), "602214076000000000000000");

            let small = Number::from_str("25e-6").unwrap();
            assert_eq!(small.to_string(), "0.000025");
        }

        #[test]
        fn test_from_str_invalid() {
            assert!(matches!(Number::from_str("abc"), Err(NumberError::ParseError(_))));
        }

        #[test]
        fn test_from_scaled() {
            assert_eq!(Number::from_scaled(36, -1).to_string(), "3.6");
            assert_eq!(Number::from_scaled(1, 6).to_string(), "1000000");
            assert_eq!(Number::from_scaled(-1, -6).to_string(), "-0.000001");
        }

        #[test]
        fn test_try_from_f64_is_decimal_exact() {
            let tenth = Number::try_from_f64(0.1).unwrap();
            assert_eq!(tenth, Number::from_scaled(1, -1));

            let sum = tenth.add(&Number::try_from_f64(0.2).unwrap());
            assert_eq!(sum.to_string(), "0.3");
        }

        #[test]
        fn test_try_from_f64_rejects_non_finite() {
            assert!(matches!(Number::try_from_f64(f64::NAN), Err(NumberError::NonFinite(_))));
            assert!(matches!(Number::try_from_f64(f64::INFINITY), Err(NumberError::NonFinite(_))));
        }

        #[test]
        fn test_checked_div() {
            let a = Number::from_i64(10);
            let b = Number::from_i64(4);
            assert_eq!(a.checked_div(&b).unwrap().to_string(), "2.5");
            assert!(a.checked_div(&Number::from_i64(0)).is_err());
        }

        #[test]
        fn test_add_sub_are_exact_across_magnitudes() {
            let small = Number::from_scaled(1, -3);
            let huge = Number::from_scaled(1, 48);
            let back = small.add(&huge).sub(&huge);
            assert_eq!(back, small);

            let sum = Number::from_scaled(123_456_789, 60).add(&Number::from_scaled(1, -60));
            assert_eq!(sum.sub(&Number::from_scaled(123_456_789, 60)).to_string(),
                       format!("0.{}1", "0".repeat(59)));
        }

        #[test]
        fn test_mul_is_exact_beyond_work_precision() {
            // 59 significant digits, past the division working precision
            let n = Number::from_str("123456789012345678901234567891").unwrap();
            let square = n.mul(&n);
            assert_eq!(square.to_string(),
                       "15241578753238836750495351562783112365526596557677488187881");
            assert_eq!(square.checked_div(&n).unwrap(), n);
        }

        #[test]
        fn test_non_terminating_division_keeps_work_precision() {
            let third = Number::from_i64(1).checked_div(&Number::from_i64(3)).unwrap();
            let back = third.mul(&Number::from_i64(3));
            assert_eq!(back.round_half_up(10), Number::from_i64(1));
        }

        #[test]
        fn test_round_half_up() {
            let n = Number::from_str("2.0005").unwrap();
            assert_eq!(n.round_half_up(3).to_string(), "2.001");

            let n = Number::from_str("2.0004").unwrap();
            assert_eq!(n.round_half_up(3).to_string(), "2");

            let n = Number::from_str("930729103461.8732").unwrap();
            assert_eq!(n.round_half_up(3).to_string(), "930729103461.873");
            assert_eq!(n.round_half_up(1).to_string(), "930729103461.9");
            assert_eq!(n.round_half_up(0).to_string(), "930729103462");
        }

        #[test]
        fn test_round_half_up_negative_ties_away_from_zero() {
            let n = Number::from_str("-2.0005").unwrap();
            assert_eq!(n.round_half_up(3).to_string(), "-2.001");

            let n = Number::from_str("-0.0004").unwrap();
            assert!(n.round_half_up(3).is_zero());
        }

        #[test]
        fn test_round_leaves_short_values_alone() {
            let n = Number::from_str("12.5").unwrap();
            assert_eq!(n.round_half_up(3), n);
        }

        #[test]
        fn test_to_f64() {
            let n = Number::from_str("-17.778").unwrap();
            assert_eq!(n.to_f64(), Some(-17.778));

            let n = Number::from_scaled(22, 6);
            assert_eq!(n.to_f64(), Some(22_000_000.0));

            let huge = Number::from_str("1e400").unwrap();
            assert_eq!(huge.to_f64(), None);
        }

        #[test]
        fn test_ordering() {
            let a = Number::from_i64(-3);
            let b = Number::from_scaled(25, -1);
            assert!(a < b);
            assert!(a.is_negative());
            assert!(!b.is_negative());
        }

        #[test]
        fn test_deserialize_number_or_string() {
            let n: Number = serde_json::from_str("1000").unwrap();
            assert_eq!(n, Number::from_i64(1000));

            let n: Number = serde_json::from_str("0.001").unwrap();
            assert_eq!(n, Number::from_scaled(1, -3));

            let n: Number = serde_json::from_str("\"3.6\"").unwrap();
            assert_eq!(n, Number::from_scaled(36, -1));

            assert!(serde_json::from_str::<Number>("\"oops\"").is_err());
        }

        #[test]
        fn test_serialize_as_decimal_string() {
            let n = Number::from_str("0.00002").unwrap();
            assert_eq!(serde_json::to_string(&n).unwrap(), "\"0.00002\"");
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_messages_name_the_unit() {
            let err = ConvertError::unit_not_recognized("unknown");
            assert_eq!(err.to_string(), "Unit \"unknown\" is not recognized.");

            let err = ConvertError::duplicate_unit("mWh");
            assert_eq!(err.to_string(), "Convert unit \"mWh\" is already defined.");

            let err = ConvertError::IncompatibleGroups {
                from: "Wh".to_string(),
                to: "W".to_string(),
                from_group: "energy".to_string(),
                to_group: "power".to_string(),
            };
            assert_eq!(err.to_string(), "Unit W cannot be converted to Wh.");
        }

        #[test]
        fn test_codes() {
            assert_eq!(ConvertError::UnitNotSpecified.code(), codes::UNIT_NOT_SPECIFIED);
            assert_eq!(ConvertError::SourceNotSpecified.code(), codes::SOURCE_NOT_SPECIFIED);
            assert_eq!(ConvertError::ValueNotSpecified.code(), codes::VALUE_NOT_SPECIFIED);
            assert_eq!(ConvertError::unknown_group("x").code(), codes::UNKNOWN_GROUP);
        }

        #[test]
        fn test_number_error_conversion() {
            let err: ConvertError = NumberError::DivisionByZero.into();
            assert!(matches!(err, ConvertError::DivisionByZero));

            let err: ConvertError = NumberError::Overflow.into();
            assert_eq!(err.code(), codes::NUMBER_ERROR);
        }
    }
}
