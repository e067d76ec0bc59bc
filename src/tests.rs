//! End-to-end tests across the parser, the comparator, and the filter.

use std::cmp::Ordering;

use test_case::test_case;

use crate::{canonical, filter, parse, parse_multiple, ErrorKind};

mod custom_builder {
    use crate::VersionBuilder;

    /// Simpler version struct that lives only on the stack
    #[derive(Debug, Default)]
    struct MyVersion {
        numbers: [u64; 3],
        is_pre_release: bool,
    }

    impl VersionBuilder<'_> for MyVersion {
        /// We will modify the target struct directly
        type Out = Self;

        fn new() -> Self {
            Self::default()
        }

        fn set_major(&mut self, major: u64) {
            self.numbers[0] = major;
        }

        fn set_minor(&mut self, minor: u64) {
            self.numbers[1] = minor;
        }

        fn set_patch(&mut self, patch: u64) {
            self.numbers[2] = patch;
        }

        /// We don't care about the value, just its presence.
        fn add_pre_release(&mut self, _pre_release: &str) {
            self.is_pre_release = true;
        }

        fn build(self) -> Self::Out {
            self
        }
    }

    #[test]
    fn test_custom_version_builder() {
        let my_version = crate::parse_into::<MyVersion>("1.3.3-alpha21+build.42").unwrap();

        assert_eq!([1, 3, 3], my_version.numbers);
        assert!(my_version.is_pre_release);
    }
}

mod builder_as_validation {
    use crate::VersionBuilder;

    /// Tracks just enough of the version to decide whether it is stable,
    /// without building one.
    #[derive(Debug, Default)]
    struct IsStable {
        nonzero_major: bool,
        pre_release: bool,
    }

    impl VersionBuilder<'_> for IsStable {
        type Out = bool;

        fn new() -> Self {
            Self::default()
        }

        fn set_major(&mut self, major: u64) {
            self.nonzero_major = major != 0;
        }

        fn add_pre_release(&mut self, _pre_release: &str) {
            self.pre_release = true;
        }

        fn build(self) -> Self::Out {
            self.nonzero_major && !self.pre_release
        }
    }

    #[test]
    fn test_builder_as_validation() {
        assert_eq!(crate::parse_into::<IsStable>("1.2.3"), Ok(true));
        assert_eq!(crate::parse_into::<IsStable>("1.2.3+build"), Ok(true));
        assert_eq!(crate::parse_into::<IsStable>("0.2.3"), Ok(false));
        assert_eq!(crate::parse_into::<IsStable>("1.2.3-rc.1"), Ok(false));
        assert!(crate::parse_into::<IsStable>("1.2").is_err());
    }
}

#[test_case("1.0.0")]
#[test_case("0.2.3")]
#[test_case("1.2.3-alpha.1")]
#[test_case("1.2.3+build.314")]
#[test_case("1.2.3-rc.1+build.5")]
#[test_case("5.3.6-hello.w45.13+world.775.r5")]
fn test_canonical_round_trip(input: &str) {
    assert_eq!(canonical(input).unwrap(), input);
}

#[test]
fn test_precedence_chain() {
    let chain = [
        "1.0.0-alpha",
        "1.0.0-alpha.1",
        "1.0.0-alpha.beta",
        "1.0.0-beta",
        "1.0.0-beta.2",
        "1.0.0-beta.11",
        "1.0.0-rc.1",
        "1.0.0",
    ];
    let versions = parse_multiple(chain.iter().copied()).unwrap();

    for (left, right) in versions.iter().zip(versions.iter().skip(1)) {
        assert!(left < right, "{} < {} was violated", left, right);
    }
}

#[test]
fn test_build_does_not_order() {
    let x = parse("1.0.0+x").unwrap();
    let y = parse("1.0.0+y").unwrap();
    assert_eq!(x.cmp_precedence(&y), Ordering::Equal);
    assert_eq!(x, y);
}

#[test_case("01.0.0"; "core leading zero")]
#[test_case("1.2.3-01"; "pre-release leading zero")]
#[test_case("1.2.3+01"; "build leading zero")]
fn test_leading_zero_rejection(input: &str) {
    assert_eq!(parse(input).unwrap_err().error_kind(), ErrorKind::LeadingZero);
}

#[test]
fn test_single_zero_identifier_is_exempt() {
    assert!(parse("1.2.3-0").is_ok());
}

#[test]
fn test_comparator_is_total_and_transitive() {
    let versions = parse_multiple(vec![
        "0.9.0",
        "1.0.0-alpha",
        "1.0.0-alpha.1",
        "1.0.0",
        "1.0.0+build",
        "2.0.0-rc.1",
        "2.0.0",
    ])
    .unwrap();

    for a in &versions {
        for b in &versions {
            let outcomes = [a < b, a == b, a > b];
            assert_eq!(
                outcomes.iter().filter(|holds| **holds).count(),
                1,
                "exactly one ordering must hold for {} and {}",
                a,
                b
            );
        }
    }

    for a in &versions {
        for b in &versions {
            for c in &versions {
                if a < b && b < c {
                    assert!(a < c, "{} < {} < {} must chain", a, b, c);
                }
                if a == b && b == c {
                    assert!(a == c, "{} = {} = {} must chain", a, b, c);
                }
            }
        }
    }
}

#[test]
fn test_caret_boundary() {
    let versions = parse_multiple(vec!["2.2.0", "2.2.1", "2.3.0", "3.0.0"]).unwrap();
    let kept = filter("^2.2.1", versions).unwrap();
    assert_eq!(kept, parse_multiple(vec!["2.2.1", "2.3.0"]).unwrap());
}

#[test]
fn test_tilde_boundary() {
    let versions = parse_multiple(vec!["0.4.9", "0.5.0", "0.5.2", "0.6.0"]).unwrap();
    let kept = filter("~0.5.0", versions).unwrap();
    assert_eq!(kept, parse_multiple(vec!["0.5.0", "0.5.2"]).unwrap());
}

#[test]
fn test_and_or_combinators() {
    let versions = parse_multiple(vec!["0.0.1", "0.0.3"]).unwrap();

    let kept = filter("0.0.1 0.0.3", versions.clone()).unwrap();
    assert!(kept.is_empty());

    let kept = filter("0.0.1 || 0.0.3", versions.clone()).unwrap();
    assert_eq!(kept, versions);
}

#[test_case(""; "empty expression")]
#[test_case("0.0.0  0.0.0"; "double space")]
#[test_case("^1.0.0-alpha"; "pre-release caret operand")]
#[test_case("z1.0.0"; "unparsable operand")]
fn test_malformed_filters(expression: &str) {
    assert!(filter(expression, Vec::new()).is_err());
}

#[cfg(feature = "serde")]
#[cfg_attr(feature = "serde", test)]
fn test_serde_round_trip() {
    let version = parse("1.2.3-rc.1+build.5").unwrap();
    let encoded = serde_json::to_string(&version).unwrap();
    assert_eq!(encoded, r#""1.2.3-rc.1+build.5""#);

    let decoded: crate::Version = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, version);
    assert_eq!(decoded.to_string(), version.to_string());
}
