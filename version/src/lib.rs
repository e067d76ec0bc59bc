//! Semantic version value type.
//!
//! Companion version struct for the exact_semver_parser parser. A [`Version`]
//! owns its identifiers and carries the full SemVer 2.0.0 precedence rules:
//! comparison, equality, and hashing all ignore build metadata, and
//! pre-release identifiers compare numerically or lexically per the
//! specification.
#![deny(
    nonstandard_style,
    dead_code,
    improper_ctypes,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    no_mangle_generic_items,
    non_shorthand_field_patterns,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unsafe_code,
    unused_allocation,
    unused_comparisons,
    unused_extern_crates,
    unused_import_braces,
    unused_parens,
    unused_qualifications,
    unused_results,
    unused,
    while_true
)]

use std::{
    cmp::Ordering,
    convert::TryFrom,
    fmt::{self, Display, Write},
    hash,
    str::FromStr,
};

mod identifiers;
pub use identifiers::{Build, PreRelease};

#[cfg(feature = "rusqlite")]
mod sql;
#[cfg(feature = "rusqlite")]
pub use sql::LenientVersion;

/// Represents a semantic version number.
///
/// A version is an immutable value: the parser is the only producer, and
/// nothing mutates one in place afterwards. Equality, ordering, and hashing
/// all follow SemVer 2.0.0 precedence, which excludes build metadata —
/// `1.0.0+a` and `1.0.0+b` are equal.
#[derive(Debug, Clone)]
pub struct Version {
    /// The major version.
    pub major: u64,
    /// The minor version.
    pub minor: u64,
    /// The patch version.
    pub patch: u64,
    /// The pre-release identifiers.
    pub pre: PreRelease,
    /// The build metadata identifiers.
    pub build: Build,
}

impl Version {
    /// Constructs a new, empty version
    ///
    /// ## Examples
    ///
    /// ```
    /// # use exact_version::Version;
    /// let version = Version::empty();
    /// assert_eq!(version.to_string(), "0.0.0")
    /// ```
    pub const fn empty() -> Self {
        Version {
            major: 0,
            minor: 0,
            patch: 0,
            pre: PreRelease::empty(),
            build: Build::empty(),
        }
    }

    /// Constructs a new version out of the three version core numbers
    ///
    /// ## Examples
    ///
    /// ```
    /// # use exact_version::Version;
    /// let version = Version::new(1, 2, 3);
    /// assert_eq!(version.to_string(), "1.2.3")
    /// ```
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: PreRelease::empty(),
            build: Build::empty(),
        }
    }

    /// Parse a string slice into a Version.
    ///
    /// The input must conform to the SemVer 2.0.0 grammar; see
    /// [`exact_semver_parser`] for the exact rules and error reporting.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// # use exact_version::Version;
    /// let version = Version::parse("1.2.3-rc.1+build.5");
    /// assert!(version.is_ok());
    ///
    /// let version = Version::parse("1.2.3-rc..1");
    /// assert!(version.is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, exact_semver_parser::Error<'_>> {
        exact_semver_parser::parse::<Self>(input)
    }

    /// Parse a sequence of string slices into versions, in order.
    ///
    /// Stops at the first input that fails to parse and returns its error;
    /// there are no partial results.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// # use exact_version::Version;
    /// let versions = Version::parse_multiple(vec!["1.0.0", "2.0.0-rc.1"]).unwrap();
    /// assert_eq!(versions.len(), 2);
    ///
    /// assert!(Version::parse_multiple(vec!["1.0.0", "oops"]).is_err());
    /// ```
    pub fn parse_multiple<'input, I>(
        inputs: I,
    ) -> Result<Vec<Self>, exact_semver_parser::Error<'input>>
    where
        I: IntoIterator<Item = &'input str>,
    {
        inputs.into_iter().map(Version::parse).collect()
    }

    /// Returns true if this version has pre-release identifiers, i.e. it represents a pre-release.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// # use exact_version::Version;
    /// assert!(Version::parse("1.0.0-pre").unwrap().is_pre_release());
    /// assert!(!Version::parse("1.0.0").unwrap().is_pre_release());
    /// assert!(!Version::parse("1.0.0+build").unwrap().is_pre_release());
    /// ```
    pub fn is_pre_release(&self) -> bool {
        !self.pre.is_empty()
    }

    /// Returns true if this version is stable: a nonzero major version and
    /// no pre-release identifiers.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// # use exact_version::Version;
    /// assert!(Version::parse("1.0.0").unwrap().is_stable());
    /// assert!(Version::parse("1.0.0+build").unwrap().is_stable());
    /// assert!(!Version::parse("0.2.3").unwrap().is_stable());
    /// assert!(!Version::parse("1.0.0-rc.1").unwrap().is_stable());
    /// ```
    pub fn is_stable(&self) -> bool {
        self.major != 0 && self.pre.is_empty()
    }

    /// Compares the precedence of two versions per SemVer 2.0.0 §11.
    ///
    /// This is the same total order as the [`Ord`] implementation, named
    /// explicitly for call sites that want the three-way comparison to read
    /// as such. Build metadata does not participate.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// # use exact_version::Version;
    /// use std::cmp::Ordering;
    ///
    /// let alpha = Version::parse("1.0.0-alpha").unwrap();
    /// let release = Version::parse("1.0.0").unwrap();
    /// assert_eq!(alpha.cmp_precedence(&release), Ordering::Less);
    ///
    /// let a = Version::parse("1.0.0+a").unwrap();
    /// let b = Version::parse("1.0.0+b").unwrap();
    /// assert_eq!(a.cmp_precedence(&b), Ordering::Equal);
    /// ```
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromStr for Version {
    type Err = exact_semver_parser::OwnedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s).map_err(|error| error.owned())
    }
}

impl<'input> TryFrom<&'input str> for Version {
    type Error = exact_semver_parser::Error<'input>;

    fn try_from(value: &'input str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = String::with_capacity(16);
        write!(result, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            result.push('-');
            join_identifiers(&mut result, &self.pre);
        }
        if !self.build.is_empty() {
            result.push('+');
            join_identifiers(&mut result, &self.build);
        }

        f.pad(result.as_ref())
    }
}

fn join_identifiers(result: &mut String, identifiers: &[String]) {
    for (index, identifier) in identifiers.iter().enumerate() {
        if index > 0 {
            result.push('.');
        }
        result.push_str(identifier);
    }
}

impl PartialEq for Version {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.major == other.major
            && self.minor == other.minor
            && self.patch == other.patch
            && self.pre == other.pre
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| self.pre.cmp(&other.pre))
    }
}

impl hash::Hash for Version {
    fn hash<H: hash::Hasher>(&self, into: &mut H) {
        self.major.hash(into);
        self.minor.hash(into);
        self.patch.hash(into);
        self.pre.hash(into);
    }
}

impl<'input> exact_semver_parser::VersionBuilder<'input> for Version {
    type Out = Self;

    fn new() -> Self {
        Version::empty()
    }

    fn set_major(&mut self, major: u64) {
        self.major = major;
    }

    fn set_minor(&mut self, minor: u64) {
        self.minor = minor;
    }

    fn set_patch(&mut self, patch: u64) {
        self.patch = patch;
    }

    fn add_pre_release(&mut self, pre_release: &'input str) {
        self.pre.push(pre_release.to_owned());
    }

    fn add_build(&mut self, build: &'input str) {
        self.build.push(build.to_owned());
    }

    fn build(self) -> Self::Out {
        self
    }
}

#[cfg(feature = "serde")]
use serde::de::{self, Deserialize, Deserializer, Visitor};
#[cfg(feature = "serde")]
use serde::ser::{Serialize, Serializer};

#[cfg(feature = "serde")]
impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VersionVisitor;

        impl<'de> Visitor<'de> for VersionVisitor {
            type Value = Version;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a semantic version string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Version::parse(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(VersionVisitor)
    }
}

#[cfg(feature = "semver")]
impl TryFrom<&Version> for semver::Version {
    type Error = semver::Error;

    fn try_from(version: &Version) -> Result<Self, Self::Error> {
        Ok(semver::Version {
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            pre: semver::Prerelease::new(&version.pre.join("."))?,
            build: semver::BuildMetadata::new(&version.build.join("."))?,
        })
    }
}

#[cfg(feature = "semver")]
impl TryFrom<&semver::Version> for Version {
    type Error = exact_semver_parser::OwnedError;

    fn try_from(version: &semver::Version) -> Result<Self, Self::Error> {
        // semver permits leading zeroes in build identifiers, this grammar
        // does not, so the conversion can fail
        let rendered = version.to_string();
        Version::parse(&rendered).map_err(|error| error.owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn v(input: &str) -> Version {
        Version::parse(input).unwrap()
    }

    #[test_case("1.0.0")]
    #[test_case("0.0.0-alpha+kljasdfkh.sdfkfkjl")]
    #[test_case("1.2.3-123.hello.aaa")]
    #[test_case("5.3.6-hello.w45.13+world.775.r5")]
    #[test_case("1.2.3+build.314")]
    #[test_case("1.0.0-0")]
    fn test_to_string_round_trip(input: &str) {
        assert_eq!(v(input).to_string(), input);
    }

    #[test]
    fn test_display_padding() {
        let version = v("1.2.3-pre+build");
        assert_eq!(format!("{:20}", version), "1.2.3-pre+build     ");
        assert_eq!(format!("{:>20}", version), "     1.2.3-pre+build");
        assert_eq!(format!("{:*^19}", version), "**1.2.3-pre+build**");
        assert_eq!(format!("{:.5}", version), "1.2.3");
    }

    #[test_case("1.2.3", "1.2.3")]
    #[test_case("1.0.0-alpha", "1.0.0-alpha")]
    #[test_case("1.0.0-alpha.1", "1.0.0-alpha.1")]
    #[test_case("1.0.0-1", "1.0.0-1")]
    #[test_case("1.0.0", "1.0.0+build.1.2.3"; "build is ignored")]
    #[test_case("1.0.0+ZZZ", "1.0.0+build.1.2.3")]
    #[test_case("1.0.0+100", "1.0.0+200")]
    fn test_eq(lhs: &str, rhs: &str) {
        assert_eq!(v(lhs), v(rhs));
        assert_eq!(v(lhs).cmp_precedence(&v(rhs)), Ordering::Equal);
    }

    #[test_case("0.0.2", "0.0.1")]
    #[test_case("0.2.0", "0.0.3")]
    #[test_case("0.2.0", "0.1.3")]
    #[test_case("2.0.0", "0.0.1")]
    #[test_case("2.0.0", "0.3.1")]
    #[test_case("2.0.0", "1.3.1")]
    #[test_case("1.0.0", "1.0.0-alpha"; "release beats pre-release")]
    #[test_case("1.0.0", "1.0.0-99")]
    #[test_case("1.0.0", "1.0.0-ZZ")]
    #[test_case("1.0.0-1", "1.0.0-0")]
    #[test_case("1.0.0-10", "1.0.0-1")]
    #[test_case("1.0.0-alpha.3", "1.0.0-alpha.1"; "dotted numeric identifier")]
    #[test_case("1.0.0-Z", "1.0.0-A")]
    #[test_case("1.0.0-Z", "1.0.0-1"; "alphanumeric beats numeric")]
    #[test_case("1.0.0-alpha-3", "1.0.0-alpha-1"; "hyphenated identifier")]
    #[test_case("1.0.0-alpha-3", "1.0.0-alpha-100"; "hyphenated identifiers compare lexically")]
    #[test_case("1.0.0-99999999999999999999999", "1.0.0-99999999999999999999998"; "numeric precedence beyond u64")]
    fn test_greater_than(lhs: &str, rhs: &str) {
        assert!(v(lhs) > v(rhs));
        assert_eq!(v(lhs).cmp_precedence(&v(rhs)), Ordering::Greater);
    }

    #[test]
    fn test_order_per_spec_11_4() {
        let versions = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
        ]
        .iter()
        .map(|input| Version::parse(input))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

        let left = versions.iter();
        let right = versions.iter().skip(1);

        for (left, right) in left.zip(right) {
            assert!(left < right, "{} < {} was violated", left, right);
        }
    }

    #[test]
    fn test_sort_by_precedence() {
        let mut versions =
            Version::parse_multiple(vec!["1.6.3", "2.6.2", "0.3.1", "1.6.3-alpha+shldsfkjh"])
                .unwrap();
        versions.sort();
        let sorted = versions
            .iter()
            .map(Version::to_string)
            .collect::<Vec<_>>();
        assert_eq!(
            sorted,
            vec!["0.3.1", "1.6.3-alpha+shldsfkjh", "1.6.3", "2.6.2"]
        );
    }

    #[test]
    fn test_parse_multiple_preserves_order() {
        let versions = Version::parse_multiple(vec!["2.0.0", "1.0.0", "3.0.0"]).unwrap();
        let rendered = versions.iter().map(Version::to_string).collect::<Vec<_>>();
        assert_eq!(rendered, vec!["2.0.0", "1.0.0", "3.0.0"]);
    }

    #[test]
    fn test_parse_multiple_stops_at_first_error() {
        let error = Version::parse_multiple(vec!["1.0.0", "oops", "01.0.0"]).unwrap_err();
        assert_eq!(error.input(), "oops");
        assert_eq!(
            error.error_kind(),
            exact_semver_parser::ErrorKind::UnexpectedChar
        );
    }

    #[test_case("1.0.0" => true)]
    #[test_case("1.0.0+build" => true)]
    #[test_case("0.2.3" => false; "zero major is not stable")]
    #[test_case("1.0.0-rc.1" => false; "pre-release is not stable")]
    #[test_case("0.1.0-alpha" => false)]
    fn test_is_stable(input: &str) -> bool {
        v(input).is_stable()
    }

    #[test]
    fn test_hash_ignores_build() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        assert!(set.insert(v("1.0.0+a")));
        assert!(!set.insert(v("1.0.0+b")));
        assert!(set.insert(v("1.0.0-pre+a")));
    }

    #[test]
    fn test_from_str() {
        let version = "1.2.3-rc.1".parse::<Version>().unwrap();
        assert_eq!(version, v("1.2.3-rc.1"));

        let error = "1.2.3-rc..1".parse::<Version>().unwrap_err();
        assert_eq!(
            error.error_kind(),
            exact_semver_parser::ErrorKind::EmptyPreReleaseIdentifier
        );
    }

    #[test]
    fn test_try_from_str() {
        use std::convert::TryInto;

        let version: Version = "4.5.6".try_into().unwrap();
        assert_eq!(version, Version::new(4, 5, 6));
    }

    #[test]
    fn test_direct_construction_matches_parsed() {
        let version = Version {
            major: 1,
            minor: 2,
            patch: 3,
            pre: vec!["rc", "1"].into_iter().collect(),
            build: vec!["build", "5"].into_iter().collect(),
        };
        assert_eq!(version, v("1.2.3-rc.1+build.5"));
        assert_eq!(version.to_string(), "1.2.3-rc.1+build.5");
    }

    #[cfg(feature = "serde")]
    #[cfg_attr(feature = "serde", test)]
    fn test_ser() {
        let version = v("1.2.3-rc.1+build.5");
        assert_eq!(
            serde_json::to_string(&version).unwrap(),
            r#""1.2.3-rc.1+build.5""#
        );
    }

    #[cfg(feature = "serde")]
    #[cfg_attr(feature = "serde", test)]
    fn test_deser() {
        let version: Version = serde_json::from_str(r#""1.2.3-rc.1+build.5""#).unwrap();
        assert_eq!(version, v("1.2.3-rc.1+build.5"));
        assert_eq!(version.to_string(), "1.2.3-rc.1+build.5");
    }

    #[cfg(feature = "serde")]
    #[cfg_attr(feature = "serde", test)]
    fn test_deser_null_is_unset() {
        let version: Option<Version> = serde_json::from_str("null").unwrap();
        assert!(version.is_none());

        let version: Option<Version> = serde_json::from_str(r#""1.2.3""#).unwrap();
        assert_eq!(version, Some(Version::new(1, 2, 3)));
    }

    #[cfg(feature = "serde")]
    #[cfg_attr(feature = "serde", test)]
    fn test_deser_surfaces_parse_error() {
        let result = serde_json::from_str::<Version>(r#""1.2.3-rc..1""#);
        assert!(result.is_err());
    }

    #[cfg(feature = "semver")]
    #[cfg_attr(feature = "semver", test)]
    fn test_into_semver() {
        use std::convert::TryFrom;

        let version = v("1.2.3-rc.1+build.5");
        let converted = semver::Version::try_from(&version).unwrap();
        assert_eq!(converted, semver::Version::parse("1.2.3-rc.1+build.5").unwrap());
    }

    #[cfg(feature = "semver")]
    #[cfg_attr(feature = "semver", test)]
    fn test_from_semver() {
        use std::convert::TryFrom;

        let upstream = semver::Version::parse("1.2.3-rc.1+build.5").unwrap();
        let version = Version::try_from(&upstream).unwrap();
        assert_eq!(version, v("1.2.3-rc.1+build.5"));

        // leading zeroes in build identifiers are legal upstream, not here
        let upstream = semver::Version::parse("1.2.3+007").unwrap();
        assert!(Version::try_from(&upstream).is_err());
    }
}
