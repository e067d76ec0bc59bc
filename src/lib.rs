//! Strict parser, precedence comparator, and range filter for Semantic
//! Version numbers.
//!
//! ## Motivation
//!
//! Tooling that validates, sorts, or selects among version strings needs
//! three things to agree with each other: the grammar, the precedence rules,
//! and the range operators built on top of them. This crate provides all
//! three over one [`Version`] type, implementing SemVer 2.0.0 exactly —
//! no leading zeroes, no empty identifiers, no partial versions, and build
//! metadata that round-trips through formatting but never influences
//! ordering.
//!
//! ## Examples
//!
//! Parsing and precedence:
//!
//! ```rust
//! let version = exact_semver::parse("1.2.3-rc.1+build.5").unwrap();
//! assert_eq!(version.to_string(), "1.2.3-rc.1+build.5");
//! assert!(!version.is_stable());
//!
//! // build metadata does not participate in precedence
//! assert_eq!(
//!     exact_semver::parse("1.0.0+x").unwrap(),
//!     exact_semver::parse("1.0.0+y").unwrap(),
//! );
//! ```
//!
//! Selecting versions with a range filter:
//!
//! ```rust
//! let versions =
//!     exact_semver::parse_multiple(vec!["2.2.0", "2.2.1", "2.3.0", "3.0.0"]).unwrap();
//! let kept = exact_semver::filter("^2.2.1", versions).unwrap();
//! assert_eq!(
//!     kept,
//!     exact_semver::parse_multiple(vec!["2.2.1", "2.3.0"]).unwrap()
//! );
//! ```
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

pub use exact_semver_filter::{filter, Filter, FilterError};
pub use exact_semver_parser::{Error, ErrorKind, OwnedError, VersionBuilder};
pub use exact_version::{Build, PreRelease, Version};

#[cfg(feature = "rusqlite")]
pub use exact_version::LenientVersion;

/// Parse a string slice into a [`Version`].
///
/// ## Examples
///
/// ```rust
/// let version = exact_semver::parse("1.2.3").unwrap();
/// assert_eq!(version, exact_semver::Version::new(1, 2, 3));
///
/// let error = exact_semver::parse("1.2").unwrap_err();
/// assert_eq!(
///     error.error_kind(),
///     exact_semver::ErrorKind::IncompleteVersionCore
/// );
/// ```
pub fn parse(input: &str) -> Result<Version, Error<'_>> {
    Version::parse(input)
}

/// Parse a string slice into a custom [`VersionBuilder`].
///
/// Use this to parse into your own representation, or to validate without
/// building anything at all; see the trait documentation for an example.
pub fn parse_into<'input, V>(input: &'input str) -> Result<V::Out, Error<'input>>
where
    V: VersionBuilder<'input>,
{
    exact_semver_parser::parse::<V>(input)
}

/// Parse a sequence of string slices into versions, in order.
///
/// Stops at the first input that fails to parse and returns its error;
/// there are no partial results.
pub fn parse_multiple<'input, I>(inputs: I) -> Result<Vec<Version>, Error<'input>>
where
    I: IntoIterator<Item = &'input str>,
{
    Version::parse_multiple(inputs)
}

/// Parses a version string and renders it back in canonical form.
///
/// The SemVer grammar has no alternate encodings, so this mostly serves to
/// validate a string while normalizing its representation in one step.
///
/// ## Examples
///
/// ```rust
/// assert_eq!(
///     exact_semver::canonical("1.2.3-rc.1+build.5").unwrap(),
///     "1.2.3-rc.1+build.5"
/// );
/// assert!(exact_semver::canonical("1.2.3-rc..1").is_err());
/// ```
pub fn canonical(input: &str) -> Result<String, Error<'_>> {
    Version::parse(input).map(|version| version.to_string())
}

#[cfg(test)]
mod tests;
