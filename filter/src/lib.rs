//! Range filters over strict Semantic Version numbers.
//!
//! A filter expression selects versions from a collection. Expressions are
//! `||`-separated OR branches, each branch a list of space-separated AND
//! clauses, each clause an operator prefix followed by a version:
//!
//! | prefix | meaning |
//! |--------|---------|
//! | `=` or none | exactly that version (build metadata ignored) |
//! | `>` `>=` `<` `<=` | relational bound; pre-releases never match |
//! | `~` | same major and minor, at least the given version |
//! | `^` | no change to the leftmost nonzero core number; pre-releases never match |
//!
//! An expression compiles once into a [`Filter`] and is then evaluated per
//! candidate, so filtering a collection does not re-split any strings.
//!
//! ## Examples
//!
//! ```rust
//! use exact_semver_filter::Filter;
//! use exact_version::Version;
//!
//! let filter = Filter::compile("^1.2.0 || ~0.5.0").unwrap();
//! assert!(filter.matches(&Version::parse("1.4.7").unwrap()));
//! assert!(filter.matches(&Version::parse("0.5.9").unwrap()));
//! assert!(!filter.matches(&Version::parse("2.0.0").unwrap()));
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

use std::fmt::{self, Display};

use exact_version::Version;

/// Selects the versions matching a filter expression.
///
/// The kept versions stay in their input order; everything else is dropped.
///
/// ## Examples
///
/// ```rust
/// use exact_version::Version;
///
/// let versions = Version::parse_multiple(vec!["2.2.0", "2.2.1", "2.3.0", "3.0.0"]).unwrap();
/// let kept = exact_semver_filter::filter("^2.2.1", versions).unwrap();
/// assert_eq!(kept, Version::parse_multiple(vec!["2.2.1", "2.3.0"]).unwrap());
/// ```
pub fn filter<'input>(
    expression: &'input str,
    mut versions: Vec<Version>,
) -> Result<Vec<Version>, FilterError<'input>> {
    let compiled = Filter::compile(expression)?;
    versions.retain(|version| compiled.matches(version));
    Ok(versions)
}

/// A compiled filter expression.
///
/// Compiling splits the expression into its OR branches and AND clauses once;
/// evaluation against a candidate never touches the expression string again.
#[derive(Debug, Clone)]
pub struct Filter {
    branches: Vec<Branch>,
}

impl Filter {
    /// Compiles a filter expression.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use exact_semver_filter::{Filter, FilterError};
    ///
    /// assert!(Filter::compile(">=1.0.0 <2.0.0").is_ok());
    /// assert_eq!(Filter::compile("").unwrap_err(), FilterError::NoFilter);
    /// assert_eq!(Filter::compile("1.0.0  2.0.0").unwrap_err(), FilterError::EmptyFilter);
    /// ```
    pub fn compile(expression: &str) -> Result<Filter, FilterError<'_>> {
        if expression.is_empty() {
            return Err(FilterError::NoFilter);
        }

        let mut branches = Vec::new();
        for branch in expression.split("||") {
            let branch = branch.trim();
            if branch.is_empty() {
                return Err(FilterError::EmptyFilter);
            }

            let mut clauses = Vec::new();
            for clause in branch.split(' ') {
                if clause.is_empty() {
                    return Err(FilterError::EmptyFilter);
                }
                clauses.push(compile_clause(clause)?);
            }
            branches.push(Branch { clauses });
        }

        Ok(Filter { branches })
    }

    /// Returns true if the version matches any OR branch of the expression.
    pub fn matches(&self, version: &Version) -> bool {
        self.branches.iter().any(|branch| branch.matches(version))
    }
}

/// One OR branch: a conjunction of clauses.
#[derive(Debug, Clone)]
struct Branch {
    clauses: Vec<Clause>,
}

impl Branch {
    fn matches(&self, version: &Version) -> bool {
        self.clauses.iter().all(|clause| clause.matches(version))
    }
}

#[derive(Debug, Clone)]
enum Clause {
    Exact(Version),
    Relational(Op, Version),
    Tilde(Version),
    Caret { lower: Version, upper: Version },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Op {
    Greater,
    GreaterEq,
    Less,
    LessEq,
}

impl Clause {
    fn matches(&self, version: &Version) -> bool {
        match self {
            Clause::Exact(operand) => version == operand,
            Clause::Relational(op, operand) => {
                // pre-releases never satisfy a plain relational bound
                !version.is_pre_release()
                    && match op {
                        Op::Greater => version > operand,
                        Op::GreaterEq => version >= operand,
                        Op::Less => version < operand,
                        Op::LessEq => version <= operand,
                    }
            }
            Clause::Tilde(operand) => {
                version.major == operand.major
                    && version.minor == operand.minor
                    && version >= operand
            }
            Clause::Caret { lower, upper } => {
                !version.is_pre_release() && lower <= version && version < upper
            }
        }
    }
}

// two-character operators come before their one-character prefixes,
// so the longest listed prefix wins
const PREFIXES: &[&str] = &["^", "~", ">=", "<=", ">", "<", "="];

fn compile_clause(clause: &str) -> Result<Clause, FilterError<'_>> {
    let (prefix, operand) = split_prefix(clause);
    let operand = Version::parse(operand)?;

    Ok(match prefix {
        "^" => caret(operand)?,
        "~" => Clause::Tilde(operand),
        ">=" => Clause::Relational(Op::GreaterEq, operand),
        "<=" => Clause::Relational(Op::LessEq, operand),
        ">" => Clause::Relational(Op::Greater, operand),
        "<" => Clause::Relational(Op::Less, operand),
        _ => Clause::Exact(operand),
    })
}

fn split_prefix(clause: &str) -> (&str, &str) {
    for &prefix in PREFIXES {
        if let Some(operand) = clause.strip_prefix(prefix) {
            return (prefix, operand);
        }
    }
    ("", clause)
}

/// Builds a caret clause: everything from `lower` up to, but not including,
/// the next increment of the leftmost nonzero core number.
///
/// `^0.0.0` keeps the upper bound at `0.0.0`, collapsing the range so that
/// nothing matches.
fn caret<'input>(lower: Version) -> Result<Clause, FilterError<'input>> {
    if lower.is_pre_release() {
        return Err(FilterError::PreReleaseDisallowed);
    }

    let upper = if lower.major != 0 {
        Version::new(lower.major + 1, 0, 0)
    } else if lower.minor != 0 {
        Version::new(0, lower.minor + 1, 0)
    } else if lower.patch != 0 {
        Version::new(0, 0, lower.patch + 1)
    } else {
        Version::new(0, 0, 0)
    };

    Ok(Clause::Caret { lower, upper })
}

/// Possible errors when compiling a filter expression.
#[derive(Debug, PartialEq, Eq)]
pub enum FilterError<'input> {
    /// The filter expression was empty
    NoFilter,
    /// An OR branch or an AND clause of the expression was empty
    EmptyFilter,
    /// A `^` clause had a pre-release operand
    PreReleaseDisallowed,
    /// A clause operand was not a valid version
    Version(exact_semver_parser::Error<'input>),
}

impl Display for FilterError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::NoFilter => f.pad("No filter provided"),
            FilterError::EmptyFilter => f.pad("Empty filter clause"),
            FilterError::PreReleaseDisallowed => {
                f.pad("A `^` filter must not have pre-release identifiers")
            }
            FilterError::Version(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for FilterError<'_> {}

impl<'input> From<exact_semver_parser::Error<'input>> for FilterError<'input> {
    fn from(error: exact_semver_parser::Error<'input>) -> Self {
        FilterError::Version(error)
    }
}
