use std::{cmp::Ordering, iter::FromIterator, ops::Deref};

/// The pre-release identifiers of a semantic version.
///
/// An empty sequence means the version is not a pre-release. The sequence
/// order carries meaning: identifiers are compared position by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PreRelease {
    identifiers: Vec<String>,
}

impl PreRelease {
    /// Constructs an empty pre-release section
    pub const fn empty() -> Self {
        Self {
            identifiers: Vec::new(),
        }
    }

    /// Returns true if the pre-release section is missing
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub(crate) fn push(&mut self, identifier: String) {
        self.identifiers.push(identifier);
    }
}

impl Deref for PreRelease {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.identifiers[..]
    }
}

impl AsRef<[String]> for PreRelease {
    fn as_ref(&self) -> &[String] {
        &self.identifiers[..]
    }
}

impl From<Vec<String>> for PreRelease {
    fn from(identifiers: Vec<String>) -> Self {
        Self { identifiers }
    }
}

impl<S: Into<String>> FromIterator<S> for PreRelease {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            identifiers: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl PartialOrd for PreRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PreRelease {
    fn cmp(&self, other: &Self) -> Ordering {
        // a normal release outranks any pre-release of the same core
        match (self.is_empty(), other.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => PreReleaseCmp {
                lhs: self.identifiers.iter(),
                rhs: other.identifiers.iter(),
            }
            .find(|c| *c != Ordering::Equal)
            .unwrap_or(Ordering::Equal),
        }
    }
}

struct PreReleaseCmp<I, J> {
    lhs: I,
    rhs: J,
}

impl<'a, I, J> Iterator for PreReleaseCmp<I, J>
where
    I: Iterator<Item = &'a String>,
    J: Iterator<Item = &'a String>,
{
    type Item = Ordering;

    /// Identifiers consisting of only digits are compared numerically.
    /// Identifiers with letters or hyphens are compared lexically in ASCII sort order.
    /// Numeric identifiers always have lower precedence than non-numeric identifiers.
    /// A larger set of pre-release fields has a higher precedence than a smaller set, if all of the preceding identifiers are equal.
    /// Example: 1.0.0-alpha < 1.0.0-alpha.1 < 1.0.0-alpha.beta < 1.0.0-beta < 1.0.0-beta.2 < 1.0.0-beta.11 < 1.0.0-rc.1 < 1.0.0.
    fn next(&mut self) -> Option<Self::Item> {
        match (self.lhs.next(), self.rhs.next()) {
            (None, None) => None,
            (Some(_), None) => Some(Ordering::Greater),
            (None, Some(_)) => Some(Ordering::Less),
            (Some(lhs), Some(rhs)) => Some(compare_identifiers(lhs, rhs)),
        }
    }
}

/// Compares two identifiers at the same position.
///
/// Numeric identifiers carry no leading zeroes, so more digits always means
/// a larger number; this compares arbitrary magnitudes without parsing.
fn compare_identifiers(lhs: &str, rhs: &str) -> Ordering {
    match (is_numeric(lhs), is_numeric(rhs)) {
        (true, true) => lhs.len().cmp(&rhs.len()).then_with(|| lhs.cmp(rhs)),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => lhs.cmp(rhs),
    }
}

fn is_numeric(identifier: &str) -> bool {
    identifier.bytes().all(|b| b.is_ascii_digit())
}

/// The build identifiers of a semantic version.
///
/// Build metadata never participates in precedence, so this type has no
/// ordering of its own.
#[derive(Debug, Clone, Default)]
pub struct Build {
    identifiers: Vec<String>,
}

impl Build {
    /// Constructs an empty build section
    pub const fn empty() -> Self {
        Self {
            identifiers: Vec::new(),
        }
    }

    /// Returns true if the build section is missing
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub(crate) fn push(&mut self, identifier: String) {
        self.identifiers.push(identifier);
    }
}

impl Deref for Build {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.identifiers[..]
    }
}

impl AsRef<[String]> for Build {
    fn as_ref(&self) -> &[String] {
        &self.identifiers[..]
    }
}

impl From<Vec<String>> for Build {
    fn from(identifiers: Vec<String>) -> Self {
        Self { identifiers }
    }
}

impl<S: Into<String>> FromIterator<S> for Build {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            identifiers: iter.into_iter().map(Into::into).collect(),
        }
    }
}
