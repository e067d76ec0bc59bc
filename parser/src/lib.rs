//! Strict parser for Semantic Version numbers.
//!
//! This crate implements the SemVer 2.0.0 grammar
//! (`MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`) as an explicit state machine
//! over the three regions of a version string. Parsing either produces a
//! version through a [`VersionBuilder`] or a precise [`Error`] naming the
//! violated rule, the offending region, and the exact input span.
//!
//! The parser is strict: all three version core numbers are required, numeric
//! components and identifiers must not have leading zeroes, identifiers must
//! be non-empty and drawn from `[0-9A-Za-z-]`, and nothing else — not even
//! whitespace — is tolerated anywhere in the input.
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

use std::{fmt::Display, ops::Range, str::CharIndices};

/// Parse a string slice into a version through a [`VersionBuilder`].
///
/// The input must conform to the SemVer 2.0.0 grammar in its entirety;
/// there is no partial parsing and no recovery. On failure, the returned
/// [`Error`] borrows the input and can point at the offending characters.
///
/// ## Examples
///
/// ```rust
/// use exact_semver_parser::{parse, VersionBuilder};
///
/// /// Collects the version core and ignores all metadata.
/// #[derive(Debug, Default, PartialEq)]
/// struct Core(u64, u64, u64);
///
/// impl VersionBuilder<'_> for Core {
///     type Out = Self;
///
///     fn new() -> Self {
///         Self::default()
///     }
///
///     fn set_major(&mut self, major: u64) {
///         self.0 = major;
///     }
///
///     fn set_minor(&mut self, minor: u64) {
///         self.1 = minor;
///     }
///
///     fn set_patch(&mut self, patch: u64) {
///         self.2 = patch;
///     }
///
///     fn build(self) -> Self::Out {
///         self
///     }
/// }
///
/// assert_eq!(parse::<Core>("1.2.3-rc.1+build.5"), Ok(Core(1, 2, 3)));
/// assert!(parse::<Core>("1.2").is_err());
/// assert!(parse::<Core>("01.2.3").is_err());
/// ```
pub fn parse<'input, V>(input: &'input str) -> Result<V::Out, Error<'input>>
where
    V: VersionBuilder<'input>,
{
    match parse_parts::<V>(input) {
        Ok(version) => Ok(version.build()),
        Err(ErrorSpan { error, span }) => Err(Error { input, span, error }),
    }
}

/// Trait to abstract over version building.
///
/// The methods of this trait represent the components of a semantic version,
/// but allow for parsing into a custom type.
///
/// The trait is generic over the lifetime of the input string, so that one
/// could parse into a version without having to allocate.
///
/// Most methods have a default implementation that does nothing and ignores
/// the input. This can be used to implement some form of validation without
/// needing to keep the result.
///
/// ## Example
///
/// ```rust
/// # use exact_semver_parser::VersionBuilder;
///
/// struct IsPreRelease(bool);
///
/// impl VersionBuilder<'_> for IsPreRelease {
///     type Out = bool;
///
///     fn new() -> Self {
///         IsPreRelease(false)
///     }
///
///     fn add_pre_release(&mut self, _pre_release: &str) {
///         self.0 = true;
///     }
///
///     fn build(self) -> Self::Out {
///         self.0
///     }
/// }
///
/// fn is_pre_release(v: &str) -> bool {
///     exact_semver_parser::parse::<IsPreRelease>(v).unwrap_or_default()
/// }
///
/// assert!(is_pre_release("1.2.3-pre"));
/// assert!(!is_pre_release("1.2.3"));
/// assert!(!is_pre_release("1.2.3+build"));
/// ```
pub trait VersionBuilder<'input> {
    /// The return type of the final version.
    type Out;

    /// Construct a new version builder.
    ///
    /// The function must not fail and the version (if returned from
    /// [`VersionBuilder::build`] at this point) should represent "0.0.0".
    fn new() -> Self;

    /// Set the major version component.
    ///
    /// Called exactly once before [`VersionBuilder::build`].
    #[allow(unused)]
    fn set_major(&mut self, major: u64) {}

    /// Set the minor version component.
    ///
    /// Called exactly once before [`VersionBuilder::build`].
    #[allow(unused)]
    fn set_minor(&mut self, minor: u64) {}

    /// Set the patch version component.
    ///
    /// Called exactly once before [`VersionBuilder::build`].
    #[allow(unused)]
    fn set_patch(&mut self, patch: u64) {}

    /// Add a pre-release identifier.
    ///
    /// The identifier is non-empty, drawn from `[0-9A-Za-z-]`, and free of
    /// numeric leading zeroes. Identifiers arrive in input order and the
    /// method is called once per identifier.
    #[allow(unused)]
    fn add_pre_release(&mut self, pre_release: &'input str) {}

    /// Add a build identifier.
    ///
    /// Same contract as [`VersionBuilder::add_pre_release`], for the build
    /// metadata section.
    #[allow(unused)]
    fn add_build(&mut self, build: &'input str) {}

    /// Construct the final version.
    fn build(self) -> Self::Out;
}

/// Possible errors that happen during parsing
/// and the location of the input where the error occurred.
///
/// # Example
///
/// ```rust
/// # use exact_semver_parser::{parse, ErrorKind, VersionBuilder};
/// # #[derive(Debug)]
/// # struct Probe;
/// # impl VersionBuilder<'_> for Probe {
/// #     type Out = ();
/// #     fn new() -> Self {
/// #         Probe
/// #     }
/// #     fn build(self) -> Self::Out {}
/// # }
/// let error = parse::<Probe>("1.2.3-x..y").unwrap_err();
/// assert_eq!(error.error_kind(), ErrorKind::EmptyPreReleaseIdentifier);
/// assert_eq!(error.error_line(), "Empty pre-release identifier");
///
/// let error = parse::<Probe>("1.2.3!").unwrap_err();
/// assert_eq!(error.error_kind(), ErrorKind::UnexpectedChar);
/// assert_eq!(error.to_string(), "Unexpected `!` in version core");
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct Error<'input> {
    input: &'input str,
    span: Span,
    error: ErrorType,
}

impl<'input> Error<'input> {
    /// Creates a new [`OwnedError`] out of this [`Error`].
    ///
    /// This is a specialized version of [`Clone`] which returns a different type.
    #[inline]
    pub fn owned(&self) -> OwnedError {
        OwnedError {
            input: self.input.into(),
            span: self.span,
            error: self.error,
        }
    }

    /// Returns the original input line.
    #[inline]
    pub fn input(&self) -> &'input str {
        self.input
    }

    /// Returns a range into the input string that points to the erroneous input.
    ///
    /// The range is empty when the error is a premature end of input.
    #[inline]
    pub fn error_span(&self) -> Range<usize> {
        self.span.into()
    }

    /// Returns the kind of error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use exact_semver_parser::{parse, ErrorKind, VersionBuilder};
    /// # #[derive(Debug)]
    /// # struct Probe;
    /// # impl VersionBuilder<'_> for Probe {
    /// #     type Out = ();
    /// #     fn new() -> Self {
    /// #         Probe
    /// #     }
    /// #     fn build(self) -> Self::Out {}
    /// # }
    /// # fn kind(input: &str) -> ErrorKind {
    /// #     parse::<Probe>(input).unwrap_err().error_kind()
    /// # }
    /// assert_eq!(kind("1.2"), ErrorKind::IncompleteVersionCore);
    /// assert_eq!(kind("01.2.3"), ErrorKind::LeadingZero);
    /// assert_eq!(kind("1.2.3-"), ErrorKind::EmptyPreReleaseIdentifier);
    /// assert_eq!(kind("1.2.3+"), ErrorKind::EmptyBuildIdentifier);
    /// assert_eq!(kind("1.2.3 "), ErrorKind::UnexpectedChar);
    /// ```
    #[inline]
    pub fn error_kind(&self) -> ErrorKind {
        match self.error {
            ErrorType::Incomplete => ErrorKind::IncompleteVersionCore,
            ErrorType::LeadingZero(_) => ErrorKind::LeadingZero,
            ErrorType::EmptyIdentifier(Segment::Build) => ErrorKind::EmptyBuildIdentifier,
            ErrorType::EmptyIdentifier(_) => ErrorKind::EmptyPreReleaseIdentifier,
            ErrorType::Unexpected(_) => ErrorKind::UnexpectedChar,
            ErrorType::Overflow(_) => ErrorKind::NumberOverflow,
        }
    }

    /// Returns a slice of the original input line that triggered the error.
    #[inline]
    pub fn erroneous_input(&self) -> &'input str {
        &self.input[self.error_span()]
    }

    /// Returns a text representation of the error.
    ///
    /// This is equivalent to the [`Display`] implementation, which can be
    /// further customized with format specifiers.
    pub fn error_line(&self) -> String {
        match &self.error {
            ErrorType::Incomplete => {
                String::from("Incomplete version core: expected three dot-separated numbers")
            }
            ErrorType::LeadingZero(Segment::VersionCore) => format!(
                "Leading zero in version core number `{}`",
                self.erroneous_input()
            ),
            ErrorType::LeadingZero(segment) => format!(
                "Leading zero in {} identifier `{}`",
                segment,
                self.erroneous_input()
            ),
            ErrorType::EmptyIdentifier(segment) => format!("Empty {} identifier", segment),
            ErrorType::Unexpected(segment) => {
                format!("Unexpected `{}` in {}", self.erroneous_input(), segment)
            }
            ErrorType::Overflow(part) => format!(
                "Could not parse the {} number: `{}` is too large",
                part,
                self.erroneous_input()
            ),
        }
    }

    /// Returns a caret line indicating the erroneous input if it was written
    /// under the original input line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use exact_semver_parser::{parse, VersionBuilder};
    /// # #[derive(Debug)]
    /// # struct Probe;
    /// # impl VersionBuilder<'_> for Probe {
    /// #     type Out = ();
    /// #     fn new() -> Self {
    /// #         Probe
    /// #     }
    /// #     fn build(self) -> Self::Out {}
    /// # }
    /// let error = parse::<Probe>("1.2.3-x#y").unwrap_err();
    /// assert_eq!(error.indicate_erroneous_input(), "~~~~~~~^");
    /// ```
    pub fn indicate_erroneous_input(&self) -> String {
        format!(
            "{0:~<start$}{0:^<width$}",
            "",
            start = self.span.start,
            width = self.span.end - self.span.start
        )
    }
}

/// Owned version of [`Error`] which clones the input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedError {
    input: String,
    span: Span,
    error: ErrorType,
}

impl OwnedError {
    /// Return a borrowed version of this error.
    pub fn borrowed(&self) -> Error<'_> {
        Error {
            input: &self.input,
            span: self.span,
            error: self.error,
        }
    }

    /// See [`Error::input`].
    #[inline]
    pub fn input(&self) -> &str {
        self.borrowed().input()
    }

    /// See [`Error::error_span`].
    #[inline]
    pub fn error_span(&self) -> Range<usize> {
        self.borrowed().error_span()
    }

    /// See [`Error::error_kind`].
    #[inline]
    pub fn error_kind(&self) -> ErrorKind {
        self.borrowed().error_kind()
    }

    /// See [`Error::erroneous_input`].
    #[inline]
    pub fn erroneous_input(&self) -> &str {
        self.borrowed().erroneous_input()
    }

    /// See [`Error::error_line`].
    #[inline]
    pub fn error_line(&self) -> String {
        self.borrowed().error_line()
    }

    /// See [`Error::indicate_erroneous_input`].
    #[inline]
    pub fn indicate_erroneous_input(&self) -> String {
        self.borrowed().indicate_erroneous_input()
    }
}

/// Possible kinds of parse failures.
/// These don't include any location information, which is covered by the
/// various error methods like [`Error::erroneous_input`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The version core did not contain exactly three dot-separated numbers
    IncompleteVersionCore,
    /// A version core number or a numeric identifier had a leading zero
    LeadingZero,
    /// A pre-release identifier was empty
    EmptyPreReleaseIdentifier,
    /// A build identifier was empty
    EmptyBuildIdentifier,
    /// Found a character that is not valid at its position
    UnexpectedChar,
    /// A version core number was too large to represent
    NumberOverflow,
}

impl Display for Error<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.error_line())?;
        if f.alternate() {
            writeln!(f)?;
            writeln!(f, "|    {}", self.input)?;
            writeln!(f, "|    {}", self.indicate_erroneous_input())?;
        }
        Ok(())
    }
}

impl Display for OwnedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.borrowed().fmt(f)
    }
}

impl std::error::Error for Error<'_> {}

impl std::error::Error for OwnedError {}

#[derive(Debug, PartialEq, Eq)]
struct ErrorSpan {
    error: ErrorType,
    span: Span,
}

impl ErrorSpan {
    fn incomplete(span: Span) -> Self {
        Self {
            error: ErrorType::Incomplete,
            span,
        }
    }

    fn leading_zero(segment: Segment, span: Span) -> Self {
        Self {
            error: ErrorType::LeadingZero(segment),
            span,
        }
    }

    fn empty_identifier(segment: Segment, span: Span) -> Self {
        Self {
            error: ErrorType::EmptyIdentifier(segment),
            span,
        }
    }

    fn unexpected(segment: Segment, span: Span) -> Self {
        Self {
            error: ErrorType::Unexpected(segment),
            span,
        }
    }

    fn overflow(part: Part, span: Span) -> Self {
        Self {
            error: ErrorType::Overflow(part),
            span,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ErrorType {
    Incomplete,
    LeadingZero(Segment),
    EmptyIdentifier(Segment),
    Unexpected(Segment),
    Overflow(Part),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Part {
    Major,
    Minor,
    Patch,
}

impl Display for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Part::Major => f.pad("major"),
            Part::Minor => f.pad("minor"),
            Part::Patch => f.pad("patch"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Segment {
    VersionCore,
    PreRelease,
    Build,
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::VersionCore => f.pad("version core"),
            Segment::PreRelease => f.pad("pre-release"),
            Segment::Build => f.pad("build"),
        }
    }
}

/// The regions of a version string. Each region is handled by one function
/// that consumes its input and names the region that follows it.
#[derive(Debug, Copy, Clone)]
enum State {
    VersionCore,
    PreRelease,
    Build,
    Done,
}

fn parse_parts<'input, V>(input: &'input str) -> Result<V, ErrorSpan>
where
    V: VersionBuilder<'input>,
{
    let mut cursor = Cursor::new(input);
    let mut version = V::new();
    let mut state = State::VersionCore;

    loop {
        state = match state {
            State::VersionCore => version_core(&mut cursor, &mut version)?,
            State::PreRelease => pre_release(&mut cursor, &mut version)?,
            State::Build => build_metadata(&mut cursor, &mut version)?,
            State::Done => return Ok(version),
        };
    }
}

/// Parses the three dot-separated version core numbers and decides which
/// region follows, based on the separator after the patch number.
fn version_core<'input, V>(cursor: &mut Cursor<'input>, version: &mut V) -> Result<State, ErrorSpan>
where
    V: VersionBuilder<'input>,
{
    for &part in &[Part::Major, Part::Minor, Part::Patch] {
        let num = number(cursor, part)?;
        match part {
            Part::Major => version.set_major(num),
            Part::Minor => version.set_minor(num),
            Part::Patch => version.set_patch(num),
        }
        if part == Part::Patch {
            break;
        }
        match cursor.peek() {
            Some('.') => cursor.bump(),
            // a dash or plus after only one or two numbers means the core
            // ended early, same as running out of input
            None | Some('-') | Some('+') => {
                return Err(ErrorSpan::incomplete(cursor.next_span()));
            }
            Some(_) => {
                return Err(ErrorSpan::unexpected(
                    Segment::VersionCore,
                    cursor.next_span(),
                ));
            }
        }
    }

    match cursor.peek() {
        None => Ok(State::Done),
        Some('-') => {
            cursor.bump();
            Ok(State::PreRelease)
        }
        Some('+') => {
            cursor.bump();
            Ok(State::Build)
        }
        // a fourth dotted component is not a version core
        Some('.') => Err(ErrorSpan::incomplete(cursor.next_span())),
        Some(_) => Err(ErrorSpan::unexpected(
            Segment::VersionCore,
            cursor.next_span(),
        )),
    }
}

fn pre_release<'input, V>(cursor: &mut Cursor<'input>, version: &mut V) -> Result<State, ErrorSpan>
where
    V: VersionBuilder<'input>,
{
    let (ids, next) = identifiers(cursor, Segment::PreRelease)?;
    reject_numeric_leading_zeroes(cursor.input, &ids, Segment::PreRelease)?;
    for id in ids {
        version.add_pre_release(id.at(cursor.input));
    }
    Ok(next)
}

fn build_metadata<'input, V>(
    cursor: &mut Cursor<'input>,
    version: &mut V,
) -> Result<State, ErrorSpan>
where
    V: VersionBuilder<'input>,
{
    let (ids, next) = identifiers(cursor, Segment::Build)?;
    reject_numeric_leading_zeroes(cursor.input, &ids, Segment::Build)?;
    for id in ids {
        version.add_build(id.at(cursor.input));
    }
    Ok(next)
}

/// Parses one version core number.
fn number(cursor: &mut Cursor<'_>, part: Part) -> Result<u64, ErrorSpan> {
    let start = cursor.pos();
    cursor.eat_while(is_digit);
    let span = Span::new(start, cursor.pos());

    if span.is_empty() {
        return Err(match cursor.peek() {
            Some(c) if c != '.' => ErrorSpan::unexpected(Segment::VersionCore, cursor.next_span()),
            // a dot or the end of input where a number was expected means
            // the core has fewer than three numbers
            _ => ErrorSpan::incomplete(cursor.next_span()),
        });
    }

    let digits = span.at(cursor.input);
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(ErrorSpan::leading_zero(Segment::VersionCore, span));
    }

    digits.parse().map_err(|_| ErrorSpan::overflow(part, span))
}

/// Parses a run of dot-separated identifiers until the region ends.
///
/// A pre-release region ends at the end of input or at a `+` introducing the
/// build region; the build region ends at the end of input only.
fn identifiers(cursor: &mut Cursor<'_>, segment: Segment) -> Result<(Vec<Span>, State), ErrorSpan> {
    let mut ids = Vec::new();
    loop {
        let start = cursor.pos();
        cursor.eat_while(is_identifier_char);
        let span = Span::new(start, cursor.pos());

        if span.is_empty() {
            return Err(match cursor.peek() {
                None | Some('.') => ErrorSpan::empty_identifier(segment, cursor.next_span()),
                Some('+') if segment == Segment::PreRelease => {
                    ErrorSpan::empty_identifier(segment, cursor.next_span())
                }
                Some(_) => ErrorSpan::unexpected(segment, cursor.next_span()),
            });
        }
        ids.push(span);

        match cursor.peek() {
            None => return Ok((ids, State::Done)),
            Some('.') => cursor.bump(),
            Some('+') if segment == Segment::PreRelease => {
                cursor.bump();
                return Ok((ids, State::Build));
            }
            Some(_) => return Err(ErrorSpan::unexpected(segment, cursor.next_span())),
        }
    }
}

/// Rejects identifiers that are all digits with a leading zero.
///
/// Runs once the region is complete, so an unrecognized character later in
/// the region wins over a leading zero earlier in it.
fn reject_numeric_leading_zeroes(
    input: &str,
    ids: &[Span],
    segment: Segment,
) -> Result<(), ErrorSpan> {
    for &id in ids {
        let identifier = id.at(input);
        if identifier.len() > 1
            && identifier.starts_with('0')
            && identifier.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ErrorSpan::leading_zero(segment, id));
        }
    }
    Ok(())
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// A cursor over the characters of the input with a single peeked slot.
#[derive(Debug)]
struct Cursor<'input> {
    input: &'input str,
    chars: CharIndices<'input>,
    peeked: Option<(usize, char)>,
}

impl<'input> Cursor<'input> {
    fn new(input: &'input str) -> Cursor<'input> {
        let mut chars = input.char_indices();
        let peeked = chars.next();
        Cursor {
            input,
            chars,
            peeked,
        }
    }

    fn peek(&self) -> Option<char> {
        self.peeked.map(|(_, c)| c)
    }

    /// Byte position of the next character, or the input length at the end.
    fn pos(&self) -> usize {
        self.peeked.map_or(self.input.len(), |(at, _)| at)
    }

    fn bump(&mut self) {
        self.peeked = self.chars.next();
    }

    fn eat_while(&mut self, accept: fn(char) -> bool) {
        while let Some((_, c)) = self.peeked {
            if !accept(c) {
                break;
            }
            self.bump();
        }
    }

    /// Span of the next character, empty at the end of input.
    fn next_span(&self) -> Span {
        match self.peeked {
            Some((at, c)) => Span::new(at, at + c.len_utf8()),
            None => Span::new(self.input.len(), self.input.len()),
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
}

impl Span {
    fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn at<'input>(&self, input: &'input str) -> &'input str {
        &input[self.start..self.end]
    }
}

impl From<Span> for Range<usize> {
    fn from(s: Span) -> Self {
        s.start..s.end
    }
}
