//! Parsing and evaluation of element match patterns.
//!
//! The grammar is the element-only subset of XSLT match patterns:
//! a union (`a|b`) of location paths, each an optional leading `/` followed
//! by `/`-separated steps, where a step is a qualified name or `*`.
use crate::error::RuleError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, multispace0, satisfy},
    combinator::{map, opt, recognize},
    multi::separated_list1,
    sequence::{delimited, pair, preceded},
};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameTest {
    Wildcard,
    Name(String),
}

impl NameTest {
    fn matches(&self, name: &str) -> bool {
        match self {
            NameTest::Wildcard => true,
            NameTest::Name(expected) => expected == name,
        }
    }
}

/// A single location path within a pattern, e.g. `/doc/section/para`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PathPattern {
    is_absolute: bool,
    steps: Vec<NameTest>,
}

impl PathPattern {
    fn matches(&self, path: &[&str]) -> bool {
        if self.steps.len() > path.len() {
            return false;
        }
        if self.is_absolute && self.steps.len() != path.len() {
            return false;
        }
        self.steps
            .iter()
            .rev()
            .zip(path.iter().rev())
            .all(|(step, name)| step.matches(name))
    }

    /// Named steps weigh 2, wildcards 1, and anchoring at the root adds 2.
    fn priority(&self) -> u32 {
        let steps: u32 = self
            .steps
            .iter()
            .map(|step| match step {
                NameTest::Wildcard => 1,
                NameTest::Name(_) => 2,
            })
            .sum();
        if self.is_absolute { steps + 2 } else { steps }
    }
}

/// A compiled element match pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    paths: Vec<PathPattern>,
    original_text: String,
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original_text)
    }
}

impl Pattern {
    /// Evaluates the pattern against the chain of qualified element names
    /// from the document element down to the current element.
    pub fn matches(&self, path: &[&str]) -> bool {
        self.paths.iter().any(|p| p.matches(path))
    }

    /// Returns the priority of the most specific alternative matching `path`.
    pub fn priority(&self, path: &[&str]) -> Option<u32> {
        self.paths
            .iter()
            .filter(|p| p.matches(path))
            .map(PathPattern::priority)
            .max()
    }
}

// --- Parser ---

pub fn parse(text: &str) -> Result<Pattern, RuleError> {
    match pattern_parser(text.trim()) {
        Ok(("", paths)) => Ok(Pattern {
            paths,
            original_text: text.to_string(),
        }),
        Ok((rem, _)) => Err(RuleError::PatternParse(
            text.to_string(),
            format!("Unconsumed input in pattern: {}", rem),
        )),
        Err(e) => Err(RuleError::PatternParse(text.to_string(), e.to_string())),
    }
}

/// Checks whether `name` is a valid (optionally prefixed) XML name.
pub fn is_qname(name: &str) -> bool {
    matches!(qname(name), Ok(("", _)))
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}

fn ncname(input: &str) -> IResult<&str, &str> {
    recognize(pair(satisfy(is_name_start), take_while(is_name_char))).parse(input)
}

fn qname(input: &str) -> IResult<&str, &str> {
    recognize(pair(ncname, opt(preceded(char(':'), ncname)))).parse(input)
}

fn name_test(input: &str) -> IResult<&str, NameTest> {
    alt((
        map(char('*'), |_| NameTest::Wildcard),
        map(qname, |name: &str| NameTest::Name(name.to_string())),
    ))
    .parse(input)
}

fn path_parser(input: &str) -> IResult<&str, PathPattern> {
    map(
        pair(opt(char('/')), separated_list1(char('/'), name_test)),
        |(root, steps)| PathPattern {
            is_absolute: root.is_some(),
            steps,
        },
    )
    .parse(input)
}

fn pattern_parser(input: &str) -> IResult<&str, Vec<PathPattern>> {
    separated_list1(delimited(multispace0, char('|'), multispace0), path_parser).parse(input)
}
