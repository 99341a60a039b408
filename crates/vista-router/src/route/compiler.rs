/// Pattern compilation and weight calculation for route templates
///
/// A template is literal text interleaved with `${expression}` placeholders, for example
/// `picture/${id}/${#simplify(title)}.html`. Compiling it yields:
///
/// - a regular expression matching request paths, one `([^/]*)` group per placeholder,
/// - the placeholder texts as parameter names, in template order,
/// - generator expressions for building paths,
/// - the weight used to rank overlapping routes.
///
/// All functions are **pure**: same input → same output, no side effects.
use once_cell::sync::Lazy;
use regex::Regex;

use super::expr::Expr;
use crate::error::{Result, RouteError};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder regex is valid"));

/// Matches exactly one placeholder value, never crossing a path separator
const PARAM_GROUP: &str = "([^/]*)";

/// Result of compiling a route template
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub regex: Regex,
    pub segments: Vec<Expr>,
    pub params: Vec<String>,
    pub weight: u32,
}

/// Accumulator for the compile pass
///
/// All mutations are local to the accumulator; each step returns the updated state.
#[derive(Default)]
struct CompileState {
    regex: String,
    segments: Vec<Expr>,
    params: Vec<String>,
}

impl CompileState {
    fn new() -> Self {
        Self {
            regex: String::from("^"),
            ..Self::default()
        }
    }

    /// Adds a run of literal text
    fn with_literal(mut self, template: &str, text: &str) -> Result<Self> {
        if text.contains('\'') {
            return Err(RouteError::QuoteInLiteral {
                template: template.to_string(),
            });
        }

        if !text.is_empty() {
            self.regex.push_str(&regex::escape(text));
            self.segments.push(Expr::Literal(text.to_string()));
        }
        Ok(self)
    }

    /// Adds a `${...}` placeholder
    fn with_placeholder(mut self, template: &str, source: &str) -> Result<Self> {
        let expr = Expr::parse(source).map_err(|reason| RouteError::InvalidExpression {
            template: template.to_string(),
            expression: source.to_string(),
            reason,
        })?;

        self.regex.push_str(PARAM_GROUP);
        self.params.push(source.trim().to_string());
        self.segments.push(expr);
        Ok(self)
    }

    fn finish(mut self, template: &str) -> Result<CompiledPattern> {
        self.regex.push('$');

        let regex = Regex::new(&self.regex).map_err(|e| RouteError::InvalidPattern {
            template: template.to_string(),
            reason: e.to_string(),
        })?;

        // Group 0 is the whole match
        let groups = regex.captures_len() - 1;
        if groups != self.params.len() {
            return Err(RouteError::GroupCountMismatch {
                template: template.to_string(),
                groups,
                params: self.params.len(),
            });
        }

        Ok(CompiledPattern {
            regex,
            segments: self.segments,
            params: self.params,
            weight: compute_weight(template),
        })
    }
}

/// Compiles a route template
///
/// # Errors
///
/// - [`RouteError::QuoteInLiteral`] if literal text contains `'`
/// - [`RouteError::InvalidExpression`] if a placeholder is not a valid expression
///
/// # Examples
///
/// ```
/// use vista_router::route::compiler::compile;
///
/// let compiled = compile("test/${blafoo}/and/a/${path}.html").unwrap();
/// assert_eq!(compiled.params, vec!["blafoo", "path"]);
/// assert_eq!(compiled.weight, 107);
/// assert!(compiled.regex.is_match("test/Something/and/a/1234.html"));
/// assert!(!compiled.regex.is_match("test/Some/thing/and/a/1234.html"));
/// ```
pub fn compile(template: &str) -> Result<CompiledPattern> {
    let (state, previous) = PLACEHOLDER.captures_iter(template).try_fold(
        (CompileState::new(), 0usize),
        |(state, previous), caps| {
            let whole = caps.get(0).expect("group 0 always participates");
            let source = caps.get(1).map(|m| m.as_str()).unwrap_or_default();

            let state = state
                .with_literal(template, &template[previous..whole.start()])?
                .with_placeholder(template, source)?;

            Ok::<_, RouteError>((state, whole.end()))
        },
    )?;

    state
        .with_literal(template, &template[previous..])?
        .finish(template)
}

/// Computes the weight of a template (pure function)
///
/// Every path separator `/` counts 10, every placeholder `${...}` counts 1 as a whole,
/// every other character counts 5. Higher weights are tried first, so literal text and
/// deeper paths win over placeholders.
///
/// ```
/// use vista_router::route::compiler::compute_weight;
///
/// assert_eq!(compute_weight("test.html"), 45);
/// assert_eq!(compute_weight("test/${blafoo}.html"), 56);
/// assert_eq!(compute_weight("test/${blafoo}/and/a/${path}.html"), 107);
/// ```
pub fn compute_weight(template: &str) -> u32 {
    let chars: Vec<char> = template.chars().collect();
    let mut weight = 0;
    let mut pos = 0;

    while pos < chars.len() {
        match chars[pos] {
            '/' => weight += 10,
            '$' if chars.get(pos + 1) == Some(&'{') => {
                match chars[pos..].iter().position(|&c| c == '}') {
                    Some(offset) => {
                        pos += offset;
                        weight += 1;
                    }
                    // Unterminated, so not a placeholder
                    None => weight += 5,
                }
            }
            _ => weight += 5,
        }
        pos += 1;
    }

    weight
}
