// File: src/route/expr.rs
// Purpose: Precompiled generator expressions for building paths

use crate::path;
use crate::{PathContext, Value};
use std::fmt;

/// Function callable from a placeholder, e.g. `${#simplify(title)}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Simplify,
    Suffix,
    Encode,
}

impl Function {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "simplify" => Some(Function::Simplify),
            "suffix" => Some(Function::Suffix),
            "encode" => Some(Function::Encode),
            _ => None,
        }
    }

    fn apply(self, value: &str) -> String {
        match self {
            Function::Simplify => path::simplify(value),
            Function::Suffix => path::suffix(value),
            Function::Encode => path::encode(value),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Function::Simplify => "simplify",
            Function::Suffix => "suffix",
            Function::Encode => "encode",
        }
    }
}

/// Where a name lookup may find its root value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Variables first, then fields
    Any,
    /// Only the variable bag (`#name`)
    Variable,
}

/// Node of a compiled generator expression
///
/// Expressions are parsed once when a route is registered and evaluated for every
/// `build_path` call.
///
/// # Examples
///
/// ```
/// use vista_router::route::expr::Expr;
/// use vista_router::PathData;
///
/// let expr = Expr::parse("#simplify(title)").unwrap();
/// let data = PathData::new().with_field("title", "Hello World");
/// assert_eq!(expr.evaluate(&data), Some("hello-world".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Constant text
    Literal(String),
    /// Dotted name lookup, `page.id` or `#type`
    Lookup { scope: Scope, path: Vec<String> },
    /// Function applied to the value of another expression
    Call { function: Function, arg: Box<Expr> },
}

impl Expr {
    /// Parses the text of a `${...}` placeholder
    pub fn parse(source: &str) -> Result<Self, String> {
        let source = source.trim();

        if source.is_empty() {
            return Err("empty expression".to_string());
        }

        // 'quoted literal'
        if let Some(inner) = source
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
        {
            if inner.contains('\'') {
                return Err("unbalanced quote in string literal".to_string());
            }
            return Ok(Expr::Literal(inner.to_string()));
        }

        match source.strip_prefix('#') {
            Some(rest) => match rest.split_once('(') {
                Some((name, tail)) => {
                    let function = Function::from_name(name.trim())
                        .ok_or_else(|| format!("unknown function #{}", name.trim()))?;
                    let inner = tail
                        .strip_suffix(')')
                        .ok_or_else(|| format!("missing ')' after #{}(", function.name()))?;
                    Ok(Expr::Call {
                        function,
                        arg: Box::new(Expr::parse(inner)?),
                    })
                }
                None => Ok(Expr::Lookup {
                    scope: Scope::Variable,
                    path: parse_path(rest)?,
                }),
            },
            None => Ok(Expr::Lookup {
                scope: Scope::Any,
                path: parse_path(source)?,
            }),
        }
    }

    /// Evaluates the expression. `None` means the context cannot satisfy it.
    pub fn evaluate(&self, context: &dyn PathContext) -> Option<String> {
        match self {
            Expr::Literal(text) => Some(text.clone()),
            Expr::Lookup { scope, path } => lookup(context, *scope, path)?.render(),
            Expr::Call { function, arg } => arg.evaluate(context).map(|v| function.apply(&v)),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Expr::Literal(_))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(text) => write!(f, "'{}'", text),
            Expr::Lookup { scope, path } => {
                if *scope == Scope::Variable {
                    f.write_str("#")?;
                }
                f.write_str(&path.join("."))
            }
            Expr::Call { function, arg } => write!(f, "#{}({})", function.name(), arg),
        }
    }
}

fn parse_path(source: &str) -> Result<Vec<String>, String> {
    source
        .split('.')
        .map(|part| {
            let part = part.trim();
            if is_identifier(part) {
                Ok(part.to_string())
            } else {
                Err(format!("'{}' is not a valid name", part))
            }
        })
        .collect()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}

fn lookup(context: &dyn PathContext, scope: Scope, path: &[String]) -> Option<Value> {
    let (root, rest) = path.split_first()?;

    let root_value = match scope {
        Scope::Variable => context.variables().get(root).cloned(),
        Scope::Any => context
            .variables()
            .get(root)
            .cloned()
            .or_else(|| context.field(root)),
    }?;

    rest.iter()
        .try_fold(root_value, |value, key| value.get(key).cloned())
}
