use crate::template::{Params, TemplateError, TemplateResult};
use std::fmt;
use std::str::FromStr;

/// Longest prefix modifier the RFC allows (`{var:9999}`)
const MAX_PREFIX: usize = 9999;

/// Expression operator, the optional first character inside `{...}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operator {
    Simple,
    Reserved,
    Fragment,
    Label,
    Path,
    PathParam,
    Query,
    QueryContinuation,
}

impl Operator {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Reserved),
            '#' => Some(Self::Fragment),
            '.' => Some(Self::Label),
            '/' => Some(Self::Path),
            ';' => Some(Self::PathParam),
            '?' => Some(Self::Query),
            '&' => Some(Self::QueryContinuation),
            _ => None,
        }
    }

    /// Prefix written before the first defined variable
    pub(crate) fn first(self) -> &'static str {
        match self {
            Self::Simple | Self::Reserved => "",
            Self::Fragment => "#",
            Self::Label => ".",
            Self::Path => "/",
            Self::PathParam => ";",
            Self::Query => "?",
            Self::QueryContinuation => "&",
        }
    }

    /// Separator written between defined variables
    pub(crate) fn separator(self) -> &'static str {
        match self {
            Self::Simple | Self::Reserved | Self::Fragment => ",",
            Self::Label => ".",
            Self::Path => "/",
            Self::PathParam => ";",
            Self::Query | Self::QueryContinuation => "&",
        }
    }

    /// Whether values are written as `name=value` pairs
    pub(crate) fn named(self) -> bool {
        matches!(
            self,
            Self::PathParam | Self::Query | Self::QueryContinuation
        )
    }

    /// Suffix written after the name of an empty named value
    pub(crate) fn if_empty(self) -> &'static str {
        match self {
            Self::Query | Self::QueryContinuation => "=",
            _ => "",
        }
    }

    /// Whether reserved characters pass through unencoded
    pub(crate) fn allow_reserved(self) -> bool {
        matches!(self, Self::Reserved | Self::Fragment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Modifier {
    None,
    Prefix(usize),
    Explode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VarSpec {
    pub(crate) name: String,
    pub(crate) modifier: Modifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Expression {
    pub(crate) operator: Operator,
    pub(crate) vars: Vec<VarSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Part {
    Literal(String),
    Expression(Expression),
}

/// A parsed URI template
///
/// # Examples
///
/// ```
/// use hal_navigator::template::{Params, UriTemplate};
///
/// let template = UriTemplate::parse("/a/{id}").unwrap();
/// assert!(template.is_templated());
/// assert_eq!(template.expand(&Params::new().with("id", 1)), "/a/1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    source: String,
    parts: Vec<Part>,
}

impl UriTemplate {
    /// Parses a template string
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] for unbalanced braces, empty expressions,
    /// reserved operators, invalid variable names and bad prefix modifiers.
    pub fn parse(template: &str) -> TemplateResult<Self> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = template;
        let mut offset = 0;

        while let Some(pos) = rest.find(['{', '}']) {
            literal.push_str(&rest[..pos]);

            if rest.as_bytes()[pos] == b'}' {
                return Err(TemplateError::UnexpectedClose {
                    template: template.to_string(),
                    offset: offset + pos,
                });
            }

            let start = offset + pos;
            let after_open = &rest[pos + 1..];
            let end = after_open
                .find(['{', '}'])
                .filter(|&end| after_open.as_bytes()[end] == b'}')
                .ok_or_else(|| TemplateError::Unclosed {
                    template: template.to_string(),
                    offset: start,
                })?;

            if !literal.is_empty() {
                parts.push(Part::Literal(std::mem::take(&mut literal)));
            }
            parts.push(Part::Expression(parse_expression(
                template,
                &after_open[..end],
                start,
            )?));

            let consumed = pos + 1 + end + 1;
            rest = &rest[consumed..];
            offset += consumed;
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }

        Ok(Self {
            source: template.to_string(),
            parts,
        })
    }

    /// Expands the template; undefined variables are omitted
    pub fn expand(&self, params: &Params) -> String {
        crate::template::expand::expand_parts(&self.parts, params)
    }

    /// The original template text
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if the template contains at least one expression
    pub fn is_templated(&self) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, Part::Expression(_)))
    }

    /// Names of all variables referenced by the template, in order
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().flat_map(|part| match part {
            Part::Expression(expr) => expr.vars.iter().map(|v| v.name.as_str()).collect(),
            Part::Literal(_) => Vec::new(),
        })
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for UriTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> TemplateResult<Self> {
        Self::parse(s)
    }
}

fn parse_expression(template: &str, body: &str, offset: usize) -> TemplateResult<Expression> {
    let mut chars = body.chars();
    let (operator, vars) = match chars.next() {
        None => {
            return Err(TemplateError::EmptyExpression {
                template: template.to_string(),
                offset,
            })
        }
        Some(c @ ('=' | ',' | '!' | '@' | '|')) => {
            return Err(TemplateError::ReservedOperator {
                template: template.to_string(),
                operator: c,
            })
        }
        Some(c) => match Operator::from_char(c) {
            Some(op) => (op, chars.as_str()),
            None => (Operator::Simple, body),
        },
    };

    if vars.is_empty() {
        return Err(TemplateError::EmptyExpression {
            template: template.to_string(),
            offset,
        });
    }

    let vars = vars
        .split(',')
        .map(|spec| parse_varspec(template, spec))
        .collect::<TemplateResult<Vec<_>>>()?;

    Ok(Expression { operator, vars })
}

fn parse_varspec(template: &str, spec: &str) -> TemplateResult<VarSpec> {
    let (name, modifier) = if let Some(name) = spec.strip_suffix('*') {
        (name, Modifier::Explode)
    } else if let Some((name, length)) = spec.split_once(':') {
        let prefix = length
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=MAX_PREFIX).contains(n) && !length.starts_with('0'))
            .ok_or_else(|| TemplateError::InvalidPrefix {
                template: template.to_string(),
                modifier: length.to_string(),
            })?;
        (name, Modifier::Prefix(prefix))
    } else {
        (spec, Modifier::None)
    };

    if !is_valid_varname(name) {
        return Err(TemplateError::InvalidVariable {
            template: template.to_string(),
            name: name.to_string(),
        });
    }

    Ok(VarSpec {
        name: name.to_string(),
        modifier,
    })
}

/// varname = varchar *( ["."] varchar ), varchar = ALPHA / DIGIT / "_" / pct-encoded
fn is_valid_varname(name: &str) -> bool {
    if name.is_empty() || name.starts_with('.') || name.ends_with('.') || name.contains("..") {
        return false;
    }

    let bytes = name.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let valid = bytes.len() > i + 2
                    && bytes[i + 1].is_ascii_hexdigit()
                    && bytes[i + 2].is_ascii_hexdigit();
                if !valid {
                    return false;
                }
                i += 3;
            }
            b if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' => i += 1,
            _ => return false,
        }
    }

    true
}
