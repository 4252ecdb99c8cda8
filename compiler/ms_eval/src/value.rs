//! Runtime values for the MicroScript evaluator.
//!
//! Every other part of the engine manipulates [`Value`]: a closed tagged
//! variant over the scalar types, string-element lists, and arrow-function
//! closures. Values are immutable; reassignment replaces a binding.

use std::fmt;
use std::rc::Rc;

use crate::errors::{unknown_type_annotation, EvalResult};

/// A declared type annotation (`var x: Int32 = ...`, `name: String`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    String,
    Char,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl TypeTag {
    /// All annotations, in declaration order.
    pub const ALL: [TypeTag; 6] = [
        TypeTag::String,
        TypeTag::Char,
        TypeTag::Int32,
        TypeTag::Int64,
        TypeTag::Float32,
        TypeTag::Float64,
    ];

    /// Parse an annotation, failing with `UnknownTypeAnnotation`.
    pub fn parse(annotation: &str) -> EvalResult<Self> {
        let annotation = annotation.trim();
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == annotation)
            .ok_or_else(|| unknown_type_annotation(annotation))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::String => "String",
            TypeTag::Char => "Char",
            TypeTag::Int32 => "Int32",
            TypeTag::Int64 => "Int64",
            TypeTag::Float32 => "Float32",
            TypeTag::Float64 => "Float64",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared return type of a function: a type tag or `void`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReturnType {
    #[default]
    Void,
    Value(TypeTag),
}

impl ReturnType {
    /// Parse `void` or a type annotation.
    pub fn parse(annotation: &str) -> EvalResult<Self> {
        match annotation.trim() {
            "void" => Ok(ReturnType::Void),
            other => TypeTag::parse(other).map(ReturnType::Value),
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnType::Void => f.write_str("void"),
            ReturnType::Value(tag) => tag.fmt(f),
        }
    }
}

/// A typed function or arrow-function parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeTag,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeTag) -> Self {
        Parameter {
            name: name.into(),
            ty,
        }
    }
}

/// A named function: typed parameters, a return type, and the raw text of
/// its body statements.
///
/// Functions are shared through `Rc` once defined and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    name: String,
    params: Vec<Parameter>,
    return_type: ReturnType,
    body: Vec<String>,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        params: Vec<Parameter>,
        return_type: ReturnType,
        body: Vec<String>,
    ) -> Self {
        Function {
            name: name.into(),
            params,
            return_type,
            body,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn return_type(&self) -> ReturnType {
        self.return_type
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }
}

/// Body of an arrow function as written in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClosureBody {
    /// `|a| => a * 2`
    Expression(String),
    /// `|a| => { s1; s2; }`, holding the text between the braces.
    Block(String),
}

/// An arrow function value.
///
/// The closure lowers its body to ordinary statement text up front, so the
/// invoker runs closures and named functions through the same path.
#[derive(Clone, Debug, PartialEq)]
pub struct Closure {
    function: Rc<Function>,
    body: ClosureBody,
}

impl Closure {
    pub fn new(
        name: impl Into<String>,
        params: Vec<Parameter>,
        return_type: ReturnType,
        body: ClosureBody,
    ) -> Self {
        let statements = match &body {
            ClosureBody::Expression(expr) => vec![format!("return {};", expr.trim())],
            ClosureBody::Block(block) => crate::text::split_top_level(block, ';')
                .into_iter()
                .filter(|stmt| !stmt.is_empty())
                .map(|stmt| {
                    if stmt.ends_with('{') || stmt.ends_with('}') {
                        stmt
                    } else {
                        format!("{stmt};")
                    }
                })
                .collect(),
        };
        Closure {
            function: Rc::new(Function::new(name, params, return_type, statements)),
            body,
        }
    }

    pub fn function(&self) -> &Rc<Function> {
        &self.function
    }

    pub fn body(&self) -> &ClosureBody {
        &self.body
    }
}

/// A runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    Float32(f32),
    Float64(f64),
    Boolean(bool),
    Char(char),
    String(String),
    List(Vec<Value>),
    Closure(Closure),
}

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Integer(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float64(f)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// A list whose elements are the given pieces of literal text.
    pub fn text_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(|s| Value::String(s.into())).collect())
    }

    /// Name of the runtime tag, as used in type errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Integer",
            Value::Float32(_) => "Float32",
            Value::Float64(_) => "Float64",
            Value::Boolean(_) => "Boolean",
            Value::Char(_) => "Char",
            Value::String(_) => "String",
            Value::List(_) => "List",
            Value::Closure(_) => "Closure",
        }
    }

    /// Numeric view used by the arithmetic evaluator.
    #[allow(
        clippy::cast_precision_loss,
        reason = "arithmetic is carried out in f64"
    )]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float32(f) => Some(f64::from(*f)),
            Value::Float64(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float32(n) => write!(f, "{n}"),
            Value::Float64(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Closure(closure) => write!(f, "<closure {}>", closure.function().name()),
        }
    }
}

#[cfg(test)]
mod tests;
