//! Function signature rendering
//!
//! A [`Signature`] is the parameter list and return annotation of a single
//! function, reduced to the parts the outline shows: regular parameters,
//! `*args`, `**kwargs` and the return type. Positional-only and keyword-only
//! parameters are not part of the rendered signature.

use crate::syntax::{FunctionDef, Param};
use std::fmt;

/// How a parameter is passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// `name`
    Positional,
    /// `*name`
    VarArgs,
    /// `**name`
    KwArgs,
}

/// A parameter ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Rendered annotation text
    pub type_text: Option<String>,
    /// How the parameter is passed
    pub kind: ParameterKind,
}

impl Parameter {
    /// Create a new positional parameter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_text: None,
            kind: ParameterKind::Positional,
        }
    }

    /// Set the annotation text
    pub fn with_type(mut self, type_text: impl Into<String>) -> Self {
        self.type_text = Some(type_text.into());
        self
    }

    /// Make parameter variadic positional (`*args`)
    pub fn variadic(mut self) -> Self {
        self.kind = ParameterKind::VarArgs;
        self
    }

    /// Make parameter variadic keyword (`**kwargs`)
    pub fn keywords(mut self) -> Self {
        self.kind = ParameterKind::KwArgs;
        self
    }

    fn from_param(param: &Param) -> Self {
        let parameter = Self::new(param.name.clone());
        match &param.annotation {
            Some(annotation) => parameter.with_type(annotation.to_string()),
            None => parameter,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParameterKind::Positional => {}
            ParameterKind::VarArgs => f.write_str("*")?,
            ParameterKind::KwArgs => f.write_str("**")?,
        }
        f.write_str(&self.name)?;
        if let Some(type_text) = &self.type_text {
            write!(f, ": {type_text}")?;
        }
        Ok(())
    }
}

/// A function's rendered parameter list and return type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    /// Parameters in rendering order
    pub parameters: Vec<Parameter>,
    /// Rendered return annotation
    pub return_type: Option<String>,
}

impl Signature {
    /// Create an empty signature
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Set return type
    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    /// Build the signature of a function definition
    pub fn from_function(function: &FunctionDef) -> Self {
        let params = &function.parameters;
        let mut signature = params
            .args
            .iter()
            .map(Parameter::from_param)
            .fold(Self::new(), Self::with_parameter);

        if let Some(vararg) = &params.vararg {
            signature = signature.with_parameter(Parameter::from_param(vararg).variadic());
        }
        if let Some(kwarg) = &params.kwarg {
            signature = signature.with_parameter(Parameter::from_param(kwarg).keywords());
        }
        if let Some(returns) = &function.returns {
            signature = signature.with_return_type(returns.to_string());
        }

        signature
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")?;

        if let Some(return_type) = &self.return_type {
            write!(f, " -> {return_type}")?;
        }
        Ok(())
    }
}

/// Render the signature string of a function definition
pub fn format_signature(function: &FunctionDef) -> String {
    Signature::from_function(function).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Expr, Parameters};

    fn function(parameters: Parameters, returns: Option<Expr>) -> FunctionDef {
        FunctionDef {
            name: "f".to_string(),
            is_async: false,
            decorators: Vec::new(),
            parameters,
            returns,
            body: Vec::new(),
        }
    }

    #[test]
    fn test_empty_signature() {
        let signature = format_signature(&function(Parameters::default(), None));
        assert_eq!(signature, "()");
    }

    #[test]
    fn test_full_signature() {
        let parameters = Parameters {
            args: vec![
                Param::new("a"),
                Param::new("b").with_annotation(Expr::name("int")),
            ],
            vararg: Some(Param::new("args")),
            kwarg: Some(Param::new("kwargs")),
            ..Parameters::default()
        };
        let signature = format_signature(&function(parameters, Some(Expr::name("dict"))));
        assert_eq!(signature, "(a, b: int, *args, **kwargs) -> dict");
    }

    #[test]
    fn test_annotated_variadics() {
        let parameters = Parameters {
            vararg: Some(Param::new("items").with_annotation(Expr::name("str"))),
            kwarg: Some(Param::new("options").with_annotation(Expr::name("Any"))),
            ..Parameters::default()
        };
        let signature = format_signature(&function(parameters, None));
        assert_eq!(signature, "(*items: str, **options: Any)");
    }

    #[test]
    fn test_positional_only_and_keyword_only_are_omitted() {
        let parameters = Parameters {
            posonly: vec![Param::new("first")],
            args: vec![Param::new("second")],
            kwonly: vec![Param::new("flag")],
            ..Parameters::default()
        };
        let signature = format_signature(&function(parameters, None));
        assert_eq!(signature, "(second)");
    }

    #[test]
    fn test_builder_rendering() {
        let signature = Signature::new()
            .with_parameter(Parameter::new("self"))
            .with_parameter(Parameter::new("rest").with_type("int").variadic())
            .with_return_type("None");
        assert_eq!(signature.to_string(), "(self, *rest: int) -> None");
    }
}
