use std::{fmt::Display, rc::Rc};

use crate::Span;

use super::expressions::Expression;

/// Common view of the things a variable reference can point at.
pub trait VariableDeclaration {
    fn name(&self) -> &str;
    fn is_compiler_generated(&self) -> bool;
    fn span(&self) -> &Span;
}

/// A named function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDeclaration {
    pub name: String,
    pub index: usize,
    pub span: Span,
}

impl VariableDeclaration for ParameterDeclaration {
    fn name(&self) -> &str {
        &self.name
    }
    fn is_compiler_generated(&self) -> bool {
        false
    }
    fn span(&self) -> &Span {
        &self.span
    }
}

impl Display for ParameterDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A local introduced by `for`, `var` or a conditional's result slot.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalVariableDeclaration {
    pub name: String,
    /// `None` only for compiler generated variables.
    pub initializer: Option<Expression>,
    pub is_compiler_generated: bool,
    pub span: Span,
}

impl VariableDeclaration for LocalVariableDeclaration {
    fn name(&self) -> &str {
        &self.name
    }
    fn is_compiler_generated(&self) -> bool {
        self.is_compiler_generated
    }
    fn span(&self) -> &Span {
        &self.span
    }
}

impl Display for LocalVariableDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.initializer {
            Some(initializer) => write!(f, "{}={}", self.name, initializer),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Shared handle to either kind of variable declaration.
///
/// References and scopes hold these so the declaration itself stays owned by
/// the node that introduced it.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationRef {
    Parameter(Rc<ParameterDeclaration>),
    Local(Rc<LocalVariableDeclaration>),
}

impl VariableDeclaration for DeclarationRef {
    fn name(&self) -> &str {
        match self {
            DeclarationRef::Parameter(param) => param.name(),
            DeclarationRef::Local(local) => local.name(),
        }
    }
    fn is_compiler_generated(&self) -> bool {
        match self {
            DeclarationRef::Parameter(param) => param.is_compiler_generated(),
            DeclarationRef::Local(local) => local.is_compiler_generated(),
        }
    }
    fn span(&self) -> &Span {
        match self {
            DeclarationRef::Parameter(param) => &param.span,
            DeclarationRef::Local(local) => &local.span,
        }
    }
}

/// Function signature, shared between the registries and call sites.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub name: String,
    pub parameters: Vec<Rc<ParameterDeclaration>>,
    pub is_extern: bool,
    pub is_compiler_generated: bool,
    pub span: Span,
}

impl Prototype {
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl Display for Prototype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_extern {
            write!(f, "[extern]")?;
        }
        if self.is_compiler_generated {
            write!(f, "[CompilerGenerated]")?;
        }

        let parameters = self
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<&str>>()
            .join(", ");
        write!(f, "{}({})", self.name, parameters)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub signature: Rc<Prototype>,
    pub body: Expression,
    /// Every local declared in the body, in declaration order.
    pub local_variables: Vec<Rc<LocalVariableDeclaration>>,
    pub is_anonymous: bool,
    pub span: Span,
}

impl FunctionDefinition {
    pub fn name(&self) -> &str {
        &self.signature.name
    }
}

impl Display for FunctionDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Define({},{})", self.signature, self.body)
    }
}
