use clap::ValueEnum;

/// Language feature tiers, each one a superset of the previous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum LanguageLevel {
    /// Functions, externs and arithmetic.
    SimpleExpressions,
    /// Adds `if`/`then`/`else` and `for`/`in`.
    ControlFlow,
    /// Adds `def unary` and `def binary` operator definitions.
    UserDefinedOperators,
    /// Adds `var`/`in` and assignment.
    MutableVariables,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub language_level: LanguageLevel,
    /// Prefix of the names given to anonymous top level expressions.
    pub anonymous_name_prefix: String,
    /// Report `RedefinedFunction` when a function is defined twice instead of replacing it.
    pub function_redefinition_is_error: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            language_level: LanguageLevel::MutableVariables,
            anonymous_name_prefix: String::from("anon_expr_"),
            function_redefinition_is_error: false,
        }
    }
}

impl SessionOptions {
    pub fn with_level(language_level: LanguageLevel) -> Self {
        SessionOptions {
            language_level,
            ..Default::default()
        }
    }
}
