use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::declarations::{FunctionDefinition, Prototype},
    operators::operators::OperatorTable,
};

use super::options::SessionOptions;

/// Semantic state that outlives a single parse.
#[derive(Debug, Clone, Default)]
pub struct RuntimeState {
    pub operators: OperatorTable,
    pub function_declarations: HashMap<String, Rc<Prototype>>,
    pub function_definitions: HashMap<String, Rc<FunctionDefinition>>,
    pub options: SessionOptions,
    anonymous_name_index: u32,
}

impl RuntimeState {
    pub fn new(options: SessionOptions) -> Self {
        RuntimeState {
            options,
            ..Default::default()
        }
    }

    /// Next name for a top level expression, e.g. `anon_expr_0`.
    ///
    /// The counter is never reset within a session and wraps on overflow.
    pub fn generate_anonymous_name(&mut self) -> String {
        let index = self.anonymous_name_index;
        self.anonymous_name_index = self.anonymous_name_index.wrapping_add(1);
        format!("{}{}", self.options.anonymous_name_prefix, index)
    }

    /// Resolves a call target, preferring definitions over declarations.
    pub fn find_call_target(&self, name: &str) -> Option<Rc<Prototype>> {
        self.function_definitions
            .get(name)
            .map(|definition| Rc::clone(&definition.signature))
            .or_else(|| self.function_declarations.get(name).cloned())
    }

    #[cfg(test)]
    pub(crate) fn set_anonymous_name_index(&mut self, index: u32) {
        self.anonymous_name_index = index;
    }
}
