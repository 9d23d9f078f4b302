use super::{
    ast::{ErrorNode, NodeRef, RootNode},
    declarations::{FunctionDefinition, LocalVariableDeclaration, ParameterDeclaration, Prototype},
    expressions::{
        BinaryOperatorExpression, ConditionalExpression, ConstantExpression, ForInExpression,
        FunctionCallExpression, VarInExpression, VariableReferenceExpression,
    },
};

/// Typed visit methods over the AST.
///
/// Every method defaults to visiting the node's children and folding their
/// results with [`AstVisitor::aggregate_result`], so implementors override
/// only the variants they care about.
pub trait AstVisitor<'a, R: Default> {
    fn visit_root(&mut self, node: &'a RootNode) -> R {
        self.visit_children(NodeRef::Root(node))
    }
    fn visit_error(&mut self, node: &'a ErrorNode) -> R {
        self.visit_children(NodeRef::Error(node))
    }
    fn visit_prototype(&mut self, node: &'a Prototype) -> R {
        self.visit_children(NodeRef::Prototype(node))
    }
    fn visit_function_definition(&mut self, node: &'a FunctionDefinition) -> R {
        self.visit_children(NodeRef::FunctionDefinition(node))
    }
    fn visit_constant(&mut self, node: &'a ConstantExpression) -> R {
        self.visit_children(NodeRef::Constant(node))
    }
    fn visit_variable_reference(&mut self, node: &'a VariableReferenceExpression) -> R {
        self.visit_children(NodeRef::VariableReference(node))
    }
    fn visit_function_call(&mut self, node: &'a FunctionCallExpression) -> R {
        self.visit_children(NodeRef::FunctionCall(node))
    }
    fn visit_binary_operator(&mut self, node: &'a BinaryOperatorExpression) -> R {
        self.visit_children(NodeRef::BinaryOperator(node))
    }
    fn visit_conditional(&mut self, node: &'a ConditionalExpression) -> R {
        self.visit_children(NodeRef::Conditional(node))
    }
    fn visit_for_in(&mut self, node: &'a ForInExpression) -> R {
        self.visit_children(NodeRef::ForIn(node))
    }
    fn visit_var_in(&mut self, node: &'a VarInExpression) -> R {
        self.visit_children(NodeRef::VarIn(node))
    }
    fn visit_parameter_declaration(&mut self, node: &'a ParameterDeclaration) -> R {
        self.visit_children(NodeRef::ParameterDeclaration(node))
    }
    fn visit_local_variable_declaration(&mut self, node: &'a LocalVariableDeclaration) -> R {
        self.visit_children(NodeRef::LocalVariableDeclaration(node))
    }

    fn visit_children(&mut self, node: NodeRef<'a>) -> R {
        let mut aggregate = R::default();
        for child in node.children() {
            let next = child.accept(self);
            aggregate = self.aggregate_result(aggregate, next);
        }
        aggregate
    }

    fn aggregate_result(&mut self, _aggregate: R, next: R) -> R {
        next
    }
}

/// [`AstVisitor`] that threads an extra read only argument through the walk.
pub trait AstVisitorWithArg<'a, R: Default, A> {
    fn visit_root(&mut self, node: &'a RootNode, arg: &A) -> R {
        self.visit_children(NodeRef::Root(node), arg)
    }
    fn visit_error(&mut self, node: &'a ErrorNode, arg: &A) -> R {
        self.visit_children(NodeRef::Error(node), arg)
    }
    fn visit_prototype(&mut self, node: &'a Prototype, arg: &A) -> R {
        self.visit_children(NodeRef::Prototype(node), arg)
    }
    fn visit_function_definition(&mut self, node: &'a FunctionDefinition, arg: &A) -> R {
        self.visit_children(NodeRef::FunctionDefinition(node), arg)
    }
    fn visit_constant(&mut self, node: &'a ConstantExpression, arg: &A) -> R {
        self.visit_children(NodeRef::Constant(node), arg)
    }
    fn visit_variable_reference(&mut self, node: &'a VariableReferenceExpression, arg: &A) -> R {
        self.visit_children(NodeRef::VariableReference(node), arg)
    }
    fn visit_function_call(&mut self, node: &'a FunctionCallExpression, arg: &A) -> R {
        self.visit_children(NodeRef::FunctionCall(node), arg)
    }
    fn visit_binary_operator(&mut self, node: &'a BinaryOperatorExpression, arg: &A) -> R {
        self.visit_children(NodeRef::BinaryOperator(node), arg)
    }
    fn visit_conditional(&mut self, node: &'a ConditionalExpression, arg: &A) -> R {
        self.visit_children(NodeRef::Conditional(node), arg)
    }
    fn visit_for_in(&mut self, node: &'a ForInExpression, arg: &A) -> R {
        self.visit_children(NodeRef::ForIn(node), arg)
    }
    fn visit_var_in(&mut self, node: &'a VarInExpression, arg: &A) -> R {
        self.visit_children(NodeRef::VarIn(node), arg)
    }
    fn visit_parameter_declaration(&mut self, node: &'a ParameterDeclaration, arg: &A) -> R {
        self.visit_children(NodeRef::ParameterDeclaration(node), arg)
    }
    fn visit_local_variable_declaration(&mut self, node: &'a LocalVariableDeclaration, arg: &A) -> R {
        self.visit_children(NodeRef::LocalVariableDeclaration(node), arg)
    }

    fn visit_children(&mut self, node: NodeRef<'a>, arg: &A) -> R {
        let mut aggregate = R::default();
        for child in node.children() {
            let next = child.accept_with(self, arg);
            aggregate = self.aggregate_result(aggregate, next);
        }
        aggregate
    }

    fn aggregate_result(&mut self, _aggregate: R, next: R) -> R {
        next
    }
}
