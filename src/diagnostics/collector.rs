use crate::ast::{
    ast::{AstNode, ErrorNode},
    visitor::AstVisitor,
};

/// Walks the whole tree, recording errors without stopping at the first.
#[derive(Default)]
struct ErrorCollector<'a> {
    errors: Vec<&'a ErrorNode>,
}

impl<'a> AstVisitor<'a, ()> for ErrorCollector<'a> {
    fn visit_error(&mut self, node: &'a ErrorNode) {
        self.errors.push(node);
    }
}

/// Every [`ErrorNode`] in `node`, in pre-order.
pub fn collect_errors(node: &AstNode) -> Vec<&ErrorNode> {
    let mut collector = ErrorCollector::default();
    node.accept(&mut collector);
    collector.errors
}
