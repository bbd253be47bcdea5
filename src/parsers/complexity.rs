//! Decision-point counting for cyclomatic complexity

use oxc_ast::ast::*;
use oxc_ast_visit::{walk, Visit};
use oxc_syntax::operator::LogicalOperator;

/// Counts branching nodes in a function's parameters and body
///
/// Conditionals, every loop form, catch clauses, ternaries and the
/// short-circuit operators `&&` and `||` each add one path. Nested
/// functions are part of the enclosing body.
#[derive(Debug, Default)]
pub struct DecisionCounter {
    decisions: u32,
}

impl DecisionCounter {
    /// Cyclomatic complexity of `func`: decision points plus one
    ///
    /// Parameter defaults count like statements of the body.
    pub fn complexity_of(func: &Function<'_>) -> u32 {
        let mut counter = Self::default();
        counter.visit_formal_parameters(&func.params);
        if let Some(body) = &func.body {
            counter.visit_function_body(body);
        }
        counter.decisions + 1
    }
}

impl<'a> Visit<'a> for DecisionCounter {
    fn visit_if_statement(&mut self, it: &IfStatement<'a>) {
        self.decisions += 1;
        walk::walk_if_statement(self, it);
    }

    fn visit_for_statement(&mut self, it: &ForStatement<'a>) {
        self.decisions += 1;
        walk::walk_for_statement(self, it);
    }

    fn visit_for_in_statement(&mut self, it: &ForInStatement<'a>) {
        self.decisions += 1;
        walk::walk_for_in_statement(self, it);
    }

    fn visit_for_of_statement(&mut self, it: &ForOfStatement<'a>) {
        self.decisions += 1;
        walk::walk_for_of_statement(self, it);
    }

    fn visit_while_statement(&mut self, it: &WhileStatement<'a>) {
        self.decisions += 1;
        walk::walk_while_statement(self, it);
    }

    fn visit_do_while_statement(&mut self, it: &DoWhileStatement<'a>) {
        self.decisions += 1;
        walk::walk_do_while_statement(self, it);
    }

    fn visit_catch_clause(&mut self, it: &CatchClause<'a>) {
        self.decisions += 1;
        walk::walk_catch_clause(self, it);
    }

    fn visit_conditional_expression(&mut self, it: &ConditionalExpression<'a>) {
        self.decisions += 1;
        walk::walk_conditional_expression(self, it);
    }

    fn visit_logical_expression(&mut self, it: &LogicalExpression<'a>) {
        if matches!(it.operator, LogicalOperator::And | LogicalOperator::Or) {
            self.decisions += 1;
        }
        walk::walk_logical_expression(self, it);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn complexity(source: &str) -> u32 {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
        let func = ret
            .program
            .body
            .iter()
            .find_map(|stmt| match stmt {
                Statement::FunctionDeclaration(func) => Some(func),
                _ => None,
            })
            .unwrap();
        DecisionCounter::complexity_of(func)
    }

    #[test]
    fn test_parameter_defaults_count() {
        assert_eq!(complexity("function f(a = x ? 1 : 2, b = y || z) { return a; }"), 3);
    }

    #[test]
    fn test_nested_callbacks_count() {
        let source = "function f(items: number[]) {\n  return items.map((i = 0) => (i > 1 ? i : 0));\n}";
        assert_eq!(complexity(source), 2);
    }

    #[test]
    fn test_nullish_coalescing_is_not_a_branch() {
        assert_eq!(complexity("function f(a?: number) { return a ?? 0; }"), 1);
    }
}
