//! Top-level declaration extraction

use oxc_ast::ast::*;

use super::complexity::DecisionCounter;
use super::lines::count_logical_lines;
use crate::models::source::CallableUnit;

/// Facts gathered from the statements of one program
#[derive(Debug, Default)]
pub struct Declarations {
    pub callables: Vec<CallableUnit>,
    pub import_specifiers: Vec<String>,
}

/// Walks the top level of a program collecting callables and imports
pub struct DeclarationCollector<'s> {
    source_text: &'s str,
    comments: &'s [Comment],
    found: Declarations,
}

impl<'s> DeclarationCollector<'s> {
    /// Collect from `program`; `source_text` must be the text it was parsed from
    pub fn collect(program: &'s Program<'_>, source_text: &'s str) -> Declarations {
        let mut collector = Self {
            source_text,
            comments: &program.comments,
            found: Declarations::default(),
        };
        for stmt in &program.body {
            collector.visit_statement(stmt);
        }
        collector.found
    }

    fn visit_statement(&mut self, stmt: &Statement<'_>) {
        match stmt {
            Statement::ImportDeclaration(decl) => {
                self.found
                    .import_specifiers
                    .push(decl.source.value.as_str().to_string());
            }
            Statement::FunctionDeclaration(func) => self.visit_function(func),
            Statement::ExportNamedDeclaration(decl) => {
                if let Some(Declaration::FunctionDeclaration(func)) = &decl.declaration {
                    self.visit_function(func);
                }
            }
            Statement::ExportDefaultDeclaration(decl) => {
                if let ExportDefaultDeclarationKind::FunctionDeclaration(func) = &decl.declaration {
                    self.visit_function(func);
                }
            }
            _ => {}
        }
    }

    fn visit_function(&mut self, func: &Function<'_>) {
        // Overload signatures and ambient declarations have no body
        let (Some(id), Some(body)) = (&func.id, &func.body) else {
            return;
        };

        self.found.callables.push(CallableUnit {
            name: id.name.as_str().to_string(),
            cyclomatic_complexity: DecisionCounter::complexity_of(func),
            logical_lines: count_logical_lines(self.source_text, body.span, self.comments),
        });
    }
}
