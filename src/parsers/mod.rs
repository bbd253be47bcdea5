//! Source parsing

pub mod ast_parser;
pub mod complexity;
pub mod declarations;
pub mod lines;

pub use ast_parser::ASTParser;
pub use complexity::DecisionCounter;
pub use lines::count_logical_lines;
