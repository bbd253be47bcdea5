//! Logical line counting

use oxc_ast::ast::Comment;
use oxc_span::Span;

/// Count the lines of a function body that still hold code once comments are removed
///
/// `comments` are the comment spans of the program `source_text` was parsed
/// into, in source order.
pub fn count_logical_lines(source_text: &str, body: Span, comments: &[Comment]) -> usize {
    strip_comments(source_text, body, comments)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .count()
}

/// Text of `range` with every comment inside it cut out
///
/// Line breaks inside block comments are kept so line structure survives.
pub fn strip_comments(source_text: &str, range: Span, comments: &[Comment]) -> String {
    let slice = |start: u32, end: u32| source_text.get(start as usize..end as usize).unwrap_or_default();

    let mut out = String::with_capacity(range.size() as usize);
    let mut cursor = range.start;
    for comment in comments
        .iter()
        .filter(|comment| comment.span.start >= range.start && comment.span.end <= range.end)
    {
        if comment.span.start < cursor {
            continue;
        }
        out.push_str(slice(cursor, comment.span.start));
        out.extend(slice(comment.span.start, comment.span.end).chars().filter(|c| *c == '\n'));
        cursor = comment.span.end;
    }
    out.push_str(slice(cursor, range.end));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_ast::ast::{Program, Statement};
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    /// Body span of the first function declaration in `program`
    fn first_body(program: &Program<'_>) -> Span {
        program
            .body
            .iter()
            .find_map(|stmt| match stmt {
                Statement::FunctionDeclaration(func) => func.body.as_ref().map(|body| body.span),
                _ => None,
            })
            .unwrap()
    }

    fn lines_of(source: &str) -> usize {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
        assert!(ret.errors.is_empty(), "{:?}", ret.errors);
        count_logical_lines(source, first_body(&ret.program), &ret.program.comments)
    }

    fn stripped(source: &str) -> String {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
        strip_comments(source, first_body(&ret.program), &ret.program.comments)
    }

    #[test]
    fn test_counts_braces_and_statements() {
        assert_eq!(lines_of("function f() {\n  const a = 1;\n\n  return a;\n}"), 4);
    }

    #[test]
    fn test_ignores_comments() {
        let source = "// outside\nfunction f() {\n  // leading\n  const a = 1; // trailing\n  /* block\n     spanning */\n  /** doc */ return a;\n}";
        assert_eq!(lines_of(source), 4);
    }

    #[test]
    fn test_keeps_comment_markers_inside_strings() {
        let source = "function f() {\n  const url = \"http://example.com\";\n  const t = `/* not a comment */`;\n}";
        let text = stripped(source);
        assert!(text.contains("http://example.com"));
        assert!(text.contains("/* not a comment */"));
        assert_eq!(lines_of(source), 4);
    }

    #[test]
    fn test_regex_literals_are_code() {
        let source = r#"function trim(path: string) {
  const noSlash = path.replace(/\/*$/, '');
  const noDouble = noSlash.replace(/\/\//g, '/');
  const parts = noDouble.split('/');
  return parts.join('/');
}"#;
        let text = stripped(source);
        assert!(text.contains(r"/\/*$/"));
        assert!(text.contains(r"/\/\//g"));
        assert_eq!(lines_of(source), 6);
    }

    #[test]
    fn test_block_comment_keeps_following_code() {
        let source = "function f() {\n  const a = 1; /* one\n  two */ const b = 2;\n  return a + b;\n}";
        let text = stripped(source);
        assert!(text.contains("const b = 2;"));
        assert_eq!(lines_of(source), 5);
    }
}
