//! Cursor context detection for hover

use crate::types::{HoverTarget, Range, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    /// Identifier or unquoted argument
    Word,
    Quoted,
    Bracket,
    Comment,
    Open,
    Close,
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: TokenKind,
    start: usize,
    end: usize,
    depth: usize,
}

/// Detect what the cursor is hovering over
pub fn detect_hover_target(source: &str, line: u32, column: u32) -> Option<HoverTarget> {
    let offset = line_col_to_offset(source, line, column)?;
    let tokens = tokenize(source);

    let index = tokens
        .iter()
        .position(|t| t.start <= offset && offset < t.end)?;
    let token = tokens[index];
    let text = &source[token.start..token.end];

    let (symbol, start, end) = match token.kind {
        TokenKind::Word if token.depth == 0 => {
            let calls = tokens
                .get(index + 1)
                .is_some_and(|next| next.kind == TokenKind::Open);
            if calls {
                (Symbol::Command(text.to_string()), token.start, token.end)
            } else {
                (Symbol::Other, token.start, token.end)
            }
        }
        TokenKind::Word => match find_reference(text, offset - token.start) {
            Some((s, e)) => (
                Symbol::Literal(text[s..e].to_string()),
                token.start + s,
                token.start + e,
            ),
            None => (Symbol::Literal(text.to_string()), token.start, token.end),
        },
        TokenKind::Quoted => match find_reference(text, offset - token.start) {
            Some((s, e)) => (
                Symbol::Literal(text[s..e].to_string()),
                token.start + s,
                token.start + e,
            ),
            None => (Symbol::Other, token.start, token.end),
        },
        TokenKind::Bracket | TokenKind::Comment | TokenKind::Open | TokenKind::Close => {
            (Symbol::Other, token.start, token.end)
        }
    };

    let (start_line, start_col) = offset_to_line_col(source, start);
    let (end_line, end_col) = offset_to_line_col(source, end);

    Some(HoverTarget {
        symbol,
        range: Range {
            start_line,
            start_col,
            end_line,
            end_col,
        },
    })
}

/// Every char of `source` with its byte offset and 1-based line/column,
/// followed by the position just past the end.
fn positions(source: &str) -> impl Iterator<Item = (usize, u32, u32)> + '_ {
    let mut line = 1u32;
    let mut col = 1u32;
    source
        .char_indices()
        .chain(std::iter::once((source.len(), '\0')))
        .map(move |(i, ch)| {
            let here = (i, line, col);
            if ch == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
            here
        })
}

/// Convert line/column (1-based) to byte offset
fn line_col_to_offset(source: &str, line: u32, column: u32) -> Option<usize> {
    positions(source)
        .take_while(|&(i, _, _)| i < source.len())
        .find(|&(_, l, c)| l == line && c == column)
        .map(|(i, _, _)| i)
}

/// Convert byte offset to line/column (1-based)
fn offset_to_line_col(source: &str, target_offset: usize) -> (u32, u32) {
    positions(source)
        .find(|&(i, _, _)| i >= target_offset || i == source.len())
        .map(|(_, l, c)| (l, c))
        .unwrap_or((1, 1))
}

/// Split CMake source into tokens, tracking parenthesis depth.
fn tokenize(source: &str) -> Vec<Token> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let kind = match bytes[i] {
            b if b.is_ascii_whitespace() => {
                i += 1;
                continue;
            }
            b'#' => {
                i = match bracket_open_len(&bytes[i + 1..]) {
                    Some(equals) => bracket_close(bytes, i + 1 + equals + 2, equals),
                    None => line_end(bytes, i),
                };
                TokenKind::Comment
            }
            b'(' => {
                i += 1;
                depth += 1;
                TokenKind::Open
            }
            b')' => {
                i += 1;
                depth = depth.saturating_sub(1);
                TokenKind::Close
            }
            b'"' => {
                i = quoted_end(bytes, i + 1);
                TokenKind::Quoted
            }
            b'[' if bracket_open_len(&bytes[i..]).is_some() => {
                let equals = bracket_open_len(&bytes[i..]).unwrap_or(0);
                i = bracket_close(bytes, i + equals + 2, equals);
                TokenKind::Bracket
            }
            _ => {
                i = word_end(bytes, i);
                TokenKind::Word
            }
        };

        let token_depth = match kind {
            TokenKind::Open => depth - 1,
            _ => depth,
        };
        tokens.push(Token {
            kind,
            start,
            end: i,
            depth: token_depth,
        });
    }

    tokens
}

/// Number of `=` in a bracket opener `[=*[` at the start of `bytes`.
fn bracket_open_len(bytes: &[u8]) -> Option<usize> {
    if bytes.first() != Some(&b'[') {
        return None;
    }
    let equals = bytes[1..].iter().take_while(|&&b| b == b'=').count();
    (bytes.get(1 + equals) == Some(&b'[')).then_some(equals)
}

/// Offset just past the `]=*]` closer matching `equals`, or end of input.
fn bracket_close(bytes: &[u8], from: usize, equals: usize) -> usize {
    let mut closer = Vec::with_capacity(equals + 2);
    closer.push(b']');
    closer.extend(std::iter::repeat(b'=').take(equals));
    closer.push(b']');

    let from = from.min(bytes.len());
    bytes[from..]
        .windows(closer.len())
        .position(|w| w == closer.as_slice())
        .map_or(bytes.len(), |p| from + p + closer.len())
}

fn line_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| from + p)
}

fn quoted_end(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn word_end(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'(' | b')' | b'"' | b'#' => break,
            b if b.is_ascii_whitespace() => break,
            _ => i += 1,
        }
    }
    i.min(bytes.len())
}

/// Span of the innermost `${...}` reference in `text` containing `offset`.
fn find_reference(text: &str, offset: usize) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut best = None;
    let mut search = 0;

    while let Some(p) = text[search..].find("${") {
        let start = search + p;
        let mut nesting = 0usize;
        let mut end = None;
        let mut j = start + 2;
        while j < bytes.len() {
            match bytes[j] {
                b'{' if bytes[j - 1] == b'$' => nesting += 1,
                b'}' if nesting == 0 => {
                    end = Some(j + 1);
                    break;
                }
                b'}' => nesting -= 1,
                _ => {}
            }
            j += 1;
        }

        if let Some(end) = end {
            if start <= offset && offset < end {
                best = Some((start, end));
            }
        }
        search = start + 2;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol_at(source: &str, line: u32, column: u32) -> Option<Symbol> {
        detect_hover_target(source, line, column).map(|t| t.symbol)
    }

    #[test]
    fn test_command_name() {
        let source = "add_library(foo STATIC foo.c)";
        assert_eq!(
            symbol_at(source, 1, 3),
            Some(Symbol::command("add_library"))
        );
    }

    #[test]
    fn test_command_with_space_before_paren() {
        let source = "if (WIN32)\nendif ()";
        assert_eq!(symbol_at(source, 1, 1), Some(Symbol::command("if")));
        assert_eq!(symbol_at(source, 2, 2), Some(Symbol::command("endif")));
    }

    #[test]
    fn test_command_range() {
        let source = "project(demo)\n  message(STATUS hi)";
        let target = detect_hover_target(source, 2, 4).unwrap();
        assert_eq!(target.symbol, Symbol::command("message"));
        assert_eq!(
            target.range,
            Range {
                start_line: 2,
                start_col: 3,
                end_line: 2,
                end_col: 10
            }
        );
    }

    #[test]
    fn test_unquoted_argument_literal() {
        let source = "include(FindZLIB)";
        assert_eq!(symbol_at(source, 1, 10), Some(Symbol::literal("FindZLIB")));
    }

    #[test]
    fn test_variable_reference_literal() {
        let source = "message(${CMAKE_CXX_FLAGS})";
        assert_eq!(
            symbol_at(source, 1, 12),
            Some(Symbol::literal("${CMAKE_CXX_FLAGS}"))
        );
    }

    #[test]
    fn test_embedded_reference() {
        let source = "set(out lib_${PROJECT_NAME}_x)";
        assert_eq!(
            symbol_at(source, 1, 16),
            Some(Symbol::literal("${PROJECT_NAME}"))
        );
        assert_eq!(
            symbol_at(source, 1, 10),
            Some(Symbol::literal("lib_${PROJECT_NAME}_x"))
        );
    }

    #[test]
    fn test_nested_reference_picks_innermost() {
        let source = "message(${${PREFIX}_DIR})";
        assert_eq!(symbol_at(source, 1, 14), Some(Symbol::literal("${PREFIX}")));
        assert_eq!(
            symbol_at(source, 1, 23),
            Some(Symbol::literal("${${PREFIX}_DIR}"))
        );
    }

    #[test]
    fn test_reference_in_quoted_argument() {
        let source = "message(\"Building ${PROJECT_NAME} now\")";
        assert_eq!(
            symbol_at(source, 1, 22),
            Some(Symbol::literal("${PROJECT_NAME}"))
        );
        assert_eq!(symbol_at(source, 1, 11), Some(Symbol::Other));
    }

    #[test]
    fn test_multiline_arguments() {
        let source = "target_link_libraries(app\n    PRIVATE\n    ZLIB::ZLIB)";
        assert_eq!(symbol_at(source, 2, 6), Some(Symbol::literal("PRIVATE")));
    }

    #[test]
    fn test_comment_is_other() {
        let source = "# add_library(foo)\nproject(x)";
        assert_eq!(symbol_at(source, 1, 4), Some(Symbol::Other));
        assert_eq!(symbol_at(source, 2, 2), Some(Symbol::command("project")));
    }

    #[test]
    fn test_bracket_comment_spans_lines() {
        let source = "#[[ add_library(\nfoo) ]]\nproject(x)";
        assert_eq!(symbol_at(source, 2, 1), Some(Symbol::Other));
        assert_eq!(symbol_at(source, 3, 1), Some(Symbol::command("project")));
    }

    #[test]
    fn test_bracket_argument_is_other() {
        let source = "message([=[ ${NOT_A_REF} ]=])";
        assert_eq!(symbol_at(source, 1, 15), Some(Symbol::Other));
    }

    #[test]
    fn test_parens_inside_arguments() {
        let source = "if((A AND B) OR C)";
        assert_eq!(symbol_at(source, 1, 5), Some(Symbol::literal("A")));
        assert_eq!(symbol_at(source, 1, 17), Some(Symbol::literal("C")));
    }

    #[test]
    fn test_whitespace_is_none() {
        let source = "project(x)\n\n   \nset(a b)";
        assert_eq!(symbol_at(source, 3, 2), None);
    }

    #[test]
    fn test_past_end_is_none() {
        assert_eq!(symbol_at("project(x)", 1, 50), None);
        assert_eq!(symbol_at("project(x)", 9, 1), None);
    }

    #[test]
    fn test_paren_is_other() {
        assert_eq!(symbol_at("project(x)", 1, 8), Some(Symbol::Other));
    }

    #[test]
    fn test_word_without_call_is_other() {
        assert_eq!(symbol_at("stray words", 1, 2), Some(Symbol::Other));
    }

    #[test]
    fn test_offsets_and_positions_agree() {
        let source = "project(x)\nadd_library(é b)\n";
        assert_eq!(line_col_to_offset(source, 2, 1), Some(11));
        assert_eq!(offset_to_line_col(source, 11), (2, 1));
        assert_eq!(line_col_to_offset(source, 2, 14), Some(25));
        assert_eq!(offset_to_line_col(source, 25), (2, 14));
        assert_eq!(offset_to_line_col(source, source.len()), (3, 1));
        assert_eq!(line_col_to_offset(source, 3, 1), None);
    }

    #[test]
    fn test_find_reference_unterminated() {
        assert_eq!(find_reference("${OPEN", 2), None);
    }
}
