//! Content-line lexing: unfolding and name/parameter/value splitting.

use crate::core::{ContentLine, Parameter};

use super::{ParseError, ParseErrorKind, ParseResult};

/// Splits raw input into logical (unfolded) content lines.
///
/// Folded continuations (a physical line starting with space or tab,
/// RFC 5545 §3.1) are merged into the preceding line with the fold marker
/// removed. Line endings may be CRLF or bare LF. A line that contains no `:`
/// and does not start with whitespace is also merged into the preceding
/// line, which recovers content folded without the leading space by sloppy
/// exporters. Each logical line is returned with the 1-based number of its
/// first physical line.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.is_empty() {
            continue;
        }
        let folded = line.starts_with(' ') || line.starts_with('\t');
        if folded && let Some((_, prev)) = lines.last_mut() {
            prev.push_str(&line[1..]);
        } else if !folded && !line.contains(':') && let Some((_, prev)) = lines.last_mut() {
            prev.push_str(line);
        } else {
            lines.push((idx + 1, line.to_string()));
        }
    }
    lines
}

/// Splits one unfolded content line into name, parameters, and raw value.
///
/// ## Errors
///
/// Returns an error when the property name is missing or malformed, a
/// parameter is malformed, a quoted value is unterminated, or no `:`
/// separates the name/parameters from the value.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let bytes = line.as_bytes();
    let mut name_end = None;
    for (idx, byte) in bytes.iter().enumerate() {
        match byte {
            b';' | b':' => {
                name_end = Some(idx);
                break;
            }
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' => {}
            _ => {
                return Err(
                    ParseError::new(ParseErrorKind::InvalidPropertyName, line_num, idx + 1)
                        .with_context(line),
                );
            }
        }
    }
    let Some(name_end) = name_end else {
        return Err(
            ParseError::new(ParseErrorKind::MissingColon, line_num, line.len() + 1)
                .with_context(line),
        );
    };
    if name_end == 0 {
        return Err(
            ParseError::new(ParseErrorKind::MissingPropertyName, line_num, 1).with_context(line),
        );
    }
    let name = line[..name_end].to_ascii_uppercase();

    let mut params = Vec::new();
    let mut pos = name_end;
    while bytes.get(pos) == Some(&b';') {
        let (param, next) = parse_parameter(line, pos + 1, line_num)?;
        params.push(param);
        pos = next;
    }
    if bytes.get(pos) != Some(&b':') {
        return Err(ParseError::new(ParseErrorKind::MissingColon, line_num, pos + 1).with_context(line));
    }
    let raw_value = line[pos + 1..].to_string();

    Ok(ContentLine {
        name,
        params,
        raw_value,
    })
}

/// Parses one `NAME=value[,value…]` parameter starting at `start`.
///
/// Returns the parameter and the index of the byte that ended it, which the
/// caller dispatches on (`;` starts another parameter, `:` starts the value).
fn parse_parameter(line: &str, start: usize, line_num: usize) -> ParseResult<(Parameter, usize)> {
    let rest = &line[start..];
    let Some(eq) = rest.find('=') else {
        return Err(
            ParseError::new(ParseErrorKind::InvalidParameter, line_num, start + 1)
                .with_context(line),
        );
    };
    let name = &rest[..eq];
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        return Err(
            ParseError::new(ParseErrorKind::InvalidParameter, line_num, start + 1)
                .with_context(line),
        );
    }

    let mut values = Vec::new();
    let mut pos = start + eq + 1;
    loop {
        let (value, next) = parse_param_value(line, pos, line_num)?;
        values.push(value);
        pos = next;
        if line.as_bytes().get(pos) == Some(&b',') {
            pos += 1;
        } else {
            break;
        }
    }
    Ok((Parameter::with_values(name, values), pos))
}

/// Parses a single parameter value starting at `start`.
///
/// Quoted values may contain `:`, `;` and `,`, and RFC 6868 caret escapes
/// (`^n`, `^'`, `^^`) are decoded inside them. Returns the value and the
/// index just past it.
fn parse_param_value(line: &str, start: usize, line_num: usize) -> ParseResult<(String, usize)> {
    if line.as_bytes().get(start) == Some(&b'"') {
        let mut value = String::new();
        let mut chars = line[start + 1..].char_indices().peekable();
        while let Some((idx, ch)) = chars.next() {
            match ch {
                '"' => return Ok((value, start + 1 + idx + 1)),
                '^' => match chars.peek().copied() {
                    Some((_, '^')) => {
                        chars.next();
                        value.push('^');
                    }
                    Some((_, 'n')) => {
                        chars.next();
                        value.push('\n');
                    }
                    Some((_, '\'')) => {
                        chars.next();
                        value.push('"');
                    }
                    _ => value.push('^'),
                },
                _ => value.push(ch),
            }
        }
        Err(ParseError::new(ParseErrorKind::UnclosedQuote, line_num, start + 1).with_context(line))
    } else {
        let rest = &line[start..];
        let end = rest.find([',', ';', ':']).unwrap_or(rest.len());
        Ok((rest[..end].to_string(), start + end))
    }
}
