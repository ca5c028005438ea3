// placeholder expansion for resource templates

use super::properties::BuildProperties;
use crate::error::{Error, Result};
use std::path::Path;

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn lookup<'a>(
    properties: &'a BuildProperties,
    path: &Path,
    name: &str,
    line: usize,
) -> Result<&'a str> {
    properties.get(name).ok_or_else(|| Error::Template {
        path: path.to_path_buf(),
        line,
        reason: format!("unknown property '{}'", name),
    })
}

/// expand `${name}` and `$name` tokens in a single left-to-right pass
///
/// `\$` yields a literal `$`; a `$` not followed by a name is copied as is.
/// substituted values are never scanned again. `path` is only used for errors.
pub fn expand_template(path: &Path, text: &str, properties: &BuildProperties) -> Result<String> {
    let mut output = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    let mut line = 1;

    while let Some((pos, c)) = chars.next() {
        match c {
            '\n' => {
                line += 1;
                output.push(c);
            }
            '\\' if matches!(chars.peek(), Some((_, '$'))) => {
                chars.next();
                output.push('$');
            }
            '$' => match chars.peek() {
                Some((_, '{')) => {
                    // a placeholder never spans lines
                    let start = pos + 2;
                    let end = text[start..]
                        .find(['}', '\n'])
                        .map(|i| start + i)
                        .filter(|end| text[*end..].starts_with('}'))
                        .ok_or_else(|| Error::Template {
                            path: path.to_path_buf(),
                            line,
                            reason: "unterminated '${' placeholder".to_string(),
                        })?;
                    let name = text[start..end].trim();
                    output.push_str(lookup(properties, path, name, line)?);
                    while chars.peek().is_some_and(|(i, _)| *i <= end) {
                        chars.next();
                    }
                }
                Some((_, next)) if is_identifier_start(*next) => {
                    let start = pos + 1;
                    let mut end = start;
                    while let Some((i, ch)) = chars.peek() {
                        if !is_identifier_char(*ch) {
                            break;
                        }
                        end = i + ch.len_utf8();
                        chars.next();
                    }
                    output.push_str(lookup(properties, path, &text[start..end], line)?);
                }
                _ => output.push('$'),
            },
            _ => output.push(c),
        }
    }

    Ok(output)
}
