//! Input line parsing.
//!
//! # Responsibility
//! - Split a line into tokens with shell-like quoting.
//! - Separate `--key value` options from positional arguments.
//!
//! # Invariants
//! - Unbalanced quotes and a dangling backslash are `Argument` errors.
//! - An option followed by another option (or nothing) has an empty value.

use deskmate_core::{CoreError, CoreResult};
use std::collections::HashMap;

const QUOTE_ERROR: &str = "Invalid input format. Check your quotes.";

/// Splits `line` into tokens.
///
/// Single quotes keep everything literally. Inside double quotes a
/// backslash escapes `"` and `\`. Outside quotes a backslash escapes any
/// character.
pub fn tokenize(line: &str) -> CoreResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            '\'' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => return Err(quote_error()),
                    }
                }
            }
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped @ ('"' | '\\')) => current.push(escaped),
                            Some(other) => {
                                current.push('\\');
                                current.push(other);
                            }
                            None => return Err(quote_error()),
                        },
                        Some(c) => current.push(c),
                        None => return Err(quote_error()),
                    }
                }
            }
            '\\' => {
                in_token = true;
                current.push(chars.next().ok_or_else(quote_error)?);
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn quote_error() -> CoreError {
    CoreError::Argument(QUOTE_ERROR.to_string())
}

/// Splits a line into a lowercase command name and its arguments.
/// A blank line yields an empty command name.
pub fn parse_input(line: &str) -> CoreResult<(String, Vec<String>)> {
    let mut tokens = tokenize(line)?.into_iter();
    let command = tokens
        .next()
        .map(|name| name.trim().to_lowercase())
        .unwrap_or_default();
    Ok((command, tokens.collect()))
}

/// Positional arguments plus `--key value` options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    positional: Vec<String>,
    named: HashMap<String, String>,
}

impl Arguments {
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }

    /// Rejects options outside `allowed`.
    pub fn expect_only(&self, allowed: &[&str]) -> CoreResult<()> {
        let mut unknown = self
            .named
            .keys()
            .filter(|key| !allowed.contains(&key.as_str()))
            .collect::<Vec<_>>();
        unknown.sort();
        match unknown.first() {
            Some(key) => Err(CoreError::Argument(format!("Unknown option --{key}."))),
            None => Ok(()),
        }
    }
}

/// Separates options from positional arguments. Later duplicates win.
pub fn parse_named_args(args: &[String]) -> Arguments {
    let mut parsed = Arguments::default();
    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.strip_prefix("--") {
            Some(key) => {
                let takes_value = iter.peek().is_some_and(|next| !next.starts_with("--"));
                let value = if takes_value {
                    iter.next().cloned().unwrap_or_default()
                } else {
                    String::new()
                };
                parsed.named.insert(key.to_lowercase(), value);
            }
            None => parsed.positional.push(arg.clone()),
        }
    }
    parsed
}

/// Splits a tag list on commas and whitespace.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
