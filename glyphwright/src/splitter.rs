//! Segmenting catalog text into `name = formula` statements.

use std::{borrow::Cow, collections::HashMap, sync::OnceLock};

use log::trace;
use regex::Regex;

use crate::Error;

/// Splits catalog text into statements, and statements into name and formula.
pub trait ConstructionSplitter {
    /// Segment the whole catalog into individual statements.
    fn split_statements(&self, text: &str) -> Result<Vec<String>, Error>;

    /// Split a statement into its raw name and raw formula, `None` if the
    /// statement names nothing.
    fn split_name<'a>(&self, statement: &'a str) -> Option<(&'a str, &'a str)>;
}

/// One statement per line.
///
/// Blank lines and `#` comment lines are dropped. `$name = value` lines
/// declare a variable, and later `{name}` references are replaced with the
/// value as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineSplitter;

fn declaration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\$([A-Za-z_][A-Za-z0-9_]*)\s*=(.*)$").unwrap())
}

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap())
}

fn substitute<'a>(line: &'a str, variables: &HashMap<String, String>) -> Cow<'a, str> {
    if variables.is_empty() {
        return Cow::Borrowed(line);
    }
    reference_re().replace_all(line, |caps: &regex::Captures| match variables.get(&caps[1]) {
        Some(value) => value.clone(),
        None => caps[0].to_string(),
    })
}

impl ConstructionSplitter for LineSplitter {
    fn split_statements(&self, text: &str) -> Result<Vec<String>, Error> {
        let mut variables = HashMap::new();
        let mut statements = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('$') {
                let Some(caps) = declaration_re().captures(line) else {
                    return Err(Error::MalformedCatalog {
                        line: idx + 1,
                        reason: format!("bad variable declaration '{line}'"),
                    });
                };
                let value = substitute(caps[2].trim(), &variables).into_owned();
                trace!("${} = {value}", &caps[1]);
                variables.insert(caps[1].to_string(), value);
                continue;
            }
            statements.push(substitute(line, &variables).into_owned());
        }
        Ok(statements)
    }

    fn split_name<'a>(&self, statement: &'a str) -> Option<(&'a str, &'a str)> {
        statement.split_once('=')
    }
}
