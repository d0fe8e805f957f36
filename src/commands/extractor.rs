//! Argument extraction.
//!
//! Arguments are written as free text in which values can be tagged with
//! their parameter name, e.g. `ban bob days: 7 reason: spamming links`.
//! [`extract`] slices the tagged spans out of the text and hands whatever is
//! left to the single parameter that can take it.
//!
//! # Algorithm
//!
//! 1. Every declared parameter gives a keyword: its name followed by `:`.
//! 2. For each keyword found in the text, in declaration order, the value is
//!    the run of words up to the next word ending with `:`. The keyword and
//!    its value are removed from the pool of words.
//! 3. Words left in the pool are unkeyed text. They go to the only required
//!    parameter still missing, or else to the only optional parameter, even
//!    when it already holds a keyword value. Otherwise they are reported as
//!    leftover.

use std::collections::HashMap;

use log::debug;

use crate::commands::{Parameters, SEPARATOR};

/// Result of extracting arguments from a text.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Values by declared parameter name
    pub arguments: HashMap<String, String>,
    /// First value extracted, or the whole text when nothing is declared
    pub parameter: Option<String>,
    /// Required parameters that received no value, in declaration order
    pub missing: Vec<String>,
    /// Unkeyed text that no parameter could take
    pub leftover: Option<String>,
    /// Name of the parameter that received the first value
    primary: Option<String>,
}

/// Extracts the arguments of `parameters` from the text following a command.
///
/// A keyword followed by no value yields an empty value rather than an error.
/// A parameter name appearing inside a value is never mistaken for a keyword,
/// only the exact `name:` word is.
pub fn extract(text: &str, parameters: &Parameters) -> Extraction {
    let keywords: Vec<(&str, String)> = parameters
        .all()
        .map(|name| (name, format!("{}{}", name.to_lowercase(), SEPARATOR)))
        .collect();

    // Only keywords are lower-cased, values keep the case they were written in
    let mut words: Vec<String> = text
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lowercase = word.to_lowercase();
            match keywords.iter().any(|(_, keyword)| *keyword == lowercase) {
                true => lowercase,
                false => word.to_owned(),
            }
        })
        .collect();

    let mut extraction = Extraction::default();

    for (name, keyword) in &keywords {
        let Some(start) = words.iter().position(|word| word == keyword) else {
            continue;
        };

        let end = words[start + 1..]
            .iter()
            .position(|word| word.ends_with(SEPARATOR))
            .map_or(words.len(), |offset| start + 1 + offset);

        let value = words
            .drain(start..end)
            .skip(1)
            .collect::<Vec<String>>()
            .join(" ");

        debug!("extracted {} = {:?}", name, value);
        extraction.insert(name, value);
    }

    extraction.missing = parameters
        .required
        .iter()
        .filter(|name| !extraction.arguments.contains_key(name.as_str()))
        .cloned()
        .collect();

    if !words.is_empty() {
        let leftover = words.join(" ");

        if extraction.missing.len() == 1 {
            let name = extraction.missing.remove(0);
            debug!("assigned unkeyed text to required parameter {}", name);
            extraction.insert(&name, leftover);
        } else if parameters.optional.len() == 1 {
            let name = &parameters.optional[0];
            debug!("assigned unkeyed text to optional parameter {}", name);
            extraction.insert(name, leftover);
        } else {
            debug!("unkeyed text {:?} left over", leftover);
            extraction.leftover = Some(leftover);
        }
    }

    if parameters.is_empty() {
        extraction.parameter = Some(text.to_owned());
    }

    extraction
}

impl Extraction {
    /// Stores a value, remembering the first parameter filled as the primary.
    ///
    /// Overwriting the primary parameter updates the primary value as well.
    fn insert(&mut self, name: &str, value: String) {
        match &self.primary {
            None => {
                self.primary = Some(name.to_owned());
                self.parameter = Some(value.clone());
            }
            Some(primary) if primary == name => self.parameter = Some(value.clone()),
            Some(_) => {}
        }
        self.arguments.insert(name.to_owned(), value);
    }
}
