//! SQL snippet templates.
//!
//! Bodies use `${n:label}` placeholders. Insertion is purely textual: every
//! marker is replaced by its label and no tab stops survive.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// A named snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub body: &'static str,
}

/// Built-in snippets
pub const TEMPLATES: &[Template] = &[
    Template {
        name: "select",
        body: "SELECT ${1:*}\nFROM ${2:table_name}\nWHERE ${3:condition};",
    },
    Template {
        name: "insert",
        body: "INSERT INTO ${1:table_name} (${2:columns})\nVALUES (${3:values});",
    },
    Template {
        name: "update",
        body: "UPDATE ${1:table_name}\nSET ${2:column} = ${3:value}\nWHERE ${4:condition};",
    },
    Template {
        name: "delete",
        body: "DELETE FROM ${1:table_name}\nWHERE ${2:condition};",
    },
    Template {
        name: "join",
        body: "SELECT ${1:*}\nFROM ${2:table1} a\nJOIN ${3:table2} b ON a.${4:id} = b.${5:id};",
    },
    Template {
        name: "count",
        body: "SELECT COUNT(*)\nFROM ${1:table_name};",
    },
];

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{\d+(?::([^}]*))?\}").expect("placeholder pattern is valid")
    })
}

/// Looks up a built-in template by name (ASCII case-insensitive)
pub fn lookup(name: &str) -> Option<&'static Template> {
    TEMPLATES
        .iter()
        .find(|template| template.name.eq_ignore_ascii_case(name))
}

/// Replaces every `${n:label}` with `label` and every `${n}` with nothing
pub fn expand_placeholders(body: &str) -> Cow<'_, str> {
    placeholder_pattern().replace_all(body, "$1")
}

/// Text inserted for `name`: the expanded template body, or `name` itself
/// (expanded the same way) when no template has that name
pub fn resolve(name: &str) -> String {
    let body = lookup(name).map_or(name, |template| template.body);
    expand_placeholders(body).into_owned()
}
