// ─── String Templates ───
// `$name` / `${name}` placeholders referencing project properties.
// Unknown placeholders are kept verbatim so they can be resolved later
// (e.g. `$version` at publish time).

use std::collections::BTreeMap;

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Placeholder { name: &'a str, raw: &'a str },
}

/// Named values available to templates.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Properties {
    values: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a property.
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Substitute every known placeholder in `input`.
    pub fn render(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        for segment in segments(input) {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder { name, raw } => match self.get(name) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(raw),
                },
            }
        }
        out
    }
}

/// Names of all placeholders referenced by `input`, in order of appearance.
pub fn placeholders(input: &str) -> Vec<&str> {
    segments(input)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Placeholder { name, .. } => Some(name),
            Segment::Text(_) => None,
        })
        .collect()
}

fn segments(input: &str) -> Vec<Segment<'_>> {
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }

        let (name_start, name_end, end) = if bytes.get(i + 1) == Some(&b'{') {
            match input[i + 2..].find('}') {
                Some(offset) => (i + 2, i + 2 + offset, i + 3 + offset),
                None => {
                    i += 1;
                    continue;
                }
            }
        } else {
            let mut j = i + 1;
            while j < bytes.len() && (bytes[j].is_ascii_alphanumeric() || bytes[j] == b'_') {
                j += 1;
            }
            (i + 1, j, j)
        };

        // A lone `$` or `${}` is literal text.
        if name_end == name_start {
            i += 1;
            continue;
        }

        if start < i {
            out.push(Segment::Text(&input[start..i]));
        }
        out.push(Segment::Placeholder {
            name: &input[name_start..name_end],
            raw: &input[i..end],
        });
        start = end;
        i = end;
    }

    if start < bytes.len() {
        out.push(Segment::Text(&input[start..]));
    }
    out
}
