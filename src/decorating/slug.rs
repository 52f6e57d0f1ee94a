//! ID-safe slugs for navigation anchors

use crate::view::NavItem;
use std::collections::HashSet;

/// Characters that get folded into a dash when slugifying.
const UNSAFE: &[char] = &[' ', '\t', '\n', '\\', '<', '>', '"', '\'', '=', ':', '/'];

/// The registry of slugs handed out during one render pass. Create one per
/// render; slug uniqueness is only meaningful within a single pass.
#[derive(Debug, Default)]
pub struct Slugger {
    taken: HashSet<String>,
}

impl Slugger {
    pub fn new() -> Slugger {
        Slugger {
            taken: HashSet::new(),
        }
    }

    /// Produce an ID-safe slug for the given text. When `unique` is set
    /// the result is guaranteed distinct from every slug previously
    /// registered here, bumping a numeric suffix until it is; otherwise
    /// the normalized text is returned without registering it.
    pub fn slugify(&mut self, text: &str, unique: bool) -> String {
        let mut candidate = normalize(text);

        if !unique {
            return candidate;
        }

        while self
            .taken
            .contains(&candidate)
        {
            candidate = bump(&candidate);
        }

        self.taken
            .insert(candidate.clone());
        candidate
    }
}

fn normalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_dash = false;

    for c in text.chars() {
        let c = if UNSAFE.contains(&c) { '-' } else { c };
        if c == '-' {
            if previous_dash {
                continue;
            }
            previous_dash = true;
        } else {
            previous_dash = false;
        }
        for lower in c.to_lowercase() {
            result.push(lower);
        }
    }

    if result.starts_with('-') {
        result.remove(0);
    }
    result
}

// Increment a trailing run of digits, or append "-1" when there is none.
fn bump(candidate: &str) -> String {
    let start = candidate
        .rfind(|c: char| !c.is_ascii_digit())
        .map(|i| i + c_len(candidate, i))
        .unwrap_or(0);

    if start == candidate.len() {
        return format!("{}-1", candidate);
    }

    let digits = &candidate[start..];
    match digits.parse::<u64>() {
        Ok(number) => format!("{}{}", &candidate[..start], number + 1),
        Err(_) => format!("{}-1", candidate),
    }
}

fn c_len(text: &str, index: usize) -> usize {
    text[index..]
        .chars()
        .next()
        .map(|c| c.len_utf8())
        .unwrap_or(0)
}

/// Ordered headings collected while rendering one description block.
/// Reset (taken) every time a heading-bearing block is attached to the
/// view model, so each block gets the nav items rendered under it.
#[derive(Debug, Default)]
pub struct NavAccumulator {
    items: Vec<NavItem>,
}

impl NavAccumulator {
    pub fn new() -> NavAccumulator {
        NavAccumulator { items: Vec::new() }
    }

    pub fn push(&mut self, text: String, href: String) {
        self.items
            .push(NavItem { text, href });
    }

    /// Snapshot the accumulated items and reset for the next block.
    pub fn take(&mut self) -> Vec<NavItem> {
        std::mem::take(&mut self.items)
    }
}
