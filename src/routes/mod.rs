//! Route Table
//!
//! The application's static permission table, split the same way the views are:
//! open to everyone, behind a login, and administration. Each module contributes
//! a `RouteTable` fragment; `RouteTable::standard()` merges them.

/// Landing, login/signup forms, listing search and the mortgage calculator.
pub mod public;

/// Buyer and seller views plus the shared profile page.
pub mod authenticated;

/// Administrator-only views.
pub mod admin;

use std::collections::BTreeMap;

use crate::gate::CapabilityRequirement;

/// Access
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected(CapabilityRequirement),
}

/// RouteEntry
///
/// A path pattern such as `/edit-property/{id}` and who may see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub pattern: &'static str,
    pub access: Access,
}

/// RouteMatch
///
/// A resolved navigation target with its captured path parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub entry: &'a RouteEntry,
    pub params: BTreeMap<&'static str, String>,
}

impl RouteMatch<'_> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every view the application knows about.
    pub fn standard() -> Self {
        RouteTable::new()
            .merge(public::public_routes())
            .merge(authenticated::authenticated_routes())
            .merge(admin::admin_routes())
    }

    pub fn public(mut self, pattern: &'static str) -> Self {
        self.entries.push(RouteEntry {
            pattern,
            access: Access::Public,
        });
        self
    }

    pub fn protected(mut self, pattern: &'static str, requirement: CapabilityRequirement) -> Self {
        self.entries.push(RouteEntry {
            pattern,
            access: Access::Protected(requirement),
        });
        self
    }

    pub fn merge(mut self, other: RouteTable) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// resolve
    ///
    /// First entry whose pattern matches `path`. Query string and fragment are
    /// ignored, as is a trailing slash.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let segments: Vec<&str> = split_segments(path).collect();

        self.entries.iter().find_map(|entry| {
            match_pattern(entry.pattern, &segments).map(|params| RouteMatch { entry, params })
        })
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn match_pattern(
    pattern: &'static str,
    segments: &[&str],
) -> Option<BTreeMap<&'static str, String>> {
    let expected: Vec<&'static str> = split_segments(pattern).collect();
    if expected.len() != segments.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    for (want, got) in expected.into_iter().zip(segments) {
        match want.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
            Some(name) => {
                params.insert(name, (*got).to_string());
            }
            None if want == *got => {}
            None => return None,
        }
    }
    Some(params)
}
