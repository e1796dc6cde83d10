//! Filter state stored in URL query parameters.
//!
//! Multi-valued parameters join their values with `_`. Inside a value, a run
//! of whitespace is written as a single `-`, and literal `_`, `-` and `~` are
//! escaped with a `~` prefix, so `Power Supply Unit` becomes
//! `Power-Supply-Unit` and `Wi-Fi` becomes `Wi~-Fi`.

use std::borrow::Cow;
use std::collections::BTreeSet;

use url::{form_urlencoded, Url};

use super::query::{normalize, Dimension, FilterState};

/// Query parameter names.
pub mod params {
    pub const QUERY: &str = "q";
    pub const CATEGORY: &str = "category";
    pub const MANUFACTURER: &str = "manufacturer";
    pub const TAGS: &str = "tags";
    pub const PAGE: &str = "page";
}

const VALUE_DELIMITER: char = '_';
const WHITESPACE: char = '-';
const ESCAPE: char = '~';

const MANAGED_PARAMS: [&str; 5] = [
    params::QUERY,
    params::CATEGORY,
    params::MANUFACTURER,
    params::TAGS,
    params::PAGE,
];

const DIMENSIONS: [Dimension; 3] = [Dimension::Category, Dimension::Manufacturer, Dimension::Tag];

/// Encode one value of a multi-valued parameter.
pub fn encode_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_whitespace = false;
    for c in value.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push(WHITESPACE);
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        if matches!(c, VALUE_DELIMITER | WHITESPACE | ESCAPE) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Join values into one parameter value.
pub fn encode_values<'a>(values: impl IntoIterator<Item = &'a String>) -> String {
    values
        .into_iter()
        .map(|v| encode_value(v))
        .collect::<Vec<_>>()
        .join(&VALUE_DELIMITER.to_string())
}

/// Split a parameter value into its decoded values. Empty segments are
/// dropped.
pub fn decode_values(raw: &str) -> BTreeSet<String> {
    let mut values = BTreeSet::new();
    let mut current = String::new();
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            ESCAPE => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            VALUE_DELIMITER => {
                if !current.is_empty() {
                    values.insert(std::mem::take(&mut current));
                }
            }
            WHITESPACE => current.push(' '),
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        values.insert(current);
    }
    values
}

fn parse_page(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(1)
}

fn first<'a>(pairs: &'a [(Cow<'a, str>, Cow<'a, str>)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_ref())
}

impl FilterState {
    /// Decode the state from a query string (with or without leading `?`).
    ///
    /// A missing or unparseable page decodes to 1; any other page is kept
    /// as is. For repeated parameters the first occurrence wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<_> = form_urlencoded::parse(query.as_bytes()).collect();

        let mut state = FilterState::new();
        if let Some(q) = first(&pairs, params::QUERY) {
            state.query = normalize(q);
        }
        for dimension in DIMENSIONS {
            if let Some(raw) = first(&pairs, dimension.param()) {
                *state.selected_mut(dimension) = decode_values(raw);
            }
        }
        state.page = first(&pairs, params::PAGE).map(parse_page).unwrap_or(1);
        state
    }

    /// Decode the state from a URL.
    pub fn from_url(url: &Url) -> Self {
        Self::from_query(url.query().unwrap_or(""))
    }

    /// Encode the state as a query string without leading `?`.
    ///
    /// Empty dimensions are omitted, as is the page when it is 1.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.query.is_empty() {
            serializer.append_pair(params::QUERY, &self.query);
        }
        for dimension in DIMENSIONS {
            let values = self.selected(dimension);
            if !values.is_empty() {
                serializer.append_pair(dimension.param(), &encode_values(values));
            }
        }
        if self.page != 1 {
            serializer.append_pair(params::PAGE, &self.page.to_string());
        }
        serializer.finish()
    }
}

/// A change to the filter state made from the search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    /// Replace the text query. Blank removes it.
    SetQuery(String),
    /// Select or deselect one value of a dimension.
    Select {
        dimension: Dimension,
        value: String,
        selected: bool,
    },
    /// Go to a page.
    SetPage(i64),
    /// Drop the query and every selected value.
    ClearAll,
}

impl FilterUpdate {
    /// Flip `value` relative to `state`.
    pub fn toggle(state: &FilterState, dimension: Dimension, value: impl Into<String>) -> Self {
        let value = value.into();
        let selected = !state.selected(dimension).contains(&value);
        FilterUpdate::Select {
            dimension,
            value,
            selected,
        }
    }
}

/// Apply `update` to the filter state held in `url`, returning the new URL.
///
/// Every change other than [`FilterUpdate::SetPage`] resets the page to 1.
/// Parameters that do not belong to the filter state are preserved, and the
/// text query keeps its original spelling unless it is the thing changed.
pub fn apply_update(url: &Url, update: &FilterUpdate) -> Url {
    let original: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let mut state = FilterState::from_url(url);
    let mut raw_query = original
        .iter()
        .find(|(k, _)| k == params::QUERY)
        .map(|(_, v)| v.trim().to_string())
        .filter(|q| !q.is_empty());

    match update {
        FilterUpdate::SetQuery(query) => {
            let query = query.trim();
            raw_query = (!query.is_empty()).then(|| query.to_string());
            state.page = 1;
        }
        FilterUpdate::Select {
            dimension,
            value,
            selected,
        } => {
            let values = state.selected_mut(*dimension);
            if *selected {
                values.insert(value.clone());
            } else {
                values.remove(value);
            }
            state.page = 1;
        }
        FilterUpdate::SetPage(page) => state.page = *page,
        FilterUpdate::ClearAll => {
            raw_query = None;
            state.categories.clear();
            state.manufacturers.clear();
            state.tags.clear();
            state.page = 1;
        }
    }

    let mut next = url.clone();
    {
        let mut pairs = next.query_pairs_mut();
        pairs.clear();
        for (key, value) in original
            .iter()
            .filter(|(k, _)| !MANAGED_PARAMS.contains(&k.as_str()))
        {
            pairs.append_pair(key, value);
        }
        if let Some(query) = &raw_query {
            pairs.append_pair(params::QUERY, query);
        }
        for dimension in DIMENSIONS {
            let values = state.selected(dimension);
            if !values.is_empty() {
                pairs.append_pair(dimension.param(), &encode_values(values));
            }
        }
        pairs.append_pair(params::PAGE, &state.page.to_string());
    }
    tracing::debug!(?update, url = %next, "filter state updated");
    next
}
