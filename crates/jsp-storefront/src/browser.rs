//! Location and session history.

use jsp_commerce::events::{EventBus, StoreEvent};
use jsp_commerce::search::FilterState;
use url::Url;

use crate::StorefrontError;

/// The current page address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// Parse an absolute URL, or a path resolved against `base`.
    pub fn parse(base: &Url, href: &str) -> Result<Self, StorefrontError> {
        Ok(Self::new(base.join(href)?))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// First value of a query parameter.
    pub fn param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// Filter state encoded in the query string.
    pub fn filter_state(&self) -> FilterState {
        FilterState::from_url(&self.url)
    }
}

/// Session history of one tab.
///
/// Pushing appends an entry without reloading and publishes
/// [`StoreEvent::FiltersChanged`]; going back restores the previous entry and
/// publishes [`StoreEvent::PopState`].
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Location>,
    index: usize,
    events: EventBus,
}

impl History {
    /// Start a history at `initial`.
    pub fn new(initial: Location, events: EventBus) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            events,
        }
    }

    /// The current location.
    pub fn location(&self) -> &Location {
        &self.entries[self.index]
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Navigate to `url`, dropping any forward entries.
    pub fn push(&mut self, url: Url) {
        self.entries.truncate(self.index + 1);
        self.entries.push(Location::new(url));
        self.index += 1;
        tracing::debug!(url = %self.location().url(), "history push");
        self.events.publish(StoreEvent::FiltersChanged);
    }

    /// Go back one entry. Returns false at the first entry.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.events.publish(StoreEvent::PopState);
        true
    }

    /// Go forward one entry. Returns false at the last entry.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        self.events.publish(StoreEvent::PopState);
        true
    }
}
