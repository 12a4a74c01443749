use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::models::{Country, EventCategory, HistoricalEvent, YearOrder, YearRange};

/// Trait for querying historical events from the remote store.
///
/// Injected into [`EventCatalog`] so tests can substitute a fake store.
pub trait EventStore: Send + Sync {
    /// Every event for `country_code`, ordered by year per `order`, optionally
    /// restricted to a year range (inclusive both ends).
    fn events_for_country(
        &self,
        country_code: &str,
        range: Option<YearRange>,
        order: YearOrder,
    ) -> impl std::future::Future<Output = Result<Vec<HistoricalEvent>, StoreError>> + Send;
}

/// Trait for querying country metadata from the remote store.
pub trait CountryStore: Send + Sync {
    /// All countries, ordered by name ascending.
    fn all_countries(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Country>, StoreError>> + Send;

    /// A single country by its identifier code, or `None` if absent.
    fn country_by_code(
        &self,
        country_code: &str,
    ) -> impl std::future::Future<Output = Result<Option<Country>, StoreError>> + Send;

    /// Countries whose name contains `term` (case-insensitive), ordered by name.
    fn search_countries(
        &self,
        term: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Country>, StoreError>> + Send;
}

/// Read-side catalog over the remote event store.
pub struct EventCatalog<S: EventStore> {
    store: S,
}

impl<S: EventStore> EventCatalog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch events for a country, optionally restricted to a year range.
    ///
    /// A transport or query failure is not fatal to page rendering: it is
    /// logged and an empty sequence is returned, never an error.
    pub async fn fetch_events(
        &self,
        country_code: &str,
        range: Option<YearRange>,
        order: YearOrder,
    ) -> Vec<HistoricalEvent> {
        match self.store.events_for_country(country_code, range, order).await {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!("Failed to fetch events for {}: {}", country_code, e);
                Vec::new()
            }
        }
    }

    /// Fetch events and group them by category in one step, for callers that
    /// feed the history drawer directly.
    pub async fn fetch_events_grouped(
        &self,
        country_code: &str,
        range: Option<YearRange>,
        order: YearOrder,
    ) -> BTreeMap<EventCategory, Vec<HistoricalEvent>> {
        let events = self.fetch_events(country_code, range, order).await;
        group_by_category(events)
    }
}

/// Partition events into the fixed category set.
///
/// The returned mapping always has exactly the nine known keys, each starting
/// empty. Events append in input order; an event whose normalized category is
/// not a known key is dropped with a diagnostic.
pub fn group_by_category(
    events: Vec<HistoricalEvent>,
) -> BTreeMap<EventCategory, Vec<HistoricalEvent>> {
    let mut grouped: BTreeMap<EventCategory, Vec<HistoricalEvent>> = EventCategory::ALL
        .iter()
        .map(|category| (*category, Vec::new()))
        .collect();

    for event in events {
        let normalized = EventCategory::normalize(&event.category);
        match EventCategory::from_normalized(&normalized) {
            Some(category) => grouped.entry(category).or_default().push(event),
            None => {
                tracing::warn!(
                    "Dropping event '{}' with unrecognized category '{}' (normalized '{}')",
                    event.title,
                    event.category,
                    normalized
                );
            }
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn event(year: i32, title: &str, category: &str) -> HistoricalEvent {
        let now = Utc::now();
        HistoricalEvent {
            id: Uuid::new_v4(),
            country_code: "FRA".to_string(),
            year,
            title: title.to_string(),
            description: None,
            category: category.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_group_by_category_empty_input() {
        let grouped = group_by_category(Vec::new());

        assert_eq!(grouped.len(), 9);
        for category in EventCategory::ALL {
            assert!(grouped[&category].is_empty());
        }
    }

    #[test]
    fn test_group_by_category_normalizes_and_drops() {
        let grouped = group_by_category(vec![
            event(1914, "War begins", "War"),
            event(1755, "Lisbon earthquake", "Natural Disaster"),
            event(1800, "Mystery", "xyz"),
        ]);

        assert_eq!(grouped.len(), 9);
        assert_eq!(grouped[&EventCategory::War].len(), 1);
        assert_eq!(grouped[&EventCategory::War][0].title, "War begins");
        assert_eq!(grouped[&EventCategory::NaturalDisaster].len(), 1);

        // The unrecognized event appears nowhere.
        let total: usize = grouped.values().map(Vec::len).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_group_by_category_preserves_input_order() {
        let grouped = group_by_category(vec![
            event(1919, "Treaty", "war"),
            event(1914, "Outbreak", "war"),
            event(1916, "Somme", "war"),
        ]);

        let titles: Vec<&str> = grouped[&EventCategory::War]
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Treaty", "Outbreak", "Somme"]);
    }

    #[test]
    fn test_group_by_category_keys_never_grow() {
        let grouped = group_by_category(vec![event(1900, "Odd", "weird category")]);

        assert_eq!(grouped.len(), 9);
        let total: usize = grouped.values().map(Vec::len).sum();
        assert_eq!(total, 0);
    }
}
