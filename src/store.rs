use serde::de::DeserializeOwned;

use crate::catalog::{CountryStore, EventStore};
use crate::error::StoreError;
use crate::models::{Country, HistoricalEvent, YearOrder, YearRange};

const EVENTS_TABLE: &str = "events";
const COUNTRIES_TABLE: &str = "countries";

/// Client for the hosted PostgREST-style store backing the globe.
///
/// Owns a single `reqwest::Client`; every request carries the project API key
/// in both the `apikey` and `Authorization` headers.
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(String, String)],
    ) -> Result<Vec<T>, StoreError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                table: table.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<Vec<T>>().await.map_err(|e| StoreError::Decode {
            table: table.to_string(),
            message: e.to_string(),
        })
    }
}

/// Query parameters for the events table.
fn events_query(
    country_code: &str,
    range: Option<YearRange>,
    order: YearOrder,
) -> Vec<(String, String)> {
    let mut query = vec![
        ("select".to_string(), "*".to_string()),
        ("country_code".to_string(), format!("eq.{}", country_code)),
    ];
    if let Some(range) = range {
        query.push(("year".to_string(), format!("gte.{}", range.start)));
        query.push(("year".to_string(), format!("lte.{}", range.end)));
    }
    let direction = match order {
        YearOrder::Ascending => "year.asc",
        YearOrder::Descending => "year.desc",
    };
    query.push(("order".to_string(), direction.to_string()));
    query
}

fn all_countries_query() -> Vec<(String, String)> {
    vec![
        ("select".to_string(), "*".to_string()),
        ("order".to_string(), "name.asc".to_string()),
    ]
}

fn country_by_code_query(country_code: &str) -> Vec<(String, String)> {
    vec![
        ("select".to_string(), "*".to_string()),
        ("country_code".to_string(), format!("eq.{}", country_code)),
        ("limit".to_string(), "1".to_string()),
    ]
}

fn search_countries_query(term: &str) -> Vec<(String, String)> {
    vec![
        ("select".to_string(), "*".to_string()),
        ("name".to_string(), format!("ilike.*{}*", term)),
        ("order".to_string(), "name.asc".to_string()),
    ]
}

impl EventStore for RestStore {
    async fn events_for_country(
        &self,
        country_code: &str,
        range: Option<YearRange>,
        order: YearOrder,
    ) -> Result<Vec<HistoricalEvent>, StoreError> {
        self.get_rows(EVENTS_TABLE, &events_query(country_code, range, order))
            .await
    }
}

impl CountryStore for RestStore {
    async fn all_countries(&self) -> Result<Vec<Country>, StoreError> {
        self.get_rows(COUNTRIES_TABLE, &all_countries_query()).await
    }

    async fn country_by_code(&self, country_code: &str) -> Result<Option<Country>, StoreError> {
        let rows: Vec<Country> = self
            .get_rows(COUNTRIES_TABLE, &country_by_code_query(country_code))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn search_countries(&self, term: &str) -> Result<Vec<Country>, StoreError> {
        self.get_rows(COUNTRIES_TABLE, &search_countries_query(term))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_query_without_range() {
        let query = events_query("FRA", None, YearOrder::Descending);

        assert_eq!(
            query,
            vec![
                ("select".to_string(), "*".to_string()),
                ("country_code".to_string(), "eq.FRA".to_string()),
                ("order".to_string(), "year.desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_events_query_with_range_is_inclusive() {
        let query = events_query("DEU", Some(YearRange::new(1900, 1950)), YearOrder::Ascending);

        assert!(query.contains(&("year".to_string(), "gte.1900".to_string())));
        assert!(query.contains(&("year".to_string(), "lte.1950".to_string())));
        assert!(query.contains(&("order".to_string(), "year.asc".to_string())));
    }

    #[test]
    fn test_events_query_bce_years() {
        let query = events_query("GRC", Some(YearRange::new(-500, -400)), YearOrder::Ascending);

        assert!(query.contains(&("year".to_string(), "gte.-500".to_string())));
        assert!(query.contains(&("year".to_string(), "lte.-400".to_string())));
    }

    #[test]
    fn test_country_queries() {
        assert!(all_countries_query().contains(&("order".to_string(), "name.asc".to_string())));

        let by_code = country_by_code_query("USA");
        assert!(by_code.contains(&("country_code".to_string(), "eq.USA".to_string())));
        assert!(by_code.contains(&("limit".to_string(), "1".to_string())));

        let search = search_countries_query("stan");
        assert!(search.contains(&("name".to_string(), "ilike.*stan*".to_string())));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let store = RestStore::new("https://example.supabase.co/", "key");
        assert_eq!(store.base_url, "https://example.supabase.co");
    }
}
