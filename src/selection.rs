use std::sync::Mutex;

/// Guard enforcing last-requested-country-wins for in-flight fetches.
///
/// Each fetch is tagged with the country code it was issued for; when the
/// response arrives, [`SelectionGuard::accept`] only lets it through if that
/// country is still the current selection. A stale response for a country the
/// user has already navigated away from is discarded instead of overwriting
/// the newer selection.
#[derive(Debug, Default)]
pub struct SelectionGuard {
    current: Mutex<Option<String>>,
}

/// Tag for one outstanding request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionToken {
    country_code: String,
}

impl SelectionToken {
    pub fn country_code(&self) -> &str {
        &self.country_code
    }
}

impl SelectionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `country_code` the current selection and tag a request for it.
    pub fn select(&self, country_code: &str) -> SelectionToken {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = Some(country_code.to_string());
        SelectionToken {
            country_code: country_code.to_string(),
        }
    }

    /// Clear the current selection; any outstanding responses become stale.
    pub fn clear(&self) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = None;
    }

    /// Pass `value` through only if `token` still matches the current
    /// selection; otherwise discard it as stale.
    pub fn accept<T>(&self, token: &SelectionToken, value: T) -> Option<T> {
        let current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        match current.as_deref() {
            Some(code) if code == token.country_code => Some(value),
            _ => {
                tracing::debug!(
                    "Discarding stale response for {} (current selection: {:?})",
                    token.country_code,
                    current.as_deref()
                );
                None
            }
        }
    }
}
