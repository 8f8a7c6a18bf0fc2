//! Registry of the login providers enabled for this deployment.
//!
//! Built once at start-up and handed to the HTTP layer; it never changes
//! while the server runs.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::ports::IdentityProvider;

/// Enabled providers keyed by name.
#[derive(Clone, Default)]
pub struct LoginProviders {
    providers: BTreeMap<String, Arc<dyn IdentityProvider>>,
}

impl LoginProviders {
    /// Index `providers` by name; a later provider replaces an earlier one
    /// with the same name.
    pub fn new(providers: impl IntoIterator<Item = Arc<dyn IdentityProvider>>) -> Self {
        let providers = providers
            .into_iter()
            .map(|provider| (provider.name().to_owned(), provider))
            .collect();
        Self { providers }
    }

    /// Look up a provider by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn IdentityProvider>> {
        self.providers.get(name)
    }

    /// Provider names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// Whether no provider is enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for LoginProviders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
