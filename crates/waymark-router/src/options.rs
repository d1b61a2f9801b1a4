use serde::{Deserialize, Serialize};

use crate::path::{normalize_path, strip_base};

/// Matching options shared by every lookup on a tree
///
/// Deserializable so applications can embed it in their own config file.
///
/// ```
/// use waymark_router::RouterOptions;
///
/// let options = RouterOptions::default()
///     .with_case_insensitive(true)
///     .with_base_path("/app/");
/// assert_eq!(options.base_path.as_deref(), Some("/app"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RouterOptions {
    /// Whether literal segments compare ASCII case-insensitively (default: false)
    #[serde(default)]
    pub case_insensitive: bool,

    /// Prefix every routable path lives under, e.g. `/app` (default: none)
    #[serde(default)]
    pub base_path: Option<String>,
}

impl RouterOptions {
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    pub fn with_base_path(mut self, base_path: impl AsRef<str>) -> Self {
        self.base_path = Some(normalize_path(base_path.as_ref()).into_owned());
        self
    }

    /// The normalized base path, `/` when none is configured
    pub fn base(&self) -> String {
        self.base_path
            .as_deref()
            .map(|base| normalize_path(base).into_owned())
            .unwrap_or_else(|| "/".to_string())
    }

    /// Strips the base path from a normalized path
    pub(crate) fn routable<'p>(&self, path: &'p str) -> Option<&'p str> {
        strip_base(path, &self.base())
    }

    /// Prefixes a routable path with the base path
    pub(crate) fn external(&self, path: &str) -> String {
        match self.base().as_str() {
            "/" => path.to_string(),
            base if path == "/" => base.to_string(),
            base => format!("{}{}", base, path),
        }
    }
}
