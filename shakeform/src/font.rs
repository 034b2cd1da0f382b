//! Font-loading collaborator.
//!
//! Fetching a stylesheet is the host's business: it implements [`FontLoader`]
//! for whatever transport it has. The form only ever receives the resolved
//! family name, through [`Appearance::set_font_family`](crate::Appearance::set_font_family).
//! A failed load is logged and leaves the form as it was.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

/// System font stack appended after any loaded family.
pub const DEFAULT_FONT_STACK: &str = "-apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, Helvetica, Arial, sans-serif, \"Apple Color Emoji\", \"Segoe UI Emoji\", \"Segoe UI Symbol\"";

const GOOGLE_FONTS_CSS: &str = "https://fonts.googleapis.com/css2";

/// Errors from the font collaborator. Never affect form state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FontError {
    #[error("font family name is empty")]
    EmptyFamily,

    #[error("no stylesheet URL given for font '{family}'")]
    MissingStylesheet { family: String },

    #[error("failed to load font stylesheet {url}: {message}")]
    LoadFailed { url: String, message: String },
}

/// Where a web font comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// A Google Fonts family, optionally restricted to some weights.
    Google { family: String, weights: Vec<u16> },
    /// Any family served by a stylesheet URL.
    Web { family: String, stylesheet_url: String },
}

impl FontSource {
    pub fn google(family: impl Into<String>, weights: &[u16]) -> Self {
        Self::Google {
            family: family.into(),
            weights: weights.to_vec(),
        }
    }

    pub fn web(family: impl Into<String>, stylesheet_url: impl Into<String>) -> Self {
        Self::Web {
            family: family.into(),
            stylesheet_url: stylesheet_url.into(),
        }
    }

    pub fn family(&self) -> &str {
        match self {
            Self::Google { family, .. } | Self::Web { family, .. } => family,
        }
    }

    /// URL of the stylesheet declaring the font faces.
    pub fn stylesheet_url(&self) -> String {
        match self {
            Self::Google { family, weights } => {
                let family = family.split_whitespace().collect::<Vec<_>>().join("+");
                if weights.is_empty() {
                    format!("{GOOGLE_FONTS_CSS}?family={family}&display=swap")
                } else {
                    let weights = weights
                        .iter()
                        .map(u16::to_string)
                        .collect::<Vec<_>>()
                        .join(";");
                    format!("{GOOGLE_FONTS_CSS}?family={family}:wght@{weights}&display=swap")
                }
            }
            Self::Web { stylesheet_url, .. } => stylesheet_url.clone(),
        }
    }

    fn check(&self) -> Result<(), FontError> {
        if self.family().trim().is_empty() {
            return Err(FontError::EmptyFamily);
        }
        if let Self::Web {
            family,
            stylesheet_url,
        } = self
        {
            if stylesheet_url.trim().is_empty() {
                return Err(FontError::MissingStylesheet {
                    family: family.clone(),
                });
            }
        }
        Ok(())
    }
}

/// `font-family` value for `family` followed by the default stack.
pub fn font_stack(family: &str) -> String {
    let quoted = family.replace('"', "\\\"");
    format!("\"{quoted}\", {DEFAULT_FONT_STACK}")
}

/// Fetches font stylesheets on behalf of a form.
#[async_trait]
pub trait FontLoader: Send + Sync {
    /// Load the stylesheet at `url`. Resolves once its fonts are usable.
    async fn load(&self, url: &str) -> Result<(), FontError>;
}

/// Load `source` and return the family name to hand to the form.
///
/// Failures are logged here; callers may ignore the error.
pub async fn resolve_font<L>(loader: &L, source: &FontSource) -> Result<String, FontError>
where
    L: FontLoader + ?Sized,
{
    if let Err(err) = source.check() {
        warn!(%err, "font source rejected");
        return Err(err);
    }
    let url = source.stylesheet_url();
    match loader.load(&url).await {
        Ok(()) => {
            debug!(family = source.family(), %url, "font loaded");
            Ok(source.family().to_string())
        }
        Err(err) => {
            warn!(family = source.family(), %err, "font failed to load");
            Err(err)
        }
    }
}
