//! Presentation state of a form: theme, CSS variables, custom CSS, font and
//! width.
//!
//! Nothing here feeds back into schema, snapshot or validation.

use indexmap::IndexMap;
use shakeform_config::Theme;
use tracing::debug;

use crate::font::font_stack;

/// Presentation settings applied to the component's container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Appearance {
    theme: Theme,
    prefers_dark: bool,
    width: Option<String>,
    css_variables: IndexMap<String, String>,
    custom_css: Vec<String>,
    font_family: Option<String>,
}

impl Appearance {
    pub fn new(theme: Theme, width: Option<String>) -> Self {
        Self {
            theme,
            width,
            ..Self::default()
        }
    }

    /// The requested theme, possibly [`Theme::Auto`].
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        debug!(%theme, "theme changed");
        self.theme = theme;
    }

    /// Record the host's preferred color scheme. Only affects [`Theme::Auto`].
    pub fn apply_color_scheme(&mut self, prefers_dark: bool) {
        self.prefers_dark = prefers_dark;
    }

    /// The theme actually drawn: [`Theme::Light`] or [`Theme::Dark`].
    pub fn resolved_theme(&self) -> Theme {
        match self.theme {
            Theme::Auto if self.prefers_dark => Theme::Dark,
            Theme::Auto => Theme::Light,
            other => other,
        }
    }

    pub fn width(&self) -> Option<&str> {
        self.width.as_deref()
    }

    pub fn set_width(&mut self, width: Option<String>) {
        self.width = width;
    }

    /// Set CSS custom properties on the container; later values win.
    pub fn set_css_variables<I, K, V>(&mut self, variables: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in variables {
            self.css_variables.insert(key.into(), value.into());
        }
    }

    pub fn css_variables(&self) -> &IndexMap<String, String> {
        &self.css_variables
    }

    /// Append a stylesheet to the component.
    pub fn apply_custom_css(&mut self, css: impl Into<String>) {
        self.custom_css.push(css.into());
    }

    pub fn custom_css(&self) -> &[String] {
        &self.custom_css
    }

    /// Use a loaded font family, falling back to the default system stack.
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = Some(font_stack(family));
    }

    /// Full `font-family` value, if a font has been applied.
    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    /// Inline style of the component host: width and font variables.
    pub fn host_style(&self) -> String {
        let mut declarations = Vec::new();
        if let Some(width) = &self.width {
            declarations.push(format!("--form-width: {width};"));
        }
        if let Some(family) = &self.font_family {
            declarations.push(format!("--font-family: {family};"));
        }
        declarations.join(" ")
    }

    /// Inline style of the form container: the custom properties.
    pub fn container_style(&self) -> String {
        self.css_variables
            .iter()
            .map(|(key, value)| format!("{key}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_theme_follows_color_scheme() {
        let mut appearance = Appearance::new(Theme::Auto, None);
        assert_eq!(appearance.resolved_theme(), Theme::Light);
        appearance.apply_color_scheme(true);
        assert_eq!(appearance.resolved_theme(), Theme::Dark);
        // Requested theme stays auto so later scheme changes still apply
        assert_eq!(appearance.theme(), Theme::Auto);
        appearance.apply_color_scheme(false);
        assert_eq!(appearance.resolved_theme(), Theme::Light);
    }

    #[test]
    fn explicit_theme_ignores_color_scheme() {
        let mut appearance = Appearance::new(Theme::Light, None);
        appearance.apply_color_scheme(true);
        assert_eq!(appearance.resolved_theme(), Theme::Light);
    }

    #[test]
    fn css_variables_keep_insertion_order_and_override() {
        let mut appearance = Appearance::default();
        appearance.set_css_variables([("--text-color", "#111"), ("--border-radius", "4px")]);
        appearance.set_css_variables([("--text-color", "#222")]);
        assert_eq!(
            appearance.container_style(),
            "--text-color: #222; --border-radius: 4px;"
        );
    }

    #[test]
    fn host_style_includes_width_and_font() {
        let mut appearance = Appearance::new(Theme::Light, Some("480px".into()));
        appearance.set_font_family("Noto Sans KR");
        let style = appearance.host_style();
        assert!(style.starts_with("--form-width: 480px;"));
        assert!(style.contains("--font-family: \"Noto Sans KR\", -apple-system"));
    }
}
