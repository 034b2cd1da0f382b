//! HTML markup for a form.
//!
//! Produces the component's markup from its current state: container, title,
//! one field container per mounted field (label, control, error slot) and the
//! submit button. Class names match the stylesheet hooks hosts already use
//! (`form-input`, `form-select`, `checkbox-group`, `error-message`, ...).

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::control::Widget;
use crate::form::ShakeForm;
use crate::render::RenderedField;

/// Render the whole component.
pub fn render_html(form: &ShakeForm) -> String {
    let appearance = form.appearance();
    let mut out = String::new();

    out.push_str(&format!(
        "<div class=\"form-container\" data-theme=\"{}\"",
        appearance.resolved_theme()
    ));
    push_style(&mut out, &appearance.host_style(), &appearance.container_style());
    out.push('>');

    match form.title() {
        Some(title) => out.push_str(&format!("<h2 class=\"form-title\">{}</h2>", text(title))),
        None => out.push_str("<h2 class=\"form-title\" style=\"display: none;\"></h2>"),
    }

    out.push_str("<form class=\"shake-form-element\" novalidate><div class=\"fields-wrapper\">");
    for field in form.registry().iter() {
        render_field_html(&mut out, field);
    }
    out.push_str(&format!(
        "</div><button type=\"submit\" class=\"form-submit\">{}</button></form></div>",
        text(form.submit_text())
    ));

    for css in appearance.custom_css() {
        // Keep author CSS from closing the style element early
        out.push_str(&format!("<style>{}</style>", css.replace("</", "<\\/")));
    }
    out
}

fn push_style(out: &mut String, first: &str, second: &str) {
    let style = [first, second]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if !style.is_empty() {
        out.push_str(&format!(" style=\"{}\"", attr(&style)));
    }
}

fn render_field_html(out: &mut String, field: &RenderedField) {
    let name = field.control.name();
    let width = field
        .width
        .as_ref()
        .map(|w| format!("width: {w};"))
        .unwrap_or_default();
    let container_style = field.container_style.clone().unwrap_or_default();

    out.push_str("<div class=\"field-container\"");
    push_style(out, &width, &container_style);
    out.push('>');

    out.push_str(&format!(
        "<label class=\"field-label\" for=\"{}\">{}",
        attr(&field.label.target),
        text(&field.label.text)
    ));
    if field.label.required {
        out.push_str("<span class=\"required-mark\">*</span>");
    }
    out.push_str("</label>");

    let invalid = if field.control.is_invalid() { " invalid" } else { "" };
    match field.control.widget() {
        Widget::Input {
            input_type,
            value,
            placeholder,
            style,
        } => {
            out.push_str(&format!(
                "<input class=\"form-input{invalid}\" type=\"{}\" id=\"{name}\" name=\"{name}\" value=\"{}\"",
                attr(input_type),
                attr(value),
                name = attr(name),
            ));
            push_optional_attr(out, "placeholder", placeholder.as_deref());
            push_optional_attr(out, "style", style.as_deref());
            out.push('>');
        }
        Widget::Textarea {
            value,
            placeholder,
            style,
        } => {
            out.push_str(&format!(
                "<textarea class=\"form-textarea{invalid}\" id=\"{name}\" name=\"{name}\"",
                name = attr(name),
            ));
            push_optional_attr(out, "placeholder", placeholder.as_deref());
            push_optional_attr(out, "style", style.as_deref());
            out.push_str(&format!(">{}</textarea>", text(value)));
        }
        Widget::Select { entries, style } => {
            out.push_str(&format!(
                "<select class=\"form-select{invalid}\" id=\"{name}\" name=\"{name}\"",
                name = attr(name),
            ));
            push_optional_attr(out, "style", style.as_deref());
            out.push('>');
            for entry in entries {
                out.push_str(&format!("<option value=\"{}\"", attr(&entry.value)));
                if entry.disabled {
                    out.push_str(" disabled");
                }
                if entry.selected {
                    out.push_str(" selected");
                }
                out.push_str(&format!(">{}</option>", text(&entry.label)));
            }
            out.push_str("</select>");
        }
        Widget::Group { kind, items } => {
            let kind = kind.as_str();
            out.push_str(&format!(
                "<div class=\"{kind}-group{invalid}\" id=\"{}\">",
                attr(name)
            ));
            for item in items {
                out.push_str(&format!(
                    "<label class=\"{kind}-item\"><input type=\"{kind}\" name=\"{}\" value=\"{}\"{}>{}</label>",
                    attr(name),
                    attr(&item.value),
                    if item.checked { " checked" } else { "" },
                    text(&item.label)
                ));
            }
            out.push_str("</div>");
        }
    }

    out.push_str(&format!(
        "<div class=\"error-message\" id=\"error-{}\">{}</div></div>",
        attr(name),
        text(field.error.message().unwrap_or_default())
    ));
}

fn push_optional_attr(out: &mut String, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        out.push_str(&format!(" {key}=\"{}\"", attr(value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Edit;
    use shakeform_config::{FormConfig, Theme};
    use shakeform_fields::{FieldDef, FieldOption};

    fn form() -> ShakeForm {
        let mut form = ShakeForm::new(FormConfig {
            title: Some("Sign <up>".into()),
            ..FormConfig::default()
        });
        form.set_fields(vec![
            FieldDef::new("name", "text")
                .with_label("Name")
                .with_required(true)
                .with_placeholder("\"Ferris\""),
            FieldDef::new("country", "select")
                .with_label("Country")
                .with_placeholder("Choose")
                .with_options([FieldOption::labeled("kr", "Korea & co")]),
            FieldDef::new("topics", "checkbox")
                .with_label("Topics")
                .with_value(vec!["rust"])
                .with_options(["rust", "go"]),
        ])
        .unwrap();
        form
    }

    #[test]
    fn escapes_text_and_attributes() {
        let html = render_html(&form());
        assert!(html.contains("<h2 class=\"form-title\">Sign &lt;up&gt;</h2>"));
        assert!(html.contains("placeholder=\"&quot;Ferris&quot;\""));
        assert!(html.contains(">Korea &amp; co</option>"));
    }

    #[test]
    fn renders_fields_in_schema_order_with_slots() {
        let html = render_html(&form());
        let name = html.find("id=\"error-name\"").unwrap();
        let country = html.find("id=\"error-country\"").unwrap();
        let topics = html.find("id=\"error-topics\"").unwrap();
        assert!(name < country && country < topics);
        assert!(html.contains("Name<span class=\"required-mark\">*</span>"));
        assert!(html.contains("<option value=\"\" disabled selected>Choose</option>"));
        assert!(html.contains("value=\"rust\" checked>rust"));
        assert!(html.contains("<button type=\"submit\" class=\"form-submit\">Submit</button>"));
    }

    #[test]
    fn shows_errors_and_invalid_marker_after_validation() {
        let mut form = form();
        assert!(!form.validate());
        let html = render_html(&form);
        assert!(html.contains("class=\"form-input invalid\""));
        assert!(html.contains("id=\"error-name\">Name is required.</div>"));

        form.input("name", Edit::Text("Ferris".into())).unwrap();
        assert!(render_html(&form).contains("class=\"form-input\""));
    }

    #[test]
    fn hidden_title_theme_and_custom_css() {
        let mut form = ShakeForm::default();
        form.set_theme(Theme::Dark);
        form.set_css_variables([("--text-color", "#eee")]);
        form.apply_custom_css(".form-submit { color: red; }</style>");
        let html = render_html(&form);
        assert!(html.contains("data-theme=\"dark\""));
        assert!(html.contains("style=\"--text-color: #eee;\""));
        assert!(html.contains("style=\"display: none;\""));
        assert!(html.contains("<style>.form-submit { color: red; }<\\/style></style>"));
    }
}
