//! Template expansion against an event record

use serde_json::Value;

use super::placeholder::{display_value, is_truthy, resolve_path, scan};
use super::tags::{transform_tag, Tag};
use super::types::{RenderMode, Rendered, Segment};
use crate::device::LookupContext;
use crate::metrics::RenderMetrics;

/// Expand `template` against `event`.
///
/// An absent template is returned as `None`. An empty template, or an absent
/// or falsy event, is passed through unchanged as [`Rendered::Text`] in either
/// mode. Never fails: unresolved paths render as the empty string.
pub fn render(
    context: Option<&dyn LookupContext>,
    template: Option<&str>,
    event: Option<&Value>,
    mode: RenderMode,
) -> Option<Rendered> {
    let template = template?;

    let event = match event {
        Some(event) if is_truthy(event) && !template.is_empty() => event,
        _ => return Some(Rendered::Text(template.to_string())),
    };

    let segments = expand(context, template, event, mode);
    RenderMetrics::record_render(mode);

    Some(match mode {
        RenderMode::Plain => Rendered::Text(segments.iter().map(ToString::to_string).collect()),
        RenderMode::Structured => Rendered::Elements(segments),
    })
}

fn expand(
    context: Option<&dyn LookupContext>,
    template: &str,
    event: &Value,
    mode: RenderMode,
) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last_index = 0;

    for placeholder in scan(template) {
        if placeholder.start > last_index {
            segments.push(Segment::Text(
                template[last_index..placeholder.start].to_string(),
            ));
        }
        last_index = placeholder.end;

        if placeholder.is_disabled() {
            tracing::trace!(placeholder = placeholder.raw, "Skipping disabled placeholder");
            continue;
        }

        let resolved = resolve_path(event, placeholder.path);
        tracing::trace!(
            path = placeholder.path,
            tag = ?placeholder.tag,
            resolved = resolved.is_some(),
            "Resolved placeholder"
        );

        let value = resolved.cloned().unwrap_or_else(|| Value::String(String::new()));
        let segment = match placeholder.tag {
            Some(tag) => transform_tag(context, &Tag::from(tag), &value, mode),
            None => Segment::Text(display_value(&value)),
        };
        segments.push(segment);
    }

    if last_index < template.len() {
        segments.push(Segment::Text(template[last_index..].to_string()));
    }

    segments
}

/// Renders templates through a fixed lookup context
#[derive(Clone, Copy)]
pub struct TemplateRenderer<'a> {
    context: Option<&'a dyn LookupContext>,
}

impl<'a> TemplateRenderer<'a> {
    /// Create a renderer resolving devices through `context`
    pub fn new(context: &'a dyn LookupContext) -> Self {
        Self {
            context: Some(context),
        }
    }

    /// Create a renderer without device resolution; tags render as `value#tag`
    pub fn detached() -> Self {
        Self { context: None }
    }

    pub fn render(
        &self,
        template: Option<&str>,
        event: Option<&Value>,
        mode: RenderMode,
    ) -> Option<Rendered> {
        render(self.context, template, event, mode)
    }

    /// Render to a plain string
    pub fn render_text(&self, template: &str, event: &Value) -> String {
        self.render(Some(template), Some(event), RenderMode::Plain)
            .map(|rendered| rendered.to_text())
            .unwrap_or_default()
    }

    /// Render to structured segments; a passthrough yields one text segment
    pub fn render_segments(&self, template: &str, event: &Value) -> Vec<Segment> {
        match self.render(Some(template), Some(event), RenderMode::Structured) {
            Some(Rendered::Elements(segments)) => segments,
            Some(Rendered::Text(text)) => vec![Segment::Text(text)],
            None => Vec::new(),
        }
    }
}
