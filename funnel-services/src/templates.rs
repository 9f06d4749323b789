//! Email template service
//!
//! Templates substitute `{{placeholder}}` markers from a caller-supplied
//! variable map. Unknown placeholders are left verbatim so a half-filled
//! render is visibly half-filled instead of silently blank.

use funnel_core::{EntityId, Template};
use funnel_store::Store;
use std::collections::HashMap;

/// Partial update for [`Template`].
#[derive(Debug, Clone, Default)]
pub struct TemplatePatch {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
}

/// Result of rendering a template against a variable map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTemplate {
    pub subject: String,
    pub body: String,
}

pub fn list(store: &Store) -> Vec<Template> {
    store.get_all()
}

pub fn get(store: &Store, id: EntityId) -> Option<Template> {
    store.get_by_id(id)
}

pub fn create(store: &Store, template: Template) -> Template {
    store.create(template)
}

pub fn update(store: &Store, id: EntityId, patch: TemplatePatch) -> Option<Template> {
    store.update::<Template>(id, |t| {
        if let Some(name) = patch.name {
            t.name = name;
        }
        if let Some(subject) = patch.subject {
            t.subject = subject;
        }
        if let Some(body) = patch.body {
            t.body = body;
        }
    })
}

pub fn delete(store: &Store, id: EntityId) {
    store.remove::<Template>(id);
}

/// Substitute `{{key}}` markers in subject and body.
pub fn render(template: &Template, vars: &HashMap<String, String>) -> RenderedTemplate {
    RenderedTemplate {
        subject: substitute(&template.subject, vars),
        body: substitute(&template.body, vars),
    }
}

fn substitute(text: &str, vars: &HashMap<String, String>) -> String {
    let mut rendered = text.to_string();
    for (key, value) in vars {
        rendered = rendered.replace(&format!("{{{{{}}}}}", key), value);
    }
    rendered
}
