//! Static registry of built-in templates.
//!
//! Built-ins ship with the system, have no owner, and are immutable at
//! runtime: every edit path forks a custom copy via
//! [`Template::clone_as_new`]. The registry is assembled once at first use
//! from literals -- an explicit mapping from slug to template, with no
//! directory scanning.

use std::sync::LazyLock;

use crate::template::{Field, FieldKind, Options, RichOption, Template, TemplateId};

/// A registry entry: a stable slug plus the template itself (whose id is
/// `TemplateId::Builtin(slug)`).
#[derive(Debug, Clone)]
pub struct BuiltinTemplate {
    pub slug: &'static str,
    pub template: Template,
}

static REGISTRY: LazyLock<Vec<BuiltinTemplate>> =
    LazyLock::new(|| vec![seo_article_brief(), ad_campaign_brief()]);

/// All built-in templates, in display order.
pub fn all() -> &'static [BuiltinTemplate] {
    &REGISTRY
}

/// Look up a built-in template by slug.
pub fn find(slug: &str) -> Option<&'static BuiltinTemplate> {
    REGISTRY.iter().find(|b| b.slug == slug)
}

fn entry(slug: &'static str, mut template: Template) -> BuiltinTemplate {
    template.id = Some(TemplateId::Builtin(slug.to_string()));
    BuiltinTemplate { slug, template }
}

fn text_field(name: &str, label: &str, placeholder: &str) -> Field {
    Field {
        name: name.into(),
        label: label.into(),
        placeholder: placeholder.into(),
        ..Field::default()
    }
}

fn seo_article_brief() -> BuiltinTemplate {
    entry(
        "seo-article-brief",
        Template {
            id: None,
            prompt_name: "SEO article brief".into(),
            template: "Write an SEO-optimized article about {topic} for {audience}.\n\
                       Tone of voice: {tone}.\n\n\
                       The article must include the following sections:\n{sections}"
                .into(),
            fields: vec![
                text_field("topic", "Topic", "e.g. container gardening"),
                text_field("audience", "Target audience", "e.g. first-time homeowners"),
                Field {
                    name: "tone".into(),
                    label: "Tone of voice".into(),
                    kind: FieldKind::Dropdown,
                    options: Some(Options::Simple(vec![
                        "friendly".into(),
                        "professional".into(),
                        "playful".into(),
                    ])),
                    ..Field::default()
                },
                Field {
                    name: "sections".into(),
                    label: "Sections".into(),
                    kind: FieldKind::Checkbox,
                    options: Some(Options::Rich(vec![
                        RichOption::new(
                            "Introduction",
                            "## Introduction\nHook the reader and state the promise of the article.",
                        ),
                        RichOption::new(
                            "How-to steps",
                            "## Step-by-step guide\nNumbered, actionable steps with expected outcomes.",
                        ),
                        RichOption::new(
                            "FAQ",
                            "## FAQ\nAnswer the five most common search questions on the topic.",
                        ),
                    ])),
                    ..Field::default()
                },
            ],
        },
    )
}

fn ad_campaign_brief() -> BuiltinTemplate {
    entry(
        "ad-campaign-brief",
        Template {
            id: None,
            prompt_name: "Ad campaign brief".into(),
            template: "Draft {variants} ad copy variants for {product}.\n\
                       Key selling points: {selling_points}\n\
                       Call to action: {cta}"
                .into(),
            fields: vec![
                text_field("product", "Product", "e.g. a meal-planning app"),
                Field {
                    name: "variants".into(),
                    label: "Number of variants".into(),
                    placeholder: "e.g. 3".into(),
                    ..Field::default()
                },
                Field {
                    name: "selling_points".into(),
                    label: "Selling points".into(),
                    kind: FieldKind::Checkbox,
                    options: Some(Options::Simple(vec![
                        "saves time".into(),
                        "saves money".into(),
                        "easy to start".into(),
                    ])),
                    ..Field::default()
                },
                Field {
                    name: "cta".into(),
                    label: "Call to action".into(),
                    kind: FieldKind::Textarea,
                    placeholder: "e.g. Start your free trial today".into(),
                    ..Field::default()
                },
            ],
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn slugs_are_unique_and_ids_match() {
        let mut seen = HashSet::new();
        for b in all() {
            assert!(seen.insert(b.slug), "duplicate slug {}", b.slug);
            assert_eq!(
                b.template.id,
                Some(TemplateId::Builtin(b.slug.to_string()))
            );
            assert!(!b.template.prompt_name.is_empty());
        }
    }

    #[test]
    fn find_resolves_known_slugs_only() {
        assert!(find("seo-article-brief").is_some());
        assert!(find("no-such-template").is_none());
    }

    #[test]
    fn builtins_render_with_defaults() {
        // Built-ins must be immediately usable in the generator.
        for b in all() {
            let values = crate::render::FormValues::defaults(&b.template);
            let out = crate::render::render(&b.template, &values);
            assert!(!out.contains("{topic}") || b.slug != "seo-article-brief");
            assert!(!out.is_empty());
        }
    }
}
