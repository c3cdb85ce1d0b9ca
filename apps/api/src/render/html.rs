//! HTML assembly with maud. Every model-provided string is interpolated as
//! text, so maud escapes it.

use maud::{html, Markup, DOCTYPE};

use crate::models::blog::{BlogContent, Subsection};
use crate::models::landing::LandingContent;
use crate::models::{Banner, ContentTree, FaqItem, Meta};

const STYLESHEET: &str = "/assets/css/style.css";
const SCRIPT: &str = "/assets/js/main.js";

pub fn render_html(tree: &ContentTree) -> String {
    let markup = match tree {
        ContentTree::Blog(blog) => page(&blog.meta, &blog.banner, blog_body(blog)),
        ContentTree::Landing(landing) => page(&landing.meta, &landing.banner, landing_body(landing)),
    };
    markup.into_string()
}

/// Blank model output renders as no element at all.
fn filled(text: &str) -> bool {
    !text.trim().is_empty()
}

fn page(meta: &Meta, banner: &Banner, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (meta.title) }
                meta name="description" content=(meta.description);
                meta name="keywords" content=(meta.keywords);
                link rel="stylesheet" href=(STYLESHEET);
            }
            body {
                header.banner {
                    h1 { (banner.heading) }
                    p { (banner.subheading) }
                }
                main { (body) }
                script src=(SCRIPT) {}
            }
        }
    }
}

fn faq_block(faq: &[FaqItem]) -> Markup {
    html! {
        @if !faq.is_empty() {
            section.faq {
                h2 { "Frequently Asked Questions" }
                @for item in faq {
                    div."faq-item" {
                        @if filled(&item.question) { h3 { (item.question) } }
                        @if filled(&item.answer) { p { (item.answer) } }
                    }
                }
            }
        }
    }
}

fn subsection(sub: &Subsection) -> Markup {
    html! {
        @match sub {
            Subsection::Paragraph { content } if filled(content) => { p { (content) } }
            Subsection::Heading { content } if filled(content) => { h3 { (content) } }
            Subsection::Subheading { content } if filled(content) => { h4 { (content) } }
            Subsection::Example { content } if filled(content) => { blockquote { (content) } }
            Subsection::List { items } if !items.is_empty() => {
                ul {
                    @for item in items.iter().filter(|i| filled(i)) {
                        li { (item) }
                    }
                }
            }
            _ => {}
        }
    }
}

fn blog_body(blog: &BlogContent) -> Markup {
    html! {
        @for sec in &blog.sections {
            section id=(sec.id) {
                @if filled(&sec.title) { h2 { (sec.title) } }
                @for sub in &sec.subsections {
                    (subsection(sub))
                }
            }
        }
        (faq_block(&blog.faq))
        @if filled(&blog.conclusion) {
            section.conclusion {
                p { (blog.conclusion) }
            }
        }
    }
}

fn landing_body(page: &LandingContent) -> Markup {
    html! {
        section.intro {
            @if filled(&page.intro.heading) { h2 { (page.intro.heading) } }
            @if filled(&page.intro.paragraph_1) { p { (page.intro.paragraph_1) } }
            @if filled(&page.intro.paragraph_2) { p { (page.intro.paragraph_2) } }
        }

        @if !page.services.services_list.is_empty() {
            section.services {
                @if filled(&page.services.heading) { h2 { (page.services.heading) } }
                @for service in &page.services.services_list {
                    article.service {
                        @if filled(&service.title) { h3 { (service.title) } }
                        @if filled(&service.description) { p { (service.description) } }
                    }
                }
            }
        }

        @if !page.stats.is_empty() {
            section.stats {
                @for stat in &page.stats {
                    div.stat {
                        @if filled(&stat.value) { strong { (stat.value) } }
                        @if filled(&stat.label) { span { (stat.label) } }
                        @if filled(&stat.description) { p { (stat.description) } }
                    }
                }
            }
        }

        @if !page.benefits.is_empty() {
            section.benefits {
                @for benefit in &page.benefits {
                    @if filled(&benefit.title) { h3 { (benefit.title) } }
                    @if filled(&benefit.description) { p { (benefit.description) } }
                }
            }
        }

        (faq_block(&page.faq))

        @if !page.testimonials.is_empty() {
            section.testimonials {
                @for t in &page.testimonials {
                    figure {
                        @if filled(&t.quote) { blockquote { (t.quote) } }
                        @if filled(&t.name) {
                            figcaption { (t.name) ", " (t.role) }
                        }
                    }
                }
            }
        }

        section.cta {
            @if filled(&page.cta.heading) { h2 { (page.cta.heading) } }
            @if filled(&page.cta.text) { p { (page.cta.text) } }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::parser::parse_content;
    use crate::models::SchemaVariant;
    use crate::testing::{MINIMAL_BLOG_JSON, MINIMAL_LANDING_JSON};

    #[test]
    fn test_model_text_cannot_inject_markup() {
        let mut tree = parse_content(MINIMAL_BLOG_JSON, SchemaVariant::Blog).unwrap();
        if let ContentTree::Blog(blog) = &mut tree {
            blog.conclusion = "<script>alert(1)</script>".into();
            blog.meta.description = r#"" onload="x"#.into();
        }
        let html = render_html(&tree);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains(r#"content="&quot; onload=&quot;x""#));
    }

    #[test]
    fn test_ampersands_are_escaped() {
        let mut tree = parse_content(MINIMAL_BLOG_JSON, SchemaVariant::Blog).unwrap();
        if let ContentTree::Blog(blog) = &mut tree {
            blog.meta.title = "Tom & Jerry".into();
        }
        assert!(render_html(&tree).contains("<title>Tom &amp; Jerry</title>"));
    }

    #[test]
    fn test_blog_renders_sections_and_assets() {
        let tree = parse_content(MINIMAL_BLOG_JSON, SchemaVariant::Blog).unwrap();
        let html = render_html(&tree);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Local SEO Basics</title>"));
        assert!(html.contains("<section id=\"listings\">"));
        assert!(html.contains("<li>Check hours</li>"));
        assert!(html.contains(STYLESHEET));
        assert!(html.contains(SCRIPT));
    }

    #[test]
    fn test_landing_renders_every_block() {
        let tree = parse_content(MINIMAL_LANDING_JSON, SchemaVariant::Landing).unwrap();
        let html = render_html(&tree);
        for needle in [
            "class=\"services\"",
            "class=\"stats\"",
            "class=\"benefits\"",
            "class=\"faq\"",
            "<figcaption>Dana, Cafe owner</figcaption>",
            "class=\"cta\"",
        ] {
            assert!(html.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn test_empty_tree_still_renders_a_document() {
        let html = render_html(&ContentTree::Landing(LandingContent::default()));
        assert!(html.contains("<main>"));
        assert!(!html.contains("class=\"services\""));
    }
}
