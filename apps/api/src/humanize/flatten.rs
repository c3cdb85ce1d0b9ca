//! Typed field handles for every rewritable text in each content variant.
//!
//! Each variant lists its groups in a fixed order. Each group is one humanizer
//! call and lists its field handles in a fixed order. `flatten` walks
//! one group against a tree and keeps only present fields at or above the
//! group's minimum length, so the same tree always yields the same batch.

use std::fmt::Debug;

use crate::humanize::redistribute::SplitMode;
use crate::models::blog::BlogContent;
use crate::models::landing::LandingContent;

/// A content tree with a known set of rewritable fields.
pub trait Rewritable {
    type Path: Copy + Debug + PartialEq;

    /// Groups in the order they are sent to the humanizer.
    fn rewrite_groups(&self) -> Vec<FieldGroup<Self::Path>>;

    fn field(&self, path: Self::Path) -> Option<&str>;

    fn field_mut(&mut self, path: Self::Path) -> Option<&mut String>;
}

/// One logical batch: unrelated arrays never share a group.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGroup<P> {
    pub name: String,
    /// Shorter texts (in chars, after trimming) stay untouched.
    pub min_len: usize,
    pub split: SplitMode,
    pub slots: Vec<P>,
}

impl<P> FieldGroup<P> {
    fn new(name: impl Into<String>, min_len: usize, split: SplitMode, slots: Vec<P>) -> Self {
        Self {
            name: name.into(),
            min_len,
            split,
            slots,
        }
    }
}

/// A field picked for rewriting, with the handle to write it back.
#[derive(Debug, Clone, PartialEq)]
pub struct RewritableField<P> {
    pub path: P,
    pub original_text: String,
}

pub fn flatten<T: Rewritable>(tree: &T, group: &FieldGroup<T::Path>) -> Vec<RewritableField<T::Path>> {
    group
        .slots
        .iter()
        .filter_map(|&path| {
            let text = tree.field(path)?.trim();
            if text.chars().count() < group.min_len {
                return None;
            }
            Some(RewritableField {
                path,
                original_text: text.to_string(),
            })
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Landing page
// ────────────────────────────────────────────────────────────────────────────

const LANDING_BODY_MIN: usize = 30;
const LANDING_CARD_MIN: usize = 20;
const FAQ_ANSWER_MIN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingField {
    IntroParagraph1,
    IntroParagraph2,
    ServiceDescription(usize),
    CtaText,
    StatDescription(usize),
    BenefitDescription(usize),
    FaqAnswer(usize),
    TestimonialQuote(usize),
}

impl Rewritable for LandingContent {
    type Path = LandingField;

    fn rewrite_groups(&self) -> Vec<FieldGroup<LandingField>> {
        let mut body = vec![LandingField::IntroParagraph1, LandingField::IntroParagraph2];
        body.extend((0..self.services.services_list.len()).map(LandingField::ServiceDescription));
        body.push(LandingField::CtaText);

        vec![
            FieldGroup::new("body", LANDING_BODY_MIN, SplitMode::Separator, body),
            FieldGroup::new(
                "stats",
                LANDING_CARD_MIN,
                SplitMode::Separator,
                (0..self.stats.len()).map(LandingField::StatDescription).collect(),
            ),
            FieldGroup::new(
                "benefits",
                LANDING_CARD_MIN,
                SplitMode::Separator,
                (0..self.benefits.len()).map(LandingField::BenefitDescription).collect(),
            ),
            FieldGroup::new(
                "faq",
                FAQ_ANSWER_MIN,
                SplitMode::Separator,
                (0..self.faq.len()).map(LandingField::FaqAnswer).collect(),
            ),
            FieldGroup::new(
                "testimonials",
                LANDING_CARD_MIN,
                SplitMode::Separator,
                (0..self.testimonials.len()).map(LandingField::TestimonialQuote).collect(),
            ),
        ]
    }

    fn field(&self, path: LandingField) -> Option<&str> {
        let text = match path {
            LandingField::IntroParagraph1 => &self.intro.paragraph_1,
            LandingField::IntroParagraph2 => &self.intro.paragraph_2,
            LandingField::ServiceDescription(i) => &self.services.services_list.get(i)?.description,
            LandingField::CtaText => &self.cta.text,
            LandingField::StatDescription(i) => &self.stats.get(i)?.description,
            LandingField::BenefitDescription(i) => &self.benefits.get(i)?.description,
            LandingField::FaqAnswer(i) => &self.faq.get(i)?.answer,
            LandingField::TestimonialQuote(i) => &self.testimonials.get(i)?.quote,
        };
        Some(text.as_str())
    }

    fn field_mut(&mut self, path: LandingField) -> Option<&mut String> {
        let text = match path {
            LandingField::IntroParagraph1 => &mut self.intro.paragraph_1,
            LandingField::IntroParagraph2 => &mut self.intro.paragraph_2,
            LandingField::ServiceDescription(i) => {
                &mut self.services.services_list.get_mut(i)?.description
            }
            LandingField::CtaText => &mut self.cta.text,
            LandingField::StatDescription(i) => &mut self.stats.get_mut(i)?.description,
            LandingField::BenefitDescription(i) => &mut self.benefits.get_mut(i)?.description,
            LandingField::FaqAnswer(i) => &mut self.faq.get_mut(i)?.answer,
            LandingField::TestimonialQuote(i) => &mut self.testimonials.get_mut(i)?.quote,
        };
        Some(text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Blog post
// ────────────────────────────────────────────────────────────────────────────

const BLOG_PARAGRAPH_MIN: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlogField {
    /// Paragraph or example block `subsection` of section `section`.
    SectionProse { section: usize, subsection: usize },
    FaqAnswer(usize),
    Conclusion,
}

impl Rewritable for BlogContent {
    type Path = BlogField;

    fn rewrite_groups(&self) -> Vec<FieldGroup<BlogField>> {
        let mut groups: Vec<FieldGroup<BlogField>> = self
            .sections
            .iter()
            .enumerate()
            .map(|(section, s)| {
                let slots = s
                    .subsections
                    .iter()
                    .enumerate()
                    .filter(|(_, sub)| sub.prose().is_some())
                    .map(|(subsection, _)| BlogField::SectionProse {
                        section,
                        subsection,
                    })
                    .collect();
                FieldGroup::new(
                    format!("section-{}", section + 1),
                    BLOG_PARAGRAPH_MIN,
                    SplitMode::ParagraphGap,
                    slots,
                )
            })
            .collect();

        groups.push(FieldGroup::new(
            "faq",
            FAQ_ANSWER_MIN,
            SplitMode::Separator,
            (0..self.faq.len()).map(BlogField::FaqAnswer).collect(),
        ));
        groups.push(FieldGroup::new(
            "conclusion",
            BLOG_PARAGRAPH_MIN,
            SplitMode::Separator,
            vec![BlogField::Conclusion],
        ));
        groups
    }

    fn field(&self, path: BlogField) -> Option<&str> {
        match path {
            BlogField::SectionProse {
                section,
                subsection,
            } => self
                .sections
                .get(section)?
                .subsections
                .get(subsection)?
                .prose(),
            BlogField::FaqAnswer(i) => Some(self.faq.get(i)?.answer.as_str()),
            BlogField::Conclusion => Some(self.conclusion.as_str()),
        }
    }

    fn field_mut(&mut self, path: BlogField) -> Option<&mut String> {
        match path {
            BlogField::SectionProse {
                section,
                subsection,
            } => self
                .sections
                .get_mut(section)?
                .subsections
                .get_mut(subsection)?
                .prose_mut(),
            BlogField::FaqAnswer(i) => Some(&mut self.faq.get_mut(i)?.answer),
            BlogField::Conclusion => Some(&mut self.conclusion),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::blog::{BlogSection, Subsection};
    use crate::models::landing::{Benefit, Intro, ServiceItem, Services};
    use crate::models::FaqItem;

    const LONG: &str = "This sentence is comfortably longer than thirty characters.";

    fn landing() -> LandingContent {
        LandingContent {
            intro: Intro {
                heading: "Welcome to the best plumbing team in town".into(),
                paragraph_1: LONG.into(),
                paragraph_2: "too short".into(),
            },
            services: Services {
                heading: "Services".into(),
                services_list: vec![
                    ServiceItem {
                        title: "Repairs".into(),
                        description: format!("Repairs: {LONG}"),
                    },
                    ServiceItem {
                        title: "Installs".into(),
                        description: format!("Installs: {LONG}"),
                    },
                ],
            },
            benefits: vec![Benefit {
                title: "Fast".into(),
                description: "Twenty chars exactly".into(),
            }],
            faq: vec![
                FaqItem {
                    question: "Weekends?".into(),
                    answer: "Yes we do.".into(),
                },
                FaqItem {
                    question: "Cost?".into(),
                    answer: "Cheap.".into(),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_landing_groups_are_ordered_and_separate() {
        let page = landing();
        let names: Vec<String> = page.rewrite_groups().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["body", "stats", "benefits", "faq", "testimonials"]);
    }

    #[test]
    fn test_landing_body_skips_short_and_missing_fields() {
        let page = landing();
        let groups = page.rewrite_groups();
        let fields = flatten(&page, &groups[0]);
        let paths: Vec<LandingField> = fields.iter().map(|f| f.path).collect();
        assert_eq!(
            paths,
            vec![
                LandingField::IntroParagraph1,
                LandingField::ServiceDescription(0),
                LandingField::ServiceDescription(1),
            ]
        );
        assert_eq!(fields[0].original_text, LONG);
    }

    #[test]
    fn test_thresholds_differ_per_group() {
        let page = landing();
        let groups = page.rewrite_groups();
        // "Twenty chars exactly" is 20 chars: included at min 20.
        assert_eq!(flatten(&page, &groups[2]).len(), 1);
        // "Yes we do." is 10 chars, "Cheap." is 6: only the first passes min 10.
        let faq = flatten(&page, &groups[3]);
        assert_eq!(faq.len(), 1);
        assert_eq!(faq[0].path, LandingField::FaqAnswer(0));
    }

    #[test]
    fn test_headings_are_never_rewritable() {
        let page = landing();
        for group in page.rewrite_groups() {
            for field in flatten(&page, &group) {
                assert_ne!(field.original_text, page.intro.heading);
            }
        }
    }

    #[test]
    fn test_flatten_is_reproducible() {
        let page = landing();
        let groups = page.rewrite_groups();
        assert_eq!(flatten(&page, &groups[0]), flatten(&page, &groups[0]));
    }

    #[test]
    fn test_field_mut_writes_back_to_the_same_slot() {
        let mut page = landing();
        *page.field_mut(LandingField::ServiceDescription(1)).unwrap() = "changed".into();
        assert_eq!(page.services.services_list[1].description, "changed");
        assert!(page.field_mut(LandingField::ServiceDescription(9)).is_none());
    }

    fn blog() -> BlogContent {
        BlogContent {
            sections: vec![
                BlogSection {
                    id: "one".into(),
                    title: "One".into(),
                    subsections: vec![
                        Subsection::Heading {
                            content: LONG.into(),
                        },
                        Subsection::Paragraph {
                            content: LONG.into(),
                        },
                        Subsection::List {
                            items: vec![LONG.into()],
                        },
                        Subsection::Example {
                            content: format!("For example: {LONG}"),
                        },
                    ],
                },
                BlogSection {
                    id: "two".into(),
                    title: "Two".into(),
                    subsections: vec![Subsection::Paragraph {
                        content: "short".into(),
                    }],
                },
            ],
            conclusion: LONG.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_blog_groups_one_per_section_then_faq_and_conclusion() {
        let post = blog();
        let groups = post.rewrite_groups();
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["section-1", "section-2", "faq", "conclusion"]);
        assert_eq!(groups[0].split, SplitMode::ParagraphGap);
        assert_eq!(groups[2].split, SplitMode::Separator);
    }

    #[test]
    fn test_blog_section_group_only_holds_prose() {
        let post = blog();
        let groups = post.rewrite_groups();
        let fields = flatten(&post, &groups[0]);
        let paths: Vec<BlogField> = fields.iter().map(|f| f.path).collect();
        assert_eq!(
            paths,
            vec![
                BlogField::SectionProse {
                    section: 0,
                    subsection: 1
                },
                BlogField::SectionProse {
                    section: 0,
                    subsection: 3
                },
            ]
        );
        assert!(flatten(&post, &groups[1]).is_empty());
    }
}
