use serde::{Deserialize, Serialize};

use super::{lenient, lenient_list, lenient_text, Banner, FaqItem, Meta};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandingContent {
    #[serde(default, deserialize_with = "lenient")]
    pub meta: Meta,
    #[serde(default, deserialize_with = "lenient")]
    pub banner: Banner,
    #[serde(default, deserialize_with = "lenient")]
    pub intro: Intro,
    #[serde(default, deserialize_with = "lenient")]
    pub services: Services,
    #[serde(default, deserialize_with = "lenient_list")]
    pub stats: Vec<Stat>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub benefits: Vec<Benefit>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub faq: Vec<FaqItem>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub testimonials: Vec<Testimonial>,
    #[serde(default, deserialize_with = "lenient")]
    pub cta: CallToAction,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intro {
    #[serde(default, deserialize_with = "lenient_text")]
    pub heading: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub paragraph_1: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub paragraph_2: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Services {
    #[serde(default, deserialize_with = "lenient_text")]
    pub heading: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub services_list: Vec<ServiceItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceItem {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
}

/// A headline figure. `value` is qualitative text, never an invented number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    #[serde(default, deserialize_with = "lenient_text")]
    pub value: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Benefit {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub quote: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallToAction {
    #[serde(default, deserialize_with = "lenient_text")]
    pub heading: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,
}
