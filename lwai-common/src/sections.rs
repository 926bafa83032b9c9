//! Section catalogue
//!
//! Every landing-page section is stored in its own table. A section is
//! either a singleton (at most one active row) or an ordered collection.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Storage shape of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionShape {
    /// At most one active row
    Singleton,
    /// Zero or more active rows ordered by `sort_order`
    Collection,
}

/// A named content slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Hero,
    Problem,
    Meet,
    Features,
    HowItWorks,
    Science,
    Personas,
    Cta,
    TechStack,
    Faq,
    Footer,
    Settings,
}

impl Section {
    /// Every section with a backing table
    pub const ALL: [Section; 12] = [
        Section::Hero,
        Section::Problem,
        Section::Meet,
        Section::Features,
        Section::HowItWorks,
        Section::Science,
        Section::Personas,
        Section::Cta,
        Section::TechStack,
        Section::Faq,
        Section::Footer,
        Section::Settings,
    ];

    /// Sections assembled into the landing-page snapshot, in page order
    pub const LANDING: [Section; 11] = [
        Section::Hero,
        Section::Problem,
        Section::Meet,
        Section::Features,
        Section::HowItWorks,
        Section::Science,
        Section::Personas,
        Section::Cta,
        Section::TechStack,
        Section::Faq,
        Section::Footer,
    ];

    pub fn shape(self) -> SectionShape {
        match self {
            Section::Hero
            | Section::Problem
            | Section::Meet
            | Section::Cta
            | Section::Footer
            | Section::Settings => SectionShape::Singleton,
            Section::Features
            | Section::HowItWorks
            | Section::Science
            | Section::Personas
            | Section::TechStack
            | Section::Faq => SectionShape::Collection,
        }
    }

    pub fn is_singleton(self) -> bool {
        self.shape() == SectionShape::Singleton
    }

    /// URL slug used by the admin API (`/api/admin/how-it-works`)
    pub fn slug(self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::Problem => "problem",
            Section::Meet => "meet",
            Section::Features => "features",
            Section::HowItWorks => "how-it-works",
            Section::Science => "science",
            Section::Personas => "personas",
            Section::Cta => "cta",
            Section::TechStack => "tech-stack",
            Section::Faq => "faq",
            Section::Footer => "footer",
            Section::Settings => "settings",
        }
    }

    /// Backing SQLite table
    ///
    /// Table names come only from this fixed list, never from request input,
    /// so they are safe to format into SQL.
    pub fn table_name(self) -> &'static str {
        match self {
            Section::Hero => "www_hero",
            Section::Problem => "www_problem",
            Section::Meet => "www_meet",
            Section::Features => "www_features",
            Section::HowItWorks => "www_how_it_works",
            Section::Science => "www_science",
            Section::Personas => "www_personas",
            Section::Cta => "www_cta",
            Section::TechStack => "www_tech_stack",
            Section::Faq => "www_faq",
            Section::Footer => "www_footer",
            Section::Settings => "www_settings",
        }
    }

    /// Key in the content snapshot JSON, `None` for admin-only sections
    pub fn snapshot_key(self) -> Option<&'static str> {
        match self {
            Section::Hero => Some("hero"),
            Section::Problem => Some("problem"),
            Section::Meet => Some("meet"),
            Section::Features => Some("features"),
            Section::HowItWorks => Some("howItWorks"),
            Section::Science => Some("science"),
            Section::Personas => Some("personas"),
            Section::Cta => Some("cta"),
            Section::TechStack => Some("techStack"),
            Section::Faq => Some("faq"),
            Section::Footer => Some("footer"),
            Section::Settings => None,
        }
    }

    pub fn from_slug(slug: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.slug() == slug)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::from_slug(s).ok_or_else(|| Error::UnknownSection(s.to_string()))
    }
}
