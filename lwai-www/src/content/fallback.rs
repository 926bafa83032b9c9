//! Built-in placeholder snapshot
//!
//! Served whole when the store has no active hero (typically a fresh,
//! unseeded database). Built once on first use and never modified.

use lwai_common::models::{
    CtaContent, FaqItem, FeatureContent, FooterContent, HeroContent, MeetContent,
    PersonaContent, ProblemContent, QuickLink, Record, SciencePoint, StepContent, TechItem,
};
use once_cell::sync::Lazy;

use super::ContentSnapshot;

static FALLBACK: Lazy<ContentSnapshot> = Lazy::new(build);

/// The placeholder snapshot
pub fn fallback_snapshot() -> &'static ContentSnapshot {
    &FALLBACK
}

fn record<T>(id: &str, sort_order: i64, fields: T) -> Record<T> {
    Record {
        id: format!("fallback-{}", id),
        sort_order,
        fields,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn build() -> ContentSnapshot {
    ContentSnapshot {
        hero: Some(record(
            "hero",
            0,
            HeroContent {
                title: "Transform Your Notes into Flashcards in Seconds".to_string(),
                subtitle: "Study smarter, not harder. Let AI turn your notes into personalized flashcards instantly.".to_string(),
                cta_primary_text: "Create Free Account".to_string(),
                cta_primary_link: "#get-started".to_string(),
                cta_secondary_text: "See How It Works".to_string(),
                cta_secondary_link: "#how-it-works".to_string(),
                hero_image: Some("/hero_16x9_transparent.png".to_string()),
            },
        )),
        problem: Some(record(
            "problem",
            0,
            ProblemContent {
                title: "The Problem".to_string(),
                description: "Staring at pages of notes and writing flashcards one by one takes hours. By the time you finish, there is no energy left to actually study.".to_string(),
                highlight_text: "What if there was a better way?".to_string(),
                image: None,
            },
        )),
        meet: Some(record(
            "meet",
            0,
            MeetContent {
                title: "Meet LearnWhat.ai".to_string(),
                subtitle: "An AI study companion that turns typed or handwritten notes, textbook pages and lecture slides into interactive flashcards. Snap a photo or paste your notes and let the AI do the heavy lifting.".to_string(),
                card_title: "Why LearnWhat.ai?".to_string(),
                card_content: "Your time is precious. Spend it learning, not making flashcards.".to_string(),
            },
        )),
        features: vec![
            record(
                "feature-1",
                0,
                FeatureContent {
                    icon: "📸".to_string(),
                    title: "Snap and Study".to_string(),
                    description: "Turn any page into a deck.".to_string(),
                    items: strings(&[
                        "Photos of handwritten notes",
                        "Textbook pages",
                        "Lecture slides",
                    ]),
                    image: None,
                },
            ),
            record(
                "feature-2",
                1,
                FeatureContent {
                    icon: "🧠".to_string(),
                    title: "Smart Review".to_string(),
                    description: "Cards come back right before you would forget them.".to_string(),
                    items: strings(&["Spaced repetition", "Progress tracking"]),
                    image: None,
                },
            ),
            record(
                "feature-3",
                2,
                FeatureContent {
                    icon: "⚡".to_string(),
                    title: "Instant Decks".to_string(),
                    description: "From notes to a full deck in seconds.".to_string(),
                    items: strings(&["Automatic question generation", "Edit any card"]),
                    image: None,
                },
            ),
        ],
        how_it_works: vec![
            record(
                "step-1",
                0,
                StepContent {
                    step_number: 1,
                    title: "Upload".to_string(),
                    description: "Snap a photo or paste your notes.".to_string(),
                    icon: "📤".to_string(),
                },
            ),
            record(
                "step-2",
                1,
                StepContent {
                    step_number: 2,
                    title: "Generate".to_string(),
                    description: "The AI writes flashcards from the key ideas.".to_string(),
                    icon: "✨".to_string(),
                },
            ),
            record(
                "step-3",
                2,
                StepContent {
                    step_number: 3,
                    title: "Study".to_string(),
                    description: "Review your deck anywhere.".to_string(),
                    icon: "🎯".to_string(),
                },
            ),
        ],
        science: vec![
            record(
                "science-1",
                0,
                SciencePoint {
                    title: "Active Recall".to_string(),
                    description: "Retrieving an answer strengthens memory more than rereading it.".to_string(),
                },
            ),
            record(
                "science-2",
                1,
                SciencePoint {
                    title: "Spaced Repetition".to_string(),
                    description: "Reviews spread over time beat cramming.".to_string(),
                },
            ),
        ],
        personas: vec![
            record(
                "persona-1",
                0,
                PersonaContent {
                    text: "High school students preparing for exams".to_string(),
                    image: None,
                },
            ),
            record(
                "persona-2",
                1,
                PersonaContent {
                    text: "University students keeping up with lectures".to_string(),
                    image: None,
                },
            ),
            record(
                "persona-3",
                2,
                PersonaContent {
                    text: "Professionals studying for certifications".to_string(),
                    image: None,
                },
            ),
        ],
        cta: Some(record(
            "cta",
            0,
            CtaContent {
                title: "Get Started in Minutes".to_string(),
                subtitle: "Free to try. No credit card required.".to_string(),
                steps: strings(&[
                    "Create your free account",
                    "Upload your first notes",
                    "Start studying your new deck",
                ]),
                button_text: "Create Free Account".to_string(),
                button_link: "#get-started".to_string(),
                image: None,
            },
        )),
        tech_stack: vec![
            record(
                "tech-1",
                0,
                TechItem {
                    title: "AI Card Generation".to_string(),
                    description: "Language models pick out the ideas worth remembering.".to_string(),
                    image: None,
                },
            ),
            record(
                "tech-2",
                1,
                TechItem {
                    title: "Handwriting Recognition".to_string(),
                    description: "Reads photos of handwritten and printed notes.".to_string(),
                    image: None,
                },
            ),
        ],
        faq: vec![
            record(
                "faq-1",
                0,
                FaqItem {
                    question: "Is LearnWhat.ai free?".to_string(),
                    answer: "You can start for free and upgrade later if you need more.".to_string(),
                },
            ),
            record(
                "faq-2",
                1,
                FaqItem {
                    question: "What kinds of notes work?".to_string(),
                    answer: "Typed notes, handwriting, textbook pages and slides.".to_string(),
                },
            ),
        ],
        footer: Some(record(
            "footer",
            0,
            FooterContent {
                tagline: "AI-powered flashcards from your own notes.".to_string(),
                subtitle: "Study smarter, not harder.".to_string(),
                quick_links: vec![
                    QuickLink {
                        label: "How It Works".to_string(),
                        href: "#how-it-works".to_string(),
                    },
                    QuickLink {
                        label: "FAQ".to_string(),
                        href: "#faq".to_string(),
                    },
                    QuickLink {
                        label: "Get Started".to_string(),
                        href: "#get-started".to_string(),
                    },
                ],
                newsletter_title: "Stay Updated".to_string(),
                copyright: "© 2025 LearnWhat.ai. All rights reserved.".to_string(),
            },
        )),
    }
}
