//! Landing-page content aggregation
//!
//! [`ContentAggregator::snapshot`] reads all eleven landing sections
//! concurrently and assembles one [`ContentSnapshot`]. Each section read is
//! isolated: a failure is logged and that section comes back empty, never
//! affecting the others. If the hero section is missing after assembly the
//! whole snapshot is swapped for the built-in placeholder snapshot.

use lwai_common::models::{
    CtaContent, FaqItem, FeatureContent, FooterContent, HeroContent, MeetContent,
    PersonaContent, ProblemContent, Record, SciencePoint, StepContent, TechItem,
};
use lwai_common::{Section, StorageConfig};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::store::{SectionStore, StoreError};

pub mod fallback;
pub mod seed;

pub use fallback::fallback_snapshot;
pub use seed::seed_placeholders;

/// Resolved content of every landing section
///
/// Every key is always present in JSON: singletons serialize as an object
/// or `null`, collections as a (possibly empty) array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSnapshot {
    pub hero: Option<Record<HeroContent>>,
    pub problem: Option<Record<ProblemContent>>,
    pub meet: Option<Record<MeetContent>>,
    pub features: Vec<Record<FeatureContent>>,
    pub how_it_works: Vec<Record<StepContent>>,
    pub science: Vec<Record<SciencePoint>>,
    pub personas: Vec<Record<PersonaContent>>,
    pub cta: Option<Record<CtaContent>>,
    pub tech_stack: Vec<Record<TechItem>>,
    pub faq: Vec<Record<FaqItem>>,
    pub footer: Option<Record<FooterContent>>,
}

impl ContentSnapshot {
    /// Snapshot with no data in any section
    pub fn empty() -> Self {
        Self {
            hero: None,
            problem: None,
            meet: None,
            features: Vec::new(),
            how_it_works: Vec::new(),
            science: Vec::new(),
            personas: Vec::new(),
            cta: None,
            tech_stack: Vec::new(),
            faq: Vec::new(),
            footer: None,
        }
    }

    /// Complete enough to render: the hero section is present
    pub fn is_complete(&self) -> bool {
        self.hero.is_some()
    }

    /// Rewrite every image reference to a browser-usable URL
    pub fn resolve_images(&mut self, storage: &StorageConfig) {
        if let Some(hero) = self.hero.as_mut() {
            storage.resolve_field(&mut hero.fields.hero_image);
        }
        if let Some(problem) = self.problem.as_mut() {
            storage.resolve_field(&mut problem.fields.image);
        }
        if let Some(cta) = self.cta.as_mut() {
            storage.resolve_field(&mut cta.fields.image);
        }
        for feature in &mut self.features {
            storage.resolve_field(&mut feature.fields.image);
        }
        for persona in &mut self.personas {
            storage.resolve_field(&mut persona.fields.image);
        }
        for tech in &mut self.tech_stack {
            storage.resolve_field(&mut tech.fields.image);
        }
    }
}

/// Where a served snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Store,
    Fallback,
}

impl ContentSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentSource::Store => "store",
            ContentSource::Fallback => "fallback",
        }
    }
}

/// Fan-out reader assembling the landing snapshot
pub struct ContentAggregator {
    store: Arc<dyn SectionStore>,
    read_timeout: Option<Duration>,
}

impl ContentAggregator {
    pub fn new(store: Arc<dyn SectionStore>) -> Self {
        Self {
            store,
            read_timeout: None,
        }
    }

    /// Bound each section read; a read that overruns degrades to empty
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Snapshot for rendering; falls back to placeholders when incomplete
    pub async fn snapshot(&self) -> ContentSnapshot {
        self.snapshot_with_source().await.0
    }

    /// Same as [`snapshot`](Self::snapshot), also reporting which source was used
    pub async fn snapshot_with_source(&self) -> (ContentSnapshot, ContentSource) {
        let assembled = self.assemble().await;
        if assembled.is_complete() {
            (assembled, ContentSource::Store)
        } else {
            info!("Hero section missing, serving fallback content");
            (fallback_snapshot().clone(), ContentSource::Fallback)
        }
    }

    /// Read every landing section concurrently, without fallback substitution
    pub async fn assemble(&self) -> ContentSnapshot {
        let (hero, problem, meet, features, how_it_works, science, personas, cta, tech_stack, faq, footer) = tokio::join!(
            self.singleton::<HeroContent>(Section::Hero),
            self.singleton::<ProblemContent>(Section::Problem),
            self.singleton::<MeetContent>(Section::Meet),
            self.collection::<FeatureContent>(Section::Features),
            self.collection::<StepContent>(Section::HowItWorks),
            self.collection::<SciencePoint>(Section::Science),
            self.collection::<PersonaContent>(Section::Personas),
            self.singleton::<CtaContent>(Section::Cta),
            self.collection::<TechItem>(Section::TechStack),
            self.collection::<FaqItem>(Section::Faq),
            self.singleton::<FooterContent>(Section::Footer),
        );

        ContentSnapshot {
            hero,
            problem,
            meet,
            features,
            how_it_works,
            science,
            personas,
            cta,
            tech_stack,
            faq,
            footer,
        }
    }

    async fn singleton<T: DeserializeOwned>(&self, section: Section) -> Option<Record<T>> {
        let row = match self.bounded(section, self.store.read_active(section)).await {
            Ok(Some(row)) => row,
            Ok(None) => {
                debug!(section = %section, "No active row");
                return None;
            }
            Err(e) => {
                warn!(section = %section, error = %e, "Section read failed, treating as empty");
                return None;
            }
        };

        match row.into_record(section) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(section = %section, error = %e, "Section row undecodable, treating as empty");
                None
            }
        }
    }

    async fn collection<T: DeserializeOwned>(&self, section: Section) -> Vec<Record<T>> {
        let rows = match self
            .bounded(section, self.store.read_active_ordered(section))
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!(section = %section, error = %e, "Section read failed, treating as empty");
                return Vec::new();
            }
        };

        let mut records: Vec<Record<T>> = rows
            .into_iter()
            .filter_map(|row| match row.into_record(section) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(section = %section, error = %e, "Skipping undecodable row");
                    None
                }
            })
            .collect();

        // Stable: equal sort keys keep the store's insertion order
        records.sort_by_key(|r| r.sort_order);
        records
    }

    async fn bounded<T, F>(&self, section: Section, read: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match self.read_timeout {
            Some(after) => tokio::time::timeout(after, read)
                .await
                .map_err(|_| StoreError::Timeout { section, after })?,
            None => read.await,
        }
    }
}
