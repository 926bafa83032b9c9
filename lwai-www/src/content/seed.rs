//! Seed an empty store with the placeholder content
//!
//! Gives a fresh install real rows that admins can edit instead of the
//! read-only fallback. Sections that already have rows are left alone.

use lwai_common::models::{encode_fields, Record};
use lwai_common::Section;
use serde::Serialize;
use tracing::info;

use super::fallback_snapshot;
use crate::store::{SectionStore, SectionWrite, StoreError};

/// Write placeholder rows into every empty landing section
///
/// Returns the number of rows inserted. Sections are seeded one at a time,
/// not in one transaction: a failure part way leaves the earlier sections
/// seeded, and running it again fills only the sections still empty.
pub async fn seed_placeholders(store: &dyn SectionStore) -> Result<usize, StoreError> {
    let fallback = fallback_snapshot();
    let mut inserted = 0;

    inserted += seed_section(store, Section::Hero, fallback.hero.as_slice()).await?;
    inserted += seed_section(store, Section::Problem, fallback.problem.as_slice()).await?;
    inserted += seed_section(store, Section::Meet, fallback.meet.as_slice()).await?;
    inserted += seed_section(store, Section::Features, &fallback.features).await?;
    inserted += seed_section(store, Section::HowItWorks, &fallback.how_it_works).await?;
    inserted += seed_section(store, Section::Science, &fallback.science).await?;
    inserted += seed_section(store, Section::Personas, &fallback.personas).await?;
    inserted += seed_section(store, Section::Cta, fallback.cta.as_slice()).await?;
    inserted += seed_section(store, Section::TechStack, &fallback.tech_stack).await?;
    inserted += seed_section(store, Section::Faq, &fallback.faq).await?;
    inserted += seed_section(store, Section::Footer, fallback.footer.as_slice()).await?;

    info!("Seeded {} placeholder rows", inserted);
    Ok(inserted)
}

async fn seed_section<T: Serialize>(
    store: &dyn SectionStore,
    section: Section,
    records: &[Record<T>],
) -> Result<usize, StoreError> {
    if !store.read_all(section).await?.is_empty() {
        info!(section = %section, "Section has rows, not seeding");
        return Ok(0);
    }

    for record in records {
        let fields =
            encode_fields(&record.fields).map_err(|e| StoreError::InvalidInput(e.to_string()))?;
        store
            .upsert(
                section,
                SectionWrite {
                    id: None,
                    sort_order: Some(record.sort_order),
                    is_active: true,
                    fields,
                },
            )
            .await?;
    }
    Ok(records.len())
}
