use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::module_dto::CreateModulePayload;
use crate::error::{Error, Result};
use crate::models::module::{Section, StudyModule};

#[derive(Clone)]
pub struct ModuleService {
    pool: PgPool,
}

impl ModuleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_modules(&self) -> Result<Vec<StudyModule>> {
        let modules = sqlx::query_as::<_, StudyModule>(
            r#"SELECT * FROM study_modules ORDER BY sort_order ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(modules)
    }

    pub async fn get_module(&self, module_id: Uuid) -> Result<StudyModule> {
        let module = sqlx::query_as::<_, StudyModule>(
            r#"SELECT * FROM study_modules WHERE id = $1"#,
        )
        .bind(module_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(module)
    }

    pub async fn create_module(&self, payload: CreateModulePayload) -> Result<StudyModule> {
        let sections = assign_section_ids(&payload.sections)?;
        let sections_json = serde_json::to_value(&sections)?;
        let objectives_json = serde_json::to_value(&payload.learning_objectives)?;
        let concepts_json = serde_json::to_value(&payload.key_concepts)?;

        let module = sqlx::query_as::<_, StudyModule>(
            r#"
            INSERT INTO study_modules (
                title, description, content, sections, sort_order,
                estimated_time, learning_objectives, key_concepts
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.content)
        .bind(sections_json)
        .bind(payload.sort_order)
        .bind(payload.estimated_time)
        .bind(objectives_json)
        .bind(concepts_json)
        .fetch_one(&self.pool)
        .await?;

        Ok(module)
    }

    pub async fn count_modules(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM study_modules"#)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Sections get server-assigned ids; order values must be unique within the
/// module so the section list has a stable reading order.
fn assign_section_ids(sections: &[crate::dto::module_dto::CreateSection]) -> Result<Vec<Section>> {
    let mut seen_orders = HashSet::new();
    for section in sections {
        if !seen_orders.insert(section.order) {
            return Err(Error::BadRequest(format!(
                "Duplicate section order value: {}",
                section.order
            )));
        }
    }

    Ok(sections
        .iter()
        .map(|s| Section {
            id: Uuid::new_v4(),
            title: s.title.clone(),
            content: s.content.clone(),
            order: s.order,
        })
        .collect())
}
