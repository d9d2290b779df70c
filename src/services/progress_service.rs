use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::progress_dto::DashboardStats;
use crate::error::{Error, Result};
use crate::models::module::StudyModule;
use crate::models::progress::UserProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSummary {
    pub percentage: i32,
    pub completed: bool,
}

/// Derives the completion percentage for a module from the completed-section
/// set. Expects the caller to have deduplicated the set already; a module
/// with zero sections is always 0%, never 100%.
pub fn compute_progress(total_sections: usize, completed_section_ids: &[Uuid]) -> ProgressSummary {
    let percentage = if total_sections > 0 {
        ((completed_section_ids.len() as f64 / total_sections as f64) * 100.0).round() as i32
    } else {
        0
    };

    ProgressSummary {
        percentage,
        completed: percentage == 100,
    }
}

#[derive(Clone)]
pub struct ProgressService {
    pool: PgPool,
}

impl ProgressService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<UserProgress>> {
        let rows = sqlx::query_as::<_, UserProgress>(
            r#"SELECT * FROM user_progress WHERE user_id = $1 ORDER BY last_accessed DESC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Adds a section to the user's completed set and re-derives
    /// percentage/completed under the same row lock, so concurrent calls
    /// from multiple tabs cannot lose an update. Re-marking an already
    /// completed section is a no-op on the set.
    pub async fn mark_section_complete(
        &self,
        user_id: Uuid,
        module_id: Uuid,
        section_id: Uuid,
    ) -> Result<(ProgressSummary, Vec<Uuid>)> {
        let module = sqlx::query_as::<_, StudyModule>(
            r#"SELECT * FROM study_modules WHERE id = $1"#,
        )
        .bind(module_id)
        .fetch_one(&self.pool)
        .await?;

        let sections = module.parsed_sections();
        if !sections.iter().any(|s| s.id == section_id) {
            return Err(Error::BadRequest(
                "Section does not belong to this module".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let sections_completed: Vec<Uuid> = sqlx::query_scalar(
            r#"
            INSERT INTO user_progress (user_id, module_id, sections_completed, last_accessed, last_section_accessed)
            VALUES ($1, $2, ARRAY[$3]::uuid[], NOW(), $3)
            ON CONFLICT (user_id, module_id) DO UPDATE
            SET sections_completed = CASE
                    WHEN $3 = ANY(user_progress.sections_completed) THEN user_progress.sections_completed
                    ELSE array_append(user_progress.sections_completed, $3)
                END,
                last_accessed = NOW(),
                last_section_accessed = $3
            RETURNING sections_completed
            "#,
        )
        .bind(user_id)
        .bind(module_id)
        .bind(section_id)
        .fetch_one(&mut *tx)
        .await?;

        let summary = compute_progress(sections.len(), &sections_completed);

        sqlx::query(
            r#"
            UPDATE user_progress
            SET progress_percentage = $3, completed = $4
            WHERE user_id = $1 AND module_id = $2
            "#,
        )
        .bind(user_id)
        .bind(module_id)
        .bind(summary.percentage)
        .bind(summary.completed)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Section {} marked complete for user {} in module {} ({}%)",
            section_id,
            user_id,
            module_id,
            summary.percentage
        );

        Ok((summary, sections_completed))
    }

    /// Accumulates study time for a module. Additive, so the stored total
    /// is monotonically non-decreasing.
    pub async fn add_time_spent(
        &self,
        user_id: Uuid,
        module_id: Uuid,
        minutes: i32,
    ) -> Result<UserProgress> {
        // Resolve the module first so an unknown id is NotFound, not a
        // silent progress row against nothing.
        sqlx::query_scalar::<_, Uuid>(r#"SELECT id FROM study_modules WHERE id = $1"#)
            .bind(module_id)
            .fetch_one(&self.pool)
            .await?;

        let progress = sqlx::query_as::<_, UserProgress>(
            r#"
            INSERT INTO user_progress (user_id, module_id, time_spent, last_accessed)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id, module_id) DO UPDATE
            SET time_spent = user_progress.time_spent + $3,
                last_accessed = NOW()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(module_id)
        .bind(minutes)
        .fetch_one(&self.pool)
        .await?;

        Ok(progress)
    }

    pub async fn dashboard_stats(&self, user_id: Uuid) -> Result<DashboardStats> {
        let total_modules: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM study_modules"#)
            .fetch_one(&self.pool)
            .await?;

        let (completed_modules, total_time_spent): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FILTER (WHERE completed), COALESCE(SUM(time_spent), 0)::bigint
            FROM user_progress WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let completion_percentage = if total_modules > 0 {
            (completed_modules as f64 / total_modules as f64 * 1000.0).round() / 10.0
        } else {
            0.0
        };

        Ok(DashboardStats {
            total_modules,
            completed_modules,
            total_time_spent,
            completion_percentage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn one_of_three_sections_is_thirty_three_percent() {
        let summary = compute_progress(3, &ids(1));
        assert_eq!(summary.percentage, 33);
        assert!(!summary.completed);
    }

    #[test]
    fn two_of_three_sections_rounds_up() {
        let summary = compute_progress(3, &ids(2));
        assert_eq!(summary.percentage, 67);
        assert!(!summary.completed);
    }

    #[test]
    fn all_sections_complete_is_one_hundred() {
        let summary = compute_progress(4, &ids(4));
        assert_eq!(summary.percentage, 100);
        assert!(summary.completed);
    }

    #[test]
    fn empty_set_is_zero_percent() {
        let summary = compute_progress(5, &[]);
        assert_eq!(summary.percentage, 0);
        assert!(!summary.completed);
    }

    #[test]
    fn zero_sections_is_zero_not_one_hundred() {
        let summary = compute_progress(0, &[]);
        assert_eq!(summary.percentage, 0);
        assert!(!summary.completed);
    }

    #[test]
    fn percentage_stays_in_bounds_and_hits_100_only_when_full() {
        for total in 1..=12usize {
            for done in 0..=total {
                let summary = compute_progress(total, &ids(done));
                assert!((0..=100).contains(&summary.percentage));
                assert_eq!(summary.percentage == 100, done == total);
                assert_eq!(summary.completed, summary.percentage == 100);
            }
        }
    }
}
