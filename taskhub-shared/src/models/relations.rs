//! Deletion policies between entities
//!
//! The schema declares foreign keys but no `ON DELETE` actions. Instead each
//! parent/child relationship names the policy applied to child rows when the
//! parent is deleted, and [`delete_with_policies`] runs those policies and the
//! parent delete inside a single transaction.
//!
//! | Relationship | Parent | Child column | Policy |
//! |---|---|---|---|
//! | [`TASK_OWNER`] | users | tasks.user_id | `CascadeChildren` |
//! | [`TASK_CATEGORY`] | categories | tasks.category_id | `DetachReference` |

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use super::EntityKind;

/// What happens to child rows when their parent is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionPolicy {
    /// Delete every child row referencing the parent
    CascadeChildren,

    /// Keep child rows, clear their reference to the parent and refresh
    /// their `updated_at`
    DetachReference,
}

/// A foreign-key relationship and its deletion policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
    /// Entity being referenced
    pub parent: EntityKind,

    /// Entity holding the reference
    pub child: EntityKind,

    /// Column on the child table
    pub foreign_key: &'static str,

    /// Applied to children when the parent is deleted
    pub policy: DeletionPolicy,
}

/// A task's owner; deleting a user deletes their tasks
pub const TASK_OWNER: Relationship = Relationship {
    parent: EntityKind::User,
    child: EntityKind::Task,
    foreign_key: "user_id",
    policy: DeletionPolicy::CascadeChildren,
};

/// A task's category; deleting a category leaves its tasks uncategorized
pub const TASK_CATEGORY: Relationship = Relationship {
    parent: EntityKind::Category,
    child: EntityKind::Task,
    foreign_key: "category_id",
    policy: DeletionPolicy::DetachReference,
};

/// Every relationship in the schema
pub const RELATIONSHIPS: &[Relationship] = &[TASK_OWNER, TASK_CATEGORY];

/// Relationships in which `parent` is the referenced side
pub fn dependents_of(parent: EntityKind) -> impl Iterator<Item = &'static Relationship> {
    RELATIONSHIPS.iter().filter(move |r| r.parent == parent)
}

impl Relationship {
    /// SQL applying this policy to the children of one parent
    ///
    /// A cascade binds only the parent id. A detach binds the new
    /// `updated_at` first, then the parent id.
    pub fn statement(&self) -> String {
        let child_table = self.child.table();
        match self.policy {
            DeletionPolicy::CascadeChildren => {
                format!("DELETE FROM {} WHERE {} = ?", child_table, self.foreign_key)
            }
            DeletionPolicy::DetachReference => format!(
                "UPDATE {} SET {fk} = NULL, updated_at = ? WHERE {fk} = ?",
                child_table,
                fk = self.foreign_key
            ),
        }
    }

    /// Applies the policy to the children of `parent_id`
    ///
    /// Returns the number of child rows deleted or detached.
    pub async fn apply(
        &self,
        conn: &mut SqliteConnection,
        parent_id: i64,
    ) -> Result<u64, sqlx::Error> {
        let sql = self.statement();
        let query = match self.policy {
            DeletionPolicy::CascadeChildren => sqlx::query(&sql),
            DeletionPolicy::DetachReference => sqlx::query(&sql).bind(Utc::now()),
        };
        let result = query.bind(parent_id).execute(conn).await?;

        Ok(result.rows_affected())
    }
}

/// Deletes one row, first applying the policy of every relationship it parents
///
/// Everything happens in one transaction with a single commit. A missing row
/// returns `Ok(false)` and writes nothing.
///
/// # Errors
///
/// Returns an error if any statement fails; the transaction is rolled back.
pub async fn delete_with_policies(
    pool: &SqlitePool,
    entity: EntityKind,
    id: i64,
) -> Result<bool, sqlx::Error> {
    let table = entity.table();
    let mut tx = pool.begin().await?;

    let exists_sql = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE id = ?)", table);
    let exists: bool = sqlx::query_scalar(&exists_sql)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

    if !exists {
        return Ok(false);
    }

    for relationship in dependents_of(entity) {
        let affected = relationship.apply(&mut *tx, id).await?;
        debug!(
            parent = %entity,
            parent_id = id,
            child = %relationship.child,
            policy = ?relationship.policy,
            affected,
            "Applied deletion policy"
        );
    }

    let delete_sql = format!("DELETE FROM {} WHERE id = ?", table);
    sqlx::query(&delete_sql).bind(id).execute(&mut *tx).await?;

    tx.commit().await?;

    debug!(entity = %entity, id, "Deleted row");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascade_statement() {
        assert_eq!(
            TASK_OWNER.statement(),
            "DELETE FROM tasks WHERE user_id = ?"
        );
    }

    #[test]
    fn test_detach_statement() {
        assert_eq!(
            TASK_CATEGORY.statement(),
            "UPDATE tasks SET category_id = NULL, updated_at = ? WHERE category_id = ?"
        );
    }

    #[test]
    fn test_dependents_of() {
        let users: Vec<_> = dependents_of(EntityKind::User).collect();
        assert_eq!(users, vec![&TASK_OWNER]);

        let categories: Vec<_> = dependents_of(EntityKind::Category).collect();
        assert_eq!(categories, vec![&TASK_CATEGORY]);

        assert_eq!(dependents_of(EntityKind::Task).count(), 0);
    }
}
