//! Uniform write policy for rows owned by a parent (contacts, bank details,
//! MSDS documents, leasing info, certificates).
//!
//! Submitted children carrying an `id` update that row, children without one
//! are inserted, and ids listed for removal are deleted. Every referenced id
//! must already belong to the parent.

use crate::errors::ServiceError;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, QueryFilter, QuerySelect,
};
use std::collections::HashSet;

/// A submitted child row
pub trait ChildInput: Send {
    type Entity: EntityTrait;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send;

    /// Label used in validation messages
    const LABEL: &'static str;

    fn id(&self) -> Option<i32>;

    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    fn parent_column() -> <Self::Entity as EntityTrait>::Column;

    /// Full row for `parent_id`; the primary key is set only for updates
    fn into_active_model(self, parent_id: i32) -> Self::ActiveModel;
}

/// Primary key value for a submitted child: set for updates, left to the
/// database for inserts
pub fn child_key(id: Option<i32>) -> ActiveValue<i32> {
    match id {
        Some(id) => ActiveValue::Set(id),
        None => ActiveValue::NotSet,
    }
}

/// Applies `items` and `removed_ids` to the children of `parent_id`
pub async fn sync_children<I, C>(
    conn: &C,
    parent_id: i32,
    items: Vec<I>,
    removed_ids: &[i32],
) -> Result<(), ServiceError>
where
    I: ChildInput,
    C: ConnectionTrait,
    <I::Entity as EntityTrait>::Model: IntoActiveModel<I::ActiveModel>,
{
    let referenced: Vec<i32> = items
        .iter()
        .filter_map(|item| item.id())
        .chain(removed_ids.iter().copied())
        .collect();

    if !referenced.is_empty() {
        let owned: HashSet<i32> = I::Entity::find()
            .select_only()
            .column(I::id_column())
            .filter(I::parent_column().eq(parent_id))
            .into_tuple::<i32>()
            .all(conn)
            .await?
            .into_iter()
            .collect();

        if let Some(foreign) = referenced.iter().find(|id| !owned.contains(id)) {
            return Err(ServiceError::ValidationError(format!(
                "{} {} does not belong to parent {}",
                I::LABEL,
                foreign,
                parent_id
            )));
        }

        let removed: HashSet<i32> = removed_ids.iter().copied().collect();
        if let Some(both) = items.iter().filter_map(|item| item.id()).find(|id| removed.contains(id)) {
            return Err(ServiceError::ValidationError(format!(
                "{} {} is both updated and removed",
                I::LABEL,
                both
            )));
        }
    }

    if !removed_ids.is_empty() {
        I::Entity::delete_many()
            .filter(I::parent_column().eq(parent_id))
            .filter(I::id_column().is_in(removed_ids.to_vec()))
            .exec(conn)
            .await?;
    }

    for item in items {
        let is_update = item.id().is_some();
        let active = item.into_active_model(parent_id);
        if is_update {
            active.update(conn).await?;
        } else {
            active.insert(conn).await?;
        }
    }

    Ok(())
}

/// Deletes every child of `parent_id`
pub async fn delete_children<I, C>(conn: &C, parent_id: i32) -> Result<u64, ServiceError>
where
    I: ChildInput,
    C: ConnectionTrait,
{
    let result = I::Entity::delete_many()
        .filter(I::parent_column().eq(parent_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
