use super::CatalogCommandService;
use super::service::ACTION_UPDATE;
use crate::application::{
    commands::audit::LogEvent,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::{audit::EntityType, record::Record, user::UserId};

pub struct UpdateEntityCommand {
    pub entity: EntityType,
    pub id: i64,
    pub changes: Record,
}

impl CatalogCommandService {
    /// Applies `changes` and records before/after snapshots of the row.
    pub async fn update(&self, actor: UserId, command: UpdateEntityCommand) -> ApplicationResult<()> {
        let UpdateEntityCommand { entity, id, changes } = command;
        if changes.is_empty() {
            return Err(ApplicationError::validation("no fields provided for update"));
        }

        let before = self
            .store
            .find(entity, id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("{entity} #{id} not found")))?;

        self.store.update(entity, id, changes).await?;
        let after = self.store.find(entity, id).await?;

        let event = LogEvent::new(ACTION_UPDATE, actor.into(), format!("updated {entity} #{id}"))
            .on(entity, id)
            .snapshots(Some(before.to_json()), after.map(|row| row.to_json()));
        self.record(event).await?;

        Ok(())
    }
}
