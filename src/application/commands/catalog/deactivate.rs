use super::CatalogCommandService;
use super::service::ACTION_DEACTIVATE;
use crate::application::{
    commands::audit::LogEvent,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::{audit::EntityType, user::UserId};

pub struct DeactivateEntityCommand {
    pub entity: EntityType,
    pub id: i64,
}

impl CatalogCommandService {
    /// Soft delete: the row stays, its status flag is cleared.
    pub async fn deactivate(
        &self,
        actor: UserId,
        command: DeactivateEntityCommand,
    ) -> ApplicationResult<()> {
        let DeactivateEntityCommand { entity, id } = command;
        let before = self
            .store
            .find(entity, id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("{entity} #{id} not found")))?;

        self.store.deactivate(entity, id).await?;
        let after = self.store.find(entity, id).await?;

        let event = LogEvent::new(
            ACTION_DEACTIVATE,
            actor.into(),
            format!("deactivated {entity} #{id}"),
        )
        .on(entity, id)
        .snapshots(Some(before.to_json()), after.map(|row| row.to_json()));
        self.record(event).await?;

        Ok(())
    }
}
