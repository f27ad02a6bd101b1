use super::CatalogCommandService;
use super::service::ACTION_CREATE;
use crate::application::{
    commands::audit::LogEvent,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::{audit::EntityType, record::Record, user::UserId};

pub struct CreateEntityCommand {
    pub entity: EntityType,
    pub data: Record,
}

impl CatalogCommandService {
    /// Inserts the row and returns its id.
    pub async fn create(&self, actor: UserId, command: CreateEntityCommand) -> ApplicationResult<i64> {
        let CreateEntityCommand { entity, data } = command;
        if data.is_empty() {
            return Err(ApplicationError::validation(format!(
                "no fields provided for {entity}"
            )));
        }

        let id = self.store.insert(entity, data).await?;
        let created = self.store.find(entity, id).await?;

        let event = LogEvent::new(ACTION_CREATE, actor.into(), format!("created {entity} #{id}"))
            .on(entity, id)
            .snapshots(None, created.map(|row| row.to_json()));
        self.record(event).await?;

        Ok(id)
    }
}
