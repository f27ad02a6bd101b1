mod create;
mod deactivate;
mod service;
mod update;

pub use create::CreateEntityCommand;
pub use deactivate::DeactivateEntityCommand;
pub use service::CatalogCommandService;
pub use update::UpdateEntityCommand;
