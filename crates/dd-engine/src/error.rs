use dd_core::{AgentId, CoreError, PackageId, WarehouseId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("package {package} references unknown warehouse {warehouse}")]
    UnresolvedWarehouse {
        package:   PackageId,
        warehouse: WarehouseId,
    },

    #[error("no available agent for package {package}")]
    NoAvailableAgent { package: PackageId },

    #[error("agent id {0} is already registered")]
    DuplicateAgent(AgentId),

    #[error("package id {0} is defined more than once")]
    DuplicatePackage(PackageId),

    #[error("warehouse id {0} is defined more than once")]
    DuplicateWarehouse(WarehouseId),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type EngineResult<T> = Result<T, EngineError>;
