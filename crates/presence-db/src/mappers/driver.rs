//! Driver entity <-> model mapper

use presence_core::{Driver, Role, UserId};

use crate::models::DriverModel;

/// Convert DriverModel to Driver entity.
/// An unrecognized role column falls back to `Rider` so one bad row never
/// poisons a scan.
impl From<DriverModel> for Driver {
    fn from(model: DriverModel) -> Self {
        Driver {
            id: UserId::new(model.id),
            name: model.name,
            phone: model.phone,
            role: model.role.parse().unwrap_or(Role::Rider),
            vehicle: model.vehicle,
            is_online: model.is_online,
            last_active_at: model.last_active_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
