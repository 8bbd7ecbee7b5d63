use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{DonorId, NotificationId, OrganType};

/// Log entry recording that a donor offered a specific pledged organ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestNotification {
    pub id: NotificationId,
    pub donor: DonorId,
    pub organ: OrganType,
    pub created_at: DateTime<Utc>,
}

impl InterestNotification {
    pub fn new(
        id: impl Into<String>,
        donor: DonorId,
        organ: OrganType,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: NotificationId::new(id),
            donor,
            organ,
            created_at,
        }
    }
}
