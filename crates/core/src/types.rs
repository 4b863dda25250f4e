/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// User ids issued by the hosted auth provider are UUIDs.
pub type UserId = uuid::Uuid;
