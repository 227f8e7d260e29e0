use uuid::Uuid;

/// Objects with a stable identity across log lines.
pub trait ObjectWithUUID {
    fn uuid(&self) -> &Uuid;
}
