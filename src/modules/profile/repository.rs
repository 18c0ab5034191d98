use uuid::Uuid;

use crate::{
    api::error,
    modules::profile::{model::InsertProfile, schema::ProfileEntity},
};

#[async_trait::async_trait]
pub trait ProfileRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ProfileEntity>, error::SystemError>;

    async fn find_active_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<ProfileEntity>, error::SystemError>;

    /// Every active profile, ordered by last name.
    async fn find_all_active(&self) -> Result<Vec<ProfileEntity>, error::SystemError>;

    async fn create(&self, profile: &InsertProfile) -> Result<ProfileEntity, error::SystemError>;
}
