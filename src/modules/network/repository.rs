use uuid::Uuid;

use crate::api::error;
use crate::modules::network::{
    model::NewContactRequest,
    schema::{ContactRequestEntity, FriendRelationEntity, RequestStatus},
};

#[async_trait::async_trait]
pub trait FriendRepository {
    /// Ids on the other side of every friend relation of `user_id`.
    async fn find_friend_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError>;

    async fn find_relation(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<Option<FriendRelationEntity>, error::SystemError>;

    /// Delegates to the store's `creer_relation_amitie` procedure.
    async fn create_relation_via_procedure(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<(), error::SystemError>;

    /// Plain insert; callers pass the canonical pair.
    async fn insert_relation(&self, user1: &Uuid, user2: &Uuid) -> Result<(), error::SystemError>;
}

#[async_trait::async_trait]
pub trait ContactRequestRepository {
    /// Users linked to `user_id` by an accepted request, in either direction.
    async fn find_accepted_contact_ids(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<Uuid>, error::SystemError>;

    async fn find_pending_between(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<Option<ContactRequestEntity>, error::SystemError>;

    async fn find_request_by_id(
        &self,
        request_id: i64,
    ) -> Result<Option<ContactRequestEntity>, error::SystemError>;

    async fn find_received_pending(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<ContactRequestEntity>, error::SystemError>;

    async fn find_sent(&self, user_id: &Uuid)
        -> Result<Vec<ContactRequestEntity>, error::SystemError>;

    async fn create_request(
        &self,
        request: &NewContactRequest,
    ) -> Result<ContactRequestEntity, error::SystemError>;

    async fn update_request_status(
        &self,
        request_id: i64,
        status: RequestStatus,
    ) -> Result<(), error::SystemError>;
}

pub trait NetworkRepo: FriendRepository + ContactRequestRepository + Send + Sync {}

impl<T> NetworkRepo for T where T: FriendRepository + ContactRequestRepository + Send + Sync {}
