use uuid::Uuid;

use crate::{
    api::error,
    modules::wall::{
        model::{NewComment, NewPost},
        schema::{CommentEntity, PostEntity},
    },
};

#[async_trait::async_trait]
pub trait WallRepository {
    /// Newest first.
    async fn find_posts_by_authors(
        &self,
        author_ids: &[Uuid],
        limit: i64,
    ) -> Result<Vec<PostEntity>, error::SystemError>;

    async fn find_post_by_id(&self, post_id: i64)
        -> Result<Option<PostEntity>, error::SystemError>;

    async fn create_post(&self, post: &NewPost) -> Result<PostEntity, error::SystemError>;

    async fn count_likes(&self, post_id: i64) -> Result<i64, error::SystemError>;

    async fn has_liked(&self, post_id: i64, user_id: &Uuid) -> Result<bool, error::SystemError>;

    async fn insert_like(&self, post_id: i64, user_id: &Uuid) -> Result<(), error::SystemError>;

    async fn delete_like(&self, post_id: i64, user_id: &Uuid) -> Result<(), error::SystemError>;

    async fn count_comments(&self, post_id: i64) -> Result<i64, error::SystemError>;

    /// Oldest first.
    async fn find_comments(&self, post_id: i64) -> Result<Vec<CommentEntity>, error::SystemError>;

    async fn create_comment(
        &self,
        comment: &NewComment,
    ) -> Result<CommentEntity, error::SystemError>;
}
