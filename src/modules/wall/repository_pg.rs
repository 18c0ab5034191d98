use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    api::error,
    modules::wall::{
        model::{NewComment, NewPost},
        repository::WallRepository,
        schema::{CommentEntity, PostEntity},
    },
};

const POST_COLUMNS: &str = r#"
    id,
    COALESCE(contenu, '') AS contenu,
    auteur_id,
    auteur_nom,
    auteur_prenom,
    type_post,
    images::text AS images,
    bien_id::bigint AS bien_id,
    metadata::text AS metadata,
    created_at
"#;

const COMMENT_COLUMNS: &str =
    "id, post_id, auteur_id, auteur_nom, auteur_prenom, COALESCE(contenu, '') AS contenu, created_at";

#[derive(Clone)]
pub struct WallRepositoryPg {
    pool: sqlx::PgPool,
}

impl WallRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl WallRepository for WallRepositoryPg {
    async fn find_posts_by_authors(
        &self,
        author_ids: &[Uuid],
        limit: i64,
    ) -> Result<Vec<PostEntity>, error::SystemError> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE auteur_id = ANY($1)
            ORDER BY created_at DESC
            LIMIT $2
            "#
        );
        let posts = sqlx::query_as::<_, PostEntity>(&sql)
            .bind(author_ids)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn find_post_by_id(
        &self,
        post_id: i64,
    ) -> Result<Option<PostEntity>, error::SystemError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        let post = sqlx::query_as::<_, PostEntity>(&sql)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn create_post(&self, post: &NewPost) -> Result<PostEntity, error::SystemError> {
        let images = (!post.images.is_empty()).then(|| Json(&post.images));
        let sql = format!(
            r#"
            INSERT INTO posts (contenu, auteur_id, auteur_nom, auteur_prenom, type_post, images)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {POST_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, PostEntity>(&sql)
            .bind(&post.contenu)
            .bind(post.auteur_id)
            .bind(&post.auteur_nom)
            .bind(&post.auteur_prenom)
            .bind(post.type_post)
            .bind(images)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn count_likes(&self, post_id: i64) -> Result<i64, error::SystemError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes_posts WHERE post_id = $1")
                .bind(post_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn has_liked(&self, post_id: i64, user_id: &Uuid) -> Result<bool, error::SystemError> {
        let liked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM likes_posts WHERE post_id = $1 AND user_id = $2)",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(liked)
    }

    async fn insert_like(&self, post_id: i64, user_id: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query("INSERT INTO likes_posts (post_id, user_id) VALUES ($1, $2)")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_like(&self, post_id: i64, user_id: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query("DELETE FROM likes_posts WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count_comments(&self, post_id: i64) -> Result<i64, error::SystemError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM commentaires_posts WHERE post_id = $1",
        )
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn find_comments(&self, post_id: i64) -> Result<Vec<CommentEntity>, error::SystemError> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM commentaires_posts WHERE post_id = $1 ORDER BY created_at ASC"
        );
        let comments = sqlx::query_as::<_, CommentEntity>(&sql)
            .bind(post_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(comments)
    }

    async fn create_comment(
        &self,
        comment: &NewComment,
    ) -> Result<CommentEntity, error::SystemError> {
        let sql = format!(
            r#"
            INSERT INTO commentaires_posts (post_id, auteur_id, auteur_nom, auteur_prenom, contenu)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COMMENT_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, CommentEntity>(&sql)
            .bind(comment.post_id)
            .bind(comment.auteur_id)
            .bind(&comment.auteur_nom)
            .bind(&comment.auteur_prenom)
            .bind(&comment.contenu)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }
}
