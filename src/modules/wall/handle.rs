use actix_multipart::{Field, Multipart};
use actix_web::{get, post, web, HttpRequest};
use futures_util::TryStreamExt;

use crate::{
    api::{error, success},
    constants::MAX_POST_LENGTH,
    middlewares::get_claims,
    modules::{
        media::model::{UploadConfig, UploadedFile},
        network::repository::ContactRequestRepository,
        profile::repository::ProfileRepository,
        wall::{
            model::{CommentModel, CreatePostModel, LikeResponse, PostResponse},
            repository::WallRepository,
            schema::CommentEntity,
            service::WallService,
        },
    },
    utils::ValidatedJson,
};

pub type WallSvc = WallService<
    dyn WallRepository + Send + Sync,
    dyn ContactRequestRepository + Send + Sync,
    dyn ProfileRepository + Send + Sync,
>;

#[get("/feed")]
pub async fn get_feed(
    wall_svc: web::Data<WallSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<PostResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let posts = wall_svc.get_feed(user_id).await?;
    Ok(success::Success::ok(Some(posts)).message("Feed retrieved successfully"))
}

#[post("/posts")]
pub async fn create_post(
    wall_svc: web::Data<WallSvc>,
    body: ValidatedJson<CreatePostModel>,
    req: HttpRequest,
) -> Result<success::Success<PostResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let CreatePostModel { contenu, images } = body.0;
    let post = wall_svc.create_post(user_id, &contenu, images).await?;
    Ok(success::Success::created(Some(post)).message("Post published"))
}

/// Reads a field into memory, giving up with `None` once it grows past `limit` bytes.
async fn read_limited(field: &mut Field, limit: usize) -> Result<Option<web::Bytes>, error::Error> {
    let mut bytes = web::BytesMut::new();
    while let Some(chunk) =
        field.try_next().await.map_err(|e| error::Error::bad_request(e.to_string()))?
    {
        if bytes.len() + chunk.len() > limit {
            return Ok(None);
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(Some(bytes.freeze()))
}

/// Collects the `contenu` text part and the first `max_files` file parts.
/// Later file parts and unknown parts are skipped without being buffered.
async fn read_photo_post(
    mut payload: Multipart,
    limits: &UploadConfig,
) -> Result<(String, Vec<UploadedFile>), error::Error> {
    let mut contenu = String::new();
    let mut files = Vec::new();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| error::Error::bad_request(e.to_string()))?
    {
        let (name, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().unwrap_or_default().to_string(),
                cd.get_filename().map(str::to_string),
            ),
            None => continue,
        };

        match (name.as_str(), filename) {
            ("contenu", None) => {
                let bytes = read_limited(&mut field, MAX_POST_LENGTH * 4)
                    .await?
                    .ok_or_else(|| error::Error::bad_request("Post is too long"))?;
                contenu = String::from_utf8(bytes.to_vec())
                    .map_err(|_| error::Error::bad_request("Post text must be UTF-8"))?;
                if contenu.chars().count() > MAX_POST_LENGTH {
                    return Err(error::Error::bad_request("Post is too long"));
                }
            }
            (_, Some(original_name)) if files.len() < limits.max_files => {
                let mime_type = field.content_type().map(|m| m.essence_str().to_string());
                let mime_type = mime_type.unwrap_or_else(|| {
                    mime_guess::from_path(&original_name).first_or_octet_stream().to_string()
                });
                let bytes = read_limited(&mut field, limits.max_file_size).await?.ok_or_else(|| {
                    error::Error::bad_request(format!(
                        "File '{}' exceeds maximum allowed size of {} bytes",
                        original_name, limits.max_file_size
                    ))
                })?;
                files.push(UploadedFile { original_name, mime_type, bytes });
            }
            _ => {}
        }
    }

    Ok((contenu, files))
}

/// Multipart body: an optional `contenu` text part and up to four `images` file parts.
#[post("/posts/photos")]
pub async fn create_photo_post(
    wall_svc: web::Data<WallSvc>,
    payload: Multipart,
    req: HttpRequest,
) -> Result<success::Success<PostResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let (contenu, files) = read_photo_post(payload, wall_svc.upload_limits()).await?;
    let post = wall_svc.create_photo_post(user_id, &contenu, files).await?;
    Ok(success::Success::created(Some(post)).message("Post published"))
}

#[post("/posts/{post_id}/like")]
pub async fn toggle_like(
    wall_svc: web::Data<WallSvc>,
    post_id: web::Path<i64>,
    req: HttpRequest,
) -> Result<success::Success<LikeResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let like = wall_svc.toggle_like(user_id, *post_id).await?;
    Ok(success::Success::ok(Some(like)))
}

#[get("/posts/{post_id}/comments")]
pub async fn list_comments(
    wall_svc: web::Data<WallSvc>,
    post_id: web::Path<i64>,
) -> Result<success::Success<Vec<CommentEntity>>, error::Error> {
    let comments = wall_svc.get_comments(*post_id).await?;
    Ok(success::Success::ok(Some(comments)))
}

#[post("/posts/{post_id}/comments")]
pub async fn add_comment(
    wall_svc: web::Data<WallSvc>,
    post_id: web::Path<i64>,
    body: ValidatedJson<CommentModel>,
    req: HttpRequest,
) -> Result<success::Success<CommentEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let comment = wall_svc.add_comment(user_id, *post_id, &body.0.contenu).await?;
    Ok(success::Success::created(Some(comment)).message("Comment added"))
}
