//! In-memory repositories used by service and handler tests.

use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, HttpMessage,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};
use uuid::Uuid;

use crate::{
    api::error,
    configs::Cache,
    modules::{
        conversation::{
            handle::ConversationSvc, repository::ConversationRepository,
            schema::ConversationEntity,
        },
        listings::{
            handle::ListingSvc,
            model::ListingFilter,
            repository::ListingRepository,
            schema::{ListingCommentEntity, ListingEntity, ListingPhotoEntity},
        },
        media::{service::MediaService, storage::ObjectStore},
        message::{
            handle::MessageSvc, model::InsertMessage, repository::MessageRepository,
            schema::MessageEntity,
        },
        network::{
            handle::NetworkSvc,
            model::NewContactRequest,
            repository::{ContactRequestRepository, FriendRepository},
            schema::{ContactRequestEntity, FriendRelationEntity, RequestStatus},
        },
        notification::{
            handle::NotificationSvc, model::NewNotification,
            repository::NotificationRepository, schema::NotificationEntity,
        },
        profile::{
            model::InsertProfile, repository::ProfileRepository, schema::ProfileEntity,
            service::ProfileService,
        },
        wall::{
            handle::WallSvc,
            model::{NewComment, NewPost},
            repository::WallRepository,
            schema::{CommentEntity, PostEntity},
        },
    },
    utils::{canonical_pair, AuthRole, Claims},
};

/// Store calls that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Failure {
    Notifications,
    RelationProcedure,
    ConversationProcedure,
    AcceptedContacts,
    PostCounts,
}

pub fn profile(nom: &str, prenom: &str, role: &str) -> ProfileEntity {
    ProfileEntity {
        id: Uuid::now_v7(),
        email: format!("{}@socialimmo.test", prenom.to_lowercase()),
        nom: nom.to_string(),
        prenom: prenom.to_string(),
        role: role.to_string(),
        statut_externe: None,
        societe: None,
        ville: Some("Lyon".to_string()),
        code_postal: Some("69002".to_string()),
        region: None,
        profile_completed: true,
        actif: true,
        created_at: Utc::now(),
    }
}

/// An active sale listing; `id` and timestamps are assigned on insert.
pub fn listing(
    reference: &str,
    ville: &str,
    prix: f64,
    surface: Option<f64>,
    kind: &str,
) -> ListingEntity {
    ListingEntity {
        id: 0,
        reference: reference.to_string(),
        client_reference: "AG-1".to_string(),
        titre: format!("Bien {reference}"),
        texte: String::new(),
        code_type: "1100".to_string(),
        contact_nom: String::new(),
        contact_email: String::new(),
        contact_telephone: String::new(),
        code_postal: "69002".to_string(),
        ville: ville.to_string(),
        nb_pieces: Some(3),
        nb_chambres: Some(2),
        surface,
        annee_construction: None,
        dpe_etiquette_conso: "C".to_string(),
        dpe_valeur_conso: None,
        dpe_etiquette_ges: String::new(),
        type_transaction: kind.to_string(),
        prix,
        honoraires_payeurs: String::new(),
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([90, 140, 200]));
    let mut buf = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img).write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn simulated(what: &str) -> error::SystemError {
    error::SystemError::InternalError(format!("simulated {what} failure").into())
}

#[derive(Default)]
struct State {
    profiles: Vec<ProfileEntity>,
    notifications: Vec<NotificationEntity>,
    requests: Vec<ContactRequestEntity>,
    relations: Vec<FriendRelationEntity>,
    posts: Vec<PostEntity>,
    likes: Vec<(i64, Uuid)>,
    comments: Vec<CommentEntity>,
    conversations: Vec<ConversationEntity>,
    messages: Vec<MessageEntity>,
    listings: Vec<ListingEntity>,
    listing_photos: Vec<ListingPhotoEntity>,
    listing_comments: Vec<ListingCommentEntity>,
    favorites: Vec<(Uuid, i64)>,
    next_id: i64,
    clock: Option<DateTime<Utc>>,
    procedure_calls: Vec<(Uuid, Uuid)>,
    failures: HashSet<Failure>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Strictly increasing timestamps so ordering assertions stay deterministic.
    fn tick(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.clock {
            if now <= last {
                now = last + chrono::Duration::microseconds(1);
            }
        }
        self.clock = Some(now);
        now
    }

    fn check(&self, failure: Failure) -> Result<(), error::SystemError> {
        if self.failures.contains(&failure) {
            return Err(simulated(&format!("{failure:?}")));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    fn with<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        f(&mut self.state.lock().unwrap())
    }

    pub fn fail(&self, failure: Failure) {
        self.with(|s| s.failures.insert(failure));
    }

    pub fn insert_profile(&self, profile: ProfileEntity) -> ProfileEntity {
        self.with(|s| s.profiles.push(profile.clone()));
        profile
    }

    pub fn remove_profile(&self, id: Uuid) {
        self.with(|s| s.profiles.retain(|p| p.id != id));
    }

    pub fn profile(&self, id: Uuid) -> Option<ProfileEntity> {
        self.with(|s| s.profiles.iter().find(|p| p.id == id).cloned())
    }

    pub fn notifications(&self) -> Vec<NotificationEntity> {
        self.with(|s| s.notifications.clone())
    }

    pub fn request(&self, id: i64) -> Option<ContactRequestEntity> {
        self.with(|s| s.requests.iter().find(|r| r.id == id).cloned())
    }

    pub fn insert_relation_row(&self, user1: Uuid, user2: Uuid) {
        self.with(|s| {
            let created_at = s.tick();
            s.relations.push(FriendRelationEntity { user1_id: user1, user2_id: user2, created_at });
        });
    }

    pub fn relations(&self) -> Vec<(Uuid, Uuid)> {
        self.with(|s| s.relations.iter().map(|r| (r.user1_id, r.user2_id)).collect())
    }

    pub fn insert_listing(&self, mut listing: ListingEntity) -> ListingEntity {
        self.with(|s| {
            listing.id = s.next_id();
            listing.created_at = s.tick();
            listing.updated_at = listing.created_at;
            s.listings.push(listing.clone());
        });
        listing
    }

    pub fn insert_listing_photo(&self, annonce_id: i64, url: &str, ordre: i32) {
        self.with(|s| {
            let id = s.next_id();
            s.listing_photos.push(ListingPhotoEntity { id, annonce_id, url: url.to_string(), ordre });
        });
    }

    /// Links a post to a listing the way rows written by other clients are.
    pub fn attach_listing(&self, post_id: i64, bien_id: i64, metadata: &str) {
        self.with(|s| {
            if let Some(post) = s.posts.iter_mut().find(|p| p.id == post_id) {
                post.bien_id = Some(bien_id);
                post.metadata = Some(metadata.to_string());
            }
        });
    }

    pub fn procedure_calls(&self) -> usize {
        self.with(|s| s.procedure_calls.len())
    }

    /// Arguments of every store procedure call, in call order.
    pub fn procedure_args(&self) -> Vec<(Uuid, Uuid)> {
        self.with(|s| s.procedure_calls.clone())
    }
}

#[async_trait::async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ProfileEntity>, error::SystemError> {
        Ok(self.profile(*id))
    }

    async fn find_active_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<ProfileEntity>, error::SystemError> {
        Ok(self.with(|s| {
            s.profiles.iter().filter(|p| p.actif && ids.contains(&p.id)).cloned().collect()
        }))
    }

    async fn find_all_active(&self) -> Result<Vec<ProfileEntity>, error::SystemError> {
        let mut profiles: Vec<ProfileEntity> =
            self.with(|s| s.profiles.iter().filter(|p| p.actif).cloned().collect());
        profiles.sort_by(|a, b| a.nom.cmp(&b.nom));
        Ok(profiles)
    }

    async fn create(&self, new: &InsertProfile) -> Result<ProfileEntity, error::SystemError> {
        let entity = ProfileEntity {
            id: new.id,
            email: new.email.clone(),
            nom: new.nom.clone(),
            prenom: new.prenom.clone(),
            role: "externe".to_string(),
            statut_externe: Some(new.statut_externe.clone()),
            societe: new.societe.clone(),
            ville: Some(new.ville.clone()),
            code_postal: Some(new.code_postal.clone()),
            region: Some(new.region.clone()),
            profile_completed: true,
            actif: true,
            created_at: Utc::now(),
        };
        Ok(self.insert_profile(entity))
    }
}

#[async_trait::async_trait]
impl NotificationRepository for MemoryStore {
    async fn create_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<(), error::SystemError> {
        self.with(|s| {
            s.check(Failure::Notifications)?;
            let (id, created_at) = (s.next_id(), s.tick());
            s.notifications.push(NotificationEntity {
                id,
                user_id: notification.user_id,
                _type: notification.kind.as_str().to_string(),
                titre: notification.titre.clone(),
                contenu: Some(notification.contenu.clone()),
                related_id: notification.related_id,
                lu: false,
                created_at,
            });
            Ok(())
        })
    }

    async fn find_notifications_by_user(
        &self,
        user_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<NotificationEntity>, error::SystemError> {
        let mut notes: Vec<NotificationEntity> = self.with(|s| {
            s.notifications.iter().filter(|n| n.user_id == *user_id).cloned().collect()
        });
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notes.truncate(limit as usize);
        Ok(notes)
    }

    async fn mark_all_read(&self, user_id: &Uuid) -> Result<u64, error::SystemError> {
        Ok(self.with(|s| {
            let mut updated = 0;
            for n in s.notifications.iter_mut().filter(|n| n.user_id == *user_id && !n.lu) {
                n.lu = true;
                updated += 1;
            }
            updated
        }))
    }
}

#[async_trait::async_trait]
impl FriendRepository for MemoryStore {
    async fn find_friend_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        Ok(self.with(|s| {
            s.relations
                .iter()
                .filter_map(|r| match (r.user1_id == *user_id, r.user2_id == *user_id) {
                    (true, _) => Some(r.user2_id),
                    (_, true) => Some(r.user1_id),
                    _ => None,
                })
                .collect()
        }))
    }

    async fn find_relation(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<Option<FriendRelationEntity>, error::SystemError> {
        let (user1, user2) = canonical_pair(*user_a, *user_b);
        Ok(self.with(|s| {
            s.relations.iter().find(|r| r.user1_id == user1 && r.user2_id == user2).cloned()
        }))
    }

    async fn create_relation_via_procedure(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<(), error::SystemError> {
        self.with(|s| s.check(Failure::RelationProcedure))?;
        self.with(|s| s.procedure_calls.push((*user_a, *user_b)));
        let (user1, user2) = canonical_pair(*user_a, *user_b);
        self.insert_relation(&user1, &user2).await
    }

    async fn insert_relation(&self, user1: &Uuid, user2: &Uuid) -> Result<(), error::SystemError> {
        let exists = self.relations().contains(&(*user1, *user2));
        if !exists {
            self.insert_relation_row(*user1, *user2);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ContactRequestRepository for MemoryStore {
    async fn find_accepted_contact_ids(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<Uuid>, error::SystemError> {
        self.with(|s| {
            s.check(Failure::AcceptedContacts)?;
            let mut ids = Vec::new();
            for r in s.requests.iter().filter(|r| r.statut == RequestStatus::Accepte.as_str()) {
                let other = match (r.expediteur_id == *user_id, r.destinataire_id == *user_id) {
                    (true, _) => r.destinataire_id,
                    (_, true) => r.expediteur_id,
                    _ => continue,
                };
                if !ids.contains(&other) {
                    ids.push(other);
                }
            }
            Ok(ids)
        })
    }

    async fn find_pending_between(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<Option<ContactRequestEntity>, error::SystemError> {
        Ok(self.with(|s| {
            s.requests
                .iter()
                .find(|r| {
                    r.is_pending()
                        && ((r.expediteur_id == *user_a && r.destinataire_id == *user_b)
                            || (r.expediteur_id == *user_b && r.destinataire_id == *user_a))
                })
                .cloned()
        }))
    }

    async fn find_request_by_id(
        &self,
        request_id: i64,
    ) -> Result<Option<ContactRequestEntity>, error::SystemError> {
        Ok(self.request(request_id))
    }

    async fn find_received_pending(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<ContactRequestEntity>, error::SystemError> {
        Ok(self.with(|s| {
            s.requests
                .iter()
                .rev()
                .filter(|r| r.destinataire_id == *user_id && r.is_pending())
                .cloned()
                .collect()
        }))
    }

    async fn find_sent(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<ContactRequestEntity>, error::SystemError> {
        Ok(self.with(|s| {
            s.requests.iter().rev().filter(|r| r.expediteur_id == *user_id).cloned().collect()
        }))
    }

    async fn create_request(
        &self,
        request: &NewContactRequest,
    ) -> Result<ContactRequestEntity, error::SystemError> {
        Ok(self.with(|s| {
            let entity = ContactRequestEntity {
                id: s.next_id(),
                expediteur_id: request.expediteur_id,
                destinataire_id: request.destinataire_id,
                statut: RequestStatus::EnAttente.as_str().to_string(),
                message: Some(request.message.clone()),
                expediteur_nom: Some(request.expediteur_nom.clone()),
                expediteur_prenom: Some(request.expediteur_prenom.clone()),
                destinataire_nom: Some(request.destinataire_nom.clone()),
                destinataire_prenom: Some(request.destinataire_prenom.clone()),
                created_at: s.tick(),
            };
            s.requests.push(entity.clone());
            entity
        }))
    }

    async fn update_request_status(
        &self,
        request_id: i64,
        status: RequestStatus,
    ) -> Result<(), error::SystemError> {
        self.with(|s| match s.requests.iter_mut().find(|r| r.id == request_id) {
            Some(r) => {
                r.statut = status.as_str().to_string();
                Ok(())
            }
            None => Err(error::SystemError::not_found("Contact request not found")),
        })
    }
}

#[async_trait::async_trait]
impl WallRepository for MemoryStore {
    async fn find_posts_by_authors(
        &self,
        author_ids: &[Uuid],
        limit: i64,
    ) -> Result<Vec<PostEntity>, error::SystemError> {
        let mut posts: Vec<PostEntity> = self.with(|s| {
            s.posts.iter().filter(|p| author_ids.contains(&p.auteur_id)).cloned().collect()
        });
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(limit as usize);
        Ok(posts)
    }

    async fn find_post_by_id(
        &self,
        post_id: i64,
    ) -> Result<Option<PostEntity>, error::SystemError> {
        Ok(self.with(|s| s.posts.iter().find(|p| p.id == post_id).cloned()))
    }

    async fn create_post(&self, post: &NewPost) -> Result<PostEntity, error::SystemError> {
        let images = if post.images.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&post.images)?)
        };

        Ok(self.with(|s| {
            let entity = PostEntity {
                id: s.next_id(),
                contenu: post.contenu.clone(),
                auteur_id: post.auteur_id,
                auteur_nom: Some(post.auteur_nom.clone()),
                auteur_prenom: Some(post.auteur_prenom.clone()),
                type_post: Some(post.type_post.to_string()),
                images,
                bien_id: None,
                metadata: None,
                created_at: s.tick(),
            };
            s.posts.push(entity.clone());
            entity
        }))
    }

    async fn count_likes(&self, post_id: i64) -> Result<i64, error::SystemError> {
        self.with(|s| {
            s.check(Failure::PostCounts)?;
            Ok(s.likes.iter().filter(|(p, _)| *p == post_id).count() as i64)
        })
    }

    async fn has_liked(&self, post_id: i64, user_id: &Uuid) -> Result<bool, error::SystemError> {
        self.with(|s| {
            s.check(Failure::PostCounts)?;
            Ok(s.likes.contains(&(post_id, *user_id)))
        })
    }

    async fn insert_like(&self, post_id: i64, user_id: &Uuid) -> Result<(), error::SystemError> {
        self.with(|s| s.likes.push((post_id, *user_id)));
        Ok(())
    }

    async fn delete_like(&self, post_id: i64, user_id: &Uuid) -> Result<(), error::SystemError> {
        self.with(|s| s.likes.retain(|like| *like != (post_id, *user_id)));
        Ok(())
    }

    async fn count_comments(&self, post_id: i64) -> Result<i64, error::SystemError> {
        self.with(|s| {
            s.check(Failure::PostCounts)?;
            Ok(s.comments.iter().filter(|c| c.post_id == post_id).count() as i64)
        })
    }

    async fn find_comments(&self, post_id: i64) -> Result<Vec<CommentEntity>, error::SystemError> {
        Ok(self.with(|s| s.comments.iter().filter(|c| c.post_id == post_id).cloned().collect()))
    }

    async fn create_comment(
        &self,
        comment: &NewComment,
    ) -> Result<CommentEntity, error::SystemError> {
        Ok(self.with(|s| {
            let entity = CommentEntity {
                id: s.next_id(),
                post_id: comment.post_id,
                auteur_id: comment.auteur_id,
                auteur_nom: Some(comment.auteur_nom.clone()),
                auteur_prenom: Some(comment.auteur_prenom.clone()),
                contenu: comment.contenu.clone(),
                created_at: s.tick(),
            };
            s.comments.push(entity.clone());
            entity
        }))
    }
}

#[async_trait::async_trait]
impl ConversationRepository for MemoryStore {
    async fn find_by_id(
        &self,
        conversation_id: i64,
    ) -> Result<Option<ConversationEntity>, error::SystemError> {
        Ok(self.with(|s| s.conversations.iter().find(|c| c.id == conversation_id).cloned()))
    }

    async fn find_by_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<ConversationEntity>, error::SystemError> {
        let mut conversations: Vec<ConversationEntity> = self.with(|s| {
            s.conversations.iter().filter(|c| c.has_participant(user_id)).cloned().collect()
        });
        conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(conversations)
    }

    async fn get_or_create_via_procedure(
        &self,
        user_id: &Uuid,
        contact_id: &Uuid,
    ) -> Result<i64, error::SystemError> {
        self.with(|s| s.check(Failure::ConversationProcedure))?;
        self.with(|s| s.procedure_calls.push((*user_id, *contact_id)));

        let (p1, p2) = canonical_pair(*user_id, *contact_id);
        let existing = self.with(|s| {
            s.conversations
                .iter()
                .find(|c| c.participant1_id == p1 && c.participant2_id == p2)
                .map(|c| c.id)
        });
        match existing {
            Some(id) => Ok(id),
            None => Ok(self.insert(&p1, &p2).await?.id),
        }
    }

    async fn insert(
        &self,
        participant1: &Uuid,
        participant2: &Uuid,
    ) -> Result<ConversationEntity, error::SystemError> {
        Ok(self.with(|s| {
            let now = s.tick();
            let entity = ConversationEntity {
                id: s.next_id(),
                participant1_id: *participant1,
                participant2_id: *participant2,
                created_at: now,
                updated_at: now,
            };
            s.conversations.push(entity.clone());
            entity
        }))
    }

    async fn touch(&self, conversation_id: i64) -> Result<(), error::SystemError> {
        self.with(|s| {
            let now = s.tick();
            if let Some(c) = s.conversations.iter_mut().find(|c| c.id == conversation_id) {
                c.updated_at = now;
            }
        });
        Ok(())
    }
}

#[async_trait::async_trait]
impl MessageRepository for MemoryStore {
    async fn create(&self, message: &InsertMessage) -> Result<MessageEntity, error::SystemError> {
        Ok(self.with(|s| {
            let entity = MessageEntity {
                id: s.next_id(),
                conversation_id: message.conversation_id,
                expediteur_id: message.expediteur_id,
                contenu: message.contenu.clone(),
                lu: false,
                created_at: s.tick(),
            };
            s.messages.push(entity.clone());
            entity
        }))
    }

    async fn find_by_conversation(
        &self,
        conversation_id: i64,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        Ok(self.with(|s| {
            s.messages.iter().filter(|m| m.conversation_id == conversation_id).cloned().collect()
        }))
    }

    async fn find_last(
        &self,
        conversation_id: i64,
    ) -> Result<Option<MessageEntity>, error::SystemError> {
        Ok(self.with(|s| {
            s.messages.iter().rev().find(|m| m.conversation_id == conversation_id).cloned()
        }))
    }

    async fn count_unread(
        &self,
        conversation_id: i64,
        reader_id: &Uuid,
    ) -> Result<i64, error::SystemError> {
        Ok(self.with(|s| {
            s.messages
                .iter()
                .filter(|m| {
                    m.conversation_id == conversation_id && m.expediteur_id != *reader_id && !m.lu
                })
                .count() as i64
        }))
    }

    async fn count_unread_for_user(&self, user_id: &Uuid) -> Result<i64, error::SystemError> {
        Ok(self.with(|s| {
            let mine: HashSet<i64> = s
                .conversations
                .iter()
                .filter(|c| c.has_participant(user_id))
                .map(|c| c.id)
                .collect();
            s.messages
                .iter()
                .filter(|m| {
                    mine.contains(&m.conversation_id) && m.expediteur_id != *user_id && !m.lu
                })
                .count() as i64
        }))
    }

    async fn mark_read(
        &self,
        conversation_id: i64,
        reader_id: &Uuid,
    ) -> Result<u64, error::SystemError> {
        Ok(self.with(|s| {
            let mut updated = 0;
            for m in s.messages.iter_mut().filter(|m| {
                m.conversation_id == conversation_id && m.expediteur_id != *reader_id && !m.lu
            }) {
                m.lu = true;
                updated += 1;
            }
            updated
        }))
    }
}

#[async_trait::async_trait]
impl ListingRepository for MemoryStore {
    async fn find_active(
        &self,
        filter: &ListingFilter,
    ) -> Result<Vec<ListingEntity>, error::SystemError> {
        let mut listings: Vec<ListingEntity> = self.with(|s| {
            s.listings.iter().filter(|l| l.is_active && filter.matches(l)).cloned().collect()
        });
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listings)
    }

    async fn find_cities(&self) -> Result<Vec<String>, error::SystemError> {
        let mut cities: Vec<String> = self.with(|s| {
            s.listings.iter().filter(|l| l.is_active).map(|l| l.ville.clone()).collect()
        });
        cities.sort();
        cities.dedup();
        Ok(cities)
    }

    async fn find_active_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<ListingEntity>, error::SystemError> {
        Ok(self.with(|s| {
            s.listings.iter().find(|l| l.is_active && l.reference == reference).cloned()
        }))
    }

    async fn exists(&self, listing_id: i64) -> Result<bool, error::SystemError> {
        Ok(self.with(|s| s.listings.iter().any(|l| l.id == listing_id)))
    }

    async fn find_photos(
        &self,
        listing_ids: &[i64],
    ) -> Result<Vec<ListingPhotoEntity>, error::SystemError> {
        let mut photos: Vec<ListingPhotoEntity> = self.with(|s| {
            s.listing_photos
                .iter()
                .filter(|p| listing_ids.contains(&p.annonce_id))
                .cloned()
                .collect()
        });
        photos.sort_by_key(|p| (p.annonce_id, p.ordre));
        Ok(photos)
    }

    async fn find_comments(
        &self,
        listing_id: i64,
    ) -> Result<Vec<ListingCommentEntity>, error::SystemError> {
        Ok(self.with(|s| {
            s.listing_comments.iter().filter(|c| c.annonce_id == listing_id).cloned().collect()
        }))
    }

    async fn create_comment(
        &self,
        listing_id: i64,
        auteur_id: &Uuid,
        texte: &str,
    ) -> Result<ListingCommentEntity, error::SystemError> {
        Ok(self.with(|s| {
            let comment = ListingCommentEntity {
                id: s.next_id(),
                annonce_id: listing_id,
                auteur_id: *auteur_id,
                texte: texte.to_string(),
                created_at: s.tick(),
            };
            s.listing_comments.push(comment.clone());
            comment
        }))
    }

    async fn find_favorite_ids(&self, user_id: &Uuid) -> Result<Vec<i64>, error::SystemError> {
        Ok(self.with(|s| {
            s.favorites.iter().filter(|(u, _)| u == user_id).map(|(_, id)| *id).collect()
        }))
    }

    async fn insert_favorite(
        &self,
        user_id: &Uuid,
        listing_id: i64,
    ) -> Result<bool, error::SystemError> {
        Ok(self.with(|s| {
            let row = (*user_id, listing_id);
            if s.favorites.contains(&row) {
                return false;
            }
            s.favorites.push(row);
            true
        }))
    }

    async fn delete_favorite(
        &self,
        user_id: &Uuid,
        listing_id: i64,
    ) -> Result<bool, error::SystemError> {
        Ok(self.with(|s| {
            let before = s.favorites.len();
            s.favorites.retain(|row| *row != (*user_id, listing_id));
            s.favorites.len() < before
        }))
    }
}

#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

#[async_trait::async_trait]
impl Cache for MemoryCache {
    async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, error::SystemError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set_raw(
        &self,
        key: &str,
        value: Vec<u8>,
        _expiration: usize,
    ) -> Result<(), error::SystemError> {
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), error::SystemError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<Mutex<Vec<(String, Bytes)>>>,
}

impl MemoryObjectStore {
    pub fn objects(&self) -> Vec<String> {
        self.objects.lock().unwrap().iter().map(|(path, _)| path.clone()).collect()
    }
}

#[async_trait::async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        path: &str,
        data: Bytes,
        _content_type: &str,
    ) -> Result<String, error::SystemError> {
        let mut objects = self.objects.lock().unwrap();
        objects.retain(|(p, _)| p != path);
        objects.push((path.to_string(), data));
        Ok(self.public_url(path))
    }

    fn public_url(&self, path: &str) -> String {
        format!("memory://photos/{path}")
    }
}

/// Request header carrying the caller's id in handler tests.
pub const USER_HEADER: &str = "x-test-user";
/// Request header carrying the caller's token email in handler tests.
pub const EMAIL_HEADER: &str = "x-test-email";

/// Stands in for token authentication: claims are taken from [`USER_HEADER`]
/// and [`EMAIL_HEADER`]. Requests without a user id carry no claims.
pub async fn test_claims<B: MessageBody + 'static>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, actix_web::Error> {
    let header =
        |name: &str| req.headers().get(name).and_then(|h| h.to_str().ok()).map(str::to_string);
    let sub = header(USER_HEADER).and_then(|v| Uuid::parse_str(&v).ok());
    let email = header(EMAIL_HEADER);

    if let Some(sub) = sub {
        req.extensions_mut().insert(Claims {
            sub,
            iat: 0,
            exp: u64::MAX,
            aud: Some("authenticated".to_string()),
            email,
            role: AuthRole::Authenticated,
        });
    }
    next.call(req).await
}

/// Registers every service as app data, backed by `store` and `media`.
pub fn memory_services(
    store: &MemoryStore,
    media: MediaService,
) -> impl FnOnce(&mut web::ServiceConfig) {
    let shared = Arc::new(store.clone());
    move |cfg| {
        let profile =
            ProfileService::with_dependencies(shared.clone(), Arc::new(MemoryCache::default()));
        let notification = NotificationSvc::with_dependencies(shared.clone());
        let network =
            NetworkSvc::with_dependencies(shared.clone(), shared.clone(), notification.clone());
        let wall = WallSvc::with_dependencies(shared.clone(), shared.clone(), shared.clone(), media);
        let conversation =
            ConversationSvc::with_dependencies(shared.clone(), shared.clone(), shared.clone());
        let message = MessageSvc::with_dependencies(shared.clone(), shared.clone());
        let listing = ListingSvc::with_dependencies(shared.clone(), shared);

        cfg.app_data(web::Data::new(profile))
            .app_data(web::Data::new(notification))
            .app_data(web::Data::new(network))
            .app_data(web::Data::new(wall))
            .app_data(web::Data::new(conversation))
            .app_data(web::Data::new(message))
            .app_data(web::Data::new(listing));
    }
}
