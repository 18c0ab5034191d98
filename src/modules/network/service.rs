use std::{collections::HashSet, sync::Arc};
use uuid::Uuid;

use crate::{
    api::error,
    constants::CONTACT_REQUEST_MESSAGE,
    modules::{
        network::{
            model::{ContactRequestsResponse, NewContactRequest},
            repository::NetworkRepo,
            schema::{ContactRequestEntity, RequestStatus},
        },
        notification::{
            model::NewNotification, repository::NotificationRepository,
            schema::NotificationKind, service::NotificationService,
        },
        profile::{model::ContactResponse, repository::ProfileRepository},
    },
    utils::{canonical_pair, matches_search},
};

pub struct NetworkService<R, P, N>
where
    R: NetworkRepo + ?Sized,
    P: ProfileRepository + Send + Sync + ?Sized,
    N: NotificationRepository + Send + Sync + ?Sized,
{
    network_repo: Arc<R>,
    profile_repo: Arc<P>,
    notifier: NotificationService<N>,
}

impl<R, P, N> Clone for NetworkService<R, P, N>
where
    R: NetworkRepo + ?Sized,
    P: ProfileRepository + Send + Sync + ?Sized,
    N: NotificationRepository + Send + Sync + ?Sized,
{
    fn clone(&self) -> Self {
        NetworkService {
            network_repo: self.network_repo.clone(),
            profile_repo: self.profile_repo.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

impl<R, P, N> NetworkService<R, P, N>
where
    R: NetworkRepo + ?Sized,
    P: ProfileRepository + Send + Sync + ?Sized,
    N: NotificationRepository + Send + Sync + ?Sized,
{
    pub fn with_dependencies(
        network_repo: Arc<R>,
        profile_repo: Arc<P>,
        notifier: NotificationService<N>,
    ) -> Self {
        NetworkService { network_repo, profile_repo, notifier }
    }

    pub async fn get_friends(
        &self,
        user_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<ContactResponse>, error::SystemError> {
        let friend_ids = self.network_repo.find_friend_ids(&user_id).await?;
        let friends = self.profile_repo.find_active_by_ids(&friend_ids).await?;

        Ok(friends
            .into_iter()
            .filter(|f| matches_search(search, &f.nom, &f.prenom))
            .map(ContactResponse::from)
            .collect())
    }

    /// Members the user may still invite.
    pub async fn get_directory(
        &self,
        user_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<ContactResponse>, error::SystemError> {
        let (profiles, friend_ids, sent) = tokio::try_join!(
            self.profile_repo.find_all_active(),
            self.network_repo.find_friend_ids(&user_id),
            self.network_repo.find_sent(&user_id),
        )?;

        let friends: HashSet<Uuid> = friend_ids.into_iter().collect();
        let pending: HashSet<Uuid> =
            sent.iter().filter(|r| r.is_pending()).map(|r| r.destinataire_id).collect();

        Ok(profiles
            .into_iter()
            .filter(|p| p.id != user_id && p.is_listable())
            .filter(|p| matches_search(search, &p.nom, &p.prenom))
            .filter(|p| !friends.contains(&p.id) && !pending.contains(&p.id))
            .map(ContactResponse::from)
            .collect())
    }

    pub async fn get_requests(
        &self,
        user_id: Uuid,
    ) -> Result<ContactRequestsResponse, error::SystemError> {
        let (received, sent) = tokio::try_join!(
            self.network_repo.find_received_pending(&user_id),
            self.network_repo.find_sent(&user_id),
        )?;

        Ok(ContactRequestsResponse { received, sent })
    }

    pub async fn send_request(
        &self,
        sender_id: Uuid,
        contact_id: Uuid,
    ) -> Result<ContactRequestEntity, error::SystemError> {
        if sender_id == contact_id {
            return Err(error::SystemError::bad_request("Cannot send a contact request to yourself"));
        }

        let (sender, contact) = tokio::try_join!(
            self.profile_repo.find_by_id(&sender_id),
            self.profile_repo.find_by_id(&contact_id),
        )?;

        let contact = contact
            .filter(|c| c.actif)
            .ok_or_else(|| error::SystemError::not_found("Contact not found"))?;

        let (relation, pending) = tokio::try_join!(
            self.network_repo.find_relation(&sender_id, &contact_id),
            self.network_repo.find_pending_between(&sender_id, &contact_id),
        )?;

        if relation.is_some() {
            return Err(error::SystemError::bad_request("You are already connected"));
        }

        if pending.is_some() {
            return Err(error::SystemError::bad_request("A contact request is already pending"));
        }

        let (sender_nom, sender_prenom) =
            sender.map(|s| (s.nom, s.prenom)).unwrap_or_default();

        let request = self
            .network_repo
            .create_request(&NewContactRequest {
                expediteur_id: sender_id,
                destinataire_id: contact_id,
                message: CONTACT_REQUEST_MESSAGE.to_string(),
                expediteur_nom: sender_nom.clone(),
                expediteur_prenom: sender_prenom.clone(),
                destinataire_nom: contact.nom,
                destinataire_prenom: contact.prenom,
            })
            .await?;

        self.notifier
            .notify(NewNotification {
                user_id: contact_id,
                kind: NotificationKind::DemandeAmi,
                titre: "Nouvelle demande de connexion".to_string(),
                contenu: format!("{sender_prenom} {sender_nom} souhaite se connecter avec vous"),
                related_id: None,
            })
            .await;

        Ok(request)
    }

    /// Accepts a pending request addressed to `user_id` and returns the new friend.
    pub async fn accept_request(
        &self,
        user_id: Uuid,
        request_id: i64,
    ) -> Result<ContactResponse, error::SystemError> {
        let request = self.pending_request_for(user_id, request_id, "accept").await?;

        self.network_repo.update_request_status(request_id, RequestStatus::Accepte).await?;

        if let Err(e) = self
            .network_repo
            .create_relation_via_procedure(&request.expediteur_id, &user_id)
            .await
        {
            log::warn!("creer_relation_amitie unavailable, inserting relation manually: {:?}", e);
            let (user1, user2) = canonical_pair(request.expediteur_id, user_id);
            self.network_repo.insert_relation(&user1, &user2).await?;
        }

        self.notifier
            .notify(NewNotification {
                user_id: request.expediteur_id,
                kind: NotificationKind::AmiAccepte,
                titre: "Demande acceptée".to_string(),
                contenu: format!(
                    "{} {} a accepté votre demande de connexion",
                    request.destinataire_prenom.as_deref().unwrap_or_default(),
                    request.destinataire_nom.as_deref().unwrap_or_default(),
                ),
                related_id: Some(request.id),
            })
            .await;

        let sender = self
            .profile_repo
            .find_by_id(&request.expediteur_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        Ok(ContactResponse::from(sender))
    }

    pub async fn reject_request(
        &self,
        user_id: Uuid,
        request_id: i64,
    ) -> Result<(), error::SystemError> {
        self.pending_request_for(user_id, request_id, "reject").await?;
        self.network_repo.update_request_status(request_id, RequestStatus::Refuse).await
    }

    async fn pending_request_for(
        &self,
        user_id: Uuid,
        request_id: i64,
        action: &str,
    ) -> Result<ContactRequestEntity, error::SystemError> {
        let request = self
            .network_repo
            .find_request_by_id(request_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Contact request not found"))?;

        if request.destinataire_id != user_id {
            return Err(error::SystemError::forbidden(format!(
                "You are not allowed to {action} this contact request"
            )));
        }

        if !request.is_pending() {
            return Err(error::SystemError::bad_request("Contact request is no longer pending"));
        }

        Ok(request)
    }
}
