//! Client service - client records and their plan enrollments

use std::sync::Arc;

use ledger_db::{
    ClientFields, ClientRepository, ClientRow, CreateEnrollment, EnrollmentRepository,
    SubscriptionRepository,
};
use ledger_types::{
    Client, ClientId, ClientPatch, ClientProfile, Enrollment, EnrollmentStatus, SubscriptionId,
};
use tracing::{debug, info, instrument};

use crate::validation::{self, FieldError};
use crate::{LedgerConfig, LedgerError};

/// Client service
///
/// Owns the client invariants:
/// - email is unique across clients, checked right before every write and
///   backed by the store's UNIQUE constraint
/// - enrollments reference an existing client and plan
pub struct ClientService<C, S, E>
where
    C: ClientRepository,
    S: SubscriptionRepository,
    E: EnrollmentRepository,
{
    clients: Arc<C>,
    subscriptions: Arc<S>,
    enrollments: Arc<E>,
    config: LedgerConfig,
}

impl<C, S, E> ClientService<C, S, E>
where
    C: ClientRepository,
    S: SubscriptionRepository,
    E: EnrollmentRepository,
{
    /// Create a new client service
    pub fn new(clients: Arc<C>, subscriptions: Arc<S>, enrollments: Arc<E>, config: LedgerConfig) -> Self {
        Self {
            clients,
            subscriptions,
            enrollments,
            config,
        }
    }

    /// Register a new client
    #[instrument(skip_all, fields(email = %profile.email))]
    pub async fn create(&self, profile: ClientProfile) -> Result<Client, LedgerError> {
        validation::validate_client_profile(&profile, self.config.client_rules())?;
        self.ensure_email_available(&profile.email, None).await?;

        let row = self
            .clients
            .create(to_fields(profile))
            .await
            .map_err(LedgerError::from_client_write)?;

        let client = Client::from(row);
        info!(client_id = %client.id, "Client created");
        Ok(client)
    }

    /// List every client
    pub async fn list(&self) -> Result<Vec<Client>, LedgerError> {
        let rows = self.clients.list().await?;
        Ok(rows.into_iter().map(Client::from).collect())
    }

    /// Get a client by ID
    pub async fn get(&self, id: ClientId) -> Result<Client, LedgerError> {
        self.find(id).await.map(Client::from)
    }

    /// Delete a client. Its transactions and enrollments go with it.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ClientId) -> Result<ClientId, LedgerError> {
        if !self.clients.delete(id.0).await? {
            return Err(LedgerError::ClientNotFound);
        }

        info!(client_id = %id, "Client deleted");
        Ok(id)
    }

    /// Merge-patch a client: only fields present in `patch` change
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: ClientId, patch: ClientPatch) -> Result<Client, LedgerError> {
        let existing = Client::from(self.find(id).await?);
        let profile = patch.apply(existing.profile());
        self.write(existing, profile).await
    }

    /// Replace every field of a client. Omitted optional fields are cleared.
    #[instrument(skip(self, profile))]
    pub async fn replace(&self, id: ClientId, profile: ClientProfile) -> Result<Client, LedgerError> {
        let existing = Client::from(self.find(id).await?);
        self.write(existing, profile).await
    }

    /// Enroll a client into a plan.
    ///
    /// Not idempotent: every call inserts a new enrollment row, even when an
    /// identical one already exists.
    #[instrument(skip(self))]
    pub async fn subscribe(
        &self,
        client_id: ClientId,
        subscription_id: SubscriptionId,
        status: EnrollmentStatus,
    ) -> Result<Enrollment, LedgerError> {
        self.find(client_id).await?;
        self.subscriptions
            .find_by_id(subscription_id.0)
            .await?
            .ok_or(LedgerError::SubscriptionNotFound)?;

        let row = self
            .enrollments
            .create(CreateEnrollment {
                client_id: client_id.0,
                subscription_id: subscription_id.0,
                status: status.as_str().to_string(),
            })
            .await?;

        let enrollment = Enrollment::try_from(row)?;
        info!(enrollment_id = %enrollment.id, "Client enrolled");
        Ok(enrollment)
    }

    /// List a client's enrollments whose status equals `status`, or all of
    /// them when no status is given
    pub async fn list_subscriptions(
        &self,
        client_id: ClientId,
        status: Option<EnrollmentStatus>,
    ) -> Result<Vec<Enrollment>, LedgerError> {
        self.find(client_id).await?;

        let rows = self
            .enrollments
            .find_by_client_id(client_id.0, status.map(|s| s.as_str()))
            .await?;

        rows.into_iter()
            .map(|row| Enrollment::try_from(row).map_err(LedgerError::from))
            .collect()
    }

    async fn find(&self, id: ClientId) -> Result<ClientRow, LedgerError> {
        self.clients
            .find_by_id(id.0)
            .await?
            .ok_or(LedgerError::ClientNotFound)
    }

    async fn write(&self, existing: Client, profile: ClientProfile) -> Result<Client, LedgerError> {
        validation::validate_client_profile(&profile, self.config.client_rules())?;
        if profile.email != existing.email {
            self.ensure_email_available(&profile.email, Some(existing.id))
                .await?;
        }

        let row = self
            .clients
            .update(existing.id.0, to_fields(profile))
            .await
            .map_err(LedgerError::from_client_write)?
            .ok_or(LedgerError::ClientNotFound)?;

        debug!(client_id = %existing.id, "Client updated");
        Ok(Client::from(row))
    }

    /// Fails with `duplicate_email` if a client other than `owner` holds `email`.
    ///
    /// Not atomic with the following write; the store constraint settles races.
    async fn ensure_email_available(
        &self,
        email: &str,
        owner: Option<ClientId>,
    ) -> Result<(), LedgerError> {
        match self.clients.find_by_email(email).await? {
            Some(row) if Some(ClientId(row.id)) != owner => Err(FieldError::duplicate_email().into()),
            _ => Ok(()),
        }
    }
}

fn to_fields(profile: ClientProfile) -> ClientFields {
    ClientFields {
        name: profile.name,
        age: profile.age,
        email: profile.email,
        phone: profile.phone,
    }
}
