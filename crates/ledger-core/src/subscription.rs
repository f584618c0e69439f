//! Subscription plan service

use std::sync::Arc;

use ledger_db::{CreateSubscription, SubscriptionRepository};
use ledger_types::{NewSubscription, Subscription};
use tracing::info;

use crate::validation;
use crate::LedgerError;

/// Subscription plan service
pub struct SubscriptionService<S: SubscriptionRepository> {
    subscriptions: Arc<S>,
}

impl<S: SubscriptionRepository> SubscriptionService<S> {
    /// Create a new subscription service
    pub fn new(subscriptions: Arc<S>) -> Self {
        Self { subscriptions }
    }

    /// Define a new plan
    pub async fn create(&self, sub: NewSubscription) -> Result<Subscription, LedgerError> {
        validation::validate_new_subscription(&sub)?;

        let row = self
            .subscriptions
            .create(CreateSubscription {
                name: sub.name,
                price: sub.price,
            })
            .await?;

        let plan = Subscription::from(row);
        info!(subscription_id = %plan.id, price = plan.price, "Subscription plan created");
        Ok(plan)
    }

    /// List every plan
    pub async fn list(&self) -> Result<Vec<Subscription>, LedgerError> {
        let rows = self.subscriptions.list().await?;
        Ok(rows.into_iter().map(Subscription::from).collect())
    }
}
