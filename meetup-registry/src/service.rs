//! Registration service.
//!
//! The boundary between untrusted submissions and whichever store was
//! configured at startup.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use meetup_core::error::Result;
use meetup_core::traits::RegistrationStore;
use meetup_core::types::{Registration, RegistrationRequest};

/// Validates submissions and forwards them to a [`RegistrationStore`].
///
/// Stateless; cloning is cheap and every clone shares the same store.
#[derive(Clone)]
pub struct RegistrationService {
    store: Arc<dyn RegistrationStore>,
}

impl RegistrationService {
    /// Creates a service backed by the given store.
    pub fn new(store: Arc<dyn RegistrationStore>) -> Self {
        Self { store }
    }

    /// Validates and stores a submission.
    ///
    /// A submission with any blank field is rejected with
    /// [`MeetupError::ValidationError`](meetup_core::MeetupError::ValidationError)
    /// before the store is touched.
    #[instrument(skip(self, request), fields(store = self.store.backend()))]
    pub async fn register(&self, request: RegistrationRequest) -> Result<Registration> {
        let candidate = match request.validate() {
            Ok(candidate) => candidate,
            Err(err) => {
                debug!(error = %err, "Rejected registration");
                return Err(err);
            }
        };

        let registration = self.store.append(candidate).await?;

        info!(
            id = %registration.id,
            name = %registration.name,
            email = %registration.email,
            company = %registration.company,
            "New registration"
        );

        Ok(registration)
    }

    /// Returns every registration, newest first.
    pub async fn list(&self) -> Result<Vec<Registration>> {
        self.store.list().await
    }

    /// Returns the number of registrations.
    pub async fn count(&self) -> Result<u64> {
        self.store.count().await
    }

    /// Returns the configured backend name.
    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use meetup_core::error::MeetupError;
    use meetup_core::types::NewRegistration;
    use test_case::test_case;

    use crate::MemoryStore;

    fn request(name: &str, email: &str, company: &str, role: &str) -> RegistrationRequest {
        RegistrationRequest {
            name: name.into(),
            email: email.into(),
            company: company.into(),
            role: role.into(),
        }
    }

    fn service() -> (RegistrationService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (RegistrationService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_register_then_list() {
        let (service, _) = service();

        let asha = service
            .register(request("Asha", "asha@x.com", "Acme", "Engineer"))
            .await
            .unwrap();
        let ravi = service
            .register(request("Ravi", "ravi@x.com", "Beta", "PM"))
            .await
            .unwrap();

        assert_ne!(asha.id, ravi.id);

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0], ravi);
        assert_eq!(listed[1], asha);
    }

    #[tokio::test]
    async fn test_newest_registration_listed_first() {
        let (service, _) = service();

        for i in 0..20 {
            let reg = service
                .register(request(&format!("N{}", i), "n@x.com", "Acme", "Dev"))
                .await
                .unwrap();
            assert_eq!(service.list().await.unwrap()[0].id, reg.id);
        }
    }

    #[test_case("", "a@b.com", "C", "R" ; "missing name")]
    #[test_case("A", "", "C", "R" ; "missing email")]
    #[test_case("A", "a@b.com", "", "R" ; "missing company")]
    #[test_case("A", "a@b.com", "C", "" ; "missing role")]
    #[test_case("A", "a@b.com", "C", "   " ; "blank role")]
    #[tokio::test]
    async fn test_invalid_submission_leaves_store_unchanged(
        name: &str,
        email: &str,
        company: &str,
        role: &str,
    ) {
        let (service, store) = service();
        service
            .register(request("Asha", "asha@x.com", "Acme", "Engineer"))
            .await
            .unwrap();
        let before = service.list().await.unwrap();

        let err = service.register(request(name, email, company, role)).await.unwrap_err();
        assert!(matches!(err, MeetupError::ValidationError(ref msg) if msg == "all fields are required"));

        assert_eq!(store.len(), 1);
        assert_eq!(service.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_distinct_ids_across_many_registrations() {
        let (service, _) = service();
        let mut ids = HashSet::new();

        for i in 0..10_000 {
            let reg = service
                .register(request(&format!("N{}", i), "n@x.com", "Acme", "Dev"))
                .await
                .unwrap();
            ids.insert(reg.id);
        }

        assert_eq!(ids.len(), 10_000);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_register() {
        use tokio::task::JoinSet;

        let (service, store) = service();
        let mut tasks = JoinSet::new();

        for i in 0..100 {
            let service = service.clone();
            tasks.spawn(async move {
                service
                    .register(request(&format!("N{}", i), "n@x.com", "Acme", "Dev"))
                    .await
                    .unwrap()
                    .id
            });
        }

        let mut ids = HashSet::new();
        while let Some(result) = tasks.join_next().await {
            ids.insert(result.unwrap());
        }

        assert_eq!(ids.len(), 100);
        assert_eq!(store.len(), 100);
        assert_eq!(service.count().await.unwrap(), 100);
    }

    /// Store that is never reachable.
    struct OfflineStore;

    #[async_trait::async_trait]
    impl RegistrationStore for OfflineStore {
        async fn append(&self, _candidate: NewRegistration) -> Result<Registration> {
            Err(MeetupError::StoreUnavailable("connection refused".into()))
        }

        async fn list(&self) -> Result<Vec<Registration>> {
            Err(MeetupError::StoreUnavailable("connection refused".into()))
        }

        async fn count(&self) -> Result<u64> {
            Err(MeetupError::StoreUnavailable("connection refused".into()))
        }

        fn backend(&self) -> &'static str {
            "offline"
        }
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let service = RegistrationService::new(Arc::new(OfflineStore));

        let err = service
            .register(request("Asha", "asha@x.com", "Acme", "Engineer"))
            .await
            .unwrap_err();
        assert!(err.is_recoverable());

        assert!(matches!(service.list().await, Err(MeetupError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_validation_runs_before_store() {
        let service = RegistrationService::new(Arc::new(OfflineStore));

        let err = service.register(request("", "a@b.com", "C", "R")).await.unwrap_err();
        assert!(err.is_validation_error());
    }
}
