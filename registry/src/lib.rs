use std::sync::Arc;

use adapter::auth::{ChainVerifier, JwtVerifier, StaticTokenVerifier};
use adapter::notification::{build_sender, QueuedDispatcher};
use adapter::repository::{
    booking::BookingRepositoryImpl, contact::ContactRepositoryImpl, hall::HallRepositoryImpl,
};
use adapter::{database::ConnectionPool, repository::health::HealthCheckRepositoryImpl};
use kernel::notification::NotificationDispatcher;
use kernel::repository::auth::AccessVerifier;
use kernel::repository::hall::HallRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::service::{booking::BookingService, contact::ContactService};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    hall_repository: Arc<dyn HallRepository>,
    booking_service: BookingService,
    contact_service: ContactService,
    admin_verifier: Arc<dyn AccessVerifier>,
    staff_verifier: Arc<dyn AccessVerifier>,
}

impl AppRegistry {
    /// Wires every implementation. Must be called inside a tokio runtime since
    /// it starts the notification worker.
    pub fn new(pool: ConnectionPool, app_config: AppConfig) -> anyhow::Result<Self> {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let hall_repository: Arc<dyn HallRepository> =
            Arc::new(HallRepositoryImpl::new(pool.clone()));
        let booking_repository = Arc::new(BookingRepositoryImpl::new(pool.clone()));
        let contact_repository = Arc::new(ContactRepositoryImpl::new(pool.clone()));

        let sender = build_sender(&app_config.notification)?;
        let notifier: Arc<dyn NotificationDispatcher> = Arc::new(QueuedDispatcher::spawn(
            sender,
            app_config.notification.queue_capacity,
        ));

        let booking_service = BookingService::new(
            booking_repository,
            hall_repository.clone(),
            notifier.clone(),
        );
        let contact_service = ContactService::new(contact_repository, notifier);

        // 管理 API は静的トークンのみ、スタッフ API は JWT も受け付ける
        let admin_verifier: Arc<dyn AccessVerifier> =
            Arc::new(StaticTokenVerifier::new(app_config.auth.admin_token.clone()));
        let mut staff_strategies = vec![admin_verifier.clone()];
        if let Some(secret) = &app_config.auth.jwt_secret {
            staff_strategies.push(Arc::new(JwtVerifier::new(secret)) as Arc<dyn AccessVerifier>);
        }
        let staff_verifier = Arc::new(ChainVerifier::new(staff_strategies));

        Ok(Self {
            health_check_repository,
            hall_repository,
            booking_service,
            contact_service,
            admin_verifier,
            staff_verifier,
        })
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn hall_repository(&self) -> Arc<dyn HallRepository> {
        self.hall_repository.clone()
    }

    pub fn booking_service(&self) -> &BookingService {
        &self.booking_service
    }

    pub fn contact_service(&self) -> &ContactService {
        &self.contact_service
    }

    pub fn admin_verifier(&self) -> Arc<dyn AccessVerifier> {
        self.admin_verifier.clone()
    }

    pub fn staff_verifier(&self) -> Arc<dyn AccessVerifier> {
        self.staff_verifier.clone()
    }
}
