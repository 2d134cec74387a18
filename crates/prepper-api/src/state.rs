//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use sqlx::PgPool;

use prepper_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator, StashGate};
use prepper_core::config::AppConfig;
use prepper_core::traits::storage::ObjectStorage;
use prepper_database::repositories::{
    ChecklistRepository, InvitationRepository, ItemRepository, MemberRepository, PhotoRepository,
    PushSubscriptionRepository, ResetTokenRepository, StashRepository, UserRepository,
};
use prepper_service::{
    AnalysisService, AuthService, ChecklistService, ExpirationNotifier, InvitationService,
    ItemService, Mailer, PhotoService, PushSender, PushService, StashService, VisionModel,
};

/// Outbound dependencies chosen by the caller.
///
/// The server passes S3, Resend, Web Push and Anthropic clients; tests pass
/// in-memory or fake implementations.
#[derive(Debug, Clone)]
pub struct Integrations {
    pub storage: Arc<dyn ObjectStorage>,
    pub mailer: Arc<dyn Mailer>,
    pub push_sender: Arc<dyn PushSender>,
    pub vision: Arc<dyn VisionModel>,
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Photo object storage
    pub storage: Arc<dyn ObjectStorage>,

    // ── Auth ─────────────────────────────────────────────────
    /// Access token verification
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    pub auth_service: Arc<AuthService>,
    pub stash_service: Arc<StashService>,
    pub invitation_service: Arc<InvitationService>,
    pub item_service: Arc<ItemService>,
    pub photo_service: Arc<PhotoService>,
    pub checklist_service: Arc<ChecklistService>,
    pub push_service: Arc<PushService>,
    pub analysis_service: Arc<AnalysisService>,
    pub notifier: Arc<ExpirationNotifier>,
}

impl AppState {
    /// Wire repositories and services on top of a pool and integrations.
    pub fn new(config: AppConfig, db_pool: PgPool, integrations: Integrations) -> Self {
        let Integrations {
            storage,
            mailer,
            push_sender,
            vision,
        } = integrations;

        // ── Repositories ─────────────────────────────────────────
        let users = Arc::new(UserRepository::new(db_pool.clone()));
        let reset_tokens = Arc::new(ResetTokenRepository::new(db_pool.clone()));
        let stashes = Arc::new(StashRepository::new(db_pool.clone()));
        let members = Arc::new(MemberRepository::new(db_pool.clone()));
        let invitations = Arc::new(InvitationRepository::new(db_pool.clone()));
        let items = Arc::new(ItemRepository::new(db_pool.clone()));
        let photos = Arc::new(PhotoRepository::new(db_pool.clone()));
        let checklist = Arc::new(ChecklistRepository::new(db_pool.clone()));
        let subscriptions = Arc::new(PushSubscriptionRepository::new(db_pool.clone()));

        // ── Auth ─────────────────────────────────────────────────
        let hasher = Arc::new(PasswordHasher::new());
        let validator = Arc::new(PasswordValidator::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let gate = Arc::new(StashGate::new(Arc::clone(&members)));

        // ── Services ─────────────────────────────────────────────
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&users),
            reset_tokens,
            hasher,
            validator,
            jwt_encoder,
            Arc::clone(&mailer),
            &config.auth,
            &config.mail,
        ));
        let stash_service = Arc::new(StashService::new(
            Arc::clone(&stashes),
            Arc::clone(&members),
            Arc::clone(&invitations),
            Arc::clone(&photos),
            Arc::clone(&gate),
            Arc::clone(&storage),
        ));
        let invitation_service = Arc::new(InvitationService::new(
            invitations,
            Arc::clone(&members),
            users,
            stashes,
            Arc::clone(&gate),
            mailer,
            &config.auth,
            &config.mail,
        ));
        let item_service = Arc::new(ItemService::new(
            Arc::clone(&items),
            Arc::clone(&photos),
            Arc::clone(&gate),
            Arc::clone(&storage),
        ));
        let photo_service = Arc::new(PhotoService::new(
            Arc::clone(&items),
            Arc::clone(&photos),
            Arc::clone(&gate),
            Arc::clone(&storage),
        ));
        let checklist_service = Arc::new(ChecklistService::new(
            checklist,
            Arc::clone(&items),
            Arc::clone(&gate),
        ));
        let push_service = Arc::new(PushService::new(
            Arc::clone(&subscriptions),
            Arc::clone(&items),
            Arc::clone(&push_sender),
            &config.push,
        ));
        let analysis_service = Arc::new(AnalysisService::new(
            vision,
            photos,
            Arc::clone(&items),
            gate,
        ));
        let notifier = Arc::new(ExpirationNotifier::new(
            items,
            members,
            subscriptions,
            push_sender,
        ));

        Self {
            config: Arc::new(config),
            db_pool,
            storage,
            jwt_decoder,
            auth_service,
            stash_service,
            invitation_service,
            item_service,
            photo_service,
            checklist_service,
            push_service,
            analysis_service,
            notifier,
        }
    }
}
