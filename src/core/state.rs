//! 핸들러가 공유하는 애플리케이션 상태
//!
//! `main` 에서 한 번 조립되어 `web::Data<AppState>` 로 각 워커에 전달됩니다.

use std::sync::Arc;

use crate::services::auth::TokenService;
use crate::services::users::UserService;

/// 서비스 핸들 묶음
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub token_service: Arc<TokenService>,
}

impl AppState {
    pub fn new(user_service: Arc<UserService>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_service,
            token_service,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use super::*;
    use crate::config::ServerConfig;
    use crate::config::token_config::test_support::token_config;
    use crate::repositories::tokens::InMemoryTokenStore;
    use crate::repositories::users::user_repo::test_support::InMemoryUserRepository;

    pub const BASE_URL: &str = "/api/account";

    pub struct TestContext {
        pub state: AppState,
        pub users: Arc<InMemoryUserRepository>,
        pub tokens: Arc<InMemoryTokenStore>,
    }

    pub fn test_context() -> TestContext {
        let users = Arc::new(InMemoryUserRepository::default());
        let tokens = Arc::new(InMemoryTokenStore::new());

        let state = AppState::new(
            Arc::new(UserService::new(users.clone(), 4)),
            Arc::new(TokenService::new(tokens.clone(), &token_config())),
        );

        TestContext {
            state,
            users,
            tokens,
        }
    }

    pub fn server_config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            base_url: BASE_URL.into(),
            handler_timeout: Duration::from_secs(5),
            max_body_bytes: 1024,
            workers: 1,
        }
    }
}
