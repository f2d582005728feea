//! # Core Module
//!
//! 애플리케이션 조립에 필요한 공유 상태를 제공합니다.
//!
//! 서비스와 리포지토리는 전역 레지스트리 없이 `main` 에서 생성자로 조립되고,
//! 완성된 핸들은 [`AppState`](state::AppState) 하나로 묶여 핸들러에 전달됩니다.
//!
//! ```rust,ignore
//! let state = AppState::new(user_service, token_service);
//!
//! App::new().configure(|cfg| configure_all_routes(cfg, &state, &config.server))
//! ```

pub mod state;

pub use state::AppState;
