//! 계정 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! MongoDB 연결과 인덱스를 준비한 뒤 서비스를 한 번 생성해
//! `web::Data`로 워커들에 공유합니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use account_service_backend::config::{Environment, ServerConfig, UploadConfig};
use account_service_backend::db::Database;
use account_service_backend::errors::{AppError, AppResult, ErrorContext};
use account_service_backend::repositories::tokens::MongoResetTokenRepository;
use account_service_backend::repositories::users::MongoUserRepository;
use account_service_backend::routes::configure_all_routes;
use account_service_backend::services::auth::{GoogleAuthService, PasswordService, TokenService};
use account_service_backend::services::email::sender_from_env;
use account_service_backend::state::AppState;
use account_service_backend::utils::display_terminal::{
    print_boxed_title, print_endpoint_summary, print_step, print_sub_task,
};

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    print_boxed_title("Account Service Backend");
    print_step(1, "환경 설정 로드");

    // 데이터 스토어 초기화
    let (state, upload_config) = initialize_state().await.map_err(|e| {
        error!("❌ 서비스 초기화 실패: {}", e);
        io::Error::other(e.to_string())
    })?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(state, upload_config).await
}

/// 저장소, 서비스, 외부 연동을 만들어 [`AppState`]로 묶습니다.
async fn initialize_state() -> AppResult<(AppState, UploadConfig)> {
    let environment = Environment::current();
    print_sub_task("environment", &format!("{:?}", environment));
    if environment.is_production() && std::env::var("JWT_SECRET").is_err() {
        return Err(AppError::InternalError(
            "운영 환경에서는 JWT_SECRET 설정이 필요합니다".to_string(),
        ));
    }

    info!("📡 데이터베이스 연결 중...");
    let database = Database::new().await?;
    print_step(2, "MongoDB 연결");
    print_sub_task("database", database.database_name());

    let users = MongoUserRepository::new(&database);
    users.create_indexes().await?;
    let reset_tokens = MongoResetTokenRepository::new(&database);
    reset_tokens.create_indexes().await?;
    print_step(3, "인덱스 생성");
    print_sub_task("users", "email unique, username sparse unique");
    print_sub_task("password_reset_tokens", "token_hash, expires_at TTL");

    let passwords = PasswordService::from_env();
    let tokens = TokenService::from_env();
    let identity = GoogleAuthService::from_env();
    let mailer = sender_from_env();
    print_step(4, "서비스 생성");
    print_sub_task("bcrypt cost", &passwords.cost().to_string());

    let upload_config = UploadConfig::from_env();
    std::fs::create_dir_all(upload_config.picture_dir())
        .with_context(|| format!("업로드 디렉토리 생성 실패 ({})", upload_config.picture_dir().display()))?;
    print_step(5, "업로드 디렉토리 준비");
    print_sub_task("static", &upload_config.static_root.display().to_string());

    let state = AppState::build(
        Arc::new(users),
        Arc::new(reset_tokens),
        passwords,
        tokens,
        Arc::new(identity),
        mailer,
        upload_config.clone(),
    );

    Ok((state, upload_config))
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(state: AppState, upload_config: UploadConfig) -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    print_endpoint_summary(
        &bind_address,
        &["GET  /health", "POST /auth/*", "*    /profile (Bearer)", "GET  /static/*"],
    );

    let static_root = upload_config.static_root.clone();

    HttpServer::new(move || {
        let state = state.clone();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(move |cfg| state.configure(cfg))
            // 업로드된 프로필 사진
            .service(Files::new("/static", static_root.clone()))
            .configure(configure_all_routes)
    })
    .bind(&bind_address)?
    .workers(4) // 워커 스레드 수
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이라 stderr로 직접 출력
    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                eprintln!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if let Err(e) = dotenv::from_filename(".env.dev") {
                eprintln!(".env.dev 파일 로드 실패: {}", e);
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
///
/// ```bash
/// # 감사 로그만
/// RUST_LOG=audit=info cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// CORS 설정을 구성합니다
///
/// 개발환경에서 로컬호스트 프론트엔드와의 통신을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
