//! 프로필 조회/수정/비밀번호 변경/사진 업로드 서비스

use std::sync::Arc;

use crate::domain::dto::users::request::ChangePasswordRequest;
use crate::domain::dto::users::response::{ProfileResponse, ProfileUpdateResponse};
use crate::domain::entities::users::{ProfileChanges, User};
use crate::errors::{AppError, AppResult};
use crate::repositories::UserStore;
use crate::services::auth::PasswordService;
use crate::services::users::UploadService;
use crate::validation::profile::{screen_fields, to_changes};
use crate::validation::{profile_chain, rules, FieldMap, ProfileContext, ValidationChain};

pub const MSG_USER_NOT_FOUND: &str = "사용자를 찾을 수 없습니다";
pub const MSG_PROFILE_UPDATED: &str = "프로필이 수정되었습니다";
pub const MSG_PASSWORD_FIELDS_REQUIRED: &str = "현재 비밀번호와 새 비밀번호를 모두 입력해주세요";
pub const MSG_NO_PASSWORD: &str = "비밀번호가 설정되지 않은 계정입니다. Google 로그인을 이용해주세요";
pub const MSG_WRONG_CURRENT_PASSWORD: &str = "현재 비밀번호가 올바르지 않습니다";
pub const MSG_SAME_PASSWORD: &str = "새 비밀번호는 현재 비밀번호와 달라야 합니다";

fn not_found() -> AppError {
    AppError::NotFound(MSG_USER_NOT_FOUND.to_string())
}

pub struct ProfileService {
    users: Arc<dyn UserStore>,
    passwords: PasswordService,
    uploads: UploadService,
    chain: ValidationChain<ProfileContext>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserStore>, passwords: PasswordService, uploads: UploadService) -> Self {
        let chain = profile_chain(users.clone(), uploads.config());
        log::debug!("프로필 검증 체인: {:?}", chain.names());

        Self {
            users,
            passwords,
            uploads,
            chain,
        }
    }

    async fn load(&self, user_id: &str) -> AppResult<User> {
        self.users.find_by_id(user_id).await?.ok_or_else(not_found)
    }

    pub async fn get_profile(&self, user_id: &str) -> AppResult<ProfileResponse> {
        Ok(ProfileResponse::from(self.load(user_id).await?))
    }

    /// 프로필 부분 수정
    ///
    /// 허용 목록 검사 → 사용자 확인 → 검증 체인 → 한 번의 원자적 갱신.
    /// 하나라도 거부되면 아무것도 바뀌지 않습니다.
    pub async fn update_profile(&self, user_id: &str, fields: FieldMap) -> AppResult<ProfileUpdateResponse> {
        screen_fields(&fields)?;
        self.load(user_id).await?;

        let ctx = ProfileContext {
            fields,
            user_id: user_id.to_string(),
        };
        self.chain.run(&ctx).await.into_result()?;

        let changes = to_changes(&ctx.fields);
        let updated = self
            .users
            .apply_changes(user_id, &changes)
            .await?
            .ok_or_else(not_found)?;

        let updated_fields: Vec<String> = changes
            .changed_fields()
            .into_iter()
            .map(str::to_string)
            .collect();

        log::info!("프로필 수정: {} {:?}", user_id, updated_fields);

        Ok(ProfileUpdateResponse {
            message: MSG_PROFILE_UPDATED.to_string(),
            profile: ProfileResponse::from(updated),
            updated_fields,
        })
    }

    /// 현재 비밀번호를 확인한 뒤 새 비밀번호로 교체합니다.
    pub async fn change_password(&self, user_id: &str, request: &ChangePasswordRequest) -> AppResult<()> {
        if request.current_password.is_empty() || request.new_password.is_empty() {
            return Err(AppError::ValidationError(MSG_PASSWORD_FIELDS_REQUIRED.to_string()));
        }

        let user = self.load(user_id).await?;
        let current_hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::ValidationError(MSG_NO_PASSWORD.to_string()))?;

        if !self.passwords.verify(&request.current_password, current_hash)? {
            return Err(AppError::ValidationError(MSG_WRONG_CURRENT_PASSWORD.to_string()));
        }

        rules::check_password_policy(&request.new_password)?;

        if request.new_password == request.current_password {
            return Err(AppError::ValidationError(MSG_SAME_PASSWORD.to_string()));
        }

        let new_hash = self.passwords.hash(&request.new_password)?;
        if !self.users.update_password(user_id, &new_hash).await? {
            return Err(not_found());
        }

        log::info!("비밀번호 변경: {}", user_id);
        Ok(())
    }

    /// 사진을 저장하고 프로필에 연결합니다. 새 사진의 URL을 돌려줍니다.
    pub async fn upload_picture(&self, user_id: &str, file_name: &str, bytes: Vec<u8>) -> AppResult<String> {
        let user = self.load(user_id).await?;

        let url = self.uploads.store_profile_picture(user_id, file_name, bytes).await?;

        let changes = ProfileChanges {
            profile_picture: Some(Some(url.clone())),
            ..Default::default()
        };

        match self.users.apply_changes(user_id, &changes).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                self.uploads.remove_picture(user_id, &url).await;
                return Err(not_found());
            }
            Err(e) => {
                self.uploads.remove_picture(user_id, &url).await;
                return Err(e);
            }
        }

        if let Some(previous) = user.profile_picture.as_deref().filter(|previous| *previous != url) {
            self.uploads.remove_picture(user_id, previous).await;
        }

        log::info!("프로필 사진 변경: {} -> {}", user_id, url);
        Ok(url)
    }
}
