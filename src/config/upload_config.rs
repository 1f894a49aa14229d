//! 프로필 사진 업로드 설정

use std::env;
use std::path::PathBuf;

/// 업로드 최대 크기 (5MB)
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// 허용 확장자
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// 리사이즈 경계 (가로/세로 최대 픽셀)
pub const MAX_DIMENSION: u32 = 800;

/// 재인코딩 JPEG 품질
pub const JPEG_QUALITY: u8 = 85;

/// 업로드 저장 위치와 공개 URL 매핑
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// 정적 파일 루트 (`/static` 으로 서빙됨)
    pub static_root: PathBuf,
    /// 정적 루트 아래의 프로필 사진 하위 경로
    pub picture_subdir: String,
    pub max_bytes: usize,
}

impl UploadConfig {
    /// `STATIC_DIR` (기본값: `static`)
    pub fn from_env() -> Self {
        let static_root = env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());
        Self::with_root(static_root)
    }

    pub fn with_root(static_root: impl Into<PathBuf>) -> Self {
        Self {
            static_root: static_root.into(),
            picture_subdir: "uploads/profile_pictures".to_string(),
            max_bytes: MAX_UPLOAD_BYTES,
        }
    }

    /// 프로필 사진이 저장되는 실제 디렉토리
    pub fn picture_dir(&self) -> PathBuf {
        self.static_root.join(&self.picture_subdir)
    }

    /// 저장 파일명에 대한 공개 URL
    pub fn public_url(&self, file_name: &str) -> String {
        format!("/static/{}/{}", self.picture_subdir, file_name)
    }

    /// 공개 URL을 로컬 파일 경로로 되돌립니다.
    ///
    /// 이 서버가 저장한 사진이 아니면 `None`.
    pub fn local_path_for_url(&self, url: &str) -> Option<PathBuf> {
        let file_name = url.strip_prefix(&self.public_prefix())?;

        if file_name.is_empty() || file_name.contains('/') || file_name.contains("..") {
            return None;
        }

        Some(self.picture_dir().join(file_name))
    }

    /// 업로드 사진 공개 URL 접두사 (`/static/uploads/profile_pictures/`)
    pub fn public_prefix(&self) -> String {
        format!("/static/{}/", self.picture_subdir)
    }

    /// 이 서버의 업로드 경로를 가리키는 URL인지
    pub fn is_local_url(&self, url: &str) -> bool {
        url.starts_with(&self.public_prefix())
    }

    /// `user_id` 가 올린 사진일 때만 로컬 경로를 돌려줍니다.
    ///
    /// 저장 파일명은 `{user_id}_{8hex}.jpg` 이므로 접두사로 소유자를 판별합니다.
    pub fn owned_path_for_url(&self, url: &str, user_id: &str) -> Option<PathBuf> {
        let path = self.local_path_for_url(url)?;
        let owned = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| !user_id.is_empty() && name.starts_with(&format!("{}_", user_id)));

        owned.then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_and_back() {
        let config = UploadConfig::with_root("static");
        let url = config.public_url("abc_1234abcd.jpg");

        assert_eq!(url, "/static/uploads/profile_pictures/abc_1234abcd.jpg");
        assert_eq!(
            config.local_path_for_url(&url),
            Some(PathBuf::from("static/uploads/profile_pictures/abc_1234abcd.jpg"))
        );
    }

    #[test]
    fn test_foreign_or_traversal_urls_are_ignored() {
        let config = UploadConfig::with_root("static");

        assert_eq!(config.local_path_for_url("https://lh3.googleusercontent.com/a/pic"), None);
        assert_eq!(config.local_path_for_url("/static/uploads/profile_pictures/../secret"), None);
        assert_eq!(config.local_path_for_url("/static/uploads/profile_pictures/"), None);
    }

    #[test]
    fn test_owned_path_requires_user_prefix() {
        let config = UploadConfig::with_root("static");
        let url = config.public_url("65f0aa_1234abcd.jpg");

        assert_eq!(
            config.owned_path_for_url(&url, "65f0aa"),
            Some(PathBuf::from("static/uploads/profile_pictures/65f0aa_1234abcd.jpg"))
        );
        assert_eq!(config.owned_path_for_url(&url, "77b1cc"), None);
        assert_eq!(config.owned_path_for_url(&url, "65f0"), None);
        assert_eq!(config.owned_path_for_url(&url, ""), None);
        assert!(config.is_local_url(&url));
        assert!(!config.is_local_url("https://lh3.googleusercontent.com/a/pic"));
    }
}
