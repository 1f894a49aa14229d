//! 프로필 사진 업로드 처리
//!
//! 1. 확장자 허용 목록 검사 (디코딩 전)
//! 2. 크기 제한 검사 (5MB 초과 시 413)
//! 3. 디코딩 → 투명 영역을 흰 배경에 합성 → 800×800 안으로 축소
//! 4. JPEG(품질 85)로 재인코딩해 `{userId}_{8hex}.jpg` 로 저장

use std::path::Path;

use actix_web::web;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};

use crate::config::{UploadConfig, ALLOWED_EXTENSIONS, JPEG_QUALITY, MAX_DIMENSION};
use crate::errors::{AppError, AppResult, ErrorContext};

pub const MSG_NO_FILE: &str = "업로드할 파일이 없습니다";
pub const MSG_BAD_EXTENSION: &str = "jpg, jpeg, png, gif 형식의 이미지만 업로드할 수 있습니다";
pub const MSG_TOO_LARGE: &str = "파일 크기는 5MB를 초과할 수 없습니다";
pub const MSG_UNREADABLE_IMAGE: &str = "이미지 파일을 읽을 수 없습니다";

/// 확장자를 소문자로 돌려줍니다. 허용 목록 밖이면 400.
pub fn check_extension(file_name: &str) -> AppResult<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| AppError::UploadError(MSG_BAD_EXTENSION.to_string()))
}

fn flatten_on_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    RgbImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let blend = |c: u8| ((c as u16 * a as u16 + 255 * (255 - a as u16)) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

/// 업로드 이미지를 정규화된 JPEG 바이트로 바꿉니다.
pub fn process_image(bytes: &[u8]) -> AppResult<Vec<u8>> {
    let decoded = image::load_from_memory(bytes).map_err(|e| {
        log::debug!("이미지 디코딩 실패: {}", e);
        AppError::UploadError(MSG_UNREADABLE_IMAGE.to_string())
    })?;

    let flattened = if decoded.color().has_alpha() {
        DynamicImage::ImageRgb8(flatten_on_white(&decoded))
    } else {
        DynamicImage::ImageRgb8(decoded.to_rgb8())
    };

    let (width, height) = flattened.dimensions();
    let resized = if width > MAX_DIMENSION || height > MAX_DIMENSION {
        flattened.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Lanczos3)
    } else {
        flattened
    };

    let mut encoded = Vec::new();
    resized
        .write_with_encoder(JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY))
        .map_err(|e| AppError::InternalError(format!("JPEG 인코딩 실패: {}", e)))?;

    Ok(encoded)
}

#[derive(Debug, Clone)]
pub struct UploadService {
    config: UploadConfig,
}

impl UploadService {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    pub fn check_size(&self, size: usize) -> AppResult<()> {
        if size > self.config.max_bytes {
            return Err(AppError::PayloadTooLarge(MSG_TOO_LARGE.to_string()));
        }
        Ok(())
    }

    /// 검사/변환 후 파일로 저장하고 공개 URL을 돌려줍니다.
    pub async fn store_profile_picture(
        &self,
        user_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> AppResult<String> {
        check_extension(file_name)?;
        if bytes.is_empty() {
            return Err(AppError::UploadError(MSG_NO_FILE.to_string()));
        }
        self.check_size(bytes.len())?;

        let stored_name = format!("{}_{}.jpg", user_id, &uuid::Uuid::new_v4().simple().to_string()[..8]);
        let directory = self.config.picture_dir();
        let path = directory.join(&stored_name);

        // 디코딩/리사이즈/디스크 쓰기는 blocking 풀에서
        web::block(move || -> AppResult<()> {
            let jpeg = process_image(&bytes)?;
            std::fs::create_dir_all(&directory).context("업로드 디렉토리 생성 실패")?;
            std::fs::write(&path, jpeg).context("이미지 저장 실패")
        })
        .await
        .map_err(|e| AppError::InternalError(format!("이미지 처리 작업 실패: {}", e)))??;

        Ok(self.config.public_url(&stored_name))
    }

    /// `user_id` 가 올린 사진이면 파일을 지웁니다. 실패는 로그만 남깁니다.
    ///
    /// 외부 URL이나 다른 사용자의 파일은 건드리지 않습니다.
    pub async fn remove_picture(&self, user_id: &str, url: &str) {
        let Some(path) = self.config.owned_path_for_url(url, user_id) else {
            if self.config.is_local_url(url) {
                log::warn!("소유하지 않은 사진 삭제 요청 무시: {} -> {}", user_id, url);
            }
            return;
        };

        let result = web::block(move || std::fs::remove_file(&path)).await;
        match result {
            Ok(Ok(())) => log::debug!("이전 프로필 사진 삭제: {}", url),
            Ok(Err(e)) => log::warn!("이전 프로필 사진 삭제 실패 ({}): {}", url, e),
            Err(e) => log::warn!("이전 프로필 사진 삭제 작업 실패 ({}): {}", url, e),
        }
    }
}
