use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use thiserror::Error;
use std::fs;
use std::path::Path;

use crate::config::{Config, MAX_BORDER, MAX_BOX_SIZE, MIN_BOX_SIZE};
use crate::filename;
use crate::qr::{parse_hex_color, QrOptions, QrService};

#[derive(Clone)]
pub struct QrMakerService {
    qr_service: QrService,
    config: Config,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub url: String,
    pub box_size: Option<u32>,
    pub border: Option<u32>,
    pub fill_color: Option<String>,
    pub back_color: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct GeneratedQr {
    pub url: String,
    pub filename: String,
    pub qr_code: String,
    pub box_size: u32,
    pub border: u32,
    pub fill_color: String,
    pub back_color: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct QrResponse {
    pub success: bool,
    pub data: Option<GeneratedQr>,
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("URL must not be empty")]
    EmptyUrl,

    #[error("box_size must be between {MIN_BOX_SIZE} and {MAX_BOX_SIZE}, got {0}")]
    BoxSizeOutOfRange(u32),

    #[error("border must be at most {MAX_BORDER}, got {0}")]
    BorderOutOfRange(u32),

    #[error("invalid color value: {0}")]
    InvalidColor(String),
}

impl QrMakerService {
    pub fn new(config: Config) -> Self {
        Self {
            qr_service: QrService::new(),
            config,
        }
    }

    /// Сгенерировать QR код для ответа API (картинка как data URL)
    pub fn generate(&self, request: GenerateRequest) -> anyhow::Result<GeneratedQr> {
        let (url, opts) = self.resolve_request(&request)?;

        let qr_code = self.qr_service.render_data_url(&url, &opts)?;
        let filename = filename::sanitize(&url);

        log::info!("QR code generated for '{}' as '{}'", url, filename);

        Ok(GeneratedQr {
            url,
            filename,
            qr_code,
            box_size: opts.box_size,
            border: opts.border,
            fill_color: format_color(opts.fill),
            back_color: format_color(opts.back),
            created_at: Utc::now(),
        })
    }

    /// Сгенерировать QR код как PNG bytes с предложенным именем файла
    pub fn generate_png(&self, request: GenerateRequest) -> anyhow::Result<(String, Vec<u8>)> {
        let (url, opts) = self.resolve_request(&request)?;

        let png_bytes = self.qr_service.render_png(&url, &opts)?;
        let filename = filename::sanitize(&url);

        Ok((filename, png_bytes))
    }

    /// Сгенерировать QR код с дефолтными настройками и записать на диск.
    /// Возвращает имя созданного файла.
    pub fn save_to_dir(&self, url: &str, output_dir: &Path) -> anyhow::Result<String> {
        let request = GenerateRequest {
            url: url.to_string(),
            box_size: None,
            border: None,
            fill_color: None,
            back_color: None,
        };
        let (filename, png_bytes) = self.generate_png(request)?;

        let filepath = output_dir.join(&filename);
        fs::write(&filepath, &png_bytes)?;

        log::info!("QR code for '{}' written to {}", url, filepath.display());

        Ok(filename)
    }

    /// Валидация запроса и подстановка дефолтов из конфигурации
    fn resolve_request(&self, request: &GenerateRequest) -> anyhow::Result<(String, QrOptions)> {
        let url = request.url.trim().to_string();
        if url.is_empty() {
            return Err(RequestError::EmptyUrl.into());
        }

        let box_size = request.box_size.unwrap_or(self.config.qr.box_size);
        if !(MIN_BOX_SIZE..=MAX_BOX_SIZE).contains(&box_size) {
            return Err(RequestError::BoxSizeOutOfRange(box_size).into());
        }

        let border = request.border.unwrap_or(self.config.qr.border);
        if border > MAX_BORDER {
            return Err(RequestError::BorderOutOfRange(border).into());
        }

        let fill_color = request
            .fill_color
            .as_deref()
            .unwrap_or(&self.config.qr.fill_color);
        let fill = parse_hex_color(fill_color)
            .map_err(|_| RequestError::InvalidColor(fill_color.to_string()))?;

        let back_color = request
            .back_color
            .as_deref()
            .unwrap_or(&self.config.qr.back_color);
        let back = parse_hex_color(back_color)
            .map_err(|_| RequestError::InvalidColor(back_color.to_string()))?;

        Ok((
            url,
            QrOptions {
                box_size,
                border,
                fill,
                back,
            },
        ))
    }
}

fn format_color(color: image::Rgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}
