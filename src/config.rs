use serde::{Deserialize, Serialize};
use std::env;

use crate::qr::parse_hex_color;

// Допустимые диапазоны параметров растеризации
pub const MIN_BOX_SIZE: u32 = 1;
pub const MAX_BOX_SIZE: u32 = 20;
pub const MAX_BORDER: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub qr: QrConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrConfig {
    pub box_size: u32,
    pub border: u32,
    pub fill_color: String,
    pub back_color: String,
    pub output_dir: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        // Загружаем из переменных окружения или используем дефолты
        let config = Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3001".to_string())
                    .parse()
                    .unwrap_or(3001),
            },
            qr: QrConfig {
                box_size: env::var("QR_BOX_SIZE")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),

                border: env::var("QR_BORDER")
                    .unwrap_or_else(|_| "4".to_string())
                    .parse()
                    .unwrap_or(4),

                fill_color: env::var("QR_FILL_COLOR")
                    .unwrap_or_else(|_| "#000000".to_string()),

                back_color: env::var("QR_BACK_COLOR")
                    .unwrap_or_else(|_| "#FFFFFF".to_string()),

                // Куда консольный режим пишет готовые картинки
                output_dir: env::var("QR_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string()),
            },
        };

        // Валидация конфигурации
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        // Проверяем размеры модуля и рамки
        if self.qr.box_size < MIN_BOX_SIZE || self.qr.box_size > MAX_BOX_SIZE {
            anyhow::bail!(
                "QR_BOX_SIZE must be between {} and {}, got {}",
                MIN_BOX_SIZE,
                MAX_BOX_SIZE,
                self.qr.box_size
            );
        }

        if self.qr.border > MAX_BORDER {
            anyhow::bail!(
                "QR_BORDER must be at most {}, got {}",
                MAX_BORDER,
                self.qr.border
            );
        }

        // Проверяем что цвета разбираются
        parse_hex_color(&self.qr.fill_color)?;
        parse_hex_color(&self.qr.back_color)?;

        // Проверяем что каталог вывода задан
        if self.qr.output_dir.trim().is_empty() {
            anyhow::bail!("QR_OUTPUT_DIR must not be empty");
        }

        Ok(())
    }
}
