// src/qr.rs
use qrcode::{QrCode, EcLevel};
use image::{ImageBuffer, Rgb, RgbImage};
use base64::{Engine as _, engine::general_purpose};

/// Параметры растеризации QR кода
#[derive(Debug, Clone, Copy)]
pub struct QrOptions {
    /// Размер одного модуля в пикселях
    pub box_size: u32,
    /// Ширина рамки (quiet zone) в модулях
    pub border: u32,
    pub fill: Rgb<u8>,
    pub back: Rgb<u8>,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            box_size: 10,
            border: 4,
            fill: Rgb([0, 0, 0]),
            back: Rgb([255, 255, 255]),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QrService;

impl QrService {
    pub fn new() -> Self {
        Self
    }

    /// Генерировать QR код как PNG bytes
    pub fn render_png(&self, data: &str, opts: &QrOptions) -> anyhow::Result<Vec<u8>> {
        // Создаем QR код (версия подбирается автоматически под данные)
        let code = QrCode::with_error_correction_level(data, EcLevel::L)?;

        let size = opts.box_size as usize;
        let border = opts.border as usize;

        // Размеры
        let width = code.width();
        let img_size = (width + 2 * border) * size;

        // Создаем изображение
        let mut img: RgbImage = ImageBuffer::new(img_size as u32, img_size as u32);

        // Заполняем фоном
        for pixel in img.pixels_mut() {
            *pixel = opts.back;
        }

        // Рисуем QR код
        for y in 0..width {
            for x in 0..width {
                if code[(x, y)] == qrcode::Color::Dark {
                    // Рисуем квадрат модуля
                    for dy in 0..size {
                        for dx in 0..size {
                            let px = (border + x) * size + dx;
                            let py = (border + y) * size + dy;
                            if px < img_size && py < img_size {
                                img.put_pixel(px as u32, py as u32, opts.fill);
                            }
                        }
                    }
                }
            }
        }

        // Конвертируем в PNG bytes
        let mut png_bytes = Vec::new();
        {
            use image::codecs::png::PngEncoder;
            use image::ImageEncoder;

            let encoder = PngEncoder::new(&mut png_bytes);
            encoder.write_image(
                img.as_raw(),
                img_size as u32,
                img_size as u32,
                image::ColorType::Rgb8,
            )?;
        }

        Ok(png_bytes)
    }

    /// Генерировать QR код в формате base64 data URL
    pub fn render_data_url(&self, data: &str, opts: &QrOptions) -> anyhow::Result<String> {
        let png_bytes = self.render_png(data, opts)?;

        // Кодируем в base64
        let base64_string = general_purpose::STANDARD.encode(&png_bytes);

        Ok(format!("data:image/png;base64,{}", base64_string))
    }
}

/// Разобрать цвет вида "#RRGGBB" (ведущий '#' опционален)
pub fn parse_hex_color(value: &str) -> anyhow::Result<Rgb<u8>> {
    let hex = value.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        anyhow::bail!("Invalid color value: {}", value);
    }

    let r = u8::from_str_radix(&hex[0..2], 16)?;
    let g = u8::from_str_radix(&hex[2..4], 16)?;
    let b = u8::from_str_radix(&hex[4..6], 16)?;

    Ok(Rgb([r, g, b]))
}
