// src/filename.rs
const PREFIX: &str = "qr_code_";
const SUFFIX: &str = ".png";

// Максимальная длина имени файла, включая префикс и расширение
const MAX_LEN: usize = 200;

/// Построить безопасное имя файла из произвольного URL.
///
/// Остаются только ASCII буквы/цифры и `.`, `_`, `-`; всё остальное
/// (разделители схемы, query-строка, пробелы, не-ASCII) выбрасывается.
/// Результат всегда вида `qr_code_<...>.png` и не длиннее 200 символов.
pub fn sanitize(url: &str) -> String {
    let stem: String = url
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let mut name = format!("{}{}{}", PREFIX, stem, SUFFIX);

    if name.len() > MAX_LEN {
        // Урезаем только середину, расширение сохраняем
        name.truncate(MAX_LEN - SUFFIX.len());
        name.push_str(SUFFIX);
    }

    name
}
