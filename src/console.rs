use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::Config;
use crate::maker::QrMakerService;

/// Интерактивный консольный режим: читаем URL построчно,
/// сохраняем готовые PNG в каталог из конфигурации.
pub fn run(config: &Config) -> anyhow::Result<()> {
    let maker = QrMakerService::new(config.clone());

    print_banner();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("Enter a URL (or 'exit' to quit): ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            // EOF (Ctrl-D) — выходим как по 'exit'
            None => break,
        };
        let input = line.trim();

        if input.eq_ignore_ascii_case("exit") {
            println!("\nThank you for using QR Code Generator!");
            break;
        }

        if input.is_empty() {
            println!("No URL entered. Please try again.\n");
            continue;
        }

        match maker.save_to_dir(input, Path::new(&config.qr.output_dir)) {
            Ok(filename) => println!("✓ QR code for '{}' saved as '{}'\n", input, filename),
            Err(e) => println!("✗ Error generating QR code for '{}': {}\n", input, e),
        }
    }

    Ok(())
}

fn print_banner() {
    let ruler = "=".repeat(60);
    println!("{}", ruler);
    println!("{:^60}", "QR Code Generator");
    println!("{}", ruler);
    println!("\nThis tool generates QR codes from URLs.");
    println!("Enter URLs one at a time, or type 'exit' to quit.\n");
}
