//! Terminal output utilities

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

const BANNER_ART: &str = r"
███╗   ██╗███████╗████████╗███████╗ ██████╗  ██████╗███████╗
████╗  ██║██╔════╝╚══██╔══╝██╔════╝██╔═══██╗██╔════╝██╔════╝
██╔██╗ ██║█████╗     ██║   ███████╗██║   ██║██║     ███████╗
██║╚██╗██║██╔══╝     ██║   ╚════██║██║   ██║██║     ╚════██║
██║ ╚████║███████╗   ██║   ███████║╚██████╔╝╚██████╗███████║
╚═╝  ╚═══╝╚══════╝   ╚═╝   ╚══════╝ ╚═════╝  ╚═════╝╚══════╝
";

/// Print the product banner
pub fn banner() {
    println!("{}", style("NETSOCS").green().bold());
    println!("{}", style("Server Configuration System").green());
    println!("{}", style(BANNER_ART).green());
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Create a spinner
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
