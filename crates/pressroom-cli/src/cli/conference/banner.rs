//! Welcome banner printed before the first model turn.

use console::style;

/// Print the conference banner: title, model, session and how to leave.
pub fn print_welcome_banner(title: &str, model: &str, session_id: &str, quit_keyword: &str) {
    println!();
    println!("  {}", style(title).blue().bold());
    println!();
    println!("  {}    {}", style("Model:").bold(), style(model).dim());
    println!("  {}  {}", style("Session:").bold(), style(session_id).dim());
    println!();
    println!(
        "  {}",
        style(format!("Type {quit_keyword} to leave early")).dim()
    );
    println!("  {}", style("---").dim());
}
