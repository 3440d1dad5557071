use bat::PrettyPrinter;
use console::style;

use parley::models::message::ChatMessage;
use parley::models::role::Role;

/// Print one normalized turn: text, then whichever optional sections the
/// service populated, then the raw payload when requested.
pub fn message(message: &ChatMessage, show_raw: bool) {
    let label = match message.sender {
        Role::User => style("You").cyan().bold(),
        Role::Assistant => style("Assistant").green().bold(),
    };
    println!("\n{}", label);
    println!("{}", message.text);

    if !message.images.is_empty() {
        println!("\n{}", style("📸 Images:").dim());
        for image in &message.images {
            println!("  {}", preview_label(image));
        }
    }

    if !message.suggested_prompts.is_empty() {
        println!("\n{}", style("💡 Try asking (resend with /p <n>):").dim());
        for (index, prompt) in message.suggested_prompts.iter().enumerate() {
            println!("  {}. {}", index + 1, prompt);
        }
    }

    if !message.related_links.is_empty() {
        println!("\n{}", style("🔗 Related:").dim());
        for link in &message.related_links {
            print!("  {} ({})", link.url, link.kind);
            if let Some(location) = link.locations.first() {
                let extra = link.locations.len() - 1;
                if extra > 0 {
                    print!("  📍 {} (+{} more)", location.name, extra);
                } else {
                    print!("  📍 {}", location.name);
                }
            }
            println!();
        }
    }

    if show_raw {
        if let Some(raw) = &message.raw {
            let pretty = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
            print_raw(&pretty);
        }
    }
}

fn print_raw(content: &str) {
    PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()).name("Raw payload"))
        .language("JSON")
        .grid(true)
        .header(true)
        .print()
        .unwrap();
}

/// Data URIs can run to megabytes; show their shape, not their bytes.
fn preview_label(image: &str) -> String {
    if image.starts_with("data:") {
        let media_type = image
            .split(';')
            .next()
            .unwrap_or("data:unknown")
            .trim_start_matches("data:");
        format!("[local {} image, {} chars]", media_type, image.len())
    } else {
        image.to_string()
    }
}
