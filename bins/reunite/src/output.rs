//! Terminal output helpers

use owo_colors::OwoColorize;
use reunite_contact::ContactDisplay;
use reunite_listings::{BrowseHit, CategoryRegistry, ItemType, ListingStats};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else {
        format!("{secs:.1}s")
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Format a distance in km, switching to meters below 1 km
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{km:.1} km")
    }
}

/// Print one browse result
pub fn print_hit(hit: &BrowseHit<'_>, registry: &CategoryRegistry, contact: &ContactDisplay, posted: &str) {
    let item = hit.item;
    let badge = match item.item_type {
        ItemType::Lost => "LOST".red().bold().to_string(),
        ItemType::Found => "FOUND".green().bold().to_string(),
    };
    let category = registry.lookup(&item.category);

    println!("{} {} {}", badge, item.name.bold(), format!("#{}", item.id).dimmed());
    println!("  {} · {} · {}", category.label, item.location.city, posted.dimmed());

    let mut extras = Vec::new();
    if let Some(relevance) = hit.relevance {
        extras.push(format!("relevance {relevance:.2}"));
    }
    if let Some(km) = hit.distance_km {
        extras.push(format_distance(km));
    }
    if !extras.is_empty() {
        println!("  {}", extras.join(" · ").cyan());
    }

    let phone = contact.phone.as_deref().unwrap_or("-");
    println!("  {} {} · {}", item.contact_name, phone, contact.email);
}

/// Print listing counts
pub fn print_stats(stats: &ListingStats) {
    println!("{:<10} {}", "Total", stats.total.bold());
    println!("{:<10} {}", "Lost", stats.lost.red());
    println!("{:<10} {}", "Found", stats.found.green());
    println!("{:<10} {}", "Active", stats.active);
    println!("{:<10} {}", "Resolved", stats.resolved);
    println!("{:<10} {}", "Archived", stats.archived);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(42)), "42ms");
        assert_eq!(format_duration(Duration::from_secs_f32(2.5)), "2.5s");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "item", "items"), "1 item");
        assert_eq!(format_count(0, "item", "items"), "0 items");
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.25), "250 m");
        assert_eq!(format_distance(3.21), "3.2 km");
    }
}
