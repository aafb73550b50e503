//! List and show command implementation.

use crate::app::api::{list_setups, show_setup};
use crate::app::config::Settings;
use crate::domain::AppError;
use crate::domain::setup::SetupGroup;

pub fn run_list(settings: &Settings, group: Option<SetupGroup>) -> Result<(), AppError> {
    let summaries = list_setups(settings.setup_paths.as_slice(), group)?;
    if summaries.is_empty() {
        println!("No setups found.");
        return Ok(());
    }

    let width = summaries.iter().map(|s| s.name.len()).max().unwrap_or(0);
    for summary in summaries {
        match (&summary.group, &summary.error) {
            (Some(group), _) => println!(
                "{:<width$}  {:<10}  {}",
                summary.name,
                group.as_str(),
                summary.description,
                width = width
            ),
            (None, Some(error)) => {
                println!("{:<width$}  {:<10}  {}", summary.name, "unreadable", error, width = width)
            }
            (None, None) => println!("{}", summary.name),
        }
    }
    Ok(())
}

pub fn run_show(settings: &Settings, name: &str) -> Result<(), AppError> {
    let detail = show_setup(settings.setup_paths.as_slice(), name)?;

    println!("{}: {}", detail.name, detail.description);
    println!("  group: {}", detail.group);
    println!("  display order: {}", detail.display_order);
    for source in &detail.sources {
        println!("  file: {}", source.display());
    }
    print_list("includes", &detail.includes);
    print_list("excludes", &detail.excludes);
    print_list("modules", &detail.modules);
    print_list("aliases", &detail.aliases);

    if !detail.devices.is_empty() {
        println!("\nDevices:");
        for device in &detail.devices {
            match &device.description {
                Some(description) => {
                    println!("  {} ({}) - {}", device.name, device.class, description)
                }
                None => println!("  {} ({})", device.name, device.class),
            }
        }
    }

    if !detail.startupcode.is_empty() {
        println!("\nStartup code:");
        println!("{}", detail.startupcode);
    }
    Ok(())
}

fn print_list(label: &str, items: &[String]) {
    if !items.is_empty() {
        println!("  {}: {}", label, items.join(", "));
    }
}
