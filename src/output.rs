use std::path::Path;
use std::time::SystemTime;

use colored::Colorize;
use declutter::cleaner::{DeletionResult, ScanResult};
use declutter::cleanup::CleanupObserver;
use declutter::error::CleanupError;
use declutter::utils::{display_path, format_size};

pub fn print_banner() {
    println!(
        "{}",
        format!("declutter v{}", env!("CARGO_PKG_VERSION"))
            .bold()
            .cyan()
    );
    println!();
}

pub fn print_scan_header(root: &Path, extension: &str, threshold: SystemTime) {
    let threshold = chrono::DateTime::<chrono::Local>::from(threshold);
    println!("{}", format!("=== {} ===", display_path(root)).bold().white());
    println!(
        "  {} files modified before {}",
        extension.bold(),
        threshold.format("%Y-%m-%d %H:%M:%S").to_string().yellow()
    );
    println!();
}

pub fn print_scan_result(result: &ScanResult) {
    if !result.is_success() {
        print_warning(&result.message);
        return;
    }
    for file in &result.matches {
        println!(
            "  {}  {}",
            display_path(&file.path).dimmed(),
            format_size(file.size_bytes).yellow()
        );
    }
    if !result.matches.is_empty() {
        println!();
    }
    print_info(&result.message);
    println!(
        "  {:<30} {}",
        "Total reclaimable:".bold(),
        format_size(result.total_size_bytes).green().bold()
    );
    println!();
}

pub fn print_deletion_result(result: &DeletionResult) {
    println!();
    if result.success() {
        println!(
            "{} {}",
            "Cleaned!".green().bold(),
            format!("{} freed.", format_size(result.deleted_size_bytes)).green()
        );
    } else {
        print_warning(&result.message);
        return;
    }
    print_info(&result.message);
}

pub fn print_warning(msg: &str) {
    println!("{} {}", "Warning:".red().bold(), msg.red());
}

pub fn print_info(msg: &str) {
    println!("{} {}", "Info:".cyan().bold(), msg);
}

pub fn print_dry_run_footer() {
    println!(
        "{}",
        "This was a dry run. Run `declutter clean --confirm` to delete."
            .yellow()
            .bold()
    );
}

pub fn print_no_confirm_warning() {
    println!(
        "{}",
        "No --confirm flag provided. Running as dry-run scan."
            .yellow()
            .bold()
    );
    println!();
}

/// Prints each deletion as it happens.
pub struct ConsoleObserver;

impl CleanupObserver for ConsoleObserver {
    fn file_deleted(&self, path: &Path, size_bytes: u64) {
        println!(
            "  {} {}  {}",
            "Deleted".red(),
            display_path(path).dimmed(),
            format_size(size_bytes).yellow()
        );
    }

    fn delete_failed(&self, error: &CleanupError) {
        println!("  {} {}", "Failed".red().bold(), error.to_string().red());
    }
}
