// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    println!(
        "TechCal v{} - Turn free-text event descriptions into calendar entries",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] <COMMAND> [ARGS]", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -v, --verbose         Log debug output to stderr.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("COMMANDS:");
    println!("    parse <text>              Parse text and print the draft as JSON");
    println!("    add <text>                Parse text and store it in the calendar");
    println!("    list [YYYY-MM]            List stored events (optionally one month)");
    println!("    remove <uid>              Delete a stored event");
    println!("    feed [--type T] [--online] [--free] [--tag T]");
    println!("                              Browse the bundled event feed");
    println!("    feed add <id>             Copy a feed event into the calendar");
    println!("    trending                  Top-rated feed events");
    println!("    recommend [limit]         Feed events ranked for your interests");
    println!("    reminders                 Reminders scheduled for stored events");
    println!("    watch                     Stay running and print reminders as they fire");
    println!();
    println!("EXAMPLES:");
    println!("    {} parse \"AI Summit tomorrow at 2 PM\"", binary_name);
    println!("    {} add \"React workshop next Monday morning online\"", binary_name);
    println!("    {} list 2024-08", binary_name);
    println!("    {} feed --type hackathon --online", binary_name);
    println!();
    println!("Drafts below the configured confidence threshold are flagged for review.");
}
