//! List rules command implementation.

use ground_rule::rules::rule_catalog;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<22} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in rule_catalog() {
        println!("{:<10} {:<22} {}", rule.code, rule.name, rule.description);
    }

    println!("\nUse --rules or --disable to select rules, e.g.:");
    println!("  ground-rule check --rules void-function,uninit-local src/main.c");
    println!("  ground-rule check --disable comment-style --title \"net: Fix leak\" src/net.c");
}
