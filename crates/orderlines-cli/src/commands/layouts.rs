//! Layouts command - list the supported document layouts.

use console::style;

use orderlines_core::extract::Layout;

pub async fn run() -> anyhow::Result<()> {
    println!("{}", style("Supported layouts:").bold());
    println!();

    for layout in Layout::ALL {
        let status = if layout.is_experimental() {
            style("experimental").yellow()
        } else {
            style("stable").green()
        };

        println!(
            "  {}  {:<12} {:<10} {}",
            layout.letter(),
            layout.name(),
            layout.vendor(),
            status
        );
    }

    println!();
    println!("Select with --layout <letter|name>, e.g. --layout a --layout fused-line");

    Ok(())
}
