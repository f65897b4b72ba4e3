use super::{colorize_platform, json_pretty, spin_ok, spinner, Context, EXIT_SUCCESS};
use cellar_core::{DiscoveryOptions, DiscoveryReport, Engine};

pub fn run(
    ctx: &Context,
    platforms: &[String],
    no_launchers: bool,
    json: bool,
    verbose: bool,
) -> Result<u8, String> {
    let engine = Engine::with_sources(&ctx.prefix, ctx.sources(platforms)?);
    let options = DiscoveryOptions {
        include_launchers: ctx.config.include_launchers && !no_launchers,
    };

    if json {
        let report = engine.discover(options);
        println!("{}", json_pretty(&report)?);
        return Ok(EXIT_SUCCESS);
    }

    let pb = spinner(&format!("scanning {}", ctx.prefix.display()));
    let report = engine.discover(options);
    spin_ok(&pb, &format!("{} apps found", report.apps.len()));

    print_table(&report);
    if verbose {
        print_diagnostics(&report);
    }
    Ok(EXIT_SUCCESS)
}

fn print_table(report: &DiscoveryReport) {
    if report.apps.is_empty() {
        println!("no apps found");
        return;
    }
    println!("{:<32} {:<12} {:<10} EXECUTABLE", "NAME", "PLATFORM", "ID");
    for app in &report.apps {
        println!(
            "{:<32} {:<12} {:<10} {}",
            app.name,
            colorize_platform(app.platform),
            app.id.as_str(),
            app.executable_path
        );
    }
}

fn print_diagnostics(report: &DiscoveryReport) {
    for d in &report.diagnostics {
        eprintln!("skipped {} [{}]: {}", d.subject, d.platform, d.reason);
    }
}
