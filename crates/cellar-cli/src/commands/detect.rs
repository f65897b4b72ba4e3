use super::{colorize_installed, colorize_platform, json_pretty, Context, EXIT_SUCCESS};
use cellar_core::{default_sources, Engine};

pub fn run(ctx: &Context, json: bool) -> Result<u8, String> {
    let status = Engine::with_sources(&ctx.prefix, default_sources()).detect();
    if json {
        println!("{}", json_pretty(&status)?);
        return Ok(EXIT_SUCCESS);
    }

    println!("prefix: {}", ctx.prefix.display());
    for s in &status {
        println!(
            "  {:<12} installed: {:<3}  {}",
            colorize_platform(s.platform),
            colorize_installed(s.installed),
            s.client_path.display()
        );
    }
    Ok(EXIT_SUCCESS)
}
