use super::{colorize_platform, json_pretty, Context, EXIT_SUCCESS};
use cellar_core::{DiscoveryOptions, Engine};

pub fn run(ctx: &Context, query: &str, json: bool) -> Result<u8, String> {
    let engine = Engine::with_sources(&ctx.prefix, ctx.sources(&[])?);
    let report = engine.discover(DiscoveryOptions {
        include_launchers: ctx.config.include_launchers,
    });
    let app = report
        .find(query)
        .ok_or_else(|| format!("no app matching '{query}'"))?;

    if json {
        println!("{}", json_pretty(app)?);
    } else {
        println!("name:        {}", app.name);
        println!("platform:    {}", colorize_platform(app.platform));
        println!(
            "id:          {}",
            if app.id.is_unset() { "(launcher)" } else { app.id.as_str() }
        );
        println!("install_dir: {}", app.install_dir);
        println!("executable:  {}", app.executable_path);
        println!("arguments:   {}", app.arguments);
        println!("launch:      {}", app.launch_line());
    }
    Ok(EXIT_SUCCESS)
}
