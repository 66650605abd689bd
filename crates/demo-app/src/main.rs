use anyhow::{Context, Result, bail};
use fluent_config::FluentConfig;

mod canvas;
mod report;
mod scenes;

use canvas::Canvas;

const DEFAULT_QUERY: &str = "fb";

fn arg_value(name: &str) -> Option<String> {
    let prefix = format!("--{name}=");
    std::env::args().find_map(|a| a.strip_prefix(&prefix).map(str::to_string))
}

fn main() -> Result<()> {
    let _ = env_logger::try_init();

    let config = FluentConfig::load();
    let query = arg_value("query").unwrap_or_else(|| DEFAULT_QUERY.to_string());
    let fuzziness = match arg_value("fuzziness") {
        Some(raw) => Some(
            raw.parse::<f64>()
                .with_context(|| format!("invalid --fuzziness value {raw:?}"))?,
        ),
        None => config.score.fuzziness,
    };
    let scene_name = std::env::var("DEMO_SCENE").ok().or_else(|| arg_value("scene"));

    let mut scenes = scenes::all();
    if let Some(name) = scene_name.as_deref() {
        scenes.retain(|s| s.name() == name);
        if scenes.is_empty() {
            bail!("unknown scene {name:?}");
        }
    }

    let out_dir = &config.demo.output_dir;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    for scene in &scenes {
        let (width, height) = scene.size(&config);
        let mut canvas = Canvas::new(width, height)?;
        scene.paint(&mut canvas, &config)?;
        let path = out_dir.join(format!("{}.png", scene.name()));
        canvas.save_png(&path)?;
        log::info!("wrote {} ({width}x{height})", path.display());
    }

    report::print_ranking(&query, fuzziness);
    Ok(())
}
