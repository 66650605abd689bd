/// Print the effective configuration.
///
/// Run with: cargo run -p fluent-config --example print_config

fn main() {
    let config = fluent_config::FluentConfig::load();

    println!("=== Fluent Configuration ===\n");

    println!("Mask Defaults:");
    for shape in config.mask.shape_defaults() {
        println!("  {:<14} {:?}", shape.name(), shape);
    }
    println!();

    println!("Border: width {} color {}", config.border.width, config.border.color);
    println!("Corner radius: {}", config.corner.radius);
    println!("Fuzziness: {:?}", config.score.fuzziness);
    println!("Tolerance: {}", config.render.tolerance);
    println!("Output dir: {}", config.demo.output_dir.display());
    println!();

    match config.to_toml_string() {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("{e}");
        }
    }
}
