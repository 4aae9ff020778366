use clap::Args;
use mindful_core::{Config, PageKind};

#[derive(Args)]
pub struct PageArgs {
    /// Page name (index, product, services, contact, about)
    pub name: PageKind,
}

pub fn run(args: PageArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = super::load_page(args.name, config);
    let out = serde_json::json!({
        "page": runtime.page().name,
        "widgets": runtime.mounted(),
        "presets": runtime.page().presets(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
