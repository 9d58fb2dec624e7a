use clap::Parser;

mod commands;

/// modfetch - download Minecraft content from Modrinth, dependencies included
#[derive(Parser)]
#[command(name = "modfetch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Targets to download, e.g. sodium@fabric or coolpack@1.20.1
    targets: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    if cli.targets.is_empty() {
        println!(
            "Usage:\n\
             modfetch mod@loader\n\
             modfetch mod:version@loader\n\
             modfetch resourcepack@version\n\
             modfetch shader@shaderloader\n\
             modfetch modpack@loader\n\
             modfetch datapack@version"
        );
        return;
    }

    if let Err(e) = commands::fetch::run(cli.targets) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
