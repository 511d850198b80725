use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use git_pep440::build_hook::{self, BuildStep};
use git_pep440::{config, get_data, pep440, ui};

#[derive(clap::Parser)]
#[command(
    name = "git-pep440",
    about = "Print a PEP 440 version derived from a static file, archive keywords or git"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Package root, overrides the configured root")]
    root: Option<PathBuf>,

    #[arg(long, help = "Read branch rules from this file")]
    rules: Option<PathBuf>,

    #[arg(short, long, help = "Report every source and git query on stderr")]
    verbose: bool,

    #[arg(long, help = "Print branch and revision along with the version")]
    all: bool,

    #[arg(long, value_name = "DIR", help = "Write the static version file into DIR")]
    write: Option<PathBuf>,

    #[arg(
        long,
        value_enum,
        default_value = "build",
        help = "Output layout used with --write"
    )]
    step: BuildStep,

    #[arg(
        long,
        default_value = ".",
        help = "Package path inside the project, used with --write"
    )]
    package_path: PathBuf,

    #[arg(long, value_name = "VERSION", help = "Exit non-zero unless VERSION is valid PEP 440")]
    check: Option<String>,

    #[arg(long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("git-pep440 {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if let Some(candidate) = args.check.as_deref() {
        if pep440::is_valid(candidate) {
            ui::display_success(&format!("{} is a valid PEP 440 version", candidate));
            return Ok(());
        }
        ui::display_error(&format!("{} is not a valid PEP 440 version", candidate));
        std::process::exit(1);
    }

    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    if let Some(root) = args.root {
        config.root = root;
    }
    if let Some(rules) = args.rules.as_deref() {
        config.branch_rules = fs::read_to_string(rules)
            .with_context(|| format!("Failed to read branch rules from {}", rules.display()))?;
    }
    config.verbose |= args.verbose;

    if let Some(output_dir) = args.write.as_deref() {
        let (path, data) = build_hook::run(args.step, output_dir, &args.package_path, &config)
            .with_context(|| {
                format!(
                    "Failed to write static version file for {} step",
                    args.step.name()
                )
            })?;

        ui::display_success(&format!(
            "Wrote version {} to {}",
            data.version,
            path.display()
        ));
        return Ok(());
    }

    let data = get_data(&config);
    ui::display_version_data(&data, args.all);

    Ok(())
}
