//! `generate` subcommand.
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Write man pages for the command and each of its subcommands to the
/// output directory if specified, else the current directory.
///
/// # Errors
///
/// Returns an error if the output directory or a man page file could not
/// be created.
pub fn generate_man_pages(
    cmd: &clap::Command,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("opening current directory")?,
    };
    fs::create_dir_all(&output_dir)
        .context("create man page output directory")?;

    let mut pages = vec![(cmd.get_name().to_string(), cmd.clone())];
    collect_subcommand_pages(cmd.get_name(), cmd, &mut pages);

    for (name, command) in pages {
        let path = output_dir.join(format!("{name}.1"));
        let mut file = fs::File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;

        // Rename so the NAME and SYNOPSIS sections carry the full
        // `parent-child` page name rather than the bare subcommand name.
        // The leaked &'static str is fine here since man page generation
        // is a one-shot operation.
        let leaked_name: &'static str = Box::leak(name.into_boxed_str());
        let man = clap_mangen::Man::new(command.name(leaked_name));
        man.render(&mut file)?;
        println!("Generated: {}", path.display());
    }

    Ok(())
}

/// Collect `(page name, command)` pairs for every subcommand, recursively.
fn collect_subcommand_pages(
    prefix: &str,
    cmd: &clap::Command,
    pages: &mut Vec<(String, clap::Command)>,
) {
    for subcmd in cmd.get_subcommands() {
        let name = format!("{}-{}", prefix, subcmd.get_name());
        pages.push((
            name.clone(),
            subcmd.clone().disable_help_subcommand(true),
        ));
        collect_subcommand_pages(&name, subcmd, pages);
    }
}
