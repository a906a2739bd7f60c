use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use log::debug;

use goaltree_core::config;
use goaltree_core::goal::GoalTree;
use goaltree_core::specifier;
use goaltree_core::store;
use goaltree_core::views;

mod logging;
mod version;

#[derive(Parser)]
#[command(
    name = "goaltree",
    version = version::FULL,
    about = "Tracks simple and composite goals"
)]
struct Cli {
    /// The file which stores the goals; falls back to `default_file` from
    /// the goaltree config when omitted
    filename: Option<PathBuf>,

    /// Creates a new goal, given a specifier
    #[arg(short = 'n', long = "new", value_name = "SPECIFIER")]
    new: Option<String>,

    /// Deletes a goal, given a specifier
    #[arg(short = 'd', long = "delete", value_name = "SPECIFIER")]
    delete: Option<String>,

    /// Prints a goal, given its specifier
    #[arg(short = 's', long = "show", value_name = "SPECIFIER")]
    show: Option<String>,

    /// Prints all goals in the file
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Prints what percent this goal is complete
    #[arg(short = 'p', long = "progress", value_name = "SPECIFIER")]
    progress: Option<String>,

    /// Marks a goal, given its specifier, as complete
    #[arg(short = 'c', long = "complete", value_name = "SPECIFIER")]
    complete: Option<String>,

    /// Marks a goal as "un-done"
    #[arg(short = 'i', long = "incomplete", value_name = "SPECIFIER")]
    incomplete: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = logging::init();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = config::resolve_config(&cwd);
    let Some(filename) = cli
        .filename
        .clone()
        .or_else(|| config.default_file.as_ref().map(PathBuf::from))
    else {
        bail!("no goal file given and no default_file configured");
    };
    let indent = config.indent.unwrap_or(views::DEFAULT_INDENT);

    // Creation must work against a missing document, so it loads leniently
    // and writes its result back on its own.
    if let Some(spec) = cli.new.as_deref() {
        let mut tree = match store::load_or_empty(&filename) {
            Ok(tree) => tree,
            Err(err) => {
                debug!("refusing to replace unparseable document: {err}");
                println!("Could not open {}", filename.display());
                return Ok(());
            }
        };
        match specifier::create(&mut tree, spec) {
            Ok(true) => {}
            Ok(false) => println!("{spec} already exists"),
            Err(err) => println!("{err}"),
        }
        if let Err(err) = store::save(&filename, &tree) {
            debug!("save failed: {err}");
            println!("Could not write to file: {}", filename.display());
        }
    }

    let mut tree = match store::load(&filename) {
        Ok(tree) => tree,
        Err(err) => {
            debug!("load failed: {err}");
            println!("Could not open {}", filename.display());
            return Ok(());
        }
    };

    if let Some(spec) = cli.delete.as_deref() {
        match specifier::delete(&mut tree, spec) {
            Ok(true) => {}
            Ok(false) => println!("No such goal to delete: {spec}"),
            Err(err) => println!("{err}"),
        }
    }

    if let Some(spec) = cli.complete.as_deref() {
        mark(&mut tree, spec, true);
    }

    if let Some(spec) = cli.incomplete.as_deref() {
        mark(&mut tree, spec, false);
    }

    if let Some(spec) = cli.show.as_deref() {
        match specifier::find(&tree, spec) {
            Ok(Some(id)) => println!("{}", views::pretty(&tree, id, indent)),
            Ok(None) => println!("No such goal to show: {spec}"),
            Err(err) => println!("{err}"),
        }
    }

    if let Some(spec) = cli.progress.as_deref() {
        match specifier::find(&tree, spec) {
            Ok(Some(id)) => println!("{}", views::progress(&tree, id)),
            Ok(None) => println!("No such goal to print progress: {spec}"),
            Err(err) => println!("{err}"),
        }
    }

    if cli.list {
        for root in tree.roots() {
            println!("{}", views::pretty(&tree, *root, indent));
        }
    }

    if let Err(err) = store::save(&filename, &tree) {
        debug!("save failed: {err}");
        println!("Could not write to file: {}", filename.display());
    }

    Ok(())
}

fn mark(tree: &mut GoalTree, spec: &str, done: bool) {
    match specifier::find(tree, spec) {
        Ok(Some(id)) => {
            if tree.set_explicit(id, done).is_err() {
                if done {
                    println!(
                        "Cannot mark autocomplete goal as done; must mark all children as done"
                    );
                } else {
                    println!(
                        "Cannot mark autocomplete goal as undone; must mark a child as undone"
                    );
                }
            }
        }
        Ok(None) => println!("No such goal to mark: {spec}"),
        Err(err) => println!("{err}"),
    }
}
