use std::io;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::NameReport;
use crate::cli::args::{Cli, Commands, EditOp};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{Name, NameError, Representation};
use crate::exitcode;
use crate::files::{sample_tree, TreeNodeConvert};

/// Run the selected command and return the process exit code.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    let settings = effective_settings(cli)?;
    debug!(?settings, "effective settings");

    match &cli.command {
        Some(Commands::Inspect { name }) => _inspect(&settings, name),
        Some(Commands::Render { name, to }) => _render(&settings, name, to.as_deref()),
        Some(Commands::Compare {
            a,
            b,
            delimiter_a,
            delimiter_b,
        }) => _compare(
            &settings,
            a,
            delimiter_a.as_deref(),
            b,
            delimiter_b.as_deref(),
        ),
        Some(Commands::Edit { name, op }) => _edit(&settings, name, op),
        Some(Commands::Tree { find, buggy }) => _tree(find.as_deref(), *buggy),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "hiername", &mut io::stdout());
            Ok(exitcode::OK)
        }
        None => Err(CliError::InvalidArgs(
            "no command given, see --help".to_string(),
        )),
    }
}

/// Config file and environment, overridden by global flags.
fn effective_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(delimiter) = &cli.delimiter {
        settings.delimiter = delimiter.clone();
    }
    if cli.array {
        settings.representation = Representation::Array;
    }
    settings.validate()?;
    Ok(settings)
}

#[instrument(skip(settings))]
fn _inspect(settings: &Settings, name: &str) -> CliResult<i32> {
    let name = settings.parse_name(name)?;
    let report = NameReport::from_name(name.as_ref())?;
    output::info(&report);
    Ok(exitcode::OK)
}

#[instrument(skip(settings))]
fn _render(settings: &Settings, name: &str, to: Option<&str>) -> CliResult<i32> {
    let name = settings.parse_name(name)?;
    let to = to.or(settings.render_delimiter.as_deref());
    output::info(&name.as_string(to)?);
    Ok(exitcode::OK)
}

/// Parse `source` with its own delimiter, falling back to the configured one.
fn parse_with(
    settings: &Settings,
    source: &str,
    delimiter: Option<&str>,
) -> CliResult<Box<dyn Name>> {
    let delimiter = delimiter.unwrap_or(settings.delimiter.as_str());
    Ok(settings.representation.parse(source, Some(delimiter))?)
}

#[instrument(skip(settings))]
fn _compare(
    settings: &Settings,
    a: &str,
    delimiter_a: Option<&str>,
    b: &str,
    delimiter_b: Option<&str>,
) -> CliResult<i32> {
    let first = parse_with(settings, a, delimiter_a)?;
    let second = parse_with(settings, b, delimiter_b)?;

    let equal = first.is_equal(second.as_ref());
    let same_hash = first.hash_code()? == second.hash_code()?;
    if equal {
        output::success(&format!("equal (hash {})", first.hash_code()?));
    } else {
        output::failure(&format!(
            "different: {} vs {}",
            first.canonical_data_string()?,
            second.canonical_data_string()?
        ));
    }
    if equal && !same_hash {
        return Err(NameError::method_failed("equal names hashed differently").into());
    }
    Ok(if equal { exitcode::OK } else { exitcode::DIFFERENT })
}

#[instrument(skip(settings))]
fn _edit(settings: &Settings, name: &str, op: &EditOp) -> CliResult<i32> {
    let original = settings.parse_name(name)?;
    let updated: Box<dyn Name> = match op {
        EditOp::Set { index, component } => original.set_component(*index, component)?,
        EditOp::Insert { index, component } => original.insert(*index, component)?,
        EditOp::Append { component } => original.append(component)?,
        EditOp::Remove { index } => original.remove(*index)?,
        EditOp::Concat { other } => {
            let other = settings.parse_name(other)?;
            original.concat(Some(other.as_ref()))?
        }
    };
    output::action("original", &original.as_data_string()?);
    output::action("updated", &updated.as_data_string()?);
    Ok(exitcode::OK)
}

#[instrument]
fn _tree(find: Option<&str>, buggy: bool) -> CliResult<i32> {
    let tree = sample_tree(buggy)?;
    output::info(&tree.to_tree_string());

    if let Some(base_name) = find {
        let matches = tree.find_nodes(tree.root(), base_name)?;
        output::header(&format!("{} match(es) for {:?}", matches.len(), base_name));
        for idx in matches {
            output::detail(&tree.full_name(idx)?.as_string(None)?);
        }
    }
    Ok(exitcode::OK)
}
